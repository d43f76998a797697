//! User-facing text for the uploader. The service and its audience are Thai,
//! so labels and notices stay in Thai; log lines elsewhere stay in English.

pub const WINDOW_TITLE: &str = "Barcode Reader - อ่าน Barcode และเปลี่ยนชื่อไฟล์";
pub const SUBTITLE: &str = "อ่าน Barcode จากไฟล์ภาพ JPG และเปลี่ยนชื่อไฟล์อัตโนมัติ";

pub const PICK_SECTION_LABEL: &str = "เลือกหลายไฟล์:";
pub const PICK_BUTTON: &str = "เลือกไฟล์ภาพ";
pub const PICKER_TITLE: &str = "เลือกไฟล์ภาพ (หลายไฟล์)";
pub const DROP_HINT: &str = "หรือลากไฟล์มาวางที่นี่";

pub const ACTION_IDLE: &str = "ประมวลผลไฟล์";
pub const ACTION_NO_VALID_FILES: &str = "ไม่มีไฟล์ที่ถูกต้อง";
pub const ACTION_SUBMITTING: &str = "กำลังประมวลผล...";

pub const EMPTY_SELECTION_ALERT: &str = "กรุณาเลือกไฟล์ก่อนส่ง";
pub const MODAL_TITLE: &str = "กำลังประมวลผล";
pub const MODAL_BODY: &str = "กรุณารอสักครู่ ระบบกำลังอ่าน Barcode จากไฟล์ของคุณ";

pub const INVALID_EXTENSION: &str = "ไฟล์ต้องเป็น .jpg หรือ .jpeg";
pub const OVERSIZED: &str = "ขนาดไฟล์เกิน 16 MB";
pub const WARNING_PANEL_TITLE: &str = "พบไฟล์ที่ไม่รองรับ:";

pub const RESULTS_HEADER: &str = "ผลการประมวลผล:";
pub const ROW_DOWNLOAD: &str = "ดาวน์โหลด";
pub const DOWNLOAD_ALL: &str = "ดาวน์โหลดทั้งหมด";
pub const CLEAR_RESULTS: &str = "ลบไฟล์ทั้งหมด";
pub const DOWNLOADING: &str = "กำลังดาวน์โหลด...";

pub const DOWNLOAD_ERROR: &str = "เกิดข้อผิดพลาดในการดาวน์โหลด";
pub const CLEARED_NOTICE: &str = "ลบไฟล์ทั้งหมดแล้ว";
pub const CLEAR_ERROR: &str = "เกิดข้อผิดพลาดในการลบไฟล์";

pub const SHORTCUTS_TITLE: &str = "คีย์ลัด";
pub const SHORTCUT_PICK: &str = "Ctrl+U: เลือกไฟล์";
pub const SHORTCUT_CLEAR: &str = "Esc: ยกเลิกการเลือก";

pub fn process_count_label(count: usize) -> String {
    format!("ประมวลผล {count} ไฟล์")
}

pub fn batch_success_notice(count: usize) -> String {
    format!("ประมวลผลสำเร็จ {count} ไฟล์")
}

pub fn batch_failure_notice(count: usize) -> String {
    format!("ประมวลผลไม่สำเร็จ {count} ไฟล์")
}

pub fn generic_error_notice(detail: &str) -> String {
    format!("เกิดข้อผิดพลาด: {detail}")
}
