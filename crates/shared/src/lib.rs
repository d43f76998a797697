pub mod domain;
pub mod strings;
pub mod validate;
