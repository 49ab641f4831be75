pub mod attributes;
pub mod date_format;
pub mod element;
pub mod field;
pub mod wire;
