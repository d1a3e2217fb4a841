pub mod error;
pub mod format;
pub mod month;
pub mod parse;
