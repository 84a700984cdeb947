pub mod catalog;
pub mod mime;
pub mod scanner;
