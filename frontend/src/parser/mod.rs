pub mod core;
pub mod stmt;
pub mod error;

pub use core::Parser;
pub use error::{ParserError, ParserErrorKind, ParserResult};
