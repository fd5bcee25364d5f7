//! Letter templates - plain text with placeholders
//!
//! Supports:
//! - Key interpolation: `${NAMA}`
//! - Fallbacks: `${NAMA ?? ALIAS ?? 'Karyawan'}`

mod ast;
mod eval;
mod parser;

pub use ast::{LetterTemplate, Placeholder, TemplatePart, Term};
pub use eval::evaluate;
pub use parser::{ParseError, parse_template};
