//! Rule-based field scanners for KTP lines.
//!
//! Each scanner is a pure function over the line sequence and the NIK anchor
//! index; the parser composes them with explicit calls and no shared state.

pub mod dates;
pub mod name;
pub mod nik;
pub mod patterns;

pub use dates::{DateTriple, extract_birth_date, format_birth_date};
pub use name::extract_name;
pub use nik::{NikAnchor, locate_nik};
