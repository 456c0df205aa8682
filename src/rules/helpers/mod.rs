//! Pure helpers used by rule predicates and descriptions.
//!
//! Nothing in here fails: malformed input yields a neutral value (`0`, `false`,
//! or an empty list). Time-derived helpers take the date or instant explicitly.

pub mod calendar;
pub mod numeral;
pub mod text;

pub use calendar::*;
pub use numeral::*;
pub use text::*;
