//! Golden-list template parsing and expansion.
//!
//! A golden list is a text file with one expected file-name pattern per
//! line. Patterns may contain placeholders:
//!
//! | Token                     | Expands to                                   |
//! |---------------------------|----------------------------------------------|
//! | `<block>`, `<>`           | the SoC block name                           |
//! | `<mode>`                  | one line per mode                            |
//! | `<MODE>`, `<PVTE><Mode>`  | one line per `P_V_T_E_Mode` combination      |
//!
//! Any other bracketed span, or an unbalanced bracket, is rejected.

mod expand;
mod parse;
mod types;

pub use expand::{expand, pvte_combinations, validate_block_name, ExpectedNames};
pub use parse::{parse_line, parse_template, TemplateError};
pub use types::{Placeholder, Segment, TemplateLine};
