//! Normalized WHOIS record model: parsing raw response text into a
//! field-name → value-set map and diffing two such maps.

mod diff;
mod parse;
mod types;

pub use diff::diff_records;
pub use parse::parse_record;
pub use types::{Discrepancy, Record};
