//! Raw WHOIS response text → normalized [`Record`].

use once_cell::sync::Lazy;
use regex::Regex;

use super::types::Record;

/// Matches a `Some Field Label: value` line. The label is one or more
/// capitalized words (uppercase letter followed by lowercase/uppercase
/// letters), single-space separated, followed immediately by a colon.
/// Everything after the colon is the value.
static FIELD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^((?:[A-Z][A-Za-z]+ ?)+):(.*)$").expect("valid field regex"));

/// Parses raw WHOIS response text into a [`Record`].
///
/// Splits the input into lines and collects every line matching the field
/// pattern into the value set keyed by the field label, used verbatim
/// (including internal spacing and capitalization). Values are trimmed of
/// surrounding whitespace. Lines that don't match (blank lines, banners,
/// legal boilerplate) are ignored.
///
/// Total: never fails, an input with no matching lines yields an empty
/// record.
pub fn parse_record(raw: &str) -> Record {
    let mut record = Record::new();

    for line in raw.lines() {
        if let Some(caps) = FIELD_RE.captures(line) {
            let field = caps[1].to_string();
            let value = caps[2].trim().to_string();
            record.entry(field).or_default().insert(value);
        }
    }

    record
}
