use crate::reply::{MESSAGE_REQUIRED, NAME_REQUIRED};

use super::parser::FormData;

/// A submission that passed validation. Both fields are trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub msg: String,
}

/// Check the required fields in order and stop at the first failure.
/// The error is the prompt shown to the user.
pub fn validate(form: &FormData) -> Result<Entry, &'static str> {
    let name = trim(form.get("name").unwrap_or(""));
    let msg = trim(form.get("msg").unwrap_or(""));

    if name.is_empty() {
        return Err(NAME_REQUIRED);
    }
    if msg.is_empty() {
        return Err(MESSAGE_REQUIRED);
    }

    Ok(Entry {
        name: name.to_string(),
        msg: msg.to_string(),
    })
}

/// Strip surrounding whitespace, counting a byte-order mark as whitespace
/// the way browsers do.
fn trim(value: &str) -> &str {
    value.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}
