use serde::{Deserialize, Serialize};
use std::fmt;

/// Composite index key `street-house-unit`, normalized so that casing,
/// stray punctuation and repeated whitespace do not affect joins.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LookupKey(String);

impl LookupKey {
    pub fn new(street: &str, house_number: &str, unit_number: &str) -> Self {
        Self(format!(
            "{}-{}-{}",
            normalize_component(street),
            normalize_component(house_number),
            normalize_component(unit_number)
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub(crate) fn normalize_component(value: &str) -> String {
    let cleaned = value.replace(['.', ',', '\u{feff}', '\u{200b}'], " ");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_lowercase()
}
