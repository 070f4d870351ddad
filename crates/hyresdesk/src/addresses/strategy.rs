use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Street: a letter followed by letters, spaces and the punctuation seen in
/// abbreviations ("St. Eriksgatan", "Karl-Johans väg"). Never digits.
const STREET: &str = r"(?P<street>\p{L}[\p{L}\s.'\-]*?)";
/// House number: digits with an optional letter suffix ("31A").
const HOUSE: &str = r"(?P<house>\d+\p{L}?)";

static FULL: OnceLock<Regex> = OnceLock::new();
static SIMPLE: OnceLock<Regex> = OnceLock::new();
static ADDRESS_ONLY: OnceLock<Regex> = OnceLock::new();
static SPLIT_HEAD: OnceLock<Regex> = OnceLock::new();
static DELIMITER: OnceLock<Regex> = OnceLock::new();

fn compiled(cell: &'static OnceLock<Regex>, pattern: impl FnOnce() -> String) -> &'static Regex {
    cell.get_or_init(|| Regex::new(&pattern()).expect("address pattern is a valid regex"))
}

fn full_pattern() -> &'static Regex {
    compiled(&FULL, || {
        format!(r"(?i)^\s*{STREET}\s*{HOUSE}\b(?:\s*,\s*|\s+)(?:(?:lgh|nr)\.?\s*)?(?P<unit>\d+)")
    })
}

fn simple_pattern() -> &'static Regex {
    compiled(&SIMPLE, || {
        format!(r"(?i)^\s*{STREET}\s*{HOUSE}\b\s+(?:nr\.?\s*)?(?P<unit>\d+)")
    })
}

fn address_only_pattern() -> &'static Regex {
    compiled(&ADDRESS_ONLY, || format!(r"^\s*{STREET}\s*{HOUSE}\b"))
}

fn split_head_pattern() -> &'static Regex {
    compiled(&SPLIT_HEAD, || format!(r"^\s*{STREET}\s*{HOUSE}\s*$"))
}

fn delimiter_pattern() -> &'static Regex {
    compiled(&DELIMITER, || r"(?i),|lgh".to_string())
}

/// Raw captures of a successful strategy, before city detection and trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressParts {
    pub street: String,
    pub house_number: String,
    pub unit_number: String,
}

/// The parse strategies, in the order the parser tries them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// `<street> <house>(,|spaces|LGH|nr)<unit>`
    Full,
    /// Split on `,` or `LGH`, street and house from the head, unit digits from the tail.
    SplitOnDelimiter,
    /// `<street> <house>(spaces|nr)<unit>`
    Simple,
    /// `<street> <house>` without a unit.
    AddressOnly,
}

impl StrategyKind {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Full,
            Self::SplitOnDelimiter,
            Self::Simple,
            Self::AddressOnly,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::SplitOnDelimiter => "split on delimiter",
            Self::Simple => "simple",
            Self::AddressOnly => "address only",
        }
    }

    pub fn apply(self, raw: &str) -> Option<AddressParts> {
        match self {
            Self::Full => captures_with_unit(full_pattern(), raw),
            Self::SplitOnDelimiter => split_on_delimiter(raw),
            Self::Simple => captures_with_unit(simple_pattern(), raw),
            Self::AddressOnly => {
                let captures = address_only_pattern().captures(raw)?;
                Some(AddressParts {
                    street: captures["street"].to_string(),
                    house_number: captures["house"].to_string(),
                    unit_number: String::new(),
                })
            }
        }
    }
}

/// Tries each candidate in order and returns the first one that produces a
/// value, together with the candidate that produced it.
pub fn first_success<I, T, F>(candidates: I, mut attempt: F) -> Option<(I::Item, T)>
where
    I: IntoIterator,
    I::Item: Copy,
    F: FnMut(I::Item) -> Option<T>,
{
    candidates
        .into_iter()
        .find_map(|candidate| attempt(candidate).map(|value| (candidate, value)))
}

fn captures_with_unit(pattern: &Regex, raw: &str) -> Option<AddressParts> {
    let captures = pattern.captures(raw)?;
    Some(AddressParts {
        street: captures["street"].to_string(),
        house_number: captures["house"].to_string(),
        unit_number: captures["unit"].to_string(),
    })
}

fn split_on_delimiter(raw: &str) -> Option<AddressParts> {
    let parts = split_parts(raw);
    if parts.len() < 2 {
        return None;
    }

    let head = split_head_pattern().captures(parts[0])?;
    let unit_number: String = parts[1..]
        .iter()
        .find(|part| !part.trim().is_empty())?
        .chars()
        .filter(char::is_ascii_digit)
        .collect();
    if unit_number.is_empty() {
        return None;
    }

    Some(AddressParts {
        street: head["street"].to_string(),
        house_number: head["house"].to_string(),
        unit_number,
    })
}

/// Splits on commas and on `LGH` tokens. `lgh` glued inside a word
/// ("Solgholmsvägen") is not a delimiter.
fn split_parts(raw: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;

    for found in delimiter_pattern().find_iter(raw) {
        if found.as_str() != "," && is_inside_word(raw, found.start(), found.end()) {
            continue;
        }
        parts.push(&raw[start..found.start()]);
        start = found.end();
    }
    parts.push(&raw[start..]);
    parts
}

fn is_inside_word(raw: &str, start: usize, end: usize) -> bool {
    let before = raw[..start].chars().next_back();
    let after = raw[end..].chars().next();
    before.is_some_and(char::is_alphabetic) || after.is_some_and(char::is_alphabetic)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(street: &str, house: &str, unit: &str) -> AddressParts {
        AddressParts {
            street: street.to_string(),
            house_number: house.to_string(),
            unit_number: unit.to_string(),
        }
    }

    #[test]
    fn full_accepts_comma_lgh_and_nr_separators() {
        assert_eq!(
            StrategyKind::Full.apply("Storgatan 5, LGH 1001"),
            Some(parts("Storgatan", "5", "1001"))
        );
        assert_eq!(
            StrategyKind::Full.apply("Storgatan 31A lgh. 1102"),
            Some(parts("Storgatan", "31A", "1102"))
        );
        assert_eq!(
            StrategyKind::Full.apply("Storgatan 7 NR 3"),
            Some(parts("Storgatan", "7", "3"))
        );
        assert_eq!(StrategyKind::Full.apply("Storgatan 5"), None);
    }

    #[test]
    fn full_ignores_trailing_room_descriptions() {
        assert_eq!(
            StrategyKind::Full.apply("Chapmansgatan 6 lgh 1001 1rok"),
            Some(parts("Chapmansgatan", "6", "1001"))
        );
    }

    #[test]
    fn split_takes_digits_from_first_non_blank_tail() {
        assert_eq!(
            StrategyKind::SplitOnDelimiter.apply("Storgatan 5 , lägenhet nr 1001"),
            Some(parts("Storgatan", "5", "1001"))
        );
        assert_eq!(
            StrategyKind::SplitOnDelimiter.apply("Storgatan 5lgh1001"),
            Some(parts("Storgatan", "5", "1001"))
        );
        assert_eq!(
            StrategyKind::SplitOnDelimiter.apply("Storgatan 5, LGH 1001"),
            Some(parts("Storgatan", "5", "1001"))
        );
    }

    #[test]
    fn split_requires_delimiter_and_unit_digits() {
        assert_eq!(StrategyKind::SplitOnDelimiter.apply("Storgatan 5"), None);
        assert_eq!(
            StrategyKind::SplitOnDelimiter.apply("Storgatan 5, Göteborg"),
            None
        );
    }

    #[test]
    fn split_does_not_cut_inside_street_names() {
        assert_eq!(
            split_parts("Solgholmsvägen 2, 1001"),
            vec!["Solgholmsvägen 2", " 1001"]
        );
    }

    #[test]
    fn simple_and_address_only_patterns() {
        assert_eq!(
            StrategyKind::Simple.apply("Kungsgatan 12 nr 4"),
            Some(parts("Kungsgatan", "12", "4"))
        );
        assert_eq!(StrategyKind::Simple.apply("Kungsgatan 12"), None);
        assert_eq!(
            StrategyKind::AddressOnly.apply("Kungsgatan 12 Göteborg"),
            Some(parts("Kungsgatan", "12", ""))
        );
        assert_eq!(StrategyKind::AddressOnly.apply("1001 Kungsgatan"), None);
    }

    #[test]
    fn first_success_reports_the_winning_candidate() {
        let winner = first_success([1, 2, 3, 4], |n| (n % 2 == 0).then(|| n * 10));
        assert_eq!(winner, Some((2, 20)));

        let none = first_success(Vec::<u8>::new(), |n| Some(n));
        assert!(none.is_none());
    }
}
