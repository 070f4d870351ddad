use super::key::LookupKey;
use super::strategy::{first_success, AddressParts, StrategyKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Values that mean "no address given". Matched exactly after trimming.
pub const NON_ADDRESS_SENTINELS: [&str; 5] = ["", "Ingen", "ingen", "N/A", "-"];

/// Substrings that mark a first token as part of the street name rather than
/// a city prefix. "tan" is broad and also matches unrelated words; the
/// heuristic is a known approximation and is kept as-is.
const STREET_TOKEN_MARKERS: [&str; 3] = ["gatan", "vägen", "tan"];

/// A structured address recovered from free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedAddress {
    pub street: String,
    pub house_number: String,
    pub unit_number: String,
    /// Leading token split off the street by the city heuristic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    pub matched_by: StrategyKind,
}

impl ParsedAddress {
    pub fn lookup_key(&self) -> LookupKey {
        LookupKey::new(&self.street, &self.house_number, &self.unit_number)
    }

    /// Street with the detected city token put back in front.
    pub fn full_street(&self) -> String {
        match &self.city {
            Some(city) => format!("{city} {}", self.street),
            None => self.street.clone(),
        }
    }

    /// Key built from [`ParsedAddress::full_street`], only when a city was split off.
    pub fn city_qualified_key(&self) -> Option<LookupKey> {
        self.city.as_ref().map(|_| {
            LookupKey::new(&self.full_street(), &self.house_number, &self.unit_number)
        })
    }

    pub fn has_unit(&self) -> bool {
        !self.unit_number.is_empty()
    }
}

impl fmt::Display for ParsedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.street, self.house_number)?;
        if self.has_unit() {
            write!(f, ", lgh {}", self.unit_number)?;
        }
        Ok(())
    }
}

/// Ordered chain of parse strategies; the first one that matches wins.
#[derive(Debug, Clone)]
pub struct AddressParser {
    strategies: Vec<StrategyKind>,
}

impl Default for AddressParser {
    fn default() -> Self {
        Self::standard()
    }
}

impl AddressParser {
    pub fn standard() -> Self {
        Self::with_strategies(StrategyKind::ordered())
    }

    pub fn with_strategies(strategies: impl IntoIterator<Item = StrategyKind>) -> Self {
        Self {
            strategies: strategies.into_iter().collect(),
        }
    }

    pub fn strategies(&self) -> &[StrategyKind] {
        &self.strategies
    }

    pub fn parse(&self, raw: &str) -> Option<ParsedAddress> {
        let trimmed = raw.trim();
        if is_sentinel(trimmed) {
            return None;
        }

        let Some((matched_by, parts)) =
            first_success(self.strategies.iter().copied(), |strategy| {
                strategy.apply(trimmed)
            })
        else {
            if looks_like_address(trimmed) {
                warn!(raw = trimmed, "address looked parseable but no strategy matched");
            }
            return None;
        };

        let parsed = finish(parts, matched_by);
        debug!(
            raw = trimmed,
            strategy = matched_by.label(),
            key = %parsed.lookup_key(),
            "parsed address"
        );
        Some(parsed)
    }
}

/// Parses with the standard strategy order.
pub fn parse_address(raw: &str) -> Option<ParsedAddress> {
    AddressParser::standard().parse(raw)
}

pub fn is_sentinel(trimmed: &str) -> bool {
    NON_ADDRESS_SENTINELS.contains(&trimmed)
}

fn finish(parts: AddressParts, matched_by: StrategyKind) -> ParsedAddress {
    let (city, street) = split_city_prefix(parts.street.trim());
    ParsedAddress {
        street,
        house_number: parts.house_number,
        unit_number: parts.unit_number,
        city,
        matched_by,
    }
}

fn split_city_prefix(street: &str) -> (Option<String>, String) {
    let tokens: Vec<&str> = street.split_whitespace().collect();
    if tokens.len() < 2 {
        return (None, street.to_string());
    }

    let first = tokens[0].to_lowercase();
    if STREET_TOKEN_MARKERS
        .iter()
        .any(|marker| first.contains(marker))
    {
        return (None, street.to_string());
    }

    (Some(tokens[0].to_string()), tokens[1..].join(" "))
}

fn looks_like_address(trimmed: &str) -> bool {
    trimmed.chars().any(char::is_alphabetic) && trimmed.chars().any(|c| c.is_ascii_digit())
}
