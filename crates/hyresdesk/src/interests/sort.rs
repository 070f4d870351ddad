use super::collation::{collation_key, SwedishCollationKey};
use super::domain::InterestRecord;
use super::group::{group_in_order, InterestGroup};
use crate::addresses::{AddressParser, LookupKey, ParsedAddress, PostalDirectory};
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// Ordering key for one interest: city, street, house number, unit number,
/// then most recent showing first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct InterestSortKey {
    city: SwedishCollationKey,
    street: SwedishCollationKey,
    house_number: u64,
    unit_number: u64,
    showing: Reverse<i64>,
}

/// Groups and orders interest registrations by their parsed address.
#[derive(Debug, Clone, Default)]
pub struct InterestSorter<'d> {
    parser: AddressParser,
    postal: Option<&'d PostalDirectory>,
}

impl<'d> InterestSorter<'d> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parser(mut self, parser: AddressParser) -> Self {
        self.parser = parser;
        self
    }

    /// Supplies cities for addresses that do not carry one themselves.
    pub fn with_postal_directory(mut self, postal: &'d PostalDirectory) -> Self {
        self.postal = Some(postal);
        self
    }

    /// City for an address: the detected city token, else the postal
    /// directory entry for the street, else empty.
    pub fn city_for(&self, parsed: &ParsedAddress) -> String {
        if let Some(city) = &parsed.city {
            return city.clone();
        }
        self.postal
            .and_then(|postal| postal.city_for(&parsed.street))
            .unwrap_or_default()
            .to_string()
    }

    /// Unparsable addresses sort with an empty city, the raw text as street
    /// and zero house and unit numbers.
    pub fn sort_key(&self, interest: &InterestRecord) -> InterestSortKey {
        let showing = Reverse(
            interest
                .showing_at
                .map(|showing| showing.timestamp_millis())
                .unwrap_or(0),
        );

        match self.parser.parse(&interest.apartment) {
            Some(parsed) => InterestSortKey {
                city: collation_key(&self.city_for(&parsed)),
                street: collation_key(&parsed.street),
                house_number: leading_number(&parsed.house_number),
                unit_number: leading_number(&parsed.unit_number),
                showing,
            },
            None => InterestSortKey {
                city: collation_key(""),
                street: collation_key(&interest.apartment),
                house_number: 0,
                unit_number: 0,
                showing,
            },
        }
    }

    /// Stable: records with equal keys keep their input order.
    pub fn sort(&self, interests: Vec<InterestRecord>) -> Vec<InterestRecord> {
        let mut keyed: Vec<(InterestSortKey, InterestRecord)> = interests
            .into_iter()
            .map(|interest| (self.sort_key(&interest), interest))
            .collect();
        keyed.sort_by(|left, right| left.0.cmp(&right.0));
        keyed.into_iter().map(|(_, interest)| interest).collect()
    }

    pub fn sort_refs<'i>(&self, interests: &'i [InterestRecord]) -> Vec<&'i InterestRecord> {
        let mut keyed: Vec<(InterestSortKey, &InterestRecord)> = interests
            .iter()
            .map(|interest| (self.sort_key(interest), interest))
            .collect();
        keyed.sort_by(|left, right| left.0.cmp(&right.0));
        keyed.into_iter().map(|(_, interest)| interest).collect()
    }

    pub fn group_by_apartment<'i>(
        &self,
        interests: &'i [InterestRecord],
    ) -> BTreeMap<LookupKey, InterestGroup<'i>> {
        group_in_order(&self.parser, interests.iter())
            .into_iter()
            .map(|group| (group.key.clone(), group))
            .collect()
    }

    /// Groups in sort order: groups appear in the order of their first
    /// member after sorting, members sorted within each group.
    pub fn sorted_groups<'i>(&self, interests: &'i [InterestRecord]) -> Vec<InterestGroup<'i>> {
        group_in_order(&self.parser, self.sort_refs(interests))
    }
}

/// Stable sort with the default parser and no postal directory.
pub fn sort_interests(interests: Vec<InterestRecord>) -> Vec<InterestRecord> {
    InterestSorter::new().sort(interests)
}

/// Leading decimal digits as a number; anything without a numeric prefix is 0.
pub fn leading_number(value: &str) -> u64 {
    value
        .trim()
        .chars()
        .map_while(|c| c.to_digit(10))
        .fold(0u64, |acc, digit| {
            acc.saturating_mul(10).saturating_add(u64::from(digit))
        })
}
