use super::domain::InterestRecord;
use crate::addresses::{AddressParser, LookupKey};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Interests that resolved to the same apartment key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterestGroup<'i> {
    pub key: LookupKey,
    pub display_address: String,
    pub interests: Vec<&'i InterestRecord>,
}

/// Groups interests by apartment with the standard parser.
///
/// Interests whose address does not parse are left out of every group.
pub fn group_by_apartment(interests: &[InterestRecord]) -> BTreeMap<LookupKey, InterestGroup<'_>> {
    group_in_order(&AddressParser::standard(), interests.iter())
        .into_iter()
        .map(|group| (group.key.clone(), group))
        .collect()
}

/// Groups in order of first appearance; members keep their relative order.
pub(crate) fn group_in_order<'i, I>(parser: &AddressParser, interests: I) -> Vec<InterestGroup<'i>>
where
    I: IntoIterator<Item = &'i InterestRecord>,
{
    let mut positions: HashMap<LookupKey, usize> = HashMap::new();
    let mut groups: Vec<InterestGroup<'i>> = Vec::new();

    for interest in interests {
        let Some(parsed) = parser.parse(&interest.apartment) else {
            debug!(interest = %interest.id, "interest left out of grouping, address unparsable");
            continue;
        };

        let key = parsed.lookup_key();
        match positions.get(&key) {
            Some(&position) => groups[position].interests.push(interest),
            None => {
                positions.insert(key.clone(), groups.len());
                groups.push(InterestGroup {
                    key,
                    display_address: parsed.to_string(),
                    interests: vec![interest],
                });
            }
        }
    }

    groups
}
