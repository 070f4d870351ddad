use super::domain::{ApartmentRecord, TenantId, TenantRecord};
use crate::addresses::LookupKey;
use std::collections::HashMap;
use tracing::debug;

/// Apartments keyed by normalized `street-house-unit`.
///
/// Built once per resolution session from the complete apartment list.
/// Duplicate keys keep the last record.
#[derive(Debug, Clone, Default)]
pub struct ApartmentIndex {
    by_key: HashMap<LookupKey, ApartmentRecord>,
}

impl ApartmentIndex {
    pub fn build<I>(records: I) -> Self
    where
        I: IntoIterator<Item = ApartmentRecord>,
    {
        let mut by_key = HashMap::new();
        for record in records {
            let key = record.lookup_key();
            if let Some(previous) = by_key.insert(key.clone(), record) {
                debug!(%key, replaced = %previous.id, "duplicate apartment key");
            }
        }
        Self { by_key }
    }

    pub fn get(&self, key: &LookupKey) -> Option<&ApartmentRecord> {
        self.by_key.get(key)
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &ApartmentRecord> {
        self.by_key.values()
    }
}

impl FromIterator<ApartmentRecord> for ApartmentIndex {
    fn from_iter<T: IntoIterator<Item = ApartmentRecord>>(iter: T) -> Self {
        Self::build(iter)
    }
}

/// Tenants keyed by id.
#[derive(Debug, Clone, Default)]
pub struct TenantIndex {
    by_id: HashMap<TenantId, TenantRecord>,
}

impl TenantIndex {
    pub fn build<I>(records: I) -> Self
    where
        I: IntoIterator<Item = TenantRecord>,
    {
        Self {
            by_id: records
                .into_iter()
                .map(|record| (record.id.clone(), record))
                .collect(),
        }
    }

    pub fn get(&self, id: &TenantId) -> Option<&TenantRecord> {
        self.by_id.get(id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

impl FromIterator<TenantRecord> for TenantIndex {
    fn from_iter<T: IntoIterator<Item = TenantRecord>>(iter: T) -> Self {
        Self::build(iter)
    }
}
