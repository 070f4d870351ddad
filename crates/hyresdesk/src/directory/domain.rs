use crate::addresses::LookupKey;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier wrapper for apartments.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApartmentId(pub String);

/// Identifier wrapper for tenants.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(pub String);

impl fmt::Display for ApartmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Apartment as fetched from the back office API.
///
/// `occupant_tenant_ids` keeps API order; the first entry is the primary occupant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApartmentRecord {
    pub id: ApartmentId,
    pub street: String,
    pub house_number: String,
    #[serde(default)]
    pub unit_number: String,
    #[serde(default)]
    pub occupant_tenant_ids: Vec<TenantId>,
}

impl ApartmentRecord {
    pub fn lookup_key(&self) -> LookupKey {
        LookupKey::new(&self.street, &self.house_number, &self.unit_number)
    }

    pub fn primary_occupant(&self) -> Option<&TenantId> {
        self.occupant_tenant_ids.first()
    }
}

/// Tenant as fetched from the back office API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantRecord {
    pub id: TenantId,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
}

impl TenantRecord {
    /// Stand-in tenant shown for interests registered without an address.
    pub fn placeholder() -> Self {
        Self {
            id: TenantId("placeholder-address-missing".to_string()),
            first_name: "Okänd".to_string(),
            last_name: "Hyresgäst".to_string(),
            phone: String::new(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}
