//! Apartment and tenant records, their lookup indices, and the resolver that
//! joins raw address strings against them.

pub mod domain;
pub mod fixtures;
mod index;
mod resolver;

pub use domain::{ApartmentId, ApartmentRecord, TenantId, TenantRecord};
pub use fixtures::{load_json, FixtureError};
pub use index::{ApartmentIndex, TenantIndex};
pub use resolver::{EntityResolver, Resolution, TenantLookup, MISSING_ADDRESS_SENTINEL};
