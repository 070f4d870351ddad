//! Address resolution core for the property-management back office.
//!
//! Free-text apartment strings (typed by tenants, pasted from spreadsheets or
//! lifted from e-mail subjects) are parsed into structured addresses, joined
//! against pre-loaded apartment and tenant indices, and ordered for review
//! and export screens.

pub mod addresses;
pub mod config;
pub mod directory;
pub mod error;
pub mod interests;
pub mod resolution;
pub mod telemetry;

pub use addresses::{AddressParser, LookupKey, ParsedAddress, PostalDirectory, StrategyKind};
pub use directory::{
    ApartmentIndex, ApartmentRecord, EntityResolver, TenantIndex, TenantLookup, TenantRecord,
};
pub use interests::{InterestRecord, InterestSorter, InterestStatus};
