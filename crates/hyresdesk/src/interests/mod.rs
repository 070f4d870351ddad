//! Interest registrations: Swedish-collated ordering, grouping by apartment,
//! and annotation with resolved tenants for the review screen.

pub mod collation;
pub mod domain;
mod group;
pub mod review;
mod sort;

pub use domain::{ContactDetails, InterestRecord, InterestStatus};
pub use group::{group_by_apartment, InterestGroup};
pub use review::{annotate, summarize, ReviewSummary, ReviewedInterest, TenantSummary};
pub use sort::{leading_number, sort_interests, InterestSortKey, InterestSorter};
