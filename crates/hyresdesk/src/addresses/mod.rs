//! Free-text address parsing and the keys used to join parsed addresses
//! against apartment records.

mod key;
mod parser;
mod postal;
mod strategy;

pub use key::LookupKey;
pub use parser::{is_sentinel, parse_address, AddressParser, ParsedAddress, NON_ADDRESS_SENTINELS};
pub use postal::{PostalArea, PostalDirectory, PostalDirectoryError};
pub use strategy::{first_success, AddressParts, StrategyKind};
