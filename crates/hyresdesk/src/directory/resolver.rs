use super::domain::{ApartmentId, ApartmentRecord, TenantId, TenantRecord};
use super::index::{ApartmentIndex, TenantIndex};
use crate::addresses::{AddressParser, LookupKey, ParsedAddress};
use crate::config::ResolverConfig;
use serde::Serialize;
use tracing::{debug, warn};

/// Raw value that stands for "address missing" in demo and test data.
pub const MISSING_ADDRESS_SENTINEL: &str = "Adress saknas";

/// Outcome of a tenant lookup.
///
/// Callers that only need the tenant use [`EntityResolver::resolve_tenant`];
/// the variants keep the different upstream data problems apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TenantLookup<'r> {
    Found {
        apartment: &'r ApartmentRecord,
        tenant: &'r TenantRecord,
    },
    Placeholder(&'r TenantRecord),
    Unparsable,
    NoApartment(LookupKey),
    Vacant(&'r ApartmentRecord),
    DanglingOccupant {
        apartment: &'r ApartmentRecord,
        tenant_id: &'r TenantId,
    },
}

impl<'r> TenantLookup<'r> {
    pub fn tenant(&self) -> Option<&'r TenantRecord> {
        match self {
            TenantLookup::Found { tenant, .. } | TenantLookup::Placeholder(tenant) => {
                Some(*tenant)
            }
            _ => None,
        }
    }

    pub fn apartment(&self) -> Option<&'r ApartmentRecord> {
        match self {
            TenantLookup::Found { apartment, .. }
            | TenantLookup::Vacant(apartment)
            | TenantLookup::DanglingOccupant { apartment, .. } => Some(*apartment),
            _ => None,
        }
    }
}

/// Per-entry result of a batch resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub raw: String,
    pub parsed: Option<ParsedAddress>,
    pub apartment_id: Option<ApartmentId>,
    pub tenant_id: Option<TenantId>,
}

pub(crate) struct ResolvedEntry<'r> {
    pub(crate) parsed: Option<ParsedAddress>,
    pub(crate) apartment: Option<&'r ApartmentRecord>,
    pub(crate) tenant: Option<&'r TenantRecord>,
}

/// Joins raw address strings against fully populated apartment and tenant
/// indices. Exact key matches only; every miss is `None`.
#[derive(Debug)]
pub struct EntityResolver<'a> {
    parser: AddressParser,
    apartments: &'a ApartmentIndex,
    tenants: &'a TenantIndex,
    placeholder: Option<TenantRecord>,
}

impl<'a> EntityResolver<'a> {
    pub fn new(apartments: &'a ApartmentIndex, tenants: &'a TenantIndex) -> Self {
        Self {
            parser: AddressParser::standard(),
            apartments,
            tenants,
            placeholder: Some(TenantRecord::placeholder()),
        }
    }

    pub fn from_config(
        apartments: &'a ApartmentIndex,
        tenants: &'a TenantIndex,
        config: &ResolverConfig,
    ) -> Self {
        let resolver = Self::new(apartments, tenants);
        if config.placeholder_tenant {
            resolver
        } else {
            resolver.without_placeholder()
        }
    }

    pub fn with_parser(mut self, parser: AddressParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn without_placeholder(mut self) -> Self {
        self.placeholder = None;
        self
    }

    pub fn resolve_apartment(&self, raw: &str) -> Option<&'a ApartmentRecord> {
        let parsed = self.parser.parse(raw)?;
        self.apartment_for(&parsed)
    }

    pub fn resolve_tenant(&self, raw: &str) -> Option<&TenantRecord> {
        self.lookup_tenant(raw).tenant()
    }

    pub fn lookup_tenant(&self, raw: &str) -> TenantLookup<'_> {
        if let Some(placeholder) = self.placeholder_for(raw) {
            return TenantLookup::Placeholder(placeholder);
        }

        let Some(parsed) = self.parser.parse(raw) else {
            return TenantLookup::Unparsable;
        };

        match self.apartment_for(&parsed) {
            Some(apartment) => self.tenant_for(apartment),
            None => TenantLookup::NoApartment(parsed.lookup_key()),
        }
    }

    /// Resolves a batch of raw strings, keeping input order.
    pub fn resolve_many<I, S>(&self, raws: I) -> Vec<Resolution>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        raws.into_iter()
            .map(|raw| {
                let raw = raw.as_ref();
                let entry = self.resolve_entry(raw);
                Resolution {
                    raw: raw.to_string(),
                    apartment_id: entry.apartment.map(|apartment| apartment.id.clone()),
                    tenant_id: entry.tenant.map(|tenant| tenant.id.clone()),
                    parsed: entry.parsed,
                }
            })
            .collect()
    }

    /// Parses once and resolves both apartment and tenant for one raw string.
    pub(crate) fn resolve_entry(&self, raw: &str) -> ResolvedEntry<'_> {
        let parsed = self.parser.parse(raw);
        let apartment = parsed
            .as_ref()
            .and_then(|parsed| self.apartment_for(parsed));
        let tenant = match apartment {
            Some(apartment) => self.tenant_for(apartment).tenant(),
            None => self.placeholder_for(raw),
        };

        ResolvedEntry {
            parsed,
            apartment,
            tenant,
        }
    }

    pub(crate) fn apartment_for(&self, parsed: &ParsedAddress) -> Option<&'a ApartmentRecord> {
        // Street as written first; the city heuristic also splits
        // multi-word streets such as "Stora Nygatan".
        if let Some(qualified) = parsed.city_qualified_key() {
            if let Some(apartment) = self.apartments.get(&qualified) {
                debug!(%qualified, "matched apartment with city token kept in street");
                return Some(apartment);
            }
        }
        self.apartments.get(&parsed.lookup_key())
    }

    pub(crate) fn tenant_for(&self, apartment: &'a ApartmentRecord) -> TenantLookup<'a> {
        let Some(tenant_id) = apartment.primary_occupant() else {
            debug!(apartment = %apartment.id, "apartment has no occupants");
            return TenantLookup::Vacant(apartment);
        };

        match self.tenants.get(tenant_id) {
            Some(tenant) => TenantLookup::Found { apartment, tenant },
            None => {
                warn!(
                    apartment = %apartment.id,
                    tenant = %tenant_id,
                    "primary occupant missing from tenant index"
                );
                TenantLookup::DanglingOccupant {
                    apartment,
                    tenant_id,
                }
            }
        }
    }

    fn placeholder_for(&self, raw: &str) -> Option<&TenantRecord> {
        self.placeholder
            .as_ref()
            .filter(|_| raw.trim() == MISSING_ADDRESS_SENTINEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tenant(id: &str, first: &str, last: &str) -> TenantRecord {
        TenantRecord {
            id: TenantId(id.to_string()),
            first_name: first.to_string(),
            last_name: last.to_string(),
            phone: "031-12 34 56".to_string(),
        }
    }

    fn apartment(
        id: &str,
        street: &str,
        house: &str,
        unit: &str,
        occupants: &[&str],
    ) -> ApartmentRecord {
        ApartmentRecord {
            id: ApartmentId(id.to_string()),
            street: street.to_string(),
            house_number: house.to_string(),
            unit_number: unit.to_string(),
            occupant_tenant_ids: occupants
                .iter()
                .map(|id| TenantId(id.to_string()))
                .collect(),
        }
    }

    fn fixtures() -> (ApartmentIndex, TenantIndex) {
        let apartments = ApartmentIndex::build([
            apartment("a-1", "Storgatan", "5", "1001", &["t-1", "t-2"]),
            apartment("a-2", "Storgatan", "5", "1002", &[]),
            apartment("a-3", "Storgatan", "7", "1001", &["missing-id"]),
            apartment("a-4", "Stora Nygatan", "12", "1101", &["t-2"]),
        ]);
        let tenants = TenantIndex::build([
            tenant("t-1", "Astrid", "Lind"),
            tenant("t-2", "Erik", "Berg"),
        ]);
        (apartments, tenants)
    }

    #[test]
    fn resolves_primary_occupant() {
        let (apartments, tenants) = fixtures();
        let resolver = EntityResolver::new(&apartments, &tenants);

        let apartment = resolver
            .resolve_apartment("Storgatan 5, LGH 1001")
            .expect("apartment");
        assert_eq!(apartment.id.0, "a-1");

        let tenant = resolver
            .resolve_tenant("storgatan 5 lgh 1001")
            .expect("tenant");
        assert_eq!(tenant.id.0, "t-1");
    }

    #[test]
    fn distinguishes_vacant_from_dangling() {
        let (apartments, tenants) = fixtures();
        let resolver = EntityResolver::new(&apartments, &tenants);

        let vacant = resolver.lookup_tenant("Storgatan 5, lgh 1002");
        assert!(matches!(vacant, TenantLookup::Vacant(apartment) if apartment.id.0 == "a-2"));
        assert!(vacant.tenant().is_none());
        assert_eq!(
            vacant.apartment().map(|apartment| apartment.id.0.as_str()),
            Some("a-2")
        );

        let dangling = resolver.lookup_tenant("Storgatan 7, lgh 1001");
        match dangling {
            TenantLookup::DanglingOccupant {
                apartment,
                tenant_id,
            } => {
                assert_eq!(apartment.id.0, "a-3");
                assert_eq!(tenant_id.0, "missing-id");
            }
            other => panic!("expected dangling occupant, got {other:?}"),
        }
        assert!(resolver.resolve_tenant("Storgatan 7, lgh 1001").is_none());
        assert!(resolver.resolve_apartment("Storgatan 7, lgh 1001").is_some());
    }

    #[test]
    fn misses_are_absent() {
        let (apartments, tenants) = fixtures();
        let resolver = EntityResolver::new(&apartments, &tenants);

        assert!(resolver.resolve_apartment("Ingen").is_none());
        assert!(resolver.resolve_apartment("Storgatan 9, lgh 1001").is_none());
        assert_eq!(resolver.lookup_tenant("N/A"), TenantLookup::Unparsable);
        assert_eq!(
            resolver.lookup_tenant("Storgatan 9, lgh 1001"),
            TenantLookup::NoApartment(LookupKey::new("Storgatan", "9", "1001"))
        );
    }

    #[test]
    fn restores_city_token_for_multi_word_streets() {
        let (apartments, tenants) = fixtures();
        let resolver = EntityResolver::new(&apartments, &tenants);

        let apartment = resolver
            .resolve_apartment("Stora Nygatan 12, lgh 1101")
            .expect("apartment");
        assert_eq!(apartment.id.0, "a-4");
    }

    #[test]
    fn full_street_beats_city_stripped_street() {
        let apartments = ApartmentIndex::build([
            apartment("nygatan", "Nygatan", "12", "1101", &[]),
            apartment("stora-nygatan", "Stora Nygatan", "12", "1101", &[]),
        ]);
        let tenants = TenantIndex::default();
        let resolver = EntityResolver::new(&apartments, &tenants);

        let apartment = resolver
            .resolve_apartment("Stora Nygatan 12, lgh 1101")
            .expect("apartment");
        assert_eq!(apartment.id.0, "stora-nygatan");

        let apartment = resolver
            .resolve_apartment("Nygatan 12, lgh 1101")
            .expect("apartment");
        assert_eq!(apartment.id.0, "nygatan");
    }

    #[test]
    fn city_prefix_falls_back_to_bare_street() {
        let (apartments, tenants) = fixtures();
        let resolver = EntityResolver::new(&apartments, &tenants);

        let apartment = resolver
            .resolve_apartment("Luleå Storgatan 5, lgh 1001")
            .expect("apartment");
        assert_eq!(apartment.id.0, "a-1");
    }

    #[test]
    fn found_lookup_carries_apartment_and_tenant() {
        let (apartments, tenants) = fixtures();
        let resolver = EntityResolver::new(&apartments, &tenants);

        let lookup = resolver.lookup_tenant("Storgatan 5, LGH 1001");
        match lookup {
            TenantLookup::Found { apartment, tenant } => {
                assert_eq!(apartment.id.0, "a-1");
                assert_eq!(tenant.id.0, "t-1");
            }
            ref other => panic!("expected found, got {other:?}"),
        }
        assert_eq!(
            lookup.apartment().map(|apartment| apartment.id.0.as_str()),
            Some("a-1")
        );
        assert_eq!(
            lookup.tenant().map(|tenant| tenant.id.0.as_str()),
            Some("t-1")
        );

        let placeholder = resolver.lookup_tenant("Adress saknas");
        assert!(placeholder.apartment().is_none());
        assert!(placeholder.tenant().is_some());
    }

    #[test]
    fn placeholder_tenant_for_missing_address() {
        let (apartments, tenants) = fixtures();
        let resolver = EntityResolver::new(&apartments, &tenants);

        let tenant = resolver
            .resolve_tenant(" Adress saknas ")
            .expect("placeholder");
        assert_eq!(tenant, &TenantRecord::placeholder());
        assert!(resolver.resolve_apartment("Adress saknas").is_none());

        let strict = EntityResolver::new(&apartments, &tenants).without_placeholder();
        assert!(strict.resolve_tenant("Adress saknas").is_none());
    }

    #[test]
    fn from_config_honours_placeholder_flag() {
        let (apartments, tenants) = fixtures();
        let config = ResolverConfig {
            postal_codes: None,
            placeholder_tenant: false,
        };
        let resolver = EntityResolver::from_config(&apartments, &tenants, &config);
        assert_eq!(resolver.lookup_tenant("Adress saknas"), TenantLookup::Unparsable);
    }

    #[test]
    fn resolve_many_keeps_input_order() {
        let (apartments, tenants) = fixtures();
        let resolver = EntityResolver::new(&apartments, &tenants);

        let results = resolver.resolve_many([
            "Storgatan 5, lgh 1002",
            "Ingen",
            "Storgatan 5, LGH 1001",
            "Adress saknas",
        ]);

        assert_eq!(results.len(), 4);
        assert_eq!(
            results[0].apartment_id,
            Some(ApartmentId("a-2".to_string()))
        );
        assert!(results[0].tenant_id.is_none());
        assert!(results[1].parsed.is_none());
        assert_eq!(results[2].tenant_id, Some(TenantId("t-1".to_string())));
        assert_eq!(
            results[3].tenant_id,
            Some(TenantRecord::placeholder().id)
        );
    }
}
