use super::domain::InterestRecord;
use crate::addresses::LookupKey;
use crate::directory::{ApartmentId, EntityResolver, TenantId, TenantRecord};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TenantSummary {
    pub id: TenantId,
    pub full_name: String,
    pub phone: String,
}

impl From<&TenantRecord> for TenantSummary {
    fn from(tenant: &TenantRecord) -> Self {
        Self {
            id: tenant.id.clone(),
            full_name: tenant.full_name(),
            phone: tenant.phone.clone(),
        }
    }
}

/// An interest together with the apartment and current tenant its address
/// resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewedInterest<'i> {
    pub interest: &'i InterestRecord,
    pub lookup_key: Option<LookupKey>,
    pub apartment_id: Option<ApartmentId>,
    pub tenant: Option<TenantSummary>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReviewSummary {
    pub total: usize,
    /// Interests not declined or withdrawn.
    pub open: usize,
    pub matched: usize,
    pub unmatched_apartment: usize,
    pub unparsable: usize,
    pub without_tenant: usize,
}

/// Annotates interests in input order.
pub fn annotate<'i>(
    interests: &'i [InterestRecord],
    resolver: &EntityResolver<'_>,
) -> Vec<ReviewedInterest<'i>> {
    interests
        .iter()
        .map(|interest| {
            let entry = resolver.resolve_entry(&interest.apartment);
            ReviewedInterest {
                interest,
                lookup_key: entry.parsed.as_ref().map(|parsed| parsed.lookup_key()),
                apartment_id: entry.apartment.map(|apartment| apartment.id.clone()),
                tenant: entry.tenant.map(TenantSummary::from),
            }
        })
        .collect()
}

pub fn summarize(reviewed: &[ReviewedInterest<'_>]) -> ReviewSummary {
    reviewed
        .iter()
        .fold(ReviewSummary::default(), |mut summary, entry| {
            summary.total += 1;
            if entry.interest.status.is_open() {
                summary.open += 1;
            }
            match (&entry.lookup_key, &entry.apartment_id) {
                (None, _) => summary.unparsable += 1,
                (Some(_), None) => summary.unmatched_apartment += 1,
                (Some(_), Some(_)) => summary.matched += 1,
            }
            if entry.apartment_id.is_some() && entry.tenant.is_none() {
                summary.without_tenant += 1;
            }
            summary
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::{ApartmentIndex, ApartmentRecord, TenantIndex};
    use crate::interests::InterestStatus;

    #[test]
    fn annotates_and_summarizes() {
        let apartments = ApartmentIndex::build([
            ApartmentRecord {
                id: ApartmentId("a-1".to_string()),
                street: "Storgatan".to_string(),
                house_number: "5".to_string(),
                unit_number: "1001".to_string(),
                occupant_tenant_ids: vec![TenantId("t-1".to_string())],
            },
            ApartmentRecord {
                id: ApartmentId("a-2".to_string()),
                street: "Storgatan".to_string(),
                house_number: "5".to_string(),
                unit_number: "1002".to_string(),
                occupant_tenant_ids: vec![TenantId("gone".to_string())],
            },
        ]);
        let tenants = TenantIndex::build([TenantRecord {
            id: TenantId("t-1".to_string()),
            first_name: "Astrid".to_string(),
            last_name: "Lind".to_string(),
            phone: "070-111 22 33".to_string(),
        }]);
        let resolver = EntityResolver::new(&apartments, &tenants);

        let interests = vec![
            InterestRecord::new("1", "Storgatan 5, LGH 1001"),
            InterestRecord::new("2", "Storgatan 5, LGH 1002"),
            InterestRecord::new("3", "Storgatan 5, LGH 1003")
                .with_status(InterestStatus::Withdrawn),
            InterestRecord::new("4", "-").with_status(InterestStatus::Declined),
        ];
        let reviewed = annotate(&interests, &resolver);

        assert_eq!(reviewed.len(), 4);
        assert_eq!(reviewed[0].interest.id, "1");
        let tenant = reviewed[0].tenant.as_ref().expect("tenant");
        assert_eq!(tenant.full_name, "Astrid Lind");
        assert_eq!(tenant.phone, "070-111 22 33");
        assert_eq!(reviewed[1].apartment_id, Some(ApartmentId("a-2".to_string())));
        assert!(reviewed[1].tenant.is_none());
        assert_eq!(
            reviewed[2].lookup_key,
            Some(LookupKey::new("Storgatan", "5", "1003"))
        );
        assert!(reviewed[3].lookup_key.is_none());

        assert_eq!(
            summarize(&reviewed),
            ReviewSummary {
                total: 4,
                open: 2,
                matched: 2,
                unmatched_apartment: 1,
                unparsable: 1,
                without_tenant: 1,
            }
        );
    }
}
