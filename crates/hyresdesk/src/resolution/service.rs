use crate::addresses::{
    AddressParser, LookupKey, ParsedAddress, PostalDirectory, PostalDirectoryError,
};
use crate::config::ResolverConfig;
use crate::directory::{
    ApartmentId, ApartmentIndex, ApartmentRecord, EntityResolver, Resolution, TenantIndex,
    TenantRecord,
};
use crate::interests::{
    annotate, summarize, InterestRecord, InterestSorter, ReviewSummary, TenantSummary,
};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Upper bound on raw strings accepted in one batch request.
pub const MAX_BATCH_SIZE: usize = 5_000;

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("batch of {size} addresses exceeds the limit of {limit}")]
    BatchTooLarge { size: usize, limit: usize },
}

#[derive(Debug, Deserialize)]
pub struct ParseRequest {
    pub raw: String,
}

#[derive(Debug, Serialize)]
pub struct ParseResponse {
    pub parsed: Option<ParsedAddress>,
    pub lookup_key: Option<LookupKey>,
}

#[derive(Debug, Deserialize)]
pub struct ResolveRequest {
    pub raw: String,
    #[serde(default)]
    pub apartments: Vec<ApartmentRecord>,
    #[serde(default)]
    pub tenants: Vec<TenantRecord>,
}

#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    pub apartment: Option<ApartmentRecord>,
    pub tenant: Option<TenantRecord>,
}

#[derive(Debug, Deserialize)]
pub struct ResolveBatchRequest {
    pub raws: Vec<String>,
    #[serde(default)]
    pub apartments: Vec<ApartmentRecord>,
    #[serde(default)]
    pub tenants: Vec<TenantRecord>,
}

#[derive(Debug, Deserialize)]
pub struct OrderRequest {
    pub interests: Vec<InterestRecord>,
    #[serde(default)]
    pub apartments: Vec<ApartmentRecord>,
    #[serde(default)]
    pub tenants: Vec<TenantRecord>,
}

#[derive(Debug, Serialize)]
pub struct GroupView {
    pub key: LookupKey,
    pub display_address: String,
    pub interest_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ReviewView {
    pub interest_id: String,
    pub apartment_id: Option<ApartmentId>,
    pub tenant: Option<TenantSummary>,
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub interests: Vec<InterestRecord>,
    pub groups: Vec<GroupView>,
    pub review: Vec<ReviewView>,
    pub summary: ReviewSummary,
}

/// Stateless façade over parser, resolver and sorter for the HTTP layer.
/// Every request carries its own apartment and tenant lists.
#[derive(Debug, Clone, Default)]
pub struct ResolutionService {
    parser: AddressParser,
    postal: PostalDirectory,
    config: ResolverConfig,
}

impl ResolutionService {
    pub fn new(config: ResolverConfig, postal: PostalDirectory) -> Self {
        Self {
            parser: AddressParser::standard(),
            postal,
            config,
        }
    }

    /// Loads the postal directory named in the config, if any.
    pub fn from_config(config: &ResolverConfig) -> Result<Self, PostalDirectoryError> {
        let postal = match &config.postal_codes {
            Some(path) => {
                let postal = PostalDirectory::from_path(path)?;
                info!(path = %path.display(), streets = postal.len(), "postal directory loaded");
                postal
            }
            None => PostalDirectory::default(),
        };
        Ok(Self::new(config.clone(), postal))
    }

    pub fn parse(&self, request: ParseRequest) -> ParseResponse {
        let parsed = self.parser.parse(&request.raw);
        let lookup_key = parsed.as_ref().map(ParsedAddress::lookup_key);
        ParseResponse { parsed, lookup_key }
    }

    pub fn resolve(&self, request: ResolveRequest) -> ResolveResponse {
        let apartments = ApartmentIndex::build(request.apartments);
        let tenants = TenantIndex::build(request.tenants);
        let resolver = self.resolver(&apartments, &tenants);
        let lookup = resolver.lookup_tenant(&request.raw);

        ResolveResponse {
            apartment: lookup.apartment().cloned(),
            tenant: lookup.tenant().cloned(),
        }
    }

    pub fn resolve_batch(
        &self,
        request: ResolveBatchRequest,
    ) -> Result<Vec<Resolution>, RequestError> {
        if request.raws.len() > MAX_BATCH_SIZE {
            return Err(RequestError::BatchTooLarge {
                size: request.raws.len(),
                limit: MAX_BATCH_SIZE,
            });
        }

        let apartments = ApartmentIndex::build(request.apartments);
        let tenants = TenantIndex::build(request.tenants);
        Ok(self.resolver(&apartments, &tenants).resolve_many(&request.raws))
    }

    pub fn order(&self, request: OrderRequest) -> OrderResponse {
        let apartments = ApartmentIndex::build(request.apartments);
        let tenants = TenantIndex::build(request.tenants);
        let resolver = self.resolver(&apartments, &tenants);
        let sorter = InterestSorter::new()
            .with_parser(self.parser.clone())
            .with_postal_directory(&self.postal);

        let interests = sorter.sort(request.interests);
        let groups = sorter
            .sorted_groups(&interests)
            .into_iter()
            .map(|group| GroupView {
                key: group.key,
                display_address: group.display_address,
                interest_ids: group
                    .interests
                    .iter()
                    .map(|interest| interest.id.clone())
                    .collect(),
            })
            .collect();

        let reviewed = annotate(&interests, &resolver);
        let summary = summarize(&reviewed);
        let review = reviewed
            .into_iter()
            .map(|entry| ReviewView {
                interest_id: entry.interest.id.clone(),
                apartment_id: entry.apartment_id,
                tenant: entry.tenant,
            })
            .collect();

        OrderResponse {
            groups,
            review,
            summary,
            interests,
        }
    }

    fn resolver<'a>(
        &self,
        apartments: &'a ApartmentIndex,
        tenants: &'a TenantIndex,
    ) -> EntityResolver<'a> {
        EntityResolver::from_config(apartments, tenants, &self.config)
            .with_parser(self.parser.clone())
    }
}
