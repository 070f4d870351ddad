//! HTTP surface over the parser, resolver and interest sorter.

mod router;
mod service;

pub use router::resolution_router;
pub use service::{
    GroupView, OrderRequest, OrderResponse, ParseRequest, ParseResponse, RequestError,
    ResolutionService, ResolveBatchRequest, ResolveRequest, ResolveResponse, ReviewView,
    MAX_BATCH_SIZE,
};
