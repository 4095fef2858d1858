//! Record fetching from the partner platform.
//!
//! - [`QUERY_DESCRIPTORS`] - the fixed, compile-time set of form queries
//! - [`RecordFetcher`] - runs them concurrently and expands child tables
//! - [`NamedResult`] - per-query outcome, persisted verbatim

mod fetcher;
mod queries;
mod result;

pub use fetcher::{FetchError, RecordFetcher};
pub use queries::{
    CHILD_DETAIL_SUFFIX, CHILD_TABLE_FIELDS, COMPANY_INFO, ParamValue, QUERY_DESCRIPTORS,
    QueryDescriptor, REQUIREMENT_FORM, TargetIds, child_detail_key,
};
pub use result::{NamedResult, Record};
