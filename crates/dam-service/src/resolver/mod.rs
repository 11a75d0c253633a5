//! Query and mutation resolvers over the DAM facade.
//!
//! Resolvers receive the already decoded variables of a request and map
//! them onto facade calls.

pub mod mutation;
pub mod query;
mod variables;

pub use mutation::{MutationResolver, StoredUpload, UploadOutcome, UploadResult};
pub use query::{ApiConfig, QueryResolver};
