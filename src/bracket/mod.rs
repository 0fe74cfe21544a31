//! Playoff bracket retrieval and persistence
//!
//! The payload is treated as opaque JSON: it is fetched, pretty-printed and
//! written without any schema checks.

pub mod fetcher;
pub mod writer;

pub use fetcher::{BracketFetcher, FetchError, NhlApiFetcher};
pub use writer::{artifact_path, to_pretty_json, ArtifactWriter, WriteError};
