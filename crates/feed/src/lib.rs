//! Feed retrieval and entry description lookup.
//!
//! - [`fetcher`] downloads the feed and returns its newest entry
//! - [`parser`] turns raw feed-rs entries into validated [`Entry`] values
//! - [`resolver`] falls back to the article page when an entry has no summary

pub mod fetcher;
pub mod html;
pub mod parser;
pub mod resolver;

pub use fetcher::fetch_latest;
pub use herald_common::types::Entry;
pub use parser::parse_latest;
pub use resolver::DescriptionResolver;
