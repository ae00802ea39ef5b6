pub mod classifier;
pub mod config;
pub mod context;
pub mod exclusion;
pub mod indexing;
pub mod pipeline;
pub mod resolver;
pub mod rules;
pub mod taxonomy;

#[cfg(test)]
mod regression_test;

pub use classifier::{classify, ProductClassifier};
pub use config::ClassifierConfig;
pub use context::{Classification, ScoringContext};
pub use indexing::{IndexedListing, Indexer, Listing, ManualOverrides};
pub use pipeline::{Rule, RulePipeline};
pub use taxonomy::Taxonomy;
