//! Product Classifier
//!
//! Public entry point. Builds a scoring context per listing, runs the rule
//! pipeline and never lets a failure escape to the caller.

use crate::context::{Classification, ScoringContext};
use crate::pipeline::{panic_message, RulePipeline};
use crate::taxonomy::Taxonomy;
use lazy_static::lazy_static;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

lazy_static! {
    static ref DEFAULT_CLASSIFIER: ProductClassifier = ProductClassifier::new();
}

/// Classify with the process-wide classifier over the embedded taxonomy.
pub fn classify(name: Option<&str>, description: Option<&str>) -> Classification {
    DEFAULT_CLASSIFIER.classify(name, description)
}

pub struct ProductClassifier {
    taxonomy: Arc<Taxonomy>,
    pipeline: RulePipeline,
}

impl Default for ProductClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductClassifier {
    pub fn new() -> Self {
        Self::with_taxonomy(Arc::new(Taxonomy::builtin().clone()))
    }

    pub fn with_taxonomy(taxonomy: Arc<Taxonomy>) -> Self {
        Self::with_pipeline(taxonomy, RulePipeline::standard())
    }

    pub fn with_pipeline(taxonomy: Arc<Taxonomy>, pipeline: RulePipeline) -> Self {
        Self { taxonomy, pipeline }
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn pipeline(&self) -> &RulePipeline {
        &self.pipeline
    }

    /// Deterministic for a given taxonomy and input. Returns an empty
    /// classification (no primary) if classification itself fails.
    pub fn classify(&self, name: Option<&str>, description: Option<&str>) -> Classification {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            let mut ctx = ScoringContext::new(&self.taxonomy, name, description);
            self.pipeline.run(&mut ctx)
        }));

        match outcome {
            Ok(result) => {
                log::debug!(
                    "Classified '{}' as {:?} {:?}",
                    name.unwrap_or(""),
                    result.primary,
                    result.subcategories
                );
                result
            }
            Err(payload) => {
                log::warn!(
                    "Classification failed for '{}': {}",
                    name.unwrap_or(""),
                    panic_message(payload.as_ref())
                );
                Classification::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Rule;
    use crate::taxonomy::{OTHER, TIPS};

    #[test]
    fn test_deterministic() {
        let classifier = ProductClassifier::new();
        let first = classifier.classify(Some("Blue Dream Live Resin 1g"), Some("Sauce"));
        for _ in 0..5 {
            assert_eq!(
                classifier.classify(Some("Blue Dream Live Resin 1g"), Some("Sauce")),
                first
            );
        }
        assert_eq!(classify(Some("Blue Dream Live Resin 1g"), Some("Sauce")), first);
    }

    #[test]
    fn test_empty_input_is_other() {
        assert_eq!(classify(None, None), Classification::new(OTHER, Vec::new()));
        assert_eq!(classify(Some(""), Some("   ")), Classification::new(OTHER, Vec::new()));
    }

    #[test]
    fn test_tips_never_primary() {
        let result = classify(Some("Tip"), Some("Thank you, tip for the driver"));
        assert_ne!(result.primary.as_deref(), Some(TIPS));
    }

    struct NoResult;

    impl Rule for NoResult {
        fn name(&self) -> &str {
            "NoResult"
        }

        fn apply(&self, ctx: &mut ScoringContext) {
            ctx.add("Flower", 1);
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    fn test_top_level_failure_returns_empty_result() {
        let classifier = ProductClassifier::with_pipeline(
            Arc::new(Taxonomy::builtin().clone()),
            RulePipeline::new(vec![Box::new(NoResult)]),
        );
        let result = classifier.classify(Some("OG Kush"), None);
        assert_eq!(result, Classification::default());
        assert!(result.primary.is_none());
    }
}
