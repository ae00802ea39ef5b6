//! Rule Pipeline Runner
//!
//! Executes a fixed, hand-ordered rule list against one scoring context.
//! Later rules assume the cumulative effect of earlier ones, so the list is
//! never sorted, filtered or run in parallel.

use crate::context::{Classification, ScoringContext};
use crate::rules;
use crate::taxonomy::OTHER;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// One step of the classification pipeline.
pub trait Rule: Send + Sync {
    fn name(&self) -> &str;
    fn apply(&self, ctx: &mut ScoringContext);

    /// The runner stops after executing a terminal rule.
    fn is_terminal(&self) -> bool {
        false
    }
}

pub struct RulePipeline {
    rules: Vec<Box<dyn Rule>>,
}

impl Default for RulePipeline {
    fn default() -> Self {
        Self::standard()
    }
}

impl RulePipeline {
    /// The production rule order.
    pub fn standard() -> Self {
        Self::new(rules::standard_rules())
    }

    pub fn new(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Run every rule in order. A rule that panics is logged and skipped; the
    /// next rule sees whatever state the context held at that point.
    pub fn run(&self, ctx: &mut ScoringContext) -> Classification {
        for rule in &self.rules {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| rule.apply(ctx)));
            if let Err(payload) = outcome {
                log::warn!(
                    "Rule '{}' failed on listing '{}', continuing: {}",
                    rule.name(),
                    ctx.name(),
                    panic_message(payload.as_ref())
                );
            }
            log::trace!("after {}: {:?}", rule.name(), ctx.scores());

            if rule.is_terminal() {
                break;
            }
        }

        match ctx.take_result() {
            Some(result) => result,
            None => {
                debug_assert!(false, "rule pipeline finished without a result");
                log::warn!(
                    "No result produced for listing '{}', falling back to {OTHER}",
                    ctx.name()
                );
                Classification::new(OTHER, Vec::new())
            }
        }
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::PrecedenceResolver;
    use crate::rules::base::BaseKeywordRule;
    use crate::taxonomy::Taxonomy;

    struct BoostRule(&'static str, i32);

    impl Rule for BoostRule {
        fn name(&self) -> &str {
            "Boost"
        }

        fn apply(&self, ctx: &mut ScoringContext) {
            ctx.add(self.0, self.1);
        }
    }

    struct PanickingRule;

    impl Rule for PanickingRule {
        fn name(&self) -> &str {
            "Panicking"
        }

        fn apply(&self, ctx: &mut ScoringContext) {
            ctx.add("Vapes", 50);
            panic!("broken rule");
        }
    }

    #[test]
    fn test_standard_order_ends_with_resolver() {
        let pipeline = RulePipeline::standard();
        let names = pipeline.rule_names();
        assert_eq!(names.first(), Some(&"BaseKeyword"));
        assert_eq!(names.last(), Some(&"PrecedenceResolver"));
        assert_eq!(names.len(), 22);
    }

    #[test]
    fn test_failing_rule_does_not_abort() {
        let pipeline = RulePipeline::new(vec![
            Box::new(BaseKeywordRule),
            Box::new(PanickingRule),
            Box::new(BoostRule("Flower", 100)),
            Box::new(PrecedenceResolver),
        ]);
        let mut ctx = ScoringContext::new(Taxonomy::builtin(), Some("OG Kush"), None);
        let result = pipeline.run(&mut ctx);
        assert_eq!(result.primary.as_deref(), Some("Flower"));
    }

    #[test]
    fn test_runner_stops_at_terminal_rule() {
        let pipeline = RulePipeline::new(vec![
            Box::new(BoostRule("Hash", 4)),
            Box::new(PrecedenceResolver),
            Box::new(BoostRule("Flower", 100)),
        ]);
        let mut ctx = ScoringContext::new(Taxonomy::builtin(), None, None);
        let result = pipeline.run(&mut ctx);
        assert_eq!(result.primary.as_deref(), Some("Hash"));
        assert!(!ctx.has_score("Flower"));
    }

    #[test]
    fn test_panic_message_extraction() {
        let payload: Box<dyn Any + Send> = Box::new("static message");
        assert_eq!(panic_message(payload.as_ref()), "static message");
        let payload: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(payload.as_ref()), "owned");
        let payload: Box<dyn Any + Send> = Box::new(42u8);
        assert_eq!(panic_message(payload.as_ref()), "unknown panic");
    }
}
