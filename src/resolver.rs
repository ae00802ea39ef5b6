//! Precedence Resolver
//!
//! Terminal rule. Turns accumulated scores into one primary category and the
//! subcategories tagged under it.

use crate::context::{Classification, ScoringContext};
use crate::pipeline::Rule;
use crate::taxonomy::{OTHER, TIPS};
use std::collections::HashMap;

/// Tie-break order for equal top scores. Categories not listed sort after
/// every listed one, then by name.
pub const PRECEDENCE: [&str; 9] = [
    "Flower",
    "Hash",
    "PreRolls",
    "Edibles",
    "Concentrates",
    "Vapes",
    "Tincture",
    "Psychedelics",
    "Other",
];

fn rank(category: &str) -> usize {
    PRECEDENCE
        .iter()
        .position(|c| *c == category)
        .unwrap_or(PRECEDENCE.len())
}

/// Highest positive score outside `exclude`, ties broken by precedence.
pub fn pick_winner<'a>(scores: &'a HashMap<String, i32>, exclude: &[&str]) -> Option<&'a str> {
    scores
        .iter()
        .filter(|(category, score)| **score > 0 && !exclude.contains(&category.as_str()))
        .max_by(|(a, a_score), (b, b_score)| {
            a_score
                .cmp(b_score)
                .then_with(|| rank(b).cmp(&rank(a)))
                .then_with(|| b.cmp(a))
        })
        .map(|(category, _)| category.as_str())
}

pub struct PrecedenceResolver;

impl PrecedenceResolver {
    /// Other won on real evidence: one of its keywords matched or one of its
    /// subcategories was tagged.
    fn other_has_signal(ctx: &ScoringContext) -> bool {
        let keyword_hit = ctx
            .taxonomy()
            .category(OTHER)
            .is_some_and(|c| c.matches_keyword(ctx.text()));
        keyword_hit || ctx.has_subcategories(OTHER)
    }

    fn classification_for(ctx: &ScoringContext, category: &str) -> Classification {
        let subcategories = ctx
            .subcategories_of(category)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default();
        Classification::new(category, subcategories)
    }

    pub fn resolve(ctx: &ScoringContext) -> Classification {
        let winner = match pick_winner(ctx.scores(), &[TIPS]) {
            Some(winner) => winner,
            None => return Classification::new(OTHER, Vec::new()),
        };

        if winner != OTHER || Self::other_has_signal(ctx) {
            return Self::classification_for(ctx, winner);
        }

        match pick_winner(ctx.scores(), &[TIPS, OTHER]) {
            Some(runner_up) => {
                log::debug!("Other won without signal, using runner-up {runner_up}");
                Self::classification_for(ctx, runner_up)
            }
            None => Classification::new(OTHER, Vec::new()),
        }
    }
}

impl Rule for PrecedenceResolver {
    fn name(&self) -> &str {
        "PrecedenceResolver"
    }

    fn apply(&self, ctx: &mut ScoringContext) {
        let result = Self::resolve(ctx);
        ctx.set_result(result);
    }

    fn is_terminal(&self) -> bool {
        true
    }
}
