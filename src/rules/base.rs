use super::{
    CARTRIDGE, CONCENTRATES, CONCENTRATE_TOKEN, CONFECTION, EDIBLES, FLOWER, FLOWER_NOUN, HASH,
    MG_DOSE, STRAIN_TYPE, TINCTURE, VAPES, WEIGHT,
};
use crate::context::ScoringContext;
use crate::pipeline::Rule;
use crate::taxonomy::TIPS;
use lazy_static::lazy_static;
use regex::Regex;

/// Broad recall pass over every taxonomy keyword.
///
/// Top-level keywords add +2 to their category. Subcategory keywords add +3
/// to the parent and tag the subcategory. Any score that lands on the
/// reserved Tips category is discarded at the end.
pub struct BaseKeywordRule;

impl Rule for BaseKeywordRule {
    fn name(&self) -> &str {
        "BaseKeyword"
    }

    fn apply(&self, ctx: &mut ScoringContext) {
        let taxonomy = ctx.taxonomy();

        for category in taxonomy.categories() {
            if !category.is_reserved() {
                for keyword in category.keywords() {
                    if keyword.is_match(ctx.text()) {
                        ctx.add(category.name(), 2);
                    }
                }
            }

            for sub in category.subcategories() {
                for keyword in sub.keywords() {
                    if keyword.is_match(ctx.text()) {
                        ctx.add(category.name(), 3);
                        ctx.sub(category.name(), sub.name());
                    }
                }
            }
        }

        ctx.remove(TIPS);
    }
}

lazy_static! {
    // "perfect for edibles, concentrates, vapes" and similar usage phrases.
    static ref USAGE_PHRASE: Regex = Regex::new(
        r"\b(perfect|great|ideal|good|excellent|use|used|works well|works)\s+(for|in)\s+(making\s+)?(?P<tail>[^.!?;]{0,60})"
    )
    .unwrap();
    static ref USAGE_TARGETS: [(Regex, &'static str); 5] = [
        (Regex::new(r"\b(edibles?|baking|cooking|cannabutter|butter)\b").unwrap(), EDIBLES),
        (Regex::new(r"\b(concentrates?|extracts?|extraction|dabs|rosin)\b").unwrap(), CONCENTRATES),
        (Regex::new(r"\b(vapes?|vaping|vaporizers?|dry herb)\b").unwrap(), VAPES),
        (Regex::new(r"\b(tinctures?)\b").unwrap(), TINCTURE),
        (Regex::new(r"\b(hash|kief)\b").unwrap(), HASH),
    ];
}

/// Generic fallback boosts.
///
/// A flower listing that says what it can be used for must not score as
/// those uses. When no keyword matched at all, dosage and weight units give a
/// small nudge toward Edibles or Flower.
pub struct UsageContextRule;

impl UsageContextRule {
    fn flower_title(ctx: &ScoringContext) -> bool {
        if ctx.name_has(&FLOWER_NOUN) || ctx.name_has(&STRAIN_TYPE) {
            return true;
        }
        ctx.name_has(&WEIGHT)
            && !ctx.name_has(&CARTRIDGE)
            && !ctx.name_has(&CONFECTION)
            && !ctx.name_has(&CONCENTRATE_TOKEN)
    }
}

impl Rule for UsageContextRule {
    fn name(&self) -> &str {
        "UsageContext"
    }

    fn apply(&self, ctx: &mut ScoringContext) {
        if Self::flower_title(ctx) {
            let mut targets: Vec<&str> = Vec::new();
            for caps in USAGE_PHRASE.captures_iter(ctx.text()) {
                let tail = caps.name("tail").map(|m| m.as_str()).unwrap_or("");
                for (pattern, category) in USAGE_TARGETS.iter() {
                    if pattern.is_match(tail) && !targets.contains(category) {
                        targets.push(*category);
                    }
                }
            }

            if !targets.is_empty() {
                log::debug!("Usage context on flower listing, demoting {targets:?}");
                ctx.add(FLOWER, 4);
                for category in targets {
                    ctx.demote(category, 4);
                }
            }
        }

        if ctx.scores().is_empty() {
            if ctx.has(&MG_DOSE) {
                ctx.add(EDIBLES, 2);
            } else if ctx.has(&WEIGHT) {
                ctx.add(FLOWER, 2);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::Taxonomy;

    fn run(rules: &[&dyn Rule], name: &str, description: &str) -> ScoringContext<'static> {
        let mut ctx = ScoringContext::new(Taxonomy::builtin(), Some(name), Some(description));
        for rule in rules {
            rule.apply(&mut ctx);
        }
        ctx
    }

    #[test]
    fn test_base_keyword_scores() {
        let ctx = run(&[&BaseKeywordRule], "OG Kush 3.5g", "Top shelf indica flower, dense buds.");
        // kush, indica, flower, buds (+2 each) and top shelf (+3, Exotic)
        assert_eq!(ctx.score(FLOWER), 11);
        assert!(ctx.subcategories_of(FLOWER).unwrap().contains("Exotic"));
    }

    #[test]
    fn test_base_keyword_subcategory_boost() {
        let ctx = run(&[&BaseKeywordRule], "Temple Ball Hash 2g", "");
        // hash, temple ball (+2 each) and temple ball subcategory (+3)
        assert_eq!(ctx.score(HASH), 7);
        assert!(ctx.subcategories_of(HASH).unwrap().contains("TempleBall"));
    }

    #[test]
    fn test_tips_never_scored() {
        let ctx = run(&[&BaseKeywordRule], "Driver tip", "tips and donation, delivery fee");
        assert!(!ctx.has_score(TIPS));
    }

    #[test]
    fn test_usage_context_demotes_uses() {
        let ctx = run(
            &[&BaseKeywordRule, &UsageContextRule],
            "Sour Diesel Shake 28g",
            "Sativa shake, perfect for edibles, concentrates, vapes.",
        );
        assert!(ctx.score(FLOWER) > 0);
        assert!(!ctx.has_score(EDIBLES));
        assert!(!ctx.has_score(CONCENTRATES));
        assert!(!ctx.has_score(VAPES));
    }

    #[test]
    fn test_usage_context_ignores_concentrate_titles() {
        let ctx = run(
            &[&BaseKeywordRule, &UsageContextRule],
            "Live Resin 1g",
            "Great for dabs.",
        );
        assert!(ctx.has_score(CONCENTRATES));
        assert!(!ctx.has_score(FLOWER));
    }

    #[test]
    fn test_fallback_nudges() {
        let ctx = run(&[&BaseKeywordRule, &UsageContextRule], "Mystery 100mg", "");
        assert_eq!(ctx.score(EDIBLES), 2);

        let ctx = run(&[&BaseKeywordRule, &UsageContextRule], "Mystery 7g", "");
        assert_eq!(ctx.score(FLOWER), 2);

        let ctx = run(&[&BaseKeywordRule, &UsageContextRule], "", "");
        assert!(ctx.scores().is_empty());
    }
}
