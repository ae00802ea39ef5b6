use super::{is_functional_mushroom, EDIBLES, ELIMINATE, FLOWER, PSYCHEDELIC, PSYCHEDELICS};
use crate::context::ScoringContext;
use crate::pipeline::Rule;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref EDIBLE_FORM: Regex = Regex::new(
        r"\b(chocolates?|chocolate bars?|gumm(y|ies)|capsules?|caps|bars?|tea|honey|edibles?)\b"
    )
    .unwrap();
    static ref CANNABIS_EDIBLE: Regex =
        Regex::new(r"\b(thca?|cbd|delta[- ]?[89]|d[89]|hhc|cannabis|hemp)\b").unwrap();
    static ref CORE_VOCAB: Regex = Regex::new(
        r"\b(psilocybin|psilocybe|cubensis|shrooms?|magic mushrooms?|golden teachers?|penis envy|lsd|blotter|dmt)\b"
    )
    .unwrap();
}

/// Lion's mane, reishi and other functional mushrooms are not psychedelics.
pub struct FunctionalMushroomRule;

impl Rule for FunctionalMushroomRule {
    fn name(&self) -> &str {
        "FunctionalMushroom"
    }

    fn apply(&self, ctx: &mut ScoringContext) {
        if is_functional_mushroom(ctx.text()) {
            ctx.demote(PSYCHEDELICS, ELIMINATE);
        }
    }
}

/// Mushroom, LSD and DMT vocabulary. Combined with an edible form the
/// listing goes to Psychedelics/Edibles with a boost larger than either
/// vocabulary earns alone, and generic Edibles is demoted unless cannabis
/// tokens are also present.
pub struct PsychedelicsRule;

impl Rule for PsychedelicsRule {
    fn name(&self) -> &str {
        "Psychedelics"
    }

    fn apply(&self, ctx: &mut ScoringContext) {
        if is_functional_mushroom(ctx.text()) || !ctx.has(&PSYCHEDELIC) {
            return;
        }

        if ctx.has(&EDIBLE_FORM) {
            ctx.add(PSYCHEDELICS, 10);
            ctx.sub(PSYCHEDELICS, "Edibles");
            if !ctx.has(&CANNABIS_EDIBLE) {
                ctx.demote(EDIBLES, 10);
            }
        } else if ctx.has(&CORE_VOCAB) {
            ctx.add(PSYCHEDELICS, 4);
            ctx.demote(FLOWER, 4);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::base::BaseKeywordRule;
    use crate::taxonomy::Taxonomy;

    fn run(rules: &[&dyn Rule], name: &str, description: &str) -> ScoringContext<'static> {
        let mut ctx = ScoringContext::new(Taxonomy::builtin(), Some(name), Some(description));
        for rule in rules {
            rule.apply(&mut ctx);
        }
        ctx
    }

    #[test]
    fn test_mushroom_chocolate() {
        let ctx = run(
            &[&BaseKeywordRule, &FunctionalMushroomRule, &PsychedelicsRule],
            "Golden Teacher Chocolate Bar",
            "3.5g psilocybin mushroom chocolate, milk chocolate",
        );
        assert!(!ctx.has_score(EDIBLES));
        assert!(ctx.subcategories_of(PSYCHEDELICS).unwrap().contains("Edibles"));
    }

    #[test]
    fn test_mixed_cannabis_edible_keeps_edibles() {
        let ctx = run(
            &[&BaseKeywordRule, &PsychedelicsRule],
            "Shroom + THC Gummies",
            "Cubensis and delta 9 gummies",
        );
        assert!(ctx.has_score(EDIBLES));
        assert!(ctx.score(PSYCHEDELICS) > ctx.score(EDIBLES));
    }

    #[test]
    fn test_vocabulary_alone() {
        let ctx = run(&[&PsychedelicsRule], "Penis Envy 3.5g", "Dried cubensis");
        assert_eq!(ctx.score(PSYCHEDELICS), 4);
    }

    #[test]
    fn test_functional_mushrooms_excluded() {
        let ctx = run(
            &[&BaseKeywordRule, &FunctionalMushroomRule, &PsychedelicsRule],
            "Lion's Mane Mushroom Gummies",
            "Functional mushroom blend for focus",
        );
        assert!(!ctx.has_score(PSYCHEDELICS));
        assert!(ctx.has_score(EDIBLES));
    }
}
