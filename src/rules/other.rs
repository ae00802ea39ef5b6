use crate::context::ScoringContext;
use crate::pipeline::Rule;
use crate::taxonomy::OTHER;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref GENETICS_TITLE: Regex = Regex::new(
        r"\b(seeds?|seed pack|feminized|autoflower(ing)?|clones?|cuttings?)\b"
    )
    .unwrap();
    static ref GENETICS_CONTEXT: Regex = Regex::new(
        r"\b(seed bank|germinat(e|ed|ion)|feminized seeds|autoflower(ing)? seeds|regular seeds|seeds per pack|\d+\s*(pack )?seeds)\b"
    )
    .unwrap();
    static ref FOOD_SEED: Regex = Regex::new(
        r"\b((hemp )?seed oil|sesame seeds?|chia seeds?|sunflower seeds?|poppy seeds?)\b"
    )
    .unwrap();
    static ref BONG_TITLE: Regex = Regex::new(
        r"\b(bongs?|water pipes?|dab rigs?|bubblers?|percolators?|recyclers?|beakers?)\b"
    )
    .unwrap();
    static ref GEAR_TITLE: Regex = Regex::new(
        r"\b(grinders?|rolling papers|rolling trays?|one hitters?|chillums?|torch(es)?|hand pipes?|glass pipes?)\b"
    )
    .unwrap();
}

/// Seeds, clones and cuttings are genetics listings, not flower.
pub struct GeneticsRule;

impl Rule for GeneticsRule {
    fn name(&self) -> &str {
        "Genetics"
    }

    fn apply(&self, ctx: &mut ScoringContext) {
        if ctx.has(&FOOD_SEED) {
            return;
        }
        if !ctx.name_has(&GENETICS_TITLE) && !ctx.has(&GENETICS_CONTEXT) {
            return;
        }

        let forced = ctx.max_score_excluding(OTHER) + 1;
        ctx.set(OTHER, forced);
        ctx.sub(OTHER, "Genetics");
    }
}

/// Bongs and smoking gear named in the title.
pub struct ParaphernaliaRule;

impl Rule for ParaphernaliaRule {
    fn name(&self) -> &str {
        "Paraphernalia"
    }

    fn apply(&self, ctx: &mut ScoringContext) {
        if ctx.name_has(&BONG_TITLE) {
            let forced = ctx.max_score_excluding(OTHER) + 1;
            ctx.set(OTHER, forced);
            ctx.sub(OTHER, "Bongs");
        } else if ctx.name_has(&GEAR_TITLE) {
            ctx.add(OTHER, 6);
            ctx.sub(OTHER, "Paraphernalia");
        }
    }
}
