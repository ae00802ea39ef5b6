use super::{
    CARTRIDGE, CONCENTRATES, CONCENTRATE_TOKEN, CONFECTION, EDIBLES, FLOWER, FLOWER_NOUN, MG_DOSE,
    PREROLL,
};
use crate::context::ScoringContext;
use crate::pipeline::Rule;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DOSE_PER_UNIT: Regex = Regex::new(
        r"\b\d+(\.\d+)?\s?mg\s*(per|each|/|a)\s*(piece|gummy|serving|square|cookie|chew|bite|can|bottle)\b"
    )
    .unwrap();
    static ref SERVINGS: Regex =
        Regex::new(r"\b\d+\s*(servings|pieces|ct|count)\b|\bper (serving|piece)\b").unwrap();
    static ref INFUSED: Regex = Regex::new(r"\binfused\b").unwrap();
    static ref CONFECTION_SUBCATEGORIES: [(Regex, &'static str); 4] = [
        (Regex::new(r"\bgumm(y|ies)\b").unwrap(), "Gummies"),
        (Regex::new(r"\bchocolates?\b").unwrap(), "Chocolate"),
        (Regex::new(r"\b(brownies?|cookies?)\b").unwrap(), "BakedGoods"),
        (Regex::new(r"\b(cand(y|ies)|lollipops?|caramels?|chews|cones?)\b").unwrap(), "Candy"),
    ];
}

/// Per-piece or per-serving dosage is a strong edible signal.
pub struct EdibleDosageRule;

impl Rule for EdibleDosageRule {
    fn name(&self) -> &str {
        "EdibleDosage"
    }

    fn apply(&self, ctx: &mut ScoringContext) {
        let dosed = ctx.has(&DOSE_PER_UNIT) || (ctx.has(&MG_DOSE) && ctx.has(&SERVINGS));
        if !dosed {
            return;
        }

        ctx.add(EDIBLES, 4);
        if !ctx.name_has(&FLOWER_NOUN) {
            ctx.demote(FLOWER, 2);
        }
    }
}

/// A confection infused with a concentrate ("live resin gummies", "rosin
/// chocolate bar") is an edible, not the concentrate itself.
pub struct InfusedConfectionRule;

impl Rule for InfusedConfectionRule {
    fn name(&self) -> &str {
        "InfusedConfection"
    }

    fn apply(&self, ctx: &mut ScoringContext) {
        if !ctx.has(&CONFECTION)
            || !(ctx.has(&MG_DOSE) || ctx.has(&INFUSED))
            || !ctx.has(&CONCENTRATE_TOKEN)
            || ctx.name_has(&PREROLL)
            || ctx.name_has(&CARTRIDGE)
        {
            return;
        }

        ctx.add(EDIBLES, 8);
        ctx.demote(CONCENTRATES, 8);

        let matched: Vec<&str> = CONFECTION_SUBCATEGORIES
            .iter()
            .filter(|(pattern, _)| ctx.has(pattern))
            .map(|(_, sub)| *sub)
            .collect();
        for sub in matched {
            ctx.sub(EDIBLES, sub);
        }
    }
}
