use super::{CARTRIDGE, CONCENTRATES, EDIBLE_FORM, FLOWER, HASH, PREROLL};
use crate::context::ScoringContext;
use crate::pipeline::Rule;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref STRONG_HASH: Regex = Regex::new(
        r"\b(full[- ]?melt|temple balls?|dry[- ]?sift|static sift|piatella|bubble hash|ice ?water hash)\b"
    )
    .unwrap();
    // "Gelato Hash", "Lemon Hash 2g"
    static ref HASH_TITLE: Regex =
        Regex::new(r"\bhash(\s+\d+(\.\d+)?\s?(g|gr|grams?))?\s*$").unwrap();
    static ref NOT_SOLID_HASH: Regex = Regex::new(r"\b(rosin|hash oil|infused)\b").unwrap();
    static ref HASH_ROSIN: Regex =
        Regex::new(r"\b((live |bubble )?hash rosin|hash oil)\b").unwrap();
}

/// Strong hash cues outrank Flower even when Flower matched more keywords.
/// Flower is demoted far enough to fall below Hash instead of relying on the
/// raw comparison.
pub struct HashPrecedenceRule;

impl Rule for HashPrecedenceRule {
    fn name(&self) -> &str {
        "HashPrecedence"
    }

    fn apply(&self, ctx: &mut ScoringContext) {
        if ctx.name_has(&NOT_SOLID_HASH)
            || ctx.name_has(&PREROLL)
            || ctx.name_has(&CARTRIDGE)
            || ctx.name_has(&EDIBLE_FORM)
        {
            return;
        }
        if !ctx.has(&STRONG_HASH) && !ctx.name_has(&HASH_TITLE) {
            return;
        }

        ctx.add(HASH, 6);
        let margin = ctx.score(FLOWER) - ctx.score(HASH) + 1;
        ctx.demote(FLOWER, margin.max(6));
    }
}

/// Hash rosin and hash oil are solventless concentrates, not hash.
pub struct HashRosinRule;

impl Rule for HashRosinRule {
    fn name(&self) -> &str {
        "HashRosin"
    }

    fn apply(&self, ctx: &mut ScoringContext) {
        if ctx.has(&HASH_ROSIN) && !ctx.name_has(&PREROLL) && !ctx.name_has(&CARTRIDGE) {
            ctx.add(CONCENTRATES, 6);
            ctx.demote(HASH, 6);
            ctx.sub(CONCENTRATES, "Rosin");
        }
    }
}
