use super::{
    CARTRIDGE, CONCENTRATES, EDIBLES, EDIBLE_FORM, ELIMINATE, FLOWER, FLOWER_NOUN, HASH, MG_DOSE,
    PREROLL, PREROLLS, STRAIN_TYPE, WEIGHT,
};
use crate::context::ScoringContext;
use crate::pipeline::Rule;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SHAKE: Regex = Regex::new(r"\b(shake|trim|mini buds)\b").unwrap();
    static ref ROLLING_USE: Regex = Regex::new(
        r"\b((perfect|great|ideal|good)\s+)?for\s+(rolling|joints|pre[- ]?rolls|blunts)\b|\broll your own\b"
    )
    .unwrap();
    static ref DESSERT_STRAIN: Regex = Regex::new(
        r"\b(wedding cake|birthday cake|ice cream cake|pound cake|lemon cake|cake batter|cheesecake|gelato|sherbe?rt|sundae|runtz|zkittlez|gushers|girl scout cookies|gsc|cookies|thin mint|animal cookies|sugar cookie|apple fritter|cereal milk|blueberry muffin|cherry pie|key lime pie|banana bread|biscotti|mochi|donuts?|candy ?land|tiramisu|oreoz|lemon cherry)\b"
    )
    .unwrap();
    static ref EDIBLE_SERVING: Regex =
        Regex::new(r"\b(per piece|per serving|servings|pieces|baked|bake|edible)\b").unwrap();
    static ref MOON_ROCK: Regex = Regex::new(r"\b(moon ?rocks?|sun ?rocks?)\b").unwrap();
}

/// Pre-roll vocabulary in the title outweighs strain and flower words in
/// the description.
pub struct PrerollTitleRule;

impl Rule for PrerollTitleRule {
    fn name(&self) -> &str {
        "PrerollTitle"
    }

    fn apply(&self, ctx: &mut ScoringContext) {
        if ctx.name_has(&PREROLL) {
            ctx.add(PREROLLS, 6);
            ctx.demote(FLOWER, 2);
        }
    }
}

/// Shake and trim sold "for rolling" is loose flower, not a pre-roll.
pub struct PrerollShakeContextRule;

impl Rule for PrerollShakeContextRule {
    fn name(&self) -> &str {
        "PrerollShakeContext"
    }

    fn apply(&self, ctx: &mut ScoringContext) {
        if ctx.has(&SHAKE) && ctx.has(&ROLLING_USE) && !ctx.name_has(&PREROLL) {
            ctx.demote(PREROLLS, 6);
            ctx.add(FLOWER, 3);
            ctx.sub(FLOWER, "Shake");
        }
    }
}

/// Dessert-named strains ("Wedding Cake", "Gelato", "Cookies") are flower
/// unless the listing carries a real edible signal.
pub struct DessertStrainRule;

impl DessertStrainRule {
    fn flower_signal(ctx: &ScoringContext) -> bool {
        ctx.has(&FLOWER_NOUN) || (ctx.has(&STRAIN_TYPE) && ctx.name_has(&WEIGHT))
    }

    fn edible_signal(ctx: &ScoringContext) -> bool {
        ctx.has(&MG_DOSE) || ctx.has(&EDIBLE_FORM) || ctx.has(&EDIBLE_SERVING)
    }
}

impl Rule for DessertStrainRule {
    fn name(&self) -> &str {
        "DessertStrain"
    }

    fn apply(&self, ctx: &mut ScoringContext) {
        if !ctx.has(&DESSERT_STRAIN) || !Self::flower_signal(ctx) || Self::edible_signal(ctx) {
            return;
        }

        ctx.demote(EDIBLES, ELIMINATE);
        if !ctx.name_has(&PREROLL) && !ctx.name_has(&CARTRIDGE) {
            ctx.add(FLOWER, 4);
        }
    }
}

/// Moon rocks are flower coated in oil and kief.
pub struct MoonRockRule;

impl Rule for MoonRockRule {
    fn name(&self) -> &str {
        "MoonRock"
    }

    fn apply(&self, ctx: &mut ScoringContext) {
        if ctx.has(&MOON_ROCK) && !ctx.name_has(&PREROLL) {
            ctx.add(FLOWER, 6);
            ctx.demote(HASH, 4);
            ctx.demote(CONCENTRATES, 4);
            ctx.sub(FLOWER, "MoonRocks");
        }
    }
}
