use super::{
    CARTRIDGE, CONCENTRATES, EDIBLES, EDIBLE_FORM, MG_DOSE, PREROLL, PSYCHEDELIC, TINCTURE, VAPES,
};
use crate::context::ScoringContext;
use crate::pipeline::Rule;
use crate::taxonomy::OTHER;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TEXTURE: Regex = Regex::new(
        r"\b(badder|batter|budder|shatter|wax|crumble|sugar|live resin|cured resin|rosin|diamonds|sauce|htfse)\b"
    )
    .unwrap();
    static ref DISTILLATE: Regex = Regex::new(r"\bdistillate\b").unwrap();
    static ref BULK_CONTAINER: Regex = Regex::new(
        r"\b(jars?|syringes?|lit(er|re)s?|\d+(\.\d+)?\s?(ml|l)|gallons?|bulk|kilos?|kg|wholesale)\b"
    )
    .unwrap();
    pub(crate) static ref RSO: Regex =
        Regex::new(r"\b(rso|rick simpson( oil)?|feco|full extract cannabis oil)\b").unwrap();
    static ref TOPICAL: Regex = Regex::new(
        r"\b(topicals?|transdermal|suppositor(y|ies)|salves?|balms?|lotions?|roll[- ]on)\b"
    )
    .unwrap();
    static ref CAPSULE: Regex = Regex::new(r"\b(capsules?|softgels?|tablets?)\b").unwrap();
}

/// Candy-named strains sold as badder, shatter or sauce ("Gushers Badder")
/// are concentrates when nothing in the text is dosed like an edible.
pub struct ConcentrateTextureRule;

impl Rule for ConcentrateTextureRule {
    fn name(&self) -> &str {
        "ConcentrateTexture"
    }

    fn apply(&self, ctx: &mut ScoringContext) {
        if ctx.name_has(&TEXTURE)
            && !ctx.has(&MG_DOSE)
            && !ctx.has(&EDIBLE_FORM)
            && !ctx.name_has(&CARTRIDGE)
            && !ctx.name_has(&PREROLL)
        {
            ctx.add(CONCENTRATES, 4);
            ctx.demote(EDIBLES, 4);
        }
    }
}

/// Bulk distillate (jars, syringes, liters) is a concentrate even when the
/// description mentions vapes, unless the title names cartridge hardware.
pub struct BulkDistillateRule;

impl Rule for BulkDistillateRule {
    fn name(&self) -> &str {
        "BulkDistillate"
    }

    fn apply(&self, ctx: &mut ScoringContext) {
        if ctx.has(&DISTILLATE) && ctx.has(&BULK_CONTAINER) && !ctx.name_has(&CARTRIDGE) {
            ctx.add(CONCENTRATES, 6);
            ctx.demote(VAPES, 6);
            ctx.sub(CONCENTRATES, "Distillate");
        }
    }
}

/// Medical and pharmaceutical product forms.
pub struct MedicalTermRule;

impl Rule for MedicalTermRule {
    fn name(&self) -> &str {
        "MedicalTerm"
    }

    fn apply(&self, ctx: &mut ScoringContext) {
        if ctx.has(&RSO) {
            ctx.add(CONCENTRATES, 6);
            ctx.sub(CONCENTRATES, "RSO");
            ctx.demote(TINCTURE, 4);
            ctx.demote(VAPES, 4);
        }

        if ctx.has(&TOPICAL) {
            ctx.add(OTHER, 6);
            ctx.sub(OTHER, "Topicals");
            ctx.demote(EDIBLES, 4);
            ctx.demote(TINCTURE, 4);
        }

        if ctx.has(&CAPSULE) && !ctx.has(&PSYCHEDELIC) {
            ctx.add(OTHER, 4);
            ctx.sub(OTHER, "Capsules");
            ctx.demote(EDIBLES, 2);
        }
    }
}
