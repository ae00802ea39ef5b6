use super::{ELIMINATE, FLOWER, VAPES, VAPING_DISCLAIMER};
use crate::context::ScoringContext;
use crate::pipeline::Rule;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    static ref VAPE_VOCAB: Regex = Regex::new(
        r"\b(vapes?|vaping|vaporizers?|vape pens?|carts?|cartridges?|disposables?|510|pods?|all in one|aio)\b"
    )
    .unwrap();
    static ref HARDWARE: [Regex; 8] = [
        Regex::new(r"\b(carts?|cartridges?)\b").unwrap(),
        Regex::new(r"\bdisposables?\b").unwrap(),
        Regex::new(r"\b510\b").unwrap(),
        Regex::new(r"\bbatter(y|ies)\b").unwrap(),
        Regex::new(r"\b(vape pens?|pods?)\b").unwrap(),
        Regex::new(r"\b(ceramic )?coils?\b").unwrap(),
        Regex::new(r"\b(all in one|aio)\b").unwrap(),
        Regex::new(r"\b(rechargeable|draw activated|usb[- ]?c)\b").unwrap(),
    ];
    static ref CART_WORD: Regex = Regex::new(r"\b(carts?|cartridges?)\b").unwrap();
    static ref PACK: Regex = Regex::new(
        r"\b(\d+|two|three|four|five|six|ten)\s*-?\s*(x|pack|packs|pk)\b|\b(bundle|mix and match|variety pack|sampler)\b"
    )
    .unwrap();
    static ref STRAIN_NAME: Regex = Regex::new(
        r"\b(blue dream|sour diesel|og kush|girl scout cookies|gsc|wedding cake|lemon cherry gelato|gelato|zkittlez|runtz|pineapple express|granddaddy purple|gdp|jack herer|durban poison|gorilla glue|gg4|sherbe?rt|skywalker|northern lights|green crack|trainwreck|strawberry cough|maui wowie|super lemon haze|lemon haze|tangie|ice cream cake|purple punch|mimosa|biscotti|do-?si-?dos|white widow|ak-47|bubba kush|master kush|cherry pie|apple fritter|blackberry kush|grape ape)\b"
    )
    .unwrap();
}

/// Remove "do not vape/smoke" style disclaimers so the word "vape" inside a
/// warning does not count as vape vocabulary.
pub fn strip_disclaimers(text: &str) -> String {
    VAPING_DISCLAIMER.replace_all(text, " ").into_owned()
}

/// Device, cartridge and battery vocabulary, matched after disclaimers are
/// stripped. A Vapes score with neither hardware nor vape vocabulary outside
/// disclaimer text is removed.
pub struct VapeHardwareRule;

impl Rule for VapeHardwareRule {
    fn name(&self) -> &str {
        "VapeHardware"
    }

    fn apply(&self, ctx: &mut ScoringContext) {
        let sanitized = strip_disclaimers(ctx.text());

        let distinct = HARDWARE.iter().filter(|p| p.is_match(&sanitized)).count();
        if distinct > 0 {
            ctx.add(VAPES, 6);
            if distinct >= 2 {
                ctx.add(VAPES, 2);
            }
        }

        if distinct == 0 && !VAPE_VOCAB.is_match(&sanitized) {
            ctx.demote(VAPES, ELIMINATE);
        }
    }
}

/// Multi-cartridge packs listing strain names. The boost grows with the
/// number of distinct strains, and Flower loses what those strain names
/// earned it.
pub struct CartridgePackRule;

impl CartridgePackRule {
    pub fn distinct_strains(text: &str) -> usize {
        STRAIN_NAME
            .find_iter(text)
            .map(|m| m.as_str())
            .collect::<HashSet<_>>()
            .len()
    }
}

impl Rule for CartridgePackRule {
    fn name(&self) -> &str {
        "CartridgePack"
    }

    fn apply(&self, ctx: &mut ScoringContext) {
        if !ctx.has(&CART_WORD) || !ctx.has(&PACK) {
            return;
        }

        let strains = Self::distinct_strains(ctx.text()) as i32;
        if strains == 0 {
            return;
        }

        log::debug!("Cartridge pack with {strains} strains: '{}'", ctx.name());
        ctx.add(VAPES, 4 + 2 * strains);
        ctx.demote(FLOWER, 2 * strains);
        ctx.sub(VAPES, "Cartridges");
    }
}
