//! Rule set
//!
//! One base keyword pass, one generic fallback pass, and a long tail of narrow
//! refinement rules. Each refinement addresses one observed misclassification
//! pattern. Magnitudes are tuned literals; changing one changes output.

pub mod base;
pub mod concentrates;
pub mod edibles;
pub mod flower;
pub mod hash;
pub mod other;
pub mod psychedelics;
pub mod tincture;
pub mod vapes;

use crate::pipeline::Rule;
use crate::resolver::PrecedenceResolver;
use lazy_static::lazy_static;
use regex::Regex;

pub const FLOWER: &str = "Flower";
pub const PREROLLS: &str = "PreRolls";
pub const HASH: &str = "Hash";
pub const EDIBLES: &str = "Edibles";
pub const CONCENTRATES: &str = "Concentrates";
pub const VAPES: &str = "Vapes";
pub const TINCTURE: &str = "Tincture";
pub const PSYCHEDELICS: &str = "Psychedelics";

/// Demotion large enough to remove any accumulated score.
pub const ELIMINATE: i32 = 999;

/// The production rule order. Never sort or reorder this list.
pub fn standard_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(base::BaseKeywordRule),
        Box::new(base::UsageContextRule),
        Box::new(flower::PrerollTitleRule),
        Box::new(flower::PrerollShakeContextRule),
        Box::new(flower::DessertStrainRule),
        Box::new(edibles::EdibleDosageRule),
        Box::new(flower::MoonRockRule),
        Box::new(hash::HashPrecedenceRule),
        Box::new(hash::HashRosinRule),
        Box::new(edibles::InfusedConfectionRule),
        Box::new(concentrates::ConcentrateTextureRule),
        Box::new(concentrates::BulkDistillateRule),
        Box::new(vapes::VapeHardwareRule),
        Box::new(vapes::CartridgePackRule),
        Box::new(psychedelics::FunctionalMushroomRule),
        Box::new(psychedelics::PsychedelicsRule),
        Box::new(concentrates::MedicalTermRule),
        Box::new(tincture::OralTinctureRule),
        Box::new(tincture::BrandedTinctureRule),
        Box::new(other::GeneticsRule),
        Box::new(other::ParaphernaliaRule),
        Box::new(PrecedenceResolver),
    ]
}

// Vocabulary shared by several rules. All patterns run against lowercased,
// whitespace-collapsed text.
lazy_static! {
    pub(crate) static ref FLOWER_NOUN: Regex = Regex::new(
        r"\b(flowers?|buds?|nugs?|eighths?|quarter|ounces?|oz|smalls|shake|trim|popcorn)\b"
    )
    .unwrap();
    pub(crate) static ref WEIGHT: Regex =
        Regex::new(r"\b\d+(\.\d+)?\s?(g|gr|grams?)\b|\b1/8\b|\b(eighth|quarter|half oz|ounce|oz)\b")
            .unwrap();
    pub(crate) static ref STRAIN_TYPE: Regex = Regex::new(r"\b(indica|sativa|hybrid)\b").unwrap();
    pub(crate) static ref PREROLL: Regex =
        Regex::new(r"\b(pre[- ]?rolls?|joints?|blunts?|doob(ie)?s?)\b").unwrap();
    pub(crate) static ref CARTRIDGE: Regex = Regex::new(
        r"\b(carts?|cartridges?|disposables?|vapes?|vape pens?|pods?|510|all in one|aio|batter(y|ies))\b"
    )
    .unwrap();
    pub(crate) static ref MG_DOSE: Regex = Regex::new(r"\b\d+(\.\d+)?\s?mg\b").unwrap();
    pub(crate) static ref CONFECTION: Regex = Regex::new(
        r"\b(gumm(y|ies)|chocolates?|chocolate bars?|cand(y|ies)|lollipops?|caramels?|chews|brownies?|cookies?|(ice cream|waffle|sugar|candy) cones?)\b"
    )
    .unwrap();
    pub(crate) static ref EDIBLE_FORM: Regex = Regex::new(
        r"\b(gumm(y|ies)|chocolate bars?|lollipops?|chews|brownies?|edibles?|beverages?|drinks?|soda|syrup)\b"
    )
    .unwrap();
    pub(crate) static ref CONCENTRATE_TOKEN: Regex =
        Regex::new(r"\b(distillate|live resin|rosin|diamonds|sauce)\b").unwrap();
    pub(crate) static ref CANNABINOID: Regex = Regex::new(
        r"\b(thca?|cbd|cbn|cbg|delta[- ]?[89]|d[89]|hhc|cannabis|cannabinoids?|hemp)\b"
    )
    .unwrap();
    pub(crate) static ref PSILOCYBIN: Regex = Regex::new(
        r"\b(psilocybin|psilocybe|cubensis|shrooms?|magic mushrooms?|golden teachers?|penis envy)\b"
    )
    .unwrap();
    pub(crate) static ref PSYCHEDELIC: Regex = Regex::new(
        r"\b(psilocybin|psilocybe|cubensis|shrooms?|mushrooms?|golden teachers?|penis envy|lsd|blotter|dmt|mescaline|amanita|muscimol)\b"
    )
    .unwrap();
    pub(crate) static ref FUNCTIONAL_MUSHROOM: Regex = Regex::new(
        r"\b(lion'?s mane|reishi|chaga|cordyceps|turkey tail|functional mushrooms?)\b"
    )
    .unwrap();
    pub(crate) static ref VAPING_DISCLAIMER: Regex = Regex::new(
        r"\b(do not|don'?t|never|not for|not intended for|not to be)\s+(use\s+(in|for)\s+|be\s+)?(vape|vaped|vaping|smoke|smoked|smoking|inhale|inhalation)(\s+(or|and|/)\s+(vape|vaped|vaping|smoke|smoked|smoking|inhale|inhalation))?\b"
    )
    .unwrap();
}

/// Psilocybin-free functional mushroom listings (lion's mane, reishi, ...).
pub(crate) fn is_functional_mushroom(text: &str) -> bool {
    FUNCTIONAL_MUSHROOM.is_match(text) && !PSILOCYBIN.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_vocabulary() {
        assert!(WEIGHT.is_match(" og kush 3.5g "));
        assert!(WEIGHT.is_match(" 28 grams "));
        assert!(WEIGHT.is_match(" 1/8 "));
        assert!(!WEIGHT.is_match(" 1000mg "));
    }

    #[test]
    fn test_preroll_vocabulary() {
        for name in [" pre-roll ", " pre roll ", " prerolls ", " blunt ", " doobies "] {
            assert!(PREROLL.is_match(name), "{name}");
        }
        assert!(!PREROLL.is_match(" jointly owned "));
    }

    #[test]
    fn test_vaping_disclaimer() {
        assert!(VAPING_DISCLAIMER.is_match(" do not vape or smoke "));
        assert!(VAPING_DISCLAIMER.is_match(" not for use in vaping "));
        assert!(VAPING_DISCLAIMER.is_match(" don't smoke "));
        assert!(!VAPING_DISCLAIMER.is_match(" smooth vape "));
    }

    #[test]
    fn test_functional_mushroom() {
        assert!(is_functional_mushroom(" lion's mane gummies "));
        assert!(!is_functional_mushroom(" lion's mane and cubensis blend "));
        assert!(!is_functional_mushroom(" golden teacher "));
    }
}
