use super::concentrates::RSO;
use super::{CANNABINOID, CONCENTRATES, CONFECTION, ELIMINATE, TINCTURE, VAPES, VAPING_DISCLAIMER};
use crate::context::ScoringContext;
use crate::pipeline::Rule;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ORAL_USE: Regex = Regex::new(
        r"\b((for )?oral use( only)?|take orally|ingest orally|sublingual(ly)?|under the tongue|mct( oil)?)\b"
    )
    .unwrap();
    static ref MCT: Regex = Regex::new(r"\bmct\b").unwrap();
    static ref SUBLINGUAL: Regex =
        Regex::new(r"\b(sublingual(ly)?|under the tongue)\b").unwrap();
    static ref TINCTURE_BRAND: Regex = Regex::new(
        r"\b(charlotte'?s web|papa (&|and) barkley|care by design|lazarus naturals|cornbread hemp|cbdistillery|medterra|joy organics|mary'?s nutritionals|absolute xtracts)\b"
    )
    .unwrap();
    static ref TINCTURE_FORM: Regex =
        Regex::new(r"\b(drops|tinctures?|oil|dropper|\d+\s?ml)\b").unwrap();
}

/// Oral-use-only, sublingual or MCT language on a cannabinoid product forces
/// Tincture above every competitor. A "do not vape" disclaimer also removes
/// whatever Vapes score the listing picked up.
pub struct OralTinctureRule;

impl Rule for OralTinctureRule {
    fn name(&self) -> &str {
        "OralTincture"
    }

    fn apply(&self, ctx: &mut ScoringContext) {
        if !ctx.has(&ORAL_USE)
            || !ctx.has(&CANNABINOID)
            || ctx.has(&RSO)
            || ctx.has(&CONFECTION)
        {
            return;
        }

        let forced = ctx.max_score_excluding(TINCTURE) + 1;
        ctx.set(TINCTURE, forced);

        if ctx.has(&MCT) {
            ctx.sub(TINCTURE, "MCT");
        }
        if ctx.has(&SUBLINGUAL) {
            ctx.sub(TINCTURE, "Sublingual");
        }

        if ctx.has(&VAPING_DISCLAIMER) {
            ctx.demote(VAPES, ELIMINATE);
        }
    }
}

/// Known tincture product lines sold as drops or oil.
pub struct BrandedTinctureRule;

impl Rule for BrandedTinctureRule {
    fn name(&self) -> &str {
        "BrandedTincture"
    }

    fn apply(&self, ctx: &mut ScoringContext) {
        if ctx.name_has(&TINCTURE_BRAND) && ctx.has(&TINCTURE_FORM) {
            ctx.add(TINCTURE, 8);
            ctx.demote(CONCENTRATES, 4);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::base::BaseKeywordRule;
    use crate::rules::vapes::VapeHardwareRule;
    use crate::taxonomy::Taxonomy;

    fn run(rules: &[&dyn Rule], name: &str, description: &str) -> ScoringContext<'static> {
        let mut ctx = ScoringContext::new(Taxonomy::builtin(), Some(name), Some(description));
        for rule in rules {
            rule.apply(&mut ctx);
        }
        ctx
    }

    #[test]
    fn test_oral_use_forces_tincture() {
        let ctx = run(
            &[&BaseKeywordRule, &VapeHardwareRule, &OralTinctureRule],
            "D9 Distillate in MCT 30ml",
            "Full spectrum THC distillate for oral use only. Do not vape.",
        );
        assert_eq!(ctx.score(TINCTURE), ctx.max_score_excluding(TINCTURE) + 1);
        assert!(!ctx.has_score(VAPES));
        assert!(ctx.subcategories_of(TINCTURE).unwrap().contains("MCT"));
    }

    #[test]
    fn test_oral_use_requires_cannabinoid() {
        let ctx = run(&[&OralTinctureRule], "Elderberry Syrup", "For oral use only");
        assert!(!ctx.has_score(TINCTURE));
    }

    #[test]
    fn test_branded_tincture() {
        let ctx = run(&[&BrandedTinctureRule], "Charlotte's Web Drops", "CBD oil 30ml");
        assert_eq!(ctx.score(TINCTURE), 8);
    }
}
