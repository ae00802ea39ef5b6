//! Literal listings with known-good classifications. Any keyword or magnitude
//! change that moves one of these is a behavior change.

use crate::classifier::classify;
use crate::context::{Classification, ScoringContext};
use crate::rules::standard_rules;
use crate::taxonomy::Taxonomy;

fn expect(name: &str, description: &str, primary: &str, subcategories: &[&str]) {
    let result = classify(Some(name), Some(description));
    let expected = Classification::new(
        primary,
        subcategories.iter().map(|s| s.to_string()).collect(),
    );
    assert_eq!(result, expected, "listing '{name}'");
}

#[test]
fn test_plain_flower() {
    expect(
        "OG Kush 3.5g",
        "Top shelf indica flower, dense buds.",
        "Flower",
        &["Exotic"],
    );
    expect(
        "OG Kush 3.5g",
        "Top shelf indica flower, indoor grown",
        "Flower",
        &["Exotic", "Indoor"],
    );
}

#[test]
fn test_temple_ball_hash() {
    expect(
        "Temple Ball Hash 2g",
        "authentic pressed hash temple balls",
        "Hash",
        &["TempleBall"],
    );
    expect(
        "Temple Ball Hash 2g",
        "Hand-rolled traditional temple ball",
        "Hash",
        &["TempleBall"],
    );
}

#[test]
fn test_glass_bong() {
    expect(
        "Glass Bong 12\"",
        "borosilicate bong for smoking",
        "Other",
        &["Bongs"],
    );
    expect(
        "Glass Bong 12\"",
        "Borosilicate glass bong with percolator",
        "Other",
        &["Bongs"],
    );
}

#[test]
fn test_confection_named_sauce_is_edible() {
    expect(
        "Wonky sauce 1000mg",
        "Gourmet chocolate candy sauce, 1000mg",
        "Edibles",
        &["Candy", "Chocolate"],
    );
}

#[test]
fn test_bulk_distillate_is_concentrate() {
    expect(
        "D9 Distillate 1 Liter Jar",
        "Bulk delta 9 distillate, lab tested, ships in a glass jar/syringe",
        "Concentrates",
        &["Distillate"],
    );
}

#[test]
fn test_preroll_title() {
    expect("Blue Dream Pre-Roll 1g", "Sativa flower joint", "PreRolls", &[]);
}

#[test]
fn test_dessert_strain_is_flower() {
    expect(
        "Wedding Cake 3.5g",
        "Indica dominant flower, dense buds",
        "Flower",
        &[],
    );
}

#[test]
fn test_moon_rocks() {
    expect(
        "Moon Rocks 1g",
        "Flower dipped in oil and rolled in kief",
        "Flower",
        &["MoonRocks"],
    );
}

#[test]
fn test_psilocybin_chocolate() {
    expect(
        "Golden Teacher Chocolate Bar",
        "3.5g psilocybin mushroom chocolate",
        "Psychedelics",
        &["Edibles", "Mushrooms"],
    );
}

#[test]
fn test_oral_use_tincture() {
    expect(
        "THC Tincture 1000mg",
        "MCT oil, for oral use only. Do not vape.",
        "Tincture",
        &["MCT"],
    );
}

#[test]
fn test_feminized_seeds() {
    expect(
        "Gelato Feminized Seeds 5 pack",
        "Indica dominant strain, 5 seeds per pack",
        "Other",
        &["Genetics"],
    );
}

#[test]
fn test_cartridge_pack() {
    expect(
        "Cart Bundle 3 Pack",
        "Blue Dream, Gelato, Sour Diesel 1g carts, 510 thread",
        "Vapes",
        &["Cartridges"],
    );
}

#[test]
fn test_battery_and_coil_hardware() {
    expect(
        "Rechargeable Battery 650mAh",
        "Variable voltage battery with USB-C charging",
        "Vapes",
        &["Batteries"],
    );
    expect(
        "Ceramic Coil Battery Kit",
        "draw activated, rechargeable",
        "Vapes",
        &["Batteries"],
    );
}

#[test]
fn test_functional_mushroom_not_psychedelic() {
    let result = classify(
        Some("Lion's Mane Mushroom Capsules"),
        Some("Functional mushroom supplement"),
    );
    assert_eq!(result.primary.as_deref(), Some("Other"));
    assert!(result.has_subcategory("Capsules"));
}

#[test]
fn test_no_signal_is_other() {
    expect("Mystery Box", "Surprise!", "Other", &[]);
}

#[test]
fn test_scores_stay_positive_after_every_rule() {
    let listings = [
        ("OG Kush 3.5g", "Top shelf indica flower, dense buds."),
        ("Temple Ball Hash 2g", "authentic pressed hash temple balls"),
        ("Wonky sauce 1000mg", "Gourmet chocolate candy sauce, 1000mg"),
        ("THC Tincture 1000mg", "MCT oil, for oral use only. Do not vape."),
        ("Wedding Cake 3.5g", "Indica dominant flower, dense buds"),
        ("Golden Teacher Chocolate Bar", "3.5g psilocybin mushroom chocolate"),
        ("Moon Rocks 1g", "Flower dipped in oil and rolled in kief"),
        ("Gelato Feminized Seeds 5 pack", "Indica dominant strain, 5 seeds per pack"),
    ];
    for (name, description) in listings {
        let mut ctx = ScoringContext::new(Taxonomy::builtin(), Some(name), Some(description));
        for rule in standard_rules() {
            rule.apply(&mut ctx);
            assert!(
                ctx.scores().values().all(|score| *score > 0),
                "non-positive score after {} for '{name}': {:?}",
                rule.name(),
                ctx.scores()
            );
        }
        assert!(ctx.result().is_some());
    }
}
