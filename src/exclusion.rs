//! Exclusion filters
//!
//! Listings that are not products at all (tips, fees, custom-order
//! placeholders) are dropped before classification.

use crate::context::normalize;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TIP_NAME: Regex = Regex::new(
        r"^(tips?|gratuity|donation)( \$?\d+(\.\d{2})?)?$|\b(tip jar|driver tip|add a tip|tip for|tipping|gratuity|donations?|referral|shipping fee|shipping insurance|shipping cost|delivery fee|service fee|handling fee|expedited shipping)\b"
    )
    .unwrap();
    static ref TIP_DESCRIPTION: Regex = Regex::new(
        r"\b(this is a tip|add a tip|tip for (your|the) driver|thank you for tipping|not a product|referral (bonus|credit|reward)|covers? (the )?shipping)\b"
    )
    .unwrap();
    static ref CUSTOM_NAME: Regex = Regex::new(
        r"\bcustom (order|listing|request|invoice)\b|\bspecial order\b|\b(reserved|hold) for\b|\bplaceholder\b|\bprivate listing\b|\bpayment (link|for)\b"
    )
    .unwrap();
    static ref CUSTOM_DESCRIPTION: Regex = Regex::new(
        r"\b(custom order|do not purchase unless|only purchase if|for (a )?specific customer|placeholder listing|as discussed)\b"
    )
    .unwrap();
}

/// Tip, referral, donation or shipping/delivery fee listings.
pub fn is_tip_listing(name: Option<&str>, description: Option<&str>) -> bool {
    let name = normalize(name.unwrap_or(""));
    let description = normalize(description.unwrap_or(""));
    TIP_NAME.is_match(&name) || TIP_DESCRIPTION.is_match(&description)
}

/// Custom-order placeholders created for one buyer.
pub fn is_custom_order_listing(name: Option<&str>, description: Option<&str>) -> bool {
    let name = normalize(name.unwrap_or(""));
    let description = normalize(description.unwrap_or(""));
    CUSTOM_NAME.is_match(&name) || CUSTOM_DESCRIPTION.is_match(&description)
}
