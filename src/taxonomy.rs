//! Taxonomy Store
//!
//! Static, read-only category tables. Every keyword phrase is compiled into a
//! whole-phrase pattern once, when the taxonomy is loaded, so classification
//! never builds regexes per listing.

use anyhow::{bail, Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Reserved category that absorbs incidental matches. Never a primary result.
pub const TIPS: &str = "Tips";

/// Fallback category for listings without a usable signal.
pub const OTHER: &str = "Other";

const EMBEDDED_TAXONOMY: &str = include_str!("../data/taxonomy.yaml");

lazy_static! {
    static ref BUILTIN: Taxonomy =
        Taxonomy::from_yaml_str(EMBEDDED_TAXONOMY).expect("embedded taxonomy must be valid");
}

/// On-disk shape of a taxonomy file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxonomyFile {
    pub categories: Vec<CategorySpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySpec {
    pub name: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub subcategories: Vec<SubcategorySpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubcategorySpec {
    pub name: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// A keyword phrase and its precompiled whole-phrase pattern.
#[derive(Debug, Clone)]
pub struct Keyword {
    phrase: String,
    pattern: Regex,
}

impl Keyword {
    pub fn new(phrase: &str) -> Result<Self> {
        let phrase = phrase.trim().to_lowercase();
        if phrase.is_empty() {
            bail!("empty keyword phrase");
        }
        let pattern = Regex::new(&phrase_pattern(&phrase))
            .with_context(|| format!("Failed to compile keyword '{phrase}'"))?;
        Ok(Self { phrase, pattern })
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

/// Build a case-insensitive pattern matching `phrase` as a whole word or
/// phrase. Word boundaries are only required on edges that are word
/// characters, so phrases such as `t-shirt` or `510` still anchor correctly.
pub fn phrase_pattern(phrase: &str) -> String {
    let starts_word = phrase.chars().next().is_some_and(|c| c.is_alphanumeric());
    let ends_word = phrase.chars().last().is_some_and(|c| c.is_alphanumeric());
    format!(
        "(?i){}{}{}",
        if starts_word { r"\b" } else { "" },
        regex::escape(phrase),
        if ends_word { r"\b" } else { "" }
    )
}

#[derive(Debug, Clone)]
pub struct Subcategory {
    name: String,
    keywords: Vec<Keyword>,
}

impl Subcategory {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn keywords(&self) -> &[Keyword] {
        &self.keywords
    }
}

#[derive(Debug, Clone)]
pub struct Category {
    name: String,
    keywords: Vec<Keyword>,
    subcategories: Vec<Subcategory>,
}

impl Category {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn keywords(&self) -> &[Keyword] {
        &self.keywords
    }

    pub fn subcategories(&self) -> &[Subcategory] {
        &self.subcategories
    }

    pub fn subcategory(&self, name: &str) -> Option<&Subcategory> {
        self.subcategories.iter().find(|s| s.name == name)
    }

    /// True for the reserved category that can never be a primary result.
    pub fn is_reserved(&self) -> bool {
        self.name == TIPS
    }

    /// True if any top-level keyword of this category occurs in `text`.
    pub fn matches_keyword(&self, text: &str) -> bool {
        self.keywords.iter().any(|k| k.is_match(text))
    }
}

/// Ordered, immutable category table.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    categories: Vec<Category>,
}

impl Taxonomy {
    /// The taxonomy compiled into the binary. Loaded on first use.
    pub fn builtin() -> &'static Taxonomy {
        &BUILTIN
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let file: TaxonomyFile =
            serde_yaml::from_str(content).context("Failed to parse taxonomy YAML")?;
        Self::from_spec(file)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read taxonomy file {}", path.display()))?;
        let taxonomy = Self::from_yaml_str(&content)
            .with_context(|| format!("Invalid taxonomy file {}", path.display()))?;
        log::info!(
            "Loaded taxonomy with {} categories from {}",
            taxonomy.categories.len(),
            path.display()
        );
        Ok(taxonomy)
    }

    pub fn from_spec(file: TaxonomyFile) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut categories = Vec::with_capacity(file.categories.len());

        for spec in file.categories {
            let name = spec.name.trim().to_string();
            if name.is_empty() {
                bail!("category with empty name");
            }
            if !seen.insert(name.clone()) {
                bail!("duplicate category '{name}'");
            }

            let keywords = compile_keywords(&spec.keywords)
                .with_context(|| format!("in category '{name}'"))?;

            let mut subcategories = Vec::with_capacity(spec.subcategories.len());
            for sub in spec.subcategories {
                let sub_name = sub.name.trim().to_string();
                if sub_name.is_empty() {
                    bail!("subcategory with empty name under '{name}'");
                }
                let keywords = compile_keywords(&sub.keywords)
                    .with_context(|| format!("in subcategory '{name}/{sub_name}'"))?;
                subcategories.push(Subcategory {
                    name: sub_name,
                    keywords,
                });
            }

            categories.push(Category {
                name,
                keywords,
                subcategories,
            });
        }

        for required in [TIPS, OTHER] {
            if !seen.contains(required) {
                bail!("taxonomy is missing required category '{required}'");
            }
        }

        Ok(Self { categories })
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

fn compile_keywords(phrases: &[String]) -> Result<Vec<Keyword>> {
    phrases.iter().map(|p| Keyword::new(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_taxonomy_loads() {
        let taxonomy = Taxonomy::builtin();
        assert!(taxonomy.category("Flower").is_some());
        assert!(taxonomy.category("PreRolls").is_some());
        assert!(taxonomy.category(TIPS).unwrap().is_reserved());
        assert!(!taxonomy.category(OTHER).unwrap().is_reserved());
        assert_eq!(taxonomy.names().next(), Some("Flower"));
    }

    #[test]
    fn test_subcategory_parentage() {
        let taxonomy = Taxonomy::builtin();
        let hash = taxonomy.category("Hash").unwrap();
        let temple = hash.subcategory("TempleBall").unwrap();
        assert!(temple.keywords().iter().any(|k| k.phrase() == "temple ball"));
        assert!(taxonomy.category("Other").unwrap().subcategory("Bongs").is_some());
        assert!(taxonomy.category("Flower").unwrap().subcategory("Bongs").is_none());
    }

    #[test]
    fn test_keyword_whole_phrase_matching() {
        let kw = Keyword::new("bud").unwrap();
        assert!(kw.is_match(" dense bud structure "));
        assert!(kw.is_match("BUD"));
        assert!(!kw.is_match(" budder "));

        let kw = Keyword::new("live resin").unwrap();
        assert!(kw.is_match(" 1g live resin badder "));
        assert!(!kw.is_match(" live  resinous "));

        let kw = Keyword::new("t-shirt").unwrap();
        assert!(kw.is_match(" logo t-shirt, black "));
    }

    #[test]
    fn test_duplicate_category_rejected() {
        let yaml = r#"
categories:
  - name: Other
  - name: Tips
  - name: Other
"#;
        let err = Taxonomy::from_yaml_str(yaml).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_required_categories_enforced() {
        let yaml = r#"
categories:
  - name: Flower
    keywords: [flower]
  - name: Other
"#;
        let err = Taxonomy::from_yaml_str(yaml).unwrap_err();
        assert!(err.to_string().contains("Tips"));
    }

    #[test]
    fn test_empty_keyword_rejected() {
        assert!(Keyword::new("   ").is_err());
    }
}
