//! Scoring Context
//!
//! Per-call mutable state shared by every rule in the pipeline. Rules
//! communicate only through the five mutators below; the score map never holds
//! a value at or below zero, so "does this category have a score" is a
//! presence test.

use crate::taxonomy::Taxonomy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Final output of one classification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub primary: Option<String>,
    #[serde(default)]
    pub subcategories: Vec<String>,
}

impl Classification {
    pub fn new(primary: &str, subcategories: Vec<String>) -> Self {
        Self {
            primary: Some(primary.to_string()),
            subcategories,
        }
    }

    pub fn has_subcategory(&self, name: &str) -> bool {
        self.subcategories.iter().any(|s| s == name)
    }
}

pub struct ScoringContext<'t> {
    taxonomy: &'t Taxonomy,
    name: String,
    description: String,
    text: String,
    name_text: String,
    scores: HashMap<String, i32>,
    subcategories: BTreeMap<String, BTreeSet<String>>,
    result: Option<Classification>,
}

impl<'t> ScoringContext<'t> {
    pub fn new(taxonomy: &'t Taxonomy, name: Option<&str>, description: Option<&str>) -> Self {
        let name = name.unwrap_or("").to_string();
        let description = description.unwrap_or("").to_string();

        let name_norm = normalize(&name);
        let desc_norm = normalize(&description);
        let joined = [name_norm.as_str(), desc_norm.as_str()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            taxonomy,
            text: format!(" {joined} "),
            name_text: format!(" {name_norm} "),
            name,
            description,
            scores: HashMap::new(),
            subcategories: BTreeMap::new(),
            result: None,
        }
    }

    pub fn taxonomy(&self) -> &'t Taxonomy {
        self.taxonomy
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Lowercased `" {name} {description} "` with whitespace collapsed.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Lowercased `" {name} "` with whitespace collapsed.
    pub fn name_text(&self) -> &str {
        &self.name_text
    }

    pub fn has(&self, pattern: &Regex) -> bool {
        pattern.is_match(&self.text)
    }

    pub fn name_has(&self, pattern: &Regex) -> bool {
        pattern.is_match(&self.name_text)
    }

    pub fn score(&self, category: &str) -> i32 {
        self.scores.get(category).copied().unwrap_or(0)
    }

    pub fn has_score(&self, category: &str) -> bool {
        self.scores.contains_key(category)
    }

    pub fn scores(&self) -> &HashMap<String, i32> {
        &self.scores
    }

    /// Highest current score among all categories other than `category`.
    pub fn max_score_excluding(&self, category: &str) -> i32 {
        self.scores
            .iter()
            .filter(|(name, _)| name.as_str() != category)
            .map(|(_, score)| *score)
            .max()
            .unwrap_or(0)
    }

    pub fn subcategories_of(&self, category: &str) -> Option<&BTreeSet<String>> {
        self.subcategories.get(category)
    }

    pub fn has_subcategories(&self, category: &str) -> bool {
        self.subcategories
            .get(category)
            .is_some_and(|set| !set.is_empty())
    }

    /// Increase `category` by `delta`, starting from zero when absent.
    pub fn add(&mut self, category: &str, delta: i32) {
        let next = self.score(category) + delta;
        if next <= 0 {
            self.scores.remove(category);
        } else {
            self.scores.insert(category.to_string(), next);
        }
    }

    /// Decrease a present score by `delta`; a result at or below zero deletes
    /// the entry. Absent categories are left alone.
    pub fn demote(&mut self, category: &str, delta: i32) {
        if let Some(current) = self.scores.get_mut(category) {
            *current -= delta;
            if *current <= 0 {
                self.scores.remove(category);
            }
        }
    }

    /// Overwrite `category` with `value`.
    pub fn set(&mut self, category: &str, value: i32) {
        if value <= 0 {
            self.scores.remove(category);
        } else {
            self.scores.insert(category.to_string(), value);
        }
    }

    pub fn remove(&mut self, category: &str) {
        self.scores.remove(category);
    }

    /// Tag `subcategory` under `category`.
    pub fn sub(&mut self, category: &str, subcategory: &str) {
        if category.is_empty() || subcategory.is_empty() {
            return;
        }
        self.subcategories
            .entry(category.to_string())
            .or_default()
            .insert(subcategory.to_string());
    }

    pub fn set_result(&mut self, result: Classification) {
        self.result = Some(result);
    }

    pub fn result(&self) -> Option<&Classification> {
        self.result.as_ref()
    }

    pub fn take_result(&mut self) -> Option<Classification> {
        self.result.take()
    }
}

/// Lowercase and collapse runs of whitespace to single spaces.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
