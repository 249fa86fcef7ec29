//! Gift category catalog.
//!
//! The catalog is configuration: it decides which occasions a student fills
//! in and how they roll up into the Family / Friends / Others groups. It is
//! never persisted alongside student data.

use serde::{Deserialize, Serialize};
use shared::GiftGroup;
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiftCategory {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub hint: String,
    pub occasions: Vec<String>,
    pub group: GiftGroup,
    /// Occasions whose times-per-year is fixed and not editable by students
    #[serde(default)]
    pub fixed_frequency: BTreeMap<String, f64>,
}

impl GiftCategory {
    pub fn fixed_frequency_for(&self, occasion: &str) -> Option<f64> {
        self.fixed_frequency.get(occasion).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GiftCatalog {
    categories: Vec<GiftCategory>,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CatalogError {
    #[error("Gift catalog must contain at least one category")]
    Empty,
    #[error("Duplicate gift category id: {0}")]
    DuplicateCategory(String),
    #[error("Gift category {0} has no occasions")]
    NoOccasions(String),
    #[error("Fixed frequency for {category}/{occasion} does not match any occasion")]
    UnknownFixedOccasion { category: String, occasion: String },
}

impl GiftCatalog {
    #[cfg(test)]
    pub fn new(categories: Vec<GiftCategory>) -> Result<Self, CatalogError> {
        let catalog = Self { categories };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The four categories the classroom tool ships with
    pub fn builtin() -> Self {
        fn occasions(names: &[&str]) -> Vec<String> {
            names.iter().map(|s| s.to_string()).collect()
        }

        let mut imm_fixed = BTreeMap::new();
        imm_fixed.insert("Mother's Day".to_string(), 1.0);
        imm_fixed.insert("Father's Day".to_string(), 1.0);

        Self {
            categories: vec![
                GiftCategory {
                    id: "immFamily".to_string(),
                    label: "Immediate Family".to_string(),
                    hint: "Parents and siblings".to_string(),
                    occasions: occasions(&["Birthdays", "Religious holiday(s)", "Mother's Day", "Father's Day"]),
                    group: GiftGroup::Family,
                    fixed_frequency: imm_fixed,
                },
                GiftCategory {
                    id: "extFamily".to_string(),
                    label: "Extended Family".to_string(),
                    hint: "Cousins, aunts, uncles, grandparents".to_string(),
                    occasions: occasions(&["Birthdays", "Religious holiday(s)"]),
                    group: GiftGroup::Family,
                    fixed_frequency: BTreeMap::new(),
                },
                GiftCategory {
                    id: "friends".to_string(),
                    label: "Friends".to_string(),
                    hint: String::new(),
                    occasions: occasions(&["Birthdays", "Religious holiday(s)", "Other"]),
                    group: GiftGroup::Friends,
                    fixed_frequency: BTreeMap::new(),
                },
                GiftCategory {
                    id: "others".to_string(),
                    label: "Others".to_string(),
                    hint: String::new(),
                    occasions: occasions(&["Teachers (end of term/year)", "Other occasions"]),
                    group: GiftGroup::Others,
                    fixed_frequency: BTreeMap::new(),
                },
            ],
        }
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.categories.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for category in &self.categories {
            if !seen.insert(category.id.as_str()) {
                return Err(CatalogError::DuplicateCategory(category.id.clone()));
            }
            if category.occasions.is_empty() {
                return Err(CatalogError::NoOccasions(category.id.clone()));
            }
            for occasion in category.fixed_frequency.keys() {
                if !category.occasions.contains(occasion) {
                    return Err(CatalogError::UnknownFixedOccasion {
                        category: category.id.clone(),
                        occasion: occasion.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn categories(&self) -> &[GiftCategory] {
        &self.categories
    }

    pub fn category(&self, id: &str) -> Option<&GiftCategory> {
        self.categories.iter().find(|c| c.id == id)
    }
}

impl Default for GiftCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
