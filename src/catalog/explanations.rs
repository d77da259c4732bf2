//! Explanation Catalog
//!
//! Crop name → human-readable justification. Crops without an entry fall
//! back to `GENERIC_EXPLANATION`; a gap is logged, never an error.

use crate::catalog::labels::LabelCatalog;
use rustc_hash::FxHashMap;
use std::sync::{Arc, OnceLock};

/// Used for crops the catalog has no text for
pub const GENERIC_EXPLANATION: &str =
    "recommended based on provided soil and environmental conditions";

static EXPLANATIONS: &[(&str, &str)] = &[
    ("Rice", "Rice is recommended because it thrives in high nitrogen levels, warm temperatures, and high humidity."),
    ("Maize", "Maize is recommended due to its adaptability to moderate nitrogen, phosphorus, and potassium levels, along with warm temperatures."),
    ("Jute", "Jute is suitable for areas with moderate nitrogen and potassium levels, and it prefers warm and humid conditions."),
    ("Cotton", "Cotton is recommended for its ability to grow in well-drained soils with moderate nitrogen and phosphorus levels."),
    ("Coconut", "Coconut is ideal for tropical climates with high humidity and moderate nutrient levels."),
    ("Papaya", "Papaya thrives in warm temperatures, high humidity, and well-drained soils with balanced nutrients."),
    ("Orange", "Oranges grow well in moderate temperatures, balanced pH, and adequate nitrogen and potassium levels."),
    ("Apple", "Apples are recommended for cooler climates with moderate nitrogen and phosphorus levels."),
    ("Muskmelon", "Muskmelons prefer warm temperatures, moderate humidity, and well-drained soils."),
    ("Watermelon", "Watermelons thrive in warm climates with high humidity and balanced nutrient levels."),
    ("Grapes", "Grapes are suitable for moderate temperatures, well-drained soils, and balanced nutrients."),
    ("Mango", "Mangoes grow well in warm climates with moderate nitrogen and potassium levels."),
    ("Banana", "Bananas are recommended for tropical climates with high humidity and balanced nutrients."),
    ("Pomegranate", "Pomegranates thrive in warm temperatures, moderate humidity, and well-drained soils."),
    ("Lentil", "Lentils are suitable for cooler climates with moderate nitrogen and phosphorus levels."),
    ("Blackgram", "Blackgram grows well in warm temperatures and moderate nutrient levels."),
    ("Mungbean", "Mungbeans thrive in warm climates with moderate nitrogen and potassium levels."),
    ("Mothbeans", "Mothbeans are recommended for arid climates with low to moderate nutrient levels."),
    ("Pigeonpeas", "Pigeonpeas grow well in warm temperatures and moderate nutrient levels."),
    ("Kidneybeans", "Kidneybeans are suitable for moderate temperatures and balanced nutrients."),
    ("Chickpea", "Chickpeas thrive in cooler climates with moderate nitrogen and phosphorus levels."),
    ("Coffee", "Coffee is recommended for tropical climates with high humidity and balanced nutrients."),
];

/// Read-only crop name → explanation lookup
#[derive(Debug, Clone)]
pub struct ExplanationCatalog {
    entries: FxHashMap<String, String>,
}

impl ExplanationCatalog {
    pub fn from_entries<N, T>(entries: impl IntoIterator<Item = (N, T)>) -> Self
    where
        N: Into<String>,
        T: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(name, text)| (name.into(), text.into()))
            .collect();
        Self { entries }
    }

    pub fn builtin() -> Arc<ExplanationCatalog> {
        static BUILTIN: OnceLock<Arc<ExplanationCatalog>> = OnceLock::new();
        BUILTIN
            .get_or_init(|| Arc::new(Self::from_entries(EXPLANATIONS.iter().copied())))
            .clone()
    }

    /// Exact entry for a crop, if any
    pub fn lookup(&self, crop_name: &str) -> Option<&str> {
        self.entries.get(crop_name).map(|s| s.as_str())
    }

    /// Entry for a crop, or the generic fallback
    pub fn explain(&self, crop_name: &str) -> &str {
        self.lookup(crop_name).unwrap_or(GENERIC_EXPLANATION)
    }

    /// Crop names in `labels` that have no explanation, in label order
    pub fn missing_for<'a>(&self, labels: &'a LabelCatalog) -> Vec<&'a str> {
        labels
            .records()
            .into_iter()
            .filter(|record| !self.entries.contains_key(&record.name))
            .map(|record| record.name.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
