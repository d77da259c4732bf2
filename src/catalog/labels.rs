//! Label Catalog
//!
//! Maps the trained classifier's integer labels (1-22) to crops.

use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Integer class emitted by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label(pub u32);

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A crop the classifier can recommend
#[derive(Debug, Clone, PartialEq)]
pub struct CropRecord {
    pub label: Label,
    pub name: String,
    pub image_asset: String,
}

impl CropRecord {
    pub fn new(label: u32, name: &str, image_asset: &str) -> Self {
        Self {
            label: Label(label),
            name: name.to_string(),
            image_asset: image_asset.to_string(),
        }
    }
}

// ============================================================================
// EMBEDDED LABEL TABLE
// Label space of the fitted model: 1..=22
// ============================================================================

static CROPS: &[(u32, &str, &str)] = &[
    (1, "Rice", "rice.png"),
    (2, "Maize", "maize.png"),
    (3, "Jute", "jute.png"),
    (4, "Cotton", "cotton.png"),
    (5, "Coconut", "coconut.png"),
    (6, "Papaya", "papaya.png"),
    (7, "Orange", "orange.png"),
    (8, "Apple", "apple.png"),
    (9, "Muskmelon", "muskmelon.png"),
    (10, "Watermelon", "watermelon.png"),
    (11, "Grapes", "grapes.png"),
    (12, "Mango", "mango.png"),
    (13, "Banana", "banana.png"),
    (14, "Pomegranate", "pomegranate.png"),
    (15, "Lentil", "lentil.png"),
    (16, "Blackgram", "blackgram.png"),
    (17, "Mungbean", "mungbeans.png"),
    (18, "Mothbeans", "mothbeans.png"),
    (19, "Pigeonpeas", "pigeonpeas.png"),
    (20, "Kidneybeans", "kidneybeans.png"),
    (21, "Chickpea", "chickpea.png"),
    (22, "Coffee", "coffee.png"),
];

/// Read-only label → crop lookup
#[derive(Debug, Clone)]
pub struct LabelCatalog {
    records: FxHashMap<Label, CropRecord>,
}

impl LabelCatalog {
    /// Build a catalog from explicit records (later duplicates replace earlier ones)
    pub fn from_records(records: impl IntoIterator<Item = CropRecord>) -> Self {
        let records = records
            .into_iter()
            .map(|record| (record.label, record))
            .collect();
        Self { records }
    }

    /// The embedded catalog matching the shipped model's label space
    pub fn builtin() -> Arc<LabelCatalog> {
        static BUILTIN: OnceLock<Arc<LabelCatalog>> = OnceLock::new();
        BUILTIN
            .get_or_init(|| {
                Arc::new(Self::from_records(
                    CROPS
                        .iter()
                        .map(|&(label, name, image)| CropRecord::new(label, name, image)),
                ))
            })
            .clone()
    }

    pub fn lookup(&self, label: Label) -> Option<&CropRecord> {
        self.records.get(&label)
    }

    pub fn contains(&self, label: Label) -> bool {
        self.records.contains_key(&label)
    }

    /// Records sorted by label
    pub fn records(&self) -> Vec<&CropRecord> {
        let mut records: Vec<&CropRecord> = self.records.values().collect();
        records.sort_by_key(|r| r.label);
        records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
