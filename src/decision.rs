//! Decision record returned by the recommendation engine

use crate::catalog::CropRecord;
use serde::Serialize;

/// Image shown when no crop could be determined
pub const DEFAULT_IMAGE: &str = "default";
pub const NO_DETERMINATION_HEADLINE: &str = "no determination";
pub const NO_REASON_EXPLANATION: &str = "no specific reason available";

/// Complete, displayable outcome of one inference call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decision {
    pub matched: bool,
    pub crop_name: Option<String>,
    pub image_asset: String,
    pub headline: String,
    pub explanation: String,
}

impl Decision {
    /// Decision for a label found in the catalog
    pub fn recommended(record: &CropRecord, explanation: &str) -> Self {
        Self {
            matched: true,
            crop_name: Some(record.name.clone()),
            image_asset: record.image_asset.clone(),
            headline: headline_for(&record.name),
            explanation: explanation.to_string(),
        }
    }

    /// Fallback for a label outside the catalog
    pub fn undetermined() -> Self {
        Self {
            matched: false,
            crop_name: None,
            image_asset: DEFAULT_IMAGE.to_string(),
            headline: NO_DETERMINATION_HEADLINE.to_string(),
            explanation: NO_REASON_EXPLANATION.to_string(),
        }
    }
}

pub fn headline_for(crop_name: &str) -> String {
    format!("{} is the best crop to be cultivated here", crop_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommended() {
        let record = CropRecord::new(13, "Banana", "banana.png");
        let d = Decision::recommended(&record, "Tropical and humid.");
        assert!(d.matched);
        assert_eq!(d.crop_name.as_deref(), Some("Banana"));
        assert_eq!(d.image_asset, "banana.png");
        assert_eq!(d.headline, "Banana is the best crop to be cultivated here");
        assert_eq!(d.explanation, "Tropical and humid.");
    }

    #[test]
    fn test_undetermined() {
        let d = Decision::undetermined();
        assert!(!d.matched);
        assert_eq!(d.crop_name, None);
        assert_eq!(d.image_asset, "default");
        assert_eq!(d.headline, "no determination");
        assert_eq!(d.explanation, "no specific reason available");
    }

    #[test]
    fn test_serializes_absent_crop_as_null() {
        let json = serde_json::to_value(Decision::undetermined()).unwrap();
        assert!(json["crop_name"].is_null());
        assert_eq!(json["matched"], false);
    }
}
