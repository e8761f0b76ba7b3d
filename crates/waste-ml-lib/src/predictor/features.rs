//! Keyword feature extraction for waste descriptions
//!
//! Turns a free-text description and an optional category hint into the
//! six-slot vector the classification model was fit against. The keyword
//! lists and confidence constants are a fixed lookup table; changing them
//! shifts the feature distribution away from the trained weights.

use crate::models::WasteCategory;

/// Number of slots in a waste feature vector
pub const NUM_WASTE_FEATURES: usize = 6;

/// Floor applied to the plastic/metal/paper slot by a category hint
pub const CATEGORY_HINT_CONFIDENCE: f32 = 0.6;

/// Plastic slot value when nothing else matched
pub const FALLBACK_DRY_CONFIDENCE: f32 = 0.5;

const PLASTIC: usize = 0;
const ORGANIC: usize = 1;
const METAL: usize = 2;
const PAPER: usize = 3;
const ELECTRONIC: usize = 4;
const CHEMICAL: usize = 5;

/// Keyword list and match confidence for one slot
struct Axis {
    slot: usize,
    confidence: f32,
    keywords: &'static [&'static str],
}

const AXES: [Axis; NUM_WASTE_FEATURES] = [
    Axis {
        slot: PLASTIC,
        confidence: 0.8,
        keywords: &["plastic", "bottle", "container", "bag", "wrapper"],
    },
    Axis {
        slot: ORGANIC,
        confidence: 0.8,
        keywords: &["organic", "food", "vegetable", "fruit", "compost", "wet"],
    },
    Axis {
        slot: METAL,
        confidence: 0.8,
        keywords: &["metal", "aluminum", "steel", "can", "tin"],
    },
    Axis {
        slot: PAPER,
        confidence: 0.8,
        keywords: &["paper", "cardboard", "newspaper", "magazine"],
    },
    Axis {
        slot: ELECTRONIC,
        confidence: 0.9,
        keywords: &["electronic", "e-waste", "battery", "phone", "laptop", "device"],
    },
    Axis {
        slot: CHEMICAL,
        confidence: 0.9,
        keywords: &["chemical", "hazardous", "toxic", "paint", "oil", "battery"],
    },
];

/// Feature vector: [plastic, organic, metal, paper, electronic, chemical]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WasteFeatures(pub [f32; NUM_WASTE_FEATURES]);

impl WasteFeatures {
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn plastic(&self) -> f32 {
        self.0[PLASTIC]
    }

    pub fn organic(&self) -> f32 {
        self.0[ORGANIC]
    }

    pub fn metal(&self) -> f32 {
        self.0[METAL]
    }

    pub fn paper(&self) -> f32 {
        self.0[PAPER]
    }

    pub fn electronic(&self) -> f32 {
        self.0[ELECTRONIC]
    }

    pub fn chemical(&self) -> f32 {
        self.0[CHEMICAL]
    }
}

/// Lexical feature extractor
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordFeatureExtractor;

impl KeywordFeatureExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Build the feature vector for a description and optional hint
    pub fn extract(&self, description: &str, category: Option<WasteCategory>) -> WasteFeatures {
        let text = description.to_lowercase();
        let mut features = [0.0f32; NUM_WASTE_FEATURES];

        for axis in &AXES {
            if axis.keywords.iter().any(|kw| text.contains(kw)) {
                features[axis.slot] = axis.confidence;
            }
        }

        match category {
            Some(WasteCategory::Plastic) => {
                features[PLASTIC] = features[PLASTIC].max(CATEGORY_HINT_CONFIDENCE)
            }
            Some(WasteCategory::Metal) => {
                features[METAL] = features[METAL].max(CATEGORY_HINT_CONFIDENCE)
            }
            Some(WasteCategory::Paper) => {
                features[PAPER] = features[PAPER].max(CATEGORY_HINT_CONFIDENCE)
            }
            // Organic and e-waste hints set the slot outright
            Some(WasteCategory::Organic) => features[ORGANIC] = 0.8,
            Some(WasteCategory::EWaste) => features[ELECTRONIC] = 0.9,
            None => {}
        }

        if features.iter().sum::<f32>() == 0.0 {
            features[PLASTIC] = FALLBACK_DRY_CONFIDENCE;
        }

        WasteFeatures(features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(description: &str, category: Option<WasteCategory>) -> WasteFeatures {
        KeywordFeatureExtractor::new().extract(description, category)
    }

    #[test]
    fn test_plastic_description() {
        let f = extract("plastic bottles and containers", None);
        assert_eq!(f.0, [0.8, 0.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_empty_description_falls_back_to_dry() {
        let f = extract("", None);
        assert_eq!(f.0, [0.5, 0.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_unrecognized_description_falls_back_to_dry() {
        let f = extract("assorted stuff from the garage", None);
        assert_eq!(f.plastic(), FALLBACK_DRY_CONFIDENCE);
        assert_eq!(f.as_slice().iter().sum::<f32>(), FALLBACK_DRY_CONFIDENCE);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let f = extract("Old NEWSPAPER stack", None);
        assert_eq!(f.paper(), 0.8);
    }

    #[test]
    fn test_battery_hits_electronic_and_chemical() {
        let f = extract("used battery", None);
        assert_eq!(f.electronic(), 0.9);
        assert_eq!(f.chemical(), 0.9);
        assert_eq!(f.plastic(), 0.0);
    }

    #[test]
    fn test_keywords_match_as_substrings() {
        // "can" inside "scanner" is still a metal hit
        let f = extract("broken scanner", None);
        assert_eq!(f.metal(), 0.8);
    }

    #[test]
    fn test_multiple_axes() {
        let f = extract("food scraps in a paper bag", None);
        assert_eq!(f.organic(), 0.8);
        assert_eq!(f.paper(), 0.8);
        assert_eq!(f.plastic(), 0.8);
    }

    #[test]
    fn test_organic_hint_forces_slot() {
        let f = extract("misc leftovers", Some(WasteCategory::Organic));
        assert_eq!(f.organic(), 0.8);
        assert_eq!(f.plastic(), 0.0);
    }

    #[test]
    fn test_e_waste_hint_forces_slot() {
        let f = extract("", Some(WasteCategory::EWaste));
        assert_eq!(f.0, [0.0, 0.0, 0.0, 0.0, 0.9, 0.0]);
    }

    #[test]
    fn test_hint_raises_but_never_lowers() {
        let f = extract("", Some(WasteCategory::Metal));
        assert_eq!(f.metal(), CATEGORY_HINT_CONFIDENCE);

        let f = extract("steel pipes", Some(WasteCategory::Metal));
        assert_eq!(f.metal(), 0.8);

        let f = extract("", Some(WasteCategory::Plastic));
        assert_eq!(f.plastic(), CATEGORY_HINT_CONFIDENCE);

        let f = extract("", Some(WasteCategory::Paper));
        assert_eq!(f.paper(), CATEGORY_HINT_CONFIDENCE);
    }

    #[test]
    fn test_never_all_zero() {
        for text in ["", "xyz", "12345", "   "] {
            let f = extract(text, None);
            assert!(f.as_slice().iter().any(|v| *v > 0.0), "all zero for {:?}", text);
        }
    }
}
