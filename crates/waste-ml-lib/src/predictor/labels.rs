//! Decoder from encoded class indices to raw model labels

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Ordered class labels; index `i` is the label of encoded class `i`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelDecoder {
    classes: Vec<String>,
}

impl LabelDecoder {
    pub fn new(classes: Vec<String>) -> Self {
        Self { classes }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Raw label for an encoded class
    pub fn decode(&self, class_idx: usize) -> Result<&str> {
        self.classes
            .get(class_idx)
            .map(String::as_str)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Class index {} is outside the {} known labels",
                    class_idx,
                    self.classes.len()
                )
            })
    }
}
