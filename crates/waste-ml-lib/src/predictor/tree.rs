//! Tree-ensemble regressor stored as JSON node arrays
//!
//! Each tree uses the flat node layout of a fitted scikit-learn
//! `tree_`: parallel `children_left`, `children_right`, `feature`,
//! `threshold` and `value` arrays, where a node with `children_left == -1`
//! is a leaf. A row goes left when `x[feature] <= threshold`. The ensemble
//! prediction is the mean of the tree predictions, as for a random forest.

use super::Regressor;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const LEAF: i64 = -1;

/// One decision tree in flat node-array form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<f64>,
}

impl DecisionTree {
    fn node_count(&self) -> usize {
        self.children_left.len()
    }

    fn validate(&self, num_features: usize) -> Result<()> {
        let n = self.node_count();
        if n == 0 {
            anyhow::bail!("Tree has no nodes");
        }
        if [
            self.children_right.len(),
            self.feature.len(),
            self.threshold.len(),
            self.value.len(),
        ]
        .iter()
        .any(|&len| len != n)
        {
            anyhow::bail!("Tree node arrays differ in length");
        }

        for node in 0..n {
            let left = self.children_left[node];
            let right = self.children_right[node];
            if left == LEAF {
                if right != LEAF {
                    anyhow::bail!("Node {} has only a right child", node);
                }
                continue;
            }
            // Children always follow their parent, so traversal terminates
            for child in [left, right] {
                if child <= node as i64 || child >= n as i64 {
                    anyhow::bail!("Node {} has out-of-range child {}", node, child);
                }
            }
            let feature = self.feature[node];
            if feature < 0 || feature >= num_features as i64 {
                anyhow::bail!(
                    "Node {} splits on feature {}, model takes {}",
                    node,
                    feature,
                    num_features
                );
            }
        }
        Ok(())
    }

    fn predict(&self, features: &[f32]) -> Result<f64> {
        let mut node = 0usize;
        loop {
            let left = *self.children_left.get(node).context("Tree node out of range")?;
            if left == LEAF {
                return Ok(self.value[node]);
            }
            let x = features
                .get(self.feature[node] as usize)
                .copied()
                .context("Split feature out of range")?;
            node = if f64::from(x) <= self.threshold[node] {
                left as usize
            } else {
                self.children_right[node] as usize
            };
        }
    }
}

/// Mean of several decision trees
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeEnsembleRegressor {
    pub trees: Vec<DecisionTree>,
}

impl TreeEnsembleRegressor {
    pub fn validate(&self, num_features: usize) -> Result<()> {
        if self.trees.is_empty() {
            anyhow::bail!("Tree ensemble has no trees");
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(num_features)
                .with_context(|| format!("Invalid tree {}", i))?;
        }
        Ok(())
    }
}

impl Regressor for TreeEnsembleRegressor {
    fn predict(&self, features: &[f32]) -> Result<f32> {
        let mut sum = 0.0;
        for tree in &self.trees {
            sum += tree.predict(features)?;
        }
        Ok((sum / self.trees.len() as f64) as f32)
    }

    fn kind(&self) -> &'static str {
        "tree_ensemble"
    }
}
