//! One-hot feature encoder.
//!
//! Column layout (must match the training pipeline exactly):
//!
//! ```text
//! [numeric attributes, declaration order]
//! [workclass block][education block] ... [native-country block]
//! ```
//!
//! Each block has one indicator column per registry value, in registry order.
//! A value missing from the registry encodes as an all-zero block.

use tracing::debug;

use crate::domain::{AttributeRecord, CategoricalAttribute, FeatureVector, NumericAttribute};
use crate::encoding::registry::CategoryRegistry;

#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    registry: CategoryRegistry,
}

impl FeatureEncoder {
    pub fn new(registry: CategoryRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &CategoryRegistry {
        &self.registry
    }

    /// Total number of encoded columns.
    pub fn width(&self) -> usize {
        NumericAttribute::ALL.len() + self.registry.total_indicator_columns()
    }

    /// Column names in encoded order (`age`, ..., `workclass_Private`, ...).
    pub fn column_names(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(self.width());
        for attr in NumericAttribute::ALL {
            names.push(attr.column_name().to_string());
        }
        for attr in CategoricalAttribute::ALL {
            for value in self.registry.values(attr) {
                names.push(format!("{}_{}", attr.column_name(), value));
            }
        }
        names
    }

    pub fn encode(&self, record: &AttributeRecord) -> FeatureVector {
        let mut values = Vec::with_capacity(self.width());

        for attr in NumericAttribute::ALL {
            values.push(record.numeric(attr));
        }

        for attr in CategoricalAttribute::ALL {
            let start = values.len();
            values.resize(start + self.registry.block_width(attr), 0.0);

            let raw = record.categorical(attr);
            match self.registry.position(attr, raw) {
                Some(idx) => values[start + idx] = 1.0,
                None => debug!(attribute = attr.column_name(), value = raw, "unknown category, zero-filled"),
            }
        }

        FeatureVector::new(values)
    }
}
