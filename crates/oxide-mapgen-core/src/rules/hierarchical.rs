use crate::config::ModelType;

use super::{Rules, TableShape};

/// Key, record and BLOB classes, each generated whenever its column group is
/// non-empty. The record class extends the key class and the BLOB class
/// extends the record.
#[derive(Debug, Clone)]
pub struct HierarchicalModelRules {
    shape: TableShape,
}

impl HierarchicalModelRules {
    #[must_use]
    pub const fn new(shape: TableShape) -> Self {
        Self { shape }
    }
}

impl Rules for HierarchicalModelRules {
    fn model_type(&self) -> ModelType {
        ModelType::Hierarchical
    }

    fn shape(&self) -> &TableShape {
        &self.shape
    }

    fn generate_primary_key_class(&self) -> bool {
        self.shape.has_primary_key_columns()
    }

    fn generate_base_record_class(&self) -> bool {
        self.shape.has_base_columns()
    }

    fn generate_record_with_blobs_class(&self) -> bool {
        self.shape.has_blob_columns()
    }
}
