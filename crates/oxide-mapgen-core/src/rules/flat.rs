use crate::config::ModelType;

use super::{Rules, TableShape};

/// Every column lives in a single record class.
#[derive(Debug, Clone)]
pub struct FlatModelRules {
    shape: TableShape,
}

impl FlatModelRules {
    #[must_use]
    pub const fn new(shape: TableShape) -> Self {
        Self { shape }
    }
}

impl Rules for FlatModelRules {
    fn model_type(&self) -> ModelType {
        ModelType::Flat
    }

    fn shape(&self) -> &TableShape {
        &self.shape
    }

    fn generate_primary_key_class(&self) -> bool {
        false
    }

    fn generate_base_record_class(&self) -> bool {
        true
    }

    fn generate_record_with_blobs_class(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TableConfiguration;

    #[test]
    fn never_splits_classes() {
        let r = FlatModelRules::new(TableShape::new(3, 2, 2, &TableConfiguration::new("T")));
        assert!(!r.generate_primary_key_class());
        assert!(r.generate_base_record_class());
        assert!(!r.generate_record_with_blobs_class());
        // statements still follow the column groups
        assert!(r.generate_update_by_primary_key_with_blobs());
        assert!(r.generate_blob_column_list());
    }
}
