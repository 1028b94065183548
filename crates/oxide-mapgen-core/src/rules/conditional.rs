use crate::config::ModelType;

use super::{Rules, TableShape};

/// The default variant: a separate class only where the column groups
/// warrant one.
///
/// A key class is generated for composite keys only. BLOB columns get their
/// own class when there are at least two of them and at least two other
/// columns; otherwise they fold into the base record.
#[derive(Debug, Clone)]
pub struct ConditionalModelRules {
    shape: TableShape,
}

impl ConditionalModelRules {
    #[must_use]
    pub const fn new(shape: TableShape) -> Self {
        Self { shape }
    }
}

impl Rules for ConditionalModelRules {
    fn model_type(&self) -> ModelType {
        ModelType::Conditional
    }

    fn shape(&self) -> &TableShape {
        &self.shape
    }

    fn generate_primary_key_class(&self) -> bool {
        self.shape.primary_key_columns > 1
    }

    fn generate_base_record_class(&self) -> bool {
        self.shape.has_base_columns()
            || self.shape.primary_key_columns == 1
            || (self.shape.has_blob_columns() && !self.generate_record_with_blobs_class())
    }

    fn generate_record_with_blobs_class(&self) -> bool {
        let other_columns = self.shape.primary_key_columns + self.shape.base_columns;
        other_columns > 1 && self.shape.blob_columns > 1
    }
}
