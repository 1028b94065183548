use crate::config::ModelType;

use super::{Rules, TableShape};

/// Key class plus a single record holding base and BLOB columns, with bulk
/// insert and the condition-based statements always on.
///
/// Key-based updates are left to the selective form; the variant never
/// generates the with/without-BLOBs statement pairs. Model-only tables get
/// classes and the base result map but no statements.
#[derive(Debug, Clone)]
pub struct MultiCrudModelRules {
    shape: TableShape,
}

impl MultiCrudModelRules {
    #[must_use]
    pub const fn new(shape: TableShape) -> Self {
        Self { shape }
    }
}

impl Rules for MultiCrudModelRules {
    fn model_type(&self) -> ModelType {
        ModelType::MultiCrud
    }

    fn shape(&self) -> &TableShape {
        &self.shape
    }

    fn generate_primary_key_class(&self) -> bool {
        self.shape.has_primary_key_columns()
    }

    fn generate_base_record_class(&self) -> bool {
        true
    }

    fn generate_record_with_blobs_class(&self) -> bool {
        false
    }

    fn generate_where_class(&self) -> bool {
        !self.shape.model_only
    }

    fn generate_where_clause(&self) -> bool {
        !self.shape.model_only
    }

    fn generate_update_by_where_clause(&self) -> bool {
        !self.shape.model_only
    }

    fn generate_insert(&self) -> bool {
        !self.shape.model_only
    }

    fn generate_insert_selective(&self) -> bool {
        !self.shape.model_only
    }

    fn generate_inserts(&self) -> bool {
        !self.shape.model_only
    }

    fn generate_base_result_map(&self) -> bool {
        true
    }

    fn generate_result_map_with_blobs(&self) -> bool {
        false
    }

    fn generate_base_column_list(&self) -> bool {
        !self.shape.model_only
    }

    fn generate_blob_column_list(&self) -> bool {
        false
    }

    fn generate_count_by_where(&self) -> bool {
        !self.shape.model_only
    }

    fn generate_select_by_where(&self) -> bool {
        !self.shape.model_only
    }

    fn generate_select_by_where_without_blobs(&self) -> bool {
        false
    }

    fn generate_select_by_primary_key(&self) -> bool {
        !self.shape.model_only && self.shape.has_primary_key_columns()
    }

    fn generate_delete_by_where(&self) -> bool {
        !self.shape.model_only
    }

    fn generate_update_by_where_selective(&self) -> bool {
        !self.shape.model_only
    }

    fn generate_update_by_where_with_blobs(&self) -> bool {
        false
    }

    fn generate_update_by_primary_key_without_blobs(&self) -> bool {
        false
    }

    fn generate_update_by_primary_key_with_blobs(&self) -> bool {
        false
    }
}
