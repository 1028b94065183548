//! Generation rule strategies.
//!
//! A [`Rules`] implementation answers every "should artifact X be generated"
//! question for one table. The provided methods carry the shared behaviour;
//! each variant implements the class-level decisions and overrides whatever
//! else it changes. Decisions are pure functions of the [`TableShape`]
//! captured when the table was initialized.

mod conditional;
mod flat;
mod hierarchical;
mod multi_crud;

pub use conditional::ConditionalModelRules;
pub use flat::FlatModelRules;
pub use hierarchical::HierarchicalModelRules;
pub use multi_crud::MultiCrudModelRules;

use std::fmt;

use serde::Serialize;

use crate::config::{ModelType, StatementToggles, TableConfiguration};

/// The facts every rule decision is computed from: column group sizes and
/// the table's configuration switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableShape {
    pub primary_key_columns: usize,
    pub base_columns: usize,
    pub blob_columns: usize,
    pub model_only: bool,
    pub statements: StatementToggles,
}

impl TableShape {
    /// Captures the shape of a table from its group sizes and configuration.
    #[must_use]
    pub fn new(
        primary_key_columns: usize,
        base_columns: usize,
        blob_columns: usize,
        config: &TableConfiguration,
    ) -> Self {
        Self {
            primary_key_columns,
            base_columns,
            blob_columns,
            model_only: config.is_model_only(),
            statements: config.statements,
        }
    }

    #[must_use]
    pub const fn has_primary_key_columns(&self) -> bool {
        self.primary_key_columns > 0
    }

    #[must_use]
    pub const fn has_base_columns(&self) -> bool {
        self.base_columns > 0
    }

    #[must_use]
    pub const fn has_blob_columns(&self) -> bool {
        self.blob_columns > 0
    }

    #[must_use]
    pub const fn has_any_columns(&self) -> bool {
        self.primary_key_columns + self.base_columns + self.blob_columns > 0
    }
}

/// Generation decisions for one table.
pub trait Rules: fmt::Debug + Send + Sync {
    /// The variant this strategy implements.
    fn model_type(&self) -> ModelType;

    /// The table facts the decisions are computed from.
    fn shape(&self) -> &TableShape;

    /// Whether primary-key columns get their own class.
    fn generate_primary_key_class(&self) -> bool;

    /// Whether the base record class is generated.
    fn generate_base_record_class(&self) -> bool;

    /// Whether BLOB columns get a separate record class.
    fn generate_record_with_blobs_class(&self) -> bool;

    /// Whether the condition ("where") class is generated.
    fn generate_where_class(&self) -> bool {
        let s = self.shape();
        !s.model_only
            && (s.statements.select_by_where
                || s.statements.delete_by_where
                || s.statements.count_by_where
                || s.statements.update_by_where)
    }

    /// Whether the custom-column selector class is generated.
    fn generate_custom_column_class(&self) -> bool {
        self.generate_select_by_where_with_custom_column()
    }

    /// Whether a client interface (mapper or DAO) is generated at all.
    fn generate_java_client(&self) -> bool {
        !self.shape().model_only
    }

    fn generate_count_by_where(&self) -> bool {
        let s = self.shape();
        !s.model_only && s.statements.count_by_where
    }

    fn generate_select_by_where(&self) -> bool {
        let s = self.shape();
        !s.model_only && s.statements.select_by_where
    }

    /// Only meaningful when BLOB columns exist to leave out.
    fn generate_select_by_where_without_blobs(&self) -> bool {
        let s = self.shape();
        !s.model_only && s.statements.select_by_where && s.has_blob_columns()
    }

    fn generate_select_by_where_with_custom_column(&self) -> bool {
        let s = self.shape();
        !s.model_only && s.statements.select_by_where
    }

    /// Requires a key, and something besides the key to select.
    fn generate_select_by_primary_key(&self) -> bool {
        let s = self.shape();
        !s.model_only
            && s.statements.select_by_primary_key
            && s.has_primary_key_columns()
            && (s.has_base_columns() || s.has_blob_columns())
    }

    fn generate_delete_by_where(&self) -> bool {
        let s = self.shape();
        !s.model_only && s.statements.delete_by_where
    }

    fn generate_delete_by_primary_key(&self) -> bool {
        let s = self.shape();
        !s.model_only && s.statements.delete_by_primary_key && s.has_primary_key_columns()
    }

    fn generate_insert(&self) -> bool {
        let s = self.shape();
        !s.model_only && s.statements.insert
    }

    fn generate_insert_selective(&self) -> bool {
        self.generate_insert()
    }

    /// Bulk insert.
    fn generate_inserts(&self) -> bool {
        false
    }

    fn generate_update_by_where(&self) -> bool {
        let s = self.shape();
        !s.model_only
            && s.statements.update_by_where
            && (s.has_primary_key_columns() || s.has_base_columns())
    }

    fn generate_update_by_where_selective(&self) -> bool {
        let s = self.shape();
        !s.model_only && s.statements.update_by_where
    }

    fn generate_update_by_where_with_blobs(&self) -> bool {
        let s = self.shape();
        !s.model_only && s.statements.update_by_where && s.has_blob_columns()
    }

    fn generate_update_by_primary_key_without_blobs(&self) -> bool {
        let s = self.shape();
        !s.model_only
            && s.statements.update_by_primary_key
            && s.has_primary_key_columns()
            && s.has_base_columns()
    }

    fn generate_update_by_primary_key_selective(&self) -> bool {
        let s = self.shape();
        !s.model_only
            && s.statements.update_by_primary_key
            && s.has_primary_key_columns()
            && (s.has_base_columns() || s.has_blob_columns())
    }

    fn generate_update_by_primary_key_with_blobs(&self) -> bool {
        let s = self.shape();
        !s.model_only
            && s.statements.update_by_primary_key
            && s.has_primary_key_columns()
            && s.has_blob_columns()
    }

    fn generate_base_column_list(&self) -> bool {
        !self.shape().model_only
            && (self.generate_select_by_primary_key()
                || self.generate_select_by_where()
                || self.generate_select_by_where_without_blobs())
    }

    fn generate_blob_column_list(&self) -> bool {
        let s = self.shape();
        !s.model_only
            && s.has_blob_columns()
            && (s.statements.select_by_where || s.statements.select_by_primary_key)
    }

    fn generate_custom_column_list(&self) -> bool {
        self.generate_select_by_where_with_custom_column()
    }

    /// Model-only tables keep their result maps.
    fn generate_base_result_map(&self) -> bool {
        let s = self.shape();
        s.model_only || s.statements.select_by_where || s.statements.select_by_primary_key
    }

    fn generate_result_map_with_blobs(&self) -> bool {
        let s = self.shape();
        s.has_blob_columns()
            && (s.model_only || s.statements.select_by_where || s.statements.select_by_primary_key)
    }

    /// The condition fragment shared by select, delete and count.
    fn generate_where_clause(&self) -> bool {
        let s = self.shape();
        !s.model_only
            && (s.statements.select_by_where
                || s.statements.delete_by_where
                || s.statements.count_by_where)
    }

    fn generate_update_by_where_clause(&self) -> bool {
        let s = self.shape();
        !s.model_only && s.has_any_columns() && s.statements.update_by_where
    }

    /// Evaluates every decision.
    fn decisions(&self) -> RuleDecisions {
        RuleDecisions {
            primary_key_class: self.generate_primary_key_class(),
            base_record_class: self.generate_base_record_class(),
            record_with_blobs_class: self.generate_record_with_blobs_class(),
            where_class: self.generate_where_class(),
            custom_column_class: self.generate_custom_column_class(),
            java_client: self.generate_java_client(),
            count_by_where: self.generate_count_by_where(),
            select_by_where: self.generate_select_by_where(),
            select_by_where_without_blobs: self.generate_select_by_where_without_blobs(),
            select_by_where_with_custom_column: self.generate_select_by_where_with_custom_column(),
            select_by_primary_key: self.generate_select_by_primary_key(),
            delete_by_where: self.generate_delete_by_where(),
            delete_by_primary_key: self.generate_delete_by_primary_key(),
            insert: self.generate_insert(),
            insert_selective: self.generate_insert_selective(),
            inserts: self.generate_inserts(),
            update_by_where: self.generate_update_by_where(),
            update_by_where_selective: self.generate_update_by_where_selective(),
            update_by_where_with_blobs: self.generate_update_by_where_with_blobs(),
            update_by_primary_key_without_blobs: self
                .generate_update_by_primary_key_without_blobs(),
            update_by_primary_key_selective: self.generate_update_by_primary_key_selective(),
            update_by_primary_key_with_blobs: self.generate_update_by_primary_key_with_blobs(),
            base_column_list: self.generate_base_column_list(),
            blob_column_list: self.generate_blob_column_list(),
            custom_column_list: self.generate_custom_column_list(),
            base_result_map: self.generate_base_result_map(),
            result_map_with_blobs: self.generate_result_map_with_blobs(),
            where_clause: self.generate_where_clause(),
            update_by_where_clause: self.generate_update_by_where_clause(),
        }
    }
}

/// Every rule decision for a table, evaluated once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)]
pub struct RuleDecisions {
    pub primary_key_class: bool,
    pub base_record_class: bool,
    pub record_with_blobs_class: bool,
    pub where_class: bool,
    pub custom_column_class: bool,
    pub java_client: bool,
    pub count_by_where: bool,
    pub select_by_where: bool,
    pub select_by_where_without_blobs: bool,
    pub select_by_where_with_custom_column: bool,
    pub select_by_primary_key: bool,
    pub delete_by_where: bool,
    pub delete_by_primary_key: bool,
    pub insert: bool,
    pub insert_selective: bool,
    pub inserts: bool,
    pub update_by_where: bool,
    pub update_by_where_selective: bool,
    pub update_by_where_with_blobs: bool,
    pub update_by_primary_key_without_blobs: bool,
    pub update_by_primary_key_selective: bool,
    pub update_by_primary_key_with_blobs: bool,
    pub base_column_list: bool,
    pub blob_column_list: bool,
    pub custom_column_list: bool,
    pub base_result_map: bool,
    pub result_map_with_blobs: bool,
    pub where_clause: bool,
    pub update_by_where_clause: bool,
}

impl ModelType {
    /// Creates the rule strategy for this model type.
    #[must_use]
    pub fn rules_for(self, shape: TableShape) -> Box<dyn Rules> {
        match self {
            Self::Conditional => Box::new(ConditionalModelRules::new(shape)),
            Self::Flat => Box::new(FlatModelRules::new(shape)),
            Self::Hierarchical => Box::new(HierarchicalModelRules::new(shape)),
            Self::MultiCrud => Box::new(MultiCrudModelRules::new(shape)),
        }
    }
}
