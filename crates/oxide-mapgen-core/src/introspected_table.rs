//! The table descriptor handed to every emitter.
//!
//! An [`IntrospectedTable`] is built in two phases. First the pipeline adds
//! columns and promotes key columns; then [`IntrospectedTable::initialize`]
//! derives every identifier and selects the rule strategy. After that the
//! column groups are frozen and the descriptor is read-only, apart from the
//! plugin attribute bag.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::attributes::InternalAttributes;
use crate::column::IntrospectedColumn;
use crate::config::{property, Context, ModelType, TableConfiguration, TargetRuntime};
use crate::error::Result;
use crate::naming::is_true;
use crate::record::DecisionRecord;
use crate::rules::{Rules, TableShape};
use crate::table::FullyQualifiedTable;

/// Opaque values stored by plugins.
pub type PluginAttribute = Box<dyn Any + Send + Sync>;

macro_rules! attribute_getters {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            ///
            /// # Panics
            ///
            /// Panics if the table has not been initialized.
            #[must_use]
            pub fn $name(&self) -> Option<&str> {
                self.attributes().$name.as_deref()
            }
        )*
    };
}

/// A table's columns, derived identifiers and generation rules.
#[derive(Debug)]
pub struct IntrospectedTable {
    target_runtime: TargetRuntime,
    context: Arc<Context>,
    configuration: TableConfiguration,
    table: Arc<FullyQualifiedTable>,
    primary_key_columns: Vec<IntrospectedColumn>,
    base_columns: Vec<IntrospectedColumn>,
    blob_columns: Vec<IntrospectedColumn>,
    attributes: Option<InternalAttributes>,
    rules: Option<Box<dyn Rules>>,
    plugin_attributes: HashMap<String, PluginAttribute>,
    remarks: Option<String>,
    table_type: Option<String>,
}

impl IntrospectedTable {
    /// Creates an empty descriptor for one configured table.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::InvalidRenamingRule`](crate::GenError::InvalidRenamingRule)
    /// when the table's domain object renaming rule does not compile.
    pub fn new(
        target_runtime: TargetRuntime,
        context: Arc<Context>,
        configuration: TableConfiguration,
    ) -> Result<Self> {
        let table = Arc::new(FullyQualifiedTable::new(&configuration, &context)?);
        Ok(Self {
            target_runtime,
            context,
            configuration,
            table,
            primary_key_columns: Vec::new(),
            base_columns: Vec::new(),
            blob_columns: Vec::new(),
            attributes: None,
            rules: None,
            plugin_attributes: HashMap::new(),
            remarks: None,
            table_type: None,
        })
    }

    #[must_use]
    pub const fn target_runtime(&self) -> TargetRuntime {
        self.target_runtime
    }

    #[must_use]
    pub fn context(&self) -> &Context {
        &self.context
    }

    #[must_use]
    pub const fn configuration(&self) -> &TableConfiguration {
        &self.configuration
    }

    #[must_use]
    pub fn fully_qualified_table(&self) -> &FullyQualifiedTable {
        &self.table
    }

    #[must_use]
    pub fn remarks(&self) -> Option<&str> {
        self.remarks.as_deref()
    }

    pub fn set_remarks(&mut self, remarks: impl Into<String>) {
        self.remarks = Some(remarks.into());
    }

    /// Table type reported by introspection, e.g. `TABLE` or `VIEW`.
    #[must_use]
    pub fn table_type(&self) -> Option<&str> {
        self.table_type.as_deref()
    }

    pub fn set_table_type(&mut self, table_type: impl Into<String>) {
        self.table_type = Some(table_type.into());
    }

    /// Returns true once [`initialize`](Self::initialize) has run.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.rules.is_some()
    }

    fn assert_columns_mutable(&self) {
        assert!(
            !self.is_initialized(),
            "columns of table {} changed after initialize",
            self.table
        );
    }

    /// Adds a column to the BLOB group if it is a large object, otherwise to
    /// the base group.
    ///
    /// # Panics
    ///
    /// Panics if the table has already been initialized.
    pub fn add_column(&mut self, mut column: IntrospectedColumn) {
        self.assert_columns_mutable();
        column.set_introspected_table(Arc::clone(&self.table));
        if column.is_large_object() {
            self.blob_columns.push(column);
        } else {
            self.base_columns.push(column);
        }
    }

    /// Moves the named column out of the base group, or failing that the BLOB
    /// group, into the primary-key group. Does nothing when no column
    /// matches.
    ///
    /// # Panics
    ///
    /// Panics if the table has already been initialized.
    pub fn promote_to_primary_key(&mut self, column_name: &str) {
        self.assert_columns_mutable();

        if let Some(idx) = self.base_columns.iter().position(|c| c.is_name_equal(column_name)) {
            let column = self.base_columns.remove(idx);
            self.primary_key_columns.push(column);
            return;
        }

        if let Some(idx) = self.blob_columns.iter().position(|c| c.is_name_equal(column_name)) {
            let column = self.blob_columns.remove(idx);
            warn!(
                table = %self.table,
                column = column.actual_column_name(),
                jdbc_type = %column.jdbc_type(),
                "Large object column promoted to primary key"
            );
            self.primary_key_columns.push(column);
            return;
        }

        debug!(
            table = %self.table,
            column = column_name,
            "No base or BLOB column to promote to primary key"
        );
    }

    /// Finds a column by name, searching the primary-key, base and BLOB
    /// groups in that order.
    #[must_use]
    pub fn lookup_column(&self, column_name: &str) -> Option<&IntrospectedColumn> {
        self.all_columns().find(|c| c.is_name_equal(column_name))
    }

    #[must_use]
    pub fn primary_key_columns(&self) -> &[IntrospectedColumn] {
        &self.primary_key_columns
    }

    #[must_use]
    pub fn base_columns(&self) -> &[IntrospectedColumn] {
        &self.base_columns
    }

    #[must_use]
    pub fn blob_columns(&self) -> &[IntrospectedColumn] {
        &self.blob_columns
    }

    /// Primary-key columns, then base columns, then BLOB columns.
    pub fn all_columns(&self) -> impl Iterator<Item = &IntrospectedColumn> + '_ {
        self.primary_key_columns
            .iter()
            .chain(&self.base_columns)
            .chain(&self.blob_columns)
    }

    /// Primary-key columns, then base columns.
    pub fn non_blob_columns(&self) -> impl Iterator<Item = &IntrospectedColumn> + '_ {
        self.primary_key_columns.iter().chain(&self.base_columns)
    }

    /// Base columns, then BLOB columns.
    pub fn non_primary_key_columns(&self) -> impl Iterator<Item = &IntrospectedColumn> + '_ {
        self.base_columns.iter().chain(&self.blob_columns)
    }

    #[must_use]
    pub fn non_blob_column_count(&self) -> usize {
        self.primary_key_columns.len() + self.base_columns.len()
    }

    #[must_use]
    pub fn has_primary_key_columns(&self) -> bool {
        !self.primary_key_columns.is_empty()
    }

    #[must_use]
    pub fn has_base_columns(&self) -> bool {
        !self.base_columns.is_empty()
    }

    #[must_use]
    pub fn has_blob_columns(&self) -> bool {
        !self.blob_columns.is_empty()
    }

    #[must_use]
    pub fn has_any_columns(&self) -> bool {
        self.has_primary_key_columns() || self.has_base_columns() || self.has_blob_columns()
    }

    #[must_use]
    pub fn has_jdbc_date_columns(&self) -> bool {
        self.all_columns().any(IntrospectedColumn::is_jdbc_date_column)
    }

    #[must_use]
    pub fn has_jdbc_time_columns(&self) -> bool {
        self.all_columns().any(IntrospectedColumn::is_jdbc_time_column)
    }

    /// Derives every identifier, selects the rule strategy and notifies the
    /// context's plugins.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::UnknownModelType`](crate::GenError::UnknownModelType)
    /// when the model type selector is not recognised; nothing is derived in
    /// that case.
    ///
    /// # Panics
    ///
    /// Panics if called twice.
    pub fn initialize(&mut self) -> Result<()> {
        assert!(
            !self.is_initialized(),
            "table {} initialized twice",
            self.table
        );

        let model_type = ModelType::resolve(
            self.configuration.model_type.as_deref(),
            self.context.default_model_type.as_deref(),
        )?;

        let mut attributes = InternalAttributes::default();
        attributes.derive_client(&self.table, &self.configuration, &self.context);
        attributes.derive_model(&self.table, &self.context);
        attributes.derive_xml(&self.table, &self.configuration, &self.context);
        attributes.apply_statement_ids();
        self.attributes = Some(attributes);

        let shape = TableShape::new(
            self.primary_key_columns.len(),
            self.base_columns.len(),
            self.blob_columns.len(),
            &self.configuration,
        );
        self.rules = Some(model_type.rules_for(shape));

        debug!(
            table = %self.table,
            model_type = %model_type,
            primary_key_columns = shape.primary_key_columns,
            base_columns = shape.base_columns,
            blob_columns = shape.blob_columns,
            "Initialized table"
        );

        let context = Arc::clone(&self.context);
        context.plugins().initialized(self);
        Ok(())
    }

    /// The derived identifiers.
    ///
    /// # Panics
    ///
    /// Panics if the table has not been initialized.
    #[must_use]
    pub fn attributes(&self) -> &InternalAttributes {
        match &self.attributes {
            Some(attributes) => attributes,
            None => panic!("attributes of table {} read before initialize", self.table),
        }
    }

    /// Mutable access for plugins that rewrite derived names.
    ///
    /// # Panics
    ///
    /// Panics if the table has not been initialized.
    pub fn attributes_mut(&mut self) -> &mut InternalAttributes {
        match &mut self.attributes {
            Some(attributes) => attributes,
            None => panic!("attributes of table {} changed before initialize", self.table),
        }
    }

    /// The selected rule strategy.
    ///
    /// # Panics
    ///
    /// Panics if the table has not been initialized.
    #[must_use]
    pub fn rules(&self) -> &dyn Rules {
        match &self.rules {
            Some(rules) => rules.as_ref(),
            None => panic!("rules of table {} read before initialize", self.table),
        }
    }

    /// Swaps the rule strategy. This is the only way to change it after
    /// initialization.
    ///
    /// # Panics
    ///
    /// Panics if the table has not been initialized.
    pub fn replace_rules(&mut self, rules: Box<dyn Rules>) {
        assert!(
            self.is_initialized(),
            "rules of table {} replaced before initialize",
            self.table
        );
        debug!(table = %self.table, model_type = %rules.model_type(), "Rules replaced");
        self.rules = Some(rules);
    }

    attribute_getters! {
        dao_implementation_type,
        dao_interface_type,
        /// Mapper interface type; unset without a Java client block.
        java_mapper_type,
        sql_provider_type,
        primary_key_type,
        base_record_type,
        record_with_blobs_type,
        /// Condition class type.
        where_type,
        column_custom_type,
        ibatis2_sql_map_package,
        ibatis2_sql_map_file_name,
        ibatis2_sql_map_namespace,
        /// Package of the mapper XML; unset without an SQL-map block.
        xml_mapper_package,
        xml_mapper_file_name,
        fallback_sql_map_namespace,
        fully_qualified_table_name_at_runtime,
        aliased_fully_qualified_table_name_at_runtime,
        count_by_where_statement_id,
        select_by_where_statement_id,
        select_by_where_without_blobs_statement_id,
        select_by_primary_key_statement_id,
        select_by_where_with_custom_column_statement_id,
        delete_by_where_statement_id,
        delete_by_primary_key_statement_id,
        insert_statement_id,
        insert_selective_statement_id,
        /// Bulk insert.
        inserts_statement_id,
        update_by_where_statement_id,
        update_by_where_selective_statement_id,
        update_by_where_with_blobs_statement_id,
        update_by_primary_key_statement_id,
        update_by_primary_key_selective_statement_id,
        update_by_primary_key_with_blobs_statement_id,
        base_result_map_id,
        result_map_with_blobs_id,
        where_clause_id,
        update_by_where_clause_id,
        base_column_list_id,
        blob_column_list_id,
        custom_column_list_id,
    }

    /// The namespace of the SQL-map file for the target runtime.
    ///
    /// For MyBatis3 this is the Java mapper type, or the fallback namespace
    /// when no client is generated.
    ///
    /// # Panics
    ///
    /// Panics if the table has not been initialized.
    #[must_use]
    pub fn sql_map_namespace(&self) -> Option<&str> {
        let attributes = self.attributes();
        match self.target_runtime {
            TargetRuntime::Ibatis2 => attributes.ibatis2_sql_map_namespace.as_deref(),
            TargetRuntime::MyBatis3 => attributes
                .java_mapper_type
                .as_deref()
                .or(attributes.fallback_sql_map_namespace.as_deref()),
        }
    }

    /// The most specific generated record type: with-BLOBs, else base, else
    /// key.
    ///
    /// # Panics
    ///
    /// Panics if the table has not been initialized.
    #[must_use]
    pub fn all_fields_type(&self) -> Option<&str> {
        let rules = self.rules();
        if rules.generate_record_with_blobs_class() {
            self.record_with_blobs_type()
        } else if rules.generate_base_record_class() {
            self.base_record_type()
        } else {
            self.primary_key_type()
        }
    }

    fn table_or_model_property(&self, key: &str) -> Option<&str> {
        self.configuration.get_property(key).or_else(|| {
            self.context
                .java_model
                .properties
                .get(key)
                .map(String::as_str)
        })
    }

    /// Whether records are immutable. The table property wins over the model
    /// generator property.
    #[must_use]
    pub fn is_immutable(&self) -> bool {
        is_true(self.table_or_model_property(property::IMMUTABLE))
    }

    /// Whether records are populated through constructors. Immutable records
    /// always are.
    #[must_use]
    pub fn is_constructor_based(&self) -> bool {
        self.is_immutable() || is_true(self.table_or_model_property(property::CONSTRUCTOR_BASED))
    }

    /// Returns the plugin value stored under `key` if it has type `T`.
    #[must_use]
    pub fn get_attribute<T: Any>(&self, key: &str) -> Option<&T> {
        self.plugin_attributes.get(key)?.downcast_ref()
    }

    /// Stores a plugin value, replacing any previous value for `key`.
    pub fn set_attribute<T: Any + Send + Sync>(&mut self, key: impl Into<String>, value: T) {
        self.plugin_attributes.insert(key.into(), Box::new(value));
    }

    /// Removes and returns the plugin value stored under `key`.
    pub fn remove_attribute(&mut self, key: &str) -> Option<PluginAttribute> {
        self.plugin_attributes.remove(key)
    }

    /// Snapshot of the resolved table.
    ///
    /// # Panics
    ///
    /// Panics if the table has not been initialized.
    #[must_use]
    pub fn decision_record(&self) -> DecisionRecord {
        DecisionRecord::new(self)
    }
}
