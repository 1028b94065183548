//! Per-table resolution pipeline.
//!
//! Every configured table goes through the same steps: build an empty
//! descriptor, add the introspected columns, promote the key columns, then
//! initialize. Each table gets its own descriptor; nothing is shared between
//! tables except the read-only context.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use crate::column::IntrospectedColumn;
use crate::config::{Context, TableConfiguration};
use crate::error::{GenError, Result};
use crate::introspect::{CapturedMetadata, Introspect};
use crate::introspected_table::IntrospectedTable;

/// The generator configuration file: one context, its tables, and captured
/// column metadata for them.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorConfig {
    pub context: Context,
    #[serde(default)]
    pub tables: Vec<TableConfiguration>,
    #[serde(default)]
    pub metadata: CapturedMetadata,
}

impl GeneratorConfig {
    /// Parses a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::Serialization`] for malformed JSON, unknown JDBC
    /// types or unknown target runtimes.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::Io`] if the file cannot be read, or any error of
    /// [`GeneratorConfig::from_json_str`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Keeps only the tables whose name matches `table_name`, ignoring
    /// ASCII case.
    #[must_use]
    pub fn retain_table(mut self, table_name: &str) -> Self {
        self.tables
            .retain(|t| t.table_name.eq_ignore_ascii_case(table_name));
        self
    }

    /// Resolves every configured table against the captured metadata.
    ///
    /// # Errors
    ///
    /// See [`resolve_tables`].
    pub fn resolve(self) -> Result<Vec<IntrospectedTable>> {
        resolve_tables(Arc::new(self.context), &self.tables, &self.metadata)
    }
}

/// Builds and initializes the descriptor for one table.
///
/// Configured key columns that match no introspected column are skipped.
///
/// # Errors
///
/// Fails when introspection fails, the renaming rule is invalid or the model
/// type is unknown.
pub fn resolve_table<I>(
    context: &Arc<Context>,
    configuration: &TableConfiguration,
    introspector: &I,
) -> Result<IntrospectedTable>
where
    I: Introspect,
    I::Error: Into<GenError>,
{
    let metadata = introspector
        .introspect_table(configuration)
        .map_err(Into::into)?;

    let mut table = IntrospectedTable::new(
        context.target_runtime,
        Arc::clone(context),
        configuration.clone(),
    )?;

    for column in &metadata.columns {
        table.add_column(IntrospectedColumn::from(column));
    }
    for key in &metadata.primary_key {
        table.promote_to_primary_key(key);
    }
    if let Some(remarks) = metadata.remarks {
        table.set_remarks(remarks);
    }
    if let Some(table_type) = metadata.table_type {
        table.set_table_type(table_type);
    }

    table.initialize()?;
    Ok(table)
}

/// Resolves tables in configuration order.
///
/// # Errors
///
/// Stops at the first table that fails; see [`resolve_table`].
pub fn resolve_tables<I>(
    context: Arc<Context>,
    tables: &[TableConfiguration],
    introspector: &I,
) -> Result<Vec<IntrospectedTable>>
where
    I: Introspect,
    I::Error: Into<GenError>,
{
    let mut resolved = Vec::with_capacity(tables.len());
    for configuration in tables {
        let table = resolve_table(&context, configuration, introspector)?;
        info!(
            table = %table.fully_qualified_table(),
            model_type = %table.rules().model_type(),
            columns = table.all_columns().count(),
            "Resolved table"
        );
        resolved.push(table);
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"{
        "context": {
            "javaModel": { "targetPackage": "com.acme.model" },
            "javaClient": { "targetPackage": "com.acme.dao" }
        },
        "tables": [
            { "tableName": "USER" },
            { "tableName": "AUDIT_LOG", "modelType": "flat" }
        ],
        "metadata": {
            "USER": {
                "columns": [
                    { "name": "ID", "jdbcType": "INTEGER", "nullable": false },
                    { "name": "NAME", "jdbcType": "VARCHAR" }
                ],
                "primaryKey": ["id", "missing"]
            },
            "AUDIT_LOG": {
                "columns": [{ "name": "ENTRY", "jdbcType": "CLOB" }],
                "tableType": "VIEW"
            }
        }
    }"#;

    #[test]
    fn resolves_tables_in_order() {
        let tables = GeneratorConfig::from_json_str(CONFIG).unwrap().resolve().unwrap();
        assert_eq!(tables.len(), 2);

        let user = &tables[0];
        assert_eq!(user.primary_key_columns().len(), 1);
        assert_eq!(user.base_columns().len(), 1);
        assert_eq!(user.java_mapper_type(), Some("com.acme.dao.UserMapper"));

        let audit = &tables[1];
        assert_eq!(audit.table_type(), Some("VIEW"));
        assert!(audit.rules().generate_base_record_class());
        assert!(!audit.rules().generate_record_with_blobs_class());
    }

    #[test]
    fn retain_table_filters() {
        let config = GeneratorConfig::from_json_str(CONFIG)
            .unwrap()
            .retain_table("audit_log");
        assert_eq!(config.tables.len(), 1);
    }

    #[test]
    fn missing_metadata_is_an_error() {
        let mut config = GeneratorConfig::from_json_str(CONFIG).unwrap();
        config.tables.push(TableConfiguration::new("ORDERS"));
        let err = config.resolve().unwrap_err();
        assert!(matches!(err, GenError::MissingTableMetadata(t) if t == "ORDERS"));
    }

    #[test]
    fn unknown_jdbc_type_fails_to_parse() {
        let json = CONFIG.replace("\"CLOB\"", "\"LOB\"");
        assert!(matches!(
            GeneratorConfig::from_json_str(&json),
            Err(GenError::Serialization(_))
        ));
    }
}
