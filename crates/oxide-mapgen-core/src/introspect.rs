//! Table metadata introspection.
//!
//! Reading a live database is left to implementors of [`Introspect`]. The
//! crate ships [`CapturedMetadata`], which serves metadata recorded in the
//! generator configuration file.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::column::{IntrospectedColumn, JdbcType};
use crate::config::TableConfiguration;
use crate::error::GenError;

/// Produces the raw column list for a configured table.
pub trait Introspect {
    /// Error type for introspection failures.
    type Error: std::error::Error;

    /// Reads the columns, key and remarks of one table.
    fn introspect_table(&self, table: &TableConfiguration) -> Result<TableMetadata, Self::Error>;
}

const fn default_nullable() -> bool {
    true
}

/// One column as reported by introspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMetadata {
    pub name: String,
    pub jdbc_type: JdbcType,
    #[serde(default)]
    pub delimited: bool,
    #[serde(default = "default_nullable")]
    pub nullable: bool,
    /// Overrides the large-object flag implied by `jdbc_type`.
    #[serde(default)]
    pub large_object: Option<bool>,
    #[serde(default)]
    pub length: Option<u32>,
    #[serde(default)]
    pub scale: Option<u32>,
    #[serde(default)]
    pub identity: bool,
    #[serde(default)]
    pub auto_increment: bool,
    #[serde(default)]
    pub generated_always: bool,
    #[serde(default)]
    pub default_value: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
}

impl From<&ColumnMetadata> for IntrospectedColumn {
    fn from(meta: &ColumnMetadata) -> Self {
        let mut column = Self::new(meta.name.clone(), meta.jdbc_type);
        if meta.delimited {
            column = column.delimited();
        }
        if !meta.nullable {
            column = column.not_null();
        }
        if let Some(large_object) = meta.large_object {
            column = column.large_object(large_object);
        }
        if let Some(length) = meta.length {
            column = column.length(length);
        }
        if let Some(scale) = meta.scale {
            column = column.scale(scale);
        }
        if meta.identity {
            column = column.identity();
        }
        if meta.auto_increment {
            column = column.auto_increment();
        }
        if meta.generated_always {
            column = column.generated_always();
        }
        if let Some(value) = &meta.default_value {
            column = column.default_value(value.clone());
        }
        if let Some(remarks) = &meta.remarks {
            column = column.remarks(remarks.clone());
        }
        column
    }
}

/// Introspection result for one table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableMetadata {
    /// Columns in schema order.
    pub columns: Vec<ColumnMetadata>,
    /// Primary-key column names in key order.
    pub primary_key: Vec<String>,
    pub remarks: Option<String>,
    pub table_type: Option<String>,
}

/// Metadata captured ahead of time, keyed by table name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapturedMetadata {
    tables: BTreeMap<String, TableMetadata>,
}

impl CapturedMetadata {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the metadata for a table.
    #[must_use]
    pub fn table(mut self, name: impl Into<String>, metadata: TableMetadata) -> Self {
        self.tables.insert(name.into(), metadata);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl Introspect for CapturedMetadata {
    type Error = GenError;

    /// Looks the table up by exact name, then ignoring ASCII case.
    fn introspect_table(&self, table: &TableConfiguration) -> Result<TableMetadata, GenError> {
        let name = &table.table_name;
        self.tables
            .get(name)
            .or_else(|| {
                self.tables
                    .iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case(name))
                    .map(|(_, metadata)| metadata)
            })
            .cloned()
            .ok_or_else(|| GenError::MissingTableMetadata(name.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_metadata_defaults() {
        let meta: ColumnMetadata =
            serde_json::from_str(r#"{ "name": "BODY", "jdbcType": "longvarchar" }"#).unwrap();
        assert!(meta.nullable);
        let column = IntrospectedColumn::from(&meta);
        assert!(column.is_large_object());
        assert!(column.is_nullable());
        assert_eq!(column.jdbc_type(), JdbcType::LongVarchar);
    }

    #[test]
    fn large_object_override() {
        let meta: ColumnMetadata = serde_json::from_str(
            r#"{ "name": "NOTE", "jdbcType": "VARCHAR", "largeObject": true, "nullable": false }"#,
        )
        .unwrap();
        let column = IntrospectedColumn::from(&meta);
        assert!(column.is_large_object());
        assert!(!column.is_nullable());
    }

    #[test]
    fn captured_lookup_ignores_case() {
        let captured = CapturedMetadata::new().table(
            "user",
            TableMetadata {
                primary_key: vec!["ID".to_string()],
                ..TableMetadata::default()
            },
        );
        let found = captured
            .introspect_table(&TableConfiguration::new("USER"))
            .unwrap();
        assert_eq!(found.primary_key, ["ID"]);

        let err = captured
            .introspect_table(&TableConfiguration::new("ORDERS"))
            .unwrap_err();
        assert!(matches!(err, GenError::MissingTableMetadata(t) if t == "ORDERS"));
    }
}
