//! Serializable snapshot of a resolved table.

use serde::Serialize;

use crate::attributes::InternalAttributes;
use crate::column::IntrospectedColumn;
use crate::config::{ModelType, TargetRuntime};
use crate::introspected_table::IntrospectedTable;
use crate::rules::RuleDecisions;

/// One column as it appears in a [`DecisionRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSummary {
    pub name: String,
    pub jdbc_type: String,
    pub java_property: String,
    pub nullable: bool,
    pub large_object: bool,
}

impl From<&IntrospectedColumn> for ColumnSummary {
    fn from(column: &IntrospectedColumn) -> Self {
        Self {
            name: column.actual_column_name().to_string(),
            jdbc_type: column.jdbc_type().to_string(),
            java_property: column.java_property(),
            nullable: column.is_nullable(),
            large_object: column.is_large_object(),
        }
    }
}

/// Everything emitters read from a resolved table: column groups, derived
/// identifiers and every rule decision.
///
/// Built from identical inputs, two records serialize byte-identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionRecord {
    pub table: String,
    pub domain_object_name: String,
    pub target_runtime: TargetRuntime,
    pub model_type: ModelType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    pub primary_key_columns: Vec<ColumnSummary>,
    pub base_columns: Vec<ColumnSummary>,
    pub blob_columns: Vec<ColumnSummary>,
    pub immutable: bool,
    pub constructor_based: bool,
    pub sql_map_namespace: Option<String>,
    pub all_fields_type: Option<String>,
    pub attributes: InternalAttributes,
    pub rules: RuleDecisions,
}

impl DecisionRecord {
    pub(crate) fn new(table: &IntrospectedTable) -> Self {
        let summarize = |columns: &[IntrospectedColumn]| -> Vec<ColumnSummary> {
            columns.iter().map(ColumnSummary::from).collect()
        };
        let rules = table.rules();

        Self {
            table: table.fully_qualified_table().to_string(),
            domain_object_name: table.fully_qualified_table().domain_object_name().to_string(),
            target_runtime: table.target_runtime(),
            model_type: rules.model_type(),
            remarks: table.remarks().map(str::to_string),
            primary_key_columns: summarize(table.primary_key_columns()),
            base_columns: summarize(table.base_columns()),
            blob_columns: summarize(table.blob_columns()),
            immutable: table.is_immutable(),
            constructor_based: table.is_constructor_based(),
            sql_map_namespace: table.sql_map_namespace().map(str::to_string),
            all_fields_type: table.all_fields_type().map(str::to_string),
            attributes: table.attributes().clone(),
            rules: rules.decisions(),
        }
    }
}
