#![allow(dead_code)]

use std::sync::Arc;

use oxide_mapgen_core::prelude::*;

pub fn full_context() -> Context {
    Context::new(JavaModelGeneratorConfiguration::new("com.acme.model"))
        .with_java_client(JavaClientGeneratorConfiguration::new("com.acme.dao"))
        .with_sql_map(SqlMapGeneratorConfiguration::new("mapper"))
}

pub fn model_only_context() -> Context {
    Context::new(JavaModelGeneratorConfiguration::new("com.acme.model"))
        .with_sql_map(SqlMapGeneratorConfiguration::new("mapper"))
}

/// Builds an uninitialized table from columns and key names.
pub fn build(
    context: &Arc<Context>,
    config: TableConfiguration,
    columns: Vec<IntrospectedColumn>,
    primary_key: &[&str],
) -> IntrospectedTable {
    let mut table = IntrospectedTable::new(context.target_runtime, Arc::clone(context), config)
        .unwrap_or_else(|e| panic!("Failed to build table: {e}"));
    for column in columns {
        table.add_column(column);
    }
    for key in primary_key {
        table.promote_to_primary_key(key);
    }
    table
}

pub fn user_columns() -> Vec<IntrospectedColumn> {
    vec![
        IntrospectedColumn::new("ID", JdbcType::Integer).not_null(),
        IntrospectedColumn::new("NAME", JdbcType::Varchar).length(64),
        IntrospectedColumn::new("EMAIL", JdbcType::Varchar).length(255),
    ]
}

pub fn document_columns() -> Vec<IntrospectedColumn> {
    vec![
        IntrospectedColumn::new("ID", JdbcType::Bigint).not_null(),
        IntrospectedColumn::new("TITLE", JdbcType::Varchar),
        IntrospectedColumn::new("BODY", JdbcType::Clob),
    ]
}

/// The `USER` table (`ID` key, `NAME`, `EMAIL`) initialized with the given
/// model type in a context with every generator block.
pub fn user_table(model_type: &str) -> IntrospectedTable {
    let context = Arc::new(full_context());
    let mut table = build(
        &context,
        TableConfiguration::new("USER").model_type(model_type),
        user_columns(),
        &["id"],
    );
    table
        .initialize()
        .unwrap_or_else(|e| panic!("Failed to initialize USER: {e}"));
    table
}

/// The `DOCUMENT` table (`ID` key, `TITLE`, `BODY` clob).
pub fn document_table(model_type: &str) -> IntrospectedTable {
    let context = Arc::new(full_context());
    let mut table = build(
        &context,
        TableConfiguration::new("DOCUMENT").model_type(model_type),
        document_columns(),
        &["ID"],
    );
    table
        .initialize()
        .unwrap_or_else(|e| panic!("Failed to initialize DOCUMENT: {e}"));
    table
}

pub fn names(columns: &[IntrospectedColumn]) -> Vec<&str> {
    columns.iter().map(IntrospectedColumn::actual_column_name).collect()
}
