//! Loading generator configuration files from disk.

use std::io::Write;

use oxide_mapgen_core::prelude::*;
use tempfile::NamedTempFile;

const CONFIG: &str = r#"{
    "context": {
        "id": "acme",
        "targetRuntime": "MyBatis3",
        "defaultModelType": "hierarchical",
        "javaModel": { "targetPackage": "com.acme.model" },
        "javaClient": {
            "targetPackage": "com.acme.dao",
            "implementationPackage": "com.acme.dao.impl"
        },
        "sqlMap": { "targetPackage": "mapper" }
    },
    "tables": [
        {
            "tableName": "ORDER_LINE",
            "alias": "ol",
            "statements": { "deleteByWhere": false }
        },
        {
            "tableName": "SYS_NOTE",
            "modelType": "conditional",
            "domainObjectRenamingRule": { "searchString": "^SYS_" }
        }
    ],
    "metadata": {
        "ORDER_LINE": {
            "columns": [
                { "name": "ORDER_ID", "jdbcType": "BIGINT", "nullable": false },
                { "name": "LINE_NO", "jdbcType": "INTEGER", "nullable": false },
                { "name": "CREATED_ON", "jdbcType": "DATE" }
            ],
            "primaryKey": ["ORDER_ID", "LINE_NO"],
            "remarks": "Order lines"
        },
        "SYS_NOTE": {
            "columns": [
                { "name": "ID", "jdbcType": "INTEGER" },
                { "name": "TEXT", "jdbcType": "LONGVARCHAR" }
            ],
            "primaryKey": ["ID"]
        }
    }
}"#;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn resolves_tables_from_file() {
    let file = write_config(CONFIG);
    let tables = GeneratorConfig::from_path(file.path())
        .unwrap()
        .resolve()
        .unwrap();
    assert_eq!(tables.len(), 2);

    let line = &tables[0];
    assert_eq!(line.rules().model_type(), ModelType::Hierarchical);
    assert_eq!(line.primary_key_columns().len(), 2);
    assert!(line.has_jdbc_date_columns());
    assert_eq!(line.remarks(), Some("Order lines"));
    assert_eq!(line.aliased_fully_qualified_table_name_at_runtime(), Some("ORDER_LINE ol"));
    assert_eq!(
        line.dao_implementation_type(),
        Some("com.acme.dao.impl.OrderLineDAOImpl")
    );
    assert!(!line.rules().generate_delete_by_where());
    assert!(line.rules().generate_where_class());

    let note = &tables[1];
    assert_eq!(note.fully_qualified_table().domain_object_name(), "Note");
    assert_eq!(note.base_record_type(), Some("com.acme.model.Note"));
    assert_eq!(note.blob_columns().len(), 1);
    assert!(!note.rules().generate_record_with_blobs_class());
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = GeneratorConfig::from_path(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, GenError::Io(_)));
}

#[test]
fn invalid_runtime_is_rejected() {
    let file = write_config(&CONFIG.replace("\"MyBatis3\"", "\"Hibernate\""));
    let err = GeneratorConfig::from_path(file.path()).unwrap_err();
    assert!(matches!(err, GenError::Serialization(_)));
}
