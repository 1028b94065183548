//! Table metadata resolution and generation rules for MyBatis-style
//! data-access code generators.
//!
//! `oxide-mapgen-core` turns a table's introspected columns and its
//! configuration into a decision record that emitters read:
//! - Columns are classified into primary-key, base and BLOB groups
//! - Every package, type name and statement id is derived once, up front
//! - A rule strategy answers whether each artifact should be generated
//!
//! # Architecture
//!
//! - **Column** - `IntrospectedColumn`, one introspected column
//! - **Table** - `IntrospectedTable`, the descriptor emitters read
//! - **Attributes** - `InternalAttributes`, the derived identifiers
//! - **Rules** - the `Rules` trait and its four model-type variants
//! - **Pipeline** - resolves every configured table from captured metadata
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use oxide_mapgen_core::prelude::*;
//!
//! let context = Arc::new(
//!     Context::new(JavaModelGeneratorConfiguration::new("com.acme.model"))
//!         .with_java_client(JavaClientGeneratorConfiguration::new("com.acme.dao")),
//! );
//!
//! let mut table =
//!     IntrospectedTable::new(TargetRuntime::MyBatis3, context, TableConfiguration::new("USER"))?;
//! table.add_column(IntrospectedColumn::new("ID", JdbcType::Integer));
//! table.add_column(IntrospectedColumn::new("NAME", JdbcType::Varchar));
//! table.promote_to_primary_key("ID");
//! table.initialize()?;
//!
//! assert_eq!(table.java_mapper_type(), Some("com.acme.dao.UserMapper"));
//! assert_eq!(table.select_by_primary_key_statement_id(), Some("selectByPrimaryKey"));
//! assert!(!table.rules().generate_primary_key_class());
//! # Ok::<(), oxide_mapgen_core::GenError>(())
//! ```

pub mod attributes;
pub mod column;
pub mod config;
pub mod error;
pub mod introspect;
pub mod introspected_table;
pub mod naming;
pub mod pipeline;
pub mod plugin;
pub mod record;
pub mod rules;
pub mod table;

pub use attributes::InternalAttributes;
pub use column::{IntrospectedColumn, JdbcType};
pub use error::{GenError, Result};
pub use introspected_table::IntrospectedTable;
pub use rules::Rules;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::attributes::{statement_id, InternalAttributes};
    pub use crate::column::{IntrospectedColumn, JdbcType};
    pub use crate::config::{
        Context, JavaClientGeneratorConfiguration, JavaModelGeneratorConfiguration, ModelType,
        SqlMapGeneratorConfiguration, StatementToggles, TableConfiguration, TargetRuntime,
    };
    pub use crate::error::{GenError, Result};
    pub use crate::introspect::{CapturedMetadata, ColumnMetadata, Introspect, TableMetadata};
    pub use crate::introspected_table::IntrospectedTable;
    pub use crate::pipeline::{resolve_table, resolve_tables, GeneratorConfig};
    pub use crate::plugin::Plugin;
    pub use crate::record::DecisionRecord;
    pub use crate::rules::{RuleDecisions, Rules, TableShape};
    pub use crate::table::FullyQualifiedTable;
}
