//! Configuration records consumed by table resolution.
//!
//! These are plain data loaded from the generator configuration file. Model
//! type selectors stay as the raw strings found in configuration; they are
//! interpreted when a table is initialized so that an unknown selector is
//! reported against the table that uses it.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GenError;
use crate::naming::is_true;
use crate::plugin::{Plugin, Plugins};

/// Free-form configuration properties.
pub type Properties = BTreeMap<String, String>;

/// Property keys recognised by the resolver.
pub mod property {
    /// Appends catalog/schema sub-packages to generated packages.
    pub const ENABLE_SUB_PACKAGES: &str = "enableSubPackages";
    /// Generates immutable records (implies constructor based).
    pub const IMMUTABLE: &str = "immutable";
    /// Generates records populated through constructors.
    pub const CONSTRUCTOR_BASED: &str = "constructorBased";
    /// Generates only model classes for the table.
    pub const MODEL_ONLY: &str = "modelOnly";
}

/// Runtime the generated artifacts target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TargetRuntime {
    /// Annotated/XML mapper interfaces.
    #[default]
    MyBatis3,
    /// Legacy SQL maps with DAO classes.
    Ibatis2,
}

impl TargetRuntime {
    /// Returns the canonical runtime name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MyBatis3 => "MyBatis3",
            Self::Ibatis2 => "Ibatis2",
        }
    }
}

impl fmt::Display for TargetRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetRuntime {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mybatis3" => Ok(Self::MyBatis3),
            "ibatis2" => Ok(Self::Ibatis2),
            _ => Err(GenError::UnknownTargetRuntime(s.to_string())),
        }
    }
}

impl TryFrom<String> for TargetRuntime {
    type Error = GenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TargetRuntime> for String {
    fn from(value: TargetRuntime) -> Self {
        value.as_str().to_string()
    }
}

/// Selects the generation rule variant for a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ModelType {
    /// Separate classes only where the column groups warrant them.
    #[default]
    Conditional,
    /// One record class holding every column.
    Flat,
    /// Key, record and BLOB classes whenever the groups are non-empty.
    Hierarchical,
    /// Key class plus merged record, with bulk and condition-based CRUD.
    MultiCrud,
}

impl ModelType {
    /// Returns the canonical selector string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Conditional => "conditional",
            Self::Flat => "flat",
            Self::Hierarchical => "hierarchical",
            Self::MultiCrud => "multiCrud",
        }
    }

    /// Resolves the effective model type: the table selector wins, then the
    /// context default, then [`ModelType::Conditional`].
    ///
    /// # Errors
    ///
    /// A selector that is present but unrecognised is an error; only an
    /// absent selector falls back.
    pub fn resolve(table: Option<&str>, context_default: Option<&str>) -> Result<Self, GenError> {
        match table.or(context_default) {
            Some(selector) => selector.parse(),
            None => Ok(Self::default()),
        }
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelType {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "conditional" => Ok(Self::Conditional),
            "flat" => Ok(Self::Flat),
            "hierarchical" => Ok(Self::Hierarchical),
            "multicrud" => Ok(Self::MultiCrud),
            _ => Err(GenError::UnknownModelType(s.to_string())),
        }
    }
}

/// Java model generator block. Always present: model type names are derived
/// for every table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JavaModelGeneratorConfiguration {
    /// Package for record, key and condition classes.
    pub target_package: String,
    /// Output project/directory (informational).
    pub target_project: Option<String>,
    /// Generator properties.
    pub properties: Properties,
}

impl JavaModelGeneratorConfiguration {
    /// Creates a model generator block for the given package.
    #[must_use]
    pub fn new(target_package: impl Into<String>) -> Self {
        Self {
            target_package: target_package.into(),
            ..Self::default()
        }
    }

    /// Sets a property.
    #[must_use]
    pub fn property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn sub_packages_enabled(&self) -> bool {
        is_true(self.properties.get(property::ENABLE_SUB_PACKAGES).map(String::as_str))
    }
}

/// Java client (DAO / mapper interface) generator block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JavaClientGeneratorConfiguration {
    /// Client flavour, e.g. `XMLMAPPER` (informational).
    pub client_type: Option<String>,
    /// Package for mapper/DAO interfaces.
    pub target_package: String,
    /// Package for DAO implementations; defaults to `target_package`.
    pub implementation_package: Option<String>,
    /// Output project/directory (informational).
    pub target_project: Option<String>,
    /// Generator properties.
    pub properties: Properties,
}

impl JavaClientGeneratorConfiguration {
    /// Creates a client generator block for the given package.
    #[must_use]
    pub fn new(target_package: impl Into<String>) -> Self {
        Self {
            target_package: target_package.into(),
            ..Self::default()
        }
    }

    /// Sets the DAO implementation package.
    #[must_use]
    pub fn implementation_package(mut self, package: impl Into<String>) -> Self {
        self.implementation_package = Some(package.into());
        self
    }

    /// Sets a property.
    #[must_use]
    pub fn property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn sub_packages_enabled(&self) -> bool {
        is_true(self.properties.get(property::ENABLE_SUB_PACKAGES).map(String::as_str))
    }
}

/// SQL-mapper XML generator block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SqlMapGeneratorConfiguration {
    /// Package (resource directory) for mapper XML files.
    pub target_package: String,
    /// Output project/directory (informational).
    pub target_project: Option<String>,
    /// Generator properties.
    pub properties: Properties,
}

impl SqlMapGeneratorConfiguration {
    /// Creates an SQL-map generator block for the given package.
    #[must_use]
    pub fn new(target_package: impl Into<String>) -> Self {
        Self {
            target_package: target_package.into(),
            ..Self::default()
        }
    }

    /// Sets a property.
    #[must_use]
    pub fn property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn sub_packages_enabled(&self) -> bool {
        is_true(self.properties.get(property::ENABLE_SUB_PACKAGES).map(String::as_str))
    }
}

fn default_delimiter() -> String {
    "\"".to_string()
}

/// A generation context: the generator blocks shared by every table in it,
/// plus the plugin hooks.
///
/// The presence of each optional generator block gates which identifiers are
/// derived for a table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Context {
    /// Context identifier.
    #[serde(default)]
    pub id: String,
    /// Runtime the generated artifacts target.
    #[serde(default)]
    pub target_runtime: TargetRuntime,
    /// Model type selector used when a table has none.
    #[serde(default)]
    pub default_model_type: Option<String>,
    /// Opening delimiter for delimited identifiers.
    #[serde(default = "default_delimiter")]
    pub beginning_delimiter: String,
    /// Closing delimiter for delimited identifiers.
    #[serde(default = "default_delimiter")]
    pub ending_delimiter: String,
    /// Java model generator block.
    pub java_model: JavaModelGeneratorConfiguration,
    /// Java client generator block, if clients are generated.
    #[serde(default)]
    pub java_client: Option<JavaClientGeneratorConfiguration>,
    /// SQL-map generator block, if mapper XML is generated.
    #[serde(default)]
    pub sql_map: Option<SqlMapGeneratorConfiguration>,
    /// Hooks notified when tables finish initializing.
    #[serde(skip)]
    pub plugins: Plugins,
}

impl Context {
    /// Creates a context with only a model generator block.
    #[must_use]
    pub fn new(java_model: JavaModelGeneratorConfiguration) -> Self {
        Self {
            id: String::new(),
            target_runtime: TargetRuntime::default(),
            default_model_type: None,
            beginning_delimiter: default_delimiter(),
            ending_delimiter: default_delimiter(),
            java_model,
            java_client: None,
            sql_map: None,
            plugins: Plugins::default(),
        }
    }

    /// Sets the target runtime.
    #[must_use]
    pub fn target_runtime(mut self, target_runtime: TargetRuntime) -> Self {
        self.target_runtime = target_runtime;
        self
    }

    /// Sets the default model type selector.
    #[must_use]
    pub fn default_model_type(mut self, selector: impl Into<String>) -> Self {
        self.default_model_type = Some(selector.into());
        self
    }

    /// Adds a Java client generator block.
    #[must_use]
    pub fn with_java_client(mut self, config: JavaClientGeneratorConfiguration) -> Self {
        self.java_client = Some(config);
        self
    }

    /// Adds an SQL-map generator block.
    #[must_use]
    pub fn with_sql_map(mut self, config: SqlMapGeneratorConfiguration) -> Self {
        self.sql_map = Some(config);
        self
    }

    /// Registers a plugin.
    #[must_use]
    pub fn with_plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.add(plugin);
        self
    }

    /// Returns the registered plugins.
    #[must_use]
    pub fn plugins(&self) -> &Plugins {
        &self.plugins
    }
}

/// Per-table switches for the statements a table may generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(clippy::struct_excessive_bools)]
pub struct StatementToggles {
    pub insert: bool,
    pub select_by_primary_key: bool,
    pub select_by_where: bool,
    pub update_by_primary_key: bool,
    pub delete_by_primary_key: bool,
    pub delete_by_where: bool,
    pub count_by_where: bool,
    pub update_by_where: bool,
}

impl Default for StatementToggles {
    fn default() -> Self {
        Self {
            insert: true,
            select_by_primary_key: true,
            select_by_where: true,
            update_by_primary_key: true,
            delete_by_primary_key: true,
            delete_by_where: true,
            count_by_where: true,
            update_by_where: true,
        }
    }
}

/// Regex rewrite applied to the table name before deriving the domain
/// object name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainObjectRenamingRule {
    /// Pattern searched in the table name.
    pub search_string: String,
    /// Replacement text; empty when absent.
    #[serde(default)]
    pub replace_string: Option<String>,
}

/// Configuration for one table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableConfiguration {
    pub catalog: Option<String>,
    pub schema: Option<String>,
    pub table_name: String,
    pub alias: Option<String>,
    /// Explicit domain object name; a dotted name adds a sub-package.
    pub domain_object_name: Option<String>,
    pub domain_object_renaming_rule: Option<DomainObjectRenamingRule>,
    /// Explicit mapper name; a dotted name adds a sub-package.
    pub mapper_name: Option<String>,
    pub sql_provider_name: Option<String>,
    /// Raw model type selector; see [`ModelType::resolve`].
    pub model_type: Option<String>,
    pub runtime_catalog: Option<String>,
    pub runtime_schema: Option<String>,
    pub runtime_table_name: Option<String>,
    pub ignore_qualifiers_at_runtime: bool,
    pub delimit_identifiers: bool,
    pub statements: StatementToggles,
    pub properties: Properties,
}

impl TableConfiguration {
    /// Creates a configuration for the named table with every statement
    /// enabled.
    #[must_use]
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn catalog(mut self, catalog: impl Into<String>) -> Self {
        self.catalog = Some(catalog.into());
        self
    }

    #[must_use]
    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    #[must_use]
    pub fn domain_object_name(mut self, name: impl Into<String>) -> Self {
        self.domain_object_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn mapper_name(mut self, name: impl Into<String>) -> Self {
        self.mapper_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn sql_provider_name(mut self, name: impl Into<String>) -> Self {
        self.sql_provider_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn model_type(mut self, selector: impl Into<String>) -> Self {
        self.model_type = Some(selector.into());
        self
    }

    /// Sets a property.
    #[must_use]
    pub fn property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Returns a property value.
    #[must_use]
    pub fn get_property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Returns true when the table is configured to generate model classes
    /// only.
    #[must_use]
    pub fn is_model_only(&self) -> bool {
        is_true(self.get_property(property::MODEL_ONLY))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_type_selectors() {
        assert_eq!("conditional".parse::<ModelType>().unwrap(), ModelType::Conditional);
        assert_eq!("FLAT".parse::<ModelType>().unwrap(), ModelType::Flat);
        assert_eq!("Hierarchical".parse::<ModelType>().unwrap(), ModelType::Hierarchical);
        assert_eq!("multiCrud".parse::<ModelType>().unwrap(), ModelType::MultiCrud);
        assert_eq!("multi-crud".parse::<ModelType>().unwrap(), ModelType::MultiCrud);
        assert_eq!("MULTI_CRUD".parse::<ModelType>().unwrap(), ModelType::MultiCrud);
        assert!(matches!(
            "tree".parse::<ModelType>(),
            Err(GenError::UnknownModelType(s)) if s == "tree"
        ));
    }

    #[test]
    fn model_type_resolution_order() {
        assert_eq!(ModelType::resolve(None, None).unwrap(), ModelType::Conditional);
        assert_eq!(ModelType::resolve(None, Some("flat")).unwrap(), ModelType::Flat);
        assert_eq!(
            ModelType::resolve(Some("hierarchical"), Some("flat")).unwrap(),
            ModelType::Hierarchical
        );
        assert!(ModelType::resolve(Some("bogus"), Some("flat")).is_err());
    }

    #[test]
    fn target_runtime_names() {
        assert_eq!("mybatis3".parse::<TargetRuntime>().unwrap(), TargetRuntime::MyBatis3);
        assert_eq!("IBATIS2".parse::<TargetRuntime>().unwrap(), TargetRuntime::Ibatis2);
        assert!("hibernate".parse::<TargetRuntime>().is_err());
    }

    #[test]
    fn statement_toggles_default_enabled() {
        let toggles = StatementToggles::default();
        assert!(toggles.insert && toggles.select_by_where && toggles.update_by_where);

        let parsed: StatementToggles = serde_json::from_str(r#"{"insert": false}"#).unwrap();
        assert!(!parsed.insert);
        assert!(parsed.delete_by_where);
    }

    #[test]
    fn table_configuration_from_json() {
        let json = r#"{
            "tableName": "USER",
            "schema": "app",
            "mapperName": "sys.UserDao",
            "modelType": "flat",
            "properties": { "modelOnly": "TRUE" }
        }"#;
        let config: TableConfiguration = serde_json::from_str(json).unwrap();
        assert_eq!(config.table_name, "USER");
        assert_eq!(config.schema.as_deref(), Some("app"));
        assert_eq!(config.mapper_name.as_deref(), Some("sys.UserDao"));
        assert!(config.is_model_only());
        assert!(config.statements.count_by_where);
    }

    #[test]
    fn context_from_json() {
        let json = r#"{
            "targetRuntime": "MyBatis3",
            "javaModel": { "targetPackage": "com.acme.model" },
            "sqlMap": { "targetPackage": "mapper", "properties": { "enableSubPackages": "true" } }
        }"#;
        let context: Context = serde_json::from_str(json).unwrap();
        assert_eq!(context.java_model.target_package, "com.acme.model");
        assert!(context.java_client.is_none());
        assert!(context.sql_map.as_ref().unwrap().sub_packages_enabled());
        assert_eq!(context.beginning_delimiter, "\"");
        assert!(context.plugins().is_empty());
    }
}
