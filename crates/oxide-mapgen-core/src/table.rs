//! Table identity: introspected and runtime names, and the domain object
//! name every generated type is built from.

use std::fmt;

use regex::Regex;

use crate::config::{Context, TableConfiguration};
use crate::error::{GenError, Result};
use crate::naming::{camel_case, compose_table_name, non_empty, split_qualified};

/// The fully qualified identity of one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullyQualifiedTable {
    introspected_catalog: Option<String>,
    introspected_schema: Option<String>,
    introspected_table_name: String,
    runtime_catalog: Option<String>,
    runtime_schema: Option<String>,
    runtime_table_name: Option<String>,
    alias: Option<String>,
    domain_object_name: String,
    domain_object_sub_package: Option<String>,
    ignore_qualifiers_at_runtime: bool,
    delimit_identifiers: bool,
    beginning_delimiter: String,
    ending_delimiter: String,
}

impl FullyQualifiedTable {
    /// Builds the table identity from its configuration.
    ///
    /// # Errors
    ///
    /// Fails only when the domain object renaming rule is not a valid regex.
    pub fn new(config: &TableConfiguration, context: &Context) -> Result<Self> {
        let (domain_object_name, domain_object_sub_package) =
            match non_empty(config.domain_object_name.as_deref()) {
                Some(name) => {
                    let (prefix, simple) = split_qualified(name);
                    (simple.to_string(), prefix.map(str::to_string))
                }
                None => (derive_domain_object_name(config)?, None),
            };

        Ok(Self {
            introspected_catalog: non_empty(config.catalog.as_deref()).map(str::to_string),
            introspected_schema: non_empty(config.schema.as_deref()).map(str::to_string),
            introspected_table_name: config.table_name.clone(),
            runtime_catalog: non_empty(config.runtime_catalog.as_deref()).map(str::to_string),
            runtime_schema: non_empty(config.runtime_schema.as_deref()).map(str::to_string),
            runtime_table_name: non_empty(config.runtime_table_name.as_deref())
                .map(str::to_string),
            alias: non_empty(config.alias.as_deref()).map(str::to_string),
            domain_object_name,
            domain_object_sub_package,
            ignore_qualifiers_at_runtime: config.ignore_qualifiers_at_runtime,
            delimit_identifiers: config.delimit_identifiers,
            beginning_delimiter: context.beginning_delimiter.clone(),
            ending_delimiter: context.ending_delimiter.clone(),
        })
    }

    #[must_use]
    pub fn introspected_catalog(&self) -> Option<&str> {
        self.introspected_catalog.as_deref()
    }

    #[must_use]
    pub fn introspected_schema(&self) -> Option<&str> {
        self.introspected_schema.as_deref()
    }

    #[must_use]
    pub fn introspected_table_name(&self) -> &str {
        &self.introspected_table_name
    }

    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// The simple name generated types are derived from, e.g. `UserRole`.
    #[must_use]
    pub fn domain_object_name(&self) -> &str {
        &self.domain_object_name
    }

    /// Package segment contributed by a dotted domain object name.
    #[must_use]
    pub fn domain_object_sub_package(&self) -> Option<&str> {
        self.domain_object_sub_package.as_deref()
    }

    fn runtime_catalog(&self) -> Option<&str> {
        if self.ignore_qualifiers_at_runtime {
            None
        } else {
            self.runtime_catalog
                .as_deref()
                .or(self.introspected_catalog.as_deref())
        }
    }

    fn runtime_schema(&self) -> Option<&str> {
        if self.ignore_qualifiers_at_runtime {
            None
        } else {
            self.runtime_schema
                .as_deref()
                .or(self.introspected_schema.as_deref())
        }
    }

    fn runtime_table_name(&self) -> &str {
        self.runtime_table_name
            .as_deref()
            .unwrap_or(&self.introspected_table_name)
    }

    fn delimit(&self, identifier: &str) -> String {
        if self.delimit_identifiers {
            format!(
                "{}{identifier}{}",
                self.beginning_delimiter, self.ending_delimiter
            )
        } else {
            identifier.to_string()
        }
    }

    /// The table name used in generated SQL, e.g. `app.USER`.
    #[must_use]
    pub fn fully_qualified_table_name_at_runtime(&self) -> String {
        let catalog = self.runtime_catalog().map(|c| self.delimit(c));
        let schema = self.runtime_schema().map(|s| self.delimit(s));
        let table = self.delimit(self.runtime_table_name());
        compose_table_name(catalog.as_deref(), schema.as_deref(), &table, '.')
    }

    /// The runtime table name followed by the alias, if one is configured.
    #[must_use]
    pub fn aliased_fully_qualified_table_name_at_runtime(&self) -> String {
        let name = self.fully_qualified_table_name_at_runtime();
        match &self.alias {
            Some(alias) => format!("{name} {alias}"),
            None => name,
        }
    }

    /// The legacy SQL-map namespace: runtime qualifiers joined with `_`.
    #[must_use]
    pub fn ibatis2_sql_map_namespace(&self) -> String {
        compose_table_name(
            self.runtime_catalog(),
            self.runtime_schema(),
            self.runtime_table_name(),
            '_',
        )
    }

    /// Package suffix (with leading `.`) for client and SQL-map artifacts.
    #[must_use]
    pub fn sub_package_for_client_or_sql_map(&self, sub_packages_enabled: bool) -> String {
        let mut out = String::new();
        if sub_packages_enabled && !self.ignore_qualifiers_at_runtime {
            if let Some(catalog) = self.runtime_catalog() {
                out.push('.');
                out.push_str(&catalog.to_lowercase());
            }
            if let Some(schema) = self.runtime_schema() {
                out.push('.');
                out.push_str(&schema.to_lowercase());
            }
        }
        if let Some(sub_package) = &self.domain_object_sub_package {
            out.push('.');
            out.push_str(sub_package);
        }
        out
    }

    /// Package suffix (with leading `.`) for model artifacts.
    #[must_use]
    pub fn sub_package_for_model(&self, sub_packages_enabled: bool) -> String {
        self.sub_package_for_client_or_sql_map(sub_packages_enabled)
    }
}

impl fmt::Display for FullyQualifiedTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&compose_table_name(
            self.introspected_catalog.as_deref(),
            self.introspected_schema.as_deref(),
            &self.introspected_table_name,
            '.',
        ))
    }
}

fn derive_domain_object_name(config: &TableConfiguration) -> Result<String> {
    let Some(rule) = &config.domain_object_renaming_rule else {
        return Ok(camel_case(&config.table_name, true));
    };

    let pattern = Regex::new(&rule.search_string).map_err(|source| {
        GenError::InvalidRenamingRule {
            pattern: rule.search_string.clone(),
            source,
        }
    })?;
    let replacement = rule.replace_string.as_deref().unwrap_or("");
    let renamed = pattern.replace_all(&config.table_name, replacement);
    Ok(camel_case(&renamed, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DomainObjectRenamingRule, JavaModelGeneratorConfiguration};

    fn context() -> Context {
        Context::new(JavaModelGeneratorConfiguration::new("com.acme.model"))
    }

    #[test]
    fn domain_object_name_from_table() {
        let table = FullyQualifiedTable::new(&TableConfiguration::new("USER_ROLE"), &context())
            .unwrap();
        assert_eq!(table.domain_object_name(), "UserRole");
        assert_eq!(table.domain_object_sub_package(), None);
    }

    #[test]
    fn configured_domain_object_name_with_package() {
        let config = TableConfiguration::new("T_USR").domain_object_name("auth.Account");
        let table = FullyQualifiedTable::new(&config, &context()).unwrap();
        assert_eq!(table.domain_object_name(), "Account");
        assert_eq!(table.domain_object_sub_package(), Some("auth"));
        assert_eq!(table.sub_package_for_model(false), ".auth");
    }

    #[test]
    fn renaming_rule_applies_before_camel_case() {
        let mut config = TableConfiguration::new("SYS_USER");
        config.domain_object_renaming_rule = Some(DomainObjectRenamingRule {
            search_string: "^SYS_".to_string(),
            replace_string: None,
        });
        let table = FullyQualifiedTable::new(&config, &context()).unwrap();
        assert_eq!(table.domain_object_name(), "User");
    }

    #[test]
    fn invalid_renaming_rule() {
        let mut config = TableConfiguration::new("SYS_USER");
        config.domain_object_renaming_rule = Some(DomainObjectRenamingRule {
            search_string: "(".to_string(),
            replace_string: None,
        });
        let err = FullyQualifiedTable::new(&config, &context()).unwrap_err();
        assert!(matches!(err, GenError::InvalidRenamingRule { .. }));
    }

    #[test]
    fn runtime_names() {
        let config = TableConfiguration::new("USER").catalog("db").schema("app").alias("u");
        let table = FullyQualifiedTable::new(&config, &context()).unwrap();
        assert_eq!(table.fully_qualified_table_name_at_runtime(), "db.app.USER");
        assert_eq!(
            table.aliased_fully_qualified_table_name_at_runtime(),
            "db.app.USER u"
        );
        assert_eq!(table.ibatis2_sql_map_namespace(), "db_app_USER");
        assert_eq!(table.to_string(), "db.app.USER");
    }

    #[test]
    fn runtime_overrides_and_ignored_qualifiers() {
        let mut config = TableConfiguration::new("USER").schema("app");
        config.runtime_schema = Some("prod".to_string());
        config.runtime_table_name = Some("USERS_V2".to_string());
        let table = FullyQualifiedTable::new(&config, &context()).unwrap();
        assert_eq!(table.fully_qualified_table_name_at_runtime(), "prod.USERS_V2");

        config.ignore_qualifiers_at_runtime = true;
        let table = FullyQualifiedTable::new(&config, &context()).unwrap();
        assert_eq!(table.fully_qualified_table_name_at_runtime(), "USERS_V2");
        assert_eq!(table.sub_package_for_client_or_sql_map(true), "");
    }

    #[test]
    fn delimited_runtime_names() {
        let mut config = TableConfiguration::new("User Table").schema("app");
        config.delimit_identifiers = true;
        let table = FullyQualifiedTable::new(&config, &context()).unwrap();
        assert_eq!(
            table.fully_qualified_table_name_at_runtime(),
            "\"app\".\"User Table\""
        );
    }

    #[test]
    fn sub_packages_lower_case_qualifiers() {
        let config = TableConfiguration::new("USER").catalog("DB").schema("APP");
        let table = FullyQualifiedTable::new(&config, &context()).unwrap();
        assert_eq!(table.sub_package_for_client_or_sql_map(true), ".db.app");
        assert_eq!(table.sub_package_for_client_or_sql_map(false), "");
    }
}
