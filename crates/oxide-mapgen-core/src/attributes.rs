//! Derived identifiers shared by every emitter.
//!
//! [`InternalAttributes`] holds each derived name as a named optional string.
//! `None` means "not applicable": the generator block that would produce the
//! artifact is not configured. The derivation steps are pure functions of the
//! table identity, its configuration and the context.

use serde::Serialize;

use crate::config::{Context, TableConfiguration};
use crate::naming::{non_empty, qualified_name, split_qualified};
use crate::table::FullyQualifiedTable;

/// Statement and fragment ids used in SQL-mapper files.
///
/// These literals are the contract between generated interface methods and
/// mapper XML, including files written by hand. They must never change.
pub mod statement_id {
    pub const COUNT_BY_WHERE: &str = "countByWhere";
    pub const SELECT_BY_WHERE: &str = "selectByWhere";
    pub const SELECT_BY_WHERE_WITHOUT_BLOBS: &str = "selectByWhereWithoutBLOBs";
    pub const SELECT_BY_PRIMARY_KEY: &str = "selectByPrimaryKey";
    // Spelling matches existing mapper files.
    pub const SELECT_BY_WHERE_WITH_CUSTOM_COLUMN: &str = "selectByWhereWitchColumn";
    pub const DELETE_BY_WHERE: &str = "deleteByWhere";
    pub const DELETE_BY_PRIMARY_KEY: &str = "deleteByPrimaryKey";
    pub const INSERT: &str = "insertNoCheck";
    pub const INSERT_SELECTIVE: &str = "insert";
    pub const INSERTS: &str = "inserts";
    pub const UPDATE_BY_WHERE: &str = "updateByWhere";
    pub const UPDATE_BY_WHERE_SELECTIVE: &str = "updateByWhereSelective";
    pub const UPDATE_BY_WHERE_WITH_BLOBS: &str = "updateByWhereWithBLOBs";
    pub const UPDATE_BY_PRIMARY_KEY: &str = "updateByPrimaryKeyNoCheck";
    pub const UPDATE_BY_PRIMARY_KEY_SELECTIVE: &str = "updateByPrimaryKey";
    pub const UPDATE_BY_PRIMARY_KEY_WITH_BLOBS: &str = "updateByPrimaryKeyWithBLOBs";
    pub const BASE_RESULT_MAP: &str = "BaseResultMap";
    pub const RESULT_MAP_WITH_BLOBS: &str = "ResultMapWithBLOBs";
    pub const WHERE_CLAUSE: &str = "whereClause";
    pub const BASE_COLUMN_LIST: &str = "BaseColumnList";
    pub const BLOB_COLUMN_LIST: &str = "BlobColumnList";
    pub const CUSTOM_COLUMN_LIST: &str = "CustomColumnList";
}

/// Every identifier and type name derived for a table during initialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalAttributes {
    // Java client
    pub dao_implementation_type: Option<String>,
    pub dao_interface_type: Option<String>,
    pub java_mapper_type: Option<String>,
    pub sql_provider_type: Option<String>,

    // Java model
    pub primary_key_type: Option<String>,
    pub base_record_type: Option<String>,
    pub record_with_blobs_type: Option<String>,
    pub where_type: Option<String>,
    pub column_custom_type: Option<String>,

    // SQL map / XML mapper
    pub ibatis2_sql_map_package: Option<String>,
    pub ibatis2_sql_map_file_name: Option<String>,
    pub ibatis2_sql_map_namespace: Option<String>,
    pub xml_mapper_package: Option<String>,
    pub xml_mapper_file_name: Option<String>,
    pub fallback_sql_map_namespace: Option<String>,
    pub fully_qualified_table_name_at_runtime: Option<String>,
    pub aliased_fully_qualified_table_name_at_runtime: Option<String>,

    // Statement ids
    pub count_by_where_statement_id: Option<String>,
    pub select_by_where_statement_id: Option<String>,
    pub select_by_where_without_blobs_statement_id: Option<String>,
    pub select_by_primary_key_statement_id: Option<String>,
    pub select_by_where_with_custom_column_statement_id: Option<String>,
    pub delete_by_where_statement_id: Option<String>,
    pub delete_by_primary_key_statement_id: Option<String>,
    pub insert_statement_id: Option<String>,
    pub insert_selective_statement_id: Option<String>,
    pub inserts_statement_id: Option<String>,
    pub update_by_where_statement_id: Option<String>,
    pub update_by_where_selective_statement_id: Option<String>,
    pub update_by_where_with_blobs_statement_id: Option<String>,
    pub update_by_primary_key_statement_id: Option<String>,
    pub update_by_primary_key_selective_statement_id: Option<String>,
    pub update_by_primary_key_with_blobs_statement_id: Option<String>,

    // Fragment ids
    pub base_result_map_id: Option<String>,
    pub result_map_with_blobs_id: Option<String>,
    pub where_clause_id: Option<String>,
    /// Always unset; no separate update-by-where clause fragment is named.
    pub update_by_where_clause_id: Option<String>,
    pub base_column_list_id: Option<String>,
    pub blob_column_list_id: Option<String>,
    pub custom_column_list_id: Option<String>,
}

impl InternalAttributes {
    /// Derives the DAO and mapper type names. Leaves them unset when the
    /// context has no Java client block.
    pub fn derive_client(
        &mut self,
        table: &FullyQualifiedTable,
        config: &TableConfiguration,
        context: &Context,
    ) {
        let Some(client) = &context.java_client else {
            return;
        };

        let sub_package = table.sub_package_for_client_or_sql_map(client.sub_packages_enabled());
        let interface_package = format!("{}{sub_package}", client.target_package);
        let implementation_package = format!(
            "{}{sub_package}",
            non_empty(client.implementation_package.as_deref()).unwrap_or(&client.target_package)
        );
        let name = table.domain_object_name();

        self.dao_implementation_type = Some(qualified_name(
            &implementation_package,
            &format!("{name}DAOImpl"),
        ));
        self.dao_interface_type = Some(qualified_name(&interface_package, &format!("{name}DAO")));
        self.java_mapper_type = Some(qualified_name(
            &interface_package,
            &mapper_name(table, config),
        ));
        self.sql_provider_type = Some(qualified_name(
            &interface_package,
            &non_empty(config.sql_provider_name.as_deref())
                .map_or_else(|| format!("{name}SqlProvider"), str::to_string),
        ));
    }

    /// Derives the model type names. These are computed whether or not the
    /// table has key or BLOB columns.
    pub fn derive_model(&mut self, table: &FullyQualifiedTable, context: &Context) {
        let model = &context.java_model;
        let package = format!(
            "{}{}",
            model.target_package,
            table.sub_package_for_model(model.sub_packages_enabled())
        );
        let name = table.domain_object_name();

        self.primary_key_type = Some(qualified_name(&package, &format!("{name}Key")));
        self.base_record_type = Some(qualified_name(&package, name));
        self.record_with_blobs_type = Some(qualified_name(&package, &format!("{name}WithBLOBs")));
        self.where_type = Some(qualified_name(&package, &format!("{name}Where")));
        self.column_custom_type = Some(qualified_name(&package, &format!("{name}Column")));
    }

    /// Derives SQL-map names and the runtime table names.
    pub fn derive_xml(
        &mut self,
        table: &FullyQualifiedTable,
        config: &TableConfiguration,
        context: &Context,
    ) {
        let sql_map_package = sql_map_package(table, config, context);
        let mapper_name = mapper_name(table, config);
        let (_, mapper_simple_name) = split_qualified(&mapper_name);

        self.ibatis2_sql_map_package.clone_from(&sql_map_package);
        self.ibatis2_sql_map_file_name =
            Some(format!("{}_SqlMap.xml", table.ibatis2_sql_map_namespace()));
        self.ibatis2_sql_map_namespace = Some(table.ibatis2_sql_map_namespace());

        self.xml_mapper_file_name = Some(format!("{mapper_simple_name}.xml"));
        self.fallback_sql_map_namespace = Some(format!(
            "{}.{mapper_name}",
            sql_map_package.as_deref().unwrap_or("")
        ));
        self.xml_mapper_package = sql_map_package;

        self.fully_qualified_table_name_at_runtime =
            Some(table.fully_qualified_table_name_at_runtime());
        self.aliased_fully_qualified_table_name_at_runtime =
            Some(table.aliased_fully_qualified_table_name_at_runtime());
    }

    /// Stores the literal statement and fragment ids.
    pub fn apply_statement_ids(&mut self) {
        use statement_id as id;

        let set = |slot: &mut Option<String>, value: &str| *slot = Some(value.to_string());

        set(&mut self.count_by_where_statement_id, id::COUNT_BY_WHERE);
        set(&mut self.select_by_where_statement_id, id::SELECT_BY_WHERE);
        set(
            &mut self.select_by_where_without_blobs_statement_id,
            id::SELECT_BY_WHERE_WITHOUT_BLOBS,
        );
        set(&mut self.select_by_primary_key_statement_id, id::SELECT_BY_PRIMARY_KEY);
        set(
            &mut self.select_by_where_with_custom_column_statement_id,
            id::SELECT_BY_WHERE_WITH_CUSTOM_COLUMN,
        );
        set(&mut self.delete_by_where_statement_id, id::DELETE_BY_WHERE);
        set(&mut self.delete_by_primary_key_statement_id, id::DELETE_BY_PRIMARY_KEY);
        set(&mut self.insert_statement_id, id::INSERT);
        set(&mut self.insert_selective_statement_id, id::INSERT_SELECTIVE);
        set(&mut self.inserts_statement_id, id::INSERTS);
        set(&mut self.update_by_where_statement_id, id::UPDATE_BY_WHERE);
        set(
            &mut self.update_by_where_selective_statement_id,
            id::UPDATE_BY_WHERE_SELECTIVE,
        );
        set(
            &mut self.update_by_where_with_blobs_statement_id,
            id::UPDATE_BY_WHERE_WITH_BLOBS,
        );
        set(&mut self.update_by_primary_key_statement_id, id::UPDATE_BY_PRIMARY_KEY);
        set(
            &mut self.update_by_primary_key_selective_statement_id,
            id::UPDATE_BY_PRIMARY_KEY_SELECTIVE,
        );
        set(
            &mut self.update_by_primary_key_with_blobs_statement_id,
            id::UPDATE_BY_PRIMARY_KEY_WITH_BLOBS,
        );

        set(&mut self.base_result_map_id, id::BASE_RESULT_MAP);
        set(&mut self.result_map_with_blobs_id, id::RESULT_MAP_WITH_BLOBS);
        set(&mut self.where_clause_id, id::WHERE_CLAUSE);
        set(&mut self.base_column_list_id, id::BASE_COLUMN_LIST);
        set(&mut self.blob_column_list_id, id::BLOB_COLUMN_LIST);
        set(&mut self.custom_column_list_id, id::CUSTOM_COLUMN_LIST);
    }
}

/// The configured mapper name, or `<DomainObjectName>Mapper`.
fn mapper_name(table: &FullyQualifiedTable, config: &TableConfiguration) -> String {
    non_empty(config.mapper_name.as_deref()).map_or_else(
        || format!("{}Mapper", table.domain_object_name()),
        str::to_string,
    )
}

/// The SQL-map package, extended by the prefix of a dotted mapper name.
/// Unset when the context has no SQL-map block.
fn sql_map_package(
    table: &FullyQualifiedTable,
    config: &TableConfiguration,
    context: &Context,
) -> Option<String> {
    let sql_map = context.sql_map.as_ref()?;
    let mut package = format!(
        "{}{}",
        sql_map.target_package,
        table.sub_package_for_client_or_sql_map(sql_map.sub_packages_enabled())
    );
    if let Some(mapper) = non_empty(config.mapper_name.as_deref()) {
        if let (Some(prefix), _) = split_qualified(mapper) {
            package.push('.');
            package.push_str(prefix);
        }
    }
    Some(package)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        JavaClientGeneratorConfiguration, JavaModelGeneratorConfiguration,
        SqlMapGeneratorConfiguration,
    };

    fn full_context() -> Context {
        Context::new(JavaModelGeneratorConfiguration::new("com.acme.model"))
            .with_java_client(JavaClientGeneratorConfiguration::new("com.acme.dao"))
            .with_sql_map(SqlMapGeneratorConfiguration::new("mapper"))
    }

    fn derive(config: &TableConfiguration, context: &Context) -> InternalAttributes {
        let table = FullyQualifiedTable::new(config, context).unwrap();
        let mut attrs = InternalAttributes::default();
        attrs.derive_client(&table, config, context);
        attrs.derive_model(&table, context);
        attrs.derive_xml(&table, config, context);
        attrs.apply_statement_ids();
        attrs
    }

    #[test]
    fn default_names() {
        let attrs = derive(&TableConfiguration::new("USER"), &full_context());
        assert_eq!(attrs.dao_interface_type.as_deref(), Some("com.acme.dao.UserDAO"));
        assert_eq!(
            attrs.dao_implementation_type.as_deref(),
            Some("com.acme.dao.UserDAOImpl")
        );
        assert_eq!(attrs.java_mapper_type.as_deref(), Some("com.acme.dao.UserMapper"));
        assert_eq!(
            attrs.sql_provider_type.as_deref(),
            Some("com.acme.dao.UserSqlProvider")
        );
        assert_eq!(attrs.base_record_type.as_deref(), Some("com.acme.model.User"));
        assert_eq!(attrs.primary_key_type.as_deref(), Some("com.acme.model.UserKey"));
        assert_eq!(attrs.where_type.as_deref(), Some("com.acme.model.UserWhere"));
        assert_eq!(attrs.column_custom_type.as_deref(), Some("com.acme.model.UserColumn"));
        assert_eq!(attrs.xml_mapper_package.as_deref(), Some("mapper"));
        assert_eq!(attrs.xml_mapper_file_name.as_deref(), Some("UserMapper.xml"));
        assert_eq!(attrs.fallback_sql_map_namespace.as_deref(), Some("mapper.UserMapper"));
        assert_eq!(attrs.ibatis2_sql_map_file_name.as_deref(), Some("USER_SqlMap.xml"));
    }

    #[test]
    fn dotted_mapper_name_splits_package_and_file() {
        let config = TableConfiguration::new("USER")
            .mapper_name("sys.UserDao")
            .sql_provider_name("UserSql");
        let attrs = derive(&config, &full_context());
        assert_eq!(attrs.java_mapper_type.as_deref(), Some("com.acme.dao.sys.UserDao"));
        assert_eq!(attrs.xml_mapper_package.as_deref(), Some("mapper.sys"));
        assert_eq!(attrs.xml_mapper_file_name.as_deref(), Some("UserDao.xml"));
        assert_eq!(
            attrs.fallback_sql_map_namespace.as_deref(),
            Some("mapper.sys.sys.UserDao")
        );
        assert_eq!(attrs.sql_provider_type.as_deref(), Some("com.acme.dao.UserSql"));
    }

    #[test]
    fn implementation_package_and_sub_packages() {
        let context = Context::new(
            JavaModelGeneratorConfiguration::new("com.acme.model").property("enableSubPackages", "true"),
        )
        .with_java_client(
            JavaClientGeneratorConfiguration::new("com.acme.dao")
                .implementation_package("com.acme.dao.impl")
                .property("enableSubPackages", "true"),
        );
        let config = TableConfiguration::new("USER").schema("HR");
        let attrs = derive(&config, &context);
        assert_eq!(
            attrs.dao_implementation_type.as_deref(),
            Some("com.acme.dao.impl.hr.UserDAOImpl")
        );
        assert_eq!(attrs.dao_interface_type.as_deref(), Some("com.acme.dao.hr.UserDAO"));
        assert_eq!(attrs.base_record_type.as_deref(), Some("com.acme.model.hr.User"));
    }

    #[test]
    fn missing_blocks_leave_names_unset() {
        let context = Context::new(JavaModelGeneratorConfiguration::new("com.acme.model"));
        let attrs = derive(&TableConfiguration::new("USER"), &context);
        assert_eq!(attrs.dao_interface_type, None);
        assert_eq!(attrs.java_mapper_type, None);
        assert_eq!(attrs.xml_mapper_package, None);
        assert_eq!(attrs.fallback_sql_map_namespace.as_deref(), Some(".UserMapper"));
        assert_eq!(attrs.base_record_type.as_deref(), Some("com.acme.model.User"));
    }

    #[test]
    fn statement_ids_are_literal() {
        let attrs = derive(&TableConfiguration::new("ANYTHING"), &full_context());
        assert_eq!(attrs.select_by_primary_key_statement_id.as_deref(), Some("selectByPrimaryKey"));
        assert_eq!(attrs.inserts_statement_id.as_deref(), Some("inserts"));
        assert_eq!(attrs.insert_statement_id.as_deref(), Some("insertNoCheck"));
        assert_eq!(attrs.insert_selective_statement_id.as_deref(), Some("insert"));
        assert_eq!(
            attrs.update_by_primary_key_selective_statement_id.as_deref(),
            Some("updateByPrimaryKey")
        );
        assert_eq!(attrs.where_clause_id.as_deref(), Some("whereClause"));
        assert_eq!(attrs.update_by_where_clause_id, None);
        assert_eq!(attrs.blob_column_list_id.as_deref(), Some("BlobColumnList"));
    }
}
