//! Column descriptors produced by introspection.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::GenError;
use crate::naming::camel_case;
use crate::table::FullyQualifiedTable;

/// Semantic column types, named after the JDBC type constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum JdbcType {
    Array,
    Bigint,
    Binary,
    Bit,
    Blob,
    Boolean,
    Char,
    Clob,
    Datalink,
    Date,
    Decimal,
    Distinct,
    Double,
    Float,
    Integer,
    JavaObject,
    LongNVarchar,
    LongVarbinary,
    LongVarchar,
    NChar,
    NClob,
    Null,
    Numeric,
    NVarchar,
    Other,
    Real,
    Ref,
    RowId,
    SmallInt,
    SqlXml,
    Struct,
    Time,
    TimeWithTimezone,
    Timestamp,
    TimestampWithTimezone,
    TinyInt,
    Varbinary,
    Varchar,
}

impl JdbcType {
    /// Returns the JDBC type name, e.g. `"LONGVARCHAR"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Array => "ARRAY",
            Self::Bigint => "BIGINT",
            Self::Binary => "BINARY",
            Self::Bit => "BIT",
            Self::Blob => "BLOB",
            Self::Boolean => "BOOLEAN",
            Self::Char => "CHAR",
            Self::Clob => "CLOB",
            Self::Datalink => "DATALINK",
            Self::Date => "DATE",
            Self::Decimal => "DECIMAL",
            Self::Distinct => "DISTINCT",
            Self::Double => "DOUBLE",
            Self::Float => "FLOAT",
            Self::Integer => "INTEGER",
            Self::JavaObject => "JAVA_OBJECT",
            Self::LongNVarchar => "LONGNVARCHAR",
            Self::LongVarbinary => "LONGVARBINARY",
            Self::LongVarchar => "LONGVARCHAR",
            Self::NChar => "NCHAR",
            Self::NClob => "NCLOB",
            Self::Null => "NULL",
            Self::Numeric => "NUMERIC",
            Self::NVarchar => "NVARCHAR",
            Self::Other => "OTHER",
            Self::Real => "REAL",
            Self::Ref => "REF",
            Self::RowId => "ROWID",
            Self::SmallInt => "SMALLINT",
            Self::SqlXml => "SQLXML",
            Self::Struct => "STRUCT",
            Self::Time => "TIME",
            Self::TimeWithTimezone => "TIME_WITH_TIMEZONE",
            Self::Timestamp => "TIMESTAMP",
            Self::TimestampWithTimezone => "TIMESTAMP_WITH_TIMEZONE",
            Self::TinyInt => "TINYINT",
            Self::Varbinary => "VARBINARY",
            Self::Varchar => "VARCHAR",
        }
    }

    /// Returns true for types stored as large objects.
    ///
    /// Columns of these types are routed into the BLOB column group.
    #[must_use]
    pub const fn is_large_object(self) -> bool {
        matches!(
            self,
            Self::Binary
                | Self::Blob
                | Self::Clob
                | Self::LongNVarchar
                | Self::LongVarbinary
                | Self::LongVarchar
                | Self::NClob
                | Self::Varbinary
        )
    }

    /// Returns true for character types.
    #[must_use]
    pub const fn is_character(self) -> bool {
        matches!(
            self,
            Self::Char
                | Self::Clob
                | Self::LongVarchar
                | Self::LongNVarchar
                | Self::NChar
                | Self::NClob
                | Self::NVarchar
                | Self::Varchar
        )
    }
}

impl fmt::Display for JdbcType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for JdbcType {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let jdbc_type = match s.trim().to_ascii_uppercase().as_str() {
            "ARRAY" => Self::Array,
            "BIGINT" => Self::Bigint,
            "BINARY" => Self::Binary,
            "BIT" => Self::Bit,
            "BLOB" => Self::Blob,
            "BOOLEAN" => Self::Boolean,
            "CHAR" => Self::Char,
            "CLOB" => Self::Clob,
            "DATALINK" => Self::Datalink,
            "DATE" => Self::Date,
            "DECIMAL" => Self::Decimal,
            "DISTINCT" => Self::Distinct,
            "DOUBLE" => Self::Double,
            "FLOAT" => Self::Float,
            "INTEGER" => Self::Integer,
            "JAVA_OBJECT" => Self::JavaObject,
            "LONGNVARCHAR" => Self::LongNVarchar,
            "LONGVARBINARY" => Self::LongVarbinary,
            "LONGVARCHAR" => Self::LongVarchar,
            "NCHAR" => Self::NChar,
            "NCLOB" => Self::NClob,
            "NULL" => Self::Null,
            "NUMERIC" => Self::Numeric,
            "NVARCHAR" => Self::NVarchar,
            "OTHER" => Self::Other,
            "REAL" => Self::Real,
            "REF" => Self::Ref,
            "ROWID" => Self::RowId,
            "SMALLINT" => Self::SmallInt,
            "SQLXML" => Self::SqlXml,
            "STRUCT" => Self::Struct,
            "TIME" => Self::Time,
            "TIME_WITH_TIMEZONE" => Self::TimeWithTimezone,
            "TIMESTAMP" => Self::Timestamp,
            "TIMESTAMP_WITH_TIMEZONE" => Self::TimestampWithTimezone,
            "TINYINT" => Self::TinyInt,
            "VARBINARY" => Self::Varbinary,
            "VARCHAR" => Self::Varchar,
            _ => return Err(GenError::UnknownJdbcType(s.to_string())),
        };
        Ok(jdbc_type)
    }
}

impl TryFrom<String> for JdbcType {
    type Error = GenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<JdbcType> for String {
    fn from(value: JdbcType) -> Self {
        value.name().to_string()
    }
}

/// One introspected column.
///
/// Built once from introspection output and handed to an
/// [`IntrospectedTable`](crate::IntrospectedTable), which takes ownership and
/// records itself as the owning table.
#[derive(Debug, Clone)]
pub struct IntrospectedColumn {
    actual_column_name: String,
    jdbc_type: JdbcType,
    column_name_delimited: bool,
    nullable: bool,
    large_object: bool,
    length: Option<u32>,
    scale: Option<u32>,
    identity: bool,
    auto_increment: bool,
    generated_always: bool,
    default_value: Option<String>,
    remarks: Option<String>,
    table: Option<Arc<FullyQualifiedTable>>,
}

impl IntrospectedColumn {
    /// Creates a nullable, undelimited column. The large-object flag defaults
    /// from the type.
    #[must_use]
    pub fn new(name: impl Into<String>, jdbc_type: JdbcType) -> Self {
        Self {
            actual_column_name: name.into(),
            jdbc_type,
            column_name_delimited: false,
            nullable: true,
            large_object: jdbc_type.is_large_object(),
            length: None,
            scale: None,
            identity: false,
            auto_increment: false,
            generated_always: false,
            default_value: None,
            remarks: None,
            table: None,
        }
    }

    /// Marks the column name as delimited (matched case-sensitively).
    #[must_use]
    pub fn delimited(mut self) -> Self {
        self.column_name_delimited = true;
        self
    }

    /// Sets the column as NOT NULL.
    #[must_use]
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Overrides the large-object flag derived from the type.
    #[must_use]
    pub fn large_object(mut self, large_object: bool) -> Self {
        self.large_object = large_object;
        self
    }

    /// Sets the column length (or precision).
    #[must_use]
    pub fn length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    /// Sets the numeric scale.
    #[must_use]
    pub fn scale(mut self, scale: u32) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Marks the column as an identity column.
    #[must_use]
    pub fn identity(mut self) -> Self {
        self.identity = true;
        self
    }

    /// Marks the column as auto-incrementing.
    #[must_use]
    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    /// Marks the column as generated by the database on every write.
    #[must_use]
    pub fn generated_always(mut self) -> Self {
        self.generated_always = true;
        self
    }

    /// Sets the column default expression.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Sets the column remarks.
    #[must_use]
    pub fn remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = Some(remarks.into());
        self
    }

    /// Compares a candidate name against this column's actual name:
    /// case-sensitive when delimited, case-insensitive otherwise.
    #[must_use]
    pub fn is_name_equal(&self, candidate: &str) -> bool {
        if self.column_name_delimited {
            self.actual_column_name == candidate
        } else {
            self.actual_column_name
                .chars()
                .flat_map(char::to_lowercase)
                .eq(candidate.chars().flat_map(char::to_lowercase))
        }
    }

    /// Returns true if the column belongs in the BLOB group.
    #[must_use]
    pub const fn is_large_object(&self) -> bool {
        self.large_object
    }

    /// The column name as stored in the schema.
    #[must_use]
    pub fn actual_column_name(&self) -> &str {
        &self.actual_column_name
    }

    #[must_use]
    pub const fn jdbc_type(&self) -> JdbcType {
        self.jdbc_type
    }

    #[must_use]
    pub const fn is_column_name_delimited(&self) -> bool {
        self.column_name_delimited
    }

    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }

    #[must_use]
    pub const fn length_value(&self) -> Option<u32> {
        self.length
    }

    #[must_use]
    pub const fn scale_value(&self) -> Option<u32> {
        self.scale
    }

    #[must_use]
    pub const fn is_identity(&self) -> bool {
        self.identity
    }

    #[must_use]
    pub const fn is_auto_increment(&self) -> bool {
        self.auto_increment
    }

    #[must_use]
    pub const fn is_generated_always(&self) -> bool {
        self.generated_always
    }

    #[must_use]
    pub fn default_value_expr(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    #[must_use]
    pub fn remarks_text(&self) -> Option<&str> {
        self.remarks.as_deref()
    }

    /// The property name used for this column in generated records,
    /// e.g. `createdAt` for `CREATED_AT`.
    #[must_use]
    pub fn java_property(&self) -> String {
        camel_case(&self.actual_column_name, false)
    }

    #[must_use]
    pub fn is_jdbc_date_column(&self) -> bool {
        self.jdbc_type == JdbcType::Date
    }

    #[must_use]
    pub fn is_jdbc_time_column(&self) -> bool {
        self.jdbc_type == JdbcType::Time
    }

    #[must_use]
    pub const fn is_string_column(&self) -> bool {
        self.jdbc_type.is_character()
    }

    /// The table this column was added to, if any.
    #[must_use]
    pub fn introspected_table(&self) -> Option<&FullyQualifiedTable> {
        self.table.as_deref()
    }

    pub(crate) fn set_introspected_table(&mut self, table: Arc<FullyQualifiedTable>) {
        self.table = Some(table);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undelimited_names_ignore_case() {
        let col = IntrospectedColumn::new("USER_ID", JdbcType::Integer);
        assert!(col.is_name_equal("user_id"));
        assert!(col.is_name_equal("USER_ID"));
        assert!(!col.is_name_equal("user"));
    }

    #[test]
    fn delimited_names_respect_case() {
        let col = IntrospectedColumn::new("UserId", JdbcType::Integer).delimited();
        assert!(col.is_name_equal("UserId"));
        assert!(!col.is_name_equal("userid"));
    }

    #[test]
    fn large_object_defaults_from_type() {
        assert!(IntrospectedColumn::new("body", JdbcType::Clob).is_large_object());
        assert!(IntrospectedColumn::new("data", JdbcType::LongVarbinary).is_large_object());
        assert!(!IntrospectedColumn::new("name", JdbcType::Varchar).is_large_object());
        assert!(
            IntrospectedColumn::new("doc", JdbcType::Other)
                .large_object(true)
                .is_large_object()
        );
    }

    #[test]
    fn jdbc_type_parsing() {
        assert_eq!("varchar".parse::<JdbcType>().unwrap(), JdbcType::Varchar);
        assert_eq!(
            "LONGVARBINARY".parse::<JdbcType>().unwrap(),
            JdbcType::LongVarbinary
        );
        assert!(matches!(
            "TEXTISH".parse::<JdbcType>(),
            Err(GenError::UnknownJdbcType(name)) if name == "TEXTISH"
        ));
        assert_eq!(JdbcType::TimestampWithTimezone.to_string(), "TIMESTAMP_WITH_TIMEZONE");
    }

    #[test]
    fn jdbc_type_serde_uses_names() {
        let json = serde_json::to_string(&JdbcType::NVarchar).unwrap();
        assert_eq!(json, "\"NVARCHAR\"");
        let parsed: JdbcType = serde_json::from_str("\"nclob\"").unwrap();
        assert_eq!(parsed, JdbcType::NClob);
    }

    #[test]
    fn derived_properties() {
        let col = IntrospectedColumn::new("CREATED_AT", JdbcType::Date)
            .not_null()
            .remarks("creation day");
        assert_eq!(col.java_property(), "createdAt");
        assert!(col.is_jdbc_date_column());
        assert!(!col.is_jdbc_time_column());
        assert!(!col.is_nullable());
        assert_eq!(col.remarks_text(), Some("creation day"));
        assert!(col.introspected_table().is_none());
    }
}
