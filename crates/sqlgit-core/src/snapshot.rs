//! Schema snapshot types.
//!
//! A [`Snapshot`] maps table names to [`TableSpec`]s, and a table is an
//! ordered list of [`ColumnSpec`]s in the order the engine reports them.
//! The serialized form of a column uses the field names of a MySQL
//! `DESCRIBE` record (`Field`, `Type`, `Null`, `Key`, `Default`, `Extra`)
//! so a stored snapshot reads like the introspection output it came from.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, SnapshotError};

/// `Extra` marker MySQL 8 reports for a column whose default is an
/// expression rather than a literal.
pub const DEFAULT_GENERATED: &str = "DEFAULT_GENERATED";

/// How a column participates in an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum KeyKind {
    /// Not indexed.
    #[default]
    #[serde(rename = "")]
    None,
    /// Primary key.
    #[serde(rename = "PRI")]
    Primary,
    /// Unique index.
    #[serde(rename = "UNI")]
    Unique,
    /// Non-unique index.
    #[serde(rename = "MUL")]
    Indexed,
}

impl KeyKind {
    /// Returns the introspection code for this key kind.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Primary => "PRI",
            Self::Unique => "UNI",
            Self::Indexed => "MUL",
        }
    }

    /// Returns true unless this is [`KeyKind::None`].
    #[must_use]
    pub const fn is_indexed(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl FromStr for KeyKind {
    type Err = SnapshotError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "" => Ok(Self::None),
            "PRI" => Ok(Self::Primary),
            "UNI" => Ok(Self::Unique),
            "MUL" => Ok(Self::Indexed),
            other => Err(SnapshotError::UnknownKey(other.to_string())),
        }
    }
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Parses a `Null` field (`YES` / `NO`) into a nullability flag.
pub fn parse_nullability(value: &str) -> Result<bool> {
    match value {
        "YES" => Ok(true),
        "NO" => Ok(false),
        other => Err(SnapshotError::InvalidNullability(other.to_string())),
    }
}

/// Metadata for a single column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Column name.
    #[serde(rename = "Field")]
    pub name: String,
    /// Raw engine type expression, e.g. `varchar(255)`.
    #[serde(rename = "Type")]
    pub column_type: String,
    /// Whether the column accepts NULL.
    #[serde(rename = "Null", with = "yes_no")]
    pub nullable: bool,
    /// Index participation.
    #[serde(rename = "Key", default)]
    pub key_kind: KeyKind,
    /// Default value. Never `Some("")`.
    #[serde(rename = "Default", default, deserialize_with = "empty_as_none")]
    pub default_value: Option<String>,
    /// Engine-specific modifier such as `auto_increment`. Never `Some("")`.
    #[serde(rename = "Extra", default, deserialize_with = "empty_as_none")]
    pub extra: Option<String>,
}

impl ColumnSpec {
    /// Creates a nullable, unindexed column with no default and no extra.
    #[must_use]
    pub fn new(name: impl Into<String>, column_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: column_type.into(),
            nullable: true,
            key_kind: KeyKind::None,
            default_value: None,
            extra: None,
        }
    }

    /// Builds a column from the six fields of a `DESCRIBE` record.
    pub fn from_describe(
        field: &str,
        column_type: &str,
        null: &str,
        key: &str,
        default_value: Option<&str>,
        extra: Option<&str>,
    ) -> Result<Self> {
        Ok(Self {
            name: field.to_string(),
            column_type: column_type.to_string(),
            nullable: parse_nullability(null)?,
            key_kind: key.parse()?,
            default_value: non_empty(default_value),
            extra: non_empty(extra),
        })
    }

    /// Sets the column as NOT NULL.
    #[must_use]
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Sets the default value. An empty string clears it.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = non_empty(Some(value.into().as_str()));
        self
    }

    /// Sets the engine modifier. An empty string clears it.
    #[must_use]
    pub fn extra(mut self, value: impl Into<String>) -> Self {
        self.extra = non_empty(Some(value.into().as_str()));
        self
    }

    /// Sets the key kind.
    #[must_use]
    pub fn key(mut self, key_kind: KeyKind) -> Self {
        self.key_kind = key_kind;
        self
    }

    /// Marks the column as the primary key. Primary keys are NOT NULL.
    #[must_use]
    pub fn primary_key(self) -> Self {
        self.key(KeyKind::Primary).not_null()
    }

    /// Marks the column as carrying a unique index.
    #[must_use]
    pub fn unique(self) -> Self {
        self.key(KeyKind::Unique)
    }

    /// Marks the column as carrying a non-unique index.
    #[must_use]
    pub fn indexed(self) -> Self {
        self.key(KeyKind::Indexed)
    }

    /// Whether the default is an expression such as `uuid()`, i.e. `Extra`
    /// carries the [`DEFAULT_GENERATED`] marker.
    #[must_use]
    pub fn has_expression_default(&self) -> bool {
        self.extra
            .as_deref()
            .is_some_and(|e| e.split_whitespace().any(|w| w == DEFAULT_GENERATED))
    }

    /// `Extra` as it belongs in a column definition: the
    /// [`DEFAULT_GENERATED`] marker is informational and not valid DDL.
    #[must_use]
    pub fn definition_extra(&self) -> Option<String> {
        let extra = self.extra.as_deref()?;
        let words: Vec<&str> = extra
            .split_whitespace()
            .filter(|w| *w != DEFAULT_GENERATED)
            .collect();
        non_empty(Some(words.join(" ").as_str()))
    }

    /// Returns true if any attribute other than the name differs.
    #[must_use]
    pub fn differs_from(&self, other: &Self) -> bool {
        self.column_type != other.column_type
            || self.nullable != other.nullable
            || self.default_value != other.default_value
            || self.extra != other.extra
            || self.key_kind != other.key_kind
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

fn empty_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(non_empty(value.as_deref()))
}

mod yes_no {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(nullable: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *nullable { "YES" } else { "NO" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let value = String::deserialize(deserializer)?;
        super::parse_nullability(&value).map_err(D::Error::custom)
    }
}

/// The columns of one table, in engine order.
///
/// Always non-empty and free of duplicate names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ColumnSpec>", into = "Vec<ColumnSpec>")]
pub struct TableSpec {
    columns: Vec<ColumnSpec>,
}

impl TableSpec {
    /// Creates a table from columns in engine order.
    pub fn new(columns: Vec<ColumnSpec>) -> Result<Self> {
        if columns.is_empty() {
            return Err(SnapshotError::EmptyTable);
        }
        for (i, column) in columns.iter().enumerate() {
            if columns[..i].iter().any(|c| c.name == column.name) {
                return Err(SnapshotError::DuplicateColumn(column.name.clone()));
            }
        }
        Ok(Self { columns })
    }

    /// Columns in engine order.
    #[must_use]
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Looks up a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Number of columns; never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Always false, kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl TryFrom<Vec<ColumnSpec>> for TableSpec {
    type Error = SnapshotError;

    fn try_from(columns: Vec<ColumnSpec>) -> Result<Self> {
        Self::new(columns)
    }
}

impl From<TableSpec> for Vec<ColumnSpec> {
    fn from(table: TableSpec) -> Self {
        table.columns
    }
}

/// A whole schema at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    tables: BTreeMap<String, TableSpec>,
}

impl Snapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a table, replacing any table of the same name.
    #[must_use]
    pub fn table(mut self, name: impl Into<String>, table: TableSpec) -> Self {
        self.tables.insert(name.into(), table);
        self
    }

    /// Gets a table by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TableSpec> {
        self.tables.get(name)
    }

    /// Returns whether a table exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Iterates tables in name order.
    pub fn tables(&self) -> impl Iterator<Item = (&str, &TableSpec)> {
        self.tables.iter().map(|(name, table)| (name.as_str(), table))
    }

    /// Number of tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns true if the snapshot has no tables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl FromIterator<(String, TableSpec)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (String, TableSpec)>>(iter: I) -> Self {
        Self {
            tables: iter.into_iter().collect(),
        }
    }
}
