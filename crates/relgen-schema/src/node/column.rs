use crate::types::{ColumnShape, Relationship};
use serde::Serialize;

///
/// Column
///
/// Resolved schema field derived from one type-definition field. The
/// `target` and `xref` references are weak, by table name; the resolver
/// looks them up in the snapshot and never owns the target's lifetime.
///

#[derive(Clone, Debug, Serialize)]
pub struct Column {
    pub name: String,
    pub storage_name: String,
    pub is_primary_key: bool,

    /// Pointer-shaped in the source definition; nullable semantics.
    pub is_pointer: bool,

    pub shape: ColumnShape,
    pub relationship: Relationship,

    /// Referenced table name for reference-shaped columns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    /// Cross-reference table name, set when a ManyToMany classification
    /// goes through one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xref: Option<String>,
}

impl Column {
    /// True once the final classification marks this column as a usable
    /// relation.
    #[must_use]
    pub const fn is_relation(&self) -> bool {
        self.relationship.is_relation()
    }
}
