use crate::node::Column;
use serde::Serialize;

///
/// Table
///
/// Resolved schema entity derived from one type definition. Created once
/// per generation run, mutated only by the two analysis passes, and
/// discarded after the generation plan is emitted.
///

#[derive(Clone, Debug, Serialize)]
pub struct Table {
    pub name: String,
    pub storage_name: String,
    pub has_custom_storage_name: bool,

    /// Field name of the single auto-increment column, if any. Unrelated
    /// to primary-key count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_column: Option<String>,

    pub columns: Vec<Column>,
}

impl Table {
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Primary-key columns in declaration order. Order matters for
    /// composite-key SQL generation.
    pub fn primary_keys(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.is_primary_key)
    }

    #[must_use]
    pub fn primary_key_count(&self) -> usize {
        self.primary_keys().count()
    }

    /// A table with no primary key cannot be addressed by key and is
    /// unsafe to update or delete.
    #[must_use]
    pub fn is_update_safe(&self) -> bool {
        self.primary_key_count() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ColumnShape, Relationship};

    fn column(name: &str, pk: bool) -> Column {
        Column {
            name: name.to_string(),
            storage_name: name.to_lowercase(),
            is_primary_key: pk,
            is_pointer: false,
            shape: ColumnShape::Scalar,
            relationship: Relationship::None,
            target: None,
            xref: None,
        }
    }

    #[test]
    fn primary_keys_keep_declaration_order() {
        let table = Table {
            name: "Booking".to_string(),
            storage_name: "bookings".to_string(),
            has_custom_storage_name: false,
            id_column: None,
            columns: vec![
                column("RoomID", true),
                column("Label", false),
                column("GuestID", true),
            ],
        };

        let pks: Vec<&str> = table.primary_keys().map(|c| c.name.as_str()).collect();
        assert_eq!(pks, ["RoomID", "GuestID"]);
        assert!(table.is_update_safe());
    }

    #[test]
    fn zero_primary_keys_is_update_unsafe() {
        let table = Table {
            name: "AuditLine".to_string(),
            storage_name: "audit_lines".to_string(),
            has_custom_storage_name: false,
            id_column: None,
            columns: vec![column("Message", false)],
        };

        assert!(!table.is_update_safe());
    }
}
