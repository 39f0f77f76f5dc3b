use serde::Serialize;

///
/// Routine
///
/// One persistence routine the renderer must stamp out for a table, with
/// its externally visible name under the fixed naming contract.
///

#[derive(Clone, Debug, Serialize)]
pub struct Routine {
    pub kind: RoutineKind,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guard: Option<Guard>,
}

///
/// RoutineKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum RoutineKind {
    Delete,
    DeleteMany,
    Duplicate,
    FindMany,
    FindOne,
    First,
    Insert,
    InsertMany,
    IsEmptyRow,
    IsNewRow,
    Last,
    Update,
    UpdateColumns,
    UpdateMany,
    ZeroPrimaryKeys,
}

impl RoutineKind {
    /// Every kind emitted for every table, in a stable order.
    pub const ALL: &'static [Self] = &[
        Self::FindOne,
        Self::FindMany,
        Self::First,
        Self::Last,
        Self::Insert,
        Self::InsertMany,
        Self::Update,
        Self::UpdateMany,
        Self::UpdateColumns,
        Self::Delete,
        Self::DeleteMany,
        Self::IsNewRow,
        Self::IsEmptyRow,
        Self::Duplicate,
        Self::ZeroPrimaryKeys,
    ];

    /// Routine name under the fixed contract, e.g. `FindLanguage`,
    /// `FindLanguages`, `Language.UpdateColumns`.
    #[must_use]
    pub fn routine_name(self, entity: &str, entities: &str) -> String {
        match self {
            Self::Delete => format!("{entity}.Delete"),
            Self::DeleteMany => format!("{entities}.Delete"),
            Self::Duplicate => format!("{entity}.Duplicate"),
            Self::FindMany => format!("Find{entities}"),
            Self::FindOne => format!("Find{entity}"),
            Self::First => format!("First{entity}"),
            Self::Insert => format!("{entity}.Insert"),
            Self::InsertMany => format!("{entities}.Insert"),
            Self::IsEmptyRow => format!("{entity}.IsEmptyRow"),
            Self::IsNewRow => format!("{entity}.IsNewRow"),
            Self::Last => format!("Last{entity}"),
            Self::Update => format!("{entity}.Update"),
            Self::UpdateColumns => format!("{entity}.UpdateColumns"),
            Self::UpdateMany => format!("{entities}.Update"),
            Self::ZeroPrimaryKeys => format!("{entity}.ZeroPrimaryKeys"),
        }
    }
}

///
/// Guard
///
/// Precondition the renderer must emit ahead of a routine body.
///

#[derive(Clone, Debug, Serialize)]
pub enum Guard {
    /// "New" detection: every listed primary-key column equals its zero
    /// value. An empty list means the table has no primary key at all and
    /// the routine must always fail with the unsaved-entity error.
    RejectUnsavedEntity { zero_value_keys: Vec<String> },
}
