use crate::{relation::RelationPlan, routine::Routine};
use serde::Serialize;

///
/// GenerationPlan
///
/// The resolved, per-table set of routines and relation shapes handed to
/// the template renderer. The model it was derived from is discarded once
/// this is emitted.
///

#[derive(Clone, Debug, Serialize)]
pub struct GenerationPlan {
    pub tables: Vec<TablePlan>,
}

impl GenerationPlan {
    /// Render the plan as JSON for out-of-process template backends.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

///
/// TablePlan
///

#[derive(Clone, Debug, Serialize)]
pub struct TablePlan {
    /// Entity name, e.g. `Language`.
    pub entity: String,

    /// Pluralized entity name used by bulk routine names, e.g. `Languages`.
    pub entities: String,

    pub storage_name: String,
    pub has_custom_storage_name: bool,

    /// False when the table has no primary key; keyed update/delete
    /// routines must always fail for such tables.
    pub update_safe: bool,

    /// Primary-key storage names in declaration order.
    pub primary_keys: Vec<String>,

    /// Storage name of the auto-increment column, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_column: Option<String>,

    pub constants: Vec<ColumnConstant>,
    pub routines: Vec<Routine>,
    pub relations: Vec<RelationPlan>,
}

///
/// ColumnConstant
///
/// A named storage-name constant emitted alongside the table's routines,
/// e.g. `LanguageColumnName = "name"`.
///

#[derive(Clone, Debug, Serialize)]
pub struct ColumnConstant {
    pub ident: String,
    pub value: String,
}
