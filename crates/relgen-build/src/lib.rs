mod plan;
mod relation;
mod routine;

pub use plan::{ColumnConstant, GenerationPlan, TablePlan};
pub use relation::{
    BatchFetch, DeleteCascade, FetchShape, KeyPair, RelationPlan, WriteCascade, XrefPair,
};
pub use routine::{Guard, Routine, RoutineKind};

use derive_more::Display;
use relgen_schema::{
    build::build_table,
    catalog::TypeCatalog,
    node::Table,
    resolve::resolve,
    validate::validate_tables,
};
use relgen_utils::naming;
use std::collections::BTreeMap;
use thiserror::Error as ThisError;
use tracing::debug;

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] relgen_schema::Error),

    #[error(transparent)]
    Plan(#[from] PlanError),
}

///
/// PlanError
///
/// Internal consistency failures between the resolved model and the shape
/// selector. These indicate a resolver bug, not bad input, but they still
/// abort the run instead of panicking.
///

#[derive(Debug, ThisError)]
pub enum PlanError {
    #[error("{host}.{column}: relation column carries no usable resolution")]
    UnresolvedColumn { host: String, column: String },

    #[error("{host}.{column}: target table '{target}' missing from the resolved set")]
    UnknownTable {
        host: String,
        column: String,
        target: String,
    },

    #[error("{host}: expected foreign-key column '{column}' is missing")]
    MissingForeignKey { host: String, column: String },
}

///
/// Stage
///
/// Generation pipeline state machine. No backward transitions; a failure at
/// any stage aborts the whole run with nothing emitted.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Stage {
    Loaded,
    Modeled,
    Resolved,
    Planned,
    Emitted,
}

/// Run the full generation pipeline over a type catalog and produce the
/// plan the template renderer consumes.
pub fn generate(catalog: &TypeCatalog) -> Result<GenerationPlan, Error> {
    debug!(stage = %Stage::Loaded, entities = catalog.entities.len(), "catalog loaded");

    // per-entity modeling; no cross-entity dependency
    let modeled: Vec<Table> = catalog
        .entities
        .iter()
        .map(|entity| build_table(entity, catalog))
        .collect();
    debug!(stage = %Stage::Modeled, tables = modeled.len(), "entities modeled");

    // global resolution requires the complete set as a read-only snapshot
    let resolved = resolve(&modeled);
    validate_tables(&resolved).map_err(relgen_schema::Error::Validation)?;
    debug!(stage = %Stage::Resolved, "relationships resolved");

    let tables = resolved
        .iter()
        .map(|table| plan_table(table, &resolved))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(stage = %Stage::Planned, "generation plan selected");

    Ok(GenerationPlan { tables })
}

/// Select the routine set and relation shapes for one resolved table.
pub fn plan_table(table: &Table, all: &[Table]) -> Result<TablePlan, PlanError> {
    let by_name: BTreeMap<&str, &Table> = all.iter().map(|t| (t.name.as_str(), t)).collect();
    let entities = naming::pluralize_pascal(&table.name);

    let primary_keys: Vec<String> = table
        .primary_keys()
        .map(|pk| pk.storage_name.clone())
        .collect();

    let constants = table
        .columns
        .iter()
        .map(|column| ColumnConstant {
            ident: format!("{}Column{}", table.name, column.name),
            value: column.storage_name.clone(),
        })
        .collect();

    let routines = RoutineKind::ALL
        .iter()
        .map(|&kind| Routine {
            kind,
            name: kind.routine_name(&table.name, &entities),
            guard: (kind == RoutineKind::UpdateColumns).then(|| Guard::RejectUnsavedEntity {
                zero_value_keys: primary_keys.clone(),
            }),
        })
        .collect();

    let relations = table
        .columns
        .iter()
        .filter(|column| column.is_relation())
        .map(|column| relation::plan_relation(table, column, &by_name))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TablePlan {
        entity: table.name.clone(),
        entities,
        storage_name: table.storage_name.clone(),
        has_custom_storage_name: table.has_custom_storage_name,
        update_safe: table.is_update_safe(),
        primary_keys,
        id_column: table
            .id_column
            .as_deref()
            .and_then(|field| table.column(field))
            .map(|column| column.storage_name.clone()),
        constants,
        routines,
        relations,
    })
}
