use crate::PlanError;
use relgen_schema::{node::Column, node::Table, types::Relationship};
use relgen_utils::naming;
use serde::Serialize;
use std::collections::BTreeMap;

///
/// RelationPlan
///
/// Query and cascade shape for one resolved relation column. The shape is
/// structurally different per relationship kind; the renderer dispatches on
/// the `fetch`/`write`/`delete` variants rather than on the kind alone.
///

#[derive(Clone, Debug, Serialize)]
pub struct RelationPlan {
    /// Field name on the host entity, e.g. `Keywords`.
    pub field: String,
    pub target_entity: String,
    pub kind: Relationship,

    /// `<Entity>.Fetch<Relation>` routine name.
    pub fetch_one: String,

    /// `<Entities>.Fetch<Relation>` routine name (batched).
    pub fetch_many: String,

    pub fetch: FetchShape,
    pub write: WriteCascade,
    pub delete: DeleteCascade,
}

///
/// KeyPair
///
/// An equality pairing of storage columns, host side against guest side.
///

#[derive(Clone, Debug, Serialize)]
pub struct KeyPair {
    pub host: String,
    pub guest: String,
}

///
/// XrefPair
///
/// A cross-reference column paired with the addressed side's primary-key
/// storage column.
///

#[derive(Clone, Debug, Serialize)]
pub struct XrefPair {
    pub xref: String,
    pub key: String,
}

///
/// BatchFetch
///
/// Shape of the batched (many hosts) fetch: exactly one query with an
/// IN-list over `in_columns`, results partitioned back to each host row by
/// equality over `partition`. Never one query per host row.
///

#[derive(Clone, Debug, Serialize)]
pub struct BatchFetch {
    pub in_columns: Vec<String>,
    pub partition: Vec<KeyPair>,
}

///
/// FetchShape
///

#[derive(Clone, Debug, Serialize)]
pub enum FetchShape {
    /// Single-row lookup by equality on the host's foreign-key columns
    /// against the guest's primary key.
    BelongsTo {
        target_table: String,
        key: Vec<KeyPair>,
        batch: BatchFetch,
    },

    /// Single-row lookup on the guest filtered by its reciprocal
    /// foreign-key columns equal to the host's primary key.
    HasOne {
        target_table: String,
        foreign_key: Vec<KeyPair>,
    },

    /// Filtered lookup on the guest by foreign key; batched form issues one
    /// IN-list query across all host keys.
    HasMany {
        target_table: String,
        foreign_key: Vec<KeyPair>,
        batch: BatchFetch,
    },

    /// Join through the cross-reference table on both sides' primary keys.
    ManyToMany {
        target_table: String,
        xref_table: String,
        host_key: Vec<XrefPair>,
        guest_key: Vec<XrefPair>,
        batch: BatchFetch,
    },
}

///
/// WriteCascade
///

#[derive(Clone, Debug, Serialize)]
pub enum WriteCascade {
    /// Write the guest first, then copy its resulting primary key into the
    /// host's foreign-key columns before writing the host.
    GuestBeforeHost { copy: Vec<KeyPair> },

    /// Write the host first, then set the guest's foreign-key columns from
    /// the host's primary key before persisting the guest rows.
    HostBeforeGuest { set: Vec<KeyPair> },

    /// Persist guest rows (if new), then insert cross-reference rows
    /// pairing host and guest keys.
    GuestsThenXref {
        xref_table: String,
        host_columns: Vec<XrefPair>,
        guest_columns: Vec<XrefPair>,
    },
}

///
/// DeleteCascade
///
/// Mirrors the write cascade in reverse.
///

#[derive(Clone, Debug, Serialize)]
pub enum DeleteCascade {
    /// Host row removed before the guest row (BelongsTo).
    HostThenGuest,

    /// Guest rows removed before the host row (HasOne, HasMany).
    GuestThenHost,

    /// Cross-reference rows removed first; guest rows are left untouched.
    XrefThenHost { xref_table: String },
}

/// Build the relation plan for one resolved relation column.
pub(crate) fn plan_relation(
    host: &Table,
    column: &Column,
    tables: &BTreeMap<&str, &Table>,
) -> Result<RelationPlan, PlanError> {
    let target = column.target.as_deref().ok_or_else(|| PlanError::UnresolvedColumn {
        host: host.name.clone(),
        column: column.name.clone(),
    })?;
    let guest = tables
        .get(target)
        .copied()
        .ok_or_else(|| PlanError::UnknownTable {
            host: host.name.clone(),
            column: column.name.clone(),
            target: target.to_string(),
        })?;

    let (fetch, write, delete) = match column.relationship {
        Relationship::BelongsTo => belongs_to_shapes(host, column, guest)?,
        Relationship::HasOne => has_one_shapes(host, guest)?,
        Relationship::HasMany => has_many_shapes(host, guest)?,
        Relationship::ManyToMany => many_to_many_shapes(host, column, guest, tables)?,
        Relationship::None => {
            return Err(PlanError::UnresolvedColumn {
                host: host.name.clone(),
                column: column.name.clone(),
            });
        }
    };

    let entities = naming::pluralize_pascal(&host.name);

    Ok(RelationPlan {
        field: column.name.clone(),
        target_entity: guest.name.clone(),
        kind: column.relationship,
        fetch_one: format!("{}.Fetch{}", host.name, column.name),
        fetch_many: format!("{entities}.Fetch{}", column.name),
        fetch,
        write,
        delete,
    })
}

fn belongs_to_shapes(
    host: &Table,
    column: &Column,
    guest: &Table,
) -> Result<(FetchShape, WriteCascade, DeleteCascade), PlanError> {
    // promotion guaranteed a full foreign-key set named <Field><PKName>
    let key = pair_keys(host, &column.name, guest)?;
    let batch = BatchFetch {
        in_columns: key.iter().map(|p| p.guest.clone()).collect(),
        partition: key.clone(),
    };

    Ok((
        FetchShape::BelongsTo {
            target_table: guest.storage_name.clone(),
            key: key.clone(),
            batch,
        },
        WriteCascade::GuestBeforeHost { copy: key },
        DeleteCascade::HostThenGuest,
    ))
}

fn has_one_shapes(
    host: &Table,
    guest: &Table,
) -> Result<(FetchShape, WriteCascade, DeleteCascade), PlanError> {
    let foreign_key = pair_reciprocal_keys(host, guest)?;

    Ok((
        FetchShape::HasOne {
            target_table: guest.storage_name.clone(),
            foreign_key: foreign_key.clone(),
        },
        WriteCascade::HostBeforeGuest { set: foreign_key },
        DeleteCascade::GuestThenHost,
    ))
}

fn has_many_shapes(
    host: &Table,
    guest: &Table,
) -> Result<(FetchShape, WriteCascade, DeleteCascade), PlanError> {
    let foreign_key = pair_reciprocal_keys(host, guest)?;
    let batch = BatchFetch {
        in_columns: foreign_key.iter().map(|p| p.guest.clone()).collect(),
        partition: foreign_key.clone(),
    };

    Ok((
        FetchShape::HasMany {
            target_table: guest.storage_name.clone(),
            foreign_key: foreign_key.clone(),
            batch,
        },
        WriteCascade::HostBeforeGuest { set: foreign_key },
        DeleteCascade::GuestThenHost,
    ))
}

fn many_to_many_shapes(
    host: &Table,
    column: &Column,
    guest: &Table,
    tables: &BTreeMap<&str, &Table>,
) -> Result<(FetchShape, WriteCascade, DeleteCascade), PlanError> {
    let xref_name = column.xref.as_deref().ok_or_else(|| PlanError::UnresolvedColumn {
        host: host.name.clone(),
        column: column.name.clone(),
    })?;

    // the xref table may exist in the catalog or be implied by symmetric
    // foreign keys; either way its storage name follows the same convention
    let xref_table = tables
        .get(xref_name)
        .map_or_else(|| naming::table_storage_name(xref_name), |t| t.storage_name.clone());

    let host_key = xref_pairs(host);
    let guest_key = xref_pairs(guest);
    let batch = BatchFetch {
        in_columns: host_key.iter().map(|p| p.xref.clone()).collect(),
        partition: host_key
            .iter()
            .map(|p| KeyPair {
                host: p.key.clone(),
                guest: p.xref.clone(),
            })
            .collect(),
    };

    Ok((
        FetchShape::ManyToMany {
            target_table: guest.storage_name.clone(),
            xref_table: xref_table.clone(),
            host_key: host_key.clone(),
            guest_key: guest_key.clone(),
            batch,
        },
        WriteCascade::GuestsThenXref {
            xref_table: xref_table.clone(),
            host_columns: host_key,
            guest_columns: guest_key,
        },
        DeleteCascade::XrefThenHost { xref_table },
    ))
}

// Host foreign-key columns <Prefix><PKName> paired against the guest's
// primary keys, both as storage names.
fn pair_keys(host: &Table, prefix: &str, guest: &Table) -> Result<Vec<KeyPair>, PlanError> {
    guest
        .primary_keys()
        .map(|pk| {
            let fk_field = format!("{prefix}{}", pk.name);
            let fk = host
                .column(&fk_field)
                .ok_or_else(|| PlanError::MissingForeignKey {
                    host: host.name.clone(),
                    column: fk_field,
                })?;

            Ok(KeyPair {
                host: fk.storage_name.clone(),
                guest: pk.storage_name.clone(),
            })
        })
        .collect()
}

// Host primary keys paired against the guest's reciprocal foreign-key
// columns <HostName><PKName>, both as storage names.
fn pair_reciprocal_keys(host: &Table, guest: &Table) -> Result<Vec<KeyPair>, PlanError> {
    host.primary_keys()
        .map(|pk| {
            let fk_field = format!("{}{}", host.name, pk.name);
            let fk = guest
                .column(&fk_field)
                .ok_or_else(|| PlanError::MissingForeignKey {
                    host: guest.name.clone(),
                    column: fk_field,
                })?;

            Ok(KeyPair {
                host: pk.storage_name.clone(),
                guest: fk.storage_name.clone(),
            })
        })
        .collect()
}

// Cross-reference columns for one side, named <entity>_<pk> by convention.
fn xref_pairs(side: &Table) -> Vec<XrefPair> {
    side.primary_keys()
        .map(|pk| XrefPair {
            xref: format!("{}_{}", naming::to_snake(&side.name), pk.storage_name),
            key: pk.storage_name.clone(),
        })
        .collect()
}
