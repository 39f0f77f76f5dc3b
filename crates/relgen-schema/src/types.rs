use derive_more::{Display, FromStr};
use serde::{Deserialize, Serialize};

///
/// ColumnShape
///
/// Structural classification of a column, fixed at build time. A closed
/// variant so builder, resolver, and selector all match exhaustively.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, FromStr, PartialEq, Serialize)]
pub enum ColumnShape {
    /// Plain value column; never participates in relationship resolution.
    #[default]
    Scalar,

    /// Single entity or pointer-to-entity.
    SingleReference,

    /// Slice or array of entities.
    CollectionReference,
}

impl ColumnShape {
    #[must_use]
    pub const fn is_reference(self) -> bool {
        matches!(self, Self::SingleReference | Self::CollectionReference)
    }
}

///
/// Relationship
///
/// Written exactly twice per column: a preliminary guess from shape alone
/// at build time, then the final classification from global evidence at
/// resolution time.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, FromStr, PartialEq, Serialize)]
pub enum Relationship {
    #[default]
    None,

    /// Host carries foreign-key columns addressing the guest's primary key.
    BelongsTo,

    /// Guest carries a foreign-key column back to the host, single row.
    HasOne,

    /// Guest carries a foreign-key column back to the host, many rows.
    HasMany,

    /// Association mediated by a cross-reference table.
    ManyToMany,
}

impl Relationship {
    #[must_use]
    pub const fn is_relation(self) -> bool {
        !matches!(self, Self::None)
    }
}
