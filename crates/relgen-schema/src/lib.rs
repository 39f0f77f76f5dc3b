pub mod annotation;
pub mod build;
pub mod catalog;
pub mod error;
pub mod node;
pub mod resolve;
pub mod types;
pub mod validate;

use crate::error::ErrorTree;
use thiserror::Error as ThisError;

/// Suffix of a catalog constant that overrides an entity's storage name.
pub const TABLE_NAME_SUFFIX: &str = "TableName";

/// Suffix of a cross-reference table name recognized by the resolver.
pub const XREF_SUFFIX: &str = "Xref";

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        catalog::{EntityDef, FieldDef, TypeCatalog, TypeExpr},
        err,
        error::ErrorTree,
        node::{Column, Table},
        types::{ColumnShape, Relationship},
    };
    pub use serde::{Deserialize, Serialize};
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("validation failed: {0}")]
    Validation(ErrorTree),
}
