//! ## Crate layout
//! - `build`: code-shape selector, generation plan, and the pipeline entry.
//! - `runtime`: call-time option surface consumed by generated routines.
//! - `schema`: type-catalog model, schema builder, and relationship resolver.
//! - `utils`: case conversion and pluralization helpers.
//!
//! `generate` is the whole pipeline: hand it a loaded type catalog and it
//! returns the per-table generation plan for a template backend.

pub use relgen_build as build;
pub use relgen_runtime as runtime;
pub use relgen_schema as schema;
pub use relgen_utils as utils;

pub use relgen_build::{Error, GenerationPlan, generate};

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use crate::build::{GenerationPlan, RelationPlan, RoutineKind, TablePlan, generate};
    pub use crate::runtime::{CallError, CallOptions, Includes, Selects, SqlOverride};
    pub use crate::schema::{
        catalog::{EntityDef, FieldDef, TypeCatalog, TypeExpr},
        types::Relationship,
    };
}
