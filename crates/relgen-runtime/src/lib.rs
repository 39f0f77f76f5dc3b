//! Call-time support for generated persistence routines.
//!
//! The generator decides what shape each routine takes; this crate carries
//! the configuration surface those routines accept when called — a
//! connection handle, an explicit column selection, a raw query override,
//! and a nested relation-inclusion directive. It performs no I/O itself.

mod error;
mod options;
mod rows;

pub use error::CallError;
pub use options::{CallOptions, Include, Includes, Selects, SqlOverride};
pub use rows::finish;
