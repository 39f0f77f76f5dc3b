use thiserror::Error as ThisError;

///
/// CallError
///
/// Configuration errors a generated routine can report at call time. All
/// of these are fatal to the call that raised them.
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum CallError {
    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    #[error("no connection handle configured for this call")]
    MissingConnection,

    #[error("cannot update unsaved entity: every primary-key column is zero-valued")]
    UnsavedEntity,
}
