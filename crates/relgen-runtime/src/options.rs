use crate::error::CallError;
use serde::{Deserialize, Serialize};

///
/// CallOptions
///
/// Options accepted by every generated routine, generic over the caller's
/// connection handle type. All fields are optional; generated code falls
/// back to its own defaults where one is absent.
///

#[derive(Clone, Debug, Default)]
pub struct CallOptions<Db> {
    pub db: Option<Db>,
    pub selects: Option<Selects>,
    pub sql: Option<SqlOverride>,
    pub includes: Option<Includes>,
}

impl<Db> CallOptions<Db> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            db: None,
            selects: None,
            sql: None,
            includes: None,
        }
    }

    #[must_use]
    pub fn with_db(mut self, db: Db) -> Self {
        self.db = Some(db);
        self
    }

    #[must_use]
    pub fn with_selects(mut self, selects: Selects) -> Self {
        self.selects = Some(selects);
        self
    }

    #[must_use]
    pub fn with_sql(mut self, sql: SqlOverride) -> Self {
        self.sql = Some(sql);
        self
    }

    #[must_use]
    pub fn with_includes(mut self, includes: Includes) -> Self {
        self.includes = Some(includes);
        self
    }

    /// Resolve the connection handle, falling back to the routine's
    /// default. Missing both is a configuration error.
    pub fn db<'a>(&'a self, default: Option<&'a Db>) -> Result<&'a Db, CallError> {
        self.db
            .as_ref()
            .or(default)
            .ok_or(CallError::MissingConnection)
    }
}

///
/// Selects
///
/// Explicit column-selection list. Generated routines check every entry
/// against the table's column constants before building a query.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Selects(pub Vec<String>);

impl Selects {
    #[must_use]
    pub fn new(columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self(columns.into_iter().map(Into::into).collect())
    }

    /// Reject any selected column the table does not know about.
    pub fn check_against(&self, known: &[&str]) -> Result<(), CallError> {
        for column in &self.0 {
            if !known.contains(&column.as_str()) {
                return Err(CallError::UnknownColumn(column.clone()));
            }
        }

        Ok(())
    }
}

///
/// SqlOverride
///
/// Raw query override. A partial override is appended to the generated
/// query; a full override replaces it entirely.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct SqlOverride {
    pub sql: String,
    pub args: Vec<String>,
    pub full: bool,
}

impl SqlOverride {
    #[must_use]
    pub fn partial(sql: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            sql: sql.into(),
            args,
            full: false,
        }
    }

    #[must_use]
    pub fn full(sql: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            sql: sql.into(),
            args,
            full: true,
        }
    }
}

///
/// Includes
///
/// Recursive relation-inclusion directive: which related tables a routine
/// should fetch or write along with the host rows, to arbitrary depth.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Includes(pub Vec<Include>);

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Include {
    pub relation: String,

    #[serde(default)]
    pub nested: Includes,
}

impl Includes {
    #[must_use]
    pub fn one(relation: impl Into<String>) -> Self {
        Self(vec![Include {
            relation: relation.into(),
            nested: Self::default(),
        }])
    }

    #[must_use]
    pub fn get(&self, relation: &str) -> Option<&Include> {
        self.0.iter().find(|i| i.relation == relation)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Include {
    #[must_use]
    pub fn nested(relation: impl Into<String>, nested: Includes) -> Self {
        Self {
            relation: relation.into(),
            nested,
        }
    }
}
