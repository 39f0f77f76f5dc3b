use crate::TABLE_NAME_SUFFIX;
use serde::Serialize;
use std::collections::BTreeMap;

///
/// TypeCatalog
///
/// The upstream input to a generation run: ordered entity definitions plus
/// the string constants declared alongside them. Loading and parsing raw
/// type-definition source is the loader's job; this crate only consumes the
/// typed descriptors.
///

#[derive(Clone, Debug, Default, Serialize)]
pub struct TypeCatalog {
    pub entities: Vec<EntityDef>,
    pub constants: BTreeMap<String, String>,
}

impl TypeCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_entity(&mut self, entity: EntityDef) {
        self.entities.push(entity);
    }

    pub fn set_constant(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.constants.insert(name.into(), value.into());
    }

    /// Explicit storage-name override for an entity, if a
    /// `<Entity>TableName` constant was declared.
    #[must_use]
    pub fn storage_name_override(&self, entity: &str) -> Option<&str> {
        self.constants
            .get(&format!("{entity}{TABLE_NAME_SUFFIX}"))
            .map(String::as_str)
    }
}

///
/// EntityDef
///

#[derive(Clone, Debug, Serialize)]
pub struct EntityDef {
    pub ident: String,
    pub fields: Vec<FieldDef>,
}

impl EntityDef {
    #[must_use]
    pub fn new(ident: impl Into<String>) -> Self {
        Self {
            ident: ident.into(),
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }
}

///
/// FieldDef
///

#[derive(Clone, Debug, Serialize)]
pub struct FieldDef {
    pub ident: String,
    pub ty: TypeExpr,

    /// Raw comma-separated annotation string, possibly empty.
    pub annotation: String,
}

impl FieldDef {
    #[must_use]
    pub fn new(ident: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            ident: ident.into(),
            ty,
            annotation: String::new(),
        }
    }

    #[must_use]
    pub fn annotated(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = annotation.into();
        self
    }
}

///
/// TypeExpr
///
/// Declared shape of a field. A closed variant so every consumer handles
/// all shapes exhaustively.
///

#[derive(Clone, Debug, Serialize)]
pub enum TypeExpr {
    /// A non-entity type (numeric, text, time, external struct...).
    Scalar(String),

    /// A reference to another entity in the catalog, by name.
    Entity(String),

    /// A pointer to an inner type; carries nullable semantics.
    Pointer(Box<TypeExpr>),

    /// A slice or array of an inner type.
    List(Box<TypeExpr>),
}

impl TypeExpr {
    #[must_use]
    pub fn scalar(name: impl Into<String>) -> Self {
        Self::Scalar(name.into())
    }

    #[must_use]
    pub fn entity(name: impl Into<String>) -> Self {
        Self::Entity(name.into())
    }

    #[must_use]
    pub fn pointer(inner: Self) -> Self {
        Self::Pointer(Box::new(inner))
    }

    #[must_use]
    pub fn list(inner: Self) -> Self {
        Self::List(Box::new(inner))
    }
}
