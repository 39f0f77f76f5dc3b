use crate::{
    annotation::Annotation,
    catalog::{EntityDef, TypeCatalog, TypeExpr},
    node::{Column, Table},
    types::{ColumnShape, Relationship},
};
use relgen_utils::naming;
use tracing::warn;

///
/// Schema Model Builder
///
/// Per-entity pass: converts one entity's ordered field list into a Table
/// with preliminary relationship guesses. No cross-table information is
/// used or available here; the resolver runs once every entity is built.
///

#[must_use]
pub fn build_table(entity: &EntityDef, catalog: &TypeCatalog) -> Table {
    let (storage_name, has_custom_storage_name) = match catalog.storage_name_override(&entity.ident)
    {
        Some(name) => (name.to_string(), true),
        None => (naming::table_storage_name(&entity.ident), false),
    };

    let mut table = Table {
        name: entity.ident.clone(),
        storage_name,
        has_custom_storage_name,
        id_column: None,
        columns: Vec::new(),
    };

    for field in &entity.fields {
        let annotation = Annotation::parse(&field.annotation);
        if annotation.ignore {
            continue;
        }

        let storage_name = annotation
            .storage_name
            .clone()
            .unwrap_or_else(|| naming::column_storage_name(&field.ident));

        if annotation.id {
            table.id_column = Some(field.ident.clone());
        }

        let mut classified = classify(&entity.ident, &field.ident, &field.ty);
        if annotation.inline && classified.shape.is_reference() {
            // inline suppresses relationship treatment only; flattening the
            // referenced fields is not this pass's job
            classified = Classified::scalar();
        }

        table.columns.push(Column {
            name: field.ident.clone(),
            storage_name,
            is_primary_key: annotation.primary_key,
            is_pointer: matches!(field.ty, TypeExpr::Pointer(_)),
            shape: classified.shape,
            relationship: classified.preliminary,
            target: classified.target,
            xref: None,
        });
    }

    table
}

///
/// Classified
///
/// Outcome of shape classification for a single field type.
///

struct Classified {
    shape: ColumnShape,
    preliminary: Relationship,
    target: Option<String>,
}

impl Classified {
    const fn scalar() -> Self {
        Self {
            shape: ColumnShape::Scalar,
            preliminary: Relationship::None,
            target: None,
        }
    }
}

// Classify a field type into a column shape with a preliminary relationship
// guess. Pointer-of-pointer is an invalid shape: warn and keep the field as
// a scalar.
fn classify(entity: &str, field: &str, ty: &TypeExpr) -> Classified {
    match ty {
        TypeExpr::Scalar(_) => Classified::scalar(),
        TypeExpr::Entity(name) => Classified {
            shape: ColumnShape::SingleReference,
            preliminary: Relationship::HasOne,
            target: Some(name.clone()),
        },
        TypeExpr::Pointer(inner) => {
            if matches!(inner.as_ref(), TypeExpr::Pointer(_)) {
                warn!("{entity}.{field}: pointer of pointer is not supported, treating as scalar");
                return Classified::scalar();
            }

            classify(entity, field, inner)
        }
        TypeExpr::List(inner) => {
            let element = classify(entity, field, inner);
            match element.target {
                Some(target) => Classified {
                    shape: ColumnShape::CollectionReference,
                    preliminary: Relationship::HasMany,
                    target: Some(target),
                },
                None => Classified::scalar(),
            }
        }
    }
}
