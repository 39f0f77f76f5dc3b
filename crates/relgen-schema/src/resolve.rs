use crate::{XREF_SUFFIX, node::Table, types::Relationship};
use std::collections::BTreeMap;
use tracing::warn;

///
/// Relationship Resolver
///
/// Global pass: re-classifies every reference column using cross-table
/// naming evidence. Takes the complete built set as an immutable snapshot
/// and returns a new resolved set; it must not run before every entity has
/// been modeled, since classification reads the full table-name namespace.
///
/// One pass over (host, column) pairs suffices: a column's resolution only
/// depends on table and column existence facts fixed by the build pass,
/// never on another column's resolved value.
///

#[must_use]
pub fn resolve(snapshot: &[Table]) -> Vec<Table> {
    let by_name: BTreeMap<&str, &Table> =
        snapshot.iter().map(|t| (t.name.as_str(), t)).collect();

    snapshot
        .iter()
        .map(|host| resolve_table(host, &by_name))
        .collect()
}

fn resolve_table(host: &Table, tables: &BTreeMap<&str, &Table>) -> Table {
    let mut resolved = host.clone();

    for column in &mut resolved.columns {
        if !column.shape.is_reference() {
            continue;
        }
        let Some(target) = column.target.as_deref() else {
            continue;
        };

        let Some(guest) = tables.get(target).copied() else {
            warn!(
                "{}.{}: can't find entity '{target}' in the catalog",
                host.name, column.name
            );
            column.relationship = Relationship::None;
            continue;
        };

        match column.relationship {
            Relationship::HasOne => {
                column.relationship = resolve_single(host, &column.name, guest);
            }
            Relationship::HasMany => {
                let (relationship, xref) = resolve_collection(host, guest, tables);
                column.relationship = relationship;
                column.xref = xref;
            }
            _ => {}
        }
    }

    resolved
}

// Single-reference column: belongs-to promotion is checked before has-one
// confirmation, so a column satisfying both patterns is always BelongsTo.
fn resolve_single(host: &Table, field: &str, guest: &Table) -> Relationship {
    if carries_full_key(host, field, guest) {
        return Relationship::BelongsTo;
    }
    if carries_full_key(guest, &host.name, host) {
        return Relationship::HasOne;
    }

    Relationship::None
}

// Collection column: a dedicated cross-reference table wins; otherwise the
// guest must carry a full reciprocal foreign key, and symmetric foreign
// keys on both sides still imply a cross-reference shape.
fn resolve_collection(
    host: &Table,
    guest: &Table,
    tables: &BTreeMap<&str, &Table>,
) -> (Relationship, Option<String>) {
    if let Some(xref) = find_xref(host, guest, tables) {
        return (Relationship::ManyToMany, Some(xref));
    }

    if !carries_full_key(guest, &host.name, host) {
        return (Relationship::None, None);
    }

    if carries_full_key(host, &guest.name, guest) {
        let xref = format!("{}{}{XREF_SUFFIX}", host.name, guest.name);
        return (Relationship::ManyToMany, Some(xref));
    }

    (Relationship::HasMany, None)
}

// Whether `table` carries a `<prefix><PKName>` column for EVERY primary key
// of `of`. A partial foreign-key set does not qualify.
fn carries_full_key(table: &Table, prefix: &str, of: &Table) -> bool {
    of.primary_keys()
        .all(|pk| table.has_column(&format!("{prefix}{}", pk.name)))
}

fn find_xref(host: &Table, guest: &Table, tables: &BTreeMap<&str, &Table>) -> Option<String> {
    let candidates = [
        format!("{}{}{XREF_SUFFIX}", host.name, guest.name),
        format!("{}{}{XREF_SUFFIX}", guest.name, host.name),
    ];

    candidates
        .into_iter()
        .find(|name| tables.contains_key(name.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        build::build_table,
        catalog::{EntityDef, FieldDef, TypeCatalog, TypeExpr},
    };

    fn entity_with_id(name: &str) -> EntityDef {
        EntityDef::new(name).field(FieldDef::new("ID", TypeExpr::scalar("uint")).annotated(",id,primary-key"))
    }

    fn resolve_entities(entities: Vec<EntityDef>) -> Vec<Table> {
        let catalog = TypeCatalog::new();
        let tables: Vec<Table> = entities.iter().map(|e| build_table(e, &catalog)).collect();
        resolve(&tables)
    }

    fn relationship(tables: &[Table], host: &str, column: &str) -> Relationship {
        tables
            .iter()
            .find(|t| t.name == host)
            .and_then(|t| t.column(column))
            .map(|c| c.relationship)
            .unwrap()
    }

    #[test]
    fn full_foreign_key_mirror_promotes_to_belongs_to() {
        let tables = resolve_entities(vec![
            entity_with_id("Language")
                .field(FieldDef::new("AuthorID", TypeExpr::scalar("uint")))
                .field(FieldDef::new("Author", TypeExpr::entity("Person"))),
            entity_with_id("Person"),
        ]);

        assert_eq!(relationship(&tables, "Language", "Author"), Relationship::BelongsTo);
    }

    #[test]
    fn reciprocal_foreign_key_confirms_has_one() {
        let tables = resolve_entities(vec![
            entity_with_id("Language")
                .field(FieldDef::new("Tag", TypeExpr::pointer(TypeExpr::entity("Keyword")))),
            entity_with_id("Keyword")
                .field(FieldDef::new("LanguageID", TypeExpr::scalar("uint"))),
        ]);

        assert_eq!(relationship(&tables, "Language", "Tag"), Relationship::HasOne);
    }

    #[test]
    fn belongs_to_wins_when_both_patterns_match() {
        let tables = resolve_entities(vec![
            entity_with_id("Language")
                .field(FieldDef::new("TagID", TypeExpr::scalar("uint")))
                .field(FieldDef::new("Tag", TypeExpr::entity("Keyword"))),
            entity_with_id("Keyword")
                .field(FieldDef::new("LanguageID", TypeExpr::scalar("uint"))),
        ]);

        assert_eq!(relationship(&tables, "Language", "Tag"), Relationship::BelongsTo);
    }

    #[test]
    fn partial_composite_foreign_key_does_not_promote() {
        // Person has a composite key; Language only mirrors half of it
        let tables = resolve_entities(vec![
            entity_with_id("Language")
                .field(FieldDef::new("AuthorID", TypeExpr::scalar("uint")))
                .field(FieldDef::new("Author", TypeExpr::entity("Person"))),
            EntityDef::new("Person")
                .field(FieldDef::new("ID", TypeExpr::scalar("uint")).annotated(",primary-key"))
                .field(FieldDef::new("Region", TypeExpr::scalar("string")).annotated(",primary-key")),
        ]);

        assert_eq!(relationship(&tables, "Language", "Author"), Relationship::None);
    }

    #[test]
    fn unmatched_single_reference_demotes_to_none() {
        let tables = resolve_entities(vec![
            entity_with_id("Language").field(FieldDef::new("Author", TypeExpr::entity("Person"))),
            entity_with_id("Person"),
        ]);

        assert_eq!(relationship(&tables, "Language", "Author"), Relationship::None);
    }

    #[test]
    fn missing_target_downgrades_but_keeps_the_column() {
        let tables = resolve_entities(vec![
            entity_with_id("Language").field(FieldDef::new("Author", TypeExpr::entity("Ghost"))),
        ]);

        let column = tables[0].column("Author").unwrap();
        assert_eq!(column.relationship, Relationship::None);
        assert_eq!(column.target.as_deref(), Some("Ghost"));
    }

    #[test]
    fn collection_with_reciprocal_foreign_key_is_has_many() {
        let tables = resolve_entities(vec![
            entity_with_id("Language").field(FieldDef::new(
                "Keywords",
                TypeExpr::list(TypeExpr::pointer(TypeExpr::entity("Keyword"))),
            )),
            entity_with_id("Keyword")
                .field(FieldDef::new("LanguageID", TypeExpr::scalar("uint"))),
        ]);

        assert_eq!(relationship(&tables, "Language", "Keywords"), Relationship::HasMany);
    }

    #[test]
    fn collection_without_evidence_resolves_to_none() {
        let tables = resolve_entities(vec![
            entity_with_id("Language")
                .field(FieldDef::new("Teachers", TypeExpr::list(TypeExpr::entity("Teacher")))),
            entity_with_id("Teacher"),
        ]);

        assert_eq!(relationship(&tables, "Language", "Teachers"), Relationship::None);
    }

    #[test]
    fn cross_reference_table_promotes_to_many_to_many() {
        for xref in ["LanguageTeacherXref", "TeacherLanguageXref"] {
            let tables = resolve_entities(vec![
                entity_with_id("Language")
                    .field(FieldDef::new("Teachers", TypeExpr::list(TypeExpr::entity("Teacher")))),
                entity_with_id("Teacher"),
                EntityDef::new(xref)
                    .field(FieldDef::new("LanguageID", TypeExpr::scalar("uint")))
                    .field(FieldDef::new("TeacherID", TypeExpr::scalar("uint"))),
            ]);

            assert_eq!(
                relationship(&tables, "Language", "Teachers"),
                Relationship::ManyToMany
            );
            let column = tables
                .iter()
                .find(|t| t.name == "Language")
                .and_then(|t| t.column("Teachers"))
                .unwrap();
            assert_eq!(column.xref.as_deref(), Some(xref));
        }
    }

    #[test]
    fn symmetric_foreign_keys_fall_back_to_many_to_many() {
        let tables = resolve_entities(vec![
            entity_with_id("Teacher")
                .field(FieldDef::new("LanguageID", TypeExpr::scalar("uint")))
                .field(FieldDef::new(
                    "Languages",
                    TypeExpr::list(TypeExpr::pointer(TypeExpr::entity("Language"))),
                )),
            entity_with_id("Language")
                .field(FieldDef::new("TeacherID", TypeExpr::scalar("uint"))),
        ]);

        let column = tables
            .iter()
            .find(|t| t.name == "Teacher")
            .and_then(|t| t.column("Languages"))
            .unwrap();
        assert_eq!(column.relationship, Relationship::ManyToMany);
        assert_eq!(column.xref.as_deref(), Some("TeacherLanguageXref"));
    }

    #[test]
    fn snapshot_is_left_untouched() {
        let catalog = TypeCatalog::new();
        let entities = vec![
            entity_with_id("Language")
                .field(FieldDef::new("AuthorID", TypeExpr::scalar("uint")))
                .field(FieldDef::new("Author", TypeExpr::entity("Person"))),
            entity_with_id("Person"),
        ];
        let snapshot: Vec<Table> = entities.iter().map(|e| build_table(e, &catalog)).collect();

        let resolved = resolve(&snapshot);

        // preliminary guess survives in the snapshot, final lives in the output
        assert_eq!(
            snapshot[0].column("Author").unwrap().relationship,
            Relationship::HasOne
        );
        assert_eq!(
            resolved[0].column("Author").unwrap().relationship,
            Relationship::BelongsTo
        );
    }
}
