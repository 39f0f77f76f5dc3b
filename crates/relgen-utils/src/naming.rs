use convert_case::{Case, Casing};

///
/// Naming
///
/// Case conversion and pluralization for entity, column, and routine
/// identifiers. Pure functions, no state.
///

// Irregular nouns the suffix rules get wrong. Lowercase singular -> plural.
const IRREGULAR: &[(&str, &str)] = &[
    ("child", "children"),
    ("foot", "feet"),
    ("goose", "geese"),
    ("man", "men"),
    ("mouse", "mice"),
    ("person", "people"),
    ("tooth", "teeth"),
    ("woman", "women"),
];

/// Convert an identifier to snake_case.
#[must_use]
pub fn to_snake(ident: &str) -> String {
    ident.to_case(Case::Snake)
}

/// Convert an identifier to PascalCase.
#[must_use]
pub fn to_pascal(ident: &str) -> String {
    ident.to_case(Case::Pascal)
}

/// Pluralize a lowercase word with English heuristics.
#[must_use]
pub fn pluralize_word(word: &str) -> String {
    if let Some((_, plural)) = IRREGULAR.iter().find(|(singular, _)| *singular == word) {
        return (*plural).to_string();
    }

    let chars: Vec<char> = word.chars().collect();
    if word.ends_with('y') && chars.len() >= 2 && !"aeiou".contains(chars[chars.len() - 2]) {
        return format!("{}ies", &word[..word.len() - 1]);
    }
    if word.ends_with('s')
        || word.ends_with('x')
        || word.ends_with('z')
        || word.ends_with("ch")
        || word.ends_with("sh")
    {
        return format!("{word}es");
    }

    format!("{word}s")
}

/// Pluralize a snake_case name by pluralizing its last segment.
#[must_use]
pub fn pluralize_snake(name: &str) -> String {
    match name.rfind('_') {
        Some(idx) => format!("{}_{}", &name[..idx], pluralize_word(&name[idx + 1..])),
        None => pluralize_word(name),
    }
}

/// Pluralize a PascalCase identifier by pluralizing its last word.
#[must_use]
pub fn pluralize_pascal(ident: &str) -> String {
    let idx = ident
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_ascii_uppercase())
        .map_or(0, |(i, _)| i);

    let (head, last) = ident.split_at(idx);
    let plural = pluralize_word(&last.to_lowercase());

    format!("{head}{}", to_pascal(&plural))
}

/// Default storage name for an entity: pluralized snake_case.
#[must_use]
pub fn table_storage_name(entity: &str) -> String {
    pluralize_snake(&to_snake(entity))
}

/// Default storage name for a field: snake_case, unpluralized.
#[must_use]
pub fn column_storage_name(field: &str) -> String {
    to_snake(field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn snake_case_conversion() {
        assert_eq!(to_snake("Language"), "language");
        assert_eq!(to_snake("WordsCount"), "words_count");
        assert_eq!(to_snake("AuthorID"), "author_id");
    }

    #[test]
    fn pluralizes_regular_words() {
        assert_eq!(pluralize_word("language"), "languages");
        assert_eq!(pluralize_word("keyword"), "keywords");
        assert_eq!(pluralize_word("box"), "boxes");
        assert_eq!(pluralize_word("branch"), "branches");
        assert_eq!(pluralize_word("policy"), "policies");
        assert_eq!(pluralize_word("day"), "days");
    }

    #[test]
    fn pluralizes_irregular_words() {
        assert_eq!(pluralize_word("person"), "people");
        assert_eq!(pluralize_word("child"), "children");
    }

    #[test]
    fn pluralizes_last_snake_segment_only() {
        assert_eq!(pluralize_snake("blog_post"), "blog_posts");
        assert_eq!(pluralize_snake("sales_person"), "sales_people");
    }

    #[test]
    fn pluralizes_last_pascal_word_only() {
        assert_eq!(pluralize_pascal("Language"), "Languages");
        assert_eq!(pluralize_pascal("Person"), "People");
        assert_eq!(pluralize_pascal("BlogPost"), "BlogPosts");
    }

    #[test]
    fn entity_storage_names() {
        assert_eq!(table_storage_name("Language"), "languages");
        assert_eq!(table_storage_name("Person"), "people");
        assert_eq!(table_storage_name("LanguageTeacherXref"), "language_teacher_xrefs");
    }

    proptest! {
        #[test]
        fn plural_is_never_empty_and_always_differs(word in "[a-z]{1,12}") {
            let plural = pluralize_word(&word);
            prop_assert!(!plural.is_empty());
            prop_assert_ne!(plural, word);
        }

        #[test]
        fn snake_conversion_is_idempotent(ident in "[A-Z][a-zA-Z0-9]{0,12}") {
            let snake = to_snake(&ident);
            prop_assert_eq!(to_snake(&snake), snake.clone());
        }
    }
}
