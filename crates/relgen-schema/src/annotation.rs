///
/// Annotation
///
/// Parsed field annotation. The grammar is positional: the first token is
/// either `-` (drop the field), empty (no override), or an explicit storage
/// column name; every following token is a flag. Unknown flags are skipped.
///

pub const FLAG_ID: &str = "id";
pub const FLAG_PRIMARY_KEY: &str = "primary-key";
pub const FLAG_INLINE: &str = "inline";
pub const FLAG_IGNORE: &str = "-";

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Annotation {
    pub storage_name: Option<String>,
    pub ignore: bool,
    pub id: bool,
    pub primary_key: bool,
    pub inline: bool,
}

impl Annotation {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let mut annotation = Self::default();
        let mut directives = raw.split(',');

        // split always yields at least one token
        match directives.next().unwrap_or_default() {
            "" => {}
            FLAG_IGNORE => {
                annotation.ignore = true;
                return annotation;
            }
            name => annotation.storage_name = Some(name.to_string()),
        }

        for flag in directives {
            match flag {
                FLAG_ID => annotation.id = true,
                FLAG_PRIMARY_KEY => annotation.primary_key = true,
                FLAG_INLINE => annotation.inline = true,
                _ => {}
            }
        }

        annotation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_annotation_has_no_effect() {
        assert_eq!(Annotation::parse(""), Annotation::default());
    }

    #[test]
    fn first_token_is_the_storage_override() {
        let annotation = Annotation::parse("word_stat");
        assert_eq!(annotation.storage_name.as_deref(), Some("word_stat"));
        assert!(!annotation.primary_key);
    }

    #[test]
    fn flags_after_an_empty_first_token() {
        let annotation = Annotation::parse(",id,primary-key");
        assert_eq!(annotation.storage_name, None);
        assert!(annotation.id);
        assert!(annotation.primary_key);
        assert!(!annotation.inline);
    }

    #[test]
    fn ignore_short_circuits_everything_else() {
        let annotation = Annotation::parse("-");
        assert!(annotation.ignore);
        assert_eq!(annotation.storage_name, None);

        let annotation = Annotation::parse("-,primary-key");
        assert!(annotation.ignore);
        assert!(!annotation.primary_key);
    }

    #[test]
    fn flag_words_in_first_position_are_storage_names() {
        // positional contract: flags only count after the first token
        let annotation = Annotation::parse("inline");
        assert_eq!(annotation.storage_name.as_deref(), Some("inline"));
        assert!(!annotation.inline);
    }

    #[test]
    fn unknown_flags_are_skipped() {
        let annotation = Annotation::parse(",primary-key,whatever");
        assert!(annotation.primary_key);
        assert!(!annotation.id);
    }

    proptest! {
        #[test]
        fn first_token_never_parses_as_a_flag(name in "[a-z_]{1,16}") {
            prop_assume!(name != "-");
            let annotation = Annotation::parse(&name);
            prop_assert_eq!(annotation.storage_name, Some(name));
            prop_assert!(!annotation.id && !annotation.primary_key && !annotation.inline);
        }
    }
}
