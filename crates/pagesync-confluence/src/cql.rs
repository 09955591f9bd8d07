//! CQL query builders for page search.

/// Quote a CQL string literal.
fn quote(value: &str) -> String {
    let escaped = value.replace('\\', r"\\").replace('"', r#"\""#);
    format!("\"{escaped}\"")
}

/// Pages in `space_key` whose title is exactly `title`.
pub(crate) fn exact_title(space_key: &str, title: &str) -> String {
    format!("type=page AND space={space_key} AND title={}", quote(title))
}

/// Pages whose title contains `title`, optionally restricted to a space.
pub(crate) fn title_contains(space_key: Option<&str>, title: &str) -> String {
    match space_key {
        Some(space_key) => format!("type=page AND space={space_key} AND title~{}", quote(title)),
        None => format!("type=page AND title~{}", quote(title)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_exact_title() {
        assert_eq!(
            exact_title("TST", "Home"),
            r#"type=page AND space=TST AND title="Home""#
        );
    }

    #[test]
    fn test_title_contains_in_space() {
        assert_eq!(
            title_contains(Some("TST"), "release notes"),
            r#"type=page AND space=TST AND title~"release notes""#
        );
    }

    #[test]
    fn test_title_contains_all_spaces() {
        assert_eq!(title_contains(None, "Home"), r#"type=page AND title~"Home""#);
    }

    #[test]
    fn test_quotes_are_escaped() {
        assert_eq!(
            exact_title("TST", r#"The "big" \ plan"#),
            r#"type=page AND space=TST AND title="The \"big\" \\ plan""#
        );
    }
}
