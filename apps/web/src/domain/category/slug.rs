/// Derives a URL-safe slug from a display name.
///
/// Lowercases the input, drops everything that is not an ASCII letter,
/// digit, underscore, hyphen or whitespace, collapses runs of whitespace
/// and hyphens into a single hyphen, and trims leading/trailing hyphens
/// and underscores.
///
/// # Example
/// ```
/// use rango::domain::category::slugify;
///
/// assert_eq!(slugify("Other Frameworks"), "other-frameworks");
/// assert_eq!(slugify("Django"), "django");
/// ```
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_separator = false;

    for c in name.chars() {
        if c.is_whitespace() || c == '-' {
            pending_separator = true;
            continue;
        }

        let c = c.to_ascii_lowercase();
        if !(c.is_ascii_alphanumeric() || c == '_') {
            continue;
        }

        if pending_separator && !slug.is_empty() {
            slug.push('-');
        }
        pending_separator = false;
        slug.push(c);
    }

    slug.trim_matches(|c| c == '-' || c == '_').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_single_word() {
        assert_eq!(slugify("Python"), "python");
    }

    #[test]
    fn joins_words_with_hyphens() {
        assert_eq!(slugify("Other Frameworks"), "other-frameworks");
    }

    #[test]
    fn collapses_whitespace_and_hyphen_runs() {
        assert_eq!(slugify("  Rust -- \t Web  "), "rust-web");
    }

    #[test]
    fn drops_punctuation() {
        assert_eq!(slugify("C++ & C#!"), "c-c");
        assert_eq!(slugify("Node.js"), "nodejs");
    }

    #[test]
    fn keeps_inner_underscores() {
        assert_eq!(slugify("_snake_case_"), "snake_case");
    }

    #[test]
    fn non_ascii_only_name_yields_empty_slug() {
        assert_eq!(slugify("日本語"), "");
        assert_eq!(slugify("!!!"), "");
    }
}
