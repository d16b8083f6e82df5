/// Generate a URL slug from a title: lowercase, runs of non-alphanumeric
/// characters collapse to single hyphens, no leading/trailing hyphen.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;
    for c in title.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            for lower in c.to_lowercase() {
                slug.push(lower);
            }
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Slug source for the edit buffer. While `Auto`, the slug tracks the title;
/// a manual override sticks until the user types the auto value back in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slug {
    Auto,
    Manual(String),
}

impl Slug {
    /// Resolve against the current title.
    pub fn value(&self, title: &str) -> String {
        match self {
            Slug::Auto => slugify(title),
            Slug::Manual(s) => s.clone(),
        }
    }

    /// Classify a stored/typed slug: the auto value stays `Auto`, anything
    /// else is a manual override.
    pub fn from_value(slug: &str, title: &str) -> Self {
        if slug == slugify(title) {
            Slug::Auto
        } else {
            Slug::Manual(slug.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_basic() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("  Spaces   everywhere  "), "spaces-everywhere");
        assert_eq!(slugify("Tokens & Fees (v2)"), "tokens-fees-v2");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn auto_slug_tracks_title() {
        let slug = Slug::Auto;
        assert_eq!(slug.value("Hello World"), "hello-world");
        assert_eq!(slug.value("New Title"), "new-title");
    }

    #[test]
    fn manual_slug_survives_title_changes() {
        let slug = Slug::from_value("custom-url", "Hello World");
        assert_eq!(slug, Slug::Manual("custom-url".to_string()));
        assert_eq!(slug.value("Completely Different"), "custom-url");
    }

    #[test]
    fn typing_the_auto_value_returns_to_auto() {
        let slug = Slug::from_value("hello-world", "Hello World");
        assert_eq!(slug, Slug::Auto);
    }
}
