/// Validate a proposal title: required, max 200 chars.
pub fn validate_title(title: &str) -> Option<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Some("Title is required".to_string());
    }
    if trimmed.chars().count() > 200 {
        return Some("Title must be at most 200 characters".to_string());
    }
    None
}

/// Validate a proposal description: required, max 20000 chars.
pub fn validate_description(description: &str) -> Option<String> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Some("Description is required".to_string());
    }
    if trimmed.chars().count() > 20_000 {
        return Some("Description must be at most 20000 characters".to_string());
    }
    None
}

/// Validate a slug: non-empty, lowercase alphanumeric and hyphens only.
pub fn validate_slug(slug: &str) -> Option<String> {
    if slug.is_empty() {
        return Some("Slug is required".to_string());
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Some("Slug may only contain lowercase letters, numbers, and hyphens".to_string());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_rules() {
        assert!(validate_title("").is_some());
        assert!(validate_title("   ").is_some());
        assert!(validate_title("Fine title").is_none());
        assert!(validate_title(&"x".repeat(201)).is_some());
    }

    #[test]
    fn slug_rules() {
        assert!(validate_slug("hello-world-2").is_none());
        assert!(validate_slug("").is_some());
        assert!(validate_slug("Hello").is_some());
        assert!(validate_slug("has space").is_some());
    }
}
