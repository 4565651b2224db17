use std::collections::BTreeMap;

/// Parse the flat frontmatter block at the top of `content`.
///
/// A document has frontmatter iff it starts with a `---` line and a second
/// standalone `---` line follows. Each line between is split at its first
/// colon into key and value (both trimmed); lines without a colon, or
/// starting with one, are skipped. Returns None when there is no
/// frontmatter, distinct from Some(empty) for a present-but-empty block.
pub fn parse_frontmatter(content: &str) -> Option<BTreeMap<String, String>> {
    let inner = frontmatter_inner(content)?;

    let mut fields = BTreeMap::new();
    for line in inner.split('\n') {
        if let Some(colon) = line.find(':') {
            if colon > 0 {
                let key = line[..colon].trim().to_owned();
                let value = line[colon + 1..].trim().to_owned();
                fields.insert(key, value);
            }
        }
    }
    Some(fields)
}

/// Whether `content` already carries a usable title.
///
/// `layout: home` pages are satisfied unconditionally: their display name
/// lives in a nested hero field the flat parser does not model. Otherwise a
/// non-empty `title` field is required.
pub fn has_frontmatter_title(content: &str) -> bool {
    let Some(fields) = parse_frontmatter(content) else {
        return false;
    };

    if fields.get("layout").map(String::as_str) == Some("home") {
        return true;
    }

    fields.get("title").is_some_and(|title| !title.is_empty())
}

/// Extract a title from the first top-level heading in the body.
///
/// The frontmatter block, if any, is stripped first so nothing inside it
/// can match. A heading line is `#` followed by whitespace; the trimmed
/// remainder is the title. Returns None when no such line exists.
pub fn extract_title_from_heading(content: &str) -> Option<String> {
    let body = strip_frontmatter(content);

    for line in body.split('\n') {
        if let Some(rest) = line.strip_prefix('#') {
            if rest.starts_with(char::is_whitespace) {
                let title = rest.trim();
                if !title.is_empty() {
                    return Some(title.to_owned());
                }
            }
        }
    }
    None
}

/// Insert `title` into the frontmatter of `content`.
///
/// With an existing block the title line goes immediately after the opening
/// `---`, leaving every other field in place. Without one, a minimal
/// two-line block is prepended, separated from the body by a blank line.
pub fn add_frontmatter_title(content: &str, title: &str) -> String {
    match after_open_marker(content) {
        Some(rest) => format!("---\ntitle: \"{title}\"\n{rest}"),
        None => format!("---\ntitle: \"{title}\"\n---\n\n{content}"),
    }
}

/// The text following the opening `---` line, or None when `content` does
/// not start with one. Tolerates a CRLF opener.
fn after_open_marker(content: &str) -> Option<&str> {
    content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))
}

/// The raw text between the frontmatter delimiters.
fn frontmatter_inner(content: &str) -> Option<&str> {
    let after_open = after_open_marker(content)?;
    let close = after_open.find("\n---")?;
    Some(after_open[..close].trim_end_matches('\r'))
}

fn strip_frontmatter(content: &str) -> &str {
    body_after_frontmatter(content).unwrap_or(content)
}

/// The body following a complete frontmatter block (closing `---` plus its
/// newline). None when the document has no such block.
fn body_after_frontmatter(content: &str) -> Option<&str> {
    let after_open = after_open_marker(content)?;
    let close = after_open.find("\n---")?;
    let rest = &after_open[close + 4..];
    rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))
}

#[cfg(test)]
mod tests {
    use super::{
        add_frontmatter_title, extract_title_from_heading, has_frontmatter_title,
        parse_frontmatter,
    };

    #[test]
    fn parses_flat_fields() {
        let fm = parse_frontmatter("---\ntitle: Guide\noutline: deep\n---\n# H\n").unwrap();
        assert_eq!(fm.get("title").map(String::as_str), Some("Guide"));
        assert_eq!(fm.get("outline").map(String::as_str), Some("deep"));
    }

    #[test]
    fn absent_is_distinct_from_empty() {
        assert!(parse_frontmatter("# Heading\n\nContent").is_none());
        let empty = parse_frontmatter("---\n\n---\n# Heading\n").unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn ignores_lines_without_a_key() {
        let fm = parse_frontmatter("---\nno colon here\n: leading colon\ntitle: x\n---\n").unwrap();
        assert_eq!(fm.len(), 1);
        assert_eq!(fm.get("title").map(String::as_str), Some("x"));
    }

    #[test]
    fn splits_at_first_colon_only() {
        let fm = parse_frontmatter("---\ndescription: a: b: c\n---\n").unwrap();
        assert_eq!(fm.get("description").map(String::as_str), Some("a: b: c"));
    }

    #[test]
    fn title_present() {
        assert!(has_frontmatter_title("---\ntitle: My Title\n---\n# Heading"));
    }

    #[test]
    fn title_missing_from_frontmatter() {
        assert!(!has_frontmatter_title("---\ndescription: foo\n---\n# Heading"));
    }

    #[test]
    fn empty_title_does_not_count() {
        assert!(!has_frontmatter_title("---\ntitle:\n---\n# Heading"));
    }

    #[test]
    fn no_frontmatter_means_no_title() {
        assert!(!has_frontmatter_title("# Heading\n\nContent"));
    }

    #[test]
    fn home_layout_needs_no_title() {
        assert!(has_frontmatter_title(
            "---\nlayout: home\nhero:\n  name: Test\n---"
        ));
    }

    #[test]
    fn extracts_first_h1() {
        assert_eq!(
            extract_title_from_heading("# My Title\n\nSome content").as_deref(),
            Some("My Title")
        );
    }

    #[test]
    fn extracts_h1_after_frontmatter() {
        let content = "---\ndescription: foo\n---\n\n# My Title\n\nContent";
        assert_eq!(
            extract_title_from_heading(content).as_deref(),
            Some("My Title")
        );
    }

    #[test]
    fn hash_inside_frontmatter_never_matches() {
        let content = "---\ndescription: foo\n# not: a heading\n---\n\n## Only subheadings\n";
        assert_eq!(extract_title_from_heading(content), None);
    }

    #[test]
    fn no_h1_yields_none() {
        assert_eq!(extract_title_from_heading("## Subtitle\n\nContent"), None);
        assert_eq!(extract_title_from_heading(""), None);
    }

    #[test]
    fn trims_heading_whitespace() {
        assert_eq!(
            extract_title_from_heading("#   Spaced Title  \n").as_deref(),
            Some("Spaced Title")
        );
    }

    #[test]
    fn inserts_title_into_existing_frontmatter() {
        let content = "---\ndescription: foo\n---\n\n# Heading\n";
        let result = add_frontmatter_title(content, "My Title");
        assert!(result.starts_with("---\ntitle: \"My Title\"\ndescription: foo\n---"));
    }

    #[test]
    fn creates_frontmatter_when_absent() {
        let content = "# Heading\n\nContent";
        let result = add_frontmatter_title(content, "My Title");
        assert!(result.starts_with("---\ntitle: \"My Title\"\n---\n\n# Heading"));
    }

    #[test]
    fn preserves_other_fields_in_position() {
        let content = "---\ndescription: bar\noutline: deep\n---\n# H";
        let result = add_frontmatter_title(content, "Test");
        assert!(result.contains("description: bar\noutline: deep"));
        assert!(result.contains("title: \"Test\""));
    }
}
