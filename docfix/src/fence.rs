use once_cell::sync::Lazy;
use regex::Regex;

static HTTP_REQUEST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(GET|POST|PUT|DELETE|PATCH)\s+/").unwrap());

static SQL_STATEMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(SELECT|INSERT|UPDATE|DELETE|CREATE|DROP|ALTER)\b").unwrap());

/// Infer a language identifier from code block content.
/// Priority order: json, bash, http, sql, text. The HTTP check runs before
/// the SQL check so `DELETE /path` is not misread as a SQL statement.
pub fn infer_language(content: &str) -> &'static str {
    let trimmed = content.trim_start();

    // JSON: starts with { or [
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return "json";
    }

    // bash: a shell-transcript line, `$` followed by whitespace
    if content.lines().any(is_prompt_line) {
        return "bash";
    }

    if HTTP_REQUEST.is_match(trimmed) {
        return "http";
    }

    if SQL_STATEMENT.is_match(trimmed) {
        return "sql";
    }

    "text"
}

fn is_prompt_line(line: &str) -> bool {
    line.trim_start()
        .strip_prefix('$')
        .is_some_and(|rest| rest.starts_with(char::is_whitespace))
}

/// Rewrite bare fences (``` with no language tag) in `target`.
///
/// Languages come from `reference` by fence position: the Nth fence of the
/// target takes the Nth reference fence's tag when one is present. Tagged
/// target fences are counted but never altered, which keeps the two scans
/// positionally aligned. When the reference has no tag at that position
/// either (or there is no reference), the language is inferred from the
/// fence body. Fence bodies and all non-fence lines pass through untouched,
/// so an input with no bare fences comes back equal to itself.
pub fn fix_bare_code_blocks(target: &str, reference: Option<&str>) -> String {
    let ref_languages = reference.map(reference_languages).unwrap_or_default();

    let lines: Vec<&str> = target.split('\n').collect();
    let mut result: Vec<String> = Vec::with_capacity(lines.len());
    let mut in_block = false;
    let mut block_index = 0usize;

    for (i, line) in lines.iter().enumerate() {
        let trimmed = line.trim_start();

        let Some(tag) = trimmed.strip_prefix("```") else {
            result.push((*line).to_owned());
            continue;
        };

        if in_block {
            // closing fence
            result.push((*line).to_owned());
            in_block = false;
            continue;
        }

        if tag.trim().is_empty() {
            // Bare fence: collect the body up to the matching close (or end
            // of document) to give the inference something to look at.
            let body: Vec<&str> = lines[i + 1..]
                .iter()
                .take_while(|l| !l.trim_start().starts_with("```"))
                .copied()
                .collect();

            let resolved = match ref_languages.get(block_index).and_then(Option::as_deref) {
                Some(lang) => lang.to_owned(),
                None => infer_language(&body.join("\n")).to_owned(),
            };

            let indent = &line[..line.len() - trimmed.len()];
            result.push(format!("{indent}```{resolved}"));
        } else {
            result.push((*line).to_owned());
        }
        in_block = true;
        block_index += 1;
    }

    result.join("\n")
}

/// Ordered language tags of each fence opened in `content`, None for bare.
fn reference_languages(content: &str) -> Vec<Option<String>> {
    let mut languages = Vec::new();
    let mut in_block = false;

    for line in content.split('\n') {
        let trimmed = line.trim_start();
        if let Some(tag) = trimmed.strip_prefix("```") {
            if in_block {
                in_block = false;
            } else {
                let lang = tag.trim();
                languages.push((!lang.is_empty()).then(|| lang.to_owned()));
                in_block = true;
            }
        }
    }

    languages
}
