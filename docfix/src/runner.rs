use std::fs;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::Error;
use crate::fence::fix_bare_code_blocks;
use crate::frontmatter::{add_frontmatter_title, extract_title_from_heading, has_frontmatter_title};
use crate::parity::reconcile_parity;
use crate::walk::collect_markdown_files;

/// Fixed directory conventions under `<root>/docs`: the translation source
/// of truth and the machine-translated output.
pub const SOURCE_LANG: &str = "ja";
pub const TRANSLATED_LANG: &str = "en";

/// Counts of fixes applied by one run, by category.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixSummary {
    pub code_block_fixes: usize,
    pub title_fixes: usize,
    pub parity_fixes: usize,
}

impl FixSummary {
    pub fn total(&self) -> usize {
        self.code_block_fixes + self.title_fixes + self.parity_fixes
    }
}

/// Run every quality fix against `<base_dir>/docs`.
///
/// Each translated document is paired with its source counterpart by
/// identical relative path, run through the fence resolver and then the
/// title fixer, and written back once iff either changed it. The parity
/// pass follows unconditionally. `docs/ja` must exist; `docs/en` is
/// optional. With `dry_run` the same analysis runs and logs, but nothing
/// is written to either tree.
pub fn run_quality_fixes(
    base_dir: &Path,
    dry_run: bool,
    log: &mut impl Write,
) -> Result<FixSummary, Error> {
    let docs_dir = base_dir.join("docs");
    let source_dir = docs_dir.join(SOURCE_LANG);
    let translated_dir = docs_dir.join(TRANSLATED_LANG);

    if !source_dir.is_dir() {
        return Err(Error::SourceTreeMissing(source_dir));
    }

    let mut summary = FixSummary::default();

    if translated_dir.is_dir() {
        for file in collect_markdown_files(&translated_dir)? {
            let Ok(rel) = file.strip_prefix(&translated_dir) else {
                continue;
            };

            let original = read(&file)?;
            let mut content = original.clone();

            // (1) bare code fences, position-matched against the source doc
            let counterpart = source_dir.join(rel);
            let reference = if counterpart.is_file() {
                Some(read(&counterpart)?)
            } else {
                None
            };
            let fixed = fix_bare_code_blocks(&content, reference.as_deref());
            if fixed != content {
                content = fixed;
                summary.code_block_fixes += 1;
                let _ = writeln!(
                    log,
                    "  [code-block] fixed: {TRANSLATED_LANG}/{}",
                    rel.display()
                );
            }

            // (2) missing frontmatter title, synthesized from the first H1
            if !has_frontmatter_title(&content) {
                if let Some(title) = extract_title_from_heading(&content) {
                    content = add_frontmatter_title(&content, &title);
                    summary.title_fixes += 1;
                    let _ = writeln!(
                        log,
                        "  [frontmatter] added title \"{title}\": {TRANSLATED_LANG}/{}",
                        rel.display()
                    );
                } else {
                    // No title and no H1 to build one from. Warn and move on.
                    let _ = writeln!(
                        log,
                        "  [frontmatter] WARN: no title or H1 found in {TRANSLATED_LANG}/{}",
                        rel.display()
                    );
                }
            }

            if content != original && !dry_run {
                write(&file, &content)?;
            }
        }
    }

    // (3) source-only files are copied over verbatim
    summary.parity_fixes = reconcile_parity(&source_dir, &translated_dir, dry_run, log)?;

    Ok(summary)
}

fn read(path: &Path) -> Result<String, Error> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

fn write(path: &Path, content: &str) -> Result<(), Error> {
    fs::write(path, content).map_err(|e| Error::io(path, e))
}
