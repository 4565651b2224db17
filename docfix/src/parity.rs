use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::Error;
use crate::walk::collect_markdown_files;

/// Copy source-tree files whose relative path is missing under
/// `translated_root`, byte for byte, creating intermediate directories.
///
/// Strictly additive and one-directional: an existing translated file is
/// never overwritten or deleted, even when its content has drifted from the
/// source counterpart. With `dry_run` the copies are counted and logged but
/// not performed. Returns the number of files copied (or pending).
pub fn reconcile_parity(
    source_root: &Path,
    translated_root: &Path,
    dry_run: bool,
    log: &mut impl Write,
) -> Result<usize, Error> {
    let label = tree_label(translated_root);
    let mut copies = 0usize;

    for source_file in collect_markdown_files(source_root)? {
        let Ok(rel) = source_file.strip_prefix(source_root) else {
            continue;
        };
        let target = translated_root.join(rel);
        if target.exists() {
            continue;
        }

        if !dry_run {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
            }
            fs::copy(&source_file, &target).map_err(|e| Error::io(&target, e))?;
        }

        copies += 1;
        let _ = writeln!(log, "  [parity] copied to {label}/: {}", rel.display());
    }

    Ok(copies)
}

fn tree_label(root: &Path) -> String {
    match root.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => root.display().to_string(),
    }
}
