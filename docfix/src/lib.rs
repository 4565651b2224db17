pub mod error;
pub mod fence;
pub mod frontmatter;
pub mod parity;
pub mod runner;
pub mod walk;

pub use error::Error;
pub use fence::{fix_bare_code_blocks, infer_language};
pub use frontmatter::{
    add_frontmatter_title, extract_title_from_heading, has_frontmatter_title, parse_frontmatter,
};
pub use parity::reconcile_parity;
pub use runner::{FixSummary, SOURCE_LANG, TRANSLATED_LANG, run_quality_fixes};
pub use walk::collect_markdown_files;
