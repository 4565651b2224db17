use std::path::PathBuf;
use std::process;

use clap::Parser;

use docfix::FixSummary;

#[derive(Parser)]
#[command(name = "docfix", version, about = "Post-translation markdown quality fixer")]
struct Cli {
    /// Project root containing the docs/ directory (defaults to the
    /// current working directory)
    root: Option<PathBuf>,

    /// Analyze and report without writing; exit non-zero if fixes are pending
    #[arg(long)]
    check: bool,

    /// Suppress per-file fix notices (the summary is still printed)
    #[arg(short, long)]
    quiet: bool,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

fn main() {
    let cli = Cli::parse();

    let root = match cli.root {
        Some(root) => root,
        None => match std::env::current_dir() {
            Ok(dir) => dir,
            Err(e) => {
                eprintln!("error: cannot resolve current directory: {}", e);
                process::exit(1);
            }
        },
    };

    let result = if cli.quiet {
        docfix::run_quality_fixes(&root, cli.check, &mut std::io::sink())
    } else {
        docfix::run_quality_fixes(&root, cli.check, &mut std::io::stdout())
    };

    let summary = match result {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };

    print_summary(&summary, cli.json, cli.check);

    if cli.check && summary.total() > 0 {
        process::exit(1);
    }
}

fn print_summary(summary: &FixSummary, json: bool, check: bool) {
    if json {
        match serde_json::to_string(summary) {
            Ok(line) => println!("{}", line),
            Err(e) => eprintln!("error: cannot serialize summary: {}", e),
        }
        return;
    }

    let verb = if check { "pending" } else { "applied" };
    println!();
    println!(
        "Done: {} code-block fixes, {} title fixes, {} parity fixes {}.",
        summary.code_block_fixes, summary.title_fixes, summary.parity_fixes, verb
    );
}
