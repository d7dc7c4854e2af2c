use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use colored::Colorize;
use docopt_ver::{set_version, CallTarget, SetOptions, SetReport, SetStatus};
use similar::{ChangeTag, TextDiff};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LONG_ABOUT: &str = "docopt version setter.

Searches for the docopt.Parse call in the specified file and replaces its
4th argument, the program version. If the original version string contains
the program name, like \"shadowc 1.1\", only the version part (\"1.1\") is
replaced.

The file is changed in-place.";

#[derive(Parser)]
#[command(name = "docopt-ver")]
#[command(about = "docopt version setter", long_about = LONG_ABOUT)]
#[command(version)]
struct Cli {
    /// Go source file containing the call
    file: PathBuf,

    /// Version to write into the call's version literal
    new_version: String,

    /// Dry run - show what would be changed without modifying the file
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Show unified diff of the change
    #[arg(short, long)]
    diff: bool,

    /// Call whose 4th argument holds the version
    #[arg(long, value_name = "QUALIFIER.MEMBER", default_value = "docopt.Parse")]
    call: CallTarget,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = SetOptions {
        target: cli.call.clone(),
        dry_run: cli.dry_run,
    };

    let report = set_version(&cli.file, &cli.new_version, &options)
        .with_context(|| format!("failed to set version in {}", cli.file.display()))?;

    if cli.diff && report.status != SetStatus::AlreadyApplied {
        display_diff(&report.file, &report.original, &report.update.patched);
    }
    print_report(&report);

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_filter = match verbose {
        0 => "docopt_ver=warn",
        1 => "docopt_ver=debug",
        _ => "docopt_ver=trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_report(report: &SetReport) {
    let update = &report.update;
    let location = format!(
        "{}:{}:{}",
        report.file.display(),
        update.line,
        update.column
    );
    let (from, to) = (update.replacement.original(), update.replacement.value());

    match report.status {
        SetStatus::Applied => {
            println!("{} {}: {} -> {}", "Updated".green(), location, from, to.bold());
        }
        SetStatus::AlreadyApplied => {
            println!("{} {}: {}", "Already up to date".yellow(), location, from);
        }
        SetStatus::DryRun => {
            println!(
                "{} {}: {} -> {}",
                "Would update".cyan(),
                location,
                from,
                to.bold()
            );
        }
    }
}

/// Helper: Show unified diff between original and modified content
fn display_diff(file: &Path, original: &str, modified: &str) {
    println!("{}", format!("--- {} (original)", file.display()).dimmed());
    println!("{}", format!("+++ {} (patched)", file.display()).dimmed());

    let diff = TextDiff::from_lines(original, modified);

    let mut unified = diff.unified_diff();
    unified.context_radius(2);

    for hunk in unified.iter_hunks() {
        println!("{}", hunk.header().to_string().cyan());
        for change in hunk.iter_changes() {
            let line = match change.tag() {
                ChangeTag::Delete => format!("-{}", change).red(),
                ChangeTag::Insert => format!("+{}", change).green(),
                ChangeTag::Equal => format!(" {}", change).normal(),
            };
            print!("{}", line);
            if change.missing_newline() {
                println!();
            }
        }
    }
}
