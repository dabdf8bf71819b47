mod manifest;
mod progress;
mod provision;

use anyhow::{bail, Context, Result};
use clap::Parser;
use manifest::{MediaKind, MediaManifest};
use progress::{format_elapsed, LayoutReport, ProgressConfig, ProgressMode, ProvisionSummary};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "mindscope-placeholders",
    version,
    about = "Create empty placeholder audio/video files so the MindScope front-end never hits a missing media file"
)]
struct Cli {
    /// Root of the media tree; audio/ and video/ are created beneath it.
    #[arg(long, default_value = "public")]
    root: PathBuf,

    /// Only report which placeholders are missing; never writes. Exits non-zero if any are.
    #[arg(long, default_value_t = false, conflicts_with = "print_manifest")]
    check: bool,

    /// Print the built-in manifest as JSON and exit.
    #[arg(long, default_value_t = false)]
    print_manifest: bool,

    /// Progress display mode: auto (TTY-aware), rich, plain, quiet.
    #[arg(long, value_enum, default_value_t = ProgressMode::Auto)]
    progress: ProgressMode,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let manifest = MediaManifest::default_meditation();

    if cli.print_manifest {
        let json =
            serde_json::to_string_pretty(&manifest).context("failed to serialize manifest")?;
        println!("{}", json);
        return Ok(());
    }

    if cli.check {
        let report = provision::check_layout(&cli.root, &manifest)?;
        print_layout_report(&report, manifest.total_files());
        if !report.is_complete() {
            bail!(
                "{} of {} placeholder files missing under {}",
                report.missing.len(),
                manifest.total_files(),
                cli.root.display()
            );
        }
        return Ok(());
    }

    let progress_cfg = ProgressConfig::new(cli.progress);
    let quiet = cli.progress == ProgressMode::Quiet;
    if !quiet {
        println!(
            "Creating placeholder files for MindScope ({} categories, {} audio, {} video)...",
            manifest.category_count(),
            manifest.count_of(MediaKind::Audio),
            manifest.count_of(MediaKind::Video),
        );
    }

    let summary = provision::provision(&cli.root, &manifest, progress_cfg)?;

    print_provision_summary(&summary);
    if !quiet {
        println!();
        println!("Created {} placeholder files!", summary.created);
        println!("Replace these empty files with actual audio/video content when available.");
    }
    Ok(())
}

fn print_provision_summary(summary: &ProvisionSummary) {
    println!(
        "Provision summary: root={} duration={} categories={} dirs={} created={} existing={}",
        summary.root.display(),
        format_elapsed(summary.elapsed),
        summary.categories,
        summary.directories,
        summary.created,
        summary.existing,
    );
}

fn print_layout_report(report: &LayoutReport, expected: usize) {
    println!(
        "Layout summary: root={} duration={} checked_dirs={} present={} / {} non_empty={} missing={}",
        report.root.display(),
        format_elapsed(report.elapsed),
        report.checked_dirs,
        report.present,
        expected,
        report.non_empty,
        report.missing.len(),
    );
    for path in &report.missing {
        println!("  missing: {}", path.display());
    }
}
