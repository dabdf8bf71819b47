use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Instant;

use crate::manifest::{category_dir, MediaKind, MediaManifest};
use crate::progress::{LayoutReport, ProgressConfig, ProgressReporter, ProvisionSummary};

/// Creates a zero-length file at `path` unless something already exists
/// there. Returns `true` only when this call created the file.
///
/// Existing entries (including directories) are never opened for writing,
/// so real media dropped in place of a placeholder is left as-is. A dangling
/// symlink does not count as existing: the placeholder is created at its
/// target.
pub fn ensure_empty_file(path: &Path) -> Result<bool> {
    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            let resolves = path
                .try_exists()
                .with_context(|| format!("failed to stat placeholder {:?}", path))?;
            if resolves {
                return Ok(false);
            }
            OpenOptions::new()
                .write(true)
                .create(true)
                .open(path)
                .with_context(|| {
                    format!("failed to create placeholder through link {:?}", path)
                })?;
            Ok(true)
        }
        Err(e) => Err(e).with_context(|| format!("failed to create placeholder {:?}", path)),
    }
}

/// Walks the manifest in order and materializes every placeholder under
/// `root`. The first filesystem error aborts the run.
pub fn provision(
    root: &Path,
    manifest: &MediaManifest,
    progress_cfg: ProgressConfig,
) -> Result<ProvisionSummary> {
    let mut reporter = ProgressReporter::new(
        "provision",
        manifest.total_files() as u64,
        progress_cfg,
    );

    let mut summary = ProvisionSummary {
        root: root.to_path_buf(),
        categories: 0,
        directories: 0,
        created: 0,
        existing: 0,
        elapsed: Default::default(),
    };

    for entry in &manifest.categories {
        reporter.set_stage(format!("category {}", entry.name));
        reporter.println(format!("Setting up {}...", entry.name));

        for kind in MediaKind::ALL {
            let dir = category_dir(root, kind, &entry.name);
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create directory {:?}", dir))?;
            summary.directories += 1;

            for file_name in entry.media.files(kind) {
                let path = dir.join(file_name);
                if ensure_empty_file(&path)? {
                    reporter.println(format!(
                        "  Created: {}/{}/{}",
                        kind, entry.name, file_name
                    ));
                    summary.created += 1;
                } else {
                    summary.existing += 1;
                }
                reporter.inc_files(1);
            }
        }
        summary.categories += 1;
    }

    let outcome = reporter.finish(format!("{} placeholder files created", summary.created));
    debug_assert_eq!(outcome.processed_files, outcome.total_files);
    summary.elapsed = outcome.elapsed;
    Ok(summary)
}

/// Read-only audit of `root` against the manifest.
pub fn check_layout(root: &Path, manifest: &MediaManifest) -> Result<LayoutReport> {
    let started = Instant::now();
    let mut report = LayoutReport {
        root: root.to_path_buf(),
        checked_dirs: 0,
        present: 0,
        non_empty: 0,
        missing: Vec::new(),
        elapsed: Default::default(),
    };

    for entry in &manifest.categories {
        for kind in MediaKind::ALL {
            if category_dir(root, kind, &entry.name).is_dir() {
                report.checked_dirs += 1;
            }
        }
    }

    for spec in manifest.placeholders() {
        let path = spec.path_under(root);
        match std::fs::metadata(&path) {
            Ok(meta) => {
                report.present += 1;
                if meta.len() > 0 {
                    report.non_empty += 1;
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => report.missing.push(spec.rel_path()),
            Err(e) => {
                return Err(e).with_context(|| format!("failed to stat placeholder {:?}", path))
            }
        }
    }

    report.elapsed = started.elapsed();
    Ok(report)
}
