use clap::ValueEnum;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lower")]
pub enum ProgressMode {
    Auto,
    Rich,
    Plain,
    Quiet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedProgressMode {
    Rich,
    Plain,
    Quiet,
}

/// Requested display mode plus, in tests, a stand-in for the stderr TTY check.
#[derive(Debug, Clone, Copy)]
pub struct ProgressConfig {
    mode: ProgressMode,
    tty_override: Option<bool>,
}

impl ProgressConfig {
    pub fn new(mode: ProgressMode) -> Self {
        Self {
            mode,
            tty_override: None,
        }
    }

    #[cfg(test)]
    pub fn with_tty_override(mut self, is_tty: bool) -> Self {
        self.tty_override = Some(is_tty);
        self
    }

    /// `auto` draws a bar only when stderr is a terminal.
    pub fn resolve_mode(self) -> ResolvedProgressMode {
        match self.mode {
            ProgressMode::Quiet => ResolvedProgressMode::Quiet,
            ProgressMode::Plain => ResolvedProgressMode::Plain,
            ProgressMode::Rich => ResolvedProgressMode::Rich,
            ProgressMode::Auto => {
                let is_tty = self
                    .tty_override
                    .unwrap_or_else(|| std::io::stderr().is_terminal());
                if is_tty {
                    ResolvedProgressMode::Rich
                } else {
                    ResolvedProgressMode::Plain
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProvisionSummary {
    pub root: PathBuf,
    pub categories: usize,
    pub directories: usize,
    /// Files newly created by this run.
    pub created: usize,
    /// Files that were already on disk and left untouched.
    pub existing: usize,
    pub elapsed: Duration,
}

#[derive(Debug, Clone)]
pub struct LayoutReport {
    pub root: PathBuf,
    pub checked_dirs: usize,
    pub present: usize,
    /// Present files that already hold real media.
    pub non_empty: usize,
    pub missing: Vec<PathBuf>,
    pub elapsed: Duration,
}

impl LayoutReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ProgressOutcome {
    pub elapsed: Duration,
    pub total_files: u64,
    pub processed_files: u64,
}

/// Progress for a single sequential run. Human lines go to stdout; bars and
/// `[PROGRESS]` lines go to stderr.
pub struct ProgressReporter {
    label: String,
    mode: ResolvedProgressMode,
    started: Instant,
    stage: String,
    total_files: u64,
    processed_files: u64,
    bar: Option<ProgressBar>,
    finalized: bool,
}

impl ProgressReporter {
    pub fn new(label: impl Into<String>, total_files: u64, config: ProgressConfig) -> Self {
        let label = label.into();
        let mode = config.resolve_mode();

        let bar = (mode == ResolvedProgressMode::Rich).then(|| {
            let pb = ProgressBar::new(total_files.max(1));
            pb.set_style(
                ProgressStyle::with_template(
                    "{spinner:.green} [{elapsed_precise}] {wide_bar:.cyan/blue} {pos}/{len} files | {msg}",
                )
                .expect("valid progress template"),
            );
            pb.set_message(format!("{} starting", label));
            pb
        });

        Self {
            label,
            mode,
            started: Instant::now(),
            stage: "starting".to_string(),
            total_files,
            processed_files: 0,
            bar,
            finalized: false,
        }
    }

    pub fn set_stage(&mut self, stage: impl Into<String>) {
        self.stage = stage.into();
        match self.mode {
            ResolvedProgressMode::Rich => {
                if let Some(bar) = &self.bar {
                    bar.set_message(self.stage.clone());
                }
            }
            ResolvedProgressMode::Plain => self.render_plain(),
            ResolvedProgressMode::Quiet => {}
        }
    }

    pub fn inc_files(&mut self, delta: u64) {
        if delta == 0 {
            return;
        }
        self.processed_files = self.processed_files.saturating_add(delta);
        if self.total_files > 0 {
            self.processed_files = self.processed_files.min(self.total_files);
        }
        if let Some(bar) = &self.bar {
            bar.set_position(self.processed_files);
        }
    }

    /// Prints a human-facing line to stdout, keeping any bar intact.
    pub fn println(&self, line: impl AsRef<str>) {
        let line = line.as_ref();
        match (&self.mode, &self.bar) {
            (ResolvedProgressMode::Quiet, _) => {}
            (ResolvedProgressMode::Rich, Some(bar)) => bar.suspend(|| println!("{}", line)),
            _ => println!("{}", line),
        }
    }

    pub fn finish(mut self, final_message: impl Into<String>) -> ProgressOutcome {
        self.finalize(Some(final_message.into()))
    }

    fn finalize(&mut self, final_message: Option<String>) -> ProgressOutcome {
        let outcome = ProgressOutcome {
            elapsed: self.started.elapsed(),
            total_files: self.total_files,
            processed_files: self.processed_files,
        };
        if self.finalized {
            return outcome;
        }
        self.finalized = true;

        match self.mode {
            ResolvedProgressMode::Quiet => {}
            ResolvedProgressMode::Plain => {
                self.render_plain();
                if let Some(msg) = final_message.as_deref() {
                    eprintln!("[DONE] {}: {}", self.label, msg);
                }
            }
            ResolvedProgressMode::Rich => {
                if let Some(bar) = &self.bar {
                    match final_message {
                        Some(msg) => bar.finish_with_message(msg),
                        None => bar.finish_and_clear(),
                    }
                }
            }
        }
        outcome
    }

    fn render_plain(&self) {
        eprintln!(
            "[PROGRESS] {} elapsed={} stage={} done={} / {} ({:.1}%)",
            self.label,
            format_elapsed(self.started.elapsed()),
            self.stage,
            self.processed_files,
            self.total_files,
            percent(self.processed_files, self.total_files),
        );
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        let _ = self.finalize(None);
    }
}

fn percent(done: u64, total: u64) -> f64 {
    if total == 0 {
        100.0
    } else {
        (done as f64 / total as f64) * 100.0
    }
}

/// Seconds with millisecond precision under a minute, `XmYYs` above.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    if secs >= 60 {
        format!("{}m{:02}s", secs / 60, secs % 60)
    } else {
        format!("{:.3}s", elapsed.as_secs_f64())
    }
}
