//! Output sinks: the CSV report and one text file per candidate extract.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use repsample_core::report::{REPORT_HEADINGS, SampleReport};
use repsample_core::{ExtractId, Sampling};

/// Where a sampling run writes its files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    /// CSV report path: `<stem>_output_data.csv`.
    pub report: Utf8PathBuf,
    /// Folder of sample files: `<stem>_samples`.
    pub samples_dir: Utf8PathBuf,
}

impl OutputLayout {
    /// Name outputs after `input`, placing them in `out_dir` or beside the input.
    pub fn for_input(input: &Utf8Path, out_dir: Option<&Utf8Path>) -> Self {
        let stem = input.file_stem().unwrap_or("output");
        let base = out_dir.unwrap_or_else(|| input.parent().unwrap_or_else(|| Utf8Path::new("")));
        Self {
            report: base.join(format!("{stem}_output_data.csv")),
            samples_dir: base.join(format!("{stem}_samples")),
        }
    }
}

/// File name for a window's sample: `sample007.txt`, or `sample007_WINNER.txt` for rank 1.
pub fn sample_file_name(start: usize, winner: bool) -> String {
    let suffix = if winner { "_WINNER" } else { "" };
    format!("sample{start:03}{suffix}.txt")
}

/// Write the report as CSV: headings, the Original row, then ranked rows.
#[tracing::instrument(skip(report), fields(rows = report.ranked.len() + 1))]
pub fn write_csv_report(path: &Utf8Path, report: &SampleReport) -> anyhow::Result<()> {
    ensure_parent(path)?;
    let mut writer = csv::Writer::from_path(path.as_std_path())
        .with_context(|| format!("failed to create report {path}"))?;
    writer
        .write_record(REPORT_HEADINGS)
        .with_context(|| format!("failed to write report {path}"))?;
    for record in report.rows() {
        writer
            .write_record(record.row())
            .with_context(|| format!("failed to write report {path}"))?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to write report {path}"))?;
    debug!(%path, "report written");
    Ok(())
}

/// Write every ranked window to its own file in `dir`, creating `dir` if needed.
///
/// Returns the number of files written.
#[tracing::instrument(skip(sampling, progress), fields(candidates = sampling.ranked().len()))]
pub fn write_samples(
    dir: &Utf8Path,
    sampling: &Sampling<'_>,
    progress: &ProgressBar,
) -> anyhow::Result<usize> {
    if !dir.is_dir() {
        std::fs::create_dir_all(dir.as_std_path())
            .with_context(|| format!("failed to create directory {dir}"))?;
        info!(%dir, "created sample directory");
    } else {
        let removed = clear_stale_samples(dir)?;
        if removed > 0 {
            debug!(%dir, removed, "removed samples from an earlier run");
        }
    }

    progress.set_length(sampling.ranked().len() as u64);
    let mut written = 0;
    for extract in sampling.ranked() {
        let ExtractId::Window(start) = extract.id() else {
            continue;
        };
        let path = dir.join(sample_file_name(start, extract.rank() == 1));
        std::fs::write(path.as_std_path(), extract.text())
            .with_context(|| format!("failed to write sample {path}"))?;
        written += 1;
        progress.inc(1);
    }
    progress.finish_and_clear();

    debug!(%dir, written, "samples written");
    Ok(written)
}

/// Delete `sample*.txt` files so a rerun never leaves a second winner behind.
/// Other files in the folder are left alone.
fn clear_stale_samples(dir: &Utf8Path) -> anyhow::Result<usize> {
    let entries =
        std::fs::read_dir(dir.as_std_path()).with_context(|| format!("failed to read {dir}"))?;
    let mut removed = 0;
    for entry in entries {
        let entry = entry.with_context(|| format!("failed to read {dir}"))?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if name.starts_with("sample") && name.ends_with(".txt") && entry.path().is_file() {
            std::fs::remove_file(entry.path())
                .with_context(|| format!("failed to remove stale sample {dir}/{name}"))?;
            removed += 1;
        }
    }
    Ok(removed)
}

/// Progress bar for sample writing, hidden when `quiet`.
pub fn sample_progress(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(0);
    if let Ok(style) = ProgressStyle::with_template("{msg} [{bar:30}] {pos}/{len}") {
        bar.set_style(style.progress_chars("=> "));
    }
    bar.set_message("writing samples");
    bar
}

fn ensure_parent(path: &Utf8Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
        && !parent.is_dir()
    {
        std::fs::create_dir_all(parent.as_std_path())
            .with_context(|| format!("failed to create directory {parent}"))?;
    }
    Ok(())
}
