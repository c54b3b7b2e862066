//! Sample command: rank every window of a text against the whole.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, info, instrument};

use repsample_core::{Config, Document, SampleReport};

use super::read_input_file;
use crate::output::{self, OutputLayout};

/// Arguments for the `sample` subcommand.
#[derive(Args, Debug)]
pub struct SampleArgs {
    /// Text file to sample.
    pub file: Utf8PathBuf,

    /// Target words per sample (defaults to config `sample_length`).
    #[arg(short = 'n', long, value_name = "WORDS")]
    pub length: Option<usize>,

    /// Directory for the report and sample folder (defaults to the input's directory).
    #[arg(short, long, value_name = "DIR")]
    pub out_dir: Option<Utf8PathBuf>,

    /// Number of ranked windows to show in the summary.
    #[arg(long, default_value_t = 5)]
    pub top: usize,

    /// Skip writing per-window sample files.
    #[arg(long)]
    pub no_samples: bool,

    /// Skip writing the CSV report.
    #[arg(long)]
    pub no_report: bool,

    /// Treat the input as markdown regardless of extension.
    #[arg(long, conflicts_with = "plain")]
    pub markdown: bool,

    /// Treat the input as plain text regardless of extension.
    #[arg(long)]
    pub plain: bool,

    /// Print the winning extract's text.
    #[arg(long)]
    pub show_winner: bool,
}

impl SampleArgs {
    fn strip_markdown(&self, config: &Config) -> bool {
        if self.markdown {
            return true;
        }
        if self.plain {
            return false;
        }
        config
            .strip_markdown
            .unwrap_or_else(|| is_markdown_path(&self.file))
    }
}

fn is_markdown_path(path: &Utf8Path) -> bool {
    matches!(path.extension(), Some("md" | "markdown"))
}

#[derive(Serialize)]
struct SampleOutput {
    file: Utf8PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    report_path: Option<Utf8PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    samples_dir: Option<Utf8PathBuf>,
    #[serde(flatten)]
    report: SampleReport,
}

/// Sample a file, write the report and sample files, and print a summary.
#[instrument(name = "cmd_sample", skip_all, fields(file = %args.file))]
pub fn cmd_sample(
    args: SampleArgs,
    global_json: bool,
    quiet: bool,
    config: &Config,
) -> anyhow::Result<()> {
    let sample_length = args.length.unwrap_or(config.sample_length);
    let strip_markdown = args.strip_markdown(config);
    debug!(sample_length, strip_markdown, "executing sample command");

    let content = read_input_file(&args.file, config.input_limit())?;
    let document = if strip_markdown {
        Document::from_markdown(&content)
    } else {
        Document::parse(&content)
    };
    let sampling = document
        .sample(sample_length)
        .with_context(|| format!("failed to sample {}", args.file))?;
    let report = SampleReport::from_sampling(&sampling, args.show_winner, false);

    let out_dir = args.out_dir.as_deref().or(config.output_dir.as_deref());
    let layout = OutputLayout::for_input(&args.file, out_dir);
    let write_report = config.write_report && !args.no_report;
    let write_samples = config.write_samples && !args.no_samples && !sampling.ranked().is_empty();

    if write_report {
        output::write_csv_report(&layout.report, &report)?;
    }
    if write_samples {
        let progress = output::sample_progress(quiet || global_json);
        output::write_samples(&layout.samples_dir, &sampling, &progress)?;
    }
    info!(
        candidates = report.ranked.len(),
        winner = report.winner().map(|w| w.extract.as_str()),
        "sample command complete"
    );

    let result = SampleOutput {
        file: args.file.clone(),
        report_path: write_report.then(|| layout.report.clone()),
        samples_dir: write_samples.then(|| layout.samples_dir.clone()),
        report,
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_summary(&result, args.top);
    }
    Ok(())
}

fn print_summary(output: &SampleOutput, top: usize) {
    let report = &output.report;
    let population = &report.population;

    println!(
        "{} {} sentences, {} words",
        output.file.bold(),
        report.sentences,
        report.reference.words,
    );
    println!(
        "{}: {:.3} (sd {:.3})",
        "Average word length".dimmed(),
        population.word_length.mean,
        population.word_length.std_dev,
    );
    println!(
        "{}: {:.3} (sd {:.3})",
        "Average sentence length".dimmed(),
        population.sentence_length.mean,
        population.sentence_length.std_dev,
    );
    println!(
        "{}: {} words, {} candidates",
        "Target".dimmed(),
        report.sample_length,
        report.ranked.len(),
    );

    match report.winner() {
        None => {
            println!();
            println!(
                "{}",
                format!(
                    "No extract reaches {} words; the text is too short for this sample length.",
                    report.sample_length
                )
                .yellow()
            );
        }
        Some(winner) => {
            println!();
            println!(
                "{} sample {} (combined Z² {:.4})",
                "WINNER:".green().bold(),
                winner.extract,
                winner.combined_z_squared,
            );
            if let Some(ref text) = winner.text {
                println!();
                println!("{text}");
            }

            println!();
            println!(
                "{:>4}  {:>8}  {:>5}  {:>6}  {:>8}  {:>6}  {:>8}  {:>10}",
                "Rank".dimmed(),
                "Sample #".dimmed(),
                "Words".dimmed(),
                "AWL".dimmed(),
                "AWL-Z²".dimmed(),
                "ASL".dimmed(),
                "ASL-Z²".dimmed(),
                "Combined".dimmed(),
            );
            for record in report.ranked.iter().take(top) {
                println!(
                    "{:>4}  {:>8}  {:>5}  {:>6.3}  {:>8.4}  {:>6.2}  {:>8.4}  {:>10.4}",
                    record.rank,
                    record.extract,
                    record.words,
                    record.awl,
                    record.awl_z_squared,
                    record.asl,
                    record.asl_z_squared,
                    record.combined_z_squared,
                );
            }
            if report.ranked.len() > top {
                println!("{}", format!("… {} more", report.ranked.len() - top).dimmed());
            }
        }
    }

    if output.report_path.is_some() || output.samples_dir.is_some() {
        println!();
    }
    if let Some(ref path) = output.report_path {
        println!("{}: {}", "Report".dimmed(), path.cyan());
    }
    if let Some(ref dir) = output.samples_dir {
        println!("{}: {}", "Samples".dimmed(), dir.cyan());
    }
}
