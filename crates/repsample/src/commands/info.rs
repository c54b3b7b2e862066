//! Info command: package metadata and the effective settings.

use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use repsample_core::config::{Config, ConfigSources};

/// Arguments for the `info` subcommand.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {}

#[derive(Serialize)]
struct Package {
    name: &'static str,
    version: &'static str,
    description: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    license: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    repository: &'static str,
}

const PACKAGE: Package = Package {
    name: env!("CARGO_PKG_NAME"),
    version: env!("CARGO_PKG_VERSION"),
    description: env!("CARGO_PKG_DESCRIPTION"),
    license: env!("CARGO_PKG_LICENSE"),
    repository: env!("CARGO_PKG_REPOSITORY"),
};

#[derive(Serialize)]
struct Settings {
    config_file: Option<String>,
    log_level: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_dir: Option<String>,
    sample_length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    output_dir: Option<String>,
    write_samples: bool,
    write_report: bool,
    strip_markdown: Option<bool>,
    max_input_bytes: Option<usize>,
}

impl Settings {
    fn new(config: &Config, sources: &ConfigSources) -> Self {
        Self {
            config_file: sources.primary_file().map(ToString::to_string),
            log_level: config.log_level.as_str(),
            log_dir: config.log_dir.as_ref().map(ToString::to_string),
            sample_length: config.sample_length,
            output_dir: config.output_dir.as_ref().map(ToString::to_string),
            write_samples: config.write_samples,
            write_report: config.write_report,
            strip_markdown: config.strip_markdown,
            max_input_bytes: config.input_limit(),
        }
    }

    fn print(&self) {
        let row = |label: &str, value: &dyn std::fmt::Display| {
            println!("  {:<17} {value}", format!("{label}:").dimmed());
        };
        let switch = |on: bool| if on { "yes" } else { "no" };

        row(
            "Config file",
            &self.config_file.as_deref().unwrap_or("none loaded"),
        );
        row("Log level", &self.log_level);
        if let Some(ref dir) = self.log_dir {
            row("Log directory", dir);
        }
        row("Sample length", &format!("{} words", self.sample_length));
        row(
            "Output directory",
            &self.output_dir.as_deref().unwrap_or("beside input"),
        );
        row("Write samples", &switch(self.write_samples));
        row("Write report", &switch(self.write_report));
        row(
            "Strip markdown",
            &match self.strip_markdown {
                Some(true) => "always",
                Some(false) => "never",
                None => "by extension",
            },
        );
        match self.max_input_bytes {
            Some(limit) => row("Input limit", &format!("{limit} bytes")),
            None => row("Input limit", &"disabled"),
        }
    }
}

#[derive(Serialize)]
struct Info {
    #[serde(flatten)]
    package: Package,
    config: Settings,
}

/// Print package information and the settings a `sample` run would use.
#[instrument(name = "cmd_info", skip_all)]
pub fn cmd_info(
    _args: InfoArgs,
    global_json: bool,
    config: &Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    debug!(json_output = global_json, "executing info command");
    let info = Info {
        package: PACKAGE,
        config: Settings::new(config, sources),
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("{} {}", info.package.name.bold(), info.package.version.green());
    println!("{}", info.package.description);
    if !info.package.repository.is_empty() {
        println!("{}", info.package.repository.cyan());
    }
    println!();
    println!("{}", "Settings".bold().underline());
    info.config.print();
    Ok(())
}
