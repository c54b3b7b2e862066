//! Settings for a sampling run and where they come from.
//!
//! [`ConfigLoader`] layers, lowest to highest:
//!
//! 1. built-in defaults
//! 2. `config.<ext>` in the user config directory (`~/.config/repsample` on Linux)
//! 3. `.repsample.<ext>` then `repsample.<ext>` from the nearest directory at or
//!    above the search root that has any, stopping at a `.git` boundary
//! 4. files passed with [`ConfigLoader::with_file`], in order
//! 5. `REPSAMPLE_*` environment variables
//!
//! `<ext>` is one of `toml`, `yaml`, `yml`, `json`; when several exist side by
//! side they are all merged in that order.
//!
//! ```no_run
//! use camino::Utf8PathBuf;
//! use repsample_core::config::ConfigLoader;
//!
//! let cwd = Utf8PathBuf::try_from(std::env::current_dir().unwrap()).unwrap();
//! let (config, sources) = ConfigLoader::new().with_project_search(&cwd).load().unwrap();
//! println!("{} words per sample from {:?}", config.sample_length, sources.primary_file());
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::{DEFAULT_MAX_INPUT_BYTES, DEFAULT_SAMPLE_LENGTH};

const APP_NAME: &str = "repsample";
const ENV_PREFIX: &str = "REPSAMPLE_";
const EXTENSIONS: [&str; 4] = ["toml", "yaml", "yml", "json"];

/// Effective settings. Command-line flags override these.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Minimum level of emitted log events.
    pub log_level: LogLevel,
    /// Directory for JSONL log files. No file logging when unset.
    pub log_dir: Option<Utf8PathBuf>,
    /// Target words per sample.
    pub sample_length: usize,
    /// Directory that receives the CSV report and the samples folder.
    ///
    /// Defaults to the input file's directory.
    pub output_dir: Option<Utf8PathBuf>,
    /// Write each candidate window to its own text file.
    pub write_samples: bool,
    /// Write the CSV report.
    pub write_report: bool,
    /// Treat input as markdown and sample only its prose.
    ///
    /// Unset means: strip markdown for `.md` / `.markdown` files only.
    pub strip_markdown: Option<bool>,
    /// Largest accepted input in bytes; 5 MiB when unset.
    pub max_input_bytes: Option<usize>,
    /// Accept input of any size, ignoring `max_input_bytes`.
    pub disable_input_limit: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            log_dir: None,
            sample_length: DEFAULT_SAMPLE_LENGTH,
            output_dir: None,
            write_samples: true,
            write_report: true,
            strip_markdown: None,
            max_input_bytes: None,
            disable_input_limit: false,
        }
    }
}

impl Config {
    /// The effective input size limit, if any.
    pub fn input_limit(&self) -> Option<usize> {
        (!self.disable_input_limit).then(|| self.max_input_bytes.unwrap_or(DEFAULT_MAX_INPUT_BYTES))
    }
}

/// Minimum level of emitted log events.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Everything, including per-window decisions.
    Debug,
    /// Run summaries.
    #[default]
    Info,
    /// Skipped windows and other recoverable surprises.
    Warn,
    /// Failures only.
    Error,
}

impl LogLevel {
    /// Lowercase name, usable as an `EnvFilter` directive.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// The files a [`ConfigLoader`] merged, so callers can report them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigSources {
    /// Project files from the nearest matching directory, lowest precedence first.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub project_files: Vec<Utf8PathBuf>,
    /// File from the user config directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_file: Option<Utf8PathBuf>,
    /// Files given explicitly, e.g. with `--config`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigSources {
    /// The file with the final say: last explicit, else last project, else user.
    pub fn primary_file(&self) -> Option<&Utf8Path> {
        self.explicit_files
            .last()
            .or_else(|| self.project_files.last())
            .map(Utf8PathBuf::as_path)
            .or(self.user_file.as_deref())
    }

    /// Every file in merge order.
    pub fn files(&self) -> impl Iterator<Item = &Utf8Path> {
        self.user_file
            .iter()
            .chain(&self.project_files)
            .chain(&self.explicit_files)
            .map(Utf8PathBuf::as_path)
    }

    /// True when no file was found.
    pub fn is_empty(&self) -> bool {
        self.files().next().is_none()
    }
}

/// Discovers and merges configuration.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    search_root: Option<Utf8PathBuf>,
    user_config: bool,
    boundary: Option<String>,
    explicit: Vec<Utf8PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// A loader that reads user config and stops project search at `.git`.
    pub fn new() -> Self {
        Self {
            search_root: None,
            user_config: true,
            boundary: Some(".git".to_string()),
            explicit: Vec::new(),
        }
    }

    /// Search for project files from `dir` upwards.
    pub fn with_project_search<P: AsRef<Utf8Path>>(mut self, dir: P) -> Self {
        self.search_root = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Include or skip the user config directory.
    pub const fn with_user_config(mut self, include: bool) -> Self {
        self.user_config = include;
        self
    }

    /// Stop the upward search at a directory containing `marker`.
    ///
    /// Files beside the marker are still found.
    pub fn with_boundary_marker<S: Into<String>>(mut self, marker: S) -> Self {
        self.boundary = Some(marker.into());
        self
    }

    /// Search all the way to the filesystem root.
    pub fn without_boundary_marker(mut self) -> Self {
        self.boundary = None;
        self
    }

    /// Merge `path` after everything discovered. Later calls win.
    pub fn with_file<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.explicit.push(path.as_ref().to_path_buf());
        self
    }

    /// Merge every source and deserialize the result.
    #[tracing::instrument(skip(self), fields(search_root = ?self.search_root))]
    pub fn load(self) -> ConfigResult<(Config, ConfigSources)> {
        let sources = self.discover();
        if sources.is_empty() {
            tracing::debug!("no config file found, using defaults");
        }

        let figment = sources
            .files()
            .fold(
                Figment::from(Serialized::defaults(Config::default())),
                merge_file,
            )
            .merge(Env::prefixed(ENV_PREFIX).lowercase(true));
        let config: Config = figment
            .extract()
            .map_err(|e| ConfigError::Deserialize(Box::new(e)))?;

        tracing::debug!(
            files = sources.files().count(),
            log_level = config.log_level.as_str(),
            sample_length = config.sample_length,
            "configuration loaded"
        );
        Ok((config, sources))
    }

    fn discover(&self) -> ConfigSources {
        ConfigSources {
            user_file: self.user_config.then(find_user_config).flatten(),
            project_files: self
                .search_root
                .as_deref()
                .map(|root| self.find_project_files(root))
                .unwrap_or_default(),
            explicit_files: self.explicit.clone(),
        }
    }

    /// All project files in the nearest directory that has any, dotfiles first.
    fn find_project_files(&self, start: &Utf8Path) -> Vec<Utf8PathBuf> {
        for dir in start.ancestors() {
            let found: Vec<Utf8PathBuf> = [format!(".{APP_NAME}"), APP_NAME.to_string()]
                .iter()
                .flat_map(|stem| EXTENSIONS.iter().map(move |ext| dir.join(format!("{stem}.{ext}"))))
                .filter(|path| path.is_file())
                .collect();
            if !found.is_empty() {
                return found;
            }

            let at_boundary = self
                .boundary
                .as_ref()
                .is_some_and(|marker| dir != start && dir.join(marker).exists());
            if at_boundary {
                break;
            }
        }
        Vec::new()
    }
}

fn find_user_config() -> Option<Utf8PathBuf> {
    let dir = user_config_dir()?;
    EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("config.{ext}")))
        .find(|path| path.is_file())
}

fn merge_file(figment: Figment, path: &Utf8Path) -> Figment {
    match path.extension() {
        Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path.as_str())),
        Some("json") => figment.merge(Json::file_exact(path.as_str())),
        _ => figment.merge(Toml::file_exact(path.as_str())),
    }
}

/// The per-user config directory, e.g. `~/.config/repsample` on Linux or
/// `~/Library/Application Support/repsample` on macOS.
pub fn user_config_dir() -> Option<Utf8PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", APP_NAME)?;
    Utf8PathBuf::from_path_buf(dirs.config_dir().to_path_buf()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Serializes tests that mutate environment variables via `set_var`/`remove_var`.
    static TEST_ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn utf8(path: &std::path::Path) -> Utf8PathBuf {
        Utf8PathBuf::try_from(path.to_path_buf()).unwrap()
    }

    fn load_from(dir: &std::path::Path) -> (Config, ConfigSources) {
        ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .with_project_search(utf8(dir))
            .load()
            .unwrap()
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.sample_length, 300);
        assert!(config.write_samples);
        assert!(config.write_report);
        assert!(config.strip_markdown.is_none());
        assert!(config.output_dir.is_none());
        assert_eq!(config.input_limit(), Some(DEFAULT_MAX_INPUT_BYTES));
    }

    #[test]
    fn loads_defaults_without_files() {
        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .load()
            .unwrap();
        assert_eq!(config.sample_length, DEFAULT_SAMPLE_LENGTH);
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(sources.primary_file().is_none());
        assert!(sources.is_empty());
    }

    #[test]
    fn explicit_file_sets_fields() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("custom.toml");
        fs::write(
            &path,
            "sample_length = 150\nwrite_samples = false\noutput_dir = \"/tmp/out\"\nstrip_markdown = true\n",
        )
        .unwrap();

        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .with_file(utf8(&path))
            .load()
            .unwrap();

        assert_eq!(config.sample_length, 150);
        assert!(!config.write_samples);
        assert!(config.write_report);
        assert_eq!(config.strip_markdown, Some(true));
        assert_eq!(config.output_dir.as_deref().map(Utf8Path::as_str), Some("/tmp/out"));
        assert_eq!(sources.explicit_files.len(), 1);
    }

    #[test]
    fn later_file_overrides_earlier() {
        let tmp = TempDir::new().unwrap();
        let base = tmp.path().join("base.toml");
        let over = tmp.path().join("override.yaml");
        fs::write(&base, "sample_length = 200\nlog_level = \"warn\"\n").unwrap();
        fs::write(&over, "sample_length: 250\n").unwrap();

        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .with_file(utf8(&base))
            .with_file(utf8(&over))
            .load()
            .unwrap();

        assert_eq!(config.sample_length, 250);
        assert_eq!(config.log_level, LogLevel::Warn);
        assert!(sources.primary_file().unwrap().as_str().ends_with("override.yaml"));
    }

    #[test]
    fn discovers_project_config_in_parent() {
        let tmp = TempDir::new().unwrap();
        let deep = tmp.path().join("a").join("b");
        fs::create_dir_all(&deep).unwrap();
        fs::write(tmp.path().join(".repsample.toml"), "sample_length = 120\n").unwrap();

        let (config, sources) = load_from(&deep);
        assert_eq!(config.sample_length, 120);
        assert_eq!(sources.project_files.len(), 1);
    }

    #[test]
    fn regular_file_overrides_dotfile() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".repsample.toml"), "sample_length = 100\n").unwrap();
        fs::write(tmp.path().join("repsample.json"), r#"{"sample_length": 400}"#).unwrap();

        let (config, sources) = load_from(tmp.path());
        assert_eq!(config.sample_length, 400);
        assert_eq!(sources.project_files.len(), 2);
    }

    #[test]
    fn only_closest_directory_contributes() {
        let tmp = TempDir::new().unwrap();
        let child = tmp.path().join("child");
        fs::create_dir_all(&child).unwrap();
        fs::write(tmp.path().join(".repsample.toml"), "write_report = false\n").unwrap();
        fs::write(child.join(".repsample.toml"), "sample_length = 80\n").unwrap();

        let (config, sources) = load_from(&child);
        assert_eq!(config.sample_length, 80);
        assert!(config.write_report, "parent config should not be merged");
        assert_eq!(sources.project_files.len(), 1);
    }

    #[test]
    fn boundary_marker_stops_search() {
        let tmp = TempDir::new().unwrap();
        let repo = tmp.path().join("repo");
        let work = repo.join("work");
        fs::create_dir_all(&work).unwrap();
        fs::create_dir(repo.join(".git")).unwrap();
        fs::write(tmp.path().join(".repsample.toml"), "sample_length = 50\n").unwrap();

        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .with_boundary_marker(".git")
            .with_project_search(utf8(&work))
            .load()
            .unwrap();

        assert_eq!(config.sample_length, DEFAULT_SAMPLE_LENGTH);
        assert!(sources.project_files.is_empty());
    }

    #[test]
    fn invalid_value_is_a_deserialize_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.toml");
        fs::write(&path, "sample_length = \"lots\"\n").unwrap();

        let result = ConfigLoader::new()
            .with_user_config(false)
            .with_file(utf8(&path))
            .load();
        assert!(matches!(result, Err(ConfigError::Deserialize(_))));
    }

    #[test]
    fn input_limit_respects_overrides() {
        let config = Config {
            max_input_bytes: Some(1024),
            ..Config::default()
        };
        assert_eq!(config.input_limit(), Some(1024));

        let config = Config {
            max_input_bytes: Some(1024),
            disable_input_limit: true,
            ..Config::default()
        };
        assert_eq!(config.input_limit(), None);
    }

    #[test]
    fn yaml_config_deserializes() {
        let yaml = "sample_length: 275\nlog_level: debug\nwrite_samples: false\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.sample_length, 275);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert!(!config.write_samples);
    }

    #[test]
    #[allow(unsafe_code)]
    fn env_var_overrides_file_config() {
        let _lock = TEST_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "log_dir = \"/tmp/from-file\"\n").unwrap();

        // SAFETY: Test environment; the mutex serializes env access across tests.
        unsafe {
            std::env::set_var("REPSAMPLE_LOG_DIR", "/tmp/from-env");
        }

        let result = ConfigLoader::new()
            .with_user_config(false)
            .with_file(utf8(&path))
            .load();

        // SAFETY: Cleanup after test.
        unsafe {
            std::env::remove_var("REPSAMPLE_LOG_DIR");
        }

        let (config, _sources) = result.unwrap();
        assert_eq!(
            config.log_dir.as_deref().map(Utf8Path::as_str),
            Some("/tmp/from-env")
        );
    }

    #[test]
    fn sources_list_files_in_merge_order() {
        let sources = ConfigSources {
            project_files: vec![Utf8PathBuf::from("p/.repsample.toml")],
            user_file: Some(Utf8PathBuf::from("u/config.toml")),
            explicit_files: vec![Utf8PathBuf::from("x.json")],
        };
        let files: Vec<&str> = sources.files().map(Utf8Path::as_str).collect();
        assert_eq!(files, ["u/config.toml", "p/.repsample.toml", "x.json"]);
        assert_eq!(sources.primary_file().map(Utf8Path::as_str), Some("x.json"));
        assert!(ConfigSources::default().is_empty());
    }

    #[test]
    fn user_config_dir_names_app() {
        if let Some(path) = user_config_dir() {
            assert!(path.as_str().contains("repsample"));
        }
    }
}
