//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::{
    path::{Component, Path, PathBuf},
    str::FromStr,
};

use clap::{Args, Parser, Subcommand, ValueHint, builder::BoolishValueParser};
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "plotwist";
const ENV_PREFIX: &str = "PLOTWIST";
const DEFAULT_OUTPUT_DIRECTORY: &str = "report";
const DEFAULT_OUTPUT_FILE_NAME: &str = "index.html";
const DEFAULT_PLOTS_DIR: &str = "plots";
const DEFAULT_DOCUMENT_TITLE: &str = "Report";

/// Command-line arguments for the plotwist binary.
#[derive(Debug, Parser)]
#[command(
    name = "plotwist",
    version,
    about = "Compile report manifests into a single HTML document"
)]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "PLOTWIST_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Compile a manifest and write the report document.
    Build(BuildArgs),
    /// Validate a manifest and assemble the document without writing anything.
    Check(CheckArgs),
}

impl Command {
    pub fn manifest(&self) -> &Path {
        match self {
            Command::Build(args) => &args.manifest,
            Command::Check(args) => &args.manifest,
        }
    }
}

#[derive(Debug, Args, Clone)]
pub struct BuildArgs {
    /// Report manifest to compile.
    #[arg(value_name = "MANIFEST", value_hint = ValueHint::FilePath)]
    pub manifest: PathBuf,

    #[command(flatten)]
    pub overrides: BuildOverrides,
}

#[derive(Debug, Args, Clone)]
pub struct CheckArgs {
    /// Report manifest to validate.
    #[arg(value_name = "MANIFEST", value_hint = ValueHint::FilePath)]
    pub manifest: PathBuf,

    #[command(flatten)]
    pub logging: LoggingOverrides,
}

#[derive(Debug, Args, Default, Clone)]
pub struct LoggingOverrides {
    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,
    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct BuildOverrides {
    #[command(flatten)]
    pub logging: LoggingOverrides,
    /// Override the directory the report is written into.
    #[arg(long = "output-dir", value_name = "PATH", value_hint = ValueHint::DirPath)]
    pub output_directory: Option<PathBuf>,
    /// Override the document file name inside the output directory.
    #[arg(long = "output-file", value_name = "NAME")]
    pub output_file_name: Option<String>,
    /// Override the document title; takes precedence over the manifest title.
    #[arg(long = "title", value_name = "TEXT")]
    pub title: Option<String>,
    /// Toggle MathJax support in the document head.
    #[arg(
        long = "mathjax",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub mathjax: Option<bool>,
}

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub output: OutputSettings,
    pub document: DocumentSettings,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Clone)]
pub struct OutputSettings {
    pub directory: PathBuf,
    pub file_name: String,
    /// Artifact directory relative to `directory`, always forward-slash separated.
    pub plots_dir: String,
}

impl OutputSettings {
    pub fn document_path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }
}

#[derive(Debug, Clone)]
pub struct DocumentSettings {
    pub title: String,
    pub mathjax: bool,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;

    match &cli.command {
        Command::Build(args) => raw.apply_build_overrides(&args.overrides),
        Command::Check(args) => raw.apply_logging_overrides(&args.logging),
    }

    Settings::from_raw(raw)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    logging: RawLoggingSettings,
    output: RawOutputSettings,
    document: RawDocumentSettings,
}

impl RawSettings {
    fn apply_build_overrides(&mut self, overrides: &BuildOverrides) {
        self.apply_logging_overrides(&overrides.logging);
        if let Some(directory) = overrides.output_directory.as_ref() {
            self.output.directory = Some(directory.clone());
        }
        if let Some(file_name) = overrides.output_file_name.as_ref() {
            self.output.file_name = Some(file_name.clone());
        }
        if let Some(title) = overrides.title.as_ref() {
            self.document.title = Some(title.clone());
        }
        if let Some(mathjax) = overrides.mathjax {
            self.document.mathjax = Some(mathjax);
        }
    }

    fn apply_logging_overrides(&mut self, overrides: &LoggingOverrides) {
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        Ok(Self {
            logging: build_logging_settings(raw.logging)?,
            output: build_output_settings(raw.output)?,
            document: build_document_settings(raw.document)?,
        })
    }
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

fn build_output_settings(output: RawOutputSettings) -> Result<OutputSettings, LoadError> {
    let directory = output
        .directory
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIRECTORY));
    if directory.as_os_str().is_empty() {
        return Err(LoadError::invalid("output.directory", "must not be empty"));
    }

    let file_name = output
        .file_name
        .map(|value| value.trim().to_string())
        .unwrap_or_else(|| DEFAULT_OUTPUT_FILE_NAME.to_string());
    if file_name.is_empty() {
        return Err(LoadError::invalid("output.file_name", "must not be empty"));
    }
    if !is_single_component(Path::new(&file_name)) {
        return Err(LoadError::invalid(
            "output.file_name",
            "must be a plain file name without directories",
        ));
    }

    let plots_dir = output
        .plots_dir
        .map(|value| value.trim().trim_matches('/').to_string())
        .unwrap_or_else(|| DEFAULT_PLOTS_DIR.to_string());
    let escapes = Path::new(&plots_dir)
        .components()
        .any(|component| !matches!(component, Component::Normal(_)));
    if escapes {
        return Err(LoadError::invalid(
            "output.plots_dir",
            "must be a relative path inside the output directory",
        ));
    }

    Ok(OutputSettings {
        directory,
        file_name,
        plots_dir,
    })
}

fn build_document_settings(document: RawDocumentSettings) -> Result<DocumentSettings, LoadError> {
    let title = document
        .title
        .unwrap_or_else(|| DEFAULT_DOCUMENT_TITLE.to_string());
    if title.trim().is_empty() {
        return Err(LoadError::invalid("document.title", "must not be empty"));
    }

    Ok(DocumentSettings {
        title,
        mathjax: document.mathjax.unwrap_or(true),
    })
}

fn is_single_component(path: &Path) -> bool {
    let mut components = path.components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawOutputSettings {
    directory: Option<PathBuf>,
    file_name: Option<String>,
    plots_dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawDocumentSettings {
    title: Option<String>,
    mathjax: Option<bool>,
}

pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}
