//! Argument definitions and process plumbing shared by the command-line tools.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, ValueEnum};

use crate::config::settings::{ColorMode, RenderSettings};
use crate::foundation::error::{TopoError, TopoResult};
use crate::input::resolve::PlotSelection;
use crate::pipeline::RenderStats;
use crate::render::labels::LabelFonts;

/// Log verbosity accepted by `--log-level`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Errors only.
    Error,
    /// Warnings and errors.
    Warn,
    /// Progress per frame.
    Info,
    /// Resolver and layout details.
    Debug,
    /// Everything.
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

/// Node colouring accepted by `--color-mode`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorModeArg {
    /// Colour by position in each frame's node enumeration.
    Positional,
    /// Colour by node identity in the reference frame.
    Identity,
}

impl From<ColorModeArg> for ColorMode {
    fn from(arg: ColorModeArg) -> Self {
        match arg {
            ColorModeArg::Positional => ColorMode::Positional,
            ColorModeArg::Identity => ColorMode::Identity,
        }
    }
}

/// Rendering options shared by both tools.
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// JSON render settings; flags below override its fields.
    #[arg(long, value_name = "JSON")]
    pub settings: Option<PathBuf>,

    /// Seed for the spring layout's initial placement.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Spring layout iterations.
    #[arg(long)]
    pub iterations: Option<u32>,

    /// Output resolution in dots per inch.
    #[arg(long)]
    pub dpi: Option<u32>,

    /// Node colouring strategy.
    #[arg(long, value_enum)]
    pub color_mode: Option<ColorModeArg>,

    /// Extra directory of `.ttf`/`.otf` fonts for labels.
    #[arg(long, value_name = "DIR")]
    pub font_dir: Option<PathBuf>,

    /// Log level (overrides TOPOFRAMES_LOG).
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,
}

impl CommonArgs {
    /// Settings from `--settings` (or defaults) with flag overrides applied and validated.
    pub fn render_settings(&self) -> TopoResult<RenderSettings> {
        let mut settings = match &self.settings {
            Some(path) => RenderSettings::load_json(path)?,
            None => RenderSettings::default(),
        };
        if let Some(seed) = self.seed {
            settings.layout.seed = seed;
        }
        if let Some(iterations) = self.iterations {
            settings.layout.iterations = iterations;
        }
        if let Some(dpi) = self.dpi {
            settings.dpi = dpi;
        }
        if let Some(mode) = self.color_mode {
            settings.color_mode = mode.into();
        }
        settings.validate()?;
        Ok(settings)
    }

    /// Label fonts: system fonts plus `--font-dir`.
    pub fn label_fonts(&self) -> TopoResult<LabelFonts> {
        LabelFonts::system(self.font_dir.as_deref())
    }
}

/// `render-graph-sequence`: neighbours and/or connections snapshots to PNG frames.
#[derive(Parser, Debug)]
#[command(name = "render-graph-sequence", version)]
pub struct SequenceCli {
    /// Directory holding `neighbours-NNN.dot` / `connections-NNN.dot`.
    pub dot_dir: PathBuf,

    /// Directory receiving `NNN.png`; cleared first.
    pub output_dir: PathBuf,

    /// Draw connections graphs (`true`/`false`).
    #[arg(action = clap::ArgAction::Set, value_parser = clap::builder::BoolishValueParser::new())]
    pub plot_connections: bool,

    /// Draw neighbours graphs (`true`/`false`).
    #[arg(action = clap::ArgAction::Set, value_parser = clap::builder::BoolishValueParser::new())]
    pub plot_neighbours: bool,

    /// Shared rendering options.
    #[command(flatten)]
    pub common: CommonArgs,
}

impl SequenceCli {
    /// Plot flags as a resolver selection.
    pub fn selection(&self) -> PlotSelection {
        PlotSelection {
            connections: self.plot_connections,
            neighbours: self.plot_neighbours,
        }
    }
}

/// `render-graph-propagation`: hop files to PNG frames over the step-0 neighbours graph.
#[derive(Parser, Debug)]
#[command(name = "render-graph-propagation", version)]
pub struct PropagationCli {
    /// Directory holding `neighbours-000.dot` and `hop-NNN.dot`.
    pub dot_dir: PathBuf,

    /// Directory receiving `000.png` and `hop-NNN.png`; cleared first.
    pub output_dir: PathBuf,

    /// Shared rendering options.
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Parse process arguments, mapping usage errors to exit code 1.
///
/// `--help` and `--version` print and yield `Err(ExitCode::SUCCESS)`.
pub fn parse_args<P: Parser>() -> Result<P, ExitCode> {
    P::try_parse().map_err(|e| {
        let _ = e.print();
        if e.use_stderr() {
            ExitCode::from(1)
        } else {
            ExitCode::SUCCESS
        }
    })
}

/// Report the outcome of a run on stderr and turn it into a process exit code.
pub fn finish(dot_dir: &Path, output_dir: &Path, result: TopoResult<RenderStats>) -> ExitCode {
    match result {
        Ok(stats) => {
            tracing::info!(
                dot_dir = %dot_dir.display(),
                output_dir = %output_dir.display(),
                frames = stats.frames_written,
                nodes_skipped = stats.nodes_skipped,
                edges_skipped = stats.edges_skipped,
                "done"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            let code = exit_code_byte(&err);
            eprintln!("error: {:#}", anyhow::Error::new(err));
            ExitCode::from(code)
        }
    }
}

fn exit_code_byte(err: &TopoError) -> u8 {
    u8::try_from(err.exit_code()).unwrap_or(1)
}

#[cfg(test)]
#[path = "../tests/unit/cli.rs"]
mod tests;
