//! Command-line flags layered over an optional TOML settings file.

use std::{
    fs,
    io::{BufRead, Write},
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use labot_core::Algorithm;
use serde::Deserialize;

/// Maze file looked up in the working directory when none is configured.
pub(crate) const DEFAULT_MAZE_FILE: &str = "labyrinth.txt";

const DEFAULT_PROBE_DELAY_MS: u64 = 500;
const DEFAULT_MOVE_DELAY_MS: u64 = 1000;
const DEFAULT_MAX_STEPS: u64 = 10_000;

/// Wall-following maze robot.
#[derive(Debug, Parser)]
#[command(name = "labot", version, about)]
pub(crate) struct Cli {
    /// Maze file in the `0 1 S Z` text format.
    #[arg(long)]
    pub(crate) maze: Option<PathBuf>,
    /// Wall to follow: `left` or `right`. Prompts when omitted.
    #[arg(long, short)]
    pub(crate) algorithm: Option<Algorithm>,
    /// TOML file providing defaults for every other flag.
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,
    /// Pause after each probe when drawing frames.
    #[arg(long)]
    pub(crate) probe_delay_ms: Option<u64>,
    /// Pause after each move when drawing frames.
    #[arg(long)]
    pub(crate) move_delay_ms: Option<u64>,
    /// Stop after this many probes and moves.
    #[arg(long)]
    pub(crate) max_steps: Option<u64>,
    /// How navigation is written to stdout.
    #[arg(long, value_enum)]
    pub(crate) format: Option<OutputFormat>,
    /// Ring the terminal bell on every move.
    #[arg(long)]
    pub(crate) bell: bool,
    /// Paint frames with ANSI colors.
    #[arg(long)]
    pub(crate) color: bool,
}

/// Output produced while navigating.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum OutputFormat {
    /// Redraw the maze after every event.
    #[default]
    Frames,
    /// One line of text per event.
    Events,
    /// One JSON object per event.
    Json,
}

/// Settings read from a TOML file. Every key is optional.
#[derive(Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct FileSettings {
    maze: Option<PathBuf>,
    algorithm: Option<String>,
    probe_delay_ms: Option<u64>,
    move_delay_ms: Option<u64>,
    max_steps: Option<u64>,
    format: Option<OutputFormat>,
    bell: Option<bool>,
    color: Option<bool>,
}

impl FileSettings {
    /// Reads and parses the settings file at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("failed to parse settings at {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("invalid settings toml")
    }
}

/// Where the maze comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum MazeSource {
    /// Path requested by the user; failures are fatal.
    Explicit(PathBuf),
    /// Conventional path; failures fall back to the built-in maze.
    Implicit(PathBuf),
}

/// Fully resolved settings for a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Settings {
    pub(crate) maze: MazeSource,
    pub(crate) algorithm: Option<Algorithm>,
    pub(crate) probe_delay: Duration,
    pub(crate) move_delay: Duration,
    pub(crate) max_steps: u64,
    pub(crate) format: OutputFormat,
    pub(crate) bell: bool,
    pub(crate) color: bool,
}

impl Settings {
    /// Merges flags over file settings over built-in defaults.
    pub(crate) fn resolve(cli: &Cli, file: FileSettings) -> Result<Self> {
        let maze = match cli.maze.clone().or(file.maze) {
            Some(path) => MazeSource::Explicit(path),
            None => MazeSource::Implicit(PathBuf::from(DEFAULT_MAZE_FILE)),
        };

        let algorithm = match (cli.algorithm, file.algorithm) {
            (Some(algorithm), _) => Some(algorithm),
            (None, Some(name)) => Some(
                name.parse::<Algorithm>()
                    .with_context(|| format!("invalid algorithm `{name}` in settings"))?,
            ),
            (None, None) => None,
        };

        Ok(Self {
            maze,
            algorithm,
            probe_delay: Duration::from_millis(
                cli.probe_delay_ms
                    .or(file.probe_delay_ms)
                    .unwrap_or(DEFAULT_PROBE_DELAY_MS),
            ),
            move_delay: Duration::from_millis(
                cli.move_delay_ms
                    .or(file.move_delay_ms)
                    .unwrap_or(DEFAULT_MOVE_DELAY_MS),
            ),
            max_steps: cli.max_steps.or(file.max_steps).unwrap_or(DEFAULT_MAX_STEPS),
            format: cli.format.or(file.format).unwrap_or_default(),
            bell: cli.bell || file.bell.unwrap_or(false),
            color: cli.color || file.color.unwrap_or(false),
        })
    }
}

/// Asks on `output` which wall to follow until `input` names one.
pub(crate) fn prompt_algorithm<R, W>(input: &mut R, output: &mut W) -> Result<Algorithm>
where
    R: BufRead,
    W: Write,
{
    loop {
        write!(output, "Choose an algorithm [left/right]: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            bail!("no algorithm selected");
        }

        match line.parse::<Algorithm>() {
            Ok(algorithm) => return Ok(algorithm),
            Err(error) => writeln!(output, "{error}")?,
        }
    }
}
