#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that lets the labot robot follow a wall through a maze.

mod config;
mod text;

use std::{
    fs,
    io::{self, Write},
    path::Path,
    process::ExitCode,
    thread,
    time::Duration,
};

use anyhow::{Context, Result};
use clap::Parser;
use labot_core::Event;
use labot_rendering::{RenderingBackend, Scene};
use labot_system_navigation::{Session, Status};
use labot_world::{loader, Grid};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use self::{
    config::{Cli, FileSettings, MazeSource, OutputFormat, Settings},
    text::TextBackend,
};

const DEFAULT_LOG_FILTER: &str = "warn,labot=info";
const EXIT_STUCK: u8 = 2;
const EXIT_EXHAUSTED: u8 = 3;

/// Entry point for the labot command-line interface.
fn main() -> Result<ExitCode> {
    init_tracing();

    let cli = Cli::parse();
    let file = match &cli.config {
        Some(path) => FileSettings::load(path)?,
        None => FileSettings::default(),
    };
    let settings = Settings::resolve(&cli, file)?;

    let grid = load_grid(&settings.maze)?;
    let algorithm = match settings.algorithm {
        Some(algorithm) => algorithm,
        None => config::prompt_algorithm(&mut io::stdin().lock(), &mut io::stderr())?,
    };

    let mut session = Session::start(grid, algorithm).context("maze cannot be navigated")?;
    let stdout = io::stdout();
    let status = drive(&mut session, &settings, stdout.lock())?;
    info!(
        ?status,
        steps = session.steps(),
        moves = session.moves(),
        "navigation finished"
    );

    Ok(match status {
        Status::Arrived => ExitCode::SUCCESS,
        Status::Stuck => ExitCode::from(EXIT_STUCK),
        Status::Exhausted => ExitCode::from(EXIT_EXHAUSTED),
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_grid(source: &MazeSource) -> Result<Grid> {
    match source {
        MazeSource::Explicit(path) => read_grid(path),
        MazeSource::Implicit(path) => read_grid(path).or_else(|error| {
            warn!(
                path = %path.display(),
                error = %format!("{error:#}"),
                "falling back to the built-in maze"
            );
            Ok(Grid::default_maze())
        }),
    }
}

fn read_grid(path: &Path) -> Result<Grid> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read maze at {}", path.display()))?;
    loader::parse(&contents).with_context(|| format!("invalid maze in {}", path.display()))
}

/// Steps the session until it ends or the step budget runs out.
fn drive<W: Write>(session: &mut Session, settings: &Settings, out: W) -> Result<Status> {
    let mut sink = Sink::new(session, settings, out);
    sink.begin()?;

    for _ in 0..settings.max_steps {
        let event = session.step();
        sink.emit(&event)?;

        match event {
            Event::Arrived { .. } => return Ok(Status::Arrived),
            Event::Stuck { .. } => return Ok(Status::Stuck),
            Event::Probing { .. } => sink.pause(settings.probe_delay),
            Event::Moved { .. } => sink.pause(settings.move_delay),
        }
    }

    warn!(max_steps = settings.max_steps, "step budget exhausted");
    sink.abandon()?;
    Ok(Status::Exhausted)
}

/// Destination for navigation events.
enum Sink<W> {
    Frames {
        scene: Box<Scene>,
        backend: TextBackend<W>,
    },
    Events(W),
    Json(W),
}

impl<W: Write> Sink<W> {
    fn new(session: &Session, settings: &Settings, out: W) -> Self {
        match settings.format {
            OutputFormat::Frames => Self::Frames {
                scene: Box::new(Scene::new(
                    session.grid().clone(),
                    session.algorithm(),
                    session.robot(),
                )),
                backend: TextBackend::new(out, settings.color, settings.bell, true),
            },
            OutputFormat::Events => Self::Events(out),
            OutputFormat::Json => Self::Json(out),
        }
    }

    fn begin(&mut self) -> Result<()> {
        match self {
            Self::Frames { scene, backend } => backend.present(scene),
            Self::Events(_) | Self::Json(_) => Ok(()),
        }
    }

    fn emit(&mut self, event: &Event) -> Result<()> {
        match self {
            Self::Frames { scene, backend } => {
                let cue = scene.apply(event);
                backend.present(scene)?;
                if let Some(cue) = cue {
                    if let Err(error) = backend.play(cue) {
                        warn!(?cue, error = %format!("{error:#}"), "audio cue failed");
                    }
                }
                Ok(())
            }
            Self::Events(out) => {
                writeln!(out, "{}", text::describe(event))?;
                Ok(())
            }
            Self::Json(out) => {
                serde_json::to_writer(&mut *out, event)?;
                writeln!(out)?;
                Ok(())
            }
        }
    }

    /// Animation pacing; only frames are paced.
    fn pause(&self, delay: Duration) {
        if matches!(self, Self::Frames { .. }) && !delay.is_zero() {
            thread::sleep(delay);
        }
    }

    fn abandon(&mut self) -> Result<()> {
        match self {
            Self::Frames { scene, backend } => {
                scene.abandon();
                backend.present(scene)
            }
            Self::Events(out) => {
                writeln!(out, "gave up")?;
                Ok(())
            }
            Self::Json(_) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use labot_core::Algorithm;

    const SAMPLE: &str = "\
1 1 1 1 1
1 S 0 0 1
1 1 1 0 1
1 0 0 0 1
1 0 1 Z 1
1 1 1 1 1
";

    fn settings(format: OutputFormat, max_steps: u64) -> Settings {
        Settings {
            maze: MazeSource::Implicit(PathBuf::from(config::DEFAULT_MAZE_FILE)),
            algorithm: Some(Algorithm::LeftHand),
            probe_delay: Duration::ZERO,
            move_delay: Duration::ZERO,
            max_steps,
            format,
            bell: false,
            color: false,
        }
    }

    fn sample_session() -> Session {
        let grid: Grid = SAMPLE.parse().expect("sample maze parses");
        Session::start(grid, Algorithm::LeftHand).expect("session starts")
    }

    #[test]
    fn json_output_has_one_event_per_line() {
        let mut session = sample_session();
        let mut out = Vec::new();

        let status =
            drive(&mut session, &settings(OutputFormat::Json, 100), &mut out).expect("drives");

        assert_eq!(status, Status::Arrived);
        let transcript = String::from_utf8(out).expect("utf8 output");
        let events: Vec<Event> = transcript
            .lines()
            .map(|line| serde_json::from_str(line).expect("line is an event"))
            .collect();
        assert_eq!(events.len(), 17);
        assert!(events.last().is_some_and(Event::is_terminal));
    }

    #[test]
    fn event_output_stops_at_budget() {
        let mut session = sample_session();
        let mut out = Vec::new();

        let status =
            drive(&mut session, &settings(OutputFormat::Events, 3), &mut out).expect("drives");

        assert_eq!(status, Status::Exhausted);
        assert_eq!(
            String::from_utf8(out).expect("utf8 output"),
            "probe north: blocked\nprobe east: clear\nmove to (1, 2) facing east\ngave up\n"
        );
    }

    #[test]
    fn frames_end_with_success_message() {
        let mut session = sample_session();
        let mut out = Vec::new();

        let status =
            drive(&mut session, &settings(OutputFormat::Frames, 100), &mut out).expect("drives");

        assert_eq!(status, Status::Arrived);
        let transcript = String::from_utf8(out).expect("utf8 output");
        assert!(transcript.ends_with("Found the way to the goal!\n"));
    }

    #[test]
    fn default_log_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
    }

    #[test]
    fn missing_implicit_maze_falls_back_to_default() {
        let path = std::env::temp_dir().join("labot-missing-maze-for-fallback-test.txt");
        let grid = load_grid(&MazeSource::Implicit(path)).expect("falls back");
        assert_eq!(grid, Grid::default_maze());
    }

    #[test]
    fn missing_explicit_maze_is_an_error() {
        let path = std::env::temp_dir().join("labot-missing-maze-for-explicit-test.txt");
        assert!(load_grid(&MazeSource::Explicit(path)).is_err());
    }

    #[test]
    fn invalid_maze_file_reports_context() {
        let path = std::env::temp_dir().join(format!("labot-invalid-{}.txt", std::process::id()));
        fs::write(&path, "1 1 1\n1 0 Z\n").expect("write maze");

        let error = read_grid(&path).expect_err("maze lacks a start");
        let _ = fs::remove_file(&path);

        let message = format!("{error:#}");
        assert!(message.contains("invalid maze"), "{message}");
        assert!(message.contains("no start cell"), "{message}");
    }
}
