use crate::config::load_config;
use crate::dashboard::summarize;
use crate::details::details_for;
use crate::layout_dump::{LayoutDump, write_layout_dump};
use crate::logging::init_logging;
use crate::model::Snapshot;
use crate::parser::{SnapshotFormat, parse_snapshot};
use crate::render::{render_svg, write_output_png, write_output_svg};
use crate::timeline::hourly_timeline;
use crate::workflow::compute_workflow;
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "showroom", version, about = "Workflow board renderer for dealership task snapshots")]
pub struct Args {
    /// Snapshot file (.json / .json5) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout for everything except PNG.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (theme, layout constants, render size)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Print the detail view of one task as JSON instead of rendering
    #[arg(long = "task", value_name = "ID")]
    pub task: Option<String>,

    /// Log level (overrides SHOWROOM_LOG)
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevel>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
    /// Node and edge geometry as JSON
    Layout,
    /// Status counts, staff board, KPIs and the hourly timeline as JSON
    Summary,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_level)?;

    let config = load_config(args.config.as_deref()).context("failed to load config")?;
    let snapshot = read_snapshot(args.input.as_deref())?;
    let layout = compute_workflow(&snapshot.tasks, &config.layout);
    tracing::info!(
        tasks = snapshot.tasks.len(),
        edges = layout.edges.len(),
        "workflow derived"
    );

    if let Some(id) = args.task.as_deref() {
        let details = details_for(&layout, id, &snapshot.tasks, &snapshot.staff)?;
        let json = serde_json::to_string_pretty(&details)?;
        return write_output_text(&json, args.output.as_deref());
    }

    match args.output_format {
        OutputFormat::Svg => {
            let svg = render_svg(&layout, &config.theme, &config.layout);
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            let svg = render_svg(&layout, &config.theme, &config.layout);
            write_output_png(&svg, &output, &config.render, &config.theme)?;
        }
        OutputFormat::Layout => match args.output.as_deref() {
            Some(path) => write_layout_dump(path, &layout)?,
            None => println!("{}", LayoutDump::from_layout(&layout).to_json()?),
        },
        OutputFormat::Summary => {
            let json = summary_json(&snapshot)?;
            write_output_text(&json, args.output.as_deref())?;
        }
    }

    Ok(())
}

fn read_snapshot(path: Option<&Path>) -> Result<Snapshot> {
    if let Some(path) = path {
        if path != Path::new("-") {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            return parse_snapshot(&content, SnapshotFormat::from_path(path))
                .with_context(|| format!("failed to parse {}", path.display()));
        }
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    let snapshot = parse_snapshot(&buf, SnapshotFormat::Json)
        .or_else(|_| parse_snapshot(&buf, SnapshotFormat::Json5))
        .context("failed to parse snapshot from stdin")?;
    Ok(snapshot)
}

fn summary_json(snapshot: &Snapshot) -> Result<String> {
    let value = serde_json::json!({
        "version": snapshot.version,
        "dashboard": summarize(&snapshot.tasks, &snapshot.staff),
        "timeline": hourly_timeline(&snapshot.tasks),
    });
    Ok(serde_json::to_string_pretty(&value)?)
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}

fn write_output_text(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, text)?,
        None => println!("{text}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Staff, Task};

    #[test]
    fn parses_flags() {
        let args = Args::try_parse_from([
            "showroom",
            "-i",
            "board.json5",
            "-e",
            "layout",
            "--task",
            "4",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(args.input.as_deref(), Some(Path::new("board.json5")));
        assert_eq!(args.output_format, OutputFormat::Layout);
        assert_eq!(args.task.as_deref(), Some("4"));
        assert_eq!(args.log_level, Some(LogLevel::Debug));
    }

    #[test]
    fn defaults_to_svg() {
        let args = Args::try_parse_from(["showroom"]).unwrap();
        assert_eq!(args.output_format, OutputFormat::Svg);
        assert!(args.output.is_none());
    }

    #[test]
    fn png_needs_an_output_path() {
        assert!(ensure_output(&None, "png").is_err());
        let path = ensure_output(&Some(PathBuf::from("out.png")), "png").unwrap();
        assert_eq!(path, PathBuf::from("out.png"));
    }

    #[test]
    fn summary_contains_dashboard_and_timeline() {
        let snapshot = Snapshot::new(
            vec![Task::new("1", "Meeting")],
            vec![Staff::new("s1", "Zhang").with_tasks(["1"])],
        );
        let value: serde_json::Value = serde_json::from_str(&summary_json(&snapshot).unwrap()).unwrap();
        assert_eq!(value["dashboard"]["status"]["pending"], 1);
        assert_eq!(value["dashboard"]["staff"][0]["tasks"][0], "1");
        assert_eq!(value["timeline"].as_array().map(|a| a.len()), Some(24));
        assert_eq!(value["timeline"][9]["tasks"][0], "1");
    }
}
