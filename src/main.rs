//! sinter: fuse HTML-declared script and stylesheet sources.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use serde_json::Value;
use sinter::{build, config, Error};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "sinter")]
#[command(
    about = "Fuse script and stylesheet sources declared in HTML build sections",
    long_about = None
)]
struct Args {
    /// HTML files to process, in order
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,

    /// JSON task configuration tree patched by update sections
    #[arg(long, value_name = "FILE")]
    tasks: Option<PathBuf>,

    /// Directory receiving rewritten HTML (default: rewrite in place)
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Marker keyword to search for in HTML comments
    #[arg(long, short = 'm')]
    marker: Option<String>,
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();
    let mut cfg = config::Config::load();

    // Override config with command line args
    if let Some(marker) = args.marker.clone() {
        cfg.marker = marker;
    }

    match run(&args, &cfg) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, cfg: &config::Config) -> sinter::Result<()> {
    let mut task_tree = load_task_tree(args.tasks.as_deref())?;

    if let Some(dir) = &args.out_dir {
        fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    }

    // Files run strictly in order: one file's task-tree mutations are
    // visible to the next.
    let outputs = output_paths(&args.files, args.out_dir.as_deref())?;
    let mut touched = false;
    for (file, output) in args.files.iter().zip(&outputs) {
        touched |= build::process_file(file, output, cfg, &mut task_tree)?;
    }

    if touched {
        if let Some(path) = &args.tasks {
            let json = serde_json::to_string_pretty(&task_tree)?;
            fs::write(path, json).map_err(|e| Error::io(path, e))?;
        }
    }
    Ok(())
}

/// Map each input to its output path. Under `--out-dir` outputs keep only
/// the input's file name, so two inputs sharing a basename would clobber
/// each other; that collision is an error rather than a silent overwrite.
fn output_paths(files: &[PathBuf], out_dir: Option<&Path>) -> sinter::Result<Vec<PathBuf>> {
    let mut outputs = Vec::with_capacity(files.len());
    let mut seen = HashSet::new();
    for file in files {
        let output = match out_dir {
            Some(dir) => dir.join(file.file_name().unwrap_or(file.as_os_str())),
            None => file.clone(),
        };
        if out_dir.is_some() && !seen.insert(output.clone()) {
            return Err(Error::OutputCollision {
                path: output.display().to_string(),
            });
        }
        outputs.push(output);
    }
    Ok(outputs)
}

fn load_task_tree(path: Option<&Path>) -> sinter::Result<Value> {
    match path {
        Some(path) => {
            let contents = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
            Ok(serde_json::from_str(&contents)?)
        }
        None => Ok(Value::Object(serde_json::Map::new())),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("SINTER_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
#[path = "tests/main.rs"]
mod tests;
