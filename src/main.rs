mod models;
mod service;
mod utils;

use crate::models::config::{RunConfig, DEFAULT_ARCHIVE_NAME, DEFAULT_BACKUP_FOLDER};
use crate::service::backup::run_backup;
use crate::utils::directory::running_executable_name;
use anyhow::{Context, Result};
use clap::{ArgAction, CommandFactory, Parser};
use log::debug;
use std::env;
use std::ffi::OsString;
use std::io;
use std::path::PathBuf;

/// Long flags that may also be spelled with a single dash (`-dir`, `-nodir=false`).
const SINGLE_DASH_FLAGS: &[&str] = &[
    "dir",
    "generate",
    "nodir",
    "an",
    "log-level",
    "quiet",
    "help",
    "version",
];

#[derive(Parser, Debug)]
#[command(name = "rusty-tar-backup", version)]
#[command(
    about = "Moves the files of a directory into a backup folder and archives that folder as tar.gz",
    long_about = None
)]
struct Cli {
    /// Path to directory (required)
    #[arg(long = "dir", value_name = "DIR")]
    dir: Option<String>,

    /// Name of the folder to generate for files
    #[arg(long = "generate", value_name = "NAME", default_value = DEFAULT_BACKUP_FOLDER)]
    generate: String,

    /// If true, subdirectories will be excluded
    #[arg(
        long = "nodir",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        default_value_t = false,
        action = ArgAction::Set
    )]
    no_dirs: bool,

    /// Name of output compressed archive
    #[arg(long = "an", value_name = "PATH", default_value = DEFAULT_ARCHIVE_NAME)]
    archive_name: PathBuf,

    #[arg(short = 'l', long = "log-level", default_value = "info")]
    log_level: String,

    /// Hide progress bars
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Cli::parse_from(normalize_args(env::args_os()));

    env_logger::Builder::new()
        .filter_level(parse_log_level(&args.log_level))
        .format_timestamp_secs()
        .init();

    let Some(dir) = args.dir.filter(|dir| !dir.is_empty()) else {
        eprintln!("[!] Error: -dir flag is required.");
        let _ = Cli::command().write_help(&mut io::stderr());
        std::process::exit(1);
    };

    let config = RunConfig::new(dir, args.generate, args.no_dirs, args.archive_name)
        .context("Invalid arguments")?;
    config.log_parameters();

    let exe_name = running_executable_name();
    debug!("Running executable: {:?}", exe_name);

    let summary = run_backup(&config, exe_name.as_deref(), args.quiet)
        .context("Backup operation failed")?;
    summary.log();

    Ok(())
}

fn parse_log_level(level: &str) -> log::LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => log::LevelFilter::Trace,
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Info,
    }
}

/// Rewrites `-dir`, `-an=x` and friends to their `--` form so clap can parse them.
/// Everything after a bare `--` is passed through untouched.
fn normalize_args<I: IntoIterator<Item = OsString>>(args: I) -> Vec<OsString> {
    let mut iter = args.into_iter();
    let mut normalized = Vec::new();
    normalized.extend(iter.next());

    while let Some(arg) = iter.next() {
        if arg == "--" {
            normalized.push(arg);
            normalized.extend(iter.by_ref());
            break;
        }
        normalized.push(to_long_flag(arg));
    }
    normalized
}

fn to_long_flag(arg: OsString) -> OsString {
    let Some(text) = arg.to_str() else {
        return arg;
    };
    let Some(rest) = text.strip_prefix('-') else {
        return arg;
    };
    if rest.starts_with('-') {
        return arg;
    }

    let name = rest.split('=').next().unwrap_or(rest);
    if SINGLE_DASH_FLAGS.contains(&name) {
        OsString::from(format!("-{}", text))
    } else {
        arg
    }
}
