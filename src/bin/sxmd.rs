//! Sxmd CLI - comment-wrap the LaTeX in one Markdown file

use clap::error::ErrorKind;
use clap::{ArgAction, Parser};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use sxmd::{convert_file, utils::profile::CpuProfile};

#[derive(Parser)]
#[command(name = "sxmd")]
#[command(version)]
#[command(about = "Wrap LaTeX embedded in Markdown in HTML comments", long_about = None)]
struct Cli {
    /// Markdown file to convert (exactly one)
    inputs: Vec<PathBuf>,

    /// Write a CPU profile to this path
    #[arg(long, value_name = "PATH")]
    cpuprofile: Option<PathBuf>,

    /// Log more to stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let program = program_name();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
            _ => usage_exit(&program),
        },
    };

    init_logging(cli.verbose);

    let input_path = match cli.inputs.as_slice() {
        [path] => path,
        _ => usage_exit(&program),
    };

    let profile = cli
        .cpuprofile
        .as_ref()
        .and_then(|path| match CpuProfile::start(path) {
            Ok(profile) => Some(profile),
            Err(e) => {
                eprintln!("{}: warning: {}", program, e);
                None
            }
        });

    let output = match convert_file(input_path) {
        Ok(output) => output,
        Err(e) => {
            log::debug!("{}", e);
            if let Some(profile) = profile {
                if let Err(e) = profile.discard() {
                    eprintln!("{}: warning: {}", program, e);
                }
            }
            println!("Could not read input file {}", input_path.display());
            process::exit(1);
        }
    };

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = handle
        .write_all(output.content.as_bytes())
        .and_then(|_| handle.flush())
    {
        eprintln!("{}: error: {}", program, e);
        process::exit(1);
    }

    if let Some(profile) = profile {
        if let Err(e) = profile.finish(&output) {
            eprintln!("{}: warning: {}", program, e);
        }
    }
}

fn program_name() -> String {
    std::env::args()
        .next()
        .as_deref()
        .map(Path::new)
        .and_then(|p| p.file_name())
        .and_then(|s| s.to_str())
        .unwrap_or("sxmd")
        .to_string()
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn usage_exit(program: &str) -> ! {
    println!("Usage: {} <file-to-convert>", program);
    process::exit(1);
}
