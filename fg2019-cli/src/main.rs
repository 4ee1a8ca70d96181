//! `fg2019` — command-line front end for the FG2019 canonical Huffman codec.

use clap::Parser;
use fg2019_core::error::{FgError, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

const USAGE: &str = "\
fg2019 -C <src> <dest>    compress src into dest
fg2019 -D <src> <dest>    decompress src into dest
fg2019 -H                 print this usage message
";

/// Parses the original tool's literal argv contract: a mode flag followed
/// by up to two paths. `-C`/`-D`/`-H` are accepted as the first positional
/// argument rather than as clap flags, so clap never intercepts an
/// unrecognized mode before `run` gets a chance to report it.
#[derive(Parser, Debug)]
#[command(name = "fg2019", about = "Length-limited canonical Huffman compressor")]
struct Cli {
    /// Mode: -C (compress), -D (decompress), or -H (usage)
    #[arg(allow_hyphen_values = true)]
    mode: String,

    /// Source file (required for -C / -D)
    source: Option<PathBuf>,

    /// Destination file (required for -C / -D)
    dest: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();

    // clap's own parse failures (missing the sole positional argument, for
    // instance) are folded into the same usage-hint-and-exit-1 contract as
    // an unrecognized mode, rather than clap's default usage-error exit
    // code of 2.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(_) => {
            eprint!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.mode.as_str() {
        "-H" => {
            print!("{USAGE}");
            Ok(())
        }
        "-C" => compress(cli.source, cli.dest),
        "-D" => decompress(cli.source, cli.dest),
        other => {
            eprint!("{USAGE}");
            Err(FgError::unknown_mode(other))
        }
    }
}

fn require_paths(source: Option<PathBuf>, dest: Option<PathBuf>) -> Result<(PathBuf, PathBuf)> {
    match (source, dest) {
        (Some(source), Some(dest)) => Ok((source, dest)),
        _ => {
            eprint!("{USAGE}");
            Err(FgError::unknown_mode("missing source/dest arguments"))
        }
    }
}

fn compress(source: Option<PathBuf>, dest: Option<PathBuf>) -> Result<()> {
    let (source, dest) = require_paths(source, dest)?;

    let input = File::open(&source).map_err(|e| FgError::io("opening source file", e))?;
    let output = File::create(&dest).map_err(|e| FgError::io("creating destination file", e))?;

    log::info!("compressing {} -> {}", source.display(), dest.display());
    fg2019_codec::compress(BufReader::new(input), BufWriter::new(output))
}

fn decompress(source: Option<PathBuf>, dest: Option<PathBuf>) -> Result<()> {
    let (source, dest) = require_paths(source, dest)?;

    let input = File::open(&source).map_err(|e| FgError::io("opening source file", e))?;
    let output = File::create(&dest).map_err(|e| FgError::io("creating destination file", e))?;

    log::info!("decompressing {} -> {}", source.display(), dest.display());
    fg2019_codec::decompress(BufReader::new(input), BufWriter::new(output))
}
