//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]
mod cli;

use std::{
    fs::{self, File},
    io::{self, BufReader, BufWriter, Read, Write},
    path::Path,
    process::exit,
};

use bzwrite::{BzError, BzWriter, Level};
use log::{error, info, warn};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use crate::cli::{bzopts_init, BzOpts, Output};

fn main() {
    let options = match bzopts_init() {
        Ok(options) => options,
        Err(e) => {
            eprintln!("bzwrite: {}", e);
            exit(1);
        }
    };

    // Log to stderr, stdout may be carrying compressed data.
    if TermLogger::init(
        options.verbose,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .is_err()
    {
        eprintln!("bzwrite: could not start logging");
    }

    if let Err(e) = run(&options) {
        error!("{}", e);
        exit(1);
    }
    info!("Done.");
}

/// Compress each file named in the options, or stdin when there are none. Every file is tried,
/// and the last failure is reported.
fn run(opts: &BzOpts) -> Result<(), BzError> {
    if opts.files.is_empty() {
        compress_stream(io::stdin().lock(), io::stdout().lock(), opts.level)?;
        return Ok(());
    }

    let mut result = Ok(());
    for name in &opts.files {
        if let Err(e) = compress_file(name, opts) {
            error!("{}: {}", name, e);
            result = Err(e);
        }
    }
    result
}

/// Compress one file to `<name>.bz2`, or to stdout.
fn compress_file(name: &str, opts: &BzOpts) -> Result<(), BzError> {
    if name.ends_with(".bz2") {
        warn!("{}: already has .bz2 suffix, skipping", name);
        return Ok(());
    }
    let input = BufReader::new(File::open(name)?);

    if opts.output == Output::Stdout {
        compress_stream(input, io::stdout().lock(), opts.level)?;
        return Ok(());
    }

    let out_name = format!("{}.bz2", name);
    if Path::new(&out_name).exists() && !opts.force_overwrite {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("output file {} already exists", out_name),
        )
        .into());
    }
    let output = BufWriter::new(File::create(&out_name)?);
    let mut output = compress_stream(input, output, opts.level)?;
    output.flush()?;

    if !opts.keep_input_files {
        fs::remove_file(name)?;
    }
    info!("{} -> {}", name, out_name);
    Ok(())
}

/// Copy everything from `input` through a compressor into `output`, and give `output` back.
fn compress_stream<R: Read, W: Write>(
    mut input: R,
    output: W,
    level: Level,
) -> Result<W, BzError> {
    let mut bz = BzWriter::with_level(output, level);
    io::copy(&mut input, &mut bz)?;
    bz.finish()
}
