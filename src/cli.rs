use bzwrite::{BzError, Level};
use clap::Parser;
use log::LevelFilter;

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "A bzip2 compatible file compressor",
    long_about = "
    Compresses files into the bzip2 format. Output can be read by any standard bzip2 decoder.
    Decompression is not offered. With no file names, stdin is compressed to stdout."
)]
pub struct Args {
    /// Files to compress
    #[clap()]
    files: Vec<String>,

    /// 1..9 - Set the block size from 100-900k. 600k is the default
    #[clap(short = 'l', long = "level")]
    level: Option<u32>,

    /// Alias for 100k block mode
    #[clap(long = "fast")]
    fast: bool,

    /// Alias for 900k block mode
    #[clap(long = "best")]
    best: bool,

    /// Send output to the terminal
    #[clap(short = 'c', long = "stdout")]
    stdout: bool,

    /// Keep input file
    #[clap(short = 'k', long = "keep")]
    keep: bool,

    ///Force overwriting output file
    #[clap(short = 'f', long = "force")]
    force: bool,

    /// Sets verbosity. -v0 is silent, -v5 is chatty
    #[clap(short = 'v', default_value_t = 2)]
    v: u8,
}

/// Define the two output channels
#[derive(Debug, PartialEq, Eq)]
pub enum Output {
    File,
    Stdout,
}

#[derive(Debug)]
pub struct BzOpts {
    /// Vec of names of files to read for input
    pub files: Vec<String>,
    /// Block size level
    pub level: Level,
    /// Silently overwrite existing files with the same name
    pub force_overwrite: bool,
    /// Don't remove input files after processing
    pub keep_input_files: bool,
    /// Location where output is sent
    pub output: Output,
    /// Log level for user information
    pub verbose: LevelFilter,
}

/// Parse the command line into our internal structure.
pub fn bzopts_init() -> Result<BzOpts, BzError> {
    BzOpts::from_args(Args::parse())
}

impl BzOpts {
    /// Put command line information from CLAP into our internal structure. An explicit level
    /// wins over --fast and --best.
    pub fn from_args(args: Args) -> Result<Self, BzError> {
        let level = match (args.level, args.fast, args.best) {
            (Some(l), _, _) => Level::new(l)?,
            (None, _, true) => Level::best(),
            (None, true, false) => Level::fast(),
            (None, false, false) => Level::default(),
        };

        // Reading stdin always writes stdout.
        let output = if args.stdout || args.files.is_empty() {
            Output::Stdout
        } else {
            Output::File
        };

        let verbose = match args.v {
            0 => LevelFilter::Off,
            1 => LevelFilter::Error,
            2 => LevelFilter::Warn,
            3 => LevelFilter::Info,
            4 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };

        Ok(BzOpts {
            files: args.files,
            level,
            force_overwrite: args.force,
            keep_input_files: args.keep || args.stdout,
            output,
            verbose,
        })
    }
}
