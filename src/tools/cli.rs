use std::path::PathBuf;
use std::{fmt::Display, fmt::Formatter};

use clap::Parser;
use log::info;

use crate::compression::decompress::DecodeOptions;

/// Payloads larger than this are written to disk instead of being shown as text
pub const MAX_PREVIEW_BYTES: usize = 50 * 1024 * 1024;

/// View, Decompress, Test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    View,
    Decompress,
    Test,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Define all user settable options to control program behavior
#[derive(Debug, Clone)]
pub struct ViewOpts {
    /// Files to read for input
    pub files: Vec<PathBuf>,
    /// View/Decompress/Test
    pub op_mode: Mode,
    /// Silently overwrite existing files with the same name
    pub force_overwrite: bool,
    /// Fail on block and stream CRC mismatches
    pub verify_crc: bool,
    /// Decode bzip2 streams that follow the first one in the same file
    pub multi_stream: bool,
    /// Largest decompressed size shown as text
    pub max_preview: usize,
}

impl ViewOpts {
    /// Set default parameters on program start
    pub fn new() -> Self {
        Self {
            files: vec![],
            op_mode: Mode::View,
            force_overwrite: false,
            verify_crc: true,
            multi_stream: true,
            max_preview: MAX_PREVIEW_BYTES,
        }
    }

    /// Decoder strictness taken from these options.
    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            verify_crc: self.verify_crc,
            multi_stream: self.multi_stream,
        }
    }
}

impl Default for ViewOpts {
    fn default() -> Self {
        Self::new()
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "Read .bz2, .tar.bz2, .xz and .tar.xz files as plain text",
    long_about = "
    Decompresses each file in memory and prints its text. Tar archives print the text of
    every entry, in archive order. Files that decompress to more than the preview limit
    are written next to the input instead.

    The bzip2 decoder is built in. XZ data is handled by lzma-rs."
)]
pub struct Args {
    /// Compressed files to open
    #[clap(required = true)]
    files: Vec<PathBuf>,

    /// Write the decompressed data next to each input file
    #[clap(short = 'd', long = "decompress")]
    decompress: bool,

    /// Test compressed file integrity
    #[clap(short = 't', long = "test", conflicts_with = "decompress")]
    test: bool,

    /// Force overwriting output files
    #[clap(short = 'f', long = "force")]
    force: bool,

    /// Only warn when a block or stream CRC does not match
    #[clap(long = "no-verify")]
    no_verify: bool,

    /// Stop after the first bzip2 stream in a file
    #[clap(long = "single-stream")]
    single_stream: bool,

    /// Largest decompressed size (bytes) shown as text
    #[clap(long = "max-preview", default_value_t = MAX_PREVIEW_BYTES)]
    max_preview: usize,

    /// Sets verbosity. -v0 is silent, -v5 is chatty
    #[clap(short = 'v', default_value_t = 2)]
    v: u8,

    /// Only report errors
    #[clap(short = 'q', long = "quiet")]
    quiet: bool,
}

/// Parse the command line into our internal structure and set the log level.
pub fn init_view_opts() -> ViewOpts {
    let args = Args::parse();

    // Set the log level
    let level = if args.quiet { 1 } else { args.v };
    match level {
        0 => log::set_max_level(log::LevelFilter::Off),
        1 => log::set_max_level(log::LevelFilter::Error),
        2 => log::set_max_level(log::LevelFilter::Warn),
        3 => log::set_max_level(log::LevelFilter::Info),
        4 => log::set_max_level(log::LevelFilter::Debug),
        _ => log::set_max_level(log::LevelFilter::Trace),
    };

    let opts = view_opts_from(args);

    // Below we report initialization status to the user
    info!("---- bzview Initialization Start ----",);
    info!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", opts.op_mode);
    info!("Reading {} file(s)", opts.files.len());
    if opts.force_overwrite {
        info!("Forcing file overwriting")
    };
    if !opts.verify_crc {
        info!("CRC mismatches will only be reported")
    };
    if !opts.multi_stream {
        info!("Decoding only the first bzip2 stream of each file")
    };
    info!("Preview limit set to {} bytes", opts.max_preview);
    info!("---- bzview Initialization End ----");
    opts
}

/// Put command line information from CLAP into our internal structure.
pub fn view_opts_from(args: Args) -> ViewOpts {
    let mut opts = ViewOpts::new();
    opts.files = args.files;
    if args.decompress {
        opts.op_mode = Mode::Decompress
    };
    if args.test {
        opts.op_mode = Mode::Test
    };
    opts.force_overwrite = args.force;
    opts.verify_crc = !args.no_verify;
    opts.multi_stream = !args.single_stream;
    opts.max_preview = args.max_preview;
    opts
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse(args: &[&str]) -> ViewOpts {
        view_opts_from(Args::try_parse_from(args).unwrap())
    }

    #[test]
    fn defaults() {
        let opts = parse(&["bzview", "app.log.bz2"]);
        assert_eq!(opts.files, vec![PathBuf::from("app.log.bz2")]);
        assert_eq!(opts.op_mode, Mode::View);
        assert!(!opts.force_overwrite);
        assert_eq!(opts.decode_options(), DecodeOptions::default());
        assert_eq!(opts.max_preview, MAX_PREVIEW_BYTES);
    }

    #[test]
    fn flags() {
        let opts = parse(&[
            "bzview",
            "-d",
            "-f",
            "--no-verify",
            "--single-stream",
            "--max-preview",
            "1024",
            "a.bz2",
            "b.tar.xz",
        ]);
        assert_eq!(opts.op_mode, Mode::Decompress);
        assert!(opts.force_overwrite);
        assert!(!opts.verify_crc);
        assert!(!opts.multi_stream);
        assert_eq!(opts.max_preview, 1024);
        assert_eq!(opts.files.len(), 2);
    }

    #[test]
    fn test_mode() {
        assert_eq!(parse(&["bzview", "-t", "a.bz2"]).op_mode, Mode::Test);
    }

    #[test]
    fn rejects_bad_command_lines() {
        assert!(Args::try_parse_from(["bzview"]).is_err());
        assert!(Args::try_parse_from(["bzview", "-d", "-t", "a.bz2"]).is_err());
    }

    #[test]
    fn mode_display() {
        assert_eq!(Mode::Decompress.to_string(), "Decompress");
    }
}
