pub(crate) mod dni;
pub(crate) mod error;

use clap::Parser;
use log::{info, Level};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use dni::{encode, read_payload, write_image, EncodingRequest, DEFAULT_VERSION};
use error::Error;

// -- Data types for command-line options -- //
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Create image for the board specified with <BOARD>
    #[arg(short = 'B', long, value_name = "BOARD", value_parser = clap::value_parser!(OsString))]
    board: Option<OsString>,

    /// Read input from the file <FILE>
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Write output to the file <FILE>
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Set image version to <VERSION>
    #[arg(
        short = 'v',
        long,
        value_name = "VERSION",
        default_value = DEFAULT_VERSION,
        value_parser = clap::value_parser!(OsString)
    )]
    image_version: OsString,

    /// Set image region to <REGION>
    #[arg(short, long, value_name = "REGION", value_parser = clap::value_parser!(OsString))]
    region: Option<OsString>,

    /// Set image hardware id to <HD_ID>
    #[arg(short = 'H', long, value_name = "HD_ID", value_parser = clap::value_parser!(OsString))]
    hd_id: Option<OsString>,

    /// Verbosity of generated output?
    #[arg(long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn progname() -> String {
    std::env::args_os()
        .next()
        .as_deref()
        .and_then(|p| Path::new(p).file_name())
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
}

/// Raw argument bytes, copied into the header as given.
#[cfg(unix)]
fn arg_bytes(arg: OsString) -> Vec<u8> {
    use std::os::unix::ffi::OsStringExt;
    arg.into_vec()
}

#[cfg(not(unix))]
fn arg_bytes(arg: OsString) -> Vec<u8> {
    arg.to_string_lossy().into_owned().into_bytes()
}

fn setup_logger(verbose: u8) {
    let level = match verbose {
        0 => Level::Warn,
        1 => Level::Info,
        2 => Level::Debug,
        _ => Level::Trace,
    };
    if let Err(e) = simple_logger::init_with_level(level) {
        eprintln!("Logger already initialised: {}", e);
    }
}

fn run(args: Args) -> Result<(), Error> {
    let board = args
        .board
        .map(arg_bytes)
        .filter(|b| !b.is_empty())
        .ok_or(Error::NoBoard)?;
    let input = args.input.ok_or(Error::NoInput)?;
    let output = args.output.ok_or(Error::NoOutput)?;

    let payload = read_payload(&input)?;
    info!(
        "Building image for '{}' from {} ({} bytes)",
        String::from_utf8_lossy(&board),
        input.display(),
        payload.len()
    );

    let request = EncodingRequest::new(board, payload)
        .version(arg_bytes(args.image_version))
        .region(args.region.map(arg_bytes).unwrap_or_default())
        .hardware_id(args.hd_id.map(arg_bytes));
    let image = encode(request)?;

    write_image(&output, &image)?;
    info!("Wrote {} bytes to {}", image.len(), output.display());
    Ok(())
}

fn main() {
    let progname = progname();
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // Help and version go to stdout and are not failures
            let _ = e.print();
            std::process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };
    setup_logger(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("[{}] *** error: {}", progname, e);
        std::process::exit(e.exit_code());
    }
}
