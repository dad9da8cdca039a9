use std::{ffi::OsString, path::PathBuf, process::ExitCode};

use clap::{CommandFactory, Parser, error::ErrorKind};
use highlighter::{HighlightCfg, Highlighter, NoViewer, SystemViewer, Viewer};

const EXIT_OK: u8 = 0;
const EXIT_FAILURE: u8 = 1;
const EXIT_PARSE_ERROR: u8 = 2;

#[derive(Parser, Debug)]
#[command(author, version, about = "Tint rectangular regions of an image described in a JSON file")]
struct Args {
    /// Source file to highlight.
    #[arg(short, long)]
    image: Option<PathBuf>,

    /// JSON highlights description filename.
    #[arg(short = 'd', long)]
    highlights: Option<PathBuf>,

    /// Log level to DEBUG.
    #[arg(short, long)]
    verbose: bool,

    /// Save the result without opening it in a viewer.
    #[arg(long)]
    no_show: bool,
}

fn eprint_help() {
    eprintln!("{}", Args::command().render_help());
}

/// Parses the command line. On a parser error the message and the help go to
/// stderr and the exit code is returned instead.
fn parse_args<I, T>(argv: I) -> Result<Args, u8>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Args::try_parse_from(argv) {
        Ok(args) => Ok(args),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            eprint!("{}", e.render());
            eprint_help();
            Err(EXIT_PARSE_ERROR)
        }
    }
}

fn run(args: Args) -> u8 {
    let (Some(image), Some(highlights)) = (args.image, args.highlights) else {
        log::error!("Invalid arguments.");
        log::error!("Exiting due to errors.");
        eprintln!("error: Missing required arguments.");
        eprint_help();
        return EXIT_FAILURE;
    };

    let cfg = HighlightCfg {
        show: !args.no_show,
        ..HighlightCfg::default()
    };
    let viewer: &dyn Viewer = if cfg.show { &SystemViewer } else { &NoViewer };

    match Highlighter::open(&image, &highlights, cfg).and_then(|h| h.run(viewer)) {
        Ok(out) => {
            log::info!("Wrote: {}", out.display());
            EXIT_OK
        }
        Err(e) => {
            log::error!("{e:#}");
            EXIT_FAILURE
        }
    }
}

fn main() -> ExitCode {
    let args = match parse_args(std::env::args_os()) {
        Ok(args) => args,
        Err(code) => return ExitCode::from(code),
    };

    highlighter::init_logger(args.verbose);
    ExitCode::from(run(args))
}
