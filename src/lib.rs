pub mod geom;
pub mod io;
pub mod record;
pub mod render;
pub mod viewer;

pub use record::Highlight;
pub use render::{HighlightCfg, Highlighter};
pub use viewer::{NoViewer, SystemViewer, Viewer};

/// Sets up the process-wide logger once at startup.
///
/// INFO by default, DEBUG when `verbose`; `RUST_LOG` still takes precedence.
pub fn init_logger(verbose: bool) {
    use std::io::Write;

    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());
            writeln!(
                buf,
                "[{style}{}{style:#} {} {}] {}",
                record.level(),
                record
                    .file()
                    .unwrap_or("None")
                    .split('/')
                    .next_back()
                    .unwrap_or("None"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();
}
