use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};

use tmtag::core::config;
use tmtag::core::state::App;
use tmtag::core::table::TagTable;
use tmtag::tmsu::{TagStore, Tmsu};
use tmtag::tui;

#[derive(Parser)]
#[command(name = "tmtag", about = "Terminal front-end for tagging files with tmsu")]
struct Args {
    /// File whose tags to edit
    file: PathBuf,

    /// Path to the tmsu executable (overrides config and PATH lookup)
    #[arg(long)]
    tmsu: Option<PathBuf>,
}

/// Print a startup failure the way the main window would show a dialog:
/// before the terminal UI ever opens.
fn fail(message: &str) -> ExitCode {
    eprintln!("{message}");
    ExitCode::FAILURE
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match config::load_config() {
        Ok(config) => config,
        Err(e) => return fail(&e.to_string()),
    };
    let resolved = config::resolve(&config, args.tmsu.as_deref());

    // File logger in the config directory; the UI owns the terminal.
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Some(log_path) = config::config_dir().map(|d| d.join("tmtag.log"))
        && let Ok(log_file) = File::create(log_path)
    {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    log::info!("tmtag starting up for {}", args.file.display());

    let tmsu = match resolved.tmsu_path {
        Some(path) if path.is_file() => Tmsu::new(path),
        Some(path) => {
            return fail(&format!("tmsu executable not found at {}", path.display()));
        }
        None => match Tmsu::locate() {
            Some(tmsu) => tmsu,
            None => return fail("tmsu executable not found!"),
        },
    };
    log::info!("using tmsu at {}", tmsu.program().display());

    let file = match args.file.canonicalize() {
        Ok(file) => file,
        Err(e) => return fail(&format!("{}: {e}", args.file.display())),
    };

    // tmsu resolves its database upward from the working directory, so move
    // there before asking for one.
    if let Some(parent) = file.parent()
        && let Err(e) = std::env::set_current_dir(parent)
    {
        return fail(&format!("cannot enter {}: {e}", parent.display()));
    }

    match tmsu.info() {
        Ok(Some(info)) => {
            log::info!(
                "database {} (root {}, {})",
                info.database,
                info.root,
                info.size
            );
        }
        Ok(None) => return fail("No tmsu database is found."),
        Err(e) => return fail(&e.to_string()),
    }

    let all_tags = match tmsu.all_tags() {
        Ok(tags) => tags,
        Err(e) => return fail(&e.to_string()),
    };
    let file_tags = match tmsu.file_tags(&file) {
        Ok(tags) => tags,
        Err(e) => return fail(&e.to_string()),
    };
    log::info!(
        "{} tags in database, {} on this file",
        all_tags.len(),
        file_tags.len()
    );

    let table = TagTable::from_listings(all_tags, file_tags);
    let mut app = App::new(file, table, resolved.sort);

    if let Err(e) = tui::run(&mut app, &tmsu) {
        eprintln!("terminal error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
