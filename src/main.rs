use std::io::{self, Write};

use anyhow::{Context, Result};
use bookmark_cd::cli::{Args, Mode};
use bookmark_cd::core::Picker;
use bookmark_cd::fs::bookmarks;
use bookmark_cd::shell;
use bookmark_cd::ui::{self, Theme};
use clap::Parser;
use env_logger::Env;
use log::{debug, warn};

// flow
// 1. parse args; --shell and --install finish without touching the terminal
// 2. load bookmarks and filter them by the search term
// 3. a single match is printed straight away
// 4. otherwise run the picker on stderr and print the accepted path
fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().filter_or("BCD_LOG", "warn")).init();
    let args = Args::parse();

    match args.mode() {
        Mode::PrintShell { alias } => {
            let snippet = shell::shell_function(&alias)?;
            writeln!(io::stdout(), "{snippet}")?;
            Ok(())
        }
        Mode::Install { file, alias } => {
            let file = std::path::absolute(&file)
                .with_context(|| format!("invalid shell file {}", file.display()))?;
            shell::install(&file, &alias)
                .with_context(|| format!("could not install into {}", file.display()))
        }
        Mode::Pick { query } => pick(&args, &query),
    }
}

fn pick(args: &Args, query: &str) -> Result<()> {
    let candidates = match args
        .bookmarks
        .clone()
        .or_else(bookmarks::default_bookmarks_path)
    {
        Some(path) => bookmarks::load(path),
        None => {
            warn!("no home directory, starting without bookmarks");
            Vec::new()
        }
    };

    let mut picker = Picker::new(candidates, query, args.wrap);
    if let Some(only) = picker.sole_match() {
        debug!("{query:?} matches a single bookmark");
        return emit(&only.path);
    }

    let home = dirs::home_dir().map(|home| home.to_string_lossy().into_owned());
    let theme = Theme::default().with_home(home);
    let selection = ui::pick(&mut picker, &theme).context("terminal error")?;

    match selection {
        Some(candidate) => emit(&candidate.path),
        None => Ok(()),
    }
}

/// Writes `path` to stdout with nothing around it, for the shell function.
fn emit(path: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(path.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
