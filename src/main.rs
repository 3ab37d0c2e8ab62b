//! Linewise - print a text file as soft-wrapped display lines.
//!
//! # Usage
//!
//! ```bash
//! linewise notes.txt
//! linewise --width 60 --height 20 --top 40:0 notes.txt
//! linewise --find TODO notes.txt
//! cat notes.txt | linewise --number
//! ```

use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use linewise::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    save_config_flags,
};
use linewise::{LineStore, Position, TabStops, Viewport, perf};

/// Print a text file as soft-wrapped display lines
#[derive(Parser, Debug)]
#[command(name = "linewise", version, about, long_about = None)]
struct Cli {
    /// Text file to show (reads stdin when absent)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Wrap width in code points
    #[arg(short, long, value_name = "COLS")]
    width: Option<usize>,

    /// Cells between tab stops
    #[arg(long, value_name = "CELLS")]
    tab_size: Option<usize>,

    /// Number of display lines to print (all when absent)
    #[arg(long, value_name = "ROWS")]
    height: Option<usize>,

    /// Position whose display line is printed first
    #[arg(long, value_name = "ROW:COL")]
    top: Option<Position>,

    /// List every match of NEEDLE instead of printing the text
    #[arg(long, value_name = "NEEDLE")]
    find: Option<String>,

    /// Prefix each display line with the ROW:COL it starts at
    #[arg(short, long)]
    number: bool,

    /// Enable wrap and load timing through tracing
    #[arg(long)]
    perf: bool,

    /// Write navigator and load debug events to a file
    #[arg(long, value_name = "PATH")]
    debug_log: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

impl Cli {
    /// Flags given on the command line, in the form saved to config files.
    fn flags(&self) -> ConfigFlags {
        ConfigFlags {
            width: self.width,
            tab_size: self.tab_size,
            height: self.height,
            number: self.number,
            perf: self.perf,
            debug_log: self.debug_log.clone(),
        }
    }
}

fn read_store(file: Option<&PathBuf>) -> Result<LineStore> {
    let mut store = LineStore::new();
    match file {
        Some(path) => store
            .load(path)
            .with_context(|| format!("Failed to open {}", path.display()))?,
        None => {
            let mut content = String::new();
            io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read stdin")?;
            store.set_text(&content);
        }
    }
    Ok(store)
}

fn print_matches(store: &LineStore, needle: &str, out: &mut impl Write) -> Result<()> {
    let mut from = Position::ORIGIN;
    while let Some(found) = store.search(from, needle) {
        let line = store.line(found.row).unwrap_or_default();
        writeln!(out, "{found}: {line}")?;
        from = Position::new(found.column + 1, found.row);
    }
    Ok(())
}

fn print_segments(
    store: &LineStore,
    flags: &ConfigFlags,
    top: Option<Position>,
    out: &mut impl Write,
) -> Result<()> {
    let tabs: TabStops = flags.tab_stops();
    let height = flags.height.unwrap_or(usize::MAX);
    let mut viewport = Viewport::new(store, flags.width_or_default(), height);
    if let Some(top) = top
        && !viewport.set_top(store, top)
    {
        anyhow::bail!("Position {top} is outside the text");
    }
    for segment in viewport.visible_segments(store) {
        let text = tabs.expand(segment.text());
        if flags.number {
            writeln!(out, "{:>8} {text}", segment.start().to_string())?;
        } else {
            writeln!(out, "{text}")?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = cli.flags();

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);
    tracing::debug!(?effective, "effective flags");

    perf::set_enabled(effective.perf);
    let debug_log_path = effective
        .debug_log
        .clone()
        .or_else(|| std::env::var_os("LINEWISE_DEBUG_LOG").map(PathBuf::from));
    if let Err(err) = perf::set_debug_log_path(debug_log_path.as_deref()) {
        tracing::warn!(
            path = %debug_log_path
                .as_ref()
                .map_or_else(|| "<unset>".to_string(), |p| p.display().to_string()),
            %err,
            "failed to initialize debug log"
        );
    }

    let store = read_store(cli.file.as_ref())?;
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    match cli.find.as_deref() {
        Some(needle) => print_matches(&store, needle, &mut out)?,
        None => print_segments(&store, &effective, cli.top, &mut out)?,
    }
    out.flush().context("Failed to write output")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_flags_reach_effective_config() {
        let cli = Cli::try_parse_from(["linewise", "-w", "8", "-n", "notes.txt"]).unwrap();
        let flags = cli.flags();
        assert_eq!(flags.width, Some(8));
        assert!(flags.number);
        assert_eq!(cli.file, Some(PathBuf::from("notes.txt")));
    }

    #[test]
    fn test_long_flags_reach_effective_config() {
        let cli = Cli::try_parse_from([
            "linewise",
            "--tab-size=2",
            "--height",
            "5",
            "--debug-log",
            "nav.log",
            "--perf",
        ])
        .unwrap();
        let flags = cli.flags();
        assert_eq!(flags.tab_size, Some(2));
        assert_eq!(flags.height, Some(5));
        assert_eq!(flags.debug_log, Some(PathBuf::from("nav.log")));
        assert!(flags.perf);
        assert!(!flags.number);
        assert_eq!(cli.file, None);
    }

    #[test]
    fn test_cli_width_overrides_file_defaults() {
        let file = ConfigFlags {
            width: Some(60),
            number: true,
            ..ConfigFlags::default()
        };
        let cli = Cli::try_parse_from(["linewise", "-w", "8"]).unwrap();
        let effective = file.union(&cli.flags());
        assert_eq!(effective.width_or_default(), 8);
        assert!(effective.number);
    }

    #[test]
    fn test_short_width_wraps_output() {
        let store = LineStore::from_text("aaa bbb ccc ddd eee");
        let cli = Cli::try_parse_from(["linewise", "-w", "8"]).unwrap();
        let mut out = Vec::new();
        print_segments(&store, &cli.flags(), None, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "aaa bbb \nccc ddd \neee\n");
    }

    #[test]
    fn test_print_matches_lists_every_hit() {
        let store = LineStore::from_text("a TODO b TODO\nnone\nTODO");
        let mut out = Vec::new();
        print_matches(&store, "TODO", &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "0:2: a TODO b TODO\n0:9: a TODO b TODO\n2:0: TODO\n"
        );
    }
}
