//! Terminal formatting for search results and run summaries

use crate::index::types::{BuildSummary, SearchResult, UpdateSummary};
use serde::Serialize;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

fn stdout(color: bool) -> StandardStream {
    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    StandardStream::stdout(choice)
}

/// Print ranked results: a heading line per file followed by its snippet
pub fn print_results(results: &[SearchResult], color: bool) -> io::Result<()> {
    let mut stdout = stdout(color);

    if results.is_empty() {
        writeln!(stdout, "No matches.")?;
        return Ok(());
    }

    for (i, result) in results.iter().enumerate() {
        if i > 0 {
            writeln!(stdout)?;
        }

        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)).set_bold(true))?;
        write!(stdout, "{}", result.file)?;
        stdout.reset()?;
        write!(stdout, "  ")?;

        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
        write!(stdout, "{}", result.date)?;
        stdout.reset()?;
        write!(stdout, "  ")?;

        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        writeln!(stdout, "score {}", result.score)?;
        stdout.reset()?;

        writeln!(stdout, "    {}", result.snippet)?;
    }

    Ok(())
}

/// Print a build summary
pub fn print_build_summary(summary: &BuildSummary) -> io::Result<()> {
    let mut stdout = stdout(true);
    stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    write!(stdout, "Index built")?;
    stdout.reset()?;
    writeln!(
        stdout,
        ": {} files, {} keys",
        summary.file_count, summary.key_count
    )?;
    writeln!(stdout, "Index stored at: {}", summary.index_path.display())?;
    Ok(())
}

/// Print an update summary
pub fn print_update_summary(summary: &UpdateSummary) -> io::Result<()> {
    let mut stdout = stdout(true);
    stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    write!(stdout, "Index updated")?;
    stdout.reset()?;
    writeln!(
        stdout,
        ": {} files, {} keys ({} changed, {} removed)",
        summary.file_count, summary.key_count, summary.changed, summary.removed
    )?;
    writeln!(stdout, "Index stored at: {}", summary.index_path.display())?;
    Ok(())
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", json)
}
