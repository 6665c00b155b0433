use std::io::{BufRead, Write};

use super::config::ReportConfig;
use super::error::Error;
use route_core::GraphCSR;

const BANNER: &str = "^^^^^^^^^^^^^^^^ DIJKSTRA'S ALGORITHM ^^^^^^^^^^^^^^^^";
pub const SEPARATOR: &str = "------------------------------------------------------------------";

/// Prints the banner and every city label in ascending order, several per line.
pub fn write_city_listing<W: Write>(
    out: &mut W,
    graph: &GraphCSR,
    config: &ReportConfig,
) -> Result<(), Error> {
    writeln!(out, "{BANNER}")?;
    writeln!(
        out,
        "A Weighted Graph Has Been Built For These {} Cities:\n",
        graph.vertex_count()
    )?;

    let mut sorted: Vec<&str> = graph.vertices().iter().map(String::as_str).collect();
    sorted.sort_unstable();

    let per_line = config.cities_per_line.max(1);
    let width = config.city_column_width;
    for line in sorted.chunks(per_line) {
        for city in line {
            write!(out, "{city:<width$}")?;
        }
        writeln!(out)?;
    }

    Ok(())
}

/// Asks for a starting vertex until an answer names a city in `graph`.
///
/// Each answer is one whole line with surrounding whitespace trimmed, so
/// labels such as `El Paso` can be chosen. Blank lines are ignored.
///
/// # Errors
/// Returns `Error::NoStartVertex` if input ends before a valid city is read.
pub fn read_start_vertex<R: BufRead, W: Write>(
    mut input: R,
    out: &mut W,
    graph: &GraphCSR,
) -> Result<String, Error> {
    write!(out, "\nPlease input your starting vertex: ")?;
    out.flush()?;

    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Err(Error::NoStartVertex);
        }

        let candidate = line.trim();
        if candidate.is_empty() {
            continue;
        }

        if graph.contains(candidate) {
            writeln!(out, "{SEPARATOR}")?;
            return Ok(candidate.to_string());
        }

        write!(
            out,
            "{candidate} is an invalid vertex. Please enter a valid vertex: "
        )?;
        out.flush()?;
    }
}
