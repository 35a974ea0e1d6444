use crate::pretty::Report;
use crate::summarize;
use anyhow::{Context, Result};
use bpaf::Bpaf;
use log::*;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

/// Per-group statistics for a file of sensor readings
///
/// Every line after the header should look like
/// `timestamp,site,device,metric,unit,value`.  Readings are grouped by
/// site, device and metric; the groups with the highest average and the
/// highest standard deviation are printed.
#[derive(Bpaf, Debug, Clone)]
#[bpaf(options, version)]
pub struct Options {
    /// The character which separates fields
    #[bpaf(
        short,
        long,
        argument("CHAR"),
        guard(is_ascii, "the delimiter must be a single ASCII character"),
        fallback(','),
        display_fallback
    )]
    pub delimiter: char,
    /// How many groups to show in each ranking
    #[bpaf(short('n'), long, argument("N"), fallback(10), display_fallback)]
    pub top: usize,
    /// Print the rankings as JSON
    pub json: bool,
    /// The file to read
    #[bpaf(positional("FILE"))]
    pub file: Option<PathBuf>,
}

fn is_ascii(c: &char) -> bool {
    c.is_ascii()
}

// read -> parse -> group -> rank -> print
pub fn analyze(opts: Options, mut out: impl Write) -> Result<()> {
    let path = match opts.file {
        Some(x) => x,
        None => {
            writeln!(
                out,
                "Usage: {} [-d CHAR] [-n N] [--json] <FILE>",
                env!("CARGO_PKG_NAME")
            )?;
            return Ok(());
        }
    };

    info!("Reading {}", path.display());
    let start = Instant::now();
    let table = File::open(&path)
        .map_err(anyhow::Error::from)
        .and_then(|file| summarize::summarize(file, opts.delimiter as u8))
        .with_context(|| format!("Couldn't read {}", path.display()))?;
    let table = match table {
        Some(x) => x,
        None => {
            writeln!(out, "Empty file!")?;
            return Ok(());
        }
    };
    info!(
        "Grouped {} rows into {} groups in {}",
        table.counts.rows,
        table.len(),
        humantime::format_duration(start.elapsed()),
    );
    if table.counts.skipped() > 0 {
        info!(
            "Skipped {} rows with too few fields and {} with a non-numeric value",
            table.counts.malformed, table.counts.non_numeric,
        );
    }

    let report = Report::new(&table, opts.top);
    if opts.json {
        report.write_json(&mut out)?;
    } else {
        report.write_text(&mut out)?;
    }
    Ok(())
}

/// Writing to a closed pipe isn't worth reporting.
pub fn is_broken_pipe(e: &anyhow::Error) -> bool {
    let kind = e
        .downcast_ref::<std::io::Error>()
        .map(|e| e.kind())
        .or_else(|| {
            e.downcast_ref::<serde_json::Error>()
                .and_then(|e| e.io_error_kind())
        });
    kind == Some(std::io::ErrorKind::BrokenPipe)
}
