use std::fs;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use suffix_doubling::SuffixArray;

/// Index a file and answer substring queries read from standard input.
#[derive(Parser)]
struct Args {
    /// File holding the text to index.
    text: PathBuf,
    /// Bytes of context shown around each occurrence.
    #[arg(long, default_value_t = 30)]
    context: usize,
    /// Print one occurrence position per query instead of context windows.
    #[arg(long)]
    locate: bool,
    /// Write the computed arrays to this file as text.
    #[arg(long)]
    dump: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let data = fs::read(&args.text)
        .with_context(|| format!("Failed to read text file '{}'", args.text.display()))?;

    let started = Instant::now();
    let sa = SuffixArray::new(&data[..]);
    let elapsed = started.elapsed();
    eprintln!(
        "indexed {} bytes in {:.3}s, {} bytes of index memory",
        sa.len(),
        elapsed.as_secs_f64(),
        8 * sa.len(),
    );

    if let Some(path) = &args.dump {
        let file = fs::File::create(path)
            .with_context(|| format!("Failed to create dump file '{}'", path.display()))?;
        sa.dump_debug(BufWriter::new(file))
            .context("I/O error occurred while dumping the arrays")?;
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read query")?;
        let pat = line.as_bytes();
        if pat.is_empty() {
            continue;
        }

        if args.locate {
            match sa.search_one(pat) {
                Some(i) => writeln!(out, "{}", i)?,
                None => writeln!(out, "not found")?,
            }
            continue;
        }

        let windows = sa.search_context(pat, args.context);
        if windows.is_empty() {
            writeln!(out, "not found")?;
        }
        for w in windows {
            let shown = String::from_utf8_lossy(&data[w.start..w.end]);
            writeln!(out, "{}\t{}", w.start, shown)?;
        }
    }

    Ok(())
}
