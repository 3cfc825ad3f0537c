//! `castload cat <locator>` – dump recorded output to stdout.

use anyhow::{Context, Result};
use castload_core::source::{open_source_with, SourceOptions};
use std::io::{self, Write};

pub fn run_cat(locator: &str, opts: &SourceOptions) -> Result<()> {
    let mut rec = open_source_with(locator, opts).with_context(|| format!("open {}", locator))?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for event in rec.events() {
        let event = event.with_context(|| format!("read events of {}", locator))?;
        if event.is_output() {
            out.write_all(event.data.as_bytes())?;
        }
    }
    out.flush()?;
    Ok(())
}
