//! `castload info <locator>` – summarize a recording.

use anyhow::{Context, Result};
use castload_core::source::{open_source_with, SourceOptions};

pub fn run_info(locator: &str, opts: &SourceOptions) -> Result<()> {
    let mut rec = open_source_with(locator, opts).with_context(|| format!("open {}", locator))?;
    let header = rec.header().clone();

    let mut events = 0usize;
    let mut last_time = 0.0f64;
    for event in rec.events() {
        let event = event.with_context(|| format!("read events of {}", locator))?;
        events += 1;
        last_time = event.time;
    }

    println!("version:  {}", header.version);
    println!("size:     {}x{}", header.width, header.height);
    if let Some(title) = &header.title {
        println!("title:    {}", title);
    }
    if let Some(command) = &header.command {
        println!("command:  {}", command);
    }
    let duration = header.duration.unwrap_or(last_time);
    println!("duration: {:.3}s", duration);
    println!("events:   {}", events);
    Ok(())
}
