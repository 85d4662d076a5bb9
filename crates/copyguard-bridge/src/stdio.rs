//! Line-delimited JSON transport over stdin/stdout

use std::io::{self, BufRead, Write};

use anyhow::Result;
use copyguard_engine::Engine;
use copyguard_host::DocumentHost;
use tracing::warn;

use crate::dispatch::{UiSink, handle_request};
use crate::protocol::{UiEvent, UiRequest};

struct LineSink<W: Write> {
    out: W,
}

impl<W: Write> UiSink for LineSink<W> {
    fn send(&mut self, event: UiEvent) -> Result<()> {
        let line = serde_json::to_string(&event)?;
        writeln!(self.out, "{line}")?;
        self.out.flush()?;
        Ok(())
    }
}

/// Serve requests from stdin, one JSON object per line, until EOF.
///
/// Requests are processed strictly in order: a request runs to completion
/// (including pacing sleeps and store writes) before the next line is
/// parsed. Malformed lines and failed requests are logged and skipped.
pub async fn run_stdio<H: DocumentHost>(engine: &mut Engine<H>) -> Result<()> {
    let stdin = io::stdin();
    let mut sink = LineSink { out: io::stdout() };

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let request: UiRequest = match serde_json::from_str(&line) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "dropping malformed request line");
                continue;
            }
        };

        if let Err(e) = handle_request(engine, request, &mut sink).await {
            warn!(error = %e, "request failed");
        }
    }

    Ok(())
}
