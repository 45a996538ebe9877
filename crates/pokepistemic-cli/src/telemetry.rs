use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

const ANNOUNCEMENT_TARGET: &str = "pokepistemic_core::announcement";
const CONTRADICTION_TARGET: &str = "pokepistemic_core::contradiction";
const REVEAL_TARGET: &str = "pokepistemic_core::reveal";

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse telemetry JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Counts aggregated from one session's structured log.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct TelemetrySummary {
    pub announcements: usize,
    pub total_eliminated: u64,
    pub contradictions: usize,
    pub reveals: usize,
}

impl TelemetrySummary {
    pub fn avg_eliminated(&self) -> Option<f64> {
        if self.announcements == 0 {
            None
        } else {
            Some(self.total_eliminated as f64 / self.announcements as f64)
        }
    }

    /// One-line rendering printed at exit.
    pub fn line(&self) -> String {
        let avg = self
            .avg_eliminated()
            .map(|value| format!("{value:.2}"))
            .unwrap_or_else(|| "n/a".to_string());
        format!(
            "Telemetry: {} announcement(s), avg eliminated {avg}, {} contradiction(s), {} reveal(s)",
            self.announcements, self.contradictions, self.reveals
        )
    }
}

/// Aggregates announcement, contradiction and reveal events from a JSONL log.
///
/// A missing file yields an empty summary.
pub fn summarise_telemetry(path: &Path) -> Result<TelemetrySummary, TelemetryError> {
    if !path.exists() {
        return Ok(TelemetrySummary::default());
    }

    let file = File::open(path).map_err(|source| TelemetryError::Io {
        context: "opening telemetry log",
        source,
    })?;
    let reader = BufReader::new(file);
    let mut summary = TelemetrySummary::default();

    for line in reader.lines() {
        let line = line.map_err(|source| TelemetryError::Io {
            context: "reading telemetry line",
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }

        let payload: Value = serde_json::from_str(&line)?;
        let target = payload
            .get("target")
            .and_then(Value::as_str)
            .unwrap_or_default();

        match target {
            ANNOUNCEMENT_TARGET => {
                summary.announcements += 1;
                if let Some(eliminated) = payload
                    .get("fields")
                    .and_then(|fields| fields.get("eliminated"))
                    .and_then(Value::as_u64)
                {
                    summary.total_eliminated += eliminated;
                }
            }
            CONTRADICTION_TARGET => summary.contradictions += 1,
            REVEAL_TARGET => summary.reveals += 1,
            _ => {}
        }
    }

    Ok(summary)
}
