#![warn(missing_docs)]
//! Deterministic testing surfaces: newline-delimited JSON event logs.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use treefell_core::SimTick;

/// Primary event record captured by headless tests.
#[derive(Debug, Serialize)]
pub struct EventRecord<'a> {
    /// Simulation tick when the event occurred.
    pub tick: SimTick,
    /// Human-readable kind label.
    pub kind: &'a str,
    /// Free-form payload.
    pub payload: &'a str,
}

/// An event carrying a structured payload.
#[derive(Debug, Serialize)]
pub struct DataRecord<'a, T: Serialize> {
    /// Simulation tick when the event occurred.
    pub tick: SimTick,
    /// Human-readable kind label.
    pub kind: &'a str,
    /// Serialized payload.
    pub data: &'a T,
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    file: File,
    lines: usize,
}

impl JsonlSink {
    /// Create (truncating) a sink at `path`, creating parent dirs if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        ensure_parent(path)?;
        let file = File::create(path)
            .with_context(|| format!("failed to create event log {}", path.display()))?;
        Ok(Self { file, lines: 0 })
    }

    /// Open a sink that appends to an existing log, creating it if missing.
    pub fn append<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        ensure_parent(path)?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open event log {}", path.display()))?;
        Ok(Self { file, lines: 0 })
    }

    /// Append an event to the log.
    pub fn write(&mut self, event: &EventRecord<'_>) -> Result<()> {
        self.write_line(event)
    }

    /// Append a structured event to the log.
    pub fn write_data<T: Serialize>(&mut self, tick: SimTick, kind: &str, data: &T) -> Result<()> {
        self.write_line(&DataRecord { tick, kind, data })
    }

    /// Lines written through this sink.
    pub fn lines(&self) -> usize {
        self.lines
    }

    fn write_line<T: Serialize>(&mut self, record: &T) -> Result<()> {
        let line = serde_json::to_string(record)?;
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        self.lines += 1;
        Ok(())
    }
}

/// Read every record of a JSONL log back as JSON values.
pub fn read_records<P: AsRef<Path>>(path: P) -> Result<Vec<serde_json::Value>> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("failed to open event log {}", path.display()))?;
    let mut records = Vec::new();
    for (number, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line)
            .with_context(|| format!("{}:{} is not valid JSON", path.display(), number + 1))?;
        records.push(record);
    }
    tracing::debug!(path = %path.display(), records = records.len(), "read event log");
    Ok(records)
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_log(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!(
            "treefell-testkit-{}-{}.jsonl",
            name,
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ))
    }

    #[derive(Serialize)]
    struct Felled {
        logs: usize,
    }

    #[test]
    fn sink_writes_and_reads_back_records() {
        let path = temp_log("roundtrip");
        let mut sink = JsonlSink::create(&path).expect("sink create");
        sink.write(&EventRecord {
            tick: SimTick::ZERO,
            kind: "Start",
            payload: "planted",
        })
        .expect("write succeeds");
        sink.write_data(SimTick::ZERO.advance(1), "Felled", &Felled { logs: 5 })
            .expect("write succeeds");
        assert_eq!(sink.lines(), 2);

        let records = read_records(&path).expect("log readable");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["payload"], "planted");
        assert_eq!(records[1]["kind"], "Felled");
        assert_eq!(records[1]["data"]["logs"], 5);
    }

    #[test]
    fn append_keeps_earlier_records() {
        let path = temp_log("append");
        JsonlSink::create(&path)
            .and_then(|mut sink| sink.write_data(SimTick::ZERO, "First", &1))
            .expect("first write");
        JsonlSink::append(&path)
            .and_then(|mut sink| sink.write_data(SimTick::ZERO, "Second", &2))
            .expect("second write");

        let kinds: Vec<_> = read_records(&path)
            .expect("log readable")
            .into_iter()
            .map(|r| r["kind"].clone())
            .collect();
        assert_eq!(kinds, vec!["First", "Second"]);
    }
}
