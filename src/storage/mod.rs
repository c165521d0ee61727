//! Storage layer for dump runs
//!
//! Each run writes into its own timestamped directory:
//! - one JSON document per resource kind (`fpldata_{kind}_{stamp}.json`)
//! - a CSV copy of flat tables (`fpldata_{kind}_{stamp}.csv`)

use chrono::{DateTime, TimeZone};
use serde::Serialize;
use std::{
    fs,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::{fpl::table::Table, Result};


pub const FILE_PREFIX: &str = "fpldata_";

/// Directory name format for a run, e.g. `20240816-190000`.
pub const RUN_STAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Writes the artifacts of one dump run.
#[derive(Debug)]
pub struct DumpWriter {
    run_dir: PathBuf,
    stamp: String,
    written: Vec<PathBuf>,
}

impl DumpWriter {
    /// Create `{output_dir}/{stamp}/` for a run started at `started`.
    pub fn create<Tz: TimeZone>(output_dir: &Path, started: &DateTime<Tz>) -> Result<Self>
    where
        Tz::Offset: std::fmt::Display,
    {
        let stamp = started.format(RUN_STAMP_FORMAT).to_string();
        let run_dir = output_dir.join(&stamp);
        fs::create_dir_all(&run_dir)?;

        Ok(Self {
            run_dir,
            stamp,
            written: Vec::new(),
        })
    }

    pub fn run_dir(&self) -> &Path {
        &self.run_dir
    }

    pub fn stamp(&self) -> &str {
        &self.stamp
    }

    /// Path for a resource kind and extension inside the run directory.
    pub fn file_path(&self, kind: &str, extension: &str) -> PathBuf {
        self.run_dir
            .join(format!("{FILE_PREFIX}{kind}_{}.{extension}", self.stamp))
    }

    pub fn write_json<T: Serialize>(&mut self, kind: &str, value: &T) -> Result<PathBuf> {
        let path = self.file_path(kind, "json");
        let mut out = BufWriter::new(fs::File::create(&path)?);
        serde_json::to_writer(&mut out, value)?;
        out.flush()?;
        Ok(self.record(path))
    }

    pub fn write_csv(&mut self, kind: &str, table: &Table) -> Result<PathBuf> {
        let path = self.file_path(kind, "csv");
        table.write_csv(BufWriter::new(fs::File::create(&path)?))?;
        Ok(self.record(path))
    }

    /// Files written so far, in write order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    pub fn into_written(self) -> Vec<PathBuf> {
        self.written
    }

    fn record(&mut self, path: PathBuf) -> PathBuf {
        tracing::debug!(path = %path.display(), "wrote artifact");
        self.written.push(path.clone());
        path
    }
}
