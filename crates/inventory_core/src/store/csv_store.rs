//! Delimited-text record store.
//!
//! # Responsibility
//! - Keep the in-memory record set and its backing file in step.
//! - Parse and render the `id,name,quantity,date` line format.
//!
//! # Invariants
//! - `add` appends exactly one line per accepted record; it never rewrites.
//! - `save` replaces the file through a sibling temp file and rename.
//! - `load` swaps in new records only after the whole file parsed.
//! - Item names are never written to logs.

use super::{Listing, LoadReport, RecordStore, StoreError, StoreResult};
use crate::model::record::{parse_registration_date, Record, RecordId};
use csv::{QuoteStyle, ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use log::{debug, error, info, warn};
use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

const FIELD_COUNT: usize = 4;

/// File-backed store bound to one path for its whole lifetime.
#[derive(Debug)]
pub struct CsvRecordStore {
    path: PathBuf,
    records: Vec<Record>,
}

impl CsvRecordStore {
    /// Creates an empty store bound to `path` without touching the file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            records: Vec::new(),
        }
    }

    /// Creates a store bound to `path` and loads its current contents.
    ///
    /// A missing file yields an empty store.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<(Self, LoadReport)> {
        let mut store = Self::new(path);
        let report = store.load()?;
        Ok((store, report))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    // I/O failures surfaced through the csv reader or writer stay `Io`;
    // only decoding failures are reported as `Csv`.
    fn csv_error(&self, source: csv::Error) -> StoreError {
        if !source.is_io_error() {
            return StoreError::Csv {
                path: self.path.clone(),
                source,
            };
        }
        let source = match source.into_kind() {
            csv::ErrorKind::Io(err) => err,
            other => io::Error::new(io::ErrorKind::Other, format!("{other:?}")),
        };
        self.io_error(source)
    }

    fn append_line(&self, record: &Record) -> StoreResult<()> {
        let needs_newline = ends_without_newline(&self.path).map_err(|err| self.io_error(err))?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|err| self.io_error(err))?;
        if needs_newline {
            file.write_all(b"\n").map_err(|err| self.io_error(err))?;
        }

        let mut writer = line_writer(file);
        writer
            .serialize(record)
            .map_err(|err| self.csv_error(err))?;
        writer.flush().map_err(|err| self.io_error(err))
    }

    fn write_snapshot(&self, target: &Path) -> StoreResult<()> {
        let file = File::create(target).map_err(|err| self.io_error(err))?;
        let mut writer = line_writer(file);
        for record in &self.records {
            writer
                .serialize(record)
                .map_err(|err| self.csv_error(err))?;
        }
        let file = writer
            .into_inner()
            .map_err(|err| self.io_error(err.into_error()))?;
        file.sync_all().map_err(|err| self.io_error(err))
    }
}

impl RecordStore for CsvRecordStore {
    fn add(&mut self, record: Record) -> StoreResult<()> {
        if self.records.iter().any(|known| known.id() == record.id()) {
            warn!(
                "event=store_add module=store status=rejected error_code=duplicate_id id={}",
                record.id()
            );
            return Err(StoreError::DuplicateId(record.id()));
        }

        if let Err(err) = self.append_line(&record) {
            error!(
                "event=store_add module=store status=error error_code={} id={} error={}",
                err.code(),
                record.id(),
                err
            );
            return Err(err);
        }

        info!(
            "event=store_add module=store status=ok id={} records={}",
            record.id(),
            self.records.len() + 1
        );
        self.records.push(record);
        Ok(())
    }

    fn list(&self) -> Listing {
        if self.records.is_empty() {
            return Listing::NoRecords;
        }

        let mut sorted = self.records.clone();
        sorted.sort_by(|a, b| a.name().cmp(b.name()).then(a.id().cmp(&b.id())));
        Listing::Records(sorted)
    }

    fn load(&mut self) -> StoreResult<LoadReport> {
        let started_at = Instant::now();
        info!("event=store_load module=store status=start");

        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                self.records.clear();
                info!(
                    "event=store_load module=store status=ok records=0 skipped=0 file_missing=true duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                return Ok(LoadReport::default());
            }
            Err(err) => {
                let err = self.io_error(err);
                error!(
                    "event=store_load module=store status=error error_code={} error={}",
                    err.code(),
                    err
                );
                return Err(err);
            }
        };

        match parse_file(file) {
            Ok((records, skipped)) => {
                let report = LoadReport {
                    loaded: records.len(),
                    skipped,
                };
                self.records = records;
                info!(
                    "event=store_load module=store status=ok records={} skipped={} duration_ms={}",
                    report.loaded,
                    report.skipped,
                    started_at.elapsed().as_millis()
                );
                Ok(report)
            }
            Err(ParseFailure::Csv(source)) => {
                let err = self.csv_error(source);
                error!(
                    "event=store_load module=store status=error error_code={} duration_ms={}",
                    err.code(),
                    started_at.elapsed().as_millis()
                );
                Err(err)
            }
            Err(ParseFailure::Invalid(err)) => {
                error!(
                    "event=store_load module=store status=error error_code={} duration_ms={}",
                    err.code(),
                    started_at.elapsed().as_millis()
                );
                Err(err)
            }
        }
    }

    fn save(&self) -> StoreResult<()> {
        let mut temp_path = self.path.clone().into_os_string();
        temp_path.push(".tmp");
        let temp_path = PathBuf::from(temp_path);

        let result = self
            .write_snapshot(&temp_path)
            .and_then(|()| fs::rename(&temp_path, &self.path).map_err(|err| self.io_error(err)));

        match &result {
            Ok(()) => info!(
                "event=store_save module=store status=ok records={}",
                self.records.len()
            ),
            Err(err) => {
                // Best effort; the original file is still intact.
                let _ = fs::remove_file(&temp_path);
                error!(
                    "event=store_save module=store status=error error_code={} error={}",
                    err.code(),
                    err
                );
            }
        }
        result
    }

    fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.iter().find(|record| record.id() == id)
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

enum ParseFailure {
    Csv(csv::Error),
    Invalid(StoreError),
}

fn parse_file(file: File) -> Result<(Vec<Record>, usize), ParseFailure> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(file);

    let mut records = Vec::new();
    let mut seen = HashSet::new();
    let mut skipped = 0;

    for row in reader.records() {
        let row = row.map_err(ParseFailure::Csv)?;
        let line = row.position().map(|pos| pos.line()).unwrap_or_default();

        if row.len() != FIELD_COUNT {
            skipped += 1;
            warn!(
                "event=store_load_skip module=store status=skipped line={} fields={}",
                line,
                row.len()
            );
            continue;
        }

        let record = parse_row(&row, line).map_err(ParseFailure::Invalid)?;
        if !seen.insert(record.id()) {
            return Err(ParseFailure::Invalid(StoreError::InvalidData {
                line,
                message: format!("item id {} appears more than once", record.id()),
            }));
        }
        debug!(
            "event=store_load_row module=store status=ok line={} id={}",
            line,
            record.id()
        );
        records.push(record);
    }

    Ok((records, skipped))
}

fn parse_row(row: &StringRecord, line: u64) -> StoreResult<Record> {
    let invalid = |message: String| StoreError::InvalidData { line, message };
    // Every field is trimmed the same way; names cannot hold whitespace anyway.

    let id = row[0]
        .trim()
        .parse::<RecordId>()
        .map_err(|_| invalid(format!("id `{}` is not a non-negative integer", &row[0])))?;
    let quantity = row[2].trim().parse::<u64>().map_err(|_| {
        invalid(format!(
            "quantity `{}` is not a non-negative integer",
            &row[2]
        ))
    })?;
    let date = parse_registration_date(row[3].trim())
        .ok_or_else(|| invalid(format!("date `{}` is not a valid YYYY-MM-DD date", &row[3])))?;

    Record::new(id, row[1].trim(), quantity, date).map_err(|err| invalid(err.to_string()))
}

fn line_writer<W: Write>(inner: W) -> csv::Writer<W> {
    WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(inner)
}

fn ends_without_newline(path: &Path) -> io::Result<bool> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(err) => return Err(err),
    };
    if file.metadata()?.len() == 0 {
        return Ok(false);
    }

    let mut last = [0_u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}
