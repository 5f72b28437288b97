//! Quad dumps: one JSON object per line.
//!
//! Blank lines and `#` comments are skipped on read. Writes are staged in a
//! sibling file, synced, renamed over the target, and the directory entry is
//! synced as well.

use crate::protocol::StoreError;
use graphrev_model::{Term, Triple};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// A triple placed in a named graph.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Quad {
    pub graph: String,
    pub subject: String,
    pub predicate: String,
    pub object: Term,
}

impl Quad {
    pub fn new(graph: impl Into<String>, triple: Triple) -> Self {
        Self {
            graph: graph.into(),
            subject: triple.subject,
            predicate: triple.predicate,
            object: triple.object,
        }
    }

    pub fn into_parts(self) -> (String, Triple) {
        (
            self.graph,
            Triple {
                subject: self.subject,
                predicate: self.predicate,
                object: self.object,
            },
        )
    }
}

fn io_error(path: &Path, err: impl std::fmt::Display) -> StoreError {
    StoreError::Io(0, format!("{}: {err}", path.display()))
}

/// Parse a quad dump. Errors carry the 1-based line number.
pub fn read_quads(reader: impl BufRead) -> Result<Vec<Quad>, StoreError> {
    let mut quads = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.map_err(|e| StoreError::Io(line_no, e.to_string()))?;
        let body = line.trim();
        if body.is_empty() || body.starts_with('#') {
            continue;
        }
        let quad = serde_json::from_str::<Quad>(body)
            .map_err(|e| StoreError::Parse(line_no, e.to_string()))?;
        quads.push(quad);
    }
    Ok(quads)
}

pub fn write_quads(writer: &mut impl Write, quads: &[Quad]) -> Result<(), StoreError> {
    for quad in quads {
        serde_json::to_writer(&mut *writer, quad)
            .map_err(|e| StoreError::Serialize(e.to_string()))?;
        writer
            .write_all(b"\n")
            .map_err(|e| StoreError::Io(0, e.to_string()))?;
    }
    Ok(())
}

/// Read a dump from disk, refusing NUL bytes and invalid UTF-8 before any
/// line is parsed.
pub fn read_quads_from_path(path: impl AsRef<Path>) -> Result<Vec<Quad>, StoreError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| io_error(path, e))?;
    if let Some(offset) = bytes.iter().position(|byte| *byte == 0) {
        return Err(StoreError::Corrupt(format!(
            "{}: NUL byte at offset {offset}",
            path.display()
        )));
    }
    let text = String::from_utf8(bytes).map_err(|e| {
        StoreError::Corrupt(format!(
            "{}: not UTF-8 after byte {}",
            path.display(),
            e.utf8_error().valid_up_to()
        ))
    })?;
    read_quads(text.as_bytes())
}

/// Replace `path` with a dump of `quads`. Readers see the old file or the
/// new one, never a partial write.
pub fn write_quads_to_path(path: impl AsRef<Path>, quads: &[Quad]) -> Result<(), StoreError> {
    let (staged, mut writer) = StagedFile::create(path.as_ref())?;
    write_quads(&mut writer, quads)?;
    staged.commit(writer)
}

/// A sibling file that replaces its target on commit and is removed if
/// dropped uncommitted.
struct StagedFile {
    target: PathBuf,
    staging: PathBuf,
    committed: bool,
}

impl StagedFile {
    fn create(target: &Path) -> Result<(Self, BufWriter<File>), StoreError> {
        if let Some(dir) = parent_dir(target) {
            fs::create_dir_all(dir).map_err(|e| io_error(dir, e))?;
        }
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos())
            .unwrap_or_default();
        let name = target
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "quads.jsonl".to_string());
        let staging = target.with_file_name(format!(
            ".{name}.staged-{}-{nanos}",
            std::process::id()
        ));
        let file = File::create(&staging).map_err(|e| io_error(&staging, e))?;
        let staged = Self {
            target: target.to_path_buf(),
            staging,
            committed: false,
        };
        Ok((staged, BufWriter::new(file)))
    }

    fn commit(mut self, writer: BufWriter<File>) -> Result<(), StoreError> {
        let file = writer
            .into_inner()
            .map_err(|e| io_error(&self.staging, e.error()))?;
        file.sync_all().map_err(|e| io_error(&self.staging, e))?;
        drop(file);
        fs::rename(&self.staging, &self.target).map_err(|e| {
            StoreError::Io(
                0,
                format!(
                    "{} -> {}: {e}",
                    self.staging.display(),
                    self.target.display()
                ),
            )
        })?;
        self.committed = true;
        // The rename is only durable once the directory entry is.
        if let Some(dir) = parent_dir(&self.target) {
            File::open(dir)
                .and_then(|handle| handle.sync_all())
                .map_err(|e| io_error(dir, e))?;
        }
        Ok(())
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if !self.committed {
            let _ = fs::remove_file(&self.staging);
        }
    }
}

fn parent_dir(path: &Path) -> Option<&Path> {
    path.parent().filter(|dir| !dir.as_os_str().is_empty())
}
