//! The in-memory contact directory.
//!
//! A [`Directory`] is an ordered list of [`Record`]s. Insertion order is
//! kept and duplicates are allowed. All lookups are linear scans.
//!
//! Persistence uses the line format in [`crate::format`]. Saving always
//! appends to the target file; loading always appends to the directory.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{DirectoryError, Result};
use crate::format::{decode_line, encode_line};
use crate::record::{Field, Record};

/// Outcome of [`Directory::load_from_file_lenient`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Records appended to the directory.
    pub loaded: usize,
    /// 1-based line numbers that were skipped as malformed.
    pub skipped: Vec<usize>,
}

/// Ordered collection of contact records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directory {
    entries: Vec<Record>,
}

impl Directory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Append a record at the end.
    pub fn add(&mut self, record: Record) {
        self.entries.push(record);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Alias for [`len`](Self::len).
    pub fn size(&self) -> usize {
        self.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index`, or `IndexOutOfRange`.
    pub fn get(&self, index: usize) -> Result<&Record> {
        self.entries
            .get(index)
            .ok_or(DirectoryError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            })
    }

    pub fn entries(&self) -> &[Record] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.entries.iter()
    }

    // ---------------------------------------------------------------------
    // Removal
    // ---------------------------------------------------------------------

    /// Remove the first entry equal to `record`. Returns whether one was removed.
    pub fn remove_by_entry(&mut self, record: &Record) -> bool {
        match self.entries.iter().position(|e| e == record) {
            Some(pos) => {
                self.entries.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Remove and return the entry at `index`, or `IndexOutOfRange`.
    pub fn remove_by_index(&mut self, index: usize) -> Result<Record> {
        if index >= self.entries.len() {
            return Err(DirectoryError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        Ok(self.entries.remove(index))
    }

    /// Remove every entry whose `field` equals `value` exactly.
    ///
    /// Remaining entries keep their relative order. Returns the number removed.
    pub fn remove_by_field(&mut self, field: Field, value: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.field(field) != value);
        before - self.entries.len()
    }

    pub fn remove_by_name(&mut self, name: &str) -> usize {
        self.remove_by_field(Field::Name, name)
    }

    pub fn remove_by_postal_address(&mut self, postal_address: &str) -> usize {
        self.remove_by_field(Field::PostalAddress, postal_address)
    }

    pub fn remove_by_phone_number(&mut self, phone_number: &str) -> usize {
        self.remove_by_field(Field::PhoneNumber, phone_number)
    }

    pub fn remove_by_email_address(&mut self, email_address: &str) -> usize {
        self.remove_by_field(Field::EmailAddress, email_address)
    }

    // ---------------------------------------------------------------------
    // Search
    // ---------------------------------------------------------------------

    /// All entries whose `field` equals `value` exactly, in directory order.
    pub fn search_by_field(&self, field: Field, value: &str) -> Vec<Record> {
        self.entries
            .iter()
            .filter(|e| e.field(field) == value)
            .cloned()
            .collect()
    }

    pub fn search_by_name(&self, name: &str) -> Vec<Record> {
        self.search_by_field(Field::Name, name)
    }

    pub fn search_by_postal_address(&self, postal_address: &str) -> Vec<Record> {
        self.search_by_field(Field::PostalAddress, postal_address)
    }

    pub fn search_by_phone_number(&self, phone_number: &str) -> Vec<Record> {
        self.search_by_field(Field::PhoneNumber, phone_number)
    }

    pub fn search_by_email_address(&self, email_address: &str) -> Vec<Record> {
        self.search_by_field(Field::EmailAddress, email_address)
    }

    /// Entries where `keyword` is a case-sensitive substring of all five
    /// fields concatenated without separators.
    ///
    /// A keyword may therefore match across a field boundary.
    pub fn search_by_global_keyword(&self, keyword: &str) -> Vec<Record> {
        self.entries
            .iter()
            .filter(|e| e.concatenated().contains(keyword))
            .cloned()
            .collect()
    }

    // ---------------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------------

    /// Append every entry to the file at `path`, creating it if needed.
    ///
    /// Existing file content is never truncated.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = open_for_write(path, OpenOptions::new().create(true).append(true))?;
        self.write_entries(path, file)?;
        tracing::debug!("Appended {} records to {}", self.entries.len(), path.display());
        Ok(())
    }

    /// Write every entry to the file at `path`, replacing its content.
    ///
    /// Entries go to a temporary file in the same directory, which is then
    /// renamed over `path`. A failed write leaves the old file untouched.
    pub fn replace_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if path.is_dir() {
            return Err(DirectoryError::IsADirectory(path.to_path_buf()));
        }
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let tmp = NamedTempFile::new_in(parent).map_err(|e| DirectoryError::io(parent, e))?;
        self.write_entries(path, tmp.as_file())?;
        tmp.persist(path)
            .map_err(|e| DirectoryError::io(path, e.error))?;
        tracing::debug!("Wrote {} records to {}", self.entries.len(), path.display());
        Ok(())
    }

    fn write_entries(&self, path: &Path, file: impl Write) -> Result<()> {
        let mut out = BufWriter::new(file);
        for record in &self.entries {
            out.write_all(encode_line(record).as_bytes())
                .map_err(|e| DirectoryError::io(path, e))?;
        }
        out.flush().map_err(|e| DirectoryError::io(path, e))
    }

    /// Append every record in the file at `path` to this directory.
    ///
    /// The whole file is parsed before anything is appended: on any error,
    /// including the first malformed line, the directory is unchanged.
    /// Empty lines are skipped. Returns the number of records appended.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let mut parsed = Vec::new();
        for (line_no, line) in read_lines(path)? {
            parsed.push(decode_line(&line, line_no)?);
        }

        let loaded = parsed.len();
        self.entries.extend(parsed);
        tracing::debug!("Loaded {} records from {}", loaded, path.display());
        Ok(loaded)
    }

    /// Like [`load_from_file`](Self::load_from_file), but malformed lines
    /// are skipped and reported instead of failing the load.
    ///
    /// Missing files and I/O errors still fail, leaving the directory unchanged.
    pub fn load_from_file_lenient(&mut self, path: impl AsRef<Path>) -> Result<LoadReport> {
        let path = path.as_ref();
        let mut parsed = Vec::new();
        let mut report = LoadReport::default();
        for (line_no, line) in read_lines(path)? {
            match decode_line(&line, line_no) {
                Ok(record) => parsed.push(record),
                Err(e) => {
                    tracing::warn!("Skipping line in {}: {}", path.display(), e);
                    report.skipped.push(line_no);
                }
            }
        }

        report.loaded = parsed.len();
        self.entries.extend(parsed);
        tracing::debug!(
            "Loaded {} records from {} ({} skipped)",
            report.loaded,
            path.display(),
            report.skipped.len()
        );
        Ok(report)
    }
}

/// Open `path` for writing, rejecting directories up front.
fn open_for_write(path: &Path, options: &OpenOptions) -> Result<File> {
    if path.is_dir() {
        return Err(DirectoryError::IsADirectory(path.to_path_buf()));
    }
    options.open(path).map_err(|e| DirectoryError::io(path, e))
}

/// Read all non-empty lines of `path`, paired with their 1-based line numbers.
fn read_lines(path: &Path) -> Result<Vec<(usize, String)>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(DirectoryError::FileNotFound(path.to_path_buf()));
        }
        Err(e) => return Err(DirectoryError::io(path, e)),
    };

    let mut lines = Vec::new();
    for (i, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| DirectoryError::io(path, e))?;
        if !line.is_empty() {
            lines.push((i + 1, line));
        }
    }
    Ok(lines)
}

impl fmt::Display for Directory {
    /// One entry per line, prefixed by its index.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, record) in self.entries.iter().enumerate() {
            writeln!(f, "[{i}] {record}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Directory {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<Record> for Directory {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Directory {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Extend<Record> for Directory {
    fn extend<I: IntoIterator<Item = Record>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}
