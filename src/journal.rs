use std::fs::File;
use std::io::Write;
use std::path::Path;

use tracing::warn;

/// Narrative event sink. Recording is best-effort: implementations must
/// swallow their own failures so a broken log never stops a simulation.
pub trait Journal {
    fn record(&mut self, entry: &str);
}

/// Discards everything.
pub struct NullJournal;

impl Journal for NullJournal {
    fn record(&mut self, _entry: &str) {}
}

/// Collects entries in memory. Used by tests to assert on the narrative.
#[derive(Default)]
pub struct MemoryJournal {
    entries: Vec<String>,
}

impl MemoryJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

impl Journal for MemoryJournal {
    fn record(&mut self, entry: &str) {
        self.entries.push(entry.to_string());
    }
}

/// Appends entries to a text file, one per line. The file is truncated when
/// opened so each run starts a fresh log.
pub struct FileJournal {
    file: File,
    failed: bool,
}

impl FileJournal {
    pub fn create(path: impl AsRef<Path>) -> std::io::Result<Self> {
        Ok(Self {
            file: File::create(path)?,
            failed: false,
        })
    }
}

impl Journal for FileJournal {
    fn record(&mut self, entry: &str) {
        if self.failed {
            return;
        }
        if let Err(err) = writeln!(self.file, "{entry}") {
            warn!("journal write failed, further entries dropped: {err}");
            self.failed = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_journal_keeps_order() {
        let mut journal = MemoryJournal::new();
        journal.record("first");
        journal.record("second");
        assert_eq!(journal.entries(), ["first", "second"]);
    }

    #[test]
    fn file_journal_writes_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("journal.txt");
        {
            let mut journal = FileJournal::create(&path).unwrap();
            journal.record("Deer explores the area in search of food.");
        }
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "Deer explores the area in search of food.\n");
    }
}
