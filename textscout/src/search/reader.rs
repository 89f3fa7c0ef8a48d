use memmap2::Mmap;
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{trace, warn};

use crate::config::EncodingMode;
use crate::errors::{SearchError, SearchResult};
use crate::metrics::SearchMetrics;

// Constants for file reading
const BUFFER_CAPACITY: usize = 65536;
pub(crate) const SMALL_FILE_THRESHOLD: u64 = 32 * 1024; // 32KB
pub(crate) const LARGE_FILE_THRESHOLD: u64 = 10 * 1024 * 1024; // 10MB

/// Decodes file bytes according to the encoding mode
fn decode_bytes(bytes: &[u8], path: &Path, encoding_mode: EncodingMode) -> SearchResult<String> {
    match encoding_mode {
        EncodingMode::FailFast => std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|e| SearchError::encoding_error(path, e)),
        EncodingMode::Lossy => {
            let cow = String::from_utf8_lossy(bytes);
            // Owned means at least one invalid sequence was replaced
            if let Cow::Owned(_) = cow {
                warn!("Invalid UTF-8 replaced in file: {}", path.display());
            }
            Ok(cow.into_owned())
        }
    }
}

/// Reads whole files as text, picking a strategy by file size.
///
/// Every strategy opens the file read-only and releases the handle when the
/// read returns, whether it succeeded or not.
#[derive(Debug, Clone, Default)]
pub struct FileReader {
    encoding_mode: EncodingMode,
    metrics: SearchMetrics,
}

impl FileReader {
    /// Creates a new FileReader
    pub fn new(encoding_mode: EncodingMode) -> Self {
        Self::with_metrics(encoding_mode, SearchMetrics::new())
    }

    /// Creates a new FileReader that reports into `metrics`
    pub fn with_metrics(encoding_mode: EncodingMode, metrics: SearchMetrics) -> Self {
        Self {
            encoding_mode,
            metrics,
        }
    }

    /// Gets the shared metrics
    pub fn metrics(&self) -> &SearchMetrics {
        &self.metrics
    }

    /// Read a small file in one call
    fn read_small_file(&self, path: &Path) -> SearchResult<String> {
        trace!("Reading small file: {}", path.display());
        let bytes = std::fs::read(path).map_err(|e| SearchError::from_io(path, e))?;
        self.metrics.record_search(bytes.len() as u64);
        decode_bytes(&bytes, path, self.encoding_mode)
    }

    /// Read a file through a buffered reader
    fn read_file_buffered(&self, path: &Path) -> SearchResult<String> {
        trace!("Reading buffered file: {}", path.display());
        let file = File::open(path).map_err(|e| SearchError::from_io(path, e))?;

        let mut reader = BufReader::with_capacity(BUFFER_CAPACITY, file);
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|e| SearchError::from_io(path, e))?;
        self.metrics.record_search(bytes.len() as u64);

        decode_bytes(&bytes, path, self.encoding_mode)
    }

    /// Read a file using memory mapping
    fn read_mmap_file(&self, path: &Path) -> SearchResult<String> {
        trace!("Memory mapping file: {}", path.display());
        let file = File::open(path).map_err(|e| SearchError::from_io(path, e))?;

        // The map is read-only and dropped before this function returns
        let mmap = unsafe { Mmap::map(&file) }.map_err(|e| SearchError::from_io(path, e))?;
        self.metrics.record_search(mmap.len() as u64);

        decode_bytes(&mmap, path, self.encoding_mode)
    }

    /// Reads the entire file as text
    pub fn read_to_string(&self, path: &Path) -> SearchResult<String> {
        match path.metadata() {
            Ok(metadata) => {
                let size = metadata.len();
                self.metrics.record_file_processing(size);

                if size < SMALL_FILE_THRESHOLD {
                    self.read_small_file(path)
                } else if size >= LARGE_FILE_THRESHOLD {
                    self.read_mmap_file(path)
                } else {
                    self.read_file_buffered(path)
                }
            }
            Err(e) => {
                warn!("Failed to get metadata for {}: {}", path.display(), e);
                self.read_file_buffered(path)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_reads_small_and_buffered_files() {
        let dir = tempdir().unwrap();
        let small = dir.path().join("small.txt");
        fs::write(&small, "hello world").unwrap();

        let medium = dir.path().join("medium.txt");
        let line = "a line of text that is repeated\n";
        fs::write(&medium, line.repeat(2000)).unwrap(); // ~64KB

        let reader = FileReader::new(EncodingMode::FailFast);
        assert_eq!(reader.read_to_string(&small).unwrap(), "hello world");
        assert_eq!(reader.read_to_string(&medium).unwrap().len(), line.len() * 2000);

        let stats = reader.metrics().get_stats();
        assert_eq!(stats.small_files, 1);
        assert_eq!(stats.buffered_files, 1);
        assert_eq!(stats.files_searched, 2);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let reader = FileReader::new(EncodingMode::FailFast);

        let result = reader.read_to_string(&dir.path().join("gone.txt"));
        assert!(matches!(result, Err(SearchError::FileNotFound(_))));
    }

    #[test]
    fn test_invalid_utf8_fail_fast() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("binary.txt");
        fs::write(&path, [b'o', b'k', 0xff, 0xfe, b'!']).unwrap();

        let reader = FileReader::new(EncodingMode::FailFast);
        let result = reader.read_to_string(&path);
        assert!(matches!(result, Err(SearchError::EncodingError { .. })));
    }

    #[test]
    fn test_invalid_utf8_lossy() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("binary.txt");
        fs::write(&path, [b'o', b'k', 0xff, b'!']).unwrap();

        let reader = FileReader::new(EncodingMode::Lossy);
        let text = reader.read_to_string(&path).unwrap();
        assert_eq!(text, "ok\u{FFFD}!");
    }
}
