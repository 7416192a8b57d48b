//! Streaming wordlist writer
//!
//! Words are written one line at a time as the generator produces them, so
//! memory stays bounded by a single word plus the output buffer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{WordForgeError, Result};

/// Progress callback interval, in words
pub const PROGRESS_INTERVAL: u64 = 10_000;

const BUFFER_SIZE: usize = 1 << 16;

/// Counters for a finished write
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteStats {
    pub words: u64,
    pub bytes: u64,
}

impl WriteStats {
    pub fn merge(&mut self, other: WriteStats) {
        self.words += other.words;
        self.bytes += other.bytes;
    }
}

/// Write every word as one `\n`-terminated line.
///
/// `on_progress` receives the number of words written so far every
/// [`PROGRESS_INTERVAL`] words and once more at the end. Write failures are
/// returned as they happen; nothing is retried.
pub fn write_words<I, W, F>(words: I, sink: W, mut on_progress: F) -> Result<WriteStats>
where
    I: IntoIterator<Item = String>,
    W: Write,
    F: FnMut(u64),
{
    let mut out = BufWriter::with_capacity(BUFFER_SIZE, sink);
    let mut stats = WriteStats::default();

    for word in words {
        out.write_all(word.as_bytes())?;
        out.write_all(b"\n")?;
        stats.words += 1;
        stats.bytes += word.len() as u64 + 1;

        if stats.words % PROGRESS_INTERVAL == 0 {
            on_progress(stats.words);
        }
    }

    out.flush()?;
    on_progress(stats.words);

    tracing::debug!(words = stats.words, bytes = stats.bytes, "Wordlist stream flushed");
    Ok(stats)
}

/// Create `path` (and its parent directories) and stream `words` into it
pub fn write_to_path<I, F>(words: I, path: &Path, on_progress: F) -> Result<WriteStats>
where
    I: IntoIterator<Item = String>,
    F: FnMut(u64),
{
    let file = create_output(path)?;
    write_words(words, file, on_progress).map_err(|e| with_path(e, path))
}

pub(crate) fn create_output(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                WordForgeError::io(e.to_string(), Some(parent.to_string_lossy().to_string()))
            })?;
        }
    }

    File::create(path).map_err(|e| {
        WordForgeError::io(e.to_string(), Some(path.to_string_lossy().to_string()))
    })
}

/// Attach `path` to an IO error that was raised without one
pub(crate) fn with_path(err: WordForgeError, path: &Path) -> WordForgeError {
    match err {
        WordForgeError::Io { message, path: None } => {
            WordForgeError::io(message, Some(path.to_string_lossy().to_string()))
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordlist::{generate, Alphabet};
    use std::io;

    #[test]
    fn test_writes_one_line_per_word() {
        let gen = generate(Alphabet::from("ab"), 2, None).unwrap();
        let mut buf = Vec::new();
        let stats = write_words(gen, &mut buf, |_| {}).unwrap();

        assert_eq!(String::from_utf8(buf).unwrap(), "aa\nab\nba\nbb\n");
        assert_eq!(stats, WriteStats { words: 4, bytes: 12 });
    }

    #[test]
    fn test_progress_callback() {
        let gen = generate(Alphabet::from("0123456789"), 5, None).unwrap();
        let mut calls = Vec::new();
        write_words(gen, io::sink(), |n| calls.push(n)).unwrap();

        assert_eq!(calls.len(), 11);
        assert_eq!(calls[0], PROGRESS_INTERVAL);
        assert_eq!(*calls.last().unwrap(), 100_000);
    }

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_sink_errors_propagate() {
        let gen = generate(Alphabet::from("ab"), 2, None).unwrap();
        let err = write_words(gen, FailingSink, |_| {}).unwrap_err();
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn test_write_to_path_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("list.txt");
        let gen = generate(Alphabet::from("xy"), 3, None).unwrap();

        let stats = write_to_path(gen, &path, |_| {}).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(stats.words, 8);
        assert_eq!(content.lines().count(), 8);
        assert!(content.ends_with("yyy\n"));
    }
}
