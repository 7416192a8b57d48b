//! Parallel generation over disjoint index ranges
//!
//! The remaining index space is split into contiguous ranges. Each range is
//! written to its own shard file on a blocking worker, then the shards are
//! concatenated into the destination in index order, so the result is
//! byte-identical to a single-stream run.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;

use super::writer::{create_output, with_path, write_to_path, WriteStats};
use super::WordGenerator;
use crate::error::{WordForgeError, Result};

/// Path of the shard file for worker `n`
pub fn shard_path(path: &Path, n: usize) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(format!(".part{}", n));
    PathBuf::from(name)
}

/// Write the generator's remaining words to `path` using up to `workers`
/// blocking workers.
///
/// `on_progress` receives the number of words written across all workers.
/// If any worker fails, the other workers stop at their next word, every
/// shard file is removed and the first error is returned.
pub async fn write_sharded<F>(
    generator: WordGenerator,
    path: &Path,
    workers: usize,
    on_progress: F,
) -> Result<WriteStats>
where
    F: Fn(u64) + Send + Sync + 'static,
{
    let ranges = generator.partition_ranges(workers);
    let start = Instant::now();

    if ranges.len() <= 1 {
        let path = path.to_path_buf();
        return tokio::task::spawn_blocking(move || write_to_path(generator, &path, on_progress)).await?;
    }

    tracing::info!(
        workers = ranges.len(),
        total = %generator.remaining(),
        output = %path.display(),
        "Starting sharded generation"
    );

    let written = Arc::new(AtomicU64::new(0));
    let cancelled = Arc::new(AtomicBool::new(false));
    let on_progress = Arc::new(on_progress);
    let shard_paths: Vec<PathBuf> = (0..ranges.len()).map(|n| shard_path(path, n)).collect();

    let tasks: Vec<_> = ranges
        .into_iter()
        .zip(shard_paths.iter().cloned())
        .map(|(range, shard)| {
            let slice = generator.slice(range);
            let written = Arc::clone(&written);
            let cancelled = Arc::clone(&cancelled);
            let on_progress = Arc::clone(&on_progress);

            tokio::task::spawn_blocking(move || {
                let mut last = 0u64;
                let words = until_cancelled(slice, Arc::clone(&cancelled));
                let result = write_to_path(words, &shard, |count| {
                    let delta = count - last;
                    last = count;
                    let total = written.fetch_add(delta, Ordering::Relaxed) + delta;
                    on_progress(total);
                });
                if result.is_err() {
                    cancelled.store(true, Ordering::Relaxed);
                }
                result
            })
        })
        .collect();

    let mut stats = WriteStats::default();
    let mut failure: Option<WordForgeError> = None;

    for (n, joined) in join_all(tasks).await.into_iter().enumerate() {
        match joined.map_err(WordForgeError::from).and_then(|r| r) {
            Ok(shard_stats) => {
                tracing::debug!(shard = n, words = shard_stats.words, "Shard complete");
                stats.merge(shard_stats);
            }
            Err(e) => {
                tracing::warn!(shard = n, error = %e, "Shard failed");
                failure.get_or_insert(e);
            }
        }
    }

    if let Some(e) = failure {
        remove_shards(&shard_paths);
        return Err(e);
    }

    let destination = path.to_path_buf();
    let stitch_paths = shard_paths.clone();
    let stitched = tokio::task::spawn_blocking(move || stitch(&stitch_paths, &destination)).await?;
    remove_shards(&shard_paths);
    stitched?;

    tracing::info!(
        words = stats.words,
        bytes = stats.bytes,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Sharded generation complete"
    );

    Ok(stats)
}

/// Stop yielding words once `cancelled` is set
fn until_cancelled(
    words: WordGenerator,
    cancelled: Arc<AtomicBool>,
) -> impl Iterator<Item = String> {
    words.take_while(move |_| !cancelled.load(Ordering::Relaxed))
}

/// Concatenate shard files into `destination` in order
fn stitch(shards: &[PathBuf], destination: &Path) -> Result<()> {
    let mut out = BufWriter::new(create_output(destination)?);

    for shard in shards {
        let mut input = File::open(shard).map_err(|e| {
            WordForgeError::io(e.to_string(), Some(shard.to_string_lossy().to_string()))
        })?;
        io::copy(&mut input, &mut out)
            .map_err(|e| with_path(e.into(), destination))?;
    }

    out.flush().map_err(|e| with_path(e.into(), destination))
}

fn remove_shards(shards: &[PathBuf]) {
    for shard in shards {
        if let Err(e) = std::fs::remove_file(shard) {
            if e.kind() != io::ErrorKind::NotFound {
                tracing::warn!(shard = %shard.display(), error = %e, "Failed to remove shard file");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordlist::{generate, Alphabet};
    use std::sync::Mutex;

    #[test]
    fn test_shard_path() {
        let path = shard_path(Path::new("out/list.txt"), 3);
        assert_eq!(path, PathBuf::from("out/list.txt.part3"));
    }

    #[tokio::test]
    async fn test_sharded_matches_single_stream() {
        let dir = tempfile::tempdir().unwrap();
        let single = dir.path().join("single.txt");
        let sharded = dir.path().join("sharded.txt");

        let gen = generate(Alphabet::from("abc12"), 4, None).unwrap();
        write_to_path(gen.clone(), &single, |_| {}).unwrap();
        let stats = write_sharded(gen, &sharded, 3, |_| {}).await.unwrap();

        assert_eq!(stats.words, 625);
        assert_eq!(std::fs::read(&single).unwrap(), std::fs::read(&sharded).unwrap());
        for n in 0..3 {
            assert!(!shard_path(&sharded, n).exists());
        }
    }

    #[tokio::test]
    async fn test_sharded_progress_reaches_total() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.txt");
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let gen = generate(Alphabet::from("0123456789"), 5, None).unwrap();
        write_sharded(gen, &path, 4, move |n| sink.lock().unwrap().push(n))
            .await
            .unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.iter().copied().max(), Some(100_000));
    }

    #[test]
    fn test_until_cancelled_stops() {
        let flag = Arc::new(AtomicBool::new(false));
        let gen = generate(Alphabet::from("ab"), 3, None).unwrap();
        let mut words = until_cancelled(gen, Arc::clone(&flag));

        assert_eq!(words.next().as_deref(), Some("aaa"));
        flag.store(true, Ordering::Relaxed);
        assert_eq!(words.next(), None);
    }

    #[tokio::test]
    async fn test_failed_shard_removes_everything() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.txt");
        // A directory where a shard file should go makes that worker fail
        std::fs::create_dir(shard_path(&path, 1)).unwrap();

        let gen = generate(Alphabet::from("0123456789"), 6, None).unwrap();
        let err = write_sharded(gen, &path, 3, |_| {}).await.unwrap_err();

        assert!(matches!(err, WordForgeError::Io { .. }));
        assert!(!shard_path(&path, 0).exists());
        assert!(!shard_path(&path, 2).exists());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_single_worker_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.txt");
        let gen = generate(Alphabet::from("ab"), 2, None).unwrap();

        write_sharded(gen, &path, 1, |_| {}).await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "aa\nab\nba\nbb\n");
        assert!(!shard_path(&path, 0).exists());
    }
}
