//! Feed file loading for the CLI commands.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use butterbook_catalog::{parse_records, parse_stores, InflightCache};
use butterbook_core::{RawProductRecord, Store};

type ReadResult = Result<Arc<str>, Arc<str>>;

/// Reads feed files concurrently. Overlapping reads of the same file share
/// one filesystem read, however the path is spelled.
#[derive(Default)]
pub(crate) struct FeedReader {
    reads: InflightCache<PathBuf, ReadResult>,
}

impl FeedReader {
    /// Reads a file as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub(crate) async fn read(&self, path: &Path) -> anyhow::Result<Arc<str>> {
        let key = feed_key(path).await;
        let owned = key.clone();
        let contents = self
            .reads
            .get_or_load(key, move || async move {
                tokio::fs::read_to_string(&owned)
                    .await
                    .map(Arc::<str>::from)
                    .map_err(|err| Arc::<str>::from(err.to_string()))
            })
            .await;

        contents.map_err(|reason| anyhow::anyhow!("failed to read {}: {reason}", path.display()))
    }

    /// Loads product records from every file, in argument order. A file
    /// given more than once (`a.json`, `./a.json`) is only loaded once.
    ///
    /// # Errors
    ///
    /// Returns an error if any file cannot be read or is not a product feed.
    pub(crate) async fn read_records<P: AsRef<Path>>(
        &self,
        paths: &[P],
    ) -> anyhow::Result<Vec<RawProductRecord>> {
        let keyed = futures::future::join_all(paths.iter().map(|path| async move {
            let path = path.as_ref();
            (path, feed_key(path).await)
        }))
        .await;

        let mut seen = HashSet::with_capacity(keyed.len());
        let unique: Vec<&Path> = keyed
            .into_iter()
            .filter_map(|(path, key)| {
                if seen.insert(key) {
                    Some(path)
                } else {
                    tracing::warn!(
                        path = %path.display(),
                        "feed listed more than once, loading it once"
                    );
                    None
                }
            })
            .collect();

        let loads = unique.into_iter().map(|path| async move {
            let contents = self.read(path).await?;
            let records = parse_records(&contents)
                .with_context(|| format!("failed to parse product feed {}", path.display()))?;
            tracing::debug!(path = %path.display(), records = records.len(), "loaded product feed");
            anyhow::Ok(records)
        });

        let batches = futures::future::try_join_all(loads).await?;
        Ok(batches.into_iter().flatten().collect())
    }

    /// Loads the store list from one file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a store feed.
    pub(crate) async fn read_stores(&self, path: &Path) -> anyhow::Result<Vec<Store>> {
        let contents = self.read(path).await?;
        let stores = parse_stores(&contents)
            .with_context(|| format!("failed to parse store feed {}", path.display()))?;
        tracing::debug!(path = %path.display(), stores = stores.len(), "loaded store feed");
        Ok(stores)
    }
}

/// Identity of a feed file: its canonical path, or the path as given when
/// it cannot be resolved (the read then reports the error).
async fn feed_key(path: &Path) -> PathBuf {
    tokio::fs::canonicalize(path)
        .await
        .unwrap_or_else(|_| path.to_path_buf())
}
