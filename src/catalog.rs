use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use rayon::prelude::*;

use crate::{
    error::{Error, Result},
    normalize::normalize_key,
    parser::DocumentParser,
    record::ProcedureRecord,
    walker::{self, DiscoveredFile},
};

/// Stable identity of a record inside one catalog (its load position).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProcedureId(usize);

impl ProcedureId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// In-memory, read-only collection of parsed procedures.
///
/// Records are owned once and addressed by [`ProcedureId`]. Lookup keys are
/// secondary: the legacy key map (title with `-N` collision suffixes, plus
/// the code) and multi-maps from normalized title or code to identities.
/// Iterating [`ProcedureCatalog::iter`] visits every record exactly once no
/// matter how many keys point at it.
#[derive(Debug, Default)]
pub struct ProcedureCatalog {
    records: Vec<ProcedureRecord>,
    keys: BTreeMap<String, ProcedureId>,
    by_title: HashMap<String, Vec<ProcedureId>>,
    by_code: HashMap<String, Vec<ProcedureId>>,
}

impl ProcedureCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every document in `root`.
    ///
    /// Never fails: a missing or empty directory yields an empty catalog, and
    /// a document that cannot be read is logged and skipped.
    pub fn load_dir(root: &Path) -> Self {
        let mut catalog = Self::new();

        if !root.exists() {
            tracing::error!(
                dir = %root.display(),
                "procedure directory does not exist; starting with an empty catalog"
            );
            return catalog;
        }
        if !root.is_dir() {
            tracing::error!(
                dir = %root.display(),
                "procedure path is not a directory; starting with an empty catalog"
            );
            return catalog;
        }

        let files = match walker::discover_files(root) {
            Ok(files) => files,
            Err(e) => {
                tracing::error!(dir = %root.display(), error = %e, "could not list procedure directory");
                return catalog;
            }
        };

        if files.is_empty() {
            tracing::warn!(
                dir = %root.display(),
                "procedure directory has no .txt documents"
            );
            return catalog;
        }

        tracing::info!(
            dir = %root.display(),
            files = files.len(),
            "loading procedure documents"
        );

        // Read and parse in parallel; insert in discovery order so keys and
        // identities do not depend on thread scheduling.
        let loaded: Vec<(&DiscoveredFile, Result<ProcedureRecord>)> = files
            .par_iter()
            .map(|file| (file, read_document(&file.absolute_path)))
            .collect();

        for (file, result) in loaded {
            match result {
                Ok(record) => {
                    let id = catalog.insert(record, &file.stem_key());
                    let record = &catalog.records[id.index()];
                    tracing::debug!(
                        file = %file.relative_path.display(),
                        title = %record.title,
                        code = %record.code,
                        requirements = record.requirements.len(),
                        "parsed procedure"
                    );
                }
                Err(e) => {
                    tracing::error!(
                        file = %file.relative_path.display(),
                        error = %e,
                        "skipping document"
                    );
                }
            }
        }

        tracing::info!(
            procedures = catalog.len(),
            keys = catalog.keys.len(),
            "procedure catalog ready"
        );
        catalog
    }

    /// Add a record and register its lookup keys.
    ///
    /// The primary key is the normalized title, or `fallback_key` when the
    /// record has no title. A taken key gets `-1`, `-2`, ... appended until it
    /// is unique. The normalized code is registered as a second key only when
    /// it is non-empty and not already taken.
    pub fn insert(
        &mut self,
        record: ProcedureRecord,
        fallback_key: &str,
    ) -> ProcedureId {
        let id = ProcedureId(self.records.len());
        let title_key = record.normalized_title();
        let code_key = record.normalized_code();

        let base = if title_key.is_empty() {
            normalize_key(fallback_key)
        } else {
            title_key.clone()
        };
        let mut key = base.clone();
        let mut counter = 1;
        while self.keys.contains_key(&key) {
            key = format!("{base}-{counter}");
            counter += 1;
        }
        self.keys.insert(key.clone(), id);

        if !code_key.is_empty() && !self.keys.contains_key(&code_key) {
            self.keys.insert(code_key.clone(), id);
        }

        if !title_key.is_empty() {
            self.by_title.entry(title_key).or_default().push(id);
        }
        if !code_key.is_empty() {
            self.by_code.entry(code_key).or_default().push(id);
        }

        let shown_title = if record.title.is_empty() {
            "N/A"
        } else {
            record.title.as_str()
        };
        tracing::info!(title = shown_title, key = %key, "loaded procedure");

        self.records.push(record);
        id
    }

    /// Record stored under a legacy lookup key.
    pub fn get(&self, key: &str) -> Option<&ProcedureRecord> {
        self.keys.get(key).map(|id| &self.records[id.index()])
    }

    pub fn record(&self, id: ProcedureId) -> Option<&ProcedureRecord> {
        self.records.get(id.index())
    }

    /// Identities whose normalized title or code equals `normalized`,
    /// deduplicated, in load order.
    pub fn lookup(&self, normalized: &str) -> Vec<ProcedureId> {
        let ids: BTreeSet<ProcedureId> = self
            .by_title
            .get(normalized)
            .into_iter()
            .chain(self.by_code.get(normalized))
            .flatten()
            .copied()
            .collect();
        ids.into_iter().collect()
    }

    /// First record (in load order) whose normalized title equals the
    /// normalized `text`. A matching code alone is not enough.
    pub fn find_by_title(&self, text: &str) -> Option<&ProcedureRecord> {
        let key = normalize_key(text);
        if key.is_empty() {
            return None;
        }
        self.lookup(&key)
            .into_iter()
            .filter_map(|id| self.record(id))
            .find(|record| record.normalized_title() == key)
    }

    /// All records in load order, indexable by [`ProcedureId::index`].
    pub fn records(&self) -> &[ProcedureRecord] {
        &self.records
    }

    /// Every record exactly once, in load order.
    pub fn iter(
        &self,
    ) -> impl Iterator<Item = (ProcedureId, &ProcedureRecord)> + '_ {
        self.records
            .iter()
            .enumerate()
            .map(|(i, record)| (ProcedureId(i), record))
    }

    /// Sorted, distinct, non-empty titles.
    pub fn titles(&self) -> Vec<String> {
        self.records
            .iter()
            .filter(|r| !r.title.is_empty())
            .map(|r| r.title.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Legacy lookup keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.keys.keys().map(String::as_str)
    }

    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Read and parse one document.
///
/// On a read failure (including invalid UTF-8) the partially parsed record
/// is logged and the document is reported as an error.
pub fn read_document(path: &Path) -> Result<ProcedureRecord> {
    let file = File::open(path).map_err(|source| Error::Document {
        path: path.to_path_buf(),
        source,
    })?;

    let mut parser = DocumentParser::new();
    for line in BufReader::new(file).lines() {
        match line {
            Ok(line) => parser.feed_line(&line),
            Err(source) => {
                tracing::error!(
                    file = %path.display(),
                    partial = ?parser.record(),
                    "document could not be read to the end"
                );
                return Err(Error::Document {
                    path: path.to_path_buf(),
                    source,
                });
            }
        }
    }

    Ok(parser.finish())
}
