//! Archive access: zip validation, scoped extraction, collection queries.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use rand::Rng;
use rusqlite::{params, Connection, OptionalExtension};
use tempfile::TempDir;
use tracing::{debug, warn};
use zip::result::ZipError;
use zip::ZipArchive;

use crate::categories;
use crate::error::{ExtractError, Result};
use crate::problem;
use crate::types::{DeckInfo, ModelInfo, NoteRecord, Problem, FIELD_SEPARATOR};

/// Name of the embedded database member inside an `.apkg` archive.
pub const COLLECTION_MEMBER: &str = "collection.anki2";

/// An open, temporarily extracted collection database.
///
/// The database file lives in a scoped temp directory owned by this value;
/// dropping the `Collection` closes the connection and removes the
/// directory, on success and error paths alike.
pub struct Collection {
    conn: Connection,
    _dir: TempDir,
}

impl Collection {
    /// Extract the collection database from the archive at `path` and open
    /// it read-only for the lifetime of this value.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(ExtractError::ArchiveNotFound(path.to_path_buf()));
        }

        let file = File::open(path)?;
        let mut archive = ZipArchive::new(BufReader::new(file))?;
        let dir = tempfile::tempdir()?;
        let db_path = dir.path().join(COLLECTION_MEMBER);
        {
            let mut member = match archive.by_name(COLLECTION_MEMBER) {
                Ok(member) => member,
                Err(ZipError::FileNotFound) => return Err(ExtractError::MissingCollection),
                Err(err) => return Err(err.into()),
            };
            let mut out = File::create(&db_path)?;
            io::copy(&mut member, &mut out)?;
        }
        debug!(archive = %path.display(), "extracted collection database");

        let conn = Connection::open(&db_path)?;
        Ok(Self { conn, _dir: dir })
    }

    /// Deck descriptors from the configuration row, keyed by deck id.
    pub fn decks(&self) -> Result<HashMap<i64, DeckInfo>> {
        let json: String = self
            .conn
            .query_row("SELECT decks FROM col", [], |row| row.get(0))?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Note-template descriptors from the configuration row, keyed by
    /// model id.
    pub fn models(&self) -> Result<HashMap<i64, ModelInfo>> {
        let json: String = self
            .conn
            .query_row("SELECT models FROM col", [], |row| row.get(0))?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Ids of all notes with at least one card in the given deck.
    pub fn note_ids_in_deck(&self, deck_id: i64) -> Result<Vec<i64>> {
        let mut stmt = self.conn.prepare("SELECT nid FROM cards WHERE did = ?1")?;
        let ids = stmt
            .query_map(params![deck_id], |row| row.get(0))?
            .collect::<std::result::Result<Vec<i64>, _>>()?;
        Ok(ids)
    }

    /// Load one note's owning template id and split field values.
    pub fn note(&self, note_id: i64) -> Result<Option<NoteRecord>> {
        self.conn
            .query_row(
                "SELECT mid, flds FROM notes WHERE id = ?1",
                params![note_id],
                |row| {
                    let flds: String = row.get(1)?;
                    Ok(NoteRecord {
                        model_id: row.get(0)?,
                        fields: flds.split(FIELD_SEPARATOR).map(str::to_string).collect(),
                    })
                },
            )
            .optional()
            .map_err(Into::into)
    }
}

/// Handle to a packaged deck on disk.
///
/// Holds only configuration (archive path and root deck name). Every
/// operation opens its own temporary extraction and releases it before
/// returning, so concurrent callers never share state.
#[derive(Debug, Clone)]
pub struct DeckArchive {
    path: PathBuf,
    root: String,
}

impl DeckArchive {
    /// Handle for the supported package, using
    /// [`categories::DEFAULT_ROOT_DECK`] as the root.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self::with_root(path, categories::DEFAULT_ROOT_DECK)
    }

    /// Handle with an explicit root deck name.
    pub fn with_root<P: AsRef<Path>>(path: P, root: impl Into<String>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            root: root.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// Full category tree: each root followed by its `"root::leaf"`
    /// entries, lexicographically sorted. Errors propagate.
    pub fn category_tree(&self) -> Result<Vec<String>> {
        let collection = Collection::open(&self.path)?;
        categories::category_tree(&collection)
    }

    /// Leaf category names for presentation.
    ///
    /// This is the list end users pick from. Any extraction failure
    /// degrades to [`categories::DEFAULT_CATEGORIES`]; the failure is
    /// logged so it stays distinguishable from an archive that simply has
    /// no categories.
    pub fn categories(&self) -> Vec<String> {
        match self.category_tree() {
            Ok(tree) => categories::leaves(&tree),
            Err(err) => {
                warn!(
                    archive = %self.path.display(),
                    error = %err,
                    "category extraction failed, falling back to default list"
                );
                categories::DEFAULT_CATEGORIES
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            }
        }
    }

    /// Draw one problem uniformly at random from the named category.
    ///
    /// `category` is a leaf name as returned by [`Self::categories`]; the
    /// full deck path is reconstructed from the configured root. Returns
    /// `Ok(None)` when the deck does not exist, has no cards, or the drawn
    /// note cannot be presented; callers should offer another pick.
    pub fn choose_problem<R: Rng + ?Sized>(
        &self,
        category: &str,
        rng: &mut R,
    ) -> Result<Option<Problem>> {
        let deck_name = format!(
            "{root}{sep}{category}",
            root = self.root,
            sep = categories::HIERARCHY_DELIMITER
        );
        let collection = Collection::open(&self.path)?;
        problem::choose_from_deck(&collection, &deck_name, rng)
    }

    /// Like [`Self::choose_problem`], with the category given as an index
    /// into the list returned by [`Self::categories`].
    pub fn choose_problem_at<R: Rng + ?Sized>(
        &self,
        index: usize,
        rng: &mut R,
    ) -> Result<Option<Problem>> {
        let categories = self.categories();
        let category = categories
            .get(index)
            .ok_or(ExtractError::IndexOutOfRange {
                index,
                count: categories.len(),
            })?;
        self.choose_problem(category, rng)
    }
}
