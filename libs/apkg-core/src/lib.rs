//! Extraction core for packaged spaced-repetition decks.
//!
//! An `.apkg` archive is a zip container holding a SQLite collection
//! database. This crate opens the archive, rebuilds the two-level category
//! taxonomy from deck names, and turns one randomly drawn note into a
//! clean question/answer pair.
//!
//! Provides:
//! - [`DeckArchive`]: archive handle; every operation runs against its own
//!   scoped temporary extraction
//! - Category listing with a static fallback when extraction fails
//! - Uniform random problem selection with caller-injected randomness
//! - Markup and cloze normalization of note fields

pub mod archive;
pub mod categories;
pub mod error;
pub mod problem;
pub mod text;
pub mod types;

pub use archive::{Collection, DeckArchive, COLLECTION_MEMBER};
pub use categories::{DEFAULT_CATEGORIES, DEFAULT_ROOT_DECK, HIERARCHY_DELIMITER};
pub use error::{ExtractError, Result};
pub use text::{cloze_answer, cloze_question, strip_markup, CLOZE_PLACEHOLDER};
pub use types::{Problem, TemplateKind};
