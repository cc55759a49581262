//! Fixture builder: writes synthetic `.apkg` archives for tests.

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use rusqlite::{params, Connection};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use apkg_core::COLLECTION_MEMBER;

/// Builds a minimal collection database and wraps it in a zip archive.
#[derive(Default)]
pub struct ApkgBuilder {
    decks: Vec<(i64, String)>,
    models: Vec<(i64, String)>,
    notes: Vec<(i64, i64, String)>,
    cards: Vec<(i64, i64)>,
}

impl ApkgBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deck(mut self, id: i64, name: &str) -> Self {
        self.decks.push((id, name.to_string()));
        self
    }

    pub fn model(mut self, id: i64, name: &str) -> Self {
        self.models.push((id, name.to_string()));
        self
    }

    pub fn note(mut self, id: i64, model_id: i64, fields: &[&str]) -> Self {
        self.notes.push((id, model_id, fields.join("\u{1f}")));
        self
    }

    pub fn card(mut self, note_id: i64, deck_id: i64) -> Self {
        self.cards.push((note_id, deck_id));
        self
    }

    /// Write the archive into `dir` and return its path.
    pub fn write(self, dir: &Path) -> PathBuf {
        let db_path = dir.join(COLLECTION_MEMBER);
        let conn = Connection::open(&db_path).unwrap();
        conn.execute_batch(
            "CREATE TABLE col (id INTEGER PRIMARY KEY, decks TEXT NOT NULL, models TEXT NOT NULL);
             CREATE TABLE notes (id INTEGER PRIMARY KEY, mid INTEGER NOT NULL, flds TEXT NOT NULL);
             CREATE TABLE cards (id INTEGER PRIMARY KEY, nid INTEGER NOT NULL, did INTEGER NOT NULL);",
        )
        .unwrap();

        conn.execute(
            "INSERT INTO col (id, decks, models) VALUES (1, ?1, ?2)",
            params![named_map(&self.decks), named_map(&self.models)],
        )
        .unwrap();
        for (id, mid, flds) in &self.notes {
            conn.execute(
                "INSERT INTO notes (id, mid, flds) VALUES (?1, ?2, ?3)",
                params![id, mid, flds],
            )
            .unwrap();
        }
        for (idx, (nid, did)) in self.cards.iter().enumerate() {
            conn.execute(
                "INSERT INTO cards (id, nid, did) VALUES (?1, ?2, ?3)",
                params![idx as i64 + 1, nid, did],
            )
            .unwrap();
        }
        drop(conn);

        write_zip(dir, "fixture.apkg", COLLECTION_MEMBER, &read_bytes(&db_path))
    }
}

/// A zip archive whose only member is unrelated media, not a collection.
pub fn apkg_without_collection(dir: &Path) -> PathBuf {
    write_zip(dir, "broken.apkg", "media", b"{}")
}

/// JSON object mapping stringified ids to `{"name": ...}` descriptors.
fn named_map(entries: &[(i64, String)]) -> String {
    let map: serde_json::Map<String, serde_json::Value> = entries
        .iter()
        .map(|(id, name)| (id.to_string(), serde_json::json!({ "name": name })))
        .collect();
    serde_json::Value::Object(map).to_string()
}

fn read_bytes(path: &Path) -> Vec<u8> {
    let mut bytes = Vec::new();
    File::open(path).unwrap().read_to_end(&mut bytes).unwrap();
    bytes
}

fn write_zip(dir: &Path, file_name: &str, member: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(file_name);
    let mut writer = ZipWriter::new(File::create(&path).unwrap());
    writer
        .start_file(member, SimpleFileOptions::default())
        .unwrap();
    writer.write_all(bytes).unwrap();
    writer.finish().unwrap();
    path
}
