// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

mod schema;

use std::fs;
use std::io::Cursor;
use std::io::Write;
use std::path::Path;

use cardpress_core::ids::IdGenerator;
use cardpress_core::template::Template;
use cardpress_core::types::deck::DeckDescriptor;
use chrono::Utc;
use rusqlite::Connection;
use rusqlite::params;
use serde_json::json;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::CompileError;
use crate::pack::schema::COLLECTION_SCHEMA;
use crate::pack::schema::LATEX_POST;
use crate::pack::schema::LATEX_PRE;

/// Separator between a note's fields inside the `flds` column.
const FIELD_SEPARATOR: char = '\u{1f}';

fn packaging_error(e: impl std::fmt::Display) -> CompileError {
    CompileError::Packaging(e.to_string())
}

/// Serialize an assembled deck into apkg bytes: a zip archive holding the
/// SQLite collection, the media manifest, and the staged media files under
/// their manifest numbers.
///
/// Failures are not retried; the caller must regenerate identifiers before
/// attempting to package again.
pub fn write_package(
    descriptor: &DeckDescriptor,
    work_dir: &Path,
    ids: &mut IdGenerator,
) -> Result<Vec<u8>, CompileError> {
    let db_path = work_dir.join("collection.anki2");
    build_collection(descriptor, &db_path, ids)?;
    let db_bytes = fs::read(&db_path).map_err(packaging_error)?;

    let mut archive = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    archive
        .start_file("collection.anki2", options)
        .map_err(packaging_error)?;
    archive.write_all(&db_bytes).map_err(packaging_error)?;

    // The media manifest maps zip entry numbers to package filenames.
    let manifest: serde_json::Map<String, serde_json::Value> = descriptor
        .media()
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            (
                idx.to_string(),
                serde_json::Value::String(entry.package_filename.clone()),
            )
        })
        .collect();
    archive.start_file("media", options).map_err(packaging_error)?;
    archive
        .write_all(serde_json::Value::Object(manifest).to_string().as_bytes())
        .map_err(packaging_error)?;

    for (idx, entry) in descriptor.media().iter().enumerate() {
        let bytes = fs::read(&entry.staged_path).map_err(packaging_error)?;
        archive
            .start_file(idx.to_string(), options)
            .map_err(packaging_error)?;
        archive.write_all(&bytes).map_err(packaging_error)?;
    }

    let cursor = archive.finish().map_err(packaging_error)?;
    Ok(cursor.into_inner())
}

fn build_collection(
    descriptor: &DeckDescriptor,
    db_path: &Path,
    ids: &mut IdGenerator,
) -> Result<(), CompileError> {
    if db_path.exists() {
        fs::remove_file(db_path).map_err(packaging_error)?;
    }
    let conn = Connection::open(db_path).map_err(packaging_error)?;
    conn.execute_batch(COLLECTION_SCHEMA)
        .map_err(packaging_error)?;

    let now = Utc::now();
    let epoch_s = now.timestamp();
    let epoch_ms = now.timestamp_millis();

    conn.execute(
        "INSERT INTO col VALUES (1, ?1, ?2, ?3, 11, 0, 0, 0, ?4, ?5, ?6, ?7, '{}')",
        params![
            epoch_s,
            epoch_ms,
            epoch_ms,
            conf_json(descriptor).to_string(),
            models_json(descriptor, epoch_s).to_string(),
            decks_json(descriptor, epoch_s).to_string(),
            dconf_json().to_string(),
        ],
    )
    .map_err(packaging_error)?;

    for note in descriptor.notes() {
        let note_id = ids.next_id();
        let card_id = ids.next_id();
        let model_id = descriptor.template_for(note.kind).id;
        let front = note.content.front_html();
        let back = note.content.back_html();
        let flds = format!("{front}{FIELD_SEPARATOR}{back}");
        conn.execute(
            "INSERT INTO notes VALUES (?1, ?2, ?3, ?4, -1, '', ?5, ?6, ?7, 0, '')",
            params![
                note_id,
                ids.next_guid(),
                model_id,
                epoch_s,
                flds,
                front,
                field_checksum(front),
            ],
        )
        .map_err(packaging_error)?;
        conn.execute(
            "INSERT INTO cards VALUES (?1, ?2, ?3, 0, ?4, -1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, '')",
            params![card_id, note_id, descriptor.deck_id(), epoch_s],
        )
        .map_err(packaging_error)?;
    }
    Ok(())
}

/// Checksum of a note's sort field, stored as a 32-bit integer. Anki uses
/// it only for duplicate detection.
fn field_checksum(text: &str) -> i64 {
    let hash = blake3::hash(text.as_bytes());
    let hex = hash.to_hex();
    i64::from_str_radix(&hex.as_str()[..8], 16).unwrap_or(0)
}

fn conf_json(descriptor: &DeckDescriptor) -> serde_json::Value {
    json!({
        "activeDecks": [1],
        "addToCur": true,
        "collapseTime": 1200,
        "curDeck": 1,
        "curModel": descriptor.templates()[0].id.to_string(),
        "dueCounts": true,
        "estTimes": true,
        "newBury": true,
        "newSpread": 0,
        "nextPos": 1,
        "sortBackwards": false,
        "sortType": "noteFld",
        "timeLim": 0,
    })
}

fn models_json(descriptor: &DeckDescriptor, epoch_s: i64) -> serde_json::Value {
    let mut models = serde_json::Map::new();
    for template in descriptor.templates() {
        models.insert(
            template.id.to_string(),
            model_json(template, descriptor.deck_id(), epoch_s),
        );
    }
    serde_json::Value::Object(models)
}

fn model_json(template: &Template, deck_id: i64, epoch_s: i64) -> serde_json::Value {
    json!({
        "id": template.id,
        "name": template.name,
        "type": 0,
        "mod": epoch_s,
        "usn": -1,
        "sortf": 0,
        "did": deck_id,
        "tmpls": [{
            "name": "Card 1",
            "ord": 0,
            "qfmt": template.qfmt,
            "afmt": template.afmt,
            "bqfmt": "",
            "bafmt": "",
            "did": null,
        }],
        "flds": [
            field_json("Front", 0),
            field_json("Back", 1),
        ],
        "css": template.css,
        "latexPre": LATEX_PRE,
        "latexPost": LATEX_POST,
        "req": [[0, "all", [0]]],
        "tags": [],
        "vers": [],
    })
}

fn field_json(name: &str, ord: u32) -> serde_json::Value {
    json!({
        "name": name,
        "ord": ord,
        "sticky": false,
        "rtl": false,
        "font": "Arial",
        "size": 20,
        "media": [],
    })
}

fn decks_json(descriptor: &DeckDescriptor, epoch_s: i64) -> serde_json::Value {
    let mut decks = serde_json::Map::new();
    decks.insert("1".to_string(), deck_json(1, "Default", epoch_s));
    decks.insert(
        descriptor.deck_id().to_string(),
        deck_json(descriptor.deck_id(), descriptor.deck_name(), epoch_s),
    );
    serde_json::Value::Object(decks)
}

fn deck_json(id: i64, name: &str, epoch_s: i64) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "desc": "",
        "mod": epoch_s,
        "usn": -1,
        "collapsed": false,
        "browserCollapsed": false,
        "dyn": 0,
        "conf": 1,
        "extendNew": 0,
        "extendRev": 50,
        "newToday": [0, 0],
        "revToday": [0, 0],
        "lrnToday": [0, 0],
        "timeToday": [0, 0],
    })
}

fn dconf_json() -> serde_json::Value {
    json!({
        "1": {
            "id": 1,
            "name": "Default",
            "autoplay": true,
            "dyn": 0,
            "maxTaken": 60,
            "mod": 0,
            "usn": 0,
            "replayq": true,
            "timer": 0,
            "lapse": {
                "delays": [10],
                "leechAction": 0,
                "leechFails": 8,
                "minInt": 1,
                "mult": 0,
            },
            "new": {
                "bury": true,
                "delays": [1, 10],
                "initialFactor": 2500,
                "ints": [1, 4, 7],
                "order": 1,
                "perDay": 20,
                "separate": true,
            },
            "rev": {
                "bury": true,
                "ease4": 1.3,
                "fuzz": 0.05,
                "ivlFct": 1,
                "maxIvl": 36500,
                "minSpace": 1,
                "perDay": 100,
            },
        },
    })
}
