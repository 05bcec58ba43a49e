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

use std::collections::HashSet;

use crate::ids::IdGenerator;
use crate::template::Template;
use crate::types::content::CardContent;
use crate::types::deck::DeckDescriptor;
use crate::types::deck::Note;
use crate::types::media::MediaEntry;

/// Accumulates templates, notes, and media across one run, then produces an
/// immutable descriptor.
///
/// Both templates are created unconditionally, even when every note in the
/// deck ends up plain; the package always carries both models. Deck and
/// template identifiers are drawn fresh from the run's generator.
pub struct DeckAssembler {
    deck_id: i64,
    deck_name: String,
    plain: Template,
    choice: Template,
    notes: Vec<Note>,
    media: Vec<MediaEntry>,
    seen_media: HashSet<String>,
}

impl DeckAssembler {
    pub fn new(deck_name: impl Into<String>, ids: &mut IdGenerator) -> Self {
        DeckAssembler {
            deck_id: ids.next_id(),
            deck_name: deck_name.into(),
            plain: Template::plain(ids.next_id()),
            choice: Template::choice(ids.next_id()),
            notes: Vec::new(),
            media: Vec::new(),
            seen_media: HashSet::new(),
        }
    }

    /// Add one note. Notes keep input order.
    pub fn push_note(&mut self, content: CardContent) {
        let kind = content.kind();
        self.notes.push(Note { kind, content });
    }

    /// Merge media entries into the deck manifest, deduplicating by token
    /// name.
    pub fn extend_media(&mut self, entries: impl IntoIterator<Item = MediaEntry>) {
        for entry in entries {
            if self.seen_media.insert(entry.token_name.clone()) {
                self.media.push(entry);
            }
        }
    }

    pub fn finish(self) -> DeckDescriptor {
        DeckDescriptor::new(
            self.deck_id,
            self.deck_name,
            self.plain,
            self.choice,
            self.notes,
            self.media,
        )
    }
}
