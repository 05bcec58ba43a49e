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

use crate::template::Template;
use crate::template::TemplateKind;
use crate::types::content::CardContent;
use crate::types::media::MediaEntry;

/// One note: rendered content plus the kind of template it renders with.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub kind: TemplateKind,
    pub content: CardContent,
}

/// The fully assembled deck: everything the packager needs, owned for the
/// duration of one compilation run and discarded afterwards.
///
/// Both templates always exist, even when no note uses one of them; the
/// package carries both regardless.
#[derive(Debug)]
pub struct DeckDescriptor {
    deck_id: i64,
    deck_name: String,
    plain_template: Template,
    choice_template: Template,
    notes: Vec<Note>,
    media: Vec<MediaEntry>,
}

impl DeckDescriptor {
    pub(crate) fn new(
        deck_id: i64,
        deck_name: String,
        plain_template: Template,
        choice_template: Template,
        notes: Vec<Note>,
        media: Vec<MediaEntry>,
    ) -> Self {
        DeckDescriptor {
            deck_id,
            deck_name,
            plain_template,
            choice_template,
            notes,
            media,
        }
    }

    pub fn deck_id(&self) -> i64 {
        self.deck_id
    }

    pub fn deck_name(&self) -> &str {
        &self.deck_name
    }

    pub fn templates(&self) -> [&Template; 2] {
        [&self.plain_template, &self.choice_template]
    }

    pub fn template_for(&self, kind: TemplateKind) -> &Template {
        match kind {
            TemplateKind::Plain => &self.plain_template,
            TemplateKind::Choice => &self.choice_template,
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn media(&self) -> &[MediaEntry] {
        &self.media
    }
}
