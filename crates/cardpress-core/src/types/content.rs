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

use crate::template::TemplateKind;
use crate::types::choice::ChoiceSet;

/// Rendered markup for one note, tagged by card kind.
///
/// The choice variant keeps the parsed set around for traceability; it is
/// never user-visible.
#[derive(Debug, Clone, PartialEq)]
pub enum CardContent {
    Plain {
        front_html: String,
        back_html: String,
    },
    Choice {
        front_html: String,
        back_html: String,
        choice: ChoiceSet,
    },
}

impl CardContent {
    pub fn kind(&self) -> TemplateKind {
        match self {
            CardContent::Plain { .. } => TemplateKind::Plain,
            CardContent::Choice { .. } => TemplateKind::Choice,
        }
    }

    pub fn front_html(&self) -> &str {
        match self {
            CardContent::Plain { front_html, .. } => front_html,
            CardContent::Choice { front_html, .. } => front_html,
        }
    }

    pub fn back_html(&self) -> &str {
        match self {
            CardContent::Plain { back_html, .. } => back_html,
            CardContent::Choice { back_html, .. } => back_html,
        }
    }
}
