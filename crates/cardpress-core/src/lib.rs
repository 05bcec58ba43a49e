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

//! cardpress-core: the pure parts of the deck compilation pipeline.
//!
//! This library provides:
//! - Row ingestion and the record type
//! - Heuristic multiple-choice detection
//! - Image token scanning and rewriting
//! - Card templates, deck assembly, and identifier generation
//!
//! I/O (image staging, spreadsheet reading, packaging) lives in the
//! `cardpress` binary crate.

pub mod assemble;
pub mod error;
pub mod ids;
pub mod parser;
pub mod rows;
pub mod template;
pub mod token;
pub mod types;

// Re-exports for convenience
pub use assemble::DeckAssembler;
pub use error::{CompileError, ErrorReport, Fallible, fail};
pub use ids::IdGenerator;
pub use parser::parse_choice;
pub use template::{Template, TemplateKind};
pub use types::choice::ChoiceSet;
pub use types::content::CardContent;
pub use types::deck::{DeckDescriptor, Note};
pub use types::media::MediaEntry;
pub use types::record::Record;
