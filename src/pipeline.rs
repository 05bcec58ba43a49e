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

use cardpress_core::assemble::DeckAssembler;
use cardpress_core::ids::IdGenerator;
use cardpress_core::parser::parse_choice;
use cardpress_core::rows;
use cardpress_core::types::deck::DeckDescriptor;
use cardpress_core::types::record::Record;

use crate::error::CompileError;
use crate::media::resolve::ImageBlob;
use crate::media::resolve::ImageResolver;
use crate::media::stage::StagingArea;
use crate::render::render_card;

/// Per-run pipeline switches.
#[derive(Debug, Clone, Copy)]
pub struct CompileOptions {
    /// Whether to run multiple-choice detection. With this off, every
    /// record becomes a plain card.
    pub multiple_choice: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            multiple_choice: true,
        }
    }
}

/// Compile raw rows and uploaded images into a deck descriptor.
///
/// This is the whole run: row ingestion, image resolution, multiple-choice
/// detection, rendering, and assembly, strictly in row order. Structural
/// failures abort the run; no partial descriptor is ever produced.
pub fn compile(
    raw_rows: Vec<Vec<String>>,
    images: &[ImageBlob],
    deck_name: &str,
    options: CompileOptions,
    staging: &StagingArea,
    ids: &mut IdGenerator,
) -> Result<DeckDescriptor, CompileError> {
    let records = rows::ingest(raw_rows)?;
    let mut assembler = DeckAssembler::new(deck_name, ids);
    let mut resolver = ImageResolver::new(images, staging);
    for record in records {
        let Record {
            front_raw,
            back_raw,
            ..
        } = record;
        let front = resolver.resolve_field(&front_raw)?;
        let back = resolver.resolve_field(&back_raw)?;
        let choice = if options.multiple_choice {
            parse_choice(&front, &back)
        } else {
            None
        };
        assembler.push_note(render_card(front, back, choice));
    }
    assembler.extend_media(resolver.into_manifest());
    let descriptor = assembler.finish();
    log::debug!(
        "Compiled deck '{}': {} notes, {} media files.",
        descriptor.deck_name(),
        descriptor.notes().len(),
        descriptor.media().len()
    );
    Ok(descriptor)
}

#[cfg(test)]
mod tests {
    use cardpress_core::template::TemplateKind;
    use cardpress_core::types::content::CardContent;

    use super::*;
    use crate::error::Fallible;
    use crate::helper::create_tmp_directory;

    fn rows_of(rows: &[(&str, &str)]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|(front, back)| vec![front.to_string(), back.to_string()])
            .collect()
    }

    fn blob(filename: &str, bytes: &[u8]) -> ImageBlob {
        ImageBlob {
            filename: filename.to_string(),
            bytes: bytes.to_vec(),
        }
    }

    fn make_staging() -> Fallible<StagingArea> {
        let parent = create_tmp_directory()?;
        Ok(StagingArea::create(&parent, 7)?)
    }

    #[test]
    fn test_mixed_deck() -> Fallible<()> {
        let staging = make_staging()?;
        let mut ids = IdGenerator::from_seed(1);
        let raw = rows_of(&[
            ("What is 2+2?\nA. 3\nB. 4\nC. 5", "B"),
            ("Capital of France?", "Paris"),
        ]);
        let descriptor = compile(
            raw,
            &[],
            "Mixed",
            CompileOptions::default(),
            &staging,
            &mut ids,
        )?;
        assert_eq!(descriptor.notes().len(), 2);
        assert_eq!(descriptor.notes()[0].kind, TemplateKind::Choice);
        assert_eq!(descriptor.notes()[1].kind, TemplateKind::Plain);
        assert_eq!(descriptor.notes()[1].content.front_html(), "Capital of France?");
        assert_eq!(descriptor.notes()[1].content.back_html(), "Paris");
        match &descriptor.notes()[0].content {
            CardContent::Choice { choice, .. } => {
                assert_eq!(choice.correct(), 'B');
                assert_eq!(choice.correct_text(), "4");
            }
            content => panic!("expected a choice card, got {content:?}"),
        }
        Ok(())
    }

    #[test]
    fn test_image_resolution_feeds_the_manifest() -> Fallible<()> {
        let staging = make_staging()?;
        let mut ids = IdGenerator::from_seed(2);
        let raw = rows_of(&[("A cat: [img:cat.png]", "Yes"), ("[img:cat.png] again", "No")]);
        let images = vec![blob("cat.png", b"meow")];
        let descriptor = compile(
            raw,
            &images,
            "Cats",
            CompileOptions::default(),
            &staging,
            &mut ids,
        )?;
        assert_eq!(descriptor.media().len(), 1);
        assert_eq!(descriptor.media()[0].token_name, "cat.png");
        assert!(
            descriptor.notes()[0]
                .content
                .front_html()
                .contains("<img src=\"cat.png\">")
        );
        Ok(())
    }

    /// Distinct matched tokens equal manifest entries, after deduplication.
    #[test]
    fn test_token_count_conservation() -> Fallible<()> {
        let staging = make_staging()?;
        let mut ids = IdGenerator::from_seed(3);
        let raw = rows_of(&[
            ("[img:a.png] [img:b.png] [img:a.png]", "x"),
            ("[img:b.png] [img:ghost.png]", "y"),
        ]);
        let images = vec![blob("a.png", b"a"), blob("b.png", b"b")];
        let descriptor = compile(
            raw,
            &images,
            "Deck",
            CompileOptions::default(),
            &staging,
            &mut ids,
        )?;
        // a.png and b.png matched; ghost.png dangles.
        assert_eq!(descriptor.media().len(), 2);
        Ok(())
    }

    #[test]
    fn test_detection_can_be_disabled() -> Fallible<()> {
        let staging = make_staging()?;
        let mut ids = IdGenerator::from_seed(4);
        let raw = rows_of(&[("Q?\nA. 1\nB. 2", "A")]);
        let options = CompileOptions {
            multiple_choice: false,
        };
        let descriptor = compile(raw, &[], "Plain only", options, &staging, &mut ids)?;
        assert_eq!(descriptor.notes()[0].kind, TemplateKind::Plain);
        Ok(())
    }

    #[test]
    fn test_insufficient_columns_aborts_the_run() -> Fallible<()> {
        let staging = make_staging()?;
        let mut ids = IdGenerator::from_seed(5);
        let raw = vec![vec!["only one field".to_string()]];
        let result = compile(
            raw,
            &[],
            "Broken",
            CompileOptions::default(),
            &staging,
            &mut ids,
        );
        assert!(matches!(result, Err(CompileError::InsufficientColumns)));
        Ok(())
    }

    /// Compiling the same input twice yields structurally identical decks,
    /// identifiers aside.
    #[test]
    fn test_idempotence_modulo_identifiers() -> Fallible<()> {
        let raw = rows_of(&[
            ("What is 2+2?\nA. 3\nB. 4", "B"),
            ("Front [img:cat.png]", "Back"),
        ]);
        let images = vec![blob("cat.png", b"meow")];

        let staging_a = make_staging()?;
        let mut ids_a = IdGenerator::from_seed(10);
        let a = compile(
            raw.clone(),
            &images,
            "Twice",
            CompileOptions::default(),
            &staging_a,
            &mut ids_a,
        )?;

        let staging_b = make_staging()?;
        let mut ids_b = IdGenerator::from_seed(20);
        let b = compile(
            raw,
            &images,
            "Twice",
            CompileOptions::default(),
            &staging_b,
            &mut ids_b,
        )?;

        assert_ne!(a.deck_id(), b.deck_id());
        assert_eq!(a.deck_name(), b.deck_name());
        assert_eq!(a.notes().len(), b.notes().len());
        for (note_a, note_b) in a.notes().iter().zip(b.notes().iter()) {
            assert_eq!(note_a.kind, note_b.kind);
            assert_eq!(note_a.content, note_b.content);
        }
        let names_a: Vec<&str> = a.media().iter().map(|m| m.token_name.as_str()).collect();
        let names_b: Vec<&str> = b.media().iter().map(|m| m.token_name.as_str()).collect();
        assert_eq!(names_a, names_b);
        Ok(())
    }
}
