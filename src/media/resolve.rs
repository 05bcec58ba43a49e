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

use std::collections::HashMap;

use cardpress_core::token;
use cardpress_core::types::media::MediaEntry;

use crate::error::CompileError;
use crate::media::stage::StagingArea;

/// One uploaded image: its original filename and bytes. The upload order of
/// the containing slice is significant.
#[derive(Debug, Clone)]
pub struct ImageBlob {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Resolves image tokens against the run's uploaded blobs.
///
/// Tokens are matched case-sensitively against blob filenames; the first
/// matching blob in upload order wins. Matched bytes are staged once per
/// distinct token name, however often the token recurs. Unmatched tokens
/// are still rewritten into markup referencing the nonexistent filename: a
/// dangling reference is a documented pass-through, not an error.
pub struct ImageResolver<'a> {
    images: &'a [ImageBlob],
    staging: &'a StagingArea,
    /// Token name to package filename, or `None` for unmatched tokens.
    resolved: HashMap<String, Option<String>>,
    manifest: Vec<MediaEntry>,
}

impl<'a> ImageResolver<'a> {
    pub fn new(images: &'a [ImageBlob], staging: &'a StagingArea) -> Self {
        ImageResolver {
            images,
            staging,
            resolved: HashMap::new(),
            manifest: Vec::new(),
        }
    }

    /// Resolve all tokens in one text field and rewrite them into image
    /// markup. Resolved media accumulate in the resolver across fields.
    pub fn resolve_field(&mut self, text: &str) -> Result<String, CompileError> {
        for name in token::scan(text) {
            self.resolve_token(name)?;
        }
        Ok(token::rewrite(text, |name| {
            let filename = match self.resolved.get(name) {
                Some(Some(staged)) => staged.as_str(),
                _ => name,
            };
            format!("<img src=\"{filename}\">")
        }))
    }

    fn resolve_token(&mut self, name: &str) -> Result<(), CompileError> {
        if self.resolved.contains_key(name) {
            return Ok(());
        }
        let matched = self.images.iter().find(|blob| blob.filename == name);
        let staged = match matched {
            Some(blob) => {
                let filename = sanitize_filename(name);
                let staged_path = self.staging.stage(&filename, &blob.bytes)?;
                self.manifest.push(MediaEntry {
                    token_name: name.to_string(),
                    staged_path,
                    package_filename: filename.clone(),
                });
                Some(filename)
            }
            None => None,
        };
        self.resolved.insert(name.to_string(), staged);
        Ok(())
    }

    /// The run's manifest: one entry per distinct matched token name.
    pub fn into_manifest(self) -> Vec<MediaEntry> {
        self.manifest
    }
}

/// Restrict a filename to a safe alphabet before it touches the filesystem.
/// Token names are already word characters plus a dot, so this is usually
/// the identity.
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
