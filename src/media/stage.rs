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

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use crate::error::CompileError;

/// A run-scoped staging directory for matched image bytes.
///
/// The directory is exclusively owned by its run from creation until the
/// packaged archive has been produced. Dropping the guard removes the
/// directory and everything staged under it, on every exit path.
pub struct StagingArea {
    root: PathBuf,
}

impl StagingArea {
    /// Create the staging directory for one run under `parent`.
    pub fn create(parent: &Path, run_id: i64) -> Result<Self, CompileError> {
        let root = parent.join(run_id.to_string());
        fs::create_dir_all(&root).map_err(|e| {
            CompileError::ImageStaging(format!("could not create staging directory: {e}"))
        })?;
        Ok(StagingArea { root })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Write one image's bytes under the staging directory.
    pub fn stage(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, CompileError> {
        let path = self.root.join(filename);
        fs::write(&path, bytes)
            .map_err(|e| CompileError::ImageStaging(format!("could not write {filename}: {e}")))?;
        Ok(path)
    }
}

impl Drop for StagingArea {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_dir_all(&self.root) {
            log::warn!(
                "Failed to remove staging directory {}: {e}",
                self.root.display()
            );
        }
    }
}
