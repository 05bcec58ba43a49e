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

use std::path::PathBuf;

/// One resolved image: a token name bound to staged bytes and the filename
/// it will carry inside the package.
///
/// A run's manifest holds at most one entry per distinct token name, and
/// `package_filename` is unique within it.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaEntry {
    pub token_name: String,
    pub staged_path: PathBuf,
    pub package_filename: String,
}
