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

use std::sync::LazyLock;

use regex::Captures;
use regex::Regex;

/// An image token is written `[img:name.ext]`, where the name is a
/// word-character sequence and the extension is one of the four supported
/// raster formats.
static IMAGE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[img:(\w+\.(?:jpg|png|jpeg|gif))\]").expect("image token pattern is valid")
});

/// All token names in `text`, left to right. Duplicates are kept; callers
/// deduplicate per run.
pub fn scan(text: &str) -> Vec<&str> {
    IMAGE_TOKEN
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// Rewrite every token occurrence in `text` using `f`, which maps a token
/// name to its replacement markup.
pub fn rewrite(text: &str, f: impl Fn(&str) -> String) -> String {
    IMAGE_TOKEN
        .replace_all(text, |caps: &Captures<'_>| f(&caps[1]))
        .into_owned()
}
