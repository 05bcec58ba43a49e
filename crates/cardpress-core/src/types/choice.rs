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

/// The parsed structure of a multiple-choice question: stem, ordered
/// options keyed by letter, and the correct key.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceSet {
    question: String,
    options: Vec<(char, String)>,
    correct: char,
}

impl ChoiceSet {
    /// Build a choice set, enforcing its invariants: at least two options,
    /// and the correct letter present among the option keys. Returns `None`
    /// otherwise, which callers treat as "not multiple-choice".
    pub fn new(question: String, options: Vec<(char, String)>, correct: char) -> Option<Self> {
        if options.len() < 2 {
            return None;
        }
        if !options.iter().any(|(letter, _)| *letter == correct) {
            return None;
        }
        Some(ChoiceSet {
            question,
            options,
            correct,
        })
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn options(&self) -> &[(char, String)] {
        &self.options
    }

    pub fn correct(&self) -> char {
        self.correct
    }

    /// Text of the correct option. The constructor guarantees the key
    /// exists.
    pub fn correct_text(&self) -> &str {
        self.options
            .iter()
            .find(|(letter, _)| *letter == self.correct)
            .map(|(_, text)| text.as_str())
            .unwrap_or("")
    }
}
