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

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;

#[derive(Debug, PartialEq)]
pub struct ErrorReport {
    message: String,
}

impl ErrorReport {
    pub fn new(msg: impl Into<String>) -> Self {
        ErrorReport {
            message: msg.into(),
        }
    }
}

impl From<std::io::Error> for ErrorReport {
    fn from(value: std::io::Error) -> Self {
        ErrorReport {
            message: format!("I/O error: {value:#?}"),
        }
    }
}

impl From<CompileError> for ErrorReport {
    fn from(value: CompileError) -> Self {
        ErrorReport {
            message: value.to_string(),
        }
    }
}

impl Display for ErrorReport {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "error: {}", self.message)
    }
}

impl Error for ErrorReport {
    fn description(&self) -> &str {
        &self.message
    }
}

pub type Fallible<T> = Result<T, ErrorReport>;

pub fn fail<T>(msg: impl Into<String>) -> Fallible<T> {
    Err(ErrorReport {
        message: msg.into(),
    })
}

/// Structural failures that abort a compilation run.
///
/// Anything not listed here degrades silently instead of failing: malformed
/// multiple-choice markup falls back to a plain card, and an unmatched image
/// token renders as a dangling reference. A run either produces a complete
/// descriptor or one of these; no partial deck ever reaches the packager.
#[derive(Debug, PartialEq)]
pub enum CompileError {
    /// The input rows expose fewer than two fields.
    InsufficientColumns,
    /// The row source could not be read or parsed.
    UnreadableSource(String),
    /// Staging a matched image's bytes failed.
    ImageStaging(String),
    /// The assembled descriptor could not be serialized into a package.
    Packaging(String),
}

impl Display for CompileError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileError::InsufficientColumns => {
                write!(
                    f,
                    "the spreadsheet must contain at least two columns (front and back)"
                )
            }
            CompileError::UnreadableSource(msg) => {
                write!(f, "could not read the spreadsheet: {msg}")
            }
            CompileError::ImageStaging(msg) => {
                write!(f, "could not stage an uploaded image: {msg}")
            }
            CompileError::Packaging(msg) => {
                write!(f, "could not package the deck: {msg}")
            }
        }
    }
}

impl Error for CompileError {}
