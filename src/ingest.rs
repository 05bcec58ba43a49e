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

use std::io::Cursor;
use std::io::Read;
use std::io::Seek;
use std::path::Path;

use calamine::Reader;
use calamine::Sheets;
use calamine::open_workbook_auto;
use calamine::open_workbook_auto_from_rs;

use crate::error::CompileError;

/// Read the first worksheet of a workbook file into raw rows.
pub fn rows_from_path(path: &Path) -> Result<Vec<Vec<String>>, CompileError> {
    let workbook =
        open_workbook_auto(path).map_err(|e| CompileError::UnreadableSource(e.to_string()))?;
    rows_from_sheets(workbook)
}

/// Read the first worksheet of an in-memory workbook into raw rows.
pub fn rows_from_bytes(bytes: Vec<u8>) -> Result<Vec<Vec<String>>, CompileError> {
    let workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| CompileError::UnreadableSource(e.to_string()))?;
    rows_from_sheets(workbook)
}

/// The first worksheet row is a header and is skipped. Rows whose first two
/// cells are both empty are dropped. A used range narrower than two columns
/// is a structural failure.
fn rows_from_sheets<RS>(mut workbook: Sheets<RS>) -> Result<Vec<Vec<String>>, CompileError>
where
    RS: Read + Seek,
{
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| {
            CompileError::UnreadableSource("the workbook contains no worksheets".to_string())
        })?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| CompileError::UnreadableSource(e.to_string()))?;
    if range.width() < 2 {
        return Err(CompileError::InsufficientColumns);
    }
    let mut rows = Vec::new();
    for row in range.rows().skip(1) {
        let front = row.first().map(|cell| cell.to_string()).unwrap_or_default();
        let back = row.get(1).map(|cell| cell.to_string()).unwrap_or_default();
        if front.trim().is_empty() && back.trim().is_empty() {
            continue;
        }
        rows.push(vec![front, back]);
    }
    Ok(rows)
}
