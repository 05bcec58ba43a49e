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

use crate::error::CompileError;
use crate::types::record::Record;

/// Validate raw rows and reduce each to the two fields the pipeline
/// consumes.
///
/// Every row must expose at least two fields; otherwise the whole run is
/// aborted with `InsufficientColumns` and no partial output. Extra fields
/// are ignored. Row order is preserved into note order.
pub fn ingest(rows: Vec<Vec<String>>) -> Result<Vec<Record>, CompileError> {
    let mut records = Vec::with_capacity(rows.len());
    for (row_index, mut row) in rows.into_iter().enumerate() {
        if row.len() < 2 {
            return Err(CompileError::InsufficientColumns);
        }
        let back_raw = std::mem::take(&mut row[1]);
        let front_raw = std::mem::take(&mut row[0]);
        records.push(Record {
            row_index,
            front_raw,
            back_raw,
        });
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_input() {
        let records = ingest(Vec::new()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_order_is_preserved() {
        let records = ingest(vec![row(&["a", "b"]), row(&["c", "d"])]).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].row_index, 0);
        assert_eq!(records[0].front_raw, "a");
        assert_eq!(records[0].back_raw, "b");
        assert_eq!(records[1].row_index, 1);
        assert_eq!(records[1].front_raw, "c");
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let records = ingest(vec![row(&["a", "b", "c", "d"])]).unwrap();
        assert_eq!(records[0].front_raw, "a");
        assert_eq!(records[0].back_raw, "b");
    }

    #[test]
    fn test_single_field_is_rejected() {
        let result = ingest(vec![row(&["a", "b"]), row(&["only one"])]);
        assert_eq!(result, Err(CompileError::InsufficientColumns));
    }
}
