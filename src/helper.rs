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

//! Helpers shared by the test modules.

use std::path::Path;
use std::path::PathBuf;

use crate::error::ErrorReport;
use crate::error::Fallible;

/// Create a scratch directory. The directory outlives the returned path;
/// the OS temp dir reclaims it eventually.
pub fn create_tmp_directory() -> Fallible<PathBuf> {
    let dir = tempfile::tempdir()?;
    Ok(dir.keep())
}

/// Write a minimal two-column workbook: a header row, then the given
/// front/back rows.
pub fn write_test_workbook(path: &Path, rows: &[(&str, &str)]) -> Fallible<()> {
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 0, "Front").map_err(to_report)?;
    worksheet.write_string(0, 1, "Back").map_err(to_report)?;
    for (idx, (front, back)) in rows.iter().enumerate() {
        let row = (idx + 1) as u32;
        worksheet.write_string(row, 0, *front).map_err(to_report)?;
        worksheet.write_string(row, 1, *back).map_err(to_report)?;
    }
    workbook.save(path).map_err(to_report)?;
    Ok(())
}

fn to_report(e: rust_xlsxwriter::XlsxError) -> ErrorReport {
    ErrorReport::new(format!("could not write workbook fixture: {e}"))
}
