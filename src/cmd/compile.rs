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

use cardpress_core::ids::IdGenerator;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::ingest;
use crate::media::resolve::ImageBlob;
use crate::media::stage::StagingArea;
use crate::pack;
use crate::pipeline;
use crate::pipeline::CompileOptions;

/// One-shot compilation: read a workbook and images from disk, write the
/// package.
pub fn compile_file(
    input: String,
    deck_name: Option<String>,
    images: Vec<String>,
    output: Option<String>,
    staging_dir: Option<String>,
    multiple_choice: bool,
) -> Fallible<()> {
    let input = PathBuf::from(input);
    let deck_name = match deck_name {
        Some(name) => name,
        None => input
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "My Deck".to_string()),
    };
    let raw_rows = ingest::rows_from_path(&input)?;
    let blobs = load_images(&images)?;

    let mut ids = IdGenerator::new();
    let staging_root = match staging_dir {
        Some(dir) => PathBuf::from(dir),
        None => std::env::temp_dir().join("cardpress"),
    };
    fs::create_dir_all(&staging_root)?;
    let staging = StagingArea::create(&staging_root, ids.next_id())?;

    let options = CompileOptions { multiple_choice };
    let descriptor = pipeline::compile(raw_rows, &blobs, &deck_name, options, &staging, &mut ids)?;
    let bytes = pack::write_package(&descriptor, staging.path(), &mut ids)?;

    let output = match output {
        Some(path) => PathBuf::from(path),
        None => PathBuf::from(format!("{}.apkg", deck_name.replace(' ', "_"))),
    };
    fs::write(&output, &bytes)?;
    println!(
        "Wrote {} notes and {} media files to {}.",
        descriptor.notes().len(),
        descriptor.media().len(),
        output.display()
    );
    Ok(())
}

fn load_images(paths: &[String]) -> Fallible<Vec<ImageBlob>> {
    let mut blobs = Vec::with_capacity(paths.len());
    for path in paths {
        let path = Path::new(path);
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| ErrorReport::new(format!("not a file: {}", path.display())))?;
        let bytes = fs::read(path)?;
        blobs.push(ImageBlob { filename, bytes });
    }
    Ok(blobs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::create_tmp_directory;
    use crate::helper::write_test_workbook;

    #[test]
    fn test_compile_file_end_to_end() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let sheet = dir.join("animals.xlsx");
        write_test_workbook(
            &sheet,
            &[("A cat: [img:cat.png]", "Yes"), ("Capital of France?", "Paris")],
        )?;
        let image = dir.join("cat.png");
        fs::write(&image, b"meow")?;
        let output = dir.join("animals.apkg");

        compile_file(
            sheet.display().to_string(),
            Some("Animals".to_string()),
            vec![image.display().to_string()],
            Some(output.display().to_string()),
            Some(dir.join("staging").display().to_string()),
            true,
        )?;

        let bytes = fs::read(&output)?;
        assert!(bytes.starts_with(b"PK"));
        // The staging root is left behind, but the run's directory is gone.
        let leftovers: Vec<_> = fs::read_dir(dir.join("staging"))?.collect();
        assert!(leftovers.is_empty());
        Ok(())
    }
}
