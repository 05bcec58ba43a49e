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

use maud::DOCTYPE;
use maud::Markup;
use maud::html;

pub fn page_template(body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "cardpress" }
                link rel="stylesheet" href="/style.css";
            }
            body {
                (body)
            }
        }
    }
}

/// The upload form, optionally with an error banner from the previous
/// attempt.
pub fn upload_page(error: Option<&str>) -> Markup {
    page_template(html! {
        main class="upload" {
            h1 { "cardpress" }
            p {
                "Turn a spreadsheet of questions and answers into an Anki deck. "
                "The first column is the card front, the second the back."
            }
            @if let Some(message) = error {
                div class="error" { (message) }
            }
            form method="post" action="/" enctype="multipart/form-data" {
                label for="deck_name" { "Deck name" }
                input type="text" id="deck_name" name="deck_name" value="My Deck";
                label for="sheet" { "Spreadsheet (.xlsx or .xls)" }
                input type="file" id="sheet" name="sheet" accept=".xlsx,.xls" required;
                label for="images" { "Images referenced as [img:name.ext]" }
                input type="file" id="images" name="images" accept=".png,.jpg,.jpeg,.gif" multiple;
                label class="checkbox" {
                    input type="checkbox" name="multiple_choice" checked;
                    " Detect multiple-choice questions"
                }
                button type="submit" { "Build deck" }
            }
        }
    })
}
