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

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::extract::Multipart;
use axum::extract::State;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::http::header::CACHE_CONTROL;
use axum::http::header::CONTENT_DISPOSITION;
use axum::http::header::CONTENT_TYPE;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::get;
use axum::routing::post;
use cardpress_core::ids::IdGenerator;
use tokio::net::TcpListener;
use tokio::signal;

use crate::cmd::serve::template::upload_page;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::ingest;
use crate::media::resolve::ImageBlob;
use crate::media::stage::StagingArea;
use crate::pack;
use crate::pipeline;
use crate::pipeline::CompileOptions;
use crate::utils::CACHE_CONTROL_IMMUTABLE;

/// Uploads are capped at 32MB, spreadsheet and images combined.
const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

/// Extensions accepted for the uploaded spreadsheet.
const SHEET_EXTENSIONS: [&str; 2] = ["xlsx", "xls"];
/// Extensions accepted for uploaded images. Files with other names are
/// silently skipped.
const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

const STYLE_CSS: &str = r#"body {
  font-family: sans-serif;
  max-width: 40em;
  margin: 2em auto;
  padding: 0 1em;
}

form {
  display: flex;
  flex-direction: column;
  gap: 0.5em;
}

label {
  margin-top: 0.5em;
  font-weight: bold;
}

label.checkbox {
  font-weight: normal;
}

button {
  margin-top: 1em;
  padding: 0.5em;
}

.error {
  border: 1px solid #b00;
  color: #b00;
  padding: 0.5em;
  margin: 1em 0;
}
"#;

pub struct ServeConfig {
    pub host: String,
    pub port: u16,
    pub staging_dir: Option<String>,
}

#[derive(Clone)]
struct ServerState {
    staging_root: PathBuf,
}

pub async fn start_server(config: ServeConfig) -> Fallible<()> {
    let staging_root = match config.staging_dir {
        Some(dir) => PathBuf::from(dir),
        None => std::env::temp_dir().join("cardpress"),
    };
    std::fs::create_dir_all(&staging_root)?;
    let state = ServerState { staging_root };
    let app = Router::new();
    let app = app.route("/", get(get_handler));
    let app = app.route("/", post(post_handler));
    let app = app.route("/style.css", get(style_handler));
    let app = app.fallback(not_found_handler);
    let app = app.layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES));
    let app = app.with_state(state);
    let bind = format!("{}:{}", config.host, config.port);
    log::debug!("Starting server on {bind}");
    let listener = TcpListener::bind(bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = signal::ctrl_c().await;
}

async fn get_handler() -> Html<String> {
    Html(upload_page(None).into_string())
}

async fn style_handler() -> (StatusCode, [(HeaderName, &'static str); 2], &'static str) {
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, "text/css"),
            (CACHE_CONTROL, CACHE_CONTROL_IMMUTABLE),
        ],
        STYLE_CSS,
    )
}

async fn not_found_handler() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not Found")
}

/// One upload request parsed out of the multipart body.
#[derive(Default)]
struct UploadForm {
    deck_name: Option<String>,
    sheet: Option<(String, Vec<u8>)>,
    images: Vec<ImageBlob>,
    multiple_choice: bool,
}

async fn post_handler(State(state): State<ServerState>, multipart: Multipart) -> Response {
    let form = match read_form(multipart).await {
        Ok(form) => form,
        Err(e) => return error_page(e.to_string()),
    };
    match run_compile(&state, form) {
        Ok((deck_name, bytes)) => {
            let disposition = format!(
                "attachment; filename=\"{}.apkg\"",
                deck_name.replace(' ', "_")
            );
            (
                [
                    (CONTENT_TYPE, "application/octet-stream".to_string()),
                    (CONTENT_DISPOSITION, disposition),
                ],
                bytes,
            )
                .into_response()
        }
        Err(e) => error_page(e.to_string()),
    }
}

fn error_page(message: String) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Html(upload_page(Some(&message)).into_string()),
    )
        .into_response()
}

async fn read_form(mut multipart: Multipart) -> Fallible<UploadForm> {
    let mut form = UploadForm::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ErrorReport::new(format!("invalid upload: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "deck_name" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ErrorReport::new(format!("invalid deck name: {e}")))?;
                if !value.trim().is_empty() {
                    form.deck_name = Some(value);
                }
            }
            "sheet" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ErrorReport::new(format!("invalid spreadsheet upload: {e}")))?;
                form.sheet = Some((filename, bytes.to_vec()));
            }
            "images" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ErrorReport::new(format!("invalid image upload: {e}")))?;
                if has_extension(&filename, &IMAGE_EXTENSIONS) {
                    form.images.push(ImageBlob {
                        filename,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            "multiple_choice" => {
                form.multiple_choice = true;
            }
            _ => {}
        }
    }
    Ok(form)
}

/// One compilation run: fresh identifiers, a fresh staging directory, and
/// all-or-nothing output. The staging directory is removed when this
/// returns, whether packaging succeeded or not.
fn run_compile(state: &ServerState, form: UploadForm) -> Fallible<(String, Vec<u8>)> {
    let (sheet_name, sheet_bytes) = form
        .sheet
        .ok_or_else(|| ErrorReport::new("no spreadsheet was uploaded"))?;
    if !has_extension(&sheet_name, &SHEET_EXTENSIONS) {
        return fail(format!(
            "only {} files are allowed for the data file",
            SHEET_EXTENSIONS.join(", ")
        ));
    }
    let deck_name = form.deck_name.unwrap_or_else(|| "My Deck".to_string());
    let raw_rows = ingest::rows_from_bytes(sheet_bytes)?;
    let mut ids = IdGenerator::new();
    let staging = StagingArea::create(&state.staging_root, ids.next_id())?;
    let options = CompileOptions {
        multiple_choice: form.multiple_choice,
    };
    let descriptor = pipeline::compile(
        raw_rows,
        &form.images,
        &deck_name,
        options,
        &staging,
        &mut ids,
    )?;
    let bytes = pack::write_package(&descriptor, staging.path(), &mut ids)?;
    log::info!(
        "Built deck '{}': {} notes, {} media files.",
        deck_name,
        descriptor.notes().len(),
        descriptor.media().len()
    );
    Ok((deck_name, bytes))
}

fn has_extension(filename: &str, allowed: &[&str]) -> bool {
    match filename.rsplit_once('.') {
        Some((_, ext)) => {
            let ext = ext.to_ascii_lowercase();
            allowed.contains(&ext.as_str())
        }
        None => false,
    }
}
