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

use std::process::exit;

use clap::Parser;
use tokio::spawn;

use crate::cmd::compile::compile_file;
use crate::cmd::serve::server::ServeConfig;
use crate::cmd::serve::server::start_server;
use crate::error::Fallible;
use crate::utils::wait_for_server;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Serve the upload form through a web interface.
    Serve {
        /// The host address to bind to. Default is 127.0.0.1.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// The port to use for the web server. Default is 8000.
        #[arg(long, default_value_t = 8000)]
        port: u16,
        /// Directory for run-scoped media staging. Defaults to the system temp directory.
        #[arg(long)]
        staging_dir: Option<String>,
        /// Whether to open the browser automatically. Default is true.
        #[arg(long)]
        open_browser: Option<bool>,
    },
    /// Compile a spreadsheet into a flashcard package.
    Compile {
        /// Path to the spreadsheet (.xlsx or .xls).
        input: String,
        /// Display name for the deck. Defaults to the input file stem.
        #[arg(long)]
        deck_name: Option<String>,
        /// Image file to match against [img:...] tokens. May be repeated.
        #[arg(long)]
        image: Vec<String>,
        /// Path for the output package. Defaults to the deck name with an .apkg extension.
        #[arg(long)]
        output: Option<String>,
        /// Directory for run-scoped media staging. Defaults to the system temp directory.
        #[arg(long)]
        staging_dir: Option<String>,
        /// Whether to detect multiple-choice questions. Default is true.
        #[arg(long)]
        multiple_choice: Option<bool>,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Serve {
            host,
            port,
            staging_dir,
            open_browser,
        } => {
            if open_browser.unwrap_or(true) {
                // Start a separate task to open the browser once the server is up.
                let browser_host = host.clone();
                spawn(async move {
                    match wait_for_server(&browser_host, port).await {
                        Ok(_) => {
                            let _ = open::that(format!("http://{browser_host}:{port}/"));
                        }
                        Err(e) => {
                            eprintln!("Failed to connect to server: {e}");
                            exit(-1)
                        }
                    }
                });
            }
            start_server(ServeConfig {
                host,
                port,
                staging_dir,
            })
            .await
        }
        Command::Compile {
            input,
            deck_name,
            image,
            output,
            staging_dir,
            multiple_choice,
        } => compile_file(
            input,
            deck_name,
            image,
            output,
            staging_dir,
            multiple_choice.unwrap_or(true),
        ),
    }
}
