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
use std::process::exit;

use clap::Parser;
use tokio::spawn;

use crate::cmd::list::list_decks;
use crate::cmd::serve::server::ServerConfig;
use crate::cmd::serve::server::start_server;
use crate::config::Overrides;
use crate::config::Settings;
use crate::error::Fallible;
use crate::utils::server_url;
use crate::utils::wait_for_server;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Study and edit decks through a web interface.
    Serve {
        /// Base URL of the deck API. Default is http://localhost:5000.
        #[arg(long)]
        api_url: Option<String>,
        /// The host address to bind to. Default is 127.0.0.1.
        #[arg(long)]
        host: Option<String>,
        /// The port to use for the web server. Default is 8000.
        #[arg(long)]
        port: Option<u16>,
        /// Whether to open the browser automatically. Default is true.
        #[arg(long)]
        open_browser: Option<bool>,
        /// Path to a TOML config file. By default, `flashdeck.toml` in the current directory is used if present.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print every deck with its card count.
    List {
        /// Base URL of the deck API. Default is http://localhost:5000.
        #[arg(long)]
        api_url: Option<String>,
        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Serve {
            api_url,
            host,
            port,
            open_browser,
            config,
        } => {
            let overrides = Overrides {
                api_url,
                host,
                port,
                open_browser,
            };
            let settings = Settings::load(config.as_deref(), overrides)?;
            if settings.open_browser {
                // Start a separate task to open the browser once the server is up.
                let browser_host = settings.host.clone();
                let port = settings.port;
                spawn(async move {
                    match wait_for_server(&browser_host, port).await {
                        Ok(_) => {
                            if let Err(e) = open::that(server_url(&browser_host, port)) {
                                log::error!("Failed to open the browser: {e}");
                            }
                        }
                        Err(e) => {
                            eprintln!("Failed to connect to server: {e}");
                            exit(-1)
                        }
                    }
                });
            }
            let config = ServerConfig {
                api_url: settings.api_url,
                host: settings.host,
                port: settings.port,
            };
            start_server(config).await
        }
        Command::List { api_url, config } => {
            let overrides = Overrides {
                api_url,
                ..Overrides::default()
            };
            let settings = Settings::load(config.as_deref(), overrides)?;
            list_decks(&settings.api_url).await
        }
    }
}
