// Copyright 2025 dentsusoken
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

use clap::Parser;
use nix_search::commands::search::SearchCommand;
use nix_search::config::load_config;
use nix_search::error::{Result, format_error_chain, get_exit_code};
use nix_search::logging;

#[derive(Parser)]
#[command(name = "nix-search")]
#[command(author, version, about = "NixOS package search tool", long_about = None)]
struct Cli {
    /// Package name, program or keywords to search for
    #[arg(value_name = "QUERY", required = true, num_args = 1..)]
    query: Vec<String>,

    /// Channel whose package index is searched (e.g., "unstable", "25.05")
    #[arg(short, long)]
    channel: Option<String>,

    /// Output results in JSON format
    #[arg(long, conflicts_with = "detailed")]
    json: bool,

    /// Show attribute set, programs and licenses for each package
    #[arg(short, long)]
    detailed: bool,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn setup_logger(cli: &Cli) {
    logging::setup_logger(cli.verbose);
}

fn main() {
    let cli = Cli::parse();

    // Initialize logger based on CLI flags and environment
    setup_logger(&cli);

    // Load configuration once at startup
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", format_error_chain(&e));
            std::process::exit(get_exit_code(&e));
        }
    };

    let result: Result<()> = (|| {
        let query = cli.query.join(" ");
        let command = SearchCommand::new(&config)?;
        command.execute(&query, cli.channel.as_deref(), cli.json, cli.detailed)
    })();

    if let Err(e) = result {
        eprintln!("{}", format_error_chain(&e));
        std::process::exit(get_exit_code(&e));
    }
}
