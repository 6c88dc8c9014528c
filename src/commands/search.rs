use crate::api::{ApiClient, SearchRequest, SearchResults};
use crate::config::NixSearchConfig;
use crate::error::{NixSearchError, Result};
use colored::Colorize;
use comfy_table::{Cell, Table};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const DESCRIPTION_WIDTH: usize = 60;

pub struct SearchCommand<'a> {
    config: &'a NixSearchConfig,
}

impl<'a> SearchCommand<'a> {
    pub fn new(config: &'a NixSearchConfig) -> Result<Self> {
        Ok(Self { config })
    }

    pub fn execute(
        &self,
        query: &str,
        channel: Option<&str>,
        json: bool,
        detailed: bool,
    ) -> Result<()> {
        let channel = channel.unwrap_or_else(|| self.config.channel());

        if channel.trim().is_empty() {
            return Err(NixSearchError::ValidationError(
                "Channel must not be empty".to_string(),
            ));
        }
        if query.trim().is_empty() {
            return Err(NixSearchError::ValidationError(
                "Search query must not be empty".to_string(),
            ));
        }

        let client = ApiClient::new()
            .with_base_url(self.config.backend.base_url.clone())
            .with_timeout(self.config.timeout());
        let request = SearchRequest::new(channel, query);

        let results = if json {
            client.search(&request)?
        } else {
            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::default_spinner()
                    .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
                    .template("{spinner:.green} {msg}")
                    .unwrap(),
            );
            spinner.set_message(format!("Searching channel '{channel}' for '{query}'..."));
            spinner.enable_steady_tick(Duration::from_millis(100));

            let results = client.search(&request);
            spinner.finish_and_clear();
            results?
        };

        // JSON output mode
        if json {
            let json_output = serde_json::to_string_pretty(&results.packages)?;
            println!("{json_output}");
            return Ok(());
        }

        if results.packages.is_empty() {
            println!(
                "{} No packages matching '{}' in channel '{}'",
                "✗".red(),
                query.bright_blue(),
                channel.cyan()
            );

            println!("\n{}", "Try these:".yellow().bold());
            println!(
                "  1. {} - Shorter terms match more attribute names",
                "nix-search <one word>".cyan()
            );
            println!(
                "  2. {} - The rolling channel carries the newest packages",
                format!("nix-search --channel unstable {query}").cyan()
            );

            return Ok(());
        }

        display_packages(&results, detailed);
        Ok(())
    }
}

fn display_packages(results: &SearchResults, detailed: bool) {
    let result_count = results.packages.len();
    println!(
        "Found {} package{} matching '{}' in channel '{}':\n",
        result_count.to_string().cyan(),
        if result_count == 1 { "" } else { "s" },
        results.request.query.bright_blue(),
        results.request.channel.cyan()
    );

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_BORDERS_ONLY);

    let headers = if detailed {
        vec![
            Cell::new("Attribute"),
            Cell::new("Version"),
            Cell::new("Set"),
            Cell::new("Programs"),
            Cell::new("Licenses"),
            Cell::new("Description"),
        ]
    } else {
        // Compact mode (default)
        vec![
            Cell::new("Attribute"),
            Cell::new("Version"),
            Cell::new("Description"),
        ]
    };
    table.set_header(headers);

    for package in &results.packages {
        let description = package
            .description
            .as_deref()
            .map(format_description)
            .unwrap_or_default();

        let row = if detailed {
            let licenses = package
                .licenses
                .iter()
                .map(|license| license.full_name.as_str())
                .collect::<Vec<_>>()
                .join(", ");

            vec![
                Cell::new(&package.attr_name),
                Cell::new(&package.version),
                Cell::new(&package.attr_set),
                Cell::new(package.programs.join(" ")),
                Cell::new(licenses),
                Cell::new(description),
            ]
        } else {
            vec![
                Cell::new(&package.attr_name),
                Cell::new(&package.version),
                Cell::new(description),
            ]
        };
        table.add_row(row);
    }

    println!("{table}");
}

/// First line of the description, capped so the compact table stays one
/// row per package.
fn format_description(description: &str) -> String {
    let first_line = description.lines().next().unwrap_or_default();
    if first_line.chars().count() <= DESCRIPTION_WIDTH {
        return first_line.to_string();
    }

    let truncated: String = first_line.chars().take(DESCRIPTION_WIDTH).collect();
    format!("{truncated}...")
}
