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

use crate::error::NixSearchError;
use std::fmt;

pub struct ErrorContext<'a> {
    pub error: &'a NixSearchError,
    pub suggestion: Option<String>,
    pub details: Option<String>,
}

impl<'a> ErrorContext<'a> {
    pub fn new(error: &'a NixSearchError) -> Self {
        let (suggestion, details) = match error {
            NixSearchError::ChannelNotFound { channel, index, .. } => {
                let suggestion = Some(format!(
                    "Channel names look like 'unstable' or a release number such as '25.05'. Run \
                     'nix-search --channel unstable <query>' to search the rolling channel \
                     instead of '{channel}'."
                ));
                let details = Some(format!(
                    "The search backend has no index named '{index}'."
                ));
                (suggestion, details)
            }
            NixSearchError::Http(http_err) => {
                let error_string = http_err.to_string();
                let suggestion =
                    if error_string.contains("timeout") || error_string.contains("Timeout") {
                        Some(
                            "The search backend did not respond in time. Check your internet \
                             connection, or raise 'timeout_secs' in the [backend] section of \
                             config.toml."
                                .to_string(),
                        )
                    } else {
                        Some(
                            "Check your internet connection and proxy settings, then try again."
                                .to_string(),
                        )
                    };
                let details = Some(format!("HTTP error: {error_string}"));
                (suggestion, details)
            }
            NixSearchError::BackendUnexpected { .. } => {
                let suggestion = Some(
                    "The search backend may be down or answering through a proxy. Try again in a \
                     few minutes."
                        .to_string(),
                );
                (suggestion, None)
            }
            NixSearchError::MalformedResponse(_) => {
                let suggestion = Some(
                    "The search backend may have changed its response format. Check for a newer \
                     nix-search release."
                        .to_string(),
                );
                (suggestion, None)
            }
            NixSearchError::ConfigError(_) => {
                let suggestion = Some(
                    "Check the config.toml syntax, or remove the file to fall back to built-in \
                     defaults."
                        .to_string(),
                );
                (suggestion, None)
            }
            _ => (None, None),
        };

        Self {
            error,
            suggestion,
            details,
        }
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestion = Some(suggestion);
        self
    }

    pub fn with_details(mut self, details: String) -> Self {
        self.details = Some(details);
        self
    }
}

impl<'a> fmt::Display for ErrorContext<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: {}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\n\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}
