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

use crate::error::{NixSearchError, Result};
use serde::Serialize;
use serde_json::json;
use url::Url;

/// Prefix of every package index on the search backend. The channel name
/// completes it, e.g. `latest-37-nixos-unstable`.
pub const INDEX_PREFIX: &str = "latest-37-nixos-";

/// Inputs for a single search call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    /// Channel whose package index is searched (e.g., "unstable", "25.05")
    pub channel: String,

    /// Free-text query matched against names, programs and descriptions
    pub query: String,
}

impl SearchRequest {
    pub fn new(channel: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            query: query.into(),
        }
    }
}

/// Build the `_search` endpoint URL for a channel's package index.
///
/// The channel is percent-encoded as a single path segment, so any channel
/// string (spaces included) yields a well-formed URL. Fails only when the
/// configured base URL itself is unusable.
pub fn index_url(base_url: &str, channel: &str) -> Result<String> {
    let mut url = Url::parse(base_url).map_err(|e| {
        NixSearchError::ConfigError(format!("Invalid backend base URL '{base_url}': {e}"))
    })?;

    url.path_segments_mut()
        .map_err(|_| {
            NixSearchError::ConfigError(format!(
                "Backend base URL '{base_url}' cannot hold a path"
            ))
        })?
        .pop_if_empty()
        .push(&format!("{INDEX_PREFIX}{channel}"))
        .push("_search");

    Ok(url.to_string())
}

/// Render the search payload with the query text spliced into its three
/// slots: the primary match text, the `_name` diagnostic label and the
/// wildcard fallback pattern.
///
/// The payload mirrors the query issued by the search frontend. Relevance
/// comes from a `dis_max` over a weighted `cross_fields` multi_match and a
/// case-insensitive wildcard on the attribute name. Hit order is fixed by
/// the `sort` clause, so callers can take the hits as returned.
pub fn search_payload(query: &str) -> Result<String> {
    let match_name = format!("multi_match_{}", query.replace(' ', "_"));
    let wildcard = format!("*{query}*");

    let payload = json!({
        "from": 0,
        "size": 50,
        "sort": [
            {
                "_score": "desc",
                "package_attr_name": "desc",
                "package_pversion": "desc"
            }
        ],
        "aggs": {
            "package_attr_set": {
                "terms": {
                    "field": "package_attr_set",
                    "size": 20
                }
            },
            "package_license_set": {
                "terms": {
                    "field": "package_license_set",
                    "size": 20
                }
            },
            "package_maintainers_set": {
                "terms": {
                    "field": "package_maintainers_set",
                    "size": 20
                }
            },
            "package_platforms": {
                "terms": {
                    "field": "package_platforms",
                    "size": 20
                }
            },
            "all": {
                "global": {},
                "aggregations": {
                    "package_attr_set": {
                        "terms": {
                            "field": "package_attr_set",
                            "size": 20
                        }
                    },
                    "package_license_set": {
                        "terms": {
                            "field": "package_license_set",
                            "size": 20
                        }
                    },
                    "package_maintainers_set": {
                        "terms": {
                            "field": "package_maintainers_set",
                            "size": 20
                        }
                    },
                    "package_platforms": {
                        "terms": {
                            "field": "package_platforms",
                            "size": 20
                        }
                    }
                }
            }
        },
        "query": {
            "bool": {
                "filter": [
                    {
                        "term": {
                            "type": {
                                "value": "package",
                                "_name": "filter_packages"
                            }
                        }
                    },
                    {
                        "bool": {
                            "must": [
                                {
                                    "bool": {
                                        "should": []
                                    }
                                },
                                {
                                    "bool": {
                                        "should": []
                                    }
                                },
                                {
                                    "bool": {
                                        "should": []
                                    }
                                },
                                {
                                    "bool": {
                                        "should": []
                                    }
                                }
                            ]
                        }
                    }
                ],
                "must": [
                    {
                        "dis_max": {
                            "tie_breaker": 0.7,
                            "queries": [
                                {
                                    "multi_match": {
                                        "type": "cross_fields",
                                        "query": query,
                                        "analyzer": "whitespace",
                                        "auto_generate_synonyms_phrase_query": false,
                                        "operator": "and",
                                        "_name": match_name,
                                        "fields": [
                                            "package_attr_name^9",
                                            "package_attr_name.*^5.3999999999999995",
                                            "package_programs^9",
                                            "package_programs.*^5.3999999999999995",
                                            "package_pname^6",
                                            "package_pname.*^3.5999999999999996",
                                            "package_description^1.3",
                                            "package_description.*^0.78",
                                            "package_longDescription^1",
                                            "package_longDescription.*^0.6",
                                            "flake_name^0.5",
                                            "flake_name.*^0.3"
                                        ]
                                    }
                                },
                                {
                                    "wildcard": {
                                        "package_attr_name": {
                                            "value": wildcard,
                                            "case_insensitive": true
                                        }
                                    }
                                }
                            ]
                        }
                    }
                ]
            }
        }
    });

    serde_json::to_string(&payload)
        .map_err(|e| NixSearchError::QueryEncoding(e.to_string()))
}
