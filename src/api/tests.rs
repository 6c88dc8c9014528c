use super::*;
use crate::error::NixSearchError;
use serde_json::json;

fn firefox_hit() -> serde_json::Value {
    json!({
        "_index": "latest-37-nixos-unstable",
        "_id": "nixos-unstable-firefox",
        "_score": 9.013,
        "_source": {
            "package_pname": "firefox",
            "package_attr_name": "firefox",
            "package_attr_set": "No attribute set",
            "package_outputs": ["out"],
            "package_default_output": "out",
            "package_description": "Web browser built from Firefox source tree",
            "package_programs": ["firefox"],
            "package_homepage": ["http://www.mozilla.com/en-US/firefox/"],
            "package_pversion": "128.0",
            "package_platforms": ["x86_64-linux", "aarch64-linux"],
            "package_position": "pkgs/applications/networking/browsers/firefox/packages.nix:23",
            "package_license": [
                {
                    "url": "https://spdx.org/licenses/MPL-2.0.html",
                    "fullName": "Mozilla Public License 2.0"
                }
            ]
        }
    })
}

fn tridactyl_hit() -> serde_json::Value {
    json!({
        "_index": "latest-37-nixos-unstable",
        "_id": "nixos-unstable-tridactyl-native",
        "_score": 5.18,
        "_source": {
            "package_pname": "tridactyl-native",
            "package_attr_name": "tridactyl-native",
            "package_attr_set": "No attribute set",
            "package_outputs": ["out"],
            "package_pversion": "1.22.1",
            "package_platforms": ["x86_64-linux"],
            "package_position": "pkgs/tools/networking/tridactyl-native/default.nix:26",
            "package_license": []
        }
    })
}

fn success_body(hits: Vec<serde_json::Value>) -> String {
    json!({
        "took": 11,
        "timed_out": false,
        "_shards": {"total": 1, "successful": 1, "skipped": 0, "failed": 0},
        "hits": {
            "total": {"value": hits.len(), "relation": "eq"},
            "max_score": 9.013,
            "hits": hits
        }
    })
    .to_string()
}

fn index_not_found_body(index: &str) -> String {
    json!({
        "error": {
            "root_cause": [
                {
                    "type": "index_not_found_exception",
                    "reason": format!("no such index [{index}]"),
                    "resource.type": "index_or_alias",
                    "resource.id": index,
                    "index_uuid": "_na_",
                    "index": index
                }
            ],
            "type": "index_not_found_exception",
            "reason": format!("no such index [{index}]"),
            "resource.type": "index_or_alias",
            "resource.id": index,
            "index_uuid": "_na_",
            "index": index
        },
        "status": 404
    })
    .to_string()
}

#[test]
fn test_api_client_creation() {
    let client = ApiClient::new();
    assert_eq!(
        client.base_url,
        "https://nixos-search-7-1733963800.us-east-1.bonsaisearch.net:443"
    );
}

#[test]
fn test_api_client_with_custom_base_url() {
    let custom_url = "https://test.example.com";
    let client = ApiClient::new().with_base_url(custom_url.to_string());
    assert_eq!(client.base_url, custom_url);
}

#[test]
fn test_api_client_trims_trailing_slash() {
    let client = ApiClient::new().with_base_url("http://127.0.0.1:9200/".to_string());
    assert_eq!(client.base_url, "http://127.0.0.1:9200");
}

#[test]
fn test_index_url_appends_channel_index() {
    let url = index_url(DEFAULT_BASE_URL, "unstable").unwrap();
    assert!(url.ends_with("/latest-37-nixos-unstable/_search"));
    assert!(url.starts_with("https://nixos-search-7-1733963800.us-east-1.bonsaisearch.net"));
}

#[test]
fn test_index_url_with_local_base() {
    let url = index_url("http://127.0.0.1:9200", "unstable").unwrap();
    assert_eq!(url, "http://127.0.0.1:9200/latest-37-nixos-unstable/_search");
}

#[test]
fn test_index_url_percent_encodes_channel() {
    let url = index_url("http://127.0.0.1:9200", "23.05 test").unwrap();
    assert_eq!(
        url,
        "http://127.0.0.1:9200/latest-37-nixos-23.05%20test/_search"
    );
}

#[test]
fn test_index_url_release_channel() {
    let url = index_url(DEFAULT_BASE_URL, "25.05").unwrap();
    assert!(url.ends_with("/latest-37-nixos-25.05/_search"));
}

#[test]
fn test_index_url_rejects_invalid_base() {
    let result = index_url("not a url", "unstable");
    assert!(matches!(result, Err(NixSearchError::ConfigError(_))));
}

#[test]
fn test_search_payload_embeds_query_slots() {
    let payload = search_payload("fire fox").unwrap();
    let value: serde_json::Value = serde_json::from_str(&payload).unwrap();

    let multi_match = &value["query"]["bool"]["must"][0]["dis_max"]["queries"][0]["multi_match"];
    assert_eq!(multi_match["query"], "fire fox");
    assert_eq!(multi_match["_name"], "multi_match_fire_fox");

    let wildcard = &value["query"]["bool"]["must"][0]["dis_max"]["queries"][1]["wildcard"];
    assert_eq!(wildcard["package_attr_name"]["value"], "*fire fox*");
    assert_eq!(wildcard["package_attr_name"]["case_insensitive"], true);
}

#[test]
fn test_search_payload_escapes_special_characters() {
    let query = r#"weird "query" with \backslashes\"#;
    let payload = search_payload(query).unwrap();
    let value: serde_json::Value = serde_json::from_str(&payload).unwrap();

    let multi_match = &value["query"]["bool"]["must"][0]["dis_max"]["queries"][0]["multi_match"];
    assert_eq!(multi_match["query"], query);
    assert_eq!(
        value["query"]["bool"]["must"][0]["dis_max"]["queries"][1]["wildcard"]
            ["package_attr_name"]["value"],
        format!("*{query}*")
    );
}

#[test]
fn test_search_payload_underscores_replace_spaces_only() {
    let payload = search_payload("gcc-arm embedded 13").unwrap();
    let value: serde_json::Value = serde_json::from_str(&payload).unwrap();

    assert_eq!(
        value["query"]["bool"]["must"][0]["dis_max"]["queries"][0]["multi_match"]["_name"],
        "multi_match_gcc-arm_embedded_13"
    );
}

#[test]
fn test_search_payload_empty_and_multispace_queries() {
    let payload = search_payload("").unwrap();
    let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
    let multi_match = &value["query"]["bool"]["must"][0]["dis_max"]["queries"][0]["multi_match"];
    assert_eq!(multi_match["query"], "");
    assert_eq!(multi_match["_name"], "multi_match_");

    let payload = search_payload("fire  fox").unwrap();
    let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
    let multi_match = &value["query"]["bool"]["must"][0]["dis_max"]["queries"][0]["multi_match"];
    assert_eq!(multi_match["_name"], "multi_match_fire__fox");
    assert_eq!(
        value["query"]["bool"]["must"][0]["dis_max"]["queries"][1]["wildcard"]
            ["package_attr_name"]["value"],
        "*fire  fox*"
    );
}

#[test]
fn test_search_payload_fixed_template() {
    let payload = search_payload("firefox").unwrap();
    let value: serde_json::Value = serde_json::from_str(&payload).unwrap();

    assert_eq!(value["from"], 0);
    assert_eq!(value["size"], 50);
    assert_eq!(value["sort"][0]["_score"], "desc");
    assert_eq!(value["sort"][0]["package_attr_name"], "desc");
    assert_eq!(value["sort"][0]["package_pversion"], "desc");

    let dis_max = &value["query"]["bool"]["must"][0]["dis_max"];
    assert_eq!(dis_max["tie_breaker"], 0.7);
    let fields = dis_max["queries"][0]["multi_match"]["fields"]
        .as_array()
        .unwrap();
    assert_eq!(fields.len(), 12);
    assert_eq!(fields[0], "package_attr_name^9");
    assert_eq!(fields[1], "package_attr_name.*^5.3999999999999995");

    let filter = &value["query"]["bool"]["filter"];
    assert_eq!(filter[0]["term"]["type"]["value"], "package");
    assert_eq!(filter[0]["term"]["type"]["_name"], "filter_packages");

    assert!(value["aggs"]["all"]["global"].is_object());
    assert_eq!(
        value["aggs"]["package_attr_set"]["terms"]["field"],
        "package_attr_set"
    );
    assert_eq!(value["aggs"]["package_platforms"]["terms"]["size"], 20);
}

#[test]
fn test_interpret_success_returns_packages_in_order() {
    let request = SearchRequest::new("unstable", "firefox");
    let body = success_body(vec![firefox_hit(), tridactyl_hit()]);

    let packages = interpret(200, &body, &request).unwrap();

    assert_eq!(packages.len(), 2);
    assert_eq!(packages[0].name, "firefox");
    assert_eq!(packages[0].attr_name, "firefox");
    assert_eq!(packages[0].version, "128.0");
    assert_eq!(packages[0].outputs, vec!["out".to_string()]);
    assert_eq!(packages[0].default_output, Some("out".to_string()));
    assert_eq!(
        packages[0].description.as_deref(),
        Some("Web browser built from Firefox source tree")
    );
    assert_eq!(packages[0].programs, vec!["firefox".to_string()]);
    assert_eq!(
        packages[0].position,
        "pkgs/applications/networking/browsers/firefox/packages.nix:23"
    );
    assert_eq!(packages[0].licenses.len(), 1);
    assert_eq!(packages[0].licenses[0].full_name, "Mozilla Public License 2.0");
    assert_eq!(
        packages[0].licenses[0].url.as_deref(),
        Some("https://spdx.org/licenses/MPL-2.0.html")
    );

    assert_eq!(packages[1].name, "tridactyl-native");
    assert_eq!(packages[1].default_output, None);
    assert_eq!(packages[1].description, None);
    assert!(packages[1].licenses.is_empty());
}

#[test]
fn test_interpret_success_with_empty_hits() {
    let request = SearchRequest::new("unstable", "nosuchpackageanywhere");
    let body = success_body(vec![]);

    let packages = interpret(200, &body, &request).unwrap();
    assert!(packages.is_empty());
}

#[test]
fn test_interpret_ignores_error_field_on_success() {
    let request = SearchRequest::new("unstable", "firefox");
    let body = json!({
        "error": {"type": "stale_warning", "reason": "ignored"},
        "hits": {"hits": [firefox_hit()]}
    })
    .to_string();

    let packages = interpret(200, &body, &request).unwrap();
    assert_eq!(packages.len(), 1);
}

#[test]
fn test_interpret_channel_not_found() {
    let request = SearchRequest::new("bogus", "firefox");
    let body = index_not_found_body("latest-37-nixos-bogus");

    let err = interpret(404, &body, &request).unwrap_err();
    match err {
        NixSearchError::ChannelNotFound {
            channel,
            index,
            status,
        } => {
            assert_eq!(channel, "bogus");
            assert_eq!(index, "latest-37-nixos-bogus");
            assert_eq!(status, 404);
        }
        other => panic!("expected ChannelNotFound, got {other:?}"),
    }
}

#[test]
fn test_interpret_backend_reported_reason_is_verbatim() {
    let request = SearchRequest::new("unstable", "firefox");
    let body = json!({
        "error": {
            "root_cause": [
                {"type": "search_phase_execution_exception", "reason": "all shards failed"}
            ],
            "type": "search_phase_execution_exception",
            "reason": "all shards failed",
            "phase": "query",
            "grouped": true
        },
        "status": 503
    })
    .to_string();

    let err = interpret(503, &body, &request).unwrap_err();
    match err {
        NixSearchError::BackendReported(reason) => assert_eq!(reason, "all shards failed"),
        other => panic!("expected BackendReported, got {other:?}"),
    }
}

#[test]
fn test_interpret_unexpected_status_without_error_object() {
    let request = SearchRequest::new("unstable", "firefox");
    let body = json!({"message": "upstream gateway exploded"}).to_string();

    let err = interpret(502, &body, &request).unwrap_err();
    match err {
        NixSearchError::BackendUnexpected { status, body } => {
            assert_eq!(status, 502);
            assert!(body.contains("upstream gateway exploded"));
        }
        other => panic!("expected BackendUnexpected, got {other:?}"),
    }
}

#[test]
fn test_interpret_malformed_body() {
    let request = SearchRequest::new("unstable", "firefox");

    let err = interpret(200, "<html>Service Unavailable</html>", &request).unwrap_err();
    assert!(matches!(err, NixSearchError::MalformedResponse(_)));
}

#[test]
fn test_interpret_malformed_body_on_error_status() {
    let request = SearchRequest::new("unstable", "firefox");

    let err = interpret(500, "Internal Server Error", &request).unwrap_err();
    assert!(matches!(err, NixSearchError::MalformedResponse(_)));
}
