use serde::{Deserialize, Serialize};

use crate::api::query::SearchRequest;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Package {
    #[serde(rename = "package_pname")]
    pub name: String,
    #[serde(rename = "package_attr_name")]
    pub attr_name: String,
    #[serde(rename = "package_attr_set", default)]
    pub attr_set: String,
    #[serde(rename = "package_outputs", default)]
    pub outputs: Vec<String>,
    #[serde(
        rename = "package_default_output",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_output: Option<String>,
    #[serde(
        rename = "package_description",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(rename = "package_programs", default)]
    pub programs: Vec<String>,
    #[serde(rename = "package_homepage", default)]
    pub homepage: Vec<String>,
    #[serde(rename = "package_pversion")]
    pub version: String,
    #[serde(rename = "package_platforms", default)]
    pub platforms: Vec<String>,
    #[serde(rename = "package_position", default)]
    pub position: String,
    #[serde(rename = "package_license", default)]
    pub licenses: Vec<License>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct License {
    #[serde(rename = "fullName", default)]
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hit {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_source")]
    pub package: Package,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Hits {
    #[serde(default)]
    pub hits: Vec<Hit>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(rename = "type")]
    pub kind: String,
    pub reason: String,
    // Literal dotted keys in the payload, not nested objects.
    #[serde(rename = "resource.type", skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(rename = "resource.id", skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
}

/// Response envelope shared by success and failure payloads. `error` and
/// `status` are set on failures, `hits` on success.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default)]
    pub hits: Hits,
}

/// A completed search: the originating request plus the packages the
/// backend returned, in backend relevance order.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub request: SearchRequest,
    pub packages: Vec<Package>,
}
