//! Stateless HTTP request builder and response parser for the placement API.
//!
//! # Design
//! `PlacementClient` holds only its configuration and carries no mutable
//! state between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The caller (or `ApiClient` with a `Transport`) executes the
//! round-trip in between.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, RequestOptions};
use crate::types::{
    Created, NewPlacement, NewStudent, Placement, PlacementCreated, PlacementQuery, PlacementStatus,
    Stats, StatusAck, StatusUpdate, Student, StudentQuery, StudentUpdate,
};

const CONTENT_TYPE: &str = "Content-Type";
const APPLICATION_JSON: &str = "application/json";

/// Synchronous, stateless client for the placement API.
#[derive(Debug, Clone)]
pub struct PlacementClient {
    config: ClientConfig,
}

impl PlacementClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_config(ClientConfig::new(base_url))
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Client configured from `PLACEMENT_API_URL`.
    pub fn from_env() -> Self {
        Self::with_config(ClientConfig::from_env())
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Build a request for `endpoint` (path plus optional query string).
    ///
    /// Every request carries `Content-Type: application/json`; configured
    /// headers are merged on top and win on a name clash.
    pub fn request(&self, method: HttpMethod, endpoint: &str, body: Option<String>) -> HttpRequest {
        self.request_with(method, endpoint, RequestOptions { body, headers: Vec::new() })
    }

    /// Like [`request`](Self::request), with per-call headers merged last.
    ///
    /// Precedence on a name clash: per-call, then configured, then the
    /// JSON content type default.
    pub fn request_with(
        &self,
        method: HttpMethod,
        endpoint: &str,
        options: RequestOptions,
    ) -> HttpRequest {
        let mut req = HttpRequest {
            method,
            path: format!("{}{endpoint}", self.config.base_url),
            headers: vec![(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string())],
            body: options.body,
        };
        for (name, value) in self.config.headers.iter().chain(&options.headers) {
            req.set_header(name, value);
        }
        debug!(method = %req.method, path = %req.path, "built request");
        req
    }

    fn json_request<B: Serialize>(
        &self,
        method: HttpMethod,
        endpoint: &str,
        body: &B,
    ) -> ApiResult<HttpRequest> {
        let body = serde_json::to_string(body).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(self.request(method, endpoint, Some(body)))
    }

    // --- students ---

    pub fn build_list_students(&self, query: &StudentQuery) -> HttpRequest {
        let mut params = QueryString::default();
        params.push_str("search", query.search.as_deref());
        params.push_f64("min_cgpa", query.min_cgpa);
        params.push_str("skill", query.skill.as_deref());
        params.push_u32("limit", query.limit);
        params.push_u32("offset", query.offset);
        self.request(HttpMethod::Get, &params.append_to("/students"), None)
    }

    pub fn build_get_student(&self, id: u64) -> HttpRequest {
        self.request(HttpMethod::Get, &format!("/students/{id}"), None)
    }

    pub fn build_create_student(&self, input: &NewStudent) -> ApiResult<HttpRequest> {
        self.json_request(HttpMethod::Post, "/students", input)
    }

    pub fn build_update_student(&self, id: u64, input: &StudentUpdate) -> ApiResult<HttpRequest> {
        self.json_request(HttpMethod::Put, &format!("/students/{id}"), input)
    }

    pub fn build_delete_student(&self, id: u64) -> HttpRequest {
        self.request(HttpMethod::Delete, &format!("/students/{id}"), None)
    }

    pub fn parse_list_students(&self, response: HttpResponse) -> ApiResult<Vec<Student>> {
        parse_json(response)
    }

    pub fn parse_get_student(&self, response: HttpResponse) -> ApiResult<Student> {
        parse_json(response)
    }

    pub fn parse_create_student(&self, response: HttpResponse) -> ApiResult<Created> {
        parse_json(response)
    }

    pub fn parse_update_student(&self, response: HttpResponse) -> ApiResult<StatusAck> {
        parse_json(response)
    }

    pub fn parse_delete_student(&self, response: HttpResponse) -> ApiResult<StatusAck> {
        parse_json(response)
    }

    // --- placements ---

    pub fn build_list_placements(&self, query: &PlacementQuery) -> HttpRequest {
        let mut params = QueryString::default();
        params.push_str("company", query.company.as_deref());
        params.push_str("status", query.status.map(PlacementStatus::as_str));
        self.request(HttpMethod::Get, &params.append_to("/placements"), None)
    }

    pub fn build_list_student_placements(&self, student_id: u64) -> HttpRequest {
        self.request(HttpMethod::Get, &format!("/students/{student_id}/placements"), None)
    }

    pub fn build_create_placement(&self, input: &NewPlacement) -> ApiResult<HttpRequest> {
        self.json_request(HttpMethod::Post, "/placements", input)
    }

    pub fn build_update_placement_status(
        &self,
        id: u64,
        status: PlacementStatus,
    ) -> ApiResult<HttpRequest> {
        self.json_request(HttpMethod::Patch, &format!("/placements/{id}"), &StatusUpdate { status })
    }

    pub fn parse_list_placements(&self, response: HttpResponse) -> ApiResult<Vec<Placement>> {
        parse_json(response)
    }

    pub fn parse_list_student_placements(&self, response: HttpResponse) -> ApiResult<Vec<Placement>> {
        parse_json(response)
    }

    pub fn parse_create_placement(&self, response: HttpResponse) -> ApiResult<PlacementCreated> {
        parse_json(response)
    }

    pub fn parse_update_placement_status(&self, response: HttpResponse) -> ApiResult<StatusAck> {
        parse_json(response)
    }

    // --- stats ---

    pub fn build_get_stats(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/stats", None)
    }

    pub fn parse_get_stats(&self, response: HttpResponse) -> ApiResult<Stats> {
        parse_json(response)
    }
}

/// Check the status, then decode the body as `T`.
pub fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> ApiResult<T> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Map a non-2xx response to `ApiError::Http`.
///
/// The message is the body's `detail` when there is one, `HTTP <status>`
/// otherwise (including when the body is not JSON at all).
pub fn check_status(response: &HttpResponse) -> ApiResult<()> {
    if response.is_success() {
        return Ok(());
    }
    let detail = serde_json::from_str::<serde_json::Value>(&response.body)
        .ok()
        .and_then(|body| body.get("detail").cloned())
        .and_then(|detail| match detail {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) if s.is_empty() => None,
            serde_json::Value::String(s) => Some(s),
            other => Some(other.to_string()),
        });
    Err(ApiError::Http {
        status: response.status,
        message: detail.unwrap_or_else(|| format!("HTTP {}", response.status)),
    })
}

/// Query parameters that are only emitted when set and truthy.
#[derive(Debug, Default)]
struct QueryString {
    pairs: Vec<(&'static str, String)>,
}

impl QueryString {
    fn push_str(&mut self, key: &'static str, value: Option<&str>) {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.pairs.push((key, urlencoding::encode(value).into_owned()));
        }
    }

    fn push_f64(&mut self, key: &'static str, value: Option<f64>) {
        if let Some(value) = value.filter(|v| *v != 0.0 && !v.is_nan()) {
            self.pairs.push((key, value.to_string()));
        }
    }

    fn push_u32(&mut self, key: &'static str, value: Option<u32>) {
        if let Some(value) = value.filter(|v| *v != 0) {
            self.pairs.push((key, value.to_string()));
        }
    }

    fn append_to(&self, path: &str) -> String {
        if self.pairs.is_empty() {
            return path.to_string();
        }
        let query = self
            .pairs
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&");
        format!("{path}?{query}")
    }
}
