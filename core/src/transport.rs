//! Executing requests built by `PlacementClient`.
//!
//! # Design
//! `Transport` is the seam between the deterministic core and the network.
//! `UreqTransport` is the blocking default; tests substitute canned
//! responses. One attempt per call: no retry, backoff or timeout.

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::client::{parse_json, PlacementClient};
use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, RequestOptions};
use crate::types::{
    Created, NewPlacement, NewStudent, Placement, PlacementCreated, PlacementQuery, PlacementStatus,
    Stats, StatusAck, Student, StudentQuery, StudentUpdate,
};

/// Executes an `HttpRequest` and returns the response as data.
///
/// Implementations must return non-2xx responses as `Ok`; status
/// interpretation belongs to the client.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> ApiResult<HttpResponse>;
}

/// Blocking transport backed by `ureq`.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl std::fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, req: &HttpRequest) -> ApiResult<HttpResponse> {
        let body = req.body.as_deref().unwrap_or("");
        let result = match req.method {
            HttpMethod::Get => with_headers(self.agent.get(&req.path), req).call(),
            HttpMethod::Delete => with_headers(self.agent.delete(&req.path), req).call(),
            HttpMethod::Post => with_headers(self.agent.post(&req.path), req).send(body.as_bytes()),
            HttpMethod::Put => with_headers(self.agent.put(&req.path), req).send(body.as_bytes()),
            HttpMethod::Patch => with_headers(self.agent.patch(&req.path), req).send(body.as_bytes()),
        };
        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        debug!(method = %req.method, path = %req.path, status, "response received");

        Ok(HttpResponse { status, headers, body })
    }
}

fn with_headers<B>(mut builder: ureq::RequestBuilder<B>, req: &HttpRequest) -> ureq::RequestBuilder<B> {
    for (name, value) in &req.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

/// `PlacementClient` paired with a `Transport`: one call per operation.
#[derive(Debug, Clone)]
pub struct ApiClient<T = UreqTransport> {
    client: PlacementClient,
    transport: T,
}

impl ApiClient<UreqTransport> {
    /// Client configured from `PLACEMENT_API_URL`, over `ureq`.
    pub fn from_env() -> Self {
        Self::new(PlacementClient::from_env(), UreqTransport::new())
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self::new(PlacementClient::with_config(config), UreqTransport::new())
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(client: PlacementClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &PlacementClient {
        &self.client
    }

    fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        self.transport.execute(&request)
    }

    /// Raw call to `endpoint` with per-call options, decoding a 2xx body
    /// as `R`. Per-call headers win over configured ones.
    pub fn fetch<R: DeserializeOwned>(
        &self,
        method: HttpMethod,
        endpoint: &str,
        options: RequestOptions,
    ) -> ApiResult<R> {
        let resp = self.send(self.client.request_with(method, endpoint, options))?;
        parse_json(resp)
    }

    pub fn list_students(&self, query: &StudentQuery) -> ApiResult<Vec<Student>> {
        let resp = self.send(self.client.build_list_students(query))?;
        self.client.parse_list_students(resp)
    }

    pub fn get_student(&self, id: u64) -> ApiResult<Student> {
        let resp = self.send(self.client.build_get_student(id))?;
        self.client.parse_get_student(resp)
    }

    pub fn create_student(&self, input: &NewStudent) -> ApiResult<Created> {
        let resp = self.send(self.client.build_create_student(input)?)?;
        self.client.parse_create_student(resp)
    }

    pub fn update_student(&self, id: u64, input: &StudentUpdate) -> ApiResult<StatusAck> {
        let resp = self.send(self.client.build_update_student(id, input)?)?;
        self.client.parse_update_student(resp)
    }

    pub fn delete_student(&self, id: u64) -> ApiResult<StatusAck> {
        let resp = self.send(self.client.build_delete_student(id))?;
        self.client.parse_delete_student(resp)
    }

    pub fn list_placements(&self, query: &PlacementQuery) -> ApiResult<Vec<Placement>> {
        let resp = self.send(self.client.build_list_placements(query))?;
        self.client.parse_list_placements(resp)
    }

    pub fn list_student_placements(&self, student_id: u64) -> ApiResult<Vec<Placement>> {
        let resp = self.send(self.client.build_list_student_placements(student_id))?;
        self.client.parse_list_student_placements(resp)
    }

    pub fn create_placement(&self, input: &NewPlacement) -> ApiResult<PlacementCreated> {
        let resp = self.send(self.client.build_create_placement(input)?)?;
        self.client.parse_create_placement(resp)
    }

    pub fn update_placement_status(&self, id: u64, status: PlacementStatus) -> ApiResult<StatusAck> {
        let resp = self.send(self.client.build_update_placement_status(id, status)?)?;
        self.client.parse_update_placement_status(resp)
    }

    pub fn get_stats(&self) -> ApiResult<Stats> {
        let resp = self.send(self.client.build_get_stats())?;
        self.client.parse_get_stats(resp)
    }
}
