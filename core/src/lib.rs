//! Client core for the student placement service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern); `transport` supplies a
//! blocking `ureq` executor for hosts that just want answers. On top of the
//! client sit the pure pieces of the dashboard pages: list filtering and
//! pagination, page load state, and stats checks.
//!
//! # Design
//! - `PlacementClient` is stateless; it holds only its configuration.
//! - Each operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit and every failure stage has its own `ApiError`.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod listing;
pub mod page;
pub mod stats;
pub mod transport;
pub mod types;

pub use client::PlacementClient;
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult};
pub use http::{HttpMethod, HttpRequest, HttpResponse, RequestOptions};
pub use listing::{
    paginate, Category, ListState, PageView, PlacementFilter, Searchable, StudentFilter,
    STUDENTS_PER_PAGE,
};
pub use page::PageState;
pub use stats::{recent_placements, AdminOverview, RecentPlacement};
pub use transport::{ApiClient, Transport, UreqTransport};
pub use types::{
    CompanyStat, Created, NewPlacement, NewStudent, Placement, PlacementCreated, PlacementQuery,
    PlacementStatus, Stats, StatusAck, Student, StudentQuery, StudentUpdate,
};
