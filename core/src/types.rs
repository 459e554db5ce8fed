//! Domain DTOs for the placement API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! integration tests catch drift between the two crates. Input shapes
//! (`NewStudent`, `NewPlacement`) omit the server-assigned fields so a caller
//! cannot send an id or timestamp. No value-level validation happens here: a
//! payload that decodes is accepted as-is.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A student record returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Student {
    pub id: u64,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cgpa: Option<f64>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub internships: Vec<String>,
    #[serde(default)]
    pub projects: Vec<serde_json::Value>,
    pub placed: bool,
    pub created: String,
}

/// Request payload for creating a student.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cgpa: Option<f64>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub internships: Vec<String>,
    #[serde(default)]
    pub projects: Vec<serde_json::Value>,
    #[serde(default)]
    pub placed: bool,
}

/// Partial update for a student. Only the fields present in the JSON are
/// applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StudentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cgpa: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internships: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placed: Option<bool>,
}

/// Hiring pipeline status of a placement. Transitions are not validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlacementStatus {
    Applied,
    Interview,
    Offered,
    Joined,
    Rejected,
}

impl PlacementStatus {
    pub const ALL: [PlacementStatus; 5] = [
        PlacementStatus::Applied,
        PlacementStatus::Interview,
        PlacementStatus::Offered,
        PlacementStatus::Joined,
        PlacementStatus::Rejected,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PlacementStatus::Applied => "applied",
            PlacementStatus::Interview => "interview",
            PlacementStatus::Offered => "offered",
            PlacementStatus::Joined => "joined",
            PlacementStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for PlacementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for PlacementStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlacementStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown placement status: {s}"))
    }
}

/// A placement record returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Placement {
    pub id: u64,
    pub student_id: u64,
    pub company: String,
    pub role: String,
    pub package: i64,
    pub status: PlacementStatus,
    pub placed_date: String,
}

/// Request payload for creating a placement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewPlacement {
    pub student_id: u64,
    pub company: String,
    pub role: String,
    pub package: i64,
    pub status: PlacementStatus,
}

/// Body of `PATCH /placements/{id}`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusUpdate {
    pub status: PlacementStatus,
}

/// Per-company line of the stats snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompanyStat {
    pub name: String,
    pub count: u64,
    pub avg_package: f64,
}

/// Aggregate snapshot served by `GET /stats`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Stats {
    pub total_students: u64,
    pub placed_count: u64,
    pub placement_rate: f64,
    pub avg_cgpa: f64,
    pub avg_package: f64,
    #[serde(default)]
    pub top_companies: Vec<CompanyStat>,
    #[serde(default)]
    pub skill_demand: BTreeMap<String, u64>,
}

/// `{id}` acknowledgement of `POST /students`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Created {
    pub id: u64,
}

/// `{id, placed_date}` acknowledgement of `POST /placements`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlacementCreated {
    pub id: u64,
    pub placed_date: String,
}

/// `{status}` acknowledgement of updates and deletes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusAck {
    pub status: String,
}

/// Query filters for `GET /students`. Unset, empty and zero values are
/// left out of the query string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentQuery {
    pub search: Option<String>,
    pub min_cgpa: Option<f64>,
    pub skill: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// Query filters for `GET /placements`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlacementQuery {
    pub company: Option<String>,
    pub status: Option<PlacementStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&StatusUpdate {
            status: PlacementStatus::Interview,
        })
        .unwrap();
        assert_eq!(json, r#"{"status":"interview"}"#);
    }

    #[test]
    fn unknown_status_is_rejected() {
        let result: Result<PlacementStatus, _> = serde_json::from_str(r#""hired""#);
        assert!(result.is_err());
        assert!("hired".parse::<PlacementStatus>().is_err());
        assert_eq!("Offered".parse::<PlacementStatus>(), Ok(PlacementStatus::Offered));
    }

    #[test]
    fn student_optional_fields_may_be_absent() {
        let student: Student = serde_json::from_str(
            r#"{"id":4,"name":"Vikram Rao","email":"vikram.rao@example.com","skills":["C++"],"placed":false,"created":"2024-01-01T00:00:00"}"#,
        )
        .unwrap();
        assert_eq!(student.phone, None);
        assert_eq!(student.cgpa, None);
        assert!(student.internships.is_empty());
        assert!(student.projects.is_empty());
    }

    #[test]
    fn new_student_has_no_server_fields() {
        let input = NewStudent {
            name: "Riya Sharma".to_string(),
            email: "riya.sharma@example.com".to_string(),
            phone: None,
            cgpa: Some(9.3),
            skills: vec!["React".to_string()],
            internships: Vec::new(),
            projects: Vec::new(),
            placed: false,
        };
        let json = serde_json::to_value(&input).unwrap();
        assert!(json.get("id").is_none());
        assert!(json.get("created").is_none());
        assert!(json.get("phone").is_none());
    }

    #[test]
    fn student_update_serializes_only_present_fields() {
        let update = StudentUpdate {
            placed: Some(true),
            ..StudentUpdate::default()
        };
        assert_eq!(serde_json::to_string(&update).unwrap(), r#"{"placed":true}"#);
    }

    #[test]
    fn stats_decodes_skill_demand_map() {
        let stats: Stats = serde_json::from_str(
            r#"{"total_students":10,"placed_count":3,"placement_rate":30.0,"avg_cgpa":8.4,"avg_package":1200000.0,
                "top_companies":[{"name":"Google","count":2,"avg_package":4200000.0}],
                "skill_demand":{"Python":6,"React":4}}"#,
        )
        .unwrap();
        assert_eq!(stats.top_companies[0].name, "Google");
        assert_eq!(stats.skill_demand["Python"], 6);
    }
}
