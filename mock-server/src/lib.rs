use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        FromRequest, FromRequestParts, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

/// Companies listed in `top_companies`.
const TOP_COMPANIES: usize = 5;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Student {
    pub id: u64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cgpa: Option<f64>,
    pub skills: Vec<String>,
    pub internships: Vec<String>,
    pub projects: Vec<serde_json::Value>,
    pub placed: bool,
    pub created: String,
}

#[derive(Deserialize)]
pub struct CreateStudent {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
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

#[derive(Deserialize)]
pub struct UpdateStudent {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub cgpa: Option<f64>,
    pub skills: Option<Vec<String>>,
    pub internships: Option<Vec<String>>,
    pub projects: Option<Vec<serde_json::Value>>,
    pub placed: Option<bool>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Applied,
    Interview,
    Offered,
    Joined,
    Rejected,
}

impl Status {
    /// Statuses that count as an outcome in the stats.
    fn is_offer(self) -> bool {
        matches!(self, Status::Offered | Status::Joined)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Placement {
    pub id: u64,
    pub student_id: u64,
    pub company: String,
    pub role: String,
    pub package: i64,
    pub status: Status,
    pub placed_date: String,
}

#[derive(Deserialize)]
pub struct CreatePlacement {
    pub student_id: u64,
    pub company: String,
    pub role: String,
    pub package: i64,
    pub status: Status,
}

#[derive(Deserialize)]
pub struct UpdateStatus {
    pub status: Status,
}

#[derive(Debug, Default, Deserialize)]
pub struct StudentParams {
    pub search: Option<String>,
    pub min_cgpa: Option<f64>,
    pub skill: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PlacementParams {
    pub company: Option<String>,
    pub status: Option<Status>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CompanyStat {
    pub name: String,
    pub count: u64,
    pub avg_package: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Stats {
    pub total_students: u64,
    pub placed_count: u64,
    pub placement_rate: f64,
    pub avg_cgpa: f64,
    pub avg_package: f64,
    pub top_companies: Vec<CompanyStat>,
    pub skill_demand: BTreeMap<String, u64>,
}

/// `{detail}` error body with its status code.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    fn not_found(what: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            detail: format!("{what} not found"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({ "detail": self.detail }))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

// Extractors whose rejections answer with the `{detail}` body.

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
struct AppJson<T>(T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
struct AppPath<T>(T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
struct AppQuery<T>(T);

#[derive(Debug, Default)]
pub struct Store {
    students: BTreeMap<u64, Student>,
    placements: BTreeMap<u64, Placement>,
    next_student_id: u64,
    next_placement_id: u64,
}

impl Store {
    pub fn insert_student(&mut self, input: CreateStudent) -> u64 {
        self.next_student_id += 1;
        let id = self.next_student_id;
        let student = Student {
            id,
            name: input.name,
            email: input.email,
            phone: input.phone,
            cgpa: input.cgpa,
            skills: input.skills,
            internships: input.internships,
            projects: input.projects,
            placed: input.placed,
            created: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        };
        self.students.insert(id, student);
        id
    }

    pub fn insert_placement(&mut self, input: CreatePlacement) -> Result<Placement, ApiError> {
        if !self.students.contains_key(&input.student_id) {
            return Err(ApiError::not_found("Student"));
        }
        self.next_placement_id += 1;
        let placement = Placement {
            id: self.next_placement_id,
            student_id: input.student_id,
            company: input.company,
            role: input.role,
            package: input.package,
            status: input.status,
            placed_date: Utc::now().date_naive().to_string(),
        };
        self.placements.insert(placement.id, placement.clone());
        Ok(placement)
    }

    pub fn stats(&self) -> Stats {
        let total_students = self.students.len() as u64;
        let placed_count = self.students.values().filter(|s| s.placed).count() as u64;
        let placement_rate = if total_students == 0 {
            0.0
        } else {
            round2(placed_count as f64 / total_students as f64 * 100.0)
        };

        let cgpas: Vec<f64> = self.students.values().filter_map(|s| s.cgpa).collect();
        let offers: Vec<&Placement> = self.placements.values().filter(|p| p.status.is_offer()).collect();

        let mut by_company: HashMap<&str, Vec<i64>> = HashMap::new();
        for placement in &offers {
            by_company
                .entry(placement.company.as_str())
                .or_default()
                .push(placement.package);
        }
        let mut top_companies: Vec<CompanyStat> = by_company
            .into_iter()
            .map(|(name, packages)| CompanyStat {
                name: name.to_string(),
                count: packages.len() as u64,
                avg_package: round2(mean(packages.iter().map(|p| *p as f64))),
            })
            .collect();
        top_companies.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
        top_companies.truncate(TOP_COMPANIES);

        let mut skill_demand = BTreeMap::new();
        for student in self.students.values() {
            for skill in &student.skills {
                *skill_demand.entry(skill.clone()).or_insert(0) += 1;
            }
        }

        Stats {
            total_students,
            placed_count,
            placement_rate,
            avg_cgpa: round2(mean(cgpas.into_iter())),
            avg_package: round2(mean(offers.iter().map(|p| p.package as f64))),
            top_companies,
            skill_demand,
        }
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0u64), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with(Store::default())
}

pub fn app_with(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/students", get(list_students).post(create_student))
        .route(
            "/students/{id}",
            get(get_student).put(update_student).delete(delete_student),
        )
        .route("/students/{id}/placements", get(list_student_placements))
        .route("/placements", get(list_placements).post(create_placement))
        .route("/placements/{id}", axum::routing::patch(update_placement_status))
        .route("/stats", get(get_stats))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_students(
    State(db): State<Db>,
    AppQuery(params): AppQuery<StudentParams>,
) -> Json<Vec<Student>> {
    let store = db.read().await;
    let search = params.search.unwrap_or_default().to_lowercase();
    let skill = params.skill.unwrap_or_default().to_lowercase();
    let min_cgpa = params.min_cgpa.unwrap_or(0.0);

    let students = store
        .students
        .values()
        .filter(|s| {
            search.is_empty()
                || s.name.to_lowercase().contains(&search)
                || s.email.to_lowercase().contains(&search)
                || s.skills.iter().any(|k| k.to_lowercase().contains(&search))
        })
        .filter(|s| s.cgpa.unwrap_or(0.0) >= min_cgpa)
        .filter(|s| skill.is_empty() || s.skills.iter().any(|k| k.to_lowercase() == skill))
        .skip(params.offset.unwrap_or(0))
        .take(params.limit.unwrap_or(usize::MAX))
        .cloned()
        .collect();
    Json(students)
}

async fn create_student(
    State(db): State<Db>,
    AppJson(input): AppJson<CreateStudent>,
) -> (StatusCode, Json<serde_json::Value>) {
    let id = db.write().await.insert_student(input);
    (StatusCode::CREATED, Json(serde_json::json!({ "id": id })))
}

async fn get_student(
    State(db): State<Db>,
    AppPath(id): AppPath<u64>,
) -> Result<Json<Student>, ApiError> {
    let store = db.read().await;
    store
        .students
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Student"))
}

async fn update_student(
    State(db): State<Db>,
    AppPath(id): AppPath<u64>,
    AppJson(input): AppJson<UpdateStudent>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut store = db.write().await;
    let student = store
        .students
        .get_mut(&id)
        .ok_or_else(|| ApiError::not_found("Student"))?;
    if let Some(name) = input.name {
        student.name = name;
    }
    if let Some(email) = input.email {
        student.email = email;
    }
    if let Some(phone) = input.phone {
        student.phone = Some(phone);
    }
    if let Some(cgpa) = input.cgpa {
        student.cgpa = Some(cgpa);
    }
    if let Some(skills) = input.skills {
        student.skills = skills;
    }
    if let Some(internships) = input.internships {
        student.internships = internships;
    }
    if let Some(projects) = input.projects {
        student.projects = projects;
    }
    if let Some(placed) = input.placed {
        student.placed = placed;
    }
    Ok(Json(serde_json::json!({ "status": "updated" })))
}

async fn delete_student(
    State(db): State<Db>,
    AppPath(id): AppPath<u64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut store = db.write().await;
    store
        .students
        .remove(&id)
        .map(|_| Json(serde_json::json!({ "status": "deleted" })))
        .ok_or_else(|| ApiError::not_found("Student"))
}

async fn list_student_placements(
    State(db): State<Db>,
    AppPath(id): AppPath<u64>,
) -> Result<Json<Vec<Placement>>, ApiError> {
    let store = db.read().await;
    if !store.students.contains_key(&id) {
        return Err(ApiError::not_found("Student"));
    }
    let placements = store
        .placements
        .values()
        .filter(|p| p.student_id == id)
        .cloned()
        .collect();
    Ok(Json(placements))
}

async fn list_placements(
    State(db): State<Db>,
    AppQuery(params): AppQuery<PlacementParams>,
) -> Json<Vec<Placement>> {
    let store = db.read().await;
    let placements = store
        .placements
        .values()
        .filter(|p| {
            params
                .company
                .as_deref()
                .map_or(true, |c| p.company.eq_ignore_ascii_case(c))
        })
        .filter(|p| params.status.map_or(true, |s| p.status == s))
        .cloned()
        .collect();
    Json(placements)
}

async fn create_placement(
    State(db): State<Db>,
    AppJson(input): AppJson<CreatePlacement>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let placement = db.write().await.insert_placement(input)?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "id": placement.id, "placed_date": placement.placed_date })),
    ))
}

async fn update_placement_status(
    State(db): State<Db>,
    AppPath(id): AppPath<u64>,
    AppJson(input): AppJson<UpdateStatus>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut store = db.write().await;
    let placement = store
        .placements
        .get_mut(&id)
        .ok_or_else(|| ApiError::not_found("Placement"))?;
    placement.status = input.status;
    Ok(Json(serde_json::json!({ "status": "updated" })))
}

async fn get_stats(State(db): State<Db>) -> Json<Stats> {
    Json(db.read().await.stats())
}
