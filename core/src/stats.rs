//! Consistency checks on the aggregate snapshot and the admin overview.
//!
//! `placement_rate` is computed by the server. The client assumes it equals
//! `placed_count / total_students * 100` but never rewrites it; these checks
//! only report.

use std::collections::HashMap;

use crate::types::{Placement, PlacementStatus, Stats, Student};

/// Default tolerance, in percentage points, for `placement_rate_consistent`.
pub const RATE_TOLERANCE: f64 = 0.01;

/// Entries kept in `AdminOverview::recent_placements`.
pub const RECENT_PLACEMENTS: usize = 3;

impl Stats {
    /// Placement rate implied by the counts; 0 when there are no students.
    pub fn expected_placement_rate(&self) -> f64 {
        if self.total_students == 0 {
            return 0.0;
        }
        self.placed_count as f64 / self.total_students as f64 * 100.0
    }

    /// Whether the reported rate matches the counts within `tolerance`.
    pub fn placement_rate_consistent(&self, tolerance: f64) -> bool {
        (self.placement_rate - self.expected_placement_rate()).abs() <= tolerance
    }

    pub fn placed_within_total(&self) -> bool {
        self.placed_count <= self.total_students
    }
}

/// Headline figures of the admin page.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminOverview {
    pub total_students: u64,
    pub placed_count: u64,
    pub placement_rate: f64,
    pub avg_cgpa: f64,
    pub avg_package: f64,
    pub top_companies: Vec<String>,
    /// `(skill, demand)` sorted by demand, highest first, then by name.
    pub top_skills: Vec<(String, u64)>,
    /// Newest offers first, at most `RECENT_PLACEMENTS`.
    pub recent_placements: Vec<RecentPlacement>,
}

/// One offered or joined placement, joined with its student's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentPlacement {
    pub student_name: String,
    pub company: String,
    pub package: i64,
    pub placed_date: String,
}

/// Offered and joined placements, newest `placed_date` first (ties: higher
/// id first), capped at `limit`. A student missing from `students` shows as
/// `Student #<id>`.
pub fn recent_placements(
    placements: &[Placement],
    students: &[Student],
    limit: usize,
) -> Vec<RecentPlacement> {
    let names: HashMap<u64, &str> = students.iter().map(|s| (s.id, s.name.as_str())).collect();

    let mut offers: Vec<&Placement> = placements
        .iter()
        .filter(|p| matches!(p.status, PlacementStatus::Offered | PlacementStatus::Joined))
        .collect();
    // ISO-8601 dates order lexicographically.
    offers.sort_by(|a, b| b.placed_date.cmp(&a.placed_date).then_with(|| b.id.cmp(&a.id)));

    offers
        .into_iter()
        .take(limit)
        .map(|p| RecentPlacement {
            student_name: names
                .get(&p.student_id)
                .map_or_else(|| format!("Student #{}", p.student_id), |name| name.to_string()),
            company: p.company.clone(),
            package: p.package,
            placed_date: p.placed_date.clone(),
        })
        .collect()
}

impl AdminOverview {
    pub fn from_stats(stats: &Stats) -> Self {
        let mut top_skills: Vec<(String, u64)> = stats
            .skill_demand
            .iter()
            .map(|(skill, count)| (skill.clone(), *count))
            .collect();
        top_skills.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        Self {
            total_students: stats.total_students,
            placed_count: stats.placed_count,
            placement_rate: stats.placement_rate,
            avg_cgpa: stats.avg_cgpa,
            avg_package: stats.avg_package,
            top_companies: stats.top_companies.iter().map(|c| c.name.clone()).collect(),
            top_skills,
            recent_placements: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_recent_placements(mut self, placements: &[Placement], students: &[Student]) -> Self {
        self.recent_placements = recent_placements(placements, students, RECENT_PLACEMENTS);
        self
    }

    /// "3 out of 10"
    pub fn placed_label(&self) -> String {
        format!("{} out of {}", self.placed_count, self.total_students)
    }
}
