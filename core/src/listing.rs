//! Search, filter and pagination for listing pages.
//!
//! # Design
//! `ListState` is an immutable value: every transition returns a new state,
//! and changing the search text or the filter always lands on page 1.
//! `paginate` is a pure function of the collection and the state, so a page
//! is fully determined by `(items, state, page_size)`. Items keep their
//! original order; nothing is re-sorted.

use std::fmt;
use std::str::FromStr;

use crate::types::{Placement, PlacementStatus, Student};

/// Page size of the students listing.
pub const STUDENTS_PER_PAGE: usize = 5;

/// Minimum CGPA of the "top performers" filter.
pub const TOP_PERFORMER_CGPA: f64 = 8.5;

/// An entity that free-text search can match against.
pub trait Searchable {
    /// Fields the search text is matched against.
    fn search_fields(&self) -> Vec<&str>;

    /// Case-insensitive substring match on any field. Empty search matches.
    fn matches_search(&self, search: &str) -> bool {
        if search.is_empty() {
            return true;
        }
        let needle = search.to_lowercase();
        self.search_fields()
            .into_iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// A closed filter category over `T`.
pub trait Category<T> {
    fn admits(&self, item: &T) -> bool;
}

impl Searchable for Student {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.email.as_str()];
        fields.extend(self.skills.iter().map(String::as_str));
        fields
    }
}

impl Searchable for Placement {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.company.as_str(), self.role.as_str(), self.status.as_str()]
    }
}

/// Filter chips of the students page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StudentFilter {
    #[default]
    All,
    Placed,
    Available,
    /// CGPA at or above `TOP_PERFORMER_CGPA`; a missing CGPA counts as 0.
    TopPerformers,
}

impl StudentFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            StudentFilter::All => "all",
            StudentFilter::Placed => "placed",
            StudentFilter::Available => "available",
            StudentFilter::TopPerformers => "top",
        }
    }
}

impl Category<Student> for StudentFilter {
    fn admits(&self, student: &Student) -> bool {
        match self {
            StudentFilter::All => true,
            StudentFilter::Placed => student.placed,
            StudentFilter::Available => !student.placed,
            StudentFilter::TopPerformers => student.cgpa.unwrap_or(0.0) >= TOP_PERFORMER_CGPA,
        }
    }
}

impl fmt::Display for StudentFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for StudentFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(StudentFilter::All),
            "placed" => Ok(StudentFilter::Placed),
            "available" => Ok(StudentFilter::Available),
            "top" | "top-performers" => Ok(StudentFilter::TopPerformers),
            other => Err(format!("unknown student filter: {other}")),
        }
    }
}

/// Status filter of the placements page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlacementFilter {
    #[default]
    All,
    Status(PlacementStatus),
}

impl Category<Placement> for PlacementFilter {
    fn admits(&self, placement: &Placement) -> bool {
        match self {
            PlacementFilter::All => true,
            PlacementFilter::Status(status) => placement.status == *status,
        }
    }
}

/// Search text, filter category and 1-based page of a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState<F> {
    search: String,
    filter: F,
    page: usize,
}

impl<F: Default> Default for ListState<F> {
    fn default() -> Self {
        Self {
            search: String::new(),
            filter: F::default(),
            page: 1,
        }
    }
}

impl<F: Copy> ListState<F> {
    pub fn new(search: impl Into<String>, filter: F) -> Self {
        Self {
            search: search.into(),
            filter,
            page: 1,
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn filter(&self) -> F {
        self.filter
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// New search text; back to page 1.
    #[must_use]
    pub fn with_search(self, search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            page: 1,
            ..self
        }
    }

    /// New filter category; back to page 1.
    #[must_use]
    pub fn with_filter(self, filter: F) -> Self {
        Self {
            filter,
            page: 1,
            ..self
        }
    }

    /// Advance one page unless already on the last one.
    #[must_use]
    pub fn next_page(self, total_pages: usize) -> Self {
        if self.page < total_pages {
            Self {
                page: self.page + 1,
                ..self
            }
        } else {
            self
        }
    }

    /// Go back one page unless already on page 1.
    #[must_use]
    pub fn prev_page(self) -> Self {
        if self.page > 1 {
            Self {
                page: self.page - 1,
                ..self
            }
        } else {
            self
        }
    }

    /// Jump to `page` if it lies within `1..=total_pages`; otherwise unchanged.
    #[must_use]
    pub fn go_to_page(self, page: usize, total_pages: usize) -> Self {
        if (1..=total_pages).contains(&page) {
            Self { page, ..self }
        } else {
            self
        }
    }
}

/// The visible slice of a listing and the navigation it allows.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView<'a, T> {
    pub items: Vec<&'a T>,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub filtered_count: usize,
}

impl<T> PageView<'_, T> {
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// 1-based position of the first visible item, 0 when the page is empty.
    pub fn first_index(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.page - 1).saturating_mul(self.page_size) + 1
        }
    }

    /// 1-based position of the last visible item, 0 when the page is empty.
    pub fn last_index(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            self.first_index() + self.items.len() - 1
        }
    }
}

/// Items that satisfy both the search text and the filter, in original order.
pub fn filter_items<'a, T, F>(items: &'a [T], state: &ListState<F>) -> Vec<&'a T>
where
    T: Searchable,
    F: Category<T>,
{
    items
        .iter()
        .filter(|item| item.matches_search(&state.search) && state.filter.admits(item))
        .collect()
}

/// Filter, then cut out the page selected by `state`.
pub fn paginate<'a, T, F>(items: &'a [T], state: &ListState<F>, page_size: usize) -> PageView<'a, T>
where
    T: Searchable,
    F: Category<T>,
{
    let page_size = page_size.max(1);
    let filtered = filter_items(items, state);
    let filtered_count = filtered.len();
    let total_pages = filtered_count.div_ceil(page_size);
    let page = state.page.max(1);

    let start = (page - 1).saturating_mul(page_size).min(filtered_count);
    let end = page.saturating_mul(page_size).min(filtered_count);
    let visible = filtered[start..end].to_vec();

    PageView {
        items: visible,
        page,
        page_size,
        total_pages,
        filtered_count,
    }
}
