//! Load state of a dashboard page.
//!
//! A page runs one fetch per load. A failure is logged and kept as a
//! `Failed` state carrying the error text; the only way out is a manual
//! `retry` that re-runs the same fetch.

use std::fmt::Display;

use tracing::warn;

/// Outcome of loading a page's data.
#[derive(Debug, Clone, PartialEq)]
pub enum PageState<T> {
    Loading,
    Loaded(T),
    Failed { message: String },
}

impl<T> PageState<T> {
    /// Run `fetch` once and capture its outcome.
    pub fn load<E, F>(page: &str, fetch: F) -> Self
    where
        E: Display,
        F: FnOnce() -> Result<T, E>,
    {
        match fetch() {
            Ok(data) => PageState::Loaded(data),
            Err(err) => {
                warn!(page, error = %err, "loading failed");
                PageState::Failed {
                    message: err.to_string(),
                }
            }
        }
    }

    /// Re-run `fetch` after a failure. A loaded page is left as it is.
    #[must_use]
    pub fn retry<E, F>(self, page: &str, fetch: F) -> Self
    where
        E: Display,
        F: FnOnce() -> Result<T, E>,
    {
        match self {
            PageState::Loaded(data) => PageState::Loaded(data),
            PageState::Loading | PageState::Failed { .. } => Self::load(page, fetch),
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            PageState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            PageState::Failed { message } => Some(message),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, PageState::Failed { .. })
    }
}
