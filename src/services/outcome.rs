//! Terminal result of every catalog workflow

use serde::Serialize;

/// How a request ends when it does not fail.
///
/// Store failures and missing primary records travel on the `Err` side of
/// `AppResult`; everything else is exactly one of these.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "view", rename_all = "snake_case")]
pub enum Outcome<V> {
    /// Show the composed view model
    Render(V),
    /// Redisplay a submitted form with its errors
    Invalid(V),
    /// Redisplay a delete confirmation listing the blocking dependents
    Blocked(V),
    /// Send the client to another path
    Redirect(String),
}

impl<V> Outcome<V> {
    pub fn view(&self) -> Option<&V> {
        match self {
            Outcome::Render(v) | Outcome::Invalid(v) | Outcome::Blocked(v) => Some(v),
            Outcome::Redirect(_) => None,
        }
    }

    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Outcome::Redirect(to) => Some(to),
            _ => None,
        }
    }
}
