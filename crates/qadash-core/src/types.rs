//! Shared explorer types

use std::fmt;

use serde::Serialize;

use crate::schema::ViewKind;

/// Lifecycle of one explorer's data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadPhase {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A request is in flight. Previously loaded records stay visible.
    Loading,
    /// The last request succeeded.
    Ready,
    /// The last request failed. Previously loaded records are retained.
    Error,
}

impl LoadPhase {
    pub fn is_loading(self) -> bool {
        self == LoadPhase::Loading
    }
}

/// Identifies one load attempt of one explorer.
///
/// Tokens increase monotonically. Only a completion carrying the most
/// recently issued token is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(self) -> u64 {
        self.0
    }

    /// The token following this one.
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which view is active and which parent entity (if any) scopes it.
///
/// Passed explicitly when navigating between views, e.g. from a run to
/// that run's results.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewRoute {
    pub view: ViewKind,
    pub scope: Option<String>,
}

impl ViewRoute {
    pub fn new(view: ViewKind) -> Self {
        Self { view, scope: None }
    }

    pub fn scoped(view: ViewKind, scope: impl Into<String>) -> Self {
        Self {
            view,
            scope: Some(scope.into()),
        }
    }
}

impl fmt::Display for ViewRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.scope {
            Some(scope) => write!(f, "{}/{}", self.view, scope),
            None => write!(f, "{}", self.view),
        }
    }
}
