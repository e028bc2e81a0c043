use parking_lot::Mutex;
use std::fmt;
use tracing::debug;

/// Screens the listing forms hand control to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Listing index; where both create and edit land after saving or cancelling
    Listings,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Listings => "/properties",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Navigator that records every route it is sent to
#[derive(Default)]
pub struct History {
    entries: Mutex<Vec<Route>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Route> {
        self.entries.lock().last().cloned()
    }

    pub fn entries(&self) -> Vec<Route> {
        self.entries.lock().clone()
    }
}

impl Navigator for History {
    fn navigate(&self, route: Route) {
        debug!("Navigating to {}", route);
        self.entries.lock().push(route);
    }
}
