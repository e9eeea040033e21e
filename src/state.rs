//! Shared application state for request handlers.

use std::sync::Arc;

use crate::store::VisitCounter;

/// Shared application state, cloneable across concurrent handlers.
///
/// Holds the visit counter handle, constructed once at bootstrap and never
/// reassigned afterwards.
#[derive(Clone)]
pub struct AppState {
    pub counter: Arc<dyn VisitCounter>,
}

impl AppState {
    /// Creates a new application state around the given counter.
    pub fn new(counter: impl VisitCounter + 'static) -> Self {
        Self {
            counter: Arc::new(counter),
        }
    }
}
