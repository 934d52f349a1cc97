//! Shared application state type.

use crate::bootstrap::AppContext;
use std::sync::Arc;

/// Application state shared across all handlers.
///
/// Read-only after startup; handlers never take locks.
pub type AppState = Arc<AppContext>;
