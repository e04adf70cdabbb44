//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on the driving ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{Engagement, ProjectAuthoring, ProjectModeration};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub authoring: Arc<dyn ProjectAuthoring>,
    pub moderation: Arc<dyn ProjectModeration>,
    pub engagement: Arc<dyn Engagement>,
}

impl HttpState {
    /// Bundle the driving ports for the handlers.
    pub fn new(
        authoring: Arc<dyn ProjectAuthoring>,
        moderation: Arc<dyn ProjectModeration>,
        engagement: Arc<dyn Engagement>,
    ) -> Self {
        Self {
            authoring,
            moderation,
            engagement,
        }
    }
}
