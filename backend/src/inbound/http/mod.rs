//! HTTP inbound adapters.
//!
//! Handlers depend only on the driving ports carried in [`state::HttpState`]
//! and stay testable without I/O. Route registration lives in [`configure`]
//! so the server binary and integration tests assemble identical apps.

use actix_web::web;

pub mod auth;
pub mod creator;
pub mod error;
pub mod health;
pub mod moderator;
pub mod responses;
pub mod state;
pub mod users;
pub mod validation;

pub use error::{ApiError, ApiResult};

/// Register every HTTP endpoint on the given service config.
///
/// Expects [`state::HttpState`] and [`health::HealthState`] to be available
/// as app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(creator::create_project)
            .service(creator::list_projects)
            .service(creator::fetch_project)
            .service(creator::update_project)
            .service(creator::add_milestone)
            .service(moderator::list_by_status)
            .service(moderator::transition_project)
            .service(users::follow_project)
            .service(users::donate)
            .service(users::donation_history),
    )
    .service(health::ready)
    .service(health::live);
}
