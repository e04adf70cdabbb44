//! Crowdfunding backend library modules.
//!
//! The crate follows a hexagonal layout: `domain` holds the aggregates,
//! error taxonomy, ports, and services; `inbound` adapts HTTP requests onto
//! the driving ports; `outbound` provides driven adapters for the document
//! store collaborator.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
