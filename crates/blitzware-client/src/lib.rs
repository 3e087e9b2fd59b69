//! `BlitzWare` API client
//!
//! Typed access to the dashboard REST API:
//! - [`ApiClient`]: one generic JSON-over-HTTP client with bearer auth and
//!   per-request lifecycle tracking
//! - [`ResourceClient`]: list/get/create/update/delete for each resource
//! - [`Dashboard`]: session plus cached collections, the state a front-end
//!   renders

mod accounts;
pub mod collection;
pub mod dashboard;
mod endpoint;
mod error;
mod http;
pub mod resource;
pub mod session;
pub mod tracker;


pub use accounts::AccountsClient;
pub use collection::{Collection, Identified};
pub use dashboard::{Dashboard, LoginOutcome};
pub use endpoint::Endpoint;
pub use error::ClientError;
pub use http::{ApiClient, CLIENT_ID_HEADER};
pub use resource::ResourceClient;
pub use session::Session;
pub use tracker::{RequestId, RequestRecord, RequestTracker};
