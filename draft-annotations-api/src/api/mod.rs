//! HTTP API handlers for draft-annotations-api

pub mod annotations;
pub mod health;
pub mod request_id;

pub use annotations::annotations_routes;
pub use health::health_routes;
pub use request_id::transaction_id_middleware;
