pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod service;

pub use error::TrackleError;
pub use router::{TrackleState, trackle_router};
