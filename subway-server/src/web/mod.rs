//! Web layer for the subway network.
//!
//! Provides JSON endpoints for managing stations and lines and for
//! shortest-path fare queries.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
