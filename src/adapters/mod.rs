//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Bearer-token validation (JWT, mock)
//! - `http` - REST API (axum)
//! - `postgres` - PostgreSQL workout store
//! - `storage` - In-memory workout store

pub mod auth;
pub mod http;
pub mod postgres;
pub mod storage;

pub use auth::{JwtConfig, JwtSessionValidator, MockSessionValidator};
pub use http::{app_router, RouterOptions, WorkoutHandlers};
pub use postgres::PostgresWorkoutRepository;
pub use storage::InMemoryWorkoutRepository;
