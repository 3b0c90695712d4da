#![doc = "The `taskgate` library crate."]
#![doc = ""]
#![doc = "Authentication (credential hashing, signed access/refresh tokens, login,"]
#![doc = "registration and refresh), per-task ownership checks, storage backends,"]
#![doc = "routing and error handling for the taskgate service. The binary (`main.rs`)"]
#![doc = "wires these together into an actix-web server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;
pub mod tasks;

pub use crate::error::AppError;
pub use crate::state::AppState;
