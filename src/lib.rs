pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod pending;
pub mod resources;
pub mod routes;
pub mod state;
pub mod status;
pub mod test_helpers;
pub mod views;
