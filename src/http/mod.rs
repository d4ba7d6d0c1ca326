pub mod app_error;
pub mod favicon;
pub mod metrics;
pub mod server;
pub mod state;
pub mod welcome;
