//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod in_memory_session_store;
mod weather_adapter;

pub use in_memory_session_store::{DEFAULT_MAX_SESSIONS, DEFAULT_SESSION_IDLE, InMemorySessionStore};
pub use weather_adapter::WeatherAdapter;
