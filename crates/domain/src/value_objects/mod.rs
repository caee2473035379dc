//! Value Objects - Immutable, identity-less domain primitives

mod location;
mod session_id;

pub use location::Location;
pub use session_id::SessionId;
