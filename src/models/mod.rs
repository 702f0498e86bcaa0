//! Data models exchanged with the fleet reservation API.
//!
//! Field names follow the API's camelCase JSON.

mod auth;
mod contact;
mod envelope;
mod extra;
mod team;

pub use auth::*;
pub use contact::*;
pub use envelope::*;
pub use extra::*;
pub use team::*;
