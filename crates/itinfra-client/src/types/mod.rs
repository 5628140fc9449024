//! Wire types for the IT Infrastructure access service.
//!
//! These mirror the server's JSON structures (camelCase field names,
//! epoch-millisecond timestamps).

pub mod elements;
pub mod events;
pub mod properties;
pub mod requests;
pub mod responses;

pub use elements::*;
pub use events::*;
pub use properties::*;
pub use requests::*;
pub use responses::*;
