//! User registry and the logged-in session

mod registry;
mod session;

pub use registry::{User, UserRegistry};
pub use session::Session;
