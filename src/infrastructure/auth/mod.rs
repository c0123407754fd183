//! Authentication infrastructure module
//!
//! Session token issuance and verification for signed-in users.

mod session;

pub use session::{SessionClaims, SessionConfig, SessionIssuer, SessionService};
