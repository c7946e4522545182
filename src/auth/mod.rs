//! Visitor authentication
//!
//! Sessions produced by the Linux.do CONNECT sign-in, carried in a signed JWT
//! cookie for the duration of the browser session. Nothing is stored
//! server-side beyond the signing secret.

pub mod session;

pub use session::{Session, SessionManager};
