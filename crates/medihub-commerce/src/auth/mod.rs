//! Users, sign-in and the active session.

mod session;
mod user;

pub use session::{Authenticator, Session, ADMIN_NAME, ADMIN_USER_ID};
pub use user::{Role, User};
