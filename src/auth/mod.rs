//! Partner platform authentication.
//!
//! This module turns [`Credentials`] into an [`AuthSession`]: a bearer
//! token plus the optional login cookie, precomputed into the header set
//! every query and child-table call is stamped with.

mod authenticator;
mod credentials;
mod error;
mod session;

pub use authenticator::Authenticator;
pub use credentials::Credentials;
pub use error::AuthError;
pub use session::{AuthSession, COMPANY_ID_HEADER, SESSION_HEADER};
