//! Authentication
//!
//! Admins log in with e-mail and password; the resulting [`Session`] then
//! supplies the bearer token for every [`KariClient`](crate::KariClient)
//! request.

mod password;
mod session;
mod token;

pub use password::PasswordFlow;
pub use password::TOKEN_PATH;
pub use session::CurrentUser;
pub use session::Session;
pub use session::SessionSnapshot;
pub use token::AccessToken;
pub use token::StaticTokenProvider;
pub use token::TokenProvider;
