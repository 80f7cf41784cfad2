//! Sign-in and sign-out use cases.

mod sign_in;
mod sign_out;

pub use sign_in::{SignIn, SignInError};
pub use sign_out::{SignOut, SignOutError};

/// Secure-store key holding the current session's access token.
pub const ACCESS_TOKEN_KEY: &str = "auth.access_token";
