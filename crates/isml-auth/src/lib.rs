//! # ISML Auth
//!
//! Bearer token handling for the ISML academics API:
//!
//! - [`claims`]: the decoded [`Claims`] payload (role plus identity fields)
//! - [`jwt`]: [`TokenValidator`] and token issuing
//!
//! Role enforcement itself lives with the HTTP middleware in the API crate;
//! this crate only answers "who is this and is the token genuine".

pub mod claims;
pub mod jwt;

pub use claims::Claims;
pub use jwt::{TokenValidator, issue_token, issue_token_with_expiry};
