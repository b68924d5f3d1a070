//! # ISML Core
//!
//! Foundational types shared by every ISML crate:
//!
//! - [`errors`]: [`AppError`] and its [`ErrorKind`] taxonomy, with HTTP response conversion
//! - [`registration`]: pure registration number formatting
//! - [`serde`]: lenient deserializers for client-supplied values
//!
//! # Example
//!
//! ```ignore
//! use isml_core::{AppError, registration::registration_number};
//!
//! let err = AppError::not_found(anyhow::anyhow!("Batch not found"));
//! let number = registration_number(Some("Kerala"), Some("Kochi"), 1001);
//! ```

pub mod errors;
pub mod registration;
pub mod serde;

pub use errors::{AppError, ErrorKind};
