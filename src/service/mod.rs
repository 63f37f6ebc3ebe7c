//! Issuance and validation services.
//!
//! - `issuance` creates certificates from validated form input.
//! - `lookup` resolves submitted codes and serves the admin read paths.
//! - `validation` collects field-level input violations.

pub mod issuance;
pub mod lookup;
pub mod validation;

pub use issuance::{IssuanceService, IssueError};
pub use lookup::{LookupError, ValidationService};
pub use validation::{FieldError, ValidationErrors};
