//! The parameter table: named, typed configuration values consumed by
//! connection-point width and flag resolution.
//!
//! Parameters are declared once in a fixed order. A parameter marked
//! `derived` receives its concrete value later from an external host through
//! [`ParameterTable::update`]; consumers use [`ParameterTable::is_derived`] and
//! [`ParameterTable::mark_consumed`] to know whether a value can be read
//! immediately or must be deferred.

#![warn(missing_docs)]

pub mod error;
pub mod table;
pub mod types;

pub use error::ParamError;
pub use table::ParameterTable;
pub use types::{AllowedRange, ParamKind, ParamValue, Parameter, ParameterDecl};
