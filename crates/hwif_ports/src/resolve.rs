//! The shared value resolver used by every connection-point kind.
//!
//! A raw descriptor field is classified three ways:
//!
//! 1. an integer (or boolean) literal is immediate;
//! 2. a string of decimal digits is immediate;
//! 3. any other string names a parameter, is looked up now, and keeps its
//!    name so the computation can be repeated when the parameter changes.
//!
//! The result is a [`Resolved`] value carrying both representations.

use std::fmt;

use hwif_common::{is_digit_string, RawValue};
use hwif_params::{ParamValue, ParameterTable};
use serde::Serialize;
use tracing::trace;

use crate::error::PortError;

/// A resolved field: the value usable now, plus the parameter it came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Resolved<T> {
    /// The current value.
    pub value: T,
    /// The parameter name when the source was symbolic.
    pub key: Option<String>,
}

impl<T> Resolved<T> {
    /// An immediate value with no parameter behind it.
    pub fn immediate(value: T) -> Self {
        Self { value, key: None }
    }

    /// A value read from the named parameter.
    pub fn symbolic(value: T, key: impl Into<String>) -> Self {
        Self {
            value,
            key: Some(key.into()),
        }
    }

    /// Returns `true` if the value came from a parameter.
    pub fn is_symbolic(&self) -> bool {
        self.key.is_some()
    }

    /// Returns the parameter name, if symbolic.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }
}

impl<T: Copy> Resolved<T> {
    /// Returns the current value.
    pub fn get(&self) -> T {
        self.value
    }
}

impl<T: fmt::Display> fmt::Display for Resolved<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            Some(key) => write!(f, "{} ({key})", self.value),
            None => write!(f, "{}", self.value),
        }
    }
}

/// Returns `true` if `s` can be a parameter name rather than a malformed literal.
fn is_symbol_name(s: &str) -> bool {
    s.chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
}

/// Resolves raw fields of one connection point against the parameter table.
#[derive(Clone, Copy)]
pub struct Resolver<'a> {
    params: &'a ParameterTable,
    point: &'a str,
}

impl<'a> Resolver<'a> {
    /// Creates a resolver for the named connection point.
    pub fn new(params: &'a ParameterTable, point: &'a str) -> Self {
        Self { params, point }
    }

    /// The parameter table lookups go through.
    pub fn params(&self) -> &'a ParameterTable {
        self.params
    }

    /// The connection point being resolved.
    pub fn point(&self) -> &'a str {
        self.point
    }

    fn lookup(&self, field: &'static str, name: &str) -> Result<&'a ParamValue, PortError> {
        let value = self
            .params
            .lookup(name)
            .ok_or_else(|| PortError::UnresolvedParameter {
                point: self.point.to_string(),
                field,
                name: name.to_string(),
            })?;
        trace!(point = self.point, field, name, %value, "symbolic lookup");
        Ok(value)
    }

    /// Classifies a width-like field.
    ///
    /// Returns `Ok(None)` when the field has the wrong shape for a number (a
    /// boolean, a malformed literal, or a parameter of another kind) so each
    /// caller can raise its own descriptor error.
    pub fn try_natural(
        &self,
        field: &'static str,
        raw: &RawValue,
    ) -> Result<Option<Resolved<u64>>, PortError> {
        match raw {
            RawValue::Int(n) => Ok(Some(Resolved::immediate(*n))),
            RawValue::Str(s) if is_digit_string(s) => Ok(s.parse().ok().map(Resolved::immediate)),
            RawValue::Str(s) if is_symbol_name(s) => Ok(self
                .lookup(field, s)?
                .as_natural()
                .map(|n| Resolved::symbolic(n, s.as_str()))),
            _ => Ok(None),
        }
    }

    /// Resolves an optional width-like field, using `default` when absent.
    pub fn natural(
        &self,
        field: &'static str,
        raw: Option<&RawValue>,
        default: u64,
    ) -> Result<Resolved<u64>, PortError> {
        let Some(raw) = raw else {
            return Ok(Resolved::immediate(default));
        };
        self.try_natural(field, raw)?
            .ok_or_else(|| self.invalid_width(field, raw))
    }

    /// Classifies a flag-like field.
    ///
    /// Booleans, `0`/`1` and `"0"`/`"1"` are immediate; other strings name a
    /// Boolean parameter. Returns `Ok(None)` for anything else.
    pub fn try_flag(
        &self,
        field: &'static str,
        raw: &RawValue,
    ) -> Result<Option<Resolved<bool>>, PortError> {
        match raw {
            RawValue::Bool(b) => Ok(Some(Resolved::immediate(*b))),
            RawValue::Int(0) => Ok(Some(Resolved::immediate(false))),
            RawValue::Int(1) => Ok(Some(Resolved::immediate(true))),
            RawValue::Str(s) if s == "0" => Ok(Some(Resolved::immediate(false))),
            RawValue::Str(s) if s == "1" => Ok(Some(Resolved::immediate(true))),
            RawValue::Str(s) if is_symbol_name(s) => Ok(self
                .lookup(field, s)?
                .as_bool()
                .map(|b| Resolved::symbolic(b, s.as_str()))),
            _ => Ok(None),
        }
    }

    /// Resolves an optional flag-like field, using `default` when absent.
    pub fn flag(
        &self,
        field: &'static str,
        raw: Option<&RawValue>,
        default: bool,
    ) -> Result<Resolved<bool>, PortError> {
        let Some(raw) = raw else {
            return Ok(Resolved::immediate(default));
        };
        self.try_flag(field, raw)?
            .ok_or_else(|| self.invalid_width(field, raw))
    }

    /// Builds an [`PortError::InvalidWidth`] for this point.
    pub fn invalid_width(&self, field: &'static str, raw: &RawValue) -> PortError {
        PortError::InvalidWidth {
            point: self.point.to_string(),
            field,
            value: raw.to_string(),
        }
    }
}
