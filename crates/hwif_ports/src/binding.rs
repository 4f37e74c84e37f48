//! Deferred bindings between resolved fields and the parameters behind them.

use std::fmt;

use serde::Serialize;

/// One symbolic field of a resolved connection point.
///
/// A host regenerating the interface with new parameter values walks these
/// to know which computations to repeat. For a derived parameter only the
/// first binding (`first_use`) reads the host's argument; later ones reuse the
/// value already stored in the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DeferredBinding {
    /// The connection point owning the field.
    pub point: String,
    /// The field, or the signal name for conduits.
    pub field: String,
    /// The parameter the field was read from.
    pub parameter: String,
    /// Whether the parameter is supplied by the host.
    pub derived: bool,
    /// Whether this is the first read of a not-yet-consumed derived parameter.
    pub first_use: bool,
}

impl fmt::Display for DeferredBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{} <- {}", self.point, self.field, self.parameter)?;
        if self.derived {
            f.write_str(if self.first_use { " (derived, first use)" } else { " (derived)" })?;
        }
        Ok(())
    }
}
