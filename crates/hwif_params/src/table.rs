//! The ordered parameter table.

use hwif_common::{Dump, Dumper, RawValue};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::error::ParamError;
use crate::types::{ParamKind, ParamValue, Parameter, ParameterDecl};

/// An ordered set of uniquely named parameters.
///
/// Declaration order is preserved for iteration and dumps. After construction
/// the only mutations are [`update`](Self::update) (driven by an external host)
/// and [`mark_consumed`](Self::mark_consumed).
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ParameterTable {
    params: IndexMap<String, Parameter>,
}

impl ParameterTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from declarations, in order. The first failure aborts.
    pub fn from_decls(decls: impl IntoIterator<Item = ParameterDecl>) -> Result<Self, ParamError> {
        let mut table = Self::new();
        for decl in decls {
            table.add(decl)?;
        }
        Ok(table)
    }

    /// Adds a parameter.
    ///
    /// Fails with [`ParamError::DuplicateName`] if the name is taken,
    /// [`ParamError::UnknownParameterKind`] if the kind is not recognised, and
    /// [`ParamError::InvalidValue`] if the initial value does not fit the kind.
    pub fn add(&mut self, decl: ParameterDecl) -> Result<(), ParamError> {
        if self.params.contains_key(&decl.name) {
            return Err(ParamError::DuplicateName(decl.name));
        }
        let kind =
            ParamKind::from_name(&decl.kind).ok_or_else(|| ParamError::UnknownParameterKind {
                name: decl.name.clone(),
                kind: decl.kind.clone(),
            })?;
        let value = match (&decl.value, kind) {
            (_, ParamKind::Section) => ParamValue::None,
            (Some(raw), kind) => kind.convert(&decl.name, raw)?,
            (None, kind) => {
                return Err(ParamError::InvalidValue {
                    name: decl.name,
                    kind: kind.to_string(),
                    value: String::new(),
                })
            }
        };
        debug!(name = %decl.name, %kind, %value, derived = decl.derived, "parameter added");
        self.params.insert(
            decl.name.clone(),
            Parameter {
                name: decl.name,
                kind,
                allowed: decl.allowed,
                units: decl.units,
                description: decl.description,
                derived: decl.derived,
                value,
                consumed: false,
                supplied: false,
            },
        );
        Ok(())
    }

    /// Adds a cosmetic section marker.
    pub fn add_section(&mut self, name: impl Into<String>) -> Result<(), ParamError> {
        self.add(ParameterDecl::section(name))
    }

    /// Returns the parameter with the given name.
    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.params.get(name)
    }

    /// Returns `true` if a parameter with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    /// Returns the current value of the named parameter, or `None` if absent.
    pub fn lookup(&self, name: &str) -> Option<&ParamValue> {
        self.params.get(name).map(|p| &p.value)
    }

    /// Resolves a name-or-literal.
    ///
    /// Non-string literals pass through unchanged. Strings are looked up by
    /// name; `None` means there is no such parameter and the caller decides
    /// its own fallback.
    pub fn value(&self, key: &RawValue) -> Option<ParamValue> {
        match key {
            RawValue::Str(name) => self.lookup(name).cloned(),
            literal => Some(ParamValue::from(literal)),
        }
    }

    /// Returns whether the named parameter is supplied by an external host.
    pub fn is_derived(&self, name: &str) -> Result<bool, ParamError> {
        self.get(name)
            .map(|p| p.derived)
            .ok_or_else(|| ParamError::UnknownParameter(name.to_string()))
    }

    /// Records that a resolver has read the named parameter. Idempotent.
    pub fn mark_consumed(&mut self, name: &str) -> Result<(), ParamError> {
        let param = self
            .params
            .get_mut(name)
            .ok_or_else(|| ParamError::UnknownParameter(name.to_string()))?;
        param.consumed = true;
        Ok(())
    }

    /// Overwrites a parameter's value from a raw host-supplied value,
    /// converting it according to the parameter's kind.
    ///
    /// A derived parameter is marked supplied. Section markers carry no value
    /// and reject every update with [`ParamError::InvalidValue`].
    pub fn update(&mut self, name: &str, raw: &RawValue) -> Result<(), ParamError> {
        let param = self
            .params
            .get_mut(name)
            .ok_or_else(|| ParamError::UnknownParameter(name.to_string()))?;
        let value = param.kind.convert(name, raw)?;
        debug!(name, old = %param.value, new = %value, "parameter updated");
        param.value = value;
        param.supplied |= param.derived;
        Ok(())
    }

    /// Applies an ordered override list. The first failure aborts; earlier
    /// overrides stay applied.
    pub fn apply_overrides<K: AsRef<str>>(
        &mut self,
        overrides: impl IntoIterator<Item = (K, RawValue)>,
    ) -> Result<(), ParamError> {
        for (name, raw) in overrides {
            self.update(name.as_ref(), &raw)?;
        }
        Ok(())
    }

    /// Iterates over parameters in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.params.values()
    }

    /// Returns the number of parameters, including section markers.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns `true` if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl Dump for ParameterTable {
    fn dump(&self, out: &mut Dumper) {
        out.line("Parameters");
        out.nested(|out| {
            for param in self.iter() {
                param.dump(out);
            }
        });
    }
}
