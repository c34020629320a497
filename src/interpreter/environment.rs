use std::collections::HashMap;

use crate::ast::Identifier;

use super::error::{RuntimeError, RuntimeResult};
use super::value::Value;

/// The run's single variable table. Holds only numbers and text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    variables: HashMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub(super) fn load(&self, name: &Identifier) -> RuntimeResult<Value> {
        self.variables
            .get(name.as_str())
            .cloned()
            .ok_or_else(|| RuntimeError::UndefinedVariable {
                name: name.to_string(),
            })
    }

    /// Creates or overwrites a binding.
    pub(super) fn store(&mut self, name: &Identifier, value: Value) -> RuntimeResult<()> {
        if !value.is_storable() {
            return Err(RuntimeError::UnstorableValue {
                name: name.to_string(),
                type_name: value.type_name(),
            });
        }
        self.variables.insert(name.to_string(), value);
        Ok(())
    }
}
