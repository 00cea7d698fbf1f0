//! Name resolution and value formatting for evaluation

use crate::template::ParameterSet;
use crate::template::error::TemplateError;
use toml::Value;

/// Evaluation environment: the merged parameters plus block-local bindings
///
/// Locals (loop variables, captured blocks) shadow parameters and are
/// released when their block ends.
pub(crate) struct Bindings<'a> {
    params: &'a ParameterSet,
    locals: Vec<(String, Value)>,
}

impl<'a> Bindings<'a> {
    pub(crate) fn new(params: &'a ParameterSet) -> Self {
        Self {
            params,
            locals: Vec::new(),
        }
    }

    fn lookup(&self, name: &str) -> Option<&Value> {
        self.locals
            .iter()
            .rev()
            .find(|(local, _)| local == name)
            .map(|(_, value)| value)
            .or_else(|| self.params.get(name))
    }

    /// Resolve a possibly dotted key
    ///
    /// An exact binding named `a.b` wins over the nested path `a` → `b`.
    pub(crate) fn resolve(&self, key: &str) -> Option<&Value> {
        if let Some(value) = self.lookup(key) {
            return Some(value);
        }

        let mut parts = key.split('.');
        let mut current = self.lookup(parts.next()?)?;
        for part in parts {
            current = match current {
                Value::Table(table) => table.get(part)?,
                _ => return None,
            };
        }
        Some(current)
    }

    pub(crate) fn bind(&mut self, name: &str, value: Value) {
        self.locals.push((name.to_string(), value));
    }

    /// Current local depth, for [`Bindings::release`]
    pub(crate) fn mark(&self) -> usize {
        self.locals.len()
    }

    pub(crate) fn release(&mut self, mark: usize) {
        self.locals.truncate(mark);
    }
}

/// Stringify a TOML value for template output
pub(crate) fn stringify_value(value: &Value, key: &str) -> Result<String, TemplateError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Integer(i) => Ok(i.to_string()),
        Value::Float(f) => Ok(f.to_string()),
        Value::Boolean(b) => Ok(b.to_string()),
        Value::Datetime(dt) => Ok(dt.to_string()),
        Value::Array(_) => Err(TemplateError::ArrayInNonEachContext {
            key: key.to_string(),
        }),
        Value::Table(_) => Err(TemplateError::TableInPlaceholder {
            key: key.to_string(),
        }),
    }
}
