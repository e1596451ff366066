//! Evaluation scope for tracking state during recursive formatting.

use crate::format::FormatError;
use crate::types::{Value, Variables};

/// Default maximum message reference depth.
const MAX_DEPTH: usize = 32;

/// State carried through one formatting call.
///
/// Tracks the variables in effect, the chain of message references being
/// resolved (for cycle detection) and the errors collected so far. Message
/// references share the caller's variables.
pub(crate) struct Scope<'a> {
    variables: &'a Variables,
    call_stack: Vec<String>,
    max_depth: usize,
    errors: Vec<FormatError>,
}

impl<'a> Scope<'a> {
    pub(crate) fn new(variables: &'a Variables) -> Self {
        Self {
            variables,
            call_stack: Vec::new(),
            max_depth: MAX_DEPTH,
            errors: Vec::new(),
        }
    }

    pub(crate) fn variable(&self, name: &str) -> Option<&'a Value> {
        let variables: &'a Variables = self.variables;
        variables.get(name)
    }

    pub(crate) fn variable_names(&self) -> impl Iterator<Item = &'a str> + use<'a> {
        let variables: &'a Variables = self.variables;
        variables.keys().map(String::as_str)
    }

    /// Enter a message reference.
    ///
    /// Fails if the depth limit is reached or `key` is already being
    /// resolved.
    pub(crate) fn push_call(&mut self, key: &str) -> Result<(), FormatError> {
        if self.call_stack.len() >= self.max_depth {
            return Err(FormatError::MaxDepthExceeded);
        }
        if self.call_stack.iter().any(|k| k == key) {
            let mut chain = self.call_stack.clone();
            chain.push(key.to_string());
            return Err(FormatError::CyclicReference { chain });
        }
        self.call_stack.push(key.to_string());
        Ok(())
    }

    pub(crate) fn pop_call(&mut self) {
        self.call_stack.pop();
    }

    /// Record an error. Identical errors are recorded once.
    pub(crate) fn add_error(&mut self, error: FormatError) {
        if !self.errors.contains(&error) {
            self.errors.push(error);
        }
    }

    pub(crate) fn into_errors(self) -> Vec<FormatError> {
        self.errors
    }
}
