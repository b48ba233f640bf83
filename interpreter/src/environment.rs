use std::collections::HashMap;
use std::sync::Mutex;
use string_interner::{DefaultStringInterner, DefaultSymbol};
use crate::object::Object;

static SCOPE_LOG: Mutex<Vec<String>> = Mutex::new(Vec::new());

/// Scope events are recorded only with the `debug-logging` feature.
pub fn is_scope_logging_enabled() -> bool {
    cfg!(feature = "debug-logging")
}

fn log_scope_event<F: FnOnce() -> String>(event: F) {
    if is_scope_logging_enabled() {
        if let Ok(mut log) = SCOPE_LOG.lock() {
            log.push(event());
        }
    }
}

pub fn clear_scope_log() {
    if let Ok(mut log) = SCOPE_LOG.lock() {
        log.clear();
    }
}

pub fn get_scope_log() -> Vec<String> {
    SCOPE_LOG.lock().map(|log| log.clone()).unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub value: Object,
    pub is_const: bool,
}

/// Name-keyed variable store shared by every nested block and call.
///
/// Each block execution pushes a frame; names are unique across all frames,
/// and popping a frame evicts everything that was declared while it was the
/// innermost one.
#[derive(Debug)]
pub struct Environment {
    var: Vec<HashMap<DefaultSymbol, Variable>>,
    string_interner: DefaultStringInterner,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    pub fn new() -> Self {
        Self {
            var: vec![HashMap::new()],
            string_interner: DefaultStringInterner::new(),
        }
    }

    /// Number of block frames above the global one.
    pub fn depth(&self) -> usize {
        self.var.len() - 1
    }

    pub fn enter_block(&mut self) {
        self.var.push(HashMap::new());
        let depth = self.depth();
        log_scope_event(|| format!("Entering block level {depth}"));
    }

    /// Pop the innermost frame and return the names it evicted.
    /// The global frame is never popped.
    pub fn exit_block(&mut self) -> Vec<String> {
        if self.var.len() <= 1 {
            return vec![];
        }
        let depth = self.depth();
        let frame = self.var.pop().unwrap_or_default();
        let mut evicted: Vec<String> = frame
            .into_keys()
            .filter_map(|sym| self.string_interner.resolve(sym).map(|s| s.to_string()))
            .collect();
        evicted.sort();
        for name in &evicted {
            log_scope_event(|| format!("Evicting {name} at block level {depth}"));
        }
        evicted
    }

    fn symbol(&self, name: &str) -> Option<DefaultSymbol> {
        self.string_interner.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Insert `name` into the innermost frame unless it already exists in any
    /// frame. Returns whether the variable was created.
    pub fn declare(&mut self, name: &str, value: Object, is_const: bool) -> bool {
        if self.contains(name) {
            return false;
        }
        let sym = self.string_interner.get_or_intern(name);
        if let Some(last) = self.var.last_mut() {
            last.insert(sym, Variable { value, is_const });
        }
        true
    }

    pub fn get(&self, name: &str) -> Option<&Variable> {
        let sym = self.symbol(name)?;
        self.var.iter().rev().find_map(|frame| frame.get(&sym))
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Variable> {
        let sym = self.symbol(name)?;
        self.var.iter_mut().rev().find_map(|frame| frame.get_mut(&sym))
    }

    pub fn get_value(&self, name: &str) -> Option<&Object> {
        self.get(name).map(|v| &v.value)
    }

    /// All variables with their names, sorted by name.
    pub fn snapshot(&self) -> Vec<(&str, &Variable)> {
        let mut vars: Vec<(&str, &Variable)> = self
            .var
            .iter()
            .flat_map(|frame| frame.iter())
            .filter_map(|(sym, v)| self.string_interner.resolve(*sym).map(|name| (name, v)))
            .collect();
        vars.sort_by(|a, b| a.0.cmp(b.0));
        vars
    }

    pub fn len(&self) -> usize {
        self.var.iter().map(|frame| frame.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_declaration_wins() {
        let mut env = Environment::new();
        assert!(env.declare("x", Object::Int(1), false));
        assert!(!env.declare("x", Object::Int(2), true));
        assert_eq!(env.get_value("x"), Some(&Object::Int(1)));
        assert!(!env.get("x").unwrap().is_const);
    }

    #[test]
    fn test_block_eviction() {
        let mut env = Environment::new();
        env.declare("outer", Object::Int(1), false);
        env.enter_block();
        assert_eq!(env.depth(), 1);
        env.declare("b", Object::Bool(true), false);
        env.declare("a", Object::Int(2), false);
        // names stay unique across frames
        assert!(!env.declare("outer", Object::Int(3), false));
        assert_eq!(env.exit_block(), vec!["a".to_string(), "b".to_string()]);
        assert!(env.contains("outer"));
        assert!(!env.contains("a"));
        assert_eq!(env.depth(), 0);
    }

    #[test]
    fn test_global_frame_is_never_popped() {
        let mut env = Environment::new();
        env.declare("x", Object::Int(1), false);
        assert!(env.exit_block().is_empty());
        assert!(env.contains("x"));
    }

    #[test]
    fn test_inner_block_mutates_outer_variable() {
        let mut env = Environment::new();
        env.declare("x", Object::Int(1), false);
        env.enter_block();
        env.get_mut("x").unwrap().value = Object::Int(5);
        env.exit_block();
        assert_eq!(env.get_value("x"), Some(&Object::Int(5)));
    }

    #[test]
    fn test_snapshot_sorted() {
        let mut env = Environment::new();
        env.declare("zeta", Object::Int(1), false);
        env.declare("alpha", Object::Int(2), false);
        env.enter_block();
        env.declare("mid", Object::Int(3), false);
        let names: Vec<&str> = env.snapshot().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
        assert_eq!(env.len(), 3);
    }
}
