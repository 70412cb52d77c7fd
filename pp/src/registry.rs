//! Pattern registry and dispatcher
//!
//! The registry maps each uppercase pattern name to its [`Pattern`]. It is
//! built once on first use and only ever read afterwards, so [`render`] can be
//! called from any number of threads without coordination.

use std::collections::HashMap;
use std::sync::OnceLock;

use tracing::debug;

use crate::error::{PatternError, Result};
use crate::pattern::{Pattern, strip};

static GLOBAL_REGISTRY: OnceLock<PatternRegistry> = OnceLock::new();

/// Read-only lookup table from pattern name to pattern
#[derive(Debug)]
pub struct PatternRegistry {
    /// Map from uppercase name to pattern
    patterns: HashMap<&'static str, Pattern>,
    /// Names in registration order
    names: Vec<&'static str>,
}

impl PatternRegistry {
    fn with_builtins() -> Self {
        let mut patterns = HashMap::with_capacity(Pattern::ALL.len());
        let mut names = Vec::with_capacity(Pattern::ALL.len());
        for pattern in Pattern::ALL {
            patterns.insert(pattern.name(), pattern);
            names.push(pattern.name());
        }
        Self { patterns, names }
    }

    /// Look up an already-normalized name
    pub fn get(&self, name: &str) -> Option<Pattern> {
        self.patterns.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.patterns.contains_key(name)
    }

    /// Registered names, in registration order
    pub fn names(&self) -> &[&'static str] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Registered patterns, in registration order
    pub fn patterns(&self) -> impl Iterator<Item = Pattern> + '_ {
        self.names.iter().filter_map(|name| self.get(name))
    }
}

/// Get the process-wide registry holding every built-in pattern
pub fn global_registry() -> &'static PatternRegistry {
    GLOBAL_REGISTRY.get_or_init(PatternRegistry::with_builtins)
}

/// Trim and upper-case a requested pattern name
pub fn normalize(name: &str) -> String {
    strip(name).to_uppercase()
}

/// Resolve a pattern name, ignoring case and surrounding whitespace
pub fn lookup(name: &str) -> Result<Pattern> {
    let registry = global_registry();
    let key = normalize(name);
    debug!(requested = name, key = %key, "Looking up pattern");

    registry.get(&key).ok_or_else(|| PatternError::UnknownPattern {
        name: name.to_string(),
        supported: registry.names().to_vec(),
    })
}

/// Names of every supported pattern, in registry order
pub fn supported_patterns() -> Vec<&'static str> {
    global_registry().names().to_vec()
}

/// Render a prompt for `pattern_name` from `items`
///
/// Fails with [`PatternError::UnknownPattern`] when the name has no registry
/// entry and with [`PatternError::ArityMismatch`] when the item count does not
/// fit the pattern. Nothing is rendered on failure.
pub fn render<S: AsRef<str>>(pattern_name: &str, items: &[S]) -> Result<String> {
    lookup(pattern_name)?.render(items)
}
