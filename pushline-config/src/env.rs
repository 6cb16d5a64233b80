// Environment variable loading

use serde_json::{Map, Value};
use std::env;

/// Default variable prefix.
pub const DEFAULT_PREFIX: &str = "PUSHLINE";

/// Separator between nested keys, e.g. `PUSHLINE_HTTP__TIMEOUT_SECS`.
pub const NESTING_SEPARATOR: &str = "__";

/// Environment variable loader
pub struct EnvLoader {
    prefix: String,
}

impl EnvLoader {
    /// Create a loader for variables starting with `prefix`
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Collect matching process environment variables into a settings tree
    pub fn load(&self) -> Value {
        self.load_from(env::vars())
    }

    /// Collect matching variables from an explicit list
    pub fn load_from<I, K, V>(&self, vars: I) -> Value
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut root = Map::new();

        for (key, value) in vars {
            let Some(rest) = strip_prefix(key.as_ref(), &self.prefix) else {
                continue;
            };
            if rest.is_empty() {
                continue;
            }
            insert_path(&mut root, rest, Value::String(value.into()));
        }

        Value::Object(root)
    }
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

/// `PUSHLINE_DEVICE_TOKEN` -> `DEVICE_TOKEN`; `None` if the prefix does not match.
pub(crate) fn strip_prefix<'a>(key: &'a str, prefix: &str) -> Option<&'a str> {
    key.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('_'))
}

/// Insert `value` at the lowercased, `__`-separated path `key`.
pub(crate) fn insert_path(root: &mut Map<String, Value>, key: &str, value: Value) {
    let key = key.to_lowercase();
    let mut parts = key.split(NESTING_SEPARATOR).peekable();
    let mut node = root;

    while let Some(part) = parts.next() {
        if parts.peek().is_none() {
            node.insert(part.to_string(), value);
            return;
        }

        let entry = node
            .entry(part.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        node = match entry {
            Value::Object(map) => map,
            _ => return,
        };
    }
}
