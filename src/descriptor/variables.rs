//! `${name}` template variables in raw descriptor text.
//!
//! Single-pass substitution applied before the document is parsed. Bound
//! values are inserted verbatim and never expanded again; the validation
//! engine itself never resolves variables.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

static VARIABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([A-Za-z0-9_.\-]+)\}").unwrap());

/// Result of substituting variables into descriptor text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    /// Text with every bound placeholder replaced
    pub content: String,
    /// Placeholders still present in `content`, whether unbound in the input
    /// or introduced by a bound value
    pub unresolved: Vec<String>,
}

impl Substitution {
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Distinct variable names, in order of first appearance.
pub fn extract_variables(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    VARIABLE_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

/// Replace every `${name}` that has a binding, in one pass over `text`.
pub fn substitute(text: &str, bindings: &HashMap<String, String>) -> Substitution {
    let content = VARIABLE_RE
        .replace_all(text, |caps: &Captures<'_>| match bindings.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned();
    let unresolved = extract_variables(&content);

    Substitution {
        content,
        unresolved,
    }
}

/// Parse `key=value` pairs (e.g. from the command line) into bindings.
/// Entries without `=` are ignored.
pub fn parse_bindings<I, S>(pairs: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    pairs
        .into_iter()
        .filter_map(|pair| {
            pair.as_ref()
                .split_once('=')
                .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        })
        .filter(|(k, _)| !k.is_empty())
        .collect()
}
