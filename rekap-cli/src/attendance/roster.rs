//! Employee roster with natural alphanumeric ordering
//!
//! Ids are compared the way a person reads them: digit runs numerically,
//! everything else case-insensitively, so `E2` comes before `E10`.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static DIGIT_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("digit run pattern is valid"));

/// One piece of a natural sort key
///
/// Keys always alternate text and number, starting with (possibly empty)
/// text, so variants at the same position are always the same kind.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum KeyPart {
    Text(String),
    /// Digit run without leading zeros; compared by length first
    Number { len: usize, digits: String },
}

fn natural_key(id: &str) -> Vec<KeyPart> {
    let mut parts = Vec::new();
    let mut last = 0;

    for m in DIGIT_RUNS.find_iter(id) {
        parts.push(KeyPart::Text(id[last..m.start()].to_lowercase()));
        let digits = m.as_str().trim_start_matches('0').to_string();
        parts.push(KeyPart::Number {
            len: digits.len(),
            digits,
        });
        last = m.end();
    }
    parts.push(KeyPart::Text(id[last..].to_lowercase()));

    parts
}

/// Compare two ids in natural order
///
/// Ids with equal keys (`e1` vs `E1`, `E01` vs `E1`) fall back to plain
/// string order so the result is total.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    natural_key(a)
        .cmp(&natural_key(b))
        .then_with(|| a.cmp(b))
}

/// Unique employee ids in natural order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EmployeeRoster {
    ids: Vec<String>,
}

impl EmployeeRoster {
    /// Build a roster from raw ids; empty ids and duplicates are dropped
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let unique: HashSet<String> = ids
            .into_iter()
            .map(Into::into)
            .filter(|id| !id.is_empty())
            .collect();

        let mut ids: Vec<String> = unique.into_iter().collect();
        ids.sort_by(|a, b| natural_cmp(a, b));

        Self { ids }
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|i| i == id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
