//! Bounded option sets for choice and reference columns

use serde::Deserialize;
use serde::Serialize;

/// A single selectable option.
///
/// Choice columns store the option `id` in their cells; reference columns store
/// the id of the referenced record. The `name` is what gets displayed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawOption")]
pub struct OptionItem {
    /// The stored identifier.
    pub id: String,
    /// The display label.
    pub name: String,
}

impl OptionItem {
    /// Creates a new option.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Accepted wire shapes for an option.
///
/// Data sources send either a bare string (id and label are the same) or an
/// `{id, name}` object whose id may be numeric.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawOption {
    Plain(String),
    Item { id: ScalarId, name: String },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ScalarId {
    Text(String),
    Int(i64),
}

impl From<RawOption> for OptionItem {
    fn from(raw: RawOption) -> Self {
        match raw {
            RawOption::Plain(label) => Self::new(label.clone(), label),
            RawOption::Item { id, name } => {
                let id = match id {
                    ScalarId::Text(s) => s,
                    ScalarId::Int(n) => n.to_string(),
                };
                Self::new(id, name)
            }
        }
    }
}

/// An ordered set of options drawn from column metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionSet(Vec<OptionItem>);

impl OptionSet {
    /// Creates an option set from a list of options.
    pub fn new(options: Vec<OptionItem>) -> Self {
        Self(options)
    }

    /// Returns `true` if there are no options.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of options.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the options in order.
    pub fn iter(&self) -> impl Iterator<Item = &OptionItem> {
        self.0.iter()
    }

    /// Returns the options as a slice.
    pub fn as_slice(&self) -> &[OptionItem] {
        &self.0
    }

    /// Looks up an option by its stored id.
    pub fn get(&self, id: &str) -> Option<&OptionItem> {
        self.0.iter().find(|item| item.id == id)
    }

    /// Returns the display label for a stored id.
    pub fn label_for(&self, id: &str) -> Option<&str> {
        self.get(id).map(|item| item.name.as_str())
    }

    /// Resolves user input to an option: exact id first, then a
    /// case-insensitive label match.
    pub fn resolve(&self, input: &str) -> Option<&OptionItem> {
        let input = input.trim();
        self.get(input).or_else(|| {
            self.0
                .iter()
                .find(|item| item.name.eq_ignore_ascii_case(input))
        })
    }
}

impl From<Vec<OptionItem>> for OptionSet {
    fn from(options: Vec<OptionItem>) -> Self {
        Self::new(options)
    }
}

impl FromIterator<OptionItem> for OptionSet {
    fn from_iter<I: IntoIterator<Item = OptionItem>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
