//! Labels and the read-only label catalog

use super::ids::LabelId;
use serde::{Deserialize, Serialize};

/// A label categorizes tasks. Reference data, never mutated by the board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Label {
    pub id: LabelId,
    pub name: String,
    /// CSS hex color including the leading `#`
    pub color: String,
}

impl Label {
    pub fn new(id: impl Into<LabelId>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: color.into(),
        }
    }
}

/// The externally supplied set of labels tasks can carry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelCatalog {
    labels: Vec<Label>,
}

impl LabelCatalog {
    pub fn new(labels: Vec<Label>) -> Self {
        Self { labels }
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Look up a label by id
    pub fn get(&self, id: &str) -> Option<&Label> {
        self.labels.iter().find(|l| l.id.as_str() == id)
    }

    /// Look up a label by id or by case-insensitive name
    pub fn resolve(&self, key: &str) -> Option<&Label> {
        self.get(key)
            .or_else(|| self.labels.iter().find(|l| l.name.eq_ignore_ascii_case(key)))
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }
}

impl Default for LabelCatalog {
    fn default() -> Self {
        Self::new(vec![
            Label::new("1", "Bug", "#E53E3E"),
            Label::new("2", "Feature", "#38A169"),
            Label::new("3", "Enhancement", "#4299E1"),
            Label::new("4", "Documentation", "#805AD5"),
            Label::new("5", "Design", "#D53F8C"),
        ])
    }
}
