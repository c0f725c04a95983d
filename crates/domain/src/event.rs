//! Change events — the normalized message emitted when a cache is mutated.
//!
//! Every event is published on a topic derived from the bus namespace and
//! the [`ChangeKind`]:
//!
//! | Kind | Topic | Payload |
//! |------|-------|---------|
//! | [`ChangeKind::Insert`] | `<namespace>.device.insert` | `{module, id, value}` |
//! | [`ChangeKind::Update`] | `<namespace>.device.update` | `{module, id, value}` |
//! | [`ChangeKind::Delete`] | `<namespace>.device.delete` | `{module, id}` |

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of mutation an event reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// A device identity record was registered.
    Insert,
    /// A status snapshot was written.
    Update,
    /// A device identity record was removed.
    Delete,
}

impl ChangeKind {
    /// Full topic name under the given namespace.
    #[must_use]
    pub fn topic(self, namespace: &str) -> String {
        format!("{namespace}.device.{self}")
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Delete => "delete",
        })
    }
}

/// Message published for one cache mutation.
///
/// `value` is present for inserts and updates and absent for deletes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeEvent<V> {
    /// Identity of the module that produced the event.
    pub module: String,
    /// Key of the mutated entry.
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<V>,
}

impl<V> ChangeEvent<V> {
    /// Event for a stored or replaced value.
    pub fn set(module: impl Into<String>, id: impl Into<String>, value: V) -> Self {
        Self {
            module: module.into(),
            id: id.into(),
            value: Some(value),
        }
    }

    /// Event for a removed value.
    pub fn delete(module: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            id: id.into(),
            value: None,
        }
    }
}
