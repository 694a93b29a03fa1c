//! Configuration actions and their wire encoding.

use std::fmt;

use serde::Serialize;

/// Router API endpoint an action is posted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `configure`: set/delete mutations of the running configuration.
    Configure,
    /// `config-file`: save the running configuration to disk.
    ConfigFile,
    /// `retrieve`: read the running configuration.
    Retrieve,
}

impl Endpoint {
    /// Returns the URL path segment for this endpoint.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Configure => "configure",
            Self::ConfigFile => "config-file",
            Self::Retrieve => "retrieve",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operation carried in the `op` field of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    /// Create or overwrite the node at `path`.
    Set,
    /// Remove the node at `path` and everything below it.
    Delete,
    /// Return the configuration tree under `path`.
    ShowConfig,
    /// Persist the running configuration.
    Save,
}

/// A single configuration action.
///
/// Serialises to `{"op": "...", "path": [...]}`. Actions without a path
/// (such as save) omit the `path` key entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Action {
    op: Operation,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<Vec<String>>,
}

impl Action {
    /// Creates an action with the given operation and path.
    pub fn new<I, S>(op: Operation, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            op,
            path: Some(path.into_iter().map(Into::into).collect()),
        }
    }

    /// Creates a `set` action.
    pub fn set<I, S>(path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Operation::Set, path)
    }

    /// Creates a `delete` action.
    pub fn delete<I, S>(path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Operation::Delete, path)
    }

    /// Creates a `showConfig` action for the whole tree.
    #[must_use]
    pub const fn show_config() -> Self {
        Self {
            op: Operation::ShowConfig,
            path: Some(Vec::new()),
        }
    }

    /// Creates a `save` action.
    #[must_use]
    pub const fn save() -> Self {
        Self {
            op: Operation::Save,
            path: None,
        }
    }

    /// Appends a segment to the path.
    #[must_use]
    pub fn with_segment(mut self, segment: impl Into<String>) -> Self {
        self.path.get_or_insert_with(Vec::new).push(segment.into());
        self
    }

    /// Returns the operation.
    #[must_use]
    pub const fn op(&self) -> Operation {
        self.op
    }

    /// Returns the path, if the action has one.
    #[must_use]
    pub fn path(&self) -> Option<&[String]> {
        self.path.as_deref()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self.op {
            Operation::Set => "set",
            Operation::Delete => "delete",
            Operation::ShowConfig => "showConfig",
            Operation::Save => "save",
        };
        f.write_str(op)?;
        for segment in self.path().unwrap_or_default() {
            write!(f, " {segment}")?;
        }
        Ok(())
    }
}

/// Builds the form body `data=<json>&key=<api key>`.
#[must_use]
pub fn encode_form(data: &str, api_key: &str) -> Vec<u8> {
    url::form_urlencoded::Serializer::new(String::new())
        .append_pair("data", data)
        .append_pair("key", api_key)
        .finish()
        .into_bytes()
}
