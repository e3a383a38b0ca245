use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// The change an element will contribute to an osmChange document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    #[default]
    Unmodified,
    Create,
    Modify,
    Delete,
}

impl Action {
    /// Name of the osmChange section this action maps to.
    ///
    /// Unmodified elements do not appear in a change document.
    pub fn section(self) -> Option<&'static str> {
        match self {
            Action::Unmodified => None,
            Action::Create => Some("create"),
            Action::Modify => Some("modify"),
            Action::Delete => Some("delete"),
        }
    }

    pub fn as_str(self) -> &'static str {
        self.section().unwrap_or("unmodified")
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unmodified" => Ok(Action::Unmodified),
            "create" => Ok(Action::Create),
            "modify" => Ok(Action::Modify),
            "delete" => Ok(Action::Delete),
            other => Err(TypeError::UnknownAction(other.to_string())),
        }
    }
}
