//! The fixed set of lifecycle verbs.

use crate::error::OcfError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    MetaData,
    ValidateAll,
    Start,
    Stop,
    Monitor,
    Notify,
}

impl Action {
    /// Every verb an agent may implement, in metadata order.
    pub const ALL: [Action; 6] = [
        Action::MetaData,
        Action::ValidateAll,
        Action::Start,
        Action::Stop,
        Action::Monitor,
        Action::Notify,
    ];

    /// Verb as passed on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::MetaData => "meta-data",
            Action::ValidateAll => "validate-all",
            Action::Start => "start",
            Action::Stop => "stop",
            Action::Monitor => "monitor",
            Action::Notify => "notify",
        }
    }

    /// Handler name of the verb: hyphens become underscores.
    pub fn handler_name(&self) -> String {
        self.as_str().replace('-', "_")
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = OcfError;

    fn from_str(verb: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|a| a.as_str() == verb)
            .ok_or_else(OcfError::unimplemented)
    }
}
