//! Resource agents: declarations, action registry and dispatch.
//!
//! An agent is assembled once per process with [`AgentBuilder`], either
//! entirely in code or starting from a TOML definition:
//!
//! ```toml
//! [agent]
//! name = "Dummy"
//! version = "1.0"
//! shortdesc = "Example agent"
//! timeout = 30
//!
//! [actions.start]
//! timeout = 20
//!
//! [[parameters]]
//! name = "state"
//! longdesc = "Location of the state file"
//! shortdesc = "State file"
//! unique = true
//! default = "/run/dummy.state"
//! ```
//!
//! Handlers and loaders are attached in code; the base registers
//! `meta-data`, `validate-all` and `monitor` defaults.

pub mod action;
pub mod builder;
pub mod definition;
pub mod dispatch;

pub use action::Action;
pub use builder::{ActionContext, AgentBuilder, Handler};
pub use definition::AgentDefinition;

use crate::env::Environment;
use crate::error::Result;
use crate::metadata::{self, ResourceAgentMeta};
use crate::parameter::{Parameter, ParameterStore};
use std::collections::HashMap;

/// Descriptive attributes of an agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentInfo {
    pub name: String,
    pub version: String,
    pub longdesc: String,
    pub shortdesc: String,
    /// Default timeout of every action, in seconds.
    pub timeout: u32,
    pub meta_data_timeout: u32,
}

pub struct Agent {
    info: AgentInfo,
    params: Vec<Parameter>,
    handlers: HashMap<Action, Handler>,
    timeouts: HashMap<Action, u32>,
}

impl Agent {
    pub fn builder(name: impl Into<String>) -> AgentBuilder {
        AgentBuilder::new(name)
    }

    /// Start a builder from a TOML definition.
    pub fn from_toml(content: &str) -> Result<AgentBuilder> {
        AgentDefinition::parse(content)?.into_builder()
    }

    pub fn info(&self) -> &AgentInfo {
        &self.info
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn params(&self) -> &[Parameter] {
        &self.params
    }

    pub fn param_store<'a>(&'a self, env: &'a Environment) -> ParameterStore<'a> {
        ParameterStore::new(&self.params, env)
    }

    pub fn implements(&self, action: Action) -> bool {
        self.handlers.contains_key(&action)
    }

    /// Registered actions, in the fixed verb order.
    pub fn implemented_actions(&self) -> Vec<Action> {
        Action::ALL
            .into_iter()
            .filter(|a| self.implements(*a))
            .collect()
    }

    /// Advertised timeout of an action in seconds.
    pub fn timeout_for(&self, action: Action) -> u32 {
        if let Some(timeout) = self.timeouts.get(&action) {
            return *timeout;
        }
        match action {
            Action::MetaData => self.info.meta_data_timeout,
            _ => self.info.timeout,
        }
    }

    pub fn metadata(&self) -> ResourceAgentMeta {
        metadata::generate(self)
    }

    pub(crate) fn handler(&self, action: Action) -> Option<&Handler> {
        self.handlers.get(&action)
    }
}
