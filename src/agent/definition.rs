//! Data structures for parsing agent definition TOML files.

use super::action::Action;
use super::builder::AgentBuilder;
use crate::error::{OcfError, Result};
use crate::parameter::{ParamType, Parameter};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Static declarations of an agent loaded from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentDefinition {
    pub agent: AgentMeta,

    /// Per-action settings keyed by verb (`start`, `meta-data`, `meta_data`, ...)
    #[serde(default)]
    pub actions: BTreeMap<String, ActionConfig>,

    #[serde(default)]
    pub parameters: Vec<ParameterConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AgentMeta {
    pub name: String,

    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub longdesc: Option<String>,

    #[serde(default)]
    pub shortdesc: Option<String>,

    #[serde(default)]
    pub timeout: Option<u32>,

    #[serde(default)]
    pub meta_data_timeout: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ActionConfig {
    #[serde(default)]
    pub timeout: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParameterConfig {
    pub name: String,
    pub longdesc: String,
    pub shortdesc: String,

    #[serde(rename = "type", default)]
    pub ocftype: ParamType,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub unique: bool,

    #[serde(default)]
    pub default: Option<String>,
}

impl AgentDefinition {
    pub fn parse(content: &str) -> Result<Self> {
        let definition: AgentDefinition = toml::from_str(content)?;
        Ok(definition)
    }

    /// Turn the declarations into a builder; handlers and loaders are added
    /// by the caller.
    pub fn into_builder(self) -> Result<AgentBuilder> {
        if self.agent.name.is_empty() {
            return Err(OcfError::InvalidDefinition(
                "Agent name cannot be empty".to_string(),
            ));
        }

        let mut builder = AgentBuilder::new(self.agent.name.clone());
        if let Some(version) = self.agent.version {
            builder = builder.version(version);
        }
        if let Some(longdesc) = self.agent.longdesc {
            builder = builder.longdesc(longdesc);
        }
        if let Some(shortdesc) = self.agent.shortdesc {
            builder = builder.shortdesc(shortdesc);
        }
        if let Some(timeout) = self.agent.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = self.agent.meta_data_timeout {
            builder = builder.meta_data_timeout(timeout);
        }

        for (verb, config) in self.actions {
            let action = parse_action_key(&verb).ok_or_else(|| {
                OcfError::InvalidDefinition(format!(
                    "Agent '{}' configures unknown action '{}'",
                    self.agent.name, verb
                ))
            })?;
            if let Some(timeout) = config.timeout {
                builder = builder.action_timeout(action, timeout);
            }
        }

        for p in self.parameters {
            let mut param = Parameter::new(p.name, p.longdesc, p.shortdesc)
                .ocftype(p.ocftype)
                .required(p.required)
                .unique(p.unique);
            param.default = p.default;
            builder = builder.parameter(param);
        }

        Ok(builder)
    }
}

/// Accepts both the verb and its handler spelling.
fn parse_action_key(key: &str) -> Option<Action> {
    Action::ALL
        .into_iter()
        .find(|a| a.as_str() == key || a.handler_name() == key)
}
