use super::action::Action;
use super::dispatch;
use super::{Agent, AgentInfo};
use crate::env::Environment;
use crate::error::{OcfError, Result};
use crate::exit::Status;
use crate::parameter::{Loader, Parameter, ParameterStore};
use std::collections::{HashMap, HashSet};
use std::io::Write;
use std::sync::Arc;

/// Implementation of one lifecycle action.
pub type Handler = Box<dyn Fn(&mut ActionContext<'_>) -> Result<Status>>;

/// Everything a handler can see during a dispatch.
pub struct ActionContext<'a> {
    pub agent: &'a Agent,
    pub params: ParameterStore<'a>,
    pub env: &'a Environment,
    pub action: Action,
    /// Standard output of the agent.
    pub out: &'a mut dyn Write,
}

/// Assembles an [`Agent`].
///
/// Declaration mistakes (duplicate parameters, loaders for undeclared
/// parameters) are collected and reported by [`build`](Self::build).
pub struct AgentBuilder {
    info: AgentInfo,
    params: Vec<Parameter>,
    handlers: HashMap<Action, Handler>,
    timeouts: HashMap<Action, u32>,
    loaders: Vec<(String, Loader)>,
}

impl AgentBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        let mut builder = Self {
            info: AgentInfo {
                name: name.into(),
                version: "1.0".to_string(),
                longdesc: "Resource agent".to_string(),
                shortdesc: "RA".to_string(),
                timeout: 30,
                meta_data_timeout: 5,
            },
            params: Vec::new(),
            handlers: HashMap::new(),
            timeouts: HashMap::new(),
            loaders: Vec::new(),
        };

        let defaults: [(Action, Handler); 3] = [
            (Action::MetaData, Box::new(dispatch::default_meta_data)),
            (Action::ValidateAll, Box::new(dispatch::default_validate_all)),
            (Action::Monitor, Box::new(dispatch::default_monitor)),
        ];
        builder.handlers.extend(defaults);
        builder
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.info.version = version.into();
        self
    }

    pub fn longdesc(mut self, longdesc: impl Into<String>) -> Self {
        self.info.longdesc = longdesc.into();
        self
    }

    pub fn shortdesc(mut self, shortdesc: impl Into<String>) -> Self {
        self.info.shortdesc = shortdesc.into();
        self
    }

    pub fn timeout(mut self, seconds: u32) -> Self {
        self.info.timeout = seconds;
        self
    }

    pub fn meta_data_timeout(mut self, seconds: u32) -> Self {
        self.info.meta_data_timeout = seconds;
        self
    }

    pub fn parameter(mut self, param: Parameter) -> Self {
        self.params.push(param);
        self
    }

    /// Attach a custom loader to a declared parameter.
    pub fn loader<F>(mut self, name: impl Into<String>, loader: F) -> Self
    where
        F: Fn(&str) -> anyhow::Result<String> + 'static,
    {
        self.loaders.push((name.into(), Arc::new(loader)));
        self
    }

    /// Register or replace the handler of an action.
    pub fn action<F>(mut self, action: Action, handler: F) -> Self
    where
        F: Fn(&mut ActionContext<'_>) -> Result<Status> + 'static,
    {
        self.handlers.insert(action, Box::new(handler));
        self
    }

    /// Override the advertised timeout of one action.
    pub fn action_timeout(mut self, action: Action, seconds: u32) -> Self {
        self.timeouts.insert(action, seconds);
        self
    }

    pub fn start<F>(self, handler: F) -> Self
    where
        F: Fn(&mut ActionContext<'_>) -> Result<Status> + 'static,
    {
        self.action(Action::Start, handler)
    }

    pub fn stop<F>(self, handler: F) -> Self
    where
        F: Fn(&mut ActionContext<'_>) -> Result<Status> + 'static,
    {
        self.action(Action::Stop, handler)
    }

    pub fn monitor<F>(self, handler: F) -> Self
    where
        F: Fn(&mut ActionContext<'_>) -> Result<Status> + 'static,
    {
        self.action(Action::Monitor, handler)
    }

    pub fn notify<F>(self, handler: F) -> Self
    where
        F: Fn(&mut ActionContext<'_>) -> Result<Status> + 'static,
    {
        self.action(Action::Notify, handler)
    }

    pub fn build(self) -> Result<Agent> {
        let AgentBuilder {
            info,
            mut params,
            handlers,
            timeouts,
            loaders,
        } = self;

        let mut seen = HashSet::new();
        for param in &params {
            if !seen.insert(param.name.as_str()) {
                return Err(OcfError::InvalidDefinition(format!(
                    "Agent '{}' declares parameter '{}' more than once",
                    info.name, param.name
                )));
            }
        }

        for (name, loader) in loaders {
            let param = params.iter_mut().find(|p| p.name == name).ok_or_else(|| {
                OcfError::InvalidDefinition(format!(
                    "Agent '{}' has a loader for undeclared parameter '{}'",
                    info.name, name
                ))
            })?;
            param.loader = Some(loader);
        }

        tracing::debug!(
            agent = %info.name,
            params = params.len(),
            actions = handlers.len(),
            "agent built"
        );

        Ok(Agent {
            info,
            params,
            handlers,
            timeouts,
        })
    }
}
