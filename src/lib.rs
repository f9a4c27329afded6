#![forbid(unsafe_code)]

pub mod agent;
pub mod cli;
pub mod env;
pub mod error;
pub mod exit;
pub mod logging;
pub mod metadata;
pub mod parameter;
pub mod version;

pub use agent::{Action, ActionContext, Agent, AgentBuilder, AgentDefinition};
pub use env::Environment;
pub use error::{OcfError, Result};
pub use exit::Status;
pub use parameter::{loaders, ParamType, Parameter, ParameterStore};
