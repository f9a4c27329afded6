//! Metadata generation and its XML rendering.

pub mod generator;
pub mod xml;

pub use generator::{
    generate, ActionMeta, ParameterMeta, ResourceAgentMeta, OCF_SCHEMA_VERSION, XML_HEADER,
};
