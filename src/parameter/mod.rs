//! Parameter declarations and their resolution from the environment.

pub mod definition;
pub mod store;

pub use definition::{loaders, Loader, ParamType, Parameter};
pub use store::ParameterStore;
