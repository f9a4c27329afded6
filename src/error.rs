use thiserror::Error;

use crate::exit;

/// Failing outcome of an agent action or of the framework itself.
///
/// The first group mirrors the OCF error exit codes; the second group are
/// framework failures that surface as a generic error to the cluster manager.
#[derive(Error, Debug)]
pub enum OcfError {
    #[error("{0}")]
    Generic(String),

    #[error("{0}")]
    Args(String),

    #[error("{0}")]
    Unimplemented(String),

    #[error("Insufficient privileges: {0}")]
    Perm(String),

    #[error("Not installed: {0}")]
    NotInstalled(String),

    #[error("Not configured: {0}")]
    NotConfigured(String),

    #[error("Failed master: {0}")]
    FailedMaster(String),

    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),

    #[error("Invalid agent definition: {0}")]
    InvalidDefinition(String),

    #[error("Agent definition parse error: {0}")]
    DefinitionParse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl OcfError {
    /// "not implemented", the outcome of unknown or unregistered verbs.
    pub fn unimplemented() -> Self {
        OcfError::Unimplemented("not implemented".to_string())
    }

    pub fn required(param: &str) -> Self {
        OcfError::Args(format!("Argument '{}' is required but not provided", param))
    }

    pub fn wrong_argument(param: &str, cause: &anyhow::Error) -> Self {
        OcfError::Args(format!("Argument '{}' is wrong ({})", param, cause))
    }

    /// OCF exit code reported to the cluster manager.
    pub fn exit_code(&self) -> u8 {
        match self {
            OcfError::Args(_) => exit::OCF_ERR_ARGS,
            OcfError::Unimplemented(_) => exit::OCF_ERR_UNIMPLEMENTED,
            OcfError::Perm(_) => exit::OCF_ERR_PERM,
            OcfError::NotInstalled(_) => exit::OCF_ERR_INSTALLED,
            OcfError::NotConfigured(_) => exit::OCF_ERR_CONFIGURED,
            OcfError::FailedMaster(_) => exit::OCF_FAILED_MASTER,
            OcfError::Generic(_)
            | OcfError::UnknownParameter(_)
            | OcfError::InvalidDefinition(_)
            | OcfError::DefinitionParse(_)
            | OcfError::Io(_) => exit::OCF_ERR_GENERIC,
        }
    }
}

pub type Result<T> = std::result::Result<T, OcfError>;
