//! OCF exit codes and the successful action outcomes.

use std::fmt;

use crate::error::Result;

pub const OCF_SUCCESS: u8 = 0;
pub const OCF_ERR_GENERIC: u8 = 1;
pub const OCF_ERR_ARGS: u8 = 2;
pub const OCF_ERR_UNIMPLEMENTED: u8 = 3;
pub const OCF_ERR_PERM: u8 = 4;
pub const OCF_ERR_INSTALLED: u8 = 5;
pub const OCF_ERR_CONFIGURED: u8 = 6;
pub const OCF_NOT_RUNNING: u8 = 7;
pub const OCF_RUNNING_MASTER: u8 = 8;
pub const OCF_FAILED_MASTER: u8 = 9;

/// Non-error result of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    /// The resource is confirmed absent. Not a failure.
    NotRunning,
    RunningMaster,
}

impl Status {
    pub fn exit_code(self) -> u8 {
        match self {
            Status::Success => OCF_SUCCESS,
            Status::NotRunning => OCF_NOT_RUNNING,
            Status::RunningMaster => OCF_RUNNING_MASTER,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Success => "success",
            Status::NotRunning => "not running",
            Status::RunningMaster => "running master",
        };
        f.write_str(s)
    }
}

/// Map the outcome of a dispatch to the process exit code.
pub fn exit_code(outcome: &Result<Status>) -> u8 {
    match outcome {
        Ok(status) => status.exit_code(),
        Err(e) => e.exit_code(),
    }
}
