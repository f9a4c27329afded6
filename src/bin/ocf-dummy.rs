#![forbid(unsafe_code)]

//! Dummy resource agent: tracks "running" with a state file.

use anyhow::bail;
use ocf_ra::{cli, ActionContext, Agent, OcfError, Result, Status};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const DEFINITION: &str = include_str!("../../agents/dummy/agent.toml");

fn main() -> ExitCode {
    match build_agent() {
        Ok(agent) => cli::run(&agent, std::env::args_os()),
        Err(e) => {
            eprintln!("ocf-dummy: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn build_agent() -> Result<Agent> {
    Agent::from_toml(DEFINITION)?
        .loader("state", absolute_path)
        .start(start)
        .stop(stop)
        .monitor(monitor)
        .build()
}

fn absolute_path(raw: &str) -> anyhow::Result<String> {
    if !Path::new(raw).is_absolute() {
        bail!("'{}' is not an absolute path", raw);
    }
    Ok(raw.to_string())
}

fn state_file(ctx: &ActionContext<'_>) -> Result<PathBuf> {
    Ok(PathBuf::from(ctx.params.require("state")?))
}

fn monitor(ctx: &mut ActionContext<'_>) -> Result<Status> {
    if state_file(ctx)?.exists() {
        Ok(Status::Success)
    } else {
        Ok(Status::NotRunning)
    }
}

fn start(ctx: &mut ActionContext<'_>) -> Result<Status> {
    ctx.params.validate_all()?;
    if monitor(ctx)? == Status::Success {
        return Ok(Status::Success);
    }

    let path = state_file(ctx)?;
    let stamp = chrono::Utc::now().to_rfc3339();
    std::fs::write(&path, format!("{}\n", stamp)).map_err(|e| {
        OcfError::Generic(format!("Cannot write state file {}: {}", path.display(), e))
    })?;
    tracing::info!(state = %path.display(), "started");
    Ok(Status::Success)
}

fn stop(ctx: &mut ActionContext<'_>) -> Result<Status> {
    let path = state_file(ctx)?;
    if path.exists() {
        std::fs::remove_file(&path).map_err(|e| {
            OcfError::Generic(format!("Cannot remove state file {}: {}", path.display(), e))
        })?;
    }
    tracing::info!(state = %path.display(), "stopped");
    Ok(Status::Success)
}
