//! Process entry point shared by agent binaries.
//!
//! The cluster manager runs `<agent> <action>`; the action is the first
//! positional argument and anything after it is ignored.

use crate::agent::Agent;
use crate::env::Environment;
use crate::error::Result;
use crate::exit::{self, Status};
use crate::logging::{self, LogSettings};
use clap::error::ErrorKind;
use clap::{CommandFactory, FromArgMatches, Parser};
use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(about = "OCF resource agent", long_about = None)]
#[command(version = crate::version::VERSION)]
pub struct Cli {
    /// Action to perform (meta-data, validate-all, start, stop, monitor, notify)
    #[arg(value_name = "ACTION")]
    pub action: String,

    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub rest: Vec<String>,
}

/// Parse argv for `agent`, naming the binary after it in usage output.
pub fn parse_args<I, T>(agent: &Agent, args: I) -> std::result::Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let actions = agent
        .implemented_actions()
        .iter()
        .map(|a| format!("  {}", a))
        .collect::<Vec<_>>()
        .join("\n");

    let mut command = Cli::command()
        .bin_name(agent.name().to_string())
        .about(agent.info().shortdesc.clone())
        .after_help(format!("ACTIONS:\n{}", actions));

    let matches = command.try_get_matches_from_mut(args)?;
    Cli::from_arg_matches(&matches)
}

/// Dispatch a parsed command line and report failures on stderr.
pub fn execute(agent: &Agent, cli: &Cli, env: &Environment, out: &mut dyn Write) -> Result<Status> {
    let outcome = agent.dispatch(&cli.action, env, out);
    if let Err(e) = &outcome {
        eprintln!("{}: {}: {}", agent.name(), cli.action, e);
    }
    outcome
}

/// Full agent run: parse argv, snapshot the environment, set up logging,
/// dispatch, and map the outcome to an OCF exit code.
pub fn run<I, T>(agent: &Agent, args: I) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match parse_args(agent, args) {
        Ok(cli) => cli,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => exit::OCF_SUCCESS,
                _ => exit::OCF_ERR_ARGS,
            };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    let env = Environment::from_process();
    if let Err(e) = logging::init_logging(&LogSettings::from_env(&env)) {
        eprintln!("Warning: {}", e);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let outcome = execute(agent, &cli, &env, &mut out);
    ExitCode::from(exit::exit_code(&outcome))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent() -> Agent {
        Agent::builder("demo")
            .shortdesc("Demo agent")
            .build()
            .unwrap()
    }

    #[test]
    fn test_action_is_first_positional() {
        let cli = parse_args(&agent(), ["demo", "monitor", "--extra", "ignored"]).unwrap();
        assert_eq!(cli.action, "monitor");
        assert_eq!(cli.rest, vec!["--extra", "ignored"]);
    }

    #[test]
    fn test_missing_action_is_an_error() {
        let err = parse_args(&agent(), ["demo"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_help_lists_implemented_actions() {
        let err = parse_args(&agent(), ["demo", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        let help = err.to_string();
        assert!(help.contains("Demo agent"));
        assert!(help.contains("validate-all"));
    }

    #[test]
    fn test_execute_unknown_action() {
        let cli = parse_args(&agent(), ["demo", "promote"]).unwrap();
        let mut out = Vec::new();
        let outcome = execute(&agent(), &cli, &Environment::default(), &mut out);
        assert_eq!(exit::exit_code(&outcome), exit::OCF_ERR_UNIMPLEMENTED);
    }
}
