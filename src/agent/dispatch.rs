//! Verb dispatch and the handlers every agent starts with.

use super::action::Action;
use super::builder::ActionContext;
use super::Agent;
use crate::env::Environment;
use crate::error::{OcfError, Result};
use crate::exit::Status;
use crate::parameter::ParameterStore;
use std::io::Write;

impl Agent {
    /// Run the action named by `verb`.
    ///
    /// Verbs outside the fixed set and verbs without a registered handler
    /// fail as unimplemented. Otherwise the handler's result is returned.
    pub fn dispatch<'a>(
        &'a self,
        verb: &str,
        env: &'a Environment,
        out: &'a mut dyn Write,
    ) -> Result<Status> {
        let action = verb.parse::<Action>().inspect_err(|_| {
            tracing::warn!(agent = %self.name(), verb, "unknown action");
        })?;

        let handler = self.handler(action).ok_or_else(|| {
            tracing::warn!(agent = %self.name(), %action, "action not implemented");
            OcfError::unimplemented()
        })?;

        tracing::debug!(agent = %self.name(), %action, "dispatching");

        let mut ctx = ActionContext {
            agent: self,
            params: ParameterStore::new(self.params(), env),
            env,
            action,
            out,
        };

        let outcome = handler(&mut ctx);
        match &outcome {
            Ok(status) => tracing::info!(agent = %self.name(), %action, %status, "action finished"),
            Err(e) => tracing::error!(agent = %self.name(), %action, error = %e, "action failed"),
        }
        outcome
    }
}

pub(crate) fn default_meta_data(ctx: &mut ActionContext<'_>) -> Result<Status> {
    ctx.agent.metadata().write_xml(&mut *ctx.out)?;
    Ok(Status::Success)
}

pub(crate) fn default_validate_all(ctx: &mut ActionContext<'_>) -> Result<Status> {
    ctx.params.validate_all()?;
    Ok(Status::Success)
}

pub(crate) fn default_monitor(_ctx: &mut ActionContext<'_>) -> Result<Status> {
    tracing::debug!("monitor: not running");
    Ok(Status::NotRunning)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameter::Parameter;

    fn run(agent: &Agent, verb: &str, env: &Environment) -> (Result<Status>, String) {
        let mut out = Vec::new();
        let outcome = agent.dispatch(verb, env, &mut out);
        (outcome, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_unknown_verb() {
        let agent = Agent::builder("a").build().unwrap();
        let (outcome, out) = run(&agent, "reload", &Environment::default());
        assert!(matches!(outcome, Err(OcfError::Unimplemented(_))));
        assert!(out.is_empty());
    }

    #[test]
    fn test_unregistered_verb() {
        let agent = Agent::builder("a").build().unwrap();
        for verb in ["start", "stop", "notify"] {
            let (outcome, _) = run(&agent, verb, &Environment::default());
            assert!(matches!(outcome, Err(OcfError::Unimplemented(_))), "{}", verb);
        }
    }

    #[test]
    fn test_default_monitor_not_running() {
        let agent = Agent::builder("a").build().unwrap();
        let (outcome, _) = run(&agent, "monitor", &Environment::default());
        assert_eq!(outcome.unwrap(), Status::NotRunning);
    }

    #[test]
    fn test_meta_data_writes_document() {
        let agent = Agent::builder("a").build().unwrap();
        let (outcome, out) = run(&agent, "meta-data", &Environment::default());
        assert_eq!(outcome.unwrap(), Status::Success);
        assert!(out.starts_with("<?xml version=\"1.0\"?>\n<!DOCTYPE resource-agent SYSTEM \"ra-api-1.dtd\">\n"));
        assert!(out.ends_with("</resource-agent>\n"));
    }

    #[test]
    fn test_handler_sees_parameters_and_action() {
        let agent = Agent::builder("a")
            .parameter(Parameter::new("name", "l", "s"))
            .start(|ctx| {
                assert_eq!(ctx.action, Action::Start);
                let name = ctx.params.require("name")?;
                writeln!(ctx.out, "hello {}", name)?;
                Ok(Status::Success)
            })
            .build()
            .unwrap();

        let env = Environment::from_pairs([("OCF_RESKEY_name", "world")]);
        let (outcome, out) = run(&agent, "start", &env);
        assert_eq!(outcome.unwrap(), Status::Success);
        assert_eq!(out, "hello world\n");

        let (outcome, _) = run(&agent, "start", &Environment::default());
        assert!(matches!(outcome, Err(OcfError::Args(_))));
    }

    #[test]
    fn test_handler_error_is_the_outcome() {
        let agent = Agent::builder("a")
            .stop(|_| Err(OcfError::Perm("cannot stop".into())))
            .build()
            .unwrap();
        let (outcome, _) = run(&agent, "stop", &Environment::default());
        assert_eq!(outcome.unwrap_err().exit_code(), 4);
    }
}
