//! Resolution and validation of parameter values.

use super::definition::Parameter;
use crate::env::Environment;
use crate::error::{OcfError, Result};

/// Resolves parameter values for a single dispatch.
///
/// Values come from `OCF_RESKEY_<name>` in the environment snapshot and fall
/// back to the declared default. The snapshot is never modified.
pub struct ParameterStore<'a> {
    params: &'a [Parameter],
    env: &'a Environment,
}

impl<'a> ParameterStore<'a> {
    pub fn new(params: &'a [Parameter], env: &'a Environment) -> Self {
        Self { params, env }
    }

    pub fn descriptor(&self, name: &str) -> Result<&'a Parameter> {
        self.params
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| OcfError::UnknownParameter(name.to_string()))
    }

    /// Environment value or declared default, without running the loader.
    pub fn raw(&self, name: &str) -> Result<Option<&'a str>> {
        let param = self.descriptor(name)?;
        Ok(self.raw_for(param))
    }

    /// Effective value of a parameter.
    ///
    /// When the parameter declares a loader and a raw value exists, the
    /// loader's output is returned; a loader failure becomes an argument
    /// error naming the parameter. Otherwise the raw text is returned as is.
    pub fn resolve(&self, name: &str) -> Result<Option<String>> {
        let param = self.descriptor(name)?;
        self.resolve_for(param)
    }

    /// Like [`resolve`](Self::resolve), but absent and empty values are an
    /// argument error.
    pub fn require(&self, name: &str) -> Result<String> {
        match self.resolve(name)? {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(OcfError::required(name)),
        }
    }

    /// Check every declared parameter.
    ///
    /// First every required parameter without a default must resolve to a
    /// non-empty value, then every other parameter with a loader must load.
    /// A parameter that failed the first check is not loaded again. All
    /// parameters are checked; the returned error lists every failure in
    /// order.
    pub fn validate_all(&self) -> Result<()> {
        let mut failures: Vec<(&str, OcfError)> = Vec::new();

        for param in self.params.iter().filter(|p| p.must_be_provided()) {
            match self.resolve_for(param) {
                Ok(Some(value)) if !value.is_empty() => {}
                Ok(_) => failures.push((param.name.as_str(), OcfError::required(&param.name))),
                Err(e) => failures.push((param.name.as_str(), e)),
            }
        }

        for param in self.params.iter().filter(|p| p.loader.is_some()) {
            if failures.iter().any(|(name, _)| *name == param.name) {
                continue;
            }
            if let Err(e) = self.resolve_for(param) {
                failures.push((param.name.as_str(), e));
            }
        }

        if failures.is_empty() {
            tracing::debug!(count = self.params.len(), "all parameters valid");
            return Ok(());
        }

        for (name, err) in &failures {
            tracing::warn!(parameter = %name, "{}", err);
        }

        let message = failures
            .iter()
            .map(|(_, e)| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        Err(OcfError::Args(message))
    }

    fn raw_for(&self, param: &'a Parameter) -> Option<&'a str> {
        self.env.reskey(&param.name).or(param.default.as_deref())
    }

    fn resolve_for(&self, param: &'a Parameter) -> Result<Option<String>> {
        let raw = match self.raw_for(param) {
            Some(raw) => raw,
            None => return Ok(None),
        };

        match &param.loader {
            Some(loader) => loader(raw)
                .map(Some)
                .map_err(|e| OcfError::wrong_argument(&param.name, &e)),
            None => Ok(Some(raw.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameter::definition::loaders;

    fn params() -> Vec<Parameter> {
        vec![
            Parameter::new("ip", "Address to manage", "IP").required(true),
            Parameter::new("port", "Listen port", "Port")
                .default("80")
                .loader(loaders::integer),
            Parameter::new("label", "Free text", "Label").default("web"),
        ]
    }

    #[test]
    fn test_default_used_when_unset() {
        let params = params();
        let env = Environment::default();
        let store = ParameterStore::new(&params, &env);
        assert_eq!(store.resolve("label").unwrap().as_deref(), Some("web"));
        assert_eq!(store.raw("ip").unwrap(), None);
    }

    #[test]
    fn test_environment_wins_over_default() {
        let params = params();
        let env = Environment::from_pairs([("OCF_RESKEY_label", "api")]);
        let store = ParameterStore::new(&params, &env);
        assert_eq!(store.resolve("label").unwrap().as_deref(), Some("api"));
    }

    #[test]
    fn test_loader_output_becomes_value() {
        let params = params();
        let env = Environment::from_pairs([("OCF_RESKEY_port", "0080")]);
        let store = ParameterStore::new(&params, &env);
        assert_eq!(store.resolve("port").unwrap().as_deref(), Some("80"));
        assert_eq!(store.raw("port").unwrap(), Some("0080"));
    }

    #[test]
    fn test_unknown_parameter() {
        let params = params();
        let env = Environment::default();
        let store = ParameterStore::new(&params, &env);
        assert!(matches!(
            store.resolve("nope"),
            Err(OcfError::UnknownParameter(_))
        ));
    }

    #[test]
    fn test_require_rejects_empty() {
        let params = params();
        let env = Environment::from_pairs([("OCF_RESKEY_ip", "")]);
        let store = ParameterStore::new(&params, &env);
        let err = store.require("ip").unwrap_err();
        assert!(err.to_string().contains("'ip' is required"));
    }

    #[test]
    fn test_validate_all_reports_every_failure() {
        let params = params();
        let env = Environment::from_pairs([("OCF_RESKEY_port", "http")]);
        let store = ParameterStore::new(&params, &env);

        let err = store.validate_all().unwrap_err();
        assert!(matches!(err, OcfError::Args(_)));
        let msg = err.to_string();
        assert!(msg.contains("Argument 'ip' is required but not provided"));
        assert!(msg.contains("Argument 'port' is wrong ('http' is not an integer)"));
        assert!(msg.find("'ip'").unwrap() < msg.find("'port'").unwrap());
    }

    #[test]
    fn test_validate_all_passes() {
        let params = params();
        let env = Environment::from_pairs([("OCF_RESKEY_ip", "10.0.0.1")]);
        let store = ParameterStore::new(&params, &env);
        assert!(store.validate_all().is_ok());
    }

    #[test]
    fn test_required_failure_reported_once() {
        let params = vec![Parameter::new("n", "l", "s")
            .required(true)
            .loader(loaders::integer)];

        let env = Environment::default();
        let store = ParameterStore::new(&params, &env);
        let msg = store.validate_all().unwrap_err().to_string();
        assert_eq!(msg, "Argument 'n' is required but not provided");

        let env = Environment::from_pairs([("OCF_RESKEY_n", "")]);
        let store = ParameterStore::new(&params, &env);
        let msg = store.validate_all().unwrap_err().to_string();
        assert_eq!(msg, "Argument 'n' is wrong ('' is not an integer)");
    }

    #[test]
    fn test_required_checks_loaded_value() {
        let params = vec![Parameter::new("name", "l", "s")
            .required(true)
            .loader(|raw| Ok(raw.trim().to_string()))];
        let env = Environment::from_pairs([("OCF_RESKEY_name", "   ")]);
        let store = ParameterStore::new(&params, &env);

        let err = store.validate_all().unwrap_err();
        assert!(matches!(err, OcfError::Args(_)));
        assert_eq!(err.to_string(), "Argument 'name' is required but not provided");

        let env = Environment::from_pairs([("OCF_RESKEY_name", " web ")]);
        let store = ParameterStore::new(&params, &env);
        assert!(store.validate_all().is_ok());
    }

    #[test]
    fn test_loader_validates_default() {
        let params = vec![Parameter::new("n", "l", "s")
            .default("many")
            .loader(loaders::integer)];
        let env = Environment::default();
        let store = ParameterStore::new(&params, &env);
        assert!(store.validate_all().is_err());
    }
}
