//! Snapshot of the process environment an agent runs under.
//!
//! The cluster manager passes resource parameters as `OCF_RESKEY_<name>`
//! variables together with a handful of `OCF_*` and `HA_*` settings. The
//! snapshot is taken once per invocation and never re-read.

use std::collections::HashMap;
use std::ffi::OsString;

pub const RESKEY_PREFIX: &str = "OCF_RESKEY_";

#[derive(Debug, Clone, Default)]
pub struct Environment {
    vars: HashMap<String, String>,
}

impl Environment {
    /// Capture the current process environment.
    pub fn from_process() -> Self {
        Self::from_os_pairs(std::env::vars_os())
    }

    /// Build a snapshot from raw OS strings. Entries whose name or value is
    /// not valid UTF-8 are skipped.
    pub fn from_os_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        Self::from_pairs(
            pairs
                .into_iter()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?))),
        )
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self { vars }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Value of `OCF_RESKEY_<name>`.
    pub fn reskey(&self, name: &str) -> Option<&str> {
        self.get(&format!("{}{}", RESKEY_PREFIX, name))
    }

    pub fn resource_instance(&self) -> Option<&str> {
        self.get("OCF_RESOURCE_INSTANCE")
    }

    pub fn resource_type(&self) -> Option<&str> {
        self.get("OCF_RESOURCE_TYPE")
    }

    /// Depth of the monitor check requested by the cluster manager.
    pub fn check_level(&self) -> u32 {
        self.get("OCF_CHECK_LEVEL")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0)
    }

    /// `pre` or `post` during a notify action.
    pub fn notify_type(&self) -> Option<&str> {
        self.reskey("CRM_meta_notify_type")
    }

    /// Operation being notified about (`start`, `stop`, `promote`, ...).
    pub fn notify_operation(&self) -> Option<&str> {
        self.reskey("CRM_meta_notify_operation")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reskey_lookup_is_case_sensitive() {
        let env = Environment::from_pairs([("OCF_RESKEY_ip", "10.0.0.1")]);
        assert_eq!(env.reskey("ip"), Some("10.0.0.1"));
        assert_eq!(env.reskey("IP"), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_entries_are_skipped() {
        use std::os::unix::ffi::OsStringExt;

        let env = Environment::from_os_pairs([
            (OsString::from("OCF_RESKEY_ip"), OsString::from("10.0.0.1")),
            (OsString::from("BAD"), OsString::from_vec(vec![0xff])),
            (OsString::from_vec(vec![b'X', 0xfe]), OsString::from("1")),
        ]);
        assert_eq!(env.reskey("ip"), Some("10.0.0.1"));
        assert_eq!(env.get("BAD"), None);
        assert_eq!(env.vars.len(), 1);
    }

    #[test]
    fn test_runtime_accessors() {
        let env = Environment::from_pairs([
            ("OCF_RESOURCE_INSTANCE", "db:0"),
            ("OCF_RESOURCE_TYPE", "Dummy"),
            ("OCF_CHECK_LEVEL", "10"),
            ("OCF_RESKEY_CRM_meta_notify_type", "pre"),
            ("OCF_RESKEY_CRM_meta_notify_operation", "start"),
        ]);
        assert_eq!(env.resource_instance(), Some("db:0"));
        assert_eq!(env.resource_type(), Some("Dummy"));
        assert_eq!(env.check_level(), 10);
        assert_eq!(env.notify_type(), Some("pre"));
        assert_eq!(env.notify_operation(), Some("start"));
    }

    #[test]
    fn test_check_level_defaults_to_zero() {
        let env = Environment::from_pairs([("OCF_CHECK_LEVEL", "deep")]);
        assert_eq!(env.check_level(), 0);
        assert_eq!(Environment::default().check_level(), 0);
    }
}
