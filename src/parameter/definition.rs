//! Parameter descriptors.

use serde::Deserialize;
use std::fmt;
use std::sync::Arc;

/// Custom loader: turns the raw text of a parameter into its validated value.
pub type Loader = Arc<dyn Fn(&str) -> anyhow::Result<String>>;

/// Content type advertised in the metadata. Descriptive only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    #[default]
    String,
    Integer,
    Boolean,
}

impl ParamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Integer => "integer",
            ParamType::Boolean => "boolean",
        }
    }
}

/// One configurable value of an agent.
#[derive(Clone)]
pub struct Parameter {
    pub name: String,
    pub longdesc: String,
    pub shortdesc: String,
    pub ocftype: ParamType,
    pub required: bool,
    pub unique: bool,
    pub default: Option<String>,
    pub loader: Option<Loader>,
}

impl Parameter {
    pub fn new(
        name: impl Into<String>,
        longdesc: impl Into<String>,
        shortdesc: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            longdesc: longdesc.into(),
            shortdesc: shortdesc.into(),
            ocftype: ParamType::default(),
            required: false,
            unique: false,
            default: None,
            loader: None,
        }
    }

    pub fn ocftype(mut self, ocftype: ParamType) -> Self {
        self.ocftype = ocftype;
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    pub fn default(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn loader<F>(mut self, loader: F) -> Self
    where
        F: Fn(&str) -> anyhow::Result<String> + 'static,
    {
        self.loader = Some(Arc::new(loader));
        self
    }

    /// Declared default, ignoring an empty string.
    pub fn effective_default(&self) -> Option<&str> {
        self.default.as_deref().filter(|d| !d.is_empty())
    }

    /// Required and not satisfied by a default.
    pub fn must_be_provided(&self) -> bool {
        self.required && self.effective_default().is_none()
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parameter")
            .field("name", &self.name)
            .field("ocftype", &self.ocftype)
            .field("required", &self.required)
            .field("unique", &self.unique)
            .field("default", &self.default)
            .field("loader", &self.loader.is_some())
            .finish()
    }
}

/// Stock loaders for the typed OCF content kinds.
pub mod loaders {
    use anyhow::{bail, Context};

    /// Accepts a signed integer and returns its canonical decimal text.
    pub fn integer(raw: &str) -> anyhow::Result<String> {
        let value: i64 = raw
            .trim()
            .parse()
            .with_context(|| format!("'{}' is not an integer", raw))?;
        Ok(value.to_string())
    }

    /// Accepts the usual OCF boolean spellings and returns `true` or `false`.
    pub fn boolean(raw: &str) -> anyhow::Result<String> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "yes" | "true" | "on" => Ok("true".to_string()),
            "0" | "no" | "false" | "off" => Ok("false".to_string()),
            _ => bail!("'{}' is not a boolean", raw),
        }
    }
}
