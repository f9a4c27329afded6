//! Self-description of an agent, as consumed by cluster managers.

use super::xml::Element;
use crate::agent::{Action, Agent};
use std::io::{self, Write};

/// Version of the resource-agent API the document conforms to.
pub const OCF_SCHEMA_VERSION: &str = "1.0";

pub const XML_HEADER: &str = "<?xml version=\"1.0\"?>\n<!DOCTYPE resource-agent SYSTEM \"ra-api-1.dtd\">\n";

const LANG: &str = "en";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceAgentMeta {
    pub name: String,
    pub version: String,
    pub longdesc: String,
    pub shortdesc: String,
    pub parameters: Vec<ParameterMeta>,
    pub actions: Vec<ActionMeta>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterMeta {
    pub name: String,
    pub longdesc: String,
    pub shortdesc: String,
    pub required: bool,
    pub unique: bool,
    pub content_type: &'static str,
    pub default: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionMeta {
    pub action: Action,
    pub timeout: u32,
}

/// Describe the agent from its declarations alone.
pub fn generate(agent: &Agent) -> ResourceAgentMeta {
    let info = agent.info();

    let parameters = agent
        .params()
        .iter()
        .map(|p| ParameterMeta {
            name: p.name.clone(),
            longdesc: p.longdesc.clone(),
            shortdesc: p.shortdesc.clone(),
            required: p.required,
            unique: p.unique,
            content_type: p.ocftype.as_str(),
            default: p.effective_default().map(str::to_string),
        })
        .collect();

    let actions = agent
        .implemented_actions()
        .into_iter()
        .map(|action| ActionMeta {
            action,
            timeout: agent.timeout_for(action),
        })
        .collect();

    ResourceAgentMeta {
        name: info.name.clone(),
        version: info.version.clone(),
        longdesc: info.longdesc.clone(),
        shortdesc: info.shortdesc.clone(),
        parameters,
        actions,
    }
}

impl ResourceAgentMeta {
    pub fn to_element(&self) -> Element {
        let mut parameters = Element::new("parameters");
        for p in &self.parameters {
            let mut parameter = Element::new("parameter").attr("name", p.name.as_str());
            if p.required {
                parameter = parameter.attr("required", "1");
            }
            if p.unique {
                parameter = parameter.attr("unique", "1");
            }

            let mut content = Element::new("content").attr("type", p.content_type);
            if let Some(default) = &p.default {
                content = content.attr("default", default.as_str());
            }

            parameters = parameters.child(
                parameter
                    .child(description("longdesc", &p.longdesc))
                    .child(description("shortdesc", &p.shortdesc))
                    .child(content),
            );
        }

        let mut actions = Element::new("actions");
        for a in &self.actions {
            actions = actions.child(
                Element::new("action")
                    .attr("name", a.action.as_str())
                    .attr("timeout", a.timeout.to_string()),
            );
        }

        Element::new("resource-agent")
            .attr("name", self.name.as_str())
            .attr("version", self.version.as_str())
            .child(Element::new("version").text(OCF_SCHEMA_VERSION))
            .child(description("longdesc", &self.longdesc))
            .child(description("shortdesc", &self.shortdesc))
            .child(parameters)
            .child(actions)
    }

    /// Write the complete document: declaration, DOCTYPE, tree.
    pub fn write_xml<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(XML_HEADER.as_bytes())?;
        self.to_element().write(out)?;
        out.flush()
    }

    pub fn to_xml_string(&self) -> String {
        let mut buf = Vec::new();
        // Writing to a Vec cannot fail.
        let _ = self.write_xml(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

fn description(name: &'static str, text: &str) -> Element {
    Element::new(name).attr("lang", LANG).text(text)
}
