//! Minimal XML element tree and writer for the metadata document.

use std::borrow::Cow;
use std::io::{self, Write};

const INDENT: &str = "  ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: &'static str,
    pub attrs: Vec<(&'static str, String)>,
    pub text: Option<String>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            attrs: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Direct children with the given element name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |c| c.name == name)
    }

    pub fn write<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        self.write_at(out, 0)
    }

    fn write_at<W: Write + ?Sized>(&self, out: &mut W, depth: usize) -> io::Result<()> {
        let pad = INDENT.repeat(depth);
        write!(out, "{}<{}", pad, self.name)?;
        for (name, value) in &self.attrs {
            write!(out, " {}=\"{}\"", name, escape_attr(value))?;
        }

        match (&self.text, self.children.is_empty()) {
            (None, true) => writeln!(out, "/>"),
            (Some(text), true) => {
                writeln!(out, ">{}</{}>", escape_text(text), self.name)
            }
            (text, false) => {
                write!(out, ">")?;
                if let Some(text) = text {
                    write!(out, "{}", escape_text(text))?;
                }
                writeln!(out)?;
                for child in &self.children {
                    child.write_at(out, depth + 1)?;
                }
                writeln!(out, "{}</{}>", pad, self.name)
            }
        }
    }
}

pub fn escape_text(s: &str) -> Cow<'_, str> {
    escape(s, false)
}

pub fn escape_attr(s: &str) -> Cow<'_, str> {
    escape(s, true)
}

fn escape(s: &str, attr: bool) -> Cow<'_, str> {
    let needs_escape = |c: char| matches!(c, '&' | '<' | '>') || (attr && matches!(c, '"' | '\n'));
    if !s.contains(needs_escape) {
        return Cow::Borrowed(s);
    }

    let mut escaped = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' if attr => escaped.push_str("&quot;"),
            '\n' if attr => escaped.push_str("&#10;"),
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
