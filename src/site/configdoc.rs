// SPDX-License-Identifier: MIT
//! Read-modify-write access to XML configuration documents.
//!
//! The checks only need a narrow surface: select a node by element path,
//! find a child by name + attribute value, read/overwrite attributes, append
//! child elements, set text content, and persist the document back to its
//! path. Paths are `/`-separated element names relative to the document
//! root (the original documents select from the root, so
//! `system.web/customErrors` addresses `<configuration><system.web>
//! <customErrors>`).

use std::path::{Path, PathBuf};

use xmltree::{Element, EmitterConfig, XMLNode};

use crate::error::{HealthCheckError, Result};

pub struct ConfigDocument {
    path: PathBuf,
    root: Element,
}

impl ConfigDocument {
    /// Load and parse the document at `path`. A missing file is a `Read`
    /// error; callers that treat absence as a reportable condition should
    /// test existence first.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let bytes = std::fs::read(&path).map_err(|source| HealthCheckError::Read {
            path: path.clone(),
            source,
        })?;
        let root = Element::parse(bytes.as_slice()).map_err(|source| HealthCheckError::Parse {
            path: path.clone(),
            source,
        })?;
        Ok(Self { path, root })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Select a node by element path relative to the root, e.g.
    /// `"system.web/customErrors"`. Returns `None` when any segment is
    /// absent.
    pub fn node(&self, path: &str) -> Option<&Element> {
        let mut current = &self.root;
        for segment in path.split('/') {
            current = current.get_child(segment)?;
        }
        Some(current)
    }

    pub fn node_mut(&mut self, path: &str) -> Option<&mut Element> {
        let mut current = &mut self.root;
        for segment in path.split('/') {
            current = current.get_mut_child(segment)?;
        }
        Some(current)
    }

    /// Select a node by element path, creating any missing segments along
    /// the way. Existing nodes are reused, so repeated calls never produce
    /// duplicate siblings.
    pub fn ensure_node(&mut self, path: &str) -> &mut Element {
        let mut current = &mut self.root;
        for segment in path.split('/') {
            if current.get_child(segment).is_none() {
                current
                    .children
                    .push(XMLNode::Element(Element::new(segment)));
            }
            current = current
                .get_mut_child(segment)
                .expect("segment ensured above");
        }
        current
    }

    /// Persist the document back to the path it was loaded from.
    pub fn save(&self) -> Result<()> {
        let file = std::fs::File::create(&self.path).map_err(|source| HealthCheckError::Write {
            path: self.path.clone(),
            source,
        })?;
        let config = EmitterConfig::new().perform_indent(true);
        self.root
            .write_with_config(file, config)
            .map_err(|source| HealthCheckError::Emit {
                path: self.path.clone(),
                source,
            })
    }
}

/// First child element of `parent` with the given name whose attribute
/// `attr` equals `value`.
pub fn child_with_attr<'a>(
    parent: &'a Element,
    name: &str,
    attr: &str,
    value: &str,
) -> Option<&'a Element> {
    child_elements(parent)
        .find(|el| el.name == name && el.attributes.get(attr).map(String::as_str) == Some(value))
}

/// Iterate the element children of `parent` (text and comment nodes
/// skipped).
pub fn child_elements(parent: &Element) -> impl Iterator<Item = &Element> {
    parent.children.iter().filter_map(|node| match node {
        XMLNode::Element(el) => Some(el),
        _ => None,
    })
}

/// Append a child element with the given attributes. The caller is
/// responsible for presence-testing first; fixes in this crate do, to stay
/// idempotent.
pub fn append_child(parent: &mut Element, name: &str, attrs: &[(&str, &str)]) {
    let mut el = Element::new(name);
    for (k, v) in attrs {
        el.attributes.insert((*k).to_string(), (*v).to_string());
    }
    parent.children.push(XMLNode::Element(el));
}

/// Append a child element carrying only text content.
pub fn append_text_child(parent: &mut Element, name: &str, text: &str) {
    let mut el = Element::new(name);
    el.children.push(XMLNode::Text(text.to_string()));
    parent.children.push(XMLNode::Element(el));
}

/// Text content of an element, trimmed; empty string when there is none.
pub fn text_of(el: &Element) -> String {
    el.get_text().map(|t| t.trim().to_string()).unwrap_or_default()
}
