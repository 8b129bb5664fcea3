//! XML document handling
//!
//! This module parses XML text into an owned element tree with every
//! element and attribute name resolved against its in-scope namespaces.
//! Mapping files and bundled schemas are both read through it.

use crate::error::{Error, Result};
use crate::limits::Limits;
use crate::namespaces::{NamespaceContext, QName};
use indexmap::IndexMap;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// XML Element in the document tree
#[derive(Debug, Clone)]
pub struct Element {
    /// Element qualified name
    pub qname: QName,
    /// Element attributes in document order, excluding namespace declarations
    pub attributes: IndexMap<QName, String>,
    /// Text content (if any)
    pub text: Option<String>,
    /// Child elements
    pub children: Vec<Element>,
    /// Namespace scope of this element
    pub namespaces: NamespaceContext,
    /// Byte offset just past the start tag
    pub position: usize,
}

impl Element {
    /// Create a new element
    pub fn new(qname: QName) -> Self {
        Self {
            qname,
            attributes: IndexMap::new(),
            text: None,
            children: Vec::new(),
            namespaces: NamespaceContext::new(),
            position: 0,
        }
    }

    /// Get the local name of the element
    pub fn local_name(&self) -> &str {
        &self.qname.local_name
    }

    /// Get the namespace of the element
    pub fn namespace(&self) -> Option<&str> {
        self.qname.namespace.as_deref()
    }

    /// Get an unqualified attribute value by local name
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(qname, _)| qname.namespace.is_none() && qname.local_name == name)
            .map(|(_, value)| value.as_str())
    }

    /// Get an attribute value by qualified name
    pub fn get_attribute_qname(&self, qname: &QName) -> Option<&str> {
        self.attributes.get(qname).map(|s| s.as_str())
    }

    /// Add a child element
    pub fn add_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Append character data
    pub fn append_text(&mut self, text: &str) {
        match self.text {
            Some(ref mut existing) => existing.push_str(text),
            None => self.text = Some(text.to_string()),
        }
    }

    /// Text content, empty when the element has none
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    /// Iterate over child elements with the given local name
    pub fn children_named<'a, 'n>(&'a self, local_name: &'n str) -> impl Iterator<Item = &'a Element> + 'n
    where
        'a: 'n,
    {
        self.children
            .iter()
            .filter(move |e| e.local_name() == local_name)
    }

    /// First child element with the given local name
    pub fn child(&self, local_name: &str) -> Option<&Element> {
        self.children.iter().find(|e| e.local_name() == local_name)
    }

    /// Text of the first child element with the given local name
    pub fn child_text(&self, local_name: &str) -> Option<&str> {
        self.child(local_name).map(|e| e.text().trim())
    }
}

/// XML Document representation
#[derive(Debug, Default)]
pub struct Document {
    /// Root element of the document
    pub root: Option<Element>,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an XML document from a string with default limits
    pub fn from_string(xml: &str) -> Result<Self> {
        Self::parse(xml, &Limits::default())
    }

    /// Parse an XML document from a string
    pub fn parse(xml: &str, limits: &Limits) -> Result<Self> {
        limits.check_xml_size(xml.len())?;

        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        let mut doc = Document::new();
        let mut element_stack: Vec<Element> = Vec::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    limits.check_xml_depth(element_stack.len() + 1)?;
                    let scope = element_stack.last().map(|parent| &parent.namespaces);
                    let element =
                        Self::parse_element(&e, scope, limits, reader.buffer_position())?;
                    element_stack.push(element);
                }
                Ok(Event::Empty(e)) => {
                    limits.check_xml_depth(element_stack.len() + 1)?;
                    let scope = element_stack.last().map(|parent| &parent.namespaces);
                    let element =
                        Self::parse_element(&e, scope, limits, reader.buffer_position())?;
                    Self::attach(&mut doc, &mut element_stack, element)?;
                }
                Ok(Event::End(_)) => {
                    let element = element_stack.pop().ok_or_else(|| {
                        Error::Xml(format!(
                            "Unexpected end tag at position {}",
                            reader.buffer_position()
                        ))
                    })?;
                    Self::attach(&mut doc, &mut element_stack, element)?;
                }
                Ok(Event::Text(e)) => {
                    let text = e
                        .unescape()
                        .map_err(|e| Error::Xml(format!("Failed to unescape text: {}", e)))?;
                    match element_stack.last_mut() {
                        Some(current) => current.append_text(&text),
                        None if text.trim().is_empty() => {}
                        None => {
                            return Err(Error::Xml(format!(
                                "Text outside of the root element at position {}",
                                reader.buffer_position()
                            )))
                        }
                    }
                }
                Ok(Event::CData(e)) => {
                    let bytes = e.into_inner();
                    let text = std::str::from_utf8(&bytes)
                        .map_err(|e| Error::Xml(format!("Invalid CDATA section: {}", e)))?;
                    if let Some(current) = element_stack.last_mut() {
                        current.append_text(text);
                    }
                }
                Ok(Event::DocType(_)) => {
                    return Err(Error::Xml(
                        "Document type declarations are not allowed".to_string(),
                    ))
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::Xml(format!(
                        "Error parsing XML at position {}: {}",
                        reader.buffer_position(),
                        e
                    )))
                }
                _ => {} // Declarations, comments and processing instructions
            }
        }

        if let Some(open) = element_stack.last() {
            return Err(Error::Xml(format!(
                "Unexpected end of document: element '{}' is not closed",
                open.local_name()
            )));
        }
        if doc.root.is_none() {
            return Err(Error::Xml("Document has no root element".to_string()));
        }

        Ok(doc)
    }

    /// Hand a finished element to its parent, or make it the root
    fn attach(doc: &mut Document, stack: &mut [Element], element: Element) -> Result<()> {
        if let Some(parent) = stack.last_mut() {
            parent.add_child(element);
        } else if doc.root.is_some() {
            return Err(Error::Xml(format!(
                "Second root element '{}'",
                element.local_name()
            )));
        } else {
            doc.root = Some(element);
        }
        Ok(())
    }

    /// Parse element from BytesStart event
    fn parse_element(
        start: &BytesStart,
        parent_scope: Option<&NamespaceContext>,
        limits: &Limits,
        position: usize,
    ) -> Result<Element> {
        let name = std::str::from_utf8(start.name().as_ref())
            .map_err(|e| Error::Xml(format!("Invalid element name: {}", e)))?
            .to_string();

        let mut raw_attributes = Vec::new();
        for attr_result in start.attributes() {
            let attr = attr_result
                .map_err(|e| Error::Xml(format!("Failed to parse attribute: {}", e)))?;

            let attr_name = std::str::from_utf8(attr.key.as_ref())
                .map_err(|e| Error::Xml(format!("Invalid attribute name: {}", e)))?
                .to_string();

            let attr_value = attr
                .unescape_value()
                .map_err(|e| Error::Xml(format!("Failed to unescape attribute value: {}", e)))?
                .to_string();

            raw_attributes.push((attr_name, attr_value));
        }
        limits.check_attributes(raw_attributes.len())?;

        // Namespace declarations apply to the element's own name and attributes
        let mut namespaces = parent_scope.map(NamespaceContext::child).unwrap_or_default();
        for (attr_name, attr_value) in &raw_attributes {
            if attr_name == "xmlns" {
                namespaces.set_default_namespace(attr_value.as_str());
            } else if let Some(prefix) = attr_name.strip_prefix("xmlns:") {
                namespaces.add_prefix(prefix, attr_value.as_str());
            }
        }

        let mut element = Element::new(namespaces.resolve(&name)?);
        element.position = position;

        for (attr_name, attr_value) in raw_attributes {
            if attr_name == "xmlns" || attr_name.starts_with("xmlns:") {
                continue;
            }
            let attr_qname = namespaces.resolve_attribute(&attr_name)?;
            if element.attributes.insert(attr_qname, attr_value).is_some() {
                return Err(Error::Xml(format!(
                    "Duplicate attribute '{}' on element '{}'",
                    attr_name, name
                )));
            }
        }

        element.namespaces = namespaces;
        Ok(element)
    }

    /// Get the root element
    pub fn root(&self) -> Option<&Element> {
        self.root.as_ref()
    }
}
