//! XSD Document Parsing
//!
//! Compiles a schema document into an [`XsdSchema`]. Only the subset of XSD
//! needed by mapping file dialects is accepted; anything else is reported
//! as a parse error rather than silently ignored.

use std::str::FromStr;
use std::sync::Arc;

use super::builtins::BuiltinType;
use super::complex_types::{AttributeDecl, AttributeUse, ComplexType};
use super::elements::{ElementDecl, TypeRef};
use super::facets::PatternFacet;
use super::particles::{ModelType, Occurs, Particle};
use super::schemas::XsdSchema;
use super::simple_types::SimpleType;

use crate::documents::{Document, Element};
use crate::error::{Error, ParseError, Result};
use crate::limits::Limits;
use crate::namespaces::{QName, XSD_NAMESPACE};

/// XSD element local names
mod xsd_elements {
    pub const SCHEMA: &str = "schema";
    pub const ELEMENT: &str = "element";
    pub const COMPLEX_TYPE: &str = "complexType";
    pub const SIMPLE_TYPE: &str = "simpleType";
    pub const ATTRIBUTE: &str = "attribute";
    pub const SEQUENCE: &str = "sequence";
    pub const CHOICE: &str = "choice";
    pub const ANNOTATION: &str = "annotation";
    pub const RESTRICTION: &str = "restriction";
    pub const ENUMERATION: &str = "enumeration";
    pub const PATTERN: &str = "pattern";
}

use xsd_elements::*;

/// Parse a schema with default limits
pub fn parse_schema(source: &str) -> Result<XsdSchema> {
    XsdSchema::parse(source, None, &Limits::default())
}

impl XsdSchema {
    /// Parse and build a schema from XSD text
    pub fn parse(source: &str, location: Option<&str>, limits: &Limits) -> Result<Self> {
        let doc = Document::parse(source, limits)?;
        Self::from_document(&doc, location, limits)
    }

    /// Build a schema from a parsed XSD document
    pub fn from_document(doc: &Document, location: Option<&str>, limits: &Limits) -> Result<Self> {
        let mut parser = SchemaParser {
            schema: XsdSchema::default(),
            location: location.map(str::to_string),
            limits,
            components: 0,
        };

        let root = doc
            .root()
            .ok_or_else(|| parser.fail("Schema document is empty"))?;
        parser.parse_root(root)?;

        let SchemaParser {
            mut schema,
            location,
            ..
        } = parser;
        schema.build().map_err(|e| {
            Error::Parse(match &location {
                Some(loc) => e.with_location(loc.clone()),
                None => e,
            })
        })?;
        schema.source = location;
        Ok(schema)
    }
}

impl FromStr for XsdSchema {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_schema(s)
    }
}

struct SchemaParser<'a> {
    schema: XsdSchema,
    location: Option<String>,
    limits: &'a Limits,
    components: usize,
}

impl SchemaParser<'_> {
    fn fail(&self, message: impl Into<String>) -> Error {
        let mut error = ParseError::new(message);
        if let Some(location) = &self.location {
            error = error.with_location(location.clone());
        }
        Error::Parse(error)
    }

    fn unsupported(&self, elem: &Element) -> Error {
        self.fail(format!("Unsupported schema component 'xsd:{}'", elem.local_name()))
    }

    fn count_component(&mut self) -> Result<()> {
        self.components += 1;
        self.limits.check_schema_components(self.components)
    }

    fn required_attribute<'e>(&self, elem: &'e Element, name: &str) -> Result<&'e str> {
        elem.get_attribute(name).ok_or_else(|| {
            self.fail(format!(
                "'xsd:{}' is missing the '{}' attribute",
                elem.local_name(),
                name
            ))
        })
    }

    /// Children in the XSD namespace, skipping annotations
    fn components<'e>(&self, elem: &'e Element) -> Result<Vec<&'e Element>> {
        let mut result = Vec::new();
        for child in &elem.children {
            if !child.qname.is_in(XSD_NAMESPACE) {
                return Err(self.fail(format!(
                    "Unexpected element '{}' in 'xsd:{}'",
                    child.qname,
                    elem.local_name()
                )));
            }
            if child.local_name() != ANNOTATION {
                result.push(child);
            }
        }
        Ok(result)
    }

    fn parse_root(&mut self, root: &Element) -> Result<()> {
        if root.qname != QName::namespaced(XSD_NAMESPACE, SCHEMA) {
            return Err(self.fail(format!(
                "Root element '{}' is not an XSD schema",
                root.qname
            )));
        }

        self.schema.target_namespace = root.get_attribute("targetNamespace").map(str::to_string);
        self.schema.element_form_qualified = match root.get_attribute("elementFormDefault") {
            None | Some("unqualified") => false,
            Some("qualified") => true,
            Some(other) => {
                return Err(self.fail(format!("Invalid elementFormDefault '{}'", other)))
            }
        };
        match root.get_attribute("attributeFormDefault") {
            None | Some("unqualified") => {}
            Some(other) => {
                return Err(self.fail(format!("attributeFormDefault '{}' is not supported", other)))
            }
        }

        let components = self.components(root)?;
        self.parse_global_simple_types(&components)?;

        for child in components {
            match child.local_name() {
                ELEMENT => {
                    let decl = self.parse_element(child, true)?;
                    if self.schema.elements.contains_key(&decl.name) {
                        return Err(self.fail(format!("Duplicate element '{}'", decl.name)));
                    }
                    self.schema.elements.insert(decl.name.clone(), decl);
                }
                COMPLEX_TYPE => {
                    let name = self.global_name(child)?;
                    let complex = self.parse_complex_type(child, Some(name.clone()))?;
                    self.insert_type_name(&name)?;
                    self.schema.complex_types.insert(name, Arc::new(complex));
                }
                SIMPLE_TYPE => {}
                _ => return Err(self.unsupported(child)),
            }
        }
        Ok(())
    }

    /// Compile named simple types so that each is built after the type it restricts
    fn parse_global_simple_types(&mut self, components: &[&Element]) -> Result<()> {
        let mut pending = Vec::new();
        for child in components.iter().filter(|c| c.local_name() == SIMPLE_TYPE) {
            let name = self.global_name(child)?;
            if pending.iter().any(|(n, _)| n == &name) {
                return Err(self.fail(format!("Duplicate type '{}'", name)));
            }
            pending.push((name, *child));
        }

        while !pending.is_empty() {
            let waiting: Vec<QName> = pending.iter().map(|(name, _)| name.clone()).collect();
            let before = pending.len();
            let mut deferred = Vec::new();

            for (name, elem) in pending {
                let blocked = match self.user_restriction_base(elem)? {
                    Some(base) => waiting.contains(&base) && base != name,
                    None => false,
                };
                if blocked {
                    deferred.push((name, elem));
                    continue;
                }
                let simple = self.parse_simple_type(elem, Some(name.clone()))?;
                self.insert_type_name(&name)?;
                self.schema.simple_types.insert(name, Arc::new(simple));
            }

            if deferred.len() == before {
                let names: Vec<String> = deferred.iter().map(|(n, _)| n.to_string()).collect();
                return Err(self.fail(format!(
                    "Circular simple type restrictions: {}",
                    names.join(", ")
                )));
            }
            pending = deferred;
        }
        Ok(())
    }

    /// Name of the schema-defined type a simple type restricts, if any
    fn user_restriction_base(&self, elem: &Element) -> Result<Option<QName>> {
        let restriction = match elem.child(RESTRICTION) {
            Some(restriction) => restriction,
            None => return Ok(None),
        };
        let base = match restriction.get_attribute("base") {
            Some(base) => base,
            None => return Ok(None),
        };
        let qname = restriction
            .namespaces
            .resolve(base)
            .map_err(|e| self.fail(e.to_string()))?;
        Ok((!qname.is_in(XSD_NAMESPACE)).then_some(qname))
    }

    fn global_name(&self, elem: &Element) -> Result<QName> {
        let name = self.required_attribute(elem, "name")?;
        Ok(QName::new(self.schema.target_namespace.clone(), name))
    }

    fn insert_type_name(&self, name: &QName) -> Result<()> {
        if self.schema.complex_types.contains_key(name) || self.schema.simple_types.contains_key(name) {
            return Err(self.fail(format!("Duplicate type '{}'", name)));
        }
        Ok(())
    }

    fn parse_element(&mut self, elem: &Element, global: bool) -> Result<ElementDecl> {
        self.count_component()?;

        if elem.get_attribute("ref").is_some() {
            return Err(self.fail("Element references are not supported"));
        }
        let local_name = self.required_attribute(elem, "name")?;
        let name = if global || self.schema.element_form_qualified {
            QName::new(self.schema.target_namespace.clone(), local_name)
        } else {
            QName::local(local_name)
        };

        let occurs = if global {
            if elem.get_attribute("minOccurs").is_some() || elem.get_attribute("maxOccurs").is_some() {
                return Err(self.fail(format!(
                    "Global element '{}' cannot have occurrence bounds",
                    local_name
                )));
            }
            Occurs::once()
        } else {
            Occurs::parse(elem.get_attribute("minOccurs"), elem.get_attribute("maxOccurs"))
                .map_err(|e| self.fail(e.message))?
        };

        let inline = self.components(elem)?;
        let type_ref = match (elem.get_attribute("type"), inline.as_slice()) {
            (Some(lexical), []) => self.type_ref(elem, lexical)?,
            (None, [child]) if child.local_name() == COMPLEX_TYPE => {
                TypeRef::Complex(Arc::new(self.parse_complex_type(child, None)?))
            }
            (None, [child]) if child.local_name() == SIMPLE_TYPE => {
                TypeRef::Simple(Arc::new(self.parse_simple_type(child, None)?))
            }
            (None, []) => {
                return Err(self.fail(format!("Element '{}' has no type", local_name)));
            }
            (_, [child, ..]) => return Err(self.unsupported(child)),
        };

        Ok(ElementDecl::new(name, type_ref).with_occurs(occurs))
    }

    /// Resolve a type name written in the schema
    fn type_ref(&self, elem: &Element, lexical: &str) -> Result<TypeRef> {
        let qname = elem
            .namespaces
            .resolve(lexical)
            .map_err(|e| self.fail(e.to_string()))?;

        if qname.is_in(XSD_NAMESPACE) {
            return BuiltinType::from_local_name(&qname.local_name)
                .map(|builtin| TypeRef::Simple(Arc::new(SimpleType::builtin(builtin))))
                .ok_or_else(|| self.fail(format!("Built-in type '{}' is not supported", lexical)));
        }
        Ok(TypeRef::Named(qname))
    }

    fn parse_complex_type(&mut self, elem: &Element, name: Option<QName>) -> Result<ComplexType> {
        self.count_component()?;

        if matches!(elem.get_attribute("mixed"), Some("true") | Some("1")) {
            return Err(self.fail("Mixed content is not supported"));
        }

        let mut complex = ComplexType::new(name);
        for child in self.components(elem)? {
            match child.local_name() {
                SEQUENCE | CHOICE => {
                    if complex.content.is_some() || !complex.attributes.is_empty() {
                        return Err(self.fail(format!(
                            "Unexpected 'xsd:{}' in type '{}'",
                            child.local_name(),
                            complex.display_name()
                        )));
                    }
                    complex.content = Some(self.parse_group(child)?);
                }
                ATTRIBUTE => {
                    let attribute = self.parse_attribute(child)?;
                    if complex.attributes.contains_key(&attribute.name) {
                        return Err(self.fail(format!(
                            "Duplicate attribute '{}' in type '{}'",
                            attribute.name,
                            complex.display_name()
                        )));
                    }
                    complex.attributes.insert(attribute.name.clone(), attribute);
                }
                _ => return Err(self.unsupported(child)),
            }
        }
        Ok(complex)
    }

    fn parse_group(&mut self, elem: &Element) -> Result<Particle> {
        let model = match elem.local_name() {
            SEQUENCE => ModelType::Sequence,
            CHOICE => ModelType::Choice,
            _ => return Err(self.unsupported(elem)),
        };
        let occurs = Occurs::parse(elem.get_attribute("minOccurs"), elem.get_attribute("maxOccurs"))
            .map_err(|e| self.fail(e.message))?;

        let mut particles = Vec::new();
        for child in self.components(elem)? {
            let particle = match child.local_name() {
                ELEMENT => Particle::Element(self.parse_element(child, false)?),
                SEQUENCE | CHOICE => self.parse_group(child)?,
                _ => return Err(self.unsupported(child)),
            };
            particles.push(particle);
        }

        Ok(Particle::Group {
            model,
            particles,
            occurs,
        })
    }

    fn parse_attribute(&mut self, elem: &Element) -> Result<AttributeDecl> {
        self.count_component()?;

        if elem.get_attribute("ref").is_some() {
            return Err(self.fail("Attribute references are not supported"));
        }
        if elem.get_attribute("form") == Some("qualified") {
            return Err(self.fail("Qualified attributes are not supported"));
        }
        let name = self.required_attribute(elem, "name")?.to_string();

        let inline = self.components(elem)?;
        let type_ref = match (elem.get_attribute("type"), inline.as_slice()) {
            (Some(lexical), []) => self.type_ref(elem, lexical)?,
            (None, [child]) if child.local_name() == SIMPLE_TYPE => {
                TypeRef::Simple(Arc::new(self.parse_simple_type(child, None)?))
            }
            (None, []) => TypeRef::Simple(Arc::new(SimpleType::builtin(BuiltinType::String))),
            (_, [child, ..]) => return Err(self.unsupported(child)),
        };

        let use_ = match elem.get_attribute("use") {
            None | Some("optional") => AttributeUse::Optional,
            Some("required") => AttributeUse::Required,
            Some(other) => {
                return Err(self.fail(format!(
                    "Attribute '{}' has unsupported use '{}'",
                    name, other
                )))
            }
        };

        let fixed = elem.get_attribute("fixed").map(str::to_string);
        let default = elem.get_attribute("default").map(str::to_string);
        if fixed.is_some() && default.is_some() {
            return Err(self.fail(format!(
                "Attribute '{}' cannot have both 'fixed' and 'default'",
                name
            )));
        }
        if default.is_some() && use_ == AttributeUse::Required {
            return Err(self.fail(format!(
                "Required attribute '{}' cannot have a default",
                name
            )));
        }

        Ok(AttributeDecl {
            name,
            type_ref,
            use_,
            fixed,
            default,
        })
    }

    fn parse_simple_type(&mut self, elem: &Element, name: Option<QName>) -> Result<SimpleType> {
        self.count_component()?;

        let restriction = match self.components(elem)?.as_slice() {
            [child] if child.local_name() == RESTRICTION => *child,
            [child, ..] => return Err(self.unsupported(child)),
            [] => return Err(self.fail("Simple type has no restriction")),
        };

        let base_name = self.required_attribute(restriction, "base")?;
        let mut simple = match self.type_ref(restriction, base_name)? {
            TypeRef::Simple(builtin) => SimpleType::restriction(name, builtin.base),
            TypeRef::Named(base) => match self.schema.simple_types.get(&base) {
                Some(parent) => SimpleType::derived(name, parent),
                None => {
                    return Err(self.fail(format!(
                        "Restriction base '{}' is not a simple type",
                        base_name
                    )))
                }
            },
            TypeRef::Complex(_) => return Err(self.unsupported(restriction)),
        };

        let mut enumeration = Vec::new();
        let mut patterns = Vec::new();
        for facet in self.components(restriction)? {
            let value = self.required_attribute(facet, "value")?;
            match facet.local_name() {
                ENUMERATION => enumeration.push(value.to_string()),
                PATTERN => patterns.push(value.to_string()),
                other => {
                    return Err(self.fail(format!("Facet 'xsd:{}' is not supported", other)));
                }
            }
        }

        if !patterns.is_empty() {
            simple = simple.with_pattern(PatternFacet::new(&patterns)?);
        }
        if !enumeration.is_empty() {
            if let Some(invalid) = enumeration.iter().find_map(|v| simple.validate_value(v).err()) {
                return Err(self.fail(format!("Invalid enumeration value: {}", invalid)));
            }
            simple.enumeration = enumeration;
        }
        Ok(simple)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::schemas::ResolvedType;

    fn schema(body: &str) -> Result<XsdSchema> {
        parse_schema(&format!(
            r#"<xsd:schema xmlns:xsd="http://www.w3.org/2001/XMLSchema"
                    xmlns:t="urn:test" targetNamespace="urn:test"
                    elementFormDefault="qualified">{}</xsd:schema>"#,
            body
        ))
    }

    #[test]
    fn test_parse_global_components() {
        let schema = schema(
            r#"<xsd:annotation><xsd:documentation>test</xsd:documentation></xsd:annotation>
               <xsd:element name="root" type="t:root"/>
               <xsd:complexType name="root">
                 <xsd:sequence>
                   <xsd:element name="name" type="xsd:string" minOccurs="0"/>
                   <xsd:choice maxOccurs="unbounded">
                     <xsd:element name="a" type="t:empty"/>
                     <xsd:element name="b" type="t:kind"/>
                   </xsd:choice>
                 </xsd:sequence>
                 <xsd:attribute name="id" type="xsd:int" use="required"/>
               </xsd:complexType>
               <xsd:complexType name="empty"/>
               <xsd:simpleType name="kind">
                 <xsd:restriction base="xsd:token">
                   <xsd:enumeration value="X"/>
                 </xsd:restriction>
               </xsd:simpleType>"#,
        )
        .unwrap();

        assert_eq!(schema.target_namespace.as_deref(), Some("urn:test"));
        assert_eq!(schema.component_count(), 4);

        let root = schema.lookup_element(&QName::namespaced("urn:test", "root")).unwrap();
        let complex = match schema.resolve(&root.type_ref) {
            Some(ResolvedType::Complex(complex)) => complex,
            other => panic!("unexpected type {:?}", other),
        };
        assert!(complex.attribute("id").unwrap().is_required());
        let b = complex
            .element_decl(&QName::namespaced("urn:test", "b"))
            .unwrap();
        assert!(matches!(b.type_ref, TypeRef::Named(ref n) if n.local_name == "kind"));

        let kind = schema
            .lookup_simple_type(&QName::namespaced("urn:test", "kind"))
            .unwrap();
        assert_eq!(kind.enumeration, vec!["X".to_string()]);
    }

    #[test]
    fn test_unqualified_local_elements() {
        let schema = parse_schema(
            r#"<xsd:schema xmlns:xsd="http://www.w3.org/2001/XMLSchema" targetNamespace="urn:test">
                 <xsd:element name="root">
                   <xsd:complexType>
                     <xsd:sequence><xsd:element name="child" type="xsd:string"/></xsd:sequence>
                   </xsd:complexType>
                 </xsd:element>
               </xsd:schema>"#,
        )
        .unwrap();
        let root = schema.lookup_element(&QName::namespaced("urn:test", "root")).unwrap();
        let TypeRef::Complex(complex) = &root.type_ref else {
            panic!("expected an anonymous complex type");
        };
        assert!(complex.element_decl(&QName::local("child")).is_some());
    }

    #[test]
    fn test_unresolved_type_is_error() {
        let err = schema(r#"<xsd:element name="root" type="t:missing"/>"#).unwrap_err();
        assert!(err.to_string().contains("unknown type 'missing'"));
    }

    #[test]
    fn test_unsupported_components() {
        for body in [
            r#"<xsd:import namespace="urn:other"/>"#,
            r#"<xsd:complexType name="x"><xsd:all/></xsd:complexType>"#,
            r#"<xsd:complexType name="x" mixed="true"/>"#,
            r#"<xsd:simpleType name="x"><xsd:restriction base="xsd:string"><xsd:length value="1"/></xsd:restriction></xsd:simpleType>"#,
            r#"<xsd:simpleType name="x"><xsd:restriction base="xsd:string"><xsd:pattern value="(a"/></xsd:restriction></xsd:simpleType>"#,
            r#"<xsd:element name="x" type="xsd:dateTime"/>"#,
            r#"<xsd:element name="x"/>"#,
        ] {
            assert!(matches!(schema(body), Err(Error::Parse(_))), "{}", body);
        }
    }

    #[test]
    fn test_restriction_of_named_simple_type() {
        // Declared before its base on purpose
        let schema = schema(
            r#"<xsd:simpleType name="temporal">
                 <xsd:restriction base="t:temporal-type"/>
               </xsd:simpleType>
               <xsd:simpleType name="temporal-type">
                 <xsd:restriction base="xsd:token">
                   <xsd:enumeration value="DATE"/>
                   <xsd:enumeration value="TIME"/>
                 </xsd:restriction>
               </xsd:simpleType>
               <xsd:simpleType name="versionType">
                 <xsd:restriction base="xsd:token">
                   <xsd:pattern value="[0-9]+(\.[0-9]+)*"/>
                 </xsd:restriction>
               </xsd:simpleType>"#,
        )
        .unwrap();

        let temporal = schema
            .lookup_simple_type(&QName::namespaced("urn:test", "temporal"))
            .unwrap();
        assert_eq!(temporal.base, BuiltinType::Token);
        assert!(temporal.validate_value("TIME").is_ok());
        assert!(temporal.validate_value("NOW").is_err());

        let version = schema
            .lookup_simple_type(&QName::namespaced("urn:test", "versionType"))
            .unwrap();
        assert!(version.validate_value("2.0").is_ok());
        assert!(version.validate_value("2.x").is_err());
    }

    #[test]
    fn test_circular_simple_types() {
        let err = schema(
            r#"<xsd:simpleType name="a"><xsd:restriction base="t:b"/></xsd:simpleType>
               <xsd:simpleType name="b"><xsd:restriction base="t:a"/></xsd:simpleType>"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Circular simple type restrictions"));
    }

    #[test]
    fn test_enumeration_must_fit_base() {
        let err = schema(
            r#"<xsd:simpleType name="size">
                 <xsd:restriction base="xsd:int"><xsd:enumeration value="large"/></xsd:restriction>
               </xsd:simpleType>"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Invalid enumeration value"));
    }

    #[test]
    fn test_not_a_schema() {
        let err = parse_schema("<schema/>").unwrap_err();
        assert!(err.to_string().contains("is not an XSD schema"));
    }

    #[test]
    fn test_component_limit() {
        let limits = Limits {
            max_schema_components: 2,
            ..Limits::default()
        };
        let source = r#"<xsd:schema xmlns:xsd="http://www.w3.org/2001/XMLSchema">
                 <xsd:element name="a" type="xsd:string"/>
                 <xsd:element name="b" type="xsd:string"/>
                 <xsd:element name="c" type="xsd:string"/>
               </xsd:schema>"#;
        let err = XsdSchema::parse(source, Some("xsd/test.xsd"), &limits).unwrap_err();
        assert!(matches!(err, Error::LimitExceeded(_)));
    }

    #[test]
    fn test_error_carries_location() {
        let err = XsdSchema::parse(
            r#"<xsd:schema xmlns:xsd="http://www.w3.org/2001/XMLSchema"><xsd:group name="g"/></xsd:schema>"#,
            Some("xsd/test.xsd"),
            &Limits::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("(in xsd/test.xsd)"));
    }
}
