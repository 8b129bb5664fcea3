//! XSD built-in types
//!
//! The subset of XML Schema built-in datatypes the mapping schemas use.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

/// Built-in datatypes supported by the schema compiler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinType {
    /// xsd:string
    String,
    /// xsd:normalizedString
    NormalizedString,
    /// xsd:token
    Token,
    /// xsd:boolean
    Boolean,
    /// xsd:int (32-bit)
    Int,
    /// xsd:integer (arbitrary size, bounded here to 64 bits)
    Integer,
    /// xsd:long
    Long,
    /// xsd:anyURI
    AnyUri,
}

lazy_static::lazy_static! {
    /// Built-in types by local name in the XSD namespace
    static ref BUILTIN_TYPES: HashMap<&'static str, BuiltinType> = {
        let mut m = HashMap::new();
        m.insert("string", BuiltinType::String);
        m.insert("normalizedString", BuiltinType::NormalizedString);
        m.insert("token", BuiltinType::Token);
        m.insert("boolean", BuiltinType::Boolean);
        m.insert("int", BuiltinType::Int);
        m.insert("integer", BuiltinType::Integer);
        m.insert("long", BuiltinType::Long);
        m.insert("anyURI", BuiltinType::AnyUri);
        m
    };
}

impl BuiltinType {
    /// Look up a built-in type by its local name
    pub fn from_local_name(name: &str) -> Option<Self> {
        BUILTIN_TYPES.get(name).copied()
    }

    /// Local name in the XSD namespace
    pub fn name(&self) -> &'static str {
        match self {
            BuiltinType::String => "string",
            BuiltinType::NormalizedString => "normalizedString",
            BuiltinType::Token => "token",
            BuiltinType::Boolean => "boolean",
            BuiltinType::Int => "int",
            BuiltinType::Integer => "integer",
            BuiltinType::Long => "long",
            BuiltinType::AnyUri => "anyURI",
        }
    }

    /// Apply the type's whiteSpace facet
    pub fn normalize<'a>(&self, value: &'a str) -> Cow<'a, str> {
        match self {
            BuiltinType::String => Cow::Borrowed(value),
            BuiltinType::NormalizedString => {
                if value.contains(['\t', '\n', '\r']) {
                    Cow::Owned(value.replace(['\t', '\n', '\r'], " "))
                } else {
                    Cow::Borrowed(value)
                }
            }
            _ => {
                let collapsed = value.split_whitespace().collect::<Vec<_>>().join(" ");
                if collapsed == value {
                    Cow::Borrowed(value)
                } else {
                    Cow::Owned(collapsed)
                }
            }
        }
    }

    /// Check a value's lexical form
    pub fn validate(&self, value: &str) -> Result<(), String> {
        let value = self.normalize(value);
        let ok = match self {
            BuiltinType::String
            | BuiltinType::NormalizedString
            | BuiltinType::Token
            | BuiltinType::AnyUri => true,
            BuiltinType::Boolean => matches!(&*value, "true" | "false" | "1" | "0"),
            BuiltinType::Int => value.parse::<i32>().is_ok(),
            BuiltinType::Integer | BuiltinType::Long => value.parse::<i64>().is_ok(),
        };

        if ok {
            Ok(())
        } else {
            Err(format!("'{}' is not a valid xsd:{}", value, self.name()))
        }
    }
}

impl fmt::Display for BuiltinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "xsd:{}", self.name())
    }
}
