//! XSD Particle Schema Components
//!
//! Particles are the pieces of a content model: element declarations and
//! `sequence`/`choice` groups, each with occurrence bounds.

use crate::error::ParseError;
use crate::namespaces::QName;

use super::elements::ElementDecl;

/// Occurrence bounds for a particle (minOccurs, maxOccurs)
/// None for max means unbounded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurs {
    /// Minimum number of occurrences (default 1)
    pub min: u32,
    /// Maximum number of occurrences (None = unbounded, default 1)
    pub max: Option<u32>,
}

impl Default for Occurs {
    fn default() -> Self {
        Self::once()
    }
}

impl Occurs {
    /// Create new occurrence bounds
    pub fn new(min: u32, max: Option<u32>) -> Self {
        Self { min, max }
    }

    /// Default occurrence (1, 1)
    pub fn once() -> Self {
        Self { min: 1, max: Some(1) }
    }

    /// Optional occurrence (0, 1)
    pub fn optional() -> Self {
        Self { min: 0, max: Some(1) }
    }

    /// Zero or more (0, unbounded)
    pub fn zero_or_more() -> Self {
        Self { min: 0, max: None }
    }

    /// Parse `minOccurs` / `maxOccurs` attribute values
    pub fn parse(min: Option<&str>, max: Option<&str>) -> Result<Self, ParseError> {
        let min = match min {
            Some(s) => s.trim().parse::<u32>().map_err(|_| {
                ParseError::new(format!("Invalid minOccurs value '{}'", s))
            })?,
            None => 1,
        };
        let max = match max.map(str::trim) {
            Some("unbounded") => None,
            Some(s) => Some(s.parse::<u32>().map_err(|_| {
                ParseError::new(format!("Invalid maxOccurs value '{}'", s))
            })?),
            None => Some(1),
        };

        if let Some(max) = max {
            if min > max {
                return Err(ParseError::new(format!(
                    "minOccurs ({}) is greater than maxOccurs ({})",
                    min, max
                )));
            }
        }

        Ok(Self { min, max })
    }

    /// Check if this particle can be empty (minOccurs == 0)
    pub fn is_emptiable(&self) -> bool {
        self.min == 0
    }

    /// Whether `count` more occurrences are allowed
    pub fn allows(&self, count: u32) -> bool {
        self.max.map_or(true, |max| count <= max)
    }
}

/// Kind of model group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelType {
    /// Children in order
    Sequence,
    /// Exactly one alternative
    Choice,
}

impl ModelType {
    /// XSD element name of the group
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelType::Sequence => "sequence",
            ModelType::Choice => "choice",
        }
    }
}

/// A content model particle
#[derive(Debug, Clone)]
pub enum Particle {
    /// Local element declaration
    Element(ElementDecl),
    /// Nested model group
    Group {
        /// Sequence or choice
        model: ModelType,
        /// Member particles
        particles: Vec<Particle>,
        /// Occurrence bounds of the group itself
        occurs: Occurs,
    },
}

impl Particle {
    /// Occurrence bounds of the particle
    pub fn occurs(&self) -> Occurs {
        match self {
            Particle::Element(decl) => decl.occurs,
            Particle::Group { occurs, .. } => *occurs,
        }
    }

    /// Find the element declaration for a child name anywhere in this particle
    pub fn find_element(&self, name: &QName) -> Option<&ElementDecl> {
        match self {
            Particle::Element(decl) if &decl.name == name => Some(decl),
            Particle::Element(_) => None,
            Particle::Group { particles, .. } => {
                particles.iter().find_map(|p| p.find_element(name))
            }
        }
    }

    /// Visit every element declaration in this particle
    pub fn for_each_element<'a>(&'a self, visit: &mut dyn FnMut(&'a ElementDecl)) {
        match self {
            Particle::Element(decl) => visit(decl),
            Particle::Group { particles, .. } => {
                for particle in particles {
                    particle.for_each_element(visit);
                }
            }
        }
    }
}
