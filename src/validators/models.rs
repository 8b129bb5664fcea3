//! XSD Content Model matching
//!
//! Matches the sequence of child element names of an instance element
//! against a particle. Matching tracks the set of positions reachable after
//! each particle, so no backtracking is needed and non-deterministic models
//! are still matched correctly.

use std::collections::BTreeSet;

use crate::namespaces::QName;

use super::particles::{ModelType, Occurs, Particle};

/// Why a child sequence does not match a content model
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentMismatch {
    /// A child element appears where the model does not allow it
    Unexpected {
        /// Index of the offending child
        index: usize,
        /// Name of the offending child
        name: QName,
    },
    /// The children end before the model's required content
    Incomplete,
}

type Positions = BTreeSet<usize>;

/// Match a child sequence against a content model
pub fn match_content(particle: &Particle, children: &[&QName]) -> Result<(), ContentMismatch> {
    if particle_ends(particle, children, 0).contains(&children.len()) {
        return Ok(());
    }

    // Longest prefix the model accepts once its lower bounds are dropped;
    // the child right after it is the first one the model cannot place.
    let relaxed = relax(particle);
    let reached = (0..=children.len())
        .rev()
        .find(|&n| particle_ends(&relaxed, &children[..n], 0).contains(&n))
        .unwrap_or(0);

    if reached < children.len() {
        Err(ContentMismatch::Unexpected {
            index: reached,
            name: children[reached].clone(),
        })
    } else {
        Err(ContentMismatch::Incomplete)
    }
}

/// Positions reachable after matching `particle` (with its occurrence bounds) from `start`
fn particle_ends(particle: &Particle, children: &[&QName], start: usize) -> Positions {
    repeat(particle.occurs(), start, children.len(), |from| {
        single_ends(particle, children, from)
    })
}

/// Positions reachable after exactly one occurrence of `particle`
fn single_ends(particle: &Particle, children: &[&QName], start: usize) -> Positions {
    match particle {
        Particle::Element(decl) => {
            let mut ends = Positions::new();
            if children.get(start).is_some_and(|name| **name == decl.name) {
                ends.insert(start + 1);
            }
            ends
        }
        Particle::Group {
            model: ModelType::Sequence,
            particles,
            ..
        } => {
            let mut positions = Positions::from([start]);
            for member in particles {
                positions = positions
                    .iter()
                    .flat_map(|&p| particle_ends(member, children, p))
                    .collect();
                if positions.is_empty() {
                    break;
                }
            }
            positions
        }
        Particle::Group {
            model: ModelType::Choice,
            particles,
            ..
        } => particles
            .iter()
            .flat_map(|member| particle_ends(member, children, start))
            .collect(),
    }
}

/// Apply `step` between `occurs.min` and `occurs.max` times
fn repeat(
    occurs: Occurs,
    start: usize,
    len: usize,
    step: impl Fn(usize) -> Positions,
) -> Positions {
    let mut result = Positions::new();
    if occurs.min == 0 {
        result.insert(start);
    }

    // Past min + len iterations no new position can appear
    let cap = occurs.min as usize + len + 1;
    let mut frontier = Positions::from([start]);
    let mut count: u32 = 0;

    while occurs.allows(count + 1) && (count as usize) < cap {
        let next: Positions = frontier.iter().flat_map(|&p| step(p)).collect();
        count += 1;
        if next.is_empty() {
            break;
        }

        if count >= occurs.min {
            let fresh: Positions = next.difference(&result).copied().collect();
            result.extend(next.iter().copied());
            frontier = if occurs.max.is_none() { fresh } else { next };
        } else {
            frontier = next;
        }

        if frontier.is_empty() {
            break;
        }
    }

    result
}

/// Same model with every lower bound removed
fn relax(particle: &Particle) -> Particle {
    match particle {
        Particle::Element(decl) => {
            let mut decl = decl.clone();
            decl.occurs = Occurs::new(0, decl.occurs.max);
            Particle::Element(decl)
        }
        Particle::Group {
            model,
            particles,
            occurs,
        } => Particle::Group {
            model: *model,
            particles: particles.iter().map(relax).collect(),
            occurs: Occurs::new(0, occurs.max),
        },
    }
}
