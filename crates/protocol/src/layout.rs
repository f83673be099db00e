use serde::{Deserialize, Serialize};

use crate::types::Vec3;

/// Which target layout the particle field is currently morphing toward.
///
/// The background driver only ever swaps this discriminant — a single
/// atomic reference change. Buffer contents are never mutated in place,
/// so a renderer reading mid-frame always sees a complete layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutKind {
    /// Idle state: particles settle on a spherical shell.
    Sphere,
    /// Transition state: particles scatter across the whole volume.
    Explosion,
}

/// An immutable buffer of target positions, one per particle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleLayout {
    pub positions: Vec<Vec3>,
}

impl ParticleLayout {
    pub fn new(positions: Vec<Vec3>) -> Self {
        Self { positions }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
