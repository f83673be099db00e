use rand::Rng;
use termfolio_protocol::{ParticleLayout, Vec3};

/// Default particle count. Terminal cells are coarse; renderers with a
/// real canvas pass a higher count.
pub const DEFAULT_COUNT: usize = 2000;

/// Per-tick fraction of the remaining distance to the target. Low
/// enough that the rebuild is visible as a morph, not a snap.
pub const SMOOTHING: f32 = 0.02;

/// Pointer repulsion: particles inside this radius get pushed out.
pub const POINTER_RADIUS: f32 = 2.0;
pub const POINTER_FORCE: f32 = 0.5;

const SPHERE_RADIUS: f32 = 6.0;
const SCATTER_EXTENT: f32 = 60.0;

/// Uniform spherical-shell layout — the idle state the field settles on.
pub fn sphere_layout<R: Rng>(rng: &mut R, count: usize) -> ParticleLayout {
    let positions = (0..count)
        .map(|_| {
            let theta = rng.random_range(0.0..std::f32::consts::TAU);
            // acos of a uniform [-1, 1] sample gives uniform area density.
            let phi = rng.random_range(-1.0f32..1.0).acos();
            Vec3::new(
                SPHERE_RADIUS * phi.sin() * theta.cos(),
                SPHERE_RADIUS * phi.sin() * theta.sin(),
                SPHERE_RADIUS * phi.cos(),
            )
        })
        .collect();
    ParticleLayout::new(positions)
}

/// Wide uniform scatter — the transition state between sections.
pub fn explosion_layout<R: Rng>(rng: &mut R, count: usize) -> ParticleLayout {
    let positions = (0..count)
        .map(|_| {
            Vec3::new(
                (rng.random::<f32>() - 0.5) * SCATTER_EXTENT,
                (rng.random::<f32>() - 0.5) * SCATTER_EXTENT,
                (rng.random::<f32>() - 0.5) * SCATTER_EXTENT,
            )
        })
        .collect();
    ParticleLayout::new(positions)
}

/// Live particle positions, smoothed each tick toward whichever target
/// layout the background driver currently points at.
#[derive(Debug)]
pub struct ParticleField {
    positions: Vec<Vec3>,
}

impl ParticleField {
    pub fn from_layout(layout: &ParticleLayout) -> Self {
        Self {
            positions: layout.positions.clone(),
        }
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// One tick: exponential smoothing toward `target`, then pointer
    /// repulsion in the view plane. The target buffer is read-only; a
    /// layout shorter than the field leaves the tail particles parked.
    pub fn step(&mut self, target: &ParticleLayout, pointer: Option<Vec3>) {
        for (position, goal) in self.positions.iter_mut().zip(&target.positions) {
            position.x += (goal.x - position.x) * SMOOTHING;
            position.y += (goal.y - position.y) * SMOOTHING;
            position.z += (goal.z - position.z) * SMOOTHING;

            if let Some(p) = pointer {
                let dx = position.x - p.x;
                let dy = position.y - p.y;
                let dist_sq = dx * dx + dy * dy;
                if dist_sq < POINTER_RADIUS * POINTER_RADIUS {
                    let dist = dist_sq.sqrt();
                    if dist > 0.1 {
                        let force = (POINTER_RADIUS - dist) / POINTER_RADIUS;
                        position.x += dx / dist * force * POINTER_FORCE;
                        position.y += dy / dist * force * POINTER_FORCE;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn total_distance(field: &ParticleField, target: &ParticleLayout) -> f32 {
        field
            .positions()
            .iter()
            .zip(&target.positions)
            .map(|(a, b)| {
                let (dx, dy, dz) = (a.x - b.x, a.y - b.y, a.z - b.z);
                (dx * dx + dy * dy + dz * dz).sqrt()
            })
            .sum()
    }

    #[test]
    fn sphere_layout_sits_on_shell() {
        let mut rng = StdRng::seed_from_u64(7);
        let layout = sphere_layout(&mut rng, 200);
        for p in &layout.positions {
            let r = (p.x * p.x + p.y * p.y + p.z * p.z).sqrt();
            assert!((r - 6.0).abs() < 1e-3, "radius {r}");
        }
    }

    #[test]
    fn explosion_layout_fills_volume() {
        let mut rng = StdRng::seed_from_u64(7);
        let layout = explosion_layout(&mut rng, 500);
        assert!(layout.positions.iter().all(|p| p.x.abs() <= 30.0));
        // Not all clustered at the origin.
        assert!(layout.positions.iter().any(|p| p.x.abs() > 10.0));
    }

    #[test]
    fn step_converges_toward_target() {
        let mut rng = StdRng::seed_from_u64(7);
        let start = explosion_layout(&mut rng, 100);
        let target = sphere_layout(&mut rng, 100);
        let mut field = ParticleField::from_layout(&start);

        let before = total_distance(&field, &target);
        for _ in 0..100 {
            field.step(&target, None);
        }
        let after = total_distance(&field, &target);
        assert!(after < before * 0.25, "before {before}, after {after}");
    }

    #[test]
    fn pointer_pushes_particles_away() {
        let target = ParticleLayout::new(vec![Vec3::new(0.5, 0.0, 0.0)]);
        let mut field = ParticleField::from_layout(&target);
        field.step(&target, Some(Vec3::ZERO));
        assert!(field.positions()[0].x > 0.5);
    }

    #[test]
    fn short_target_leaves_tail_parked() {
        let start = ParticleLayout::new(vec![Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0)]);
        let target = ParticleLayout::new(vec![Vec3::new(2.0, 0.0, 0.0)]);
        let mut field = ParticleField::from_layout(&start);
        field.step(&target, None);
        assert_eq!(field.positions()[1], Vec3::new(1.0, 1.0, 1.0));
    }
}
