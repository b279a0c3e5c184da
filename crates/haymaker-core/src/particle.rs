use glam::Vec3;

/// Insertion descriptor for a single simulation node.
///
/// The rest position is captured from `position` at insertion time and is
/// what `reset` restores. `inv_mass == 0.0` marks a permanently anchored
/// particle: integration never writes to it.
#[derive(Clone, Copy, Debug)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Inverse mass; 0.0 = fixed/anchored.
    pub inv_mass: f32,
}

impl Particle {
    pub fn new(position: Vec3, inv_mass: f32) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            inv_mass,
        }
    }

    /// An anchored particle that only moves through explicit reset.
    pub fn fixed(position: Vec3) -> Self {
        Self::new(position, 0.0)
    }
}

/// SoA particle storage
pub struct ParticleSet {
    pub position: Vec<Vec3>,
    /// Position at the start of the current substep (for velocity derivation).
    pub prev_position: Vec<Vec3>,
    pub velocity: Vec<Vec3>,
    /// Inverse mass per particle; 0.0 = fixed.
    pub inv_mass: Vec<f32>,
    /// Layout restored by `reset`; also the reference for displacements.
    pub rest_position: Vec<Vec3>,
}

impl ParticleSet {
    pub fn new() -> Self {
        Self {
            position: Vec::new(),
            prev_position: Vec::new(),
            velocity: Vec::new(),
            inv_mass: Vec::new(),
            rest_position: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.position.len()
    }

    pub fn is_empty(&self) -> bool {
        self.position.is_empty()
    }

    /// Append one particle; the index is its identifier for constraints.
    pub fn push(&mut self, p: Particle) -> usize {
        let idx = self.position.len();
        self.position.push(p.position);
        self.prev_position.push(p.position);
        self.velocity.push(p.velocity);
        self.inv_mass.push(p.inv_mass);
        self.rest_position.push(p.position);
        idx
    }

    /// Drop every particle. Indices held by constraints become dangling and
    /// are skipped by the solver.
    pub fn clear(&mut self) {
        self.position.clear();
        self.prev_position.clear();
        self.velocity.clear();
        self.inv_mass.clear();
        self.rest_position.clear();
    }
}

impl Default for ParticleSet {
    fn default() -> Self {
        Self::new()
    }
}
