use glam::Vec3;

pub struct SolverConfig {
    /// Substeps per `step` call. Constraints are solved once per substep,
    /// so this is the main stability/cost knob on mobile frame rates.
    pub substeps: u32,
    pub gravity: Vec3,
    /// Velocity multiplier applied at the end of each substep (<1).
    pub global_damping: f32,
    /// Floor plane height for `enforce_floor_collision`.
    pub floor_y: f32,
    /// Fraction of vertical speed kept (and inverted) on floor contact.
    pub floor_restitution: f32,
    /// Horizontal velocity multiplier on floor contact.
    pub floor_friction: f32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            substeps: 6,
            gravity: Vec3::new(0.0, -9.81, 0.0),
            global_damping: 0.98,
            floor_y: 0.0,
            floor_restitution: 0.5,
            floor_friction: 0.8,
        }
    }
}
