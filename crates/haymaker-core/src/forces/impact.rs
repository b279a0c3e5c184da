use glam::Vec3;

/// One punch, as the solver sees it: a radial velocity kick around the
/// contact point, applied during the next `step` call only.
#[derive(Clone, Copy, Debug)]
pub struct ImpactImpulse {
    /// Contact point in the body's local space.
    pub position: Vec3,
    /// Direction and magnitude of the kick at the contact point.
    pub force: Vec3,
    /// Particles farther than this from the contact point are unaffected.
    pub radius: f32,
    /// Extra scale on top of `force`, typically the hit strength in [0,1].
    pub intensity: f32,
}

impl ImpactImpulse {
    pub fn new(position: Vec3, force: Vec3, radius: f32, intensity: f32) -> Self {
        Self {
            position,
            force,
            radius,
            intensity,
        }
    }

    /// Velocity contribution for a particle at `pos`.
    ///
    /// Quadratic falloff `(1 - d/r)^2`, not linear: the kick stays
    /// concentrated near the contact point, which reads as a punchier,
    /// more localized deformation.
    pub fn velocity_kick(&self, pos: Vec3) -> Vec3 {
        if self.radius <= 0.0 {
            return Vec3::ZERO;
        }
        let dist = (pos - self.position).length();
        if dist >= self.radius {
            return Vec3::ZERO;
        }
        let falloff = (1.0 - dist / self.radius) * (1.0 - dist / self.radius);
        self.force * (falloff * self.intensity)
    }
}
