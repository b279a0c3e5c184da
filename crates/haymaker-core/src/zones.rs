use glam::Vec3;

/// Named region of the opponent's head. Derived from an impact point,
/// never stored.
///
/// Local-space convention: Y up, Z toward the player, subject's left on -X.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum HitZone {
    Forehead = 0,
    Cranium = 1,
    LeftEye = 2,
    RightEye = 3,
    Nose = 4,
    LeftCheek = 5,
    RightCheek = 6,
    LeftEar = 7,
    RightEar = 8,
    Jaw = 9,
}

impl HitZone {
    pub fn is_eye(self) -> bool {
        matches!(self, Self::LeftEye | Self::RightEye)
    }

    pub fn is_cheek(self) -> bool {
        matches!(self, Self::LeftCheek | Self::RightCheek)
    }
}

/// Maps a local-space impact point to a `HitZone`.
///
/// A three-band decision tree over Y, with Z/X splits inside the mid band.
/// Total on all inputs: out-of-range points degrade to the nearest band, so
/// classification never fails. Thresholds are fixed per head geometry
/// (`HeadShape::classifier` derives them from the lattice proportions) so
/// the label matches what the player visually struck.
#[derive(Clone, Copy, Debug)]
pub struct HitZoneClassifier {
    /// Above this Y: forehead/cranium band.
    pub upper_y: f32,
    /// Below this Y: jaw.
    pub lower_y: f32,
    /// Half-width of the frontal forehead band.
    pub forehead_half_width: f32,
    /// Mid-band points with Z beyond this are front-facing (eyes/nose).
    pub front_z: f32,
    /// Half-width of the central nose band.
    pub nose_half_width: f32,
    /// Mid-band side points with |X| beyond this are ears, else cheeks.
    pub ear_min_abs_x: f32,
}

impl Default for HitZoneClassifier {
    fn default() -> Self {
        // Fractions of a unit-radius head; HeadShape::classifier scales them.
        Self {
            upper_y: 0.25,
            lower_y: -0.3,
            forehead_half_width: 0.4,
            front_z: 0.15,
            nose_half_width: 0.18,
            ear_min_abs_x: 0.55,
        }
    }
}

impl HitZoneClassifier {
    /// Pure, deterministic classification of a local-space point.
    pub fn classify(&self, point: Vec3) -> HitZone {
        if point.y > self.upper_y {
            // High band: narrow frontal strip is forehead, the rest is skull.
            if point.x.abs() < self.forehead_half_width && point.z > 0.0 {
                HitZone::Forehead
            } else {
                HitZone::Cranium
            }
        } else if point.y < self.lower_y {
            HitZone::Jaw
        } else if point.z > self.front_z {
            // Mid band, front-facing: nose sits in a narrow central strip.
            if point.x.abs() < self.nose_half_width {
                HitZone::Nose
            } else if point.x < 0.0 {
                HitZone::LeftEye
            } else {
                HitZone::RightEye
            }
        } else if point.x.abs() > self.ear_min_abs_x {
            if point.x < 0.0 {
                HitZone::LeftEar
            } else {
                HitZone::RightEar
            }
        } else if point.x < 0.0 {
            HitZone::LeftCheek
        } else {
            HitZone::RightCheek
        }
    }
}
