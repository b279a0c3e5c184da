use crate::zones::HitZone;
use glam::Vec3;

/// Visual-reaction channels. Each channel holds at most one live effect;
/// re-triggering boosts the existing one instead of stacking duplicates.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum EffectKind {
    EyePop,
    CheekWobble,
    NoseSquash,
    JawDetach,
    HeadSquash,
    StarsSpin,
}

impl EffectKind {
    pub const ALL: [EffectKind; 6] = [
        EffectKind::EyePop,
        EffectKind::CheekWobble,
        EffectKind::NoseSquash,
        EffectKind::JawDetach,
        EffectKind::HeadSquash,
        EffectKind::StarsSpin,
    ];

    /// Lifetime of a fresh trigger unless the caller overrides it.
    pub fn default_duration(self) -> f32 {
        match self {
            EffectKind::EyePop => 0.8,
            EffectKind::CheekWobble => 0.6,
            EffectKind::NoseSquash => 0.5,
            EffectKind::JawDetach => 1.2,
            EffectKind::HeadSquash => 0.4,
            EffectKind::StarsSpin => 2.0,
        }
    }

    /// Minimum effective hit intensity for the channel to fire.
    /// StarsSpin ignores this: it fires on cumulative damage instead.
    pub fn threshold(self) -> f32 {
        match self {
            EffectKind::EyePop => 0.3,
            EffectKind::CheekWobble => 0.05,
            EffectKind::NoseSquash => 0.2,
            EffectKind::JawDetach => 0.7,
            EffectKind::HeadSquash => 0.05,
            EffectKind::StarsSpin => 1.0,
        }
    }

    /// Intended visual dominance when channels overlap. Documentation for
    /// the rendering side only: priority never gates triggering, all
    /// channels run concurrently.
    pub fn priority(self) -> u8 {
        match self {
            EffectKind::JawDetach => 5,
            EffectKind::StarsSpin => 4,
            EffectKind::EyePop => 3,
            EffectKind::NoseSquash => 2,
            EffectKind::CheekWobble => 1,
            EffectKind::HeadSquash => 0,
        }
    }
}

/// One live effect on a channel.
#[derive(Clone, Copy, Debug)]
pub struct ActiveEffect {
    pub id: u64,
    pub kind: EffectKind,
    pub intensity: f32,
    pub start_time: f32,
    pub duration: f32,
    /// Intensity lost per second.
    pub decay: f32,
}

/// Snapshot of the four continuously-read channel intensities.
#[derive(Clone, Copy, Debug, Default)]
pub struct EffectIntensities {
    pub eye_pop: f32,
    pub cheek_wobble: f32,
    pub nose_squash: f32,
    pub head_squash: f32,
}

/// Intensity decay rate for every channel, per second.
const EFFECT_DECAY_RATE: f32 = 0.8;
/// Effects at or below this intensity are dropped on tick.
const MIN_EFFECT_INTENSITY: f32 = 0.01;
/// Hits closer together than this chain into a combo.
const COMBO_WINDOW: f32 = 0.5;
const COMBO_BONUS_PER_HIT: f32 = 0.1;
const COMBO_BONUS_MAX: f32 = 0.3;
/// Flat intensity bonus for cheek wobble on a direct cheek hit.
const CHEEK_HIT_BONUS: f32 = 0.3;
/// Cumulative damage past this fires the KO-style star spin.
const STARS_DAMAGE_THRESHOLD: f32 = 3.0;
const CUMULATIVE_DAMAGE_DECAY: f32 = 0.5;
/// Detach progress gained per second while the jaw is off.
const JAW_PROGRESS_RATE: f32 = 2.0;

/// Turns classified hits into timed, decaying, combinable reactions.
///
/// Owns the per-channel effect list, the combo tracker, the cumulative
/// damage meter and the jaw detach/reattach state machine. Like the impact
/// manager it keeps its own clock, advanced by `tick`, and never reads wall
/// time. No operation fails: unknown or off-target zones simply fail the
/// zone-specific rules and only the "always" channels can fire.
pub struct CartoonEffects {
    active: Vec<ActiveEffect>,
    next_id: u64,
    clock: f32,
    consecutive_hits: u32,
    last_hit_time: f32,
    cumulative_damage: f32,
    jaw_detached: bool,
    jaw_detach_progress: f32,
    squash_axis: Vec3,
}

impl CartoonEffects {
    pub fn new() -> Self {
        Self {
            active: Vec::new(),
            next_id: 0,
            clock: 0.0,
            consecutive_hits: 0,
            last_hit_time: 0.0,
            cumulative_damage: 0.0,
            jaw_detached: false,
            jaw_detach_progress: 0.0,
            squash_axis: Vec3::Y,
        }
    }

    /// Fire a channel directly.
    ///
    /// A fresh trigger starts at `min(intensity * 1.5, 1)`; re-triggering a
    /// live channel adds `intensity * 0.5` (clamped to 1) and refreshes its
    /// start time without resetting the duration. The two multipliers are
    /// asymmetric on purpose: a fresh hit snaps hard, a follow-up tops up.
    /// The combo feel depends on keeping them distinct.
    pub fn trigger_effect(&mut self, kind: EffectKind, intensity: f32, duration: Option<f32>) {
        if let Some(effect) = self.active.iter_mut().find(|e| e.kind == kind) {
            effect.intensity = (effect.intensity + intensity * 0.5).min(1.0);
            effect.start_time = self.clock;
        } else {
            self.active.push(ActiveEffect {
                id: self.next_id,
                kind,
                intensity: (intensity * 1.5).min(1.0),
                start_time: self.clock,
                duration: duration.unwrap_or_else(|| kind.default_duration()),
                decay: EFFECT_DECAY_RATE,
            });
            self.next_id += 1;
        }
    }

    /// Central dispatch: combo tracking, damage accumulation, and the
    /// per-channel trigger rules. Rules are evaluated independently, so one
    /// hit may fire several channels.
    pub fn process_hit(&mut self, zone: HitZone, intensity: f32) {
        let intensity = intensity.clamp(0.0, 1.0);

        // Combo tracking. The bonus only kicks in from the second hit of a
        // chain; a lone hit lands at its raw intensity.
        if self.consecutive_hits > 0 && self.clock - self.last_hit_time < COMBO_WINDOW {
            self.consecutive_hits += 1;
        } else {
            self.consecutive_hits = 1;
        }
        self.last_hit_time = self.clock;
        let combo_bonus = if self.consecutive_hits > 1 {
            (self.consecutive_hits as f32 * COMBO_BONUS_PER_HIT).min(COMBO_BONUS_MAX)
        } else {
            0.0
        };
        let effective = (intensity + combo_bonus).min(1.0);

        // Raw intensity, not the combo-boosted value.
        self.cumulative_damage += intensity;

        if (zone.is_eye() || zone == HitZone::Forehead)
            && effective >= EffectKind::EyePop.threshold()
        {
            self.trigger_effect(EffectKind::EyePop, effective, None);
        }

        if effective >= EffectKind::CheekWobble.threshold() {
            let bonus = if zone.is_cheek() { CHEEK_HIT_BONUS } else { 0.0 };
            self.trigger_effect(EffectKind::CheekWobble, effective + bonus, None);
        }

        if zone == HitZone::Nose && effective >= EffectKind::NoseSquash.threshold() {
            self.trigger_effect(EffectKind::NoseSquash, effective, None);
        }

        if effective >= EffectKind::HeadSquash.threshold() {
            self.squash_axis = match zone {
                HitZone::Jaw => Vec3::Y,
                HitZone::LeftCheek => Vec3::X,
                HitZone::RightCheek => Vec3::NEG_X,
                HitZone::Nose => Vec3::Z,
                _ => Vec3::Y,
            };
            self.trigger_effect(EffectKind::HeadSquash, effective, None);
        }

        if zone == HitZone::Jaw && effective >= EffectKind::JawDetach.threshold() {
            self.jaw_detached = true;
            self.jaw_detach_progress = 0.0;
            log::debug!("jaw knocked off at intensity {:.2}", effective);
            self.trigger_effect(EffectKind::JawDetach, effective, None);
        }

        if self.cumulative_damage > STARS_DAMAGE_THRESHOLD {
            log::debug!(
                "stars: cumulative damage {:.2} past threshold",
                self.cumulative_damage
            );
            self.trigger_effect(EffectKind::StarsSpin, 1.0, None);
        }
    }

    /// Advance decay, expiry, the jaw state machine, and damage cooldown.
    pub fn tick(&mut self, dt: f32) {
        self.clock += dt;
        let clock = self.clock;
        self.active.retain_mut(|effect| {
            effect.intensity = (effect.intensity - effect.decay * dt).max(0.0);
            effect.intensity > MIN_EFFECT_INTENSITY && clock - effect.start_time < effect.duration
        });

        if self.jaw_detached {
            self.jaw_detach_progress = (self.jaw_detach_progress + dt * JAW_PROGRESS_RATE).min(1.0);
            if self.jaw_detach_progress >= 1.0 {
                self.jaw_detached = false;
                self.jaw_detach_progress = 0.0;
                log::debug!("jaw reattached");
            }
        }

        self.cumulative_damage = (self.cumulative_damage - CUMULATIVE_DAMAGE_DECAY * dt).max(0.0);
    }

    /// Current intensity of a channel, 0 when idle.
    pub fn intensity_of(&self, kind: EffectKind) -> f32 {
        self.active
            .iter()
            .find(|e| e.kind == kind)
            .map(|e| e.intensity)
            .unwrap_or(0.0)
    }

    /// The four intensities the renderer reads every frame.
    pub fn intensities(&self) -> EffectIntensities {
        EffectIntensities {
            eye_pop: self.intensity_of(EffectKind::EyePop),
            cheek_wobble: self.intensity_of(EffectKind::CheekWobble),
            nose_squash: self.intensity_of(EffectKind::NoseSquash),
            head_squash: self.intensity_of(EffectKind::HeadSquash),
        }
    }

    pub fn active_effects(&self) -> &[ActiveEffect] {
        &self.active
    }

    pub fn jaw_detached(&self) -> bool {
        self.jaw_detached
    }

    pub fn jaw_detach_progress(&self) -> f32 {
        self.jaw_detach_progress
    }

    /// World axis the head visually compresses along, per the latest squash.
    pub fn squash_axis(&self) -> Vec3 {
        self.squash_axis
    }

    pub fn cumulative_damage(&self) -> f32 {
        self.cumulative_damage
    }

    pub fn consecutive_hits(&self) -> u32 {
        self.consecutive_hits
    }

    /// Back to the idle state: no effects, no combo, no damage, jaw on.
    pub fn reset(&mut self) {
        self.active.clear();
        self.next_id = 0;
        self.clock = 0.0;
        self.consecutive_hits = 0;
        self.last_hit_time = 0.0;
        self.cumulative_damage = 0.0;
        self.jaw_detached = false;
        self.jaw_detach_progress = 0.0;
        self.squash_axis = Vec3::Y;
    }
}

impl Default for CartoonEffects {
    fn default() -> Self {
        Self::new()
    }
}
