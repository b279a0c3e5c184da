/// Adaptive quality controller.
///
/// Monitors physics frame times and automatically adjusts the solver's
/// substep count to hold a target frame budget. When the step exceeds the
/// budget, substeps are shed; when it consistently stays under, they are
/// gradually restored. This solver has no inner iteration loop to trade
/// away, so substeps are the only knob.
pub struct AdaptiveQuality {
    /// Target physics budget in milliseconds (default: 8.0ms for 60fps with headroom).
    pub budget_ms: f32,
    /// Minimum allowed substeps.
    pub min_substeps: u32,
    /// Maximum allowed substeps (the "full quality" setting).
    pub max_substeps: u32,
    /// Whether adaptive quality is enabled.
    pub enabled: bool,
    /// Current recommended substeps.
    current_substeps: u32,
    /// Exponential moving average of physics frame time.
    ema_ms: f32,
    /// Number of consecutive frames under budget (for quality restoration).
    frames_under_budget: u32,
}

impl AdaptiveQuality {
    pub fn new(max_substeps: u32) -> Self {
        Self {
            budget_ms: 8.0,
            min_substeps: 1,
            max_substeps,
            enabled: false,
            current_substeps: max_substeps,
            ema_ms: 0.0,
            frames_under_budget: 0,
        }
    }

    /// Get current recommended substeps.
    pub fn substeps(&self) -> u32 {
        if self.enabled {
            self.current_substeps
        } else {
            self.max_substeps
        }
    }

    /// Update the controller with the latest physics frame time.
    ///
    /// Call this after each `step()` with the measured physics time in ms.
    pub fn update(&mut self, physics_ms: f32) {
        if !self.enabled {
            return;
        }

        // EMA with alpha=0.3 for responsiveness
        self.ema_ms = self.ema_ms * 0.7 + physics_ms * 0.3;

        if self.ema_ms > self.budget_ms {
            // Over budget — shed a substep
            self.frames_under_budget = 0;
            if self.current_substeps > self.min_substeps {
                self.current_substeps -= 1;
            }
        } else if self.ema_ms < self.budget_ms * 0.6 {
            // Well under budget — gradually restore quality
            self.frames_under_budget += 1;

            // Wait 30 frames before increasing (avoid oscillation)
            if self.frames_under_budget > 30 {
                self.frames_under_budget = 0;
                if self.current_substeps < self.max_substeps {
                    self.current_substeps += 1;
                }
            }
        } else {
            // In acceptable range — slowly count toward restoration
            self.frames_under_budget = self.frames_under_budget.saturating_add(1).min(15);
        }
    }
}
