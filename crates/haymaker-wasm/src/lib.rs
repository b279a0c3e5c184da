use wasm_bindgen::prelude::*;

use haymaker_core::head::HeadShape;
use haymaker_core::quality::AdaptiveQuality;
use haymaker_core::session::BoutSession;

/// GPU-compatible vertex struct: 32 bytes, matches WGSL HeadVertex
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct GpuVertex {
    position: [f32; 3],     // 12 bytes
    _pad0: f32,             //  4 bytes (WGSL vec3 alignment)
    displacement: [f32; 3], // 12 bytes
    _pad1: f32,             //  4 bytes
}

/// Impact slot for the deformation shader uniforms: 16 bytes.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct GpuImpact {
    point: [f32; 3],
    strength: f32,
}

#[wasm_bindgen]
pub struct OpponentWorld {
    session: BoutSession,
    quality: AdaptiveQuality,
    gpu_buffer: Vec<GpuVertex>,
    /// Bounded copy of the impact ring buffer for shader uniforms.
    impact_buffer: Vec<GpuImpact>,
}

#[wasm_bindgen]
impl OpponentWorld {
    #[wasm_bindgen(constructor)]
    pub fn new(rings: u32, segments: u32) -> OpponentWorld {
        let shape = HeadShape {
            rings: rings as usize,
            segments: segments as usize,
            ..HeadShape::default()
        };
        let session = BoutSession::new(&shape);
        let particle_count = session.solver.particle_count();

        web_sys::console::log_1(
            &format!("WASM OpponentWorld created: {} particles", particle_count).into(),
        );

        let max_substeps = session.solver.config.substeps;
        let gpu_buffer = vec![
            GpuVertex {
                position: [0.0; 3],
                _pad0: 0.0,
                displacement: [0.0; 3],
                _pad1: 0.0,
            };
            particle_count
        ];
        let impact_buffer = vec![
            GpuImpact {
                point: [0.0; 3],
                strength: 0.0,
            };
            session.impacts.capacity()
        ];

        let mut world = OpponentWorld {
            session,
            quality: AdaptiveQuality::new(max_substeps),
            gpu_buffer,
            impact_buffer,
        };
        world.write_gpu_output();
        world
    }

    /// Ingest one punch at a local-space point; returns the hit zone tag.
    #[wasm_bindgen]
    pub fn punch(&mut self, x: f32, y: f32, z: f32, strength: f32) -> u32 {
        self.session.punch(glam::Vec3::new(x, y, z), strength) as u32
    }

    /// Classify a local-space point without ingesting anything.
    #[wasm_bindgen]
    pub fn classify(&self, x: f32, y: f32, z: f32) -> u32 {
        self.session.classify(glam::Vec3::new(x, y, z)) as u32
    }

    /// Advance one frame; returns the measured physics time in ms.
    #[wasm_bindgen]
    pub fn frame(&mut self, dt: f32) -> f32 {
        self.session.solver.config.substeps = self.quality.substeps();

        let start = js_sys::Date::now();
        self.session.frame(dt);
        let elapsed = (js_sys::Date::now() - start) as f32;

        self.quality.update(elapsed);
        self.write_gpu_output();
        elapsed
    }

    #[wasm_bindgen]
    pub fn get_gpu_buffer_ptr(&self) -> *const f32 {
        self.gpu_buffer.as_ptr() as *const f32
    }

    #[wasm_bindgen]
    pub fn get_gpu_buffer_byte_length(&self) -> usize {
        self.gpu_buffer.len() * std::mem::size_of::<GpuVertex>()
    }

    #[wasm_bindgen]
    pub fn particle_count(&self) -> usize {
        self.session.solver.particle_count()
    }

    #[wasm_bindgen]
    pub fn get_impact_buffer_ptr(&self) -> *const f32 {
        self.impact_buffer.as_ptr() as *const f32
    }

    /// Number of live slots in the impact buffer.
    #[wasm_bindgen]
    pub fn impact_count(&self) -> usize {
        self.session.impacts.impacts().len()
    }

    #[wasm_bindgen]
    pub fn eye_pop(&self) -> f32 {
        self.session.effects.intensities().eye_pop
    }

    #[wasm_bindgen]
    pub fn cheek_wobble(&self) -> f32 {
        self.session.effects.intensities().cheek_wobble
    }

    #[wasm_bindgen]
    pub fn nose_squash(&self) -> f32 {
        self.session.effects.intensities().nose_squash
    }

    #[wasm_bindgen]
    pub fn head_squash(&self) -> f32 {
        self.session.effects.intensities().head_squash
    }

    #[wasm_bindgen]
    pub fn jaw_detached(&self) -> bool {
        self.session.effects.jaw_detached()
    }

    #[wasm_bindgen]
    pub fn jaw_detach_progress(&self) -> f32 {
        self.session.effects.jaw_detach_progress()
    }

    /// Squash axis as [x, y, z] for the per-part transform animation.
    #[wasm_bindgen]
    pub fn squash_axis(&self) -> Vec<f32> {
        let axis = self.session.effects.squash_axis();
        vec![axis.x, axis.y, axis.z]
    }

    #[wasm_bindgen]
    pub fn set_solver_config(&mut self, substeps: u32, global_damping: f32) {
        self.session.solver.config.substeps = substeps;
        self.session.solver.config.global_damping = global_damping;
        self.quality.max_substeps = substeps;
    }

    #[wasm_bindgen]
    pub fn set_adaptive_quality(&mut self, enabled: bool, budget_ms: f32) {
        self.quality.enabled = enabled;
        self.quality.budget_ms = budget_ms;
    }

    #[wasm_bindgen]
    pub fn set_punch_params(&mut self, force: f32, radius: f32) {
        self.session.punch_force = force;
        self.session.punch_radius = radius;
    }

    #[wasm_bindgen]
    pub fn set_floor(&mut self, enabled: bool, floor_y: f32) {
        self.session.floor_enabled = enabled;
        self.session.solver.config.floor_y = floor_y;
    }

    #[wasm_bindgen]
    pub fn reset(&mut self) {
        self.session.reset();
        self.write_gpu_output();
    }
}

impl OpponentWorld {
    fn write_gpu_output(&mut self) {
        let solver = &self.session.solver;
        for i in 0..solver.particle_count() {
            let pos = solver.particles.position[i];
            let disp = pos - solver.particles.rest_position[i];
            self.gpu_buffer[i] = GpuVertex {
                position: [pos.x, pos.y, pos.z],
                _pad0: 0.0,
                displacement: [disp.x, disp.y, disp.z],
                _pad1: 0.0,
            };
        }

        // Bounded copy of the ordered impact list into fixed uniform slots.
        for slot in self.impact_buffer.iter_mut() {
            *slot = GpuImpact {
                point: [0.0; 3],
                strength: 0.0,
            };
        }
        for (slot, event) in self
            .impact_buffer
            .iter_mut()
            .zip(self.session.impacts.impacts())
        {
            *slot = GpuImpact {
                point: [event.hit_point.x, event.hit_point.y, event.hit_point.z],
                strength: event.strength,
            };
        }
    }
}
