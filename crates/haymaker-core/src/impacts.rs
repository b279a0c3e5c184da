use glam::Vec3;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// One recorded hit, as the rendering side consumes it.
#[derive(Clone, Copy, Debug)]
pub struct ImpactEvent {
    /// Monotonic id, unique within a manager lifetime.
    pub id: u64,
    /// Contact point in the body's local space.
    pub hit_point: Vec3,
    /// Remaining strength in [0, 1]; decays every tick.
    pub strength: f32,
    /// Manager-clock timestamp of the insertion.
    pub created_at: f32,
}

/// Token returned by `subscribe`, used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&ImpactEvent)>;

/// Bounded FIFO of active impacts with per-event strength decay.
///
/// Holds at most `capacity` events; inserting into a full buffer evicts the
/// oldest first (true FIFO, not strength-based). Each new event is delivered
/// synchronously to every subscriber in registration order. Time is the
/// manager's own accumulated clock, advanced by `tick`; the component never
/// reads wall time.
pub struct ImpactManager {
    buffer: Vec<ImpactEvent>,
    capacity: usize,
    /// Strength lost per second.
    pub decay_rate: f32,
    /// Events at or below this strength are dropped on tick.
    pub min_strength: f32,
    listeners: Vec<(ListenerId, Listener)>,
    next_id: u64,
    next_listener_id: u64,
    clock: f32,
}

pub const DEFAULT_CAPACITY: usize = 5;
pub const DEFAULT_DECAY_RATE: f32 = 2.0;
pub const DEFAULT_MIN_STRENGTH: f32 = 0.01;

impl ImpactManager {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            buffer: Vec::with_capacity(capacity),
            capacity,
            decay_rate: DEFAULT_DECAY_RATE,
            min_strength: DEFAULT_MIN_STRENGTH,
            listeners: Vec::new(),
            next_id: 0,
            next_listener_id: 0,
            clock: 0.0,
        }
    }

    /// Record a hit. Strength is clamped to [0, 1]; if the buffer is full
    /// the oldest event is evicted before the new one is appended, so the
    /// capacity bound holds at every point of the call. All subscribers are
    /// then notified synchronously, each isolated from the others' panics.
    pub fn add_impact(&mut self, point: Vec3, strength: f32) {
        let event = ImpactEvent {
            id: self.next_id,
            hit_point: point,
            strength: strength.clamp(0.0, 1.0),
            created_at: self.clock,
        };
        self.next_id += 1;

        if self.buffer.len() >= self.capacity {
            self.buffer.remove(0);
        }
        self.buffer.push(event);

        for (id, listener) in self.listeners.iter_mut() {
            let outcome = catch_unwind(AssertUnwindSafe(|| listener(&event)));
            if outcome.is_err() {
                log::warn!("impact listener {:?} panicked; continuing delivery", id);
            }
        }
    }

    /// Decay every stored event and drop the spent ones, order preserved.
    pub fn tick(&mut self, dt: f32) {
        self.clock += dt;
        let decay = self.decay_rate * dt;
        let min_strength = self.min_strength;
        self.buffer.retain_mut(|event| {
            event.strength -= decay;
            event.strength > min_strength
        });
    }

    /// Ordered read-only view of the live events, oldest first.
    pub fn impacts(&self) -> &[ImpactEvent] {
        &self.buffer
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Register a listener for every subsequently added event.
    /// Each listener sees each event exactly once, in insertion order.
    pub fn subscribe(&mut self, listener: impl FnMut(&ImpactEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener by token. Unknown tokens are a no-op.
    pub fn unsubscribe(&mut self, id: ListenerId) {
        self.listeners.retain(|(lid, _)| *lid != id);
    }

    /// Empty the buffer; subscribers and counters are untouched.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Empty the buffer, drop all subscribers, and restart ids and the clock.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.listeners.clear();
        self.next_id = 0;
        self.next_listener_id = 0;
        self.clock = 0.0;
    }
}

impl Default for ImpactManager {
    fn default() -> Self {
        Self::new()
    }
}
