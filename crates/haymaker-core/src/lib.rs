//! Simulation kernel of the boxing mini-game: the opponent's deformable
//! head and its cartoon reactions.
//!
//! Four cooperating pieces, all single-threaded and wall-clock-free:
//! a substepped XPBD particle solver ([`solver::XpbdSolver`]), a bounded
//! ring buffer of decaying impact events ([`impacts::ImpactManager`]), a
//! pure hit-zone classifier ([`zones::HitZoneClassifier`]), and the
//! effect orchestrator that turns classified hits into timed reactions
//! ([`effects::CartoonEffects`]). [`session::BoutSession`] owns one of
//! each per opponent and wires the per-frame call order.
//!
//! Rendering, input capture and game state live outside this crate and
//! talk to it through plain call contracts: flat particle buffers, the
//! ordered impact list, and per-channel effect intensities.

pub mod config;
pub mod constraints;
pub mod effects;
pub mod forces;
pub mod head;
pub mod impacts;
pub mod particle;
pub mod quality;
pub mod session;
pub mod solver;
pub mod zones;
