//! Verlet rope physics and hook state machines for 2D grappling hooks.
//!
//! `grapnel` fires a line from a player anchor, detects when its hook hits the
//! world, lets the player climb the hooked line or swing on it, and retracts it
//! point by point. Designed to sit under a game engine: collision casts,
//! rendering and player movement stay on the host side behind small traits.
//!
//! # Features
//!
//! - **Rope solver**: Position Verlet with iterative distance-constraint relaxation
//! - **Line simulation**: Kinematic extension, climbing and retraction with point merging
//! - **Line state machine**: Extending, hooked, unhooked and retracting with observable events
//! - **Grapple hook**: Fire, reel and retract commands with an extend timer
//! - **Host seams**: `ContactProbe`, `LineFeedback` and a climb position-correction callback
//! - **`no_std` compatible**: Works in embedded and WASM environments

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod point;
pub mod segment;
pub mod solver;
pub mod line;
pub mod state;
pub mod hook;
pub mod world;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::{Vec, Vec2};
pub use point::ConstraintPoint;
pub use segment::ConstraintSegment;
pub use solver::RopeSolver;
pub use line::{Advance, LineFrame, LineMode, LineSignal, LineSimulation};
pub use state::{LineEvent, LineState, LineStateMachine};
pub use hook::{GrappleHook, HookState, LineId, PositionCorrection};
pub use world::{Anchor, ContactProbe, EmptyWorld, LineFeedback, NoFeedback};
pub use config::{HookConfig, LineConfig};
pub use observer::{LineObserver, NoOpLineObserver, NoOpStepObserver, StepObserver};
pub use error::GrappleError;
