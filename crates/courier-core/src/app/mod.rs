//! App - application layer.
//!
//! Wires the ports together:
//! - **RunController**: process-wide enable/disable switch
//! - **IntakeService**: validate + persist + best-effort cache write
//! - **Dispatcher**: timer loop claiming and marking pending batches

pub mod controller;
pub mod dispatcher;
pub mod intake;

pub use self::controller::{RunController, StartOutcome, StopOutcome};
pub use self::dispatcher::{DispatchConfig, Dispatcher, tick_once};
pub use self::intake::IntakeService;
