//! Session state machine behind the GUI.
//!
//! [`Session`] owns the form fields and the current [`Phase`]. It performs
//! no I/O beyond cheap existence checks: the front-end runs the fetch and
//! the worker, then feeds results back in. Button enablement is derived
//! from the phase.

mod controller;
mod error;
mod state;

pub use controller::{FetchRequest, Session};
pub use error::WorkflowError;
pub use state::Phase;
