//! Hack planner: a list of three-phase hack events laid out on an
//! infinitely scrolling, zoomable calendar strip.
//!
//! [`model`] holds the timeline engine and the event data and has no UI
//! dependencies; the egui front end in the binary sits on top of it.

pub mod config;
pub mod error;
pub mod io;
pub mod logging;
pub mod model;

pub use config::Settings;
pub use error::{HackError, StoreError, TimelineError};
