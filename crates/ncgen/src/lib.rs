#![warn(missing_docs)]

//! Numbered CNC control-program generation.
//!
//! A [`Program`] turns machining directives (moves, drilling, spindle and
//! coolant control) into a line-numbered listing. Coordinates and
//! feedrates are given in the configured [`Unit`] and scaled to
//! millimeters on emission.
//!
//! # Example
//!
//! ```
//! use ncgen::{Program, ProgramConfig, Position};
//!
//! let mut program = Program::new(ProgramConfig {
//!     name: Some("123".into()),
//!     unit: "cm".into(),
//!     start: Some(Position::xy(0.0, 0.0)),
//!     ..Default::default()
//! })
//! .unwrap();
//!
//! program.start_spindle(true).unwrap();
//! program.drop_mill(None).unwrap();
//! program.feed_linear([0.0, 65.5], None).unwrap();
//!
//! let listing = program.eval();
//! assert!(listing.contains("N007 G01 X0 Y655 F500"));
//! ```

pub mod code;
mod config;
mod error;
pub mod format;
mod job;
pub mod naming;
mod position;
mod positioning;
mod program;
mod unit;

pub use code::{Motion, Opcode};
pub use config::ProgramConfig;
pub use error::{ProgramError, Result};
pub use job::Job;
pub use naming::{FixedName, NameGenerator, SeededNames};
pub use position::Position;
pub use positioning::Positioning;
pub use program::{Directive, Program, ProgramState, TAPE_MARKER};
pub use unit::Unit;
