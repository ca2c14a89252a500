//! The program builder.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::code::{Motion, Opcode};
use crate::config::ProgramConfig;
use crate::error::{ProgramError, Result};
use crate::format::{axis_words, feedrate_word, line_number_word, program_name_word};
use crate::naming::{NameGenerator, SeededNames};
use crate::position::Position;
use crate::positioning::Positioning;
use crate::unit::Unit;

/// Program-open and program-close marker.
pub const TAPE_MARKER: &str = "%";

/// Lifecycle of a [`Program`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramState {
    /// Startup sequence not yet emitted.
    Uninitialized,
    /// Accepting directives.
    Open,
    /// Terminated; only finalization is allowed.
    Closed,
}

/// A serialized builder operation, as stored in job files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Directive {
    /// Switch positioning mode.
    SetPositioning {
        /// New mode.
        positioning: Positioning,
    },
    /// Rapid move to a Z depth (default 0).
    DropMill {
        /// Target depth.
        #[serde(default)]
        depth: Option<f64>,
    },
    /// Rapid move to a Z height (default clearance).
    RaiseMill {
        /// Target height.
        #[serde(default)]
        depth: Option<f64>,
    },
    /// Start the spindle.
    StartSpindle {
        /// Clockwise rotation (default true).
        #[serde(default = "default_true")]
        clockwise: bool,
    },
    /// Stop the spindle.
    StopSpindle,
    /// Start the coolant.
    StartCoolant {
        /// Flood instead of mist (default false).
        #[serde(default)]
        flood: bool,
    },
    /// Stop the coolant.
    StopCoolant,
    /// Rapid move.
    FeedRapid {
        /// Target.
        position: Position,
        /// Feedrate override.
        #[serde(default)]
        feedrate: Option<f64>,
    },
    /// Linear cutting move.
    FeedLinear {
        /// Target.
        position: Position,
        /// Feedrate override.
        #[serde(default)]
        feedrate: Option<f64>,
    },
    /// Drill a hole at an XY location.
    Drill {
        /// Hole location; only X and Y are used.
        position: Position,
        /// Hole bottom (default 0).
        #[serde(default)]
        depth: Option<f64>,
    },
    /// Rapid move to the configured finish position.
    Park,
    /// End the program.
    Terminate {
        /// Stop immediately with `M00` instead of shutting down and rewinding.
        #[serde(default)]
        force: bool,
    },
}

fn default_true() -> bool {
    true
}

/// A CNC program under construction.
///
/// Opening the program emits the startup sequence (tape marker, name,
/// unit and positioning modes, raise to clearance, rapid to start).
/// Directives are appended in call order; [`Program::eval`] closes the
/// program if needed and returns the listing.
///
/// # Example
///
/// ```
/// use ncgen::{Program, ProgramConfig};
///
/// let mut program = Program::new(ProgramConfig {
///     name: Some("101".into()),
///     ..Default::default()
/// })
/// .unwrap();
/// program.start_spindle(true).unwrap();
/// program.drop_mill(None).unwrap();
/// program.feed_linear([10.0, 0.0], None).unwrap();
///
/// let listing = program.eval();
/// assert!(listing.starts_with("%\nO101\nN001 G21\n"));
/// assert!(listing.ends_with("M30\n%"));
/// ```
#[derive(Debug, Clone)]
pub struct Program {
    name: String,
    unit: Unit,
    positioning: Positioning,
    feedrate: f64,
    clearance: f64,
    start: Position,
    finish: Position,
    line_numbering: bool,
    next_line: u32,
    strict: bool,
    state: ProgramState,
    sealed: bool,
    lines: Vec<String>,
}

impl Program {
    /// Open a program, generating a name from the default seeded sequence
    /// when the configuration has none.
    pub fn new(config: ProgramConfig) -> Result<Self> {
        Self::with_name_generator(config, &mut SeededNames::default())
    }

    /// Open a program, drawing a name from `names` when the configuration
    /// has none.
    pub fn with_name_generator(
        config: ProgramConfig,
        names: &mut dyn NameGenerator,
    ) -> Result<Self> {
        let unit = if config.strict {
            Unit::parse(&config.unit).ok_or_else(|| ProgramError::UnknownUnit(config.unit.clone()))?
        } else {
            Unit::parse_lenient(&config.unit)
        };

        let name = match config.name.as_deref().filter(|n| !n.trim().is_empty()) {
            Some(name) => name.to_uppercase(),
            None => names.next_name().to_uppercase(),
        };

        let mut program = Self {
            name,
            unit,
            positioning: config.positioning,
            feedrate: config.feedrate,
            clearance: config.clearance,
            start: config.start_position(),
            finish: config.finish_position(),
            line_numbering: config.line_numbering,
            next_line: 1,
            strict: config.strict,
            state: ProgramState::Uninitialized,
            sealed: false,
            lines: Vec::new(),
        };

        program.check_finite("feedrate", program.feedrate)?;
        program.check_finite("clearance", program.clearance)?;
        program.check_position(&program.start)?;
        program.check_position(&program.finish)?;

        program.initialize();
        Ok(program)
    }

    fn initialize(&mut self) {
        self.add(TAPE_MARKER);
        self.add(&program_name_word(&self.name));
        self.add(&self.unit.select_opcode().to_string());
        self.add(&self.positioning.opcode().to_string());

        self.state = ProgramState::Open;
        tracing::debug!(
            name = %self.name,
            unit = %self.unit,
            positioning = %self.positioning,
            "program opened"
        );

        self.motion(Motion::Rapid, &Position::z(self.clearance), None);
        let start = self.start;
        self.motion(Motion::Rapid, &start, None);
    }

    /// Program name as emitted after `O`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolved unit.
    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Current positioning mode.
    pub fn positioning(&self) -> Positioning {
        self.positioning
    }

    /// Lifecycle state.
    pub fn state(&self) -> ProgramState {
        self.state
    }

    /// Whether the program accepts directives.
    pub fn is_running(&self) -> bool {
        self.state == ProgramState::Open
    }

    /// Switch positioning mode.
    pub fn set_positioning(&mut self, positioning: Positioning) -> Result<()> {
        self.ensure_open()?;
        self.positioning = positioning;
        self.add(&positioning.opcode().to_string());
        Ok(())
    }

    /// Rapid to `depth` along Z (0 when `None`).
    pub fn drop_mill(&mut self, depth: Option<f64>) -> Result<()> {
        self.feed_rapid(Position::z(depth.unwrap_or(0.0)), None)
    }

    /// Rapid to `depth` along Z (clearance when `None`).
    pub fn raise_mill(&mut self, depth: Option<f64>) -> Result<()> {
        self.feed_rapid(Position::z(depth.unwrap_or(self.clearance)), None)
    }

    /// Start the spindle (`M03` clockwise, `M04` counter-clockwise).
    pub fn start_spindle(&mut self, clockwise: bool) -> Result<()> {
        let opcode = if clockwise {
            Opcode::SpindleCw
        } else {
            Opcode::SpindleCcw
        };
        self.function(opcode)
    }

    /// Stop the spindle (`M05`).
    pub fn stop_spindle(&mut self) -> Result<()> {
        self.function(Opcode::SpindleStop)
    }

    /// Start the coolant (`M08` flood, `M07` mist).
    pub fn start_coolant(&mut self, flood: bool) -> Result<()> {
        let opcode = if flood {
            Opcode::CoolantFlood
        } else {
            Opcode::CoolantMist
        };
        self.function(opcode)
    }

    /// Stop the coolant (`M09`).
    pub fn stop_coolant(&mut self) -> Result<()> {
        self.function(Opcode::CoolantStop)
    }

    /// Rapid move to `position`, at the configured feedrate unless overridden.
    pub fn feed_rapid(&mut self, position: impl Into<Position>, feedrate: Option<f64>) -> Result<()> {
        self.feed(Motion::Rapid, position.into(), feedrate)
    }

    /// Linear cutting move to `position`, at the configured feedrate unless overridden.
    pub fn feed_linear(&mut self, position: impl Into<Position>, feedrate: Option<f64>) -> Result<()> {
        self.feed(Motion::Linear, position.into(), feedrate)
    }

    /// Emit a move of the given kind.
    pub fn feed(&mut self, motion: Motion, position: Position, feedrate: Option<f64>) -> Result<()> {
        self.ensure_open()?;
        self.check_position(&position)?;
        if let Some(feedrate) = feedrate {
            self.check_finite("feedrate", feedrate)?;
        }
        self.motion(motion, &position, feedrate);
        Ok(())
    }

    /// Drill at the XY of `position`: rapid over the hole, drop to `depth`
    /// (0 when `None`), then raise to clearance.
    pub fn drill(&mut self, position: impl Into<Position>, depth: Option<f64>) -> Result<()> {
        let position = position.into();
        let over = Position {
            z: None,
            ..position
        };
        if !over.is_empty() {
            self.feed_rapid(over, None)?;
        }
        self.drop_mill(depth)?;
        self.raise_mill(None)
    }

    /// Rapid to the configured finish position.
    pub fn park(&mut self) -> Result<()> {
        let finish = self.finish;
        self.feed_rapid(finish, None)
    }

    /// End the program.
    ///
    /// Unless `force` is set, the spindle and coolant are stopped and the
    /// mill raised to clearance before `M30`. A forced stop emits only `M00`.
    pub fn terminate(&mut self, force: bool) -> Result<()> {
        self.ensure_open()?;
        self.close(force);
        Ok(())
    }

    fn close(&mut self, force: bool) {
        if !force {
            self.add(&Opcode::SpindleStop.to_string());
            self.add(&Opcode::CoolantStop.to_string());
            self.motion(Motion::Rapid, &Position::z(self.clearance), None);
        }
        let end = if force {
            Opcode::ForcedStop
        } else {
            Opcode::ProgramEnd
        };
        self.add(&end.to_string());
        self.state = ProgramState::Closed;
        tracing::debug!(name = %self.name, force, "program closed");
    }

    /// Apply a serialized directive.
    pub fn apply(&mut self, directive: &Directive) -> Result<()> {
        match *directive {
            Directive::SetPositioning { positioning } => self.set_positioning(positioning),
            Directive::DropMill { depth } => self.drop_mill(depth),
            Directive::RaiseMill { depth } => self.raise_mill(depth),
            Directive::StartSpindle { clockwise } => self.start_spindle(clockwise),
            Directive::StopSpindle => self.stop_spindle(),
            Directive::StartCoolant { flood } => self.start_coolant(flood),
            Directive::StopCoolant => self.stop_coolant(),
            Directive::FeedRapid { position, feedrate } => self.feed_rapid(position, feedrate),
            Directive::FeedLinear { position, feedrate } => self.feed_linear(position, feedrate),
            Directive::Drill { position, depth } => self.drill(position, depth),
            Directive::Park => self.park(),
            Directive::Terminate { force } => self.terminate(force),
        }
    }

    /// Close the program if it is still open, append the closing tape
    /// marker, and return the listing.
    ///
    /// Calling this again returns the same listing.
    pub fn eval(&mut self) -> String {
        if self.state == ProgramState::Open {
            self.close(false);
        }
        if !self.sealed {
            self.add(TAPE_MARKER);
            self.sealed = true;
        }
        self.lines.join("\n")
    }

    /// Append one line, prefixing it with a line number unless it is a
    /// tape marker or the program name.
    fn add(&mut self, line: &str) {
        let line = if self.line_numbering && !is_unnumbered(line) {
            let numbered = format!("{} {}", line_number_word(self.next_line), line);
            self.next_line += 1;
            numbered
        } else {
            line.to_string()
        };
        tracing::trace!(line = %line, "emit");
        self.lines.push(line);
    }

    fn function(&mut self, opcode: Opcode) -> Result<()> {
        self.ensure_open()?;
        self.add(&opcode.to_string());
        Ok(())
    }

    fn motion(&mut self, motion: Motion, position: &Position, feedrate: Option<f64>) {
        let feedrate = feedrate.unwrap_or(self.feedrate);
        let mut words = vec![motion.opcode().to_string()];
        let axes = axis_words(position, self.unit);
        if !axes.is_empty() {
            words.push(axes);
        }
        words.push(feedrate_word(feedrate, self.unit));
        self.add(&words.join(" "));
    }

    fn ensure_open(&self) -> Result<()> {
        match self.state {
            ProgramState::Open => Ok(()),
            _ => Err(ProgramError::Closed),
        }
    }

    fn check_finite(&self, field: &'static str, value: f64) -> Result<()> {
        if self.strict && !value.is_finite() {
            return Err(ProgramError::non_finite(field, value));
        }
        Ok(())
    }

    fn check_position(&self, position: &Position) -> Result<()> {
        for (axis, value) in position.components() {
            let field = match axis {
                'X' => "x",
                'Y' => "y",
                _ => "z",
            };
            self.check_finite(field, value)?;
        }
        Ok(())
    }
}

fn is_unnumbered(line: &str) -> bool {
    line == TAPE_MARKER || line.starts_with('O')
}

impl fmt::Display for Program {
    /// Renders the listing [`Program::eval`] would return, without
    /// modifying this program.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.clone().eval())
    }
}
