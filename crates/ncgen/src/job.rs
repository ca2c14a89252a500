//! Job files: a program configuration plus the directives to run.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::ProgramConfig;
use crate::error::Result;
use crate::naming::NameGenerator;
use crate::program::{Directive, Program};

/// A program configuration and an ordered list of directives.
///
/// TOML form:
///
/// ```toml
/// [program]
/// name = "123"
/// unit = "cm"
///
/// [[directives]]
/// op = "start_spindle"
///
/// [[directives]]
/// op = "feed_linear"
/// position = [0, 65.5]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Job {
    /// Program settings.
    #[serde(default)]
    pub program: ProgramConfig,
    /// Directives in execution order.
    #[serde(default)]
    pub directives: Vec<Directive>,
}

impl Job {
    /// Parse a TOML job.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Parse a JSON job.
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a job file. `.json` files are parsed as JSON, anything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&text)
        } else {
            Self::from_toml_str(&text)
        }
    }

    /// Open the program and apply every directive, leaving it unfinalized.
    pub fn build(&self, names: &mut dyn NameGenerator) -> Result<Program> {
        let mut program = Program::with_name_generator(self.program.clone(), names)?;
        for directive in &self.directives {
            program.apply(directive)?;
        }
        tracing::debug!(
            name = program.name(),
            directives = self.directives.len(),
            "job applied"
        );
        Ok(program)
    }

    /// Build and finalize the program, returning the listing.
    pub fn render(&self, names: &mut dyn NameGenerator) -> Result<String> {
        Ok(self.build(names)?.eval())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProgramError;
    use crate::naming::SeededNames;
    use crate::position::Position;

    const TOML_JOB: &str = r#"
[program]
name = "123"
unit = "cm"
start = [0, 0]
clearance = 10

[[directives]]
op = "start_spindle"

[[directives]]
op = "start_coolant"

[[directives]]
op = "drop_mill"

[[directives]]
op = "feed_linear"
position = [0, 65.5]

[[directives]]
op = "feed_linear"
position = { x = 23.4, y = 65.5 }
"#;

    const JSON_JOB: &str = r#"{
  "program": { "name": "123", "unit": "cm", "start": [0, 0], "clearance": 10 },
  "directives": [
    { "op": "start_spindle" },
    { "op": "start_coolant" },
    { "op": "drop_mill" },
    { "op": "feed_linear", "position": [0, 65.5] },
    { "op": "feed_linear", "position": { "x": 23.4, "y": 65.5 } }
  ]
}"#;

    #[test]
    fn test_parse_toml() {
        let job = Job::from_toml_str(TOML_JOB).unwrap();
        assert_eq!(job.program.name.as_deref(), Some("123"));
        assert_eq!(job.directives.len(), 5);
        assert_eq!(
            job.directives[4],
            Directive::FeedLinear {
                position: Position::xy(23.4, 65.5),
                feedrate: None,
            }
        );
    }

    #[test]
    fn test_toml_and_json_render_identically() {
        let mut names = SeededNames::default();
        let from_toml = Job::from_toml_str(TOML_JOB).unwrap().render(&mut names).unwrap();
        let from_json = Job::from_json_str(JSON_JOB).unwrap().render(&mut names).unwrap();
        assert_eq!(from_toml, from_json);
        assert!(from_toml.contains("N009 G01 X234 Y655 F500"));
        assert!(from_toml.ends_with("N013 M30\n%"));
    }

    #[test]
    fn test_directive_after_terminate_fails() {
        let job = Job::from_json_str(
            r#"{"directives": [{"op": "terminate"}, {"op": "stop_coolant"}]}"#,
        )
        .unwrap();
        let err = job.build(&mut SeededNames::default()).unwrap_err();
        assert!(matches!(err, ProgramError::Closed));
    }

    #[test]
    fn test_bad_positioning_rejected() {
        let err = Job::from_toml_str("[program]\npositioning = \"diagonal\"\n").unwrap_err();
        assert!(matches!(err, ProgramError::Toml(_)));
    }

    #[test]
    fn test_json_roundtrip() {
        let job = Job::from_toml_str(TOML_JOB).unwrap();
        let json = job.to_json().unwrap();
        let parsed = Job::from_json_str(&json).unwrap();
        assert_eq!(parsed.directives, job.directives);
    }

    #[test]
    fn test_demo_jobs_render() {
        let mut names = SeededNames::default();

        let reference = Job::from_toml_str(include_str!("../../../demos/reference.toml")).unwrap();
        let listing = reference.render(&mut names).unwrap();
        assert!(listing.contains("N010 G01 X128 Y327.5 F500\nN011 G01 X128 Y0 F500\n"));
        assert_eq!(listing.lines().count(), 19);

        let drilling = Job::from_json_str(include_str!("../../../demos/drilling.json")).unwrap();
        let listing = drilling.render(&mut names).unwrap();
        assert!(listing.contains("\nG00 X30 Y10 F300\nG00 Z-3 F300\nG00 Z5 F300\n"));
        assert!(listing.ends_with("G00 X0 Y0 Z5 F300\nM05\nM09\nG00 Z5 F300\nM30\n%"));
    }

    #[test]
    fn test_blank_job_name_is_generated() {
        let job = Job::from_toml_str("[program]\nname = \"\"\n").unwrap();
        let program = job.build(&mut crate::naming::FixedName("J01".into())).unwrap();
        assert_eq!(program.name(), "J01");
    }

    #[test]
    fn test_load_missing_file() {
        let err = Job::load("/nonexistent/job.toml").unwrap_err();
        assert!(matches!(err, ProgramError::Io(_)));
    }
}
