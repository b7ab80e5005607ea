//! # Rover script interpreter module
//!
//! This module provides an interpreter for rover scripts, allowing 
//! telecommands to be executed from these scripts.
//!
//! A script is a sequence of `<time>: <json TC>;` entries, for example:
//!
//! ```text
//! 0.0: {"kind": "MOTION", "command": "READY_FOR_LOADING"};
//! 1.0: {"kind": "MOTION", "command": "LOADING", "payload": [[0, 0], [5, 0]]};
//! ```

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::fs;
use regex::RegexBuilder;
use thiserror::Error;

// Internal
use comms_if::tc::{Tc, TcParseError};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A command which is scripted to occur at a specific time.
#[derive(Debug)]
pub struct Command {
    /// The time the command is supposed to execute at
    pub exec_time_s: f64,

    /// The Telecommand to run
    pub tc: Tc
}

/// A script interpreter.
///
/// After initialising with the path to the script use `.next_tc` to pop the
/// telecommands in execution order.
#[derive(Debug)]
pub struct ScriptInterpreter {
    _script_path: PathBuf,
    cmds: VecDeque<Command>
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Could not find the script at {0}")]
    ScriptNotFound(String),

    #[error("Could not load the script: {0}")]
    ScriptLoadError(std::io::Error),

    #[error("The script is empty (or is so bad it can't be read)")]
    ScriptEmpty,

    #[error(
        "Script contains an invalid timestamp: {0}. \
        Should be a float (like 1.0)")]
    InvalidTimestamp(String),

    #[error("Script contains an invalid TC at {0} s: {1}")]
    InvalidTc(f64, TcParseError)
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ScriptInterpreter {

    /// Create a new interpreter from the given script path.
    pub fn new<P: AsRef<Path>>(script_path: P) -> Result<Self, ScriptError> {

        // Get the path in a buffer
        let path = PathBuf::from(script_path.as_ref());
        
        // Check that the script file exists.
        if !path.exists() {
            return Err(
                ScriptError::ScriptNotFound(path.to_string_lossy().to_string()));
        }

        // Load the script into a string
        let script = match fs::read_to_string(script_path) {
            Ok(s) => s,
            Err(e) => return Err(ScriptError::ScriptLoadError(e))
        };

        let cmds = Self::parse(&script)?;

        Ok(ScriptInterpreter {
            _script_path: path,
            cmds
        })
    }

    /// Parse the contents of a script, sorting the commands by execution time.
    pub fn parse(script: &str) -> Result<VecDeque<Command>, ScriptError> {
        // Go through the script executing __the magic regex__.
        let re = RegexBuilder::
            new(r"^\s*(\d+(\.\d+)?)\s*:\s*([^;]*);")
            .multi_line(true)
            .build()
            .map_err(|e| ScriptError::InvalidTimestamp(e.to_string()))?;

        let mut cmds: Vec<Command> = Vec::new();

        for cap in re.captures_iter(script) {
            let (time_str, tc_str) = match (cap.get(1), cap.get(3)) {
                (Some(t), Some(c)) => (t.as_str(), c.as_str()),
                _ => continue
            };

            // Parse the exec time
            let exec_time_s: f64 = match time_str.parse() {
                Ok(t) => t,
                Err(e) => return Err(
                    ScriptError::InvalidTimestamp(format!("{}", e)))
            };

            // Parse the TC from the payload. The scripts contain JSON only.
            let tc = match Tc::from_json(tc_str) {
                Ok(c) => c,
                Err(e) => return Err(ScriptError::InvalidTc(
                    exec_time_s, e
                ))
            };

            cmds.push(Command {
                exec_time_s,
                tc
            });
        }

        if cmds.is_empty() {
            return Err(ScriptError::ScriptEmpty)
        }

        // Stable sort so equal timestamps keep their script order
        cmds.sort_by(|a, b| a.exec_time_s.total_cmp(&b.exec_time_s));

        Ok(cmds.into())
    }

    /// Pop the next TC to execute, or `None` at the end of the script.
    pub fn next_tc(&mut self) -> Option<Tc> {
        self.cmds.pop_front().map(|c| c.tc)
    }

    /// Get the number of TCs in the script
    pub fn get_num_tcs(&self) -> usize {
        self.cmds.len()
    }

    /// Get the length of the script in seconds
    pub fn get_duration(&self) -> f64 {
        match self.cmds.back() {
            Some(c) => c.exec_time_s,
            None => 0f64
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use comms_if::tc::Command as TcCommand;

    #[test]
    fn test_parse_orders_by_time() {
        let script = r#"
            2.0: {"kind": "MOTION", "command": "MOVE"};
            0.5: {"kind": "MOTION", "command": "LOADING", "payload": [[0, 0], [1, 0]]};
        "#;

        let cmds = ScriptInterpreter::parse(script).unwrap();

        assert_eq!(cmds.len(), 2);
        assert_eq!(cmds[0].tc.command, TcCommand::Loading);
        assert_eq!(cmds[1].tc.command, TcCommand::Move);
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(
            ScriptInterpreter::parse("nothing here"),
            Err(ScriptError::ScriptEmpty)
        ));
    }

    #[test]
    fn test_parse_invalid_tc() {
        assert!(matches!(
            ScriptInterpreter::parse("1.0: {\"command\": \"FLY\"};"),
            Err(ScriptError::InvalidTc(_, _))
        ));
    }
}
