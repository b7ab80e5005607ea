//! # Telecommand module
//!
//! This module provides telecommand functionality to the communications 
//! interface. A single `Tc` type is used in both directions: the ground sends
//! a `Tc` holding a request command (e.g. `LOADING`) and the rover answers
//! with a `Tc` holding a response command (e.g. `LOADED_OK`).

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Serialize, Deserialize};
use serde_json::{self, Value};
use thiserror::Error;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A telecommand, i.e. an instruction sent to the rover by the ground station,
/// or the rover's response to one.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Tc {
    /// The kind of the telecommand
    #[serde(default)]
    pub kind: Kind,

    /// The command carried by this telecommand
    pub command: Command,

    /// Optional payload, interpreted by the handler of the command
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,

    /// Errors reported while handling the command
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Telecommand kinds.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Kind {
    Motion
}

/// Telecommand commands.
///
/// The command is used to identify the purpose of the telecommand, and is used
/// by the rover's transmitter to find the handler to execute.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Command {
    /// Ask whether the rover can accept a new plan.
    ReadyForLoading,
    /// The rover is executing a plan and cannot accept the request.
    Moving,
    /// Load a list of waypoints, given as the `[[x, y], ...]` payload.
    Loading,
    /// The waypoints were accepted and a plan computed.
    LoadedOk,
    /// The waypoints were rejected, see the errors.
    LoadedInvalid,
    /// Execute the loaded plan.
    Move,
    /// The plan was executed.
    Moved,
    /// The command failed or is not handled, see the errors.
    Invalid
}

/// Possible parsing errors.
#[derive(Debug, Error)]
pub enum TcParseError {
    #[error("TC contains invalid JSON: {0}")]
    InvalidJson(serde_json::Error),

    #[error("TC is not a valid telecommand: {0}")]
    InvalidTc(serde_json::Error)
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Kind {
    fn default() -> Self {
        Kind::Motion
    }
}

impl Tc {

    /// Create a new motion telecommand with no payload and no errors.
    pub fn new(command: Command) -> Self {
        Self {
            kind: Kind::Motion,
            command,
            payload: None,
            errors: Vec::new()
        }
    }

    /// Set the payload of this telecommand.
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Set the errors of this telecommand.
    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = errors;
        self
    }

    /// Parse a new TC from a JSON packet
    pub fn from_json(json_str: &str) -> Result<Self, TcParseError> {
        // Parse the JSON string into a value first so that malformed JSON and
        // unknown commands can be told apart
        let val: Value = match serde_json::from_str(json_str) {
            Ok(v) => v,
            Err(e) => return Err(TcParseError::InvalidJson(e))
        };

        serde_json::from_value(val).map_err(TcParseError::InvalidTc)
    }

    /// Serialise the TC into a JSON packet
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
