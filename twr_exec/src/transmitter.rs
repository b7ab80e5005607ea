//! # Transmitter module
//!
//! The transmitter is the robot's side of the telecommand link. Each request
//! command is mapped to a handler building the response, the map being built
//! once when the transmitter is created.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, warn};
use std::collections::HashMap;

// Internal
use crate::{
    drive::Wheel,
    energy::EnergySource,
    robot::{Robot, RobotError},
};
use comms_if::tc::{Command, Tc};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A function answering a telecommand.
pub type Handler<W, E> = fn(&mut Robot<W, E>, &Tc) -> Tc;

/// Dispatches telecommands to the robot.
pub struct Transmitter<W: Wheel, E: EnergySource> {
    handlers: HashMap<Command, Handler<W, E>>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<W: Wheel, E: EnergySource> Transmitter<W, E> {
    pub fn new() -> Self {
        let mut handlers: HashMap<Command, Handler<W, E>> = HashMap::new();

        handlers.insert(Command::ReadyForLoading, on_ready_for_loading::<W, E>);
        handlers.insert(Command::Loading, on_loading::<W, E>);
        handlers.insert(Command::Move, on_move::<W, E>);

        Self { handlers }
    }

    /// The commands this transmitter can answer.
    pub fn commands(&self) -> Vec<Command> {
        self.handlers.keys().copied().collect()
    }

    /// Answer a telecommand.
    ///
    /// Commands without a handler are answered with `INVALID`.
    pub fn exchange(&self, robot: &mut Robot<W, E>, tc: &Tc) -> Tc {
        debug!("Received {:?} telecommand", tc.command);

        let response = match self.handlers.get(&tc.command) {
            Some(handler) => handler(robot, tc),
            None => {
                warn!("No handler for {:?} telecommand", tc.command);
                Tc::new(Command::Invalid)
                    .with_errors(vec![format!("unsupported command {:?}", tc.command)])
            }
        };

        debug!("Answering with {:?}", response.command);

        response
    }
}

impl<W: Wheel, E: EnergySource> Default for Transmitter<W, E> {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// HANDLERS
// ---------------------------------------------------------------------------

fn on_ready_for_loading<W: Wheel, E: EnergySource>(robot: &mut Robot<W, E>, tc: &Tc) -> Tc {
    if robot.is_moving() {
        return Tc::new(Command::Moving);
    }

    Tc::new(tc.command)
}

fn on_loading<W: Wheel, E: EnergySource>(robot: &mut Robot<W, E>, tc: &Tc) -> Tc {
    if robot.is_moving() {
        return Tc::new(Command::Moving);
    }

    let payload = match &tc.payload {
        Some(p) if !p.is_null() => p.clone(),
        _ => {
            return Tc::new(Command::LoadedInvalid).with_errors(vec![String::from("no payload")])
        }
    };

    let positions: Vec<(f64, f64)> = match serde_json::from_value(payload) {
        Ok(p) => p,
        Err(e) => {
            return Tc::new(Command::LoadedInvalid)
                .with_errors(vec![format!("invalid waypoints: {}", e)])
        }
    };

    match robot.load_positions(&positions) {
        Ok(_) => Tc::new(Command::LoadedOk),
        Err(e) => Tc::new(Command::LoadedInvalid).with_errors(vec![e.to_string()]),
    }
}

fn on_move<W: Wheel, E: EnergySource>(robot: &mut Robot<W, E>, _tc: &Tc) -> Tc {
    if robot.is_moving() {
        return Tc::new(Command::Moving);
    }

    match robot.run() {
        Ok(reports) => match serde_json::to_value(&reports) {
            Ok(v) => Tc::new(Command::Moved).with_payload(v),
            Err(e) => {
                warn!("Could not serialise the motion reports: {}", e);
                Tc::new(Command::Moved)
            }
        },
        Err(e) => {
            let response = Tc::new(Command::Invalid).with_errors(vec![e.to_string()]);

            // Report what was driven before the abort
            match e {
                RobotError::Aborted { completed, .. } => match serde_json::to_value(&completed) {
                    Ok(v) => response.with_payload(v),
                    Err(e) => {
                        warn!("Could not serialise the motion reports: {}", e);
                        response
                    }
                },
                _ => response,
            }
        }
    }
}
