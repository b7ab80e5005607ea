//! Main two-wheel rover executable entry point.
//!
//! # Architecture
//!
//! The executable runs a telecommand script against a simulated rover:
//!
//!     - Initialise the session, logging and parameters
//!     - Build the robot (navigator, motion control, wheels and energy tank)
//!     - For each telecommand of the script, in execution order:
//!         - Exchange it with the robot through the transmitter
//!         - Save any newly loaded plan into the session
//!
//! The script path is the only command line argument.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{eyre::{eyre, WrapErr}, Report};
use log::{debug, info, warn};
use std::env;

// Internal
use comms_if::tc::Command;
use twr_lib::{
    drive::OdometerWheel,
    energy::{EnergySource, EnergyTank},
    motion_ctrl::{MotionCtrl, Params as MotionCtrlParams},
    nav::{Navigator, Params as NavParams},
    params::TwrExecParams,
    robot::Robot,
    transmitter::Transmitter,
};
use util::{
    logger::{logger_init, LevelFilter},
    script_interpreter::ScriptInterpreter,
    session::Session,
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Level caps for the modules logging every step of a motion.
const STEP_LOG_LEVELS: [(&str, LevelFilter); 2] = [
    ("twr_lib::motion_ctrl", LevelFilter::Debug),
    ("twr_lib::drive", LevelFilter::Debug),
];

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    color_eyre::install()?;

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new("twr_exec", "sessions")
        .wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Trace, &STEP_LOG_LEVELS, &session)
        .wrap_err("Failed to initialise logging")?;

    info!("Two-Wheel Rover Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let exec_params: TwrExecParams = util::params::load("twr_exec.toml")
        .wrap_err("Could not load exec params")?;
    let nav_params: NavParams = util::params::load("nav.toml")
        .wrap_err("Could not load nav params")?;
    let motion_ctrl_params: MotionCtrlParams = util::params::load("motion_ctrl.toml")
        .wrap_err("Could not load motion_ctrl params")?;

    info!("Exec parameters loaded");

    if nav_params.min_translation_length_m < motion_ctrl_params.step_length_m() {
        warn!(
            "Translations down to {} m are kept but a wheel step covers {} m, \
            such short translations will be rejected",
            nav_params.min_translation_length_m,
            motion_ctrl_params.step_length_m()
        );
    }

    // ---- LOAD SCRIPT ----

    let args: Vec<String> = env::args().collect();

    debug!("CLI arguments: {:?}", args);

    if args.len() != 2 {
        return Err(eyre!("Expected a single argument, the path to the script"));
    }

    info!("Loading script from \"{}\"", &args[1]);

    let mut si = ScriptInterpreter::new(&args[1]).wrap_err("Failed to load script")?;

    info!(
        "Loaded script lasts {:.02} s and contains {} TCs\n",
        si.get_duration(),
        si.get_num_tcs()
    );

    // ---- INITIALISE ROBOT ----

    info!("Initialising robot...");

    let mut motion_ctrl = MotionCtrl::new(
        motion_ctrl_params,
        OdometerWheel::new(),
        OdometerWheel::new(),
    )
    .wrap_err("Failed to create MotionCtrl")?;
    motion_ctrl
        .init(&session)
        .map_err(|e| eyre!("{}", e))
        .wrap_err("Failed to initialise MotionCtrl")?;

    let mut robot = Robot::new(
        Navigator::new(nav_params),
        motion_ctrl,
        EnergyTank::new(exec_params.initial_energy),
    );
    let transmitter = Transmitter::new();

    info!("Robot initialisation complete\n");

    // ---- MAIN LOOP ----

    while let Some(tc) = si.next_tc() {
        info!(
            "TC: {}",
            tc.to_json().wrap_err("Failed to serialise the TC")?
        );

        let response = transmitter.exchange(&mut robot, &tc);

        info!(
            "Response: {}",
            response.to_json().wrap_err("Failed to serialise the response")?
        );

        for e in response.errors.iter() {
            warn!("{:?}: {}", response.command, e);
        }

        if response.command == Command::LoadedOk {
            if let Some(plan) = robot.plan() {
                session.save_or_warn(&exec_params.plan_file_name, &plan);
            }
        }
    }

    info!("End of TC script reached, stopping");
    info!(
        "Wheel odometry: left {:.3} m, right {:.3} m",
        robot.motion_ctrl().left().total_m,
        robot.motion_ctrl().right().total_m
    );
    info!("Energy left: {:.3}", robot.energy().quantity());

    Ok(())
}
