//! # RODEO
//!
//! A scripting language for mechanical bull actuator rigs.
//!
//! Operators write short scripts of speed, torque, yaw, brake and
//! pattern commands with sensor reads and bounded control flow. The
//! scripts run against a simulated rig, so a ride can be rehearsed
//! and tuned before anything with a motor in it moves.
//!
//! Run the executable with no arguments for the interactive console,
//! or pass a script file (or URL) to run it and print the final rig
//! report.

#[path = "doc/reference.rs"]
#[allow(non_snake_case)]
pub mod _Language_Reference;

pub mod lang;
pub mod mach;
pub mod term;
