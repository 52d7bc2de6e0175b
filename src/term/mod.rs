/*!
## Rust Terminal Module

The operator console. Interactive mode executes each entered line
against a persistent machine; CTRL-C latches the rig's emergency flag.
Batch mode loads a script from a file or URL, runs it, and prints the
final rig report.

*/

extern crate ansi_term;
extern crate ctrlc;
extern crate linefeed;

use crate::lang::{self, Error};
use crate::mach::Machine;
use crate::error;
use ansi_term::{Colour, Style};
use linefeed::{Interface, ReadResult, Terminal};
use std::io::ErrorKind;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub fn main() {
    let mut args = std::env::args();
    args.next();
    match args.next() {
        Some(script) => {
            if let Err(error) = run_script(&script) {
                eprintln!("{}", Style::new().bold().paint(error.to_string()));
                std::process::exit(1);
            }
        }
        None => console(),
    }
}

fn run_script(script: &str) -> Result<(), Error> {
    let source = load(script)?;
    let program = lang::compile(&source)?;
    let mut machine = Machine::new();
    machine.execute(&program);
    for event in machine.events() {
        println!("  {}", event);
    }
    report(&machine);
    Ok(())
}

fn console() {
    let interrupted = Arc::new(AtomicBool::new(false));
    let int_moved = interrupted.clone();
    ctrlc::set_handler(move || {
        int_moved.store(true, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl-C handler");
    if let Err(error) = console_loop(interrupted) {
        eprintln!("{}", error);
    }
}

fn console_loop(interrupted: Arc<AtomicBool>) -> std::io::Result<()> {
    let interface = Interface::new("rodeo")?;
    interface.set_prompt("> ")?;
    let mut machine = Machine::new();
    println!("RODEO rig console");
    println!("READY.");
    loop {
        if interrupted.load(Ordering::SeqCst) {
            machine.set_emergency(true);
            interrupted.store(false, Ordering::SeqCst);
            interface.write_fmt(format_args!(
                "{}\n",
                Colour::Red.bold().paint("EMERGENCY LATCHED")
            ))?;
        }
        match interface.read_line()? {
            ReadResult::Input(string) => {
                enter(&mut machine, &string, &interface)?;
                if !string.trim().is_empty() {
                    interface.add_history_unique(string);
                }
            }
            ReadResult::Signal(_) | ReadResult::Eof => break,
        }
    }
    report(&machine);
    Ok(())
}

fn enter<T: Terminal>(
    machine: &mut Machine,
    string: &str,
    interface: &Interface<T>,
) -> std::io::Result<()> {
    match lang::compile(string) {
        Ok(program) => {
            machine.execute(&program);
            for event in machine.events() {
                interface.write_fmt(format_args!("  {}\n", event))?;
            }
            for warning in machine.warnings() {
                interface.write_fmt(format_args!(
                    "{}\n",
                    Style::new().bold().paint(warning.to_string())
                ))?;
            }
            machine.reset_trace();
        }
        Err(error) => {
            interface.write_fmt(format_args!(
                "{}\n",
                Style::new().bold().paint(error.to_string())
            ))?;
        }
    }
    Ok(())
}

fn load(script: &str) -> Result<String, Error> {
    if script.starts_with("http://") || script.starts_with("https://") {
        let response = match reqwest::blocking::get(script) {
            Ok(response) => response,
            Err(error) => return Err(error!(ScriptNotFound; error.to_string())),
        };
        match response.text() {
            Ok(text) => Ok(text),
            Err(error) => Err(error!(InternalError; error.to_string())),
        }
    } else {
        match std::fs::read_to_string(script) {
            Ok(text) => Ok(text),
            Err(error) => match error.kind() {
                ErrorKind::NotFound => Err(error!(ScriptNotFound; script)),
                _ => Err(error!(InternalError; error.to_string())),
            },
        }
    }
}

fn report(machine: &Machine) {
    let heading = Style::new().bold();
    let rig = machine.rig();
    println!();
    println!(
        "{}",
        heading.paint(format!(
            "FINAL RIG STATE  {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        ))
    );
    println!(
        "  Speed:     {:>4}%  {}",
        rig.speed,
        if rig.speed > 0 {
            Colour::Yellow.paint("ACTIVE")
        } else {
            Colour::Green.paint("STOPPED")
        }
    );
    println!("  Torque:    {:>4}%", rig.torque);
    println!("  Yaw:       {:>4} degrees/step", rig.yaw);
    println!(
        "  Brake:     {}",
        if rig.brake != 0 {
            Colour::Red.paint("ON")
        } else {
            Colour::Green.paint("OFF")
        }
    );
    println!("  Pattern:   {}", rig.pattern);
    println!("{}", heading.paint("SENSORS"));
    println!(
        "  Rider:     {}",
        if rig.rider_present != 0 {
            "PRESENT"
        } else {
            "ABSENT"
        }
    );
    println!("  Tilt:      {:>4} degrees", rig.tilt_angle);
    println!("  Rpm:       {:>4}", rig.rpm);
    println!(
        "  Emergency: {}",
        if rig.emergency != 0 {
            Colour::Red.paint("ACTIVE")
        } else {
            Colour::Green.paint("OK")
        }
    );
    if machine.variables().next().is_some() {
        println!("{}", heading.paint("VARIABLES"));
        for (name, value) in machine.variables() {
            println!("  {:<20} = {}", name, value);
        }
    }
    for warning in machine.warnings() {
        println!("{}", Style::new().bold().paint(warning.to_string()));
    }
}
