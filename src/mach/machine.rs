use super::{Clock, Env, Rig, WallClock};
use crate::lang::ast::{Condition, Expression, Pattern, Sensor, Statement};
use crate::lang::Column;
use std::rc::Rc;

/// Runaway-loop guard: a `while` body runs at most this many times.
pub const LOOP_LIMIT: usize = 10_000;

/// One executed command, recorded for the console trace. `wait` in
/// particular is never slept on here; the event is the instruction
/// handed to the actuator driver.
#[derive(Debug, PartialEq)]
pub enum Event {
    Assign(Rc<str>, i32),
    If(bool),
    While(usize),
    Speed(i32),
    Torque(i32),
    Yaw(i32),
    Brake(i32),
    Wait(i32),
    Pattern(Pattern),
    Read(Sensor, Rc<str>, i32),
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Event::*;
        match self {
            Assign(name, value) => write!(f, "[VAR] {} = {}", name, value),
            If(truth) => write!(f, "[IF] condition = {}", if *truth { "TRUE" } else { "FALSE" }),
            While(iterations) => write!(f, "[WHILE] exited after {} iterations", iterations),
            Speed(value) => write!(f, "[SPEED] set to {}%", value),
            Torque(value) => write!(f, "[TORQUE] set to {}%", value),
            Yaw(value) => write!(f, "[YAW] set to {} degrees/step", value),
            Brake(value) => write!(f, "[BRAKE] {}", if *value != 0 { "ON" } else { "OFF" }),
            Wait(ms) => write!(f, "[WAIT] {} ms", ms),
            Pattern(pattern) => write!(f, "[PATTERN] set to {}", pattern),
            Read(sensor, name, value) => write!(f, "[SENSOR] {} -> {} = {}", sensor, name, value),
        }
    }
}

/// Runtime anomalies. None of these stop the script; each substitutes
/// a safe default and execution continues.
#[derive(Debug, PartialEq)]
pub enum Warning {
    DivisionByZero(Column),
    VariableLimit(Column, Rc<str>),
    LoopLimit(Column),
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Warning::*;
        match self {
            DivisionByZero(col) => {
                write!(f, "DIVISION BY ZERO ({}..{})", col.start, col.end)
            }
            VariableLimit(col, name) => write!(
                f,
                "VARIABLE LIMIT EXCEEDED ({}..{}); {} NOT STORED",
                col.start, col.end, name
            ),
            LoopLimit(col) => write!(
                f,
                "LOOP LIMIT EXCEEDED ({}..{}); STOPPED AFTER {} ITERATIONS",
                col.start,
                col.end,
                LOOP_LIMIT
            ),
        }
    }
}

/// The interpreter: variable memory plus the simulated rig, walked
/// over a script's syntax tree. One machine runs one script at a time;
/// re-running against fresh state means a fresh machine.
pub struct Machine {
    env: Env,
    rig: Rig,
    clock: Rc<dyn Clock>,
    start_ms: i64,
    events: Vec<Event>,
    warnings: Vec<Warning>,
}

impl Default for Machine {
    fn default() -> Machine {
        Machine::with_clock(Rc::new(WallClock))
    }
}

impl Machine {
    pub fn new() -> Machine {
        Machine::default()
    }

    pub fn with_clock(clock: Rc<dyn Clock>) -> Machine {
        let start_ms = clock.now_ms();
        Machine {
            env: Env::new(),
            rig: Rig::default(),
            clock,
            start_ms,
            events: vec![],
            warnings: vec![],
        }
    }

    /// Run a whole script, top-level statements in order.
    pub fn execute(&mut self, program: &[Statement]) {
        for statement in program {
            self.statement(statement);
        }
    }

    pub fn rig(&self) -> &Rig {
        &self.rig
    }

    /// Variable snapshot in first-write order.
    pub fn variables(&self) -> impl Iterator<Item = (&Rc<str>, i32)> {
        self.env.iter()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Drop accumulated events and warnings; console calls this after
    /// printing each entered line's trace.
    pub fn reset_trace(&mut self) {
        self.events.clear();
        self.warnings.clear();
    }

    /// External emergency source. The language can read the flag but
    /// never set it.
    pub fn set_emergency(&mut self, engaged: bool) {
        self.rig.emergency = if engaged { 1 } else { 0 };
    }

    fn statement(&mut self, statement: &Statement) {
        match statement {
            Statement::Assign(col, name, expr) => {
                let value = self.expression(expr);
                self.store(col, name, value);
                self.events.push(Event::Assign(name.clone(), value));
            }
            Statement::If(_, condition, then_block, else_block) => {
                let truth = self.condition(condition);
                self.events.push(Event::If(truth));
                let block = if truth { then_block } else { else_block };
                for statement in block {
                    self.statement(statement);
                }
            }
            Statement::While(col, condition, body) => {
                let mut iterations: usize = 0;
                while self.condition(condition) {
                    if iterations >= LOOP_LIMIT {
                        self.warnings.push(Warning::LoopLimit(col.clone()));
                        break;
                    }
                    for statement in body {
                        self.statement(statement);
                    }
                    iterations += 1;
                }
                self.events.push(Event::While(iterations));
            }
            Statement::Speed(_, expr) => {
                let value = self.expression(expr).max(0).min(100);
                self.rig.speed = value;
                self.events.push(Event::Speed(value));
            }
            Statement::Torque(_, expr) => {
                let value = self.expression(expr).max(0).min(100);
                self.rig.torque = value;
                self.events.push(Event::Torque(value));
            }
            Statement::Yaw(_, expr) => {
                let value = self.expression(expr);
                self.rig.yaw = value;
                self.events.push(Event::Yaw(value));
            }
            Statement::Brake(_, expr) => {
                let value = if self.expression(expr) != 0 { 1 } else { 0 };
                self.rig.brake = value;
                self.events.push(Event::Brake(value));
            }
            Statement::Wait(_, expr) => {
                let ms = self.expression(expr);
                self.events.push(Event::Wait(ms));
            }
            Statement::Pattern(_, pattern) => {
                self.rig.pattern = *pattern;
                self.events.push(Event::Pattern(*pattern));
            }
            Statement::Read(col, sensor, name) => {
                let value = self.read_sensor(*sensor);
                self.store(col, name, value);
                self.events.push(Event::Read(*sensor, name.clone(), value));
            }
            Statement::Block(_, statements) => {
                for statement in statements {
                    self.statement(statement);
                }
            }
        }
    }

    fn store(&mut self, col: &Column, name: &Rc<str>, value: i32) {
        if self.env.store(name, value).is_err() {
            self.warnings
                .push(Warning::VariableLimit(col.clone(), name.clone()));
        }
    }

    fn expression(&mut self, expr: &Expression) -> i32 {
        use Expression::*;
        match expr {
            Number(_, n) => *n,
            Var(_, name) => self.env.fetch(name),
            Add(_, lhs, rhs) => self.expression(lhs).wrapping_add(self.expression(rhs)),
            Subtract(_, lhs, rhs) => self.expression(lhs).wrapping_sub(self.expression(rhs)),
            Multiply(_, lhs, rhs) => self.expression(lhs).wrapping_mul(self.expression(rhs)),
            Divide(col, lhs, rhs) => {
                let left = self.expression(lhs);
                let right = self.expression(rhs);
                if right == 0 {
                    self.warnings.push(Warning::DivisionByZero(col.clone()));
                    return 0;
                }
                left.wrapping_div(right)
            }
        }
    }

    fn condition(&mut self, condition: &Condition) -> bool {
        use Condition::*;
        match condition {
            Equal(_, lhs, rhs) => self.expression(lhs) == self.expression(rhs),
            NotEqual(_, lhs, rhs) => self.expression(lhs) != self.expression(rhs),
            Greater(_, lhs, rhs) => self.expression(lhs) > self.expression(rhs),
            Less(_, lhs, rhs) => self.expression(lhs) < self.expression(rhs),
            GreaterEqual(_, lhs, rhs) => self.expression(lhs) >= self.expression(rhs),
            LessEqual(_, lhs, rhs) => self.expression(lhs) <= self.expression(rhs),
        }
    }

    fn read_sensor(&mut self, sensor: Sensor) -> i32 {
        self.simulate_sensors();
        match sensor {
            Sensor::Rider => self.rig.rider_present,
            Sensor::Tilt => self.rig.tilt_angle,
            Sensor::Rpm => self.rig.rpm,
            Sensor::Emergency => self.rig.emergency,
            Sensor::TimeMs => (self.clock.now_ms() - self.start_ms) as i32,
        }
    }

    fn simulate_sensors(&mut self) {
        // seat switch isn't wired into the simulation; a rider is
        // always reported
        self.rig.rider_present = 1;
        let tilt = self.rig.speed.wrapping_mul(self.rig.yaw) / 10;
        self.rig.tilt_angle = tilt.min(45);
        self.rig.rpm = self.rig.speed.wrapping_mul(10);
    }
}
