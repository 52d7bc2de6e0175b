use rodeo::lang;
use rodeo::mach::{Clock, Machine};
use std::rc::Rc;

pub fn run(source: &str) -> Machine {
    let program = lang::compile(source).unwrap();
    let mut machine = Machine::new();
    machine.execute(&program);
    machine
}

#[allow(dead_code)]
pub fn run_with_clock(source: &str, clock: Rc<dyn Clock>) -> Machine {
    let program = lang::compile(source).unwrap();
    let mut machine = Machine::with_clock(clock);
    machine.execute(&program);
    machine
}

#[allow(dead_code)]
pub fn var(machine: &Machine, name: &str) -> i32 {
    machine
        .variables()
        .find(|(n, _)| n.as_ref() == name)
        .map(|(_, v)| v)
        .unwrap_or(0)
}
