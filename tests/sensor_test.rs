mod common;
use common::*;
use rodeo::lang::compile;
use rodeo::mach::{Machine, ManualClock};
use std::rc::Rc;

#[test]
fn test_tilt_derives_from_speed_and_yaw() {
    let m = run("yaw 3; speed 20; read tilt -> t;");
    assert_eq!(var(&m, "t"), 6);
}

#[test]
fn test_tilt_clamps_at_45() {
    let m = run("yaw 50; speed 100; read tilt -> t;");
    assert_eq!(var(&m, "t"), 45);
    assert_eq!(m.rig().tilt_angle, 45);
}

#[test]
fn test_tilt_uses_truncating_division() {
    let m = run("yaw 5; speed 5; read tilt -> t;");
    // 5*5/10 truncates to 2
    assert_eq!(var(&m, "t"), 2);
}

#[test]
fn test_rpm_is_speed_times_ten() {
    let m = run("speed 37; read rpm -> r;");
    assert_eq!(var(&m, "r"), 370);
}

#[test]
fn test_rider_always_present() {
    let m = run("read rider -> a; speed 80; read rider -> b;");
    assert_eq!(var(&m, "a"), 1);
    assert_eq!(var(&m, "b"), 1);
}

#[test]
fn test_emergency_defaults_clear() {
    let m = run("read emergency -> e;");
    assert_eq!(var(&m, "e"), 0);
}

#[test]
fn test_emergency_set_externally() {
    let program = compile("read emergency -> e; brake e;").unwrap();
    let mut machine = Machine::new();
    machine.set_emergency(true);
    machine.execute(&program);
    assert_eq!(var(&machine, "e"), 1);
    assert_eq!(machine.rig().brake, 1);
}

#[test]
fn test_time_ms_on_a_manual_clock() {
    let clock = Rc::new(ManualClock::new());
    clock.set(1_000);
    let mut machine = Machine::with_clock(clock.clone());
    clock.advance(250);
    let program = compile("read time_ms -> t;").unwrap();
    machine.execute(&program);
    assert_eq!(var(&machine, "t"), 250);
    clock.advance(4_750);
    let program = compile("read time_ms -> t;").unwrap();
    machine.execute(&program);
    assert_eq!(var(&machine, "t"), 5_000);
}

#[test]
fn test_sensor_snapshot_updates_on_read() {
    let m = run("speed 40; yaw 2;");
    // no read yet, snapshot still zeroed
    assert_eq!(m.rig().rpm, 0);
    let m = run("speed 40; yaw 2; read rpm -> r;");
    assert_eq!(m.rig().rpm, 400);
    assert_eq!(m.rig().tilt_angle, 8);
    assert_eq!(m.rig().rider_present, 1);
}
