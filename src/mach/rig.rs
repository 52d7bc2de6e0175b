use crate::lang::ast::Pattern;

/// The simulated actuator and sensor state. A fresh rig is braked
/// with everything else at zero; only statement execution (and the
/// external emergency source) mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct Rig {
    pub speed: i32,
    pub torque: i32,
    pub yaw: i32,
    pub brake: i32,
    pub pattern: Pattern,
    pub rider_present: i32,
    pub tilt_angle: i32,
    pub rpm: i32,
    pub emergency: i32,
}

impl Default for Rig {
    fn default() -> Rig {
        Rig {
            speed: 0,
            torque: 0,
            yaw: 0,
            brake: 1,
            pattern: Pattern::Calm,
            rider_present: 0,
            tilt_angle: 0,
            rpm: 0,
            emergency: 0,
        }
    }
}
