/*!
## Rust Machine Module

This Rust module is the simulated rig and the tree-walking interpreter
that drives it. Scripts execute against a `Machine`, which owns the
variable memory and the rig state; the console reads its event trace
and warnings afterwards.

*/

mod clock;
mod env;
mod machine;
mod rig;

pub use clock::Clock;
pub use clock::ManualClock;
pub use clock::WallClock;
pub use env::Env;
pub use env::LimitExceeded;
pub use env::MAX_VARIABLES;
pub use machine::Event;
pub use machine::Machine;
pub use machine::Warning;
pub use machine::LOOP_LIMIT;
pub use rig::Rig;
