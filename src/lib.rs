#[macro_use]
extern crate log;

pub mod assignment;
pub mod formula;
pub mod prelude;
pub mod report;
pub mod solver;
pub mod trace;
