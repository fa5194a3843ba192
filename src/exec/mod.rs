mod invocation;
mod privilege;
mod quote;
mod runner;

pub use invocation::Invocation;
pub use privilege::{ElevatedPlan, Elevation, Executor};
pub use quote::quote_command;
pub use runner::{Runner, SystemRunner};
