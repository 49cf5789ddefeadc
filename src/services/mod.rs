pub use autosave::*;
pub use scheduler::*;
pub use validation::*;
pub use workflow::*;

mod autosave;
mod scheduler;
mod validation;
mod workflow;
