pub mod scheduler;
pub mod surface;

pub use scheduler::*;
pub use surface::*;
