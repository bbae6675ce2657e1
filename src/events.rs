pub mod pointer;
pub mod viewport;

pub use pointer::{wire_magnetic_elements, wire_pointermove};
pub use viewport::wire_resize;
