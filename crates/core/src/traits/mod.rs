pub mod delay;
pub mod strategy;

pub use delay::*;
pub use strategy::*;
