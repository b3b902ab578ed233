pub mod progress;
pub mod rng;
pub mod timers;
