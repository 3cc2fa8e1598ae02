//! Ports (trait boundaries) between the game core and its drivers.

pub mod agent;
pub mod observer;

pub use agent::Agent;
pub use observer::Observer;
