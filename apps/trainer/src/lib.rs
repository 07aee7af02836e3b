//! Trainer application: embedded datasets, persistence, and the session
//! controller driving the lingua-core logic.

pub mod dataset;
pub mod session;
pub mod store;
