//! Library surface for the trajectory generation server and its tests.

pub mod api;
pub mod config;
pub mod state;
