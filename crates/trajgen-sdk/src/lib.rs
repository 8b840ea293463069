//! Trajgen SDK
//!
//! Talks to remote inference backends and to the trajectory generation service.

pub mod client;
pub mod remote;

pub use client::TrajgenClient;
pub use remote::RemoteModel;
pub use trajgen_core::{GenerateRequest, GenerateResponse, Point};
