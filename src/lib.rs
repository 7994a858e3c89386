//! Beacon - reachability monitor for local AI servers
//!
//! Watches a local LM Studio inference server and a local Whisper
//! transcription server, keeps their host/port settings in a persistent
//! store, and can launch a missing server and re-check it afterwards.

pub mod bridge;
pub mod cli;
pub mod config;
pub mod endpoint;
pub mod launcher;
pub mod logging;
pub mod monitor;
pub mod probe;
pub mod session;
pub mod settings;
