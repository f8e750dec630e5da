// Library target for the integration tests and criterion benchmarks.
// The binary entry point is main.rs; this file re-declares the module tree so
// that harnesses can import types via `vkbd::session::*` / `vkbd::engine::*`.
#![allow(dead_code)]

pub mod app;
pub mod audio;
pub mod config;
pub mod engine;
pub mod error;
pub mod keyboard;
pub mod platform;
pub mod session;
pub mod store;
pub mod timer;
pub mod ui;

// Only used by the binary's event loop.
mod event;
