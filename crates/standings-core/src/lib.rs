// Library root: the standings table core.
//
// Everything here is independent of the terminal front-end so the sort
// engine, renderer and controller can be exercised in isolation.

pub mod app;
pub mod config;
pub mod controller;
pub mod loader;
pub mod model;
pub mod protocol;
pub mod render;
pub mod sort;
