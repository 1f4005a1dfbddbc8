// Exercise visibility shared type definitions
// Each submodule defines types used across the engine.

pub mod entry;
pub mod errors;
pub mod settings;
pub mod timeline;
pub mod visibility;
