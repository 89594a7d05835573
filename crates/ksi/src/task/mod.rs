//! Task entry points used by the command-line tool

pub mod extend;
pub mod publications;
pub mod verify;
