//! Application services: authoring session, compiler and widgets.

pub mod compiler;
pub mod error;
pub mod figure;
pub mod manifest;
pub mod session;
pub mod slider;
pub mod stacker;
