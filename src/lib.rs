//! plotwist compiles an ordered stream of report instructions into one
//! self-contained HTML document.
//!
//! Content units and layout directives are appended to a
//! [`ReportSession`](application::session::ReportSession), either through its
//! authoring methods or from a TOML
//! [`ReportManifest`](application::manifest::ReportManifest). The
//! [`ReportCompiler`](application::compiler::ReportCompiler) then replays the
//! stream through swappable layout strategies and writes the document.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
