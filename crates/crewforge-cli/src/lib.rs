// Library interface for crewforge-cli, so integration tests can reach the
// input parsing and output rendering helpers.

pub mod inputs;
pub mod render;

pub use inputs::{collect_inputs, parse_input};
pub use render::{format_event, render_plan};
