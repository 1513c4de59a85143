//! Command execution logic.
//!
//! Graph commands run one [`Request`] through an [`App`] and print its
//! report. `render` goes through the read-only render pipeline instead.

use anyhow::Result;
use std::io::{self, Write};

use super::args::RenderArgs;
use crate::app::App;
use crate::config::Config;
use crate::engine::Request;
use crate::output::{self, OutputConfig, OutputMode};
use crate::render;

/// Execute one graph command and print its report
///
/// The store is saved before anything is printed.
pub fn execute_request(app: &mut App, request: &Request, output_mode: OutputMode) -> Result<()> {
    let report = app.run(request)?;
    output::print_report(&report, output_mode)?;
    Ok(())
}

/// Execute the render command
pub fn execute_render(config: &Config, args: &RenderArgs, output_mode: OutputMode) -> Result<()> {
    let summary = render::run(config, &args.to_options())?;

    match output_mode {
        OutputMode::Json => {
            output::print_json(&serde_json::json!({
                "output": summary.output.display().to_string(),
                "statistics": summary.statistics,
                "suggestions": summary.priorities,
            }))?;
        }
        OutputMode::Text => {
            let display = OutputConfig::from_env();
            let stdout = io::stdout();
            let mut handle = stdout.lock();

            writeln!(handle, "Visualization saved to: {}", summary.output.display())?;
            if let Some(statistics) = &summary.statistics {
                statistics.write_report(&mut handle, &display)?;
            }
            if let Some(priorities) = &summary.priorities {
                priorities.write_report(&mut handle, &display)?;
            }
        }
    }

    Ok(())
}
