pub mod bill;
pub mod carbon;

use std::io::Write;

use anyhow::Result;
use colored::Colorize;
use tracing::warn;

use footprint_tariff::InvalidInput;

/// Prints calculator rejections and lets the session continue; anything
/// else (terminal gone, I/O failure) is passed back up.
pub(crate) fn report_invalid(out: &mut impl Write, outcome: Result<()>) -> Result<()> {
    match outcome {
        Ok(()) => Ok(()),
        Err(e) => match e.downcast_ref::<InvalidInput>() {
            Some(invalid) => {
                warn!(error = %invalid, "rejected input");
                writeln!(out, "{}: {}", "Error".red(), invalid)?;
                Ok(())
            }
            None => Err(e),
        },
    }
}
