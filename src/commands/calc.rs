//! The one-shot `footprint calc` command.

use crate::args::CalcArgs;
use crate::calculator::{self, Report};
use crate::commands::Out;
use crate::entries::EntryLists;
use crate::{Config, Result};
use tracing::{debug, warn};

/// Builds entry lists from the rows given on the command line and submits them once.
///
/// # Returns
///
/// On success, returns an `Out` containing the printable report as the message and the `Report`
/// as the structured data.
///
/// # Errors
///
/// Returns the `InputValidationError` of the first row whose quantity is not usable. No result is
/// produced in that case.
pub fn calc(config: &Config, args: &CalcArgs) -> Result<Out<Report>> {
    let mut lists = EntryLists::empty();
    for (kind, quantity) in args.rows() {
        let _ = lists.push(kind, quantity);
    }
    debug!("Submitting {} rows", lists.len());

    let report = calculator::submit(&lists, config.factors()).inspect_err(|e| {
        warn!(
            "Rejected {} row {}: {}",
            e.category(),
            e.row(),
            e.violation()
        )
    })?;
    Ok(Out::new(report.to_string(), report))
}
