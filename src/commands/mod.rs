//! Command handlers for the footprint CLI.
//!
//! This module contains implementations for all CLI subcommands.

mod calc;
mod factors;
mod init;
mod session;

use crate::{Error, InputValidationError};
use serde::Serialize;
use std::fmt::Debug;
use tracing::debug;

pub use calc::calc;
pub use factors::factors;
pub use init::init;
pub use session::session;

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, structured data that can be printed as text or as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to stdout and the structured data (if it exists) as JSON to `debug!`.
    pub fn print(&self) {
        if !self.message.is_empty() {
            println!("{}", self.message);
        }
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }

    /// Print the structured data as JSON to stdout, falling back to the message when there is no
    /// structured data.
    pub fn print_json(&self) -> crate::Result<()> {
        match self.structure() {
            Some(structure) => println!("{}", serde_json::to_string_pretty(structure)?),
            None => self.print(),
        }
        Ok(())
    }
}

/// The alert for a rejected submission, or `None` when `err` is some other failure. The alert is
/// user output and is printed whatever the log level is.
pub fn alert(err: &Error) -> Option<String> {
    err.downcast_ref::<InputValidationError>()
        .map(|e| format!("alert: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_from_message() {
        let out: Out<()> = "done".into();
        assert_eq!(out.message(), "done");
        assert!(out.structure().is_none());
    }

    #[test]
    fn test_out_with_structure() {
        let out = Out::new("two", 2u8);
        assert_eq!(out.message(), "two");
        assert_eq!(out.structure(), Some(&2));
    }

    #[test]
    fn test_alert_only_for_rejected_rows() {
        let err = anyhow::anyhow!("The config file is missing 'x.json'");
        assert_eq!(alert(&err), None);
    }
}
