//! An interactive, line-oriented form over the entry lists.
//!
//! Each input line is one user action and is handled to completion before the next line is read.
//! A submission that fails validation prints an alert and changes nothing: the rows stay as they
//! were typed and the last displayed result is kept.

use crate::calculator::{self, Report};
use crate::entries::{EntryLists, RowId};
use crate::model::{Category, EmissionFactors, Kind};
use crate::Result;
use anyhow::{bail, Context};
use std::io::{BufRead, Write};
use std::str::FromStr;
use tracing::{debug, warn};

const HELP: &str = "\
Commands:
  add <transport|food|energy>   add a row and print its id
  kind <id> <kind>              change the kind of a row
  qty <id> <quantity>           change the quantity of a row
  set <id> <kind> <quantity>    change both
  remove <id>                   remove a row
  list                          show all rows
  submit                        calculate your footprint
  result                        show the last calculated footprint
  factors                       show the emission factors
  help                          show this message
  quit                          leave the session";

/// One line of user input.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Add(Category),
    Kind(RowId, Kind),
    Quantity(RowId, String),
    Set(RowId, Kind, String),
    Remove(RowId),
    List,
    Submit,
    Result,
    Factors,
    Help,
    Quit,
}

impl FromStr for Action {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> std::result::Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let action = match verb.to_ascii_lowercase().as_str() {
            "add" => Action::Add(
                Category::from_str(rest)
                    .map_err(|_| anyhow::anyhow!("'{rest}' is not a category"))?,
            ),
            "kind" => {
                let (id, kind) = id_and_rest(rest)?;
                Action::Kind(id, Kind::from_str(kind)?)
            }
            "qty" | "quantity" => {
                let (id, quantity) = id_and_rest(rest)?;
                Action::Quantity(id, quantity.to_string())
            }
            "set" => {
                let (id, rest) = id_and_rest(rest)?;
                let (kind, quantity) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                Action::Set(id, Kind::from_str(kind)?, quantity.trim().to_string())
            }
            "remove" | "rm" => {
                let (id, _) = id_and_rest(rest)?;
                Action::Remove(id)
            }
            "list" | "ls" => Action::List,
            "submit" | "calc" => Action::Submit,
            "result" => Action::Result,
            "factors" => Action::Factors,
            "help" | "?" => Action::Help,
            "quit" | "exit" => Action::Quit,
            other => bail!("Unknown command '{other}', type 'help' for the list of commands"),
        };
        Ok(action)
    }
}

fn id_and_rest(s: &str) -> Result<(RowId, &str)> {
    let (id, rest) = s.split_once(char::is_whitespace).unwrap_or((s, ""));
    if id.is_empty() {
        bail!("A row id is required");
    }
    Ok((RowId::from_str(id)?, rest.trim()))
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum Flow {
    Continue,
    Quit,
}

/// The state of one interactive form: the rows being edited and the last result displayed.
#[derive(Debug, Clone)]
pub struct Session<'a> {
    lists: EntryLists,
    factors: &'a EmissionFactors,
    displayed: Option<Report>,
}

impl<'a> Session<'a> {
    /// A session that starts with one empty row per category.
    pub fn new(factors: &'a EmissionFactors) -> Self {
        Self {
            lists: EntryLists::new(),
            factors,
            displayed: None,
        }
    }

    pub fn lists(&self) -> &EntryLists {
        &self.lists
    }

    /// The last successfully calculated report, if any.
    pub fn displayed(&self) -> Option<&Report> {
        self.displayed.as_ref()
    }

    /// Reads actions from `input` until `quit` or the end of input, writing responses to `output`.
    pub fn run<R, W>(&mut self, input: R, mut output: W) -> Result<()>
    where
        R: BufRead,
        W: Write,
    {
        writeln!(output, "Type 'help' for the list of commands.")?;
        self.list(&mut output)?;
        let mut lines = input.lines();
        loop {
            write!(output, "> ")?;
            output.flush()?;
            let Some(line) = lines.next() else {
                writeln!(output)?;
                break;
            };
            let line = line.context("Unable to read from input")?;
            if line.trim().is_empty() {
                continue;
            }
            let action = match Action::from_str(&line) {
                Ok(action) => action,
                Err(e) => {
                    writeln!(output, "error: {e}")?;
                    continue;
                }
            };
            debug!("{action:?}");
            match self.handle(action, &mut output) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(e) => writeln!(output, "error: {e}")?,
            }
        }
        Ok(())
    }

    fn handle<W: Write>(&mut self, action: Action, out: &mut W) -> Result<Flow> {
        match action {
            Action::Add(category) => {
                let id = self.lists.add_row(category);
                writeln!(out, "Added {category} row {id}")?;
            }
            Action::Kind(id, kind) => self.lists.set_kind(id, kind)?,
            Action::Quantity(id, quantity) => self.lists.set_quantity(id, quantity)?,
            Action::Set(id, kind, quantity) => {
                // Check both edits before applying either.
                let row = self
                    .lists
                    .get(id)
                    .with_context(|| format!("There is no row {id}"))?;
                if row.category() != kind.category() {
                    bail!(
                        "Row {id} is a {} row, '{kind}' is a {} kind",
                        row.category(),
                        kind.category()
                    );
                }
                self.lists.set_kind(id, kind)?;
                self.lists.set_quantity(id, quantity)?;
            }
            Action::Remove(id) => {
                if self.lists.remove_row(id) {
                    writeln!(out, "Removed row {id}")?;
                } else {
                    writeln!(out, "There is no row {id}")?;
                }
            }
            Action::List => self.list(out)?,
            Action::Submit => match calculator::submit(&self.lists, self.factors) {
                Ok(report) => {
                    writeln!(out, "{report}")?;
                    self.displayed = Some(report);
                }
                Err(e) => {
                    warn!(
                        "Rejected {} row {}: {}",
                        e.category(),
                        e.row(),
                        e.violation()
                    );
                    writeln!(out, "alert: {e}")?;
                }
            },
            Action::Result => match &self.displayed {
                Some(report) => writeln!(out, "{report}")?,
                None => writeln!(out, "Nothing has been calculated yet, type 'submit'.")?,
            },
            Action::Factors => writeln!(out, "{}", self.factors)?,
            Action::Help => writeln!(out, "{HELP}")?,
            Action::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn list<W: Write>(&self, out: &mut W) -> Result<()> {
        for category in Category::ALL {
            writeln!(out, "{} ({}):", category.title(), category.unit())?;
            let rows = self.lists.list_rows(category);
            if rows.is_empty() {
                writeln!(out, "  (no rows)")?;
            }
            for row in rows {
                let quantity = match row.quantity() {
                    "" => "(empty)",
                    q => q,
                };
                let kind = row.kind();
                writeln!(out, "  #{} {kind} ({}): {quantity}", row.id(), kind.label())?;
            }
        }
        Ok(())
    }
}
