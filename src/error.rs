use crate::entries::RowId;
use crate::model::Category;
use std::fmt::{Display, Formatter};
use thiserror::Error;

pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// The constraint a quantity field broke.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Violation {
    /// The field was empty, did not start with a number, or was not finite.
    NotANumber,
    /// The number was below zero.
    Negative,
    /// The number was above 24. Only energy hours have an upper bound.
    OutOfRange,
}

impl Display for Violation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::NotANumber => f.write_str("not a number"),
            Violation::Negative => f.write_str("negative"),
            Violation::OutOfRange => f.write_str("out of range"),
        }
    }
}

/// A quantity that could not be used. Raised by the first bad row of a submission, which aborts the
/// whole computation. The `Display` text is the message shown to the user.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
#[error("{}", user_message(.category))]
pub struct InputValidationError {
    category: Category,
    violation: Violation,
    row: RowId,
}

impl InputValidationError {
    pub fn new(category: Category, violation: Violation, row: RowId) -> Self {
        Self {
            category,
            violation,
            row,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn violation(&self) -> Violation {
        self.violation
    }

    /// The row whose quantity was rejected.
    pub fn row(&self) -> RowId {
        self.row
    }
}

fn user_message(category: &Category) -> &'static str {
    match category {
        Category::Transport => "Please enter a valid positive number of kilometers for transport.",
        Category::Food => "Please enter a valid number of meals (0 or more).",
        Category::Energy => "Please enter a valid number of hours (0-24) for energy usage.",
    }
}
