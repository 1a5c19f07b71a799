//! Types that represent the core data model: the activity `Category`, the closed set of kinds in
//! each category, and the `EmissionFactors` used to turn quantities into kilograms of CO2.
mod factors;
mod kind;

pub use factors::{EmissionFactors, EnergyFactors, FoodFactors, TransportFactors};
pub use kind::{EnergyUse, Kind, Meal, TransportMode};

use serde::{Deserialize, Serialize};

/// One of the three top-level activity groupings.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Transport,
    Food,
    Energy,
}

serde_plain::derive_display_from_serialize!(Category);
serde_plain::derive_fromstr_from_deserialize!(Category);

impl Category {
    /// All categories in the order they are computed and displayed.
    pub const ALL: [Category; 3] = [Category::Transport, Category::Food, Category::Energy];

    /// The unit the quantity field of a row in this category is measured in.
    pub fn unit(&self) -> &'static str {
        match self {
            Category::Transport => "km",
            Category::Food => "meals",
            Category::Energy => "hours",
        }
    }

    /// A capitalized name for display.
    pub fn title(&self) -> &'static str {
        match self {
            Category::Transport => "Transport",
            Category::Food => "Food",
            Category::Energy => "Energy",
        }
    }

    /// The names of the kinds a row in this category may have, default first.
    pub fn kind_names(&self) -> Vec<String> {
        match self {
            Category::Transport => TransportMode::ALL.iter().map(|k| k.to_string()).collect(),
            Category::Food => Meal::ALL.iter().map(|k| k.to_string()).collect(),
            Category::Energy => EnergyUse::ALL.iter().map(|k| k.to_string()).collect(),
        }
    }
}
