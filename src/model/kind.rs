use super::Category;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// How a distance was travelled.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    #[default]
    Car,
    Bus,
    Plane,
    Train,
}

serde_plain::derive_display_from_serialize!(TransportMode);
serde_plain::derive_fromstr_from_deserialize!(TransportMode);

impl TransportMode {
    pub const ALL: [TransportMode; 4] = [
        TransportMode::Car,
        TransportMode::Bus,
        TransportMode::Plane,
        TransportMode::Train,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TransportMode::Car => "Car",
            TransportMode::Bus => "Bus",
            TransportMode::Plane => "Plane",
            TransportMode::Train => "Train",
        }
    }
}

/// The composition class of a meal.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Meal {
    #[default]
    MeatHeavy,
    LowMeat,
    Vegetarian,
    Vegan,
}

serde_plain::derive_display_from_serialize!(Meal);
serde_plain::derive_fromstr_from_deserialize!(Meal);

impl Meal {
    pub const ALL: [Meal; 4] = [Meal::MeatHeavy, Meal::LowMeat, Meal::Vegetarian, Meal::Vegan];

    pub fn label(&self) -> &'static str {
        match self {
            Meal::MeatHeavy => "Meat-heavy meal",
            Meal::LowMeat => "Low meat meal",
            Meal::Vegetarian => "Vegetarian meal",
            Meal::Vegan => "Vegan meal",
        }
    }
}

/// A class of household device that draws electricity while it is on.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergyUse {
    #[default]
    Lights,
    Appliances,
    Heating,
}

serde_plain::derive_display_from_serialize!(EnergyUse);
serde_plain::derive_fromstr_from_deserialize!(EnergyUse);

impl EnergyUse {
    pub const ALL: [EnergyUse; 3] = [EnergyUse::Lights, EnergyUse::Appliances, EnergyUse::Heating];

    pub fn label(&self) -> &'static str {
        match self {
            EnergyUse::Lights => "Lights on",
            EnergyUse::Appliances => "Appliances on",
            EnergyUse::Heating => "Heating on",
        }
    }
}

/// The kind of an entry row. Each variant carries the kind enum of exactly one `Category`, so a
/// row can never hold a kind that is foreign to its category.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Kind {
    Transport(TransportMode),
    Food(Meal),
    Energy(EnergyUse),
}

impl Kind {
    /// The first kind offered for `category`, which is what a freshly added row starts with.
    pub fn default_for(category: Category) -> Self {
        match category {
            Category::Transport => Kind::Transport(TransportMode::default()),
            Category::Food => Kind::Food(Meal::default()),
            Category::Energy => Kind::Energy(EnergyUse::default()),
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Kind::Transport(_) => Category::Transport,
            Kind::Food(_) => Category::Food,
            Kind::Energy(_) => Category::Energy,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Kind::Transport(k) => k.label(),
            Kind::Food(k) => k.label(),
            Kind::Energy(k) => k.label(),
        }
    }

    /// Parses `s` as a kind belonging to `category`.
    pub fn parse_in(category: Category, s: &str) -> crate::Result<Self> {
        let s = s.trim();
        let parsed = match category {
            Category::Transport => TransportMode::from_str(s).ok().map(Kind::Transport),
            Category::Food => Meal::from_str(s).ok().map(Kind::Food),
            Category::Energy => EnergyUse::from_str(s).ok().map(Kind::Energy),
        };
        parsed.ok_or_else(|| {
            anyhow::anyhow!(
                "'{s}' is not a kind of {category}, expected one of: {}",
                category.kind_names().join(", ")
            )
        })
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Kind::Transport(k) => Display::fmt(k, f),
            Kind::Food(k) => Display::fmt(k, f),
            Kind::Energy(k) => Display::fmt(k, f),
        }
    }
}

/// Kind names are unique across categories, so a bare name identifies its category too.
impl FromStr for Kind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .find_map(|c| Kind::parse_in(*c, s).ok())
            .ok_or_else(|| anyhow::anyhow!("Unknown kind '{}'", s.trim()))
    }
}
