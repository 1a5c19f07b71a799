//! Emission factor tables.
//!
//! The tables are keyed by the closed kind enums and answered with exhaustive matches, so looking
//! up the factor of a kind cannot miss.

use super::{EnergyUse, Kind, Meal, TransportMode};
use crate::Result;
use anyhow::ensure;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Miles to kilometers. The transport defaults are published per mile.
const KM_PER_MILE: f64 = 1.609;

const ELECTRICITY_KG_PER_KWH: f64 = 0.417;
const AVERAGE_DAILY_KG: f64 = 21.0;

/// Kilograms of CO2 per kilometer travelled, by mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TransportFactors {
    pub car: f64,
    pub bus: f64,
    pub plane: f64,
    pub train: f64,
}

impl Default for TransportFactors {
    fn default() -> Self {
        Self {
            car: 0.404 / KM_PER_MILE,
            bus: 0.089 / KM_PER_MILE,
            plane: 0.255 / KM_PER_MILE,
            train: 0.041 / KM_PER_MILE,
        }
    }
}

impl TransportFactors {
    pub fn get(&self, mode: TransportMode) -> f64 {
        match mode {
            TransportMode::Car => self.car,
            TransportMode::Bus => self.bus,
            TransportMode::Plane => self.plane,
            TransportMode::Train => self.train,
        }
    }
}

/// Kilograms of CO2 per meal, by meal composition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FoodFactors {
    pub meat_heavy: f64,
    pub low_meat: f64,
    pub vegetarian: f64,
    pub vegan: f64,
}

impl Default for FoodFactors {
    fn default() -> Self {
        Self {
            meat_heavy: 3.5,
            low_meat: 2.0,
            vegetarian: 1.5,
            vegan: 1.0,
        }
    }
}

impl FoodFactors {
    pub fn get(&self, meal: Meal) -> f64 {
        match meal {
            Meal::MeatHeavy => self.meat_heavy,
            Meal::LowMeat => self.low_meat,
            Meal::Vegetarian => self.vegetarian,
            Meal::Vegan => self.vegan,
        }
    }
}

/// Kilowatts drawn while a device class is on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EnergyFactors {
    pub lights: f64,
    pub appliances: f64,
    pub heating: f64,
}

impl Default for EnergyFactors {
    fn default() -> Self {
        Self {
            lights: 0.06,
            appliances: 0.5,
            heating: 2.0,
        }
    }
}

impl EnergyFactors {
    pub fn get(&self, device: EnergyUse) -> f64 {
        match device {
            EnergyUse::Lights => self.lights,
            EnergyUse::Appliances => self.appliances,
            EnergyUse::Heating => self.heating,
        }
    }
}

/// All the constants the calculator needs. Built once, from the defaults or a configuration file,
/// and only read afterwards.
///
/// Example JSON:
/// ```json
/// {
///   "transport": { "car": 0.2511, "bus": 0.0553, "plane": 0.1585, "train": 0.0255 },
///   "food": { "meat-heavy": 3.5, "low-meat": 2.0, "vegetarian": 1.5, "vegan": 1.0 },
///   "energy": { "lights": 0.06, "appliances": 0.5, "heating": 2.0 },
///   "electricity_kg_per_kwh": 0.417,
///   "average_daily_kg": 21.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EmissionFactors {
    pub transport: TransportFactors,
    pub food: FoodFactors,
    pub energy: EnergyFactors,
    /// Kilograms of CO2 per kilowatt-hour of electricity.
    pub electricity_kg_per_kwh: f64,
    /// The average daily footprint, in kilograms of CO2, that a result is compared against.
    pub average_daily_kg: f64,
}

impl Default for EmissionFactors {
    fn default() -> Self {
        Self {
            transport: TransportFactors::default(),
            food: FoodFactors::default(),
            energy: EnergyFactors::default(),
            electricity_kg_per_kwh: ELECTRICITY_KG_PER_KWH,
            average_daily_kg: AVERAGE_DAILY_KG,
        }
    }
}

impl EmissionFactors {
    /// The per-unit multiplier of `kind`: kg per km, kg per meal, or kW for energy kinds. Energy
    /// kinds still need `electricity_kg_per_kwh` to become kilograms.
    pub fn factor(&self, kind: Kind) -> f64 {
        match kind {
            Kind::Transport(mode) => self.transport.get(mode),
            Kind::Food(meal) => self.food.get(meal),
            Kind::Energy(device) => self.energy.get(device),
        }
    }

    /// Kilograms of CO2 for `quantity` units of `kind`.
    pub fn emissions(&self, kind: Kind, quantity: f64) -> f64 {
        match kind {
            Kind::Energy(device) => {
                let kwh = self.energy.get(device) * quantity;
                kwh * self.electricity_kg_per_kwh
            }
            _ => self.factor(kind) * quantity,
        }
    }

    /// Every factor must be a finite, non-negative number.
    pub fn validate(&self) -> Result<()> {
        let named = TransportMode::ALL
            .iter()
            .map(|k| (k.to_string(), self.transport.get(*k)))
            .chain(Meal::ALL.iter().map(|k| (k.to_string(), self.food.get(*k))))
            .chain(
                EnergyUse::ALL
                    .iter()
                    .map(|k| (k.to_string(), self.energy.get(*k))),
            )
            .chain([
                (
                    "electricity_kg_per_kwh".to_string(),
                    self.electricity_kg_per_kwh,
                ),
                ("average_daily_kg".to_string(), self.average_daily_kg),
            ]);
        for (name, value) in named {
            ensure!(
                value.is_finite() && value >= 0.0,
                "The factor '{name}' must be a non-negative number, got {value}"
            );
        }
        Ok(())
    }
}

impl Display for EmissionFactors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Transport (kg CO2 per km):")?;
        for mode in TransportMode::ALL {
            writeln!(f, "  {mode}: {:.4}", self.transport.get(mode))?;
        }
        writeln!(f, "Food (kg CO2 per meal):")?;
        for meal in Meal::ALL {
            writeln!(f, "  {meal}: {:.4}", self.food.get(meal))?;
        }
        writeln!(
            f,
            "Energy (kW while on, at {:.4} kg CO2 per kWh):",
            self.electricity_kg_per_kwh
        )?;
        for device in EnergyUse::ALL {
            writeln!(f, "  {device}: {:.4}", self.energy.get(device))?;
        }
        write!(f, "Average daily footprint: {:.2} kg CO2", self.average_daily_kg)
    }
}
