//! Turns the submitted entry lists into a footprint, or rejects them.
//!
//! A submission is all-or-nothing: the first row whose quantity does not validate aborts the whole
//! computation and nothing computed so far is returned.

use crate::entries::{EntryLists, EntryRow};
use crate::error::{InputValidationError, Violation};
use crate::model::{Category, EmissionFactors};
use serde::Serialize;
use std::fmt::{Display, Formatter};
use tracing::{debug, trace};

/// Energy rows are hours of use within one day.
pub const MAX_HOURS_PER_DAY: f64 = 24.0;

const ABOVE_AVERAGE: &str = "Your footprint is above average. Consider greener choices!";
const BELOW_AVERAGE: &str = "Good job! Your footprint is below average.";

/// Kilograms of CO2 per category and in total, at full precision.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub transport: f64,
    pub food: f64,
    pub energy: f64,
    pub total: f64,
}

/// What gets displayed after a successful submission. Numbers are already formatted to two decimal
/// places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    total: String,
    transport: String,
    food: String,
    energy: String,
    above_average: bool,
    message: String,
}

impl Report {
    pub fn new(footprint: &Footprint, factors: &EmissionFactors) -> Self {
        let above_average = footprint.total > factors.average_daily_kg;
        Self {
            total: kg(footprint.total),
            transport: kg(footprint.transport),
            food: kg(footprint.food),
            energy: kg(footprint.energy),
            above_average,
            message: if above_average {
                ABOVE_AVERAGE
            } else {
                BELOW_AVERAGE
            }
            .to_string(),
        }
    }

    pub fn total(&self) -> &str {
        &self.total
    }

    pub fn subtotal(&self, category: Category) -> &str {
        match category {
            Category::Transport => &self.transport,
            Category::Food => &self.food,
            Category::Energy => &self.energy,
        }
    }

    pub fn above_average(&self) -> bool {
        self.above_average
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Your Estimated Carbon Footprint Today")?;
        writeln!(f, "Total: {} kg CO2", self.total)?;
        for category in Category::ALL {
            writeln!(
                f,
                "  {}: {} kg CO2",
                category.title(),
                self.subtotal(category)
            )?;
        }
        write!(f, "{}", self.message)
    }
}

fn kg(value: f64) -> String {
    format!("{value:.2}")
}

/// Validates every row and sums the emissions of each category.
pub fn calculate(
    lists: &EntryLists,
    factors: &EmissionFactors,
) -> Result<Footprint, InputValidationError> {
    let mut footprint = Footprint::default();
    for category in Category::ALL {
        let subtotal = category_total(lists.list_rows(category), category, factors)?;
        match category {
            Category::Transport => footprint.transport = subtotal,
            Category::Food => footprint.food = subtotal,
            Category::Energy => footprint.energy = subtotal,
        }
    }
    footprint.total = footprint.transport + footprint.food + footprint.energy;
    debug!("Calculated {footprint:?}");
    Ok(footprint)
}

/// Calculates and formats in one step.
pub fn submit(lists: &EntryLists, factors: &EmissionFactors) -> Result<Report, InputValidationError> {
    let footprint = calculate(lists, factors)?;
    Ok(Report::new(&footprint, factors))
}

fn category_total(
    rows: &[EntryRow],
    category: Category,
    factors: &EmissionFactors,
) -> Result<f64, InputValidationError> {
    let mut total = 0.0;
    for row in rows {
        let quantity = validate(row, category)?;
        let kg = factors.emissions(row.kind(), quantity);
        trace!("Row {} {} x {quantity} = {kg} kg", row.id(), row.kind());
        total += kg;
    }
    Ok(total)
}

fn validate(row: &EntryRow, category: Category) -> Result<f64, InputValidationError> {
    let fail = |violation| InputValidationError::new(category, violation, row.id());
    let parsed = match category {
        Category::Food => leading_integer(row.quantity()),
        Category::Transport | Category::Energy => leading_real(row.quantity()),
    };
    let value = match parsed {
        Some(v) if v.is_finite() => v,
        _ => return Err(fail(Violation::NotANumber)),
    };
    if value < 0.0 {
        return Err(fail(Violation::Negative));
    }
    if category == Category::Energy && value > MAX_HOURS_PER_DAY {
        return Err(fail(Violation::OutOfRange));
    }
    Ok(value)
}

/// Reads the longest prefix of `s` that is a decimal real number, after leading whitespace.
/// Trailing text is ignored, so `"12km"` reads as `12`.
fn leading_real(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let b = s.as_bytes();
    let mut end = sign_len(b);
    let int_start = end;
    end += digits_len(&b[end..]);
    let mut digits = end - int_start;
    if b.get(end) == Some(&b'.') {
        let frac = digits_len(&b[end + 1..]);
        digits += frac;
        if digits > 0 {
            end += 1 + frac;
        }
    }
    if digits == 0 {
        return None;
    }
    if matches!(b.get(end), Some(b'e' | b'E')) {
        let exp_start = end + 1 + sign_len(&b[end + 1..]);
        let exp = digits_len(&b[exp_start..]);
        if exp > 0 {
            end = exp_start + exp;
        }
    }
    s[..end].parse().ok()
}

/// Reads the longest prefix of `s` that is an integer, after leading whitespace. Anything from the
/// first non-digit on is ignored, so `"2.7"` reads as `2`. A `0x` prefix selects hexadecimal, so
/// `"0x10"` reads as `16`.
fn leading_integer(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let b = s.as_bytes();
    let sign = sign_len(b);
    let unsigned = &b[sign..];
    let magnitude = match unsigned {
        [b'0', b'x' | b'X', rest @ ..] => {
            let hex: Vec<u32> = rest
                .iter()
                .map_while(|c| char::from(*c).to_digit(16))
                .collect();
            if hex.is_empty() {
                return None;
            }
            hex.iter().fold(0.0, |acc, d| acc * 16.0 + f64::from(*d))
        }
        _ => {
            let digits = digits_len(unsigned);
            if digits == 0 {
                return None;
            }
            s[sign..sign + digits].parse().ok()?
        }
    };
    Some(if b[0] == b'-' { -magnitude } else { magnitude })
}

fn sign_len(b: &[u8]) -> usize {
    usize::from(matches!(b.first(), Some(b'+' | b'-')))
}

fn digits_len(b: &[u8]) -> usize {
    b.iter().take_while(|c| c.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entries::RowId;
    use crate::model::{EnergyUse, Kind, Meal, TransportMode};
    use crate::test::{assert_close, lists};

    fn factors() -> EmissionFactors {
        EmissionFactors::default()
    }

    fn err(lists: &EntryLists) -> InputValidationError {
        calculate(lists, &factors()).unwrap_err()
    }

    #[test]
    fn test_leading_real() {
        assert_eq!(leading_real("10"), Some(10.0));
        assert_eq!(leading_real("  2.5"), Some(2.5));
        assert_eq!(leading_real("12km"), Some(12.0));
        assert_eq!(leading_real(".5"), Some(0.5));
        assert_eq!(leading_real("5."), Some(5.0));
        assert_eq!(leading_real("1e3"), Some(1000.0));
        assert_eq!(leading_real("1e"), Some(1.0));
        assert_eq!(leading_real("-1"), Some(-1.0));
        assert_eq!(leading_real("+3"), Some(3.0));
        assert_eq!(leading_real(""), None);
        assert_eq!(leading_real("."), None);
        assert_eq!(leading_real("-"), None);
        assert_eq!(leading_real("abc"), None);
    }

    #[test]
    fn test_leading_integer() {
        assert_eq!(leading_integer("2"), Some(2.0));
        assert_eq!(leading_integer("2.7"), Some(2.0));
        assert_eq!(leading_integer(" 3 meals"), Some(3.0));
        assert_eq!(leading_integer("-1"), Some(-1.0));
        assert_eq!(leading_integer("1e3"), Some(1.0));
        assert_eq!(leading_integer("0x10"), Some(16.0));
        assert_eq!(leading_integer("-0XfF"), Some(-255.0));
        assert_eq!(leading_integer("0x"), None);
        assert_eq!(leading_integer("0xg"), None);
        assert_eq!(leading_integer(".5"), None);
        assert_eq!(leading_integer(""), None);
    }

    #[test]
    fn test_hex_meal_count() {
        let l = lists(&[(Kind::Food(Meal::Vegan), "0x3")]);
        assert_close(calculate(&l, &factors()).unwrap().food, 3.0);
    }

    #[test]
    fn test_transport_factor_per_mode() {
        for km in [0.0, 1.0, 7.5, 123.25, 10_000.0] {
            for (mode, per_mile) in [
                (TransportMode::Car, 0.404),
                (TransportMode::Bus, 0.089),
                (TransportMode::Plane, 0.255),
                (TransportMode::Train, 0.041),
            ] {
                let l = lists(&[(Kind::Transport(mode), km.to_string())]);
                let fp = calculate(&l, &factors()).unwrap();
                assert_close(fp.transport, km * (per_mile / 1.609));
                assert_close(fp.total, fp.transport);
            }
        }
    }

    #[test]
    fn test_food_factor() {
        for count in [0u32, 1, 2, 5, 21] {
            let l = lists(&[(Kind::Food(Meal::Vegan), count.to_string())]);
            assert_close(calculate(&l, &factors()).unwrap().food, f64::from(count));
            let l = lists(&[(Kind::Food(Meal::MeatHeavy), count.to_string())]);
            assert_close(
                calculate(&l, &factors()).unwrap().food,
                f64::from(count) * 3.5,
            );
        }
    }

    #[test]
    fn test_heating_factor() {
        for hours in [0.0, 0.5, 3.0, 12.25, 24.0] {
            let l = lists(&[(Kind::Energy(EnergyUse::Heating), hours.to_string())]);
            let fp = calculate(&l, &factors()).unwrap();
            assert_close(fp.energy, hours * 2.0 * 0.417);
        }
    }

    #[test]
    fn test_total_is_sum_and_order_independent() {
        let rows = [
            (Kind::Transport(TransportMode::Car), "13.7"),
            (Kind::Transport(TransportMode::Train), "80"),
            (Kind::Food(Meal::LowMeat), "2"),
            (Kind::Food(Meal::Vegetarian), "1"),
            (Kind::Energy(EnergyUse::Lights), "6"),
            (Kind::Energy(EnergyUse::Appliances), "1.5"),
        ];
        let forward = calculate(&lists(&rows), &factors()).unwrap();
        let mut reversed_rows = rows;
        reversed_rows.reverse();
        let reversed = calculate(&lists(&reversed_rows), &factors()).unwrap();
        assert_eq!(
            forward.total,
            forward.transport + forward.food + forward.energy
        );
        assert_close(forward.transport, reversed.transport);
        assert_close(forward.food, reversed.food);
        assert_close(forward.energy, reversed.energy);
        assert_close(forward.total, reversed.total);
    }

    #[test]
    fn test_add_then_remove_restores_total() {
        let mut l = lists(&[
            (Kind::Transport(TransportMode::Bus), "20"),
            (Kind::Food(Meal::Vegan), "3"),
        ]);
        let before = calculate(&l, &factors()).unwrap();
        let id = l.push(Kind::Food(Meal::MeatHeavy), "4");
        assert!(calculate(&l, &factors()).unwrap().food > before.food);
        assert!(l.remove_row(id));
        assert_eq!(calculate(&l, &factors()).unwrap(), before);
    }

    #[test]
    fn test_empty_categories_contribute_zero() {
        let fp = calculate(&EntryLists::empty(), &factors()).unwrap();
        assert_eq!(fp, Footprint::default());
    }

    #[test]
    fn test_startup_rows_are_empty_and_rejected() {
        let e = err(&EntryLists::new());
        assert_eq!(e.category(), Category::Transport);
        assert_eq!(e.violation(), Violation::NotANumber);
    }

    #[test]
    fn test_negative_quantity_in_each_category() {
        for kind in [
            Kind::Transport(TransportMode::Car),
            Kind::Food(Meal::Vegan),
            Kind::Energy(EnergyUse::Lights),
        ] {
            let e = err(&lists(&[(kind, "-1")]));
            assert_eq!(e.category(), kind.category());
            assert_eq!(e.violation(), Violation::Negative);
        }
    }

    #[test]
    fn test_energy_upper_bound() {
        let e = err(&lists(&[(Kind::Energy(EnergyUse::Heating), "25")]));
        assert_eq!(e.category(), Category::Energy);
        assert_eq!(e.violation(), Violation::OutOfRange);
        assert!(e.to_string().contains("(0-24)"));

        let l = lists(&[(Kind::Energy(EnergyUse::Heating), "24")]);
        assert_close(calculate(&l, &factors()).unwrap().energy, 24.0 * 2.0 * 0.417);
    }

    #[test]
    fn test_no_upper_bound_outside_energy() {
        let l = lists(&[
            (Kind::Transport(TransportMode::Plane), "25000"),
            (Kind::Food(Meal::Vegan), "25"),
        ]);
        assert!(calculate(&l, &factors()).is_ok());
    }

    #[test]
    fn test_first_failure_aborts() {
        // The food row is bad and so is the energy row; food is checked first.
        let l = lists(&[
            (Kind::Transport(TransportMode::Car), "10"),
            (Kind::Food(Meal::Vegan), "lots"),
            (Kind::Energy(EnergyUse::Lights), "30"),
        ]);
        let e = err(&l);
        assert_eq!(e.category(), Category::Food);
        assert_eq!(e.violation(), Violation::NotANumber);
        assert_eq!(e.row(), RowId::new(1));
    }

    #[test]
    fn test_non_finite_is_rejected() {
        let e = err(&lists(&[(Kind::Transport(TransportMode::Car), "1e999")]));
        assert_eq!(e.violation(), Violation::NotANumber);
    }

    #[test]
    fn test_report_below_average() {
        let l = lists(&[
            (Kind::Transport(TransportMode::Car), "10"),
            (Kind::Food(Meal::Vegan), "2"),
            (Kind::Energy(EnergyUse::Appliances), "3"),
        ]);
        let report = submit(&l, &factors()).unwrap();
        assert_eq!(report.subtotal(Category::Transport), "2.51");
        assert_eq!(report.subtotal(Category::Food), "2.00");
        assert_eq!(report.subtotal(Category::Energy), "0.63");
        assert_eq!(report.total(), "5.14");
        assert!(!report.above_average());
        assert_eq!(report.message(), "Good job! Your footprint is below average.");
    }

    #[test]
    fn test_report_above_average() {
        let l = lists(&[(Kind::Transport(TransportMode::Plane), "500")]);
        let report = submit(&l, &factors()).unwrap();
        assert_eq!(report.subtotal(Category::Transport), "79.24");
        assert_eq!(report.subtotal(Category::Food), "0.00");
        assert_eq!(report.total(), "79.24");
        assert!(report.above_average());
        assert!(report.message().contains("above average"));
    }

    #[test]
    fn test_exactly_average_is_not_above() {
        let l = lists(&[(Kind::Food(Meal::Vegan), "21")]);
        let report = submit(&l, &factors()).unwrap();
        assert_eq!(report.total(), "21.00");
        assert!(!report.above_average());
    }

    #[test]
    fn test_report_display() {
        let l = lists(&[(Kind::Food(Meal::LowMeat), "3")]);
        let text = submit(&l, &factors()).unwrap().to_string();
        let expected = "Your Estimated Carbon Footprint Today\n\
            Total: 6.00 kg CO2\n  \
            Transport: 0.00 kg CO2\n  \
            Food: 6.00 kg CO2\n  \
            Energy: 0.00 kg CO2\n\
            Good job! Your footprint is below average.";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_report_json() {
        let l = lists(&[(Kind::Food(Meal::Vegan), "2")]);
        let json = serde_json::to_value(submit(&l, &factors()).unwrap()).unwrap();
        assert_eq!(json["food"], "2.00");
        assert_eq!(json["total"], "2.00");
        assert_eq!(json["above_average"], false);
    }
}
