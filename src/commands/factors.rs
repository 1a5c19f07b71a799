use crate::commands::Out;
use crate::model::EmissionFactors;
use crate::{Config, Result};

/// Shows the emission factors in effect, and where they came from.
pub fn factors(config: &Config) -> Result<Out<EmissionFactors>> {
    let source = match config.path() {
        Some(path) => format!("Emission factors from {}", path.display()),
        None => "Built-in emission factors".to_string(),
    };
    let factors = *config.factors();
    Ok(Out::new(format!("{source}\n\n{factors}"), factors))
}
