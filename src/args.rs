//! These structs provide the CLI interface for the footprint CLI.

use crate::model::{EnergyUse, Kind, Meal, TransportMode};
use clap::{Parser, Subcommand};
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing_subscriber::filter::LevelFilter;

/// footprint: estimate your daily carbon dioxide footprint.
///
/// Enter what you did today as rows in three categories: kilometers travelled by car, bus, plane
/// or train; meals eaten by composition (meat-heavy, low-meat, vegetarian, vegan); and hours that
/// lights, appliances or heating were on. Each row is multiplied by a fixed emission factor and the
/// results are summed and compared with an average daily footprint of 21 kg CO2.
///
/// Use `footprint calc` to submit rows given on the command line, or `footprint session` to build
/// up the rows interactively.
#[derive(Debug, Parser, Clone)]
#[command(version)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Calculate a footprint from rows given as options.
    ///
    /// Each option adds one row and may be repeated, e.g.
    ///
    ///   footprint calc --transport car:10 --transport bus:4 --food vegan:2 --energy heating:3
    ///
    /// Quantities are kilometers for transport, a whole number of meals for food and hours (0-24)
    /// for energy.
    Calc(CalcArgs),
    /// Build up rows interactively and submit them as many times as you like.
    ///
    /// The session starts with one empty row in each category. Type `help` once it starts for the
    /// list of commands.
    Session,
    /// Show the emission factors in effect.
    Factors(FactorsArgs),
    /// Write a configuration file holding the built-in emission factors, ready to be edited.
    Init(InitArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// A JSON configuration file with custom emission factors. The built-in factors are used
    /// when this is not given.
    #[arg(long, env = "FOOTPRINT_CONFIG")]
    config: Option<PathBuf>,
}

impl Common {
    pub fn new(log_level: LevelFilter, config: Option<PathBuf>) -> Self {
        Self { log_level, config }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn config(&self) -> Option<&Path> {
        self.config.as_deref()
    }
}

/// A `KIND:QUANTITY` pair given on the command line, e.g. `car:12.5`. The quantity is kept as
/// text; it is validated when the rows are submitted, the same as a typed-in row.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RowArg<K> {
    kind: K,
    quantity: String,
}

impl<K> RowArg<K>
where
    K: Copy,
{
    pub fn new(kind: K, quantity: impl Into<String>) -> Self {
        Self {
            kind,
            quantity: quantity.into(),
        }
    }

    pub fn kind(&self) -> K {
        self.kind
    }

    pub fn quantity(&self) -> &str {
        &self.quantity
    }
}

impl<K> FromStr for RowArg<K>
where
    K: FromStr,
{
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, quantity) = s
            .split_once(':')
            .ok_or_else(|| format!("expected KIND:QUANTITY, got '{s}'"))?;
        let kind = K::from_str(kind.trim()).map_err(|_| format!("unknown kind '{}'", kind.trim()))?;
        Ok(Self {
            kind,
            quantity: quantity.trim().to_string(),
        })
    }
}

impl<K> Display for RowArg<K>
where
    K: Display,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind, self.quantity)
    }
}

/// Args for the `footprint calc` command.
#[derive(Debug, Default, Parser, Clone)]
pub struct CalcArgs {
    /// A transport row, MODE:KM. MODE is one of car, bus, plane, train.
    #[arg(long, value_name = "MODE:KM")]
    transport: Vec<RowArg<TransportMode>>,

    /// A food row, MEAL:COUNT. MEAL is one of meat-heavy, low-meat, vegetarian, vegan.
    #[arg(long, value_name = "MEAL:COUNT")]
    food: Vec<RowArg<Meal>>,

    /// An energy row, DEVICE:HOURS. DEVICE is one of lights, appliances, heating.
    #[arg(long, value_name = "DEVICE:HOURS")]
    energy: Vec<RowArg<EnergyUse>>,

    /// Print the result as JSON.
    #[arg(long)]
    json: bool,
}

impl CalcArgs {
    pub fn new(
        transport: Vec<RowArg<TransportMode>>,
        food: Vec<RowArg<Meal>>,
        energy: Vec<RowArg<EnergyUse>>,
        json: bool,
    ) -> Self {
        Self {
            transport,
            food,
            energy,
            json,
        }
    }

    /// Every row as a kind and its quantity text: transport, then food, then energy, each in the
    /// order given.
    pub fn rows(&self) -> Vec<(Kind, &str)> {
        let transport = self
            .transport
            .iter()
            .map(|r| (Kind::Transport(r.kind()), r.quantity()));
        let food = self.food.iter().map(|r| (Kind::Food(r.kind()), r.quantity()));
        let energy = self
            .energy
            .iter()
            .map(|r| (Kind::Energy(r.kind()), r.quantity()));
        transport.chain(food).chain(energy).collect()
    }

    pub fn json(&self) -> bool {
        self.json
    }
}

/// Args for the `footprint factors` command.
#[derive(Debug, Default, Parser, Clone)]
pub struct FactorsArgs {
    /// Print the factors as JSON.
    #[arg(long)]
    json: bool,
}

impl FactorsArgs {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn json(&self) -> bool {
        self.json
    }
}

/// Args for the `footprint init` command.
#[derive(Debug, Default, Parser, Clone)]
pub struct InitArgs {
    /// Where to write the configuration file. Defaults to footprint/config.json in your
    /// configuration directory, e.g. ~/.config/footprint/config.json
    #[arg(long)]
    path: Option<PathBuf>,
}

impl InitArgs {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
