use crate::domain::model::RawParameters;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "working-days")]
#[command(about = "Add business days and hours to an instant on the Colombian working calendar")]
pub struct CliConfig {
    /// Base instant in UTC (YYYY-MM-DDTHH:mm:ssZ); defaults to now
    #[arg(long)]
    pub date: Option<String>,

    /// Working days to add
    #[arg(long, allow_hyphen_values = true)]
    pub days: Option<String>,

    /// Working hours to add
    #[arg(long, allow_hyphen_values = true)]
    pub hours: Option<String>,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Holiday list URL, overrides the configuration
    #[arg(long)]
    pub holidays_url: Option<String>,

    /// Local holiday JSON file, overrides the configuration and any URL
    #[arg(long)]
    pub holidays_file: Option<String>,

    /// Business timezone (IANA name), overrides the configuration
    #[arg(long)]
    pub timezone: Option<String>,

    /// Keep going with no holidays if the list cannot be loaded
    #[arg(long)]
    pub allow_missing_holidays: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn raw_parameters(&self) -> RawParameters {
        RawParameters {
            date: self.date.iter().cloned().collect(),
            days: self.days.iter().cloned().collect(),
            hours: self.hours.iter().cloned().collect(),
        }
    }
}
