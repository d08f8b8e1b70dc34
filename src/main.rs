use clap::Parser;
use std::path::Path;
use working_days::utils::error::ErrorSeverity;
use working_days::utils::{logger, validation, validation::Validate};
use working_days::{CliConfig, HolidayCalendar, ServiceConfig, WorkingDaysError, WorkingTimeEngine};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(&cli).await {
        tracing::error!("❌ Calculation failed: {} (Severity: {:?})", e, e.severity());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

async fn run(cli: &CliConfig) -> Result<(), WorkingDaysError> {
    let mut config = ServiceConfig::load(cli.config.as_deref().map(Path::new))?;
    if let Some(url) = &cli.holidays_url {
        config.holidays.source_url = url.clone();
        config.holidays.file = None;
    }
    if let Some(file) = &cli.holidays_file {
        config.holidays.file = Some(file.clone());
    }
    if let Some(timezone) = &cli.timezone {
        config.calendar.timezone = timezone.clone();
    }
    config.validate()?;

    // 先驗證參數，避免無效請求時還去下載假日
    let request = validation::parse_request(&cli.raw_parameters(), chrono::Utc::now())?;

    let calendar = HolidayCalendar::new();
    let source = config.holiday_source()?;
    if let Err(e) = calendar.load_from(source.as_ref()).await {
        if !cli.allow_missing_holidays {
            return Err(e);
        }
        tracing::warn!("⚠️ Continuing without holidays: {}", e);
    }

    let engine = WorkingTimeEngine::new(config.timezone()?, calendar.current());
    let result = engine.compute_formatted(&request)?;

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
