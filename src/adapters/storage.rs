use crate::adapters::holidays::HolidaySet;
use crate::domain::ports::HolidaySource;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// Reads the holiday list from a local JSON file.
#[derive(Debug, Clone)]
pub struct FileHolidaySource {
    path: PathBuf,
}

impl FileHolidaySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl HolidaySource for FileHolidaySource {
    async fn fetch(&self) -> Result<HolidaySet> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        HolidaySet::from_json_str(&content)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
