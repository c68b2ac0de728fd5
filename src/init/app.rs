use std::path::Path;

use super::json;
use crate::error::Error;
use crate::App;

impl App {
    pub fn try_from_files<P: AsRef<Path>>(
        level_file_path: P,
        settings_file_path: P,
    ) -> Result<Self, Error> {
        let level = json::parse_level(level_file_path)?;
        let settings = json::parse_settings(settings_file_path)?;
        Self::try_new(level, settings)
    }
}
