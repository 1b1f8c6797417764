use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "keeblab";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    fn project() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", APP_NAME)
    }

    pub fn preferences_path() -> Option<PathBuf> {
        Self::project().map(|pd| pd.config_dir().join("preferences.json"))
    }

    pub fn log_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join(APP_NAME);
            Some(state_dir.join("keeblab.log"))
        } else {
            Self::project().map(|pd| pd.data_local_dir().join("keeblab.log"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_use_expected_file_names() {
        if let Some(path) = AppDirs::preferences_path() {
            assert_eq!(path.file_name().unwrap(), "preferences.json");
        }
        if let Some(path) = AppDirs::log_path() {
            assert_eq!(path.file_name().unwrap(), "keeblab.log");
        }
    }
}
