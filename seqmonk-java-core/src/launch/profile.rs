use std::fs;
use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

pub const PROFILE_FILE: &str = "launcher.json";

/// The application-specific constants of a launch: which jars to put on the
/// classpath, which classes to run, and the thread stack size. Defaults
/// describe SeqMonk; a co-located `launcher.json` can override any subset
/// of fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppProfile {
    pub main_class: String,
    pub memcheck_class: String,
    pub prefs_class: String,
    pub prefs_memory_key: String,
    pub jars: Vec<String>,
    pub stack_size_mb: u64,
}

impl Default for AppProfile {
    fn default() -> Self {
        Self {
            main_class: "uk.ac.babraham.SeqMonk.SeqMonkApplication".to_owned(),
            memcheck_class: "uk.ac.babraham.SeqMonk.Utilities.ReportMemoryUsage".to_owned(),
            prefs_class: "uk.ac.babraham.SeqMonk.Utilities.ReportPreferencesLocation".to_owned(),
            prefs_memory_key: "Memory".to_owned(),
            jars: vec![
                "Jama-1.0.2.jar".to_owned(),
                "commons-math3-3.5.jar".to_owned(),
                "sam-1.32.jar".to_owned(),
            ],
            stack_size_mb: 4,
        }
    }
}

/// Loads the profile from `launcher.json` in the launcher directory. An
/// absent or unreadable file falls back to the SeqMonk defaults; a broken
/// profile must never stop the launch.
pub fn load_profile(dir: &Path) -> AppProfile {
    let path = dir.join(PROFILE_FILE);
    if !path.exists() {
        return AppProfile::default();
    }

    match fs::read_to_string(&path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(profile) => profile,
            Err(err) => {
                warn!("Ignoring malformed {}: {}", PROFILE_FILE, err);
                AppProfile::default()
            }
        },
        Err(err) => {
            warn!("Couldn't read {}: {}", PROFILE_FILE, err);
            AppProfile::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_profile_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let profile = load_profile(dir.path());
        assert_eq!(profile.main_class, "uk.ac.babraham.SeqMonk.SeqMonkApplication");
        assert_eq!(profile.stack_size_mb, 4);
        assert_eq!(profile.jars.len(), 3);
    }

    #[test]
    fn partial_profile_overrides_a_subset_of_fields() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(PROFILE_FILE),
            r#"{ "stack_size_mb": 8, "jars": ["custom.jar"] }"#,
        )
        .unwrap();

        let profile = load_profile(dir.path());
        assert_eq!(profile.stack_size_mb, 8);
        assert_eq!(profile.jars, vec!["custom.jar".to_owned()]);
        assert_eq!(profile.prefs_memory_key, "Memory");
    }

    #[test]
    fn malformed_profile_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(PROFILE_FILE), "not json at all").unwrap();

        let profile = load_profile(dir.path());
        assert_eq!(profile.memcheck_class, "uk.ac.babraham.SeqMonk.Utilities.ReportMemoryUsage");
    }
}
