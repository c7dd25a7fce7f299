use std::path::Path;

use crate::launch::profile::AppProfile;
use crate::launch::utils;

/// Classpath for the real launch: the launcher directory itself plus the
/// co-located library jars.
pub fn class_path(dir: &Path, profile: &AppProfile) -> String {
    let mut entries = vec![dir.display().to_string()];
    entries.extend(profile.jars.iter().map(|jar| dir.join(jar).display().to_string()));
    entries.join(utils::classpath_separator())
}

/// The memcheck probe only needs the launcher directory on its classpath.
pub fn memcheck_arguments(dir: &Path, profile: &AppProfile, heap_mb: u64) -> Vec<String> {
    vec![
        "-cp".to_owned(),
        dir.display().to_string(),
        format!("-Xmx{}m", heap_mb),
        profile.memcheck_class.clone(),
    ]
}

pub fn prefs_arguments(dir: &Path, profile: &AppProfile) -> Vec<String> {
    vec![
        "-cp".to_owned(),
        dir.display().to_string(),
        profile.prefs_class.clone(),
    ]
}

pub fn launch_arguments(
    dir: &Path,
    profile: &AppProfile,
    heap_mb: u64,
    file: Option<&Path>,
) -> Vec<String> {
    let mut args = vec![
        "-cp".to_owned(),
        class_path(dir, profile),
        format!("-Xss{}m", profile.stack_size_mb),
        format!("-Xmx{}m", heap_mb),
        profile.main_class.clone(),
    ];

    if let Some(file) = file {
        args.push(file.display().to_string());
    }

    args
}
