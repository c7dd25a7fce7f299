use std::fs;
use std::path::Path;

use log::info;

use crate::launch::arguments;
use crate::launch::process::ProcessRunner;
use crate::launch::profile::AppProfile;

/// Looks up the manual memory ceiling in SeqMonk's own preferences file,
/// found by asking a companion class to print its location. Every failure
/// along the way degrades to `None`; this lookup never aborts the launch.
pub fn manual_ceiling<R: ProcessRunner>(
    runner: &R,
    java: &Path,
    dir: &Path,
    profile: &AppProfile,
) -> Option<u64> {
    let args = arguments::prefs_arguments(dir, profile);

    let output = match runner.run(java, &args) {
        Ok(output) => output,
        Err(err) => {
            info!("Preferences probe failed to start: {}", err);
            return None;
        }
    };

    if !output.success {
        info!(
            "Preferences probe exited with {:?}: {}",
            output.code,
            output.stderr.trim()
        );
        return None;
    }

    let path = output.stdout.trim();
    if path.is_empty() {
        info!("Preferences probe printed no path");
        return None;
    }

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            info!("Couldn't read preferences file {}: {}", path, err);
            return None;
        }
    };

    match memory_override(&content, &profile.prefs_memory_key) {
        Some(mb) => {
            info!("Preferences file sets a manual memory ceiling of {}m", mb);
            Some(mb)
        }
        None => {
            info!("No usable {} entry in {}", profile.prefs_memory_key, path);
            None
        }
    }
}

/// Preferences records are tab-separated `KEY\tVALUE` lines; `#` starts a
/// comment line.
fn memory_override(content: &str, key: &str) -> Option<u64> {
    for line in content.lines() {
        if line.starts_with('#') {
            continue;
        }
        let mut fields = line.split('\t');
        if fields.next() == Some(key) {
            return fields.next().and_then(|value| value.trim().parse().ok());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io;

    use crate::launch::process::ProcessOutput;

    struct PathPrinter {
        stdout: String,
        success: bool,
    }

    impl ProcessRunner for PathPrinter {
        fn run(&self, _java: &Path, _args: &[String]) -> io::Result<ProcessOutput> {
            Ok(ProcessOutput {
                stdout: self.stdout.clone(),
                stderr: String::new(),
                success: self.success,
                code: Some(if self.success { 0 } else { 1 }),
            })
        }

        fn stream(&self, _java: &Path, _args: &[String]) -> io::Result<Option<i32>> {
            unreachable!("the preferences probe never streams")
        }
    }

    fn lookup(runner: &PathPrinter) -> Option<u64> {
        manual_ceiling(
            runner,
            Path::new("java"),
            Path::new("/opt/seqmonk"),
            &AppProfile::default(),
        )
    }

    #[test]
    fn reads_the_memory_key_from_the_preferences_file() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = dir.path().join("seqmonk_prefs.txt");
        fs::write(
            &prefs,
            "# SeqMonk Preferences file.  Do not edit by hand.\nDataLocation\t/home/user\nMemory\t12288\n",
        )
        .unwrap();

        let runner = PathPrinter {
            stdout: format!("{}\n", prefs.display()),
            success: true,
        };
        assert_eq!(lookup(&runner), Some(12288));
    }

    #[test]
    fn probe_failure_is_not_fatal() {
        let runner = PathPrinter {
            stdout: String::new(),
            success: false,
        };
        assert_eq!(lookup(&runner), None);
    }

    #[test]
    fn missing_file_is_not_fatal() {
        let runner = PathPrinter {
            stdout: "/nonexistent/seqmonk_prefs.txt\n".to_owned(),
            success: true,
        };
        assert_eq!(lookup(&runner), None);
    }

    #[test]
    fn missing_key_yields_no_override() {
        assert_eq!(memory_override("DataLocation\t/home/user\n", "Memory"), None);
    }

    #[test]
    fn comment_lines_are_skipped() {
        assert_eq!(memory_override("# Memory\t9999\nMemory\t2048\n", "Memory"), Some(2048));
    }

    #[test]
    fn unparseable_value_yields_no_override() {
        assert_eq!(memory_override("Memory\tlots\n", "Memory"), None);
    }

    #[test]
    fn zero_is_a_valid_parse() {
        // A zero override parses fine and is later ignored by the
        // greater-than-ceiling comparison.
        assert_eq!(memory_override("Memory\t0\n", "Memory"), Some(0));
    }
}
