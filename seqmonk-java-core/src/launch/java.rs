use std::env;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::LaunchError;
use crate::launch::process::ProcessRunner;
use crate::launch::utils;

const JAVA_MARKER: &str = "Java";
const BITNESS_64_MARKER: &str = "64-Bit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bitness {
    X86,
    X64,
}

#[derive(Debug, Clone)]
pub struct JavaRuntime {
    pub path: PathBuf,
    /// Raw `-version` output.
    pub banner: String,
    pub bitness: Bitness,
}

/// Prefers a runtime bundled under `jre/bin/` next to the launcher; falls
/// back to the bare executable name resolved through PATH. Never fails:
/// a missing runtime surfaces from the version probe instead.
pub fn resolve_java(dir: &Path) -> PathBuf {
    let bundled = dir.join("jre").join("bin").join(utils::java_executable());
    if bundled.exists() {
        info!("Using bundled runtime at {}", bundled.display());
        return bundled;
    }

    info!(
        "No bundled runtime, looking for {} on PATH ({})",
        utils::java_executable(),
        env::var("PATH").unwrap_or_default()
    );
    PathBuf::from(utils::java_executable())
}

/// Runs `java -version` and classifies the runtime from its banner.
pub fn probe_runtime<R: ProcessRunner>(runner: &R, dir: &Path) -> Result<JavaRuntime, LaunchError> {
    let path = resolve_java(dir);

    let output = runner
        .run(&path, &["-version".to_owned()])
        .map_err(|_| LaunchError::JavaNotFound)?;

    // The banner conventionally goes to stderr, but some runtimes write it
    // to stdout, so both streams are checked.
    let banner = format!("{}{}", output.stderr, output.stdout);

    if !banner.contains(JAVA_MARKER) {
        return Err(LaunchError::UnrecognizedJava(banner.trim().to_owned()));
    }

    let bitness = if banner.contains(BITNESS_64_MARKER) {
        Bitness::X64
    } else {
        Bitness::X86
    };

    Ok(JavaRuntime { path, banner, bitness })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    use crate::launch::process::ProcessOutput;

    struct BannerRunner {
        stdout: &'static str,
        stderr: &'static str,
        spawns: bool,
    }

    impl ProcessRunner for BannerRunner {
        fn run(&self, _program: &Path, _args: &[String]) -> io::Result<ProcessOutput> {
            if !self.spawns {
                return Err(io::Error::new(io::ErrorKind::NotFound, "no java"));
            }
            Ok(ProcessOutput {
                stdout: self.stdout.to_owned(),
                stderr: self.stderr.to_owned(),
                success: true,
                code: Some(0),
            })
        }

        fn stream(&self, _program: &Path, _args: &[String]) -> io::Result<Option<i32>> {
            unreachable!("the version probe never streams")
        }
    }

    #[test]
    fn bundled_runtime_is_preferred_over_path() {
        let dir = tempfile::tempdir().unwrap();
        let bin = dir.path().join("jre").join("bin");
        std::fs::create_dir_all(&bin).unwrap();
        let bundled = bin.join(utils::java_executable());
        std::fs::write(&bundled, b"").unwrap();

        assert_eq!(resolve_java(dir.path()), bundled);
    }

    #[test]
    fn without_a_bundled_runtime_the_bare_name_goes_to_path() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            resolve_java(dir.path()),
            PathBuf::from(utils::java_executable())
        );
    }

    #[test]
    fn classifies_a_64_bit_banner() {
        let runner = BannerRunner {
            stdout: "",
            stderr: "Java HotSpot(TM) 64-Bit Server VM\n",
            spawns: true,
        };
        let runtime = probe_runtime(&runner, Path::new(".")).unwrap();
        assert_eq!(runtime.bitness, Bitness::X64);
    }

    #[test]
    fn classifies_a_32_bit_banner() {
        let runner = BannerRunner {
            stdout: "",
            stderr: "Java HotSpot(TM) Client VM\n",
            spawns: true,
        };
        let runtime = probe_runtime(&runner, Path::new(".")).unwrap();
        assert_eq!(runtime.bitness, Bitness::X86);
    }

    #[test]
    fn banner_on_stdout_still_classifies() {
        let runner = BannerRunner {
            stdout: "openjdk version, Java 64-Bit VM\n",
            stderr: "",
            spawns: true,
        };
        let runtime = probe_runtime(&runner, Path::new(".")).unwrap();
        assert_eq!(runtime.bitness, Bitness::X64);
    }

    #[test]
    fn marker_less_output_is_rejected() {
        let runner = BannerRunner {
            stdout: "",
            stderr: "gcj: something unexpected\n",
            spawns: true,
        };
        let err = probe_runtime(&runner, Path::new(".")).unwrap_err();
        assert!(matches!(err, LaunchError::UnrecognizedJava(_)));
    }

    #[test]
    fn spawn_failure_means_no_java() {
        let runner = BannerRunner {
            stdout: "",
            stderr: "",
            spawns: false,
        };
        let err = probe_runtime(&runner, Path::new(".")).unwrap_err();
        assert!(matches!(err, LaunchError::JavaNotFound));
    }
}
