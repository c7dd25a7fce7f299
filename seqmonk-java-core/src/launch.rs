mod utils;

pub mod arguments;
pub mod host;
pub mod java;
pub mod memory;
pub mod prefs;
pub mod process;
pub mod profile;

use std::path::PathBuf;

use log::info;

use crate::error::LaunchError;
use crate::launch::host::{Host, SystemHost};
use crate::launch::java::{Bitness, JavaRuntime};
use crate::launch::process::{ProcessRunner, SystemRunner};
use crate::launch::profile::AppProfile;

#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    /// Directory holding the application jars and (optionally) a bundled
    /// runtime. Defaults to the directory of the launcher binary itself.
    pub launcher_dir: Option<PathBuf>,
    /// Project file forwarded to SeqMonk as its only argument.
    pub file: Option<PathBuf>,
    pub profile: Option<AppProfile>,
}

/// Runs the whole launch sequence:
/// resolve java, probe its version, classify bitness, look up a manual
/// memory ceiling, compute and validate a heap request, start SeqMonk.
///
/// The two collaborators are seams for tests: every external process call
/// goes through the [`ProcessRunner`] and every host measurement through
/// the [`Host`].
pub struct Launcher<R, H> {
    runner: R,
    host: H,
    dir: PathBuf,
    profile: AppProfile,
    file: Option<PathBuf>,
}

impl Launcher<SystemRunner, SystemHost> {
    pub fn new(options: LaunchOptions) -> Result<Self, LaunchError> {
        Self::with_collaborators(options, SystemRunner, SystemHost)
    }
}

impl<R: ProcessRunner, H: Host> Launcher<R, H> {
    pub fn with_collaborators(options: LaunchOptions, runner: R, host: H) -> Result<Self, LaunchError> {
        let dir = match options.launcher_dir {
            Some(dir) => dir,
            None => utils::launcher_dir().map_err(LaunchError::LauncherDir)?,
        };
        let profile = options
            .profile
            .unwrap_or_else(|| profile::load_profile(&dir));

        Ok(Self {
            runner,
            host,
            dir,
            profile,
            file: options.file,
        })
    }

    pub fn run(&self) -> Result<(), LaunchError> {
        let runtime = self.probe_runtime()?;
        let ceiling = self.memory_ceiling(&runtime);
        let requested = self.compute_budget(ceiling)?;
        let heap = self.validate_heap(&runtime, requested)?;
        self.launch(&runtime, heap)
    }

    fn probe_runtime(&self) -> Result<JavaRuntime, LaunchError> {
        let runtime = java::probe_runtime(&self.runner, &self.dir)?;
        info!("{}", runtime.banner.trim_end());

        // A 32-bit JVM on a 64-bit OS is nearly always a mistake and causes
        // all kinds of problems, so it is refused outright.
        if runtime.bitness == Bitness::X86 && self.host.is_64bit_os() {
            return Err(LaunchError::Needs64BitJava);
        }

        Ok(runtime)
    }

    fn memory_ceiling(&self, runtime: &JavaRuntime) -> u64 {
        match runtime.bitness {
            Bitness::X86 => {
                info!(
                    "Found 32-bit JVM, setting memory ceiling to {}m",
                    memory::CEILING_32BIT_MB
                );
                memory::CEILING_32BIT_MB
            }
            Bitness::X64 => {
                let mut ceiling = memory::CEILING_64BIT_MB;

                // A `Memory` entry in SeqMonk's own preferences can raise
                // the default ceiling, never lower it.
                if let Some(manual) =
                    prefs::manual_ceiling(&self.runner, &runtime.path, &self.dir, &self.profile)
                {
                    if manual > ceiling {
                        ceiling = manual;
                    }
                }

                info!("Found 64-bit JVM, setting memory ceiling to {}m", ceiling);
                ceiling
            }
        }
    }

    fn compute_budget(&self, ceiling: u64) -> Result<u64, LaunchError> {
        let physical = self.host.physical_memory_mb();
        info!("Physical memory installed is {}", physical);

        if physical < memory::MEMORY_FLOOR_MB {
            return Err(LaunchError::InsufficientMemory(physical));
        }

        let requested = memory::compute_request(physical, ceiling);
        info!("Amount of memory to use is {}", requested);
        Ok(requested)
    }

    fn validate_heap(&self, runtime: &JavaRuntime, requested: u64) -> Result<u64, LaunchError> {
        let heap =
            memory::validate_request(&self.runner, &runtime.path, &self.dir, &self.profile, requested);

        if heap == 0 {
            return Err(LaunchError::HeapValidationFailed);
        }

        info!("Accounting for VM oddities, amount of memory to request is {}", heap);
        Ok(heap)
    }

    fn launch(&self, runtime: &JavaRuntime, heap_mb: u64) -> Result<(), LaunchError> {
        let args =
            arguments::launch_arguments(&self.dir, &self.profile, heap_mb, self.file.as_deref());
        info!("Final command is {} {}", runtime.path.display(), args.join(" "));

        let status = self
            .runner
            .stream(&runtime.path, &args)
            .map_err(LaunchError::SpawnFailed)?;

        match status {
            Some(code) => info!("SeqMonk exited with status {}", code),
            None => info!("SeqMonk was terminated by a signal"),
        }

        Ok(())
    }
}
