use std::path::Path;

/// Facts about the host machine the launcher can't learn from the runtime
/// itself.
pub trait Host {
    /// Total installed physical memory, in MB.
    fn physical_memory_mb(&self) -> u64;

    /// Evidence that the OS itself is 64-bit, used to refuse a 32-bit JVM.
    fn is_64bit_os(&self) -> bool;
}

pub struct SystemHost;

impl Host for SystemHost {
    fn physical_memory_mb(&self) -> u64 {
        let sys = sysinfo::System::new_all();
        sys.total_memory() / 1024 / 1024
    }

    fn is_64bit_os(&self) -> bool {
        if cfg!(windows) {
            // A 64-bit Windows always carries the 32-bit program directory.
            Path::new("C:\\Program Files (x86)").exists()
        } else {
            matches!(std::env::consts::ARCH, "x86_64" | "aarch64")
        }
    }
}
