use std::path::Path;

use log::{info, warn};

use crate::launch::arguments;
use crate::launch::process::ProcessRunner;
use crate::launch::profile::AppProfile;

/// Below this much installed memory SeqMonk can't run at all.
pub const MEMORY_FLOOR_MB: u64 = 1000;
pub const CEILING_32BIT_MB: u64 = 1300;
pub const CEILING_64BIT_MB: u64 = 10240;

/// Pre-validation heap request: two thirds of physical memory, capped at
/// the ceiling.
pub fn compute_request(physical_mb: u64, ceiling_mb: u64) -> u64 {
    ceiling_mb.min(physical_mb * 2 / 3)
}

/// Empirically checks that a JVM will actually start with the requested
/// heap. Some JVM/OS combinations refuse a nominally available size, so
/// the request is probed with the memcheck class and shrunk in steps of a
/// tenth of the original request until it works. Returns 0 when nothing
/// above half of the request works; the caller treats that as a failed
/// launch.
pub fn validate_request<R: ProcessRunner>(
    runner: &R,
    java: &Path,
    dir: &Path,
    profile: &AppProfile,
    requested: u64,
) -> u64 {
    let step = (requested / 10).max(1);
    let mut candidate = requested;

    while candidate > requested / 2 {
        let args = arguments::memcheck_arguments(dir, profile, candidate);
        info!("Memcheck command is {} {}", java.display(), args.join(" "));

        let output = match runner.run(java, &args) {
            Ok(output) => output,
            Err(err) => {
                warn!("Memcheck failed to start: {}", err);
                candidate -= step;
                continue;
            }
        };

        if !output.success {
            info!("Failed check with {}: {}", candidate, output.stderr.trim());
            candidate -= step;
            continue;
        }

        if !output.stderr.trim().is_empty() {
            // Diagnostic chatter alongside a zero exit is not a failure.
            warn!("Memcheck wrote to stderr: {}", output.stderr.trim());
        }

        // First success after shrinking wins; only an untouched request
        // gets the proportional correction below.
        if candidate != requested {
            return candidate;
        }

        let raw = output.stdout.replace('\n', "").replace('\r', "");
        info!("Raw memcheck output was '{}'", raw);

        // Rust's f64 parser always takes a `.` decimal point, independent
        // of the host locale.
        match raw.trim().parse::<f64>() {
            Ok(measured) if measured.is_finite() && measured > 0.0 => {
                let corrected = (requested as f64 * (requested as f64 / measured)) as u64;
                info!("Memory corrected by {} was {}", requested, corrected);
                return corrected;
            }
            _ => {
                warn!("Couldn't parse memcheck output '{}'", raw);
                candidate -= step;
            }
        }
    }

    info!("Memcheck repeatedly failed.  Giving up.");
    0
}
