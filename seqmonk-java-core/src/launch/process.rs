use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;

use log::warn;

#[derive(Debug, Clone)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub code: Option<i32>,
}

/// Every external process call goes through this seam so the launch
/// decisions can be exercised without spawning real processes.
pub trait ProcessRunner {
    /// Runs the program to completion, capturing both output streams.
    fn run(&self, program: &Path, args: &[String]) -> io::Result<ProcessOutput>;

    /// Runs the program to completion, re-emitting its output line by line
    /// on the launcher's own streams. Returns the child's exit code, or
    /// `None` when the child was killed by a signal.
    fn stream(&self, program: &Path, args: &[String]) -> io::Result<Option<i32>>;
}

/// [`ProcessRunner`] backed by `std::process`. No shell is involved and no
/// timeouts are applied; a hung child hangs the launcher.
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, program: &Path, args: &[String]) -> io::Result<ProcessOutput> {
        let output = Command::new(program).args(args).output()?;

        Ok(ProcessOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            success: output.status.success(),
            code: output.status.code(),
        })
    }

    fn stream(&self, program: &Path, args: &[String]) -> io::Result<Option<i32>> {
        let mut child = Command::new(program)
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let stdout_thread = thread::spawn(move || {
            if let Some(stdout) = stdout {
                let reader = BufReader::new(stdout);
                for line in reader.lines() {
                    match line {
                        Ok(line) => println!("{}", line),
                        Err(err) => warn!("Error reading child stdout: {}", err),
                    }
                }
            }
        });

        let stderr_thread = thread::spawn(move || {
            if let Some(stderr) = stderr {
                let reader = BufReader::new(stderr);
                for line in reader.lines() {
                    match line {
                        Ok(line) => eprintln!("{}", line),
                        Err(err) => warn!("Error reading child stderr: {}", err),
                    }
                }
            }
        });

        if stdout_thread.join().is_err() {
            warn!("stdout reader thread panicked");
        }
        if stderr_thread.join().is_err() {
            warn!("stderr reader thread panicked");
        }

        let status = child.wait()?;
        Ok(status.code())
    }
}
