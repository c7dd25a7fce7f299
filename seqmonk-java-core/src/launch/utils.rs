use std::env;
use std::io;
use std::path::PathBuf;

pub fn java_executable() -> &'static str {
    if env::consts::OS == "windows" {
        "java.exe"
    } else {
        "java"
    }
}

pub fn classpath_separator() -> &'static str {
    if env::consts::OS == "windows" {
        ";"
    } else {
        ":"
    }
}

/// Directory holding the launcher binary. The application jars and any
/// bundled runtime are expected to live next to it.
pub fn launcher_dir() -> io::Result<PathBuf> {
    let exe = env::current_exe()?;
    exe.parent().map(PathBuf::from).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "launcher executable has no parent directory",
        )
    })
}
