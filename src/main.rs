use std::path::PathBuf;
use std::process;

use seqmonk_java_core::error::LaunchError;
use seqmonk_java_core::launch::{LaunchOptions, Launcher};

mod logging;

fn main() {
    logging::init();

    // The only accepted argument is a project file to hand to SeqMonk.
    let file = std::env::args_os().nth(1).map(PathBuf::from);

    let result = Launcher::new(LaunchOptions {
        file,
        ..LaunchOptions::default()
    })
    .and_then(|launcher| launcher.run());

    if let Err(err) = result {
        fail(err);
    }
}

fn fail(err: LaunchError) -> ! {
    match err.alert() {
        // Console stand-in for the blocking message box of the original
        // launcher.
        Some(alert) => {
            eprintln!();
            eprintln!("*** {} ***", alert.title);
            eprintln!("{}", alert.message);
        }
        None => log::error!("{}", err),
    }
    process::exit(1);
}
