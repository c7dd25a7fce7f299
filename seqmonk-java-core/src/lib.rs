//! Launch logic for SeqMonk: find a Java runtime, work out how much heap it
//! can realistically be given on this machine, then start the application.

pub mod error;
pub mod launch;
