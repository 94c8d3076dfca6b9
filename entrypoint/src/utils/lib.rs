pub mod cli;
pub mod errors;
pub mod logger;
pub mod schedule;
pub mod watch;

#[cfg(test)]
pub(crate) mod testing;
