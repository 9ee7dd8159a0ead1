//! Command-line layer: argument parsing and one handler per subcommand.

pub mod parser;

pub mod commands {
    pub mod config;
    pub mod init;
    pub mod job;
    pub mod log;
    pub mod recalc;
}
