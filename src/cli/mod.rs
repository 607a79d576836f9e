//! CLI subcommand implementations for the flecta binary.

pub mod output;
pub mod resolve_cmd;
pub mod serve;
