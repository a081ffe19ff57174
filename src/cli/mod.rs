/*!
# CLI module
Command line interface functionality that is specific to clustsim.
*/

/// The batch CLI subcommand
pub mod batch;
/// The compare CLI subcommand
pub mod compare;
/// The main CLI module that contains the top-level CLI parser and help text
pub mod core;
