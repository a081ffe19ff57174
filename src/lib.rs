
/// Parallel scoring of many partition pairs from a manifest
pub mod batch_solver;
/// Command line interface functionality
pub mod cli;
/// Contains various shared data types
pub mod data_types;
/// Counts co-clustered pairs between two partitions
pub mod pair_counter;
/// Tooling for parsing input files into partitions
pub mod parsing;
/// Named similarity measures computed from a shared pair count
pub mod similarity;
/// Various utility functions that tend to be very generic
pub mod util;
/// All output writers
pub mod writers;
