
/// Loads label-per-line files into partitions
pub mod label_file;
/// Loads the batch comparison manifest
pub mod manifest;
/// Loads the legacy `;`-separated partition files
pub mod partition_file;
