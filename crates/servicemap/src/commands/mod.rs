//! Command implementations that do more than query the loaded catalog.

pub mod init;
