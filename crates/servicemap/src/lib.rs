//! Servicemap - browse and check a catalog of service definitions.
//!
//! This crate provides both the `servicemap` CLI and a library for loading a
//! directory of YAML service definitions. Graph analysis lives in
//! `servicemap_graph`; this crate handles files, configuration and output.

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod app;
pub mod config;
pub mod error;
pub mod index;
pub mod loader;

// Public CLI module (needed by binary)
pub mod cli;

// Command implementations
pub mod commands;

// Text and JSON rendering
pub mod output;
