//! CLI integration tests
//!
//! Run the built `dotnet-extract` binary against temporary source trees and
//! check stdout, stderr, written files and exit codes.

pub mod extract_tests;
