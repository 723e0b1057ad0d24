//! Workspace tooling package.
//!
//! Carries the `rusty-hook` pre-commit configuration; the crates live under
//! `crates/`.
