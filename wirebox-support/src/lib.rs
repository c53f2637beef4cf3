//! # Wirebox Support
//!
//! Shared helpers for the Wirebox DI container.
//!
//! This crate provides:
//! - Type name rendering (shortened and bare names)
//! - "Did you mean?" suggestions for error messages

pub mod rendering;
