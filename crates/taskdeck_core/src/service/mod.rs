//! Use-case services layered over repositories.
//!
//! Services never bypass repository validation or the error shim.

pub mod reminder_service;
