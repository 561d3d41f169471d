//! `SettingsProvider` implementations for the tax engine.
//!
//! `sltax-core` only defines the provider trait; this crate supplies the
//! backends applications and tests actually plug in: an in-memory map and a
//! snapshot cache with atomic-swap refresh.

mod cached;
mod memory;

pub use cached::CachedSettings;
pub use memory::InMemorySettings;
