//! CPU-side sampler types.
//!
//! Provides [`CpuSampler`] for describing texture sampling parameters,
//! along with the addressing ([`AddressMode`], [`UvwAddressMode`]) and
//! filtering ([`FilterMode`], [`FilterKind`], [`FilterPreset`]) vocabulary
//! shared between texture binding slots and GPU backends.

mod types;

pub use types::{AddressMode, CpuSampler, FilterKind, FilterMode, FilterPreset, UvwAddressMode};
