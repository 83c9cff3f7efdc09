//! The allocator interface used by the node store.
//!
//! These are re-exports from `allocator-api2`, which provides the unstable
//! standard `Allocator` trait on stable Rust. Enable the `allocator_api`
//! feature to use the nightly standard trait instead.

pub use allocator_api2::alloc::AllocError;
pub use allocator_api2::alloc::Allocator;
pub use allocator_api2::alloc::Global;
