//! # Repository Module
//!
//! Repository pattern implementations for domain entity persistence.

pub mod memory_impl;
#[cfg(feature = "supabase")]
pub mod supabase_impl;
pub mod traits;

pub use memory_impl::InMemoryProductRepository;
#[cfg(feature = "supabase")]
pub use supabase_impl::{SupabaseConfig, SupabaseProductRepository};
pub use traits::ProductRepository;
