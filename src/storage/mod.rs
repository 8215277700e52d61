pub mod client;
pub mod supabase;
pub mod traits;

pub use client::{StorageClient, DEFAULT_BUCKET};
pub use supabase::SupabaseStore;
pub use traits::{ObjectStore, StorageError};
