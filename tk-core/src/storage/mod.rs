pub mod in_memory;
pub mod supabase;
pub mod traits;

pub use in_memory::InMemoryStorage;
pub use supabase::SupabaseStorage;
pub use traits::Storage;
