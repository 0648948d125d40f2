mod entry;
mod host_fs;
mod map_fs;

pub use entry::{Entry, EntryType};
pub use host_fs::HostFS;
pub use map_fs::MapFS;
