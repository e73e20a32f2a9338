mod trim;

pub use trim::{TrimPlugin, TrimSet};
