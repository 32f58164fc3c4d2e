//! Adapters implementing domain ports.

use std::path::Path;

pub mod msgpack_repository;
pub mod text_repository;

pub use msgpack_repository::MsgPackRepository;
pub use text_repository::TextRepository;

use crate::ports::SolutionRepository;

/// Pick the repository matching a file name: `.msgpack` selects the binary
/// snapshot, anything else the text database.
pub fn repository_for(path: &Path) -> Box<dyn SolutionRepository> {
    match path.extension().and_then(|extension| extension.to_str()) {
        Some("msgpack") => Box::new(MsgPackRepository::new()),
        _ => Box::new(TextRepository::new()),
    }
}
