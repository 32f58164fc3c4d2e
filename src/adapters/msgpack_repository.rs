//! MessagePack implementation of the solution repository.
//!
//! This adapter implements the SolutionRepository port using rmp_serde for
//! compact binary serialization. Positions are stored packed, which makes the
//! snapshot a fast cache next to the text database.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    error::Error,
    game::Position,
    ports::SolutionRepository,
    solver::{Depth, Entry, Solution},
};

/// Snapshot format version, bumped whenever the layout changes
const SNAPSHOT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct Snapshot {
    version: u32,
    /// `(Position::pack, depth)` pairs in position order
    entries: Vec<(u64, Depth)>,
}

/// MessagePack-based solution repository.
///
/// # Examples
///
/// ```no_run
/// use mondrago::adapters::MsgPackRepository;
/// use mondrago::ports::SolutionRepository;
/// use std::path::Path;
///
/// let repo = MsgPackRepository::new();
/// let solution = mondrago::solve()?;
///
/// repo.save(&solution, Path::new("mondrago.msgpack"))?;
/// let loaded = repo.load(Path::new("mondrago.msgpack"))?;
/// assert_eq!(loaded.counts(), solution.counts());
/// # Ok::<(), mondrago::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackRepository;

impl MsgPackRepository {
    /// Create a new MessagePack repository.
    pub fn new() -> Self {
        Self
    }
}

impl SolutionRepository for MsgPackRepository {
    fn save(&self, solution: &Solution, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        let snapshot = Snapshot {
            version: SNAPSHOT_VERSION,
            entries: solution
                .entries()
                .map(|entry| (entry.position.pack(), entry.depth))
                .collect(),
        };
        rmp_serde::encode::write(&mut writer, &snapshot).map_err(|e| {
            Error::SerializationContext {
                operation: "serialize solution to MessagePack".to_string(),
                message: e.to_string(),
            }
        })?;

        writer.flush().map_err(|source| Error::Io {
            operation: format!("write file {path:?}"),
            source,
        })?;
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<Solution> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;

        let snapshot: Snapshot = rmp_serde::decode::from_read(BufReader::new(file)).map_err(
            |e| Error::SerializationContext {
                operation: "deserialize solution from MessagePack".to_string(),
                message: e.to_string(),
            },
        )?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(Error::SerializationContext {
                operation: format!("load snapshot {path:?}"),
                message: format!(
                    "unsupported snapshot version {} (expected {SNAPSHOT_VERSION})",
                    snapshot.version
                ),
            });
        }

        let entries = snapshot
            .entries
            .into_iter()
            .map(|(packed, depth)| {
                Ok(Entry {
                    position: Position::unpack(packed)?,
                    depth,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Solution::from_entries(entries)
    }
}
