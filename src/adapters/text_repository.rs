//! Line-oriented text database of solved positions.
//!
//! Each entry is one line, `(m0, m1, m2, m3) (o0, o1, o2, o3): depth`, sorted
//! by position. Lines starting with `#` and blank lines are ignored.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use crate::{
    Result,
    error::Error,
    game::{MARKERS, MarkerSet, Position},
    ports::SolutionRepository,
    solver::{Depth, Entry, Solution},
};

const HEADER: &str = "\
# Mondrago solution database
# (mover cells) (opponent cells): depth
# odd depth: mover wins, even depth: mover loses, negative depth: draw
";

/// Text database repository
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRepository;

impl TextRepository {
    pub fn new() -> Self {
        Self
    }

    /// Write all entries, header first
    pub fn write<W: Write>(&self, solution: &Solution, writer: &mut W) -> Result<()> {
        writer.write_all(HEADER.as_bytes())?;
        for entry in solution.entries() {
            writeln!(writer, "{}", format_entry(&entry))?;
        }
        Ok(())
    }

    /// Parse a database from any buffered reader
    pub fn read<R: BufRead>(&self, reader: R) -> Result<Solution> {
        let mut entries = Vec::new();
        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            if let Some(entry) = parse_line(number + 1, &line)? {
                entries.push(entry);
            }
        }
        Solution::from_entries(entries)
    }
}

impl SolutionRepository for TextRepository {
    fn save(&self, solution: &Solution, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        self.write(solution, &mut writer)?;
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
        self.read(BufReader::new(file))
    }
}

/// Render one entry the way it appears in the database
pub fn format_entry(entry: &Entry) -> String {
    format!(
        "{} {}: {}",
        entry.position.mover(),
        entry.position.opponent(),
        entry.depth
    )
}

/// Parse one database line; `None` for comments and blank lines.
///
/// # Errors
///
/// Returns [`Error::MalformedLine`] if the line does not hold two disjoint
/// four-cell groups and a depth, or if the position is not canonical.
pub fn parse_line(number: usize, line: &str) -> Result<Option<Entry>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    let malformed = |reason: String| Error::MalformedLine {
        line: number,
        content: line.to_string(),
        reason,
    };

    let (sides, depth) = trimmed
        .rsplit_once(':')
        .ok_or_else(|| malformed("missing ':' before the depth".to_string()))?;
    let depth: Depth = depth
        .trim()
        .parse()
        .map_err(|e| malformed(format!("invalid depth: {e}")))?;
    if depth == Depth::MIN {
        return Err(malformed(format!("depth {depth} is out of range")));
    }

    let (mover, rest) = parse_group(sides).map_err(&malformed)?;
    let (opponent, rest) = parse_group(rest).map_err(&malformed)?;
    if !rest.trim().is_empty() {
        return Err(malformed(format!("unexpected trailing text '{}'", rest.trim())));
    }

    let position = Position::new(mover, opponent).map_err(|e| malformed(e.to_string()))?;
    if !position.is_legal() {
        return Err(malformed("mover already stands on a square".to_string()));
    }
    if !position.is_canonical() {
        return Err(malformed(format!(
            "position is not canonical (expected {:?})",
            position.canonical()
        )));
    }
    Ok(Some(Entry { position, depth }))
}

/// Parse `(a, b, c, d)` at the start of `input`, returning the rest
fn parse_group(input: &str) -> std::result::Result<(MarkerSet, &str), String> {
    let input = input.trim_start();
    let body = input
        .strip_prefix('(')
        .ok_or_else(|| "expected '('".to_string())?;
    let (cells, rest) = body
        .split_once(')')
        .ok_or_else(|| "expected ')'".to_string())?;
    let cells = cells
        .split(',')
        .map(|cell| {
            cell.trim()
                .parse::<usize>()
                .map_err(|e| format!("invalid cell '{}': {e}", cell.trim()))
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;
    if cells.len() != MARKERS {
        return Err(format!("expected {MARKERS} cells, got {}", cells.len()));
    }
    let set = MarkerSet::from_cells(&cells).map_err(|e| e.to_string())?;
    Ok((set, rest))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use tempfile::TempDir;

    use super::*;

    fn sample_solution() -> Solution {
        let entry = |mover: [usize; 4], opponent: [usize; 4], depth| Entry {
            position: Position::from_cells(&mover, &opponent).unwrap(),
            depth,
        };
        Solution::from_entries([
            entry([0, 1, 23, 24], [3, 4, 20, 21], -2),
            entry([0, 1, 5, 7], [20, 21, 22, 23], 1),
            entry([2, 7, 12, 17], [0, 1, 5, 6], 0),
        ])
        .unwrap()
    }

    #[test]
    fn test_parse_line() {
        let entry = parse_line(1, "(0, 1, 5, 7) (20, 21, 22, 23): 1")
            .unwrap()
            .unwrap();
        assert_eq!(entry.position.mover().cells(), [0, 1, 5, 7]);
        assert_eq!(entry.position.opponent().cells(), [20, 21, 22, 23]);
        assert_eq!(entry.depth, 1);

        let draw = parse_line(2, "  (0, 1, 23, 24) (3, 4, 20, 21): -12  ")
            .unwrap()
            .unwrap();
        assert_eq!(draw.depth, -12);

        assert!(parse_line(3, "").unwrap().is_none());
        assert!(parse_line(4, "# comment").unwrap().is_none());
    }

    #[test]
    fn test_parse_line_rejects_malformed_input() {
        let bad = [
            "(0, 1, 5, 7) (20, 21, 22, 23)",
            "(0, 1, 5, 7) (20, 21, 22, 23): x",
            "(0, 1, 5) (20, 21, 22, 23): 1",
            "(0, 1, 5, 7) (20, 21, 22, 25): 1",
            "(0, 1, 5, 7) (7, 21, 22, 23): 1",
            "(0, 1, 5, 7) (20, 21, 22, 23) extra: 1",
            "0, 1, 5, 7 (20, 21, 22, 23): 1",
            // Mover on a square
            "(0, 1, 5, 6) (20, 21, 22, 23): 0",
            // Half-turn image of (0, 1, 5, 7)
            "(17, 19, 23, 24) (1, 2, 3, 4): 1",
        ];
        for (number, line) in bad.iter().enumerate() {
            let result = parse_line(number + 1, line);
            assert!(
                matches!(result, Err(Error::MalformedLine { line, .. }) if line == number + 1),
                "line {line:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_write_is_sorted_and_parseable() {
        let solution = sample_solution();
        let mut buffer = Vec::new();
        TextRepository::new().write(&solution, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        let lines: Vec<&str> = text.lines().filter(|line| !line.starts_with('#')).collect();
        assert_eq!(
            lines,
            vec![
                "(0, 1, 5, 7) (20, 21, 22, 23): 1",
                "(0, 1, 23, 24) (3, 4, 20, 21): -2",
                "(2, 7, 12, 17) (0, 1, 5, 6): 0",
            ]
        );

        let reloaded = TextRepository::new().read(Cursor::new(text)).unwrap();
        assert!(reloaded.entries().eq(solution.entries()));
    }

    #[test]
    fn test_duplicate_lines_are_rejected() {
        let text = "(0, 1, 5, 7) (20, 21, 22, 23): 1\n(0, 1, 5, 7) (20, 21, 22, 23): 3\n";
        let result = TextRepository::new().read(Cursor::new(text));
        assert!(matches!(result, Err(Error::DuplicatePosition { .. })));
    }

    #[test]
    fn test_file_roundtrip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file_path = temp_dir.path().join("MONDRAGO_DATABASE.txt");

        let repo = TextRepository::new();
        let solution = sample_solution();
        repo.save(&solution, &file_path).expect("Failed to save");
        let loaded = repo.load(&file_path).expect("Failed to load");

        assert_eq!(loaded.counts(), solution.counts());
        assert_eq!(loaded.histogram(), solution.histogram());
    }
}
