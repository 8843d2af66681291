//! Text map loading.
//!
//! A map is a grid of whitespace-separated tokens, one row per line:
//!
//! ```text
//! # comment lines start with '#'
//! 1  1  1  1  1
//! 1  S  2  4a 1
//! 1  2  3a 2  1
//! 1  2  2  5  1
//! 1  1  1  1  1
//! ```
//!
//! `1` wall, `2` floor, `3X` door of tag X, `4X` key of tag X, `5` goal and
//! `S` player start. The column index is x and the row index is y.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{debug, info};

use super::door::Door;
use super::state::WorldState;
use super::tile::{DoorTag, Tile, TileCoord};
use crate::error::MapParseError;

#[derive(Default)]
struct PendingDoor {
    door: Option<TileCoord>,
    key: Option<TileCoord>,
}

/// Read and parse a map file.
pub fn parse_map(path: impl AsRef<Path>) -> Result<WorldState, MapParseError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| MapParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let world = parse_map_str(&text)?;
    info!(
        "Loaded map {} ({}x{}, {} walls, {} doors)",
        path.display(),
        world.width(),
        world.height(),
        world.walls().len(),
        world.doors().len()
    );
    Ok(world)
}

/// Parse map text into a fresh level.
pub fn parse_map_str(text: &str) -> Result<WorldState, MapParseError> {
    let mut width: Option<usize> = None;
    let mut height = 0usize;
    let mut walls = Vec::new();
    let mut pending: HashMap<DoorTag, PendingDoor> = HashMap::new();
    // Doors keep the order in which their tag first shows up
    let mut door_order: Vec<DoorTag> = Vec::new();
    let mut goal = None;
    let mut start = None;

    for (line_idx, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        let expected = *width.get_or_insert(tokens.len());
        if tokens.len() != expected {
            return Err(MapParseError::NonRectangular {
                line: line_idx + 1,
                expected,
                found: tokens.len(),
            });
        }

        let y = height as i32;
        for (x, token) in tokens.iter().enumerate() {
            let coord = TileCoord::new(x as i32, y);
            let tile = Tile::from_token(token).ok_or_else(|| MapParseError::UnknownTile {
                line: line_idx + 1,
                column: x + 1,
                token: token.to_string(),
            })?;

            match tile {
                Tile::Wall => walls.push(coord),
                Tile::Floor => {}
                Tile::Door(tag) => {
                    let entry = pending.entry(tag).or_insert_with(|| {
                        door_order.push(tag);
                        PendingDoor::default()
                    });
                    if entry.door.replace(coord).is_some() {
                        return Err(MapParseError::DuplicateDoor { tag: tag.as_char() });
                    }
                }
                Tile::Key(tag) => {
                    let entry = pending.entry(tag).or_insert_with(|| {
                        door_order.push(tag);
                        PendingDoor::default()
                    });
                    if entry.key.replace(coord).is_some() {
                        return Err(MapParseError::DuplicateKey { tag: tag.as_char() });
                    }
                }
                Tile::Goal => {
                    if goal.replace(coord).is_some() {
                        return Err(MapParseError::DuplicateGoal);
                    }
                }
                Tile::Start => {
                    if start.replace(coord).is_some() {
                        return Err(MapParseError::DuplicateStart);
                    }
                }
            }
        }
        height += 1;
    }

    let width = width.ok_or(MapParseError::Empty)?;

    let mut doors = Vec::with_capacity(door_order.len());
    for tag in door_order {
        let entry = pending.remove(&tag).unwrap_or_default();
        match (entry.door, entry.key) {
            (Some(door), Some(key)) => doors.push(Door::new(tag, door, key)),
            (Some(_), None) => {
                return Err(MapParseError::UnpairedTag {
                    tag: tag.as_char(),
                    present: "door",
                    missing: "key",
                })
            }
            (None, _) => {
                return Err(MapParseError::UnpairedTag {
                    tag: tag.as_char(),
                    present: "key",
                    missing: "door",
                })
            }
        }
    }

    let goal = goal.ok_or(MapParseError::MissingGoal)?;
    let start = start.ok_or(MapParseError::MissingStart)?;
    debug!("Player start at ({}, {}), goal at ({}, {})", start.x, start.y, goal.x, goal.y);

    Ok(WorldState::new(
        width as u32,
        height as u32,
        walls,
        doors,
        goal,
        start,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec3};
    use std::io::Write;

    const SAMPLE: &str = "\
# two doors, keys in reverse order
1 1  1  1  1  1
1 S  4b 2  4a 1
1 2  1  3a 1  1
1 2  2  2  3b 1
1 1  1  1  5  1
";

    #[test]
    fn test_parse_sample_map() {
        let world = parse_map_str(SAMPLE).unwrap();

        assert_eq!(world.width(), 6);
        assert_eq!(world.height(), 5);
        assert_eq!(world.walls().len(), 6 + 2 + 4 + 2 + 5);
        assert!(world.walls().contains(&TileCoord::new(2, 2)));

        assert_eq!(world.goal().position(), Vec2::new(4.0, 4.0));
        assert_eq!(world.player().position, Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(world.player().start(), Vec3::new(1.0, 1.0, 0.0));

        // Load order follows the first appearance of each tag
        let tags: Vec<char> = world.doors().iter().map(|d| d.tag().as_char()).collect();
        assert_eq!(tags, vec!['b', 'a']);

        let a = world.door(DoorTag::A).unwrap();
        assert_eq!(a.door_tile(), TileCoord::new(3, 2));
        assert_eq!(a.key_position(), Vec3::new(4.0, 1.0, 0.0));
        assert_eq!(a.color(), [1.0, 0.0, 0.0]);
        assert!(!a.have_key() && !a.is_open());
    }

    #[test]
    fn test_tolerates_blank_lines_and_trailing_whitespace() {
        let text = "\n\n1 1 1   \n1 S 5\t\n\n1 1 1\n\n   \n";
        let world = parse_map_str(text).unwrap();
        assert_eq!((world.width(), world.height()), (3, 3));
    }

    #[test]
    fn test_rejects_ragged_rows() {
        let err = parse_map_str("1 1 1\n1 S\n1 5 1\n").unwrap_err();
        assert!(matches!(
            err,
            MapParseError::NonRectangular { line: 2, expected: 3, found: 2 }
        ));
    }

    #[test]
    fn test_rejects_unknown_tile() {
        let err = parse_map_str("1 1 1\n1 S 7\n1 5 1\n").unwrap_err();
        match err {
            MapParseError::UnknownTile { line, column, token } => {
                assert_eq!((line, column, token.as_str()), (2, 3, "7"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_rejects_unpaired_and_duplicate_tags() {
        assert!(matches!(
            parse_map_str("S 3c 5").unwrap_err(),
            MapParseError::UnpairedTag { tag: 'c', present: "door", .. }
        ));
        assert!(matches!(
            parse_map_str("S 4d 5").unwrap_err(),
            MapParseError::UnpairedTag { tag: 'd', present: "key", .. }
        ));
        assert!(matches!(
            parse_map_str("S 3a 3a 4a 5").unwrap_err(),
            MapParseError::DuplicateDoor { tag: 'a' }
        ));
        assert!(matches!(
            parse_map_str("S 3a 4a 4a 5").unwrap_err(),
            MapParseError::DuplicateKey { tag: 'a' }
        ));
    }

    #[test]
    fn test_requires_single_start_and_goal() {
        assert!(matches!(parse_map_str("S 2 2").unwrap_err(), MapParseError::MissingGoal));
        assert!(matches!(parse_map_str("2 2 5").unwrap_err(), MapParseError::MissingStart));
        assert!(matches!(parse_map_str("S 5 5").unwrap_err(), MapParseError::DuplicateGoal));
        assert!(matches!(parse_map_str("S S 5").unwrap_err(), MapParseError::DuplicateStart));
        assert!(matches!(parse_map_str("# nothing\n\n").unwrap_err(), MapParseError::Empty));
    }

    #[test]
    fn test_parse_map_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let world = parse_map(file.path()).unwrap();
        assert_eq!(world.doors().len(), 2);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = parse_map(dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, MapParseError::Io { .. }));
    }
}
