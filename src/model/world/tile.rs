use glam::Vec2;

/// Integer grid cell, x = column, y = row of the map text.
#[derive(Debug, Eq, Hash, PartialEq, Clone, Copy)]
pub struct TileCoord {
    pub x: i32,
    pub y: i32,
}

impl TileCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// World-space center of the tile.
    pub fn center(self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }
}

/// Axis-aligned proximity: `|dx| < half_width && |dy| < half_width`.
pub fn within_square(a: Vec2, b: Vec2, half_width: f32) -> bool {
    let d = (a - b).abs();
    d.x < half_width && d.y < half_width
}

/// Door/key pairing letter, `a` through `e`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DoorTag {
    A,
    B,
    C,
    D,
    E,
}

impl DoorTag {
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'a' => Some(DoorTag::A),
            'b' => Some(DoorTag::B),
            'c' => Some(DoorTag::C),
            'd' => Some(DoorTag::D),
            'e' => Some(DoorTag::E),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            DoorTag::A => 'a',
            DoorTag::B => 'b',
            DoorTag::C => 'c',
            DoorTag::D => 'd',
            DoorTag::E => 'e',
        }
    }

    /// Color shared by the door and its key.
    pub fn color(self) -> [f32; 3] {
        match self {
            DoorTag::A => [1.0, 0.0, 0.0],
            DoorTag::B => [0.0, 1.0, 0.0],
            DoorTag::C => [0.0, 0.0, 1.0],
            DoorTag::D => [1.0, 1.0, 0.0],
            DoorTag::E => [1.0, 0.0, 1.0],
        }
    }
}

/// One classified map token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Floor,
    Door(DoorTag),
    Key(DoorTag),
    Goal,
    Start,
}

impl Tile {
    /// Classify a map token: `1` wall, `2` floor, `3X` door, `4X` key, `5` goal, `S` start.
    pub fn from_token(token: &str) -> Option<Self> {
        let mut chars = token.chars();
        let head = chars.next()?;
        let tag = chars.next();
        if chars.next().is_some() {
            return None;
        }
        match (head, tag) {
            ('1', None) => Some(Tile::Wall),
            ('2', None) => Some(Tile::Floor),
            ('3', Some(t)) => DoorTag::from_char(t).map(Tile::Door),
            ('4', Some(t)) => DoorTag::from_char(t).map(Tile::Key),
            ('5', None) => Some(Tile::Goal),
            ('S' | 's', None) => Some(Tile::Start),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_classification() {
        assert_eq!(Tile::from_token("1"), Some(Tile::Wall));
        assert_eq!(Tile::from_token("2"), Some(Tile::Floor));
        assert_eq!(Tile::from_token("3a"), Some(Tile::Door(DoorTag::A)));
        assert_eq!(Tile::from_token("4E"), Some(Tile::Key(DoorTag::E)));
        assert_eq!(Tile::from_token("5"), Some(Tile::Goal));
        assert_eq!(Tile::from_token("S"), Some(Tile::Start));

        assert_eq!(Tile::from_token("3"), None, "door needs a tag");
        assert_eq!(Tile::from_token("3f"), None, "tags stop at e");
        assert_eq!(Tile::from_token("12"), None);
        assert_eq!(Tile::from_token("0"), None);
    }

    #[test]
    fn test_square_proximity_is_not_circular() {
        let wall = Vec2::new(2.0, 2.0);
        // Corner of the box: Euclidean distance ~0.99 but still inside the square
        assert!(within_square(Vec2::new(2.7, 2.7), wall, 0.75));
        assert!(!within_square(Vec2::new(2.75, 2.0), wall, 0.75));
        assert!(!within_square(Vec2::new(2.0, 1.2), wall, 0.75));
    }
}
