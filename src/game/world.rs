//! # World Module
//!
//! Tiles, colours and the rectangular grid that owns bounds checking.
//!
//! The grid is the single source of truth for whether a coordinate is on the
//! level. Everything else, traversal included, asks the grid before touching
//! a tile.

use crate::game::Position;
use crate::{HuepathError, HuepathResult};
use serde::{Deserialize, Serialize};

/// Colour tag carried by every tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Colour {
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
}

impl Colour {
    /// Returns every colour in declaration order.
    pub fn all() -> [Colour; 5] {
        [
            Colour::Red,
            Colour::Green,
            Colour::Blue,
            Colour::Yellow,
            Colour::Purple,
        ]
    }

    /// Single-character symbol used when dumping a grid.
    pub fn symbol(self) -> char {
        match self {
            Colour::Red => 'r',
            Colour::Green => 'g',
            Colour::Blue => 'b',
            Colour::Yellow => 'y',
            Colour::Purple => 'p',
        }
    }
}

/// A single grid cell.
///
/// Coordinates are fixed when the tile is created; only occupancy changes
/// during play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    position: Position,
    colour: Colour,
    occupied: bool,
}

impl Tile {
    /// Creates an unoccupied tile.
    ///
    /// # Examples
    ///
    /// ```
    /// use huepath::{Colour, Tile};
    ///
    /// let tile = Tile::new(3, 4, Colour::Blue);
    /// assert_eq!(tile.x(), 3);
    /// assert_eq!(tile.y(), 4);
    /// assert!(!tile.is_occupied());
    /// ```
    pub fn new(x: i32, y: i32, colour: Colour) -> Self {
        Self {
            position: Position::new(x, y),
            colour,
            occupied: false,
        }
    }

    pub fn x(&self) -> i32 {
        self.position.x
    }

    pub fn y(&self) -> i32 {
        self.position.y
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn colour(&self) -> Colour {
        self.colour
    }

    /// Checks whether two tiles are colour-compatible.
    ///
    /// Compatibility is equality of colour tags, which keeps the relation
    /// symmetric.
    ///
    /// # Examples
    ///
    /// ```
    /// use huepath::{Colour, Tile};
    ///
    /// let a = Tile::new(0, 0, Colour::Red);
    /// let b = Tile::new(1, 0, Colour::Red);
    /// let c = Tile::new(2, 0, Colour::Green);
    /// assert!(a.shares_colour_with(&b));
    /// assert!(!a.shares_colour_with(&c));
    /// ```
    pub fn shares_colour_with(&self, other: &Tile) -> bool {
        self.colour == other.colour
    }

    /// True while a character stands on this tile.
    pub fn is_occupied(&self) -> bool {
        self.occupied
    }

    pub fn set_occupied(&mut self, occupied: bool) {
        self.occupied = occupied;
    }
}

/// Rectangular matrix of tiles indexed `[y][x]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    tiles: Vec<Vec<Tile>>,
    width: u32,
    height: u32,
}

impl Grid {
    /// Builds a grid from a pre-built tile matrix.
    ///
    /// The matrix must be non-empty, every row must have the same length and
    /// every tile must sit at the coordinates it reports. Anything else is
    /// rejected with [`HuepathError::MalformedGrid`].
    pub fn new(tiles: Vec<Vec<Tile>>) -> HuepathResult<Self> {
        let height = tiles.len();
        let width = tiles.first().map(Vec::len).unwrap_or(0);

        if height == 0 || width == 0 {
            return Err(HuepathError::MalformedGrid(
                "grid must have at least one row and one column".to_string(),
            ));
        }

        for (y, row) in tiles.iter().enumerate() {
            if row.len() != width {
                return Err(HuepathError::MalformedGrid(format!(
                    "row {} has {} tiles, expected {}",
                    y,
                    row.len(),
                    width
                )));
            }
            for (x, tile) in row.iter().enumerate() {
                if tile.x() != x as i32 || tile.y() != y as i32 {
                    return Err(HuepathError::MalformedGrid(format!(
                        "tile in row {} column {} reports position {}",
                        y,
                        x,
                        tile.position()
                    )));
                }
            }
        }

        Ok(Self {
            tiles,
            width: width as u32,
            height: height as u32,
        })
    }

    /// Builds a grid from rows of colours, placing each tile at its own
    /// coordinates.
    ///
    /// # Examples
    ///
    /// ```
    /// use huepath::{Colour, Grid};
    ///
    /// let grid = Grid::from_colours(vec![
    ///     vec![Colour::Red, Colour::Blue],
    ///     vec![Colour::Green, Colour::Red],
    /// ])
    /// .unwrap();
    /// assert_eq!(grid.width(), 2);
    /// assert_eq!(grid.height(), 2);
    /// ```
    pub fn from_colours(rows: Vec<Vec<Colour>>) -> HuepathResult<Self> {
        let tiles = rows
            .into_iter()
            .enumerate()
            .map(|(y, row)| {
                row.into_iter()
                    .enumerate()
                    .map(|(x, colour)| Tile::new(x as i32, y as i32, colour))
                    .collect()
            })
            .collect();
        Self::new(tiles)
    }

    /// Builds a `width` x `height` grid of a single colour.
    pub fn filled(width: u32, height: u32, colour: Colour) -> HuepathResult<Self> {
        Self::from_colours(vec![vec![colour; width as usize]; height as usize])
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Checks if the given coordinates are inside the grid.
    pub fn is_valid_position(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32
    }

    /// Gets the tile at the given coordinates, or `None` when out of bounds.
    pub fn get_tile_at(&self, x: i32, y: i32) -> Option<&Tile> {
        if self.is_valid_position(x, y) {
            Some(&self.tiles[y as usize][x as usize])
        } else {
            None
        }
    }

    /// Gets a mutable tile at the given coordinates, or `None` when out of bounds.
    pub fn get_tile_at_mut(&mut self, x: i32, y: i32) -> Option<&mut Tile> {
        if self.is_valid_position(x, y) {
            Some(&mut self.tiles[y as usize][x as usize])
        } else {
            None
        }
    }

    /// Position-based shorthand for [`Grid::get_tile_at`].
    pub fn get_tile(&self, position: Position) -> Option<&Tile> {
        self.get_tile_at(position.x, position.y)
    }

    /// Position-based shorthand for [`Grid::get_tile_at_mut`].
    pub fn get_tile_mut(&mut self, position: Position) -> Option<&mut Tile> {
        self.get_tile_at_mut(position.x, position.y)
    }

    /// Iterates every tile in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter().flatten()
    }

    /// Marks every tile unoccupied.
    pub fn clear_occupancy(&mut self) {
        for tile in self.tiles.iter_mut().flatten() {
            tile.set_occupied(false);
        }
    }
}

impl std::fmt::Display for Grid {
    /// One line per row; occupied tiles are shown in upper case.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.tiles {
            let line: String = row
                .iter()
                .map(|tile| {
                    let symbol = tile.colour().symbol();
                    if tile.is_occupied() {
                        symbol.to_ascii_uppercase()
                    } else {
                        symbol
                    }
                })
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
