//! # Traversal Module
//!
//! The tile-chain walk that decides where a move in a given direction lands.
//!
//! Starting from an origin tile the scan steps one cell at a time. Each newly
//! visited tile is compared against the tile visited just before it (the
//! origin for the first step). The first such pair that shares a colour ends
//! the scan and the later tile of the pair is the destination. Leaving the
//! grid or meeting an occupied tile ends the scan with no destination.

use crate::game::{Direction, Grid, Tile};
use log::{debug, trace};

/// Finds the next colour-matching tile from `origin` heading in `direction`.
///
/// Returns `None` when the scan runs off the grid or is blocked by an
/// occupied tile before a match is found. The blocking tile itself is never
/// returned. The origin's own occupancy is not inspected.
///
/// The scan visits at most `max(width, height)` tiles and allocates nothing.
///
/// # Examples
///
/// ```
/// use huepath::{next_tile_in_direction, Colour, Direction, Grid};
///
/// let grid = Grid::from_colours(vec![vec![
///     Colour::Red,
///     Colour::Blue,
///     Colour::Green,
///     Colour::Green,
/// ]])
/// .unwrap();
/// let origin = grid.get_tile_at(0, 0).unwrap();
///
/// // red -> blue -> green -> green: the two greens end the scan
/// let destination = next_tile_in_direction(&grid, origin, Direction::Right).unwrap();
/// assert_eq!((destination.x(), destination.y()), (3, 0));
///
/// // nothing to the left of the first column
/// assert!(next_tile_in_direction(&grid, origin, Direction::Left).is_none());
/// ```
pub fn next_tile_in_direction<'g>(
    grid: &'g Grid,
    origin: &Tile,
    direction: Direction,
) -> Option<&'g Tile> {
    let mut cursor = origin.position();
    let mut reference = origin;

    loop {
        cursor = cursor.step(direction);

        let next = match grid.get_tile(cursor) {
            Some(tile) => tile,
            None => {
                trace!(
                    "scan from {} {:?} left the grid at {}",
                    origin.position(),
                    direction,
                    cursor
                );
                return None;
            }
        };

        if next.is_occupied() {
            trace!(
                "scan from {} {:?} blocked at {}",
                origin.position(),
                direction,
                cursor
            );
            return None;
        }

        if next.shares_colour_with(reference) {
            debug!(
                "scan from {} {:?} matched {:?} at {}",
                origin.position(),
                direction,
                next.colour(),
                next.position()
            );
            return Some(next);
        }

        reference = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Colour, Position};
    use proptest::prelude::*;

    /// 5x5 of red with a single blue tile at (3, 2).
    fn grid_with_blue_at_three_two() -> Grid {
        let mut rows = vec![vec![Colour::Red; 5]; 5];
        rows[2][3] = Colour::Blue;
        Grid::from_colours(rows).unwrap()
    }

    #[test]
    fn test_adjacent_same_colour_matches_first_step() {
        let grid = grid_with_blue_at_three_two();
        let origin = grid.get_tile_at(0, 2).unwrap();

        let result = next_tile_in_direction(&grid, origin, Direction::Right).unwrap();
        assert_eq!(result.position(), Position::new(1, 2));
    }

    #[test]
    fn test_reference_advances_through_mismatches_to_edge() {
        let grid = grid_with_blue_at_three_two();
        let origin = grid.get_tile_at(2, 2).unwrap();

        // (3,2) blue vs red, (4,2) red vs blue, then off the grid
        assert!(next_tile_in_direction(&grid, origin, Direction::Right).is_none());
    }

    #[test]
    fn test_first_step_out_of_bounds() {
        let grid = Grid::filled(3, 3, Colour::Green).unwrap();

        let top_left = grid.get_tile_at(0, 0).unwrap();
        assert!(next_tile_in_direction(&grid, top_left, Direction::Up).is_none());
        assert!(next_tile_in_direction(&grid, top_left, Direction::Left).is_none());

        let bottom_right = grid.get_tile_at(2, 2).unwrap();
        assert!(next_tile_in_direction(&grid, bottom_right, Direction::Down).is_none());
        assert!(next_tile_in_direction(&grid, bottom_right, Direction::Right).is_none());
    }

    #[test]
    fn test_occupied_tile_blocks_regardless_of_colour() {
        let mut grid = Grid::filled(5, 1, Colour::Red).unwrap();
        if let Some(tile) = grid.get_tile_at_mut(1, 0) {
            tile.set_occupied(true);
        }
        let origin = grid.get_tile_at(0, 0).unwrap();

        assert!(next_tile_in_direction(&grid, origin, Direction::Right).is_none());
    }

    #[test]
    fn test_occupied_tile_mid_scan_blocks() {
        let mut grid = Grid::from_colours(vec![vec![
            Colour::Red,
            Colour::Blue,
            Colour::Green,
            Colour::Green,
        ]])
        .unwrap();
        if let Some(tile) = grid.get_tile_at_mut(2, 0) {
            tile.set_occupied(true);
        }
        let origin = grid.get_tile_at(0, 0).unwrap();

        assert!(next_tile_in_direction(&grid, origin, Direction::Right).is_none());
    }

    #[test]
    fn test_occupied_origin_does_not_block() {
        let mut grid = Grid::filled(3, 1, Colour::Yellow).unwrap();
        if let Some(tile) = grid.get_tile_at_mut(0, 0) {
            tile.set_occupied(true);
        }
        let origin = grid.get_tile_at(0, 0).unwrap();

        let result = next_tile_in_direction(&grid, origin, Direction::Right).unwrap();
        assert_eq!(result.position(), Position::new(1, 0));
    }

    #[test]
    fn test_vertical_scans() {
        let grid = Grid::from_colours(vec![
            vec![Colour::Blue],
            vec![Colour::Blue],
            vec![Colour::Red],
            vec![Colour::Green],
            vec![Colour::Green],
        ])
        .unwrap();

        let top = grid.get_tile_at(0, 0).unwrap();
        let down = next_tile_in_direction(&grid, top, Direction::Down).unwrap();
        assert_eq!(down.position(), Position::new(0, 1));

        let middle = grid.get_tile_at(0, 2).unwrap();
        let down = next_tile_in_direction(&grid, middle, Direction::Down).unwrap();
        assert_eq!(down.position(), Position::new(0, 4));

        let up = next_tile_in_direction(&grid, middle, Direction::Up).unwrap();
        assert_eq!(up.position(), Position::new(0, 0));
    }

    #[test]
    fn test_alternating_colours_never_match() {
        let row = (0..8)
            .map(|x| if x % 2 == 0 { Colour::Red } else { Colour::Blue })
            .collect();
        let grid = Grid::from_colours(vec![row]).unwrap();
        let origin = grid.get_tile_at(0, 0).unwrap();

        assert!(next_tile_in_direction(&grid, origin, Direction::Right).is_none());
    }

    #[test]
    fn test_origin_outside_grid_uses_its_own_colour() {
        let grid = Grid::filled(3, 1, Colour::Purple).unwrap();
        let detached = Tile::new(-1, 0, Colour::Purple);

        let result = next_tile_in_direction(&grid, &detached, Direction::Right).unwrap();
        assert_eq!(result.position(), Position::new(0, 0));
    }

    fn arbitrary_board() -> impl Strategy<Value = (Vec<Vec<(u8, bool)>>, usize, usize, u8)> {
        (1usize..8, 1usize..8).prop_flat_map(|(width, height)| {
            (
                prop::collection::vec(
                    prop::collection::vec((0u8..3, prop::bool::weighted(0.2)), width),
                    height,
                ),
                0..width,
                0..height,
                0u8..4,
            )
        })
    }

    proptest! {
        #[test]
        fn prop_scan_terminates_with_consistent_result(
            (cells, origin_x, origin_y, direction_index) in arbitrary_board()
        ) {
            let palette = [Colour::Red, Colour::Green, Colour::Blue];
            let mut grid = Grid::from_colours(
                cells
                    .iter()
                    .map(|row| row.iter().map(|(c, _)| palette[*c as usize]).collect())
                    .collect(),
            )
            .unwrap();
            for (y, row) in cells.iter().enumerate() {
                for (x, (_, occupied)) in row.iter().enumerate() {
                    if let Some(tile) = grid.get_tile_at_mut(x as i32, y as i32) {
                        tile.set_occupied(*occupied);
                    }
                }
            }
            let direction = Direction::all()[direction_index as usize];
            let origin = grid.get_tile_at(origin_x as i32, origin_y as i32).unwrap();

            let result = next_tile_in_direction(&grid, origin, direction);

            // Replay the scan and check every visited tile against the result.
            let mut previous = origin;
            let mut cursor = origin.position();
            loop {
                cursor = cursor.step(direction);
                match grid.get_tile(cursor) {
                    None => {
                        prop_assert!(result.is_none());
                        break;
                    }
                    Some(tile) if tile.is_occupied() => {
                        prop_assert!(result.is_none());
                        break;
                    }
                    Some(tile) if tile.shares_colour_with(previous) => {
                        prop_assert_eq!(result, Some(tile));
                        break;
                    }
                    Some(tile) => previous = tile,
                }
            }
        }
    }
}
