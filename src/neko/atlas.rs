use super::state::{Direction, Sprite};

/// Edge length of one sprite tile in pixels.
pub const TILE_SIZE: u32 = 32;
/// Sheet layout in tiles.
pub const SHEET_COLUMNS: u32 = 8;
pub const SHEET_ROWS: u32 = 4;

/// Tile coordinate as a background offset: `(0, 0)` is the top-left tile and
/// values grow negative to the right and down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub x: i32,
    pub y: i32,
}

impl Tile {
    const fn at(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset of the tile in sheet pixels (same sign convention as the tile).
    pub fn pixel_offset(self) -> [i32; 2] {
        [self.x * TILE_SIZE as i32, self.y * TILE_SIZE as i32]
    }

    /// Column/row of the tile in the sheet grid.
    pub fn cell(self) -> [u32; 2] {
        [self.x.unsigned_abs(), self.y.unsigned_abs()]
    }
}

const IDLE: &[Tile] = &[Tile::at(-3, -3)];
const ALERT: &[Tile] = &[Tile::at(-7, -3)];
const TIRED: &[Tile] = &[Tile::at(-3, -2)];
const SLEEPING: &[Tile] = &[Tile::at(-2, 0), Tile::at(-2, -1)];
const SCRATCH_SELF: &[Tile] = &[Tile::at(-5, 0), Tile::at(-6, 0), Tile::at(-7, 0)];
const SCRATCH_WALL_N: &[Tile] = &[Tile::at(0, 0), Tile::at(0, -1)];
const SCRATCH_WALL_S: &[Tile] = &[Tile::at(-7, -1), Tile::at(-6, -2)];
const SCRATCH_WALL_E: &[Tile] = &[Tile::at(-2, -2), Tile::at(-2, -3)];
const SCRATCH_WALL_W: &[Tile] = &[Tile::at(-4, 0), Tile::at(-4, -1)];

const WALK_N: &[Tile] = &[Tile::at(-1, -2), Tile::at(-1, -3)];
const WALK_NE: &[Tile] = &[Tile::at(0, -2), Tile::at(0, -3)];
const WALK_E: &[Tile] = &[Tile::at(-3, 0), Tile::at(-3, -1)];
const WALK_SE: &[Tile] = &[Tile::at(-5, -1), Tile::at(-5, -2)];
const WALK_S: &[Tile] = &[Tile::at(-6, -3), Tile::at(-7, -2)];
const WALK_SW: &[Tile] = &[Tile::at(-5, -3), Tile::at(-6, -1)];
const WALK_W: &[Tile] = &[Tile::at(-4, -2), Tile::at(-4, -3)];
const WALK_NW: &[Tile] = &[Tile::at(-1, 0), Tile::at(-1, -1)];

/// All frames of a sprite, in playback order. Never empty.
pub fn frames(sprite: Sprite) -> &'static [Tile] {
    match sprite {
        Sprite::Idle => IDLE,
        Sprite::Alert => ALERT,
        Sprite::Tired => TIRED,
        Sprite::Sleeping => SLEEPING,
        Sprite::ScratchSelf => SCRATCH_SELF,
        Sprite::ScratchWallN => SCRATCH_WALL_N,
        Sprite::ScratchWallS => SCRATCH_WALL_S,
        Sprite::ScratchWallE => SCRATCH_WALL_E,
        Sprite::ScratchWallW => SCRATCH_WALL_W,
        Sprite::Walk(dir) => match dir {
            Direction::N => WALK_N,
            Direction::NE => WALK_NE,
            Direction::E => WALK_E,
            Direction::SE => WALK_SE,
            Direction::S => WALK_S,
            Direction::SW => WALK_SW,
            Direction::W => WALK_W,
            Direction::NW => WALK_NW,
        },
    }
}

/// Tile for a running frame counter, wrapped by the sprite's frame count.
pub fn tile(sprite: Sprite, frame: u64) -> Tile {
    let set = frames(sprite);
    set[(frame % set.len() as u64) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_sprites() -> Vec<Sprite> {
        let mut sprites = vec![
            Sprite::Idle,
            Sprite::Alert,
            Sprite::Tired,
            Sprite::Sleeping,
            Sprite::ScratchSelf,
            Sprite::ScratchWallN,
            Sprite::ScratchWallS,
            Sprite::ScratchWallE,
            Sprite::ScratchWallW,
        ];
        sprites.extend(Direction::ALL.iter().map(|&d| Sprite::Walk(d)));
        sprites
    }

    #[test]
    fn every_tile_fits_the_sheet() {
        for sprite in all_sprites() {
            let set = frames(sprite);
            assert!(!set.is_empty() && set.len() <= 3, "{sprite:?}");
            for tile in set {
                let [col, row] = tile.cell();
                assert!(tile.x <= 0 && tile.y <= 0, "{sprite:?}");
                assert!(col < SHEET_COLUMNS && row < SHEET_ROWS, "{sprite:?}");
            }
        }
    }

    #[test]
    fn frame_counter_wraps() {
        let walk = Sprite::Walk(Direction::E);
        assert_eq!(tile(walk, 0), Tile::at(-3, 0));
        assert_eq!(tile(walk, 1), Tile::at(-3, -1));
        assert_eq!(tile(walk, 2), Tile::at(-3, 0));
        assert_eq!(tile(Sprite::ScratchSelf, 5), Tile::at(-7, 0));
        assert_eq!(tile(Sprite::Idle, 12345), Tile::at(-3, -3));
    }

    #[test]
    fn pixel_offsets_scale_by_tile_size() {
        assert_eq!(Tile::at(-7, -3).pixel_offset(), [-224, -96]);
        assert_eq!(Tile::at(0, 0).pixel_offset(), [0, 0]);
        assert_eq!(Tile::at(-7, -3).cell(), [7, 3]);
    }
}
