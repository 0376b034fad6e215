//! Battlefield topology and tile occupancy.
//!
//! The board is a fixed rectangular grid addressed by a flat [`TileIndex`]
//! (`row * width + col`). Tile kinds and owners never change after
//! construction; only occupancy mutates during play, and only through the
//! checked [`Board::place`] / [`Board::vacate`] pair so that a tile never holds
//! more than one minion.
use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::state::{MinionId, PlayerIndex};

/// Flat index of a tile on the board.
///
/// Hosts may send any integer; out-of-range values are rejected by
/// [`Board::contains`] rather than by panicking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TileIndex(pub i32);

impl TileIndex {
    pub const fn new(index: i32) -> Self {
        Self(index)
    }

    pub const fn get(self) -> i32 {
        self.0
    }
}

impl From<i32> for TileIndex {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl core::fmt::Display for TileIndex {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TileKind {
    Unpathable,
    Normal,
    /// Owned tile a player may spawn minions onto.
    Spawn,
    /// Owned tile representing a player's base.
    Base,
}

impl TileKind {
    /// Spawn and base tiles always belong to a player; the others never do.
    pub const fn requires_owner(self) -> bool {
        matches!(self, TileKind::Spawn | TileKind::Base)
    }
}

/// Static description of a tile used to build a board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileSpec {
    pub kind: TileKind,
    pub owner: Option<PlayerIndex>,
}

impl TileSpec {
    pub const NORMAL: Self = Self::new(TileKind::Normal, None);
    pub const UNPATHABLE: Self = Self::new(TileKind::Unpathable, None);

    pub const fn new(kind: TileKind, owner: Option<PlayerIndex>) -> Self {
        Self { kind, owner }
    }

    /// Parses a layout glyph.
    ///
    /// `S`/`B` are Player 1's spawn/base, `s`/`b` Player 2's, `.` is a normal
    /// tile and `#` is unpathable.
    pub const fn from_glyph(glyph: char) -> Option<Self> {
        let spec = match glyph {
            '.' => Self::NORMAL,
            '#' => Self::UNPATHABLE,
            'S' => Self::new(TileKind::Spawn, Some(PlayerIndex::Player1)),
            'B' => Self::new(TileKind::Base, Some(PlayerIndex::Player1)),
            's' => Self::new(TileKind::Spawn, Some(PlayerIndex::Player2)),
            'b' => Self::new(TileKind::Base, Some(PlayerIndex::Player2)),
            _ => return None,
        };
        Some(spec)
    }

    pub const fn glyph(&self) -> char {
        match (self.kind, self.owner) {
            (TileKind::Unpathable, _) => '#',
            (TileKind::Normal, _) => '.',
            (TileKind::Spawn, Some(PlayerIndex::Player2)) => 's',
            (TileKind::Spawn, _) => 'S',
            (TileKind::Base, Some(PlayerIndex::Player2)) => 'b',
            (TileKind::Base, _) => 'B',
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub index: TileIndex,
    pub kind: TileKind,
    pub owner: Option<PlayerIndex>,
    pub occupant: Option<MinionId>,
}

impl Tile {
    pub fn is_pathable(&self) -> bool {
        self.kind != TileKind::Unpathable
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    pub fn spec(&self) -> TileSpec {
        TileSpec::new(self.kind, self.owner)
    }
}

/// Reference layout: spawns and bases on the outer rows, two unpathable
/// pillars on rows 1 and 3.
pub const REFERENCE_LAYOUT: [&str; GameConfig::BOARD_HEIGHT] =
    ["S.B.S", ".#.#.", ".....", ".#.#.", "s.b.s"];

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoardError {
    #[error("board must have a non-zero width and at least one tile")]
    Empty,

    #[error("{len} tiles do not fill rows of width {width}")]
    Ragged { len: usize, width: usize },

    #[error("board with {len} tiles exceeds the addressable range")]
    TooLarge { len: usize },

    #[error("unknown glyph {glyph:?} at row {row}, column {col}")]
    UnknownGlyph { row: usize, col: usize, glyph: char },

    #[error("{kind} tile {tile} has no owner")]
    MissingOwner { tile: TileIndex, kind: TileKind },

    #[error("{kind} tile {tile} cannot have an owner")]
    UnexpectedOwner { tile: TileIndex, kind: TileKind },

    #[error("tile {0} is out of bounds")]
    OutOfBounds(TileIndex),

    #[error("tile {tile} is already occupied by {occupant}")]
    Occupied { tile: TileIndex, occupant: MinionId },

    #[error("tile {tile} does not hold {expected} (found {found:?})")]
    OccupantMismatch {
        tile: TileIndex,
        expected: MinionId,
        found: Option<MinionId>,
    },
}

/// Fixed-topology grid of tiles.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl Board {
    /// Builds the 5×5 reference battlefield.
    pub fn reference() -> Self {
        let specs = REFERENCE_LAYOUT
            .iter()
            .flat_map(|row| row.chars())
            .map(|glyph| TileSpec::from_glyph(glyph).unwrap_or(TileSpec::NORMAL));
        Self::build(GameConfig::BOARD_WIDTH, specs)
    }

    /// Builds a board from glyph rows (see [`TileSpec::from_glyph`]).
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, BoardError> {
        let width = rows.first().map(|row| row.as_ref().chars().count()).unwrap_or(0);
        let mut specs = Vec::with_capacity(width * rows.len());
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            if line.chars().count() != width {
                return Err(BoardError::Ragged {
                    len: specs.len() + line.chars().count(),
                    width,
                });
            }
            for (col, glyph) in line.chars().enumerate() {
                let spec = TileSpec::from_glyph(glyph)
                    .ok_or(BoardError::UnknownGlyph { row, col, glyph })?;
                specs.push(spec);
            }
        }
        Self::from_tiles(width, specs)
    }

    /// Builds a board from row-major tile specs.
    pub fn from_tiles(
        width: usize,
        specs: impl IntoIterator<Item = TileSpec>,
    ) -> Result<Self, BoardError> {
        let specs: Vec<TileSpec> = specs.into_iter().collect();
        if width == 0 || specs.is_empty() {
            return Err(BoardError::Empty);
        }
        if specs.len() % width != 0 {
            return Err(BoardError::Ragged {
                len: specs.len(),
                width,
            });
        }
        if i32::try_from(specs.len()).is_err() {
            return Err(BoardError::TooLarge { len: specs.len() });
        }
        for (index, spec) in specs.iter().enumerate() {
            let tile = TileIndex(index as i32);
            match (spec.kind.requires_owner(), spec.owner) {
                (true, None) => {
                    return Err(BoardError::MissingOwner {
                        tile,
                        kind: spec.kind,
                    });
                }
                (false, Some(_)) => {
                    return Err(BoardError::UnexpectedOwner {
                        tile,
                        kind: spec.kind,
                    });
                }
                _ => {}
            }
        }
        Ok(Self::build(width, specs))
    }

    fn build(width: usize, specs: impl IntoIterator<Item = TileSpec>) -> Self {
        let tiles: Vec<Tile> = specs
            .into_iter()
            .enumerate()
            .map(|(index, spec)| Tile {
                index: TileIndex(index as i32),
                kind: spec.kind,
                owner: spec.owner,
                occupant: None,
            })
            .collect();
        let height = tiles.len() / width;
        Self {
            width,
            height,
            tiles,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn contains(&self, index: TileIndex) -> bool {
        self.slot(index).is_some()
    }

    pub fn tile(&self, index: TileIndex) -> Option<&Tile> {
        self.slot(index).map(|slot| &self.tiles[slot])
    }

    pub fn occupant(&self, index: TileIndex) -> Option<MinionId> {
        self.tile(index).and_then(|tile| tile.occupant)
    }

    pub fn row_col(&self, index: TileIndex) -> Option<(usize, usize)> {
        self.slot(index)
            .map(|slot| (slot / self.width, slot % self.width))
    }

    fn index_at(&self, row: usize, col: usize) -> TileIndex {
        TileIndex((row * self.width + col) as i32)
    }

    fn slot(&self, index: TileIndex) -> Option<usize> {
        usize::try_from(index.0)
            .ok()
            .filter(|slot| *slot < self.tiles.len())
    }

    /// Orthogonal neighbours inside the grid, ordered up, down, left, right.
    ///
    /// Pathability and occupancy are not considered.
    pub fn adjacent(&self, index: TileIndex) -> ArrayVec<TileIndex, 4> {
        let mut neighbours = ArrayVec::new();
        let Some((row, col)) = self.row_col(index) else {
            return neighbours;
        };
        if row > 0 {
            neighbours.push(self.index_at(row - 1, col));
        }
        if row + 1 < self.height {
            neighbours.push(self.index_at(row + 1, col));
        }
        if col > 0 {
            neighbours.push(self.index_at(row, col - 1));
        }
        if col + 1 < self.width {
            neighbours.push(self.index_at(row, col + 1));
        }
        neighbours
    }

    pub fn manhattan(&self, from: TileIndex, to: TileIndex) -> Option<u32> {
        let (from_row, from_col) = self.row_col(from)?;
        let (to_row, to_col) = self.row_col(to)?;
        Some((from_row.abs_diff(to_row) + from_col.abs_diff(to_col)) as u32)
    }

    pub fn spawn_tiles(&self, player: PlayerIndex) -> impl Iterator<Item = TileIndex> + '_ {
        self.tiles
            .iter()
            .filter(move |tile| tile.kind == TileKind::Spawn && tile.owner == Some(player))
            .map(|tile| tile.index)
    }

    pub fn base_tile(&self, player: PlayerIndex) -> Option<TileIndex> {
        self.tiles
            .iter()
            .find(|tile| tile.kind == TileKind::Base && tile.owner == Some(player))
            .map(|tile| tile.index)
    }

    /// Renders one string per row using layout glyphs.
    pub fn layout_rows(&self) -> Vec<String> {
        self.tiles
            .chunks(self.width)
            .map(|row| row.iter().map(|tile| tile.spec().glyph()).collect())
            .collect()
    }

    pub(crate) fn place(&mut self, index: TileIndex, minion: MinionId) -> Result<(), BoardError> {
        let slot = self.slot(index).ok_or(BoardError::OutOfBounds(index))?;
        let tile = &mut self.tiles[slot];
        if let Some(occupant) = tile.occupant {
            return Err(BoardError::Occupied {
                tile: index,
                occupant,
            });
        }
        tile.occupant = Some(minion);
        Ok(())
    }

    pub(crate) fn vacate(&mut self, index: TileIndex, minion: MinionId) -> Result<(), BoardError> {
        let slot = self.slot(index).ok_or(BoardError::OutOfBounds(index))?;
        let tile = &mut self.tiles[slot];
        if tile.occupant != Some(minion) {
            return Err(BoardError::OccupantMismatch {
                tile: index,
                expected: minion,
                found: tile.occupant,
            });
        }
        tile.occupant = None;
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::reference()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(index: i32) -> TileIndex {
        TileIndex(index)
    }

    #[test]
    fn reference_layout_matches_expected_kinds() {
        let board = Board::reference();
        assert_eq!(board.len(), 25);
        assert_eq!((board.width(), board.height()), (5, 5));

        let spawns_p1: Vec<_> = board.spawn_tiles(PlayerIndex::Player1).collect();
        let spawns_p2: Vec<_> = board.spawn_tiles(PlayerIndex::Player2).collect();
        assert_eq!(spawns_p1, vec![t(0), t(4)]);
        assert_eq!(spawns_p2, vec![t(20), t(24)]);
        assert_eq!(board.base_tile(PlayerIndex::Player1), Some(t(2)));
        assert_eq!(board.base_tile(PlayerIndex::Player2), Some(t(22)));

        for blocked in [6, 8, 16, 18] {
            assert_eq!(board.tile(t(blocked)).map(|tile| tile.kind), Some(TileKind::Unpathable));
        }
        assert_eq!(board.layout_rows(), REFERENCE_LAYOUT.to_vec());
    }

    #[test]
    fn adjacency_is_ordered_and_clipped() {
        let board = Board::reference();
        assert_eq!(board.adjacent(t(0)).as_slice(), &[t(5), t(1)]);
        assert_eq!(board.adjacent(t(12)).as_slice(), &[t(7), t(17), t(11), t(13)]);
        assert_eq!(board.adjacent(t(24)).as_slice(), &[t(19), t(23)]);
        assert_eq!(board.adjacent(t(9)).as_slice(), &[t(4), t(14), t(8)]);
        assert!(board.adjacent(t(-1)).is_empty());
        assert!(board.adjacent(t(25)).is_empty());
    }

    #[test]
    fn adjacency_is_symmetric() {
        let board = Board::reference();
        for tile in board.iter() {
            for neighbour in board.adjacent(tile.index) {
                assert!(board.adjacent(neighbour).contains(&tile.index));
                assert_eq!(board.manhattan(tile.index, neighbour), Some(1));
            }
        }
    }

    #[test]
    fn out_of_range_indices_are_rejected() {
        let board = Board::reference();
        assert!(!board.contains(t(-3)));
        assert!(!board.contains(t(25)));
        assert!(board.tile(t(i32::MAX)).is_none());
        assert_eq!(board.manhattan(t(0), t(99)), None);
    }

    #[test]
    fn place_and_vacate_are_checked() {
        let mut board = Board::reference();
        let a = MinionId(1);
        let b = MinionId(2);

        board.place(t(3), a).unwrap();
        assert_eq!(board.occupant(t(3)), Some(a));
        assert_eq!(
            board.place(t(3), b),
            Err(BoardError::Occupied {
                tile: t(3),
                occupant: a
            })
        );
        assert!(matches!(
            board.vacate(t(3), b),
            Err(BoardError::OccupantMismatch { .. })
        ));
        board.vacate(t(3), a).unwrap();
        assert_eq!(board.occupant(t(3)), None);
        assert_eq!(board.place(t(40), a), Err(BoardError::OutOfBounds(t(40))));
    }

    #[test]
    fn from_rows_validates_layout() {
        assert_eq!(Board::from_rows(&REFERENCE_LAYOUT).unwrap(), Board::reference());
        assert!(matches!(
            Board::from_rows(&["S.", "..x"]),
            Err(BoardError::Ragged { .. })
        ));
        assert_eq!(
            Board::from_rows(&["S.", ".?"]),
            Err(BoardError::UnknownGlyph {
                row: 1,
                col: 1,
                glyph: '?'
            })
        );
        assert!(matches!(Board::from_rows::<&str>(&[]), Err(BoardError::Empty)));
    }

    #[test]
    fn from_tiles_checks_ownership() {
        let missing = Board::from_tiles(2, [TileSpec::new(TileKind::Spawn, None), TileSpec::NORMAL]);
        assert!(matches!(missing, Err(BoardError::MissingOwner { .. })));

        let unexpected = Board::from_tiles(
            2,
            [TileSpec::new(TileKind::Normal, Some(PlayerIndex::Player1)), TileSpec::NORMAL],
        );
        assert!(matches!(unexpected, Err(BoardError::UnexpectedOwner { .. })));
    }

    #[test]
    fn glyphs_round_trip() {
        for glyph in ['.', '#', 'S', 'B', 's', 'b'] {
            assert_eq!(TileSpec::from_glyph(glyph).map(|spec| spec.glyph()), Some(glyph));
        }
        assert_eq!(TileSpec::from_glyph('x'), None);
    }
}
