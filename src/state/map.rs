use thiserror::Error;

use crate::infra::Position;
use crate::infra::protocol::ArenaCell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    Free,
    /// Holds a robot. Enterable only as the final cell of a route.
    Occupied,
    Blocked,
}

impl CellKind {
    pub fn from_wire(kind: i64) -> Option<Self> {
        match kind {
            0 => Some(CellKind::Free),
            1 => Some(CellKind::Occupied),
            2 => Some(CellKind::Blocked),
            _ => None,
        }
    }

    fn symbol(self) -> char {
        match self {
            CellKind::Free => '.',
            CellKind::Occupied => 'R',
            CellKind::Blocked => '#',
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("arena snapshot is empty")]
    Empty,
    #[error("arena column {column} has {found} cells, expected {expected}")]
    NonUniformColumns {
        column: usize,
        expected: usize,
        found: usize,
    },
    #[error("cell {position} has unknown type {kind}")]
    UnknownCellType { position: Position, kind: i64 },
    #[error("cell stored at {expected} reports coordinates {found}")]
    MisplacedCell { expected: Position, found: Position },
    #[error("expected {expected} cells, got {found}")]
    CellCountMismatch { expected: usize, found: usize },
    #[error("unknown map symbol {symbol:?} at {position}")]
    UnknownSymbol { position: Position, symbol: char },
    #[error("arena of {width}x{height} cells is too large")]
    TooLarge { width: usize, height: usize },
}

/// Cell count of a `width` x `height` grid, if every index fits in `i32`.
fn cell_count(width: usize, height: usize) -> Result<usize, GridError> {
    if width == 0 || height == 0 {
        return Err(GridError::Empty);
    }
    width
        .checked_mul(height)
        .filter(|count| i32::try_from(*count).is_ok())
        .ok_or(GridError::TooLarge { width, height })
}

/// Immutable snapshot of the arena for one turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Map {
    width: i32,
    height: i32,
    // Row-major: index = y * width + x
    cells: Vec<CellKind>,
}

impl Map {
    /// Builds the map from the server's `arena[x][y]` snapshot.
    pub fn from_snapshot(columns: &[Vec<ArenaCell>]) -> Result<Self, GridError> {
        let width = columns.len();
        let height = columns.first().map_or(0, |column| column.len());
        let mut cells = vec![CellKind::Free; cell_count(width, height)?];
        for (x, column) in columns.iter().enumerate() {
            if column.len() != height {
                return Err(GridError::NonUniformColumns {
                    column: x,
                    expected: height,
                    found: column.len(),
                });
            }

            for (y, cell) in column.iter().enumerate() {
                let expected = Position::new(x as i32, y as i32);
                let found = Position::new(cell.x, cell.y);
                if expected != found {
                    return Err(GridError::MisplacedCell { expected, found });
                }

                cells[y * width + x] = CellKind::from_wire(cell.kind).ok_or(
                    GridError::UnknownCellType {
                        position: expected,
                        kind: cell.kind,
                    },
                )?;
            }
        }

        tracing::trace!(width, height, "Arena snapshot parsed");
        Ok(Self {
            width: width as i32,
            height: height as i32,
            cells,
        })
    }

    /// Builds the map from row-major cells.
    pub fn from_cells(width: i32, height: i32, cells: Vec<CellKind>) -> Result<Self, GridError> {
        let expected = cell_count(width.max(0) as usize, height.max(0) as usize)?;
        if cells.len() != expected {
            return Err(GridError::CellCountMismatch {
                expected,
                found: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Parses `.` free, `#` blocked and `R` occupied; one line per row.
    pub fn from_ascii(text: &str) -> Result<Self, GridError> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let width = rows.first().map_or(0, |row| row.chars().count());

        let mut cells = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(GridError::NonUniformColumns {
                    column: y,
                    expected: width,
                    found,
                });
            }
            for (x, symbol) in row.chars().enumerate() {
                let kind = match symbol {
                    '.' => CellKind::Free,
                    '#' => CellKind::Blocked,
                    'R' => CellKind::Occupied,
                    _ => {
                        return Err(GridError::UnknownSymbol {
                            position: Position::new(x as i32, y as i32),
                            symbol,
                        });
                    }
                };
                cells.push(kind);
            }
        }

        Self::from_cells(width as i32, rows.len() as i32, cells)
    }

    /// An arena with every cell free.
    pub fn open(width: i32, height: i32) -> Result<Self, GridError> {
        let count = cell_count(width.max(0) as usize, height.max(0) as usize)?;
        Self::from_cells(width, height, vec![CellKind::Free; count])
    }

    /// Returns the map with one cell reclassified. Out-of-bounds positions are ignored.
    pub fn with_cell(mut self, pos: Position, kind: CellKind) -> Self {
        if let Some(index) = self.index(pos) {
            self.cells[index] = kind;
        }
        self
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    pub fn index(&self, pos: Position) -> Option<usize> {
        self.in_bounds(pos)
            .then(|| (pos.y * self.width + pos.x) as usize)
    }

    pub fn cell(&self, pos: Position) -> Option<CellKind> {
        self.index(pos).map(|index| self.cells[index])
    }

    /// True only for in-bounds free cells.
    pub fn is_passable(&self, pos: Position) -> bool {
        self.cell(pos) == Some(CellKind::Free)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, CellKind)> + '_ {
        self.cells.iter().enumerate().map(|(index, kind)| {
            let index = index as i32;
            (Position::new(index % self.width, index / self.width), *kind)
        })
    }

    /// Renders one line per row, marking `path` cells with `*`.
    pub fn draw_ascii(&self, path: &[Position]) -> String {
        let mut output = String::with_capacity(self.cells.len() + self.height as usize);
        for y in 0..self.height {
            for x in 0..self.width {
                let pos = Position::new(x, y);
                let symbol = match self.cell(pos) {
                    Some(CellKind::Free) if path.contains(&pos) => '*',
                    Some(kind) => kind.symbol(),
                    None => '?',
                };
                output.push(symbol);
            }
            output.push('\n');
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn cell(kind: i64, x: i32, y: i32) -> ArenaCell {
        ArenaCell {
            kind,
            x,
            y,
            robot: None,
        }
    }

    #[test]
    fn test_reference_arena_parses() {
        let map = Map::from_snapshot(&fixtures::reference_arena()).unwrap();
        assert_eq!(map.width(), 10);
        assert_eq!(map.height(), 10);
        assert_eq!(map.cell(Position::new(0, 0)), Some(CellKind::Occupied));
        assert_eq!(map.cell(Position::new(9, 9)), Some(CellKind::Occupied));
        assert_eq!(map.cell(Position::new(3, 2)), Some(CellKind::Blocked));
        assert_eq!(map.cell(Position::new(6, 7)), Some(CellKind::Blocked));
        assert_eq!(map.cell(Position::new(7, 6)), Some(CellKind::Free));
        assert_eq!(map.iter().filter(|(_, k)| *k == CellKind::Blocked).count(), 6);
    }

    #[test]
    fn test_snapshot_is_indexed_by_column() {
        // Two columns, three rows; the obstacle lives at x=1, y=2.
        let columns = vec![
            vec![cell(0, 0, 0), cell(0, 0, 1), cell(0, 0, 2)],
            vec![cell(0, 1, 0), cell(0, 1, 1), cell(2, 1, 2)],
        ];
        let map = Map::from_snapshot(&columns).unwrap();
        assert_eq!(map.width(), 2);
        assert_eq!(map.height(), 3);
        assert!(!map.is_passable(Position::new(1, 2)));
        assert!(map.is_passable(Position::new(0, 2)));
    }

    #[test]
    fn test_snapshot_rejects_ragged_columns() {
        let columns = vec![
            vec![cell(0, 0, 0), cell(0, 0, 1)],
            vec![cell(0, 1, 0)],
        ];
        assert_eq!(
            Map::from_snapshot(&columns),
            Err(GridError::NonUniformColumns {
                column: 1,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_snapshot_rejects_unknown_type() {
        let columns = vec![vec![cell(0, 0, 0), cell(5, 0, 1)]];
        assert_eq!(
            Map::from_snapshot(&columns),
            Err(GridError::UnknownCellType {
                position: Position::new(0, 1),
                kind: 5
            })
        );
    }

    #[test]
    fn test_snapshot_rejects_misplaced_cell() {
        let columns = vec![vec![cell(0, 0, 0), cell(0, 1, 0)]];
        assert!(matches!(
            Map::from_snapshot(&columns),
            Err(GridError::MisplacedCell { .. })
        ));
    }

    #[test]
    fn test_snapshot_rejects_empty() {
        assert_eq!(Map::from_snapshot(&[]), Err(GridError::Empty));
        assert_eq!(Map::from_snapshot(&[Vec::new()]), Err(GridError::Empty));
    }

    #[test]
    fn test_from_cells_checks_length() {
        assert_eq!(
            Map::from_cells(2, 2, vec![CellKind::Free; 3]),
            Err(GridError::CellCountMismatch {
                expected: 4,
                found: 3
            })
        );
        assert_eq!(Map::from_cells(0, 3, Vec::new()), Err(GridError::Empty));
    }

    #[test]
    fn test_rejects_dimensions_beyond_index_range() {
        assert_eq!(
            Map::open(i32::MAX, 2),
            Err(GridError::TooLarge {
                width: i32::MAX as usize,
                height: 2
            })
        );
        assert_eq!(
            Map::from_cells(65_536, 65_536, Vec::new()),
            Err(GridError::TooLarge {
                width: 65_536,
                height: 65_536
            })
        );
        assert_eq!(Map::open(-4, 3), Err(GridError::Empty));
        assert_eq!(Map::open(46_340, 1).map(|map| map.len()), Ok(46_340));
    }

    #[test]
    fn test_passability_and_bounds() {
        let map = Map::from_ascii(
            "
            .#
            R.
            ",
        )
        .unwrap();
        assert!(map.is_passable(Position::new(0, 0)));
        assert!(!map.is_passable(Position::new(1, 0)));
        assert!(!map.is_passable(Position::new(0, 1)));
        assert!(!map.is_passable(Position::new(-1, 0)));
        assert!(!map.in_bounds(Position::new(2, 0)));
        assert!(!map.in_bounds(Position::new(0, 2)));
        assert_eq!(map.cell(Position::new(5, 5)), None);
    }

    #[test]
    fn test_ascii_rejects_unknown_symbol() {
        assert_eq!(
            Map::from_ascii("..\n.x"),
            Err(GridError::UnknownSymbol {
                position: Position::new(1, 1),
                symbol: 'x'
            })
        );
    }

    #[test]
    fn test_draw_ascii_marks_path() {
        let map = Map::open(3, 2).unwrap().with_cell(Position::new(2, 0), CellKind::Blocked);
        let drawing = map.draw_ascii(&[Position::new(0, 0), Position::new(0, 1)]);
        assert_eq!(drawing, "*.#\n*..\n");
        assert_eq!(Map::from_ascii(&map.draw_ascii(&[])).unwrap(), map);
    }
}
