/// Size of one encoded sample in bytes (one RGBA8 texel).
pub const CELL_BYTES: usize = 4;

/// Coordinate value reserved for the pen-up marker.
pub const PEN_UP_COORD: u16 = u16::MAX;

/// One 4-byte slot of the point grid: `(x_lo, x_hi, y_lo, y_hi)`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Cell(pub [u8; CELL_BYTES]);

/// Decoded content of a cell.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Sample {
    Point { x: u16, y: u16 },
    /// End of stroke. Unwritten cells also decode to this, since the grid is
    /// initialised with `0xFF` bytes.
    PenUp,
}

impl Cell {
    /// Fill value of a fresh grid.
    pub const EMPTY: Cell = Cell([0xFF; CELL_BYTES]);

    /// Stroke terminator `(65535, 65535)`.
    pub const PEN_UP: Cell = Cell::encode(PEN_UP_COORD, PEN_UP_COORD);

    #[inline]
    pub const fn encode(x: u16, y: u16) -> Self {
        let [x_lo, x_hi] = x.to_le_bytes();
        let [y_lo, y_hi] = y.to_le_bytes();
        Cell([x_lo, x_hi, y_lo, y_hi])
    }

    #[inline]
    pub const fn x(self) -> u16 {
        u16::from_le_bytes([self.0[0], self.0[1]])
    }

    #[inline]
    pub const fn y(self) -> u16 {
        u16::from_le_bytes([self.0[2], self.0[3]])
    }

    #[inline]
    pub fn is_pen_up(self) -> bool {
        self.x() == PEN_UP_COORD && self.y() == PEN_UP_COORD
    }

    pub fn decode(self) -> Sample {
        if self.is_pen_up() {
            Sample::PenUp
        } else {
            Sample::Point { x: self.x(), y: self.y() }
        }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; CELL_BYTES] {
        &self.0
    }
}

/// Truncates toward zero, then reduces modulo `65536`, keeping the sign.
///
/// Non-finite input maps to `0`.
#[inline]
pub fn wrap_coord(v: f32) -> i32 {
    if !v.is_finite() {
        return 0;
    }
    ((v as i64) % (1 << 16)) as i32
}

impl Cell {
    /// Packs a pair produced by [`wrap_coord`].
    ///
    /// Each byte keeps only its low eight bits of `v % 256` and `v / 256`, so
    /// a negative remainder lands in range without reaching the top
    /// (`-1` → `255`). A real sample never encodes as [`Cell::PEN_UP`]: a pair
    /// that would is written as `(65535, 65534)`.
    pub fn from_coords(x: i32, y: i32) -> Self {
        let cell = Cell([low_byte(x), high_byte(x), low_byte(y), high_byte(y)]);
        if cell.is_pen_up() {
            Cell::encode(PEN_UP_COORD, PEN_UP_COORD - 1)
        } else {
            cell
        }
    }
}

#[inline]
const fn low_byte(v: i32) -> u8 {
    (v % 256) as u8
}

#[inline]
const fn high_byte(v: i32) -> u8 {
    (v / 256) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_splits_low_high_bytes() {
        let c = Cell::encode(0x1234, 0xABCD);
        assert_eq!(c.0, [0x34, 0x12, 0xCD, 0xAB]);
    }

    #[test]
    fn decode_recovers_coordinates_across_range() {
        for &(x, y) in &[(0, 0), (1, 255), (256, 257), (40_000, 12), (65_534, 65_535), (65_535, 0)] {
            assert_eq!(Cell::encode(x, y).decode(), Sample::Point { x, y });
        }
    }

    #[test]
    fn pen_up_requires_both_components() {
        assert_eq!(Cell::PEN_UP.decode(), Sample::PenUp);
        assert!(!Cell::encode(65_535, 0).is_pen_up());
        assert!(!Cell::encode(0, 65_535).is_pen_up());
    }

    #[test]
    fn empty_cells_read_as_pen_up() {
        assert_eq!(Cell::EMPTY, Cell::PEN_UP);
    }

    #[test]
    fn wrap_truncates_and_keeps_sign() {
        assert_eq!(wrap_coord(12.9), 12);
        assert_eq!(wrap_coord(65_535.0), 65_535);
        assert_eq!(wrap_coord(65_536.0), 0);
        assert_eq!(wrap_coord(65_600.0), 64);
        assert_eq!(wrap_coord(-1.5), -1);
        assert_eq!(wrap_coord(-0.5), 0);
        assert_eq!(wrap_coord(-65_537.0), -1);
        assert_eq!(wrap_coord(f32::NAN), 0);
    }

    #[test]
    fn wrapped_coordinate_bytes() {
        let c = Cell::from_coords(wrap_coord(65_600.0), 0);
        assert_eq!(c.0, [64, 0, 0, 0]);
    }

    // ── negative coordinates ──────────────────────────────────────────────

    #[test]
    fn small_negatives_wrap_bytewise() {
        assert_eq!(Cell::from_coords(-1, -1).0, [255, 0, 255, 0]);
        assert_eq!(Cell::from_coords(-1, -1).decode(), Sample::Point { x: 255, y: 255 });
        // -300 % 256 = -44, -300 / 256 = -1
        assert_eq!(Cell::from_coords(-300, 5).0, [212, 255, 5, 0]);
    }

    #[test]
    fn samples_never_collide_with_pen_up() {
        for v in [-257, 65_535] {
            let c = Cell::from_coords(v, v);
            assert!(!c.is_pen_up(), "{v} encoded as pen-up");
            assert_eq!(c.decode(), Sample::Point { x: 65_535, y: 65_534 });
        }
        for x in -600..=0 {
            assert!(!Cell::from_coords(x, x).is_pen_up(), "{x}");
        }
    }
}
