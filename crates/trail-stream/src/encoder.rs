use crate::cell::{wrap_coord, Cell, Sample, CELL_BYTES, PEN_UP_COORD};
use crate::config::EncoderConfig;
use crate::error::ConfigError;

// ── point buffer ──────────────────────────────────────────────────────────

/// Row-major `R × R` grid of cells, backed by the exact bytes uploaded to the
/// points texture.
#[derive(Debug, Clone)]
pub struct PointBuffer {
    resolution: u32,
    bytes: Vec<u8>,
}

impl PointBuffer {
    /// Allocates a grid filled with `0xFF` (every cell reads as pen-up).
    pub fn new(resolution: u32) -> Self {
        let cells = (resolution * resolution) as usize;
        Self {
            resolution,
            bytes: vec![0xFF; cells * CELL_BYTES],
        }
    }

    #[inline]
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    #[inline]
    pub fn capacity(&self) -> u32 {
        self.resolution * self.resolution
    }

    /// Raw RGBA8 bytes, `4 * R` bytes per row.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Grid position `(column, row)` of cell `index`.
    #[inline]
    pub fn position(&self, index: u32) -> (u32, u32) {
        (index % self.resolution, index / self.resolution)
    }

    pub fn cell(&self, index: u32) -> Option<Cell> {
        let start = index as usize * CELL_BYTES;
        let raw = self.bytes.get(start..start + CELL_BYTES)?;
        let mut out = [0u8; CELL_BYTES];
        out.copy_from_slice(raw);
        Some(Cell(out))
    }

    fn write(&mut self, index: u32, cell: Cell) {
        let start = index as usize * CELL_BYTES;
        self.bytes[start..start + CELL_BYTES].copy_from_slice(cell.as_bytes());
    }
}

// ── patches ───────────────────────────────────────────────────────────────

/// A single-cell update produced by an accepted write.
///
/// The renderer drains these once per frame and uploads each one as a 1×1
/// texel region instead of re-uploading the whole grid.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct CellPatch {
    pub index: u32,
    pub column: u32,
    pub row: u32,
    pub cell: Cell,
}

// ── encoder ───────────────────────────────────────────────────────────────

/// Append-only encoder turning pointer samples into grid cells.
///
/// The decimation reference (`last`) is never reset between strokes, so the
/// first sample of a stroke is compared with the last sample of the previous
/// one. [`GestureRecorder`](crate::GestureRecorder) always forces stroke
/// starts, which makes this harmless; callers driving the encoder directly
/// must do the same.
#[derive(Debug)]
pub struct PointStreamEncoder {
    config: EncoderConfig,
    buffer: PointBuffer,
    cursor: u32,
    last: Option<(i32, i32)>,
    pending: Vec<CellPatch>,
    reported_full: bool,
}

impl PointStreamEncoder {
    pub fn new(config: EncoderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            buffer: PointBuffer::new(config.resolution),
            cursor: 0,
            last: None,
            pending: Vec::new(),
            reported_full: false,
        })
    }

    /// Appends a working-space sample. Returns `false` if it was dropped.
    ///
    /// Non-forced samples closer than the decimation threshold (Manhattan
    /// distance) to the last accepted sample are dropped. Any sample is
    /// dropped once the cursor reaches `R² - 2`.
    pub fn submit_point(&mut self, x: f32, y: f32, force: bool) -> bool {
        if !force {
            if let Some((lx, ly)) = self.last {
                let distance = (lx as f32 - x).abs() + (ly as f32 - y).abs();
                if distance < self.config.decimation_threshold() {
                    return false;
                }
            }
        }

        let (x, y) = (wrap_coord(x), wrap_coord(y));
        self.push(Cell::from_coords(x, y), (x, y))
    }

    /// Appends the pen-up marker. Bypasses decimation, not the capacity guard.
    pub fn end_stroke(&mut self) -> bool {
        let marker = i32::from(PEN_UP_COORD);
        self.push(Cell::PEN_UP, (marker, marker))
    }

    fn push(&mut self, cell: Cell, point: (i32, i32)) -> bool {
        if self.is_full() {
            if !self.reported_full {
                log::debug!(
                    "point grid full ({} cells); dropping further samples",
                    self.cursor
                );
                self.reported_full = true;
            }
            return false;
        }

        let index = self.cursor;
        let (column, row) = self.buffer.position(index);

        self.buffer.write(index, cell);
        self.pending.push(CellPatch { index, column, row, cell });
        self.cursor += 1;
        self.last = Some(point);

        log::trace!(
            "{} {} has been written to points texture at ({column}, {row})",
            point.0,
            point.1
        );

        true
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    pub fn buffer(&self) -> &PointBuffer {
        &self.buffer
    }

    /// Index of the next free cell.
    #[inline]
    pub fn cursor(&self) -> u32 {
        self.cursor
    }

    /// Last accepted sample after truncation and wrapping (sign kept),
    /// including pen-up markers.
    #[inline]
    pub fn last_point(&self) -> Option<(i32, i32)> {
        self.last
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.cursor >= self.config.write_limit()
    }

    /// Writes left before the capacity guard engages.
    #[inline]
    pub fn remaining(&self) -> u32 {
        self.config.write_limit().saturating_sub(self.cursor)
    }

    pub fn has_pending_patches(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Removes and returns the patches produced since the last drain, in
    /// write order.
    pub fn drain_patches(&mut self) -> std::vec::Drain<'_, CellPatch> {
        self.pending.drain(..)
    }

    /// Cells written so far, in write order.
    pub fn written(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.cursor).filter_map(move |i| self.buffer.cell(i))
    }

    /// Written points grouped into strokes, split at pen-up markers.
    ///
    /// An unterminated trailing stroke is included; empty strokes are not.
    pub fn strokes(&self) -> Vec<Vec<(u16, u16)>> {
        let mut strokes = Vec::new();
        let mut current = Vec::new();

        for cell in self.written() {
            match cell.decode() {
                Sample::Point { x, y } => current.push((x, y)),
                Sample::PenUp => {
                    if !current.is_empty() {
                        strokes.push(std::mem::take(&mut current));
                    }
                }
            }
        }

        if !current.is_empty() {
            strokes.push(current);
        }
        strokes
    }
}
