// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Packed cell identifiers.

use core::fmt;

/// Identifier of one grid cell: `depth` (bits 58..), `cx` (bits 29..58), `cy` (bits 0..29).
///
/// Two cells are the same cell iff their keys are equal. Depth `0` is the finest
/// grid (cells one grid unit wide) and depth `28` the coarsest (one cell spans the
/// whole extents).
///
/// Keys are returned by [`MappingTree::add`](crate::MappingTree::add), which makes
/// them handy for diagnostics and tests:
///
/// ```
/// use folio_mapping::CellKey;
///
/// let key = CellKey::new(26, 1, 3);
/// assert_eq!(key.raw(), (26 << 58) | (1 << 29) | 3);
/// assert_eq!((key.depth(), key.cx(), key.cy()), (26, 1, 3));
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey(u64);

impl CellKey {
    const COORD_BITS: u32 = 29;
    const COORD_MASK: u64 = (1 << Self::COORD_BITS) - 1;
    const DEPTH_SHIFT: u32 = 58;
    const DEPTH_MASK: u64 = 0xFF;

    /// Pack a depth and cell coordinates. Coordinates are truncated to 29 bits.
    pub const fn new(depth: u8, cx: u32, cy: u32) -> Self {
        Self(
            ((depth as u64 & Self::DEPTH_MASK) << Self::DEPTH_SHIFT)
                | ((cx as u64 & Self::COORD_MASK) << Self::COORD_BITS)
                | (cy as u64 & Self::COORD_MASK),
        )
    }

    /// Pack signed grid coordinates as computed by the placement code.
    pub(crate) const fn at(depth: usize, cx: i64, cy: i64) -> Self {
        Self(
            ((depth as u64 & Self::DEPTH_MASK) << Self::DEPTH_SHIFT)
                | ((cx as u64 & Self::COORD_MASK) << Self::COORD_BITS)
                | (cy as u64 & Self::COORD_MASK),
        )
    }

    /// Rebuild a key from its raw packed form.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The packed 64-bit representation.
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Depth of the cell, `0..=28` for keys produced by a tree.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Only the 6 bits above the depth shift survive the shift."
    )]
    pub const fn depth(self) -> u8 {
        (self.0 >> Self::DEPTH_SHIFT) as u8
    }

    /// Horizontal cell index at this depth.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "The value is masked to 29 bits before the cast."
    )]
    pub const fn cx(self) -> u32 {
        ((self.0 >> Self::COORD_BITS) & Self::COORD_MASK) as u32
    }

    /// Vertical cell index at this depth.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "The value is masked to 29 bits before the cast."
    )]
    pub const fn cy(self) -> u32 {
        (self.0 & Self::COORD_MASK) as u32
    }
}

impl fmt::Debug for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellKey")
            .field("depth", &self.depth())
            .field("cx", &self.cx())
            .field("cy", &self.cy())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_and_unpacks() {
        let key = CellKey::new(28, 0x1FFF_FFFF, 7);
        assert_eq!(key.depth(), 28);
        assert_eq!(key.cx(), 0x1FFF_FFFF);
        assert_eq!(key.cy(), 7);
        assert_eq!(CellKey::from_raw(key.raw()), key);
    }

    #[test]
    fn coordinates_are_truncated_to_29_bits() {
        let key = CellKey::new(3, 1 << 29, (1 << 29) | 5);
        assert_eq!(key.cx(), 0);
        assert_eq!(key.cy(), 5);
        assert_eq!(key.depth(), 3);
    }

    #[test]
    fn signed_and_unsigned_constructors_agree() {
        assert_eq!(CellKey::at(26, 1, 3), CellKey::new(26, 1, 3));
        assert_ne!(CellKey::new(25, 1, 3), CellKey::new(26, 1, 3));
    }
}
