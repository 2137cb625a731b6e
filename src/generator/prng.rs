/*
prng.rs

Copyright 2025 Hervé Quatremain

This file is part of Onestroke.

Onestroke is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Onestroke is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Onestroke. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Deterministic pseudo-random source.
//!
//! Levels are never stored, so every random decision must be reproducible from the level ID
//! alone, bit for bit, on every platform.
//! [`Mulberry32`] is a 32-bit state generator built only from wrapping integer operations.

/// Increment added to the state before each draw.
const INCREMENT: u32 = 0x6D2B_79F5;

/// 2^32, to map a `u32` output to `[0, 1)`.
const TWO_POW_32: f64 = 4_294_967_296.0;

/// Mulberry32 generator.
#[derive(Debug, Clone)]
pub struct Mulberry32 {
    /// Internal state, advanced once per draw.
    state: u32,
}

impl Mulberry32 {
    /// Create a [`Mulberry32`] object from the given seed.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Stream used by the path search of the given level.
    pub fn for_search(level_id: u32) -> Self {
        Self::new(level_id.wrapping_mul(9973).wrapping_add(12345))
    }

    /// Stream used by the fallback patterns of the given level.
    pub fn for_fallback(level_id: u32) -> Self {
        Self::new(
            level_id
                .wrapping_mul(7919)
                .wrapping_add(level_id.wrapping_mul(1321)),
        )
    }

    /// Return the next 32-bit output.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(INCREMENT);
        let mut t: u32 = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Return the next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / TWO_POW_32
    }

    /// Return a value in `0..n`, or 0 if `n` is 0.
    pub fn below(&mut self, n: usize) -> usize {
        let r: usize = (self.next_f64() * n as f64) as usize;
        r.min(n.saturating_sub(1))
    }

    /// Whether the next draw falls in the lower half.
    pub fn coin(&mut self) -> bool {
        self.next_f64() < 0.5
    }

    /// Fisher-Yates shuffle of the given slice.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j: usize = self.below(i + 1);
            items.swap(i, j);
        }
    }
}
