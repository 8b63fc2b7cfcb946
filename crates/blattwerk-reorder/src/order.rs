// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page order — the authoritative slot -> original page index mapping.
//
// Two index spaces are kept apart on purpose: a *slot* is a position in the
// displayed grid, an *original index* is the page's identity in the source
// document. `PageOrder[slot] == original`. The reverse lookup is computed on
// demand and never cached, so it cannot go stale across moves.

use std::ops::Index;

use blattwerk_core::error::{BlattwerkError, Result};

/// Permutation of `0..page_count` mapping visual slot to original page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct PageOrder(Vec<usize>);

impl PageOrder {
    /// The untouched order `[0, 1, .., page_count - 1]`.
    pub fn identity(page_count: usize) -> Self {
        Self((0..page_count).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Original page shown in `slot`, if the slot exists.
    pub fn original_at(&self, slot: usize) -> Option<usize> {
        self.0.get(slot).copied()
    }

    /// Slot currently showing `original`. Linear scan.
    pub fn slot_of(&self, original: usize) -> Option<usize> {
        self.0.iter().position(|&page| page == original)
    }

    /// Whether the order still is the identity (nothing was moved).
    pub fn is_identity(&self) -> bool {
        self.0.iter().enumerate().all(|(slot, &page)| slot == page)
    }

    /// Move the page in `from` to `to`, shifting the pages in between by one.
    ///
    /// This is a list move, not a swap. `from == to` yields an equal order.
    ///
    /// # Panics
    ///
    /// Panics if either slot is out of range. An out-of-range slot means the
    /// caller's view of the grid has desynchronised from the order, which is
    /// a bug to surface rather than paper over with clamping.
    pub fn move_slot(&self, from: usize, to: usize) -> Self {
        let len = self.len();
        assert!(from < len, "move_slot: from slot {from} out of range for {len} pages");
        assert!(to < len, "move_slot: to slot {to} out of range for {len} pages");

        let mut pages = self.0.clone();
        if from != to {
            let page = pages.remove(from);
            pages.insert(to, page);
        }
        Self(pages)
    }

    /// Checked variant of [`PageOrder::move_slot`] for slots that come from
    /// outside the engine.
    pub fn try_move_slot(&self, from: usize, to: usize) -> Result<Self> {
        let len = self.len();
        for slot in [from, to] {
            if slot >= len {
                return Err(BlattwerkError::InvalidSlot { slot, len });
            }
        }
        Ok(self.move_slot(from, to))
    }

    /// Check the permutation invariant on an arbitrary index list.
    pub fn validate(pages: &[usize]) -> Result<()> {
        let len = pages.len();
        let mut seen = vec![false; len];
        for &page in pages {
            match seen.get_mut(page) {
                None => {
                    return Err(BlattwerkError::NotAPermutation {
                        len,
                        detail: format!("page {page} does not exist"),
                    });
                }
                Some(true) => {
                    return Err(BlattwerkError::NotAPermutation {
                        len,
                        detail: format!("page {page} appears twice"),
                    });
                }
                Some(flag) => *flag = true,
            }
        }
        Ok(())
    }
}

/// Free-function form of [`PageOrder::move_slot`].
pub fn move_slot(order: &PageOrder, from: usize, to: usize) -> PageOrder {
    order.move_slot(from, to)
}

impl TryFrom<Vec<usize>> for PageOrder {
    type Error = BlattwerkError;

    fn try_from(pages: Vec<usize>) -> Result<Self> {
        Self::validate(&pages)?;
        Ok(Self(pages))
    }
}

impl Index<usize> for PageOrder {
    type Output = usize;

    fn index(&self, slot: usize) -> &usize {
        &self.0[slot]
    }
}

impl AsRef<[usize]> for PageOrder {
    fn as_ref(&self) -> &[usize] {
        &self.0
    }
}
