// Copyright (c) 2022-2023 The MobileCoin Foundation

use static_assertions::const_assert;

use super::{ContentProvider, Error, InspectLayout, PageCursor};

/// Maximum inspection depth below the inspected item
pub const MAX_DEPTH: usize = 10;

const_assert!(MAX_DEPTH < u8::MAX as usize);

/// Inspection state for nested fields
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct InspectState {
    /// Current depth, 0 lists children of the inspected item
    depth: u8,
    /// Path from the inspected item (`trace[0]`) to the current parent
    trace: [u8; MAX_DEPTH + 1],
    /// Cursor over the children of the current parent
    pub cursor: PageCursor,
    layout: InspectLayout,
}

impl InspectState {
    /// Start inspecting top-level item `item`
    pub fn new(item: u8, layout: InspectLayout) -> Self {
        let mut trace = [0u8; MAX_DEPTH + 1];
        trace[0] = item;

        Self {
            depth: 0,
            trace,
            cursor: PageCursor::new(0),
            layout,
        }
    }

    /// Current depth
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Top-level item being inspected
    pub fn root(&self) -> u8 {
        self.trace[0]
    }

    /// Path to the current parent, `trace[0..=depth]`
    pub fn trace(&self) -> &[u8] {
        &self.trace[..=self.depth as usize]
    }

    /// Set the child count for the current parent
    pub fn set_child_count(&mut self, count: u8) {
        let max = u8::MAX - self.layout.extra();
        self.cursor.item_count = count.min(max) + self.layout.extra();
    }

    /// Number of provider children under the current parent
    pub fn child_count(&self) -> u8 {
        self.cursor.item_count.saturating_sub(self.layout.extra())
    }

    /// Check whether the cursor is on the "Go to root" pseudo item
    pub fn is_go_to_root(&self) -> bool {
        self.layout == InspectLayout::Bracketed && self.cursor.item == 0
    }

    /// Check whether the cursor is on the "BACK" pseudo item
    pub fn is_back(&self) -> bool {
        self.layout == InspectLayout::Bracketed
            && self.cursor.item_count > 0
            && self.cursor.item == self.cursor.item_count - 1
    }

    /// Provider child index under the cursor, `None` for pseudo items
    pub fn child_index(&self) -> Option<u8> {
        match self.layout {
            InspectLayout::Native if self.cursor.item < self.cursor.item_count => {
                Some(self.cursor.item)
            }
            InspectLayout::Bracketed if !self.is_go_to_root() && !self.is_back() => {
                Some(self.cursor.item - 1)
            }
            _ => None,
        }
    }

    /// Check whether `child` of the current parent may be descended into
    pub fn can_descend(&self, p: &mut impl ContentProvider, child: u8) -> bool {
        self.depth < MAX_DEPTH as u8 && p.can_inspect(self.trace(), child)
    }

    /// Descend into `child`, resetting the cursor.
    ///
    /// State is unchanged on failure.
    pub fn descend(&mut self, p: &mut impl ContentProvider, child: u8) -> Result<(), Error> {
        if self.depth >= MAX_DEPTH as u8 {
            return Err(Error::MaxDepth);
        }
        if !p.can_inspect(self.trace(), child) {
            return Err(Error::NotInspectable);
        }

        self.depth += 1;
        self.trace[self.depth as usize] = child;
        self.cursor = PageCursor::new(0);

        Ok(())
    }

    /// Ascend one level, restoring the cursor onto the child that was
    /// descended into. Returns false when the caller should return to
    /// the root instead.
    pub fn ascend(&mut self) -> bool {
        if self.depth <= 1 {
            return false;
        }

        let child = self.trace[self.depth as usize];
        self.trace[self.depth as usize] = 0;
        self.depth -= 1;

        self.cursor = PageCursor::new(0);
        self.cursor.item = match self.layout {
            InspectLayout::Bracketed => child + 1,
            InspectLayout::Native => child,
        };

        true
    }
}
