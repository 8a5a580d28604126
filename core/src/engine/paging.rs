// Copyright (c) 2022-2023 The MobileCoin Foundation

/// Page index sentinel for "last page of the item", clamped once
/// the page count is known
pub const LAST_PAGE: u8 = 0xFF;

/// Cursor over a list of paged items
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct PageCursor {
    /// Current item index
    pub item: u8,
    /// Number of items
    pub item_count: u8,
    /// Current page within the item
    pub page: u8,
    /// Number of pages in the current item
    pub page_count: u8,
}

impl PageCursor {
    /// Create a cursor at the first page of the first item
    pub const fn new(item_count: u8) -> Self {
        Self {
            item: 0,
            item_count,
            page: 0,
            page_count: 1,
        }
    }

    /// Check whether the cursor can move forward, with `extra`
    /// trailing pseudo items following the last item
    pub fn can_advance(&self, extra: u8) -> bool {
        if self.page as u16 + 1 < self.page_count as u16 {
            return true;
        }

        (self.item as u16 + 1) < (self.item_count as u16 + extra as u16)
    }

    /// Move to the next page, or the first page of the next item
    pub fn advance(&mut self, extra: u8) {
        if self.page as u16 + 1 < self.page_count as u16 {
            self.page += 1;
            return;
        }

        if (self.item as u16 + 1) < (self.item_count as u16 + extra as u16) {
            self.item += 1;
            self.page = 0;
        }
    }

    /// Check whether the cursor can move backward
    pub fn can_retreat(&self) -> bool {
        self.page != 0 || self.item > 0
    }

    /// Move to the previous page, or the last page of the previous item.
    ///
    /// Moving to a previous item sets `page` to [LAST_PAGE], callers must
    /// [clamp][Self::clamp] once the page count is known.
    pub fn retreat(&mut self) {
        if self.page != 0 {
            self.page -= 1;
            return;
        }

        if self.item > 0 {
            self.item -= 1;
            self.page = LAST_PAGE;
        }
    }

    /// Update the page count, clamping the page index into range.
    ///
    /// Returns true if the page index was changed.
    pub fn clamp(&mut self, page_count: u8) -> bool {
        self.page_count = page_count;

        if page_count > 0 && self.page >= page_count {
            self.page = page_count - 1;
            return true;
        }

        false
    }

    /// Check whether the cursor is on the last page of the current item
    pub fn is_last_page(&self) -> bool {
        self.page_count == 0 || self.page + 1 >= self.page_count
    }
}
