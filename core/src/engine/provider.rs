// Copyright (c) 2022-2023 The MobileCoin Foundation

use zeroize::Zeroize;

use super::Error;
use crate::helpers::{page_str, BoundedStr, MAX_KEY_LEN, MAX_VALUE_LEN};

/// Key / value scratch buffer populated by [ContentProvider]s
#[derive(Clone, Debug)]
pub struct Field {
    /// Field name
    pub key: BoundedStr<MAX_KEY_LEN>,
    /// Current page of the field value
    pub value: BoundedStr<MAX_VALUE_LEN>,
    page_len: usize,
}

impl Field {
    /// Create a new field buffer with the provided page length
    pub const fn new(page_len: usize) -> Self {
        Self {
            key: BoundedStr::new(),
            value: BoundedStr::new(),
            page_len,
        }
    }

    /// Maximum page length for values
    pub fn page_len(&self) -> usize {
        self.page_len
    }

    pub(crate) fn set_page_len(&mut self, page_len: usize) {
        self.page_len = page_len.clamp(1, MAX_VALUE_LEN);
    }

    /// Clear key and value
    pub fn clear(&mut self) {
        self.key.clear();
        self.value.clear();
    }

    /// Set field key
    pub fn set_key(&mut self, key: &str) {
        self.key.set(key);
    }

    /// Set a single page value
    pub fn set_value(&mut self, value: &str) {
        self.value.set(value);
    }

    /// Write page `page` of `value`, returning the page count
    pub fn set_value_paged(&mut self, value: &str, page: u8) -> u8 {
        page_str(value, self.page_len, page, &mut self.value)
    }

    /// Set key and page `page` of `value`, returning the page count
    pub fn set(&mut self, key: &str, value: &str, page: u8) -> u8 {
        self.set_key(key);
        self.set_value_paged(value, page)
    }
}

impl Zeroize for Field {
    fn zeroize(&mut self) {
        self.key.zeroize();
        self.value.zeroize();
    }
}

/// [ContentProvider] supplies the fields under review to the [Engine][super::Engine].
///
/// Indices are zero based and relative to the provider's own items,
/// the engine accounts for intro and terminal screens.
pub trait ContentProvider {
    /// Fetch the number of top-level items
    fn item_count(&mut self) -> Result<u8, Error>;

    /// Write page `page` of item `index` to `out`, returning the item page count.
    ///
    /// Requests for a page beyond the page count must still report the page count,
    /// items with no pages are skipped by the engine.
    fn item(&mut self, index: u8, page: u8, out: &mut Field) -> Result<u8, Error>;

    /// Write a custom review title, replacing the default title screen
    fn review_title(&mut self, _out: &mut Field) -> Result<(), Error> {
        Err(Error::NoData)
    }

    /// Fetch the number of children below the item at `trace`
    fn inner_item_count(&mut self, _trace: &[u8]) -> Result<u8, Error> {
        Err(Error::NoData)
    }

    /// Write page `page` of child `child` below `trace`, returning the page count
    fn inner_item(
        &mut self,
        _trace: &[u8],
        _child: u8,
        _page: u8,
        _out: &mut Field,
    ) -> Result<u8, Error> {
        Err(Error::NoData)
    }

    /// Check whether child `child` below `trace` can be inspected,
    /// an empty trace refers to top-level items
    fn can_inspect(&mut self, _trace: &[u8], _child: u8) -> bool {
        false
    }

    /// Called once when the user approves the review
    fn on_accept(&mut self) {}

    /// Called once when the user rejects the review
    fn on_reject(&mut self) {}

    /// Called when the user acknowledges an error screen
    fn on_error(&mut self) {}
}

impl<T: ContentProvider> ContentProvider for &mut T {
    fn item_count(&mut self) -> Result<u8, Error> {
        T::item_count(self)
    }

    fn item(&mut self, index: u8, page: u8, out: &mut Field) -> Result<u8, Error> {
        T::item(self, index, page, out)
    }

    fn review_title(&mut self, out: &mut Field) -> Result<(), Error> {
        T::review_title(self, out)
    }

    fn inner_item_count(&mut self, trace: &[u8]) -> Result<u8, Error> {
        T::inner_item_count(self, trace)
    }

    fn inner_item(
        &mut self,
        trace: &[u8],
        child: u8,
        page: u8,
        out: &mut Field,
    ) -> Result<u8, Error> {
        T::inner_item(self, trace, child, page, out)
    }

    fn can_inspect(&mut self, trace: &[u8], child: u8) -> bool {
        T::can_inspect(self, trace, child)
    }

    fn on_accept(&mut self) {
        T::on_accept(self)
    }

    fn on_reject(&mut self) {
        T::on_reject(self)
    }

    fn on_error(&mut self) {
        T::on_error(self)
    }
}
