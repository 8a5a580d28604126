// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Bounded string storage and page / line splitting helpers

use core::{fmt, str::from_utf8};

use emstr::EncodeStr;
use zeroize::Zeroize;

/// Maximum key length in bytes
pub const MAX_KEY_LEN: usize = 64;

/// Maximum value (single page) length in bytes
pub const MAX_VALUE_LEN: usize = 256;

/// Fixed capacity UTF-8 string, silently truncating at character
/// boundaries when capacity is exceeded
#[derive(Clone, PartialEq)]
pub struct BoundedStr<const N: usize> {
    buff: [u8; N],
    len: usize,
}

impl<const N: usize> BoundedStr<N> {
    /// Create a new empty string
    pub const fn new() -> Self {
        Self {
            buff: [0u8; N],
            len: 0,
        }
    }

    /// Fetch string capacity in bytes
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Fetch string length in bytes
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Check whether the string is empty
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Access string contents
    pub fn as_str(&self) -> &str {
        // Contents are only ever written from whole `str` characters
        match from_utf8(&self.buff[..self.len]) {
            Ok(v) => v,
            Err(_) => "INVALID_UTF8",
        }
    }

    /// Clear and wipe string contents
    pub fn clear(&mut self) {
        self.buff[..self.len].zeroize();
        self.len = 0;
    }

    /// Replace string contents, returning false if truncated
    pub fn set(&mut self, s: &str) -> bool {
        self.clear();
        self.push_str(s)
    }

    /// Append a string, writing as many whole characters as fit.
    ///
    /// Returns false if the input was truncated.
    pub fn push_str(&mut self, s: &str) -> bool {
        let n = floor_char_boundary(s, N - self.len);

        self.buff[self.len..][..n].copy_from_slice(&s.as_bytes()[..n]);
        self.len += n;

        n == s.len()
    }

    /// Append a single character, returning false if it does not fit
    pub fn push(&mut self, c: char) -> bool {
        let mut b = [0u8; 4];
        self.push_str(c.encode_utf8(&mut b))
    }

    /// Truncate to at most `n` bytes, backing off to a character boundary
    pub fn truncate(&mut self, n: usize) {
        if n >= self.len {
            return;
        }

        let n = floor_char_boundary(self.as_str(), n);
        self.buff[n..self.len].zeroize();
        self.len = n;
    }
}

impl<const N: usize> Default for BoundedStr<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> AsRef<str> for BoundedStr<N> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<const N: usize> fmt::Write for BoundedStr<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        match self.push_str(s) {
            true => Ok(()),
            false => Err(fmt::Error),
        }
    }
}

impl<const N: usize> fmt::Debug for BoundedStr<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl<const N: usize> fmt::Display for BoundedStr<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<const N: usize> Zeroize for BoundedStr<N> {
    fn zeroize(&mut self) {
        self.buff.zeroize();
        self.len = 0;
    }
}

/// Find the largest character boundary in `s` not exceeding `n`
fn floor_char_boundary(s: &str, n: usize) -> usize {
    if n >= s.len() {
        return s.len();
    }

    let mut i = n;
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Byte range of each page of `s` when split into `chunk` byte pages
fn page_bounds(s: &str, chunk: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
    let mut start = 0;

    core::iter::from_fn(move || {
        if start >= s.len() {
            return None;
        }

        let mut end = start + floor_char_boundary(&s[start..], chunk);

        // Always consume at least one character
        if end == start {
            end = start + s[start..].chars().next().map(|c| c.len_utf8()).unwrap_or(1);
        }

        let r = (start, end);
        start = end;
        Some(r)
    })
}

/// Split `input` into pages of at most `chunk` bytes, writing
/// page `page` to `out` and returning the total page count.
///
/// Empty inputs have no pages, pages never split a UTF-8 character,
/// and `out` is left empty when `page` is out of range.
/// The page count saturates at 255.
pub fn page_str<const N: usize>(input: &str, chunk: usize, page: u8, out: &mut BoundedStr<N>) -> u8 {
    out.clear();

    let chunk = chunk.clamp(1, N);
    let mut count = 0usize;

    for (i, (start, end)) in page_bounds(input, chunk).enumerate() {
        if i == page as usize {
            out.push_str(&input[start..end]);
        }
        count += 1;
    }

    count.min(u8::MAX as usize) as u8
}

/// Iterator over display lines of at most `width` bytes
pub struct Lines<'a> {
    s: &'a str,
    width: usize,
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.s.is_empty() {
            return None;
        }

        let mut n = floor_char_boundary(self.s, self.width);
        if n == 0 {
            n = self.s.chars().next().map(|c| c.len_utf8()).unwrap_or(1);
        }

        let (l, r) = self.s.split_at(n);
        self.s = r;
        Some(l)
    }
}

/// Split a page of text into display lines of `width` bytes
pub fn split_lines(s: &str, width: usize) -> Lines<'_> {
    Lines {
        s,
        width: width.max(1),
    }
}

/// Paging label style
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LabelStyle {
    /// `key [1/3]`, button devices
    Brackets,
    /// `key (1/3)`, touch devices
    Parens,
}

/// Append a paging label for multi-page items to `key`.
///
/// The label is written within the remaining key capacity
/// and omitted entirely for single page items.
pub fn fmt_page_label<const N: usize>(
    key: &mut BoundedStr<N>,
    page: u8,
    page_count: u8,
    style: LabelStyle,
) {
    if page_count <= 1 {
        return;
    }

    let (open, close) = match style {
        LabelStyle::Brackets => (" [", ']'),
        LabelStyle::Parens => (" (", ')'),
    };

    let mut buff = [0u8; 12];
    let n = match emstr::write!(&mut buff[..], open, page as usize + 1, '/', page_count as usize, close) {
        Ok(v) => v,
        Err(_) => return,
    };

    if let Ok(s) = from_utf8(&buff[..n]) {
        key.push_str(s);
    }
}

/// Write `to {intent}` to `out`, replacing the tail with an
/// ellipsis when the intent does not fit
pub fn fmt_intent<const N: usize>(intent: &str, out: &mut BoundedStr<N>) {
    out.clear();
    out.push_str("to ");

    if out.push_str(intent) {
        return;
    }

    out.truncate(N.saturating_sub(3));
    out.push_str("...");
}
