// Copyright (c) 2022-2023 The MobileCoin Foundation

use heapless::Vec;
use zeroize::Zeroize;

use super::{Config, ContentProvider, Error, Field};
use crate::helpers::{fmt_page_label, BoundedStr, MAX_KEY_LEN, MAX_VALUE_LEN};

/// Maximum pairs per static review screen
pub const MAX_PAIRS: usize = 8;

/// Rendered key / value pair
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Pair {
    pub key: BoundedStr<MAX_KEY_LEN>,
    pub value: BoundedStr<MAX_VALUE_LEN>,
}

impl Zeroize for Pair {
    fn zeroize(&mut self) {
        self.key.zeroize();
        self.value.zeroize();
    }
}

/// Forward-only review for backends that pull pages by index.
///
/// Every page of every item is flattened into a list of pairs,
/// grouped into screens of [Config::pairs_per_screen] pairs.
pub struct StaticReview<P: ContentProvider> {
    provider: P,
    config: Config,
    field: Field,

    pair_count: Option<u16>,
    cache: Option<(u16, Vec<Pair, MAX_PAIRS>)>,
    reached: Option<u16>,
    finished: bool,
}

impl<P: ContentProvider> StaticReview<P> {
    /// Create a new static review over the provided content
    pub fn new(provider: P, config: Config) -> Self {
        let mut field = Field::new(0);
        field.set_page_len(config.page_len);

        Self {
            provider,
            config,
            field,
            pair_count: None,
            cache: None,
            reached: None,
            finished: false,
        }
    }

    fn pairs_per_screen(&self) -> u16 {
        (self.config.pairs_per_screen as u16).clamp(1, MAX_PAIRS as u16)
    }

    /// Total number of key / value pairs (item pages)
    pub fn total_pairs(&mut self) -> Result<u16, Error> {
        if let Some(n) = self.pair_count {
            return Ok(n);
        }

        let items = self.provider.item_count()?;

        let mut n = 0u16;
        for i in 0..items {
            n += self.provider.item(i, 0, &mut self.field)? as u16;
        }
        self.field.clear();

        self.pair_count = Some(n);
        Ok(n)
    }

    /// Total number of screens
    pub fn total_pages(&mut self) -> Result<u16, Error> {
        let pairs = self.total_pairs()?;
        let pps = self.pairs_per_screen();

        Ok((pairs + pps - 1) / pps)
    }

    /// Resolve a flat pair index to an item and page
    fn locate(&mut self, index: u16) -> Result<(u8, u8, u8), Error> {
        let items = self.provider.item_count()?;

        let mut base = 0u16;
        for i in 0..items {
            let pages = self.provider.item(i, 0, &mut self.field)?;

            if index < base + pages as u16 {
                return Ok((i, (index - base) as u8, pages));
            }
            base += pages as u16;
        }

        Err(Error::OutOfBounds)
    }

    /// Render pair `index` into `out`
    pub fn pair_at(&mut self, index: u16, out: &mut Pair) -> Result<(), Error> {
        let (item, page, pages) = self.locate(index)?;

        self.field.clear();
        self.provider.item(item, page, &mut self.field)?;

        out.key.set(self.field.key.as_str());
        fmt_page_label(&mut out.key, page, pages, self.config.label_style);

        match self.field.value.is_empty() {
            true => out.value.set(" "),
            false => out.value.set(self.field.value.as_str()),
        };

        self.field.clear();

        Ok(())
    }

    /// Render screen `n`.
    ///
    /// Repeated requests for the same screen are served from cache.
    pub fn page_at(&mut self, n: u16) -> Result<&[Pair], Error> {
        if self.finished {
            return Err(Error::InvalidState);
        }

        let cached = matches!(&self.cache, Some((i, _)) if *i == n);

        if !cached {
            if n >= self.total_pages()? {
                return Err(Error::OutOfBounds);
            }

            let pps = self.pairs_per_screen();
            let start = n * pps;
            let end = (start + pps).min(self.total_pairs()?);

            let mut pairs: Vec<Pair, MAX_PAIRS> = Vec::new();
            for i in start..end {
                let mut p = Pair::default();
                self.pair_at(i, &mut p)?;
                pairs.push(p).map_err(|_| Error::BufferTooSmall)?;
            }

            #[cfg(feature = "log")]
            log::debug!("render static page {} ({} pairs)", n, pairs.len());

            // Replace the cached page only once the new one is complete
            if let Some((_, mut p)) = self.cache.replace((n, pairs)) {
                p.iter_mut().for_each(|v| v.zeroize());
            }
        }

        self.reached = Some(self.reached.map_or(n, |r| r.max(n)));

        match &self.cache {
            Some((_, p)) => Ok(&p[..]),
            None => Err(Error::InvalidState),
        }
    }

    /// Complete the review, firing the terminal callback.
    ///
    /// Approval requires the last screen to have been rendered, rejection
    /// is always available. Returns false if the review has already finished
    /// or approval is refused.
    pub fn finish(&mut self, approved: bool) -> bool {
        if self.finished {
            return false;
        }
        if approved && !self.is_complete() {
            return false;
        }
        self.finished = true;

        if let Some((_, p)) = &mut self.cache {
            p.iter_mut().for_each(|v| v.zeroize());
        }
        self.cache = None;
        self.field.zeroize();

        match approved {
            true => self.provider.on_accept(),
            false => self.provider.on_reject(),
        }

        true
    }

    /// Check whether every screen has been rendered
    pub fn is_complete(&mut self) -> bool {
        match self.total_pages() {
            Ok(0) => true,
            Ok(n) => matches!(self.reached, Some(r) if r + 1 >= n),
            Err(_) => false,
        }
    }

    /// Check whether the review has finished
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Access the underlying provider
    pub fn provider(&mut self) -> &mut P {
        &mut self.provider
    }
}
