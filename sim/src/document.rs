// Copyright (c) 2022-2023 The MobileCoin Foundation

//! JSON review documents

use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use ledger_review_core::engine::{ContentProvider, Error, Field};

/// Review document item, items with children may be inspected
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct DocItem {
    pub key: String,

    #[serde(default)]
    pub value: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DocItem>,
}

/// Review document, loaded from JSON
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct Document {
    /// Custom title screen (key, value)
    #[serde(default)]
    pub title: Option<(String, String)>,

    pub items: Vec<DocItem>,
}

impl Document {
    /// Load a document from a JSON file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let s = std::fs::read_to_string(path)?;
        let d = serde_json::from_str(&s)?;
        Ok(d)
    }

    /// Resolve the item at `trace`, `trace[0]` indexes top-level items
    fn resolve(&self, trace: &[u8]) -> Option<&DocItem> {
        let (first, rest) = trace.split_first()?;
        let mut i = self.items.get(*first as usize)?;

        for c in rest {
            i = i.children.get(*c as usize)?;
        }

        Some(i)
    }
}

/// [ContentProvider] over a [Document], recording the review outcome
#[derive(Clone, Debug)]
pub struct DocumentProvider {
    doc: Document,
    outcome: Option<Outcome>,
}

/// Review outcome reported via provider callbacks
#[derive(Copy, Clone, PartialEq, Debug, strum::Display)]
pub enum Outcome {
    Accepted,
    Rejected,
    Error,
}

impl DocumentProvider {
    pub fn new(doc: Document) -> Self {
        Self { doc, outcome: None }
    }

    /// Fetch the review outcome, if complete
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }
}

impl ContentProvider for DocumentProvider {
    fn item_count(&mut self) -> Result<u8, Error> {
        u8::try_from(self.doc.items.len()).map_err(|_| Error::OutOfBounds)
    }

    fn item(&mut self, index: u8, page: u8, out: &mut Field) -> Result<u8, Error> {
        let i = self.doc.items.get(index as usize).ok_or(Error::NoData)?;
        Ok(out.set(&i.key, &i.value, page))
    }

    fn review_title(&mut self, out: &mut Field) -> Result<(), Error> {
        let (k, v) = self.doc.title.as_ref().ok_or(Error::NoData)?;

        out.set_key(k);
        out.set_value(v);

        Ok(())
    }

    fn inner_item_count(&mut self, trace: &[u8]) -> Result<u8, Error> {
        let i = self.doc.resolve(trace).ok_or(Error::NoData)?;
        u8::try_from(i.children.len()).map_err(|_| Error::OutOfBounds)
    }

    fn inner_item(
        &mut self,
        trace: &[u8],
        child: u8,
        page: u8,
        out: &mut Field,
    ) -> Result<u8, Error> {
        let c = self
            .doc
            .resolve(trace)
            .and_then(|i| i.children.get(child as usize))
            .ok_or(Error::NoData)?;

        Ok(out.set(&c.key, &c.value, page))
    }

    fn can_inspect(&mut self, trace: &[u8], child: u8) -> bool {
        let c = match trace.is_empty() {
            true => self.doc.items.get(child as usize),
            false => self
                .doc
                .resolve(trace)
                .and_then(|i| i.children.get(child as usize)),
        };

        matches!(c, Some(c) if !c.children.is_empty())
    }

    fn on_accept(&mut self) {
        info!("review accepted");
        self.outcome = Some(Outcome::Accepted);
    }

    fn on_reject(&mut self) {
        info!("review rejected");
        self.outcome = Some(Outcome::Rejected);
    }

    fn on_error(&mut self) {
        debug!("error acknowledged");
        self.outcome = Some(Outcome::Error);
    }
}
