// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader — open existing PDFs and rebuild them with a different page
// selection (reorder, split, merge) or with compressed streams, using the
// `lopdf` crate.

use std::collections::HashMap;
use std::path::Path;

use blattwerk_core::error::{BlattwerkError, Result};
use blattwerk_reorder::PageOrder;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};
use tracing::{debug, info, instrument, warn};

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guard against malformed, cyclic page trees.
const MAX_TREE_DEPTH: usize = 64;

/// Reads existing PDF files and produces rewritten copies.
///
/// Wraps `lopdf::Document`. Every operation leaves the source untouched and
/// returns the serialised bytes of a new document.
pub struct PdfReader {
    /// The underlying lopdf document.
    document: Document,
    /// Source path, if opened from a file (useful for diagnostics).
    source_path: Option<String>,
}

impl PdfReader {
    // -- Construction ---------------------------------------------------------

    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path_ref = path.as_ref();
        info!("Opening PDF: {}", path_ref.display());

        let document = Document::load(path_ref).map_err(|err| {
            BlattwerkError::PdfError(format!("failed to open {}: {}", path_ref.display(), err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded");

        Ok(Self {
            document,
            source_path: Some(path_ref.display().to_string()),
        })
    }

    /// Create a reader from raw PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let document = Document::load_mem(data).map_err(|err| {
            BlattwerkError::PdfError(format!("failed to load PDF from memory: {}", err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded from bytes");

        Ok(Self {
            document,
            source_path: None,
        })
    }

    // -- Inspection -----------------------------------------------------------

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Return the source path if the reader was created via [`PdfReader::open`].
    pub fn source_path(&self) -> Option<&str> {
        self.source_path.as_deref()
    }

    /// Page object ids in document order (index 0 = first page).
    fn page_ids(&self) -> Vec<ObjectId> {
        self.document.get_pages().into_values().collect()
    }

    // -- Rewriting ------------------------------------------------------------

    /// Build a new PDF holding the given 0-based pages in the given order.
    ///
    /// A page may be listed more than once. Objects shared between pages
    /// (fonts, images) are copied once.
    #[instrument(skip(self), fields(count = pages.len()))]
    pub fn select_pages(&self, pages: &[usize]) -> Result<Vec<u8>> {
        if pages.is_empty() {
            return Err(BlattwerkError::PdfError("no pages selected".into()));
        }

        let page_ids = self.page_ids();
        let mut builder = PageTreeBuilder::new();
        for &index in pages {
            let page_id = *page_ids.get(index).ok_or_else(|| {
                BlattwerkError::PdfError(format!(
                    "page {} out of range (document has {} pages)",
                    index + 1,
                    page_ids.len()
                ))
            })?;
            builder.copy_page(&self.document, page_id)?;
        }

        let output = builder.finish()?;
        debug!(output_bytes = output.len(), "Page selection written");
        Ok(output)
    }

    /// Rewrite the document with its pages physically in `order`.
    ///
    /// `order[slot]` is the original page that should appear at `slot`.
    #[instrument(skip_all, fields(pages = order.len()))]
    pub fn apply_order(&self, order: &PageOrder) -> Result<Vec<u8>> {
        let page_count = self.page_count();
        if order.len() != page_count {
            return Err(BlattwerkError::NotAPermutation {
                len: page_count,
                detail: format!("order lists {} pages", order.len()),
            });
        }
        PageOrder::validate(order.as_slice())?;

        info!(unchanged = order.is_identity(), "Applying page order");
        self.select_pages(order.as_slice())
    }

    /// Extract one selection of pages. An empty selection yields the first
    /// page on its own.
    pub fn split_single(&self, pages: &[usize]) -> Result<Vec<u8>> {
        if pages.is_empty() {
            return self.select_pages(&[0]);
        }
        self.select_pages(pages)
    }

    /// Extract several selections. Empty groups are skipped; each output is
    /// paired with the index of the group it came from.
    #[instrument(skip_all, fields(groups = groups.len()))]
    pub fn split_groups(&self, groups: &[Vec<usize>]) -> Result<Vec<(usize, Vec<u8>)>> {
        let mut outputs = Vec::new();
        for (index, group) in groups.iter().enumerate() {
            if group.is_empty() {
                debug!(group = index, "Skipping empty split group");
                continue;
            }
            outputs.push((index, self.select_pages(group)?));
        }
        info!(written = outputs.len(), "Split complete");
        Ok(outputs)
    }

    /// Merge this document with one or more other PDF byte-slices, producing a
    /// combined PDF. Pages appear in the order: self, then each supplied
    /// document in order.
    #[instrument(skip_all, fields(additional_count = others.len()))]
    pub fn merge(&self, others: &[&[u8]]) -> Result<Vec<u8>> {
        info!(
            base_pages = self.page_count(),
            additional_documents = others.len(),
            "Merging PDFs"
        );

        let mut builder = PageTreeBuilder::new();
        for page_id in self.page_ids() {
            builder.copy_page(&self.document, page_id)?;
        }

        for (index, other_bytes) in others.iter().enumerate() {
            let other = Document::load_mem(other_bytes).map_err(|err| {
                BlattwerkError::PdfError(format!(
                    "failed to load additional PDF #{}: {}",
                    index + 1,
                    err
                ))
            })?;

            // Object ids are only meaningful within one source document.
            builder.forget_copies();
            for page_id in other.get_pages().into_values() {
                builder.copy_page(&other, page_id)?;
            }
        }

        let output = builder.finish()?;
        debug!(output_bytes = output.len(), "Merge complete");
        Ok(output)
    }

    /// Re-save with unreferenced objects dropped and streams deflated.
    #[instrument(skip(self))]
    pub fn compress(&self) -> Result<Vec<u8>> {
        let mut doc = self.document.clone();
        let pruned = doc.prune_objects();
        doc.delete_zero_length_streams();
        doc.compress();
        doc.renumber_objects();

        let mut output = Vec::new();
        doc.save_to(&mut output).map_err(|err| {
            BlattwerkError::PdfError(format!("failed to serialise compressed PDF: {}", err))
        })?;

        info!(
            pruned_objects = pruned.len(),
            output_bytes = output.len(),
            "PDF compressed"
        );
        Ok(output)
    }
}

/// Merge PDFs given as bytes, in order.
pub fn merge_all(documents: &[&[u8]]) -> Result<Vec<u8>> {
    let (first, rest) = documents.split_first().ok_or(BlattwerkError::NoInput)?;
    PdfReader::from_bytes(first)?.merge(rest)
}

// -- Page tree construction ---------------------------------------------------

/// Accumulates copied pages into a fresh document with a flat page tree.
struct PageTreeBuilder {
    target: Document,
    pages_id: ObjectId,
    kids: Vec<Object>,
    /// Source object id -> copied object id, for the current source document.
    copied: HashMap<ObjectId, ObjectId>,
}

impl PageTreeBuilder {
    fn new() -> Self {
        let mut target = Document::with_version("1.5");
        let pages_id = target.new_object_id();
        let catalog_id = target.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        target.trailer.set("Root", catalog_id);

        Self {
            target,
            pages_id,
            kids: Vec::new(),
            copied: HashMap::new(),
        }
    }

    /// Drop the copy memo before switching to another source document.
    fn forget_copies(&mut self) {
        self.copied.clear();
    }

    /// Append a copy of `page_id` from `source` as the last page.
    fn copy_page(&mut self, source: &Document, page_id: ObjectId) -> Result<()> {
        let page = source.get_dictionary(page_id).map_err(|err| {
            BlattwerkError::PdfError(format!("cannot read page object {:?}: {}", page_id, err))
        })?;

        // Reserve the new id first so references back to the page (e.g. an
        // annotation's /P) resolve to this copy instead of cloning it again.
        let new_id = self.target.new_object_id();
        self.copied.insert(page_id, new_id);

        let mut new_page = self.copy_dictionary(source, page)?;
        for key in INHERITABLE_KEYS {
            if new_page.has(key) {
                continue;
            }
            if let Some(value) = inherited_attribute(source, page, key) {
                let copied = self.copy_object(source, value)?;
                new_page.set(key.to_vec(), copied);
            }
        }
        new_page.set("Parent", self.pages_id);

        self.target
            .objects
            .insert(new_id, Object::Dictionary(new_page));
        self.kids.push(Object::Reference(new_id));
        Ok(())
    }

    /// Copy a dictionary, dropping its /Parent link (patched by the caller).
    fn copy_dictionary(&mut self, source: &Document, dict: &Dictionary) -> Result<Dictionary> {
        let mut new_dict = Dictionary::new();
        for (key, value) in dict.iter() {
            if key == b"Parent" {
                continue;
            }
            let cloned_value = self.copy_object(source, value)?;
            new_dict.set(key.clone(), cloned_value);
        }
        Ok(new_dict)
    }

    /// Deep-copy an object, following references through the memo.
    fn copy_object(&mut self, source: &Document, object: &Object) -> Result<Object> {
        match object {
            Object::Dictionary(dict) => Ok(Object::Dictionary(self.copy_dictionary(source, dict)?)),
            Object::Array(items) => {
                let mut new_items = Vec::with_capacity(items.len());
                for item in items {
                    new_items.push(self.copy_object(source, item)?);
                }
                Ok(Object::Array(new_items))
            }
            Object::Stream(stream) => {
                let dict = self.copy_dictionary(source, &stream.dict)?;
                Ok(Object::Stream(Stream::new(dict, stream.content.clone())))
            }
            Object::Reference(ref_id) => {
                if let Some(&new_id) = self.copied.get(ref_id) {
                    return Ok(Object::Reference(new_id));
                }
                match source.get_object(*ref_id) {
                    Ok(referenced) => {
                        let new_id = self.target.new_object_id();
                        self.copied.insert(*ref_id, new_id);
                        let cloned = self.copy_object(source, referenced)?;
                        self.target.objects.insert(new_id, cloned);
                        Ok(Object::Reference(new_id))
                    }
                    Err(err) => {
                        warn!(?ref_id, %err, "Cannot resolve reference, using Null");
                        Ok(Object::Null)
                    }
                }
            }
            other => Ok(other.clone()),
        }
    }

    /// Write the page tree root and serialise.
    fn finish(mut self) -> Result<Vec<u8>> {
        let count = self.kids.len() as i64;
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => self.kids,
            "Count" => count,
        };
        self.target
            .objects
            .insert(self.pages_id, Object::Dictionary(pages));

        let mut output = Vec::new();
        self.target.save_to(&mut output).map_err(|err| {
            BlattwerkError::PdfError(format!("failed to serialise PDF: {}", err))
        })?;
        Ok(output)
    }
}

/// Walk up the page tree for an attribute the page itself does not set.
fn inherited_attribute<'a>(
    source: &'a Document,
    page: &'a Dictionary,
    key: &[u8],
) -> Option<&'a Object> {
    let mut node = page;
    for _ in 0..MAX_TREE_DEPTH {
        let parent_id = node.get(b"Parent").ok()?.as_reference().ok()?;
        node = source.get_dictionary(parent_id).ok()?;
        if let Ok(value) = node.get(key) {
            return Some(value);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{numbered_pdf, page_labels};

    #[test]
    fn page_count_matches_source() {
        let reader = PdfReader::from_bytes(&numbered_pdf(4)).unwrap();
        assert_eq!(reader.page_count(), 4);
        assert!(reader.source_path().is_none());
    }

    #[test]
    fn apply_order_rewrites_page_sequence() {
        let reader = PdfReader::from_bytes(&numbered_pdf(5)).unwrap();
        let order = PageOrder::identity(5).move_slot(4, 1);

        let output = reader.apply_order(&order).unwrap();

        assert_eq!(page_labels(&output), vec![1, 5, 2, 3, 4]);
    }

    #[test]
    fn apply_order_rejects_wrong_length() {
        let reader = PdfReader::from_bytes(&numbered_pdf(3)).unwrap();
        let err = reader.apply_order(&PageOrder::identity(2)).unwrap_err();
        assert!(matches!(err, BlattwerkError::NotAPermutation { len: 3, .. }));
    }

    #[test]
    fn select_pages_allows_repeats_and_checks_range() {
        let reader = PdfReader::from_bytes(&numbered_pdf(3)).unwrap();
        let output = reader.select_pages(&[2, 2, 0]).unwrap();
        assert_eq!(page_labels(&output), vec![3, 3, 1]);
        assert!(reader.select_pages(&[3]).is_err());
        assert!(reader.select_pages(&[]).is_err());
    }

    #[test]
    fn inherited_media_box_is_materialised() {
        let reader = PdfReader::from_bytes(&numbered_pdf(2)).unwrap();
        let output = reader.select_pages(&[1]).unwrap();

        let doc = Document::load_mem(&output).unwrap();
        let page_id = *doc.get_pages().get(&1).unwrap();
        let page = doc.get_dictionary(page_id).unwrap();
        assert!(page.has(b"MediaBox"));
        assert!(page.has(b"Resources"));
    }

    #[test]
    fn shared_font_is_copied_once() {
        let reader = PdfReader::from_bytes(&numbered_pdf(3)).unwrap();
        let output = reader.select_pages(&[0, 1, 2]).unwrap();

        let doc = Document::load_mem(&output).unwrap();
        let fonts = doc
            .objects
            .values()
            .filter(|obj| {
                obj.as_dict()
                    .ok()
                    .and_then(|d| d.get(b"Type").ok())
                    .and_then(|t| t.as_name().ok())
                    == Some(b"Font".as_slice())
            })
            .count();
        assert_eq!(fonts, 1);
    }

    #[test]
    fn split_single_defaults_to_first_page() {
        let reader = PdfReader::from_bytes(&numbered_pdf(3)).unwrap();
        let output = reader.split_single(&[]).unwrap();
        assert_eq!(page_labels(&output), vec![1]);
    }

    #[test]
    fn split_groups_skips_empty_groups() {
        let reader = PdfReader::from_bytes(&numbered_pdf(4)).unwrap();
        let outputs = reader
            .split_groups(&[vec![0, 1], vec![], vec![3]])
            .unwrap();

        let indices: Vec<usize> = outputs.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![0, 2]);
        assert_eq!(page_labels(&outputs[1].1), vec![4]);
    }

    #[test]
    fn merge_appends_in_order() {
        let first = numbered_pdf(2);
        let second = numbered_pdf(3);
        let merged = merge_all(&[&first, &second]).unwrap();
        assert_eq!(page_labels(&merged), vec![1, 2, 1, 2, 3]);
    }

    #[test]
    fn merge_of_nothing_is_no_input() {
        assert!(matches!(merge_all(&[]), Err(BlattwerkError::NoInput)));
    }

    #[test]
    fn compress_keeps_every_page() {
        let reader = PdfReader::from_bytes(&numbered_pdf(3)).unwrap();
        let output = reader.compress().unwrap();
        assert_eq!(page_labels(&output), vec![1, 2, 3]);
    }
}
