//! Exact-occurrence span location.
//!
//! Maps a candidate substring back onto its position in the source
//! document. This is the fallback path for pipelines whose chunker did not
//! record offsets; chunkers that know their offsets by construction should
//! supply them directly and skip this module entirely, because substring
//! search has a known hazard: repeated chunk text always resolves to the
//! FIRST occurrence, which may not be the position the chunk actually came
//! from.

use crate::span::Span;

/// Byte offsets of the first exact occurrence of `needle` in `document`.
///
/// Returns `None` when `needle` does not occur; there is no negative-offset
/// sentinel to accidentally do arithmetic on.
///
/// # Example
///
/// ```rust
/// use spancov::locate::locate;
///
/// // Repeated text collapses onto the first occurrence.
/// let span = locate("abcabc", "abc").unwrap();
/// assert_eq!((span.start(), span.end()), (0, 3));
///
/// assert!(locate("abcabc", "xyz").is_none());
/// ```
#[must_use]
pub fn locate(document: &str, needle: &str) -> Option<Span> {
    document
        .find(needle)
        .map(|start| Span::from_raw(start, start + needle.len()))
}

/// Locate a whole chunk list, keeping one slot per chunk.
///
/// Chunks that cannot be found get [`Span::empty`] at offset 0: the slot
/// still counts toward the retrieved list's length, but the span adds
/// nothing to any intersection or length sum.
#[must_use]
pub fn locate_chunks<S: AsRef<str>>(document: &str, chunks: &[S]) -> Vec<Span> {
    chunks
        .iter()
        .enumerate()
        .map(|(i, chunk)| {
            locate(document, chunk.as_ref()).unwrap_or_else(|| {
                log::warn!(
                    "chunk {i} ({} bytes) not found in document, using empty span",
                    chunk.as_ref().len()
                );
                Span::empty(0)
            })
        })
        .collect()
}
