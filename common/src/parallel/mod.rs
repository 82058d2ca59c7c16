//! Chunked parallel iteration over mutable slices.
//!
//! Every iterator here yields the offset of the chunk's first element next to
//! the chunk, so per-element work can recover global indices.

use rayon::prelude::*;


/// Multiplier for number of chunks relative to CPU threads.
const CHUNKS_PER_THREAD: usize = 3;

/// Smallest chunk handed to a worker. Per-element work is a handful of flops,
/// so tiny chunks cost more in scheduling than they save.
const MIN_CHUNK_LEN: usize = 1024;

/// Compute chunk length for `len` elements.
#[inline]
pub fn auto_chunk_size(len: usize) -> usize {
    let num_chunks = rayon::current_num_threads() * CHUNKS_PER_THREAD;
    (len / num_chunks).max(MIN_CHUNK_LEN)
}

/// Compute rows per chunk for an image of `height` rows.
#[inline]
pub fn auto_rows_per_chunk(height: usize) -> usize {
    let num_chunks = rayon::current_num_threads() * CHUNKS_PER_THREAD;
    (height / num_chunks).max(1)
}

// ============================================================================
// Offset wrapper
// ============================================================================

/// Parallel iterator that prepends `index * multiplier` to each item.
pub struct WithOffset<I, T, F> {
    inner: I,
    multiplier: usize,
    transform: F,
    _phantom: std::marker::PhantomData<T>,
}

impl<I, T, F> WithOffset<I, T, F> {
    fn new(inner: I, multiplier: usize, transform: F) -> Self {
        Self {
            inner,
            multiplier,
            transform,
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<I, T, F> ParallelIterator for WithOffset<I, T, F>
where
    I: IndexedParallelIterator,
    T: Send,
    F: Fn(I::Item) -> T + Send + Sync,
{
    type Item = (usize, T);

    fn drive_unindexed<C>(self, consumer: C) -> C::Result
    where
        C: rayon::iter::plumbing::UnindexedConsumer<Self::Item>,
    {
        let multiplier = self.multiplier;
        let transform = self.transform;
        self.inner
            .enumerate()
            .map(move |(idx, item)| (idx * multiplier, transform(item)))
            .drive_unindexed(consumer)
    }
}

impl<I, T, F> IndexedParallelIterator for WithOffset<I, T, F>
where
    I: IndexedParallelIterator,
    T: Send,
    F: Fn(I::Item) -> T + Send + Sync,
{
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn drive<C>(self, consumer: C) -> C::Result
    where
        C: rayon::iter::plumbing::Consumer<Self::Item>,
    {
        let multiplier = self.multiplier;
        let transform = self.transform;
        self.inner
            .enumerate()
            .map(move |(idx, item)| (idx * multiplier, transform(item)))
            .drive(consumer)
    }

    fn with_producer<CB>(self, callback: CB) -> CB::Output
    where
        CB: rayon::iter::plumbing::ProducerCallback<Self::Item>,
    {
        let multiplier = self.multiplier;
        let transform = self.transform;
        self.inner
            .enumerate()
            .map(move |(idx, item)| (idx * multiplier, transform(item)))
            .with_producer(callback)
    }
}

/// Parallel iterator over row-aligned mutable chunks that yields `(chunk_start_row, chunk)` pairs.
pub type ParRowsMutWithOffset<'a, T> =
    WithOffset<rayon::slice::ChunksMut<'a, T>, &'a mut [T], fn(&'a mut [T]) -> &'a mut [T]>;

/// Parallel iterator over two zipped mutable chunks that yields `(offset, (a, b))` pairs.
pub type ParChunks2MutWithOffset<'a, A, B> = WithOffset<
    rayon::iter::Zip<rayon::slice::ChunksMut<'a, A>, rayon::slice::ChunksMut<'a, B>>,
    (&'a mut [A], &'a mut [B]),
    fn((&'a mut [A], &'a mut [B])) -> (&'a mut [A], &'a mut [B]),
>;

fn identity<T>(x: T) -> T {
    x
}

// ============================================================================
// Extension traits
// ============================================================================

/// Extension trait for row-aligned mutable parallel chunks with automatic sizing.
pub trait ParRowsMutAuto<'a, T: Send + 'a> {
    /// Split into mutable parallel chunks of whole rows.
    /// Returns an iterator yielding `(chunk_start_row, chunk)` pairs.
    ///
    /// # Panics
    ///
    /// Panics if `width` is 0 or the slice length is not a multiple of `width`.
    fn par_rows_mut_auto(&'a mut self, width: usize) -> ParRowsMutWithOffset<'a, T>;
}

impl<'a, T: Send + 'a> ParRowsMutAuto<'a, T> for [T] {
    fn par_rows_mut_auto(&'a mut self, width: usize) -> ParRowsMutWithOffset<'a, T> {
        assert!(width > 0, "width must be > 0");
        assert_eq!(self.len() % width, 0, "slice length must be whole rows");
        let height = self.len() / width;
        let chunk_rows = auto_rows_per_chunk(height);
        WithOffset::new(
            self.par_chunks_mut(width * chunk_rows),
            chunk_rows,
            identity as fn(&'a mut [T]) -> &'a mut [T],
        )
    }
}

/// Extension trait for walking two equal-length slices in lockstep.
pub trait ParZipMut<'a, T: Send + 'a> {
    /// Zip this slice with another for parallel chunked iteration.
    fn par_zip<U: Send + 'a>(self, other: &'a mut [U]) -> ZippedSlices2<'a, T, U>;
}

impl<'a, T: Send + 'a> ParZipMut<'a, T> for &'a mut [T] {
    fn par_zip<U: Send + 'a>(self, other: &'a mut [U]) -> ZippedSlices2<'a, T, U> {
        ZippedSlices2(self, other)
    }
}

/// Two zipped mutable slices ready for parallel iteration.
pub struct ZippedSlices2<'a, A: Send, B: Send>(pub &'a mut [A], pub &'a mut [B]);

impl<'a, A: Send + 'a, B: Send + 'a> ZippedSlices2<'a, A, B> {
    /// Split both slices at the same boundaries into automatically sized chunks.
    ///
    /// # Panics
    ///
    /// Panics if the slices differ in length.
    pub fn par_chunks_mut_auto(self) -> ParChunks2MutWithOffset<'a, A, B> {
        assert_eq!(
            self.0.len(),
            self.1.len(),
            "Zipped slices must have equal length"
        );
        let chunk_size = auto_chunk_size(self.0.len());
        WithOffset::new(
            self.0
                .par_chunks_mut(chunk_size)
                .zip(self.1.par_chunks_mut(chunk_size)),
            chunk_size,
            identity as fn((&'a mut [A], &'a mut [B])) -> (&'a mut [A], &'a mut [B]),
        )
    }
}
