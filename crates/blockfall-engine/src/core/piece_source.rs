use std::fmt;

use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;

use super::{catalog::PieceCatalog, piece::PieceKind};

/// Source of piece draws for a [`PieceCatalog`].
///
/// Sessions own their source, so tests and replays can substitute a
/// deterministic sequence for the default random one.
pub trait PieceSource: fmt::Debug {
    /// Returns the index of the next definition to spawn, in `0..catalog.len()`.
    fn pick(&mut self, catalog: &PieceCatalog) -> usize;
}

impl<S> PieceSource for Box<S>
where
    S: PieceSource + ?Sized,
{
    fn pick(&mut self, catalog: &PieceCatalog) -> usize {
        (**self).pick(catalog)
    }
}

/// Uniform random draw over the catalog.
///
/// # Example
///
/// ```
/// use blockfall_engine::{PieceCatalog, RandomPieceSource};
///
/// let catalog = PieceCatalog::standard();
/// let mut a = RandomPieceSource::with_seed(7);
/// let mut b = RandomPieceSource::with_seed(7);
///
/// for _ in 0..20 {
///     assert_eq!(
///         catalog.spawn_definition(&mut a).kind(),
///         catalog.spawn_definition(&mut b).kind(),
///     );
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RandomPieceSource {
    rng: Pcg32,
}

impl Default for RandomPieceSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPieceSource {
    /// Creates a source seeded from the OS's random data source.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: Pcg32::from_os_rng(),
        }
    }

    /// Like [`Self::new`], but with a fixed seed for reproducible sequences.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl PieceSource for RandomPieceSource {
    fn pick(&mut self, catalog: &PieceCatalog) -> usize {
        self.rng.random_range(0..catalog.len())
    }
}

/// Replays a fixed list of kinds, cycling back to the start when exhausted.
#[derive(Debug, Clone)]
pub struct ScriptedPieceSource {
    kinds: Vec<PieceKind>,
    cursor: usize,
}

impl ScriptedPieceSource {
    /// # Panics
    ///
    /// Panics if `kinds` is empty.
    pub fn new(kinds: impl IntoIterator<Item = PieceKind>) -> Self {
        let kinds: Vec<_> = kinds.into_iter().collect();
        assert!(!kinds.is_empty(), "scripted piece sequence must not be empty");
        Self { kinds, cursor: 0 }
    }

    /// Number of pieces drawn so far.
    #[must_use]
    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

impl PieceSource for ScriptedPieceSource {
    /// # Panics
    ///
    /// Panics if the scripted kind is not part of `catalog`.
    fn pick(&mut self, catalog: &PieceCatalog) -> usize {
        let kind = self.kinds[self.cursor % self.kinds.len()];
        self.cursor += 1;
        catalog
            .index_of(kind)
            .unwrap_or_else(|| panic!("scripted piece {kind:?} is not in the catalog"))
    }
}
