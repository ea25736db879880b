use std::sync::{Arc, LazyLock};

use crate::DefinitionError;

use super::{
    piece::{PieceDefinition, PieceKind, RotationLayout},
    piece_source::PieceSource,
};

type LayoutRows = &'static [&'static str];

const I_LAYOUTS: &[LayoutRows] = &[
    &["0000", "1111", "0000", "0000"],
    &["0010", "0010", "0010", "0010"],
];

const J_LAYOUTS: &[LayoutRows] = &[
    &["100", "111", "000"],
    &["011", "010", "010"],
    &["000", "111", "001"],
    &["010", "010", "110"],
];

const L_LAYOUTS: &[LayoutRows] = &[
    &["001", "111", "000"],
    &["010", "010", "011"],
    &["000", "111", "100"],
    &["110", "010", "010"],
];

// The O block sits in columns 1..=2 of a 3-wide mask.
const O_LAYOUTS: &[LayoutRows] = &[&["011", "011", "000"]];

const S_LAYOUTS: &[LayoutRows] = &[&["011", "110", "000"], &["010", "011", "001"]];

const T_LAYOUTS: &[LayoutRows] = &[
    &["010", "111", "000"],
    &["010", "011", "010"],
    &["000", "111", "010"],
    &["010", "110", "010"],
];

const Z_LAYOUTS: &[LayoutRows] = &[&["110", "011", "000"], &["001", "011", "010"]];

const STANDARD_SHAPES: [(PieceKind, &[LayoutRows]); PieceKind::LEN] = [
    (PieceKind::I, I_LAYOUTS),
    (PieceKind::J, J_LAYOUTS),
    (PieceKind::L, L_LAYOUTS),
    (PieceKind::O, O_LAYOUTS),
    (PieceKind::S, S_LAYOUTS),
    (PieceKind::T, T_LAYOUTS),
    (PieceKind::Z, Z_LAYOUTS),
];

static STANDARD: LazyLock<PieceCatalog> = LazyLock::new(|| {
    let definitions = STANDARD_SHAPES
        .iter()
        .map(|&(kind, layouts)| {
            let layouts = layouts
                .iter()
                .map(|rows| RotationLayout::parse(rows))
                .collect::<Result<Vec<_>, _>>()?;
            PieceDefinition::new(kind, kind.color(), layouts)
        })
        .collect::<Result<Vec<_>, _>>()
        .and_then(PieceCatalog::new);
    definitions.expect("built-in piece shapes should be well-formed")
});

/// The set of piece definitions a session draws from.
///
/// Definitions are reference counted so that the active piece, the queued
/// next piece and the catalog all share one immutable copy.
///
/// # Example
///
/// ```
/// use blockfall_engine::{PieceCatalog, PieceKind, ScriptedPieceSource};
///
/// let catalog = PieceCatalog::standard();
/// let mut source = ScriptedPieceSource::new([PieceKind::T]);
///
/// let definition = catalog.spawn_definition(&mut source);
/// assert_eq!(definition.kind(), PieceKind::T);
/// assert_eq!(definition.layout_count(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct PieceCatalog {
    definitions: Vec<Arc<PieceDefinition>>,
}

impl PieceCatalog {
    pub fn new(definitions: Vec<PieceDefinition>) -> Result<Self, DefinitionError> {
        if definitions.is_empty() {
            return Err(DefinitionError::EmptyCatalog);
        }
        for (i, def) in definitions.iter().enumerate() {
            if definitions[..i].iter().any(|d| d.kind() == def.kind()) {
                return Err(DefinitionError::DuplicateKind { kind: def.kind() });
            }
        }
        Ok(Self {
            definitions: definitions.into_iter().map(Arc::new).collect(),
        })
    }

    /// The seven standard tetrominoes in `I, J, L, O, S, T, Z` order.
    #[must_use]
    pub fn standard() -> Self {
        PieceCatalog::clone(&STANDARD)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    #[must_use]
    pub fn definitions(&self) -> &[Arc<PieceDefinition>] {
        &self.definitions
    }

    #[must_use]
    pub fn index_of(&self, kind: PieceKind) -> Option<usize> {
        self.definitions.iter().position(|d| d.kind() == kind)
    }

    #[must_use]
    pub fn get(&self, kind: PieceKind) -> Option<&Arc<PieceDefinition>> {
        self.definitions.iter().find(|d| d.kind() == kind)
    }

    /// Widest layout across all definitions.
    #[must_use]
    pub fn max_width(&self) -> usize {
        self.definitions
            .iter()
            .map(|d| d.max_width())
            .max()
            .unwrap_or(0)
    }

    /// Draws one definition using `source`.
    ///
    /// Indices returned by the source are reduced modulo the catalog size.
    pub fn spawn_definition(&self, source: &mut dyn PieceSource) -> Arc<PieceDefinition> {
        let index = source.pick(self) % self.definitions.len();
        Arc::clone(&self.definitions[index])
    }
}
