pub use self::{active_piece::*, board::*, catalog::*, piece::*, piece_source::*};

pub(crate) mod active_piece;
pub(crate) mod board;
pub(crate) mod catalog;
pub(crate) mod piece;
pub(crate) mod piece_source;
