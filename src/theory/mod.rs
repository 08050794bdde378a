//! Music theory: pitch tables, transposition and chord/scale lookups.

pub mod chord;
pub mod lookup;
pub mod pitch;
pub mod transpose;

pub use chord::{spell_chord, ChordNotes};
pub use lookup::{BuiltinTheory, MusicTheory};
pub use transpose::{format_key, transpose_chord, transposed_key};
