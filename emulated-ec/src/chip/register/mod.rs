use core::fmt::Debug;

use serde::{Deserialize, Serialize};

use self::memory::CellSlice;
use crate::air::parser::AirParser;

pub mod array;
pub mod bit;
pub mod element;
pub mod limb;
pub mod memory;

/// The kind of value a cell may hold.
///
/// The builder attaches the matching constraint to every allocated cell: a boolean constraint
/// for `Bit` and a range lookup for `Limb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellType {
    Element,
    Bit,
    Limb(usize),
}

/// Adds serialization and deserialization to a register for converting between the canonical
/// cell slice and the register type.
pub trait RegisterSerializable: 'static + Debug + Clone + Copy + Send + Sync {
    const CELL: CellType;

    fn register(&self) -> &CellSlice;

    /// Initializes the register given a cell slice without checks on its length.
    fn from_register_unsafe(register: CellSlice) -> Self;
}

pub trait RegisterSized {
    /// The number of cells the register occupies.
    fn size_of() -> usize;
}

/// A register is a contiguous run of cells of the arena interpreted as a typed value.
pub trait Register: RegisterSerializable + RegisterSized {
    type Value<T>;

    fn value_from_slice<T: Clone>(slice: &[T]) -> Self::Value<T>;

    fn align<T>(value: &Self::Value<T>) -> &[T];

    /// Initializes the register given a cell slice of the right length.
    fn from_register(register: CellSlice) -> Self {
        if register.len() != Self::size_of() {
            panic!(
                "Invalid register length: expected {}, got {}",
                Self::size_of(),
                register.len()
            );
        }
        Self::from_register_unsafe(register)
    }

    fn eval<AP: AirParser>(&self, parser: &AP) -> Self::Value<AP::Var> {
        Self::value_from_slice(self.register().eval_slice(parser))
    }
}
