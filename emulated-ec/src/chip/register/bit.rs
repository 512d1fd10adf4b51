use serde::{Deserialize, Serialize};

use super::memory::CellSlice;
use super::{CellType, Register, RegisterSerializable, RegisterSized};

/// A boolean cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BitRegister(CellSlice);

impl RegisterSerializable for BitRegister {
    const CELL: CellType = CellType::Bit;

    fn register(&self) -> &CellSlice {
        &self.0
    }

    fn from_register_unsafe(register: CellSlice) -> Self {
        Self(register)
    }
}

impl RegisterSized for BitRegister {
    fn size_of() -> usize {
        1
    }
}

impl Register for BitRegister {
    type Value<T> = T;

    fn value_from_slice<T: Clone>(slice: &[T]) -> Self::Value<T> {
        slice[0].clone()
    }

    fn align<T>(value: &Self::Value<T>) -> &[T] {
        core::slice::from_ref(value)
    }
}
