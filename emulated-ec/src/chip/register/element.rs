use serde::{Deserialize, Serialize};

use super::memory::CellSlice;
use super::{CellType, Register, RegisterSerializable, RegisterSized};

/// A single native field element with no attached constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementRegister(CellSlice);

impl RegisterSerializable for ElementRegister {
    const CELL: CellType = CellType::Element;

    fn register(&self) -> &CellSlice {
        &self.0
    }

    fn from_register_unsafe(register: CellSlice) -> Self {
        Self(register)
    }
}

impl RegisterSized for ElementRegister {
    fn size_of() -> usize {
        1
    }
}

impl Register for ElementRegister {
    type Value<T> = T;

    fn value_from_slice<T: Clone>(slice: &[T]) -> Self::Value<T> {
        slice[0].clone()
    }

    fn align<T>(value: &Self::Value<T>) -> &[T] {
        core::slice::from_ref(value)
    }
}
