use core::marker::PhantomData;

use serde::{Deserialize, Serialize};

use super::memory::CellSlice;
use super::{CellType, Register, RegisterSerializable, RegisterSized};
use crate::chip::field::parameters::FieldParameters;

/// One limb of `P`, range checked to `P::NB_BITS_PER_LIMB` bits.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct LimbRegister<P: FieldParameters> {
    register: CellSlice,
    _marker: PhantomData<P>,
}

impl<P: FieldParameters> RegisterSerializable for LimbRegister<P> {
    const CELL: CellType = CellType::Limb(P::NB_BITS_PER_LIMB);

    fn register(&self) -> &CellSlice {
        &self.register
    }

    fn from_register_unsafe(register: CellSlice) -> Self {
        Self {
            register,
            _marker: PhantomData,
        }
    }
}

impl<P: FieldParameters> RegisterSized for LimbRegister<P> {
    fn size_of() -> usize {
        1
    }
}

impl<P: FieldParameters> Register for LimbRegister<P> {
    type Value<T> = T;

    fn value_from_slice<T: Clone>(slice: &[T]) -> Self::Value<T> {
        slice[0].clone()
    }

    fn align<T>(value: &Self::Value<T>) -> &[T] {
        core::slice::from_ref(value)
    }
}
