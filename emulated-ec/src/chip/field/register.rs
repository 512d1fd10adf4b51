use core::marker::PhantomData;

use serde::{Deserialize, Serialize};

use super::parameters::FieldParameters;
use crate::chip::register::memory::CellSlice;
use crate::chip::register::{CellType, Register, RegisterSerializable, RegisterSized};
use crate::polynomial::Polynomial;

/// A register for representing a field element. The value is decomposed into `P::NB_LIMBS` limbs
/// of `P::NB_BITS_PER_LIMB` bits, each range checked through a lookup.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct FieldRegister<P: FieldParameters> {
    register: CellSlice,
    _marker: PhantomData<P>,
}

impl<P: FieldParameters> RegisterSerializable for FieldRegister<P> {
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

impl<P: FieldParameters> RegisterSized for FieldRegister<P> {
    fn size_of() -> usize {
        P::NB_LIMBS
    }
}

impl<P: FieldParameters> Register for FieldRegister<P> {
    type Value<T> = Polynomial<T>;

    fn value_from_slice<T: Clone>(slice: &[T]) -> Self::Value<T> {
        Polynomial::from_slice(slice)
    }

    fn align<T>(value: &Self::Value<T>) -> &[T] {
        value.as_slice()
    }
}
