use core::marker::PhantomData;

use serde::{Deserialize, Serialize};

use super::memory::CellSlice;
use super::{CellType, Register, RegisterSerializable};
use crate::air::parser::AirParser;

/// A fixed-length run of registers of the same type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct ArrayRegister<T: Register> {
    register: CellSlice,
    length: usize,
    _marker: PhantomData<T>,
}

impl<T: Register> RegisterSerializable for ArrayRegister<T> {
    const CELL: CellType = T::CELL;

    fn register(&self) -> &CellSlice {
        &self.register
    }

    fn from_register_unsafe(register: CellSlice) -> Self {
        Self {
            register,
            length: register.len() / T::size_of(),
            _marker: PhantomData,
        }
    }
}

impl<T: Register> ArrayRegister<T> {
    pub const fn len(&self) -> usize {
        self.length
    }

    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn get(&self, idx: usize) -> T {
        assert!(
            idx < self.length,
            "Index {idx} out of bounds for an array of length {}",
            self.length
        );
        let size = T::size_of();
        T::from_register_unsafe(self.register.get_range(idx * size..(idx + 1) * size))
    }

    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        (0..self.length).map(move |i| self.get(i))
    }

    pub fn eval_vec<AP: AirParser>(&self, parser: &AP) -> Vec<T::Value<AP::Var>> {
        self.iter().map(|element| element.eval(parser)).collect()
    }
}
