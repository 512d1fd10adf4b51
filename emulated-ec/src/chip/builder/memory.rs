use super::{AirBuilder, AirParameters};
use crate::chip::bool::BitConstraint;
use crate::chip::instruction::range::RangeCheckInstruction;
use crate::chip::instruction::set::AirInstruction;
use crate::chip::register::array::ArrayRegister;
use crate::chip::register::memory::CellSlice;
use crate::chip::register::{CellType, Register, RegisterSerializable};

impl<L: AirParameters> AirBuilder<L> {
    /// Allocates `size` fresh cells of the given kind and returns them as a `CellSlice`.
    ///
    /// `Bit` cells get a boolean constraint and `Limb` cells a range lookup.
    pub(crate) fn get_memory(&mut self, size: usize, cell: CellType) -> CellSlice {
        let register = CellSlice::new(self.num_cells, size);
        self.num_cells += size;
        if size == 0 {
            return register;
        }
        match cell {
            CellType::Element => {}
            CellType::Bit => {
                self.register_air_instruction(AirInstruction::Bit(BitConstraint(register)));
            }
            CellType::Limb(bits) => {
                let range = RangeCheckInstruction {
                    values: register,
                    bits,
                };
                self.register_air_instruction(AirInstruction::Range(range));
            }
        }
        register
    }

    /// Allocates a new register according to type `T` and returns it.
    pub fn alloc<T: Register>(&mut self) -> T {
        self.max_register_len = self.max_register_len.max(T::size_of());
        let register = self.get_memory(T::size_of(), T::CELL);
        T::from_register(register)
    }

    /// Allocates `length` consecutive registers of type `T`.
    pub fn alloc_array<T: Register>(&mut self, length: usize) -> ArrayRegister<T> {
        if length > 0 {
            self.max_register_len = self.max_register_len.max(T::size_of());
        }
        let register = self.get_memory(T::size_of() * length, T::CELL);
        ArrayRegister::from_register_unsafe(register)
    }
}
