use anyhow::{ensure, Result};
use itertools::Itertools;

use super::table::WitnessTable;
use crate::chip::layout::Layout;
use crate::chip::register::array::ArrayRegister;
use crate::chip::register::memory::CellSlice;
use crate::chip::register::Register;
use crate::math::prelude::*;

/// Reads and writes registers of the arena into a [`WitnessTable`].
#[derive(Debug, Clone)]
pub struct TraceWriter<F> {
    layout: Layout,
    num_cells: usize,
    table: WitnessTable<F>,
}

impl<F: PrimeField64> TraceWriter<F> {
    pub fn new(layout: Layout, num_cells: usize) -> Result<Self> {
        Ok(Self {
            layout,
            num_cells,
            table: WitnessTable::new(layout.width())?,
        })
    }

    pub const fn layout(&self) -> Layout {
        self.layout
    }

    pub fn table(&self) -> &WitnessTable<F> {
        &self.table
    }

    pub fn into_table(self) -> WitnessTable<F> {
        self.table
    }

    fn check_bounds(&self, slice: &CellSlice) -> Result<()> {
        ensure!(
            slice.end() <= self.num_cells,
            "cells {:?} are outside of the arena of {} cells",
            slice.indices(),
            self.num_cells
        );
        Ok(())
    }

    pub fn read_slice(&self, slice: &CellSlice) -> Result<Vec<F>> {
        self.check_bounds(slice)?;
        slice
            .indices()
            .map(|index| {
                let cell = self.layout.cell(index);
                self.table.read(cell.column, cell.row)
            })
            .collect()
    }

    pub fn read<T: Register>(&self, register: &T) -> Result<T::Value<F>> {
        let values = self.read_slice(register.register())?;
        Ok(T::value_from_slice(&values))
    }

    pub fn write_slice(&mut self, slice: &CellSlice, values: &[F]) -> Result<()> {
        self.check_bounds(slice)?;
        ensure!(
            slice.len() == values.len(),
            "expected {} values for cells {:?}, got {}",
            slice.len(),
            slice.indices(),
            values.len()
        );
        for (index, value) in slice.indices().zip(values.iter()) {
            let cell = self.layout.cell(index);
            self.table.write(cell.column, cell.row, *value)?;
        }
        Ok(())
    }

    pub fn write<T: Register>(&mut self, register: &T, value: &T::Value<F>) -> Result<()> {
        self.write_slice(register.register(), T::align(value))
    }

    pub fn write_array<T: Register>(
        &mut self,
        array: &ArrayRegister<T>,
        values: &[T::Value<F>],
    ) -> Result<()> {
        ensure!(
            array.len() == values.len(),
            "expected {} values, got {}",
            array.len(),
            values.len()
        );
        for (element, value) in array.iter().zip_eq(values.iter()) {
            self.write(&element, value)?;
        }
        Ok(())
    }
}
