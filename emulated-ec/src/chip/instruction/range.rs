use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::Instruction;
use crate::air::parser::AirParser;
use crate::air::AirConstraint;
use crate::chip::constraint::LookupTable;
use crate::chip::register::memory::CellSlice;
use crate::chip::trace::writer::TraceWriter;
use crate::math::prelude::*;

/// Looks up every cell of `values` in the range table of `bits` bits.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RangeCheckInstruction {
    pub values: CellSlice,
    pub bits: usize,
}

impl<AP: AirParser> AirConstraint<AP> for RangeCheckInstruction {
    fn eval(&self, parser: &mut AP) {
        let values = self.values.eval_slice(parser).to_vec();
        for value in values {
            parser.lookup(LookupTable::Range(self.bits), &[value]);
        }
    }
}

impl<F: PrimeField64> Instruction<F> for RangeCheckInstruction {
    fn write(&self, _writer: &mut TraceWriter<F>) -> Result<()> {
        Ok(())
    }
}
