use anyhow::Result;

use super::constant::ConstantInstruction;
use super::copy::CopyInstruction;
use super::range::RangeCheckInstruction;
use super::Instruction;
use crate::air::parser::AirParser;
use crate::air::AirConstraint;
use crate::chip::bool::{BitConstraint, SelectInstruction};
use crate::chip::trace::writer::TraceWriter;
use crate::chip::uint::add::LimbAddInstruction;
use crate::chip::uint::bits::BitDecompositionInstruction;
use crate::chip::uint::compare::GreaterThanHint;
use crate::math::prelude::*;

/// An entry of the schedule: either a custom instruction of the chip or a builtin one.
#[derive(Debug, Clone)]
pub enum AirInstruction<F, I> {
    CustomInstruction(I),
    Constant(ConstantInstruction<F>),
    Copy(CopyInstruction),
    Bit(BitConstraint),
    Range(RangeCheckInstruction),
    Select(SelectInstruction),
    BitDecomposition(BitDecompositionInstruction),
    LimbAdd(LimbAddInstruction),
    GreaterThan(GreaterThanHint),
}

impl<F: Field, AP: AirParser<Field = F>, I: AirConstraint<AP>> AirConstraint<AP>
    for AirInstruction<F, I>
{
    fn eval(&self, parser: &mut AP) {
        match self {
            AirInstruction::CustomInstruction(i) => i.eval(parser),
            AirInstruction::Constant(i) => i.eval(parser),
            AirInstruction::Copy(i) => i.eval(parser),
            AirInstruction::Bit(i) => i.eval(parser),
            AirInstruction::Range(i) => i.eval(parser),
            AirInstruction::Select(i) => i.eval(parser),
            AirInstruction::BitDecomposition(i) => i.eval(parser),
            AirInstruction::LimbAdd(i) => i.eval(parser),
            AirInstruction::GreaterThan(i) => i.eval(parser),
        }
    }
}

impl<F: PrimeField64, I: Instruction<F>> Instruction<F> for AirInstruction<F, I> {
    fn write(&self, writer: &mut TraceWriter<F>) -> Result<()> {
        match self {
            AirInstruction::CustomInstruction(i) => i.write(writer),
            AirInstruction::Constant(i) => i.write(writer),
            AirInstruction::Copy(i) => i.write(writer),
            AirInstruction::Bit(i) => i.write(writer),
            AirInstruction::Range(i) => i.write(writer),
            AirInstruction::Select(i) => i.write(writer),
            AirInstruction::BitDecomposition(i) => i.write(writer),
            AirInstruction::LimbAdd(i) => i.write(writer),
            AirInstruction::GreaterThan(i) => i.write(writer),
        }
    }
}
