use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::add::FpAddInstruction;
use super::inverse::FpInverseHint;
use super::mul::FpMulInstruction;
use super::parameters::FieldParameters;
use super::sub::FpSubInstruction;
use crate::air::AirConstraint;
use crate::chip::instruction::Instruction;
use crate::chip::trace::writer::TraceWriter;
use crate::math::prelude::*;
use crate::polynomial::parser::PolynomialParser;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound = "")]
pub enum FpInstruction<P: FieldParameters> {
    Add(FpAddInstruction<P>),
    Sub(FpSubInstruction<P>),
    Mul(FpMulInstruction<P>),
    Inverse(FpInverseHint<P>),
}

/// Instruction sets that embed every instruction of the modular gadgets over `P`.
pub trait FromFieldInstruction<P: FieldParameters>:
    From<FpAddInstruction<P>>
    + From<FpSubInstruction<P>>
    + From<FpMulInstruction<P>>
    + From<FpInverseHint<P>>
{
}

impl<P: FieldParameters> FromFieldInstruction<P> for FpInstruction<P> {}

impl<AP: PolynomialParser, P: FieldParameters> AirConstraint<AP> for FpInstruction<P> {
    fn eval(&self, parser: &mut AP) {
        match self {
            FpInstruction::Add(instruction) => AirConstraint::<AP>::eval(instruction, parser),
            FpInstruction::Sub(instruction) => AirConstraint::<AP>::eval(instruction, parser),
            FpInstruction::Mul(instruction) => AirConstraint::<AP>::eval(instruction, parser),
            FpInstruction::Inverse(instruction) => AirConstraint::<AP>::eval(instruction, parser),
        }
    }
}

impl<F: PrimeField64, P: FieldParameters> Instruction<F> for FpInstruction<P> {
    fn write(&self, writer: &mut TraceWriter<F>) -> Result<()> {
        match self {
            FpInstruction::Add(instruction) => Instruction::<F>::write(instruction, writer),
            FpInstruction::Sub(instruction) => Instruction::<F>::write(instruction, writer),
            FpInstruction::Mul(instruction) => Instruction::<F>::write(instruction, writer),
            FpInstruction::Inverse(instruction) => Instruction::<F>::write(instruction, writer),
        }
    }
}

impl<P: FieldParameters> From<FpAddInstruction<P>> for FpInstruction<P> {
    fn from(instr: FpAddInstruction<P>) -> Self {
        FpInstruction::Add(instr)
    }
}

impl<P: FieldParameters> From<FpSubInstruction<P>> for FpInstruction<P> {
    fn from(instr: FpSubInstruction<P>) -> Self {
        FpInstruction::Sub(instr)
    }
}

impl<P: FieldParameters> From<FpMulInstruction<P>> for FpInstruction<P> {
    fn from(instr: FpMulInstruction<P>) -> Self {
        FpInstruction::Mul(instr)
    }
}

impl<P: FieldParameters> From<FpInverseHint<P>> for FpInstruction<P> {
    fn from(instr: FpInverseHint<P>) -> Self {
        FpInstruction::Inverse(instr)
    }
}
