use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::weierstrass::full_add::SWSlopeHint;
use super::weierstrass::WeierstrassParameters;
use crate::air::AirConstraint;
use crate::chip::field::add::FpAddInstruction;
use crate::chip::field::instruction::{FpInstruction, FromFieldInstruction};
use crate::chip::field::inverse::FpInverseHint;
use crate::chip::field::mul::FpMulInstruction;
use crate::chip::field::sub::FpSubInstruction;
use crate::chip::instruction::Instruction;
use crate::chip::trace::writer::TraceWriter;
use crate::math::prelude::*;
use crate::polynomial::parser::PolynomialParser;

/// The instruction set of the curve gadgets: base field arithmetic plus curve specific hints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound = "")]
pub enum ECInstruction<E: WeierstrassParameters> {
    Fp(FpInstruction<E::BaseField>),
    SlopeHint(SWSlopeHint<E>),
}

pub trait FromECInstruction<E: WeierstrassParameters>:
    FromFieldInstruction<E::BaseField> + From<SWSlopeHint<E>>
{
}

impl<E: WeierstrassParameters> FromECInstruction<E> for ECInstruction<E> {}

impl<E: WeierstrassParameters> FromFieldInstruction<E::BaseField> for ECInstruction<E> {}

impl<AP: PolynomialParser, E: WeierstrassParameters> AirConstraint<AP> for ECInstruction<E> {
    fn eval(&self, parser: &mut AP) {
        match self {
            ECInstruction::Fp(instruction) => AirConstraint::<AP>::eval(instruction, parser),
            ECInstruction::SlopeHint(instruction) => AirConstraint::<AP>::eval(instruction, parser),
        }
    }
}

impl<F: PrimeField64, E: WeierstrassParameters> Instruction<F> for ECInstruction<E> {
    fn write(&self, writer: &mut TraceWriter<F>) -> Result<()> {
        match self {
            ECInstruction::Fp(instruction) => Instruction::<F>::write(instruction, writer),
            ECInstruction::SlopeHint(instruction) => Instruction::<F>::write(instruction, writer),
        }
    }
}

impl<E: WeierstrassParameters> From<SWSlopeHint<E>> for ECInstruction<E> {
    fn from(instr: SWSlopeHint<E>) -> Self {
        ECInstruction::SlopeHint(instr)
    }
}

impl<E: WeierstrassParameters> From<FpAddInstruction<E::BaseField>> for ECInstruction<E> {
    fn from(instr: FpAddInstruction<E::BaseField>) -> Self {
        ECInstruction::Fp(instr.into())
    }
}

impl<E: WeierstrassParameters> From<FpSubInstruction<E::BaseField>> for ECInstruction<E> {
    fn from(instr: FpSubInstruction<E::BaseField>) -> Self {
        ECInstruction::Fp(instr.into())
    }
}

impl<E: WeierstrassParameters> From<FpMulInstruction<E::BaseField>> for ECInstruction<E> {
    fn from(instr: FpMulInstruction<E::BaseField>) -> Self {
        ECInstruction::Fp(instr.into())
    }
}

impl<E: WeierstrassParameters> From<FpInverseHint<E::BaseField>> for ECInstruction<E> {
    fn from(instr: FpInverseHint<E::BaseField>) -> Self {
        ECInstruction::Fp(instr.into())
    }
}
