use super::instruction::FromFieldInstruction;
use super::parameters::FieldParameters;
use super::register::FieldRegister;
use super::sub::FpSubInstruction;
use crate::chip::builder::AirBuilder;
use crate::chip::register::bit::BitRegister;
use crate::chip::AirParameters;

impl<L: AirParameters> AirBuilder<L> {
    /// Computes `-a`.
    pub fn fp_neg<P: FieldParameters>(&mut self, a: &FieldRegister<P>) -> FieldRegister<P>
    where
        L::Instruction: From<FpSubInstruction<P>>,
    {
        let zero = self.fp_zero::<P>();
        self.fp_sub(&zero, a)
    }

    /// `bit ? a : b`, limb by limb.
    pub fn fp_select<P: FieldParameters>(
        &mut self,
        bit: &BitRegister,
        a: &FieldRegister<P>,
        b: &FieldRegister<P>,
    ) -> FieldRegister<P> {
        self.select(bit, a, b)
    }

    /// Computes `b + selector * (a - b)`.
    ///
    /// For a selector in `{0, 1}` this is `a` when the selector is one and `b` when it is zero.
    pub fn fp_blend<P: FieldParameters>(
        &mut self,
        selector: &FieldRegister<P>,
        a: &FieldRegister<P>,
        b: &FieldRegister<P>,
    ) -> FieldRegister<P>
    where
        L::Instruction: FromFieldInstruction<P>,
    {
        let difference = self.fp_sub(a, b);
        let shift = self.fp_mul(selector, &difference);
        self.fp_add(b, &shift)
    }
}
