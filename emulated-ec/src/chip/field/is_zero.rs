use super::instruction::FromFieldInstruction;
use super::parameters::FieldParameters;
use super::register::FieldRegister;
use crate::chip::builder::AirBuilder;
use crate::chip::AirParameters;

impl<L: AirParameters> AirBuilder<L> {
    /// Returns `(z, ind)` with `z = a^(-1)` or `0`, and `ind = 1` if `a = 0` and `0` otherwise.
    ///
    /// Constrained by `ind = 1 - a * z`, `a * ind = 0` and `z * ind = 0`.
    pub fn fp_inverse_or_zero<P: FieldParameters>(
        &mut self,
        a: &FieldRegister<P>,
    ) -> (FieldRegister<P>, FieldRegister<P>)
    where
        L::Instruction: FromFieldInstruction<P>,
    {
        let inverse = self.fp_inverse_hint(a, true);
        let product = self.fp_mul(a, &inverse);
        let one = self.fp_one::<P>();
        let indicator = self.fp_sub(&one, &product);

        let a_times_indicator = self.fp_mul(a, &indicator);
        self.fp_assert_zero(&a_times_indicator);
        let inverse_times_indicator = self.fp_mul(&inverse, &indicator);
        self.fp_assert_zero(&inverse_times_indicator);

        (inverse, indicator)
    }

    /// The indicator of `a = 0` as a field element.
    pub fn fp_is_zero<P: FieldParameters>(&mut self, a: &FieldRegister<P>) -> FieldRegister<P>
    where
        L::Instruction: FromFieldInstruction<P>,
    {
        self.fp_inverse_or_zero(a).1
    }
}
