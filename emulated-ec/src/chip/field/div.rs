use num::{BigUint, One};

use super::instruction::FromFieldInstruction;
use super::parameters::FieldParameters;
use super::register::FieldRegister;
use crate::chip::builder::AirBuilder;
use crate::chip::AirParameters;

impl<L: AirParameters> AirBuilder<L> {
    /// Computes `a / b`.
    ///
    /// The constraints assert `b * b^(-1) = 1`, so no witness exists for `b = 0`.
    pub fn fp_div<P: FieldParameters>(
        &mut self,
        a: &FieldRegister<P>,
        b: &FieldRegister<P>,
    ) -> FieldRegister<P>
    where
        L::Instruction: FromFieldInstruction<P>,
    {
        let b_inv = self.fp_inverse_hint(b, false);
        let unit = self.fp_mul(b, &b_inv);
        self.fp_assert_equal_constant(&unit, &BigUint::one());
        self.fp_mul(a, &b_inv)
    }
}
