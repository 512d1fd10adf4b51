use super::limbs::encode_limbs;
use super::parameters::FieldParameters;
use super::register::FieldRegister;
use crate::chip::builder::AirBuilder;
use crate::chip::register::RegisterSerializable;
use crate::chip::uint::add::LimbOperand;
use crate::chip::AirParameters;

impl<L: AirParameters> AirBuilder<L> {
    /// Constrains the limbs of `a` to encode an integer below `p`.
    ///
    /// Asserts `a + (2^(k * b) - p) = r` over `k` limbs with no final carry and `r` range checked,
    /// which holds exactly when `a < p`.
    pub fn fp_assert_canonical<P: FieldParameters>(&mut self, a: &FieldRegister<P>) {
        self.check_field::<P>();
        let sum = self.alloc::<FieldRegister<P>>();
        let complement = encode_limbs(
            &P::modulus_complement(),
            P::NB_BITS_PER_LIMB,
            P::NB_LIMBS,
        );
        self.limb_add(
            a.register(),
            LimbOperand::Constant(complement),
            LimbOperand::Register(*sum.register()),
            P::NB_BITS_PER_LIMB,
        );
    }
}
