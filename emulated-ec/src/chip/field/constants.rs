use num::{BigUint, One, Zero};

use super::limbs::to_limbs_polynomial;
use super::parameters::FieldParameters;
use super::register::FieldRegister;
use crate::chip::builder::AirBuilder;
use crate::chip::AirParameters;

impl<L: AirParameters> AirBuilder<L> {
    /// A fresh register holding `num mod p`, pinned by constant constraints.
    pub fn fp_constant<P: FieldParameters>(&mut self, num: &BigUint) -> FieldRegister<P> {
        self.check_field::<P>();
        let a = self.alloc::<FieldRegister<P>>();
        let poly = to_limbs_polynomial::<L::Field, P>(&(num % P::modulus()));
        self.set_constant(&a, poly.as_slice());
        a
    }

    pub fn fp_zero<P: FieldParameters>(&mut self) -> FieldRegister<P> {
        self.fp_constant(&BigUint::zero())
    }

    pub fn fp_one<P: FieldParameters>(&mut self) -> FieldRegister<P> {
        self.fp_constant(&BigUint::one())
    }

    /// Constrains the limbs of `a` to be the canonical limbs of `num mod p`.
    pub fn fp_assert_equal_constant<P: FieldParameters>(
        &mut self,
        a: &FieldRegister<P>,
        num: &BigUint,
    ) {
        self.check_field::<P>();
        let poly = to_limbs_polynomial::<L::Field, P>(&(num % P::modulus()));
        self.assert_constant(a, poly.as_slice());
    }

    /// Constrains `a` to be the zero residue, with canonical limbs.
    pub fn fp_assert_zero<P: FieldParameters>(&mut self, a: &FieldRegister<P>) {
        self.fp_assert_equal_constant(a, &BigUint::zero());
    }
}
