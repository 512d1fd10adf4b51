use super::WeierstrassParameters;
use crate::chip::builder::AirBuilder;
use crate::chip::ec::point::AffinePointRegister;
use crate::chip::field::instruction::FromFieldInstruction;
use crate::chip::field::register::FieldRegister;
use crate::chip::AirParameters;

impl<L: AirParameters> AirBuilder<L> {
    /// Given two points `p` and `q` and the slope of the intersection line, compute the addition.
    pub(crate) fn sw_add_with_slope<E: WeierstrassParameters>(
        &mut self,
        p: &AffinePointRegister<E>,
        q: &AffinePointRegister<E>,
        slope: &FieldRegister<E::BaseField>,
    ) -> AffinePointRegister<E>
    where
        L::Instruction: FromFieldInstruction<E::BaseField>,
    {
        let (x_1, y_1) = (p.x, p.y);
        let x_2 = q.x;

        let slope_squared = self.fp_mul(slope, slope);

        let mut x_3 = self.fp_sub(&slope_squared, &x_1);
        x_3 = self.fp_sub(&x_3, &x_2);

        let mut y_3 = self.fp_sub(&x_1, &x_3);
        y_3 = self.fp_mul(slope, &y_3);
        y_3 = self.fp_sub(&y_3, &y_1);

        AffinePointRegister::new(x_3, y_3)
    }

    /// Add two points `p` and `q` with different `x` coordinates on a short Weierstrass curve.
    ///
    /// This is incomplete: there is no witness when `p.x = q.x`.
    pub fn sw_add<E: WeierstrassParameters>(
        &mut self,
        p: &AffinePointRegister<E>,
        q: &AffinePointRegister<E>,
    ) -> AffinePointRegister<E>
    where
        L::Instruction: FromFieldInstruction<E::BaseField>,
    {
        let slope = self.sw_slope_different(p, q);
        self.sw_add_with_slope(p, q, &slope)
    }

    /// Doubles a point `p` with `p.y != 0` on a short Weierstrass curve.
    ///
    /// `a` holds the curve coefficient.
    pub fn sw_double<E: WeierstrassParameters>(
        &mut self,
        p: &AffinePointRegister<E>,
        a: &FieldRegister<E::BaseField>,
    ) -> AffinePointRegister<E>
    where
        L::Instruction: FromFieldInstruction<E::BaseField>,
    {
        let slope = self.sw_tangent(p, a);
        self.sw_add_with_slope(p, p, &slope)
    }

    /// The negation `(x, -y)` of `p`.
    pub fn sw_neg<E: WeierstrassParameters>(
        &mut self,
        p: &AffinePointRegister<E>,
    ) -> AffinePointRegister<E>
    where
        L::Instruction: FromFieldInstruction<E::BaseField>,
    {
        let y = self.fp_neg(&p.y);
        AffinePointRegister::new(p.x, y)
    }
}
