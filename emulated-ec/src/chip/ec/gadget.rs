use anyhow::Result;

use super::point::{AffinePoint, AffinePointRegister};
use super::EllipticCurveParameters;
use crate::chip::builder::AirBuilder;
use crate::chip::field::limbs::{limbs_to_biguint, to_limbs_polynomial};
use crate::chip::field::parameters::FieldParameters;
use crate::chip::field::register::FieldRegister;
use crate::chip::trace::writer::TraceWriter;
use crate::chip::AirParameters;
use crate::math::prelude::*;

pub trait EllipticCurveGadget<E: EllipticCurveParameters> {
    /// Allocates a point whose coordinate limbs are range checked.
    fn alloc_ec_point(&mut self) -> AffinePointRegister<E>;

    /// A point pinned to a constant value.
    fn ec_constant_point(&mut self, point: &AffinePoint<E>) -> AffinePointRegister<E>;
}

pub trait EllipticCurveWriter<E: EllipticCurveParameters> {
    fn write_ec_point(&mut self, data: &AffinePointRegister<E>, value: &AffinePoint<E>)
        -> Result<()>;

    fn read_ec_point(&self, data: &AffinePointRegister<E>) -> Result<AffinePoint<E>>;
}

impl<L: AirParameters, E: EllipticCurveParameters> EllipticCurveGadget<E> for AirBuilder<L> {
    fn alloc_ec_point(&mut self) -> AffinePointRegister<E> {
        let x = self.alloc::<FieldRegister<E::BaseField>>();
        let y = self.alloc::<FieldRegister<E::BaseField>>();
        AffinePointRegister::new(x, y)
    }

    fn ec_constant_point(&mut self, point: &AffinePoint<E>) -> AffinePointRegister<E> {
        let x = self.fp_constant(&point.x);
        let y = self.fp_constant(&point.y);
        AffinePointRegister::new(x, y)
    }
}

impl<F: PrimeField64, E: EllipticCurveParameters> EllipticCurveWriter<E> for TraceWriter<F> {
    fn write_ec_point(
        &mut self,
        data: &AffinePointRegister<E>,
        value: &AffinePoint<E>,
    ) -> Result<()> {
        let value_x = to_limbs_polynomial::<F, E::BaseField>(&value.x);
        let value_y = to_limbs_polynomial::<F, E::BaseField>(&value.y);
        self.write(&data.x, &value_x)?;
        self.write(&data.y, &value_y)
    }

    fn read_ec_point(&self, data: &AffinePointRegister<E>) -> Result<AffinePoint<E>> {
        let nb_bits = E::BaseField::NB_BITS_PER_LIMB;
        let x = limbs_to_biguint(self.read(&data.x)?.as_slice(), nb_bits);
        let y = limbs_to_biguint(self.read(&data.y)?.as_slice(), nb_bits);
        Ok(AffinePoint::new(x, y))
    }
}
