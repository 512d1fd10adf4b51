use anyhow::{ensure, Result};

use super::builder::AirBuilder;
use super::layout::Layout;
use super::AirParameters;

/// Column requirements of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ComponentManifest {
    /// The widest single register the component allocates. At this width or above, every
    /// register spans at most two consecutive rows.
    pub min_width: usize,
}

impl ComponentManifest {
    pub fn merge(self, other: Self) -> Self {
        Self {
            min_width: self.min_width.max(other.min_width),
        }
    }

    pub fn check(&self, width: usize) -> Result<()> {
        ensure!(
            width >= self.min_width.max(1),
            "a width of {width} columns is below the required minimum of {}",
            self.min_width.max(1)
        );
        Ok(())
    }
}

/// A gadget with a fixed input shape, sized by recording it into a scratch builder.
///
/// Sizes depend only on the static parameters of the component, never on witness values.
pub trait Component<L: AirParameters> {
    type Input;
    type Output;

    fn alloc_input(builder: &mut AirBuilder<L>) -> Self::Input;

    fn generate(builder: &mut AirBuilder<L>, input: &Self::Input) -> Self::Output;

    /// Cells allocated by one invocation, inputs excluded.
    fn cells_amount() -> usize {
        let mut builder = AirBuilder::<L>::new();
        let input = Self::alloc_input(&mut builder);
        let start = builder.num_cells();
        Self::generate(&mut builder, &input);
        builder.num_cells() - start
    }

    /// Rows used by a circuit holding the inputs and one invocation.
    fn rows_amount(width: usize) -> Result<usize> {
        let mut builder = AirBuilder::<L>::new();
        let input = Self::alloc_input(&mut builder);
        Self::generate(&mut builder, &input);
        Ok(Layout::new(width)?.rows_amount(builder.num_cells()))
    }

    fn manifest() -> ComponentManifest {
        let mut builder = AirBuilder::<L>::new();
        let input = Self::alloc_input(&mut builder);
        Self::generate(&mut builder, &input);
        builder.manifest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chip::builder::tests::TestParameters;
    use crate::chip::ec::gadget::EllipticCurveGadget;
    use crate::chip::ec::instruction::ECInstruction;
    use crate::chip::ec::weierstrass::curve32::Curve32;
    use crate::chip::ec::weierstrass::full_add::SWFullAdd;
    use crate::chip::ec::weierstrass::secp256k1::Secp256k1;

    #[test]
    fn test_component_sizing() {
        type E = Curve32;
        type L = TestParameters<ECInstruction<E>>;
        type C = SWFullAdd<E>;

        // Two invocations after the inputs use twice the cells of one.
        let mut builder = AirBuilder::<L>::new();
        let input = <C as Component<L>>::alloc_input(&mut builder);
        let start = builder.num_cells();
        <C as Component<L>>::generate(&mut builder, &input);
        let one = builder.num_instructions();
        <C as Component<L>>::generate(&mut builder, &input);
        let cells = <C as Component<L>>::cells_amount();
        assert_eq!(builder.num_cells() - start, 2 * cells);
        assert!(builder.num_instructions() > one);

        let width = 12;
        let rows = <C as Component<L>>::rows_amount(width).unwrap();
        assert_eq!(rows, (start + cells).div_ceil(width));
        assert!(<C as Component<L>>::rows_amount(0).is_err());
    }

    #[test]
    fn test_manifest_merge() {
        type S = Secp256k1;
        type LS = TestParameters<ECInstruction<S>>;
        type LC = TestParameters<ECInstruction<Curve32>>;

        let small = <SWFullAdd<Curve32> as Component<LC>>::manifest();
        let large = <SWFullAdd<S> as Component<LS>>::manifest();
        assert_eq!(small.min_width, 2);
        assert_eq!(large.min_width, 16);
        assert_eq!(small.merge(large), large);
        assert!(small.merge(large).check(8).is_err());
        assert!(small.check(8).is_ok());

        let mut builder = AirBuilder::<LS>::new();
        let p = builder.alloc_ec_point();
        builder.sw_neg::<S>(&p);
        let chip = builder.build().unwrap();
        assert!(chip.new_writer(15).is_err());
        assert!(chip.new_writer(16).is_ok());
    }
}
