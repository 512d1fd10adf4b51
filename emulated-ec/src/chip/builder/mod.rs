mod memory;

use anyhow::{bail, Result};
use log::{debug, trace};

use super::component::ComponentManifest;
use super::field::parameters::FieldParameters;
use super::instruction::constant::ConstantInstruction;
use super::instruction::copy::CopyInstruction;
use super::instruction::set::AirInstruction;
use super::register::Register;
use super::{AirParameters, Chip};

/// Records the instruction schedule of a chip.
#[derive(Debug, Clone)]
pub struct AirBuilder<L: AirParameters> {
    num_cells: usize,
    max_register_len: usize,
    instructions: Vec<AirInstruction<L::Field, L::Instruction>>,
    errors: Vec<String>,
}

impl<L: AirParameters> Default for AirBuilder<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: AirParameters> AirBuilder<L> {
    pub fn new() -> Self {
        Self {
            num_cells: 0,
            max_register_len: 0,
            instructions: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// The number of cells allocated so far.
    pub const fn num_cells(&self) -> usize {
        self.num_cells
    }

    pub fn num_instructions(&self) -> usize {
        self.instructions.len()
    }

    pub const fn manifest(&self) -> ComponentManifest {
        ComponentManifest {
            min_width: self.max_register_len,
        }
    }

    /// Registers a custom instruction with the builder.
    pub fn register_instruction<I>(&mut self, instruction: I)
    where
        L::Instruction: From<I>,
    {
        let instr = L::Instruction::from(instruction);
        self.register_air_instruction(AirInstruction::CustomInstruction(instr));
    }

    pub(crate) fn register_air_instruction(
        &mut self,
        instruction: AirInstruction<L::Field, L::Instruction>,
    ) {
        trace!("instruction {}: {:?}", self.instructions.len(), instruction);
        self.instructions.push(instruction);
    }

    /// Records a failed static precondition of the field parameters, reported by `build`.
    pub(crate) fn check_field<P: FieldParameters>(&mut self) {
        if let Err(e) = P::check_headroom::<L::Field>() {
            let message = format!("{e:#}");
            if !self.errors.contains(&message) {
                self.errors.push(message);
            }
        }
    }

    /// Writes `values` into `target` and constrains them to stay constant.
    pub fn set_constant<T: Register>(&mut self, target: &T, values: &[L::Field]) {
        let instr = ConstantInstruction {
            target: *target.register(),
            values: values.to_vec(),
            assign: true,
        };
        self.register_air_instruction(AirInstruction::Constant(instr));
    }

    /// Constrains the cells of `target`, written elsewhere, to equal `values`.
    pub fn assert_constant<T: Register>(&mut self, target: &T, values: &[L::Field]) {
        let instr = ConstantInstruction {
            target: *target.register(),
            values: values.to_vec(),
            assign: false,
        };
        self.register_air_instruction(AirInstruction::Constant(instr));
    }

    /// Copies `source` into `target` through copy constraints.
    pub fn set_to_copy<T: Register>(&mut self, source: &T, target: &T) {
        let instr = CopyInstruction {
            source: *source.register(),
            target: *target.register(),
        };
        self.register_air_instruction(AirInstruction::Copy(instr));
    }

    pub fn build(self) -> Result<Chip<L>> {
        if let Some(error) = self.errors.first() {
            bail!("invalid chip parameters: {error}");
        }
        debug!(
            "built chip with {} instructions over {} cells",
            self.instructions.len(),
            self.num_cells
        );
        Ok(Chip {
            manifest: self.manifest(),
            instructions: self.instructions,
            num_cells: self.num_cells,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use core::marker::PhantomData;

    use super::*;
    use crate::chip::constraint::{CircuitDescription, ConstraintFailure};
    use crate::chip::instruction::empty::EmptyInstruction;
    use crate::chip::instruction::Instruction;
    use crate::chip::register::bit::BitRegister;
    use crate::chip::register::element::ElementRegister;
    use crate::chip::trace::writer::TraceWriter;
    use crate::math::prelude::*;

    #[derive(Debug, Clone)]
    pub struct TestParameters<I>(PhantomData<I>);

    impl<I: Instruction<GoldilocksField>> AirParameters for TestParameters<I> {
        type Field = GoldilocksField;
        type Instruction = I;
    }

    pub type EmptyParameters = TestParameters<EmptyInstruction<GoldilocksField>>;

    /// Emits the constraints of `chip` at the writer's width and returns every failure on the
    /// written table.
    pub fn circuit_failures<L: AirParameters>(
        chip: &Chip<L>,
        writer: &TraceWriter<L::Field>,
    ) -> Vec<ConstraintFailure> {
        let mut circuit = CircuitDescription::new();
        chip.emit_constraints(writer.layout().width(), &mut circuit)
            .unwrap();
        circuit.failures(writer.table())
    }

    /// Asserts that the written table satisfies every constraint of `chip`.
    pub fn check_circuit<L: AirParameters>(chip: &Chip<L>, writer: &TraceWriter<L::Field>) {
        let failures = circuit_failures(chip, writer);
        assert!(failures.is_empty(), "circuit failures: {failures:?}");
    }

    #[test]
    fn test_builder_select_and_copy() {
        type F = GoldilocksField;
        type L = EmptyParameters;

        let mut builder = AirBuilder::<L>::new();
        let bit = builder.alloc::<BitRegister>();
        let a = builder.alloc::<ElementRegister>();
        let b = builder.alloc::<ElementRegister>();
        let selected = builder.select(&bit, &a, &b);
        let copied = builder.alloc::<ElementRegister>();
        builder.set_to_copy(&selected, &copied);
        let one = builder.alloc::<ElementRegister>();
        builder.set_constant(&one, &[F::ONE]);
        let chip = builder.build().unwrap();
        assert_eq!(chip.num_cells(), 6);
        assert_eq!(chip.manifest().min_width, 1);

        for (bit_value, expected) in [(F::ONE, F::from_canonical_u64(7)), (F::ZERO, F::TWO)] {
            let mut writer = chip.new_writer(4).unwrap();
            writer.write(&bit, &bit_value).unwrap();
            writer.write(&a, &F::from_canonical_u64(7)).unwrap();
            writer.write(&b, &F::TWO).unwrap();
            chip.write_witness(&mut writer).unwrap();
            assert_eq!(writer.read(&copied).unwrap(), expected);
            check_circuit(&chip, &writer);
        }
    }

    #[test]
    fn test_builder_bit_constraint_rejects_non_bit() {
        type F = GoldilocksField;
        type L = EmptyParameters;

        let mut builder = AirBuilder::<L>::new();
        let bit = builder.alloc::<BitRegister>();
        let chip = builder.build().unwrap();

        let mut writer = chip.new_writer(1).unwrap();
        writer.write(&bit, &F::TWO).unwrap();
        chip.write_witness(&mut writer).unwrap();
        let failures = circuit_failures(&chip, &writer);
        assert!(matches!(failures[..], [ConstraintFailure::Gate { .. }]));
    }

    #[test]
    fn test_builder_unwritten_input() {
        type L = EmptyParameters;

        let mut builder = AirBuilder::<L>::new();
        let bit = builder.alloc::<BitRegister>();
        let a = builder.alloc::<ElementRegister>();
        let b = builder.alloc::<ElementRegister>();
        builder.select(&bit, &a, &b);
        let chip = builder.build().unwrap();

        let mut writer = chip.new_writer(2).unwrap();
        assert!(chip.write_witness(&mut writer).is_err());
    }
}
