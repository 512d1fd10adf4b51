pub mod parser;

use self::parser::AirParser;

/// Constraints of an instruction, expressed through an [`AirParser`].
pub trait AirConstraint<AP: AirParser> {
    /// Emits the constraints for this instruction.
    fn eval(&self, parser: &mut AP);
}
