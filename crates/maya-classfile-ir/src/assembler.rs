use crate::bytecode::ByteCode;
use crate::class_pool::ClassConstantPool;
use crate::context::ContextTracker;
use crate::error::IRClassfileError;
use crate::form::Variant;
use crate::operand_stream::OperandStreams;
use crate::registry;

/// Turns a flat sequence of Pack200 opcodes plus their operand-token bands back into a
/// real `Code` attribute's `code` array. One instance per method; the class constant
/// pool and the class/superclass context live across the whole decode.
pub struct CodeAssembler;

impl CodeAssembler {
	/// Decodes one method body. `pack200_opcodes` is the method's pseudo/real opcode
	/// sequence in source order; `streams` supplies every operand band the forms along
	/// the way will pull from.
	pub fn decode_method(
		pack200_opcodes: &[u16],
		streams: &mut OperandStreams,
		cp: &ClassConstantPool,
		ctx: &mut ContextTracker,
	) -> Result<Vec<u8>, IRClassfileError> {
		let mut instructions: Vec<ByteCode> = Vec::with_capacity(pack200_opcodes.len());
		let mut offsets = Vec::with_capacity(pack200_opcodes.len() + 1);
		let mut cursor = 0usize;

		for &opcode in pack200_opcodes {
			let form = registry::get(opcode)?;
			let mut bc = form.set_operands(streams, cp, ctx)?;

			if matches!(form.variant, Variant::TableSwitch | Variant::LookupSwitch) {
				let padding = (4 - (cursor + 1) % 4) % 4;
				bc.insert_padding_after_opcode(padding);
			}

			offsets.push(cursor);
			cursor += bc.byte_length();
			instructions.push(bc);
		}
		offsets.push(cursor);

		for (index, bc) in instructions.iter_mut().enumerate() {
			if !bc.targets().is_empty() {
				bc.fix_up_targets(index, &offsets)?;
			}
		}

		let mut out = Vec::with_capacity(cursor);
		for bc in &instructions {
			out.extend_from_slice(&bc.serialize());
		}
		Ok(out)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::operand_stream::TokenStream;

	#[test]
	fn empty_method_produces_empty_code() {
		let pool = ClassConstantPool::new(vec![]);
		let mut ctx = ContextTracker::new("Foo", "java/lang/Object");
		let mut streams = OperandStreams::default();
		let code = CodeAssembler::decode_method(&[], &mut streams, &pool, &mut ctx).unwrap();
		assert!(code.is_empty());
	}

	#[test]
	fn iload_0_iconst_1_iadd_ireturn_emits_expected_bytes() {
		use crate::code::Opcodes;
		let pool = ClassConstantPool::new(vec![]);
		let mut ctx = ContextTracker::new("Foo", "java/lang/Object");
		let mut streams = OperandStreams::default();
		// Pack200 opcode 0x1A is the real, argument-free `iload_0`.
		let code = CodeAssembler::decode_method(
			&[0x1A, Opcodes::ICONST_1 as u16, Opcodes::IADD as u16, Opcodes::IRETURN as u16],
			&mut streams,
			&pool,
			&mut ctx,
		)
		.unwrap();
		assert_eq!(code, vec![0x1A, Opcodes::ICONST_1, Opcodes::IADD, Opcodes::IRETURN]);
	}

	#[test]
	fn table_switch_reads_case_count_default_low_then_case_labels() {
		use crate::code::Opcodes;
		let pool = ClassConstantPool::new(vec![]);
		let mut ctx = ContextTracker::new("Foo", "java/lang/Object");
		// Band order per the Pack200 wire protocol: case_count, default_label, low_value,
		// then case_count case labels (all label tokens are instruction-index deltas from
		// the switch's own position). `high` is never banded; it's low + case_count - 1.
		let mut streams = OperandStreams {
			case_count: TokenStream::new(vec![2]),
			label: TokenStream::new(vec![3, 1, 2]), // default->idx3, case0->idx1, case1->idx2
			case_value: TokenStream::new(vec![0]),  // low
			..Default::default()
		};
		let code = CodeAssembler::decode_method(
			&[Opcodes::TABLESWITCH as u16, Opcodes::RETURN as u16, Opcodes::RETURN as u16, Opcodes::RETURN as u16],
			&mut streams,
			&pool,
			&mut ctx,
		)
		.unwrap();
		// switch: opcode(1) + pad(3) + default(4) + low(4) + high(4) + case0(4) + case1(4) = 24 bytes,
		// so the three trailing `return`s land at byte offsets 24, 25, 26.
		#[rustfmt::skip]
		let expected = vec![
			0xAA,
			0x00, 0x00, 0x00,             // 3-byte alignment pad
			0x00, 0x00, 0x00, 0x1A,       // default -> offset 26
			0x00, 0x00, 0x00, 0x00,       // low = 0
			0x00, 0x00, 0x00, 0x01,       // high = low + case_count - 1 = 1
			0x00, 0x00, 0x00, 0x18,       // case0 -> offset 24
			0x00, 0x00, 0x00, 0x19,       // case1 -> offset 25
			0xB1, 0xB1, 0xB1,
		];
		assert_eq!(code, expected);
	}

	#[test]
	fn forward_branch_resolves_to_byte_delta() {
		use crate::code::Opcodes;
		let pool = ClassConstantPool::new(vec![]);
		let mut ctx = ContextTracker::new("Foo", "java/lang/Object");
		let mut streams = OperandStreams {
			label: TokenStream::new(vec![2]), // goto skips over one instruction
			..Default::default()
		};
		let code = CodeAssembler::decode_method(
			&[Opcodes::GOTO as u16, Opcodes::NOP as u16, Opcodes::RETURN as u16],
			&mut streams,
			&pool,
			&mut ctx,
		)
		.unwrap();
		assert_eq!(code, vec![Opcodes::GOTO, 0, 4, Opcodes::NOP, Opcodes::RETURN]);
	}
}
