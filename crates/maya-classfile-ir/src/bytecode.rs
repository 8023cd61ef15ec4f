use crate::error::IRClassfileError;

/// A resolved constant-pool reference's position within [`ByteCode::rewrite`]: `offset` is
/// the byte index the reference starts at, `width` is 1, 2, or 4 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NestedPosition {
	pub offset: usize,
	pub width: u8,
}

/// A mutable instruction produced while decoding one Pack200 opcode. Carries the real
/// JVM opcode(s) it expands to, the in-progress output bytes, resolved constant-pool
/// references awaiting serialization, and symbolic branch targets awaiting fixup.
#[derive(Debug, Clone)]
pub struct ByteCode {
	pack200_opcode: u16,
	real_opcode: u8,
	rewrite: Vec<u8>,
	nested_positions: Vec<NestedPosition>,
	nested_values: Vec<u16>,
	targets: Vec<i32>,
	target_positions: Vec<NestedPosition>,
	offset: usize,
}

impl ByteCode {
	pub fn new(pack200_opcode: u16, real_opcode: u8, template: &[i16]) -> Self {
		// sentinel (-1) slots become 0 placeholders; concrete template bytes pass through.
		let rewrite = template.iter().map(|&b| if b < 0 { 0 } else { b as u8 }).collect();
		Self {
			pack200_opcode,
			real_opcode,
			rewrite,
			nested_positions: Vec::new(),
			nested_values: Vec::new(),
			targets: Vec::new(),
			target_positions: Vec::new(),
			offset: 0,
		}
	}

	pub fn pack200_opcode(&self) -> u16 {
		self.pack200_opcode
	}

	pub fn real_opcode(&self) -> u8 {
		self.real_opcode
	}

	pub fn offset(&self) -> usize {
		self.offset
	}

	pub fn set_offset(&mut self, offset: usize) {
		self.offset = offset;
	}

	/// Writes a contiguous run of operand bytes starting at `rewrite_offset`.
	pub fn set_operand_bytes(&mut self, rewrite_offset: usize, values: &[u8]) {
		self.rewrite[rewrite_offset..rewrite_offset + values.len()].copy_from_slice(values);
	}

	/// Big-endian signed 2-byte write at a fixed rewrite offset (branch deltas, iinc
	/// wide constants, locals beyond one byte).
	pub fn set_operand_signed_2bytes(&mut self, value: i16, rewrite_offset: usize) {
		self.rewrite[rewrite_offset..rewrite_offset + 2].copy_from_slice(&value.to_be_bytes());
	}

	pub fn set_operand_signed_4bytes(&mut self, value: i32, rewrite_offset: usize) {
		self.rewrite[rewrite_offset..rewrite_offset + 4].copy_from_slice(&value.to_be_bytes());
	}

	/// Extends the rewrite buffer by `n` zero bytes, used by variable-length forms
	/// (switches, `wide`) that do not know their final length from the template alone.
	pub fn extend_rewrite(&mut self, bytes: &[u8]) {
		self.rewrite.extend_from_slice(bytes);
	}

	pub fn rewrite_len(&self) -> usize {
		self.rewrite.len()
	}

	pub fn set_nested(&mut self, values: Vec<u16>) {
		self.nested_values = values;
	}

	pub fn set_nested_positions(&mut self, positions: Vec<NestedPosition>) {
		self.nested_positions = positions;
	}

	pub fn push_nested(&mut self, position: NestedPosition, value: u16) {
		self.nested_positions.push(position);
		self.nested_values.push(value);
	}

	pub fn set_targets(&mut self, targets: Vec<i32>, positions: Vec<NestedPosition>) {
		self.targets = targets;
		self.target_positions = positions;
	}

	pub fn targets(&self) -> &[i32] {
		&self.targets
	}

	pub fn byte_length(&self) -> usize {
		self.rewrite.len()
	}

	/// Inserts `count` zero bytes immediately after the opcode byte, shifting every
	/// recorded nested/target position that follows. Used once the assembler knows this
	/// `tableswitch`/`lookupswitch` instruction's absolute byte offset and can compute the
	/// alignment padding JVMS 4.7.3 requires before the `default` field.
	pub fn insert_padding_after_opcode(&mut self, count: usize) {
		if count == 0 {
			return;
		}
		self.rewrite.splice(1..1, std::iter::repeat(0u8).take(count));
		for position in self.nested_positions.iter_mut() {
			position.offset += count;
		}
		for position in self.target_positions.iter_mut() {
			position.offset += count;
		}
	}

	/// Resolves every symbolic label target recorded against this instruction into a
	/// concrete byte-offset delta and writes it at its recorded position. `offsets[i]`
	/// must be the byte offset instruction `i` starts at; `source_index` is this
	/// instruction's own position in the method's instruction list.
	pub fn fix_up_targets(&mut self, source_index: usize, offsets: &[usize]) -> Result<(), IRClassfileError> {
		let source_offset = offsets[source_index];
		for (delta, position) in self.targets.clone().into_iter().zip(self.target_positions.clone()) {
			let target_index = source_index as i64 + delta as i64;
			if target_index < 0 || target_index as usize >= offsets.len() {
				return Err(IRClassfileError::DanglingLabel {
					target: target_index.max(0) as usize,
					instruction_count: offsets.len().saturating_sub(1),
				});
			}
			let value = offsets[target_index as usize] as i64 - source_offset as i64;
			match position.width {
				2 => {
					let value = i16::try_from(value)
						.map_err(|_| IRClassfileError::AlignmentError(value as i32))?;
					self.set_operand_signed_2bytes(value, position.offset);
				}
				4 => self.set_operand_signed_4bytes(value as i32, position.offset),
				other => {
					return Err(IRClassfileError::AttributeBodyMalformed(format!(
						"unsupported label target width {other}"
					)))
				}
			}
		}
		Ok(())
	}

	/// Final output bytes: the rewrite buffer with every resolved constant-pool
	/// reference overwritten at its recorded width.
	pub fn serialize(&self) -> Vec<u8> {
		let mut out = self.rewrite.clone();
		for (position, value) in self.nested_positions.iter().zip(self.nested_values.iter()) {
			let bytes = value.to_be_bytes();
			match position.width {
				1 => out[position.offset] = bytes[1],
				2 => out[position.offset..position.offset + 2].copy_from_slice(&bytes),
				other => unreachable!("constant pool reference width must be 1 or 2, got {other}"),
			}
		}
		out
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn serialize_overwrites_nested_position() {
		let mut bc = ByteCode::new(18, 18, &[18, -1]);
		bc.push_nested(NestedPosition { offset: 1, width: 1 }, 7);
		assert_eq!(bc.serialize(), vec![18, 7]);
	}

	#[test]
	fn fix_up_targets_writes_forward_branch_delta() {
		let mut bc = ByteCode::new(167, 167, &[167, -1, -1]);
		bc.set_targets(vec![2], vec![NestedPosition { offset: 1, width: 2 }]);
		let offsets = vec![0, 1, 2, 5, 6];
		bc.fix_up_targets(1, &offsets).unwrap();
		assert_eq!(bc.serialize(), vec![167, 0, 4]);
	}

	#[test]
	fn dangling_label_is_reported() {
		let mut bc = ByteCode::new(167, 167, &[167, -1, -1]);
		bc.set_targets(vec![50], vec![NestedPosition { offset: 1, width: 2 }]);
		let offsets = vec![0, 1, 2];
		assert!(matches!(
			bc.fix_up_targets(1, &offsets),
			Err(IRClassfileError::DanglingLabel { .. })
		));
	}
}
