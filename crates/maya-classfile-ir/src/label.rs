use crate::error::IRClassfileError;

/// An opaque handle to a branch target, allocated during encode-side instruction
/// traversal before the target instruction's final position is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Label(usize);

/// Allocates [`Label`] handles and resolves them to instruction indices once the
/// encoder has walked far enough to know where each target instruction landed. The
/// decode side never needs this: Pack200 label tokens already carry an instruction-index
/// delta (see the emission rule in `form.rs`), so only the encoder, which discovers
/// targets while still walking forward, needs deferred placement.
#[derive(Debug, Default)]
pub struct LabelAllocator {
	placements: Vec<Option<usize>>,
}

impl LabelAllocator {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn allocate(&mut self) -> Label {
		self.placements.push(None);
		Label(self.placements.len() - 1)
	}

	pub fn place(&mut self, label: Label, instruction_index: usize) {
		self.placements[label.0] = Some(instruction_index);
	}

	/// Builds the [`Label`] for an instruction index that has already been placed via
	/// [`Self::allocate`]/[`Self::place`] at that same index — callers that allocate one
	/// label per instruction up front (recorder.rs does) can use this instead of
	/// threading `Label` handles back through their own instruction list.
	pub fn label_for(&self, instruction_index: usize) -> Label {
		Label(instruction_index)
	}

	pub fn instruction_index(&self, label: Label) -> Result<usize, IRClassfileError> {
		self.placements[label.0].ok_or(IRClassfileError::DanglingLabel {
			target: label.0,
			instruction_count: self.placements.len(),
		})
	}

	/// The signed instruction-index delta the Pack200 label band encodes for a branch
	/// sitting at `source_instruction_index` targeting `label`.
	pub fn delta_from(&self, label: Label, source_instruction_index: usize) -> Result<i32, IRClassfileError> {
		let target = self.instruction_index(label)?;
		Ok(target as i32 - source_instruction_index as i32)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn unplaced_label_is_dangling() {
		let mut allocator = LabelAllocator::new();
		let label = allocator.allocate();
		assert!(matches!(
			allocator.instruction_index(label),
			Err(IRClassfileError::DanglingLabel { .. })
		));
	}

	#[test]
	fn delta_is_signed_distance_in_instructions() {
		let mut allocator = LabelAllocator::new();
		let label = allocator.allocate();
		allocator.place(label, 3);
		assert_eq!(allocator.delta_from(label, 1).unwrap(), 2);
		assert_eq!(allocator.delta_from(label, 5).unwrap(), -2);
	}
}
