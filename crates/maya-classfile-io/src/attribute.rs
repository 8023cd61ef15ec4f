use maya_bytes::BytesReadExt;

use crate::error::IOClassfileError;

/// A generic, uninterpreted `attribute_info` record. Which named attributes (`Code`,
/// `ConstantValue`, ...) mean something is decided by the IR layer, not here.
///
/// <https://docs.oracle.com/javase/specs/jvms/se22/html/jvms-4.html#jvms-4.7>
#[derive(Debug, Clone)]
pub struct IOAttributeInfo {
	pub attribute_name_index: u16,
	pub attribute_length: u32,
	pub info: Vec<u8>,
}

impl IOAttributeInfo {
	pub fn read<B: BytesReadExt>(buffer: &mut B) -> Result<Self, IOClassfileError> {
		let attribute_name_index = buffer.read_u16()?;
		let attribute_length = buffer.read_u32()?;
		let info = buffer.read_bytes(attribute_length as usize)?;
		Ok(Self {
			attribute_name_index,
			attribute_length,
			info,
		})
	}
}

pub fn read_attributes<B: BytesReadExt>(buffer: &mut B) -> Result<Vec<IOAttributeInfo>, IOClassfileError> {
	let count = buffer.read_u16()?;
	let mut attributes = Vec::with_capacity(count as usize);
	for _ in 0..count {
		attributes.push(IOAttributeInfo::read(buffer)?);
	}
	Ok(attributes)
}

#[cfg(test)]
mod tests {
	use std::io::Cursor;

	use super::*;

	#[test]
	fn reads_attribute_info() {
		let mut cursor = Cursor::new(vec![0, 1, 0, 0, 0, 2, 0xAB, 0xCD]);
		let attr = IOAttributeInfo::read(&mut cursor).unwrap();
		assert_eq!(attr.attribute_name_index, 1);
		assert_eq!(attr.info, vec![0xAB, 0xCD]);
	}
}
