use maya_bytes::BytesReadExt;

use crate::attribute::{read_attributes, IOAttributeInfo};
use crate::error::IOClassfileError;

/// Shared shape of `field_info` and `method_info` (JVMS 4.5 / 4.6): both are
/// `(access_flags, name_index, descriptor_index, attributes)`.
#[derive(Debug, Clone)]
pub struct IOMember {
	pub access_flags: u16,
	pub name_index: u16,
	pub descriptor_index: u16,
	pub attributes: Vec<IOAttributeInfo>,
}

impl IOMember {
	pub fn read<B: BytesReadExt>(buffer: &mut B) -> Result<Self, IOClassfileError> {
		Ok(Self {
			access_flags: buffer.read_u16()?,
			name_index: buffer.read_u16()?,
			descriptor_index: buffer.read_u16()?,
			attributes: read_attributes(buffer)?,
		})
	}

	/// The raw bytes of the named attribute, if present (attribute tables are small and
	/// rarely looked up more than once or twice per member, so a linear scan is fine).
	pub fn attribute_named<'a>(&'a self, name_index_of: impl Fn(u16) -> Option<&'a str>, name: &str) -> Option<&'a [u8]> {
		self.attributes
			.iter()
			.find(|a| name_index_of(a.attribute_name_index) == Some(name))
			.map(|a| a.info.as_slice())
	}
}

pub fn read_members<B: BytesReadExt>(buffer: &mut B) -> Result<Vec<IOMember>, IOClassfileError> {
	let count = buffer.read_u16()?;
	let mut members = Vec::with_capacity(count as usize);
	for _ in 0..count {
		members.push(IOMember::read(buffer)?);
	}
	Ok(members)
}
