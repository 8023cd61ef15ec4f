use maya_bytes::BytesReadExt;

use crate::error::IOClassfileError;

/// A constant pool entry exactly as it appears on the wire: indices are raw `u16`s into
/// the pool (not yet resolved) and numeric literals keep their raw big-endian bytes (the
/// IR layer is responsible for interpreting them as `i32`/`f32`/`i64`/`f64`).
///
/// <https://docs.oracle.com/javase/specs/jvms/se22/html/jvms-4.html#jvms-4.4>
#[derive(Debug, Clone)]
pub enum IOCpTag {
	Utf8 { length: u16, bytes: Vec<u8> },
	Integer { bytes: [u8; 4] },
	Float { bytes: [u8; 4] },
	Long { bytes: [u8; 8] },
	Double { bytes: [u8; 8] },
	Class { name_index: u16 },
	String { utf8_index: u16 },
	FieldRef { class_index: u16, name_and_ty_index: u16 },
	MethodRef { class_index: u16, name_and_ty_index: u16 },
	InterfaceMethodRef { class_index: u16, name_and_ty_index: u16 },
	NameAndType { name_index: u16, descriptor_index: u16 },
	MethodHandle { reference_kind: u8, reference_index: u16 },
	MethodType { descriptor_index: u16 },
	InvokeDynamic { bootstrap_method_attr_index: u16, name_and_ty_index: u16 },
	/// Filler for the slot immediately following a `Long`/`Double` entry (JVMS 4.4.5):
	/// the index exists but no entry may reference it. Never produced by `read`, only by
	/// `read_constant_pool` padding out the two-slot entries so later indices line up.
	Unusable,
}

impl IOCpTag {
	/// Constant pool entries occupying two consecutive slots (`Long`/`Double`, per
	/// JVMS 4.4.5) — the slot immediately after one of these carries no tag of its own.
	pub fn takes_two_slots(&self) -> bool {
		matches!(self, IOCpTag::Long { .. } | IOCpTag::Double { .. })
	}

	pub fn read<B: BytesReadExt>(buffer: &mut B) -> Result<Self, IOClassfileError> {
		let tag = buffer.read_u8()?;
		Ok(match tag {
			1 => {
				let length = buffer.read_u16()?;
				let bytes = buffer.read_bytes(length as usize)?;
				IOCpTag::Utf8 { length, bytes }
			}
			3 => IOCpTag::Integer {
				bytes: read_array4(buffer)?,
			},
			4 => IOCpTag::Float {
				bytes: read_array4(buffer)?,
			},
			5 => IOCpTag::Long {
				bytes: read_array8(buffer)?,
			},
			6 => IOCpTag::Double {
				bytes: read_array8(buffer)?,
			},
			7 => IOCpTag::Class {
				name_index: buffer.read_u16()?,
			},
			8 => IOCpTag::String {
				utf8_index: buffer.read_u16()?,
			},
			9 => IOCpTag::FieldRef {
				class_index: buffer.read_u16()?,
				name_and_ty_index: buffer.read_u16()?,
			},
			10 => IOCpTag::MethodRef {
				class_index: buffer.read_u16()?,
				name_and_ty_index: buffer.read_u16()?,
			},
			11 => IOCpTag::InterfaceMethodRef {
				class_index: buffer.read_u16()?,
				name_and_ty_index: buffer.read_u16()?,
			},
			12 => IOCpTag::NameAndType {
				name_index: buffer.read_u16()?,
				descriptor_index: buffer.read_u16()?,
			},
			15 => IOCpTag::MethodHandle {
				reference_kind: buffer.read_u8()?,
				reference_index: buffer.read_u16()?,
			},
			16 => IOCpTag::MethodType {
				descriptor_index: buffer.read_u16()?,
			},
			18 => IOCpTag::InvokeDynamic {
				bootstrap_method_attr_index: buffer.read_u16()?,
				name_and_ty_index: buffer.read_u16()?,
			},
			other => return Err(IOClassfileError::UnknownCpTag(other, 0)),
		})
	}
}

fn read_array4<B: BytesReadExt>(buffer: &mut B) -> Result<[u8; 4], IOClassfileError> {
	let v = buffer.read_bytes(4)?;
	Ok([v[0], v[1], v[2], v[3]])
}

fn read_array8<B: BytesReadExt>(buffer: &mut B) -> Result<[u8; 8], IOClassfileError> {
	let v = buffer.read_bytes(8)?;
	Ok([v[0], v[1], v[2], v[3], v[4], v[5], v[6], v[7]])
}

pub fn read_constant_pool<B: BytesReadExt>(buffer: &mut B) -> Result<Vec<IOCpTag>, IOClassfileError> {
	let count = buffer.read_u16()?;
	let mut tags = Vec::with_capacity(count as usize);
	// constant_pool_count is one greater than the number of actual entries, and index 0 is
	// unused; entries after a Long/Double occupy the next slot without their own tag.
	let mut i = 1u16;
	while i < count {
		let tag = IOCpTag::read(buffer)?;
		let takes_two = tag.takes_two_slots();
		tags.push(tag);
		i += 1;
		if takes_two {
			tags.push(IOCpTag::Unusable);
			i += 1;
		}
	}
	Ok(tags)
}

#[cfg(test)]
mod tests {
	use std::io::Cursor;

	use super::*;

	#[test]
	fn reads_utf8_entry() {
		let mut cursor = Cursor::new(vec![1, 0, 3, b'f', b'o', b'o']);
		let tag = IOCpTag::read(&mut cursor).unwrap();
		assert!(matches!(tag, IOCpTag::Utf8 { length: 3, .. }));
	}

	#[test]
	fn reads_class_entry() {
		let mut cursor = Cursor::new(vec![7, 0, 5]);
		let tag = IOCpTag::read(&mut cursor).unwrap();
		assert!(matches!(tag, IOCpTag::Class { name_index: 5 }));
	}
}
