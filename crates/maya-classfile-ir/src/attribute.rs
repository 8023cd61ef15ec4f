use std::io::Cursor;

use maya_bytes::BytesReadExt;
use maya_classfile_io::IOAttributeInfo;

use crate::class_pool::{cp_entry, CPClassRef, CPNameAndTypeRef, CPUtf8Ref, IRCpTag};
use crate::code::Instructions;
use crate::error::IRClassfileError;

#[derive(Debug, Clone)]
pub enum ConstantValueAttribute {
	Long { cp_idx: u16, value: i64 },
	Float { cp_idx: u16, value: f32 },
	Double { cp_idx: u16, value: f64 },
	Int { cp_idx: u16, value: i32 },
	String(CPUtf8Ref),
}

#[derive(Debug, Clone)]
pub struct StackMapTableAttribute {
	pub entries: Vec<StackMapFrame>,
}

#[derive(Debug, Clone)]
#[repr(u8)]
pub enum VerificationTypeInfo {
	TopVariableInfo = 0,
	IntegerVariableInfo = 1,
	FloatVariableInfo = 2,
	LongVariableInfo = 4,
	DoubleVariableInfo = 3,
	NullVariableInfo = 5,
	UninitializedThisVariableInfo = 6,
	ObjectVariableInfo { cpool_idx: u16 } = 7,
	UninitializedVariableInfo { offset: u16 } = 8,
}

impl VerificationTypeInfo {
	fn read<B: BytesReadExt>(buffer: &mut B) -> Result<VerificationTypeInfo, IRClassfileError> {
		let tag = buffer.read_u8()?;
		Ok(match tag {
			0 => Self::TopVariableInfo,
			1 => Self::IntegerVariableInfo,
			2 => Self::FloatVariableInfo,
			4 => Self::LongVariableInfo,
			3 => Self::DoubleVariableInfo,
			5 => Self::NullVariableInfo,
			6 => Self::UninitializedThisVariableInfo,
			7 => Self::ObjectVariableInfo {
				cpool_idx: buffer.read_u16()?,
			},
			8 => Self::UninitializedVariableInfo {
				offset: buffer.read_u16()?,
			},
			other => return Err(IRClassfileError::AttributeBodyMalformed(format!("invalid verification type tag {other}"))),
		})
	}
}

#[derive(Debug, Clone)]
pub enum StackMapFrame {
	SameFrame {
		frame_type: u8,
		offset_delta: u16,
	},
	SameLocals1StackItemFrame {
		frame_type: u8,
		offset_delta: u16,
		stack: VerificationTypeInfo,
	},
	SameLocals1StackItemFrameExtended {
		frame_type: u8,
		offset_delta: u16,
		stack: VerificationTypeInfo,
	},
	/// frame_type in [248, 250]: the operand stack is empty and the current locals match
	/// the previous frame's except the last `251 - frame_type` are absent.
	ChopFrame {
		frame_type: u8,
		offset_delta: u16,
	},
	SameFrameExtended {
		frame_type: u8,
		offset_delta: u16,
	},
	AppendFrame {
		frame_type: u8,
		offset_delta: u16,
		locals: Vec<VerificationTypeInfo>,
	},
	FullFrame {
		frame_type: u8,
		offset_delta: u16,
		locals: Vec<VerificationTypeInfo>,
		stack: Vec<VerificationTypeInfo>,
	},
}

impl StackMapFrame {
	pub fn new<B: BytesReadExt>(attribute_data: &mut B) -> Result<Self, IRClassfileError> {
		let frame_type = attribute_data.read_u8()?;
		Ok(match frame_type {
			0..=63 => Self::SameFrame {
				frame_type,
				offset_delta: frame_type as u16,
			},
			64..=127 => Self::SameLocals1StackItemFrame {
				frame_type,
				offset_delta: (frame_type - 64) as u16,
				stack: VerificationTypeInfo::read(attribute_data)?,
			},
			247 => Self::SameLocals1StackItemFrameExtended {
				frame_type,
				offset_delta: attribute_data.read_u16()?,
				stack: VerificationTypeInfo::read(attribute_data)?,
			},
			248..=250 => Self::ChopFrame {
				frame_type,
				offset_delta: attribute_data.read_u16()?,
			},
			251 => Self::SameFrameExtended {
				frame_type,
				offset_delta: attribute_data.read_u16()?,
			},
			252..=254 => {
				let offset_delta = attribute_data.read_u16()?;

				let n_locals = (frame_type - 251) as usize;
				let mut locals = Vec::with_capacity(n_locals);
				for _ in 0..n_locals {
					locals.push(VerificationTypeInfo::read(attribute_data)?);
				}

				Self::AppendFrame {
					frame_type,
					offset_delta,
					locals,
				}
			}
			255 => {
				let offset_delta = attribute_data.read_u16()?;

				let n_locals = attribute_data.read_u16()? as usize;
				let mut locals = Vec::with_capacity(n_locals);
				for _ in 0..n_locals {
					locals.push(VerificationTypeInfo::read(attribute_data)?);
				}

				let n_stack = attribute_data.read_u16()? as usize;
				let mut stack = Vec::with_capacity(n_stack);
				for _ in 0..n_stack {
					stack.push(VerificationTypeInfo::read(attribute_data)?);
				}

				Self::FullFrame {
					frame_type,
					offset_delta,
					locals,
					stack,
				}
			}

			other => return Err(IRClassfileError::AttributeBodyMalformed(format!("invalid stack map frame tag {other}"))),
		})
	}
}

#[derive(Debug, Clone)]
pub struct InnerClassesAttributeClass {
	pub inner_class_info: CPClassRef,
	pub outer_class_info: Option<CPClassRef>,
	pub inner_name: Option<CPUtf8Ref>,
	pub inner_class_access_flags: u16,
}

impl InnerClassesAttributeClass {
	pub fn new<B: BytesReadExt>(cp: &[IRCpTag], buffer: &mut B) -> Result<Self, IRClassfileError> {
		let inner_class_info = CPClassRef::from_cp(cp, buffer.read_u16()?)?;
		let outer_class_index = buffer.read_u16()?;
		let outer_class_info = if outer_class_index == 0 {
			None
		} else {
			Some(CPClassRef::from_cp(cp, outer_class_index)?)
		};
		let inner_name_index = buffer.read_u16()?;
		let inner_name = if inner_name_index == 0 {
			None
		} else {
			Some(CPUtf8Ref::new(inner_name_index, &cp_entry(cp, inner_name_index)?)?)
		};
		let inner_class_access_flags = buffer.read_u16()?;

		Ok(Self {
			inner_class_info,
			outer_class_info,
			inner_name,
			inner_class_access_flags,
		})
	}
}

#[derive(Debug, Clone)]
pub struct InnerClassesAttribute {
	pub classes: Vec<InnerClassesAttributeClass>,
}

#[derive(Debug, Clone)]
pub struct LineNumberEntry {
	pub start_pc: u16,
	pub line_number: u16,
}

#[derive(Debug, Clone)]
pub struct LocalVariableEntry {
	pub start_pc: u16,
	pub length: u16,
	pub name: CPUtf8Ref,
	pub descriptor_or_signature: CPUtf8Ref,
	pub index: u16,
}

#[derive(Debug, Clone)]
pub struct CodeAttributeException {
	pub start_pc: u16,
	pub end_pc: u16,
	pub handler_pc: u16,
	pub catch_type: u16,
}

impl CodeAttributeException {
	fn new<B: BytesReadExt>(buffer: &mut B) -> Result<Self, IRClassfileError> {
		Ok(Self {
			start_pc: buffer.read_u16()?,
			end_pc: buffer.read_u16()?,
			handler_pc: buffer.read_u16()?,
			catch_type: buffer.read_u16()?,
		})
	}
}

/// The raw `Code` attribute (JVMS 4.7.3): bytecode stays as unparsed bytes here, since the
/// Pack200 assembler/recorder is what decides whether and how to walk it. [`CodeAttribute::instructions`]
/// is the entry point for a linear, offset-tagged decode of `code` when one is needed.
#[derive(Debug, Clone)]
pub struct CodeAttribute {
	pub max_stack: u16,
	pub max_locals: u16,
	pub code: Vec<u8>,
	pub exception_table: Vec<CodeAttributeException>,
	pub attributes: Vec<Box<IRAttributeInfo>>,
}

impl CodeAttribute {
	pub fn new<B: BytesReadExt>(cp: &[IRCpTag], buffer: &mut B) -> Result<Self, IRClassfileError> {
		let max_stack = buffer.read_u16()?;
		let max_locals = buffer.read_u16()?;
		let code_len = buffer.read_u32()? as usize;
		let code = buffer.read_bytes(code_len)?;

		let exception_table_len = buffer.read_u16()? as usize;
		let mut exception_table = Vec::with_capacity(exception_table_len);
		for _ in 0..exception_table_len {
			exception_table.push(CodeAttributeException::new(buffer)?);
		}

		let attribute_len = buffer.read_u16()? as usize;
		let mut attributes = Vec::with_capacity(attribute_len);
		for _ in 0..attribute_len {
			attributes.push(Box::new(IRAttributeInfo::from_io(cp, IOAttributeInfo::read(buffer)?)?));
		}
		Ok(Self {
			max_stack,
			max_locals,
			code,
			exception_table,
			attributes,
		})
	}

	/// Decodes the raw `code` bytes into a linear sequence of instructions, each tagged
	/// with the byte offset its opcode started at. Offsets are what branch fixup and
	/// exception table ranges are expressed in terms of.
	pub fn instructions(&self, cp: &[IRCpTag]) -> Result<Vec<(usize, Instructions)>, IRClassfileError> {
		let mut cursor = Cursor::new(&self.code);
		let mut out = Vec::new();
		while (cursor.position() as usize) < self.code.len() {
			let offset = cursor.position() as usize;
			let insn = Instructions::read(cp, &mut cursor, offset)?;
			out.push((offset, insn));
		}
		Ok(out)
	}
}

#[derive(Debug, Clone)]
pub struct IRAttributeInfo {
	pub name: CPUtf8Ref,
	pub length: u32,
	pub attr: IRAttribute,
}

impl IRAttributeInfo {
	pub fn from_io(cp: &[IRCpTag], raw: IOAttributeInfo) -> Result<Self, IRClassfileError> {
		let name = CPUtf8Ref::new(raw.attribute_name_index, &cp_entry(cp, raw.attribute_name_index)?)?;

		let mut buffer = Cursor::new(raw.info);
		Ok(Self {
			length: raw.attribute_length,
			attr: IRAttribute::new(name.clone(), cp, &mut buffer)?,
			name,
		})
	}
}

#[derive(Debug, Clone)]
pub enum IRAttribute {
	ConstantValue(ConstantValueAttribute),
	Code(CodeAttribute),
	StackMapTable(StackMapTableAttribute),
	Exceptions {
		exception_index_table: Vec<CPClassRef>,
	},
	InnerClasses(InnerClassesAttribute),
	EnclosingMethod {
		class_idx: u16,
		method: Option<CPNameAndTypeRef>,
	},
	Synthetic,
	Signature(CPUtf8Ref),
	SourceFile(CPUtf8Ref),
	SourceDebugExtension(Vec<u8>),
	LineNumberTable(Vec<LineNumberEntry>),
	LocalVariableTable(Vec<LocalVariableEntry>),
	LocalVariableTypeTable(Vec<LocalVariableEntry>),
	Deprecated,
	/// Attribute kinds this crate reads but does not interpret further (annotation bands
	/// and bootstrap methods are out of scope for the bytecode codec core).
	Unknown(Vec<u8>),
}

impl IRAttribute {
	pub fn new<B: BytesReadExt>(name: CPUtf8Ref, cp: &[IRCpTag], data: &mut B) -> Result<Self, IRClassfileError> {
		Ok(match name.data.as_str() {
			"ConstantValue" => {
				let cp_idx = data.read_u16()?;
				let tag = cp_entry(cp, cp_idx)?;
				match tag {
					IRCpTag::Integer(value) => Self::ConstantValue(ConstantValueAttribute::Int { cp_idx, value }),
					IRCpTag::Float(value) => Self::ConstantValue(ConstantValueAttribute::Float { cp_idx, value }),
					IRCpTag::Long(value) => Self::ConstantValue(ConstantValueAttribute::Long { cp_idx, value }),
					IRCpTag::Double(value) => Self::ConstantValue(ConstantValueAttribute::Double { cp_idx, value }),
					IRCpTag::String(value) => Self::ConstantValue(ConstantValueAttribute::String(value)),
					other => {
						return Err(IRClassfileError::AttributeBodyMalformed(format!(
							"ConstantValue points at unsupported tag {other:?}"
						)))
					}
				}
			}

			"Code" => Self::Code(CodeAttribute::new(cp, data)?),

			"StackMapTable" => {
				let n_entries = data.read_u16()? as usize;
				let mut entries = Vec::with_capacity(n_entries);

				for _ in 0..n_entries {
					entries.push(StackMapFrame::new(data)?);
				}

				Self::StackMapTable(StackMapTableAttribute { entries })
			}

			"Exceptions" => {
				let n_exceptions = data.read_u16()? as usize;
				let mut exception_index_table = Vec::with_capacity(n_exceptions);

				for _ in 0..n_exceptions {
					let idx = data.read_u16()?;
					exception_index_table.push(CPClassRef::from_cp(cp, idx)?);
				}

				Self::Exceptions { exception_index_table }
			}

			"InnerClasses" => {
				let n_classes = data.read_u16()? as usize;
				let mut classes = Vec::with_capacity(n_classes);
				for _ in 0..n_classes {
					classes.push(InnerClassesAttributeClass::new(cp, data)?);
				}
				Self::InnerClasses(InnerClassesAttribute { classes })
			}

			"EnclosingMethod" => {
				let class_idx = data.read_u16()?;
				let method_idx = data.read_u16()?;
				let method = if method_idx == 0 {
					None
				} else {
					match cp_entry(cp, method_idx)? {
						IRCpTag::NameAndType { name, descriptor } => Some(CPNameAndTypeRef {
							index: method_idx,
							name,
							ty: descriptor,
						}),
						other => {
							return Err(IRClassfileError::AttributeBodyMalformed(format!(
								"EnclosingMethod points at non-NameAndType tag {other:?}"
							)))
						}
					}
				};
				Self::EnclosingMethod { class_idx, method }
			}

			"Synthetic" => Self::Synthetic,
			"Deprecated" => Self::Deprecated,

			"Signature" => {
				let idx = data.read_u16()?;
				Self::Signature(CPUtf8Ref::new(idx, &cp_entry(cp, idx)?)?)
			}

			"SourceFile" => {
				let idx = data.read_u16()?;
				Self::SourceFile(CPUtf8Ref::new(idx, &cp_entry(cp, idx)?)?)
			}

			"SourceDebugExtension" => {
				let mut rest = Vec::new();
				loop {
					match data.read_u8() {
						Ok(b) => rest.push(b),
						Err(_) => break,
					}
				}
				Self::SourceDebugExtension(rest)
			}

			"LineNumberTable" => {
				let n_entries = data.read_u16()? as usize;
				let mut entries = Vec::with_capacity(n_entries);
				for _ in 0..n_entries {
					entries.push(LineNumberEntry {
						start_pc: data.read_u16()?,
						line_number: data.read_u16()?,
					});
				}
				Self::LineNumberTable(entries)
			}

			"LocalVariableTable" => Self::LocalVariableTable(read_local_variable_entries(cp, data)?),
			"LocalVariableTypeTable" => Self::LocalVariableTypeTable(read_local_variable_entries(cp, data)?),

			_ => {
				let mut rest = Vec::new();
				loop {
					match data.read_u8() {
						Ok(b) => rest.push(b),
						Err(_) => break,
					}
				}
				Self::Unknown(rest)
			}
		})
	}

	pub const fn name(&self) -> &'static str {
		match self {
			Self::ConstantValue(_) => "ConstantValue",
			Self::Code(_) => "Code",
			Self::StackMapTable(_) => "StackMapTable",
			Self::Exceptions {
				exception_index_table: _,
			} => "Exceptions",
			Self::InnerClasses(_) => "InnerClasses",
			Self::EnclosingMethod { class_idx: _, method: _ } => "EnclosingMethod",
			Self::Synthetic => "Synthetic",
			Self::Signature(_) => "Signature",
			Self::SourceFile(_) => "SourceFile",
			Self::SourceDebugExtension(_) => "SourceDebugExtension",
			Self::LineNumberTable(_) => "LineNumberTable",
			Self::LocalVariableTable(_) => "LocalVariableTable",
			Self::LocalVariableTypeTable(_) => "LocalVariableTypeTable",
			Self::Deprecated => "Deprecated",
			Self::Unknown(_) => "Unknown",
		}
	}
}

fn read_local_variable_entries<B: BytesReadExt>(
	cp: &[IRCpTag],
	data: &mut B,
) -> Result<Vec<LocalVariableEntry>, IRClassfileError> {
	let n_entries = data.read_u16()? as usize;
	let mut entries = Vec::with_capacity(n_entries);
	for _ in 0..n_entries {
		let start_pc = data.read_u16()?;
		let length = data.read_u16()?;
		let name_idx = data.read_u16()?;
		let descriptor_idx = data.read_u16()?;
		let index = data.read_u16()?;
		entries.push(LocalVariableEntry {
			start_pc,
			length,
			name: CPUtf8Ref::new(name_idx, &cp_entry(cp, name_idx)?)?,
			descriptor_or_signature: CPUtf8Ref::new(descriptor_idx, &cp_entry(cp, descriptor_idx)?)?,
			index,
		});
	}
	Ok(entries)
}

#[cfg(test)]
mod tests {
	use std::rc::Rc;

	use super::*;

	fn utf8_pool(strings: &[&str]) -> Vec<IRCpTag> {
		strings.iter().map(|s| IRCpTag::Utf8(Rc::new(s.to_string()))).collect()
	}

	#[test]
	fn reads_line_number_table() {
		let cp = utf8_pool(&["LineNumberTable"]);
		let name = CPUtf8Ref::new(1, &cp[0]).unwrap();
		let bytes = vec![0, 2, 0, 0, 0, 10, 0, 3, 0, 11];
		let mut cursor = Cursor::new(bytes);
		let attr = IRAttribute::new(name, &cp, &mut cursor).unwrap();
		match attr {
			IRAttribute::LineNumberTable(entries) => {
				assert_eq!(entries.len(), 2);
				assert_eq!(entries[0].start_pc, 0);
				assert_eq!(entries[0].line_number, 10);
				assert_eq!(entries[1].start_pc, 3);
				assert_eq!(entries[1].line_number, 11);
			}
			other => panic!("expected LineNumberTable, got {other:?}"),
		}
	}

	#[test]
	fn unknown_attribute_is_kept_as_raw_bytes() {
		let cp = utf8_pool(&["RuntimeVisibleAnnotations"]);
		let name = CPUtf8Ref::new(1, &cp[0]).unwrap();
		let bytes = vec![1, 2, 3, 4];
		let mut cursor = Cursor::new(bytes.clone());
		let attr = IRAttribute::new(name, &cp, &mut cursor).unwrap();
		assert!(matches!(attr, IRAttribute::Unknown(b) if b == bytes));
	}
}
