use std::collections::HashMap;
use std::rc::Rc;

use maya_classfile_io::class_pool::IOCpTag;

use crate::error::IRClassfileError;

// https://docs.oracle.com/javase/specs/jvms/se9/html/jvms-5.html#jvms-5.4.3.5
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum IRMethodRefKind {
	GetField = 1,
	GetStatic,
	PutField,
	PutStatic,
	InvokeVirtual,
	InvokeStatic,
	InvokeSpecial,
	NewInvokeSpecial,
	InvokeInterface,
}

impl IRMethodRefKind {
	pub fn from(value: u8) -> Result<IRMethodRefKind, IRClassfileError> {
		Ok(match value {
			1 => Self::GetField,
			2 => Self::GetStatic,
			3 => Self::PutField,
			4 => Self::PutStatic,
			5 => Self::InvokeVirtual,
			6 => Self::InvokeStatic,
			7 => Self::InvokeSpecial,
			8 => Self::NewInvokeSpecial,
			9 => Self::InvokeInterface,
			other => {
				return Err(IRClassfileError::AttributeBodyMalformed(format!(
					"invalid method handle reference_kind {other}"
				)))
			}
		})
	}
}

#[derive(Debug, Clone)]
pub struct CPUtf8Ref {
	pub data: Rc<String>,
	pub index: u16,
}

impl CPUtf8Ref {
	pub fn new(index: u16, utf8_tag: &IRCpTag) -> Result<Self, IRClassfileError> {
		match utf8_tag {
			IRCpTag::Class(this) => Ok(Self {
				data: this.data.clone(),
				index,
			}),
			IRCpTag::Utf8(data) => Ok(Self { data: data.clone(), index }),
			other => Err(IRClassfileError::AttributeBodyMalformed(format!(
				"expected a utf8-bearing constant pool tag, found {other:?}"
			))),
		}
	}
}

#[derive(Debug, Clone)]
pub struct CPNameAndTypeRef {
	pub index: u16,
	pub name: CPUtf8Ref,
	pub ty: CPUtf8Ref,
}

// https://docs.oracle.com/javase/specs/jvms/se7/html/jvms-4.html#jvms-4.4.8
#[derive(Debug, Clone)]
pub struct CPMethodHandleRef {
	pub kind: IRMethodRefKind,
	pub ref_tag: Box<IRCpTag>,
	pub ref_index: u16,
}

#[derive(Debug, Clone)]
#[repr(u8)]
pub enum IRCpTag {
	Utf8(Rc<String>) = 1,
	Integer(i32) = 3,
	Float(f32) = 4,
	Long(i64) = 5,
	Double(f64) = 6,
	Class(CPUtf8Ref) = 7,
	String(CPUtf8Ref) = 8,
	FieldRef {
		class_index: u16,
		name_and_ty: CPNameAndTypeRef,
	} = 9,
	MethodRef {
		class_index: u16,
		name_and_ty: CPNameAndTypeRef,
	} = 10,
	InterfaceMethodRef {
		class_index: u16,
		name_and_ty: CPNameAndTypeRef,
	} = 11,
	NameAndType {
		name: CPUtf8Ref,
		descriptor: CPUtf8Ref,
	} = 12,
	// https://docs.oracle.com/javase/specs/jvms/se7/html/jvms-4.html#jvms-4.4.8
	MethodHandle(CPMethodHandleRef) = 15,
	// https://docs.oracle.com/javase/specs/jvms/se7/html/jvms-4.html#jvms-4.4.9
	MethodType(CPUtf8Ref) = 16,
	// https://docs.oracle.com/javase/specs/jvms/se7/html/jvms-4.html#jvms-4.4.10
	InvokeDynamic {
		bootstrap_method_attr_index: u16,
		name_and_ty: CPNameAndTypeRef,
	} = 18,
	/// Mirrors [`IOCpTag::Unusable`]: the slot after a `Long`/`Double` entry. Kept so this
	/// vec stays index-parallel with the raw one-based class-file constant pool indices.
	Unusable = 0,
}

macro_rules! parse_tag_idx {
	($idx:ident, $raw_tags:ident, $formed_tags:ident) => {{
		match $formed_tags.get(*$idx as usize - 1) {
			Some(tag) => tag.clone(),
			None => Self::parse_tag(&$raw_tags[*$idx as usize - 1], $raw_tags, $formed_tags)?,
		}
	}};
}

impl IRCpTag {
	fn parse_tag(tag: &IOCpTag, raw_tags: &[IOCpTag], formed_tags: &[IRCpTag]) -> Result<IRCpTag, IRClassfileError> {
		Ok(match tag {
			IOCpTag::Unusable => IRCpTag::Unusable,
			IOCpTag::Utf8 { length: _, bytes } => IRCpTag::Utf8(Rc::new(maya_mutf8::decode(bytes)?)),
			IOCpTag::Integer { bytes } => IRCpTag::Integer(i32::from_be_bytes(*bytes)),
			IOCpTag::Float { bytes } => IRCpTag::Float(f32::from_be_bytes(*bytes)),
			IOCpTag::Long { bytes } => IRCpTag::Long(i64::from_be_bytes(*bytes)),
			IOCpTag::Double { bytes } => IRCpTag::Double(f64::from_be_bytes(*bytes)),
			IOCpTag::Class { name_index } => {
				let utf8_tag = parse_tag_idx!(name_index, raw_tags, formed_tags);
				IRCpTag::Class(CPUtf8Ref::new(*name_index, &utf8_tag)?)
			}
			IOCpTag::String { utf8_index } => {
				let utf8_tag = parse_tag_idx!(utf8_index, raw_tags, formed_tags);
				IRCpTag::String(CPUtf8Ref::new(*utf8_index, &utf8_tag)?)
			}
			IOCpTag::FieldRef {
				class_index,
				name_and_ty_index,
			} => {
				let name_and_ty = Self::resolve_name_and_type(name_and_ty_index, raw_tags, formed_tags)?;
				IRCpTag::FieldRef {
					class_index: *class_index,
					name_and_ty,
				}
			}
			IOCpTag::MethodRef {
				class_index,
				name_and_ty_index,
			} => {
				let name_and_ty = Self::resolve_name_and_type(name_and_ty_index, raw_tags, formed_tags)?;
				IRCpTag::MethodRef {
					class_index: *class_index,
					name_and_ty,
				}
			}
			IOCpTag::InterfaceMethodRef {
				class_index,
				name_and_ty_index,
			} => {
				let name_and_ty = Self::resolve_name_and_type(name_and_ty_index, raw_tags, formed_tags)?;
				IRCpTag::InterfaceMethodRef {
					class_index: *class_index,
					name_and_ty,
				}
			}
			IOCpTag::NameAndType {
				name_index,
				descriptor_index,
			} => {
				let name_tag = parse_tag_idx!(name_index, raw_tags, formed_tags);
				let descriptor_tag = parse_tag_idx!(descriptor_index, raw_tags, formed_tags);
				IRCpTag::NameAndType {
					name: CPUtf8Ref::new(*name_index, &name_tag)?,
					descriptor: CPUtf8Ref::new(*descriptor_index, &descriptor_tag)?,
				}
			}
			IOCpTag::MethodHandle {
				reference_kind,
				reference_index,
			} => {
				let kind = IRMethodRefKind::from(*reference_kind)?;
				let tag = parse_tag_idx!(reference_index, raw_tags, formed_tags);
				IRCpTag::MethodHandle(CPMethodHandleRef {
					kind,
					ref_tag: Box::new(tag),
					ref_index: *reference_index,
				})
			}
			IOCpTag::MethodType { descriptor_index } => {
				let tag = parse_tag_idx!(descriptor_index, raw_tags, formed_tags);
				IRCpTag::MethodType(CPUtf8Ref::new(*descriptor_index, &tag)?)
			}
			IOCpTag::InvokeDynamic {
				bootstrap_method_attr_index,
				name_and_ty_index,
			} => {
				let name_and_ty = Self::resolve_name_and_type(name_and_ty_index, raw_tags, formed_tags)?;
				IRCpTag::InvokeDynamic {
					bootstrap_method_attr_index: *bootstrap_method_attr_index,
					name_and_ty,
				}
			}
		})
	}

	fn resolve_name_and_type(
		name_and_ty_index: &u16,
		raw_tags: &[IOCpTag],
		formed_tags: &[IRCpTag],
	) -> Result<CPNameAndTypeRef, IRClassfileError> {
		match parse_tag_idx!(name_and_ty_index, raw_tags, formed_tags) {
			IRCpTag::NameAndType { name, descriptor } => Ok(CPNameAndTypeRef {
				index: *name_and_ty_index,
				name,
				ty: descriptor,
			}),
			other => Err(IRClassfileError::AttributeBodyMalformed(format!(
				"expected NameAndType, found {other:?}"
			))),
		}
	}

	pub fn from_io(raw_tags: Vec<IOCpTag>) -> Result<Vec<IRCpTag>, IRClassfileError> {
		let mut res = Vec::with_capacity(raw_tags.len());

		for raw_tag in &raw_tags {
			let tag = Self::parse_tag(raw_tag, &raw_tags, &res)?;
			res.push(tag);
		}

		Ok(res)
	}
}

pub(crate) fn cp_entry(cp: &[IRCpTag], index: u16) -> Result<IRCpTag, IRClassfileError> {
	cp.get(index as usize - 1)
		.cloned()
		.ok_or_else(|| IRClassfileError::AttributeBodyMalformed(format!("constant pool index {index} out of range")))
}

/// Resolved handles used by [`crate::code::Instructions`] (the encode-side view of an
/// already-linked method body, where references are plain 1-based constant pool indices,
/// not Pack200 band offsets).
#[derive(Debug, Clone)]
pub struct CPClassRef {
	pub index: u16,
	pub name: CPUtf8Ref,
}

impl CPClassRef {
	pub fn from_cp(cp: &[IRCpTag], index: u16) -> Result<Self, IRClassfileError> {
		match cp.get(index as usize - 1) {
			Some(IRCpTag::Class(name)) => Ok(Self {
				index,
				name: name.clone(),
			}),
			other => Err(IRClassfileError::AttributeBodyMalformed(format!(
				"constant pool index {index} is not a Class entry (found {other:?})"
			))),
		}
	}
}

#[derive(Debug, Clone)]
pub struct CPFieldRef {
	pub index: u16,
	pub class: CPClassRef,
	pub name_and_ty: CPNameAndTypeRef,
}

impl CPFieldRef {
	pub fn from_cp(cp: &[IRCpTag], index: u16) -> Result<Self, IRClassfileError> {
		match cp.get(index as usize - 1) {
			Some(IRCpTag::FieldRef { class_index, name_and_ty }) => Ok(Self {
				index,
				class: CPClassRef::from_cp(cp, *class_index)?,
				name_and_ty: name_and_ty.clone(),
			}),
			other => Err(IRClassfileError::AttributeBodyMalformed(format!(
				"constant pool index {index} is not a FieldRef entry (found {other:?})"
			))),
		}
	}
}

#[derive(Debug, Clone)]
pub struct CPMethodRef {
	pub index: u16,
	pub class: CPClassRef,
	pub name_and_ty: CPNameAndTypeRef,
}

impl CPMethodRef {
	pub fn from_cp(cp: &[IRCpTag], index: u16) -> Result<Self, IRClassfileError> {
		match cp.get(index as usize - 1) {
			Some(IRCpTag::MethodRef { class_index, name_and_ty }) => Ok(Self {
				index,
				class: CPClassRef::from_cp(cp, *class_index)?,
				name_and_ty: name_and_ty.clone(),
			}),
			other => Err(IRClassfileError::AttributeBodyMalformed(format!(
				"constant pool index {index} is not a MethodRef entry (found {other:?})"
			))),
		}
	}
}

#[derive(Debug, Clone)]
pub struct CPInterfaceMethodRef {
	pub index: u16,
	pub class: CPClassRef,
	pub name_and_ty: CPNameAndTypeRef,
}

impl CPInterfaceMethodRef {
	pub fn from_cp(cp: &[IRCpTag], index: u16) -> Result<Self, IRClassfileError> {
		match cp.get(index as usize - 1) {
			Some(IRCpTag::InterfaceMethodRef { class_index, name_and_ty }) => Ok(Self {
				index,
				class: CPClassRef::from_cp(cp, *class_index)?,
				name_and_ty: name_and_ty.clone(),
			}),
			other => Err(IRClassfileError::AttributeBodyMalformed(format!(
				"constant pool index {index} is not an InterfaceMethodRef entry (found {other:?})"
			))),
		}
	}
}

#[derive(Debug, Clone)]
pub struct CPInvokeDynamicRef {
	pub index: u16,
	pub bootstrap_method_attr_index: u16,
	pub name_and_ty: CPNameAndTypeRef,
}

impl CPInvokeDynamicRef {
	pub fn from_cp(cp: &[IRCpTag], index: u16) -> Result<Self, IRClassfileError> {
		match cp.get(index as usize - 1) {
			Some(IRCpTag::InvokeDynamic {
				bootstrap_method_attr_index,
				name_and_ty,
			}) => Ok(Self {
				index,
				bootstrap_method_attr_index: *bootstrap_method_attr_index,
				name_and_ty: name_and_ty.clone(),
			}),
			other => Err(IRClassfileError::AttributeBodyMalformed(format!(
				"constant pool index {index} is not an InvokeDynamic entry (found {other:?})"
			))),
		}
	}
}

// ---------------------------------------------------------------------------------------
// Component B: the Constant Pool View the Pack200 form machinery resolves band offsets
// through. Distinct from the `from_cp` helpers above: those take a raw 1-based class-file
// index (used when re-reading an already-linked method body); these take a `(pool_id,
// offset)` pair where `offset` is the ordinal position among entries of that kind — the
// Nth string constant, not constant-pool-index N. See spec.md §4.B and the `ldc` example
// in §8 scenario 5.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CpPoolId {
	Utf8,
	Int,
	Float,
	Long,
	Double,
	String,
	Class,
	Field,
	Method,
	IMethod,
	NameAndType,
	Signature,
}

/// A constant pool entry resolved through a [`ClassConstantPool`], carrying both the
/// 1-based class-file index a serialized instruction needs and the entry data some forms
/// (descriptor parsing, literal values) need to read.
#[derive(Debug, Clone)]
pub struct ResolvedEntry<'a> {
	pub cp_index: u16,
	pub tag: &'a IRCpTag,
}

/// Owns one class's fully-resolved constant pool and the per-kind, per-class-context
/// indices the Pack200 forms need: "the Nth entry of this kind overall", "the Nth
/// field/method ref declared against this class", and "the Nth `<init>` ref declared
/// against this class".
#[derive(Debug)]
pub struct ClassConstantPool {
	entries: Vec<IRCpTag>,
	by_kind: HashMap<CpPoolId, Vec<usize>>,
	field_refs_by_class: HashMap<String, Vec<usize>>,
	method_refs_by_class: HashMap<String, Vec<usize>>,
	init_refs_by_class: HashMap<String, Vec<usize>>,
}

fn class_name_of(entries: &[IRCpTag], class_index: u16) -> Option<&str> {
	match entries.get(class_index as usize - 1) {
		Some(IRCpTag::Class(name)) => Some(name.data.as_str()),
		_ => None,
	}
}

impl ClassConstantPool {
	pub fn new(entries: Vec<IRCpTag>) -> Self {
		let mut by_kind: HashMap<CpPoolId, Vec<usize>> = HashMap::new();
		let mut field_refs_by_class: HashMap<String, Vec<usize>> = HashMap::new();
		let mut method_refs_by_class: HashMap<String, Vec<usize>> = HashMap::new();
		let mut init_refs_by_class: HashMap<String, Vec<usize>> = HashMap::new();

		for (idx, entry) in entries.iter().enumerate() {
			let kind = match entry {
				IRCpTag::Utf8(_) => Some(CpPoolId::Utf8),
				IRCpTag::Integer(_) => Some(CpPoolId::Int),
				IRCpTag::Float(_) => Some(CpPoolId::Float),
				IRCpTag::Long(_) => Some(CpPoolId::Long),
				IRCpTag::Double(_) => Some(CpPoolId::Double),
				IRCpTag::String(_) => Some(CpPoolId::String),
				IRCpTag::Class(_) => Some(CpPoolId::Class),
				IRCpTag::FieldRef { .. } => Some(CpPoolId::Field),
				IRCpTag::MethodRef { .. } => Some(CpPoolId::Method),
				IRCpTag::InterfaceMethodRef { .. } => Some(CpPoolId::IMethod),
				IRCpTag::NameAndType { .. } => Some(CpPoolId::NameAndType),
				IRCpTag::MethodHandle(_) | IRCpTag::MethodType(_) | IRCpTag::InvokeDynamic { .. } | IRCpTag::Unusable => None,
			};
			if let Some(kind) = kind {
				by_kind.entry(kind).or_default().push(idx);
			}

			match entry {
				IRCpTag::FieldRef { class_index, name_and_ty } => {
					if let Some(name) = class_name_of(&entries, *class_index) {
						field_refs_by_class.entry(name.to_string()).or_default().push(idx);
						if name_and_ty.name.data.as_str() == "<init>" {
							init_refs_by_class.entry(name.to_string()).or_default().push(idx);
						}
					}
				}
				IRCpTag::MethodRef { class_index, name_and_ty } => {
					if let Some(name) = class_name_of(&entries, *class_index) {
						method_refs_by_class.entry(name.to_string()).or_default().push(idx);
						if name_and_ty.name.data.as_str() == "<init>" {
							init_refs_by_class.entry(name.to_string()).or_default().push(idx);
						}
					}
				}
				_ => {}
			}
		}

		Self {
			entries,
			by_kind,
			field_refs_by_class,
			method_refs_by_class,
			init_refs_by_class,
		}
	}

	fn resolve(&self, raw_index: usize) -> ResolvedEntry<'_> {
		ResolvedEntry {
			cp_index: raw_index as u16 + 1,
			tag: &self.entries[raw_index],
		}
	}

	pub fn get_entry(&self, pool: CpPoolId, offset: u32) -> Result<ResolvedEntry<'_>, IRClassfileError> {
		let indices = self
			.by_kind
			.get(&pool)
			.ok_or(IRClassfileError::UnknownPoolEntry { pool, offset })?;
		let raw_index = *indices
			.get(offset as usize)
			.ok_or(IRClassfileError::UnknownPoolEntry { pool, offset })?;
		Ok(self.resolve(raw_index))
	}

	pub fn get_value(&self, pool: CpPoolId, offset: u32) -> Result<ResolvedEntry<'_>, IRClassfileError> {
		self.get_entry(pool, offset)
	}

	fn subpool_for<'a>(
		&'a self,
		map: &'a HashMap<String, Vec<usize>>,
		pool: CpPoolId,
		offset: u32,
		context_class_name: &str,
	) -> Result<ResolvedEntry<'a>, IRClassfileError> {
		let indices = map
			.get(context_class_name)
			.ok_or(IRClassfileError::UnknownPoolEntry { pool, offset })?;
		let raw_index = *indices
			.get(offset as usize)
			.ok_or(IRClassfileError::UnknownPoolEntry { pool, offset })?;
		Ok(self.resolve(raw_index))
	}

	pub fn get_class_specific_entry(
		&self,
		pool: CpPoolId,
		offset: u32,
		context_class_name: &str,
	) -> Result<ResolvedEntry<'_>, IRClassfileError> {
		match pool {
			CpPoolId::Field => self.subpool_for(&self.field_refs_by_class, pool, offset, context_class_name),
			CpPoolId::Method | CpPoolId::IMethod => {
				self.subpool_for(&self.method_refs_by_class, pool, offset, context_class_name)
			}
			_ => Err(IRClassfileError::UnknownPoolEntry { pool, offset }),
		}
	}

	pub fn get_init_entry(&self, offset: u32, context_class_name: &str) -> Result<ResolvedEntry<'_>, IRClassfileError> {
		self.subpool_for(&self.init_refs_by_class, CpPoolId::Method, offset, context_class_name)
	}

	fn ordinal_in(indices: &[usize], cp_index: u16) -> Option<u32> {
		indices
			.iter()
			.position(|&raw_index| raw_index as u16 + 1 == cp_index)
			.map(|pos| pos as u32)
	}

	/// The encode-side inverse of [`Self::get_entry`]: given a real 1-based constant pool
	/// index, finds its ordinal position among entries of the same kind.
	pub fn ordinal_of(&self, pool: CpPoolId, cp_index: u16) -> Option<u32> {
		Self::ordinal_in(self.by_kind.get(&pool)?, cp_index)
	}

	pub fn class_specific_ordinal_of(&self, pool: CpPoolId, cp_index: u16, class_name: &str) -> Option<u32> {
		let map = match pool {
			CpPoolId::Field => &self.field_refs_by_class,
			CpPoolId::Method | CpPoolId::IMethod => &self.method_refs_by_class,
			_ => return None,
		};
		Self::ordinal_in(map.get(class_name)?, cp_index)
	}

	pub fn init_ordinal_of(&self, cp_index: u16, class_name: &str) -> Option<u32> {
		Self::ordinal_in(self.init_refs_by_class.get(class_name)?, cp_index)
	}

	pub fn entries(&self) -> &[IRCpTag] {
		&self.entries
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn utf8(entries: &mut Vec<IRCpTag>, s: &str) -> u16 {
		entries.push(IRCpTag::Utf8(Rc::new(s.to_string())));
		entries.len() as u16
	}

	fn class(entries: &mut Vec<IRCpTag>, name_index: u16) -> u16 {
		let name_tag = entries[name_index as usize - 1].clone();
		let name = CPUtf8Ref::new(name_index, &name_tag).unwrap();
		entries.push(IRCpTag::Class(name));
		entries.len() as u16
	}

	#[test]
	fn string_offset_is_ordinal_not_raw_index() {
		// Mirrors spec.md §8 scenario 5: the first String entry overall resolves to
		// class-pool index 7, regardless of how many non-string entries precede it.
		let mut entries = Vec::new();
		let name_idx = utf8(&mut entries, "Example"); // 1
		class(&mut entries, name_idx); // 2
		utf8(&mut entries, "field"); // 3
		utf8(&mut entries, "I"); // 4
		entries.push(IRCpTag::NameAndType {
			name: CPUtf8Ref::new(3, &entries[2]).unwrap(),
			descriptor: CPUtf8Ref::new(4, &entries[3]).unwrap(),
		}); // 5
		let str_data = utf8(&mut entries, "hi"); // 6
		entries.push(IRCpTag::String(
			CPUtf8Ref::new(str_data, &entries[str_data as usize - 1]).unwrap(),
		)); // 7

		let pool = ClassConstantPool::new(entries);
		let resolved = pool.get_entry(CpPoolId::String, 0).unwrap();
		assert_eq!(resolved.cp_index, 7);
	}

	#[test]
	fn out_of_range_offset_is_unknown_pool_entry() {
		let pool = ClassConstantPool::new(vec![IRCpTag::Integer(1)]);
		assert!(matches!(
			pool.get_entry(CpPoolId::String, 0),
			Err(IRClassfileError::UnknownPoolEntry {
				pool: CpPoolId::String,
				offset: 0
			})
		));
	}

	#[test]
	fn class_specific_subpool_partitions_by_declaring_class() {
		let mut entries = Vec::new();
		let a_name = utf8(&mut entries, "A");
		class(&mut entries, a_name); // 2: Class(A)
		let b_name = utf8(&mut entries, "B");
		class(&mut entries, b_name); // 4: Class(B)
		let field_name = utf8(&mut entries, "x");
		let field_ty = utf8(&mut entries, "I");
		entries.push(IRCpTag::NameAndType {
			name: CPUtf8Ref::new(field_name, &entries[field_name as usize - 1]).unwrap(),
			descriptor: CPUtf8Ref::new(field_ty, &entries[field_ty as usize - 1]).unwrap(),
		}); // 7
		entries.push(IRCpTag::FieldRef {
			class_index: 2, // A
			name_and_ty: CPNameAndTypeRef {
				index: 7,
				name: CPUtf8Ref::new(field_name, &entries[field_name as usize - 1]).unwrap(),
				ty: CPUtf8Ref::new(field_ty, &entries[field_ty as usize - 1]).unwrap(),
			},
		}); // 8: A.x
		entries.push(IRCpTag::FieldRef {
			class_index: 4, // B
			name_and_ty: CPNameAndTypeRef {
				index: 7,
				name: CPUtf8Ref::new(field_name, &entries[field_name as usize - 1]).unwrap(),
				ty: CPUtf8Ref::new(field_ty, &entries[field_ty as usize - 1]).unwrap(),
			},
		}); // 9: B.x

		let pool = ClassConstantPool::new(entries);
		let a_field = pool.get_class_specific_entry(CpPoolId::Field, 0, "A").unwrap();
		assert_eq!(a_field.cp_index, 8);
		let b_field = pool.get_class_specific_entry(CpPoolId::Field, 0, "B").unwrap();
		assert_eq!(b_field.cp_index, 9);
	}
}
