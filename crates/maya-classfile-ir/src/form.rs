use crate::bytecode::{ByteCode, NestedPosition};
use crate::class_pool::{ClassConstantPool, CpPoolId};
use crate::code::Opcodes;
use crate::context::ContextTracker;
use crate::error::IRClassfileError;
use crate::label::{Label, LabelAllocator};
use crate::operand_stream::OperandStreams;

/// The shape of operands a [`Form`] consumes, and how those operands turn into real
/// bytecode. One tag per row of the bytecode form table; everything that differs between
/// two opcodes sharing a tag (real opcode, widened-ness, pool kind) lives on the `Form`
/// that wraps the tag, not on the tag itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
	NoArgument,
	Byte,
	Short,
	Local,
	Label,
	Iinc,
	StringRef,
	IntRef,
	FloatRef,
	LongRef,
	DoubleRef,
	ClassRef,
	NarrowClassRef,
	NewClassRef,
	FieldRef,
	MethodRef,
	IMethodRef,
	ThisFieldRef,
	ThisMethodRef,
	SuperFieldRef,
	SuperMethodRef,
	ThisInitMethodRef,
	SuperInitMethodRef,
	NewInitMethodRef,
	TableSwitch,
	LookupSwitch,
	Wide,
	MultiANewArray,
}

/// Computes the rewrite template (JVMS 6 byte layout, `-1` marking an operand slot the
/// streams fill in) for one form. Variable-length forms (`tableswitch`, `lookupswitch`,
/// `wide`) return just their leading opcode byte or bytes; the rest is appended during
/// [`Form::set_operands`] once the operand count is known.
fn build_template(real_opcode: u8, variant: Variant, widened: bool) -> Vec<i16> {
	use Variant::*;
	let op = real_opcode as i16;
	match variant {
		NoArgument => vec![op],
		Byte => vec![op, -1],
		Short => vec![op, -1, -1],
		Local => vec![op, -1],
		Label => {
			if widened {
				vec![op, -1, -1, -1, -1]
			} else {
				vec![op, -1, -1]
			}
		}
		Iinc => vec![op, -1, -1],
		StringRef | IntRef | FloatRef | LongRef | DoubleRef | NarrowClassRef => {
			if widened {
				vec![op, -1, -1]
			} else {
				vec![op, -1]
			}
		}
		ClassRef | NewClassRef | FieldRef | MethodRef => vec![op, -1, -1],
		IMethodRef => vec![op, -1, -1, -1, 0],
		ThisFieldRef | ThisMethodRef | SuperFieldRef | SuperMethodRef => {
			vec![Opcodes::ALOAD_0 as i16, op, -1, -1]
		}
		ThisInitMethodRef | SuperInitMethodRef | NewInitMethodRef => vec![op, -1, -1],
		TableSwitch | LookupSwitch | Wide => vec![op],
		MultiANewArray => vec![op, -1, -1, -1],
	}
}

/// One row of the bytecode form table: a Pack200 opcode (0-255, 202-239 being
/// pseudo-opcodes with no real JVM equivalent) paired with the real opcode(s) it
/// expands to, whether it's the widened sibling of a narrower form, and the operand
/// shape that drives `set_operands`/`fix_up_targets`.
#[derive(Debug, Clone)]
pub struct Form {
	pub name: &'static str,
	pub pack200_opcode: u16,
	pub real_opcode: u8,
	pub widened: bool,
	pub variant: Variant,
	pub template: Vec<i16>,
}

impl Form {
	pub fn new(name: &'static str, pack200_opcode: u16, real_opcode: u8, widened: bool, variant: Variant) -> Self {
		let template = build_template(real_opcode, variant, widened);
		Self {
			name,
			pack200_opcode,
			real_opcode,
			widened,
			variant,
			template,
		}
	}

	fn pool_id(self_variant: Variant) -> Option<CpPoolId> {
		use Variant::*;
		match self_variant {
			StringRef => Some(CpPoolId::String),
			IntRef => Some(CpPoolId::Int),
			FloatRef => Some(CpPoolId::Float),
			LongRef => Some(CpPoolId::Long),
			DoubleRef => Some(CpPoolId::Double),
			ClassRef | NarrowClassRef | NewClassRef => Some(CpPoolId::Class),
			FieldRef | ThisFieldRef | SuperFieldRef => Some(CpPoolId::Field),
			MethodRef | ThisMethodRef | SuperMethodRef | ThisInitMethodRef | SuperInitMethodRef | NewInitMethodRef => {
				Some(CpPoolId::Method)
			}
			IMethodRef => Some(CpPoolId::IMethod),
			_ => None,
		}
	}

	/// Pulls this form's operand tokens off `streams`, resolves any constant pool or
	/// context reference, and produces the `ByteCode` instance those tokens describe.
	/// `label_source_index` is this instruction's own position in the method, needed so
	/// forward/backward label tokens can be recorded as a delta.
	#[allow(clippy::too_many_arguments)]
	pub fn set_operands(
		&self,
		streams: &mut OperandStreams,
		cp: &ClassConstantPool,
		ctx: &mut ContextTracker,
	) -> Result<ByteCode, IRClassfileError> {
		use Variant::*;

		let mut bc = ByteCode::new(self.pack200_opcode, self.real_opcode, &self.template);
		// Every registered form's real opcode is a single byte; widened locals/iinc go
		// through the dedicated `wide` form (Variant::Wide) instead of doubling this.
		let opcode_width = 1usize;

		match self.variant {
			NoArgument => {}
			Byte => {
				let v = streams.byte_imm.take_next("byte_imm")?;
				bc.set_operand_bytes(opcode_width, &[v as u8]);
			}
			Short => {
				let v = streams.short_imm.take_next("short_imm")?;
				bc.set_operand_signed_2bytes(v as i16, opcode_width);
			}
			Local => {
				let v = streams.local.take_next("local")?;
				bc.set_operand_bytes(opcode_width, &[v as u8]);
			}
			Label => {
				let delta = streams.label.take_next("label")?;
				let width = if self.widened { 4 } else { 2 };
				bc.set_targets(vec![delta], vec![NestedPosition { offset: opcode_width, width }]);
			}
			Iinc => {
				let index = streams.local.take_next("local")?;
				let constant = streams.byte_imm.take_next("byte_imm")?;
				bc.set_operand_bytes(opcode_width, &[index as u8]);
				bc.set_operand_bytes(opcode_width + 1, &[constant as u8]);
			}
			StringRef | IntRef | FloatRef | LongRef | DoubleRef | ClassRef | NarrowClassRef => {
				let stream = match self.variant {
					StringRef => &mut streams.string_ref,
					IntRef => &mut streams.int_ref,
					FloatRef => &mut streams.float_ref,
					LongRef => &mut streams.long_ref,
					DoubleRef => &mut streams.double_ref,
					_ => &mut streams.class_ref,
				};
				let offset = stream.take_next("ref")?;
				let entry = cp.get_entry(Self::pool_id(self.variant).unwrap(), offset as u32)?;
				if self.widened || matches!(self.variant, ClassRef) {
					bc.push_nested(NestedPosition { offset: opcode_width, width: 2 }, entry.cp_index);
				} else {
					let narrow = u8::try_from(entry.cp_index)
						.map_err(|_| IRClassfileError::NarrowIndexOverflow(entry.cp_index))?;
					bc.push_nested(NestedPosition { offset: opcode_width, width: 1 }, narrow as u16);
				}
			}
			NewClassRef => {
				let offset = streams.new_class_index.take_next("new_class_index")?;
				let entry = cp.get_entry(CpPoolId::Class, offset as u32)?;
				bc.push_nested(NestedPosition { offset: opcode_width, width: 2 }, entry.cp_index);
				ctx.set_new_class(entry_class_name(cp, entry.cp_index)?);
			}
			FieldRef | MethodRef | IMethodRef => {
				let stream = match self.variant {
					FieldRef => &mut streams.field_ref,
					MethodRef => &mut streams.method_ref,
					_ => &mut streams.imethod_ref,
				};
				let offset = stream.take_next("ref")?;
				let entry = cp.get_entry(Self::pool_id(self.variant).unwrap(), offset as u32)?;
				bc.push_nested(NestedPosition { offset: opcode_width, width: 2 }, entry.cp_index);
				if matches!(self.variant, IMethodRef) {
					let descriptor = interface_method_descriptor(cp, entry.cp_index)?;
					bc.set_operand_bytes(opcode_width + 2, &[descriptor_arg_count(&descriptor) + 1]);
				}
			}
			ThisFieldRef | ThisMethodRef | SuperFieldRef | SuperMethodRef => {
				let class_name = if self.is_class_specific_super() {
					ctx.super_class()
				} else {
					ctx.current_class()
				}
				.ok_or_else(|| IRClassfileError::AttributeBodyMalformed(format!("{} used with no class in context", self.name)))?
				.to_string();
				let (stream, pool) = match self.variant {
					ThisFieldRef => (&mut streams.this_field_ref, CpPoolId::Field),
					SuperFieldRef => (&mut streams.super_field_ref, CpPoolId::Field),
					ThisMethodRef => (&mut streams.this_method_ref, CpPoolId::Method),
					_ => (&mut streams.super_method_ref, CpPoolId::Method),
				};
				let offset = stream.take_next("ref")?;
				let entry = cp.get_class_specific_entry(pool, offset as u32, &class_name)?;
				// aload_0 (1 byte) precedes the real opcode byte; the ref sits right after it.
				bc.push_nested(NestedPosition { offset: 2, width: 2 }, entry.cp_index);
			}
			ThisInitMethodRef | SuperInitMethodRef | NewInitMethodRef => {
				let class_name = match self.variant {
					ThisInitMethodRef => ctx.current_class(),
					SuperInitMethodRef => ctx.super_class(),
					_ => ctx.new_class(),
				}
				.ok_or_else(|| IRClassfileError::AttributeBodyMalformed(format!("{} used with no class in context", self.name)))?
				.to_string();
				let offset = streams.init_ref.take_next("init_ref")?;
				let entry = cp.get_init_entry(offset as u32, &class_name)?;
				bc.push_nested(NestedPosition { offset: opcode_width, width: 2 }, entry.cp_index);
			}
			TableSwitch => {
				// Wire order per the Pack200 band layout: case_count, default_label,
				// low_value, then case_count case labels. `high` is never banded — it is
				// always `low + case_count - 1`, so the real classfile's redundant `high`
				// field is recomputed here rather than read off any stream.
				let count = streams.case_count.take_next("case_count")? as usize;
				let default = streams.label.take_next("label")?;
				let low = streams.case_value.take_next("case_value")?;
				let high = low + count as i32 - 1;
				let mut case_deltas = Vec::with_capacity(count + 1);
				case_deltas.push(default);
				for _ in 0..count {
					case_deltas.push(streams.label.take_next("label")?);
				}
				append_switch_operands(&mut bc, low, Some(high), &case_deltas);
			}
			LookupSwitch => {
				let default = streams.label.take_next("label")?;
				let count = streams.case_count.take_next("case_count")? as usize;
				let mut pairs = Vec::with_capacity(count);
				let mut case_deltas = Vec::with_capacity(count + 1);
				case_deltas.push(default);
				for _ in 0..count {
					let value = streams.case_value.take_next("case_value")?;
					let delta = streams.label.take_next("label")?;
					pairs.push(value);
					case_deltas.push(delta);
				}
				append_lookup_operands(&mut bc, &pairs, &case_deltas);
			}
			Wide => {
				let inner = streams.wide_opcode.take_next("wide_opcode")? as u8;
				bc.extend_rewrite(&[inner]);
				let index = streams.local.take_next("local")?;
				bc.extend_rewrite(&(index as u16).to_be_bytes());
				if inner == Opcodes::IINC {
					let constant = streams.short_imm.take_next("short_imm")?;
					bc.extend_rewrite(&(constant as i16).to_be_bytes());
				}
			}
			MultiANewArray => {
				let offset = streams.class_ref.take_next("class_ref")?;
				let entry = cp.get_entry(CpPoolId::Class, offset as u32)?;
				let dims = streams.byte_imm.take_next("byte_imm")?;
				bc.push_nested(NestedPosition { offset: 1, width: 2 }, entry.cp_index);
				bc.set_operand_bytes(3, &[dims as u8]);
			}
		}

		Ok(bc)
	}

	fn is_class_specific_super(&self) -> bool {
		matches!(self.variant, Variant::SuperFieldRef | Variant::SuperMethodRef)
	}
}

fn interface_method_descriptor(cp: &ClassConstantPool, cp_index: u16) -> Result<String, IRClassfileError> {
	match cp.entries().get(cp_index as usize - 1) {
		Some(crate::class_pool::IRCpTag::InterfaceMethodRef { name_and_ty, .. }) => Ok(name_and_ty.ty.data.as_str().to_string()),
		other => Err(IRClassfileError::AttributeBodyMalformed(format!(
			"constant pool index {cp_index} is not an InterfaceMethodRef entry (found {other:?})"
		))),
	}
}

/// Argument slot count for an `invokeinterface` method descriptor, not counting the
/// receiver `invokeinterface` itself accounts for separately (JVMS 6.5.invokeinterface).
fn descriptor_arg_count(descriptor: &str) -> u8 {
	let params = descriptor.strip_prefix('(').and_then(|d| d.split(')').next()).unwrap_or("");
	let mut count = 0u8;
	let mut chars = params.chars().peekable();
	while let Some(c) = chars.next() {
		match c {
			'J' | 'D' => count += 2,
			'L' => {
				while chars.next_if(|&c| c != ';').is_some() {}
				chars.next();
				count += 1;
			}
			'[' => {
				while chars.next_if(|&c| c == '[').is_some() {}
				match chars.next() {
					Some('L') => {
						while chars.next_if(|&c| c != ';').is_some() {}
						chars.next();
					}
					_ => {}
				}
				count += 1;
			}
			_ => count += 1,
		}
	}
	count
}

fn entry_class_name(cp: &ClassConstantPool, class_index: u16) -> Result<String, IRClassfileError> {
	match cp.entries().get(class_index as usize - 1) {
		Some(crate::class_pool::IRCpTag::Class(name)) => Ok(name.data.as_str().to_string()),
		_ => Err(IRClassfileError::AttributeBodyMalformed(format!(
			"constant pool index {class_index} is not a Class entry"
		))),
	}
}

/// `tableswitch`'s fixed-stride layout: `default`, `low`, `high`, then one 4-byte offset
/// per case in `[low, high]`. Alignment padding is applied later by the assembler, which
/// knows the instruction's absolute byte offset; this only appends the logical operand
/// bytes after the opcode.
fn append_switch_operands(bc: &mut ByteCode, low: i32, high: Option<i32>, case_deltas: &[i32]) {
	let high = high.unwrap_or(low);
	bc.extend_rewrite(&[0, 0, 0, 0]); // default, filled via targets below
	bc.extend_rewrite(&low.to_be_bytes());
	bc.extend_rewrite(&high.to_be_bytes());
	let mut positions = vec![NestedPosition { offset: 1, width: 4 }];
	for i in 0..case_deltas.len() - 1 {
		let offset = 13 + i * 4;
		bc.extend_rewrite(&[0, 0, 0, 0]);
		positions.push(NestedPosition { offset, width: 4 });
	}
	bc.set_targets(case_deltas.to_vec(), positions);
}

/// `lookupswitch`'s layout: `default`, `npairs`, then `(match, 4-byte offset)` pairs.
fn append_lookup_operands(bc: &mut ByteCode, pairs: &[i32], case_deltas: &[i32]) {
	bc.extend_rewrite(&[0, 0, 0, 0]); // default
	bc.extend_rewrite(&(pairs.len() as i32).to_be_bytes());
	let mut positions = vec![NestedPosition { offset: 1, width: 4 }];
	for (i, value) in pairs.iter().enumerate() {
		let match_offset = 9 + i * 8;
		bc.extend_rewrite(&value.to_be_bytes());
		bc.extend_rewrite(&[0, 0, 0, 0]);
		positions.push(NestedPosition {
			offset: match_offset + 4,
			width: 4,
		});
	}
	bc.set_targets(case_deltas.to_vec(), positions);
}

/// Allocates an encode-side label for a branch target discovered while still walking a
/// method forward, and records the source instruction it will eventually fix up against.
pub fn allocate_forward_label(allocator: &mut LabelAllocator) -> Label {
	allocator.allocate()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::class_pool::{CPUtf8Ref, IRCpTag};
	use std::rc::Rc;

	fn string_pool() -> ClassConstantPool {
		let mut entries = Vec::new();
		entries.push(IRCpTag::Utf8(Rc::new("hi".to_string())));
		entries.push(IRCpTag::String(CPUtf8Ref::new(1, &entries[0]).unwrap()));
		ClassConstantPool::new(entries)
	}

	#[test]
	fn narrow_ldc_resolves_ordinal_string() {
		let form = Form::new("ildc", 48, Opcodes::LDC, false, Variant::StringRef);
		let pool = string_pool();
		let mut streams = OperandStreams {
			string_ref: crate::operand_stream::TokenStream::new(vec![0]),
			..Default::default()
		};
		let mut ctx = ContextTracker::default();
		let bc = form.set_operands(&mut streams, &pool, &mut ctx).unwrap();
		assert_eq!(bc.serialize(), vec![Opcodes::LDC, 2]);
	}

	#[test]
	fn real_opcode_18_decodes_narrow_ldc_of_a_string() {
		// Six filler entries ahead of the one String constant, so its raw cp_index lands
		// at 7 while its String-kind ordinal is still 0.
		let mut entries = Vec::new();
		entries.push(IRCpTag::Utf8(Rc::new("hi".to_string()))); // 1
		for i in 0..5 {
			entries.push(IRCpTag::Utf8(Rc::new(format!("filler{i}"))));
		} // 2..=6
		entries.push(IRCpTag::String(CPUtf8Ref::new(1, &entries[0]).unwrap())); // 7
		let pool = ClassConstantPool::new(entries);

		let form = crate::registry::get(18).unwrap();
		let mut streams = OperandStreams {
			string_ref: crate::operand_stream::TokenStream::new(vec![0]),
			..Default::default()
		};
		let mut ctx = ContextTracker::default();
		let bc = form.set_operands(&mut streams, &pool, &mut ctx).unwrap();
		assert_eq!(bc.serialize(), vec![0x12, 0x07]);
	}

	#[test]
	fn wide_iinc_reads_local_and_short_imm() {
		let form = Form::new("wide", Opcodes::WIDE as u16, Opcodes::WIDE, false, Variant::Wide);
		let pool = ClassConstantPool::new(vec![]);
		let mut ctx = ContextTracker::default();
		let mut streams = OperandStreams {
			wide_opcode: crate::operand_stream::TokenStream::new(vec![Opcodes::IINC as i32]),
			local: crate::operand_stream::TokenStream::new(vec![300]),
			short_imm: crate::operand_stream::TokenStream::new(vec![-5]),
			..Default::default()
		};
		let bc = form.set_operands(&mut streams, &pool, &mut ctx).unwrap();
		assert_eq!(bc.serialize(), vec![Opcodes::WIDE, Opcodes::IINC, 0x01, 0x2C, 0xFF, 0xFB]);
	}

	#[test]
	fn wide_load_reads_only_local() {
		let form = Form::new("wide", Opcodes::WIDE as u16, Opcodes::WIDE, false, Variant::Wide);
		let pool = ClassConstantPool::new(vec![]);
		let mut ctx = ContextTracker::default();
		let mut streams = OperandStreams {
			wide_opcode: crate::operand_stream::TokenStream::new(vec![Opcodes::ILOAD as i32]),
			local: crate::operand_stream::TokenStream::new(vec![300]),
			..Default::default()
		};
		let bc = form.set_operands(&mut streams, &pool, &mut ctx).unwrap();
		assert_eq!(bc.serialize(), vec![Opcodes::WIDE, Opcodes::ILOAD, 0x01, 0x2C]);
	}

	#[test]
	fn this_field_get_prepends_aload_0() {
		let mut entries = Vec::new();
		entries.push(IRCpTag::Utf8(Rc::new("Foo".to_string())));
		entries.push(IRCpTag::Class(CPUtf8Ref::new(1, &entries[0]).unwrap()));
		entries.push(IRCpTag::Utf8(Rc::new("x".to_string())));
		entries.push(IRCpTag::Utf8(Rc::new("I".to_string())));
		entries.push(IRCpTag::NameAndType {
			name: CPUtf8Ref::new(3, &entries[2]).unwrap(),
			descriptor: CPUtf8Ref::new(4, &entries[3]).unwrap(),
		});
		entries.push(IRCpTag::FieldRef {
			class_index: 2,
			name_and_ty: crate::class_pool::CPNameAndTypeRef {
				index: 5,
				name: CPUtf8Ref::new(3, &entries[2]).unwrap(),
				ty: CPUtf8Ref::new(4, &entries[3]).unwrap(),
			},
		});
		let pool = ClassConstantPool::new(entries);
		let mut ctx = ContextTracker::new("Foo", "java/lang/Object");
		let form = Form::new("this_getfield", 200, Opcodes::GETFIELD, false, Variant::ThisFieldRef);
		let mut streams = OperandStreams {
			this_field_ref: crate::operand_stream::TokenStream::new(vec![0]),
			..Default::default()
		};
		let bc = form.set_operands(&mut streams, &pool, &mut ctx).unwrap();
		assert_eq!(bc.serialize(), vec![Opcodes::ALOAD_0, Opcodes::GETFIELD, 0, 6]);
	}
}
