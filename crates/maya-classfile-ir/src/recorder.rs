use std::collections::HashMap;

use crate::class_pool::{ClassConstantPool, CpPoolId, IRCpTag};
use crate::code::{Instructions, Opcodes};
use crate::context::ContextTracker;
use crate::error::IRClassfileError;
use crate::label::LabelAllocator;
use crate::operand_stream::OperandStreams;
use crate::registry;

/// The Pack200 opcode sequence and operand bands recorded for one method body, ready to
/// be handed to a `bc_bands`-style serializer (out of scope here; recorder.rs only
/// produces the in-memory bands `assembler.rs` can turn straight back into bytes).
#[derive(Debug, Default)]
pub struct RecordedMethod {
	pub pack200_opcodes: Vec<u16>,
	pub streams: OperandStreams,
}

/// Walks an already-decoded method body and re-expresses it as Pack200 pseudo-opcodes:
/// fusing `aload_0` into the `this_*`/`super_*` forms where the receiver and field/method
/// match the class in context, splitting `ldc`/`ldc_w`/`ldc2_w` by constant kind, and
/// recording every branch target as an instruction-index delta via a [`LabelAllocator`].
pub struct MethodInsnRecorder<'a> {
	instructions: &'a [(usize, Instructions)],
	offset_to_index: HashMap<usize, usize>,
	labels: LabelAllocator,
}

impl<'a> MethodInsnRecorder<'a> {
	pub fn new(instructions: &'a [(usize, Instructions)]) -> Self {
		let mut offset_to_index = HashMap::with_capacity(instructions.len());
		let mut labels = LabelAllocator::new();
		for (index, (offset, _)) in instructions.iter().enumerate() {
			offset_to_index.insert(*offset, index);
			let label = labels.allocate();
			labels.place(label, index);
		}
		Self {
			instructions,
			offset_to_index,
			labels,
		}
	}

	/// Entry point: records `instructions` into a [`RecordedMethod`]. `cp` resolves real
	/// constant pool indices back to their ordinal band position; `ctx` supplies the
	/// current/super class names the `this_*`/`super_*` fusions compare against.
	pub fn encode_method(
		instructions: &'a [(usize, Instructions)],
		cp: &ClassConstantPool,
		ctx: &ContextTracker,
	) -> Result<RecordedMethod, IRClassfileError> {
		let mut recorder = Self::new(instructions);
		let mut out = RecordedMethod::default();
		let mut i = 0;
		while i < recorder.instructions.len() {
			let consumed = recorder.record_one(i, cp, ctx, &mut out)?;
			i += consumed;
		}
		Ok(out)
	}

	fn label_delta(&self, source_index: usize, target_offset: i64) -> Result<i32, IRClassfileError> {
		let target_index = *self
			.offset_to_index
			.get(&(target_offset as usize))
			.ok_or(IRClassfileError::DanglingLabel {
				target: target_offset.max(0) as usize,
				instruction_count: self.instructions.len(),
			})?;
		let label = self.labels.label_for(target_index);
		self.labels.delta_from(label, source_index)
	}

	/// Records the instruction at `index`, fusing with the next one when it is an
	/// `aload_0` immediately followed by a field/method access on `this` or `super`.
	/// Returns how many real instructions were consumed (1, or 2 when fused).
	fn record_one(
		&mut self,
		index: usize,
		cp: &ClassConstantPool,
		ctx: &ContextTracker,
		out: &mut RecordedMethod,
	) -> Result<usize, IRClassfileError> {
		let (offset, insn) = &self.instructions[index];

		if let Instructions::ALOAD(0) = insn {
			if let Some((next_offset, next)) = self.instructions.get(index + 1) {
				if let Some(fused) = self.try_fuse(cp, ctx, *next_offset, next)? {
					let (pseudo_name, ordinal) = fused;
					let form = registry::by_name(pseudo_name)?;
					out.pack200_opcodes.push(form.pack200_opcode);
					self.push_class_specific_ref(out, pseudo_name, ordinal);
					return Ok(2);
				}
			}
		}

		self.record_plain(*offset, insn, cp, ctx, out)?;
		Ok(1)
	}

	fn try_fuse(
		&self,
		cp: &ClassConstantPool,
		ctx: &ContextTracker,
		_next_offset: usize,
		next: &Instructions,
	) -> Result<Option<(&'static str, u32)>, IRClassfileError> {
		let current = ctx.current_class();
		let super_ = ctx.super_class();
		Ok(match next {
			Instructions::GETFIELD(field) => {
				class_relation(cp, &field.class, field.index, CpPoolId::Field, current, super_).map(|(name, ord)| {
					(if name == Relation::This { "this_getfield" } else { "super_getfield" }, ord)
				})
			}
			Instructions::PUTFIELD(field) => {
				class_relation(cp, &field.class, field.index, CpPoolId::Field, current, super_).map(|(name, ord)| {
					(if name == Relation::This { "this_putfield" } else { "super_putfield" }, ord)
				})
			}
			Instructions::INVOKEVIRTUAL(method) => {
				class_relation(cp, &method.class, method.index, CpPoolId::Method, current, super_).map(|(name, ord)| {
					(
						if name == Relation::This {
							"this_invokevirtual"
						} else {
							"super_invokevirtual"
						},
						ord,
					)
				})
			}
			Instructions::INVOKESPECIAL(method) if method.name_and_ty.name.data.as_str() != "<init>" => {
				class_relation(cp, &method.class, method.index, CpPoolId::Method, current, super_).map(|(name, ord)| {
					(
						if name == Relation::This {
							"this_invokespecial"
						} else {
							"super_invokespecial"
						},
						ord,
					)
				})
			}
			_ => None,
		})
	}

	fn push_class_specific_ref(&self, out: &mut RecordedMethod, pseudo_name: &str, ordinal: u32) {
		let stream = match pseudo_name {
			"this_getfield" | "this_putfield" => &mut out.streams.this_field_ref,
			"super_getfield" | "super_putfield" => &mut out.streams.super_field_ref,
			"this_invokevirtual" | "this_invokespecial" => &mut out.streams.this_method_ref,
			_ => &mut out.streams.super_method_ref,
		};
		push_token(stream, ordinal as i32);
	}

	fn record_plain(
		&self,
		offset: usize,
		insn: &Instructions,
		cp: &ClassConstantPool,
		_ctx: &ContextTracker,
		out: &mut RecordedMethod,
	) -> Result<(), IRClassfileError> {
		use Instructions::*;

		macro_rules! push {
			($name:expr) => {
				out.pack200_opcodes.push(registry::by_name($name)?.pack200_opcode)
			};
		}

		match insn {
			NOP => push!("nop"),
			ACONST_NULL => push!("aconst_null"),
			ICONST_M1 => push!("iconst_m1"),
			ICONST_0 => push!("iconst_0"),
			ICONST_1 => push!("iconst_1"),
			ICONST_2 => push!("iconst_2"),
			ICONST_3 => push!("iconst_3"),
			ICONST_4 => push!("iconst_4"),
			ICONST_5 => push!("iconst_5"),
			LCONST_0 => push!("lconst_0"),
			LCONST_1 => push!("lconst_1"),
			FCONST_0 => push!("fconst_0"),
			FCONST_1 => push!("fconst_1"),
			FCONST_2 => push!("fconst_2"),
			DCONST_0 => push!("dconst_0"),
			DCONST_1 => push!("dconst_1"),
			BIPUSH(v) => {
				push!("bipush");
				push_token(&mut out.streams.byte_imm, *v as i32);
			}
			SIPUSH(v) => {
				push!("sipush");
				push_token(&mut out.streams.short_imm, *v as i32);
			}
			LDC(tag) => self.record_ldc(tag, cp, out)?,
			ILOAD(0) => push!("iload_0"),
			ILOAD(1) => push!("iload_1"),
			ILOAD(2) => push!("iload_2"),
			ILOAD(3) => push!("iload_3"),
			ILOAD(n) => self.record_local("iload", Opcodes::ILOAD, *n, out)?,
			LLOAD(n) => self.record_local("lload", Opcodes::LLOAD, *n, out)?,
			FLOAD(n) => self.record_local("fload", Opcodes::FLOAD, *n, out)?,
			DLOAD(n) => self.record_local("dload", Opcodes::DLOAD, *n, out)?,
			ALOAD(n) => self.record_local("aload", Opcodes::ALOAD, *n, out)?,
			IALOAD => push!("iaload"),
			LALOAD => push!("laload"),
			FALOAD => push!("faload"),
			DALOAD => push!("daload"),
			AALOAD => push!("aaload"),
			BALOAD => push!("baload"),
			CALOAD => push!("caload"),
			SALOAD => push!("saload"),
			ISTORE(n) => self.record_local("istore", Opcodes::ISTORE, *n, out)?,
			LSTORE(n) => self.record_local("lstore", Opcodes::LSTORE, *n, out)?,
			FSTORE(n) => self.record_local("fstore", Opcodes::FSTORE, *n, out)?,
			DSTORE(n) => self.record_local("dstore", Opcodes::DSTORE, *n, out)?,
			ASTORE(n) => self.record_local("astore", Opcodes::ASTORE, *n, out)?,
			IASTORE => push!("iastore"),
			LASTORE => push!("lastore"),
			FASTORE => push!("fastore"),
			DASTORE => push!("dastore"),
			AASTORE => push!("aastore"),
			BASTORE => push!("bastore"),
			CASTORE => push!("castore"),
			SASTORE => push!("sastore"),
			POP => push!("pop"),
			POP2 => push!("pop2"),
			DUP => push!("dup"),
			DUP_X1 => push!("dup_x1"),
			DUP_X2 => push!("dup_x2"),
			DUP2 => push!("dup2"),
			DUP2_X1 => push!("dup2_x1"),
			DUP2_X2 => push!("dup2_x2"),
			SWAP => push!("swap"),
			IADD => push!("iadd"),
			LADD => push!("ladd"),
			FADD => push!("fadd"),
			DADD => push!("dadd"),
			ISUB => push!("isub"),
			LSUB => push!("lsub"),
			FSUB => push!("fsub"),
			DSUB => push!("dsub"),
			IMUL => push!("imul"),
			LMUL => push!("lmul"),
			FMUL => push!("fmul"),
			DMUL => push!("dmul"),
			IDIV => push!("idiv"),
			LDIV => push!("ldiv"),
			FDIV => push!("fdiv"),
			DDIV => push!("ddiv"),
			IREM => push!("irem"),
			LREM => push!("lrem"),
			FREM => push!("frem"),
			DREM => push!("drem"),
			INEG => push!("ineg"),
			LNEG => push!("lneg"),
			FNEG => push!("fneg"),
			DNEG => push!("dneg"),
			ISHL => push!("ishl"),
			LSHL => push!("lshl"),
			ISHR => push!("ishr"),
			LSHR => push!("lshr"),
			IUSHR => push!("iushr"),
			LUSHR => push!("lushr"),
			IAND => push!("iand"),
			LAND => push!("land"),
			IOR => push!("ior"),
			LOR => push!("lor"),
			IXOR => push!("ixor"),
			LXOR => push!("lxor"),
			IINC { index, r#const } => {
				if *index <= u8::MAX as u16 && *r#const >= i8::MIN as i16 && *r#const <= i8::MAX as i16 {
					push!("iinc");
					push_token(&mut out.streams.local, *index as i32);
					push_token(&mut out.streams.byte_imm, *r#const as i32);
				} else {
					push!("wide");
					push_token(&mut out.streams.wide_opcode, Opcodes::IINC as i32);
					push_token(&mut out.streams.local, *index as i32);
					push_token(&mut out.streams.short_imm, *r#const as i32);
				}
			}
			I2L => push!("i2l"),
			I2F => push!("i2f"),
			I2D => push!("i2d"),
			L2I => push!("l2i"),
			L2F => push!("l2f"),
			L2D => push!("l2d"),
			F2I => push!("f2i"),
			F2L => push!("f2l"),
			F2D => push!("f2d"),
			D2I => push!("d2i"),
			D2L => push!("d2l"),
			D2F => push!("d2f"),
			I2B => push!("i2b"),
			I2C => push!("i2c"),
			I2S => push!("i2s"),
			LCMP => push!("lcmp"),
			FCMPL => push!("fcmpl"),
			FCMPG => push!("fcmpg"),
			DCMPL => push!("dcmpl"),
			DCMPG => push!("dcmpg"),
			IFEQ(d) => self.record_branch("ifeq", offset, *d as i32, out)?,
			IFNE(d) => self.record_branch("ifne", offset, *d as i32, out)?,
			IFLT(d) => self.record_branch("iflt", offset, *d as i32, out)?,
			IFGE(d) => self.record_branch("ifge", offset, *d as i32, out)?,
			IFGT(d) => self.record_branch("ifgt", offset, *d as i32, out)?,
			IFLE(d) => self.record_branch("ifle", offset, *d as i32, out)?,
			IF_ICMPEQ(d) => self.record_branch("if_icmpeq", offset, *d as i32, out)?,
			IF_ICMPNE(d) => self.record_branch("if_icmpne", offset, *d as i32, out)?,
			IF_ICMPLT(d) => self.record_branch("if_icmplt", offset, *d as i32, out)?,
			IF_ICMPGE(d) => self.record_branch("if_icmpge", offset, *d as i32, out)?,
			IF_ICMPGT(d) => self.record_branch("if_icmpgt", offset, *d as i32, out)?,
			IF_ICMPLE(d) => self.record_branch("if_icmple", offset, *d as i32, out)?,
			IF_ACMPEQ(d) => self.record_branch("if_acmpeq", offset, *d as i32, out)?,
			IF_ACMPNE(d) => self.record_branch("if_acmpne", offset, *d as i32, out)?,
			GOTO(d) => self.record_branch("goto", offset, *d as i32, out)?,
			JSR(d) => self.record_branch("jsr", offset, *d as i32, out)?,
			GOTO_W(d) => self.record_branch("goto_w", offset, *d, out)?,
			JSR_W(d) => self.record_branch("jsr_w", offset, *d, out)?,
			RET(n) => self.record_local("ret", Opcodes::RET, *n, out)?,
			IFNULL(d) => self.record_branch("ifnull", offset, *d as i32, out)?,
			IFNONNULL(d) => self.record_branch("ifnonnull", offset, *d as i32, out)?,
			TABLESWITCH { default, low, high: _, offsets } => {
				// `high` is redundant in the real classfile wire format (`low + count - 1`)
				// and is never banded; only case_count, default, and low cross into the
				// Pack200 operand streams, matching the decode side in `form.rs`.
				push!("tableswitch");
				push_token(&mut out.streams.case_count, offsets.len() as i32);
				push_token(&mut out.streams.label, self.label_delta_at(offset, *default)?);
				push_token(&mut out.streams.case_value, *low);
				for o in offsets {
					push_token(&mut out.streams.label, self.label_delta_at(offset, *o)?);
				}
			}
			LOOKUPSWITCH { default, pairs } => {
				push!("lookupswitch");
				push_token(&mut out.streams.label, self.label_delta_at(offset, *default)?);
				push_token(&mut out.streams.case_count, pairs.len() as i32);
				for (value, delta) in pairs {
					push_token(&mut out.streams.case_value, *value);
					push_token(&mut out.streams.label, self.label_delta_at(offset, *delta)?);
				}
			}
			IRETURN => push!("ireturn"),
			LRETURN => push!("lreturn"),
			FRETURN => push!("freturn"),
			DRETURN => push!("dreturn"),
			ARETURN => push!("areturn"),
			RETURN => push!("return"),
			GETSTATIC(f) => {
				push!("getstatic");
				push_token(&mut out.streams.field_ref, cp.ordinal_of(CpPoolId::Field, f.index).unwrap_or(0) as i32);
			}
			PUTSTATIC(f) => {
				push!("putstatic");
				push_token(&mut out.streams.field_ref, cp.ordinal_of(CpPoolId::Field, f.index).unwrap_or(0) as i32);
			}
			GETFIELD(f) => {
				push!("getfield");
				push_token(&mut out.streams.field_ref, cp.ordinal_of(CpPoolId::Field, f.index).unwrap_or(0) as i32);
			}
			PUTFIELD(f) => {
				push!("putfield");
				push_token(&mut out.streams.field_ref, cp.ordinal_of(CpPoolId::Field, f.index).unwrap_or(0) as i32);
			}
			INVOKEVIRTUAL(m) => {
				push!("invokevirtual");
				push_token(&mut out.streams.method_ref, cp.ordinal_of(CpPoolId::Method, m.index).unwrap_or(0) as i32);
			}
			INVOKESPECIAL(m) if m.name_and_ty.name.data.as_str() == "<init>" => {
				push!("this_init");
				push_token(&mut out.streams.init_ref, cp.init_ordinal_of(m.index, &m.class.name.data).unwrap_or(0) as i32);
			}
			INVOKESPECIAL(m) => {
				push!("invokespecial");
				push_token(&mut out.streams.method_ref, cp.ordinal_of(CpPoolId::Method, m.index).unwrap_or(0) as i32);
			}
			INVOKESTATIC(m) => {
				push!("invokestatic");
				push_token(&mut out.streams.method_ref, cp.ordinal_of(CpPoolId::Method, m.index).unwrap_or(0) as i32);
			}
			INVOKEINTERFACE { method, .. } => {
				push!("invokeinterface");
				push_token(&mut out.streams.imethod_ref, cp.ordinal_of(CpPoolId::IMethod, method.index).unwrap_or(0) as i32);
			}
			INVOKEDYNAMIC(_) => {
				return Err(IRClassfileError::UnsupportedOpcode {
					opcode: Opcodes::INVOKEDYNAMIC as u16,
				})
			}
			NEW(class) => {
				push!("new");
				push_token(&mut out.streams.new_class_index, cp.ordinal_of(CpPoolId::Class, class.index).unwrap_or(0) as i32);
			}
			NEWARRAY(atype) => {
				push!("newarray");
				push_token(&mut out.streams.byte_imm, *atype as i32);
			}
			ANEWARRAY(class) => {
				push!("anewarray");
				push_token(&mut out.streams.class_ref, cp.ordinal_of(CpPoolId::Class, class.index).unwrap_or(0) as i32);
			}
			ARRAYLENGTH => push!("arraylength"),
			ATHROW => push!("athrow"),
			CHECKCAST(class) => {
				push!("checkcast");
				push_token(&mut out.streams.class_ref, cp.ordinal_of(CpPoolId::Class, class.index).unwrap_or(0) as i32);
			}
			INSTANCEOF(class) => {
				push!("instanceof");
				push_token(&mut out.streams.class_ref, cp.ordinal_of(CpPoolId::Class, class.index).unwrap_or(0) as i32);
			}
			MONITORENTER => push!("monitorenter"),
			MONITOREXIT => push!("monitorexit"),
			MULTIANEWARRAY { class, dimensions } => {
				push!("multianewarray");
				push_token(&mut out.streams.class_ref, cp.ordinal_of(CpPoolId::Class, class.index).unwrap_or(0) as i32);
				push_token(&mut out.streams.byte_imm, *dimensions as i32);
			}
			ALOAD(_) => unreachable!("ALOAD(0) is handled by record_one's fusion lookahead"),
		}
		Ok(())
	}

	/// Records a local-variable access. Locals beyond one byte route through the `wide`
	/// form instead of a dedicated widened form: `real_opcode` is the byte `wide_opcode`
	/// carries to tell the decoder which instruction follows the `WIDE` prefix.
	fn record_local(&self, narrow: &str, real_opcode: u8, n: u16, out: &mut RecordedMethod) -> Result<(), IRClassfileError> {
		if n <= u8::MAX as u16 {
			out.pack200_opcodes.push(registry::by_name(narrow)?.pack200_opcode);
		} else {
			out.pack200_opcodes.push(registry::by_name("wide")?.pack200_opcode);
			push_token(&mut out.streams.wide_opcode, real_opcode as i32);
		}
		push_token(&mut out.streams.local, n as i32);
		Ok(())
	}

	fn record_branch(&self, name: &'static str, source_offset: &usize, delta: i32, out: &mut RecordedMethod) -> Result<(), IRClassfileError> {
		out.pack200_opcodes.push(registry::by_name(name)?.pack200_opcode);
		let target = self.label_delta_at(source_offset, delta)?;
		push_token(&mut out.streams.label, target);
		Ok(())
	}

	fn label_delta_at(&self, source_offset: &usize, delta: i32) -> Result<i32, IRClassfileError> {
		let source_index = *self.offset_to_index.get(source_offset).expect("every decoded instruction is indexed");
		self.label_delta(source_index, *source_offset as i64 + delta as i64)
	}

	fn record_ldc(&self, tag: &IRCpTag, cp: &ClassConstantPool, out: &mut RecordedMethod) -> Result<(), IRClassfileError> {
		match tag {
			IRCpTag::Integer(_) => {
				let index = self.index_of(cp, tag)?;
				let ordinal = cp.ordinal_of(CpPoolId::Int, index).unwrap_or(0);
				self.push_ldc("ildc", "ildc_w", ordinal, &mut out.streams.int_ref, out_streams_mut(out))
			}
			IRCpTag::Float(_) => {
				let index = self.index_of(cp, tag)?;
				let ordinal = cp.ordinal_of(CpPoolId::Float, index).unwrap_or(0);
				self.push_ldc("fldc", "fldc_w", ordinal, &mut out.streams.float_ref, out_streams_mut(out))
			}
			IRCpTag::String(_) => {
				let index = self.index_of(cp, tag)?;
				let ordinal = cp.ordinal_of(CpPoolId::String, index).unwrap_or(0);
				self.push_ldc("sldc", "sldc_w", ordinal, &mut out.streams.string_ref, out_streams_mut(out))
			}
			IRCpTag::Class(_) => {
				let index = self.index_of(cp, tag)?;
				let ordinal = cp.ordinal_of(CpPoolId::Class, index).unwrap_or(0);
				self.push_ldc("cldc", "cldc_w", ordinal, &mut out.streams.class_ref, out_streams_mut(out))
			}
			IRCpTag::Long(_) => {
				let index = self.index_of(cp, tag)?;
				let ordinal = cp.ordinal_of(CpPoolId::Long, index).unwrap_or(0);
				out.pack200_opcodes.push(registry::by_name("lldc2_w")?.pack200_opcode);
				push_token(&mut out.streams.long_ref, ordinal as i32);
				Ok(())
			}
			IRCpTag::Double(_) => {
				let index = self.index_of(cp, tag)?;
				let ordinal = cp.ordinal_of(CpPoolId::Double, index).unwrap_or(0);
				out.pack200_opcodes.push(registry::by_name("dldc2_w")?.pack200_opcode);
				push_token(&mut out.streams.double_ref, ordinal as i32);
				Ok(())
			}
			other => Err(IRClassfileError::AttributeBodyMalformed(format!("{other:?} is not a valid ldc operand"))),
		}
	}

	fn index_of(&self, cp: &ClassConstantPool, tag: &IRCpTag) -> Result<u16, IRClassfileError> {
		cp.entries()
			.iter()
			.position(|entry| matches!((entry, tag), (IRCpTag::Integer(a), IRCpTag::Integer(b)) if a == b)
				|| matches!((entry, tag), (IRCpTag::Float(a), IRCpTag::Float(b)) if a == b)
				|| matches!((entry, tag), (IRCpTag::Long(a), IRCpTag::Long(b)) if a == b)
				|| matches!((entry, tag), (IRCpTag::Double(a), IRCpTag::Double(b)) if a == b)
				|| matches!((entry, tag), (IRCpTag::String(a), IRCpTag::String(b)) if a.index == b.index)
				|| matches!((entry, tag), (IRCpTag::Class(a), IRCpTag::Class(b)) if a.index == b.index))
			.map(|pos| pos as u16 + 1)
			.ok_or_else(|| IRClassfileError::AttributeBodyMalformed("ldc operand not present in constant pool".to_string()))
	}

	#[allow(clippy::too_many_arguments)]
	fn push_ldc(
		&self,
		narrow: &str,
		wide: &str,
		ordinal: u32,
		stream: &mut crate::operand_stream::TokenStream,
		opcodes: &mut Vec<u16>,
	) -> Result<(), IRClassfileError> {
		let form = if ordinal <= u8::MAX as u32 {
			registry::by_name(narrow)?
		} else {
			registry::by_name(wide)?
		};
		opcodes.push(form.pack200_opcode);
		push_token(stream, ordinal as i32);
		Ok(())
	}
}

fn out_streams_mut(out: &mut RecordedMethod) -> &mut Vec<u16> {
	&mut out.pack200_opcodes
}

fn push_token(stream: &mut crate::operand_stream::TokenStream, value: i32) {
	stream.push(value);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Relation {
	This,
	Super,
}

/// `ref_index` is the field/method ref's own constant-pool index (not the class entry's
/// index nested inside it); `pool` picks which per-class subpool it ordinal-resolves
/// against.
fn class_relation(
	cp: &ClassConstantPool,
	class: &crate::class_pool::CPClassRef,
	ref_index: u16,
	pool: CpPoolId,
	current: Option<&str>,
	super_: Option<&str>,
) -> Option<(Relation, u32)> {
	if Some(class.name.data.as_str()) == current {
		let ordinal = cp.class_specific_ordinal_of(pool, ref_index, class.name.data.as_str())?;
		Some((Relation::This, ordinal))
	} else if Some(class.name.data.as_str()) == super_ {
		let ordinal = cp.class_specific_ordinal_of(pool, ref_index, class.name.data.as_str())?;
		Some((Relation::Super, ordinal))
	} else {
		None
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::assembler::CodeAssembler;

	#[test]
	fn wide_local_round_trips_through_encode_and_decode() {
		let pool = ClassConstantPool::new(vec![]);
		let ctx = ContextTracker::new("Foo", "java/lang/Object");
		let instructions = vec![(0usize, Instructions::ILOAD(300)), (4usize, Instructions::IRETURN)];
		let recorded = MethodInsnRecorder::encode_method(&instructions, &pool, &ctx).unwrap();
		assert_eq!(
			recorded.pack200_opcodes,
			vec![registry::by_name("wide").unwrap().pack200_opcode, registry::by_name("ireturn").unwrap().pack200_opcode]
		);

		let mut streams = recorded.streams;
		let mut decode_ctx = ContextTracker::new("Foo", "java/lang/Object");
		let code = CodeAssembler::decode_method(&recorded.pack200_opcodes, &mut streams, &pool, &mut decode_ctx).unwrap();
		assert_eq!(code, vec![Opcodes::WIDE, Opcodes::ILOAD, 0x01, 0x2C, Opcodes::IRETURN]);
	}

	#[test]
	fn wide_iinc_round_trips_through_encode_and_decode() {
		let pool = ClassConstantPool::new(vec![]);
		let ctx = ContextTracker::new("Foo", "java/lang/Object");
		let instructions = vec![(0usize, Instructions::IINC { index: 300, r#const: -5 }), (6usize, Instructions::RETURN)];
		let recorded = MethodInsnRecorder::encode_method(&instructions, &pool, &ctx).unwrap();
		assert_eq!(
			recorded.pack200_opcodes,
			vec![registry::by_name("wide").unwrap().pack200_opcode, registry::by_name("return").unwrap().pack200_opcode]
		);

		let mut streams = recorded.streams;
		let mut decode_ctx = ContextTracker::new("Foo", "java/lang/Object");
		let code = CodeAssembler::decode_method(&recorded.pack200_opcodes, &mut streams, &pool, &mut decode_ctx).unwrap();
		assert_eq!(code, vec![Opcodes::WIDE, Opcodes::IINC, 0x01, 0x2C, 0xFF, 0xFB, Opcodes::RETURN]);
	}

	fn this_class_pool_with_field_and_method() -> ClassConstantPool {
		use crate::class_pool::{CPNameAndTypeRef, CPUtf8Ref};
		use std::rc::Rc;
		let mut entries = Vec::new();
		entries.push(IRCpTag::Utf8(Rc::new("Foo".to_string()))); // 1
		entries.push(IRCpTag::Class(CPUtf8Ref::new(1, &entries[0]).unwrap())); // 2
		entries.push(IRCpTag::Utf8(Rc::new("x".to_string()))); // 3
		entries.push(IRCpTag::Utf8(Rc::new("I".to_string()))); // 4
		entries.push(IRCpTag::NameAndType {
			name: CPUtf8Ref::new(3, &entries[2]).unwrap(),
			descriptor: CPUtf8Ref::new(4, &entries[3]).unwrap(),
		}); // 5
		entries.push(IRCpTag::FieldRef {
			class_index: 2,
			name_and_ty: CPNameAndTypeRef {
				index: 5,
				name: CPUtf8Ref::new(3, &entries[2]).unwrap(),
				ty: CPUtf8Ref::new(4, &entries[3]).unwrap(),
			},
		}); // 6
		entries.push(IRCpTag::Utf8(Rc::new("go".to_string()))); // 7
		entries.push(IRCpTag::Utf8(Rc::new("()V".to_string()))); // 8
		entries.push(IRCpTag::NameAndType {
			name: CPUtf8Ref::new(7, &entries[6]).unwrap(),
			descriptor: CPUtf8Ref::new(8, &entries[7]).unwrap(),
		}); // 9
		entries.push(IRCpTag::MethodRef {
			class_index: 2,
			name_and_ty: CPNameAndTypeRef {
				index: 9,
				name: CPUtf8Ref::new(7, &entries[6]).unwrap(),
				ty: CPUtf8Ref::new(8, &entries[7]).unwrap(),
			},
		}); // 10
		ClassConstantPool::new(entries)
	}

	/// Regression test: `try_fuse` must resolve a fused method call's ordinal against the
	/// *method* ref subpool, not the field subpool the class ref happens to share a name
	/// with — passing the wrong `CpPoolId`/index pair silently failed the lookup and left
	/// `aload_0` + `invokevirtual` unfused instead of emitting `this_invokevirtual`.
	#[test]
	fn aload_0_invokevirtual_fuses_to_this_invokevirtual() {
		use crate::class_pool::CPMethodRef;
		let pool = this_class_pool_with_field_and_method();
		let ctx = ContextTracker::new("Foo", "java/lang/Object");
		let method = CPMethodRef::from_cp(pool.entries(), 10).unwrap();
		let instructions = vec![(0usize, Instructions::ALOAD(0)), (1usize, Instructions::INVOKEVIRTUAL(method))];
		let recorded = MethodInsnRecorder::encode_method(&instructions, &pool, &ctx).unwrap();
		assert_eq!(recorded.pack200_opcodes, vec![registry::by_name("this_invokevirtual").unwrap().pack200_opcode]);
		assert_eq!(recorded.streams.this_method_ref.remaining(), 1);
	}

	/// Regression test: `goto_w`'s delta is `i32`, wide enough to reach targets no 16-bit
	/// branch could. Truncating it to `i16` before resolving the label would wrap a target
	/// offset past 32767 into a negative delta and either dangle the label or point at the
	/// wrong instruction.
	#[test]
	fn goto_w_keeps_a_delta_beyond_i16_range() {
		let pool = ClassConstantPool::new(vec![]);
		let ctx = ContextTracker::new("Foo", "java/lang/Object");
		let target_offset = 40_000usize;
		let instructions = vec![(0usize, Instructions::GOTO_W(target_offset as i32)), (target_offset, Instructions::RETURN)];
		let recorded = MethodInsnRecorder::encode_method(&instructions, &pool, &ctx).unwrap();
		assert_eq!(
			recorded.pack200_opcodes,
			vec![registry::by_name("goto_w").unwrap().pack200_opcode, registry::by_name("return").unwrap().pack200_opcode]
		);
		assert_eq!(recorded.streams.label.clone().take_next("label").unwrap(), 1);
	}

	#[test]
	fn narrow_iinc_stays_narrow() {
		let pool = ClassConstantPool::new(vec![]);
		let ctx = ContextTracker::new("Foo", "java/lang/Object");
		let instructions = vec![(0usize, Instructions::IINC { index: 1, r#const: 2 })];
		let recorded = MethodInsnRecorder::encode_method(&instructions, &pool, &ctx).unwrap();
		assert_eq!(recorded.pack200_opcodes, vec![registry::by_name("iinc").unwrap().pack200_opcode]);
		assert_eq!(recorded.streams.local.clone().take_next("local").unwrap(), 1);
	}
}
