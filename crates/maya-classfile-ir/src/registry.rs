use std::collections::HashMap;
use std::sync::OnceLock;

use crate::code::Opcodes;
use crate::error::IRClassfileError;
use crate::form::{Form, Variant};

/// Pseudo-opcodes with no real JVM equivalent: fused `aload_0` forms, per-literal-kind
/// `ldc` splits, and the widened siblings of the local-variable forms. Real opcodes keep
/// their JVMS numbering (0-201, 186 excluded); these start where that range ends.
#[allow(non_camel_case_types)]
struct Pseudo;

impl Pseudo {
	// 202-213 used to host per-local-kind widened forms; the real WIDE opcode (196) now
	// covers that ground directly via Variant::Wide, so that range is unassigned.
	const ILDC: u16 = 214;
	const CLDC: u16 = 215;
	const FLDC: u16 = 216;
	const SLDC: u16 = 217;
	const ILDC_W: u16 = 218;
	const CLDC_W: u16 = 219;
	const FLDC_W: u16 = 220;
	const SLDC_W: u16 = 221;
	const LLDC2_W: u16 = 222;
	const DLDC2_W: u16 = 223;
	const THIS_GETFIELD: u16 = 224;
	const THIS_PUTFIELD: u16 = 225;
	const SUPER_GETFIELD: u16 = 226;
	const SUPER_PUTFIELD: u16 = 227;
	const THIS_INVOKEVIRTUAL: u16 = 228;
	const THIS_INVOKESPECIAL: u16 = 229;
	const SUPER_INVOKEVIRTUAL: u16 = 230;
	const SUPER_INVOKESPECIAL: u16 = 231;
	const THIS_INIT: u16 = 232;
	const SUPER_INIT: u16 = 233;
	const NEW_INIT: u16 = 234;
	// 235-239 reserved, unassigned.
}

macro_rules! no_arg {
	($list:ident, $name:expr, $op:expr) => {
		$list.push(Form::new($name, $op as u16, $op, false, Variant::NoArgument))
	};
}

fn build_forms() -> Vec<Form> {
	let mut f = Vec::with_capacity(256);

	no_arg!(f, "nop", Opcodes::NOP);
	no_arg!(f, "aconst_null", Opcodes::ACONST_NULL);
	no_arg!(f, "iconst_m1", Opcodes::ICONST_M1);
	no_arg!(f, "iconst_0", Opcodes::ICONST_0);
	no_arg!(f, "iconst_1", Opcodes::ICONST_1);
	no_arg!(f, "iconst_2", Opcodes::ICONST_2);
	no_arg!(f, "iconst_3", Opcodes::ICONST_3);
	no_arg!(f, "iconst_4", Opcodes::ICONST_4);
	no_arg!(f, "iconst_5", Opcodes::ICONST_5);
	no_arg!(f, "lconst_0", Opcodes::LCONST_0);
	no_arg!(f, "lconst_1", Opcodes::LCONST_1);
	no_arg!(f, "fconst_0", Opcodes::FCONST_0);
	no_arg!(f, "fconst_1", Opcodes::FCONST_1);
	no_arg!(f, "fconst_2", Opcodes::FCONST_2);
	no_arg!(f, "dconst_0", Opcodes::DCONST_0);
	no_arg!(f, "dconst_1", Opcodes::DCONST_1);

	f.push(Form::new("bipush", Opcodes::BIPUSH as u16, Opcodes::BIPUSH, false, Variant::Byte));
	f.push(Form::new("sipush", Opcodes::SIPUSH as u16, Opcodes::SIPUSH, false, Variant::Short));

	// ldc/ldc_w/ldc2_w themselves are not emitted; their per-literal-kind pseudo-opcodes
	// (pushed further below) carry the real LDC/LDC_W/LDC2_W opcode byte instead.

	for (name, op) in [
		("iload", Opcodes::ILOAD),
		("lload", Opcodes::LLOAD),
		("fload", Opcodes::FLOAD),
		("dload", Opcodes::DLOAD),
		("aload", Opcodes::ALOAD),
	] {
		f.push(Form::new(name, op as u16, op, false, Variant::Local));
	}
	for (op, name) in [
		(0x1Au16, "iload_0"),
		(0x1B, "iload_1"),
		(0x1C, "iload_2"),
		(0x1D, "iload_3"),
		(0x1E, "lload_0"),
		(0x1F, "lload_1"),
		(0x20, "lload_2"),
		(0x21, "lload_3"),
		(0x22, "fload_0"),
		(0x23, "fload_1"),
		(0x24, "fload_2"),
		(0x25, "fload_3"),
		(0x26, "dload_0"),
		(0x27, "dload_1"),
		(0x28, "dload_2"),
		(0x29, "dload_3"),
		(0x2A, "aload_0"),
		(0x2B, "aload_1"),
		(0x2C, "aload_2"),
		(0x2D, "aload_3"),
	] {
		f.push(Form::new(name, op, op as u8, false, Variant::NoArgument));
	}

	for op in [
		Opcodes::IALOAD,
		Opcodes::LALOAD,
		Opcodes::FALOAD,
		Opcodes::DALOAD,
		Opcodes::AALOAD,
		Opcodes::BALOAD,
		Opcodes::CALOAD,
		Opcodes::SALOAD,
	] {
		no_arg!(f, opcode_name(op), op);
	}

	for (name, op) in [
		("istore", Opcodes::ISTORE),
		("lstore", Opcodes::LSTORE),
		("fstore", Opcodes::FSTORE),
		("dstore", Opcodes::DSTORE),
		("astore", Opcodes::ASTORE),
	] {
		f.push(Form::new(name, op as u16, op, false, Variant::Local));
	}
	for (op, name) in [
		(0x3Bu16, "istore_0"),
		(0x3C, "istore_1"),
		(0x3D, "istore_2"),
		(0x3E, "istore_3"),
		(0x3F, "lstore_0"),
		(0x40, "lstore_1"),
		(0x41, "lstore_2"),
		(0x42, "lstore_3"),
		(0x43, "fstore_0"),
		(0x44, "fstore_1"),
		(0x45, "fstore_2"),
		(0x46, "fstore_3"),
		(0x47, "dstore_0"),
		(0x48, "dstore_1"),
		(0x49, "dstore_2"),
		(0x4A, "dstore_3"),
		(0x4B, "astore_0"),
		(0x4C, "astore_1"),
		(0x4D, "astore_2"),
		(0x4E, "astore_3"),
	] {
		f.push(Form::new(name, op, op as u8, false, Variant::NoArgument));
	}

	for op in [
		Opcodes::IASTORE,
		Opcodes::LASTORE,
		Opcodes::FASTORE,
		Opcodes::DASTORE,
		Opcodes::AASTORE,
		Opcodes::BASTORE,
		Opcodes::CASTORE,
		Opcodes::SASTORE,
		Opcodes::POP,
		Opcodes::POP2,
		Opcodes::DUP,
		Opcodes::DUP_X1,
		Opcodes::DUP_X2,
		Opcodes::DUP2,
		Opcodes::DUP2_X1,
		Opcodes::DUP2_X2,
		Opcodes::SWAP,
		Opcodes::IADD,
		Opcodes::LADD,
		Opcodes::FADD,
		Opcodes::DADD,
		Opcodes::ISUB,
		Opcodes::LSUB,
		Opcodes::FSUB,
		Opcodes::DSUB,
		Opcodes::IMUL,
		Opcodes::LMUL,
		Opcodes::FMUL,
		Opcodes::DMUL,
		Opcodes::IDIV,
		Opcodes::LDIV,
		Opcodes::FDIV,
		Opcodes::DDIV,
		Opcodes::IREM,
		Opcodes::LREM,
		Opcodes::FREM,
		Opcodes::DREM,
		Opcodes::INEG,
		Opcodes::LNEG,
		Opcodes::FNEG,
		Opcodes::DNEG,
		Opcodes::ISHL,
		Opcodes::LSHL,
		Opcodes::ISHR,
		Opcodes::LSHR,
		Opcodes::IUSHR,
		Opcodes::LUSHR,
		Opcodes::IAND,
		Opcodes::LAND,
		Opcodes::IOR,
		Opcodes::LOR,
		Opcodes::IXOR,
		Opcodes::LXOR,
	] {
		no_arg!(f, opcode_name(op), op);
	}

	f.push(Form::new("iinc", Opcodes::IINC as u16, Opcodes::IINC, false, Variant::Iinc));

	for op in [
		Opcodes::I2L,
		Opcodes::I2F,
		Opcodes::I2D,
		Opcodes::L2I,
		Opcodes::L2F,
		Opcodes::L2D,
		Opcodes::F2I,
		Opcodes::F2L,
		Opcodes::F2D,
		Opcodes::D2I,
		Opcodes::D2L,
		Opcodes::D2F,
		Opcodes::I2B,
		Opcodes::I2C,
		Opcodes::I2S,
		Opcodes::LCMP,
		Opcodes::FCMPL,
		Opcodes::FCMPG,
		Opcodes::DCMPL,
		Opcodes::DCMPG,
	] {
		no_arg!(f, opcode_name(op), op);
	}

	for (name, op) in [
		("ifeq", Opcodes::IFEQ),
		("ifne", Opcodes::IFNE),
		("iflt", Opcodes::IFLT),
		("ifge", Opcodes::IFGE),
		("ifgt", Opcodes::IFGT),
		("ifle", Opcodes::IFLE),
		("if_icmpeq", Opcodes::IF_ICMPEQ),
		("if_icmpne", Opcodes::IF_ICMPNE),
		("if_icmplt", Opcodes::IF_ICMPLT),
		("if_icmpge", Opcodes::IF_ICMPGE),
		("if_icmpgt", Opcodes::IF_ICMPGT),
		("if_icmple", Opcodes::IF_ICMPLE),
		("if_acmpeq", Opcodes::IF_ACMPEQ),
		("if_acmpne", Opcodes::IF_ACMPNE),
		("goto", Opcodes::GOTO),
		("jsr", Opcodes::JSR),
	] {
		f.push(Form::new(name, op as u16, op, false, Variant::Label));
	}
	f.push(Form::new("ret", Opcodes::RET as u16, Opcodes::RET, false, Variant::Local));

	f.push(Form::new(
		"tableswitch",
		Opcodes::TABLESWITCH as u16,
		Opcodes::TABLESWITCH,
		false,
		Variant::TableSwitch,
	));
	f.push(Form::new(
		"lookupswitch",
		Opcodes::LOOKUPSWITCH as u16,
		Opcodes::LOOKUPSWITCH,
		false,
		Variant::LookupSwitch,
	));

	for op in [
		Opcodes::IRETURN,
		Opcodes::LRETURN,
		Opcodes::FRETURN,
		Opcodes::DRETURN,
		Opcodes::ARETURN,
		Opcodes::RETURN,
	] {
		no_arg!(f, opcode_name(op), op);
	}

	f.push(Form::new("getstatic", Opcodes::GETSTATIC as u16, Opcodes::GETSTATIC, false, Variant::FieldRef));
	f.push(Form::new("putstatic", Opcodes::PUTSTATIC as u16, Opcodes::PUTSTATIC, false, Variant::FieldRef));
	f.push(Form::new("getfield", Opcodes::GETFIELD as u16, Opcodes::GETFIELD, false, Variant::FieldRef));
	f.push(Form::new("putfield", Opcodes::PUTFIELD as u16, Opcodes::PUTFIELD, false, Variant::FieldRef));
	f.push(Form::new(
		"invokevirtual",
		Opcodes::INVOKEVIRTUAL as u16,
		Opcodes::INVOKEVIRTUAL,
		false,
		Variant::MethodRef,
	));
	f.push(Form::new(
		"invokespecial",
		Opcodes::INVOKESPECIAL as u16,
		Opcodes::INVOKESPECIAL,
		false,
		Variant::MethodRef,
	));
	f.push(Form::new(
		"invokestatic",
		Opcodes::INVOKESTATIC as u16,
		Opcodes::INVOKESTATIC,
		false,
		Variant::MethodRef,
	));
	f.push(Form::new(
		"invokeinterface",
		Opcodes::INVOKEINTERFACE as u16,
		Opcodes::INVOKEINTERFACE,
		false,
		Variant::IMethodRef,
	));
	// invokedynamic (186) is out of scope: no indy call sites are synthesized or decoded.

	f.push(Form::new("new", Opcodes::NEW as u16, Opcodes::NEW, false, Variant::NewClassRef));
	f.push(Form::new("newarray", Opcodes::NEWARRAY as u16, Opcodes::NEWARRAY, false, Variant::Byte));
	f.push(Form::new("anewarray", Opcodes::ANEWARRAY as u16, Opcodes::ANEWARRAY, false, Variant::ClassRef));
	no_arg!(f, "arraylength", Opcodes::ARRAYLENGTH);
	no_arg!(f, "athrow", Opcodes::ATHROW);
	f.push(Form::new("checkcast", Opcodes::CHECKCAST as u16, Opcodes::CHECKCAST, false, Variant::ClassRef));
	f.push(Form::new("instanceof", Opcodes::INSTANCEOF as u16, Opcodes::INSTANCEOF, false, Variant::ClassRef));
	no_arg!(f, "monitorenter", Opcodes::MONITORENTER);
	no_arg!(f, "monitorexit", Opcodes::MONITOREXIT);

	f.push(Form::new(
		"multianewarray",
		Opcodes::MULTIANEWARRAY as u16,
		Opcodes::MULTIANEWARRAY,
		false,
		Variant::MultiANewArray,
	));
	f.push(Form::new("ifnull", Opcodes::IFNULL as u16, Opcodes::IFNULL, false, Variant::Label));
	f.push(Form::new("ifnonnull", Opcodes::IFNONNULL as u16, Opcodes::IFNONNULL, false, Variant::Label));
	f.push(Form::new("goto_w", Opcodes::GOTO_W as u16, Opcodes::GOTO_W, true, Variant::Label));
	f.push(Form::new("jsr_w", Opcodes::JSR_W as u16, Opcodes::JSR_W, true, Variant::Label));

	// Widened locals and iinc share one real opcode, 196 (WIDE): the inner opcode rides
	// the `wide_opcode` band instead of being picked at registration time.
	f.push(Form::new("wide", Opcodes::WIDE as u16, Opcodes::WIDE, false, Variant::Wide));

	// Real opcodes 18-20 (`ldc`/`ldc_w`/`ldc2_w`) still decode directly: a Pack200 producer
	// that never split `ldc` by literal kind emits these as-is, string being the case that
	// matters most in practice. The `ildc`/`cldc`/`fldc`/... pseudo-opcodes above are an
	// additional, narrower-banded encoding of the same real bytes, not a replacement.
	f.push(Form::new("ldc", Opcodes::LDC as u16, Opcodes::LDC, false, Variant::StringRef));
	f.push(Form::new("ldc_w", Opcodes::LDC_W as u16, Opcodes::LDC_W, true, Variant::StringRef));
	f.push(Form::new("ldc2_w", Opcodes::LDC2_W as u16, Opcodes::LDC2_W, true, Variant::LongRef));

	f.push(Form::new("ildc", Pseudo::ILDC, Opcodes::LDC, false, Variant::IntRef));
	f.push(Form::new("cldc", Pseudo::CLDC, Opcodes::LDC, false, Variant::NarrowClassRef));
	f.push(Form::new("fldc", Pseudo::FLDC, Opcodes::LDC, false, Variant::FloatRef));
	f.push(Form::new("sldc", Pseudo::SLDC, Opcodes::LDC, false, Variant::StringRef));
	f.push(Form::new("ildc_w", Pseudo::ILDC_W, Opcodes::LDC_W, true, Variant::IntRef));
	f.push(Form::new("cldc_w", Pseudo::CLDC_W, Opcodes::LDC_W, true, Variant::NarrowClassRef));
	f.push(Form::new("fldc_w", Pseudo::FLDC_W, Opcodes::LDC_W, true, Variant::FloatRef));
	f.push(Form::new("sldc_w", Pseudo::SLDC_W, Opcodes::LDC_W, true, Variant::StringRef));
	f.push(Form::new("lldc2_w", Pseudo::LLDC2_W, Opcodes::LDC2_W, true, Variant::LongRef));
	f.push(Form::new("dldc2_w", Pseudo::DLDC2_W, Opcodes::LDC2_W, true, Variant::DoubleRef));

	f.push(Form::new("this_getfield", Pseudo::THIS_GETFIELD, Opcodes::GETFIELD, false, Variant::ThisFieldRef));
	f.push(Form::new("this_putfield", Pseudo::THIS_PUTFIELD, Opcodes::PUTFIELD, false, Variant::ThisFieldRef));
	f.push(Form::new("super_getfield", Pseudo::SUPER_GETFIELD, Opcodes::GETFIELD, false, Variant::SuperFieldRef));
	f.push(Form::new("super_putfield", Pseudo::SUPER_PUTFIELD, Opcodes::PUTFIELD, false, Variant::SuperFieldRef));
	f.push(Form::new(
		"this_invokevirtual",
		Pseudo::THIS_INVOKEVIRTUAL,
		Opcodes::INVOKEVIRTUAL,
		false,
		Variant::ThisMethodRef,
	));
	f.push(Form::new(
		"this_invokespecial",
		Pseudo::THIS_INVOKESPECIAL,
		Opcodes::INVOKESPECIAL,
		false,
		Variant::ThisMethodRef,
	));
	f.push(Form::new(
		"super_invokevirtual",
		Pseudo::SUPER_INVOKEVIRTUAL,
		Opcodes::INVOKEVIRTUAL,
		false,
		Variant::SuperMethodRef,
	));
	f.push(Form::new(
		"super_invokespecial",
		Pseudo::SUPER_INVOKESPECIAL,
		Opcodes::INVOKESPECIAL,
		false,
		Variant::SuperMethodRef,
	));

	f.push(Form::new(
		"this_init",
		Pseudo::THIS_INIT,
		Opcodes::INVOKESPECIAL,
		false,
		Variant::ThisInitMethodRef,
	));
	f.push(Form::new(
		"super_init",
		Pseudo::SUPER_INIT,
		Opcodes::INVOKESPECIAL,
		false,
		Variant::SuperInitMethodRef,
	));
	f.push(Form::new(
		"new_init",
		Pseudo::NEW_INIT,
		Opcodes::INVOKESPECIAL,
		false,
		Variant::NewInitMethodRef,
	));

	f
}

fn opcode_name(op: u8) -> &'static str {
	// Falls back to a numeric label for the handful of opcodes reached only through the
	// grouped-literal loops above, where a descriptive name isn't worth spelling out twice.
	match op {
		46 => "iaload",
		47 => "laload",
		48 => "faload",
		49 => "daload",
		50 => "aaload",
		51 => "baload",
		52 => "caload",
		53 => "saload",
		79 => "iastore",
		80 => "lastore",
		81 => "fastore",
		82 => "dastore",
		83 => "aastore",
		84 => "bastore",
		85 => "castore",
		86 => "sastore",
		87 => "pop",
		88 => "pop2",
		89 => "dup",
		90 => "dup_x1",
		91 => "dup_x2",
		92 => "dup2",
		93 => "dup2_x1",
		94 => "dup2_x2",
		95 => "swap",
		96 => "iadd",
		97 => "ladd",
		98 => "fadd",
		99 => "dadd",
		100 => "isub",
		101 => "lsub",
		102 => "fsub",
		103 => "dsub",
		104 => "imul",
		105 => "lmul",
		106 => "fmul",
		107 => "dmul",
		108 => "idiv",
		109 => "ldiv",
		110 => "fdiv",
		111 => "ddiv",
		112 => "irem",
		113 => "lrem",
		114 => "frem",
		115 => "drem",
		116 => "ineg",
		117 => "lneg",
		118 => "fneg",
		119 => "dneg",
		120 => "ishl",
		121 => "lshl",
		122 => "ishr",
		123 => "lshr",
		124 => "iushr",
		125 => "lushr",
		126 => "iand",
		127 => "land",
		128 => "ior",
		129 => "lor",
		130 => "ixor",
		131 => "lxor",
		133 => "i2l",
		134 => "i2f",
		135 => "i2d",
		136 => "l2i",
		137 => "l2f",
		138 => "l2d",
		139 => "f2i",
		140 => "f2l",
		141 => "f2d",
		142 => "d2i",
		143 => "d2l",
		144 => "d2f",
		145 => "i2b",
		146 => "i2c",
		147 => "i2s",
		148 => "lcmp",
		149 => "fcmpl",
		150 => "fcmpg",
		151 => "dcmpl",
		152 => "dcmpg",
		172 => "ireturn",
		173 => "lreturn",
		174 => "freturn",
		175 => "dreturn",
		176 => "areturn",
		177 => "return",
		190 => "arraylength",
		191 => "athrow",
		194 => "monitorenter",
		195 => "monitorexit",
		_ => "opcode",
	}
}

struct Registry {
	by_opcode: HashMap<u16, Form>,
	by_name: HashMap<&'static str, u16>,
}

static REGISTRY: OnceLock<Registry> = OnceLock::new();

fn registry() -> &'static Registry {
	REGISTRY.get_or_init(|| {
		let mut by_opcode = HashMap::new();
		let mut by_name = HashMap::new();
		for form in build_forms() {
			by_name.insert(form.name, form.pack200_opcode);
			by_opcode.insert(form.pack200_opcode, form);
		}
		Registry { by_opcode, by_name }
	})
}

/// Looks up a form by its Pack200 opcode (0-255). Opcodes never assigned a form (186,
/// 202-213, 235-255) return `UnsupportedOpcode`.
pub fn get(opcode: u16) -> Result<&'static Form, IRClassfileError> {
	registry().by_opcode.get(&opcode).ok_or(IRClassfileError::UnsupportedOpcode { opcode })
}

pub fn by_name(name: &str) -> Result<&'static Form, IRClassfileError> {
	let opcode = *registry()
		.by_name
		.get(name)
		.ok_or(IRClassfileError::AttributeBodyMalformed(format!("no form named {name}")))?;
	get(opcode)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn every_registered_opcode_round_trips_by_name() {
		for form in registry().by_opcode.values() {
			assert_eq!(by_name(form.name).unwrap().pack200_opcode, form.pack200_opcode);
		}
	}

	#[test]
	fn reserved_opcodes_are_unsupported() {
		assert!(matches!(get(186), Err(IRClassfileError::UnsupportedOpcode { opcode: 186 })));
		assert!(matches!(get(202), Err(IRClassfileError::UnsupportedOpcode { opcode: 202 })));
	}

	#[test]
	fn narrow_ldc_of_a_string_is_registered() {
		let form = get(18).unwrap();
		assert_eq!(form.name, "ldc");
		assert_eq!(form.real_opcode, Opcodes::LDC);
	}

	#[test]
	fn wide_is_registered_at_the_real_opcode() {
		let form = get(Opcodes::WIDE as u16).unwrap();
		assert_eq!(form.name, "wide");
		assert_eq!(form.real_opcode, Opcodes::WIDE);
	}

	#[test]
	fn iadd_maps_to_its_own_real_opcode() {
		let form = get(Opcodes::IADD as u16).unwrap();
		assert_eq!(form.real_opcode, Opcodes::IADD);
		assert_eq!(form.name, "iadd");
	}
}
