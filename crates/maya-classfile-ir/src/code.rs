use maya_bytes::BytesReadExt;

use crate::class_pool::{
	cp_entry, CPClassRef, CPFieldRef, CPInterfaceMethodRef, CPInvokeDynamicRef, CPMethodRef, IRCpTag,
};
use crate::error::IRClassfileError;

#[allow(non_camel_case_types)]
// https://docs.oracle.com/javase/specs/jvms/se9/html/jvms-6.html
pub struct Opcodes {}

impl Opcodes {
	pub const NOP: u8 = 0;
	pub const ACONST_NULL: u8 = 1;
	pub const ICONST_M1: u8 = 2;
	pub const ICONST_0: u8 = 3;
	pub const ICONST_1: u8 = 4;
	pub const ICONST_2: u8 = 5;
	pub const ICONST_3: u8 = 6;
	pub const ICONST_4: u8 = 7;
	pub const ICONST_5: u8 = 8;
	pub const LCONST_0: u8 = 9;
	pub const LCONST_1: u8 = 10;
	pub const FCONST_0: u8 = 11;
	pub const FCONST_1: u8 = 12;
	pub const FCONST_2: u8 = 13;
	pub const DCONST_0: u8 = 14;
	pub const DCONST_1: u8 = 15;
	pub const BIPUSH: u8 = 16;
	pub const SIPUSH: u8 = 17;
	pub const LDC: u8 = 18;
	pub const LDC_W: u8 = 19;
	pub const LDC2_W: u8 = 20;
	pub const ILOAD: u8 = 21;
	pub const LLOAD: u8 = 22;
	pub const FLOAD: u8 = 23;
	pub const DLOAD: u8 = 24;
	pub const ALOAD: u8 = 25;
	/// `aload_0`, the fixed-local-0 form `ThisFieldRef`/`ThisMethodRef`/`SuperFieldRef`/
	/// `SuperMethodRef` forms prepend ahead of their real opcode.
	pub const ALOAD_0: u8 = 0x2A;
	pub const IALOAD: u8 = 46;
	pub const LALOAD: u8 = 47;
	pub const FALOAD: u8 = 48;
	pub const DALOAD: u8 = 49;
	pub const AALOAD: u8 = 50;
	pub const BALOAD: u8 = 51;
	pub const CALOAD: u8 = 52;
	pub const SALOAD: u8 = 53;
	pub const ISTORE: u8 = 54;
	pub const LSTORE: u8 = 55;
	pub const FSTORE: u8 = 56;
	pub const DSTORE: u8 = 57;
	pub const ASTORE: u8 = 58;
	pub const IASTORE: u8 = 79;
	pub const LASTORE: u8 = 80;
	pub const FASTORE: u8 = 81;
	pub const DASTORE: u8 = 82;
	pub const AASTORE: u8 = 83;
	pub const BASTORE: u8 = 84;
	pub const CASTORE: u8 = 85;
	pub const SASTORE: u8 = 86;
	pub const POP: u8 = 87;
	pub const POP2: u8 = 88;
	pub const DUP: u8 = 89;
	pub const DUP_X1: u8 = 90;
	pub const DUP_X2: u8 = 91;
	pub const DUP2: u8 = 92;
	pub const DUP2_X1: u8 = 93;
	pub const DUP2_X2: u8 = 94;
	pub const SWAP: u8 = 95;
	pub const IADD: u8 = 96;
	pub const LADD: u8 = 97;
	pub const FADD: u8 = 98;
	pub const DADD: u8 = 99;
	pub const ISUB: u8 = 100;
	pub const LSUB: u8 = 101;
	pub const FSUB: u8 = 102;
	pub const DSUB: u8 = 103;
	pub const IMUL: u8 = 104;
	pub const LMUL: u8 = 105;
	pub const FMUL: u8 = 106;
	pub const DMUL: u8 = 107;
	pub const IDIV: u8 = 108;
	pub const LDIV: u8 = 109;
	pub const FDIV: u8 = 110;
	pub const DDIV: u8 = 111;
	pub const IREM: u8 = 112;
	pub const LREM: u8 = 113;
	pub const FREM: u8 = 114;
	pub const DREM: u8 = 115;
	pub const INEG: u8 = 116;
	pub const LNEG: u8 = 117;
	pub const FNEG: u8 = 118;
	pub const DNEG: u8 = 119;
	pub const ISHL: u8 = 120;
	pub const LSHL: u8 = 121;
	pub const ISHR: u8 = 122;
	pub const LSHR: u8 = 123;
	pub const IUSHR: u8 = 124;
	pub const LUSHR: u8 = 125;
	pub const IAND: u8 = 126;
	pub const LAND: u8 = 127;
	pub const IOR: u8 = 128;
	pub const LOR: u8 = 129;
	pub const IXOR: u8 = 130;
	pub const LXOR: u8 = 131;
	pub const IINC: u8 = 132;
	pub const I2L: u8 = 133;
	pub const I2F: u8 = 134;
	pub const I2D: u8 = 135;
	pub const L2I: u8 = 136;
	pub const L2F: u8 = 137;
	pub const L2D: u8 = 138;
	pub const F2I: u8 = 139;
	pub const F2L: u8 = 140;
	pub const F2D: u8 = 141;
	pub const D2I: u8 = 142;
	pub const D2L: u8 = 143;
	pub const D2F: u8 = 144;
	pub const I2B: u8 = 145;
	pub const I2C: u8 = 146;
	pub const I2S: u8 = 147;
	pub const LCMP: u8 = 148;
	pub const FCMPL: u8 = 149;
	pub const FCMPG: u8 = 150;
	pub const DCMPL: u8 = 151;
	pub const DCMPG: u8 = 152;
	pub const IFEQ: u8 = 153;
	pub const IFNE: u8 = 154;
	pub const IFLT: u8 = 155;
	pub const IFGE: u8 = 156;
	pub const IFGT: u8 = 157;
	pub const IFLE: u8 = 158;
	pub const IF_ICMPEQ: u8 = 159;
	pub const IF_ICMPNE: u8 = 160;
	pub const IF_ICMPLT: u8 = 161;
	pub const IF_ICMPGE: u8 = 162;
	pub const IF_ICMPGT: u8 = 163;
	pub const IF_ICMPLE: u8 = 164;
	pub const IF_ACMPEQ: u8 = 165;
	pub const IF_ACMPNE: u8 = 166;
	pub const GOTO: u8 = 167;
	pub const JSR: u8 = 168;
	pub const RET: u8 = 169;
	pub const TABLESWITCH: u8 = 170;
	pub const LOOKUPSWITCH: u8 = 171;
	pub const IRETURN: u8 = 172;
	pub const LRETURN: u8 = 173;
	pub const FRETURN: u8 = 174;
	pub const DRETURN: u8 = 175;
	pub const ARETURN: u8 = 176;
	pub const RETURN: u8 = 177;
	pub const GETSTATIC: u8 = 178;
	pub const PUTSTATIC: u8 = 179;
	pub const GETFIELD: u8 = 180;
	pub const PUTFIELD: u8 = 181;
	pub const INVOKEVIRTUAL: u8 = 182;
	pub const INVOKESPECIAL: u8 = 183;
	pub const INVOKESTATIC: u8 = 184;
	pub const INVOKEINTERFACE: u8 = 185;
	// Reserved/unusable prior to Pack200's target JVM versions; carries invokedynamic in
	// modern class files (JVMS 6.5.invokedynamic). The Pack200 form registry treats this
	// opcode slot itself as reserved (see registry.rs), independent of this fact.
	pub const INVOKEDYNAMIC: u8 = 186;
	pub const NEW: u8 = 187;
	pub const NEWARRAY: u8 = 188;
	pub const ANEWARRAY: u8 = 189;
	pub const ARRAYLENGTH: u8 = 190;
	pub const ATHROW: u8 = 191;
	pub const CHECKCAST: u8 = 192;
	pub const INSTANCEOF: u8 = 193;
	pub const MONITORENTER: u8 = 194;
	pub const MONITOREXIT: u8 = 195;
	pub const WIDE: u8 = 196;
	pub const MULTIANEWARRAY: u8 = 197;
	pub const IFNULL: u8 = 198;
	pub const IFNONNULL: u8 = 199;
	pub const GOTO_W: u8 = 200;
	pub const JSR_W: u8 = 201;
}

#[derive(Debug, Clone)]
#[repr(u8)]
#[allow(non_camel_case_types)]
/// A real JVM instruction decoded from already-linked `Code` bytes, together with the
/// constant pool data it references. This is the view `recorder.rs` reads a method body
/// through before re-expressing it as Pack200 pseudo-opcode sequences; it is not itself
/// part of the Pack200 wire format.
pub enum Instructions {
	NOP = 0,
	ACONST_NULL = 1,
	ICONST_M1 = 2,
	ICONST_0 = 3,
	ICONST_1 = 4,
	ICONST_2 = 5,
	ICONST_3 = 6,
	ICONST_4 = 7,
	ICONST_5 = 8,
	LCONST_0 = 9,
	LCONST_1 = 10,
	FCONST_0 = 11,
	FCONST_1 = 12,
	FCONST_2 = 13,
	DCONST_0 = 14,
	DCONST_1 = 15,
	BIPUSH(i8) = 16,
	SIPUSH(i16) = 17,
	LDC(IRCpTag) = 18,
	ILOAD(u16) = 21,
	LLOAD(u16) = 22,
	FLOAD(u16) = 23,
	DLOAD(u16) = 24,
	ALOAD(u16) = 25,
	IALOAD = 46,
	LALOAD = 47,
	FALOAD = 48,
	DALOAD = 49,
	AALOAD = 50,
	BALOAD = 51,
	CALOAD = 52,
	SALOAD = 53,
	ISTORE(u16) = 54,
	LSTORE(u16) = 55,
	FSTORE(u16) = 56,
	DSTORE(u16) = 57,
	ASTORE(u16) = 58,
	IASTORE = 79,
	LASTORE = 80,
	FASTORE = 81,
	DASTORE = 82,
	AASTORE = 83,
	BASTORE = 84,
	CASTORE = 85,
	SASTORE = 86,
	POP = 87,
	POP2 = 88,
	DUP = 89,
	DUP_X1 = 90,
	DUP_X2 = 91,
	DUP2 = 92,
	DUP2_X1 = 93,
	DUP2_X2 = 94,
	SWAP = 95,
	IADD = 96,
	LADD = 97,
	FADD = 98,
	DADD = 99,
	ISUB = 100,
	LSUB = 101,
	FSUB = 102,
	DSUB = 103,
	IMUL = 104,
	LMUL = 105,
	FMUL = 106,
	DMUL = 107,
	IDIV = 108,
	LDIV = 109,
	FDIV = 110,
	DDIV = 111,
	IREM = 112,
	LREM = 113,
	FREM = 114,
	DREM = 115,
	INEG = 116,
	LNEG = 117,
	FNEG = 118,
	DNEG = 119,
	ISHL = 120,
	LSHL = 121,
	ISHR = 122,
	LSHR = 123,
	IUSHR = 124,
	LUSHR = 125,
	IAND = 126,
	LAND = 127,
	IOR = 128,
	LOR = 129,
	IXOR = 130,
	LXOR = 131,
	IINC { index: u16, r#const: i16 } = 132,
	I2L = 133,
	I2F = 134,
	I2D = 135,
	L2I = 136,
	L2F = 137,
	L2D = 138,
	F2I = 139,
	F2L = 140,
	F2D = 141,
	D2I = 142,
	D2L = 143,
	D2F = 144,
	I2B = 145,
	I2C = 146,
	I2S = 147,
	LCMP = 148,
	FCMPL = 149,
	FCMPG = 150,
	DCMPL = 151,
	DCMPG = 152,
	IFEQ(i16) = 153,
	IFNE(i16) = 154,
	IFLT(i16) = 155,
	IFGE(i16) = 156,
	IFGT(i16) = 157,
	IFLE(i16) = 158,
	IF_ICMPEQ(i16) = 159,
	IF_ICMPNE(i16) = 160,
	IF_ICMPLT(i16) = 161,
	IF_ICMPGE(i16) = 162,
	IF_ICMPGT(i16) = 163,
	IF_ICMPLE(i16) = 164,
	IF_ACMPEQ(i16) = 165,
	IF_ACMPNE(i16) = 166,
	GOTO(i16) = 167,
	JSR(i16) = 168,
	RET(u16) = 169,
	TABLESWITCH {
		default: i32,
		low: i32,
		high: i32,
		offsets: Vec<i32>,
	} = 170,
	LOOKUPSWITCH {
		default: i32,
		pairs: Vec<(i32, i32)>,
	} = 171,
	IRETURN = 172,
	LRETURN = 173,
	FRETURN = 174,
	DRETURN = 175,
	ARETURN = 176,
	RETURN = 177,
	GETSTATIC(CPFieldRef) = 178,
	PUTSTATIC(CPFieldRef) = 179,
	GETFIELD(CPFieldRef) = 180,
	PUTFIELD(CPFieldRef) = 181,
	INVOKEVIRTUAL(CPMethodRef) = 182,
	INVOKESPECIAL(CPMethodRef) = 183,
	INVOKESTATIC(CPMethodRef) = 184,
	INVOKEINTERFACE { method: CPInterfaceMethodRef, count: u8 } = 185,
	INVOKEDYNAMIC(CPInvokeDynamicRef) = 186,
	NEW(CPClassRef) = 187,
	NEWARRAY(u8) = 188,
	ANEWARRAY(CPClassRef) = 189,
	ARRAYLENGTH = 190,
	ATHROW = 191,
	CHECKCAST(CPClassRef) = 192,
	INSTANCEOF(CPClassRef) = 193,
	MONITORENTER = 194,
	MONITOREXIT = 195,
	MULTIANEWARRAY { class: CPClassRef, dimensions: u8 } = 197,
	IFNULL(i16) = 198,
	IFNONNULL(i16) = 199,
	GOTO_W(i32) = 200,
	JSR_W(i32) = 201,
}

impl Instructions {
	/// Decodes one instruction starting at `offset` (the byte position of its opcode
	/// within the enclosing `Code` array), needed only to compute `tableswitch`/
	/// `lookupswitch` padding.
	pub fn read<B: BytesReadExt>(cp: &[IRCpTag], buffer: &mut B, offset: usize) -> Result<Instructions, IRClassfileError> {
		let opcode = buffer.read_u8()?;
		Ok(match opcode {
			Opcodes::NOP => Instructions::NOP,
			Opcodes::ACONST_NULL => Instructions::ACONST_NULL,
			Opcodes::ICONST_M1 => Instructions::ICONST_M1,
			Opcodes::ICONST_0 => Instructions::ICONST_0,
			Opcodes::ICONST_1 => Instructions::ICONST_1,
			Opcodes::ICONST_2 => Instructions::ICONST_2,
			Opcodes::ICONST_3 => Instructions::ICONST_3,
			Opcodes::ICONST_4 => Instructions::ICONST_4,
			Opcodes::ICONST_5 => Instructions::ICONST_5,
			Opcodes::LCONST_0 => Instructions::LCONST_0,
			Opcodes::LCONST_1 => Instructions::LCONST_1,
			Opcodes::FCONST_0 => Instructions::FCONST_0,
			Opcodes::FCONST_1 => Instructions::FCONST_1,
			Opcodes::FCONST_2 => Instructions::FCONST_2,
			Opcodes::DCONST_0 => Instructions::DCONST_0,
			Opcodes::DCONST_1 => Instructions::DCONST_1,
			Opcodes::BIPUSH => Instructions::BIPUSH(buffer.read_i8()?),
			Opcodes::SIPUSH => Instructions::SIPUSH(buffer.read_i16()?),
			Opcodes::LDC => Instructions::LDC(cp_entry(cp, buffer.read_u8()? as u16)?),
			Opcodes::LDC_W | Opcodes::LDC2_W => Instructions::LDC(cp_entry(cp, buffer.read_u16()?)?),

			Opcodes::ILOAD => Instructions::ILOAD(buffer.read_u8()? as u16),
			0x1A => Instructions::ILOAD(0), // iload_0
			0x1B => Instructions::ILOAD(1), // iload_1
			0x1C => Instructions::ILOAD(2), // iload_2
			0x1D => Instructions::ILOAD(3), // iload_3

			Opcodes::LLOAD => Instructions::LLOAD(buffer.read_u8()? as u16),
			0x1E => Instructions::LLOAD(0), // lload_0
			0x1F => Instructions::LLOAD(1), // lload_1
			0x20 => Instructions::LLOAD(2), // lload_2
			0x21 => Instructions::LLOAD(3), // lload_3

			Opcodes::FLOAD => Instructions::FLOAD(buffer.read_u8()? as u16),
			0x22 => Instructions::FLOAD(0), // fload_0
			0x23 => Instructions::FLOAD(1), // fload_1
			0x24 => Instructions::FLOAD(2), // fload_2
			0x25 => Instructions::FLOAD(3), // fload_3

			Opcodes::DLOAD => Instructions::DLOAD(buffer.read_u8()? as u16),
			0x26 => Instructions::DLOAD(0), // dload_0
			0x27 => Instructions::DLOAD(1), // dload_1
			0x28 => Instructions::DLOAD(2), // dload_2
			0x29 => Instructions::DLOAD(3), // dload_3

			Opcodes::ALOAD => Instructions::ALOAD(buffer.read_u8()? as u16),
			0x2A => Instructions::ALOAD(0), // aload_0
			0x2B => Instructions::ALOAD(1), // aload_1
			0x2C => Instructions::ALOAD(2), // aload_2
			0x2D => Instructions::ALOAD(3), // aload_3

			Opcodes::IALOAD => Instructions::IALOAD,
			Opcodes::LALOAD => Instructions::LALOAD,
			Opcodes::FALOAD => Instructions::FALOAD,
			Opcodes::DALOAD => Instructions::DALOAD,
			Opcodes::AALOAD => Instructions::AALOAD,
			Opcodes::BALOAD => Instructions::BALOAD,
			Opcodes::CALOAD => Instructions::CALOAD,
			Opcodes::SALOAD => Instructions::SALOAD,

			Opcodes::ISTORE => Instructions::ISTORE(buffer.read_u8()? as u16),
			0x3B => Instructions::ISTORE(0), // istore_0
			0x3C => Instructions::ISTORE(1), // istore_1
			0x3D => Instructions::ISTORE(2), // istore_2
			0x3E => Instructions::ISTORE(3), // istore_3

			Opcodes::LSTORE => Instructions::LSTORE(buffer.read_u8()? as u16),
			0x3F => Instructions::LSTORE(0), // lstore_0
			0x40 => Instructions::LSTORE(1), // lstore_1
			0x41 => Instructions::LSTORE(2), // lstore_2
			0x42 => Instructions::LSTORE(3), // lstore_3

			Opcodes::FSTORE => Instructions::FSTORE(buffer.read_u8()? as u16),
			0x43 => Instructions::FSTORE(0), // fstore_0
			0x44 => Instructions::FSTORE(1), // fstore_1
			0x45 => Instructions::FSTORE(2), // fstore_2
			0x46 => Instructions::FSTORE(3), // fstore_3

			Opcodes::DSTORE => Instructions::DSTORE(buffer.read_u8()? as u16),
			0x47 => Instructions::DSTORE(0), // dstore_0
			0x48 => Instructions::DSTORE(1), // dstore_1
			0x49 => Instructions::DSTORE(2), // dstore_2
			0x4A => Instructions::DSTORE(3), // dstore_3

			Opcodes::ASTORE => Instructions::ASTORE(buffer.read_u8()? as u16),
			0x4B => Instructions::ASTORE(0), // astore_0
			0x4C => Instructions::ASTORE(1), // astore_1
			0x4D => Instructions::ASTORE(2), // astore_2
			0x4E => Instructions::ASTORE(3), // astore_3

			Opcodes::IASTORE => Instructions::IASTORE,
			Opcodes::LASTORE => Instructions::LASTORE,
			Opcodes::FASTORE => Instructions::FASTORE,
			Opcodes::DASTORE => Instructions::DASTORE,
			Opcodes::AASTORE => Instructions::AASTORE,
			Opcodes::BASTORE => Instructions::BASTORE,
			Opcodes::CASTORE => Instructions::CASTORE,
			Opcodes::SASTORE => Instructions::SASTORE,

			Opcodes::POP => Instructions::POP,
			Opcodes::POP2 => Instructions::POP2,
			Opcodes::DUP => Instructions::DUP,
			Opcodes::DUP_X1 => Instructions::DUP_X1,
			Opcodes::DUP_X2 => Instructions::DUP_X2,
			Opcodes::DUP2 => Instructions::DUP2,
			Opcodes::DUP2_X1 => Instructions::DUP2_X1,
			Opcodes::DUP2_X2 => Instructions::DUP2_X2,
			Opcodes::SWAP => Instructions::SWAP,

			Opcodes::IADD => Instructions::IADD,
			Opcodes::LADD => Instructions::LADD,
			Opcodes::FADD => Instructions::FADD,
			Opcodes::DADD => Instructions::DADD,
			Opcodes::ISUB => Instructions::ISUB,
			Opcodes::LSUB => Instructions::LSUB,
			Opcodes::FSUB => Instructions::FSUB,
			Opcodes::DSUB => Instructions::DSUB,
			Opcodes::IMUL => Instructions::IMUL,
			Opcodes::LMUL => Instructions::LMUL,
			Opcodes::FMUL => Instructions::FMUL,
			Opcodes::DMUL => Instructions::DMUL,
			Opcodes::IDIV => Instructions::IDIV,
			Opcodes::LDIV => Instructions::LDIV,
			Opcodes::FDIV => Instructions::FDIV,
			Opcodes::DDIV => Instructions::DDIV,
			Opcodes::IREM => Instructions::IREM,
			Opcodes::LREM => Instructions::LREM,
			Opcodes::FREM => Instructions::FREM,
			Opcodes::DREM => Instructions::DREM,
			Opcodes::INEG => Instructions::INEG,
			Opcodes::LNEG => Instructions::LNEG,
			Opcodes::FNEG => Instructions::FNEG,
			Opcodes::DNEG => Instructions::DNEG,
			Opcodes::ISHL => Instructions::ISHL,
			Opcodes::LSHL => Instructions::LSHL,
			Opcodes::ISHR => Instructions::ISHR,
			Opcodes::LSHR => Instructions::LSHR,
			Opcodes::IUSHR => Instructions::IUSHR,
			Opcodes::LUSHR => Instructions::LUSHR,
			Opcodes::IAND => Instructions::IAND,
			Opcodes::LAND => Instructions::LAND,
			Opcodes::IOR => Instructions::IOR,
			Opcodes::LOR => Instructions::LOR,
			Opcodes::IXOR => Instructions::IXOR,
			Opcodes::LXOR => Instructions::LXOR,

			Opcodes::IINC => Instructions::IINC {
				index: buffer.read_u8()? as u16,
				r#const: buffer.read_i8()? as i16,
			},

			Opcodes::I2L => Instructions::I2L,
			Opcodes::I2F => Instructions::I2F,
			Opcodes::I2D => Instructions::I2D,
			Opcodes::L2I => Instructions::L2I,
			Opcodes::L2F => Instructions::L2F,
			Opcodes::L2D => Instructions::L2D,
			Opcodes::F2I => Instructions::F2I,
			Opcodes::F2L => Instructions::F2L,
			Opcodes::F2D => Instructions::F2D,
			Opcodes::D2I => Instructions::D2I,
			Opcodes::D2L => Instructions::D2L,
			Opcodes::D2F => Instructions::D2F,
			Opcodes::I2B => Instructions::I2B,
			Opcodes::I2C => Instructions::I2C,
			Opcodes::I2S => Instructions::I2S,

			Opcodes::LCMP => Instructions::LCMP,
			Opcodes::FCMPL => Instructions::FCMPL,
			Opcodes::FCMPG => Instructions::FCMPG,
			Opcodes::DCMPL => Instructions::DCMPL,
			Opcodes::DCMPG => Instructions::DCMPG,

			Opcodes::IFEQ => Instructions::IFEQ(buffer.read_i16()?),
			Opcodes::IFNE => Instructions::IFNE(buffer.read_i16()?),
			Opcodes::IFLT => Instructions::IFLT(buffer.read_i16()?),
			Opcodes::IFGE => Instructions::IFGE(buffer.read_i16()?),
			Opcodes::IFGT => Instructions::IFGT(buffer.read_i16()?),
			Opcodes::IFLE => Instructions::IFLE(buffer.read_i16()?),
			Opcodes::IF_ICMPEQ => Instructions::IF_ICMPEQ(buffer.read_i16()?),
			Opcodes::IF_ICMPNE => Instructions::IF_ICMPNE(buffer.read_i16()?),
			Opcodes::IF_ICMPLT => Instructions::IF_ICMPLT(buffer.read_i16()?),
			Opcodes::IF_ICMPGE => Instructions::IF_ICMPGE(buffer.read_i16()?),
			Opcodes::IF_ICMPGT => Instructions::IF_ICMPGT(buffer.read_i16()?),
			Opcodes::IF_ICMPLE => Instructions::IF_ICMPLE(buffer.read_i16()?),
			Opcodes::IF_ACMPEQ => Instructions::IF_ACMPEQ(buffer.read_i16()?),
			Opcodes::IF_ACMPNE => Instructions::IF_ACMPNE(buffer.read_i16()?),
			Opcodes::GOTO => Instructions::GOTO(buffer.read_i16()?),
			Opcodes::JSR => Instructions::JSR(buffer.read_i16()?),
			Opcodes::RET => Instructions::RET(buffer.read_u8()? as u16),

			Opcodes::TABLESWITCH => {
				let padding = (3 - (offset % 4)) % 4;
				for _ in 0..padding {
					buffer.read_u8()?;
				}
				let default = buffer.read_i32()?;
				let low = buffer.read_i32()?;
				let high = buffer.read_i32()?;
				let count = (high - low + 1).max(0) as usize;
				let mut offsets = Vec::with_capacity(count);
				for _ in 0..count {
					offsets.push(buffer.read_i32()?);
				}
				Instructions::TABLESWITCH { default, low, high, offsets }
			}
			Opcodes::LOOKUPSWITCH => {
				let padding = (3 - (offset % 4)) % 4;
				for _ in 0..padding {
					buffer.read_u8()?;
				}
				let default = buffer.read_i32()?;
				let npairs = buffer.read_i32()?;
				let mut pairs = Vec::with_capacity(npairs.max(0) as usize);
				for _ in 0..npairs {
					pairs.push((buffer.read_i32()?, buffer.read_i32()?));
				}
				Instructions::LOOKUPSWITCH { default, pairs }
			}

			Opcodes::IRETURN => Instructions::IRETURN,
			Opcodes::LRETURN => Instructions::LRETURN,
			Opcodes::FRETURN => Instructions::FRETURN,
			Opcodes::DRETURN => Instructions::DRETURN,
			Opcodes::ARETURN => Instructions::ARETURN,
			Opcodes::RETURN => Instructions::RETURN,

			Opcodes::GETSTATIC => Instructions::GETSTATIC(CPFieldRef::from_cp(cp, buffer.read_u16()?)?),
			Opcodes::PUTSTATIC => Instructions::PUTSTATIC(CPFieldRef::from_cp(cp, buffer.read_u16()?)?),
			Opcodes::GETFIELD => Instructions::GETFIELD(CPFieldRef::from_cp(cp, buffer.read_u16()?)?),
			Opcodes::PUTFIELD => Instructions::PUTFIELD(CPFieldRef::from_cp(cp, buffer.read_u16()?)?),
			Opcodes::INVOKEVIRTUAL => Instructions::INVOKEVIRTUAL(CPMethodRef::from_cp(cp, buffer.read_u16()?)?),
			Opcodes::INVOKESPECIAL => Instructions::INVOKESPECIAL(CPMethodRef::from_cp(cp, buffer.read_u16()?)?),
			Opcodes::INVOKESTATIC => Instructions::INVOKESTATIC(CPMethodRef::from_cp(cp, buffer.read_u16()?)?),
			Opcodes::INVOKEINTERFACE => {
				let method = CPInterfaceMethodRef::from_cp(cp, buffer.read_u16()?)?;
				let count = buffer.read_u8()?;
				buffer.read_u8()?; // reserved, must be 0
				Instructions::INVOKEINTERFACE { method, count }
			}
			Opcodes::INVOKEDYNAMIC => {
				let invoke_dynamic = CPInvokeDynamicRef::from_cp(cp, buffer.read_u16()?)?;
				buffer.read_u16()?; // reserved, must be 0
				Instructions::INVOKEDYNAMIC(invoke_dynamic)
			}

			Opcodes::NEW => Instructions::NEW(CPClassRef::from_cp(cp, buffer.read_u16()?)?),
			Opcodes::NEWARRAY => Instructions::NEWARRAY(buffer.read_u8()?),
			Opcodes::ANEWARRAY => Instructions::ANEWARRAY(CPClassRef::from_cp(cp, buffer.read_u16()?)?),
			Opcodes::ARRAYLENGTH => Instructions::ARRAYLENGTH,
			Opcodes::ATHROW => Instructions::ATHROW,
			Opcodes::CHECKCAST => Instructions::CHECKCAST(CPClassRef::from_cp(cp, buffer.read_u16()?)?),
			Opcodes::INSTANCEOF => Instructions::INSTANCEOF(CPClassRef::from_cp(cp, buffer.read_u16()?)?),
			Opcodes::MONITORENTER => Instructions::MONITORENTER,
			Opcodes::MONITOREXIT => Instructions::MONITOREXIT,

			Opcodes::WIDE => {
				let inner = buffer.read_u8()?;
				match inner {
					Opcodes::ILOAD => Instructions::ILOAD(buffer.read_u16()?),
					Opcodes::LLOAD => Instructions::LLOAD(buffer.read_u16()?),
					Opcodes::FLOAD => Instructions::FLOAD(buffer.read_u16()?),
					Opcodes::DLOAD => Instructions::DLOAD(buffer.read_u16()?),
					Opcodes::ALOAD => Instructions::ALOAD(buffer.read_u16()?),
					Opcodes::ISTORE => Instructions::ISTORE(buffer.read_u16()?),
					Opcodes::LSTORE => Instructions::LSTORE(buffer.read_u16()?),
					Opcodes::FSTORE => Instructions::FSTORE(buffer.read_u16()?),
					Opcodes::DSTORE => Instructions::DSTORE(buffer.read_u16()?),
					Opcodes::ASTORE => Instructions::ASTORE(buffer.read_u16()?),
					Opcodes::RET => Instructions::RET(buffer.read_u16()?),
					Opcodes::IINC => Instructions::IINC {
						index: buffer.read_u16()?,
						r#const: buffer.read_i16()?,
					},
					other => return Err(IRClassfileError::UnsupportedOpcode { opcode: other as u16 }),
				}
			}

			Opcodes::MULTIANEWARRAY => Instructions::MULTIANEWARRAY {
				class: CPClassRef::from_cp(cp, buffer.read_u16()?)?,
				dimensions: buffer.read_u8()?,
			},
			Opcodes::IFNULL => Instructions::IFNULL(buffer.read_i16()?),
			Opcodes::IFNONNULL => Instructions::IFNONNULL(buffer.read_i16()?),
			Opcodes::GOTO_W => Instructions::GOTO_W(buffer.read_i32()?),
			Opcodes::JSR_W => Instructions::JSR_W(buffer.read_i32()?),

			other => return Err(IRClassfileError::UnsupportedOpcode { opcode: other as u16 }),
		})
	}
}
