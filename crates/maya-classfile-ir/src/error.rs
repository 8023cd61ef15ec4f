use thiserror::Error;

use crate::class_pool::CpPoolId;

#[derive(Debug, Error)]
pub enum IRClassfileError {
	#[error("operand stream '{0}' is exhausted")]
	StreamExhausted(&'static str),

	#[error("no {pool:?} constant pool entry at offset {offset}")]
	UnknownPoolEntry { pool: CpPoolId, offset: u32 },

	#[error("pack200 opcode {opcode} is unsupported (reserved or unassigned)")]
	UnsupportedOpcode { opcode: u16 },

	#[error("label target instruction {target} exceeds the {instruction_count} instructions emitted")]
	DanglingLabel { target: usize, instruction_count: usize },

	#[error("switch padding would be negative ({0})")]
	AlignmentError(i32),

	#[error("narrow constant pool reference resolved to index {0}, which does not fit in one byte")]
	NarrowIndexOverflow(u16),

	#[error("malformed attribute body: {0}")]
	AttributeBodyMalformed(String),

	#[error(transparent)]
	Mutf8(#[from] maya_mutf8::MUTFError),

	#[error(transparent)]
	Bytes(#[from] maya_bytes::BytesError),

	#[error(transparent)]
	Io(#[from] maya_classfile_io::IOClassfileError),
}
