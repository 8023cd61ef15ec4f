use thiserror::Error;

#[derive(Debug, Error)]
pub enum IOClassfileError {
	#[error(transparent)]
	Bytes(#[from] maya_bytes::BytesError),
	#[error("unrecognized constant pool tag {0} at raw index {1}")]
	UnknownCpTag(u8, usize),
	#[error("expected class file magic 0xCAFEBABE, got 0x{0:08X}")]
	BadMagic(u32),
}
