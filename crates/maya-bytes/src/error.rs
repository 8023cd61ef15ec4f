use thiserror::Error;

#[derive(Debug, Error)]
pub enum BytesError {
	#[error("unexpected end of input: wanted {wanted} more byte(s)")]
	UnexpectedEof { wanted: usize },
	#[error("patch offset {offset} + {width} bytes is out of bounds for a buffer of length {len}")]
	PatchOutOfBounds { offset: usize, width: usize, len: usize },
	#[error(transparent)]
	Io(#[from] std::io::Error),
}
