use std::io::Read;

use crate::error::BytesError;

macro_rules! impl_be_reads {
	($($ty:ty),+ $(,)?) => {
		$(
			paste::paste! {
				fn [<read_ $ty>](&mut self) -> Result<$ty, BytesError> {
					let mut buf = [0u8; std::mem::size_of::<$ty>()];
					self.read_exact(&mut buf).map_err(|_| BytesError::UnexpectedEof {
						wanted: std::mem::size_of::<$ty>(),
					})?;
					Ok(<$ty>::from_be_bytes(buf))
				}
			}
		)+
	};
}

/// Big-endian primitive reads over anything that implements [`Read`], matching the
/// byte order the JVM class-file format (and Pack200) uses everywhere.
pub trait BytesReadExt: Read {
	impl_be_reads!(u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);

	fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>, BytesError> {
		let mut buf = vec![0u8; len];
		self.read_exact(&mut buf)
			.map_err(|_| BytesError::UnexpectedEof { wanted: len })?;
		Ok(buf)
	}
}

impl<R: Read + ?Sized> BytesReadExt for R {}

#[cfg(test)]
mod tests {
	use std::io::Cursor;

	use super::*;

	#[test]
	fn reads_big_endian() {
		let mut cursor = Cursor::new(vec![0x01, 0x02, 0x03, 0x04]);
		assert_eq!(cursor.read_u8().unwrap(), 0x01);
		assert_eq!(cursor.read_u16().unwrap(), 0x0203);
		let mut cursor = Cursor::new(vec![0x00, 0x00, 0x01, 0x2c]);
		assert_eq!(cursor.read_u32().unwrap(), 300);
	}

	#[test]
	fn reads_signed_16_as_offset() {
		let mut cursor = Cursor::new(vec![0xff, 0xfb]);
		assert_eq!(cursor.read_i16().unwrap(), -5);
	}

	#[test]
	fn eof_is_reported() {
		let mut cursor = Cursor::new(vec![0x00]);
		assert!(matches!(cursor.read_u16(), Err(BytesError::UnexpectedEof { wanted: 2 })));
	}
}
