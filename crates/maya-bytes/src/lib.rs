mod error;
mod reader;
mod writer;

pub use error::BytesError;
pub use reader::BytesReadExt;
pub use writer::{patch_bytes, patch_i16_be, patch_i32_be, patch_u16_be, patch_u32_be, BytesWriteExt};
