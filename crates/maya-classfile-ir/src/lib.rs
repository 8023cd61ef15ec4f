//! Pack200 bytecode-band codec: the translation layer between a Pack200 archive's
//! `bc_bands` (a flat stream of pseudo/real opcodes plus per-kind operand token bands) and
//! a real JVM `Code` attribute's `code` array (JVMS 4.7.3, 6).
//!
//! [`registry`] holds the bytecode form table (one [`form::Form`] per Pack200 opcode);
//! [`assembler::CodeAssembler::decode_method`] walks a method's opcode sequence against it
//! to produce real bytecode, while [`recorder::MethodInsnRecorder::encode_method`] walks
//! already-decoded bytecode ([`code::Instructions`], read off a [`attribute::CodeAttribute`])
//! back into Pack200 form. [`class_pool::ClassConstantPool`] sits between both directions,
//! translating real constant pool indices to and from the per-kind ordinals Pack200 bands
//! actually carry.

pub mod assembler;
pub mod attribute;
pub mod bytecode;
pub mod class_pool;
pub mod code;
pub mod context;
pub mod error;
pub mod form;
pub mod label;
pub mod operand_stream;
pub mod recorder;
pub mod registry;

pub use assembler::CodeAssembler;
pub use class_pool::ClassConstantPool;
pub use context::ContextTracker;
pub use error::IRClassfileError;
pub use operand_stream::{OperandStreams, TokenStream};
pub use recorder::{MethodInsnRecorder, RecordedMethod};
