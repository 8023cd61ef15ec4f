//! Demonstration binary: parses a real `.class` file, re-expresses every method body's
//! `Code` attribute as Pack200 opcodes + operand bands via `encode_method`, then decodes
//! those bands straight back with `decode_method` and checks the result is byte-identical
//! to the bytecode the class file actually shipped.

use std::env;
use std::fs;
use std::io::Cursor;

use eyre::{eyre, Context, Result};
use log::{debug, info, warn};

use maya_classfile_io::ClassFile;
use maya_classfile_ir::attribute::{IRAttribute, IRAttributeInfo};
use maya_classfile_ir::class_pool::{ClassConstantPool, IRCpTag};
use maya_classfile_ir::context::ContextTracker;
use maya_classfile_ir::recorder::MethodInsnRecorder;
use maya_classfile_ir::CodeAssembler;

fn main() -> Result<()> {
	pretty_env_logger::init();

	let path = env::args().nth(1).ok_or_else(|| eyre!("usage: maya-test-bin <path-to-.class>"))?;
	let bytes = fs::read(&path).wrap_err_with(|| format!("reading {path}"))?;
	let mut cursor = Cursor::new(bytes);
	let class_file = ClassFile::read(&mut cursor).wrap_err("parsing class file")?;

	let entries = IRCpTag::from_io(class_file.constant_pool.clone()).wrap_err("resolving constant pool")?;
	let pool = ClassConstantPool::new(entries.clone());

	let this_class = class_name(&entries, class_file.this_class)?;
	let super_class = if class_file.super_class == 0 {
		"java/lang/Object".to_string()
	} else {
		class_name(&entries, class_file.super_class)?
	};

	info!("{this_class}: {} method(s), superclass {super_class}", class_file.methods.len());

	for method in &class_file.methods {
		let name = utf8_name(&class_file, method.name_index)?;

		let code_attr = method
			.attributes
			.iter()
			.find_map(|attr| match IRAttributeInfo::from_io(&entries, attr.clone()) {
				Ok(info) => match info.attr {
					IRAttribute::Code(code) => Some(Ok(code)),
					_ => None,
				},
				Err(err) => Some(Err(err)),
			})
			.transpose()
			.wrap_err_with(|| format!("reading attributes of method {name}"))?;

		let Some(code_attr) = code_attr else {
			debug!("{name}: no Code attribute, skipping");
			continue;
		};

		let instructions = code_attr
			.instructions(&entries)
			.wrap_err_with(|| format!("decoding raw bytecode of method {name}"))?;

		let encode_ctx = ContextTracker::new(this_class.clone(), super_class.clone());
		let recorded = MethodInsnRecorder::encode_method(&instructions, &pool, &encode_ctx)
			.wrap_err_with(|| format!("recording Pack200 bands for method {name}"))?;

		let mut decode_ctx = ContextTracker::new(this_class.clone(), super_class.clone());
		let mut streams = recorded.streams;
		let rebuilt = CodeAssembler::decode_method(&recorded.pack200_opcodes, &mut streams, &pool, &mut decode_ctx)
			.wrap_err_with(|| format!("re-assembling bytecode for method {name}"))?;

		if rebuilt == code_attr.code {
			info!(
				"{name}: round-trips byte-for-byte ({} instructions, {} bytes)",
				recorded.pack200_opcodes.len(),
				rebuilt.len()
			);
		} else {
			warn!(
				"{name}: round-trip mismatch (rebuilt {} bytes, original {} bytes)",
				rebuilt.len(),
				code_attr.code.len()
			);
		}
	}

	Ok(())
}

fn class_name(entries: &[IRCpTag], index: u16) -> Result<String> {
	match entries.get(index as usize - 1) {
		Some(IRCpTag::Class(name)) => Ok(name.data.as_str().to_string()),
		other => Err(eyre!("constant pool index {index} is not a Class entry (found {other:?})")),
	}
}

fn utf8_name(class_file: &ClassFile, index: u16) -> Result<String> {
	let bytes = class_file
		.raw_utf8(index)
		.ok_or_else(|| eyre!("constant pool index {index} is not a Utf8 entry"))?;
	maya_mutf8::decode(bytes).wrap_err_with(|| format!("decoding utf8 entry {index}"))
}
