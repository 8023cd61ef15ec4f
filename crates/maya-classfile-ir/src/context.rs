/// Tracks the class names the `*_this`, `*_super`, and `*_new_init` pseudo-opcodes
/// resolve against. One instance per method-decoding or -encoding session.
#[derive(Debug, Clone, Default)]
pub struct ContextTracker {
	current_class: Option<String>,
	super_class: Option<String>,
	new_class: Option<String>,
}

impl ContextTracker {
	pub fn new(current_class: impl Into<String>, super_class: impl Into<String>) -> Self {
		Self {
			current_class: Some(current_class.into()),
			super_class: Some(super_class.into()),
			new_class: None,
		}
	}

	pub fn current_class(&self) -> Option<&str> {
		self.current_class.as_deref()
	}

	pub fn super_class(&self) -> Option<&str> {
		self.super_class.as_deref()
	}

	pub fn new_class(&self) -> Option<&str> {
		self.new_class.as_deref()
	}

	/// Called when a `new`/`new_class_ref` form executes; subsequent `*_new_init` forms
	/// resolve their init ref against this class until it is overwritten.
	pub fn set_new_class(&mut self, class_name: impl Into<String>) {
		self.new_class = Some(class_name.into());
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn new_class_defaults_to_none_until_set() {
		let mut ctx = ContextTracker::new("com/example/Foo", "java/lang/Object");
		assert_eq!(ctx.new_class(), None);
		ctx.set_new_class("com/example/Bar");
		assert_eq!(ctx.new_class(), Some("com/example/Bar"));
		assert_eq!(ctx.current_class(), Some("com/example/Foo"));
	}
}
