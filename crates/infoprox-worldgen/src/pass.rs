use crate::context::GenContext;

/// One stage of world generation.
///
/// Passes run once each, in registration order, against a shared context
/// holding the world, RNG, and layout decisions.
pub trait GenPass: std::fmt::Debug {
    /// Human-readable name for this pass.
    fn name(&self) -> &str;

    /// Run the pass.
    fn run(&mut self, ctx: &mut GenContext<'_>);
}
