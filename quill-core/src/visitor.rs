use crate::Result;

/// A substitution collector driven by [`Parser`][crate::Parser].
pub trait Visitor {
    /// Finished parser output.
    type Output;

    /// Collect a piece of literal text, escapes already resolved.
    ///
    /// A single literal run may arrive in several pieces.
    fn visit_static(&mut self, source: &str) -> Result<()>;

    /// Collect a raw substitution body, the content between `{{` and `}}`.
    ///
    /// `offset` is the byte offset of the body start in the template source.
    fn visit_expr(&mut self, source: &str, offset: usize) -> Result<()>;

    /// Visitor output.
    fn finish(self) -> Result<Self::Output>;
}

/// [`Visitor`] implementation that only collect literal text.
#[derive(Debug, Default)]
pub struct StaticVisitor {
    pub statics: String,
}

impl StaticVisitor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Visitor for StaticVisitor {
    type Output = Self;

    fn visit_static(&mut self, source: &str) -> Result<()> {
        self.statics.push_str(source);
        Ok(())
    }

    fn visit_expr(&mut self, _: &str, _: usize) -> Result<()> {
        Ok(())
    }

    fn finish(self) -> Result<Self::Output> {
        Ok(self)
    }
}
