//! Per-request cycle tracking.

use std::any::TypeId;

use crate::error::{DiError, DiResult};

struct Frame {
    id: TypeId,
    name: &'static str,
}

/// Stack of concrete types currently under construction for one
/// logical resolution request.
///
/// One context exists per outermost entry call and is threaded by
/// `&mut` through the recursion; it is never shared with other calls
/// and is dropped when the outermost call returns, success or failure.
pub(crate) struct ResolutionContext {
    stack: Vec<Frame>,
}

impl ResolutionContext {
    pub(crate) fn new() -> Self {
        Self { stack: Vec::new() }
    }

    /// Records a type about to be constructed. Fails with the ordered
    /// chain, outermost first, when the type is already on the stack.
    pub(crate) fn enter(&mut self, id: TypeId, name: &'static str) -> DiResult<()> {
        if self.stack.iter().any(|frame| frame.id == id) {
            let mut chain: Vec<&'static str> =
                self.stack.iter().map(|frame| frame.name).collect();
            chain.push(name);
            return Err(DiError::Circular(chain));
        }
        self.stack.push(Frame { id, name });
        Ok(())
    }

    pub(crate) fn exit(&mut self) {
        self.stack.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct A;
    struct B;

    #[test]
    fn repeated_entry_reports_full_chain() {
        let mut cx = ResolutionContext::new();
        cx.enter(TypeId::of::<A>(), "A").unwrap();
        cx.enter(TypeId::of::<B>(), "B").unwrap();

        match cx.enter(TypeId::of::<A>(), "A") {
            Err(DiError::Circular(chain)) => assert_eq!(chain, vec!["A", "B", "A"]),
            other => panic!("expected Circular, got {:?}", other),
        }
    }

    #[test]
    fn exit_unwinds_for_reuse() {
        let mut cx = ResolutionContext::new();
        cx.enter(TypeId::of::<A>(), "A").unwrap();
        cx.exit();
        cx.enter(TypeId::of::<A>(), "A").unwrap();
    }
}
