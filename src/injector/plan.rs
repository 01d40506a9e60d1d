//! Construction plans: constructor selection, cached per concrete type.

use std::sync::Arc;

use crate::catalog::ShapeData;
use crate::error::{DiError, DiResult};

/// The selected constructor for one concrete type, paired with its
/// shape. Computed at most once per type and shared across threads; a
/// plan with no constructor is still cached and reported at
/// construction time.
pub(crate) struct ConstructionPlan {
    pub(crate) shape: Arc<ShapeData>,
    pub(crate) ctor: Option<usize>,
}

/// Selection rule: the marked constructor wins, else the first
/// zero-parameter plain constructor, else none. Two marked
/// constructors are a configuration error rather than first-wins.
pub(crate) fn select(shape: Arc<ShapeData>) -> DiResult<ConstructionPlan> {
    let mut marked = None;
    let mut zero_param = None;

    for (index, ctor) in shape.constructors.iter().enumerate() {
        if ctor.marked {
            if marked.is_some() {
                return Err(DiError::AmbiguousConstructor(shape.type_name));
            }
            marked = Some(index);
        } else if ctor.params.is_empty() && zero_param.is_none() {
            zero_param = Some(index);
        }
    }

    Ok(ConstructionPlan {
        ctor: marked.or(zero_param),
        shape,
    })
}
