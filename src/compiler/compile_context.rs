use crate::database::{OwnerId, ResolutionCache};

/// Per-compilation state threaded through every resolution call.
#[derive(Clone, Copy)]
pub struct CompileContext<'a> {
    /// every alias and stored query is looked up on behalf of this owner
    pub owner: OwnerId,
    pub cache: &'a ResolutionCache,
}

impl<'a> CompileContext<'a> {
    pub fn new(owner: OwnerId, cache: &'a ResolutionCache) -> Self {
        Self { owner, cache }
    }
}
