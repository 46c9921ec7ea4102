//! Stale-fetch guard. Re-filtering or navigating while a list fetch is in
//! flight starts a newer fetch; when the older one resolves its response
//! must be discarded instead of overwriting fresher state.

/// Monotonic generation counter. `begin` marks a new fetch; a response is
/// applied only if its token is still current when it resolves.
#[derive(Debug, Default)]
pub struct FetchGuard {
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchToken(u64);

impl FetchGuard {
    pub fn new() -> FetchGuard {
        FetchGuard::default()
    }

    pub fn begin(&mut self) -> FetchToken {
        self.generation += 1;
        FetchToken(self.generation)
    }

    pub fn is_current(&self, token: FetchToken) -> bool {
        token.0 == self.generation
    }
}
