// This module contains a few helpers that should not be considered as part of the public API,
// but are exposed for use by other boolpath crates.
// Changing them doesn't necessarily imply semver breaking bumps.

#[derive(Default, Copy, Clone, Debug, PartialEq)]
pub struct DebugValidator {
    #[cfg(debug_assertions)]
    in_subpath: bool,
}

impl DebugValidator {
    #[inline(always)]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn begin(&mut self) {
        #[cfg(debug_assertions)]
        {
            assert!(!self.in_subpath, "multiple begin() calls without end()");
            self.in_subpath = true;
        }
    }

    #[inline(always)]
    pub fn end(&mut self) {
        #[cfg(debug_assertions)]
        {
            assert!(self.in_subpath, "end() called without begin()");
            self.in_subpath = false;
        }
    }

    #[inline(always)]
    pub fn edge(&self) {
        #[cfg(debug_assertions)]
        assert!(self.in_subpath, "edge operation is made before begin()");
    }

    /// Appending whole sub-paths requires that none is in progress.
    #[inline(always)]
    pub fn extend(&self) {
        #[cfg(debug_assertions)]
        assert!(!self.in_subpath, "sub-paths appended while a sub-path is in progress");
    }

    #[inline(always)]
    pub fn build(self) {
        #[cfg(debug_assertions)]
        assert!(!self.in_subpath, "build() called before end()");
    }
}
