//! Policy for writing to a file destination that may already exist.

use crate::error::{Error, Result};
use std::path::Path;

/// What to do with a single file destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Destination is absent; write it.
    Create,
    /// Destination exists and `force` is set; replace it.
    Overwrite,
    /// Destination exists and add-mode keeps it untouched.
    Skip,
}

impl Resolution {
    pub fn writes(self) -> bool {
        !matches!(self, Resolution::Skip)
    }
}

/// Decides file write outcomes from the `force` and add-mode flags.
///
/// Directory creation never goes through the policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConflictPolicy {
    pub force: bool,
    pub add: bool,
}

impl ConflictPolicy {
    pub fn new(force: bool, add: bool) -> Self {
        Self { force, add }
    }

    /// Resolves the outcome for `dest` given whether it currently exists.
    ///
    /// # Errors
    /// * `Error::ConflictError` if it exists and neither flag is set
    pub fn decide(&self, dest: &Path, exists: bool) -> Result<Resolution> {
        match (exists, self.force, self.add) {
            (false, _, _) => Ok(Resolution::Create),
            (true, true, _) => Ok(Resolution::Overwrite),
            (true, false, true) => Ok(Resolution::Skip),
            (true, false, false) => Err(Error::ConflictError { path: dest.to_path_buf() }),
        }
    }

    /// Like [`ConflictPolicy::decide`], checking the filesystem for `dest`.
    pub fn resolve(&self, dest: &Path) -> Result<Resolution> {
        self.decide(dest, dest.exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_absent_destination_always_created() {
        let dest = PathBuf::from("out/README.md");
        for (force, add) in [(false, false), (false, true), (true, false), (true, true)] {
            let policy = ConflictPolicy::new(force, add);
            assert_eq!(policy.decide(&dest, false).unwrap(), Resolution::Create);
        }
    }

    #[test]
    fn test_existing_destination_matrix() {
        let dest = PathBuf::from("out/README.md");

        assert!(matches!(
            ConflictPolicy::new(false, false).decide(&dest, true),
            Err(Error::ConflictError { .. })
        ));
        assert_eq!(ConflictPolicy::new(false, true).decide(&dest, true).unwrap(), Resolution::Skip);
        assert_eq!(
            ConflictPolicy::new(true, false).decide(&dest, true).unwrap(),
            Resolution::Overwrite
        );
        assert_eq!(
            ConflictPolicy::new(true, true).decide(&dest, true).unwrap(),
            Resolution::Overwrite
        );
    }

    #[test]
    fn test_resolution_writes() {
        assert!(Resolution::Create.writes());
        assert!(Resolution::Overwrite.writes());
        assert!(!Resolution::Skip.writes());
    }
}
