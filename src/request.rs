//! Immutable description of one rename batch.

use std::fmt;

use crate::errors::XmvError;
use crate::substitute::Substitution;

/// Default glob when no source expression is given.
pub const DEFAULT_SOURCE_GLOB: &str = "*";

/// How an existing destination is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Policy {
    /// Replace the existing destination without asking.
    Overwrite,
    /// Insert the smallest free sequence number before the extension.
    Suffix,
    /// Ask the notifier before replacing an existing destination.
    #[default]
    Confirm,
}

impl Policy {
    /// Pick the policy from the two mutually exclusive flags.
    pub fn from_flags(overwrite: bool, suffix: bool) -> Result<Self, XmvError> {
        match (overwrite, suffix) {
            (true, true) => Err(XmvError::ConflictingPolicies),
            (true, false) => Ok(Policy::Overwrite),
            (false, true) => Ok(Policy::Suffix),
            (false, false) => Ok(Policy::Confirm),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Policy::Overwrite => "overwrite",
            Policy::Suffix => "suffix",
            Policy::Confirm => "confirm",
        };
        f.write_str(s)
    }
}

/// One validated batch: source glob, compiled substitution and policy.
///
/// Construction compiles and checks everything up front, so a request that
/// exists is ready to run and nothing on disk has been touched yet.
#[derive(Debug, Clone)]
pub struct RenameRequest {
    source_glob: String,
    pattern: String,
    replacement: String,
    ignore_case: bool,
    policy: Policy,
    verbose: bool,
    substitution: Substitution,
}

impl RenameRequest {
    pub fn new(
        source_glob: impl Into<String>,
        pattern: impl Into<String>,
        replacement: impl Into<String>,
        ignore_case: bool,
        policy: Policy,
        verbose: bool,
    ) -> Result<Self, XmvError> {
        let source_glob = source_glob.into();
        let pattern = pattern.into();
        let replacement = replacement.into();

        glob::Pattern::new(&source_glob).map_err(|e| XmvError::InvalidGlob {
            glob: source_glob.clone(),
            reason: e.to_string(),
        })?;
        let substitution = Substitution::new(&pattern, &replacement, ignore_case)?;

        Ok(Self {
            source_glob,
            pattern,
            replacement,
            ignore_case,
            policy,
            verbose,
            substitution,
        })
    }

    /// Build from raw CLI flags; rejects `overwrite` together with `suffix`.
    pub fn from_flags(
        source_glob: impl Into<String>,
        pattern: impl Into<String>,
        replacement: impl Into<String>,
        ignore_case: bool,
        overwrite: bool,
        suffix: bool,
        verbose: bool,
    ) -> Result<Self, XmvError> {
        let policy = Policy::from_flags(overwrite, suffix)?;
        Self::new(source_glob, pattern, replacement, ignore_case, policy, verbose)
    }

    pub fn source_glob(&self) -> &str {
        &self.source_glob
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    pub fn ignore_case(&self) -> bool {
        self.ignore_case
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn substitution(&self) -> &Substitution {
        &self.substitution
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_flags() {
        assert_eq!(Policy::from_flags(false, false).unwrap(), Policy::Confirm);
        assert_eq!(Policy::from_flags(true, false).unwrap(), Policy::Overwrite);
        assert_eq!(Policy::from_flags(false, true).unwrap(), Policy::Suffix);
        assert!(matches!(
            Policy::from_flags(true, true),
            Err(XmvError::ConflictingPolicies)
        ));
    }

    #[test]
    fn rejects_bad_glob() {
        let err = RenameRequest::new("[", "a", "b", false, Policy::Confirm, false).unwrap_err();
        assert!(matches!(err, XmvError::InvalidGlob { .. }));
    }
}
