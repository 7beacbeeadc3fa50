//! Rewrites job names inside release-controller configuration files.

use std::borrow::Cow;

use regex::bytes::Regex;

use crate::domain::errors::DomainResult;
use crate::domain::models::{JobNameMapping, SubstitutionMode};

/// Compiled old-to-new job name replacement.
///
/// All names are matched in one left-to-right pass. At any position the
/// longest matching old name wins, and replaced text is never matched again.
#[derive(Debug)]
pub struct JobNameRewriter<'a> {
    mapping: &'a JobNameMapping,
    pattern: Option<Regex>,
    mode: SubstitutionMode,
}

const fn is_job_name_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.')
}

impl<'a> JobNameRewriter<'a> {
    /// Compile the alternation of every old name in `mapping`.
    pub fn new(mapping: &'a JobNameMapping, mode: SubstitutionMode) -> DomainResult<Self> {
        let mut names: Vec<&str> = mapping.keys().map(String::as_str).collect();
        names.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        let pattern = if names.is_empty() {
            None
        } else {
            let alternation = names
                .iter()
                .map(|name| regex::escape(name))
                .collect::<Vec<_>>()
                .join("|");
            Some(Regex::new(&alternation)?)
        };
        Ok(Self {
            mapping,
            pattern,
            mode,
        })
    }

    /// Returns the rewritten contents, borrowing the input when nothing matched.
    pub fn rewrite<'c>(&self, contents: &'c [u8]) -> Cow<'c, [u8]> {
        let Some(pattern) = &self.pattern else {
            return Cow::Borrowed(contents);
        };

        let mut output: Option<Vec<u8>> = None;
        let mut copied_to = 0;
        for found in pattern.find_iter(contents) {
            if self.mode == SubstitutionMode::TokenBoundary
                && !is_isolated(contents, found.start(), found.end())
            {
                continue;
            }
            let Some(new_name) = std::str::from_utf8(found.as_bytes())
                .ok()
                .and_then(|old| self.mapping.get(old))
            else {
                continue;
            };
            let buffer = output.get_or_insert_with(|| Vec::with_capacity(contents.len()));
            buffer.extend_from_slice(&contents[copied_to..found.start()]);
            buffer.extend_from_slice(new_name.as_bytes());
            copied_to = found.end();
        }

        match output {
            Some(mut buffer) => {
                buffer.extend_from_slice(&contents[copied_to..]);
                Cow::Owned(buffer)
            }
            None => Cow::Borrowed(contents),
        }
    }
}

fn is_isolated(contents: &[u8], start: usize, end: usize) -> bool {
    let before = start
        .checked_sub(1)
        .and_then(|index| contents.get(index))
        .copied();
    let after = contents.get(end).copied();
    !before.is_some_and(is_job_name_byte) && !after.is_some_and(is_job_name_byte)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(pairs: &[(&str, &str)]) -> JobNameMapping {
        pairs
            .iter()
            .map(|(old, new)| ((*old).to_string(), (*new).to_string()))
            .collect()
    }

    #[test]
    fn test_literal_replaces_every_occurrence() {
        let mapping = mapping(&[(
            "release-openshift-ocp-installer-e2e-aws-4.8",
            "periodic-ci-openshift-release-master-ocp-4.8-e2e-aws",
        )]);
        let rewriter = JobNameRewriter::new(&mapping, SubstitutionMode::Literal).unwrap();
        let input = br#"{"verify":{"aws":{"prowJob":{"name":"release-openshift-ocp-installer-e2e-aws-4.8"}}},"x":"release-openshift-ocp-installer-e2e-aws-4.8"}"#;
        let output = rewriter.rewrite(input);
        let text = String::from_utf8(output.into_owned()).unwrap();
        assert_eq!(
            text.matches("periodic-ci-openshift-release-master-ocp-4.8-e2e-aws").count(),
            2
        );
        assert!(!text.contains("release-openshift-ocp-installer"));
    }

    #[test]
    fn test_longest_name_wins() {
        let mapping = mapping(&[
            ("release-openshift-ocp-installer-e2e-aws-4.8", "short-new"),
            ("release-openshift-ocp-installer-e2e-aws-upgrade-4.8", "long-new"),
        ]);
        let rewriter = JobNameRewriter::new(&mapping, SubstitutionMode::Literal).unwrap();
        let output = rewriter.rewrite(
            b"release-openshift-ocp-installer-e2e-aws-upgrade-4.8 release-openshift-ocp-installer-e2e-aws-4.8",
        );
        assert_eq!(&*output, b"long-new short-new");
    }

    #[test]
    fn test_literal_matches_inside_longer_tokens() {
        let mapping = mapping(&[("release-openshift-ocp-installer-e2e-4.8", "new")]);
        let rewriter = JobNameRewriter::new(&mapping, SubstitutionMode::Literal).unwrap();
        let output = rewriter.rewrite(b"release-openshift-ocp-installer-e2e-4.8-disabled");
        assert_eq!(&*output, b"new-disabled");
    }

    #[test]
    fn test_token_boundary_skips_embedded_matches() {
        let mapping = mapping(&[("release-openshift-ocp-installer-e2e-4.8", "new")]);
        let rewriter = JobNameRewriter::new(&mapping, SubstitutionMode::TokenBoundary).unwrap();
        let output = rewriter.rewrite(
            b"\"release-openshift-ocp-installer-e2e-4.8\" release-openshift-ocp-installer-e2e-4.8-disabled",
        );
        assert_eq!(
            &*output,
            b"\"new\" release-openshift-ocp-installer-e2e-4.8-disabled"
        );
    }

    #[test]
    fn test_unchanged_contents_are_borrowed() {
        let mapping = mapping(&[("release-openshift-ocp-installer-e2e-4.8", "new")]);
        let rewriter = JobNameRewriter::new(&mapping, SubstitutionMode::Literal).unwrap();
        assert!(matches!(rewriter.rewrite(b"nothing here"), Cow::Borrowed(_)));

        let empty = JobNameMapping::new();
        let rewriter = JobNameRewriter::new(&empty, SubstitutionMode::Literal).unwrap();
        assert!(matches!(rewriter.rewrite(b"anything"), Cow::Borrowed(_)));
    }
}
