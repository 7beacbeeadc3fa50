//! `$(NAME)` placeholder substitution against a job's environment.

use std::collections::BTreeMap;

/// Replace every `$(NAME)` whose `NAME` is in `env` with its value.
///
/// Single left-to-right pass: substituted values are not scanned again, and
/// unknown or unterminated placeholders are copied unchanged.
pub fn substitute(input: &str, env: &BTreeMap<String, String>) -> String {
    let mut output = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("$(") {
        output.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];
        match after_open.find(')') {
            Some(end) => {
                let name = &after_open[..end];
                match env.get(name) {
                    Some(value) => output.push_str(value),
                    None => output.push_str(&rest[start..start + 2 + end + 1]),
                }
                rest = &after_open[end + 1..];
            }
            None => {
                output.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    output.push_str(rest);
    output
}

/// The value of the last `--target=` argument, with placeholders resolved.
pub fn target_from_args(args: &[String], env: &BTreeMap<String, String>) -> Option<String> {
    args.iter()
        .rev()
        .filter_map(|arg| arg.split_once('='))
        .find(|(flag, _)| *flag == "--target")
        .map(|(_, value)| substitute(value, env))
        .filter(|target| !target.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_substitutes_known_names() {
        let env = env(&[("TEST", "e2e-aws"), ("CLUSTER_TYPE", "aws")]);
        assert_eq!(substitute("$(TEST)-on-$(CLUSTER_TYPE)", &env), "e2e-aws-on-aws");
    }

    #[test]
    fn test_leaves_unknown_names() {
        let env = env(&[("TEST", "e2e")]);
        assert_eq!(substitute("$(TEST) $(MISSING)", &env), "e2e $(MISSING)");
    }

    #[test]
    fn test_unterminated_placeholder() {
        let env = env(&[("TEST", "e2e")]);
        assert_eq!(substitute("$(TEST) and $(TEST", &env), "e2e and $(TEST");
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let env = env(&[("A", "$(B)"), ("B", "b")]);
        assert_eq!(substitute("$(A)", &env), "$(B)");
    }

    #[test]
    fn test_plain_text_unchanged() {
        let env = env(&[("TEST", "e2e")]);
        assert_eq!(substitute("$ (TEST) $TEST ()", &env), "$ (TEST) $TEST ()");
    }

    #[test]
    fn test_target_from_args() {
        let env = env(&[("TEST", "e2e-aws")]);
        let args = vec![
            "--give-pr-author-access-to-namespace=true".to_string(),
            "--target=$(TEST)".to_string(),
            "--secret-dir=/usr/local/e2e-cluster-profile".to_string(),
        ];
        assert_eq!(target_from_args(&args, &env).as_deref(), Some("e2e-aws"));
    }

    #[test]
    fn test_last_target_wins() {
        let args = vec!["--target=first".to_string(), "--target=second".to_string()];
        assert_eq!(
            target_from_args(&args, &BTreeMap::new()).as_deref(),
            Some("second")
        );
    }

    #[test]
    fn test_no_target() {
        let args = vec!["--target".to_string(), "e2e".to_string(), "--targets=x".to_string()];
        assert_eq!(target_from_args(&args, &BTreeMap::new()), None);
        assert_eq!(
            target_from_args(&["--target=".to_string()], &BTreeMap::new()),
            None
        );
    }
}
