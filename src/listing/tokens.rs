/// Leading token count for Unix long-format lines.
pub const UNIX_LEAD: usize = 8;
/// Leading token count for Windows short-format lines.
pub const WINDOWS_LEAD: usize = 3;

/// Splits a raw listing line on runs of whitespace.
///
/// At most `lead` leading tokens are produced; whatever follows them is kept
/// verbatim as one final token, so names with embedded spaces are not
/// fragmented. An empty or all-whitespace line yields an empty vector, which
/// callers treat as "not an entry line".
pub fn tokenize(line: &str, lead: usize) -> Vec<&str> {
    let mut tokens = Vec::with_capacity(lead + 1);
    let mut rest = line.trim();

    while tokens.len() < lead && !rest.is_empty() {
        match rest.find(char::is_whitespace) {
            Some(at) => {
                tokens.push(&rest[..at]);
                rest = rest[at..].trim_start();
            }
            None => {
                tokens.push(rest);
                rest = "";
            }
        }
    }

    if !rest.is_empty() {
        tokens.push(rest);
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_line_yields_no_tokens() {
        assert!(tokenize("", UNIX_LEAD).is_empty());
        assert!(tokenize("   \t ", UNIX_LEAD).is_empty());
    }

    #[test]
    fn splits_on_whitespace_runs() {
        let tokens = tokenize("drwxr-xr-x   2 user  group", UNIX_LEAD);
        assert_eq!(tokens, vec!["drwxr-xr-x", "2", "user", "group"]);
    }

    #[test]
    fn remainder_kept_verbatim_past_the_cutoff() {
        let line = "-rw-r--r-- 1 user group 12 Sep 15 15:18 a  double  spaced.txt";
        let tokens = tokenize(line, UNIX_LEAD);
        assert_eq!(tokens.len(), 9);
        assert_eq!(tokens[8], "a  double  spaced.txt");
    }

    #[test]
    fn windows_cutoff_leaves_name_whole() {
        let tokens = tokenize("09-15-20  02:00PM  <DIR>  my vendor dir", WINDOWS_LEAD);
        assert_eq!(tokens, vec!["09-15-20", "02:00PM", "<DIR>", "my vendor dir"]);
    }

    #[test]
    fn line_with_exactly_lead_tokens_has_no_remainder() {
        let tokens = tokenize("drwxr-xr-x 2 user group 4096 Sep 15 15:18", UNIX_LEAD);
        assert_eq!(tokens.len(), 8);
    }
}
