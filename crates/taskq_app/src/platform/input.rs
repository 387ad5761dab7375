use taskq_core::{Msg, TaskKind};

/// One parsed line of interactive input.
#[derive(Debug, Clone, PartialEq)]
pub enum InputLine {
    /// Form edits, optionally ending with a submit.
    Form(Vec<Msg>),
    Help,
    Quit,
    Blank,
    Invalid(String),
}

impl InputLine {
    pub fn submits(&self) -> bool {
        matches!(self, InputLine::Form(msgs) if msgs.contains(&Msg::SubmitClicked))
    }
}

pub fn parse_line(line: &str) -> InputLine {
    let line = line.trim();
    if line.is_empty() {
        return InputLine::Blank;
    }

    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    match head.to_ascii_lowercase().as_str() {
        "quit" | "exit" if rest.is_empty() => return InputLine::Quit,
        "help" | "?" if rest.is_empty() => return InputLine::Help,
        "kind" => {
            return match TaskKind::from_name(rest) {
                Some(kind) => InputLine::Form(vec![Msg::TaskKindSelected(kind)]),
                None => InputLine::Invalid(format!("Unknown task kind: {rest:?}")),
            };
        }
        _ => {}
    }

    match TaskKind::from_name(head) {
        Some(kind) if !rest.is_empty() => InputLine::Form(vec![
            Msg::TaskKindSelected(kind),
            Msg::ParameterChanged(rest.to_string()),
            Msg::SubmitClicked,
        ]),
        Some(kind) => InputLine::Form(vec![Msg::TaskKindSelected(kind)]),
        None => InputLine::Form(vec![
            Msg::ParameterChanged(line.to_string()),
            Msg::SubmitClicked,
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_line, InputLine};
    use pretty_assertions::assert_eq;
    use taskq_core::{Msg, TaskKind};

    #[test]
    fn kind_and_value_submit_in_one_line() {
        assert_eq!(
            parse_line("fetch_ip  example.com "),
            InputLine::Form(vec![
                Msg::TaskKindSelected(TaskKind::FetchIp),
                Msg::ParameterChanged("example.com".into()),
                Msg::SubmitClicked,
            ])
        );
        assert!(parse_line("scan-url https://example.com").submits());
    }

    #[test]
    fn bare_value_uses_selected_kind() {
        assert_eq!(
            parse_line("https://example.com/path?q=1"),
            InputLine::Form(vec![
                Msg::ParameterChanged("https://example.com/path?q=1".into()),
                Msg::SubmitClicked,
            ])
        );
    }

    #[test]
    fn kind_alone_only_switches_selector() {
        let line = parse_line("kind fetch_ip");
        assert_eq!(
            line,
            InputLine::Form(vec![Msg::TaskKindSelected(TaskKind::FetchIp)])
        );
        assert!(!line.submits());
        assert_eq!(
            parse_line("scan_url"),
            InputLine::Form(vec![Msg::TaskKindSelected(TaskKind::ScanUrl)])
        );
    }

    #[test]
    fn control_words() {
        assert_eq!(parse_line("  "), InputLine::Blank);
        assert_eq!(parse_line("QUIT"), InputLine::Quit);
        assert_eq!(parse_line("help"), InputLine::Help);
        assert!(matches!(parse_line("kind ping"), InputLine::Invalid(_)));
    }
}
