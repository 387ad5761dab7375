use taskq_core::{ControllerView, TaskKind};

use super::constants::PROMPT_HINT;

/// Text shown at the start of an interactive session: the task selector and the hint line.
pub fn form_help(view: &ControllerView) -> String {
    let mut lines = vec!["Task kinds:".to_string()];
    for kind in TaskKind::ALL {
        let marker = if kind == view.task_kind { '*' } else { ' ' };
        lines.push(format!(
            " {marker} {:<9} {:<9} (e.g. {})",
            kind.wire_name(),
            kind.label(),
            kind.placeholder()
        ));
    }
    lines.push(PROMPT_HINT.to_string());
    lines.join("\n")
}

/// One-line selector state, shown when the task kind changes.
pub fn selection_line(view: &ControllerView) -> String {
    format!(
        "Selected {} (e.g. {})",
        view.task_kind.wire_name(),
        view.placeholder
    )
}

#[cfg(test)]
mod tests {
    use super::{form_help, selection_line};
    use taskq_core::{ControllerState, Msg, TaskKind};

    #[test]
    fn marks_selected_kind_and_lists_placeholders() {
        let (state, _) = taskq_core::update(
            ControllerState::new(),
            Msg::TaskKindSelected(TaskKind::FetchIp),
        );
        let help = form_help(&state.view());

        assert!(help.contains(" * fetch_ip"));
        assert!(help.contains("   scan_url"));
        assert!(help.contains("(e.g. https://example.com)"));
        assert!(help.contains("(e.g. example.com)"));
    }

    #[test]
    fn selection_line_shows_placeholder_of_new_kind() {
        let (state, _) = taskq_core::update(
            ControllerState::new(),
            Msg::TaskKindSelected(TaskKind::FetchIp),
        );
        assert_eq!(
            selection_line(&state.view()),
            "Selected fetch_ip (e.g. example.com)"
        );
    }
}
