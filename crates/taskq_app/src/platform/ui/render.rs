use std::io::{self, Write};

use owo_colors::OwoColorize;
use taskq_core::{ControllerView, Severity, StatusMessage, TaskKind};

use super::constants::*;
use super::layout::selection_line;

/// Presents controller views to the user.
pub trait Renderer {
    fn render(&mut self, view: &ControllerView);

    /// Out-of-band text such as help or a dropped input line.
    fn notice(&mut self, text: &str);
}

pub struct TerminalRenderer<W: Write> {
    out: W,
    color: bool,
    last_kind: TaskKind,
    last_status: Option<(u64, bool)>,
}

impl TerminalRenderer<io::Stdout> {
    pub fn stdout(color: bool) -> Self {
        Self::new(io::stdout(), color)
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self {
            out,
            color,
            last_kind: TaskKind::default(),
            last_status: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, view: &ControllerView) {
        if view.task_kind != self.last_kind {
            self.last_kind = view.task_kind;
            self.notice(&selection_line(view));
        }

        // Field edits mark the view dirty too; only redraw the status region when it changed.
        let key = (view.message_seq, view.busy);
        if self.last_status == Some(key) {
            return;
        }
        self.last_status = Some(key);

        if let Some(text) = format_view(view, self.color) {
            let _ = writeln!(self.out, "{text}");
            let _ = self.out.flush();
        }
    }

    fn notice(&mut self, text: &str) {
        let _ = writeln!(self.out, "{text}");
        let _ = self.out.flush();
    }
}

pub fn format_view(view: &ControllerView, color: bool) -> Option<String> {
    let message = view.message.as_ref()?;
    Some(format_message(message, view.busy, color))
}

pub fn format_message(message: &StatusMessage, busy: bool, color: bool) -> String {
    let mut headline = format!("{} {}", icon(message.severity), message.headline);
    if busy {
        headline.push(' ');
        headline.push_str(BUSY_INDICATOR);
    }
    let headline = paint(message.severity, headline, color);

    match &message.detail {
        Some(detail) => {
            let body = detail
                .lines()
                .map(|line| format!("{DETAIL_INDENT}{line}"))
                .collect::<Vec<_>>()
                .join("\n");
            format!("{headline}\n{body}")
        }
        None => headline,
    }
}

fn icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => ICON_INFO,
        Severity::Warning => ICON_WARNING,
        Severity::Success => ICON_SUCCESS,
        Severity::Danger => ICON_DANGER,
    }
}

fn paint(severity: Severity, text: String, color: bool) -> String {
    if !color {
        return text;
    }
    match severity {
        Severity::Info => text.cyan().to_string(),
        Severity::Warning => text.yellow().to_string(),
        Severity::Success => text.green().to_string(),
        Severity::Danger => text.red().to_string(),
    }
}
