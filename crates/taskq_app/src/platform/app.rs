use std::io::BufRead;
use std::sync::mpsc;
use std::thread;

use taskq_core::{update, ControllerState, ControllerView, JobRequest, Msg, Severity};
use taskq_engine::{EngineError, EngineSettings};
use taskq_logging::{taskq_debug, taskq_info};

use super::effects::EffectRunner;
use super::input::{parse_line, InputLine};
use super::ui;
use super::ui::render::Renderer;

/// Everything the session loop reacts to.
#[derive(Debug)]
pub enum Inbound {
    /// Controller message, typically translated from an engine event.
    Msg(Msg),
    /// A line typed in interactive mode.
    Line(InputLine),
    /// Interactive input reached end of file.
    InputClosed,
}

/// How the last cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Failed,
}

impl Outcome {
    fn from_view(view: &ControllerView) -> Self {
        match &view.message {
            Some(message) if message.severity == Severity::Success => Outcome::Completed,
            _ => Outcome::Failed,
        }
    }
}

/// Owns the controller state and runs the single-threaded message loop.
pub struct Session<R: Renderer> {
    state: ControllerState,
    runner: EffectRunner,
    renderer: R,
    inbox_tx: mpsc::Sender<Inbound>,
    inbox_rx: mpsc::Receiver<Inbound>,
}

impl<R: Renderer> Session<R> {
    pub fn new(settings: EngineSettings, renderer: R) -> Result<Self, EngineError> {
        let (inbox_tx, inbox_rx) = mpsc::channel();
        let runner = EffectRunner::new(settings, inbox_tx.clone())?;
        Ok(Self {
            state: ControllerState::new(),
            runner,
            renderer,
            inbox_tx,
            inbox_rx,
        })
    }

    pub fn view(&self) -> ControllerView {
        self.state.view()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Submits one request and blocks until its cycle is over.
    pub fn run_once(&mut self, request: JobRequest) -> Outcome {
        self.dispatch_msg(Msg::TaskKindSelected(request.kind));
        self.dispatch_msg(Msg::ParameterChanged(request.parameter));
        self.dispatch_msg(Msg::SubmitClicked);

        while !self.state.is_idle() {
            match self.inbox_rx.recv() {
                Ok(Inbound::Msg(msg)) => self.dispatch_msg(msg),
                Ok(Inbound::Line(_) | Inbound::InputClosed) => {}
                Err(_) => break,
            }
        }
        Outcome::from_view(&self.state.view())
    }

    /// Reads form input line by line until it closes and the active cycle ends.
    pub fn run_interactive<I>(&mut self, input: I)
    where
        I: BufRead + Send + 'static,
    {
        let help = ui::layout::form_help(&self.state.view());
        self.renderer.notice(&help);
        spawn_input_reader(input, self.inbox_tx.clone());

        let mut input_closed = false;
        loop {
            if input_closed && self.state.is_idle() {
                break;
            }
            match self.inbox_rx.recv() {
                Ok(Inbound::Msg(msg)) => self.dispatch_msg(msg),
                Ok(Inbound::Line(line)) => {
                    if self.handle_line(line) {
                        input_closed = true;
                    }
                }
                Ok(Inbound::InputClosed) => input_closed = true,
                Err(_) => break,
            }
        }
        taskq_info!("interactive session finished");
    }

    /// Returns true when the line asks to quit.
    fn handle_line(&mut self, line: InputLine) -> bool {
        if line.submits() && !self.state.is_idle() {
            let task = self
                .state
                .view()
                .active_task
                .unwrap_or_else(|| "submission".to_string());
            self.renderer
                .notice(&format!("Busy with {task}; input ignored until it finishes."));
            return false;
        }
        match line {
            InputLine::Form(msgs) => {
                for msg in msgs {
                    self.dispatch_msg(msg);
                }
                false
            }
            InputLine::Help => {
                let help = ui::layout::form_help(&self.state.view());
                self.renderer.notice(&help);
                false
            }
            InputLine::Invalid(reason) => {
                self.renderer.notice(&reason);
                false
            }
            InputLine::Blank => false,
            InputLine::Quit => true,
        }
    }

    fn dispatch_msg(&mut self, msg: Msg) {
        taskq_debug!("dispatch {:?}", msg);
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        let view = state.view();
        self.state = state;

        self.runner.enqueue(effects);
        if was_dirty {
            self.renderer.render(&view);
        }
    }
}

fn spawn_input_reader<I>(input: I, inbox: mpsc::Sender<Inbound>)
where
    I: BufRead + Send + 'static,
{
    thread::spawn(move || {
        for line in input.lines() {
            let Ok(line) = line else { break };
            if inbox.send(Inbound::Line(parse_line(&line))).is_err() {
                return;
            }
        }
        let _ = inbox.send(Inbound::InputClosed);
    });
}
