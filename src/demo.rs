//! Script runner behind `toaster-demo`.
//!
//! A script is one command per line; `#` starts a comment.
//!
//! ```text
//! show <type> [position=<pos>] [dismissable=<bool>] [time=<ms>] <message…>
//! json <envelope>          publish a raw `toaster`/`toaster-dismiss` signal
//! cancel <ref>             publish `toaster-dismiss` through the issuer handle
//! close <ref>              press the dismiss control
//! confirm <ref>            press the confirm control
//! decline <ref>            press the decline control
//! end <ref>                report that the toast's animation finished
//! wait <ms>                advance the clock, firing due timers in order
//! render                   print the current frame
//! ```
//!
//! `<ref>` is the number printed when a toast was shown (`1`, `2`, …) or a raw
//! toast id.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;
use std::time::Duration;
use thiserror::Error;
use toaster::app::{CancelToast, ManualClock, ToastIssuer, ToastRequest, ToasterSurface};
use toaster::ui::{render, Theme, ToasterView};
use toaster::{Clock, Config, Position, SignalBus, ToastId, ToastKind, ToasterError};

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("line {line}: {message}")]
    Script { line: usize, message: String },

    #[error(transparent)]
    Toaster(#[from] ToasterError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// One parsed script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show(ToastRequest),
    Json(String),
    Cancel(String),
    Close(String),
    Confirm(String),
    Decline(String),
    End(String),
    Wait(Duration),
    Render,
}

impl Command {
    /// Parses a line; blank lines and comments yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let reference = || {
            if rest.is_empty() {
                Err(format!("`{verb}` needs a toast reference"))
            } else {
                Ok(rest.to_string())
            }
        };

        let command = match verb {
            "show" => Self::Show(parse_show(rest)?),
            "json" => Self::Json(rest.to_string()),
            "cancel" => Self::Cancel(reference()?),
            "close" => Self::Close(reference()?),
            "confirm" => Self::Confirm(reference()?),
            "decline" => Self::Decline(reference()?),
            "end" => Self::End(reference()?),
            "wait" => Self::Wait(Duration::from_millis(
                rest.parse().map_err(|_| format!("`wait` needs milliseconds, got `{rest}`"))?,
            )),
            "render" => Self::Render,
            other => return Err(format!("unknown command `{other}`")),
        };
        Ok(Some(command))
    }
}

fn parse_show(rest: &str) -> Result<ToastRequest, String> {
    let mut words = rest.split_whitespace();
    let kind: ToastKind = words
        .next()
        .ok_or_else(|| "`show` needs a toast type".to_string())?
        .parse()?;

    let mut request = ToastRequest::new(kind, "");
    let mut message = Vec::new();

    for word in words {
        match word.split_once('=') {
            Some(("position", value)) if message.is_empty() => {
                request = request.position(value.parse::<Position>()?);
            }
            Some(("dismissable", value)) if message.is_empty() => {
                let dismissable = value
                    .parse()
                    .map_err(|_| format!("dismissable must be true or false, got `{value}`"))?;
                request = request.dismissable(dismissable);
            }
            Some(("time", value)) if message.is_empty() => {
                let ms = value
                    .parse()
                    .map_err(|_| format!("time must be milliseconds, got `{value}`"))?;
                request = request.display_time(Duration::from_millis(ms));
            }
            _ => message.push(word),
        }
    }

    request.message = message.join(" ");
    Ok(request)
}

/// An issuer and a surface sharing a bus and a manual clock.
pub struct Demo {
    bus: SignalBus,
    clock: Rc<ManualClock>,
    surface: ToasterSurface,
    issuer: ToastIssuer,
    handles: Vec<CancelToast>,
    log: Rc<RefCell<Vec<String>>>,
    theme: Theme,
    rows: usize,
    cols: usize,
    plain: bool,
}

impl Demo {
    pub fn new(config: &Config, rows: usize, cols: usize, plain: bool) -> Result<Self, DemoError> {
        let bus = SignalBus::new();
        let clock = Rc::new(ManualClock::new());
        let surface = ToasterSurface::attach(&bus, config.surface(), clock.clone())?;

        let log = Rc::new(RefCell::new(Vec::new()));
        let issuer = {
            let log = Rc::clone(&log);
            ToastIssuer::with_callback(&bus, move |toast| {
                let outcome = match toast.confirmed {
                    Some(true) => "confirmed",
                    Some(false) => "declined",
                    None => "dismissed",
                };
                log.borrow_mut().push(format!("resolved {} {outcome}", toast.id()));
            })
        };

        Ok(Self {
            bus,
            clock,
            surface,
            issuer,
            handles: Vec::new(),
            log,
            theme: config.theme(),
            rows,
            cols,
            plain,
        })
    }

    /// Runs every line of `script`, writing progress to `out`.
    ///
    /// # Errors
    ///
    /// Stops at the first malformed line or failed write.
    pub fn run(&mut self, script: &str, out: &mut impl Write) -> Result<(), DemoError> {
        for (index, line) in script.lines().enumerate() {
            let script_error = |message: String| DemoError::Script {
                line: index + 1,
                message,
            };
            if let Some(command) = Command::parse(line).map_err(script_error)? {
                self.execute(command, out).map_err(|e| match e {
                    DemoError::Toaster(e) => script_error(e.to_string()),
                    other => other,
                })?;
            }
        }
        Ok(())
    }

    pub fn execute(&mut self, command: Command, out: &mut impl Write) -> Result<(), DemoError> {
        tracing::debug!(?command, "executing demo command");

        match command {
            Command::Show(request) => {
                let handle = self.issuer.issue_request(request);
                let id = handle.id().clone();
                self.handles.push(handle);
                writeln!(out, "shown {} {id}", self.handles.len())?;
            }
            Command::Json(json) => self.bus.publish_json(&json)?,
            Command::Cancel(reference) => match self.handles.iter().find(|h| *h.id() == self.resolve(&reference)) {
                Some(handle) => handle.cancel(),
                None => self.bus.publish(toaster::Signal::request_dismiss(self.resolve(&reference))),
            },
            Command::Close(reference) => self.surface.dismiss(&self.resolve(&reference)),
            Command::Confirm(reference) => self.surface.confirm(&self.resolve(&reference)),
            Command::Decline(reference) => self.surface.decline(&self.resolve(&reference)),
            Command::End(reference) => self.surface.animation_ended(&self.resolve(&reference)),
            Command::Wait(duration) => self.wait(duration),
            Command::Render => self.render(out)?,
        }

        for line in self.log.borrow_mut().drain(..) {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }

    /// Advances the clock deadline by deadline so chained timers fire in order.
    fn wait(&self, duration: Duration) {
        let target = self.clock.now() + duration;
        while let Some(deadline) = self.surface.next_deadline().filter(|d| *d <= target) {
            self.clock.set(deadline);
            self.surface.tick();
        }
        self.clock.set(target);
        self.surface.tick();
    }

    fn render(&self, out: &mut impl Write) -> io::Result<()> {
        let view = self.surface.view();
        if self.plain {
            return write_plain(&view, out);
        }

        write!(out, "\u{1b}[2J")?;
        write!(out, "{}", render(&view, &self.theme, self.rows, self.cols))?;
        write!(out, "{}", toaster::ui::helpers::position_cursor(self.rows, 1))?;
        writeln!(out, "{}", Theme::reset())
    }

    /// `1`-based handle numbers map to issued ids; anything else is an id.
    fn resolve(&self, reference: &str) -> ToastId {
        reference
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| self.handles.get(i))
            .map_or_else(|| ToastId::from(reference), |h| h.id().clone())
    }
}

fn write_plain(view: &ToasterView, out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        "frame: {} toast(s), pointer {}",
        view.toasts.len(),
        if view.blocks_pointer() { "captured" } else { "passes through" }
    )?;
    for toast in &view.toasts {
        let mut controls = Vec::new();
        if toast.dismiss_button {
            controls.push("×");
        }
        if toast.confirm_buttons {
            controls.push("confirm/decline");
        }
        writeln!(
            out,
            "  {} [{}] {} {} \"{}\" {}",
            toast.id,
            toast.kind,
            toast.position,
            toast.animation,
            toast.message,
            controls.join(" ")
        )?;
    }
    Ok(())
}
