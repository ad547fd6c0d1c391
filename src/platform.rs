//! Host platform seams: blocking dialogs and listener lifetimes.

use std::collections::VecDeque;

/// Blocking dialogs shown by the host (`window.confirm` and friends in the
/// browser).
pub trait Dialogs {
    /// Ask a yes/no question.
    fn confirm(&mut self, message: &str) -> bool;

    /// Ask for text, pre-filled with `default`. `None` means cancelled.
    fn prompt(&mut self, message: &str, default: &str) -> Option<String>;

    /// Show a message.
    fn alert(&mut self, message: &str);
}

/// A dialog the editor showed, as recorded by [`ScriptedDialogs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogRecord {
    Confirm(String),
    Prompt { message: String, default: String },
    Alert(String),
}

/// Dialogs answered from queued responses.
///
/// Unanswered confirms are declined and unanswered prompts cancelled.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDialogs {
    confirms: VecDeque<bool>,
    prompts: VecDeque<Option<String>>,
    shown: Vec<DialogRecord>,
}

impl ScriptedDialogs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer_confirm(&mut self, answer: bool) -> &mut Self {
        self.confirms.push_back(answer);
        self
    }

    pub fn answer_prompt(&mut self, answer: Option<&str>) -> &mut Self {
        self.prompts.push_back(answer.map(str::to_string));
        self
    }

    /// Every dialog shown so far, oldest first.
    pub fn shown(&self) -> &[DialogRecord] {
        &self.shown
    }

    pub fn alerts(&self) -> impl Iterator<Item = &str> {
        self.shown.iter().filter_map(|d| match d {
            DialogRecord::Alert(msg) => Some(msg.as_str()),
            _ => None,
        })
    }
}

impl Dialogs for ScriptedDialogs {
    fn confirm(&mut self, message: &str) -> bool {
        self.shown.push(DialogRecord::Confirm(message.to_string()));
        self.confirms.pop_front().unwrap_or(false)
    }

    fn prompt(&mut self, message: &str, default: &str) -> Option<String> {
        self.shown.push(DialogRecord::Prompt {
            message: message.to_string(),
            default: default.to_string(),
        });
        self.prompts.pop_front().flatten()
    }

    fn alert(&mut self, message: &str) {
        self.shown.push(DialogRecord::Alert(message.to_string()));
    }
}

/// Runs its teardown when dropped.
///
/// Event listeners and observers registered with the host return one of
/// these; dropping it deregisters the callback.
#[must_use = "dropping a Subscription deregisters it immediately"]
pub struct Subscription {
    teardown: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(teardown: impl FnOnce() + 'static) -> Self {
        Self {
            teardown: Some(Box::new(teardown)),
        }
    }

    /// Teardown now instead of at drop.
    pub fn cancel(mut self) {
        self.run();
    }

    fn run(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.teardown.is_some())
            .finish()
    }
}
