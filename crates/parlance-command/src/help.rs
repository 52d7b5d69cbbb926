//! Built-in `/help` command.
//!
//! Applications that want help support declare [`HelpCommand`] into their
//! registry like any other command and install [`help_handler_entry`] into
//! each worker's handler registry. The handler resolves the topic against the
//! shared command registry and writes the text to the worker's output sink,
//! categorized as a request result so front ends can route it separately
//! from game or chat traffic.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use parlance_types::text::OutputSink;

use crate::dispatch::{Handleable, HandlerEntry};
use crate::grammar::{ParamType, ParameterSpec};
use crate::parse::ArgValue;
use crate::registry::{CommandDeclaration, SlashCommand, SlashCommandRegistry};

/// Output category attached to help responses.
pub const REQUEST_RESULT: &str = "RequestResult";

/// `/help [topic]` — topic is a group key or command name.
#[derive(Debug, Default)]
pub struct HelpCommand {
    topic: Option<String>,
}

impl HelpCommand {
    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }
}

impl Handleable for HelpCommand {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl SlashCommand for HelpCommand {
    fn declaration() -> CommandDeclaration {
        CommandDeclaration::new("HELP").param(ParameterSpec::optional("Topic", ParamType::Str))
    }

    fn assign(&mut self, index: usize, value: ArgValue) {
        if index == 0
            && let ArgValue::Str(topic) = value
        {
            self.topic = Some(topic);
        }
    }
}

/// Build the handler entry answering [`HelpCommand`] requests.
///
/// The registry is shared across workers; the sink belongs to one worker's
/// session.
pub fn help_handler_entry(
    registry: Arc<SlashCommandRegistry>,
    sink: Rc<RefCell<dyn OutputSink>>,
) -> HandlerEntry {
    HandlerEntry::new::<HelpCommand, _>(move |request| {
        let text = registry.help_text(request.topic());
        sink.borrow_mut().emit_categorized(REQUEST_RESULT, &text);
    })
}
