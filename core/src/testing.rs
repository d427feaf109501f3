//! Scripted [`Transfer`] for tests.

use std::cell::RefCell;

use crate::error::TransferResult;
use crate::progress::ProgressEvent;
use crate::transfer::{transfer_channel, Transfer, TransferHandle, TransferRequest};

/// Replays a fixed list of progress events, then settles with `outcome`.
/// Requests it receives are recorded for inspection.
pub struct ScriptedTransfer<B> {
    events: Vec<ProgressEvent>,
    outcome: Option<TransferResult<()>>,
    pub requests: RefCell<Vec<TransferRequest<B>>>,
}

impl<B> ScriptedTransfer<B> {
    pub fn new(events: Vec<ProgressEvent>, outcome: TransferResult<()>) -> Self {
        Self {
            events,
            outcome: Some(outcome),
            requests: RefCell::new(Vec::new()),
        }
    }

    /// A transfer whose outcome sender is dropped without settling.
    pub fn abandoned(events: Vec<ProgressEvent>) -> Self {
        Self {
            events,
            outcome: None,
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn started(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl<B> Transfer for ScriptedTransfer<B> {
    type Body = B;

    fn start(&self, request: TransferRequest<B>) -> TransferHandle {
        self.requests.borrow_mut().push(request);
        let (sink, handle) = transfer_channel();
        for event in &self.events {
            sink.report(*event);
        }
        match self.outcome.clone() {
            Some(outcome) => sink.finish(outcome),
            None => drop(sink),
        }
        handle
    }
}
