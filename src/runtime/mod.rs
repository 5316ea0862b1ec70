//! Runtime: runs update, executes commands, feeds async results back
//!
//! The update loop is single-threaded. The only side effect that takes
//! time is the polish call, which runs on its own thread and reports back
//! through the message channel.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use crate::commands::Cmd;
use crate::document::DocumentHost;
use crate::messages::{Msg, PolishMsg};
use crate::model::Composer;
use crate::polish::PolishService;
use crate::update::update;

pub struct Runtime<D: DocumentHost> {
    model: Composer<D>,
    service: Arc<dyn PolishService>,
    msg_tx: Sender<Msg>,
    msg_rx: Receiver<Msg>,
}

impl<D: DocumentHost> Runtime<D> {
    pub fn new(model: Composer<D>, service: Arc<dyn PolishService>) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        Self {
            model,
            service,
            msg_tx,
            msg_rx,
        }
    }

    pub fn model(&self) -> &Composer<D> {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut Composer<D> {
        &mut self.model
    }

    pub fn into_model(self) -> Composer<D> {
        self.model
    }

    /// Run one message through update and execute the resulting command.
    /// Returns true when the composer needs a redraw, which is whenever
    /// update produced a command.
    pub fn dispatch(&mut self, msg: Msg) -> bool {
        match update(&mut self.model, msg) {
            Some(cmd) => {
                self.process_cmd(cmd);
                true
            }
            None => false,
        }
    }

    fn process_cmd(&self, cmd: Cmd) {
        match cmd {
            Cmd::Redraw => {}
            Cmd::RunPolish {
                request,
                text,
                mode,
            } => {
                let tx = self.msg_tx.clone();
                let service = Arc::clone(&self.service);
                std::thread::spawn(move || {
                    let result = service.polish(&text, mode);
                    let _ = tx.send(Msg::Polish(PolishMsg::Completed { request, result }));
                });
            }
        }
    }

    /// Drain messages posted by worker threads without blocking
    pub fn process_async_messages(&mut self) -> bool {
        let mut needs_redraw = false;
        while let Ok(msg) = self.msg_rx.try_recv() {
            if self.dispatch(msg) {
                needs_redraw = true;
            }
        }
        needs_redraw
    }

    /// Block until the in-flight polish request (if any) has been answered.
    ///
    /// There is no timeout: a service that never answers blocks here, just
    /// as it would leave a UI in its "requesting" state.
    pub fn wait_for_polish(&mut self) -> bool {
        let mut needs_redraw = false;
        while self.model.review.is_requesting() {
            match self.msg_rx.recv() {
                Ok(msg) => {
                    if self.dispatch(msg) {
                        needs_redraw = true;
                    }
                }
                // We hold a sender, so this only happens if the channel is torn down
                Err(_) => break,
            }
        }
        needs_redraw
    }
}
