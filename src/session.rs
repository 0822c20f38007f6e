//! Session: one actor task owning the canvas and the pipeline, driven through a cloneable
//! [SessionHandle].
//!
//! Commands are served strictly in arrival order. An advance hands its request to a
//! spawned backend task and the actor keeps serving; the settled outcome comes back on a
//! private channel and is applied through [PipelineMachine::complete_advance]. While that
//! is pending, advance/retreat/reset are answered with [PipelineError::InFlight] and graph
//! edits still go through (the backend already holds its snapshot).

use crate::canvas::Canvas;
use crate::error::{BackendError, PipelineError, SessionError};
use crate::pipeline::{GenerationBackend, PipelineMachine};
use crate::types::{Node, NodeId, NodeKind, NodeValue, PartialResult, PipelineStage};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

const COMMAND_BUFFER: usize = 32;

type CanvasFn = Box<dyn FnOnce(&mut Canvas) + Send>;
type StageReply = oneshot::Sender<Result<PipelineStage, PipelineError>>;

enum Command {
  Canvas(CanvasFn),
  Advance(StageReply),
  Retreat(oneshot::Sender<Result<Option<PipelineStage>, PipelineError>>),
  Reset(oneshot::Sender<Result<(), PipelineError>>),
  PrimaryAction(StageReply),
  Pipeline(oneshot::Sender<PipelineView>),
  Shutdown,
}

/// Point-in-time view of the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineView {
  pub stage: PipelineStage,
  pub result: PartialResult,
  pub in_flight: bool,
}

impl PipelineView {
  /// Label for the primary action button at this stage.
  pub fn action_label(&self) -> &'static str {
    self.stage.action_label()
  }
}

/// Actor state. Created and started by [Session::spawn].
pub struct Session {
  canvas: Canvas,
  machine: PipelineMachine,
  backend: Arc<dyn GenerationBackend>,
  commands: mpsc::Receiver<Command>,
  settle_tx: mpsc::Sender<Result<PartialResult, BackendError>>,
  settle_rx: mpsc::Receiver<Result<PartialResult, BackendError>>,
  pending_reply: Option<StageReply>,
}

impl Session {
  /// Starts the actor on the current tokio runtime and returns its handle.
  pub fn spawn(canvas: Canvas, backend: Arc<dyn GenerationBackend>) -> SessionHandle {
    let (tx, commands) = mpsc::channel(COMMAND_BUFFER);
    let (settle_tx, settle_rx) = mpsc::channel(1);
    let session = Session {
      canvas,
      machine: PipelineMachine::default(),
      backend,
      commands,
      settle_tx,
      settle_rx,
      pending_reply: None,
    };
    tokio::spawn(session.run());
    SessionHandle { tx }
  }

  async fn run(mut self) {
    debug!("session started");
    loop {
      tokio::select! {
        Some(outcome) = self.settle_rx.recv() => self.settle(outcome),
        cmd = self.commands.recv() => match cmd {
          Some(Command::Shutdown) | None => break,
          Some(cmd) => self.handle(cmd),
        },
      }
    }
    debug!("session stopped");
  }

  fn handle(&mut self, cmd: Command) {
    match cmd {
      Command::Canvas(f) => f(&mut self.canvas),
      Command::Advance(reply) => self.start_advance(reply),
      Command::Retreat(reply) => {
        let _ = reply.send(self.machine.retreat());
      }
      Command::Reset(reply) => {
        let _ = reply.send(self.machine.reset());
      }
      Command::PrimaryAction(reply) => {
        if self.machine.stage() == PipelineStage::Final {
          let _ = reply.send(self.machine.reset().map(|()| PipelineStage::Idle));
        } else {
          self.start_advance(reply);
        }
      }
      Command::Pipeline(reply) => {
        let _ = reply.send(PipelineView {
          stage: self.machine.stage(),
          result: self.machine.result().clone(),
          in_flight: self.machine.is_in_flight(),
        });
      }
      Command::Shutdown => {}
    }
  }

  #[instrument(level = "trace", skip(self, reply), fields(stage = %self.machine.stage()))]
  fn start_advance(&mut self, reply: StageReply) {
    let request = match self.machine.begin_advance(self.canvas.snapshot()) {
      Ok(request) => request,
      Err(e) => {
        debug!(error = %e, "advance rejected");
        let _ = reply.send(Err(e));
        return;
      }
    };
    info!(step = %request.step, nodes = request.nodes.len(), "generation step requested");
    self.pending_reply = Some(reply);
    let backend = Arc::clone(&self.backend);
    let settle = self.settle_tx.clone();
    tokio::spawn(async move {
      let task = tokio::spawn(async move { backend.generate(&request).await });
      let outcome = match task.await {
        Ok(outcome) => outcome,
        Err(e) => Err(BackendError::failed(format!("generation task aborted: {}", e))),
      };
      let _ = settle.send(outcome).await;
    });
  }

  fn settle(&mut self, outcome: Result<PartialResult, BackendError>) {
    let result = self.machine.complete_advance(outcome);
    match self.pending_reply.take() {
      Some(reply) => {
        let _ = reply.send(result);
      }
      None => warn!("generation outcome settled with no caller waiting"),
    }
  }
}

/// Cloneable handle to a running [Session]. Every call fails with [SessionError::Closed]
/// once the actor has stopped.
#[derive(Clone)]
pub struct SessionHandle {
  tx: mpsc::Sender<Command>,
}

impl SessionHandle {
  async fn request<R>(
    &self,
    make: impl FnOnce(oneshot::Sender<R>) -> Command,
  ) -> Result<R, SessionError> {
    let (reply, rx) = oneshot::channel();
    self
      .tx
      .send(make(reply))
      .await
      .map_err(|_| SessionError::Closed)?;
    rx.await.map_err(|_| SessionError::Closed)
  }

  /// Runs `f` against the canvas inside the actor and returns its result.
  pub async fn with_canvas<R, F>(&self, f: F) -> Result<R, SessionError>
  where
    R: Send + 'static,
    F: FnOnce(&mut Canvas) -> R + Send + 'static,
  {
    self
      .request(|reply| {
        Command::Canvas(Box::new(move |canvas: &mut Canvas| {
          let _ = reply.send(f(canvas));
        }))
      })
      .await
  }

  pub async fn add_node(&self, kind: NodeKind, base_name: &str) -> Result<NodeId, SessionError> {
    let base_name = base_name.to_string();
    self.with_canvas(move |c| c.add_node(kind, &base_name)).await
  }

  pub async fn delete_node(&self, id: &str) -> Result<Option<Node>, SessionError> {
    let id = id.to_string();
    self.with_canvas(move |c| c.delete_node(&id)).await
  }

  pub async fn update_value(&self, id: &str, value: NodeValue) -> Result<bool, SessionError> {
    let id = id.to_string();
    self.with_canvas(move |c| c.update_value(&id, value)).await
  }

  pub async fn apply_suggestion(
    &self,
    node_name: &str,
    value: NodeValue,
  ) -> Result<bool, SessionError> {
    let node_name = node_name.to_string();
    self
      .with_canvas(move |c| c.apply_suggestion(&node_name, value))
      .await
  }

  pub async fn select_node(&self, id: &str, additive: bool) -> Result<(), SessionError> {
    let id = id.to_string();
    self.with_canvas(move |c| c.select_node(&id, additive)).await
  }

  pub async fn clear_selection(&self) -> Result<(), SessionError> {
    self.with_canvas(|c| c.clear_selection()).await
  }

  pub async fn group_selected(&self) -> Result<Option<NodeId>, SessionError> {
    self.with_canvas(|c| c.group_selected()).await
  }

  /// Flat node list as of now.
  pub async fn nodes(&self) -> Result<Vec<Node>, SessionError> {
    self.with_canvas(|c| c.snapshot()).await
  }

  pub async fn selected(&self) -> Result<Vec<NodeId>, SessionError> {
    self.with_canvas(|c| c.selection().ids().to_vec()).await
  }

  /// Requests the next stage and waits for the backend to settle it.
  pub async fn advance(&self) -> Result<PipelineStage, SessionError> {
    Ok(self.request(Command::Advance).await??)
  }

  pub async fn retreat(&self) -> Result<Option<PipelineStage>, SessionError> {
    Ok(self.request(Command::Retreat).await??)
  }

  pub async fn reset(&self) -> Result<(), SessionError> {
    Ok(self.request(Command::Reset).await??)
  }

  /// The single pipeline button: advance below [PipelineStage::Final], reset at it.
  pub async fn primary_action(&self) -> Result<PipelineStage, SessionError> {
    Ok(self.request(Command::PrimaryAction).await??)
  }

  pub async fn pipeline(&self) -> Result<PipelineView, SessionError> {
    self.request(Command::Pipeline).await
  }

  /// Stops the actor. An in-flight generation is dropped unapplied.
  pub async fn shutdown(&self) -> Result<(), SessionError> {
    self
      .tx
      .send(Command::Shutdown)
      .await
      .map_err(|_| SessionError::Closed)
  }
}
