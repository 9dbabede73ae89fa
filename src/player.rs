//! The playback surface: a fire-and-forget mpv process per active video.
//!
//! The feed controller decides *which* item plays; this module only follows
//! its instructions — spawn mpv when an item activates, kill it when the item
//! deactivates, and poke mpv's JSON IPC socket when the live item's mute flag
//! flips. Nothing here feeds state back into the controller.

use anyhow::{Context, Result, anyhow};
use std::process::Stdio;
use tokio::{
  io::AsyncBufReadExt,
  io::BufReader as TokioBufReader,
  process::{Child as TokioChild, Command},
  sync::mpsc,
  task::JoinHandle,
};
use tracing::{debug, info};

use crate::feed::{MediaRef, VideoId};

pub struct Player {
  current_process: Option<TokioChild>,
  monitor_handle: Option<JoinHandle<()>>,
  status_rx: Option<mpsc::Receiver<String>>,
  last_status: Option<String>,
  ipc_socket_path: Option<String>,
  current_id: Option<VideoId>,
  /// When false (`--no-playback`), playback instructions are logged and
  /// dropped. The feed state machine runs exactly the same either way.
  enabled: bool,
}

impl Player {
  pub fn new(enabled: bool) -> Self {
    Self {
      current_process: None,
      monitor_handle: None,
      status_rx: None,
      last_status: None,
      ipc_socket_path: None,
      current_id: None,
      enabled,
    }
  }

  pub fn is_playing(&self) -> bool {
    self.current_process.is_some()
  }

  pub fn current_id(&self) -> Option<VideoId> {
    self.current_id
  }

  /// Drain any status lines mpv has printed since the last tick.
  pub fn check_status(&mut self) {
    if let Some(rx) = &mut self.status_rx {
      while let Ok(status) = rx.try_recv() {
        self.last_status = Some(status);
      }
    }
  }

  pub fn last_status(&self) -> Option<&str> {
    self.last_status.as_deref()
  }

  /// Start playing `media`, replacing whatever was playing before.
  pub async fn start(&mut self, id: VideoId, media: &MediaRef, muted: bool) -> Result<()> {
    self.stop().await.context("Failed to stop previous playback")?;
    self.current_id = Some(id);

    if !self.enabled {
      debug!(id, media = media.as_str(), "playback disabled, skipping mpv spawn");
      return Ok(());
    }

    let socket_path = std::env::temp_dir().join(format!("reel-mpv-{}.sock", std::process::id()));
    let socket_path_str = socket_path.to_str().context("Temp dir path is not valid UTF-8")?.to_string();
    // Remove stale socket if it exists from a previous crash.
    let _ = std::fs::remove_file(&socket_path);

    let mut cmd = Command::new("mpv");
    cmd.args([
      "--loop",
      &format!("--mute={}", if muted { "yes" } else { "no" }),
      "--term-status-msg=Time: ${time-pos/full} / ${duration/full} | ${pause} ${percent-pos}%",
      &format!("--input-ipc-server={}", socket_path_str),
      media.as_str(),
    ]);
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    // Send stderr to null — if piped but never drained, the pipe buffer
    // fills and mpv blocks.
    cmd.stderr(Stdio::null());

    let mut child = cmd.spawn().map_err(|e| {
      if e.kind() == std::io::ErrorKind::NotFound {
        anyhow!("mpv not found. Install it with: brew install mpv (macOS) or apt install mpv (Linux)")
      } else {
        anyhow!(e).context("Failed to spawn mpv process")
      }
    })?;

    let stdout = child.stdout.take().context("Failed to get mpv stdout")?;
    let (tx, rx) = mpsc::channel::<String>(10);
    self.status_rx = Some(rx);

    let monitor_handle = tokio::spawn(async move {
      let reader = TokioBufReader::new(stdout);
      let mut lines = reader.lines();
      while let Ok(Some(line)) = lines.next_line().await {
        if tx.send(line).await.is_err() {
          break;
        }
      }
    });

    info!(id, media = media.as_str(), muted, "playback started");
    self.current_process = Some(child);
    self.monitor_handle = Some(monitor_handle);
    self.ipc_socket_path = Some(socket_path_str);
    Ok(())
  }

  /// Apply a mute flip to the live mpv process over its IPC socket.
  pub async fn set_muted(&mut self, muted: bool) -> Result<()> {
    let Some(ref socket_path) = self.ipc_socket_path else {
      return Ok(());
    };
    let stream = tokio::net::UnixStream::connect(socket_path).await.context("Failed to connect to mpv IPC socket")?;
    stream.writable().await.context("mpv IPC socket not writable")?;
    let mut cmd = serde_json::json!({ "command": ["set_property", "mute", muted] }).to_string();
    cmd.push('\n');
    let written = stream.try_write(cmd.as_bytes()).context("Failed to send mute command to mpv")?;
    if written < cmd.len() {
      return Err(anyhow!("Partial write to mpv IPC socket: wrote {} of {} bytes", written, cmd.len()));
    }
    debug!(muted, "applied mute to live playback");
    Ok(())
  }

  /// Stop playback and reap the mpv process. Safe to call when idle.
  pub async fn stop(&mut self) -> Result<()> {
    if let Some(handle) = self.monitor_handle.take() {
      handle.abort();
      let _ = handle.await;
    }
    self.status_rx = None;
    self.last_status = None;

    if let Some(mut child) = self.current_process.take() {
      child.kill().await.context("Failed to kill mpv process")?;
      let _ = child.wait().await;
      info!(id = self.current_id, "playback stopped");
    }

    self.current_id = None;

    if let Some(path) = self.ipc_socket_path.take() {
      let _ = std::fs::remove_file(&path);
    }
    Ok(())
  }
}
