//! Camera backdrop.
//!
//! Acquisition runs on a background thread so `mount` never blocks the host.
//! The feed has no link to the simulation: a failure only changes what the
//! overlay shows behind the scene.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::sync::Arc;

use log::{info, warn};
use thiserror::Error;

/// Default V4L2 capture node.
pub const DEFAULT_DEVICE: &str = "/dev/video0";

#[derive(Debug, Error)]
pub enum CameraError {
    #[error("no camera found at {0}")]
    NotFound(PathBuf),
    #[error("camera access denied for {0}")]
    PermissionDenied(PathBuf),
    #[error("camera error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CameraError {
    /// Classify an I/O failure on `path`.
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source,
            },
        }
    }
}

/// An acquired stream. Dropping it releases the device.
#[derive(Debug)]
pub struct VideoStream {
    label: String,
    _device: Option<File>,
}

impl VideoStream {
    pub fn new(label: impl Into<String>, device: Option<File>) -> Self {
        Self {
            label: label.into(),
            _device: device,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Something that can hand out a video stream.
pub trait VideoSource: Send + Sync {
    /// Open the stream. May block; always called off the host thread.
    fn acquire(&self) -> Result<VideoStream, CameraError>;
}

/// Opens a capture device node.
#[derive(Debug, Clone)]
pub struct DeviceProbe {
    path: PathBuf,
}

impl DeviceProbe {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for DeviceProbe {
    fn default() -> Self {
        Self::new(DEFAULT_DEVICE)
    }
}

impl VideoSource for DeviceProbe {
    fn acquire(&self) -> Result<VideoStream, CameraError> {
        let file = OpenOptions::new()
            .read(true)
            .open(&self.path)
            .map_err(|err| CameraError::from_io(&self.path, err))?;
        Ok(VideoStream::new(self.path.display().to_string(), Some(file)))
    }
}

/// What is drawn behind the scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backdrop {
    /// Acquisition still in flight.
    Pending,
    Live { device: String },
    /// No video; show `message` instead.
    Static { message: String },
}

enum FeedState {
    Unmounted,
    Acquiring(mpsc::Receiver<Result<VideoStream, CameraError>>),
    Live(VideoStream),
    Failed(String),
}

/// Full-bleed camera backdrop with a mount/unmount lifecycle.
pub struct CameraFeed {
    state: FeedState,
}

impl Default for CameraFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraFeed {
    pub fn new() -> Self {
        Self {
            state: FeedState::Unmounted,
        }
    }

    /// Start acquiring from `source`. Returns immediately. Ignored while
    /// already mounted.
    pub fn mount(&mut self, source: Arc<dyn VideoSource>) {
        if !matches!(self.state, FeedState::Unmounted) {
            return;
        }
        let (tx, rx) = mpsc::channel();
        let spawned = std::thread::Builder::new()
            .name("arshooter-camera".into())
            .spawn(move || {
                // If the feed was unmounted meanwhile the stream is dropped here.
                let _ = tx.send(source.acquire());
            });
        self.state = match spawned {
            Ok(_) => FeedState::Acquiring(rx),
            Err(err) => {
                warn!("camera thread failed to start: {err}");
                FeedState::Failed("Camera unavailable".into())
            }
        };
    }

    /// Pick up the acquisition result, if any, and report the backdrop.
    pub fn poll(&mut self) -> Backdrop {
        if let FeedState::Acquiring(rx) = &self.state {
            let next = match rx.try_recv() {
                Ok(Ok(stream)) => {
                    info!("camera live: {}", stream.label());
                    Some(FeedState::Live(stream))
                }
                Ok(Err(err)) => {
                    warn!("camera unavailable: {err}");
                    Some(FeedState::Failed(format!("Camera unavailable ({err})")))
                }
                Err(mpsc::TryRecvError::Disconnected) => {
                    Some(FeedState::Failed("Camera unavailable".into()))
                }
                Err(mpsc::TryRecvError::Empty) => None,
            };
            if let Some(next) = next {
                self.state = next;
            }
        }
        self.backdrop()
    }

    /// Current backdrop without polling.
    pub fn backdrop(&self) -> Backdrop {
        match &self.state {
            FeedState::Unmounted => Backdrop::Static {
                message: "Camera off".into(),
            },
            FeedState::Acquiring(_) => Backdrop::Pending,
            FeedState::Live(stream) => Backdrop::Live {
                device: stream.label().to_string(),
            },
            FeedState::Failed(message) => Backdrop::Static {
                message: message.clone(),
            },
        }
    }

    pub fn is_mounted(&self) -> bool {
        !matches!(self.state, FeedState::Unmounted)
    }

    /// Release the stream. Safe to call repeatedly.
    pub fn unmount(&mut self) {
        if let FeedState::Live(stream) = &self.state {
            info!("camera released: {}", stream.label());
        }
        self.state = FeedState::Unmounted;
    }
}

impl Drop for CameraFeed {
    fn drop(&mut self) {
        self.unmount();
    }
}
