//! Foreign clients
//!
//! Third-party-shaped clients whose method names and arguments do not match
//! any capability. Each records its calls so callers can see what reached it.

use parking_lot::Mutex;
use serde::Serialize;

/// A file written by [`LocalDisk`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiskWrite {
    /// Full path written
    pub path: String,
    /// Bytes written
    pub bytes: usize,
}

/// Local filesystem client
#[derive(Debug)]
pub struct LocalDisk {
    root: String,
    writes: Mutex<Vec<DiskWrite>>,
}

impl LocalDisk {
    /// Client writing under `root`
    #[must_use]
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            writes: Mutex::new(Vec::new()),
        }
    }

    /// Root directory
    #[inline]
    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Write `bytes` to `relative` under the root; returns the full path
    pub fn write_bytes(&self, relative: &str, bytes: &[u8]) -> String {
        let path = format!("{}/{}", self.root.trim_end_matches('/'), relative.trim_start_matches('/'));
        tracing::info!(%path, bytes = bytes.len(), "writing local file");
        self.writes.lock().push(DiskWrite {
            path: path.clone(),
            bytes: bytes.len(),
        });
        path
    }

    /// Every write so far
    #[must_use]
    pub fn writes(&self) -> Vec<DiskWrite> {
        self.writes.lock().clone()
    }
}

impl Default for LocalDisk {
    fn default() -> Self {
        Self::new("./data")
    }
}

/// An object uploaded through [`S3Client`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct S3Upload {
    /// Target bucket
    pub bucket: String,
    /// Object key
    pub key: String,
    /// Body size in bytes
    pub size: usize,
}

/// Object storage client
#[derive(Debug, Default)]
pub struct S3Client {
    uploads: Mutex<Vec<S3Upload>>,
}

impl S3Client {
    /// Create client
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Upload `body` as `key` into `bucket`; returns the object URI
    pub fn upload_file(&self, bucket: &str, key: &str, body: &[u8]) -> String {
        tracing::info!(bucket, key, size = body.len(), "uploading object");
        self.uploads.lock().push(S3Upload {
            bucket: bucket.to_string(),
            key: key.to_string(),
            size: body.len(),
        });
        format!("s3://{bucket}/{key}")
    }

    /// Every upload so far
    #[must_use]
    pub fn uploads(&self) -> Vec<S3Upload> {
        self.uploads.lock().clone()
    }
}

/// A message posted through [`SlackClient`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlackPost {
    /// Channel posted to
    pub channel: String,
    /// Message text
    pub text: String,
}

/// Slack webhook client
#[derive(Debug)]
pub struct SlackClient {
    channel: String,
    posts: Mutex<Vec<SlackPost>>,
}

impl SlackClient {
    /// Client posting to `channel`
    #[must_use]
    pub fn new(channel: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            posts: Mutex::new(Vec::new()),
        }
    }

    /// Post `text` to the configured channel
    pub fn post_message(&self, text: &str) {
        tracing::info!(channel = %self.channel, text, "posting to slack");
        self.posts.lock().push(SlackPost {
            channel: self.channel.clone(),
            text: text.to_string(),
        });
    }

    /// Every post so far
    #[must_use]
    pub fn posts(&self) -> Vec<SlackPost> {
        self.posts.lock().clone()
    }
}

impl Default for SlackClient {
    fn default() -> Self {
        Self::new("#general")
    }
}

/// Microsoft Teams connector client
#[derive(Debug, Default)]
pub struct TeamsClient {
    cards: Mutex<Vec<String>>,
}

impl TeamsClient {
    /// Create client
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Send a message card with `body`
    pub fn send_card(&self, body: &str) {
        tracing::info!(body, "sending teams card");
        self.cards.lock().push(body.to_string());
    }

    /// Every card body sent so far
    #[must_use]
    pub fn cards(&self) -> Vec<String> {
        self.cards.lock().clone()
    }
}
