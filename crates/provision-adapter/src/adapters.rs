//! Static adapters
//!
//! Each adapter owns one foreign client and exposes it through a single
//! capability trait. The foreign client is never handed back out; callers
//! only see the capability plus read-only records of what reached it.

use crate::foreign::{DiskWrite, LocalDisk, S3Client, S3Upload, SlackClient, SlackPost, TeamsClient};
use provision_registry::{Capability, Delivery, Notifier};
use serde::Serialize;

/// Result of [`FileStore::save_file`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredFile {
    /// Backend label
    pub backend: &'static str,
    /// Where the file ended up
    pub location: String,
    /// Bytes stored
    pub size: usize,
}

/// File storage capability
pub trait FileStore: Capability {
    /// Store `data` under `path`
    fn save_file(&self, path: &str, data: &[u8]) -> StoredFile;
}

/// A foreign client that has an adapter
pub trait Adaptee: Sized {
    /// The adapter type
    type Adapter;

    /// Wrap into the adapter
    fn wrap(self) -> Self::Adapter;
}

/// Wrap `foreign` into its adapter
#[inline]
#[must_use]
pub fn wrap<A: Adaptee>(foreign: A) -> A::Adapter {
    foreign.wrap()
}

/// [`LocalDisk`] as a [`FileStore`]
#[derive(Debug)]
pub struct LocalStorage {
    disk: LocalDisk,
}

impl LocalStorage {
    /// Files written so far
    #[must_use]
    pub fn writes(&self) -> Vec<DiskWrite> {
        self.disk.writes()
    }
}

impl Capability for LocalStorage {
    fn label(&self) -> &'static str {
        "local"
    }
}

impl FileStore for LocalStorage {
    fn save_file(&self, path: &str, data: &[u8]) -> StoredFile {
        StoredFile {
            backend: self.label(),
            location: self.disk.write_bytes(path, data),
            size: data.len(),
        }
    }
}

impl Adaptee for LocalDisk {
    type Adapter = LocalStorage;

    fn wrap(self) -> LocalStorage {
        LocalStorage { disk: self }
    }
}

/// [`S3Client`] as a [`FileStore`] bound to one bucket
#[derive(Debug)]
pub struct S3Storage {
    client: S3Client,
    bucket: String,
}

impl S3Storage {
    /// Bucket used by [`Adaptee::wrap`]
    pub const DEFAULT_BUCKET: &'static str = "mi-bucket";

    /// Adapter uploading into `bucket`
    #[must_use]
    pub fn new(client: S3Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Target bucket
    #[inline]
    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Objects uploaded so far
    #[must_use]
    pub fn uploads(&self) -> Vec<S3Upload> {
        self.client.uploads()
    }
}

impl Capability for S3Storage {
    fn label(&self) -> &'static str {
        "s3"
    }
}

impl FileStore for S3Storage {
    fn save_file(&self, path: &str, data: &[u8]) -> StoredFile {
        StoredFile {
            backend: self.label(),
            location: self.client.upload_file(&self.bucket, path, data),
            size: data.len(),
        }
    }
}

impl Adaptee for S3Client {
    type Adapter = S3Storage;

    fn wrap(self) -> S3Storage {
        S3Storage::new(self, S3Storage::DEFAULT_BUCKET)
    }
}

/// [`SlackClient`] as a [`Notifier`]
#[derive(Debug, Default)]
pub struct SlackNotifier {
    client: SlackClient,
}

impl SlackNotifier {
    /// Messages posted so far
    #[must_use]
    pub fn posts(&self) -> Vec<SlackPost> {
        self.client.posts()
    }
}

impl Capability for SlackNotifier {
    fn label(&self) -> &'static str {
        "slack"
    }
}

impl Notifier for SlackNotifier {
    fn send(&self, message: &str) -> Delivery {
        self.client.post_message(message);
        Delivery::new(self.label(), message)
    }
}

impl Adaptee for SlackClient {
    type Adapter = SlackNotifier;

    fn wrap(self) -> SlackNotifier {
        SlackNotifier { client: self }
    }
}

/// [`TeamsClient`] as a [`Notifier`]
#[derive(Debug, Default)]
pub struct TeamsNotifier {
    client: TeamsClient,
}

impl TeamsNotifier {
    /// Card bodies sent so far
    #[must_use]
    pub fn cards(&self) -> Vec<String> {
        self.client.cards()
    }
}

impl Capability for TeamsNotifier {
    fn label(&self) -> &'static str {
        "teams"
    }
}

impl Notifier for TeamsNotifier {
    fn send(&self, message: &str) -> Delivery {
        self.client.send_card(message);
        Delivery::new(self.label(), message)
    }
}

impl Adaptee for TeamsClient {
    type Adapter = TeamsNotifier;

    fn wrap(self) -> TeamsNotifier {
        TeamsNotifier { client: self }
    }
}
