use crate::domain::{KeyLocator, NetworkEndpoint, NodeAnnouncement, SigningError};
use crate::ports::{AnnouncementSource, MessageSigner, TimeSource};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info};

/// Owner of the node's committed announcement.
///
/// Regeneration is copy-on-write: the committed value is cloned, edited,
/// re-stamped and signed without holding any lock, and only a successful
/// signature swaps the new value in. A failed signature leaves the manager
/// exactly as it was.
///
/// # Concurrency
///
/// Readers take the shared lock just long enough to clone the `Arc`. The
/// exclusive lock is held only for the swap, so a slow signer never blocks
/// readers. Concurrent regenerations may sign in parallel. A commit never
/// lowers the committed timestamp: if another regeneration committed a newer
/// one while this one was signing, the working copy is re-stamped past it and
/// signed again before committing.
pub struct AnnouncementManager {
    signer: Arc<dyn MessageSigner>,
    key_locator: KeyLocator,
    time_source: Arc<dyn TimeSource>,
    current: RwLock<Arc<NodeAnnouncement>>,
}

impl AnnouncementManager {
    /// Create a manager seeded with the startup announcement.
    ///
    /// `initial` may be unsigned; it is served as-is until the first
    /// successful [`AnnouncementManager::regenerate`].
    pub fn new(
        initial: NodeAnnouncement,
        signer: Arc<dyn MessageSigner>,
        key_locator: KeyLocator,
        time_source: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            signer,
            key_locator,
            time_source,
            current: RwLock::new(Arc::new(initial)),
        }
    }

    /// Snapshot of the committed announcement.
    pub fn current(&self) -> Arc<NodeAnnouncement> {
        Arc::clone(&*self.current.read())
    }

    pub fn key_locator(&self) -> KeyLocator {
        self.key_locator
    }

    /// Build, sign and commit a new announcement.
    ///
    /// 1. Clone the committed announcement, replacing its addresses with
    ///    `address_override` when given
    /// 2. Apply `mutate` to the copy
    /// 3. Stamp it with the current time, or one past the committed
    ///    timestamp if the clock has not moved beyond it
    /// 4. Sign `data_to_sign()` with the identity key
    /// 5. On success, swap it in and return it
    ///
    /// If a concurrent regeneration committed in the meantime and the copy
    /// would not be newer, steps 3-5 repeat against that commit.
    ///
    /// # Errors
    ///
    /// Returns the signer's error unchanged, or a `SigningError` describing
    /// an announcement too large to encode. Nothing is committed in either
    /// case.
    pub fn regenerate<F>(
        &self,
        address_override: Option<Vec<NetworkEndpoint>>,
        mutate: F,
    ) -> Result<Arc<NodeAnnouncement>, SigningError>
    where
        F: FnOnce(&mut NodeAnnouncement),
    {
        let mut base = self.current();
        let mut working = NodeAnnouncement::clone(&base);
        if let Some(addresses) = address_override {
            working.addresses = addresses;
        }
        mutate(&mut working);

        loop {
            working.timestamp = self.next_timestamp(base.timestamp);
            let payload = working
                .data_to_sign()
                .map_err(|e| SigningError(format!("can't encode node announcement: {e}")))?;
            working.signature = self.signer.sign_message(self.key_locator, &payload, false)?;

            let mut slot = self.current.write();
            if Arc::ptr_eq(&*slot, &base) || working.timestamp > slot.timestamp {
                let committed = Arc::new(working);
                *slot = Arc::clone(&committed);
                drop(slot);

                info!(
                    timestamp = committed.timestamp,
                    alias = %committed.alias,
                    addresses = committed.addresses.len(),
                    "committed node announcement"
                );
                return Ok(committed);
            }

            base = Arc::clone(&*slot);
            drop(slot);
            if base.timestamp == u32::MAX {
                return Err(SigningError::new(
                    "node announcement timestamp can't advance past u32::MAX",
                ));
            }
            debug!(
                stale = working.timestamp,
                committed = base.timestamp,
                "node announcement superseded while signing, re-signing"
            );
        }
    }

    /// Re-sign the current announcement with a fresh timestamp.
    pub fn refresh(&self) -> Result<Arc<NodeAnnouncement>, SigningError> {
        self.regenerate(None, |_| {})
    }

    /// Current time, or one past `previous` if the clock has not moved
    /// beyond it.
    fn next_timestamp(&self, previous: u32) -> u32 {
        let now = u32::try_from(self.time_source.now_secs()).unwrap_or(u32::MAX);
        if now > previous {
            now
        } else {
            previous.saturating_add(1)
        }
    }
}

impl AnnouncementSource for AnnouncementManager {
    fn current_announcement(&self) -> Arc<NodeAnnouncement> {
        self.current()
    }
}

impl std::fmt::Debug for AnnouncementManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnnouncementManager")
            .field("key_locator", &self.key_locator)
            .field("current", &self.current())
            .finish_non_exhaustive()
    }
}
