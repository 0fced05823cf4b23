//! Local-first sync core.
//!
//! Each entity list lives in a [`watch`] channel. [`SyncCore::hydrate`]
//! publishes the cached list before any network traffic, so the workspace
//! renders immediately. [`SyncCore::attach`] then binds the list to a
//! user's remote collection and pulls on an interval; a non-empty pull
//! replaces the list wholesale, an empty one is ignored so a cold or
//! misbehaving remote cannot wipe local state. Local edits apply
//! immediately and are pushed upstream as fire-and-forget writes.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;

use crate::config::RemoteConfig;
use crate::error::Result;
use crate::identity::UserId;
use crate::models::{merge_defaults, Event, Link, Note};
use crate::remote::RemoteCollection;
use crate::store::{keys, EntityCache};
use crate::util::local_id;

/// Where newly inserted records land in the list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    /// Newest first
    Front,
    /// Append to the end
    Back,
}

/// An entity type the sync core can manage.
pub trait SyncEntity: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Cache key the list is stored under
    const CACHE_KEY: &'static str;
    /// Prefix for locally synthesized record ids
    const LOCAL_ID_PREFIX: &'static str;
    /// Where [`SyncCore::insert`] places new records
    const INSERT_POSITION: InsertPosition;

    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);

    /// Whether this record only exists locally.
    fn is_local(&self) -> bool {
        self.id().starts_with(Self::LOCAL_ID_PREFIX)
    }

    /// Seed or repair the list loaded from the cache at startup.
    #[must_use]
    fn hydrate(stored: Option<Vec<Self>>) -> Vec<Self> {
        stored.unwrap_or_default()
    }

    /// Normalize a full list before it is published.
    #[must_use]
    fn reconcile(records: Vec<Self>) -> Vec<Self> {
        records
    }
}

impl SyncEntity for Link {
    const CACHE_KEY: &'static str = keys::LINKS;
    const LOCAL_ID_PREFIX: &'static str = "link-";
    const INSERT_POSITION: InsertPosition = InsertPosition::Back;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn hydrate(stored: Option<Vec<Self>>) -> Vec<Self> {
        merge_defaults(stored.unwrap_or_default())
    }

    /// Order by the explicit `order` field; records without one keep their
    /// relative position at the end. The sort is stable.
    fn reconcile(records: Vec<Self>) -> Vec<Self> {
        let mut links = records;
        links.sort_by_key(|link| link.order.unwrap_or(i64::MAX));
        links
    }
}

impl SyncEntity for Note {
    const CACHE_KEY: &'static str = keys::NOTES;
    const LOCAL_ID_PREFIX: &'static str = "note-";
    const INSERT_POSITION: InsertPosition = InsertPosition::Front;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

impl SyncEntity for Event {
    const CACHE_KEY: &'static str = keys::EVENTS;
    const LOCAL_ID_PREFIX: &'static str = "event-";
    const INSERT_POSITION: InsertPosition = InsertPosition::Front;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

enum WriteOp {
    Insert,
    Update,
    Remove,
}

struct Session {
    user: Option<UserId>,
    poll: Option<JoinHandle<()>>,
}

/// Synchronized list of one entity type.
pub struct SyncCore<E: SyncEntity> {
    cache: EntityCache,
    remote: Arc<dyn RemoteCollection<E>>,
    config: RemoteConfig,
    list: Arc<watch::Sender<Vec<E>>>,
    session: Mutex<Session>,
    writes: Mutex<Vec<JoinHandle<()>>>,
}

impl<E: SyncEntity> SyncCore<E> {
    #[must_use]
    pub fn new(
        cache: EntityCache,
        remote: Arc<dyn RemoteCollection<E>>,
        config: RemoteConfig,
    ) -> Self {
        let (list, _) = watch::channel(Vec::new());
        Self {
            cache,
            remote,
            config,
            list: Arc::new(list),
            session: Mutex::new(Session {
                user: None,
                poll: None,
            }),
            writes: Mutex::new(Vec::new()),
        }
    }

    /// Load the cached list and publish it. Runs before any remote traffic
    /// so the workspace never waits on the network.
    pub fn hydrate(&self) {
        let records = E::reconcile(E::hydrate(self.cache.load(E::CACHE_KEY)));
        persist(&self.cache, &records);
        self.list.send_replace(records);
    }

    /// Bind the list to a user's remote collection and start the pull
    /// subscription. Without remote configuration this is a no-op and the
    /// workspace stays local-only. Re-attaching the same user keeps the
    /// existing subscription; a different user replaces it.
    pub async fn attach(&self, user: UserId) {
        if !self.config.is_configured() {
            tracing::debug!(key = E::CACHE_KEY, "remote not configured, staying local-only");
            return;
        }

        let mut session = self.session.lock().await;
        if session.user.as_ref() == Some(&user) {
            return;
        }
        if let Some(poll) = session.poll.take() {
            poll.abort();
        }
        session.user = Some(user.clone());

        let remote = Arc::clone(&self.remote);
        let cache = self.cache.clone();
        let list = Arc::clone(&self.list);
        let interval = self.config.sync_interval;
        session.poll = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                match remote.fetch(&user).await {
                    Ok(records) => apply_records(&cache, &list, records),
                    Err(error) => {
                        tracing::warn!(key = E::CACHE_KEY, %error, "remote fetch failed");
                    }
                }
            }
        }));
        tracing::info!(key = E::CACHE_KEY, "attached remote subscription");
    }

    /// Apply a remote emission: a non-empty list replaces the current one
    /// wholesale, an empty list is ignored.
    pub fn apply_remote(&self, records: Vec<E>) {
        apply_records(&self.cache, &self.list, records);
    }

    /// Pull once from the remote collection and apply the result. Returns
    /// `false` when no user is attached.
    pub async fn refresh(&self) -> Result<bool> {
        let user = self.session.lock().await.user.clone();
        let Some(user) = user else {
            return Ok(false);
        };
        let records = self.remote.fetch(&user).await?;
        self.apply_remote(records);
        Ok(true)
    }

    /// Add a record to the list under a fresh local id and queue a remote
    /// insert. Returns the record as stored.
    pub async fn insert(&self, mut entity: E) -> E {
        entity.set_id(local_id(E::LOCAL_ID_PREFIX));
        let stored = entity.clone();
        self.list.send_modify(|records| match E::INSERT_POSITION {
            InsertPosition::Front => records.insert(0, entity),
            InsertPosition::Back => records.push(entity),
        });
        self.persist_current();
        self.queue_write(WriteOp::Insert, stored.clone()).await;
        stored
    }

    /// Patch the record with the given id in place and queue a remote
    /// update. Returns the patched record, or `None` when the id is not in
    /// the list.
    pub async fn update(&self, id: &str, patch: impl FnOnce(&mut E)) -> Option<E> {
        let mut updated = None;
        self.list.send_if_modified(|records| {
            if let Some(record) = records.iter_mut().find(|record| record.id() == id) {
                patch(record);
                updated = Some(record.clone());
                true
            } else {
                false
            }
        });
        let updated = updated?;
        self.persist_current();
        self.queue_write(WriteOp::Update, updated.clone()).await;
        Some(updated)
    }

    /// Remove the record with the given id and queue a remote delete.
    /// Returns the removed record, or `None` when the id is not in the
    /// list.
    pub async fn remove(&self, id: &str) -> Option<E> {
        let mut removed = None;
        self.list.send_if_modified(|records| {
            match records.iter().position(|record| record.id() == id) {
                Some(index) => {
                    removed = Some(records.remove(index));
                    true
                }
                None => false,
            }
        });
        let removed = removed?;
        self.persist_current();
        self.queue_write(WriteOp::Remove, removed.clone()).await;
        Some(removed)
    }

    /// Replace the whole list locally. Used by reorders and default
    /// resets; call [`SyncCore::push_all`] afterwards to mirror the result
    /// upstream.
    pub fn replace_all(&self, records: Vec<E>) {
        let records = E::reconcile(records);
        persist(&self.cache, &records);
        self.list.send_replace(records);
    }

    /// Queue a remote update for every record currently in the list.
    pub async fn push_all(&self) {
        for record in self.current() {
            self.queue_write(WriteOp::Update, record).await;
        }
    }

    /// Wait for queued remote writes to settle. Call before process exit.
    pub async fn flush(&self) {
        let handles: Vec<_> = self.writes.lock().await.drain(..).collect();
        for handle in handles {
            if let Err(error) = handle.await {
                tracing::warn!(%error, "remote write task failed");
            }
        }
    }

    /// Subscribe to list emissions.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<E>> {
        self.list.subscribe()
    }

    /// The current list.
    #[must_use]
    pub fn current(&self) -> Vec<E> {
        self.list.borrow().clone()
    }

    fn persist_current(&self) {
        let records = self.list.borrow().clone();
        persist(&self.cache, &records);
    }

    async fn queue_write(&self, op: WriteOp, entity: E) {
        let user = self.session.lock().await.user.clone();
        let Some(user) = user else {
            return;
        };

        let remote = Arc::clone(&self.remote);
        let handle = tokio::spawn(async move {
            let result = match op {
                WriteOp::Insert => remote.push_insert(&user, &entity).await,
                WriteOp::Update => remote.push_update(&user, &entity).await,
                WriteOp::Remove => remote.push_remove(&user, &entity).await,
            };
            if let Err(error) = result {
                tracing::warn!(key = E::CACHE_KEY, %error, "remote write dropped");
            }
        });

        let mut writes = self.writes.lock().await;
        writes.retain(|write| !write.is_finished());
        writes.push(handle);
    }
}

fn apply_records<E: SyncEntity>(
    cache: &EntityCache,
    list: &watch::Sender<Vec<E>>,
    records: Vec<E>,
) {
    if records.is_empty() {
        tracing::debug!(key = E::CACHE_KEY, "ignoring empty remote emission");
        return;
    }
    let records = E::reconcile(records);
    persist(cache, &records);
    list.send_replace(records);
}

fn persist<E: SyncEntity>(cache: &EntityCache, records: &[E]) {
    if let Err(error) = cache.save(E::CACHE_KEY, records) {
        tracing::warn!(key = E::CACHE_KEY, %error, "failed to persist list");
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use crate::remote::{LinkCollection, MemoryRemoteStore, NoteCollection, RemoteStore};
    use crate::store::MemoryStateStore;

    use super::*;

    fn memory_cache() -> EntityCache {
        EntityCache::new(Arc::new(MemoryStateStore::new()))
    }

    fn configured() -> RemoteConfig {
        RemoteConfig::new("https://workspace.example.com")
            .with_sync_interval(Duration::from_secs(3600))
    }

    fn owner() -> UserId {
        UserId::new("user-test")
    }

    fn note_core(
        cache: &EntityCache,
        remote: &Arc<MemoryRemoteStore>,
        config: RemoteConfig,
    ) -> SyncCore<Note> {
        let store: Arc<dyn RemoteStore> = Arc::clone(remote) as Arc<dyn RemoteStore>;
        SyncCore::new(cache.clone(), Arc::new(NoteCollection::new(store)), config)
    }

    fn link_core(
        cache: &EntityCache,
        remote: &Arc<MemoryRemoteStore>,
        config: RemoteConfig,
    ) -> SyncCore<Link> {
        let store: Arc<dyn RemoteStore> = Arc::clone(remote) as Arc<dyn RemoteStore>;
        SyncCore::new(cache.clone(), Arc::new(LinkCollection::new(store)), config)
    }

    fn link(id: &str, name: &str, pinned: bool, order: Option<i64>) -> Link {
        Link {
            id: id.to_string(),
            name: name.to_string(),
            url: format!("https://{}.example.com", id),
            pinned,
            order,
        }
    }

    #[tokio::test]
    async fn test_hydrate_publishes_cached_notes() {
        let cache = memory_cache();
        cache
            .save(
                keys::NOTES,
                &[Note::new("First", "", ""), Note::new("Second", "", "")],
            )
            .unwrap();
        let core = note_core(&cache, &Arc::new(MemoryRemoteStore::new()), RemoteConfig::default());

        core.hydrate();

        let notes = core.current();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].title, "First");
    }

    #[tokio::test]
    async fn test_hydrate_empty_cache_installs_default_links() {
        let cache = memory_cache();
        let core = link_core(&cache, &Arc::new(MemoryRemoteStore::new()), RemoteConfig::default());

        core.hydrate();

        let links = core.current();
        assert!(links.iter().any(|link| link.id == "youtube"));
        assert!(links.iter().any(|link| link.id == "gmail"));
        assert!(links.len() >= 16);
        // The merged list is written back so the next start skips the merge.
        let cached: Vec<Link> = cache.load(keys::LINKS).unwrap();
        assert_eq!(cached.len(), links.len());
    }

    #[tokio::test]
    async fn test_empty_remote_emission_is_ignored() {
        let cache = memory_cache();
        cache.save(keys::NOTES, &[Note::new("Keep me", "", "")]).unwrap();
        let core = note_core(&cache, &Arc::new(MemoryRemoteStore::new()), RemoteConfig::default());
        core.hydrate();

        core.apply_remote(Vec::new());

        assert_eq!(core.current().len(), 1);
        assert_eq!(core.current()[0].title, "Keep me");
    }

    #[tokio::test]
    async fn test_remote_emission_replaces_wholesale() {
        let cache = memory_cache();
        cache
            .save(
                keys::NOTES,
                &[Note::new("Old A", "", ""), Note::new("Old B", "", "")],
            )
            .unwrap();
        let core = note_core(&cache, &Arc::new(MemoryRemoteStore::new()), RemoteConfig::default());
        core.hydrate();

        let mut incoming = Note::new("Fresh", "", "");
        incoming.id = "rec-1".to_string();
        core.apply_remote(vec![incoming]);

        let notes = core.current();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id, "rec-1");
        let cached: Vec<Note> = cache.load(keys::NOTES).unwrap();
        assert_eq!(cached.len(), 1);
    }

    #[tokio::test]
    async fn test_link_reconcile_sorts_by_order() {
        let cache = memory_cache();
        let core = link_core(&cache, &Arc::new(MemoryRemoteStore::new()), RemoteConfig::default());

        core.apply_remote(vec![
            link("a", "A", false, Some(2)),
            link("b", "B", true, Some(5)),
            link("c", "C", false, Some(1)),
        ]);

        let links = core.current();
        let ids: Vec<&str> = links.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[tokio::test]
    async fn test_link_reconcile_keeps_unordered_at_back() {
        let cache = memory_cache();
        let core = link_core(&cache, &Arc::new(MemoryRemoteStore::new()), RemoteConfig::default());

        core.apply_remote(vec![
            link("x", "X", false, None),
            link("a", "A", false, Some(1)),
            link("y", "Y", false, None),
        ]);

        let links = core.current();
        let ids: Vec<&str> = links.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "x", "y"]);
    }

    #[tokio::test]
    async fn test_insert_positions_notes_first_links_last() {
        let cache = memory_cache();
        let remote = Arc::new(MemoryRemoteStore::new());
        let notes = note_core(&cache, &remote, RemoteConfig::default());
        notes.hydrate();
        notes.insert(Note::new("First", "", "")).await;
        notes.insert(Note::new("Second", "", "")).await;
        assert_eq!(notes.current()[0].title, "Second");

        let links = link_core(&cache, &remote, RemoteConfig::default());
        links.hydrate();
        let added = links
            .insert(Link::new("Example", "https://example.com"))
            .await;
        assert!(added.id.starts_with("link-"));
        assert_eq!(links.current().last().map(|l| l.id.clone()), Some(added.id));
    }

    #[tokio::test]
    async fn test_update_patches_and_persists() {
        let cache = memory_cache();
        let core = note_core(&cache, &Arc::new(MemoryRemoteStore::new()), RemoteConfig::default());
        core.hydrate();
        let note = core.insert(Note::new("Draft", "", "")).await;

        let updated = core
            .update(&note.id, |record| record.title = "Final".to_string())
            .await;
        assert_eq!(updated.map(|n| n.title), Some("Final".to_string()));

        let cached: Vec<Note> = cache.load(keys::NOTES).unwrap();
        assert_eq!(cached[0].title, "Final");
    }

    #[tokio::test]
    async fn test_update_unknown_id_returns_none() {
        let cache = memory_cache();
        let core = note_core(&cache, &Arc::new(MemoryRemoteStore::new()), RemoteConfig::default());
        core.hydrate();

        let updated = core.update("rec-404", |record| record.title.clear()).await;
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn test_remove_returns_removed_record() {
        let cache = memory_cache();
        let core = note_core(&cache, &Arc::new(MemoryRemoteStore::new()), RemoteConfig::default());
        core.hydrate();
        let note = core.insert(Note::new("Gone soon", "", "")).await;

        let removed = core.remove(&note.id).await;
        assert_eq!(removed.map(|n| n.id), Some(note.id));
        assert!(core.current().is_empty());
        assert!(core.remove("rec-404").await.is_none());
    }

    #[tokio::test]
    async fn test_unconfigured_attach_never_touches_remote() {
        let cache = memory_cache();
        let remote = Arc::new(MemoryRemoteStore::new());
        let core = note_core(&cache, &remote, RemoteConfig::default());
        core.hydrate();

        core.attach(owner()).await;
        core.insert(Note::new("Local only", "", "")).await;
        core.flush().await;

        assert!(remote.list_notes(&owner()).await.unwrap().is_empty());
        assert_eq!(core.current().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_attach_pulls_remote_list() {
        let cache = memory_cache();
        let remote = Arc::new(MemoryRemoteStore::new());
        remote
            .add_note(&owner(), &Note::new("From remote", "", ""))
            .await
            .unwrap();
        let core = note_core(&cache, &remote, configured());
        core.hydrate();

        core.attach(owner()).await;
        tokio::time::sleep(Duration::from_millis(5)).await;

        let notes = core.current();
        assert_eq!(notes.len(), 1);
        assert!(notes[0].id.starts_with("rec-"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_picks_up_later_remote_changes() {
        let cache = memory_cache();
        let remote = Arc::new(MemoryRemoteStore::new());
        remote
            .add_note(&owner(), &Note::new("First", "", ""))
            .await
            .unwrap();
        let config =
            RemoteConfig::new("https://workspace.example.com").with_sync_interval(Duration::from_secs(30));
        let core = note_core(&cache, &remote, config);
        core.hydrate();
        core.attach(owner()).await;
        tokio::time::sleep(Duration::from_millis(5)).await;
        assert_eq!(core.current().len(), 1);

        remote
            .add_note(&owner(), &Note::new("Second", "", ""))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_secs(31)).await;

        assert_eq!(core.current().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_insert_pushes_remote_write() {
        let cache = memory_cache();
        let remote = Arc::new(MemoryRemoteStore::new());
        let core = note_core(&cache, &remote, configured());
        core.hydrate();
        core.attach(owner()).await;

        let note = core.insert(Note::new("Synced", "", "")).await;
        core.flush().await;

        let stored = remote.list_notes(&owner()).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].title, "Synced");
        // The local record keeps its synthetic id until the next pull.
        assert!(note.id.starts_with("note-"));
        assert!(stored[0].id.starts_with("rec-"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_local_note_update_skips_remote_write() {
        let cache = memory_cache();
        let remote = Arc::new(MemoryRemoteStore::new());
        let core = note_core(&cache, &remote, configured());
        core.hydrate();
        core.attach(owner()).await;

        let note = core.insert(Note::new("Original", "", "")).await;
        core.flush().await;
        core.update(&note.id, |record| record.title = "Patched".to_string())
            .await;
        core.flush().await;

        // The local record never got a remote id, so the update stays local.
        let stored = remote.list_notes(&owner()).await.unwrap();
        assert_eq!(stored[0].title, "Original");
        assert_eq!(core.current()[0].title, "Patched");
    }

    #[tokio::test(start_paused = true)]
    async fn test_remote_note_update_is_pushed() {
        let cache = memory_cache();
        let remote = Arc::new(MemoryRemoteStore::new());
        let record_id = remote
            .add_note(&owner(), &Note::new("Original", "", ""))
            .await
            .unwrap();
        let core = note_core(&cache, &remote, configured());
        core.hydrate();
        core.attach(owner()).await;
        tokio::time::sleep(Duration::from_millis(5)).await;

        core.update(&record_id, |record| record.title = "Patched".to_string())
            .await;
        core.flush().await;

        let stored = remote.list_notes(&owner()).await.unwrap();
        assert_eq!(stored[0].title, "Patched");
    }

    #[tokio::test(start_paused = true)]
    async fn test_link_writes_push_by_url_even_when_local() {
        let cache = memory_cache();
        let remote = Arc::new(MemoryRemoteStore::new());
        let core = link_core(&cache, &remote, configured());

        let added = core
            .insert(Link::new("Example", "https://example.com"))
            .await;
        core.update(&added.id, |record| record.pinned = true).await;
        core.flush().await;

        // Nothing is pushed before a user attaches.
        assert!(remote.list_links(&owner()).await.unwrap().is_empty());

        core.attach(owner()).await;
        core.update(&added.id, |record| record.pinned = false).await;
        core.update(&added.id, |record| record.pinned = true).await;
        core.flush().await;

        // Both writes go through despite the synthetic id, and the remote
        // collapses them into one record keyed by URL.
        let stored = remote.list_links(&owner()).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert!(stored[0].pinned);
    }

    #[tokio::test(start_paused = true)]
    async fn test_link_remove_deletes_by_url() {
        let cache = memory_cache();
        let remote = Arc::new(MemoryRemoteStore::new());
        let core = link_core(&cache, &remote, configured());
        core.attach(owner()).await;

        let added = core
            .insert(Link::new("Example", "https://example.com"))
            .await;
        core.flush().await;
        assert_eq!(remote.list_links(&owner()).await.unwrap().len(), 1);

        core.remove(&added.id).await;
        core.flush().await;
        assert!(remote.list_links(&owner()).await.unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_attach_switches_users() {
        let cache = memory_cache();
        let remote = Arc::new(MemoryRemoteStore::new());
        let core = note_core(&cache, &remote, configured());
        core.hydrate();

        let first = UserId::new("user-a");
        let second = UserId::new("user-b");
        core.attach(first.clone()).await;
        core.attach(first.clone()).await;
        core.insert(Note::new("For A", "", "")).await;
        core.flush().await;

        core.attach(second.clone()).await;
        core.insert(Note::new("For B", "", "")).await;
        core.flush().await;

        assert_eq!(remote.list_notes(&first).await.unwrap().len(), 1);
        let second_notes = remote.list_notes(&second).await.unwrap();
        assert_eq!(second_notes.len(), 1);
        assert_eq!(second_notes[0].title, "For B");
    }

    #[tokio::test(start_paused = true)]
    async fn test_replace_all_and_push_all() {
        let cache = memory_cache();
        let remote = Arc::new(MemoryRemoteStore::new());
        let core = link_core(&cache, &remote, configured());
        core.attach(owner()).await;

        core.replace_all(vec![
            link("a", "A", false, Some(1)),
            link("b", "B", false, Some(0)),
        ]);
        core.push_all().await;
        core.flush().await;

        let links = core.current();
        let ids: Vec<&str> = links.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(remote.list_links(&owner()).await.unwrap().len(), 2);
    }
}
