use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use academy_core::model::{ModuleId, ModuleProgress};
use async_trait::async_trait;
use client::{ClientError, ProgressClient, ProgressTransport};

#[derive(Default)]
struct FakeTransport {
    store: Mutex<BTreeMap<ModuleId, bool>>,
    list_calls: AtomicUsize,
    get_calls: AtomicUsize,
    offline: AtomicBool,
}

impl FakeTransport {
    fn fail_if_offline(&self) -> Result<(), ClientError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(ClientError::Status {
                status: 503,
                message: "offline".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ProgressTransport for FakeTransport {
    async fn get_all_module_progress(&self) -> Result<Vec<ModuleProgress>, ClientError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        self.fail_if_offline()?;
        let store = self.store.lock().unwrap();
        Ok(store
            .iter()
            .map(|(id, done)| ModuleProgress::new(id.clone(), *done))
            .collect())
    }

    async fn is_module_complete(&self, id: &ModuleId) -> Result<bool, ClientError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        self.fail_if_offline()?;
        Ok(self.store.lock().unwrap().get(id).copied().unwrap_or(false))
    }

    async fn mark_module_complete(&self, id: &ModuleId) -> Result<(), ClientError> {
        self.fail_if_offline()?;
        self.store.lock().unwrap().insert(id.clone(), true);
        Ok(())
    }

    async fn reset_module(&self, id: &ModuleId) -> Result<(), ClientError> {
        self.fail_if_offline()?;
        self.store.lock().unwrap().remove(id);
        Ok(())
    }
}

fn id(raw: &str) -> ModuleId {
    ModuleId::new(raw).unwrap()
}

fn setup() -> (Arc<FakeTransport>, ProgressClient<FakeTransport>) {
    let transport = Arc::new(FakeTransport::default());
    let client = ProgressClient::new(Arc::clone(&transport));
    (transport, client)
}

#[tokio::test]
async fn cached_reads_skip_the_transport() {
    let (transport, client) = setup();

    assert!(client.all_module_progress().await.unwrap().is_empty());
    assert!(client.all_module_progress().await.unwrap().is_empty());
    assert_eq!(transport.list_calls.load(Ordering::SeqCst), 1);

    assert!(!client.is_module_complete(&id("smt")).await.unwrap());
    assert!(!client.is_module_complete(&id("smt")).await.unwrap());
    assert!(!client.is_module_complete(&id("ict")).await.unwrap());
    assert_eq!(transport.get_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn concurrent_identical_queries_share_one_call() {
    let (transport, client) = setup();

    let (a, b, c) = tokio::join!(
        client.all_module_progress(),
        client.all_module_progress(),
        client.all_module_progress()
    );
    assert!(a.is_ok() && b.is_ok() && c.is_ok());
    assert_eq!(transport.list_calls.load(Ordering::SeqCst), 1);

    let smt = id("smt");
    let (x, y) = tokio::join!(
        client.is_module_complete(&smt),
        client.is_module_complete(&smt)
    );
    assert!(!x.unwrap() && !y.unwrap());
    assert_eq!(transport.get_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn mutations_invalidate_cached_reads() {
    let (transport, client) = setup();
    let smt = id("smt");

    assert!(!client.is_module_complete(&smt).await.unwrap());
    assert!(client.all_module_progress().await.unwrap().is_empty());

    client.mark_module_complete(&smt).await.unwrap();
    assert!(client.is_module_complete(&smt).await.unwrap());
    let all = client.all_module_progress().await.unwrap();
    assert_eq!(all, vec![ModuleProgress::completed(smt.clone())]);
    assert_eq!(transport.list_calls.load(Ordering::SeqCst), 2);
    assert_eq!(transport.get_calls.load(Ordering::SeqCst), 2);

    client.reset_module(&smt).await.unwrap();
    assert!(!client.is_module_complete(&smt).await.unwrap());
    assert!(client.all_module_progress().await.unwrap().is_empty());
}

#[tokio::test]
async fn failed_reads_are_not_cached() {
    let (transport, client) = setup();
    transport.offline.store(true, Ordering::SeqCst);

    let err = client.all_module_progress().await.unwrap_err();
    assert!(matches!(err, ClientError::Status { status: 503, .. }));
    assert!(!err.is_rejected());

    transport.offline.store(false, Ordering::SeqCst);
    assert!(client.all_module_progress().await.is_ok());
    assert_eq!(transport.list_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn failed_mutation_keeps_cache() {
    let (transport, client) = setup();
    let ict = id("ict");
    assert!(!client.is_module_complete(&ict).await.unwrap());

    transport.offline.store(true, Ordering::SeqCst);
    assert!(client.mark_module_complete(&ict).await.is_err());
    transport.offline.store(false, Ordering::SeqCst);

    assert!(!client.is_module_complete(&ict).await.unwrap());
    assert_eq!(transport.get_calls.load(Ordering::SeqCst), 1);

    client.mark_module_complete(&ict).await.unwrap();
    assert!(client.is_module_complete(&ict).await.unwrap());
}

#[tokio::test]
async fn read_failure_shows_neutral_state() {
    let (transport, client) = setup();
    transport
        .store
        .lock()
        .unwrap()
        .insert(id("indicators"), true);
    transport.offline.store(true, Ordering::SeqCst);

    assert!(!client.is_module_complete_or_default(&id("indicators")).await);

    transport.offline.store(false, Ordering::SeqCst);
    assert!(client.is_module_complete_or_default(&id("indicators")).await);
}

#[tokio::test]
async fn works_behind_a_trait_object() {
    let transport: Arc<dyn ProgressTransport> = Arc::new(FakeTransport::default());
    let client = ProgressClient::new(transport);
    client.mark_module_complete(&id("priceAction")).await.unwrap();
    assert!(client.is_module_complete(&id("priceAction")).await.unwrap());
}
