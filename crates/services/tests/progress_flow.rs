use std::sync::Arc;

use academy_core::model::ModuleId;
use services::{AppServices, ProgressService};
use storage::repository::{InMemoryRepository, ProgressRepository, Storage};

#[tokio::test]
async fn learner_completes_and_resets_modules() {
    let services = AppServices::in_memory();
    let progress = services.progress();

    assert_eq!(progress.summary().await.unwrap().to_string(), "0/4");

    for module in ["smt", "ict", "priceAction", "indicators"] {
        progress.mark_module_complete(module).await.unwrap();
    }
    let summary = progress.summary().await.unwrap();
    assert!(summary.is_finished());

    progress.reset_module("priceAction").await.unwrap();
    let overview = progress.module_overview().await.unwrap();
    let incomplete: Vec<_> = overview
        .iter()
        .filter(|o| !o.completed)
        .map(|o| o.module.title)
        .collect();
    assert_eq!(incomplete, ["Price Action"]);
    assert_eq!(progress.summary().await.unwrap().to_string(), "3/4");
}

#[tokio::test]
async fn concurrent_marks_on_same_module_settle_complete() {
    let repo = InMemoryRepository::new();
    let svc = Arc::new(ProgressService::new(Arc::new(repo.clone())));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let svc = Arc::clone(&svc);
        handles.push(tokio::spawn(async move {
            svc.mark_module_complete("ict").await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let all = repo.list_progress().await.unwrap();
    assert_eq!(all.len(), 1);
    assert!(repo.get_progress(&ModuleId::new("ict").unwrap()).await.unwrap());
}

#[tokio::test]
async fn last_write_wins_for_sequential_calls() {
    let storage = Storage::in_memory();
    let svc = ProgressService::new(Arc::clone(&storage.progress));

    svc.mark_module_complete("smt").await.unwrap();
    svc.reset_module("smt").await.unwrap();
    svc.mark_module_complete("smt").await.unwrap();
    assert!(svc.is_module_complete("smt").await.unwrap());

    svc.reset_module("smt").await.unwrap();
    assert!(!svc.is_module_complete("smt").await.unwrap());
}
