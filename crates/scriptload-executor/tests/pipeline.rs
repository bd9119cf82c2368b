//! End-to-end pipeline behaviour against a recording host.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use scriptload_core::{
    EntryState, LoadEvent, LoadObserver, LoadRequest, LoaderConfig, ResourceEntry, ResourceKind,
};
use scriptload_executor::{Loader, ResourceHost};

/// Records `start:<id>` / `end:<id>` around every attach and yields in
/// between, so interleaving between groups is observable. Identifiers in
/// `hanging` never complete.
#[derive(Default)]
struct RecordingHost {
    log: Mutex<Vec<String>>,
    failing: HashSet<String>,
    hanging: HashSet<String>,
    detached: Mutex<Vec<(ResourceKind, String)>>,
}

impl RecordingHost {
    fn failing(ids: &[&str]) -> Self {
        Self {
            failing: ids.iter().map(|id| id.to_string()).collect(),
            ..Self::default()
        }
    }

    fn hanging(mut self, ids: &[&str]) -> Self {
        self.hanging = ids.iter().map(|id| id.to_string()).collect();
        self
    }

    fn log(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    fn starts(&self) -> Vec<String> {
        self.log()
            .into_iter()
            .filter_map(|e| e.strip_prefix("start:").map(String::from))
            .collect()
    }

    fn position(&self, entry: &str) -> usize {
        self.log()
            .iter()
            .position(|e| e == entry)
            .unwrap_or_else(|| panic!("{} not in log", entry))
    }
}

#[async_trait]
impl ResourceHost for RecordingHost {
    async fn attach(&self, _kind: ResourceKind, locator: &str) -> anyhow::Result<String> {
        let id = locator.trim_end_matches(".js").to_string();
        self.log.lock().unwrap().push(format!("start:{}", id));
        if self.hanging.contains(&id) {
            std::future::pending::<()>().await;
        }
        tokio::task::yield_now().await;
        self.log.lock().unwrap().push(format!("end:{}", id));

        if self.failing.contains(&id) {
            anyhow::bail!("failed to fetch {}", id);
        }
        Ok(format!("{} ready", id))
    }

    fn detach(&self, kind: ResourceKind, entry: &ResourceEntry) {
        self.detached
            .lock()
            .unwrap()
            .push((kind, entry.identifier.clone()));
    }
}

#[derive(Default)]
struct EventLog(Mutex<Vec<String>>);

impl EventLog {
    fn events(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    fn progress(&self, kind: ResourceKind) -> Vec<String> {
        let prefix = format!("progress:{}:", kind);
        self.events()
            .into_iter()
            .filter(|e| e.starts_with(&prefix))
            .collect()
    }
}

impl LoadObserver for EventLog {
    fn on_event(&self, event: &LoadEvent<'_>) {
        let line = match event {
            LoadEvent::Init { request } => format!("init:{}", request.total_resources()),
            LoadEvent::Progress {
                kind,
                identifier,
                completed,
                total,
            } => format!("progress:{}:{}:{}/{}", kind, identifier, completed, total),
            LoadEvent::Finish { .. } => "finish".to_string(),
            LoadEvent::Failed { error } => format!("failed:{}", error.identifier()),
        };
        self.0.lock().unwrap().push(line);
    }
}

fn loader(host: RecordingHost) -> (Loader<RecordingHost>, Arc<EventLog>) {
    let events = Arc::new(EventLog::default());
    let loader = Loader::new(LoaderConfig::new("").with_logger(true), host)
        .with_observer(events.clone());
    (loader, events)
}

#[tokio::test]
async fn group_loads_strictly_in_order() {
    let (mut loader, events) = loader(RecordingHost::default());
    let request = LoadRequest::new().with_statics(["x", "y"]);

    loader.init(&request).await.unwrap();

    let host = loader.host();
    assert!(host.position("start:y") > host.position("end:x"));
    assert_eq!(
        events.progress(ResourceKind::Static),
        vec!["progress:static:x:1/2", "progress:static:y:2/2"]
    );
}

#[tokio::test]
async fn group_fails_fast() {
    let (mut loader, events) = loader(RecordingHost::failing(&["b"]));
    let request = LoadRequest::new().with_statics(["a", "b", "c"]);

    let err = loader.init(&request).await.unwrap_err();

    assert!(err.is_aborted());
    assert_eq!(err.identifier(), "b");
    assert_eq!(loader.host().starts(), vec!["a", "b"]);
    assert_eq!(events.progress(ResourceKind::Static), vec!["progress:static:a:1/3"]);
    assert!(!loader.session().is_finished());
}

#[tokio::test]
async fn failed_static_group_never_loads_main() {
    let (mut loader, events) = loader(RecordingHost::failing(&["s1"]));
    let request = LoadRequest::new().with_statics(["s1"]).with_main("index");

    let err = loader.init(&request).await.unwrap_err();

    assert_eq!(err.identifier(), "s1");
    assert!(!loader.host().starts().contains(&"index".to_string()));
    assert_eq!(events.events().last().unwrap(), "failed:s1");
    assert!(!events.events().contains(&"finish".to_string()));
}

#[tokio::test]
async fn failed_dynamic_group_never_loads_main() {
    let (mut loader, _events) = loader(RecordingHost::failing(&["d2"]));
    let request = LoadRequest::new()
        .with_statics(["s1"])
        .with_dynamics(["d1", "d2"])
        .with_main("index");

    let err = loader.init(&request).await.unwrap_err();

    assert_eq!(err.identifier(), "d2");
    assert_eq!(loader.host().starts().iter().filter(|s| *s == "index").count(), 0);
}

#[tokio::test]
async fn first_group_failure_aborts_without_waiting() {
    let (mut loader, _events) = loader(RecordingHost::failing(&["s1"]));
    let request = LoadRequest::new()
        .with_statics(["s1"])
        .with_dynamics(["d1", "d2"]);

    let err = loader.init(&request).await.unwrap_err();

    assert_eq!(err.identifier(), "s1");
    let dynamics = loader.session().dynamics();
    assert_eq!(dynamics.identifiers(), vec!["d1"]);
    assert_eq!(dynamics.get(0).unwrap().state, EntryState::Pending);
    assert!(!loader.host().starts().contains(&"d2".to_string()));
}

#[tokio::test]
async fn failure_surfaces_while_sibling_group_hangs() {
    let host = RecordingHost::failing(&["bad"]).hanging(&["hang"]);
    let (mut loader, events) = loader(host);
    let request = LoadRequest::new()
        .with_statics(["hang"])
        .with_dynamics(["bad"])
        .with_main("index");

    let err = tokio::time::timeout(Duration::from_millis(500), loader.init(&request))
        .await
        .expect("init should fail without waiting on the hung group")
        .unwrap_err();

    assert_eq!(err.identifier(), "bad");
    assert!(err.is_aborted());
    assert_eq!(
        loader.session().statics().get(0).unwrap().state,
        EntryState::Pending
    );
    assert!(!loader.host().starts().contains(&"index".to_string()));
    assert_eq!(events.events().last().unwrap(), "failed:bad");
}

#[tokio::test]
async fn static_failure_takes_precedence() {
    let (mut loader, _events) = loader(RecordingHost::failing(&["s1", "d1"]));
    let request = LoadRequest::new().with_statics(["s1"]).with_dynamics(["d1"]);

    let err = loader.init(&request).await.unwrap_err();
    assert_eq!(err.identifier(), "s1");
}

#[tokio::test]
async fn groups_overlap_in_time() {
    let (mut loader, _events) = loader(RecordingHost::default());
    let request = LoadRequest::new().with_statics(["s1"]).with_dynamics(["d1"]);

    loader.init(&request).await.unwrap();

    let host = loader.host();
    assert!(host.position("start:d1") < host.position("end:s1"));
}

#[tokio::test]
async fn main_starts_after_both_groups() {
    let (mut loader, _events) = loader(RecordingHost::default());
    let request = LoadRequest::new()
        .with_statics(["s1", "s2"])
        .with_dynamics(["d1"])
        .with_main("index");

    loader.init(&request).await.unwrap();

    let host = loader.host();
    let main_start = host.position("start:index");
    assert!(main_start > host.position("end:s2"));
    assert!(main_start > host.position("end:d1"));
}

#[tokio::test]
async fn only_main_is_a_single_load() {
    let (mut loader, events) = loader(RecordingHost::default());
    let request = LoadRequest::new().with_main("index");

    let report = loader.init(&request).await.unwrap();

    assert_eq!(loader.host().starts(), vec!["index"]);
    assert_eq!(report.main.unwrap().message, "index ready");
    assert_eq!(events.events(), vec!["init:1", "finish"]);
}

#[tokio::test]
async fn finish_fires_without_main() {
    let (mut loader, events) = loader(RecordingHost::default());
    let request = LoadRequest::new().with_dynamics(["d1"]);

    let report = loader.init(&request).await.unwrap();

    assert!(report.main.is_none());
    assert_eq!(events.events().last().unwrap(), "finish");
    assert!(loader.session().is_finished());
}

#[tokio::test]
async fn empty_request_finishes_immediately() {
    let (mut loader, events) = loader(RecordingHost::default());

    let report = loader.init(&LoadRequest::new()).await.unwrap();

    assert_eq!(report.total_loaded(), 0);
    assert!(loader.host().log().is_empty());
    assert_eq!(events.events(), vec!["init:0", "finish"]);
}

#[tokio::test]
async fn main_failure_is_reported() {
    let (mut loader, events) = loader(RecordingHost::failing(&["index"]));
    let request = LoadRequest::new().with_statics(["s1"]).with_main("index");

    let err = loader.init(&request).await.unwrap_err();

    assert!(!err.is_aborted());
    assert_eq!(err.identifier(), "index");
    assert_eq!(events.events().last().unwrap(), "failed:index");
}

#[tokio::test]
async fn reset_is_idempotent_and_spares_statics() {
    let (mut loader, _events) = loader(RecordingHost::default());
    let request = LoadRequest::new()
        .with_statics(["s1"])
        .with_dynamics(["d1", "d2"]);
    loader.init(&request).await.unwrap();

    loader.reset();
    assert!(loader.session().dynamics().is_empty());
    assert_eq!(loader.session().statics().identifiers(), vec!["s1"]);

    loader.reset();
    assert!(loader.session().dynamics().is_empty());
    assert_eq!(loader.session().statics().identifiers(), vec!["s1"]);

    let detached = loader.host().detached.lock().unwrap().clone();
    assert_eq!(
        detached,
        vec![
            (ResourceKind::Dynamic, "d1".to_string()),
            (ResourceKind::Dynamic, "d2".to_string()),
        ]
    );
}

#[tokio::test]
async fn reset_then_swap_dynamics() {
    let (mut loader, _events) = loader(RecordingHost::default());
    loader
        .init(&LoadRequest::new().with_dynamics(["page-a"]))
        .await
        .unwrap();

    loader.reset();
    loader
        .init(&LoadRequest::new().with_dynamics(["page-b"]))
        .await
        .unwrap();

    assert_eq!(loader.session().dynamics().identifiers(), vec!["page-b"]);
}

#[tokio::test]
async fn progress_accounts_for_whole_group() {
    let (mut loader, events) = loader(RecordingHost::default());
    let ids = ["a", "b", "c", "d", "e"];
    loader
        .init(&LoadRequest::new().with_dynamics(ids))
        .await
        .unwrap();

    let progress = events.progress(ResourceKind::Dynamic);
    assert_eq!(progress.len(), ids.len());
    assert_eq!(progress.last().unwrap(), "progress:dynamic:e:5/5");
}

#[tokio::test]
async fn telemetry_is_silent_without_logger() {
    let events = Arc::new(EventLog::default());
    let mut loader = Loader::new(LoaderConfig::new(""), RecordingHost::default())
        .with_observer(events.clone());

    loader
        .init(&LoadRequest::new().with_statics(["s1"]).with_main("index"))
        .await
        .unwrap();

    assert!(events.events().is_empty());
}

#[tokio::test]
async fn elapsed_is_measured() {
    struct SlowHost;

    #[async_trait]
    impl ResourceHost for SlowHost {
        async fn attach(&self, _kind: ResourceKind, _locator: &str) -> anyhow::Result<String> {
            tokio::time::sleep(Duration::from_millis(10)).await;
            Ok(String::new())
        }
    }

    let mut loader = Loader::new(LoaderConfig::default(), SlowHost);
    let report = loader
        .init(&LoadRequest::new().with_statics(["a"]).with_main("b"))
        .await
        .unwrap();

    assert!(report.elapsed >= Duration::from_millis(20));
    assert!(report.main.unwrap().elapsed >= Duration::from_millis(10));
}

#[tokio::test]
async fn load_after_failure_restarts_timing() {
    let (mut loader, _events) = loader(RecordingHost::failing(&["bad"]));

    loader
        .init(&LoadRequest::new().with_statics(["bad"]))
        .await
        .unwrap_err();
    tokio::time::sleep(Duration::from_millis(50)).await;

    let report = loader
        .load(&LoadRequest::new().with_dynamics(["page"]))
        .await
        .unwrap();
    assert!(report.elapsed < Duration::from_millis(50));
}
