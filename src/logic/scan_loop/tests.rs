use std::collections::HashSet;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use super::*;
use crate::logic::ai_bridge::mock::MockClassifier;
use crate::logic::ai_bridge::{AiClassifierAdapter, AiJudgment, CircuitBreaker, ClassifierError, RemoteClassifier};
use crate::logic::cache::ResultCache;
use crate::logic::features::FileFeatureExtractor;
use crate::logic::threat::{Severity, SOURCE_OFFLINE};

fn safe_judgment() -> AiJudgment {
    AiJudgment { is_malware: false, confidence: 5, reason: "looks fine".to_string() }
}

fn pipeline(primary: &Arc<MockClassifier>) -> Arc<ClassificationPipeline> {
    let breaker = Arc::new(CircuitBreaker::new(Duration::from_secs(60)));
    let adapter = AiClassifierAdapter::new(Some(primary.clone() as Arc<dyn RemoteClassifier>), None, breaker);
    Arc::new(ClassificationPipeline::new(
        Arc::new(FileFeatureExtractor),
        adapter,
        Arc::new(ResultCache::new()),
    ))
}

fn config(root: &Path) -> SchedulerConfig {
    SchedulerConfig {
        target_dir: root.to_path_buf(),
        vault_dir: root.join("QUARANTINE_VAULT"),
        skip_names: SELF_REFERENTIAL_NAMES.iter().map(|s| s.to_string()).collect(),
        entry_delay: Duration::ZERO,
        scan_interval: Duration::from_millis(10),
        retry_delay: Duration::from_millis(10),
    }
}

fn names(snapshot: &ScanSnapshot) -> HashSet<String> {
    snapshot.activity_log.iter().map(|a| a.file.clone()).collect()
}

#[test]
fn test_sweep_direct_children_only() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    std::fs::write(root.join("evil.txt"), b"starting encryption of all files").unwrap();
    std::fs::write(root.join("run.sh"), b"echo hello").unwrap();
    std::fs::write(root.join(".env"), b"payload=1").unwrap();
    std::fs::create_dir(root.join("nested")).unwrap();
    std::fs::write(root.join("nested").join("deep.txt"), b"ransomware").unwrap();
    std::fs::create_dir(root.join("QUARANTINE_VAULT")).unwrap();
    std::fs::write(root.join("QUARANTINE_VAULT").join("old.exe.quarantined_1"), b"trojan").unwrap();

    let primary = MockClassifier::answering("primary", safe_judgment());
    let scheduler = ScanScheduler::new(config(root), pipeline(&primary));

    let snapshot = scheduler.sweep().unwrap();

    assert_eq!(names(&snapshot), HashSet::from(["evil.txt".to_string(), "run.sh".to_string()]));
    assert_eq!(snapshot.status, ScanStatus::Critical);
    assert_eq!(snapshot.issues.len(), 1);
    assert!(snapshot.issues[0].message.starts_with("[HIGH] THREAT: evil.txt"));
    assert_eq!(scheduler.blocked().list(), vec!["evil.txt".to_string()]);
    assert_eq!(primary.calls(), 1);
}

#[test]
fn test_blocked_set_is_idempotent_across_sweeps() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("miner.bin"), b"xmrig --donate-level 1").unwrap();

    let primary = MockClassifier::answering("primary", safe_judgment());
    let scheduler = ScanScheduler::new(config(dir.path()), pipeline(&primary));

    for _ in 0..3 {
        let snapshot = scheduler.run_once().unwrap();
        assert_eq!(snapshot.issues.len(), 1);
    }
    assert_eq!(scheduler.blocked().len(), 1);
}

#[test]
fn test_secure_when_nothing_dangerous() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.txt"), b"hello").unwrap();

    let primary = MockClassifier::answering("primary", safe_judgment());
    let scheduler = ScanScheduler::new(config(dir.path()), pipeline(&primary));

    let snapshot = scheduler.run_once().unwrap();
    assert_eq!(snapshot.status, ScanStatus::Secure);
    assert!(snapshot.issues.is_empty());
    assert_eq!(snapshot.activity_log[0].status, Severity::Safe);
    assert_eq!(snapshot.activity_log[0].source, "primary");
}

#[test]
fn test_open_breaker_skips_entries() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.txt"), b"hello").unwrap();
    std::fs::write(dir.path().join("b.txt"), b"ransomware note").unwrap();

    let primary = MockClassifier::answering("primary", safe_judgment());
    let pipeline = pipeline(&primary);
    pipeline.breaker().trip();
    let scheduler = ScanScheduler::new(config(dir.path()), pipeline);

    let snapshot = scheduler.sweep().unwrap();
    assert!(snapshot.activity_log.is_empty());
    assert_eq!(snapshot.status, ScanStatus::Secure);
    assert_eq!(primary.calls(), 0);
}

#[test]
fn test_trip_mid_sweep_skips_remaining_entries() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("one.txt"), b"first unknown").unwrap();
    std::fs::write(dir.path().join("two.txt"), b"second unknown").unwrap();
    std::fs::write(dir.path().join("three.txt"), b"third unknown").unwrap();

    let primary = MockClassifier::failing("primary", ClassifierError::RateLimited);
    let scheduler = ScanScheduler::new(config(dir.path()), pipeline(&primary));

    let snapshot = scheduler.sweep().unwrap();

    // The entry that tripped the breaker fails open, the rest wait for a later sweep
    assert_eq!(primary.calls(), 1);
    assert_eq!(snapshot.activity_log.len(), 1);
    assert_eq!(snapshot.activity_log[0].source, SOURCE_OFFLINE);
}

#[cfg(unix)]
#[test]
fn test_vanished_entry_is_omitted() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("ok.txt"), b"fine").unwrap();
    std::os::unix::fs::symlink(dir.path().join("gone.txt"), dir.path().join("dangling.txt")).unwrap();

    let primary = MockClassifier::answering("primary", safe_judgment());
    let scheduler = ScanScheduler::new(config(dir.path()), pipeline(&primary));

    let snapshot = scheduler.sweep().unwrap();
    assert_eq!(names(&snapshot), HashSet::from(["ok.txt".to_string()]));
}

#[cfg(unix)]
#[test]
fn test_fifo_entry_does_not_stall_sweep() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("ok.txt"), b"fine").unwrap();
    let status = std::process::Command::new("mkfifo").arg(dir.path().join("pipe")).status().unwrap();
    assert!(status.success());
    std::os::unix::fs::symlink(dir.path().join("pipe"), dir.path().join("pipe_link")).unwrap();

    let primary = MockClassifier::answering("primary", safe_judgment());
    let scheduler = ScanScheduler::new(config(dir.path()), pipeline(&primary));

    let (tx, rx) = std::sync::mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(scheduler.sweep().map(|s| names(&s)));
    });

    let swept = rx.recv_timeout(Duration::from_secs(3)).expect("sweep blocked on a FIFO").unwrap();
    assert_eq!(swept, HashSet::from(["ok.txt".to_string()]));
}

#[test]
fn test_listing_failure_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let primary = MockClassifier::answering("primary", safe_judgment());
    let scheduler = ScanScheduler::new(config(&dir.path().join("missing")), pipeline(&primary));

    assert!(matches!(scheduler.run_once(), Err(ScanError::Listing { .. })));
    // Nothing was published
    assert!(scheduler.reader().current().sweep_id.is_none());
}

#[test]
fn test_snapshot_never_mixes_sweeps() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().to_path_buf();
    let primary = MockClassifier::answering("primary", safe_judgment());
    let scheduler = ScanScheduler::new(config(&root), pipeline(&primary));
    let reader = scheduler.reader();

    let done = Arc::new(AtomicBool::new(false));
    let observer = {
        let done = done.clone();
        thread::spawn(move || {
            let mut observed = 0;
            while !done.load(Ordering::SeqCst) {
                let snapshot = reader.current();
                let generations: HashSet<&str> = snapshot
                    .activity_log
                    .iter()
                    .map(|a| a.file.split('_').next().unwrap_or(""))
                    .chain(snapshot.issues.iter().map(|i| {
                        let file = Path::new(&i.location).file_name().unwrap().to_str().unwrap();
                        file.split('_').next().unwrap_or("")
                    }))
                    .collect();
                assert!(generations.len() <= 1, "mixed sweeps: {:?}", generations);
                assert_eq!(snapshot.issues.len(), snapshot.activity_log.len());
                observed += 1;
            }
            observed
        })
    };

    for generation in 0..20 {
        for entry in std::fs::read_dir(&root).unwrap() {
            std::fs::remove_file(entry.unwrap().path()).unwrap();
        }
        for part in ["a", "b", "c"] {
            std::fs::write(root.join(format!("g{}_{}.txt", generation, part)), format!("trojan {}", part)).unwrap();
        }
        scheduler.run_once().unwrap();
    }

    done.store(true, Ordering::SeqCst);
    assert!(observer.join().unwrap() > 0);
}

#[test]
fn test_background_thread_publishes_and_stops() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.txt"), b"hello").unwrap();

    let primary = MockClassifier::answering("primary", safe_judgment());
    let mut handle = ScanScheduler::new(config(dir.path()), pipeline(&primary)).start();
    assert!(handle.is_running());

    let deadline = Instant::now() + Duration::from_secs(5);
    while handle.latest().sweep_id.is_none() && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(10));
    }
    assert!(handle.latest().sweep_id.is_some());

    handle.stop();
    assert!(!handle.is_running());
}
