//! Concurrent first-access behavior under each LoadPolicy.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use resourceful::{LoadPolicy, ManagerConfig, ResourceManager};

const THREADS: usize = 8;

fn slow_counting_manager(policy: LoadPolicy) -> (Arc<ResourceManager<u64, u64>>, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let config = ManagerConfig {
        load_policy: policy,
        ..ManagerConfig::default()
    };
    let manager = ResourceManager::<u64, u64>::with_config("slow", config);
    manager.configure(move |n: &u64| {
        counter.fetch_add(1, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(50));
        Some(*n)
    });
    manager.register("big", 7);
    (Arc::new(manager), calls)
}

fn hammer(manager: &Arc<ResourceManager<u64, u64>>) -> Vec<Arc<u64>> {
    let barrier = Arc::new(Barrier::new(THREADS));
    let workers: Vec<_> = (0..THREADS)
        .map(|_| {
            let manager = manager.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                manager.get("big").unwrap()
            })
        })
        .collect();
    workers.into_iter().map(|w| w.join().unwrap()).collect()
}

#[test]
fn default_policy_is_racy() {
    assert_eq!(ManagerConfig::default().load_policy, LoadPolicy::Racy);
    assert_eq!(LoadPolicy::parse("Exclusive"), Some(LoadPolicy::Exclusive));
    assert_eq!(LoadPolicy::parse("eager"), None);
}

#[test]
fn exclusive_policy_loads_once_and_shares_instance() {
    let (manager, calls) = slow_counting_manager(LoadPolicy::Exclusive);
    let results = hammer(&manager);

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(results.iter().all(|r| Arc::ptr_eq(r, &results[0])));
    assert_eq!(*results[0], 7);
}

#[test]
fn racy_policy_may_load_more_than_once_but_settles() {
    let (manager, calls) = slow_counting_manager(LoadPolicy::Racy);
    let results = hammer(&manager);

    let loads = calls.load(Ordering::SeqCst);
    assert!((1..=THREADS).contains(&loads));
    assert!(results.iter().all(|r| **r == 7));

    // Once settled, every later request is a cache hit.
    let settled = manager.get("big").unwrap();
    assert!(Arc::ptr_eq(&settled, &manager.get("big").unwrap()));
    assert_eq!(calls.load(Ordering::SeqCst), loads);
}

#[test]
fn exclusive_failures_are_not_cached() {
    let config = ManagerConfig {
        load_policy: LoadPolicy::Exclusive,
        ..ManagerConfig::default()
    };
    let manager = ResourceManager::<u64, i64>::with_config("strict", config);
    manager.configure(|n: &i64| u64::try_from(*n).ok());
    manager.register("neg", -1);

    assert!(manager.get("neg").is_err());
    assert_eq!(*manager.get_or("neg", 3).unwrap(), 3);
    assert!(!manager.is_cached("neg"));
}

fn exclusive_config() -> ManagerConfig {
    ManagerConfig {
        load_policy: LoadPolicy::Exclusive,
        ..ManagerConfig::default()
    }
}

#[test]
fn exclusive_failed_load_does_not_let_late_callers_load_in_parallel() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let manager = Arc::new(ResourceManager::<u64, u64>::with_config("flaky", exclusive_config()));
    // First call fails, every later one succeeds; each takes 100ms.
    manager.configure(move |n: &u64| {
        let call = counter.fetch_add(1, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(100));
        (call > 0).then_some(*n)
    });
    manager.register("table", 9);

    let spawn_get = |manager: &Arc<ResourceManager<u64, u64>>| {
        let manager = manager.clone();
        thread::spawn(move || manager.get("table"))
    };

    // A fails slowly, B queues behind it, C arrives while B is loading.
    let first = spawn_get(&manager);
    thread::sleep(Duration::from_millis(30));
    let second = spawn_get(&manager);
    thread::sleep(Duration::from_millis(120));
    let third = spawn_get(&manager);

    assert!(first.join().unwrap().is_err());
    let second = second.join().unwrap().unwrap();
    let third = third.join().unwrap().unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert!(Arc::ptr_eq(&second, &third));
    assert!(Arc::ptr_eq(&second, &manager.get("table").unwrap()));
}

#[test]
fn exclusive_load_finishing_after_evict_is_not_cached() {
    let started = Arc::new(Barrier::new(2));
    let release = Arc::new(Barrier::new(2));
    let (loader_started, loader_release) = (started.clone(), release.clone());

    let manager = Arc::new(ResourceManager::<u64, u64>::with_config("evicting", exclusive_config()));
    manager.configure(move |n: &u64| {
        loader_started.wait();
        loader_release.wait();
        Some(*n)
    });
    manager.register("table", 4);

    let loading = {
        let manager = manager.clone();
        thread::spawn(move || manager.get("table"))
    };

    started.wait();
    assert_eq!(manager.evict("table"), (None, Some(4)));
    release.wait();

    assert_eq!(*loading.join().unwrap().unwrap(), 4);
    assert!(!manager.is_cached("table"));
    assert_eq!(manager.cached_len(), 0);
}
