use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use warren::prelude::*;

// --- Fixtures ---

trait Logger: Send + Sync {
    fn kind(&self) -> &'static str;
}

trait Counter: Send + Sync {
    fn next(&self) -> usize;
}

struct ConsoleLogger;
impl Logger for ConsoleLogger {
    fn kind(&self) -> &'static str {
        "console"
    }
}

// A more specific logger family: everything that is an `AuditLogger` is a `Logger`.
trait AuditLogger: Logger {
    fn trail(&self) -> Vec<String>;
}

struct JournalLogger;
impl Logger for JournalLogger {
    fn kind(&self) -> &'static str {
        "journal"
    }
}
impl AuditLogger for JournalLogger {
    fn trail(&self) -> Vec<String> {
        vec!["boot".to_string()]
    }
}

#[derive(Default)]
struct SimpleCounter {
    value: AtomicUsize,
}
impl Counter for SimpleCounter {
    fn next(&self) -> usize {
        self.value.fetch_add(1, Ordering::SeqCst)
    }
}

// Implements nothing the registry is asked for.
struct Orphan;

capability!(dyn Logger = [ConsoleLogger, JournalLogger]);
capability!(dyn AuditLogger = [JournalLogger]);
capability!(dyn Counter = [SimpleCounter]);

// --- Tests ---

#[test]
fn logger_counter_rebind_reset_scenario() {
    let registry = Registry::new();

    // Singleton logger: same instance twice.
    registry.bind::<dyn Logger, _>(|| ConsoleLogger, Lifecycle::Singleton);
    let first: Arc<dyn Logger> = registry.resolve();
    let second: Arc<dyn Logger> = registry.resolve();
    assert!(Arc::ptr_eq(&first, &second));

    // Transient counter: different instances.
    registry.bind::<dyn Counter, _>(SimpleCounter::default, Lifecycle::Transient);
    let c1: Arc<dyn Counter> = registry.resolve();
    let c2: Arc<dyn Counter> = registry.resolve();
    assert!(!Arc::ptr_eq(&c1, &c2));

    // Rebinding the logger is ignored.
    registry.bind::<dyn Logger, _>(|| JournalLogger, Lifecycle::Transient);
    let third: Arc<dyn Logger> = registry.resolve();
    assert_eq!(third.kind(), "console");
    assert!(Arc::ptr_eq(&first, &third));

    // Reset: the logger is gone.
    registry.reset();
    assert!(registry.try_resolve::<dyn Logger>().is_none());
    assert!(registry.try_resolve::<dyn Counter>().is_none());
}

#[test]
fn subtrait_implementation_satisfies_base_capability() {
    let registry = Registry::new();
    registry.bind::<dyn Logger, _>(|| JournalLogger, Lifecycle::Singleton);
    registry.bind::<dyn AuditLogger, _>(|| JournalLogger, Lifecycle::Singleton);

    let logger: Arc<dyn Logger> = registry.resolve();
    assert_eq!(logger.kind(), "journal");

    let audit: Arc<dyn AuditLogger> = registry.resolve();
    assert_eq!(audit.trail(), vec!["boot"]);
    assert_eq!(audit.kind(), "journal");
}

#[test]
fn unrelated_implementation_is_absent_or_fatal() {
    let registry = Registry::new();
    registry.bind::<dyn Logger, _>(|| Orphan, Lifecycle::Transient);

    assert!(registry.try_resolve::<dyn Logger>().is_none());
    assert!(matches!(
        registry.get::<dyn Logger>(),
        Err(RegistryError::TypeMismatch(_))
    ));

    let strict = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        registry.resolve::<dyn Logger>()
    }));
    assert!(strict.is_err());
}

#[test]
fn name_keyed_bindings_resolve_by_name() {
    let registry = Registry::new();
    registry.bind_named("audit", || JournalLogger, Lifecycle::Singleton);

    let as_logger = registry.resolve_named::<dyn Logger>("audit");
    let as_audit = registry.try_resolve_named::<dyn AuditLogger>("audit").unwrap();
    assert!(std::ptr::addr_eq(Arc::as_ptr(&as_logger), Arc::as_ptr(&as_audit)));

    assert!(registry.try_resolve_named::<dyn Logger>("missing").is_none());
    assert!(registry.try_resolve_named::<dyn Counter>("audit").is_none());
}

#[test]
fn foreign_values_resolve_by_their_own_type() {
    let registry = Registry::new();
    registry.bind_named("greeting", || String::from("hi"), Lifecycle::Singleton);

    let greeting = registry.resolve_named::<String>("greeting");
    assert_eq!(greeting.as_str(), "hi");
    assert!(registry.try_resolve_named::<dyn Logger>("greeting").is_none());
}

#[test]
fn composition_root_captures_resolved_collaborators() {
    struct ReportService {
        logger: Arc<dyn Logger>,
        counter: Arc<dyn Counter>,
    }

    let registry = Registry::new();
    registry.bind::<dyn Logger, _>(|| ConsoleLogger, Lifecycle::Singleton);
    registry.bind::<dyn Counter, _>(SimpleCounter::default, Lifecycle::Singleton);

    let logger: Arc<dyn Logger> = registry.resolve();
    let counter: Arc<dyn Counter> = registry.resolve();
    registry.bind::<ReportService, _>(
        move || ReportService {
            logger: logger.clone(),
            counter: counter.clone(),
        },
        Lifecycle::Transient,
    );

    let a = registry.resolve::<ReportService>();
    let b = registry.resolve::<ReportService>();
    assert!(!Arc::ptr_eq(&a, &b));
    assert!(Arc::ptr_eq(&a.logger, &b.logger));
    assert_eq!(a.counter.next(), 0);
    assert_eq!(b.counter.next(), 1);
}

#[test]
fn independent_registries_do_not_share_state() {
    let left = Registry::new();
    let right = Registry::new();
    left.bind::<dyn Logger, _>(|| ConsoleLogger, Lifecycle::Singleton);

    assert!(left.try_resolve::<dyn Logger>().is_some());
    assert!(right.try_resolve::<dyn Logger>().is_none());
}

#[test]
fn singleton_dropped_when_registry_resets() {
    static DROPS: AtomicUsize = AtomicUsize::new(0);

    struct Pool;
    impl Drop for Pool {
        fn drop(&mut self) {
            DROPS.fetch_add(1, Ordering::SeqCst);
        }
    }

    let registry = Registry::new();
    registry.bind::<Pool, _>(|| Pool, Lifecycle::Singleton);

    let pool = registry.resolve::<Pool>();
    drop(pool);
    assert_eq!(DROPS.load(Ordering::SeqCst), 0);

    registry.reset();
    assert_eq!(DROPS.load(Ordering::SeqCst), 1);
}
