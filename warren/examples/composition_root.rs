//! A composition root wired through the global registry.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use warren::prelude::*;

// === Capabilities and implementations ===

trait EventBus: Send + Sync {
    fn publish(&self, event: &str) -> u64;
}

struct InMemoryEventBus {
    published: AtomicU64,
}

impl EventBus for InMemoryEventBus {
    fn publish(&self, event: &str) -> u64 {
        let seq = self.published.fetch_add(1, Ordering::SeqCst) + 1;
        println!("[bus #{seq}] {event}");
        seq
    }
}

trait NotificationGateway: Send + Sync {
    fn notify(&self, user: &str);
}

struct BusNotificationGateway {
    bus: Arc<dyn EventBus>,
}

impl NotificationGateway for BusNotificationGateway {
    fn notify(&self, user: &str) {
        self.bus.publish(&format!("notify {user}"));
    }
}

trait ProximityProvider: Send + Sync {
    fn distance(&self) -> f32;
}

struct BrandedProximityProvider;

impl ProximityProvider for BrandedProximityProvider {
    fn distance(&self) -> f32 {
        1.5
    }
}

capability!(dyn EventBus = [InMemoryEventBus]);
capability!(dyn NotificationGateway = [BusNotificationGateway]);
capability!(dyn ProximityProvider = [BrandedProximityProvider]);

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warren_registry=debug".into()),
        )
        .init();

    let registry = Registry::global();

    // 1. Event bus: singleton
    registry.bind::<dyn EventBus, _>(
        || InMemoryEventBus {
            published: AtomicU64::new(0),
        },
        Lifecycle::Singleton,
    );
    let bus: Arc<dyn EventBus> = registry.resolve();

    // 2. Gateway captures the bus resolved above
    registry.bind::<dyn NotificationGateway, _>(
        move || BusNotificationGateway { bus: bus.clone() },
        Lifecycle::Singleton,
    );

    // 3. Proximity provider: new one every time
    registry.bind::<dyn ProximityProvider, _>(|| BrandedProximityProvider, Lifecycle::Transient);

    println!("{registry:?}");

    let gateway: Arc<dyn NotificationGateway> = registry.resolve();
    gateway.notify("ada");

    let bus: Arc<dyn EventBus> = registry.resolve();
    println!("events so far: {}", bus.publish("done"));

    let a: Arc<dyn ProximityProvider> = registry.resolve();
    let b: Arc<dyn ProximityProvider> = registry.resolve();
    println!(
        "proximity {} / {}, same instance: {}",
        a.distance(),
        b.distance(),
        Arc::ptr_eq(&a, &b)
    );

    // Unknown capability: the safe contract just says "absent"
    let missing = registry.try_resolve_named::<dyn EventBus>("audit_bus");
    println!("audit bus bound: {}", missing.is_some());

    // ...while the checked contract explains why
    if let Err(err) = registry.get_named::<dyn EventBus>("audit_bus") {
        println!("{err}");
    }
}
