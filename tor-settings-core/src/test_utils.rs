//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::error::{CoreError, CoreResult};
use crate::services::{NetworkSettingsService, ServiceContext};
use crate::traits::{
    BridgeSettingsStore, FirewallSettingsStore, ProtocolService, ProxySettingsStore,
};
use crate::types::{BridgeConfiguration, FirewallConfiguration, ProxyConfiguration};

/// Builtin transports offered by the mock bridge store
pub const TEST_BRIDGE_TYPES: &[&str] = &["obfs4", "meek-azure", "snowflake"];

// ===== MockStore =====

/// In-memory settings store, usable for all three configuration domains
pub struct MockStore<T> {
    value: RwLock<T>,
    /// 如果 Some，write 时返回此错误
    write_error: RwLock<Option<String>>,
    writes: AtomicUsize,
}

impl<T: Clone> MockStore<T> {
    pub fn with_value(value: T) -> Self {
        Self {
            value: RwLock::new(value),
            write_error: RwLock::new(None),
            writes: AtomicUsize::new(0),
        }
    }

    pub fn set_write_error(&self, err: Option<String>) {
        *self.write_error.write().unwrap() = err;
    }

    /// Value currently persisted
    pub fn stored(&self) -> T {
        self.value.read().unwrap().clone()
    }

    /// Number of successful writes
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn do_write(&self, value: &T) -> CoreResult<()> {
        if let Some(ref msg) = *self.write_error.read().unwrap() {
            return Err(CoreError::StorageError(msg.clone()));
        }
        *self.value.write().unwrap() = value.clone();
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl BridgeSettingsStore for MockStore<BridgeConfiguration> {
    fn read(&self) -> BridgeConfiguration {
        self.stored()
    }

    fn write(&self, config: &BridgeConfiguration) -> CoreResult<()> {
        self.do_write(config)
    }

    fn default_bridge_types(&self) -> Vec<String> {
        TEST_BRIDGE_TYPES.iter().map(ToString::to_string).collect()
    }
}

impl ProxySettingsStore for MockStore<ProxyConfiguration> {
    fn read(&self) -> ProxyConfiguration {
        self.stored()
    }

    fn write(&self, config: &ProxyConfiguration) -> CoreResult<()> {
        self.do_write(config)
    }
}

impl FirewallSettingsStore for MockStore<FirewallConfiguration> {
    fn read(&self) -> FirewallConfiguration {
        self.stored()
    }

    fn write(&self, config: &FirewallConfiguration) -> CoreResult<()> {
        self.do_write(config)
    }
}

// ===== MockProtocolService =====

pub struct MockProtocolService {
    owns_tor_daemon: AtomicBool,
    flush_fails: AtomicBool,
    flushes: AtomicUsize,
    logs: RwLock<String>,
}

impl MockProtocolService {
    pub fn new() -> Self {
        Self {
            owns_tor_daemon: AtomicBool::new(true),
            flush_fails: AtomicBool::new(false),
            flushes: AtomicUsize::new(0),
            logs: RwLock::new(String::new()),
        }
    }

    pub fn set_owns_tor_daemon(&self, owns: bool) {
        self.owns_tor_daemon.store(owns, Ordering::SeqCst);
    }

    pub fn set_flush_fails(&self, fails: bool) {
        self.flush_fails.store(fails, Ordering::SeqCst);
    }

    pub fn flush_count(&self) -> usize {
        self.flushes.load(Ordering::SeqCst)
    }

    pub fn set_logs(&self, logs: &str) {
        *self.logs.write().unwrap() = logs.to_string();
    }
}

impl ProtocolService for MockProtocolService {
    fn owns_tor_daemon(&self) -> bool {
        self.owns_tor_daemon.load(Ordering::SeqCst)
    }

    fn flush_settings(&self) -> CoreResult<()> {
        if self.flush_fails.load(Ordering::SeqCst) {
            return Err(CoreError::StorageError("flush failed".to_string()));
        }
        self.flushes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn tor_logs(&self) -> CoreResult<String> {
        Ok(self.logs.read().unwrap().clone())
    }
}

// ===== 工厂方法 =====

/// Mocks behind a test `ServiceContext`
pub struct TestStores {
    pub bridges: Arc<MockStore<BridgeConfiguration>>,
    pub proxy: Arc<MockStore<ProxyConfiguration>>,
    pub firewall: Arc<MockStore<FirewallConfiguration>>,
    pub protocol: Arc<MockProtocolService>,
}

/// 创建测试用 `ServiceContext`, seeded with persisted values
pub fn create_test_context_with(
    bridges: BridgeConfiguration,
    proxy: ProxyConfiguration,
    firewall: FirewallConfiguration,
) -> (Arc<ServiceContext>, TestStores) {
    let stores = TestStores {
        bridges: Arc::new(MockStore::with_value(bridges)),
        proxy: Arc::new(MockStore::with_value(proxy)),
        firewall: Arc::new(MockStore::with_value(firewall)),
        protocol: Arc::new(MockProtocolService::new()),
    };

    let ctx = Arc::new(ServiceContext::new(
        stores.bridges.clone(),
        stores.proxy.clone(),
        stores.firewall.clone(),
        stores.protocol.clone(),
    ));

    (ctx, stores)
}

/// 创建测试用 `NetworkSettingsService`, already initialized
pub fn create_test_service_with(
    bridges: BridgeConfiguration,
    proxy: ProxyConfiguration,
    firewall: FirewallConfiguration,
) -> (NetworkSettingsService, TestStores) {
    let (ctx, stores) = create_test_context_with(bridges, proxy, firewall);
    let mut service = NetworkSettingsService::new(ctx);
    service.initialize();
    (service, stores)
}

/// 创建测试用 `NetworkSettingsService` with nothing persisted
pub fn create_test_service() -> (NetworkSettingsService, TestStores) {
    create_test_service_with(
        BridgeConfiguration::None,
        ProxyConfiguration::None,
        FirewallConfiguration::None,
    )
}
