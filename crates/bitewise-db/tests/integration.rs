//! Offline unit tests for bitewise-db pool configuration and row types.
//! These tests do not require a live database connection.

use bitewise_core::{AppConfig, CloverConfig, Environment, Merchant};
use bitewise_db::{MerchantRow, PoolConfig};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let app_config = AppConfig {
        database_url: "postgres://example".to_string(),
        env: Environment::Test,
        bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 8000),
        log_level: "info".to_string(),
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
        clover: CloverConfig {
            base_url: "http://localhost:9999/v3/merchants".to_string(),
            request_timeout_secs: 5,
            user_agent: "ua".to_string(),
        },
    };

    let pool_config = PoolConfig::from_app_config(&app_config);
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

/// Compile-time smoke test: confirm that [`MerchantRow`] has the expected
/// fields and maps onto the public [`Merchant`] shape.
#[test]
fn merchant_row_has_expected_fields() {
    use chrono::Utc;

    let row = MerchantRow {
        id: 1_i64,
        clover_merchant_id: "ABC123".to_string(),
        name: "Corner Cafe".to_string(),
        created_at: Utc::now(),
    };

    let merchant: Merchant = row.into();
    assert_eq!(
        merchant,
        Merchant {
            db_id: 1,
            external_merchant_id: "ABC123".to_string(),
            name: "Corner Cafe".to_string(),
        }
    );
}
