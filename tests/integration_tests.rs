//! Integration tests for the Mixin API adapter.
//!
//! These tests verify end-to-end functionality of the configuration system
//! and the store built from it.

use std::collections::HashMap;

use mixin_api::rest::{CompositeId, FieldCategory, FieldMask};
use mixin_api::{ApiKey, ConfigError, MixinConfig, MixinStore, StoreUrl, API_KEY_SETTING};

#[test]
fn test_full_workflow_create_newtypes_build_config_access_fields() {
    // Create validated newtypes
    let api_key = ApiKey::new("test-api-key").unwrap();
    let store_url = StoreUrl::new("https://shop.example.com/").unwrap();

    // Build configuration
    let config = MixinConfig::builder()
        .api_key(api_key)
        .store_url(store_url)
        .page_size(40)
        .user_agent_prefix("HostSync/1.0")
        .build()
        .unwrap();

    // Access fields and verify
    assert_eq!(config.api_key().as_ref(), "test-api-key");
    assert_eq!(config.store_url().as_ref(), "https://shop.example.com");
    assert_eq!(config.page_size(), 40);
    assert_eq!(config.user_agent_prefix(), Some("HostSync/1.0"));
}

#[test]
fn test_config_from_host_settings() {
    let settings = HashMap::from([(API_KEY_SETTING.to_string(), "host-key".to_string())]);

    let config = MixinConfig::from_settings("https://shop.example.com", &settings).unwrap();
    assert_eq!(config.api_key().as_ref(), "host-key");
    assert_eq!(config.page_size(), 100);

    let result = MixinConfig::from_settings("https://shop.example.com", &HashMap::new());
    assert!(matches!(
        result,
        Err(ConfigError::MissingRequiredField { field: "MixinApiKey" })
    ));
}

#[test]
fn test_page_size_is_clamped() {
    let build = |page_size| {
        MixinConfig::builder()
            .api_key(ApiKey::new("key").unwrap())
            .store_url(StoreUrl::new("https://shop.example.com").unwrap())
            .page_size(page_size)
            .build()
            .unwrap()
            .page_size()
    };

    assert_eq!(build(0), 1);
    assert_eq!(build(250), 100);
}

#[test]
fn test_error_handling_invalid_inputs_produce_correct_errors() {
    // Empty API key
    let result = ApiKey::new("");
    assert!(matches!(result, Err(ConfigError::EmptyApiKey)));

    // Store URL without a scheme
    let result = StoreUrl::new("shop.example.com");
    assert!(matches!(result, Err(ConfigError::InvalidStoreUrl { .. })));

    // Missing required fields in builder
    let result = MixinConfig::builder()
        .api_key(ApiKey::new("key").unwrap())
        .build();
    assert!(matches!(
        result,
        Err(ConfigError::MissingRequiredField { field: "store_url" })
    ));
}

#[test]
fn test_api_key_is_masked_in_debug_output() {
    let key = ApiKey::new("super-secret").unwrap();
    assert!(!format!("{key:?}").contains("super-secret"));
}

#[test]
fn test_multi_tenant_scenario_multiple_independent_stores() {
    let build = |url: &str, key: &str| {
        MixinConfig::builder()
            .api_key(ApiKey::new(key).unwrap())
            .store_url(StoreUrl::new(url).unwrap())
            .build()
            .unwrap()
    };

    let store_a = MixinStore::new(&build("https://a.example.com", "key-a"));
    let store_b = MixinStore::new(&build("https://b.example.com", "key-b"));

    assert_eq!(store_a.client().http_client().base_uri(), "https://a.example.com");
    assert_eq!(store_b.client().http_client().base_uri(), "https://b.example.com");
}

#[test]
fn test_config_can_be_cloned_and_shared() {
    let config = MixinConfig::builder()
        .api_key(ApiKey::new("key").unwrap())
        .store_url(StoreUrl::new("https://shop.example.com").unwrap())
        .build()
        .unwrap();

    let config_clone = config.clone();
    assert_eq!(config.api_key().as_ref(), config_clone.api_key().as_ref());

    // Verify Send + Sync by moving to thread (compile-time check)
    let handle = std::thread::spawn(move || {
        let _ = MixinStore::new(&config_clone);
    });
    handle.join().unwrap();
}

#[test]
fn test_host_ids_and_masks_from_plain_values() {
    let id = CompositeId::new(78).unwrap();
    assert_eq!(id.decode(), (12, 0));
    assert!(CompositeId::new(-1).is_err());

    let mask = FieldMask::parse(&["product_price", "stock"]).unwrap();
    assert!(mask.contains(FieldCategory::ProductPrice));
    assert!(mask.contains(FieldCategory::Stock));
    assert!(FieldMask::parse(&["colour"]).is_err());
}
