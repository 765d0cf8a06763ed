//! Browser tests for the localStorage token store

#![cfg(target_arch = "wasm32")]

use serde_json::json;
use voucherify_core::tests::encode_token;
use voucherify_core::{Access, Role, SessionStore, TokenStore, authorize};
use voucherify_frontend::auth::WebTokenStore;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn store(key: &str) -> WebTokenStore {
    let store = WebTokenStore::new(key);
    store.delete().unwrap();
    store
}

#[wasm_bindgen_test]
fn test_token_round_trip() {
    let store = store("test-round-trip");
    assert_eq!(store.get().unwrap(), None);

    store.set("abc").unwrap();
    assert_eq!(store.get().unwrap().as_deref(), Some("abc"));

    store.delete().unwrap();
    store.delete().unwrap();
    assert_eq!(store.get().unwrap(), None);
}

#[wasm_bindgen_test]
fn test_session_over_local_storage() {
    let session = SessionStore::new(store("test-session"));
    session.save("");
    assert!(!session.is_authenticated());

    let token = encode_token(&json!({ "role": "CUSTOMER" }));
    session.save(&token);
    assert!(session.is_authenticated());

    let access = authorize(session.read().as_deref(), &[Role::Admin]);
    assert!(matches!(access, Access::Redirect { .. }));

    session.remove();
    assert!(session.read().is_none());
}
