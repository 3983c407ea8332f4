//! LMDB-backed preference store.

use picpay_tui::{
    controller::WalletView,
    domain::theme::{THEME_KEY, Theme},
    infra::store::{PreferenceStore, Store},
};
use tempfile::TempDir;

#[test]
fn test_store_round_trip() {
    let dir = TempDir::new().unwrap();
    let store = Store::with_path(dir.path().join("prefs.mdb")).unwrap();

    assert_eq!(store.get(THEME_KEY).unwrap(), None);
    store.set(THEME_KEY, "dark").unwrap();
    assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
    store.set(THEME_KEY, "light").unwrap();
    assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("light"));
}

#[test]
fn test_theme_survives_restart() {
    let dir = TempDir::new().unwrap();
    let store = Store::with_path(dir.path().join("prefs.mdb")).unwrap();

    let mut view = WalletView::new(Box::new(store.clone()));
    view.init();
    assert_eq!(view.theme(), Theme::Light);
    view.toggle_theme().unwrap();
    assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
    drop(view);

    // A fresh view over the same environment starts dark without toggling.
    let mut restarted = WalletView::new(Box::new(store));
    restarted.init();
    assert!(restarted.is_dark_mode());
}
