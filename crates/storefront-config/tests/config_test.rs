#![allow(clippy::unwrap_used)]

use pretty_assertions::assert_eq;

use storefront_config::{Config, Profile, load_config_from, save_config_to};

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(cfg.default_profile_name(), "default");
    assert_eq!(cfg.defaults.timeout, 30);
    assert_eq!(cfg.catalog.fallback_category, "Outdoor");
    assert!(cfg.profiles.is_empty());
}

#[test]
fn saved_config_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut cfg = Config::default();
    cfg.catalog.currency_symbol = "$".into();
    cfg.profiles.insert(
        "shop".into(),
        Profile {
            backend: "https://shop.example.com".into(),
            api_key_env: Some("SHOP_KEY".into()),
            user_id: Some("u1".into()),
            ..Profile::default()
        },
    );
    save_config_to(&cfg, &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("[profiles.shop]"));
    assert!(!text.contains("api_key ="));

    let loaded = load_config_from(&path).unwrap();
    let profile = loaded.profile("shop").unwrap();
    assert_eq!(profile.user_id.as_deref(), Some("u1"));
    assert_eq!(loaded.catalog.to_catalog_config().currency_symbol, "$");
}

#[test]
fn env_overrides_file() {
    figment::Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
                default_profile = "shop"

                [catalog]
                fallback_category = "Sneakers"

                [profiles.shop]
                backend = "https://shop.example.com"
            "#,
        )?;
        jail.set_env("STOREFRONT_CATALOG__FALLBACK_CATEGORY", "Tennis");
        jail.set_env("STOREFRONT_DEFAULTS__TIMEOUT", "5");

        let cfg = load_config_from(&jail.directory().join("config.toml"))
            .map_err(|e| e.to_string())?;
        assert_eq!(cfg.default_profile_name(), "shop");
        assert_eq!(cfg.catalog.fallback_category, "Tennis");
        assert_eq!(cfg.defaults.timeout, 5);
        assert_eq!(
            cfg.catalog.to_catalog_config().fallback_category_title.as_deref(),
            Some("Tennis")
        );
        Ok(())
    });
}
