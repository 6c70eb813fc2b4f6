use licensehub_admin::config::{ConfigError, ConfigLoader};
use std::{
    env, fs,
    path::PathBuf,
    sync::{Mutex, MutexGuard, OnceLock},
};
use tempfile::TempDir;

const VARS: [&str; 9] = [
    "LICENSEHUB_PROFILE",
    "LICENSEHUB_API_BIND_ADDR",
    "LICENSEHUB_LOG_LEVEL",
    "LICENSEHUB_LOG_FORMAT",
    "LICENSEHUB_ADMIN_TOKEN",
    "LICENSEHUB_ADMIN_TOKENS",
    "LICENSEHUB_DEFAULT_LANGUAGE",
    "LICENSEHUB_CORS_ALLOWED_ORIGINS",
    "LICENSEHUB_SEED_DEMO_DATA",
];

fn env_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

fn env_guard() -> MutexGuard<'static, ()> {
    env_lock()
        .lock()
        .unwrap_or_else(|poison| poison.into_inner())
}

fn clear_env() {
    for var in VARS {
        unsafe {
            env::remove_var(var);
        }
    }
}

fn set_env(key: &str, value: &str) {
    unsafe {
        env::set_var(key, value);
    }
}

fn write_env_file(dir: &TempDir, name: &str, contents: &str) {
    let path = dir.path().join(name);
    fs::write(path, contents).unwrap();
}

fn loader(dir: &TempDir) -> ConfigLoader {
    ConfigLoader::with_base_dir(PathBuf::from(dir.path()))
}

#[test]
fn loads_defaults_when_only_a_token_is_set() {
    let _guard = env_guard();
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    set_env("LICENSEHUB_ADMIN_TOKEN", "local-token");

    let cfg = loader(&temp_dir).load().expect("config loads with defaults");

    assert_eq!(cfg.profile, "local");
    assert_eq!(cfg.api_bind_addr, "0.0.0.0:8080");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.log_format, "json");
    assert_eq!(cfg.default_language, "fr");
    assert_eq!(cfg.admin_tokens, vec!["local-token".to_string()]);
    assert!(cfg.cors_allowed_origins.is_empty());
    assert!(!cfg.seed_demo_data);
    cfg.bind_addr().expect("default bind addr parses");
    clear_env();
}

#[test]
fn missing_admin_tokens_is_an_error() {
    let _guard = env_guard();
    clear_env();
    let temp_dir = TempDir::new().unwrap();

    let err = loader(&temp_dir).load().expect_err("tokens are required");
    assert!(matches!(err, ConfigError::MissingAdminTokens));
    clear_env();
}

#[test]
fn layered_env_files_apply_in_order() {
    let _guard = env_guard();
    clear_env();

    let temp_dir = TempDir::new().unwrap();
    write_env_file(&temp_dir, ".env", "LICENSEHUB_API_BIND_ADDR=127.0.0.1:3000\n");
    write_env_file(
        &temp_dir,
        ".env.test",
        "LICENSEHUB_API_BIND_ADDR=192.168.0.10:5000\n",
    );
    write_env_file(
        &temp_dir,
        ".env.test.local",
        "LICENSEHUB_API_BIND_ADDR=10.0.0.5:6000\n",
    );

    // Select profile via .env.local before profile-specific files load.
    write_env_file(
        &temp_dir,
        ".env.local",
        "LICENSEHUB_PROFILE=test\nLICENSEHUB_API_BIND_ADDR=127.0.0.1:4000\nLICENSEHUB_ADMIN_TOKENS=ops@licensehub.fr=layered-token\n",
    );

    let cfg = loader(&temp_dir).load().expect("config loads with layered env files");

    assert_eq!(cfg.profile, "test");
    assert_eq!(cfg.api_bind_addr, "10.0.0.5:6000");
    assert_eq!(cfg.admin_tokens, vec!["ops@licensehub.fr=layered-token".to_string()]);
    clear_env();
}

#[test]
fn os_environment_has_highest_precedence() {
    let _guard = env_guard();
    clear_env();

    let temp_dir = TempDir::new().unwrap();
    write_env_file(
        &temp_dir,
        ".env",
        "LICENSEHUB_API_BIND_ADDR=127.0.0.1:3000\nLICENSEHUB_ADMIN_TOKEN=file-token\nLICENSEHUB_DEFAULT_LANGUAGE=fr\n",
    );
    set_env("LICENSEHUB_API_BIND_ADDR", "0.0.0.0:9090");
    set_env("LICENSEHUB_DEFAULT_LANGUAGE", "EN");

    let cfg = loader(&temp_dir).load().expect("config loads with env override");
    assert_eq!(cfg.api_bind_addr, "0.0.0.0:9090");
    assert_eq!(cfg.default_language, "en");
    assert_eq!(cfg.admin_tokens, vec!["file-token".to_string()]);

    clear_env();
}

#[test]
fn token_list_and_origins_are_split() {
    let _guard = env_guard();
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    set_env("LICENSEHUB_ADMIN_TOKEN", "ignored-single-token");
    set_env(
        "LICENSEHUB_ADMIN_TOKENS",
        "ops@licensehub.fr=one, viewer@licensehub.fr=two ,",
    );
    set_env(
        "LICENSEHUB_CORS_ALLOWED_ORIGINS",
        "https://admin.licensehub.fr, http://localhost:5173",
    );
    set_env("LICENSEHUB_SEED_DEMO_DATA", "yes");

    let cfg = loader(&temp_dir).load().expect("config loads");
    assert_eq!(
        cfg.admin_tokens,
        vec![
            "ops@licensehub.fr=one".to_string(),
            "viewer@licensehub.fr=two".to_string()
        ]
    );
    assert_eq!(cfg.cors_allowed_origins.len(), 2);
    assert!(cfg.seed_demo_data);

    let redacted = cfg.redacted_json().expect("serializes");
    assert!(redacted.contains("ops@licensehub.fr=[REDACTED]"));
    assert!(!redacted.contains("=one"));

    clear_env();
}

#[test]
fn invalid_values_return_errors() {
    let _guard = env_guard();
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    set_env("LICENSEHUB_ADMIN_TOKEN", "token");

    set_env("LICENSEHUB_API_BIND_ADDR", "not-an-addr");
    let err = loader(&temp_dir).load().expect_err("invalid bind addr should fail");
    assert!(format!("{}", err).contains("invalid api bind address"));
    unsafe {
        env::remove_var("LICENSEHUB_API_BIND_ADDR");
    }

    set_env("LICENSEHUB_DEFAULT_LANGUAGE", "de");
    let err = loader(&temp_dir).load().expect_err("unsupported language should fail");
    assert!(matches!(err, ConfigError::InvalidDefaultLanguage { .. }));
    unsafe {
        env::remove_var("LICENSEHUB_DEFAULT_LANGUAGE");
    }

    set_env("LICENSEHUB_LOG_FORMAT", "xml");
    let err = loader(&temp_dir).load().expect_err("unknown log format should fail");
    assert!(matches!(err, ConfigError::InvalidLogFormat { .. }));

    unsafe {
        env::remove_var("LICENSEHUB_LOG_FORMAT");
    }
    clear_env();
}
