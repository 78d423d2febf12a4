//! Runtime configuration and router assembly for the TapRight server binary.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use chrono::TimeDelta;
use serde::Deserialize;
use tapright_core::{
  engine::{Engine, EngineConfig},
  store::RewardStore,
  throttle::{DEFAULT_COOLDOWN_SECS, MAX_COOLDOWN_SECS},
};
use tower_http::{
  cors::{Any, CorsLayer},
  trace::TraceLayer,
};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` layered
/// under `TAPRIGHT_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:          String,
  #[serde(default = "default_port")]
  pub port:          u16,
  #[serde(default = "default_store_path")]
  pub store_path:    PathBuf,
  /// Quiet period per `(user, POI)` pair after a notification.
  #[serde(default = "default_cooldown_secs")]
  pub cooldown_secs: i64,
  /// Insert the bundled POIs and cards at startup if missing.
  #[serde(default = "default_seed_catalog")]
  pub seed_catalog:  bool,
  /// Answer CORS preflights and allow requests from any origin.
  #[serde(default = "default_cors_permissive")]
  pub cors_permissive: bool,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 8001 }

fn default_store_path() -> PathBuf { PathBuf::from("tapright.db") }

fn default_cooldown_secs() -> i64 { DEFAULT_COOLDOWN_SECS }

fn default_seed_catalog() -> bool { true }

fn default_cors_permissive() -> bool { true }

impl ServerConfig {
  /// Load from an optional TOML file, then the environment.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    let cfg: Self = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("TAPRIGHT"))
      .build()?
      .try_deserialize()?;
    cfg.engine_config()?;
    Ok(cfg)
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  /// The engine tunables, with `cooldown_secs` checked to lie in
  /// `0..=MAX_COOLDOWN_SECS`.
  pub fn engine_config(&self) -> Result<EngineConfig, config::ConfigError> {
    if !(0..=MAX_COOLDOWN_SECS).contains(&self.cooldown_secs) {
      return Err(config::ConfigError::Message(format!(
        "cooldown_secs must be between 0 and {MAX_COOLDOWN_SECS}, got {}",
        self.cooldown_secs
      )));
    }
    let cooldown = TimeDelta::try_seconds(self.cooldown_secs).ok_or_else(|| {
      config::ConfigError::Message(format!(
        "cooldown_secs out of range: {}",
        self.cooldown_secs
      ))
    })?;
    Ok(EngineConfig { cooldown })
  }
}

// ─── Application ──────────────────────────────────────────────────────────────

/// The full HTTP app: the JSON API under `/api`, request tracing, and CORS
/// when `cors_permissive` is set.
pub fn app<S>(engine: Arc<Engine<S>>, cfg: &ServerConfig) -> Router
where
  S: RewardStore + 'static,
{
  let router = Router::new().nest("/api", tapright_api::api_router(engine));
  let router = if cfg.cors_permissive {
    router.layer(
      CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any),
    )
  } else {
    router
  };
  router.layer(TraceLayer::new_for_http())
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use tapright_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  #[test]
  fn missing_file_falls_back_to_defaults() {
    let cfg =
      ServerConfig::load(Path::new("/nonexistent/tapright.toml")).unwrap();
    assert_eq!(cfg.cooldown_secs, 4 * 60 * 60);
    assert!(cfg.seed_catalog);
    assert!(cfg.cors_permissive);
    assert_eq!(cfg.engine_config().unwrap().cooldown, TimeDelta::hours(4));
  }

  /// Write `contents` to a fresh `config.toml` and load it.
  fn load_toml(
    name: &str,
    contents: &str,
  ) -> Result<ServerConfig, config::ConfigError> {
    let dir = std::env::temp_dir()
      .join(format!("tapright-config-{name}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.toml");
    std::fs::write(&path, contents).unwrap();
    let loaded = ServerConfig::load(&path);
    std::fs::remove_dir_all(&dir).ok();
    loaded
  }

  #[test]
  fn file_values_override_defaults() {
    let cfg = load_toml(
      "override",
      "host = \"0.0.0.0\"\nport = 9000\ncooldown_secs = 60\n\
       seed_catalog = false\ncors_permissive = false\n",
    )
    .unwrap();
    assert_eq!(cfg.address(), "0.0.0.0:9000");
    assert_eq!(cfg.engine_config().unwrap().cooldown, TimeDelta::minutes(1));
    assert!(!cfg.seed_catalog);
    assert!(!cfg.cors_permissive);
  }

  #[test]
  fn zero_cooldown_is_allowed() {
    let cfg = load_toml("zero", "cooldown_secs = 0\n").unwrap();
    assert_eq!(cfg.engine_config().unwrap().cooldown, TimeDelta::zero());
  }

  #[test]
  fn negative_cooldown_is_rejected() {
    let err = load_toml("negative", "cooldown_secs = -14400\n").unwrap_err();
    assert!(err.to_string().contains("cooldown_secs"), "{err}");
  }

  #[test]
  fn oversized_cooldown_is_rejected() {
    let err = load_toml("huge", "cooldown_secs = 9223372036854775807\n")
      .unwrap_err();
    assert!(err.to_string().contains("cooldown_secs"), "{err}");

    let just_over = format!("cooldown_secs = {}\n", MAX_COOLDOWN_SECS + 1);
    assert!(load_toml("over", &just_over).is_err());
    let at_max = format!("cooldown_secs = {MAX_COOLDOWN_SECS}\n");
    assert!(load_toml("max", &at_max).is_ok());
  }

  #[test]
  fn tilde_expands_to_home() {
    let Ok(home) = std::env::var("HOME") else { return };
    assert_eq!(
      expand_tilde(Path::new("~/data/tapright.db")),
      PathBuf::from(home).join("data/tapright.db")
    );
    assert_eq!(
      expand_tilde(Path::new("/var/lib/tapright.db")),
      PathBuf::from("/var/lib/tapright.db")
    );
  }

  // ── App ───────────────────────────────────────────────────────────────────

  async fn test_app(cors_permissive: bool) -> Router {
    let mut cfg =
      ServerConfig::load(Path::new("/nonexistent/tapright.toml")).unwrap();
    cfg.cors_permissive = cors_permissive;
    let store = SqliteStore::open_in_memory().await.unwrap();
    let engine = Arc::new(Engine::new(
      Arc::new(store),
      cfg.engine_config().unwrap(),
    ));
    app(engine, &cfg)
  }

  fn preflight() -> Request<Body> {
    Request::builder()
      .method("OPTIONS")
      .uri("/api/location/check")
      .header(header::ORIGIN, "http://localhost:3000")
      .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
      .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
      .body(Body::empty())
      .unwrap()
  }

  #[tokio::test]
  async fn permissive_cors_answers_preflight() {
    let resp = test_app(true).await.oneshot(preflight()).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
      resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
      "*"
    );
  }

  #[tokio::test]
  async fn cors_can_be_disabled() {
    let resp = test_app(false).await.oneshot(preflight()).await.unwrap();
    assert!(
      resp
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none()
    );
  }

  #[tokio::test]
  async fn api_is_nested_under_api_prefix() {
    let req = Request::builder()
      .method("GET")
      .uri("/api/cards")
      .body(Body::empty())
      .unwrap();
    let resp = test_app(true).await.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
  }
}
