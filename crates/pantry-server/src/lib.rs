//! HTTP host for Pantry: configuration, static assets, and the API router.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use pantry_core::GroceryStore;
use pantry_store_sqlite::StoreConfig;
use serde::Deserialize;
use tower_http::{services::ServeDir, trace::TraceLayer};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration.
///
/// Sources, later ones winning: built-in defaults, the TOML file, then
/// `PANTRY_*` environment variables (e.g. `PANTRY_PORT=8080`).
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  /// Directory holding the front-end bundle. `/` serves its `index.html`.
  /// Defaults to `public`, the bundle shipped at the repository root.
  pub static_dir: PathBuf,
  pub store_path: PathBuf,
  pub pool_size:  usize,
}

impl ServerConfig {
  pub fn load(file: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("host", "0.0.0.0")?
      .set_default("port", 8000)?
      .set_default("static_dir", "public")?
      .set_default("store_path", "pantry.db")?
      .set_default("pool_size", 4)?
      .add_source(config::File::from(file).required(false))
      .add_source(config::Environment::with_prefix("PANTRY"))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn store_config(&self) -> StoreConfig {
    StoreConfig {
      path:      expand_tilde(&self.store_path),
      pool_size: self.pool_size,
    }
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The full application: `/api/*` JSON endpoints, everything else served
/// from `static_dir`.
pub fn router<S>(store: Arc<S>, static_dir: &Path) -> Router
where
  S: GroceryStore + 'static,
{
  Router::new()
    .nest("/api", pantry_api::api_router(store))
    .fallback_service(ServeDir::new(static_dir))
    .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
  use std::fs;

  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use pantry_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  use super::*;

  fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir()
      .join(format!("pantry-server-{tag}-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
  }

  #[test]
  fn defaults_apply_without_a_config_file() {
    let cfg = ServerConfig::load(Path::new("/nonexistent/pantry.toml")).unwrap();
    assert_eq!(cfg.host, "0.0.0.0");
    assert_eq!(cfg.port, 8000);
    assert_eq!(cfg.static_dir, PathBuf::from("public"));
    assert_eq!(cfg.pool_size, 4);
    assert_eq!(cfg.address(), "0.0.0.0:8000");
  }

  #[test]
  fn config_file_overrides_defaults() {
    let dir = scratch_dir("config");
    let file = dir.join("pantry.toml");
    fs::write(
      &file,
      "host = \"127.0.0.1\"\nport = 9090\nstore_path = \"/var/lib/pantry.db\"\npool_size = 2\n",
    )
    .unwrap();

    let cfg = ServerConfig::load(&file).unwrap();
    assert_eq!(cfg.address(), "127.0.0.1:9090");
    assert_eq!(cfg.static_dir, PathBuf::from("public"));
    let store = cfg.store_config();
    assert_eq!(store.path, PathBuf::from("/var/lib/pantry.db"));
    assert_eq!(store.pool_size, 2);

    let _ = fs::remove_dir_all(&dir);
  }

  #[test]
  fn tilde_expands_to_home() {
    if let Ok(home) = std::env::var("HOME") {
      assert_eq!(
        expand_tilde(Path::new("~/pantry.db")),
        PathBuf::from(home).join("pantry.db")
      );
    }
    assert_eq!(expand_tilde(Path::new("/abs.db")), PathBuf::from("/abs.db"));
  }

  async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
  }

  #[tokio::test]
  async fn bundled_front_end_is_served_at_root() {
    let bundle = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../public");
    let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());

    let (status, body) = get(router(store, &bundle), "/").await;
    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("/api/groceries"), "{html}");
  }

  #[tokio::test]
  async fn serves_index_at_root_and_api_under_prefix() {
    let dir = scratch_dir("static");
    fs::write(dir.join("index.html"), "<h1>pantry</h1>").unwrap();
    fs::write(dir.join("tags.json"), "[]").unwrap();

    let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
    let app = router(store, &dir);

    let (status, body) = get(app.clone(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"<h1>pantry</h1>");

    let (status, body) = get(app.clone(), "/tags.json").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"[]");

    let (status, _) = get(app.clone(), "/missing.js").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = get(app, "/api/groceries?tag=a&subtag=b").await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json, serde_json::json!([]));

    let _ = fs::remove_dir_all(&dir);
  }
}
