use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kanjida::config::{self, STORE_NAME};
use kanjida::db::{self, LogOnError, SqliteStorage};
use kanjida::domain::Progress;
use kanjida::state::AppState;
use kanjida::store::CardStore;
use kanjida::{content, handlers, paths};

#[tokio::main]
async fn main() {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "kanjida=debug,tower_http=debug".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  let config = config::load();

  let pool = db::init_db(&config.database_path).expect("Failed to initialize database");
  let storage = SqliteStorage::new(pool, STORE_NAME);
  let mut store = CardStore::open_with(
    Box::new(storage),
    Progress::new(config.starting_lives, config.daily_goal),
  )
  .expect("Failed to load quiz state");

  if store.is_empty() {
    // An explicit deck path wins; otherwise pick up a deck file dropped in the data dir
    let deck_path = config.deck_path.clone().or_else(|| {
      let default = PathBuf::from(paths::default_deck_path());
      default.exists().then_some(default)
    });
    let cards = content::load_deck(deck_path.as_deref());
    let counts = content::level_counts(&cards);
    tracing::info!(
      n5 = counts.n5,
      n4 = counts.n4,
      n3 = counts.n3,
      n2 = counts.n2,
      "Seeding deck with {} cards",
      counts.total
    );
    store.initialize_deck(cards).log_warn("Deck seeded in memory only");
  }

  let bind_addr = config.bind_addr();
  let app = handlers::router(AppState::new(store, config));

  let listener = tokio::net::TcpListener::bind(&bind_addr)
    .await
    .unwrap_or_else(|_| panic!("Failed to bind to {}", bind_addr));

  tracing::info!("Server running on http://{}", bind_addr);

  axum::serve(listener, app)
    .await
    .expect("Server failed to start");
}
