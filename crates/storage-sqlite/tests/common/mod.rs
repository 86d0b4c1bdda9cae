//! Shared test harness: a fresh temp-dir SQLite database with the real
//! pool, migrations, writer actor, and services wired the way an
//! application embeds them.

use std::sync::Arc;

use shopcart_core::carts::CartService;
use shopcart_core::items::ItemService;
use shopcart_storage_sqlite::{db, CartRepository, ItemRepository};
use tempfile::TempDir;

pub struct TestContext {
    pub items: ItemService,
    pub carts: CartService,
    // Held so the database files outlive the services.
    _data_dir: TempDir,
}

pub fn setup() -> TestContext {
    let data_dir = tempfile::tempdir().expect("create temp dir");
    let db_path = data_dir
        .path()
        .join("shop.db")
        .to_string_lossy()
        .to_string();

    let pool = db::create_pool(&db_path).expect("create pool");
    db::run_migrations(&pool).expect("run migrations");
    let writer = db::spawn_writer((*pool).clone());

    let item_repository = Arc::new(ItemRepository::new(pool.clone(), writer.clone()));
    let cart_repository = Arc::new(CartRepository::new(pool.clone(), writer));

    TestContext {
        items: ItemService::new(item_repository),
        carts: CartService::new(cart_repository),
        _data_dir: data_dir,
    }
}
