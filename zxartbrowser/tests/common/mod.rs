#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use zxartbrowser::{CatalogClient, CatalogItem, Entity, Order};

#[derive(Debug, thiserror::Error)]
#[error("catalog unavailable (status {status})")]
pub struct FakeError {
    pub status: u16,
}

/// In-memory catalog recording every query
#[derive(Default)]
pub struct FakeCatalog {
    items: Mutex<HashMap<(Entity, Order), Vec<CatalogItem>>>,
    calls: Mutex<Vec<(Entity, Order, usize)>>,
    failing: AtomicBool,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, entity: Entity, order: Order, items: Vec<CatalogItem>) -> Self {
        self.items.lock().unwrap().insert((entity, order), items);
        self
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<(Entity, Order, usize)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogClient for FakeCatalog {
    type Error = FakeError;

    async fn fetch(
        &self,
        entity: Entity,
        order: Order,
        limit: usize,
    ) -> Result<Vec<CatalogItem>, FakeError> {
        self.calls.lock().unwrap().push((entity, order, limit));

        if self.failing.load(Ordering::SeqCst) {
            return Err(FakeError { status: 503 });
        }

        let items = self
            .items
            .lock()
            .unwrap()
            .get(&(entity, order))
            .cloned()
            .unwrap_or_default();
        Ok(items.into_iter().take(limit).collect())
    }
}

pub fn tune(id: u64, title: &str) -> CatalogItem {
    CatalogItem::new(id, title, Some(format!("https://zxart.ee/file/id:{id}/tune.mp3")))
}

pub fn image(id: u64, title: &str) -> CatalogItem {
    CatalogItem::new(id, title, Some(format!("https://zxart.ee/file/id:{id}/image.png")))
}

pub fn without_url(id: u64, title: &str) -> CatalogItem {
    CatalogItem::new(id, title, None)
}
