#![allow(dead_code)]

use std::sync::Arc;
use url_shortcode::application::services::UniquenessResolver;
use url_shortcode::domain::entities::ShortCodeRecord;
use url_shortcode::domain::repositories::ShortCodeStore;
use url_shortcode::infrastructure::persistence::InMemoryShortCodeStore;

pub fn create_memory_resolver() -> (
    Arc<InMemoryShortCodeStore>,
    Arc<UniquenessResolver<InMemoryShortCodeStore>>,
) {
    let store = Arc::new(InMemoryShortCodeStore::new());
    let resolver = Arc::new(UniquenessResolver::new(store.clone()));
    (store, resolver)
}

pub async fn seed_code<S: ShortCodeStore + ?Sized>(store: &S, code: &str, url: &str) {
    store
        .insert(ShortCodeRecord::new(url, code))
        .await
        .unwrap();
}
