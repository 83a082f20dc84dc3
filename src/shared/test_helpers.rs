#[cfg(test)]
use std::sync::Arc;

#[cfg(test)]
use chrono::{DateTime, TimeZone, Utc};
#[cfg(test)]
use uuid::Uuid;

#[cfg(test)]
use crate::features::professionals::models::NewProfessional;
#[cfg(test)]
use crate::modules::store::MemoryRecordStore;

#[cfg(test)]
pub fn memory_store() -> Arc<MemoryRecordStore> {
    Arc::new(MemoryRecordStore::new())
}

/// Midnight UTC on the given date
#[cfg(test)]
pub fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

/// Minimal professional in `category_id`; tweak fields with struct update syntax
#[cfg(test)]
pub fn new_professional(category_id: Uuid, full_name: &str) -> NewProfessional {
    NewProfessional {
        full_name: full_name.to_string(),
        headline: "Licensed Plumber".to_string(),
        address: Some("1 Main Street".to_string()),
        available: true,
        category_id,
        ..Default::default()
    }
}

/// Serve `router` in-process for handler tests
#[cfg(test)]
pub fn test_server(router: axum::Router) -> axum_test::TestServer {
    axum_test::TestServer::new(router).unwrap()
}
