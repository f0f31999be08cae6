use std::sync::Arc;

use crate::config::ServiceConfig;
use crate::schema::FormSchema;
use crate::sheets::SheetStore;

/// Shared, read-only application state: the resolved configuration, the
/// form schema variant it implies, and the sheet store. Constructed once
/// in `main` and injected into every handler; nothing mutates it after
/// construction, so no locking is needed.
pub struct AppState {
    pub config: ServiceConfig,
    pub schema: FormSchema,
    pub store: Arc<dyn SheetStore>,
}

impl AppState {
    pub fn new(config: ServiceConfig, store: Arc<dyn SheetStore>) -> Arc<Self> {
        let schema = FormSchema::new(config.collect_phone);
        Arc::new(Self { config, schema, store })
    }
}
