//! Scripted host for tests.

use super::{HostContext, ScriptRequest, VendorApi};
use crate::config::GeoMapProvider;
use crate::error::GeoMapError;
use crate::map::BoxFuture;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Host whose vendor namespace appears once a script loaded.
pub struct MockHost {
    api: VendorApi,
    present: AtomicBool,
    pub scripts: Mutex<Vec<ScriptRequest>>,
    /// Scripts whose `src` contains this fail to load.
    pub fail_matching: Mutex<Option<String>>,
    delay: Duration,
}

impl MockHost {
    pub fn new(api: VendorApi) -> Self {
        Self {
            api,
            present: AtomicBool::new(false),
            scripts: Mutex::new(Vec::new()),
            fail_matching: Mutex::new(None),
            delay: Duration::from_millis(5),
        }
    }

    /// Host whose page already carries the namespace.
    pub fn preloaded(api: VendorApi) -> Self {
        let host = Self::new(api);
        host.present.store(true, Ordering::SeqCst);
        host
    }

    pub fn failing(self, pattern: &str) -> Self {
        *self.fail_matching.lock().unwrap() = Some(pattern.to_string());
        self
    }

    pub fn recover(&self) {
        *self.fail_matching.lock().unwrap() = None;
    }

    pub fn script_count(&self) -> usize {
        self.scripts.lock().unwrap().len()
    }

    pub fn into_arc(self) -> Arc<dyn HostContext> {
        Arc::new(self)
    }
}

impl HostContext for MockHost {
    fn load_script(&self, request: ScriptRequest) -> BoxFuture<'_, Result<(), GeoMapError>> {
        Box::pin(async move {
            tokio::time::sleep(self.delay).await;
            let fails = self
                .fail_matching
                .lock()
                .unwrap()
                .as_ref()
                .is_some_and(|pattern| request.src().contains(pattern.as_str()));
            let src = request.src().to_string();
            self.scripts.lock().unwrap().push(request);
            if fails {
                return Err(GeoMapError::ScriptLoad {
                    src,
                    reason: "error event".to_string(),
                });
            }
            self.present.store(true, Ordering::SeqCst);
            Ok(())
        })
    }

    fn vendor_api(&self, provider: GeoMapProvider) -> Option<VendorApi> {
        if self.present.load(Ordering::SeqCst) && self.api.provider() == provider {
            Some(self.api.clone())
        } else {
            None
        }
    }
}
