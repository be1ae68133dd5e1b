use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::sync::{Arc, Mutex, Once};

use tracing_subscriber::{fmt, EnvFilter};

use jekyllwatch::config::ConfigFile;
use jekyllwatch::exec::TaskExecutor;
use jekyllwatch::tasks::{TaskKind, TaskParams};

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// - Uses `with_test_writer()`, so logs are captured per-test.
/// - The Rust test harness only prints captured output for **failing**
///   tests (unless you run with `-- --nocapture`).
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .init();
    });
}

/// A fake executor that records which tasks were dispatched (with their
/// params) instead of spawning real processes.
pub struct FakeExecutor {
    pub executed: Arc<Mutex<Vec<(String, TaskParams)>>>,
}

impl FakeExecutor {
    pub fn new(executed: Arc<Mutex<Vec<(String, TaskParams)>>>) -> Self {
        Self { executed }
    }
}

impl TaskExecutor for FakeExecutor {
    fn run_task(
        &mut self,
        kind: TaskKind,
        params: TaskParams,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        let executed = Arc::clone(&self.executed);
        Box::pin(async move {
            executed.lock().unwrap().push((kind.name().to_string(), params));
        })
    }
}

/// Minimal valid config for a given watch directory.
pub fn config_for(watch_dir: &Path) -> ConfigFile {
    let toml_str = format!(
        r#"
        [config]
        watch_dir = {:?}
        watch_interval = 1

        [task.jekyll_build]
        jekyll_base_dir = "/srv/blog"
        "#,
        watch_dir.to_str().unwrap()
    );
    toml::from_str(&toml_str).unwrap()
}
