use std::sync::Once;

use log::LevelFilter;

static INIT: Once = Once::new();

/// Installs the `env_logger` backend once per process.
///
/// `RUST_LOG` takes precedence; otherwise only `debug` and above are shown so the per-instruction
/// `trace` records stay quiet.
pub fn setup_logger() {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();
        builder
            .format_timestamp(None)
            .filter_level(LevelFilter::Debug)
            .is_test(true);
        if let Ok(filters) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filters);
        }
        // Another test harness may have installed a logger already.
        let _ = builder.try_init();
    });
}
