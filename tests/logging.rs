use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record};

use rolling_spheres::host::HeadlessHost;
use rolling_spheres::{SceneConfig, SpheresController};

// Keeps every record from this crate so tests can look at levels
struct CaptureLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.target().starts_with("rolling_spheres")
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if let Ok(mut records) = self.records.lock() {
                records.push((record.level(), record.args().to_string()));
            }
        }
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger {
    records: Mutex::new(Vec::new()),
};

#[test]
fn lifecycle_transitions_log_at_info() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Trace);

    let mut host = HeadlessHost::new(800.0, 600.0);
    let mut controller = SpheresController::mount(&SceneConfig::default(), &mut host).unwrap();
    controller.unmount(&mut host);

    let records = LOGGER.records.lock().unwrap();
    let transitions: Vec<&(Level, String)> = records
        .iter()
        .filter(|(_, message)| message.starts_with("Lifecycle:"))
        .collect();

    for state in ["Initializing", "Running", "Unmounted"] {
        assert!(
            transitions.iter().any(|(_, message)| message.contains(state)),
            "no transition logged for {}",
            state
        );
    }
    assert!(transitions.iter().all(|(level, _)| *level == Level::Info));
}
