use std::sync::Once;

static INIT: Once = Once::new();

/// Installs the process-wide `log` backend. Safe to call on every `init`.
pub fn init() {
    INIT.call_once(install);
}

#[cfg(target_os = "android")]
fn install() {
    static LOGGER: LogcatLogger = LogcatLogger;
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(log::LevelFilter::Info);
    }
}

#[cfg(not(target_os = "android"))]
fn install() {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::new()
            .filter_or("CODESCAN_LOG", "info")
            .write_style("CODESCAN_LOG_STYLE"),
    )
    .is_test(cfg!(test))
    .try_init();
}

#[cfg(target_os = "android")]
struct LogcatLogger;

#[cfg(target_os = "android")]
impl log::Log for LogcatLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        use android_log_sys::LogPriority;
        use std::ffi::CString;

        if !self.enabled(record.metadata()) {
            return;
        }
        let priority = match record.level() {
            log::Level::Error => LogPriority::ERROR,
            log::Level::Warn => LogPriority::WARN,
            log::Level::Info => LogPriority::INFO,
            log::Level::Debug => LogPriority::DEBUG,
            log::Level::Trace => LogPriority::VERBOSE,
        };
        let tag = b"codescan\0";
        let Ok(msg) = CString::new(format!("{}: {}", record.target(), record.args())) else {
            return;
        };
        unsafe {
            android_log_sys::__android_log_print(
                priority as _,
                tag.as_ptr() as *const _,
                b"%s\0".as_ptr() as *const _,
                msg.as_ptr(),
            );
        }
    }

    fn flush(&self) {}
}
