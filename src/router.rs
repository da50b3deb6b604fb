use crate::config::ScannerConfig;
use crate::error::{CoreError, CoreResult};
use crate::features::codec::RxingCodec;
use crate::features::generator::{
    render_creator_screen, run_generate, GenerateRequest, GeneratedImage, GeneratorState,
};
use crate::features::scanner::{
    decode_camera_frame, render_scanner_screen, scan_image_bytes, scan_pixels,
};
use crate::features::storage::parse_file_uri_path;
use crate::i18n::{sync_locale, update_locale};
use crate::logging;
use crate::state::{next_job_id, AppState, Screen, WindowWidthClass};
use crate::ui::{
    to_value_or_text, Button as UiButton, Column as UiColumn, Grid as UiGrid, Text as UiText,
};
use jni::objects::{JByteArray, JClass, JIntArray, JString};
use jni::sys::{jint, jstring};
use jni::JNIEnv;
use rust_i18n::t;
use serde::Deserialize;
use serde_json::{json, Value};
use std::{
    collections::HashMap,
    fs::File,
    io::Read,
    os::unix::io::{FromRawFd, RawFd},
    ptr,
    sync::{mpsc, Mutex, MutexGuard, OnceLock},
    thread,
};

#[cfg(test)]
use std::{
    sync::atomic::{AtomicBool, AtomicU64, Ordering},
    time::Duration,
};

/// Host polling interval while a worker job is outstanding.
const PENDING_REFRESH_MS: u64 = 250;

struct GlobalState {
    ui: OnceLock<Mutex<AppState>>,
    worker: OnceLock<WorkerRuntime>,
    notifications: Mutex<Vec<WorkerResult>>,
}

impl GlobalState {
    const fn new() -> Self {
        Self {
            ui: OnceLock::new(),
            worker: OnceLock::new(),
            notifications: Mutex::new(Vec::new()),
        }
    }

    fn ui(&self) -> &Mutex<AppState> {
        self.ui.get_or_init(|| Mutex::new(AppState::new()))
    }

    /// Locks the state, recovering from poison. The flag reports whether it was.
    fn ui_lock(&self) -> (MutexGuard<'_, AppState>, bool) {
        match self.ui().lock() {
            Ok(guard) => (guard, false),
            Err(poisoned) => (poisoned.into_inner(), true),
        }
    }

    #[cfg(test)]
    fn ui_try_lock(&self) -> Option<MutexGuard<'_, AppState>> {
        self.ui().try_lock().ok()
    }

    fn worker(&self) -> &WorkerRuntime {
        self.worker.get_or_init(WorkerRuntime::new)
    }

    fn push_worker_result(&self, result: WorkerResult) {
        if let Ok(mut guard) = self.notifications.lock() {
            guard.push(result);
        }
    }

    fn drain_worker_results(&self) -> Vec<WorkerResult> {
        self.notifications
            .lock()
            .map(|mut q| q.drain(..).collect())
            .unwrap_or_default()
    }
}

struct WorkerRuntime {
    sender: Option<mpsc::Sender<WorkerJob>>,
}

impl WorkerRuntime {
    fn new() -> Self {
        let (tx, rx) = mpsc::channel::<WorkerJob>();
        let spawned = thread::Builder::new()
            .name("codescan-worker".into())
            .spawn(move || {
                while let Ok(job) = rx.recv() {
                    let result = run_worker_job(job);
                    STATE.push_worker_result(result);
                }
            });

        match spawned {
            Ok(_) => Self { sender: Some(tx) },
            Err(e) => {
                log::error!("failed to spawn worker thread: {e}");
                Self { sender: None }
            }
        }
    }

    fn send(&self, job: WorkerJob) -> Result<(), String> {
        match &self.sender {
            Some(sender) => sender
                .send(job)
                .map_err(|e| format!("worker_send_failed:{e}")),
            None => Err("worker_unavailable".into()),
        }
    }

    #[cfg(not(test))]
    fn enqueue(&self, job: WorkerJob) -> Result<(), String> {
        self.send(job)
    }

    #[cfg(test)]
    fn enqueue(&self, job: WorkerJob) -> Result<(), String> {
        if TEST_FORCE_ASYNC_WORKER.load(Ordering::SeqCst) {
            self.send(job)
        } else {
            let result = run_worker_job(job);
            STATE.push_worker_result(result);
            Ok(())
        }
    }
}

/// Where a picked image comes from.
#[derive(Debug)]
enum ImageSource {
    Fd(i32),
    Path(String),
    Pixels {
        pixels: Vec<u32>,
        width: u32,
        height: u32,
    },
}

enum WorkerJob {
    ScanImage {
        job_id: u64,
        source: ImageSource,
        max_dimension: u32,
    },
    Generate(GenerateRequest),
}

enum WorkerResult {
    ScanImage {
        job_id: u64,
        decoded: Option<String>,
    },
    Generate {
        job_id: u64,
        value: CoreResult<GeneratedImage>,
    },
}

fn run_worker_job(job: WorkerJob) -> WorkerResult {
    test_worker_delay();
    match job {
        WorkerJob::ScanImage {
            job_id,
            source,
            max_dimension,
        } => {
            let decoded = match source {
                ImageSource::Pixels {
                    pixels,
                    width,
                    height,
                } => scan_pixels(&RxingCodec, &pixels, width, height, max_dimension),
                other => match read_image_source(other) {
                    Ok(bytes) => scan_image_bytes(&RxingCodec, &bytes, max_dimension),
                    Err(e) => {
                        log::warn!("could not read picked image: {e}");
                        None
                    }
                },
            };
            WorkerResult::ScanImage { job_id, decoded }
        }
        WorkerJob::Generate(request) => WorkerResult::Generate {
            job_id: request.job_id,
            value: run_generate(&RxingCodec, &request),
        },
    }
}

fn read_image_source(source: ImageSource) -> CoreResult<Vec<u8>> {
    let mut bytes = Vec::new();
    match source {
        ImageSource::Fd(fd) => {
            let mut file = unsafe { File::from_raw_fd(fd as RawFd) };
            file.read_to_end(&mut bytes)?;
        }
        ImageSource::Path(path) => {
            let resolved = parse_file_uri_path(&path).unwrap_or_else(|| path.into());
            File::open(resolved)?.read_to_end(&mut bytes)?;
        }
        ImageSource::Pixels { .. } => {
            return Err(CoreError::InvalidBuffer("pixels_are_not_a_file".into()));
        }
    }
    Ok(bytes)
}

static STATE: GlobalState = GlobalState::new();

#[cfg(test)]
static TEST_FORCE_ASYNC_WORKER: AtomicBool = AtomicBool::new(false);

#[cfg(test)]
static TEST_WORKER_DELAY_MS: AtomicU64 = AtomicU64::new(0);

#[cfg(test)]
fn test_worker_delay() {
    let delay = TEST_WORKER_DELAY_MS.load(Ordering::SeqCst);
    if delay > 0 {
        thread::sleep(Duration::from_millis(delay));
    }
}

#[cfg(not(test))]
fn test_worker_delay() {}

#[derive(Deserialize, Default)]
struct Command {
    action: String,
    text: Option<String>,
    fd: Option<i32>,
    path: Option<String>,
    error: Option<String>,
    pixels: Option<Vec<i32>>,
    width: Option<u32>,
    height: Option<u32>,
    bindings: Option<HashMap<String, String>>,
    snapshot: Option<String>,
    window_width_class: Option<WindowWidthClass>,
    locale: Option<String>,
    config: Option<Value>,
}

#[derive(Debug)]
enum Action {
    Init { locale: Option<String> },
    Reset,
    Back,
    Poll,
    ScannerScreen,
    CreatorScreen,
    ScanResult { text: Option<String> },
    ScanImage { source: ImageSource },
    ScanImageFailed { error: String },
    ScanImageCancelled,
    ScanImageErrorDismiss,
    ToggleFlash,
    ClearScanned,
    ShareScanned,
    GeneratorUpdate { bindings: HashMap<String, String> },
    GeneratorFormat { bindings: HashMap<String, String> },
    Generate { bindings: HashMap<String, String> },
    GeneratorDismiss,
    ShareGenerated,
    SetLocale { locale: String },
    Configure { config: ScannerConfig },
    Snapshot,
    Restore { snapshot: String },
}

/// Owns a host file descriptor until it is handed on; closes it otherwise.
struct FdHandle(Option<i32>);

impl FdHandle {
    fn new(fd: Option<i32>) -> Self {
        Self(fd)
    }

    fn take(&mut self) -> Option<i32> {
        self.0.take()
    }
}

impl Drop for FdHandle {
    fn drop(&mut self) {
        if let Some(fd) = self.0.take() {
            unsafe { File::from_raw_fd(fd as RawFd) };
        }
    }
}

fn parse_action(command: Command) -> Result<Action, String> {
    let Command {
        action,
        text,
        fd,
        path,
        error,
        pixels,
        width,
        height,
        bindings,
        snapshot,
        window_width_class: _,
        locale,
        config,
    } = command;

    let mut fd_handle = FdHandle::new(fd);
    let bindings = bindings.unwrap_or_default();

    match action.as_str() {
        "init" => Ok(Action::Init { locale }),
        "reset" => Ok(Action::Reset),
        "back" => Ok(Action::Back),
        "poll" => Ok(Action::Poll),
        "scanner_screen" => Ok(Action::ScannerScreen),
        "creator_screen" => Ok(Action::CreatorScreen),
        "scan_result" => Ok(Action::ScanResult { text }),
        "scan_image_fd" | "scan_image_path" => {
            if let Some(error) = error {
                return Ok(Action::ScanImageFailed { error });
            }
            if let Some(fd) = fd_handle.take() {
                Ok(Action::ScanImage {
                    source: ImageSource::Fd(fd),
                })
            } else if let Some(path) = path {
                Ok(Action::ScanImage {
                    source: ImageSource::Path(path),
                })
            } else {
                Err("missing_fd".into())
            }
        }
        "scan_image_pixels" => {
            let (Some(pixels), Some(width), Some(height)) = (pixels, width, height) else {
                return Err("missing_pixels".into());
            };
            Ok(Action::ScanImage {
                source: ImageSource::Pixels {
                    pixels: pixels.into_iter().map(|p| p as u32).collect(),
                    width,
                    height,
                },
            })
        }
        "scan_image_cancelled" => Ok(Action::ScanImageCancelled),
        "scan_image_error_dismiss" => Ok(Action::ScanImageErrorDismiss),
        "toggle_flash" => Ok(Action::ToggleFlash),
        "clear_scanned" => Ok(Action::ClearScanned),
        "share_scanned" => Ok(Action::ShareScanned),
        "generator_update" => Ok(Action::GeneratorUpdate { bindings }),
        "generator_format" => Ok(Action::GeneratorFormat { bindings }),
        "generate" => Ok(Action::Generate { bindings }),
        "generator_dismiss" => Ok(Action::GeneratorDismiss),
        "share_generated" => Ok(Action::ShareGenerated),
        "set_locale" => Ok(Action::SetLocale {
            locale: locale
                .or_else(|| bindings.get("locale").cloned())
                .unwrap_or_else(|| "en".into()),
        }),
        "configure" => {
            let raw = config.ok_or_else(|| "missing_config".to_string())?;
            let config = ScannerConfig::from_json(&raw.to_string())
                .map_err(|e| format!("invalid_config:{e}"))?;
            Ok(Action::Configure { config })
        }
        "snapshot" => Ok(Action::Snapshot),
        "restore_state" => Ok(Action::Restore {
            snapshot: snapshot.ok_or_else(|| "missing_snapshot".to_string())?,
        }),
        other => Err(error.unwrap_or_else(|| format!("unknown_action:{other}"))),
    }
}

#[no_mangle]
pub extern "system" fn Java_aeska_codescan_MainActivity_dispatch(
    mut env: JNIEnv,
    _class: JClass,
    input: JString,
) -> jstring {
    let response = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let input_str: String = env
            .get_string(&input)
            .map(|s| s.into())
            .unwrap_or_else(|_| "{}".to_string());

        dispatch_json(&input_str)
    }));

    let json_value = match response {
        Ok(value) => value,
        Err(_) => error_ui("panic"),
    };
    into_jstring(&env, json_value)
}

/// Decodes one camera analysis frame. Returns the refreshed UI when the frame
/// changed the scan session, null otherwise.
#[no_mangle]
pub extern "system" fn Java_aeska_codescan_MainActivity_processCameraFrame(
    env: JNIEnv,
    _class: JClass,
    luma_array: JByteArray,
    width: jint,
    height: jint,
    row_stride: jint,
    rotation_deg: jint,
) -> jstring {
    let response = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        if width <= 0 || height <= 0 {
            return Ok(ptr::null_mut());
        }
        let luma_data = env
            .convert_byte_array(&luma_array)
            .map_err(|e| format!("jni_luma_array_err:{e}"))?;

        match handle_camera_frame(
            &luma_data,
            width as u32,
            height as u32,
            row_stride.max(0) as u32,
            rotation_deg.rem_euclid(360) as u16,
        ) {
            Some(ui) => env
                .new_string(ui.to_string())
                .map(|s| s.into_raw())
                .map_err(|e| format!("jni_new_string_err:{e}")),
            None => Ok(ptr::null_mut()),
        }
    }));

    match response {
        Ok(Ok(res)) => res,
        Ok(Err(e)) => {
            log::warn!("camera frame rejected: {e}");
            ptr::null_mut()
        }
        Err(_) => ptr::null_mut(),
    }
}

/// Picked image already decoded by the platform into packed ARGB pixels.
#[no_mangle]
pub extern "system" fn Java_aeska_codescan_MainActivity_scanImagePixels(
    env: JNIEnv,
    _class: JClass,
    pixel_array: JIntArray,
    width: jint,
    height: jint,
) -> jstring {
    let response = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let len = env
            .get_array_length(&pixel_array)
            .map_err(|e| format!("jni_pixel_array_err:{e}"))?;
        let mut pixels = vec![0 as jint; len.max(0) as usize];
        env.get_int_array_region(&pixel_array, 0, &mut pixels)
            .map_err(|e| format!("jni_pixel_array_err:{e}"))?;

        handle_command(Command {
            action: "scan_image_pixels".into(),
            pixels: Some(pixels),
            width: Some(width.max(0) as u32),
            height: Some(height.max(0) as u32),
            ..Default::default()
        })
    }));

    let json_value = match response {
        Ok(Ok(value)) => value,
        Ok(Err(err)) => error_ui(&err),
        Err(_) => error_ui("panic"),
    };
    into_jstring(&env, json_value)
}

fn into_jstring(env: &JNIEnv, value: Value) -> jstring {
    match env.new_string(value.to_string()) {
        Ok(java_str) => java_str.into_raw(),
        Err(_) => {
            let fallback = error_ui("jni_new_string_failed").to_string();
            env.new_string(fallback)
                .map(|s| s.into_raw())
                .unwrap_or(ptr::null_mut())
        }
    }
}

fn dispatch_json(input: &str) -> Value {
    let command: Command = serde_json::from_str(input).unwrap_or_else(|_| Command {
        action: "error".into(),
        error: Some("invalid_json".into()),
        ..Default::default()
    });

    match handle_command(command) {
        Ok(value) => value,
        Err(err) => error_ui(&err),
    }
}

fn handle_camera_frame(
    luma: &[u8],
    width: u32,
    height: u32,
    row_stride: u32,
    rotation_deg: u16,
) -> Option<Value> {
    // Decode off the lock; only the state update below takes it.
    let config = STATE.ui_lock().0.config.clone();
    let decoded = decode_camera_frame(
        &RxingCodec,
        luma,
        width,
        height,
        row_stride,
        rotation_deg,
        &config,
    )?;

    let (mut guard, _) = STATE.ui_lock();
    let state: &mut AppState = &mut guard;
    let before = state.scanner.last_scanned_text.clone();
    let effects = state.scanner.on_decoded(Some(decoded.as_str()), &state.config);
    if effects.is_empty() && before == state.scanner.last_scanned_text {
        return None;
    }
    state.push_effects(effects);
    Some(respond(state))
}

fn handle_command(command: Command) -> Result<Value, String> {
    let (mut guard, lock_poisoned) = STATE.ui_lock();
    let state: &mut AppState = &mut guard;

    apply_worker_results(state);
    state.ensure_navigation();
    if let Some(class) = command.window_width_class {
        state.window_width_class = class;
    }

    let action = match parse_action(command) {
        Ok(action) => action,
        Err(err) => {
            log::warn!("rejected command: {err}");
            state.last_error = Some(err);
            return Ok(respond(state));
        }
    };
    state.last_error = None;

    match action {
        Action::Init { locale } => {
            logging::init();
            if let Some(locale) = locale {
                update_locale(state, &locale);
            }
        }
        Action::Reset => {
            state.reset_runtime();
            state.reset_navigation();
        }
        Action::Back => state.pop_screen(),
        Action::Poll => {}
        Action::ScannerScreen => state.navigate_to(Screen::Scanner),
        Action::CreatorScreen => state.navigate_to(Screen::Creator),
        Action::ScanResult { text } => {
            let effects = state.scanner.on_decoded(text.as_deref(), &state.config);
            state.push_effects(effects);
        }
        Action::ScanImage { source } => {
            let job_id = next_job_id();
            state.pending_scan = Some(job_id);
            let job = WorkerJob::ScanImage {
                job_id,
                source,
                max_dimension: state.config.max_decode_dimension,
            };
            if let Err(e) = STATE.worker().enqueue(job) {
                state.pending_scan = None;
                state.last_error = Some(e);
            }
            #[cfg(test)]
            {
                apply_worker_results(state);
            }
        }
        Action::ScanImageFailed { error } => {
            log::warn!("image picker failed: {error}");
            let effects = state.scanner.apply_image_scan(None, &state.config);
            state.push_effects(effects);
        }
        Action::ScanImageCancelled => {}
        Action::ScanImageErrorDismiss => state.scanner.set_show_scan_image_file_error(false),
        Action::ToggleFlash => {
            state.scanner.toggle_flash();
        }
        Action::ClearScanned => state.scanner.clear_last_scanned_text(),
        Action::ShareScanned => {
            if let Some(effect) = state.scanner.share_effect() {
                state.push_effects(vec![effect]);
            }
        }
        Action::GeneratorUpdate { bindings } => {
            apply_generator_bindings(&mut state.generator, &bindings);
        }
        Action::GeneratorFormat { bindings } => {
            apply_generator_bindings(&mut state.generator, &bindings);
            let index = bindings
                .get("format_index")
                .and_then(|v| v.trim().parse::<i64>().ok())
                .unwrap_or(0);
            state.generator.set_format_index(index);
        }
        Action::Generate { bindings } => {
            apply_generator_bindings(&mut state.generator, &bindings);
            match state.generator.begin_generate() {
                Some(request) => {
                    if let Err(e) = STATE.worker().enqueue(WorkerJob::Generate(request)) {
                        state.generator.cancel_pending();
                        state.last_error = Some(e);
                    }
                    #[cfg(test)]
                    {
                        apply_worker_results(state);
                    }
                }
                None => log::warn!("generate refused: generator input is invalid"),
            }
        }
        Action::GeneratorDismiss => state.generator.dismiss(),
        Action::ShareGenerated => {
            if let Some(effect) = state.generator.share_effect() {
                state.push_effects(vec![effect]);
            }
        }
        Action::SetLocale { locale } => update_locale(state, &locale),
        Action::Configure { config } => state.config = config,
        Action::Snapshot => {
            let snap = serde_json::to_string(&*state).map_err(|e| format!("snapshot_failed:{e}"))?;
            return Ok(json!({
                "type": "Snapshot",
                "snapshot": snap
            }));
        }
        Action::Restore { snapshot } => match serde_json::from_str::<AppState>(&snapshot) {
            Ok(mut restored) => {
                restored.ensure_navigation();
                restored.window_width_class = state.window_width_class;
                *state = restored;
                sync_locale(state);
            }
            Err(e) => {
                state.last_error = Some(format!("restore_failed:{e}"));
            }
        },
    }

    if lock_poisoned && state.last_error.is_none() {
        state.last_error = Some("state_poisoned".into());
    }

    Ok(respond(state))
}

/// Text field bindings from the creator screen. Unchanged values are skipped so
/// a resubmitted form keeps the current image.
fn apply_generator_bindings(generator: &mut GeneratorState, bindings: &HashMap<String, String>) {
    if let Some(width) = bindings.get("generator_width") {
        if *width != generator.width {
            generator.set_width(width);
        }
    }
    if let Some(height) = bindings.get("generator_height") {
        if *height != generator.height {
            generator.set_height(height);
        }
    }
    if let Some(code) = bindings.get("generator_code") {
        if *code != generator.code {
            generator.set_code(code);
        }
    }
}

fn apply_worker_results(state: &mut AppState) {
    let results = STATE.drain_worker_results();
    if results.is_empty() {
        return;
    }

    for result in results {
        match result {
            WorkerResult::ScanImage { job_id, decoded } => {
                if state.pending_scan != Some(job_id) {
                    log::debug!("dropping stale image scan result for job {job_id}");
                    continue;
                }
                state.pending_scan = None;
                let effects = state.scanner.apply_image_scan(decoded, &state.config);
                state.push_effects(effects);
            }
            WorkerResult::Generate { job_id, value } => {
                let effects = state.generator.apply_generate(job_id, value);
                state.push_effects(effects);
            }
        }
    }
}

/// Renders the current screen and hands over the queued effects.
fn respond(state: &mut AppState) -> Value {
    state.sync_screen_flags();
    let effects = state.take_effects();
    let mut ui = render_ui(state);
    if let Some(obj) = ui.as_object_mut() {
        obj.insert(
            "effects".into(),
            serde_json::to_value(&effects).unwrap_or_else(|_| json!([])),
        );
    }
    ui
}

fn error_ui(message: &str) -> Value {
    json!({
        "type": "Column",
        "padding": 24,
        "children": [
            { "type": "Text", "text": "Error", "size": 18.0 },
            { "type": "Text", "text": message }
        ]
    })
}

fn render_ui(state: &AppState) -> Value {
    let screen = state.current_screen();
    let body = match screen {
        Screen::Scanner => render_scanner_screen(&state.scanner, state.scan_pending()),
        Screen::Creator => render_creator_screen(
            &state.generator,
            state.generator.is_pending(),
            state.window_width_class,
        ),
    };

    let mut children = vec![render_top_bar(state), body];
    if let Some(err) = &state.last_error {
        children.push(to_value_or_text(
            UiText::new(err).size(12.0).content_description("last_error"),
            "root",
        ));
    }
    children.push(render_bottom_nav(screen));

    let mut root = to_value_or_text(UiColumn::new(children), "root");
    if let Some(obj) = root.as_object_mut() {
        obj.insert(
            "screen".into(),
            json!(match screen {
                Screen::Scanner => "scanner",
                Screen::Creator => "creator",
            }),
        );
        obj.insert("torch_on".into(), json!(state.scanner.flash_on));
        obj.insert(
            "show_scanner_actions".into(),
            json!(state.scanner.show_scanner_actions),
        );
        if state.has_pending_job() {
            obj.insert("auto_refresh_ms".into(), json!(PENDING_REFRESH_MS));
            obj.insert("auto_refresh_action".into(), json!("poll"));
        }
    }
    root
}

fn render_top_bar(state: &AppState) -> Value {
    let title = t!("app_name");
    let mut children = vec![to_value_or_text(UiText::new(&title).size(20.0), "top_bar")];

    if state.scanner.show_scanner_actions {
        let flash_label = if state.scanner.flash_on {
            t!("flash_off")
        } else {
            t!("flash_on")
        };
        let share = t!("share");
        let clear = t!("clear");
        let has_text = !state.scanner.last_scanned_text.is_empty();
        let columns = if has_text { 3 } else { 1 };
        let mut actions = vec![to_value_or_text(
            UiButton::new(&flash_label, "toggle_flash")
                .id("toggle_flash")
                .selected(state.scanner.flash_on),
            "top_bar",
        )];
        if has_text {
            actions.push(to_value_or_text(
                UiButton::new(&share, "share_scanned").id("share_scanned"),
                "top_bar",
            ));
            actions.push(to_value_or_text(
                UiButton::new(&clear, "clear_scanned").id("clear_scanned"),
                "top_bar",
            ));
        }
        children.push(to_value_or_text(
            UiGrid::new(actions)
                .columns(columns)
                .content_description("scanner_actions"),
            "top_bar",
        ));
    }

    to_value_or_text(
        UiColumn::new(children).padding(8).id("TopBar"),
        "top_bar",
    )
}

fn render_bottom_nav(screen: Screen) -> Value {
    let scanner = t!("scanner");
    let creator = t!("creator");
    let items = vec![
        to_value_or_text(
            UiButton::new(&scanner, "scanner_screen")
                .id("nav_scanner")
                .selected(screen == Screen::Scanner),
            "bottom_nav",
        ),
        to_value_or_text(
            UiButton::new(&creator, "creator_screen")
                .id("nav_creator")
                .selected(screen == Screen::Creator),
            "bottom_nav",
        ),
    ];
    to_value_or_text(
        UiGrid::new(items)
            .columns(2)
            .content_description("bottom_navigation"),
        "bottom_nav",
    )
}
