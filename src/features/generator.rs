use crate::error::{CoreError, CoreResult};
use crate::features::codec::{encode_png, CodeEncoder, Symbology};
use crate::features::share::MIME_PNG;
use crate::features::storage::write_generated_png;
use crate::state::{next_job_id, Effect, WindowWidthClass};
use crate::ui::{
    to_value_or_text, Button as UiButton, Column as UiColumn, Dialog as UiDialog, Grid as UiGrid,
    ImageBase64 as UiImageBase64, Progress as UiProgress, TextInput as UiTextInput,
};
use base64::Engine;
use rust_i18n::t;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const MIN_DIMENSION: u32 = 200;
pub const MAX_DIMENSION: u32 = 800;
pub const DEFAULT_DIMENSION: &str = "400";

/// Symbologies offered by the generator, in the order of the format selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CodeFormat {
    #[default]
    Qr,
    Ean13,
    Aztec,
    DataMatrix,
}

impl CodeFormat {
    pub const ALL: [CodeFormat; 4] = [
        CodeFormat::Qr,
        CodeFormat::Ean13,
        CodeFormat::Aztec,
        CodeFormat::DataMatrix,
    ];

    /// Unknown indices fall back to QR.
    pub fn from_index(index: i64) -> Self {
        match index {
            1 => CodeFormat::Ean13,
            2 => CodeFormat::Aztec,
            3 => CodeFormat::DataMatrix,
            _ => CodeFormat::Qr,
        }
    }

    pub fn index(self) -> usize {
        match self {
            CodeFormat::Qr => 0,
            CodeFormat::Ean13 => 1,
            CodeFormat::Aztec => 2,
            CodeFormat::DataMatrix => 3,
        }
    }

    pub fn symbology(self) -> Symbology {
        match self {
            CodeFormat::Qr => Symbology::QrCode,
            CodeFormat::Ean13 => Symbology::Ean13,
            CodeFormat::Aztec => Symbology::Aztec,
            CodeFormat::DataMatrix => Symbology::DataMatrix,
        }
    }

    fn is_valid_code(self, code: &str) -> bool {
        match self {
            CodeFormat::Ean13 => is_all_digits(code) && (12..=13).contains(&code.len()),
            _ => !code.is_empty(),
        }
    }

    fn code_hint_key(self) -> &'static str {
        match self {
            CodeFormat::Ean13 => "must_be_12_or_13_digits",
            _ => "cannot_be_empty",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImage {
    pub width: u32,
    pub height: u32,
    pub png_base64: String,
    /// Cache export handed to the share sheet, when writing it succeeded.
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GeneratorOutcome {
    #[default]
    Idle,
    Success(GeneratedImage),
    Failed(String),
}

/// Everything an encode needs, captured from validated state so the work can
/// run without holding the state lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    /// Matches the result back to the state that issued it.
    pub job_id: u64,
    pub code: String,
    pub format: CodeFormat,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorState {
    pub width: String,
    pub height: String,
    pub code: String,
    pub format: CodeFormat,
    pub generator_exception_message: String,
    #[serde(skip)]
    pub outcome: GeneratorOutcome,
    /// Encode in flight. Edits, dismiss and reset clear it, which turns any
    /// result still on its way into a stale one.
    #[serde(skip)]
    pending_job: Option<u64>,
}

impl Default for GeneratorState {
    fn default() -> Self {
        Self::new()
    }
}

impl GeneratorState {
    pub fn new() -> Self {
        Self {
            width: DEFAULT_DIMENSION.into(),
            height: DEFAULT_DIMENSION.into(),
            code: String::new(),
            format: CodeFormat::Qr,
            generator_exception_message: String::new(),
            outcome: GeneratorOutcome::Idle,
            pending_job: None,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn set_width(&mut self, width: &str) {
        self.width = width.to_string();
        self.dismiss();
    }

    pub fn set_height(&mut self, height: &str) {
        self.height = height.to_string();
        self.dismiss();
    }

    pub fn set_code(&mut self, code: &str) {
        self.code = code.to_string();
        self.dismiss();
    }

    pub fn set_format(&mut self, format: CodeFormat) {
        self.format = format;
        self.dismiss();
    }

    pub fn set_format_index(&mut self, index: i64) {
        self.set_format(CodeFormat::from_index(index));
    }

    /// Back to `Idle`: drops the generated image, any failure message and any
    /// encode still running for the old inputs.
    pub fn dismiss(&mut self) {
        self.outcome = GeneratorOutcome::Idle;
        self.generator_exception_message.clear();
        self.pending_job = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending_job.is_some()
    }

    /// Forgets the in-flight encode without touching the outcome.
    pub fn cancel_pending(&mut self) {
        self.pending_job = None;
    }

    pub fn clear_image(&mut self) {
        if matches!(self.outcome, GeneratorOutcome::Success(_)) {
            self.outcome = GeneratorOutcome::Idle;
        }
    }

    pub fn is_width_error(&self) -> bool {
        parse_dimension(&self.width).is_none()
    }

    pub fn is_height_error(&self) -> bool {
        parse_dimension(&self.height).is_none()
    }

    pub fn is_code_error(&self) -> bool {
        !self.format.is_valid_code(&self.code)
    }

    pub fn can_generate(&self) -> bool {
        !self.is_width_error() && !self.is_height_error() && !self.is_code_error()
    }

    pub fn code_error_hint(&self) -> &'static str {
        self.format.code_hint_key()
    }

    pub fn image(&self) -> Option<&GeneratedImage> {
        match &self.outcome {
            GeneratorOutcome::Success(image) => Some(image),
            _ => None,
        }
    }

    /// Marks a new encode as pending and returns it, or `None` while any field
    /// is invalid. A newer request supersedes one still in flight.
    pub fn begin_generate(&mut self) -> Option<GenerateRequest> {
        if !self.can_generate() {
            return None;
        }
        let request = GenerateRequest {
            job_id: next_job_id(),
            code: self.code.clone(),
            format: self.format,
            width: parse_dimension(&self.width)?,
            height: parse_dimension(&self.height)?,
        };
        self.pending_job = Some(request.job_id);
        Some(request)
    }

    /// Stores the result of encode `job_id`; a failure keeps no image and
    /// records its message. Results for anything but the pending job are dropped.
    pub fn apply_generate(
        &mut self,
        job_id: u64,
        result: CoreResult<GeneratedImage>,
    ) -> Vec<Effect> {
        if self.pending_job != Some(job_id) {
            log::debug!("dropping stale encode result for job {job_id}");
            return Vec::new();
        }
        self.pending_job = None;
        match result {
            Ok(image) => {
                let effects = image
                    .path
                    .as_ref()
                    .map(|path| Effect::ShareImage {
                        path: path.clone(),
                        mime: MIME_PNG.to_string(),
                    })
                    .into_iter()
                    .collect();
                self.generator_exception_message.clear();
                self.outcome = GeneratorOutcome::Success(image);
                effects
            }
            Err(e) => {
                let message = e.user_message();
                log::error!("encode failed: {message}");
                self.generator_exception_message = message.clone();
                self.outcome = GeneratorOutcome::Failed(message);
                Vec::new()
            }
        }
    }

    /// Synchronous generate. Callers check [`can_generate`](Self::can_generate)
    /// first; an invalid state is refused and left untouched.
    pub fn generate(&mut self, encoder: &dyn CodeEncoder) -> Vec<Effect> {
        match self.begin_generate() {
            Some(request) => {
                let result = run_generate(encoder, &request);
                self.apply_generate(request.job_id, result)
            }
            None => {
                log::warn!("generate called with invalid generator input");
                Vec::new()
            }
        }
    }

    pub fn share_effect(&self) -> Option<Effect> {
        let path = self.image()?.path.clone()?;
        Some(Effect::ShareImage {
            path,
            mime: MIME_PNG.to_string(),
        })
    }
}

/// Encode plus PNG export; the state-free half of [`GeneratorState::generate`].
pub fn run_generate(
    encoder: &dyn CodeEncoder,
    request: &GenerateRequest,
) -> CoreResult<GeneratedImage> {
    let bitmap = encoder.encode(
        &request.code,
        request.format.symbology(),
        request.width,
        request.height,
    )?;
    let png = encode_png(&bitmap).map_err(|e| CoreError::Encode(e.to_string()))?;
    let path = match write_generated_png(&png) {
        Ok(path) => Some(path.to_string_lossy().into_owned()),
        Err(e) => {
            log::warn!("could not export generated image: {e}");
            None
        }
    };
    Ok(GeneratedImage {
        width: bitmap.width(),
        height: bitmap.height(),
        png_base64: base64::engine::general_purpose::STANDARD.encode(png),
        path,
    })
}

fn is_all_digits(text: &str) -> bool {
    text.chars().all(|c| c.is_ascii_digit())
}

/// Non-empty, ASCII digits only, within `[MIN_DIMENSION, MAX_DIMENSION]`.
pub fn parse_dimension(text: &str) -> Option<u32> {
    if text.is_empty() || !is_all_digits(text) {
        return None;
    }
    text.parse::<u32>()
        .ok()
        .filter(|v| (MIN_DIMENSION..=MAX_DIMENSION).contains(v))
}

pub fn render_creator_screen(
    state: &GeneratorState,
    generate_pending: bool,
    window: WindowWidthClass,
) -> Value {
    let range_hint = t!("range_hint", min = MIN_DIMENSION, max = MAX_DIMENSION);
    let width_label = t!("width_in_pixel");
    let height_label = t!("height_in_pixel");
    let code_label = t!("code");
    let code_hint = t!(state.code_error_hint());

    let width_error: &str = if state.is_width_error() { &range_hint } else { "" };
    let height_error: &str = if state.is_height_error() { &range_hint } else { "" };
    let code_error: &str = if state.is_code_error() { &code_hint } else { "" };
    let submit = if state.can_generate() { "generate" } else { "generator_update" };

    let dimension_fields = vec![
        to_value_or_text(
            UiTextInput::new("generator_width")
                .text(&state.width)
                .hint(&width_label)
                .error(width_error)
                .numeric()
                .single_line(true)
                .debounce_ms(150)
                .action_on_change("generator_update")
                .action_on_submit(submit),
            "creator",
        ),
        to_value_or_text(
            UiTextInput::new("generator_height")
                .text(&state.height)
                .hint(&height_label)
                .error(height_error)
                .numeric()
                .single_line(true)
                .debounce_ms(150)
                .action_on_change("generator_update")
                .action_on_submit(submit),
            "creator",
        ),
    ];

    let mut children = Vec::new();
    if window == WindowWidthClass::Compact {
        children.extend(dimension_fields);
    } else {
        children.push(to_value_or_text(
            UiGrid::new(dimension_fields).columns(2),
            "creator",
        ));
    }

    children.push(to_value_or_text(
        UiTextInput::new("generator_code")
            .text(&state.code)
            .hint(&code_label)
            .error(code_error)
            .single_line(true)
            .debounce_ms(150)
            .action_on_change("generator_update")
            .action_on_submit(submit),
        "creator",
    ));

    let labels: Vec<_> = CodeFormat::ALL
        .iter()
        .map(|f| t!(format_label_key(*f)))
        .collect();
    let format_buttons: Vec<Value> = CodeFormat::ALL
        .iter()
        .zip(labels.iter())
        .map(|(format, label)| {
            to_value_or_text(
                UiButton::new(label, "generator_format")
                    .selected(*format == state.format)
                    .payload(json!({ "format_index": format.index().to_string() })),
                "creator",
            )
        })
        .collect();
    children.push(to_value_or_text(
        UiGrid::new(format_buttons)
            .columns(4)
            .content_description("format_selector"),
        "creator",
    ));

    let generate_label = t!("generate");
    let generating_label = t!("generating");
    if generate_pending {
        children.push(to_value_or_text(
            UiProgress::new()
                .text(&generating_label)
                .content_description("generate_progress"),
            "creator",
        ));
    } else if state.can_generate() {
        children.push(to_value_or_text(
            UiButton::new(&generate_label, "generate").id("generate"),
            "creator",
        ));
    }

    if let Some(image) = state.image() {
        let description = t!("generated_code");
        children.push(to_value_or_text(
            UiImageBase64::new(&image.png_base64).content_description(&description),
            "creator",
        ));
        if image.path.is_some() {
            let share = t!("share");
            children.push(to_value_or_text(
                UiButton::new(&share, "share_generated").id("share_generated"),
                "creator",
            ));
        }
    }

    if !state.generator_exception_message.is_empty() {
        let title = t!("could_not_generate_code");
        let ok = t!("ok");
        children.push(to_value_or_text(
            UiDialog::new(
                &title,
                &state.generator_exception_message,
                &ok,
                "generator_dismiss",
            ),
            "creator",
        ));
    }

    to_value_or_text(
        UiColumn::new(children).padding(16).id("CreatorScreen"),
        "creator",
    )
}

fn format_label_key(format: CodeFormat) -> &'static str {
    match format {
        CodeFormat::Qr => "qrcode",
        CodeFormat::Ean13 => "ean13",
        CodeFormat::Aztec => "aztec",
        CodeFormat::DataMatrix => "data_matrix",
    }
}
