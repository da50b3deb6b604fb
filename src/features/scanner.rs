//! Scan session: the last decoded text, the torch toggle and the flags the
//! scanner screen renders from. Decode callbacks from the camera and results
//! from picked image files both funnel through [`ScanState::on_decoded`].

use crate::config::{DuplicatePolicy, ScannerConfig};
use crate::error::CoreResult;
use crate::features::codec::{image_to_argb, luma_from_plane, prepare_argb, CodeDecoder};
use crate::features::share::{mime_for_text, MIME_URI_LIST};
use crate::state::Effect;
use crate::ui::{
    to_value_or_text, Button as UiButton, Column as UiColumn, Dialog as UiDialog,
    Progress as UiProgress, Text as UiText,
};
use rust_i18n::t;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanState {
    pub last_scanned_text: String,
    pub flash_on: bool,
    pub show_scanner_actions: bool,
    pub show_scan_image_file_error: bool,
    /// Text most recently handed to the clipboard.
    pub clipboard_text: String,
}

impl ScanState {
    pub const fn new() -> Self {
        Self {
            last_scanned_text: String::new(),
            flash_on: false,
            show_scanner_actions: false,
            show_scan_image_file_error: false,
            clipboard_text: String::new(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Applies one decode callback and returns the host signals it triggers.
    ///
    /// `None` is always ignored. Under [`DuplicatePolicy::Suppress`] a value equal
    /// to the current text is ignored too, so a code held in front of the camera
    /// vibrates and copies once.
    pub fn on_decoded(&mut self, text: Option<&str>, config: &ScannerConfig) -> Vec<Effect> {
        let Some(text) = text else {
            return Vec::new();
        };
        let duplicate = text == self.last_scanned_text;
        if duplicate && config.duplicate_policy == DuplicatePolicy::Suppress {
            return Vec::new();
        }

        self.last_scanned_text = text.to_string();
        self.show_scan_image_file_error = false;
        self.notify(text, config)
    }

    fn notify(&mut self, text: &str, config: &ScannerConfig) -> Vec<Effect> {
        if text.is_empty() {
            return Vec::new();
        }
        if config.duplicate_policy == DuplicatePolicy::Suppress && text == self.clipboard_text {
            return Vec::new();
        }
        self.clipboard_text = text.to_string();
        vec![
            Effect::Vibrate {
                duration_ms: config.vibrate_ms,
            },
            Effect::CopyToClipboard {
                text: text.to_string(),
            },
        ]
    }

    pub fn clear_last_scanned_text(&mut self) {
        self.last_scanned_text.clear();
    }

    pub fn toggle_flash(&mut self) -> bool {
        self.flash_on = !self.flash_on;
        self.flash_on
    }

    pub fn set_show_scanner_actions(&mut self, show: bool) {
        self.show_scanner_actions = show;
    }

    pub fn set_show_scan_image_file_error(&mut self, show: bool) {
        self.show_scan_image_file_error = show;
    }

    /// Folds the outcome of an image-file scan into state. Every failure
    /// (no symbol, unreadable file, bad buffer) ends up as the error flag.
    pub fn apply_image_scan(
        &mut self,
        decoded: Option<String>,
        config: &ScannerConfig,
    ) -> Vec<Effect> {
        match decoded {
            Some(text) => self.on_decoded(Some(&text), config),
            None => {
                self.clear_last_scanned_text();
                self.set_show_scan_image_file_error(true);
                Vec::new()
            }
        }
    }

    /// Decodes a picked image given as packed ARGB pixels. Never fails: a
    /// missing symbol turns into `show_scan_image_file_error`.
    pub fn decode_image(
        &mut self,
        pixels: &[u32],
        width: u32,
        height: u32,
        decoder: &dyn CodeDecoder,
        config: &ScannerConfig,
    ) -> Vec<Effect> {
        let decoded = scan_pixels(decoder, pixels, width, height, config.max_decode_dimension);
        self.apply_image_scan(decoded, config)
    }

    /// [`decode_image`](Self::decode_image) for an encoded file (PNG, JPEG, WebP).
    pub fn decode_image_bytes(
        &mut self,
        bytes: &[u8],
        decoder: &dyn CodeDecoder,
        config: &ScannerConfig,
    ) -> Vec<Effect> {
        let decoded = scan_image_bytes(decoder, bytes, config.max_decode_dimension);
        self.apply_image_scan(decoded, config)
    }

    pub fn share_effect(&self) -> Option<Effect> {
        if self.last_scanned_text.is_empty() {
            return None;
        }
        let mime = mime_for_text(&self.last_scanned_text);
        Some(Effect::ShareText {
            text: self.last_scanned_text.clone(),
            mime: mime.to_string(),
            open_url: mime == MIME_URI_LIST,
        })
    }
}

/// Side-effect free half of an image-file scan, safe to run off the state lock.
pub fn scan_pixels(
    decoder: &dyn CodeDecoder,
    pixels: &[u32],
    width: u32,
    height: u32,
    max_dimension: u32,
) -> Option<String> {
    let attempt = || -> CoreResult<Option<String>> {
        let gray = prepare_argb(pixels, width, height, max_dimension)?;
        decoder.decode(&gray, &[], true)
    };
    match attempt() {
        Ok(decoded) => decoded,
        Err(e) => {
            log::warn!("image scan failed: {e}");
            None
        }
    }
}

/// Like [`scan_pixels`], for an encoded image file.
pub fn scan_image_bytes(
    decoder: &dyn CodeDecoder,
    bytes: &[u8],
    max_dimension: u32,
) -> Option<String> {
    match image_to_argb(bytes) {
        Ok((pixels, width, height)) => scan_pixels(decoder, &pixels, width, height, max_dimension),
        Err(e) => {
            log::warn!("unreadable image file: {e}");
            None
        }
    }
}

/// One camera analysis frame. Errors are logged and read as "nothing found".
pub fn decode_camera_frame(
    decoder: &dyn CodeDecoder,
    luma: &[u8],
    width: u32,
    height: u32,
    row_stride: u32,
    rotation_deg: u16,
    config: &ScannerConfig,
) -> Option<String> {
    let attempt = || -> CoreResult<Option<String>> {
        let gray = luma_from_plane(luma, width, height, row_stride, rotation_deg)?;
        decoder.decode(&gray, &config.camera_formats(), false)
    };
    match attempt() {
        Ok(decoded) => decoded,
        Err(e) => {
            log::debug!("camera frame skipped: {e}");
            None
        }
    }
}

pub fn render_scanner_screen(state: &ScanState, scan_pending: bool) -> Value {
    let mut children = Vec::new();

    if !state.last_scanned_text.trim().is_empty() {
        children.push(to_value_or_text(
            UiText::new(&state.last_scanned_text)
                .size(24.0)
                .max_lines(3)
                .content_description("last_scanned_text"),
            "scanner",
        ));
    } else {
        let hint = t!("scanner_hint");
        children.push(to_value_or_text(UiText::new(&hint).size(14.0), "scanner"));
    }

    let pick_label = t!("scan_image_file");
    children.push(to_value_or_text(
        UiButton::new(&pick_label, "scan_image_fd")
            .requires_file_picker(true)
            .id("scan_image_fd"),
        "scanner",
    ));

    if scan_pending {
        let busy = t!("scanning_image");
        children.push(to_value_or_text(
            UiProgress::new().text(&busy).content_description("scan_progress"),
            "scanner",
        ));
    }

    if state.show_scan_image_file_error {
        let title = t!("scan_image_file");
        let text = t!("no_code_found");
        let ok = t!("ok");
        children.push(to_value_or_text(
            UiDialog::new(&title, &text, &ok, "scan_image_error_dismiss"),
            "scanner",
        ));
    }

    to_value_or_text(
        UiColumn::new(children).padding(16).id("ScannerScreen"),
        "scanner",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use image::GrayImage;

    struct FixedDecoder(Option<&'static str>);

    impl CodeDecoder for FixedDecoder {
        fn decode(
            &self,
            _image: &GrayImage,
            _formats: &[crate::features::codec::Symbology],
            try_harder: bool,
        ) -> CoreResult<Option<String>> {
            assert!(try_harder, "image files are always decoded with try-harder");
            Ok(self.0.map(str::to_string))
        }
    }

    struct BrokenDecoder;

    impl CodeDecoder for BrokenDecoder {
        fn decode(
            &self,
            _image: &GrayImage,
            _formats: &[crate::features::codec::Symbology],
            _try_harder: bool,
        ) -> CoreResult<Option<String>> {
            Err(CoreError::Decode("boom".into()))
        }
    }

    /// Echoes the requested formats back as the decoded text.
    struct AnyFormatDecoder;

    impl CodeDecoder for AnyFormatDecoder {
        fn decode(
            &self,
            _image: &GrayImage,
            formats: &[crate::features::codec::Symbology],
            try_harder: bool,
        ) -> CoreResult<Option<String>> {
            assert!(!try_harder);
            let names: Vec<String> = formats
                .iter()
                .map(|f| serde_json::to_value(f).unwrap().as_str().unwrap().to_string())
                .collect();
            Ok(Some(names.join(",")))
        }
    }

    fn white(width: u32, height: u32) -> Vec<u32> {
        vec![0xFFFF_FFFF; (width * height) as usize]
    }

    #[test]
    fn first_decode_signals_vibrate_and_copy() {
        let cfg = ScannerConfig::new();
        let mut scan = ScanState::new();
        let effects = scan.on_decoded(Some("hello"), &cfg);
        assert_eq!(
            effects,
            vec![
                Effect::Vibrate { duration_ms: 100 },
                Effect::CopyToClipboard {
                    text: "hello".into()
                },
            ]
        );
        assert_eq!(scan.last_scanned_text, "hello");
    }

    #[test]
    fn identical_redelivery_is_suppressed() {
        let cfg = ScannerConfig::new();
        let mut scan = ScanState::new();
        scan.on_decoded(Some("4006381333931"), &cfg);
        let before = scan.clone();
        assert!(scan.on_decoded(Some("4006381333931"), &cfg).is_empty());
        assert_eq!(scan, before);
    }

    #[test]
    fn null_callbacks_are_ignored() {
        let cfg = ScannerConfig::new();
        let mut scan = ScanState::new();
        scan.on_decoded(Some("a"), &cfg);
        assert!(scan.on_decoded(None, &cfg).is_empty());
        assert_eq!(scan.last_scanned_text, "a");
    }

    #[test]
    fn retrigger_policy_repeats_signals() {
        let cfg = ScannerConfig {
            duplicate_policy: DuplicatePolicy::Retrigger,
            ..ScannerConfig::new()
        };
        let mut scan = ScanState::new();
        assert_eq!(scan.on_decoded(Some("x"), &cfg).len(), 2);
        assert_eq!(scan.on_decoded(Some("x"), &cfg).len(), 2);
    }

    #[test]
    fn cleared_text_is_shown_again_but_not_recopied() {
        let cfg = ScannerConfig::new();
        let mut scan = ScanState::new();
        scan.on_decoded(Some("same"), &cfg);
        scan.clear_last_scanned_text();
        let effects = scan.on_decoded(Some("same"), &cfg);
        assert_eq!(scan.last_scanned_text, "same");
        assert!(effects.is_empty());
    }

    #[test]
    fn new_decode_clears_image_error() {
        let cfg = ScannerConfig::new();
        let mut scan = ScanState::new();
        scan.set_show_scan_image_file_error(true);
        scan.on_decoded(Some("next"), &cfg);
        assert!(!scan.show_scan_image_file_error);
    }

    #[test]
    fn clear_keeps_flash() {
        let cfg = ScannerConfig::new();
        let mut scan = ScanState::new();
        scan.toggle_flash();
        scan.on_decoded(Some("t"), &cfg);
        scan.clear_last_scanned_text();
        assert!(scan.last_scanned_text.is_empty());
        assert!(scan.flash_on);
    }

    #[test]
    fn toggle_flash_twice_restores_original() {
        let mut scan = ScanState::new();
        let original = scan.flash_on;
        assert_ne!(scan.toggle_flash(), original);
        scan.toggle_flash();
        assert_eq!(scan.flash_on, original);
    }

    #[test]
    fn image_without_symbol_sets_error_flag() {
        let cfg = ScannerConfig::new();
        let mut scan = ScanState::new();
        let effects = scan.decode_image(&white(10, 10), 10, 10, &FixedDecoder(None), &cfg);
        assert!(effects.is_empty());
        assert!(scan.show_scan_image_file_error);
        assert!(scan.last_scanned_text.is_empty());
    }

    #[test]
    fn image_failure_clears_previous_text() {
        let cfg = ScannerConfig::new();
        let mut scan = ScanState::new();
        scan.on_decoded(Some("old"), &cfg);
        scan.decode_image(&white(4, 4), 4, 4, &BrokenDecoder, &cfg);
        assert!(scan.last_scanned_text.is_empty());
        assert!(scan.show_scan_image_file_error);
    }

    #[test]
    fn malformed_buffer_is_a_scan_failure() {
        let cfg = ScannerConfig::new();
        let mut scan = ScanState::new();
        scan.decode_image(&white(2, 2), 5, 5, &FixedDecoder(Some("never")), &cfg);
        assert!(scan.show_scan_image_file_error);
    }

    #[test]
    fn image_success_goes_through_on_decoded() {
        let cfg = ScannerConfig::new();
        let mut scan = ScanState::new();
        scan.set_show_scan_image_file_error(true);
        let effects = scan.decode_image(
            &white(1200, 1500),
            1200,
            1500,
            &FixedDecoder(Some("from file")),
            &cfg,
        );
        assert_eq!(scan.last_scanned_text, "from file");
        assert!(!scan.show_scan_image_file_error);
        assert_eq!(effects.len(), 2);
    }

    #[test]
    fn share_uses_uri_list_for_links() {
        let cfg = ScannerConfig::new();
        let mut scan = ScanState::new();
        assert!(scan.share_effect().is_none());
        scan.on_decoded(Some("https://example.com"), &cfg);
        assert_eq!(
            scan.share_effect(),
            Some(Effect::ShareText {
                text: "https://example.com".into(),
                mime: "text/uri-list".into(),
                open_url: true,
            })
        );
    }

    #[test]
    fn unreadable_file_sets_error_flag() {
        let cfg = ScannerConfig::new();
        let mut scan = ScanState::new();
        scan.decode_image_bytes(b"not an image", &FixedDecoder(Some("x")), &cfg);
        assert!(scan.show_scan_image_file_error);
    }

    #[test]
    fn png_file_is_decoded_through_pixels() {
        let cfg = ScannerConfig::new();
        let mut scan = ScanState::new();
        let png = crate::features::codec::encode_png(&GrayImage::new(20, 20)).unwrap();
        scan.decode_image_bytes(&png, &FixedDecoder(Some("file text")), &cfg);
        assert_eq!(scan.last_scanned_text, "file text");
    }

    #[test]
    fn camera_frame_with_short_buffer_is_skipped() {
        let cfg = ScannerConfig::new();
        let decoded = decode_camera_frame(&AnyFormatDecoder, &[0u8; 10], 8, 8, 8, 0, &cfg);
        assert!(decoded.is_none());
    }

    #[test]
    fn camera_frame_uses_configured_formats() {
        let cfg = ScannerConfig::new();
        let frame = vec![128u8; 16 * 8];
        let decoded = decode_camera_frame(&AnyFormatDecoder, &frame, 8, 8, 16, 90, &cfg);
        assert_eq!(decoded.as_deref(), Some("qr_code,code39"));
    }

    #[test]
    fn render_shows_dialog_only_on_error() {
        let mut scan = ScanState::new();
        let ui = render_scanner_screen(&scan, false);
        assert!(!ui.to_string().contains("\"Dialog\""));
        scan.set_show_scan_image_file_error(true);
        let ui = render_scanner_screen(&scan, false);
        assert!(ui.to_string().contains("scan_image_error_dismiss"));
    }
}
