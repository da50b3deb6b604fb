use crate::state::AppState;

pub const SUPPORTED_LOCALES: [&str; 2] = ["en", "de"];

pub fn update_locale(state: &mut AppState, locale_str: &str) {
    let normalized = normalize_locale(locale_str);
    state.locale = normalized.to_string();
    rust_i18n::set_locale(normalized);
}

/// Re-applies the stored locale, e.g. after a snapshot restore.
pub fn sync_locale(state: &mut AppState) {
    let locale = state.locale.clone();
    update_locale(state, &locale);
}

fn normalize_locale(locale_str: &str) -> &'static str {
    let trimmed = locale_str.trim();
    if trimmed.is_empty() {
        return "en";
    }

    // Compiled locales are bare language codes; "de-AT" and "de_CH" map to "de".
    let lower = trimmed.to_ascii_lowercase().replace('_', "-");
    let lang = lower.split('-').next().unwrap_or("en");

    SUPPORTED_LOCALES
        .iter()
        .copied()
        .find(|supported| *supported == lang)
        .unwrap_or("en")
}

#[cfg(test)]
mod tests {
    use super::normalize_locale;

    #[test]
    fn region_tags_fall_back_to_language() {
        assert_eq!(normalize_locale("de-DE"), "de");
        assert_eq!(normalize_locale("de_AT"), "de");
        assert_eq!(normalize_locale("EN-us"), "en");
    }

    #[test]
    fn unknown_or_blank_locales_use_english() {
        assert_eq!(normalize_locale("fr-FR"), "en");
        assert_eq!(normalize_locale("   "), "en");
    }
}
