//! Localization for the dashboard.
//!
//! Bundles live under `i18n/<lang>/cragstats-ui.ftl` and are embedded at
//! compile time. `en-US` is the fallback and the reference for completeness
//! tests.
//!
//! ```ignore
//! ui::i18n::init();
//! let title = ui::t!("chart-country-title");
//! let label = ui::t!("filter-age-label", min = 18, max = 60);
//! ```
//!
//! Chart labels that depend on backend data (gender codes, experience
//! buckets) go through [`tr`] / [`tr_args`] since their keys are only known
//! at runtime.
use std::collections::HashMap;
use std::sync::Once;

use i18n_embed::fluent::FluentLanguageLoader;
use i18n_embed::LanguageLoader;
use once_cell::sync::Lazy;
use rust_embed::Embed;
use tracing::warn;
use unic_langid::LanguageIdentifier;

pub use i18n_embed_fl::fl;

/// `t!("nav-home")` or `t!("filter-age-label", min = 18, max = 60)`, routed
/// through [`LOADER`].
#[macro_export]
macro_rules! t {
    ($key:literal) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key)
    };
    ($key:literal, $( $arg:ident = $value:expr ),+ $(,)?) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key, $( $arg = $value ),+ )
    };
}

/// Must match the FTL filename.
const DOMAIN: &str = "cragstats-ui";

#[derive(Embed)]
#[folder = "i18n"]
struct Localizations;

pub static LOADER: Lazy<FluentLanguageLoader> = Lazy::new(|| {
    let fallback: LanguageIdentifier = "en-US".parse().expect("valid fallback language identifier");
    FluentLanguageLoader::new(DOMAIN, fallback)
});

static INIT: Once = Once::new();

/// Load bundles for the user's preferred languages (idempotent).
pub fn init() {
    INIT.call_once(|| {
        let requested = requested_languages();
        if let Err(err) = i18n_embed::select(&*LOADER, &Localizations, &requested) {
            warn!("failed selecting languages ({err}); continuing with fallback");
        }
    });
}

/// Switch language at runtime. Unparseable tags are ignored.
pub fn set_language(tag: &str) -> Result<(), i18n_embed::I18nEmbedError> {
    let Ok(lang) = tag.parse::<LanguageIdentifier>() else {
        return Ok(());
    };
    i18n_embed::select(&*LOADER, &Localizations, &[lang]).map(|_| ())
}

/// Language tags with an embedded bundle, sorted.
pub fn available_languages() -> Vec<String> {
    let mut langs = Localizations::iter()
        .filter_map(|path| path.split('/').next().map(|s| s.to_string()))
        .collect::<Vec<_>>();
    langs.sort();
    langs.dedup();
    langs
}

/// Language currently shown, falling back to `en-US`.
pub fn current_language() -> String {
    LOADER
        .current_languages()
        .first()
        .map(|l| l.to_string())
        .unwrap_or_else(|| "en-US".to_string())
}

/// Runtime-keyed lookup. Unknown keys come back unchanged.
pub fn tr(key: &str) -> String {
    if LOADER.has(key) {
        LOADER.get(key)
    } else {
        key.to_string()
    }
}

/// Runtime-keyed lookup with Fluent arguments.
pub fn tr_args(key: &str, args: HashMap<&str, String>) -> String {
    if LOADER.has(key) {
        LOADER.get_args(key, args)
    } else {
        key.to_string()
    }
}

#[cfg(target_arch = "wasm32")]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::WebLanguageRequester::requested_languages()
}

#[cfg(not(target_arch = "wasm32"))]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::DesktopLanguageRequester::requested_languages()
}
