use axum::{extract::Query, Json};
use bytes::Bytes;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

lazy_static! {
    // The fixed word list the demo censors.
    static ref CENSOR_RE: Regex = Regex::new(r"(?i)(malo|feo|tonto)").unwrap();
}

const MASK: &str = "***";
const PREVIEW_CHARS: usize = 150;

/// Replace every occurrence of the censored words, case-insensitively.
pub fn censor_text(texto: &str) -> String {
    CENSOR_RE.replace_all(texto, MASK).into_owned()
}

/// First 150 characters of the censored content, always suffixed, matching
/// what gets logged.
pub fn preview(texto: &str) -> String {
    let cut: String = texto.chars().take(PREVIEW_CHARS).collect();
    format!("{cut}...")
}

#[derive(Debug, Deserialize)]
pub struct CensorParams {
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CensorResponse {
    pub message: String,
    pub name: String,
    pub bytes: usize,
}

/// HTTP rendition of the blob-created trigger: receives the raw blob bytes,
/// censors, and logs. Nothing is persisted; this is observational behavior.
#[instrument(skip(body))]
pub async fn censurar_blob(
    Query(params): Query<CensorParams>,
    body: Bytes,
) -> Json<CensorResponse> {
    let name = params.name.unwrap_or_else(|| "(sin nombre)".into());
    info!(blob = %name, bytes = body.len(), "blob detected");

    let contenido = String::from_utf8_lossy(&body);
    let censurado = censor_text(&contenido);
    info!(preview = %preview(&censurado), "censored content");

    Json(CensorResponse {
        message: "Blob procesado".into(),
        name,
        bytes: body.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_each_listed_word() {
        assert_eq!(censor_text("un final malo"), "un final ***");
        assert_eq!(censor_text("feo"), "***");
        assert_eq!(censor_text("qué tonto giro"), "qué *** giro");
    }

    #[test]
    fn masking_is_case_insensitive() {
        assert_eq!(censor_text("MALO Feo tONTO"), "*** *** ***");
    }

    #[test]
    fn other_text_is_untouched() {
        let texto = "una película estupenda";
        assert_eq!(censor_text(texto), texto);
    }

    #[test]
    fn preview_truncates_long_content() {
        let largo = "a".repeat(500);
        let p = preview(&largo);
        assert_eq!(p.chars().count(), 153);
        assert!(p.ends_with("..."));
    }

    #[test]
    fn preview_respects_multibyte_boundaries() {
        let texto = "ñ".repeat(200);
        let p = preview(&texto);
        assert!(p.starts_with("ñ"));
        assert!(p.ends_with("..."));
    }
}
