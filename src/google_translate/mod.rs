use anyhow::{bail, Result};
use reqwest::Url;
use tap::Tap;

use crate::model::{Engine, GoogleRequest};

pub const DEFAULT_HOST: &str = "https://translate.google.com";

/// One `translate_tts` URL per chunk of `text`. Nothing is fetched.
pub fn request_urls(host: &Url, request: &GoogleRequest, text: &str) -> Result<Vec<Url>> {
    if host.cannot_be_a_base() {
        bail!("Cannot be base: {host}");
    }

    let endpoint = host.clone().tap_mut(|u| {
        if let Ok(mut segments) = u.path_segments_mut() {
            segments.pop_if_empty().push("translate_tts");
        }
    });

    let parts = crate::tts::chunks_for(Engine::Google, text.trim());
    let total = parts.len().to_string();

    let urls = parts
        .iter()
        .enumerate()
        .map(|(idx, part)| {
            endpoint.clone().tap_mut(|u| {
                u.query_pairs_mut()
                    .append_pair("ie", "UTF-8")
                    .append_pair("q", part)
                    .append_pair("tl", &request.language_code)
                    .append_pair("total", &total)
                    .append_pair("idx", &idx.to_string())
                    .append_pair("textlen", &part.chars().count().to_string())
                    .append_pair("client", "tw-ob")
                    .append_pair("ttsspeed", if request.slow { "0" } else { "1" });
            })
        })
        .collect();

    Ok(urls)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(slow: bool) -> GoogleRequest {
        GoogleRequest {
            language_code: "zh-tw".to_string(),
            slow,
            trim_silence: false,
        }
    }

    fn query(url: &Url, key: &str) -> Option<String> {
        url.query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    #[test]
    fn builds_translate_tts_url() {
        let host = Url::parse(DEFAULT_HOST).unwrap();
        let urls = request_urls(&host, &request(false), "001 蘋果").unwrap();

        assert_eq!(urls.len(), 1);
        assert_eq!(urls[0].path(), "/translate_tts");
        assert_eq!(query(&urls[0], "q").as_deref(), Some("001 蘋果"));
        assert_eq!(query(&urls[0], "tl").as_deref(), Some("zh-tw"));
        assert_eq!(query(&urls[0], "textlen").as_deref(), Some("6"));
        assert_eq!(query(&urls[0], "ttsspeed").as_deref(), Some("1"));
    }

    #[test]
    fn slow_mode_and_chunk_indices() {
        let host = Url::parse("http://localhost:8080/proxy/").unwrap();
        let text = "字".repeat(450);
        let urls = request_urls(&host, &request(true), &text).unwrap();

        assert_eq!(urls.len(), 3);
        assert_eq!(urls[2].path(), "/proxy/translate_tts");
        assert_eq!(query(&urls[2], "idx").as_deref(), Some("2"));
        assert_eq!(query(&urls[2], "total").as_deref(), Some("3"));
        assert_eq!(query(&urls[2], "ttsspeed").as_deref(), Some("0"));
    }

    #[test]
    fn rejects_cannot_be_base_host() {
        let host = Url::parse("mailto:someone@example.com").unwrap();
        assert!(request_urls(&host, &request(false), "hi").is_err());
    }
}
