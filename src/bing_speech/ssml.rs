use std::borrow::Cow;

use super::{locale_of, Prosody};
use crate::model::EdgeRequest;

const SPEAK_NS: &str = "http://www.w3.org/2001/10/synthesis";
const MSTTS_NS: &str = "https://www.w3.org/2001/mstts";

fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return text.into();
    }

    let mut escaped = String::with_capacity(text.len() + 16);

    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }

    escaped.into()
}

/// Single-line SSML document the Edge endpoint would receive for `text`.
pub fn ssml_preview(request: &EdgeRequest, text: &str) -> String {
    let prosody = Prosody::from_request(request);

    let lang = locale_of(&request.voice_id)
        .map(|locale| format!(" xml:lang='{locale}'"))
        .unwrap_or_default();

    let body = format!(
        "<prosody rate='{}' pitch='{}' volume='{}'>{}</prosody>",
        prosody.rate,
        prosody.pitch,
        prosody.volume,
        escape(text.trim()),
    );

    let body = match &request.style {
        Some(style) => format!(
            "<mstts:express-as style='{}'>{body}</mstts:express-as>",
            escape(style)
        ),
        None => body,
    };

    format!(
        "<speak version='1.0' xmlns='{SPEAK_NS}' xmlns:mstts='{MSTTS_NS}'{lang}><voice name='{}'>{body}</voice></speak>",
        escape(&request.voice_id),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(style: Option<&str>) -> EdgeRequest {
        EdgeRequest {
            voice_id: "zh-CN-XiaoxiaoNeural".to_string(),
            rate_percent: 15,
            pitch_hz: 5,
            volume_percent: 0,
            style: style.map(ToString::to_string),
            trim_silence: true,
        }
    }

    #[test]
    fn styled_document() {
        assert_eq!(
            ssml_preview(&request(Some("cheerful")), "小朋友們好！"),
            "<speak version='1.0' xmlns='http://www.w3.org/2001/10/synthesis' \
             xmlns:mstts='https://www.w3.org/2001/mstts' xml:lang='zh-CN'>\
             <voice name='zh-CN-XiaoxiaoNeural'>\
             <mstts:express-as style='cheerful'>\
             <prosody rate='+15%' pitch='+5Hz' volume='+0%'>小朋友們好！</prosody>\
             </mstts:express-as></voice></speak>"
        );
    }

    #[test]
    fn plain_document_has_no_express_as() {
        let doc = ssml_preview(&request(None), "hello");

        assert!(!doc.contains("express-as"));
        assert!(doc.contains("<prosody rate='+15%' pitch='+5Hz' volume='+0%'>hello</prosody>"));
    }

    #[test]
    fn text_is_escaped() {
        let doc = ssml_preview(&request(None), "Tom & Jerry <3 'cats'");

        assert!(doc.contains(">Tom &amp; Jerry &lt;3 &apos;cats&apos;</prosody>"));
    }
}
