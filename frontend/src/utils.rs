use serde_json::Value;

// Formats each x1000 step
pub fn format_number(number: i64) -> String {
    let num_str = number.unsigned_abs().to_string();
    let mut result = String::new();
    let len = num_str.len();

    if number < 0 {
        result.push('-');
    }
    for (i, c) in num_str.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

/// Text for one cell of the video info table.
pub fn format_field_value(value: &Value) -> String {
    match value {
        Value::Null => "N/A".to_string(),
        Value::String(text) => text.clone(),
        Value::Number(number) => number
            .as_i64()
            .map(format_number)
            .unwrap_or_else(|| number.to_string()),
        other => other.to_string(),
    }
}

pub fn image_data_url(image_base64: &str) -> String {
    format!("data:image/png;base64,{image_base64}")
}

pub fn embed_url(video_id: &str) -> String {
    format!("https://www.youtube.com/embed/{video_id}")
}

/// Pulls the video id out of a pasted YouTube link, or accepts a bare id.
pub fn extract_video_id(input: &str) -> Option<String> {
    let input = input.trim();
    if is_video_id(input) {
        return Some(input.to_string());
    }

    let candidate = if let Some((_, query)) = input.split_once('?') {
        query
            .split('&')
            .find_map(|pair| pair.strip_prefix("v="))
            .or_else(|| path_segment_after(input, &["youtu.be/", "/shorts/", "/embed/"]))
    } else {
        path_segment_after(input, &["youtu.be/", "/shorts/", "/embed/"])
    }?;

    let id: String = candidate
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    is_video_id(&id).then_some(id)
}

fn path_segment_after<'a>(input: &'a str, markers: &[&str]) -> Option<&'a str> {
    markers
        .iter()
        .find_map(|marker| input.find(marker).map(|at| &input[at + marker.len()..]))
}

fn is_video_id(candidate: &str) -> bool {
    candidate.len() == 11
        && candidate
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
