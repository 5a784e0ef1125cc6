//! Event formatting for sse-tail output.

use crate::cli::args::OutputFormat;
use crate::sse::SseEvent;

/// Render one event, including its trailing newline(s).
pub fn format_event(event: &SseEvent, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!("{}\t{}\n", event.kind(), escape_data(&event.data)),
        OutputFormat::Json => {
            let value = serde_json::json!({
                "event": event.kind(),
                "data": event.data,
            });
            format!("{}\n", value)
        }
        OutputFormat::Raw => event.to_wire(),
    }
}

/// Keep one event per output line.
fn escape_data(data: &str) -> String {
    data.replace('\\', "\\\\").replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_format() {
        let event = SseEvent::message("a\nb\\c");
        assert_eq!(format_event(&event, OutputFormat::Text), "message\ta\\nb\\\\c\n");
    }

    #[test]
    fn test_json_format() {
        let event = SseEvent::new("update", "x");
        let line = format_event(&event, OutputFormat::Json);
        let parsed: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
        assert_eq!(parsed["event"], "update");
        assert_eq!(parsed["data"], "x");
    }

    #[test]
    fn test_json_reports_default_kind() {
        let line = format_event(&SseEvent::message("y"), OutputFormat::Json);
        assert!(line.contains(r#""event":"message""#));
    }

    #[test]
    fn test_raw_format_is_wire_syntax() {
        let event = SseEvent::new("ping", "");
        assert_eq!(format_event(&event, OutputFormat::Raw), "event: ping\n\n");
    }
}
