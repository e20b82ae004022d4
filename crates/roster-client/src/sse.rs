//! Incremental Server-Sent-Events frame parser.
//!
//! The notification endpoint delivers `text/event-stream` frames; chunks
//! from the transport can split frames anywhere, including in the middle of
//! a multi-byte character, so the parser buffers raw bytes and only decodes
//! once a blank line has terminated an event.

/// Buffering SSE parser. Feed transport chunks in, get complete `data`
/// payloads out.
#[derive(Debug, Default)]
pub struct SseParser {
    buffer: Vec<u8>,
}

impl SseParser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one transport chunk and return the data payloads of every
    /// event completed by it.
    ///
    /// Frame scanning is byte-based (the terminators are ASCII), so decoding
    /// happens per completed frame and split multi-byte characters survive
    /// chunk boundaries. Comment lines (`:`) and non-`data` fields
    /// (`event:`, `id:`, `retry:`) are ignored; multi-line data is joined
    /// with `\n` per the SSE specification.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);

        let mut payloads = Vec::new();
        // An event ends at a blank line. Only consume fully terminated
        // events; a trailing partial frame stays buffered.
        while let Some(consumed) = find_frame_end(&self.buffer) {
            let frame: Vec<u8> = self.buffer.drain(..consumed).collect();
            let frame = String::from_utf8_lossy(&frame);

            let mut data_lines = Vec::new();
            for line in frame.lines() {
                if let Some(value) = line.strip_prefix("data:") {
                    data_lines.push(value.strip_prefix(' ').unwrap_or(value));
                }
            }
            if !data_lines.is_empty() {
                payloads.push(data_lines.join("\n"));
            }
        }
        payloads
    }
}

/// Find the first blank-line terminator (`\n\n` or `\r\n\r\n`), returning
/// how many bytes to consume including the terminator.
fn find_frame_end(buffer: &[u8]) -> Option<usize> {
    let lf = find_subslice(buffer, b"\n\n").map(|i| i + 2);
    let crlf = find_subslice(buffer, b"\r\n\r\n").map(|i| i + 4);

    match (lf, crlf) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
