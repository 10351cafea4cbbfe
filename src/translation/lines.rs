//! Reassembles an arbitrarily chunked text stream into complete lines.

use futures_util::Stream;

/// Accumulates chunks and hands back every line completed so far.
///
/// The trailing partial line stays buffered until a later chunk completes it
/// or [`LineAssembler::finish`] is called at end of input. Empty lines are
/// dropped since nothing downstream can use them.
#[derive(Debug, Default)]
pub struct LineAssembler {
    buffer: String,
}

impl LineAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a chunk and returns the lines it completed, in order.
    pub fn push(&mut self, chunk: &str) -> Vec<String> {
        self.buffer.push_str(chunk);

        let mut lines = Vec::new();
        while let Some(line_end) = self.buffer.find('\n') {
            let mut line: String = self.buffer.drain(..=line_end).collect();
            line.pop();
            if !line.is_empty() {
                lines.push(line);
            }
        }
        lines
    }

    /// Returns the buffered partial line, if any.
    pub fn finish(self) -> Option<String> {
        (!self.buffer.is_empty()).then_some(self.buffer)
    }
}

/// Turns a stream of text chunks into a stream of complete lines.
///
/// An error from the input is forwarded and ends the stream; whatever partial
/// line was buffered at that point is discarded.
pub fn assemble_lines<S, E>(chunks: S) -> impl Stream<Item = Result<String, E>>
where
    S: Stream<Item = Result<String, E>>,
{
    async_stream::stream! {
        use futures_util::StreamExt;

        let mut chunks = std::pin::pin!(chunks);
        let mut assembler = LineAssembler::new();

        while let Some(chunk_result) = chunks.next().await {
            match chunk_result {
                Ok(chunk) => {
                    for line in assembler.push(&chunk) {
                        yield Ok(line);
                    }
                }
                Err(e) => {
                    yield Err(e);
                    return;
                }
            }
        }

        if let Some(rest) = assembler.finish() {
            yield Ok(rest);
        }
    }
}
