use learnloop_lesson_stream::prelude::*;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), TransportError> {
    let base_url = std::env::var("LESSON_STREAM_URL")
        .unwrap_or_else(|_| "http://localhost:8000/api/v1/lessons/stream".to_string());
    let target = StreamTarget::new(base_url)
        .param("subsection_id", "1")
        .param("subsection_title", "Introduction");

    let mut stream = LessonStream::open(target)?;

    let mut seen_traces = 0;
    let mut seen_text = 0;
    while stream.changed().await {
        let snapshot = stream.snapshot();
        for trace in &snapshot.traces[seen_traces..] {
            eprintln!("[{} #{}] {}", trace.step_type, trace.step_number, trace.content);
        }
        seen_traces = snapshot.traces.len();
        print!("{}", &snapshot.lesson_text[seen_text..]);
        seen_text = snapshot.lesson_text.len();
    }

    let snapshot = stream.snapshot();
    if let Some(error) = snapshot.error {
        eprintln!("stream error: {error}");
    } else if snapshot.is_complete {
        eprintln!("lesson complete ({} reasoning steps)", snapshot.traces.len());
    }
    Ok(())
}
