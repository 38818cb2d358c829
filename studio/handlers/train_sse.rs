use std::io::Write;
use std::time::Duration;
use tiny_http::Request;

use crate::state::{SharedState, TrainingStatus};

/// `GET /train/events` — Server-Sent Events handler.
///
/// Consumes the request (ownership is needed for `into_writer`) and drives a
/// long-lived loop:
/// 1. Receive a `StepStats` from the training channel with a 500 ms timeout.
/// 2. On success — serialize it and write an `event: step` frame.
/// 3. On timeout — write a keep-alive `: ping` comment.
/// 4. On channel disconnect (training finished) — write a `done` event with
///    the completion summary, then close.
///
/// The training run itself never depends on this stream: a disconnected
/// client only stops the frames, not the training.
pub fn handle(request: Request, state: SharedState) {
    let mut writer = request.into_writer();

    // Write HTTP response headers manually (tiny_http into_writer path).
    let header = "HTTP/1.1 200 OK\r\n\
                  Content-Type: text/event-stream\r\n\
                  Cache-Control: no-cache\r\n\
                  Connection: keep-alive\r\n\
                  X-Accel-Buffering: no\r\n\
                  \r\n";
    if write_all(&mut writer, header.as_bytes()).is_err() {
        return;
    }

    // Clone the receiver Arc out so we don't hold the state lock while
    // blocking on the channel.
    let step_rx = {
        let st = state.lock().unwrap();
        match &st.training {
            TrainingStatus::Running { step_rx, .. } => Some(step_rx.clone()),
            _ => None,
        }
    };

    let rx_arc = match step_rx {
        Some(r) => r,
        None => {
            let _ = write_all(&mut writer, &done_frame(&state));
            return;
        }
    };

    // Replay history collected so far, then follow the live channel.
    {
        let st = state.lock().unwrap();
        for stats in &st.step_history {
            if let Ok(json) = serde_json::to_string(stats) {
                let msg = format!("event: step\ndata: {}\n\n", json);
                if write_all(&mut writer, msg.as_bytes()).is_err() {
                    return;
                }
            }
        }
    }

    loop {
        let result = {
            let rx = rx_arc.lock().unwrap();
            rx.recv_timeout(Duration::from_millis(500))
        };

        match result {
            Ok(stats) => {
                {
                    let mut st = state.lock().unwrap();
                    st.step_history.push(stats.clone());
                }
                match serde_json::to_string(&stats) {
                    Ok(json) => {
                        let msg = format!("event: step\ndata: {}\n\n", json);
                        if write_all(&mut writer, msg.as_bytes()).is_err() {
                            return;
                        }
                    }
                    Err(_) => continue,
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {
                if write_all(&mut writer, b": ping\n\n").is_err() {
                    return;
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => {
                // Sender dropped — the training thread is done (or finishing
                // its state write); report completion.
                let _ = write_all(&mut writer, &done_frame(&state));
                return;
            }
        }
    }
}

/// Builds the terminal `done` frame from the current training status.
fn done_frame(state: &SharedState) -> Vec<u8> {
    let st = state.lock().unwrap();
    let frame = match &st.training {
        TrainingStatus::Done { summary } => match serde_json::to_string(summary) {
            Ok(json) => format!("event: done\ndata: {}\n\n", json),
            Err(_) => "event: done\ndata: {}\n\n".to_owned(),
        },
        _ => "event: done\ndata: {}\n\n".to_owned(),
    };
    frame.into_bytes()
}

/// Writes all bytes to the writer, returning `Err` on any I/O failure.
fn write_all<W: Write>(w: &mut W, data: &[u8]) -> std::io::Result<()> {
    w.write_all(data)?;
    w.flush()
}
