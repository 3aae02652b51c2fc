// siphogmon - smooth terminal dashboard for SiPhOG telemetry streams
//
// Connects to a TCP server emitting 6-field CSV sensor records and renders
// them in place without flicker. One session per invocation: when the
// stream ends (peer close, socket error, or a quit key) the summary is
// printed and the process exits.

mod app;
mod net;
mod telemetry;
mod ui;

use anyhow::{Context, Result};
use app::config::{DEFAULT_HOST, DEFAULT_PORT, RECV_CHUNK_SIZE};
use app::event::handle_key_event;
use app::{SessionEnd, SessionState, SessionSummary};
use crossterm::event::{self, Event};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::io;
use std::net::TcpStream;
use std::time::{Duration, Instant};
use telemetry::RecordBuffer;
use ui::{Canvas, Dashboard, TerminalCanvas, SCROLL_REGION_ROW};

fn main() -> Result<()> {
    let (host, port) = parse_args(std::env::args().skip(1))?;

    println!("🚀 SiPhOG monitor starting...");
    println!("🔌 Connecting to {host}:{port}...");
    let stream = net::connect(&host, port).context("failed to connect")?;
    println!("✅ Connected! Starting data monitor...");

    enable_raw_mode()?;
    let mut session = SessionState::new();
    let mut canvas = TerminalCanvas::new(io::stdout());
    let result = run_session(stream, &host, port, &mut session, &mut canvas, poll_quit_keys);
    disable_raw_mode()?;

    let end = result?;
    if let SessionEnd::SocketError(err) = &end {
        eprintln!("⚠️  Stream error: {err}");
    }
    print_summary(&session.summary());
    Ok(())
}

/// Parse `[host] [port]` positional arguments
fn parse_args<I: Iterator<Item = String>>(mut args: I) -> Result<(String, u16)> {
    let host = args.next().unwrap_or_else(|| DEFAULT_HOST.to_string());
    let port = match args.next() {
        Some(raw) => raw
            .parse::<u16>()
            .with_context(|| format!("invalid port: {raw}"))?,
        None => DEFAULT_PORT,
    };
    Ok((host, port))
}

/// Drain pending key events; quit keys clear the running flag
fn poll_quit_keys(session: &mut SessionState) -> Result<()> {
    if event::poll(Duration::ZERO)? {
        if let Event::Key(key) = event::read()? {
            handle_key_event(session, key);
        }
    }
    Ok(())
}

/// The single receive-parse-render loop
///
/// Blocks only on the bounded-timeout socket read; an idle timeout hands
/// control back so quit keys stay responsive. Records render strictly in
/// arrival order. The canvas and input poll are injected so the loop can
/// run against a recording canvas in tests.
fn run_session<C, F>(
    mut stream: TcpStream,
    host: &str,
    port: u16,
    session: &mut SessionState,
    canvas: &mut C,
    mut poll_input: F,
) -> Result<SessionEnd>
where
    C: Canvas,
    F: FnMut(&mut SessionState) -> Result<()>,
{
    let mut dashboard = Dashboard::new(host, port);
    let mut buffer = RecordBuffer::new();
    let mut chunk = [0u8; RECV_CHUNK_SIZE];

    let end = loop {
        poll_input(session)?;
        if !session.running {
            break SessionEnd::Interrupted;
        }

        match net::read_chunk(&mut stream, &mut chunk) {
            Ok(net::ReadOutcome::Idle) => continue,
            Ok(net::ReadOutcome::Closed) => break SessionEnd::ClosedByPeer,
            Err(err) => break SessionEnd::SocketError(err),
            Ok(net::ReadOutcome::Data(n)) => {
                buffer.extend(&chunk[..n]);
                while let Some(record) = buffer.next_record() {
                    session.record_arrival(Instant::now());
                    // Clear the connect banner once, right before the
                    // first frame paint
                    if !dashboard.frame_drawn() {
                        canvas.clear_all()?;
                    }
                    dashboard.render(canvas, &record, session)?;
                }
            }
        }
    };

    tracing::info!(?end, messages = session.message_count, "session ended");
    dashboard.show_status(canvas, end_status(&end))?;
    if dashboard.frame_drawn() {
        canvas.park(SCROLL_REGION_ROW)?;
    }
    Ok(end)
}

/// Status-cell text for each terminal outcome
fn end_status(end: &SessionEnd) -> &'static str {
    match end {
        SessionEnd::ClosedByPeer => "❌ Server disconnected",
        SessionEnd::SocketError(_) => "❌ Stream error",
        SessionEnd::Interrupted => "🛑 Stopped by user",
    }
}

fn print_summary(summary: &SessionSummary) {
    println!();
    println!("📊 Session summary:");
    println!("   Total messages: {}", summary.total_messages);
    println!("   Average rate: {:.1} Hz", summary.average_rate);
    println!("   Duration: {:.1} seconds", summary.elapsed.as_secs_f64());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::canvas::RecordingCanvas;
    use std::io::Write;
    use std::net::TcpListener;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn test_parse_args_defaults() {
        let (host, port) = parse_args(args(&[])).unwrap();
        assert_eq!(host, DEFAULT_HOST);
        assert_eq!(port, DEFAULT_PORT);
    }

    #[test]
    fn test_parse_args_host_only() {
        let (host, port) = parse_args(args(&["siphog.local"])).unwrap();
        assert_eq!(host, "siphog.local");
        assert_eq!(port, DEFAULT_PORT);
    }

    #[test]
    fn test_parse_args_host_and_port() {
        let (host, port) = parse_args(args(&["10.0.0.7", "9000"])).unwrap();
        assert_eq!(host, "10.0.0.7");
        assert_eq!(port, 9000);
    }

    #[test]
    fn test_parse_args_rejects_bad_port() {
        assert!(parse_args(args(&["localhost", "not-a-port"])).is_err());
        assert!(parse_args(args(&["localhost", "70000"])).is_err());
    }

    #[test]
    fn test_end_status_messages() {
        assert_eq!(end_status(&SessionEnd::Interrupted), "🛑 Stopped by user");
        assert_eq!(end_status(&SessionEnd::ClosedByPeer), "❌ Server disconnected");
    }

    #[test]
    fn test_peer_close_terminates_the_session_once() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let client = net::connect("127.0.0.1", port).unwrap();
        let (mut server_side, _) = listener.accept().unwrap();

        server_side
            .write_all(b"10.5,2.3,25.0,1.500,1.480,50.2\n")
            .unwrap();
        drop(server_side);

        let mut session = SessionState::new();
        let mut canvas = RecordingCanvas::new();
        let end = run_session(client, "127.0.0.1", port, &mut session, &mut canvas, |_| Ok(()))
            .unwrap();

        // The zero-length read ends the loop; run_session returns exactly
        // once, so main prints exactly one summary footer
        assert!(matches!(end, SessionEnd::ClosedByPeer));
        assert_eq!(session.message_count, 1);
        // Frame painted once for the one record that arrived first
        assert_eq!(canvas.writes_at(1, 1), 1);
        // The disconnect notice is the final cell write of the session
        assert_eq!(
            canvas.writes.last().map(|w| w.text.as_str()),
            Some("❌ Server disconnected")
        );
    }

    #[test]
    fn test_interrupt_before_any_data_touches_nothing() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let client = net::connect("127.0.0.1", port).unwrap();
        let (_server_side, _) = listener.accept().unwrap();

        let mut session = SessionState::new();
        let mut canvas = RecordingCanvas::new();
        let end = run_session(client, "127.0.0.1", port, &mut session, &mut canvas, |s| {
            s.running = false;
            Ok(())
        })
        .unwrap();

        // No record ever arrived: no frame, no status cell, no stray writes
        assert!(matches!(end, SessionEnd::Interrupted));
        assert_eq!(session.message_count, 0);
        assert!(canvas.writes.is_empty());
    }
}
