// Author: Dustin Pilgrim
// License: MIT

use std::io::BufRead;
use std::str::FromStr;
use std::time::Duration;

use eyre::{Result, WrapErr};
use tokio::sync::{mpsc, watch};

use crate::{
    config::Config,
    core::{
        alarm::Alarm,
        error::ParseError,
        timer::PausableTimer,
    },
    sdebug,
    serror,
    sinfo,
    swarn,
    utils::format_duration_readable,
};

pub const SESSION_HELP_MESSAGE: &str = r#"Commands (one per line):
  pause     Freeze the countdown
  resume    Continue a paused countdown
  stop      Stop the countdown for good and exit
  status    Show elapsed and remaining time
  help      Show this message

The session also ends when the countdown expires, on EOF, or on Ctrl+C."#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    Pause,
    Resume,
    Stop,
    Status,
    Help,
}

impl SessionCommand {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionCommand::Pause => "pause",
            SessionCommand::Resume => "resume",
            SessionCommand::Stop => "stop",
            SessionCommand::Status => "status",
            SessionCommand::Help => "help",
        }
    }
}

impl FromStr for SessionCommand {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pause" | "p" => Ok(SessionCommand::Pause),
            "resume" | "r" => Ok(SessionCommand::Resume),
            "stop" | "quit" | "q" => Ok(SessionCommand::Stop),
            "status" | "info" | "s" => Ok(SessionCommand::Status),
            "help" | "h" | "?" => Ok(SessionCommand::Help),
            other => Err(ParseError::UnknownCommand(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Applies one command to the timer and renders the outcome.
pub fn execute<A: Alarm>(
    timer: &mut PausableTimer<A>,
    cmd: SessionCommand,
    json: bool,
) -> (String, Flow) {
    let outcome = match cmd {
        SessionCommand::Pause => Some(("elapsed", timer.pause())),
        SessionCommand::Resume => Some(("remaining", timer.resume())),
        SessionCommand::Stop => Some(("elapsed", timer.stop())),
        SessionCommand::Status | SessionCommand::Help => None,
    };

    let flow = if timer.state().is_stopped() {
        Flow::Exit
    } else {
        Flow::Continue
    };

    let text = match (cmd, outcome) {
        (SessionCommand::Help, _) => SESSION_HELP_MESSAGE.to_string(),
        (_, Some((label, (duration, success)))) => {
            render_outcome(timer, cmd, label, duration, success, json)
        }
        (_, None) if json => timer.info().to_json(),
        (_, None) => timer.info().to_string(),
    };

    (text, flow)
}

fn render_outcome<A: Alarm>(
    timer: &PausableTimer<A>,
    cmd: SessionCommand,
    label: &str,
    duration: Duration,
    success: bool,
    json: bool,
) -> String {
    if json {
        return serde_json::json!({
            "command": cmd.as_str(),
            "success": success,
            "duration_ms": u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
            "timer": timer.info(),
        })
        .to_string();
    }

    let verdict = if success { "ok" } else { "not applied" };
    format!(
        "{}: {} {} ({}; timer {})",
        cmd.as_str(),
        format_duration_readable(duration),
        label,
        verdict,
        timer.state(),
    )
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    Command,
    Expired,
    InputClosed,
    Interrupted,
}

/// Runs one interactive countdown on stdin/stdout until it stops.
pub async fn run(config: Config) -> Result<()> {
    let mut timer = PausableTimer::new(config.total);
    sinfo!("Pausy", "countdown started for {}", format_duration_readable(config.total));
    println!(
        "countdown started for {} (type 'help' for commands)",
        format_duration_readable(config.total)
    );

    let mut input = spawn_stdin_reader().wrap_err("failed to start the stdin reader")?;
    let ending = drive(&mut timer, &mut input, tokio::signal::ctrl_c(), config.json).await;
    sdebug!("Pausy", "session ended: {ending:?}");

    Ok(())
}

/// Reads stdin lines on a plain OS thread.
///
/// A blocked read there does not hold up runtime shutdown, so the process
/// exits as soon as the session ends. The channel closes on EOF.
pub fn spawn_stdin_reader() -> std::io::Result<mpsc::Receiver<String>> {
    let (tx, rx) = mpsc::channel(16);

    std::thread::Builder::new()
        .name("pausy-stdin".into())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.blocking_send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        serror!("Pausy", "failed to read from stdin: {e}");
                        break;
                    }
                }
            }
        })?;

    Ok(rx)
}

/// Feeds input lines to the timer until a command, expiry, EOF or
/// `interrupt` ends the session. Results are printed to stdout.
pub async fn drive<F: Future>(
    timer: &mut PausableTimer,
    input: &mut mpsc::Receiver<String>,
    interrupt: F,
    json: bool,
) -> Ending {
    tokio::pin!(interrupt);

    loop {
        let mut expiry = timer.alarm().subscribe();
        let running = timer.state().is_running();

        tokio::select! {
            line = input.recv() => {
                let Some(line) = line else {
                    sdebug!("Pausy", "stdin closed, stopping");
                    finish(timer, json);
                    return Ending::InputClosed;
                };

                if line.trim().is_empty() {
                    continue;
                }

                match line.parse::<SessionCommand>() {
                    Ok(cmd) => {
                        let (text, flow) = execute(timer, cmd, json);
                        println!("{text}");
                        if flow == Flow::Exit {
                            return Ending::Command;
                        }
                    }
                    Err(e) => {
                        swarn!("Pausy", "{e}");
                        eprintln!("pausy: {e}");
                    }
                }
            }

            _ = wait_expired(&mut expiry), if running => {
                sinfo!("Pausy", "countdown expired");
                println!("timer expired");
                finish(timer, json);
                return Ending::Expired;
            }

            _ = &mut interrupt => {
                sinfo!("Pausy", "received Ctrl+C, stopping");
                finish(timer, json);
                return Ending::Interrupted;
            }
        }
    }
}

fn finish(timer: &mut PausableTimer, json: bool) {
    let (text, _) = execute(timer, SessionCommand::Stop, json);
    println!("{text}");
}

async fn wait_expired(rx: &mut watch::Receiver<bool>) {
    let _ = rx.wait_for(|fired| *fired).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::alarm::ManualAlarm;
    use tokio::time::sleep;

    #[test]
    fn parses_commands() {
        assert_eq!("pause".parse::<SessionCommand>(), Ok(SessionCommand::Pause));
        assert_eq!("  Resume ".parse::<SessionCommand>(), Ok(SessionCommand::Resume));
        assert_eq!("q".parse::<SessionCommand>(), Ok(SessionCommand::Stop));
        assert_eq!("status".parse::<SessionCommand>(), Ok(SessionCommand::Status));
        assert_eq!("?".parse::<SessionCommand>(), Ok(SessionCommand::Help));
        assert_eq!(
            "jump".parse::<SessionCommand>(),
            Err(ParseError::UnknownCommand("jump".into()))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn pause_then_resume_text() {
        let mut timer: PausableTimer<ManualAlarm> =
            PausableTimer::with_alarm(Duration::from_secs(10));
        sleep(Duration::from_secs(4)).await;

        let (text, flow) = execute(&mut timer, SessionCommand::Pause, false);
        assert_eq!(text, "pause: 4s elapsed (ok; timer paused)");
        assert_eq!(flow, Flow::Continue);

        let (text, _) = execute(&mut timer, SessionCommand::Pause, false);
        assert_eq!(text, "pause: 4s elapsed (not applied; timer paused)");

        let (text, flow) = execute(&mut timer, SessionCommand::Resume, false);
        assert_eq!(text, "resume: 6s remaining (ok; timer running)");
        assert_eq!(flow, Flow::Continue);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_exits() {
        let mut timer: PausableTimer<ManualAlarm> =
            PausableTimer::with_alarm(Duration::from_secs(10));
        sleep(Duration::from_secs(2)).await;

        let (text, flow) = execute(&mut timer, SessionCommand::Stop, false);
        assert_eq!(text, "stop: 2s elapsed (ok; timer stopped)");
        assert_eq!(flow, Flow::Exit);
    }

    #[tokio::test(start_paused = true)]
    async fn lost_pause_race_exits() {
        let mut timer: PausableTimer<ManualAlarm> =
            PausableTimer::with_alarm(Duration::from_secs(3));
        timer.alarm().trigger().fire();

        let (text, flow) = execute(&mut timer, SessionCommand::Pause, false);
        assert_eq!(text, "pause: 3s elapsed (not applied; timer stopped)");
        assert_eq!(flow, Flow::Exit);
    }

    #[tokio::test(start_paused = true)]
    async fn json_output() {
        let mut timer: PausableTimer<ManualAlarm> =
            PausableTimer::with_alarm(Duration::from_secs(10));
        sleep(Duration::from_millis(1500)).await;

        let (text, _) = execute(&mut timer, SessionCommand::Pause, true);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["command"], "pause");
        assert_eq!(value["success"], true);
        assert_eq!(value["duration_ms"], 1500);
        assert_eq!(value["timer"]["state"], "paused");
        assert_eq!(value["timer"]["remaining_ms"], 8500);

        let (text, flow) = execute(&mut timer, SessionCommand::Status, true);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["elapsed_ms"], 1500);
        assert_eq!(flow, Flow::Continue);
    }

    #[tokio::test(start_paused = true)]
    async fn status_and_help_leave_timer_alone() {
        let mut timer: PausableTimer<ManualAlarm> =
            PausableTimer::with_alarm(Duration::from_secs(60));

        let (text, flow) = execute(&mut timer, SessionCommand::Help, false);
        assert_eq!(text, SESSION_HELP_MESSAGE);
        assert_eq!(flow, Flow::Continue);

        let (text, _) = execute(&mut timer, SessionCommand::Status, false);
        assert_eq!(text, "running: 0ms elapsed, 1m remaining");
        assert!(timer.state().is_running());
    }

    // ---------------- session loop ----------------

    #[tokio::test(start_paused = true)]
    async fn session_ends_when_the_countdown_expires() {
        let mut timer = PausableTimer::new(Duration::from_secs(5));
        let (tx, mut input) = mpsc::channel(4);

        let ending = drive(&mut timer, &mut input, std::future::pending::<()>(), false).await;

        assert_eq!(ending, Ending::Expired);
        assert!(timer.state().is_stopped());
        assert!(timer.is_expired());
        assert_eq!(timer.elapsed(), Duration::from_secs(5));
        drop(tx);
    }

    #[tokio::test(start_paused = true)]
    async fn paused_session_does_not_expire() {
        let mut timer = PausableTimer::new(Duration::from_secs(5));
        let (tx, mut input) = mpsc::channel(4);
        tx.send("pause".to_string()).await.unwrap();

        let stopper = tokio::spawn(async move {
            sleep(Duration::from_secs(60)).await;
            tx.send("stop".to_string()).await.unwrap();
        });

        let ending = drive(&mut timer, &mut input, std::future::pending::<()>(), false).await;
        stopper.await.unwrap();

        assert_eq!(ending, Ending::Command);
        assert!(!timer.is_expired());
        assert_eq!(timer.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn session_stops_on_eof() {
        let mut timer = PausableTimer::new(Duration::from_secs(5));
        let (tx, mut input) = mpsc::channel(4);
        tx.send("".to_string()).await.unwrap();
        tx.send("jump".to_string()).await.unwrap();
        drop(tx);

        let ending = drive(&mut timer, &mut input, std::future::pending::<()>(), false).await;

        assert_eq!(ending, Ending::InputClosed);
        assert!(timer.state().is_stopped());
        assert!(!timer.is_expired());
    }

    #[tokio::test(start_paused = true)]
    async fn session_stops_on_interrupt() {
        let mut timer = PausableTimer::new(Duration::from_secs(5));
        let (_tx, mut input) = mpsc::channel::<String>(4);

        let interrupt = sleep(Duration::from_secs(2));
        let ending = drive(&mut timer, &mut input, interrupt, false).await;

        assert_eq!(ending, Ending::Interrupted);
        assert!(timer.state().is_stopped());
        assert_eq!(timer.elapsed(), Duration::from_secs(2));
    }
}
