//! Interactive session
//!
//! Typed lines are keyboard commands. Meta-commands start with `:`; `:say`
//! and `:gesture` feed the simulated voice and camera channels.

use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

use neuralflow::config::Config;
use neuralflow::environment::{HeuristicEnvironmentSensor, HostCapabilities, HostInfo};
use neuralflow::gesture::{GestureType, synthetic};
use neuralflow::orchestrator::{
    EventKind, InteractionEvent, MultiModalOrchestrator, QueuedSpeechProvider, QueuedVideoSource,
    SpeechHandle, VideoHandle,
};
use neuralflow::{InputMode, PreferencesUpdate, WorkMode};

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const SIMULATED_SPEECH_CONFIDENCE: f64 = 0.9;
const SIMULATED_HAND_VISIBILITY: f64 = 0.9;

const HELP: &str = "\
Type a command (e.g. \"create task review budget\") or a meta-command:
  :say <text>         simulate a voice transcript
  :gesture <type>     simulate a hand pose (point, thumbs_up, peace_sign, ok_sign, grab, release)
  :mode [<mode>]      show the input mode or force one
  :work <mode>        focus, collaboration, research, creative, administrative
  :apps <a, b, ..>    set running applications (zoom, teams, .. imply a meeting)
  :task [<name>]      set or clear the current task
  :project [<name>]   set or clear the current project
  :lang <tag>         set the voice language (e.g. fr-FR)
  :disable <mode>     never select a mode
  :enable <mode>      allow a disabled mode again
  :status             context, channels and metrics
  :history            recognized commands
  :quit               leave";

struct Session {
    orchestrator: MultiModalOrchestrator,
    speech: SpeechHandle,
    video: VideoHandle,
}

/// Run the interactive loop until `:quit` or end of input
pub async fn repl_command(config: Config) -> Result<()> {
    let refresh = Duration::from_secs(config.settings.adaptation.refresh_interval_secs.max(1));

    // Voice and camera input are simulated, so both are always on offer.
    let host = HostInfo {
        speech_recognition: true,
        camera: true,
        ..HostInfo::native()
    };
    let (speech_provider, speech) = QueuedSpeechProvider::new();
    let (video_source, video) = QueuedVideoSource::new();

    let mut orchestrator = MultiModalOrchestrator::new(
        config,
        Box::new(HostCapabilities::new(host.clone())),
        Box::new(HeuristicEnvironmentSensor::new(host)),
    )
    .with_speech(Box::new(speech_provider));

    for kind in EventKind::ALL {
        orchestrator.subscribe(kind, |event| {
            print_event(event);
            Ok(())
        });
    }

    orchestrator.initialize()?;
    orchestrator.start_voice_recognition()?;
    orchestrator.start_gesture_recognition(Box::new(video_source), None)?;

    println!("{}\n", HELP);

    let mut session = Session {
        orchestrator,
        speech,
        video,
    };
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut refresh_tick = tokio::time::interval(refresh);
    let mut poll_tick = tokio::time::interval(POLL_INTERVAL);
    // The first tick fires immediately; initialize already sampled.
    refresh_tick.tick().await;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    break;
                };
                if !session.handle_line(line.trim())? {
                    break;
                }
                session.orchestrator.poll()?;
            }
            _ = refresh_tick.tick() => {
                session.orchestrator.refresh_context()?;
            }
            _ = poll_tick.tick() => {
                session.orchestrator.poll()?;
            }
        }
    }

    session.orchestrator.shutdown();
    Ok(())
}

impl Session {
    /// Returns false when the user asked to quit
    fn handle_line(&mut self, line: &str) -> Result<bool> {
        if line.is_empty() {
            return Ok(true);
        }
        let Some(meta) = line.strip_prefix(':') else {
            if self.orchestrator.process_text_command(line)?.is_none() {
                println!("No intent recognized");
            }
            return Ok(true);
        };

        let (command, arg) = match meta.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (meta, ""),
        };

        match command {
            "q" | "quit" | "exit" => return Ok(false),
            "h" | "help" => println!("{}", HELP),
            "say" => {
                if arg.is_empty() {
                    println!("Usage: :say <text>");
                } else {
                    self.speech.transcript(arg, SIMULATED_SPEECH_CONFIDENCE);
                }
            }
            "gesture" => self.simulate_gesture(arg),
            "mode" => self.mode(arg)?,
            "work" => match arg.parse::<WorkMode>() {
                Ok(work_mode) => {
                    self.orchestrator.set_work_mode(work_mode)?;
                }
                Err(e) => println!("{}", e),
            },
            "apps" => {
                let apps = arg
                    .split(',')
                    .map(str::trim)
                    .filter(|app| !app.is_empty())
                    .map(String::from)
                    .collect();
                self.orchestrator.set_active_applications(apps)?;
                self.orchestrator.refresh_context()?;
            }
            "task" => self.orchestrator.set_current_task(optional(arg))?,
            "project" => self.orchestrator.set_current_project(optional(arg))?,
            "lang" => {
                if arg.is_empty() {
                    println!("Voice language: {}", self.orchestrator.context().user_preferences.voice_language);
                } else {
                    self.orchestrator
                        .update_preferences(PreferencesUpdate::voice_language(arg))?;
                    println!("Voice language: {}", arg);
                }
            }
            "disable" | "enable" => self.toggle_mode(arg, command == "disable")?,
            "status" => self.status(),
            "history" => self.history(),
            other => println!("Unknown meta-command :{} (try :help)", other),
        }
        Ok(true)
    }

    fn simulate_gesture(&self, arg: &str) {
        let gesture = match arg.parse::<GestureType>() {
            Ok(gesture) => gesture,
            Err(e) => {
                println!("{}", e);
                return;
            }
        };
        match synthetic::gesture_pose(gesture, SIMULATED_HAND_VISIBILITY) {
            Some(hand) => {
                self.video.send_hand(hand);
            }
            None => println!("{} needs hand motion and cannot be simulated", gesture),
        }
    }

    fn mode(&mut self, arg: &str) -> Result<()> {
        if arg.is_empty() {
            let recommendation = self.orchestrator.recommendation();
            println!(
                "Current mode: {} (recommended: {}, {})",
                self.orchestrator.context().current_mode,
                recommendation.mode,
                recommendation.reason
            );
            return Ok(());
        }

        match arg.parse::<InputMode>() {
            Ok(mode) => {
                if !self.orchestrator.force_mode(mode)? {
                    println!("{} is not available", mode);
                }
            }
            Err(e) => println!("{}", e),
        }
        Ok(())
    }

    fn toggle_mode(&mut self, arg: &str, disable: bool) -> Result<()> {
        let mode = match arg.parse::<InputMode>() {
            Ok(mode) => mode,
            Err(e) => {
                println!("{}", e);
                return Ok(());
            }
        };

        let mut disabled: BTreeSet<InputMode> = self.orchestrator.context().user_preferences.disabled_modes.clone();
        if disable {
            disabled.insert(mode);
        } else {
            disabled.remove(&mode);
        }
        self.orchestrator.update_preferences(PreferencesUpdate {
            disabled_modes: Some(disabled),
            ..PreferencesUpdate::default()
        })?;
        Ok(())
    }

    fn status(&self) {
        let context = self.orchestrator.context();
        let env = &context.environmental_factors;
        let metrics = self.orchestrator.metrics();
        let available: Vec<&str> = context.available_modes.iter().map(|m| m.as_str()).collect();

        println!("State:       {}", self.orchestrator.state());
        println!("Mode:        {} (available: {})", context.current_mode, available.join(", "));
        println!(
            "Work:        {} | task: {} | project: {}",
            context.work_context.work_mode,
            context.work_context.current_task.as_deref().unwrap_or("-"),
            context.work_context.current_project.as_deref().unwrap_or("-")
        );
        println!(
            "Environment: meeting={} noise={} lighting={} device={} network={} ({})",
            env.is_in_meeting,
            env.noise_level,
            env.lighting_condition,
            env.device_type,
            env.network_quality,
            context.work_context.time_of_day
        );
        println!(
            "Channels:    voice {} | gesture {}",
            self.orchestrator.voice_state(),
            self.orchestrator.gesture_state()
        );
        println!(
            "Metrics:     {} commands, avg {:.2} ms, error rate {:.0}%",
            metrics.commands_processed,
            metrics.average_response_time_ms,
            metrics.error_rate * 100.0
        );
    }

    fn history(&self) {
        let mut empty = true;
        for command in self.orchestrator.command_history() {
            empty = false;
            println!(
                "  {} [{}] {}{} ({:.2})",
                command.timestamp.format("%H:%M:%S"),
                command.source,
                command.intent.action,
                command
                    .intent
                    .entity
                    .as_ref()
                    .map(|entity| format!(" \"{}\"", entity))
                    .unwrap_or_default(),
                command.confidence
            );
        }
        if empty {
            println!("No commands yet.");
        }
    }
}

fn optional(arg: &str) -> Option<String> {
    (!arg.is_empty()).then(|| arg.to_string())
}

fn print_event(event: &InteractionEvent) {
    match event {
        InteractionEvent::Command(command) => {
            let parameters = serde_json::Value::Object(command.intent.parameters.clone());
            println!(
                "→ [{}] {} {} ({:.2}) {}",
                command.source,
                command.intent.action,
                command.intent.entity.as_deref().unwrap_or("-"),
                command.confidence,
                parameters
            );
        }
        InteractionEvent::ModeChange(change) => {
            println!("Mode: {} → {} ({})", change.from, change.to, change.reason);
        }
        InteractionEvent::Error { source, message } => {
            println!("! {}: {}", source, message);
        }
        InteractionEvent::ContextUpdate(context) => {
            let env = &context.environmental_factors;
            println!(
                "Context: mode={} work={} meeting={} noise={}",
                context.current_mode, context.work_context.work_mode, env.is_in_meeting, env.noise_level
            );
        }
    }
}
