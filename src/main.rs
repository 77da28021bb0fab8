//! morning-nag: countdown to a morning deadline with escalating spoken reminders.

mod alarm;
mod announcer;
mod config;
mod countdown;
mod error;
mod gallery;
mod late;
mod messages;
mod notifier;
mod preview;
mod profile;
mod scheduler;
mod session;
mod wakelock;

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::announcer::{Announcer, SilentAnnouncer, SpeechAnnouncer};
use crate::config::Config;
use crate::countdown::{SystemClock, TargetTime};
use crate::error::NagError;
use crate::messages::{Language, Messages};
use crate::profile::IntensityProfile;
use crate::session::{Session, SpeechSettings};

#[derive(Parser, Debug)]
#[command(name = "morning-nag", about = "Nags you out the door before a morning deadline")]
struct Args {
    /// Path to config.yaml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Deadline for today, e.g. 07:45
    #[arg(short, long, value_name = "HH:MM")]
    at: Option<String>,

    /// Intensity profile: standard, gentle or hell
    #[arg(short, long)]
    profile: Option<String>,

    /// Write the target time and profile back to the config file
    #[arg(long)]
    save: bool,

    /// Disable spoken reminders
    #[arg(long)]
    mute: bool,

    /// Disable desktop notifications
    #[arg(long)]
    no_notify: bool,

    /// Print the reminders a countdown of this many minutes would produce, then exit
    #[arg(long, value_name = "MINUTES")]
    preview: Option<u32>,

    /// Enable verbose (debug) logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("morning-nag: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), NagError> {
    info!("morning-nag starting");

    let mut config = Config::load(args.config.as_deref());
    if let Some(at) = args.at {
        config.target.time = Some(at);
    }
    if let Some(profile) = args.profile {
        config.target.profile = profile;
    }
    if args.mute {
        config.speech.enabled = false;
    }
    if args.no_notify {
        config.notifications.enabled = false;
    }

    let profile = IntensityProfile::resolve(&config.target.profile);
    let messages = Messages::new(Language::from_locale(&config.speech.locale));

    if args.save {
        config.target.target_time()?;
        config.target.profile = profile.name.to_string();
        let path = Config::locate(args.config.as_deref()).unwrap_or_else(Config::user_path);
        config.save(&path)?;
    }

    if let Some(minutes) = args.preview {
        let target = match config.target.target_time() {
            Err(NagError::MissingTarget) => TargetTime::new(8, 0)?,
            other => other?,
        };
        println!(
            "Preview: {minutes} minute countdown to {target} (profile: {})",
            profile.name
        );
        for line in preview::simulate(target, profile, &messages, minutes) {
            println!("{line}");
        }
        return Ok(());
    }

    // Refuse to start without a usable deadline.
    let target = config.target.target_time()?;
    info!("Target {target}, profile '{}'", profile.name);

    let announcer: Box<dyn Announcer> = if config.speech.enabled {
        Box::new(SpeechAnnouncer::new(&config.speech))
    } else {
        info!("Speech disabled");
        Box::new(SilentAnnouncer)
    };
    let notifier = Box::new(notifier::DesktopNotifier::new(&config.notifications, target));
    let gallery = gallery::Gallery::new(config.notifications.images.clone());
    let alarm = alarm::ToneAlarm::open(&config.alarm);

    let _wake_lock = if config.keep_awake {
        wakelock::WakeLock::acquire("Morning countdown running")
    } else {
        None
    };

    let speech = SpeechSettings {
        locale: config.speech.locale.clone(),
        rate: config.speech.rate,
    };
    let session = Session::new(target, profile, messages, speech, gallery, announcer, notifier)
        .with_alarm(alarm);

    session.run(SystemClock).await;

    Ok(())
}
