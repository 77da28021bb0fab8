//! Late-mode alarm tone played through rodio.

use std::time::Duration;

use rodio::source::{SineWave, Source};
use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, info, warn};

use crate::config::AlarmConfig;

pub struct ToneAlarm {
    // Kept alive for as long as the alarm can sound.
    stream: OutputStream,
    sink: Option<Sink>,
    frequency_hz: f32,
    volume: f32,
    beep: Duration,
}

impl ToneAlarm {
    /// Open the default audio output. `None` (with a warning) if there is none.
    pub fn open(config: &AlarmConfig) -> Option<Self> {
        if !config.enabled {
            return None;
        }

        match OutputStreamBuilder::open_default_stream() {
            Ok(mut stream) => {
                stream.log_on_drop(false);
                info!("Alarm tone ready ({} Hz)", config.frequency_hz);
                Some(Self {
                    stream,
                    sink: None,
                    frequency_hz: config.frequency_hz,
                    volume: config.volume.clamp(0.0, 1.0),
                    beep: Duration::from_millis(config.beep_ms.max(50)),
                })
            }
            Err(e) => {
                warn!("Failed to open audio output, alarm disabled: {e}");
                None
            }
        }
    }

    /// Queue one beep unless the previous one is still playing.
    pub fn pulse(&mut self) {
        let sink = self
            .sink
            .get_or_insert_with(|| Sink::connect_new(self.stream.mixer()));
        if !sink.empty() {
            return;
        }

        let tone = SineWave::new(self.frequency_hz)
            .take_duration(self.beep)
            .amplify(self.volume);
        sink.append(tone);
    }

    pub fn silence(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
            debug!("Alarm silenced");
        }
    }
}
