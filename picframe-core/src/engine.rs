//! Connection and command engine
//!
//! Owns the link state and the collaborators. Every event runs to completion
//! before the next one is accepted:
//! - Link events drive the [`ConnectionState`] machine
//! - Writes while connected run parse, dispatch, report, chunk, send
//! - Disconnects restart advertising with the configured device name

use embassy_sync::blocking_mutex::raw::RawMutex;
use picframe_protocol::{
    encode_report, parse, ChunkError, Chunker, DispatchResult, ReportOverflow, ReportText,
    FRAME_PROFILE,
};

use crate::config::{ConfigError, FrameConfig, UnrecognizedPolicy};
use crate::dispatch::Dispatcher;
use crate::queue::LinkEventQueue;
use crate::state::{Action, ConnectionState, LinkEvent, Transition};
use crate::traits::{CharacteristicHandle, DisplayDriver, ImageStorage, RadioError, RadioLink};

/// Reported when a command could not be turned into a report
pub const PROCESS_FAILED: &str = "ERROR: Failed to process command";

/// Bring-up failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StartError {
    Config(ConfigError),
    Radio(RadioError),
}

impl From<ConfigError> for StartError {
    fn from(e: ConfigError) -> Self {
        StartError::Config(e)
    }
}

impl From<RadioError> for StartError {
    fn from(e: RadioError) -> Self {
        StartError::Radio(e)
    }
}

impl From<ChunkError> for StartError {
    fn from(_: ChunkError) -> Self {
        StartError::Config(ConfigError::ZeroChunkSize)
    }
}

/// A pipeline stage failed to produce a report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PipelineError {
    /// Report text did not fit its buffer
    ReportOverflow,
}

impl From<ReportOverflow> for PipelineError {
    fn from(_: ReportOverflow) -> Self {
        PipelineError::ReportOverflow
    }
}

/// Diagnostic counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EngineStats {
    /// Writes that parsed to a command
    pub commands: u32,
    /// Writes that did not parse
    pub parse_errors: u32,
    pub fragments_sent: u32,
    pub fragments_dropped: u32,
    /// Writes whose link dropped before the report went out
    pub writes_abandoned: u32,
}

pub struct Engine<D, S, R> {
    config: FrameConfig,
    display: D,
    storage: S,
    radio: R,
    state: ConnectionState,
    handle: CharacteristicHandle,
    chunker: Chunker,
    stats: EngineStats,
}

impl<D: DisplayDriver, S: ImageStorage, R: RadioLink> Engine<D, S, R> {
    /// Validate `config`, register the service and start advertising
    pub fn start(
        config: FrameConfig,
        display: D,
        storage: S,
        mut radio: R,
    ) -> Result<Self, StartError> {
        config.validate()?;
        let chunker = Chunker::new(usize::from(config.ble.chunk_size))?;

        let handle = radio.register_service(&FRAME_PROFILE)?;
        radio.start_advertising(&config.ble.device_name)?;
        info!(
            "Advertising as {}, chunk size {}",
            config.ble.device_name.as_str(),
            chunker.size()
        );

        Ok(Self {
            config,
            display,
            storage,
            radio,
            state: ConnectionState::Advertising,
            handle,
            chunker,
            stats: EngineStats::default(),
        })
    }

    /// Process one event delivered directly by the radio stack
    pub fn handle_event(&mut self, event: LinkEvent<'_>) {
        self.process(event, &|| false);
    }

    /// Process queued events until the queue is empty
    ///
    /// Returns the number of events handled. A write is abandoned if a
    /// disconnect is queued behind it before its report is sent. Writes the
    /// queue dropped for a lost link count as abandoned too.
    pub fn drain<M: RawMutex, const N: usize>(&mut self, queue: &LinkEventQueue<M, N>) -> usize {
        let mut handled = 0;
        while let Some(event) = queue.pop() {
            self.process(event.as_event(), &|| queue.link_lost_pending());
            handled += 1;
        }
        self.count_purged(queue.take_purged());
        handled
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    pub fn handle(&self) -> CharacteristicHandle {
        self.handle
    }

    pub fn config(&self) -> &FrameConfig {
        &self.config
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn radio(&self) -> &R {
        &self.radio
    }

    pub fn radio_mut(&mut self) -> &mut R {
        &mut self.radio
    }

    fn process(&mut self, event: LinkEvent<'_>, link_lost: &dyn Fn() -> bool) {
        let previous = self.state;
        let Transition { next, action } = previous.transition(&event);
        self.state = next;

        match action {
            Action::None => {
                if next != previous {
                    info!("Client connected");
                }
            }
            Action::StartAdvertising => {
                info!("Client disconnected");
                self.advertise();
            }
            Action::Dispatch => {
                if let LinkEvent::Write(payload) = event {
                    self.run_pipeline(payload, link_lost);
                }
            }
            Action::Ignore => warn!("Ignoring {:?} while {:?}", event, previous),
        }
    }

    fn advertise(&mut self) {
        let name = self.config.ble.device_name.as_str();
        match self.radio.start_advertising(name) {
            Ok(()) => info!("Advertising as {}", name),
            Err(e) => warn!("Failed to restart advertising: {:?}", e),
        }
    }

    fn run_pipeline(&mut self, payload: &[u8], link_lost: &dyn Fn() -> bool) {
        let result = match parse(payload) {
            Ok(command) => {
                if link_lost() {
                    self.abandon();
                    return;
                }
                self.stats.commands = self.stats.commands.saturating_add(1);
                debug!("Command {:?}", command);
                Dispatcher::new(&mut self.display, &mut self.storage, &self.config)
                    .dispatch(&command)
                    .map_err(PipelineError::from)
            }
            Err(e) => {
                self.stats.parse_errors = self.stats.parse_errors.saturating_add(1);
                match self.config.commands.unrecognized {
                    UnrecognizedPolicy::Silent => {
                        warn!("Dropping write: {:?}", e);
                        return;
                    }
                    UnrecognizedPolicy::Notify => {
                        debug!("Reporting parse error {:?}", e);
                        DispatchResult::err(e.message()).map_err(PipelineError::from)
                    }
                }
            }
        };

        self.respond(result, link_lost);
    }

    /// Report the outcome of a write unless its link was lost
    ///
    /// A failed stage is reported as [`PROCESS_FAILED`].
    fn respond(
        &mut self,
        result: Result<DispatchResult, PipelineError>,
        link_lost: &dyn Fn() -> bool,
    ) {
        let result = result.unwrap_or_else(|e| {
            error!("Command pipeline failed: {:?}", e);
            process_failed()
        });

        if link_lost() {
            self.abandon();
            return;
        }
        self.send(&result);
    }

    fn count_purged(&mut self, purged: u32) {
        if purged > 0 {
            self.stats.writes_abandoned = self.stats.writes_abandoned.saturating_add(purged);
            warn!("Link lost, {} queued writes dropped", purged);
        }
    }

    fn abandon(&mut self) {
        self.stats.writes_abandoned = self.stats.writes_abandoned.saturating_add(1);
        warn!("Link lost, abandoning write");
    }

    /// Send `result` as ordered fragments
    ///
    /// A failed fragment is dropped and the rest are still sent.
    fn send(&mut self, result: &DispatchResult) {
        let bytes = encode_report(result);
        let total = self.chunker.fragment_count(bytes.len());

        for (index, fragment) in self.chunker.fragments(bytes).enumerate() {
            match self.radio.notify(self.handle, fragment) {
                Ok(()) => self.stats.fragments_sent = self.stats.fragments_sent.saturating_add(1),
                Err(e) => {
                    self.stats.fragments_dropped = self.stats.fragments_dropped.saturating_add(1);
                    warn!("Fragment {}/{} dropped: {:?}", index + 1, total, e);
                }
            }
        }
    }
}

fn process_failed() -> DispatchResult {
    let mut text = ReportText::new();
    let _ = text.push_str(PROCESS_FAILED);
    DispatchResult::Err(text)
}
