//! The contract between a driver instance and the host's receiver subsystem.

use core::sync::atomic::{AtomicUsize, Ordering};

use embassy_sync::{blocking_mutex::raw::RawMutex, signal::Signal};
use embassy_time::Timer;

use crate::{
    config::{ConfigError, GpioIrConfig, Settings, Variant},
    extractor::Extractor,
    register::GpioRegister,
    Code,
};

/// What the host records when it registers an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PluginDescriptor {
    pub name: &'static str,
    pub minor: u8,
    pub code_length: u8,
    /// Samples per second the host should poll at; `None` for interrupt driven instances.
    pub sample_rate: Option<u8>,
}

/// Raised from the capture card's interrupt handler when the GPIO state changes.
pub struct GpioEventSignal<M: RawMutex>(Signal<M, ()>);
impl<M: RawMutex> Default for GpioEventSignal<M> {
    fn default() -> Self {
        Self(Signal::new())
    }
}
impl<M: RawMutex> GpioEventSignal<M> {
    pub const fn new() -> Self {
        Self(Signal::new())
    }

    /// Safe to call from interrupt context.
    pub fn notify(&self) {
        self.0.signal(());
    }

    pub async fn wait(&self) {
        self.0.wait().await
    }

    pub fn is_pending(&self) -> bool {
        self.0.signaled()
    }
}

/// State shared between an instance and the host: the interrupt signal and the count of open
/// users. Lives outside the instance so the host can hold users while the instance extracts.
pub struct HostLink<M: RawMutex> {
    signal: GpioEventSignal<M>,
    users: AtomicUsize,
}
impl<M: RawMutex> Default for HostLink<M> {
    fn default() -> Self {
        Self::new()
    }
}
impl<M: RawMutex> HostLink<M> {
    pub const fn new() -> Self {
        Self {
            signal: GpioEventSignal::new(),
            users: AtomicUsize::new(0),
        }
    }

    pub fn signal(&self) -> &GpioEventSignal<M> {
        &self.signal
    }

    /// Mark the instance in use until the returned guard is dropped.
    pub fn acquire(&self) -> InUse<'_> {
        self.users.fetch_add(1, Ordering::AcqRel);
        InUse { users: &self.users }
    }

    pub fn use_count(&self) -> usize {
        self.users.load(Ordering::Acquire)
    }

    /// The host must not tear down the instance while this is true.
    pub fn is_in_use(&self) -> bool {
        self.use_count() != 0
    }
}

/// One user of an instance. Dropping it releases the use.
#[must_use = "the instance is released as soon as this is dropped"]
pub struct InUse<'c> {
    users: &'c AtomicUsize,
}
impl InUse<'_> {
    pub fn release(self) {}
}
impl Drop for InUse<'_> {
    fn drop(&mut self) {
        self.users.fetch_sub(1, Ordering::AcqRel);
    }
}

/// The four operations the host calls on a registered instance.
pub trait CodeSource<'c> {
    type Mutex: RawMutex + 'c;

    fn descriptor(&self) -> PluginDescriptor;

    /// A code if one is ready, otherwise `None`; never blocks.
    fn try_extract(&mut self) -> Option<Code>;

    /// The signal to wait on before calling [`Self::try_extract`]; `None` when the host should
    /// poll at the descriptor's sample rate instead.
    fn wait_handle(&self) -> Option<&'c GpioEventSignal<Self::Mutex>>;

    fn acquire(&self) -> InUse<'c>;
}

/// A configured driver instance ready to register with the host.
pub struct GpioIrPlugin<'c, R: GpioRegister, M: RawMutex> {
    name: &'static str,
    extractor: Extractor<R>,
    link: &'c HostLink<M>,
}

impl<'c, R: GpioRegister, M: RawMutex> GpioIrPlugin<'c, R, M> {
    /// Validates `config`; an invalid config never produces an instance.
    pub fn new(
        name: &'static str,
        register: R,
        config: &GpioIrConfig,
        link: &'c HostLink<M>,
    ) -> Result<Self, ConfigError> {
        let settings = config.validate()?;
        Ok(Self::with_settings(name, register, settings, link))
    }

    pub fn with_settings(
        name: &'static str,
        register: R,
        settings: Settings,
        link: &'c HostLink<M>,
    ) -> Self {
        Self {
            name,
            extractor: Extractor::new(register, settings),
            link,
        }
    }

    pub fn extractor(&self) -> &Extractor<R> {
        &self.extractor
    }

    pub fn extractor_mut(&mut self) -> &mut Extractor<R> {
        &mut self.extractor
    }

    /// Wait for the next code: on the GPIO signal for interrupt driven instances, on a timer at
    /// the sample rate for polled ones.
    pub async fn next_code(&mut self) -> Code {
        let period = self.extractor.settings().sample_period();
        loop {
            match period {
                Some(period) => Timer::after(period).await,
                None => self.link.signal.wait().await,
            }
            if let Some(code) = self.extractor.try_extract() {
                return code;
            }
        }
    }
}

impl<'c, R: GpioRegister, M: RawMutex + 'c> CodeSource<'c> for GpioIrPlugin<'c, R, M> {
    type Mutex = M;

    fn descriptor(&self) -> PluginDescriptor {
        let settings = self.extractor.settings();
        PluginDescriptor {
            name: self.name,
            minor: settings.minor(),
            code_length: settings.code_length(),
            sample_rate: settings.sample_rate(),
        }
    }

    fn try_extract(&mut self) -> Option<Code> {
        self.extractor.try_extract()
    }

    fn wait_handle(&self) -> Option<&'c GpioEventSignal<M>> {
        match self.extractor.settings().variant() {
            Variant::Interrupt => Some(self.link.signal()),
            Variant::Polled => None,
        }
    }

    fn acquire(&self) -> InUse<'c> {
        self.link.acquire()
    }
}

#[cfg(test)]
#[path = "plugin_test.rs"]
mod test;
