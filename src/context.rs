//! Sampling context lifecycle
//!
//! A [`SamplingContext`] owns one open device, the generation it was
//! classified as, and the encoded slots of the counters requested at
//! creation together with their previous raw values.
//!
//! ```text
//! create ──► Created ──start──► Active ──stop──► Idle
//!                ▲                 ▲               │
//!                │                 └─────start─────┘
//!             (query is valid in every state)
//! ```
//!
//! A context is not synchronised. Callers sharing one across threads must
//! serialise access themselves.

use std::fmt;
use std::io;
use std::marker::PhantomData;

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::alloc::{HostAllocator, SystemAllocator};
use crate::counters::{Counter, CounterSlot};
use crate::delta::SlotTable;
use crate::device::{CounterDevice, DeviceOpener};
use crate::error::{HpcError, HpcResult};
use crate::mappings::Generation;

/// Activation state of a context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContextState {
    /// Counters are pre-armed but no baseline has been taken
    Created,
    /// Counting is enabled and a baseline is in place
    Active,
    /// Counting has been disabled by `stop`
    Idle,
}

impl fmt::Display for ContextState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextState::Created => write!(f, "created"),
            ContextState::Active => write!(f, "active"),
            ContextState::Idle => write!(f, "idle"),
        }
    }
}

/// Counter sampling session on one GPU device
pub struct SamplingContext<C, D, A = SystemAllocator>
where
    C: Counter,
    D: CounterDevice,
    A: HostAllocator + Clone,
{
    device: Option<D>,
    generation: C::Generation,
    hardware_id: u32,
    table: SlotTable<A>,
    state: ContextState,
    _counter: PhantomData<fn() -> C>,
}

impl<C, D, A> SamplingContext<C, D, A>
where
    C: Counter,
    D: CounterDevice,
    A: HostAllocator + Clone,
{
    /// Open a device and prepare it for sampling `counters`
    ///
    /// Host arrays come from `allocator` before the device is opened. The
    /// device is classified, every counter is encoded in caller order, and
    /// then each slot is activated once. An unknown device fails with
    /// [`HpcError::UnknownDevice`] before any encoding or activation. On
    /// any failure the device is closed and host memory is released.
    pub fn create<O>(opener: O, counters: &[C], allocator: A) -> HpcResult<Self>
    where
        O: DeviceOpener<Device = D>,
    {
        let mut table = SlotTable::with_len(counters.len(), allocator)?;
        let mut device = opener.open()?;

        match Self::prepare(&mut device, &mut table, counters) {
            Ok((hardware_id, generation)) => {
                debug!(
                    "created context for {} counters on {} (id {:#x})",
                    counters.len(),
                    generation,
                    hardware_id
                );
                Ok(Self {
                    device: Some(device),
                    generation,
                    hardware_id,
                    table,
                    state: ContextState::Created,
                    _counter: PhantomData,
                })
            }
            Err(err) => {
                if let Err(close_err) = device.close() {
                    warn!("closing device after failed creation: {}", close_err);
                }
                Err(err)
            }
        }
    }

    fn prepare(device: &mut D, table: &mut SlotTable<A>, counters: &[C]) -> HpcResult<(u32, C::Generation)> {
        let hardware_id = device.hardware_id()?;
        let generation = C::Generation::classify(hardware_id);
        if !generation.is_known() {
            return Err(HpcError::UnknownDevice { hardware_id });
        }

        for (index, &counter) in counters.iter().enumerate() {
            table.set_slot(index, counter.encode(generation)?);
        }
        for &slot in table.slots() {
            device.activate(slot)?;
        }

        Ok((hardware_id, generation))
    }

    /// Re-arm every counter and take a fresh baseline
    ///
    /// Anything counted before this call is discarded from later deltas.
    pub fn start(&mut self) -> HpcResult<()> {
        let device = attached(&mut self.device)?;

        for &slot in self.table.slots() {
            device.activate(slot)?;
        }

        let (slots, scratch) = self.table.read_target();
        device.read(slots, scratch)?;
        self.table.commit_baseline();

        debug!("{} -> active with baseline {:?}", self.state, self.table.previous_values());
        self.state = ContextState::Active;
        Ok(())
    }

    /// Disarm every counter
    ///
    /// Previous values are kept. Stopping an idle context does nothing.
    pub fn stop(&mut self) -> HpcResult<()> {
        if self.state == ContextState::Idle {
            return Ok(());
        }

        let device = attached(&mut self.device)?;
        for &slot in self.table.slots() {
            device.deactivate(slot)?;
        }

        debug!("{} -> idle", self.state);
        self.state = ContextState::Idle;
        Ok(())
    }

    /// Read every counter and write the delta since the previous reading
    ///
    /// `values[i]` receives the delta of the i-th requested counter; elements
    /// past [`len`](Self::len) are left untouched. A failed read leaves both
    /// `values` and the previous values unchanged.
    pub fn query(&mut self, values: &mut [u64]) -> HpcResult<()> {
        if values.len() < self.table.len() {
            return Err(HpcError::BufferTooSmall {
                needed: self.table.len(),
                actual: values.len(),
            });
        }

        let device = attached(&mut self.device)?;
        let (slots, scratch) = self.table.read_target();
        device.read(slots, scratch)?;

        self.table.commit_deltas(values);
        trace!("query deltas {:?}", &values[..self.table.len()]);
        Ok(())
    }

    /// [`query`](Self::query) into a freshly allocated vector
    pub fn query_vec(&mut self) -> HpcResult<Vec<u64>> {
        let mut values = vec![0; self.table.len()];
        self.query(&mut values)?;
        Ok(values)
    }

    /// Close the device and release host memory
    ///
    /// A close failure is returned, but host memory is released regardless.
    pub fn destroy(mut self) -> HpcResult<()> {
        match self.device.take() {
            Some(device) => {
                debug!("destroying {} context", self.state);
                device.close()
            }
            None => Ok(()),
        }
    }

    /// Number of counters sampled by this context
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether the context samples no counters
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Current activation state
    pub fn state(&self) -> ContextState {
        self.state
    }

    /// Generation the device was classified as
    pub fn generation(&self) -> C::Generation {
        self.generation
    }

    /// Hardware identifier read at creation
    pub fn hardware_id(&self) -> u32 {
        self.hardware_id
    }

    /// Encoded slots, in the order the counters were requested
    pub fn slots(&self) -> &[CounterSlot] {
        self.table.slots()
    }

    /// Raw values of the last baseline or query
    pub fn previous_values(&self) -> &[u64] {
        self.table.previous_values()
    }

    /// Mutable access to the underlying device
    pub fn device(&mut self) -> HpcResult<&mut D> {
        attached(&mut self.device)
    }
}

fn attached<D>(device: &mut Option<D>) -> HpcResult<&mut D> {
    device
        .as_mut()
        .ok_or_else(|| HpcError::DeviceUnavailable(io::Error::from(io::ErrorKind::NotConnected)))
}

impl<C, D, A> Drop for SamplingContext<C, D, A>
where
    C: Counter,
    D: CounterDevice,
    A: HostAllocator + Clone,
{
    fn drop(&mut self) {
        if let Some(device) = self.device.take() {
            if let Err(err) = device.close() {
                warn!("closing device of dropped context: {}", err);
            }
        }
    }
}

impl<C, D, A> fmt::Debug for SamplingContext<C, D, A>
where
    C: Counter,
    D: CounterDevice,
    A: HostAllocator + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SamplingContext")
            .field("generation", &self.generation)
            .field("hardware_id", &self.hardware_id)
            .field("state", &self.state)
            .field("table", &self.table)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::tests::CountingAllocator;
    use crate::counters::{A6xxCounter, AdrenoCounter, MaliValhallCounter};
    use crate::device::MockCounterDevice;
    use crate::mappings::{AdrenoSeries, MaliLayout};
    use mockall::Sequence;
    use pretty_assertions::assert_eq;

    const COUNTERS: [AdrenoCounter; 2] = [AdrenoCounter::CpAlwaysCount, AdrenoCounter::SpBusyCycles];

    fn scripted_reads(device: &mut MockCounterDevice, seq: &mut Sequence, reads: &[[u64; 2]]) {
        for &raw in reads {
            device
                .expect_read()
                .times(1)
                .in_sequence(seq)
                .returning(move |_slots: &[CounterSlot], values: &mut [u64]| {
                    values.copy_from_slice(&raw);
                    Ok(())
                });
        }
    }

    fn opener(device: MockCounterDevice) -> impl FnOnce() -> HpcResult<MockCounterDevice> {
        move || Ok(device)
    }

    fn adreno_device(gpu_id: u32) -> MockCounterDevice {
        let mut device = MockCounterDevice::new();
        device.expect_hardware_id().returning(move || Ok(gpu_id));
        device
    }

    #[test]
    fn test_deltas_follow_previous_reading() {
        let mut device = adreno_device(640);
        let mut seq = Sequence::new();
        device.expect_activate().times(4).returning(|_| Ok(()));
        scripted_reads(&mut device, &mut seq, &[[10, 100], [15, 140], [15, 200]]);
        device.expect_close().times(1).returning(|| Ok(()));

        let mut ctx = SamplingContext::create(opener(device), &COUNTERS, SystemAllocator).unwrap();
        assert_eq!(ctx.generation(), AdrenoSeries::A6xx);
        assert_eq!(ctx.state(), ContextState::Created);

        ctx.start().unwrap();
        assert_eq!(ctx.previous_values(), &[10, 100]);

        let mut out = [0u64; 2];
        ctx.query(&mut out).unwrap();
        assert_eq!(out, [5, 40]);
        assert_eq!(ctx.previous_values(), &[15, 140]);

        ctx.query(&mut out).unwrap();
        assert_eq!(out, [0, 60]);

        ctx.destroy().unwrap();
    }

    #[test]
    fn test_slots_follow_caller_order() {
        let mut device = adreno_device(530);
        device.expect_activate().times(2).returning(|_| Ok(()));
        device.expect_close().returning(|| Ok(()));

        let counters = [AdrenoCounter::SpBusyCycles, AdrenoCounter::CpAlwaysCount];
        let ctx = SamplingContext::create(opener(device), &counters, SystemAllocator).unwrap();
        assert_eq!(ctx.generation(), AdrenoSeries::A5xx);
        assert_eq!(ctx.slots()[0], AdrenoCounter::SpBusyCycles.encode(AdrenoSeries::A5xx).unwrap());
        assert_eq!(ctx.slots()[1], AdrenoCounter::CpAlwaysCount.encode(AdrenoSeries::A5xx).unwrap());
        assert_eq!(ctx.len(), 2);
        assert_eq!(ctx.previous_values().len(), 2);
    }

    #[test]
    fn test_unknown_device_activates_nothing() {
        let allocator = CountingAllocator::default();
        let mut device = adreno_device(0x999);
        device.expect_activate().times(0);
        device.expect_close().times(1).returning(|| Ok(()));

        let err = SamplingContext::create(opener(device), &COUNTERS, &allocator).unwrap_err();
        assert!(matches!(err, HpcError::UnknownDevice { hardware_id: 0x999 }));
        assert_eq!(allocator.live.get(), 0);
    }

    #[test]
    fn test_unsupported_counter_aborts_before_activation() {
        let allocator = CountingAllocator::default();
        let mut device = adreno_device(540);
        device.expect_activate().times(0);
        device.expect_close().times(1).returning(|| Ok(()));

        let counters = [A6xxCounter::new(0x19, 7)];
        let err = SamplingContext::create(opener(device), &counters, &allocator).unwrap_err();
        assert!(matches!(err, HpcError::UnsupportedCounter { .. }));
        assert_eq!(allocator.live.get(), 0);
    }

    #[test]
    fn test_activation_failure_is_propagated() {
        let mut device = adreno_device(640);
        device.expect_activate().times(1).returning(|_| {
            Err(HpcError::IoctlFailure {
                request: "KGSL_PERFCOUNTER_GET",
                source: io::Error::from_raw_os_error(libc::EBUSY),
            })
        });
        device.expect_close().times(1).returning(|| Ok(()));

        let err = SamplingContext::create(opener(device), &COUNTERS, SystemAllocator).unwrap_err();
        assert_eq!(err.status_code(), -libc::EBUSY);
    }

    #[test]
    fn test_open_failure_releases_memory() {
        let allocator = CountingAllocator::default();
        let opener = || -> HpcResult<MockCounterDevice> {
            Err(HpcError::DeviceUnavailable(io::Error::from(io::ErrorKind::NotFound)))
        };
        let err = SamplingContext::create(opener, &COUNTERS, &allocator).unwrap_err();
        assert!(matches!(err, HpcError::DeviceUnavailable(_)));
        assert_eq!(allocator.total.get(), 3);
        assert_eq!(allocator.live.get(), 0);
    }

    #[test]
    fn test_allocation_failure_skips_open() {
        let allocator = CountingAllocator::default();
        allocator.fail_after.set(Some(1));
        let opener = || -> HpcResult<MockCounterDevice> { panic!("device must not be opened") };
        let err = SamplingContext::create(opener, &COUNTERS, &allocator).unwrap_err();
        assert!(matches!(err, HpcError::OutOfHostMemory { .. }));
        assert_eq!(allocator.live.get(), 0);
    }

    #[test]
    fn test_stop_twice_is_idempotent() {
        let mut device = adreno_device(640);
        let mut seq = Sequence::new();
        device.expect_activate().times(4).returning(|_| Ok(()));
        device.expect_deactivate().times(2).returning(|_| Ok(()));
        scripted_reads(&mut device, &mut seq, &[[7, 8]]);
        device.expect_close().returning(|| Ok(()));

        let mut ctx = SamplingContext::create(opener(device), &COUNTERS, SystemAllocator).unwrap();
        ctx.start().unwrap();
        ctx.stop().unwrap();
        assert_eq!(ctx.state(), ContextState::Idle);
        ctx.stop().unwrap();
        assert_eq!(ctx.state(), ContextState::Idle);
        assert_eq!(ctx.previous_values(), &[7, 8]);
    }

    #[test]
    fn test_failed_query_changes_nothing() {
        let mut device = adreno_device(640);
        let mut seq = Sequence::new();
        device.expect_activate().times(4).returning(|_| Ok(()));
        scripted_reads(&mut device, &mut seq, &[[1, 2]]);
        device
            .expect_read()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_slots: &[CounterSlot], values: &mut [u64]| {
                values[0] = 99;
                Err(HpcError::IoctlFailure {
                    request: "KGSL_PERFCOUNTER_READ",
                    source: io::Error::from_raw_os_error(libc::EIO),
                })
            });
        device.expect_close().returning(|| Ok(()));

        let mut ctx = SamplingContext::create(opener(device), &COUNTERS, SystemAllocator).unwrap();
        ctx.start().unwrap();

        let mut out = [42u64; 2];
        assert!(ctx.query(&mut out).is_err());
        assert_eq!(out, [42, 42]);
        assert_eq!(ctx.previous_values(), &[1, 2]);
    }

    #[test]
    fn test_short_output_buffer_is_rejected() {
        let mut device = adreno_device(640);
        device.expect_activate().returning(|_| Ok(()));
        device.expect_read().times(0);
        device.expect_close().returning(|| Ok(()));

        let mut ctx = SamplingContext::create(opener(device), &COUNTERS, SystemAllocator).unwrap();
        let mut out = [0u64; 1];
        let err = ctx.query(&mut out).unwrap_err();
        assert!(matches!(err, HpcError::BufferTooSmall { needed: 2, actual: 1 }));
    }

    #[test]
    fn test_destroy_reports_close_failure_and_frees_memory() {
        let allocator = CountingAllocator::default();
        let mut device = adreno_device(640);
        device.expect_activate().returning(|_| Ok(()));
        device
            .expect_close()
            .times(1)
            .returning(|| Err(HpcError::DeviceUnavailable(io::Error::from_raw_os_error(libc::EIO))));

        let ctx = SamplingContext::create(opener(device), &COUNTERS, &allocator).unwrap();
        assert_eq!(allocator.live.get(), 3);
        assert!(matches!(ctx.destroy(), Err(HpcError::DeviceUnavailable(_))));
        assert_eq!(allocator.live.get(), 0);
    }

    #[test]
    fn test_drop_closes_device_once() {
        let mut device = adreno_device(640);
        device.expect_activate().returning(|_| Ok(()));
        device.expect_close().times(1).returning(|| Ok(()));

        let ctx = SamplingContext::create(opener(device), &COUNTERS, SystemAllocator).unwrap();
        drop(ctx);
    }

    #[test]
    fn test_mali_family_counter_on_valhall() {
        let mut device = MockCounterDevice::new();
        device.expect_hardware_id().returning(|| Ok(0x9005));
        device
            .expect_activate()
            .withf(|slot| *slot == CounterSlot::new(2, 27))
            .times(1)
            .returning(|_| Ok(()));
        device.expect_close().returning(|| Ok(()));

        let counters = [MaliValhallCounter::ShaderCoreExecInstrFma];
        let ctx = SamplingContext::create(opener(device), &counters, SystemAllocator).unwrap();
        assert_eq!(ctx.generation(), MaliLayout::Tbox);
    }

    #[test]
    fn test_empty_context() {
        let mut device = adreno_device(610);
        device.expect_activate().times(0);
        device.expect_read().returning(|_slots: &[CounterSlot], _values: &mut [u64]| Ok(()));
        device.expect_close().returning(|| Ok(()));

        let counters: [AdrenoCounter; 0] = [];
        let mut ctx = SamplingContext::create(opener(device), &counters, SystemAllocator).unwrap();
        assert!(ctx.is_empty());
        ctx.start().unwrap();
        assert_eq!(ctx.query_vec().unwrap(), Vec::<u64>::new());
    }
}
