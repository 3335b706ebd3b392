//! High-level API for sampling GPU counters

use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use crate::alloc::{HostAllocator, SystemAllocator};
use crate::config::SamplerConfig;
use crate::context::SamplingContext;
use crate::counters::Counter;
use crate::device::{find_vendor_device, CounterDevice, KgslDevice, MaliDevice};
use crate::error::{HpcError, HpcResult};
use crate::mappings::{AdrenoSeries, Generation, GpuVendor, MaliLayout};

/// Context sampling Adreno counters through KGSL
pub type AdrenoContext<C> = SamplingContext<C, KgslDevice>;

/// Context sampling Mali counters through kbase
pub type MaliContext<C> = SamplingContext<C, MaliDevice>;

/// Identification of one GPU device node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Vendor driving the node
    pub vendor: GpuVendor,
    /// Device node path
    pub path: String,
    /// Identifier reported by the driver
    pub hardware_id: u32,
    /// Display name of the classified generation
    pub generation: String,
    /// Whether the generation is one this library can sample
    pub supported: bool,
}

/// One timestamped set of counter deltas
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    /// Wall-clock time the query completed
    pub timestamp: DateTime<Utc>,
    /// `(counter name, delta)` pairs in request order
    pub values: Vec<(String, u64)>,
}

impl Sample {
    /// Pair `deltas` with the names of `counters`
    pub fn new<C: Counter>(counters: &[C], deltas: &[u64]) -> Self {
        Self {
            timestamp: Utc::now(),
            values: counters
                .iter()
                .zip(deltas)
                .map(|(counter, &delta)| (counter.name().into_owned(), delta))
                .collect(),
        }
    }

    /// Delta recorded for the counter named `name`
    pub fn get(&self, name: &str) -> Option<u64> {
        self.values
            .iter()
            .find(|(counter, _)| counter == name)
            .map(|(_, delta)| *delta)
    }
}

fn resolve_path(vendor: GpuVendor, device_path: Option<&Path>) -> HpcResult<PathBuf> {
    match device_path {
        Some(path) => Ok(path.to_path_buf()),
        None => find_vendor_device(vendor).map(PathBuf::from).ok_or_else(|| {
            HpcError::DeviceUnavailable(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no {vendor} device node found"),
            ))
        }),
    }
}

/// Create a context for Adreno counters on the given or auto-detected node
#[cfg(feature = "adreno")]
pub fn open_adreno_context<C>(counters: &[C], device_path: Option<&Path>) -> HpcResult<AdrenoContext<C>>
where
    C: Counter<Generation = AdrenoSeries>,
{
    let path = resolve_path(GpuVendor::Adreno, device_path)?;
    SamplingContext::create(|| KgslDevice::open(&path), counters, SystemAllocator)
}

/// Create a context for Mali counters on the given or auto-detected node
#[cfg(feature = "mali")]
pub fn open_mali_context<C>(counters: &[C], device_path: Option<&Path>) -> HpcResult<MaliContext<C>>
where
    C: Counter<Generation = MaliLayout>,
{
    let path = resolve_path(GpuVendor::Mali, device_path)?;
    SamplingContext::create(|| MaliDevice::open(&path), counters, SystemAllocator)
}

/// Open a node just long enough to read and classify its hardware id
pub fn describe_device(path: &str) -> HpcResult<DeviceInfo> {
    match GpuVendor::from_device_path(path) {
        GpuVendor::Adreno => describe_with::<AdrenoSeries, _>(path, KgslDevice::open(path)?),
        GpuVendor::Mali => describe_with::<MaliLayout, _>(path, MaliDevice::open(path)?),
        GpuVendor::Unknown => Err(HpcError::InvalidParameter(format!("{path} is not a known GPU node"))),
    }
}

fn describe_with<G: Generation, D: CounterDevice>(path: &str, device: D) -> HpcResult<DeviceInfo> {
    let hardware_id = device.hardware_id();
    device.close()?;
    let hardware_id = hardware_id?;
    let generation = G::classify(hardware_id);

    Ok(DeviceInfo {
        vendor: G::VENDOR,
        path: path.to_string(),
        hardware_id,
        generation: generation.to_string(),
        supported: generation.is_known(),
    })
}

/// Take a baseline, then `config.samples` samples `config.interval_ms` apart
///
/// Counting is stopped again before returning, even when a query fails.
pub fn collect_samples<C, D, A>(
    context: &mut SamplingContext<C, D, A>,
    counters: &[C],
    config: &SamplerConfig,
) -> HpcResult<Vec<Sample>>
where
    C: Counter,
    D: CounterDevice,
    A: HostAllocator + Clone,
{
    config.validate()?;
    if counters.len() != context.len() {
        return Err(HpcError::InvalidParameter(format!(
            "{} counter names for a context of {}",
            counters.len(),
            context.len()
        )));
    }

    context.start()?;
    let result = take_samples(context, counters, config);
    let stopped = context.stop();
    let samples = result?;
    stopped?;

    info!("collected {} samples of {} counters", samples.len(), counters.len());
    Ok(samples)
}

fn take_samples<C, D, A>(
    context: &mut SamplingContext<C, D, A>,
    counters: &[C],
    config: &SamplerConfig,
) -> HpcResult<Vec<Sample>>
where
    C: Counter,
    D: CounterDevice,
    A: HostAllocator + Clone,
{
    let interval = Duration::from_millis(config.interval_ms);
    let mut deltas = vec![0u64; context.len()];
    let mut samples = Vec::with_capacity(config.samples);

    for _ in 0..config.samples {
        thread::sleep(interval);
        context.query(&mut deltas)?;
        samples.push(Sample::new(counters, &deltas));
    }

    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counters::{AdrenoCounter, CounterSlot};
    use crate::device::MockCounterDevice;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sample_pairs_names_with_deltas() {
        let counters = [AdrenoCounter::CpAlwaysCount, AdrenoCounter::SpBusyCycles];
        let sample = Sample::new(&counters, &[3, 4]);
        assert_eq!(sample.get("CP_ALWAYS_COUNT"), Some(3));
        assert_eq!(sample.get("SP_BUSY_CYCLES"), Some(4));
        assert_eq!(sample.get("RB_BUSY_CYCLES"), None);
    }

    #[test]
    fn test_sample_serializes() {
        let sample = Sample::new(&[AdrenoCounter::CpAlwaysCount], &[7]);
        let json = serde_json::to_value(&sample).unwrap();
        assert_eq!(json["values"][0][0], "CP_ALWAYS_COUNT");
        assert_eq!(json["values"][0][1], 7);
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn test_describe_with_classifies_and_closes() {
        let mut device = MockCounterDevice::new();
        device.expect_hardware_id().returning(|| Ok(0x9005));
        device.expect_close().times(1).returning(|| Ok(()));

        let info = describe_with::<MaliLayout, _>("/dev/mali0", device).unwrap();
        assert_eq!(info.vendor, GpuVendor::Mali);
        assert_eq!(info.hardware_id, 0x9005);
        assert_eq!(info.generation, "Mali-G78 (Tbox layout)");
        assert!(info.supported);
    }

    #[test]
    fn test_describe_unknown_node() {
        assert!(matches!(
            describe_device("/dev/dri/renderD128"),
            Err(HpcError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_collect_samples_stops_afterwards() {
        let mut device = MockCounterDevice::new();
        device.expect_hardware_id().returning(|| Ok(640));
        device.expect_activate().times(2).returning(|_| Ok(()));
        device.expect_deactivate().times(1).returning(|_| Ok(()));
        let mut raw = 0u64;
        device
            .expect_read()
            .times(3)
            .returning(move |_slots: &[CounterSlot], values: &mut [u64]| {
                raw += 10;
                values[0] = raw;
                Ok(())
            });
        device.expect_close().returning(|| Ok(()));

        let counters = [AdrenoCounter::CpAlwaysCount];
        let opener = move || -> HpcResult<MockCounterDevice> { Ok(device) };
        let mut ctx = SamplingContext::create(opener, &counters, SystemAllocator).unwrap();

        let config = SamplerConfig {
            interval_ms: 1,
            samples: 2,
            ..SamplerConfig::default()
        };
        let samples = collect_samples(&mut ctx, &counters, &config).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].get("CP_ALWAYS_COUNT"), Some(10));
        assert_eq!(samples[1].get("CP_ALWAYS_COUNT"), Some(10));
        assert_eq!(ctx.state(), crate::context::ContextState::Idle);
    }
}
