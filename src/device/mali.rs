//! ARM Mali kbase transport (`/dev/mali*`)
//!
//! The kbase hardware counter reader dumps whole counter blocks and resets
//! them on every dump. This transport accumulates dumps into running totals
//! so that reads look like the monotonic registers the delta engine expects.

use std::collections::HashSet;
use std::ops::Range;
use std::os::unix::io::RawFd;
use std::path::Path;
use std::ptr;

use log::{debug, trace, warn};

use super::ioctl::{close_fd, ioctl_value, ioctl_with, ior, iow, iowr, open_node};
use super::CounterDevice;
use crate::counters::{mali::block, CounterSlot};
use crate::error::{HpcError, HpcResult};

const KBASE_IOCTL_TYPE: u32 = 0x80;
const KBASE_HWCNT_READER: u32 = 0xBE;

#[repr(C)]
#[derive(Default)]
struct KbaseVersionCheck {
    major: u16,
    minor: u16,
}

#[repr(C)]
#[derive(Default)]
struct KbaseSetFlags {
    create_flags: u32,
}

#[repr(C)]
#[derive(Default)]
struct KbaseGetGpuProps {
    buffer: u64,
    size: u32,
    flags: u32,
}

#[repr(C)]
#[derive(Debug, Default, PartialEq, Eq)]
struct KbaseHwcntReaderSetup {
    buffer_count: u32,
    fe_bm: u32,
    shader_bm: u32,
    tiler_bm: u32,
    mmu_l2_bm: u32,
}

#[repr(C)]
#[derive(Default)]
struct KbaseHwcntReaderMetadata {
    timestamp: u64,
    event_id: u32,
    buffer_idx: u32,
}

const KBASE_IOCTL_VERSION_CHECK: u32 = iowr::<KbaseVersionCheck>(KBASE_IOCTL_TYPE, 0);
const KBASE_IOCTL_SET_FLAGS: u32 = iow::<KbaseSetFlags>(KBASE_IOCTL_TYPE, 1);
const KBASE_IOCTL_GET_GPUPROPS: u32 = iow::<KbaseGetGpuProps>(KBASE_IOCTL_TYPE, 3);
const KBASE_IOCTL_HWCNT_READER_SETUP: u32 = iow::<KbaseHwcntReaderSetup>(KBASE_IOCTL_TYPE, 8);

const KBASE_HWCNT_READER_GET_BUFFER_SIZE: u32 = ior::<u32>(KBASE_HWCNT_READER, 0x01);
const KBASE_HWCNT_READER_DUMP: u32 = iow::<u32>(KBASE_HWCNT_READER, 0x10);
const KBASE_HWCNT_READER_GET_BUFFER: u32 = ior::<KbaseHwcntReaderMetadata>(KBASE_HWCNT_READER, 0x20);
const KBASE_HWCNT_READER_PUT_BUFFER: u32 = iow::<KbaseHwcntReaderMetadata>(KBASE_HWCNT_READER, 0x21);

const GPUPROP_PRODUCT_ID: u32 = 1;
const GPUPROP_L2_NUM_L2_SLICES: u32 = 15;
const GPUPROP_RAW_SHADER_PRESENT: u32 = 25;

/// Counters per hardware block in a dump
pub const COUNTERS_PER_BLOCK: usize = 64;
const COUNTERS_PER_ENABLE_BIT: u32 = 4;
const ENABLE_BITS: usize = COUNTERS_PER_BLOCK / COUNTERS_PER_ENABLE_BIT as usize;
const BLOCK_TYPES: usize = 4;
const READER_BUFFER_COUNT: u32 = 2;

/// GPU properties relevant to counter sampling
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GpuProps {
    /// 16-bit product id used for layout classification
    pub product_id: u32,
    /// Number of L2 cache slices (memory system blocks)
    pub l2_slices: u32,
    /// Bitmask of present shader cores
    pub shader_present: u64,
}

/// Parse the key/value stream returned by `GET_GPUPROPS`
///
/// Each entry is a little-endian `u32` key `(property << 2) | size_code`
/// followed by a value of 1, 2, 4 or 8 bytes. Unknown properties are skipped.
pub fn parse_gpu_props(bytes: &[u8]) -> HpcResult<GpuProps> {
    let mut props = GpuProps::default();
    let mut rest = bytes;

    while !rest.is_empty() {
        let key = u32::from_le_bytes(take::<4>(&mut rest)?);
        let value = match key & 0x3 {
            0 => u64::from(take::<1>(&mut rest)?[0]),
            1 => u64::from(u16::from_le_bytes(take::<2>(&mut rest)?)),
            2 => u64::from(u32::from_le_bytes(take::<4>(&mut rest)?)),
            _ => u64::from_le_bytes(take::<8>(&mut rest)?),
        };

        match key >> 2 {
            GPUPROP_PRODUCT_ID => props.product_id = value as u32,
            GPUPROP_L2_NUM_L2_SLICES => props.l2_slices = value as u32,
            GPUPROP_RAW_SHADER_PRESENT => props.shader_present = value,
            _ => {}
        }
    }

    Ok(props)
}

fn take<const N: usize>(rest: &mut &[u8]) -> HpcResult<[u8; N]> {
    if rest.len() < N {
        return Err(HpcError::InvalidParameter("truncated GPU property buffer".to_string()));
    }
    let (head, tail) = rest.split_at(N);
    *rest = tail;
    let mut out = [0u8; N];
    out.copy_from_slice(head);
    Ok(out)
}

/// Position of each counter block inside a reader dump
///
/// Blocks appear as job manager, tiler, one per L2 slice, then one per shader
/// core up to the highest present core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DumpLayout {
    /// Memory system block instances
    pub l2_slices: usize,
    /// Shader core block instances
    pub shader_cores: usize,
}

impl DumpLayout {
    /// Derive the layout from GPU properties
    pub fn from_props(props: &GpuProps) -> Self {
        Self {
            l2_slices: props.l2_slices.max(1) as usize,
            shader_cores: (u64::BITS - props.shader_present.leading_zeros()) as usize,
        }
    }

    /// Block indices holding instances of `block_type`
    pub fn instances(&self, block_type: u32) -> Range<usize> {
        let l2_start = 2;
        let sc_start = l2_start + self.l2_slices;
        match block_type {
            block::JOB_MANAGER => 0..1,
            block::TILER => 1..2,
            block::MEMORY => l2_start..sc_start,
            block::SHADER_CORE => sc_start..sc_start + self.shader_cores,
            _ => 0..0,
        }
    }
}

/// Running per-counter totals across reader dumps
#[derive(Debug, Clone)]
pub struct CounterTotals {
    totals: [[u64; COUNTERS_PER_BLOCK]; BLOCK_TYPES],
}

impl Default for CounterTotals {
    fn default() -> Self {
        Self {
            totals: [[0; COUNTERS_PER_BLOCK]; BLOCK_TYPES],
        }
    }
}

impl CounterTotals {
    /// Add one dump, summing every instance of a block type
    ///
    /// Blocks beyond the end of `dump` are treated as absent.
    pub fn accumulate(&mut self, layout: &DumpLayout, dump: &[u32]) {
        for (block_type, totals) in self.totals.iter_mut().enumerate() {
            for instance in layout.instances(block_type as u32) {
                let start = instance * COUNTERS_PER_BLOCK;
                let Some(values) = dump.get(start..start + COUNTERS_PER_BLOCK) else {
                    continue;
                };
                for (total, &value) in totals.iter_mut().zip(values) {
                    *total = total.wrapping_add(u64::from(value));
                }
            }
        }
    }

    /// Current total of `slot`, zero for slots outside the block layout
    pub fn get(&self, slot: CounterSlot) -> u64 {
        self.totals
            .get(slot.group_id as usize)
            .and_then(|block| block.get(slot.selector as usize))
            .copied()
            .unwrap_or(0)
    }
}

/// Reference-counted enable bits per block type
#[derive(Debug, Default)]
struct EnableMasks {
    active: HashSet<CounterSlot>,
    refs: [[u32; ENABLE_BITS]; BLOCK_TYPES],
}

impl EnableMasks {
    /// Record `slot` as active; returns whether any block mask changed
    fn insert(&mut self, slot: CounterSlot) -> bool {
        if !self.active.insert(slot) {
            return false;
        }
        let refs = &mut self.refs[slot.group_id as usize][(slot.selector / COUNTERS_PER_ENABLE_BIT) as usize];
        *refs += 1;
        *refs == 1
    }

    /// Record `slot` as inactive; returns whether any block mask changed
    fn remove(&mut self, slot: CounterSlot) -> bool {
        if !self.active.remove(&slot) {
            return false;
        }
        let refs = &mut self.refs[slot.group_id as usize][(slot.selector / COUNTERS_PER_ENABLE_BIT) as usize];
        *refs -= 1;
        *refs == 0
    }

    fn mask(&self, block_type: u32) -> u32 {
        self.refs[block_type as usize]
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .fold(0, |mask, (bit, _)| mask | (1 << bit))
    }

    fn setup(&self) -> KbaseHwcntReaderSetup {
        KbaseHwcntReaderSetup {
            buffer_count: READER_BUFFER_COUNT,
            fe_bm: self.mask(block::JOB_MANAGER),
            shader_bm: self.mask(block::SHADER_CORE),
            tiler_bm: self.mask(block::TILER),
            mmu_l2_bm: self.mask(block::MEMORY),
        }
    }

    fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

/// A hardware counter reader and its mapped dump ring
#[derive(Debug)]
struct HwcntReader {
    fd: RawFd,
    map: *mut libc::c_void,
    map_len: usize,
    buffer_size: usize,
}

// SAFETY: the mapping is private to this reader and only touched through `&mut`.
unsafe impl Send for HwcntReader {}

impl HwcntReader {
    fn setup(device_fd: RawFd, setup: &mut KbaseHwcntReaderSetup) -> HpcResult<Self> {
        // SAFETY: plain-data argument matching the driver layout.
        let fd = unsafe { ioctl_with(device_fd, KBASE_IOCTL_HWCNT_READER_SETUP, "KBASE_HWCNT_READER_SETUP", setup)? };

        let mut buffer_size = 0u32;
        // SAFETY: the driver writes a single u32.
        if let Err(err) = unsafe {
            ioctl_with(fd, KBASE_HWCNT_READER_GET_BUFFER_SIZE, "KBASE_HWCNT_READER_GET_BUFFER_SIZE", &mut buffer_size)
        } {
            let _ = close_fd(fd);
            return Err(err);
        }

        let buffer_size = buffer_size as usize;
        let map_len = buffer_size * setup.buffer_count as usize;
        let map = unsafe { libc::mmap(ptr::null_mut(), map_len, libc::PROT_READ, libc::MAP_PRIVATE, fd, 0) };
        if map == libc::MAP_FAILED {
            let err = HpcError::last_ioctl_error("KBASE_HWCNT_READER_MMAP");
            let _ = close_fd(fd);
            return Err(err);
        }

        debug!("hwcnt reader fd {} with {} x {} byte buffers", fd, setup.buffer_count, buffer_size);
        Ok(Self {
            fd,
            map,
            map_len,
            buffer_size,
        })
    }

    /// Trigger a manual dump and fold it into `totals`
    fn dump_into(&mut self, layout: &DumpLayout, totals: &mut CounterTotals) -> HpcResult<()> {
        ioctl_value(self.fd, KBASE_HWCNT_READER_DUMP, "KBASE_HWCNT_READER_DUMP", 0)?;

        let mut pollfd = libc::pollfd {
            fd: self.fd,
            events: libc::POLLIN,
            revents: 0,
        };
        if unsafe { libc::poll(&mut pollfd, 1, -1) } < 0 {
            return Err(HpcError::last_ioctl_error("KBASE_HWCNT_READER_POLL"));
        }

        let mut meta = KbaseHwcntReaderMetadata::default();
        // SAFETY: plain-data argument matching the driver layout.
        unsafe { ioctl_with(self.fd, KBASE_HWCNT_READER_GET_BUFFER, "KBASE_HWCNT_READER_GET_BUFFER", &mut meta)? };

        let offset = meta.buffer_idx as usize * self.buffer_size;
        if offset + self.buffer_size <= self.map_len {
            // SAFETY: the range lies inside the mapping and the driver will not
            // reuse this buffer until it is put back below.
            let dump = unsafe {
                std::slice::from_raw_parts(
                    (self.map as *const u8).add(offset) as *const u32,
                    self.buffer_size / std::mem::size_of::<u32>(),
                )
            };
            totals.accumulate(layout, dump);
            trace!("hwcnt dump {} at {}", meta.buffer_idx, meta.timestamp);
        } else {
            warn!("hwcnt buffer index {} outside the mapped ring", meta.buffer_idx);
        }

        // SAFETY: returns the metadata received above.
        unsafe { ioctl_with(self.fd, KBASE_HWCNT_READER_PUT_BUFFER, "KBASE_HWCNT_READER_PUT_BUFFER", &mut meta)? };
        Ok(())
    }
}

impl Drop for HwcntReader {
    fn drop(&mut self) {
        unsafe {
            libc::munmap(self.map, self.map_len);
            libc::close(self.fd);
        }
    }
}

/// Open Mali GPU handle speaking the kbase hardware counter interface
#[derive(Debug)]
pub struct MaliDevice {
    fd: RawFd,
    props: GpuProps,
    layout: DumpLayout,
    masks: EnableMasks,
    reader: Option<HwcntReader>,
    reader_stale: bool,
    totals: CounterTotals,
}

impl MaliDevice {
    /// Open a kbase device node such as `/dev/mali0` and read its properties
    pub fn open(path: impl AsRef<Path>) -> HpcResult<Self> {
        let fd = open_node(path.as_ref())?;
        match Self::handshake(fd) {
            Ok(props) => Ok(Self {
                fd,
                props,
                layout: DumpLayout::from_props(&props),
                masks: EnableMasks::default(),
                reader: None,
                reader_stale: false,
                totals: CounterTotals::default(),
            }),
            Err(err) => {
                let _ = close_fd(fd);
                Err(err)
            }
        }
    }

    fn handshake(fd: RawFd) -> HpcResult<GpuProps> {
        let mut version = KbaseVersionCheck::default();
        // SAFETY: plain-data arguments matching the driver layout.
        unsafe {
            ioctl_with(fd, KBASE_IOCTL_VERSION_CHECK, "KBASE_VERSION_CHECK", &mut version)?;
            ioctl_with(fd, KBASE_IOCTL_SET_FLAGS, "KBASE_SET_FLAGS", &mut KbaseSetFlags::default())?;
        }
        debug!("kbase driver version {}.{}", version.major, version.minor);

        let mut query = KbaseGetGpuProps::default();
        // SAFETY: a null buffer asks the driver for the required size.
        let size = unsafe { ioctl_with(fd, KBASE_IOCTL_GET_GPUPROPS, "KBASE_GET_GPUPROPS", &mut query)? };

        let mut buffer = vec![0u8; size as usize];
        let mut query = KbaseGetGpuProps {
            buffer: buffer.as_mut_ptr() as u64,
            size: buffer.len() as u32,
            flags: 0,
        };
        // SAFETY: `buffer` outlives the call and has the advertised size.
        let written = unsafe { ioctl_with(fd, KBASE_IOCTL_GET_GPUPROPS, "KBASE_GET_GPUPROPS", &mut query)? };
        buffer.truncate(written as usize);

        let props = parse_gpu_props(&buffer)?;
        debug!(
            "mali product {:#06x}, {} L2 slices, shader mask {:#x}",
            props.product_id, props.l2_slices, props.shader_present
        );
        Ok(props)
    }

    /// Properties read from the driver at open
    pub fn props(&self) -> &GpuProps {
        &self.props
    }

    fn refresh_reader(&mut self) -> HpcResult<()> {
        if let Some(mut reader) = self.reader.take() {
            // Keep what the old configuration counted.
            reader.dump_into(&self.layout, &mut self.totals)?;
        }
        self.reader_stale = false;
        if self.masks.is_empty() {
            return Ok(());
        }
        let mut setup = self.masks.setup();
        self.reader = Some(HwcntReader::setup(self.fd, &mut setup)?);
        Ok(())
    }
}

impl CounterDevice for MaliDevice {
    fn hardware_id(&self) -> HpcResult<u32> {
        Ok(self.props.product_id)
    }

    fn activate(&mut self, slot: CounterSlot) -> HpcResult<()> {
        check_slot(slot)?;
        if self.masks.insert(slot) {
            self.reader_stale = true;
        }
        Ok(())
    }

    fn deactivate(&mut self, slot: CounterSlot) -> HpcResult<()> {
        check_slot(slot)?;
        if self.masks.remove(slot) {
            self.reader_stale = true;
        }
        Ok(())
    }

    fn read(&mut self, slots: &[CounterSlot], values: &mut [u64]) -> HpcResult<()> {
        if slots.len() != values.len() {
            return Err(HpcError::BufferTooSmall {
                needed: slots.len(),
                actual: values.len(),
            });
        }

        if self.reader_stale {
            self.refresh_reader()?;
        }
        if let Some(reader) = self.reader.as_mut() {
            reader.dump_into(&self.layout, &mut self.totals)?;
        }

        for (value, &slot) in values.iter_mut().zip(slots) {
            *value = self.totals.get(slot);
        }
        Ok(())
    }

    fn close(mut self) -> HpcResult<()> {
        self.reader = None;
        let fd = std::mem::replace(&mut self.fd, -1);
        close_fd(fd)
    }
}

impl Drop for MaliDevice {
    fn drop(&mut self) {
        self.reader = None;
        if self.fd >= 0 {
            unsafe { libc::close(self.fd) };
        }
    }
}

fn check_slot(slot: CounterSlot) -> HpcResult<()> {
    if slot.group_id as usize >= BLOCK_TYPES || slot.selector as usize >= COUNTERS_PER_BLOCK {
        return Err(HpcError::InvalidParameter(format!("no Mali counter block slot {slot}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn prop(id: u32, size_code: u32, value: &[u8]) -> Vec<u8> {
        let mut bytes = ((id << 2) | size_code).to_le_bytes().to_vec();
        bytes.extend_from_slice(value);
        bytes
    }

    #[test]
    fn test_parse_gpu_props() {
        let mut bytes = prop(GPUPROP_PRODUCT_ID, 2, &0x9005u32.to_le_bytes());
        bytes.extend(prop(3, 0, &[7]));
        bytes.extend(prop(GPUPROP_L2_NUM_L2_SLICES, 2, &2u32.to_le_bytes()));
        bytes.extend(prop(9, 1, &0xAAAAu16.to_le_bytes()));
        bytes.extend(prop(GPUPROP_RAW_SHADER_PRESENT, 3, &0b1011u64.to_le_bytes()));

        let props = parse_gpu_props(&bytes).unwrap();
        assert_eq!(
            props,
            GpuProps {
                product_id: 0x9005,
                l2_slices: 2,
                shader_present: 0b1011,
            }
        );
    }

    #[test]
    fn test_truncated_props_are_rejected() {
        let bytes = prop(GPUPROP_PRODUCT_ID, 3, &[1, 2, 3]);
        assert!(matches!(parse_gpu_props(&bytes), Err(HpcError::InvalidParameter(_))));
    }

    #[test]
    fn test_dump_layout_positions() {
        let layout = DumpLayout::from_props(&GpuProps {
            product_id: 0x6000,
            l2_slices: 2,
            shader_present: 0b1011,
        });
        assert_eq!(layout.instances(block::JOB_MANAGER), 0..1);
        assert_eq!(layout.instances(block::TILER), 1..2);
        assert_eq!(layout.instances(block::MEMORY), 2..4);
        assert_eq!(layout.instances(block::SHADER_CORE), 4..8);
    }

    #[test]
    fn test_totals_sum_instances_across_dumps() {
        let layout = DumpLayout {
            l2_slices: 2,
            shader_cores: 1,
        };
        let mut dump = vec![0u32; 5 * COUNTERS_PER_BLOCK];
        dump[COUNTERS_PER_BLOCK + 4] = 3; // tiler index 4
        dump[2 * COUNTERS_PER_BLOCK + 30] = 10; // L2 slice 0 index 30
        dump[3 * COUNTERS_PER_BLOCK + 30] = 5; // L2 slice 1 index 30

        let mut totals = CounterTotals::default();
        totals.accumulate(&layout, &dump);
        totals.accumulate(&layout, &dump);

        assert_eq!(totals.get(CounterSlot::new(block::TILER, 4)), 6);
        assert_eq!(totals.get(CounterSlot::new(block::MEMORY, 30)), 30);
        assert_eq!(totals.get(CounterSlot::new(block::SHADER_CORE, 30)), 0);
        assert_eq!(totals.get(CounterSlot::new(9, 0)), 0);
    }

    #[test]
    fn test_short_dump_skips_missing_blocks() {
        let layout = DumpLayout {
            l2_slices: 1,
            shader_cores: 4,
        };
        let dump = vec![1u32; 3 * COUNTERS_PER_BLOCK];
        let mut totals = CounterTotals::default();
        totals.accumulate(&layout, &dump);
        assert_eq!(totals.get(CounterSlot::new(block::MEMORY, 0)), 1);
        assert_eq!(totals.get(CounterSlot::new(block::SHADER_CORE, 0)), 0);
    }

    #[test]
    fn test_enable_masks_are_reference_counted() {
        let mut masks = EnableMasks::default();
        assert!(masks.insert(CounterSlot::new(block::TILER, 4)));
        assert!(!masks.insert(CounterSlot::new(block::TILER, 6)));
        assert!(!masks.insert(CounterSlot::new(block::TILER, 6)));
        assert!(masks.insert(CounterSlot::new(block::MEMORY, 47)));

        let setup = masks.setup();
        assert_eq!(setup.tiler_bm, 1 << 1);
        assert_eq!(setup.mmu_l2_bm, 1 << 11);
        assert_eq!(setup.fe_bm, 0);

        assert!(!masks.remove(CounterSlot::new(block::TILER, 4)));
        assert!(masks.remove(CounterSlot::new(block::TILER, 6)));
        assert!(!masks.remove(CounterSlot::new(block::TILER, 6)));
        assert_eq!(masks.setup().tiler_bm, 0);
    }

    #[test]
    fn test_request_numbers() {
        assert_eq!(KBASE_IOCTL_VERSION_CHECK, 0xC004_8000);
        assert_eq!(KBASE_IOCTL_SET_FLAGS, 0x4004_8001);
        assert_eq!(KBASE_IOCTL_GET_GPUPROPS, 0x4010_8003);
        assert_eq!(KBASE_IOCTL_HWCNT_READER_SETUP, 0x4014_8008);
        assert_eq!(KBASE_HWCNT_READER_DUMP, 0x4004_BE10);
    }

    #[test]
    fn test_slot_bounds() {
        assert!(check_slot(CounterSlot::new(block::MEMORY, 63)).is_ok());
        assert!(check_slot(CounterSlot::new(4, 0)).is_err());
        assert!(check_slot(CounterSlot::new(block::TILER, 64)).is_err());
    }
}
