//! Qualcomm KGSL transport (`/dev/kgsl-3d*`)

use std::os::unix::io::RawFd;
use std::path::Path;

use log::{debug, trace};

use super::ioctl::{close_fd, ioctl_with, iow, iowr, open_node};
use super::CounterDevice;
use crate::counters::CounterSlot;
use crate::error::{HpcError, HpcResult};

const KGSL_IOC_TYPE: u32 = 0x09;
const KGSL_PROP_DEVICE_INFO: u32 = 0x1;

#[repr(C)]
struct KgslDeviceGetProperty {
    prop_type: libc::c_uint,
    value: *mut libc::c_void,
    sizebytes: libc::size_t,
}

#[repr(C)]
#[derive(Default)]
struct KgslDevInfo {
    device_id: libc::c_uint,
    chip_id: libc::c_uint,
    mmu_enabled: libc::c_uint,
    gmem_gpubaseaddr: libc::c_ulong,
    gpu_id: libc::c_uint,
    gmem_sizebytes: libc::size_t,
}

#[repr(C)]
#[derive(Default)]
struct KgslPerfcounterGet {
    groupid: libc::c_uint,
    countable: libc::c_uint,
    offset: libc::c_uint,
    offset_hi: libc::c_uint,
    pad: libc::c_uint,
}

#[repr(C)]
#[derive(Default)]
struct KgslPerfcounterPut {
    groupid: libc::c_uint,
    countable: libc::c_uint,
    pad: [libc::c_uint; 2],
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
struct KgslPerfcounterReadGroup {
    groupid: libc::c_uint,
    countable: libc::c_uint,
    value: u64,
}

#[repr(C)]
struct KgslPerfcounterRead {
    reads: *mut KgslPerfcounterReadGroup,
    count: libc::c_uint,
    pad: [libc::c_uint; 2],
}

const IOCTL_KGSL_DEVICE_GETPROPERTY: u32 = iowr::<KgslDeviceGetProperty>(KGSL_IOC_TYPE, 0x2);
const IOCTL_KGSL_PERFCOUNTER_GET: u32 = iowr::<KgslPerfcounterGet>(KGSL_IOC_TYPE, 0x38);
const IOCTL_KGSL_PERFCOUNTER_PUT: u32 = iow::<KgslPerfcounterPut>(KGSL_IOC_TYPE, 0x39);
const IOCTL_KGSL_PERFCOUNTER_READ: u32 = iowr::<KgslPerfcounterRead>(KGSL_IOC_TYPE, 0x3B);

/// Open Adreno GPU handle speaking the KGSL perfcounter interface
#[derive(Debug)]
pub struct KgslDevice {
    fd: RawFd,
    reads: Vec<KgslPerfcounterReadGroup>,
}

impl KgslDevice {
    /// Open a KGSL device node such as `/dev/kgsl-3d0`
    pub fn open(path: impl AsRef<Path>) -> HpcResult<Self> {
        let fd = open_node(path.as_ref())?;
        Ok(Self { fd, reads: Vec::new() })
    }

    fn device_info(&self) -> HpcResult<KgslDevInfo> {
        let mut info = KgslDevInfo::default();
        let mut request = KgslDeviceGetProperty {
            prop_type: KGSL_PROP_DEVICE_INFO,
            value: &mut info as *mut KgslDevInfo as *mut libc::c_void,
            sizebytes: std::mem::size_of::<KgslDevInfo>(),
        };
        // SAFETY: `request.value` points at `info`, which outlives the call.
        unsafe {
            ioctl_with(self.fd, IOCTL_KGSL_DEVICE_GETPROPERTY, "KGSL_DEVICE_GETPROPERTY", &mut request)?;
        }
        Ok(info)
    }

    /// Chip id reported alongside the GPU id
    pub fn chip_id(&self) -> HpcResult<u32> {
        Ok(self.device_info()?.chip_id)
    }
}

impl CounterDevice for KgslDevice {
    fn hardware_id(&self) -> HpcResult<u32> {
        let info = self.device_info()?;
        debug!("kgsl gpu_id {} chip_id {:#x}", info.gpu_id, info.chip_id);
        Ok(info.gpu_id)
    }

    fn activate(&mut self, slot: CounterSlot) -> HpcResult<()> {
        let mut get = KgslPerfcounterGet {
            groupid: slot.group_id,
            countable: slot.selector,
            ..Default::default()
        };
        // SAFETY: plain-data argument matching the driver layout.
        unsafe { ioctl_with(self.fd, IOCTL_KGSL_PERFCOUNTER_GET, "KGSL_PERFCOUNTER_GET", &mut get)? };
        trace!("activated {} at offset {:#x}", slot, get.offset);
        Ok(())
    }

    fn deactivate(&mut self, slot: CounterSlot) -> HpcResult<()> {
        let mut put = KgslPerfcounterPut {
            groupid: slot.group_id,
            countable: slot.selector,
            ..Default::default()
        };
        // SAFETY: plain-data argument matching the driver layout.
        unsafe { ioctl_with(self.fd, IOCTL_KGSL_PERFCOUNTER_PUT, "KGSL_PERFCOUNTER_PUT", &mut put)? };
        Ok(())
    }

    fn read(&mut self, slots: &[CounterSlot], values: &mut [u64]) -> HpcResult<()> {
        if slots.len() != values.len() {
            return Err(HpcError::BufferTooSmall {
                needed: slots.len(),
                actual: values.len(),
            });
        }
        if slots.is_empty() {
            return Ok(());
        }

        self.reads.clear();
        self.reads.extend(slots.iter().map(|slot| KgslPerfcounterReadGroup {
            groupid: slot.group_id,
            countable: slot.selector,
            value: 0,
        }));

        let mut request = KgslPerfcounterRead {
            reads: self.reads.as_mut_ptr(),
            count: self.reads.len() as libc::c_uint,
            pad: [0; 2],
        };
        // SAFETY: `reads` stays alive and unaliased for the duration of the call.
        unsafe { ioctl_with(self.fd, IOCTL_KGSL_PERFCOUNTER_READ, "KGSL_PERFCOUNTER_READ", &mut request)? };

        for (value, group) in values.iter_mut().zip(&self.reads) {
            *value = group.value;
        }
        Ok(())
    }

    fn close(mut self) -> HpcResult<()> {
        let fd = std::mem::replace(&mut self.fd, -1);
        close_fd(fd)
    }
}

impl Drop for KgslDevice {
    fn drop(&mut self) {
        if self.fd >= 0 {
            unsafe { libc::close(self.fd) };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_numbers() {
        assert_eq!(IOCTL_KGSL_PERFCOUNTER_PUT & 0xFFFF, 0x0939);
        assert_eq!(IOCTL_KGSL_PERFCOUNTER_GET >> 30, 3);
        assert_eq!((IOCTL_KGSL_PERFCOUNTER_GET >> 16) & 0x3FFF, 20);
        assert_eq!(IOCTL_KGSL_PERFCOUNTER_READ & 0xFF, 0x3B);
    }

    #[test]
    fn test_open_missing_node() {
        assert!(KgslDevice::open("/dev/kgsl-3d99").is_err());
    }
}
