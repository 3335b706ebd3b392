//! Raw ioctl plumbing shared by the kernel transports

use std::ffi::CString;
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::io::RawFd;
use std::path::Path;

use log::debug;

use crate::error::{HpcError, HpcResult};

/// Direction bits of an ioctl request
pub const IOC_NONE: u32 = 0;
/// Userspace writes the argument
pub const IOC_WRITE: u32 = 1;
/// Userspace reads the argument
pub const IOC_READ: u32 = 2;

/// Build a Linux ioctl request number
pub const fn ioc(dir: u32, ty: u32, nr: u32, size: usize) -> u32 {
    (dir << 30) | ((size as u32) << 16) | (ty << 8) | nr
}

/// `_IOW(ty, nr, T)`
pub const fn iow<T>(ty: u32, nr: u32) -> u32 {
    ioc(IOC_WRITE, ty, nr, std::mem::size_of::<T>())
}

/// `_IOR(ty, nr, T)`
pub const fn ior<T>(ty: u32, nr: u32) -> u32 {
    ioc(IOC_READ, ty, nr, std::mem::size_of::<T>())
}

/// `_IOWR(ty, nr, T)`
pub const fn iowr<T>(ty: u32, nr: u32) -> u32 {
    ioc(IOC_READ | IOC_WRITE, ty, nr, std::mem::size_of::<T>())
}

/// Open a device node for read/write, close-on-exec
pub fn open_node(path: &Path) -> HpcResult<RawFd> {
    let c_path = CString::new(path.as_os_str().as_bytes())
        .map_err(|e| HpcError::InvalidParameter(format!("device path {}: {e}", path.display())))?;

    let fd = unsafe { libc::open(c_path.as_ptr(), libc::O_RDWR | libc::O_CLOEXEC) };
    if fd < 0 {
        let err = io::Error::last_os_error();
        return Err(match err.kind() {
            io::ErrorKind::PermissionDenied => {
                HpcError::PermissionDenied(format!("{}: {err}", path.display()))
            }
            _ => HpcError::DeviceUnavailable(err),
        });
    }

    debug!("opened {} as fd {}", path.display(), fd);
    Ok(fd)
}

/// Close a descriptor obtained from [`open_node`] or a driver ioctl
pub fn close_fd(fd: RawFd) -> HpcResult<()> {
    if unsafe { libc::close(fd) } < 0 {
        return Err(HpcError::DeviceUnavailable(io::Error::last_os_error()));
    }
    Ok(())
}

/// Issue `request` with a pointer to `arg`, returning the driver's return value
///
/// # Safety
///
/// `T` must match the argument layout the driver expects for `request`, and
/// any pointers embedded in `arg` must be valid for the duration of the call.
pub unsafe fn ioctl_with<T>(
    fd: RawFd,
    request: u32,
    name: &'static str,
    arg: &mut T,
) -> HpcResult<libc::c_int> {
    let result = libc::ioctl(fd, request as _, arg as *mut T);
    if result < 0 {
        return Err(HpcError::last_ioctl_error(name));
    }
    Ok(result)
}

/// Issue `request` with an integer (or no) argument
pub fn ioctl_value(fd: RawFd, request: u32, name: &'static str, value: libc::c_ulong) -> HpcResult<libc::c_int> {
    let result = unsafe { libc::ioctl(fd, request as _, value) };
    if result < 0 {
        return Err(HpcError::last_ioctl_error(name));
    }
    Ok(result)
}
