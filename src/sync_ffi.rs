//! # libfreenect Synchronous FFI Module
//!
//! This module provides [`FreenectDriver`], the real [`Driver`] implementation over the
//! `libfreenect_sync` C wrapper. The wrapper owns a process-wide background acquisition
//! thread which starts on first use and stops on `freenect_sync_stop`, so the driver struct
//! itself is a zero-sized handle onto that shared state.
//!
//! The whole module sits behind the `freenect` cargo feature so the rest of the crate builds
//! and tests on machines without libfreenect installed.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use std::os::raw::{c_int, c_void};
use std::slice;

use crate::driver::{ColorFrame, DepthFormat, DepthFrame, Driver, FRAME_PIXELS, VideoFormat};
use crate::error::{Error, Result};

// -----------------------------------------------------------------------------------------------
// FFI
// -----------------------------------------------------------------------------------------------

#[link(name = "freenect_sync")]
extern "C" {
    fn freenect_sync_get_video(
        video: *mut *mut c_void,
        timestamp: *mut u32,
        index: c_int,
        fmt: c_int,
    ) -> c_int;

    fn freenect_sync_get_depth(
        depth: *mut *mut c_void,
        timestamp: *mut u32,
        index: c_int,
        fmt: c_int,
    ) -> c_int;

    fn freenect_sync_set_tilt_degs(angle: c_int, index: c_int) -> c_int;

    fn freenect_sync_set_led(led: c_int, index: c_int) -> c_int;

    fn freenect_sync_stop();
}

// -----------------------------------------------------------------------------------------------
// DATA STRUCTS
// -----------------------------------------------------------------------------------------------

/// Zero-sized handle onto the process-wide libfreenect synchronous capture state.
///
/// Cloning produces another handle onto the same state, there is exactly one capture
/// subsystem per process.
#[derive(Debug, Clone, Copy, Default)]
pub struct FreenectDriver;

impl FreenectDriver {
    /// Create a handle onto the process-wide driver state.
    pub fn new() -> Self {
        Self
    }
}

// -----------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// -----------------------------------------------------------------------------------------------

impl Driver for FreenectDriver {
    /// Initialise the device with a probe video grab.
    ///
    /// The synchronous wrapper spins up its capture thread on the first grab against an
    /// index, so a successful probe both claims the device and confirms it is answering.
    fn open_device(&self, index: u32, format: VideoFormat) -> Result<()> {
        let mut data: *mut c_void = std::ptr::null_mut();
        let mut timestamp: u32 = 0;

        let ret = unsafe {
            freenect_sync_get_video(&mut data, &mut timestamp, index as c_int, format.code())
        };

        if ret != 0 {
            return Err(Error::DeviceUnavailable { index });
        }

        Ok(())
    }

    fn video_frame(&self, index: u32, format: VideoFormat) -> Result<ColorFrame> {
        let mut data: *mut c_void = std::ptr::null_mut();
        let mut timestamp: u32 = 0;

        let ret = unsafe {
            freenect_sync_get_video(&mut data, &mut timestamp, index as c_int, format.code())
        };

        if ret != 0 || data.is_null() {
            return Err(Error::DeviceNotConnected { index });
        }

        // The wrapper reuses its frame buffer on the next grab, so copy it out now
        let bytes = unsafe { slice::from_raw_parts(data as *const u8, FRAME_PIXELS * 3) };

        Ok(ColorFrame {
            data: bytes.to_vec(),
            timestamp,
        })
    }

    fn depth_frame(&self, index: u32, format: DepthFormat) -> Result<DepthFrame> {
        let mut data: *mut c_void = std::ptr::null_mut();
        let mut timestamp: u32 = 0;

        let ret = unsafe {
            freenect_sync_get_depth(&mut data, &mut timestamp, index as c_int, format.code())
        };

        if ret != 0 || data.is_null() {
            return Err(Error::DeviceNotConnected { index });
        }

        // The wrapper reuses its frame buffer on the next grab, so copy it out now
        let codes = unsafe { slice::from_raw_parts(data as *const u16, FRAME_PIXELS) };

        Ok(DepthFrame {
            data: codes.to_vec(),
            timestamp,
        })
    }

    fn set_tilt_degrees(&self, angle: i32, index: u32) {
        // The underlying call reports failures, but the tilt path has no error surface
        unsafe {
            freenect_sync_set_tilt_degs(angle as c_int, index as c_int);
        }
    }

    fn set_led(&self, code: i32, index: u32) {
        unsafe {
            freenect_sync_set_led(code as c_int, index as c_int);
        }
    }

    fn stop_all(&self) {
        unsafe {
            freenect_sync_stop();
        }
    }
}
