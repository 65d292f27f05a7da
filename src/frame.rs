//! Borrowed planar frame views
//!
//! A [`Frame`] never owns pixel data; it borrows caller buffers for the
//! duration of a single `send` call. The coordinator forwards the plane
//! slices to the encoder (or, for raw channels, straight to the network)
//! and retains nothing afterwards.

use crate::constants::MAX_PLANES;

/// One video frame as up to [`MAX_PLANES`] borrowed planes with strides
///
/// `planes[0] == None` marks an explicit empty frame: a legal placeholder
/// that produces a zero-length payload on the wire without touching the
/// encoder. It keeps channels with different effective frame rates or
/// B-frame depths in lock-step with receivers that expect one message per
/// logical tick. An absent frame (flushing) is expressed at the call site
/// as `None: Option<&Frame>` instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct Frame<'a> {
    /// Plane data, e.g. Y plane and interleaved UV plane for NV12
    pub planes: [Option<&'a [u8]>; MAX_PLANES],
    /// Stride per plane in bytes (row width including padding)
    pub linesize: [usize; MAX_PLANES],
}

impl<'a> Frame<'a> {
    /// An explicit empty frame (placeholder tick)
    pub fn empty() -> Self {
        Self::default()
    }

    /// A single tightly-packed buffer, stride equal to its length
    ///
    /// This is the shape raw auxiliary channels use: the whole buffer is
    /// forwarded as one payload.
    pub fn packed(data: &'a [u8]) -> Self {
        let mut frame = Self::default();
        frame.planes[0] = Some(data);
        frame.linesize[0] = data.len();
        frame
    }

    /// A planar frame from parallel plane/stride slices
    ///
    /// Panics if more than [`MAX_PLANES`] planes are passed.
    pub fn planar(planes: &[&'a [u8]], linesize: &[usize]) -> Self {
        assert!(planes.len() <= MAX_PLANES, "too many planes");
        let mut frame = Self::default();
        for (i, plane) in planes.iter().enumerate() {
            frame.planes[i] = Some(plane);
            frame.linesize[i] = linesize.get(i).copied().unwrap_or(plane.len());
        }
        frame
    }

    /// True for the explicit empty-frame placeholder
    pub fn is_placeholder(&self) -> bool {
        self.planes[0].is_none()
    }

    /// Bytes a raw passthrough channel would forward for this frame
    pub fn raw_payload(&self) -> &'a [u8] {
        match self.planes[0] {
            Some(plane) => &plane[..self.linesize[0].min(plane.len())],
            None => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_frame_is_placeholder() {
        let frame = Frame::empty();
        assert!(frame.is_placeholder());
        assert!(frame.raw_payload().is_empty());
    }

    #[test]
    fn test_packed_frame() {
        let data = [1u8, 2, 3, 4];
        let frame = Frame::packed(&data);
        assert!(!frame.is_placeholder());
        assert_eq!(frame.raw_payload(), &data);
        assert_eq!(frame.linesize[0], 4);
    }

    #[test]
    fn test_planar_frame() {
        let y = vec![0u8; 640 * 360];
        let uv = vec![128u8; 640 * 180];
        let frame = Frame::planar(&[&y, &uv], &[640, 640]);
        assert_eq!(frame.planes[0].unwrap().len(), y.len());
        assert_eq!(frame.linesize[1], 640);
        assert!(frame.planes[2].is_none());
    }

    #[test]
    fn test_raw_payload_respects_linesize() {
        let data = [9u8; 16];
        let mut frame = Frame::packed(&data);
        frame.linesize[0] = 10;
        assert_eq!(frame.raw_payload().len(), 10);
    }
}
