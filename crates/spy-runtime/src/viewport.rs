#![forbid(unsafe_code)]

//! Viewport sampling.

use spy_core::geometry::ViewportRect;

use crate::target::SpyHost;

/// Current viewport from the host's scroll offsets and inner window size.
pub fn sample<H: SpyHost>(host: &H) -> ViewportRect {
    let (left, top) = host.scroll_position();
    ViewportRect::from_scroll(left, top, host.inner_size())
}
