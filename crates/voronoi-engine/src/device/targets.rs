/// Depth format shared by the depth target and every depth-tested pipeline.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Offscreen attachments drawn into each frame: a depth buffer and, when
/// multisampling, a multisampled color buffer that resolves into the surface.
///
/// Rebuilt whenever the surface size changes.
pub struct FrameTargets {
    sample_count: u32,
    width: u32,
    height: u32,
    depth: wgpu::TextureView,
    msaa_color: Option<wgpu::TextureView>,
}

impl FrameTargets {
    pub fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        sample_count: u32,
        width: u32,
        height: u32,
    ) -> Self {
        let (width, height) = (width.max(1), height.max(1));
        let sample_count = sample_count.max(1);

        let depth = attachment(device, "voronoi depth target", DEPTH_FORMAT, sample_count, width, height);
        let msaa_color = (sample_count > 1).then(|| {
            attachment(device, "voronoi msaa color", color_format, sample_count, width, height)
        });

        Self {
            sample_count,
            width,
            height,
            depth,
            msaa_color,
        }
    }

    #[inline]
    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    #[inline]
    pub fn depth_view(&self) -> &wgpu::TextureView {
        &self.depth
    }

    /// View to render color into, and the resolve target if multisampled.
    pub fn color_views<'a>(
        &'a self,
        surface_view: &'a wgpu::TextureView,
    ) -> (&'a wgpu::TextureView, Option<&'a wgpu::TextureView>) {
        match self.msaa_color.as_ref() {
            Some(msaa) => (msaa, Some(surface_view)),
            None => (surface_view, None),
        }
    }

    /// Rebuilds the attachments when the surface size changed.
    pub fn resize(
        &mut self,
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) {
        if (width.max(1), height.max(1)) != (self.width, self.height) {
            *self = Self::new(device, color_format, self.sample_count, width, height);
        }
    }
}

fn attachment(
    device: &wgpu::Device,
    label: &str,
    format: wgpu::TextureFormat,
    sample_count: u32,
    width: u32,
    height: u32,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

/// Largest power-of-two sample count `<= requested` accepted by `supported`.
///
/// Falls back to 1 (no multisampling), which every format supports.
pub(crate) fn fit_sample_count(requested: u32, supported: impl Fn(u32) -> bool) -> u32 {
    let mut count = match requested {
        0 | 1 => return 1,
        n if n.is_power_of_two() => n,
        n => n.next_power_of_two() / 2,
    };
    while count > 1 && !supported(count) {
        count /= 2;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_supported_request() {
        assert_eq!(fit_sample_count(4, |_| true), 4);
    }

    #[test]
    fn steps_down_to_supported_count() {
        assert_eq!(fit_sample_count(8, |n| n <= 4), 4);
        assert_eq!(fit_sample_count(4, |n| n == 2), 2);
    }

    #[test]
    fn unsupported_multisampling_falls_back_to_one() {
        assert_eq!(fit_sample_count(4, |_| false), 1);
    }

    #[test]
    fn zero_and_odd_requests_are_normalized() {
        assert_eq!(fit_sample_count(0, |_| true), 1);
        assert_eq!(fit_sample_count(6, |_| true), 4);
    }
}
