/// Sentinel color drawn by the hit pass, as the shader uniform value.
pub const PICK_COLOR: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

/// The same sentinel as readback bytes.
pub const PICK_COLOR_BYTES: [u8; 4] = [255, 0, 0, 255];

/// Exact RGB comparison against the sentinel; alpha is ignored, the clear
/// color and the pick color are both opaque.
pub fn matches_pick_color(pixel: [u8; 4]) -> bool {
    pixel[0] == PICK_COLOR_BYTES[0]
        && pixel[1] == PICK_COLOR_BYTES[1]
        && pixel[2] == PICK_COLOR_BYTES[2]
}

/// Offscreen render target for the hit pass, sized to the surface so cursor
/// pixels map one-to-one onto pick pixels. Non-srgb format keeps the
/// readback exact.
pub struct PickTarget {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    width: u32,
    height: u32,
}

impl PickTarget {
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Pick Target"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[Self::FORMAT],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            texture,
            view,
            width,
            height,
        }
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    /// Reads back the single pixel at (x, y), top-left origin. Returns
    /// `None` when the coordinates fall outside the target (cursor left the
    /// surface, or a click recorded before a shrink).
    pub fn read_pixel(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        x: u32,
        y: u32,
    ) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let output = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Pick Readback"),
            size: 4,
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Pick Readback Encoder"),
        });
        encoder.copy_texture_to_buffer(
            wgpu::ImageCopyTexture {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d { x, y, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::ImageCopyBuffer {
                buffer: &output,
                layout: wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: None,
                    rows_per_image: None,
                },
            },
            wgpu::Extent3d {
                width: 1,
                height: 1,
                depth_or_array_layers: 1,
            },
        );
        queue.submit(Some(encoder.finish()));

        let slice = output.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            tx.send(result).ok();
        });
        let _ = device.poll(wgpu::Maintain::Wait);
        rx.recv().ok()?.ok()?;

        let pixel = {
            let view = slice.get_mapped_range();
            [view[0], view[1], view[2], view[3]]
        };
        output.unmap();
        Some(pixel)
    }
}
