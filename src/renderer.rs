use std::marker::PhantomData;

use wgpu::util::DeviceExt;

/// Corner of the full-screen quad. `uv` runs from (0, 0) top-left to (1, 1).
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

#[rustfmt::skip]
pub const QUAD_VERTICES: &[Vertex] = &[
    Vertex { position: [-1.0, -1.0, 0.0], uv: [0.0, 1.0] },
    Vertex { position: [ 1.0, -1.0, 0.0], uv: [1.0, 1.0] },
    Vertex { position: [ 1.0,  1.0, 0.0], uv: [1.0, 0.0] },
    Vertex { position: [-1.0,  1.0, 0.0], uv: [0.0, 0.0] },
];

pub const QUAD_INDICES: &[u16] = &[0, 1, 2, 2, 3, 0];

pub struct VertexBuffer(wgpu::Buffer);

impl VertexBuffer {
    pub fn init_immediate<'label>(
        device: &wgpu::Device,
        content: &[u8],
        label: Option<&'label str>,
    ) -> Self {
        let init_descriptor = wgpu::util::BufferInitDescriptor {
            label,
            contents: content,
            usage: wgpu::BufferUsages::VERTEX,
        };
        let buffer = device.create_buffer_init(&init_descriptor);
        Self(buffer)
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.0
    }
}

pub struct IndexBuffer {
    buffer: wgpu::Buffer,
    count: u32,
}

impl IndexBuffer {
    pub fn init_immediate_u16<'label>(
        device: &wgpu::Device,
        content: &[u16],
        label: Option<&'label str>,
    ) -> Self {
        let init_descriptor = wgpu::util::BufferInitDescriptor {
            label,
            contents: bytemuck::cast_slice(content),
            usage: wgpu::BufferUsages::INDEX,
        };
        let buffer = device.create_buffer_init(&init_descriptor);
        Self {
            buffer,
            count: content.len() as u32,
        }
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    pub fn format(&self) -> wgpu::IndexFormat {
        wgpu::IndexFormat::Uint16
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}

/// Uniform buffer holding exactly one `T`, rewritten every frame.
pub struct UniformBuffer<T> {
    buffer: wgpu::Buffer,
    _content: PhantomData<T>,
}

impl<T: bytemuck::Pod> UniformBuffer<T> {
    pub fn init_immediate<'label>(
        device: &wgpu::Device,
        content: &T,
        label: Option<&'label str>,
    ) -> Self {
        let init_descriptor = wgpu::util::BufferInitDescriptor {
            label,
            contents: bytemuck::bytes_of(content),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        };
        let buffer = device.create_buffer_init(&init_descriptor);
        Self {
            buffer,
            _content: PhantomData,
        }
    }

    pub fn write(&self, queue: &wgpu::Queue, content: &T) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(content));
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }
}
