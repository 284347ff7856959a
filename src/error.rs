//! Error types for the scene editor.

use std::fmt;

/// Result type for editor operations
pub type EditorResult<T> = Result<T, EditorError>;

/// Kind of bounded collection held by a scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    Sphere,
    Plane,
    Light,
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimitiveKind::Sphere => write!(f, "sphere"),
            PrimitiveKind::Plane => write!(f, "plane"),
            PrimitiveKind::Light => write!(f, "light"),
        }
    }
}

/// Scene editor errors
#[derive(Debug, Clone, PartialEq)]
pub enum EditorError {
    /// A scene collection is already at its fixed capacity
    CapacityExceeded { kind: PrimitiveKind, capacity: usize },

    /// Window, surface, adapter or device setup failed
    Gpu(String),
}

impl fmt::Display for EditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorError::CapacityExceeded { kind, capacity } => {
                write!(f, "cannot add {kind}: scene already holds {capacity}")
            }
            EditorError::Gpu(msg) => write!(f, "GPU error: {msg}"),
        }
    }
}

impl std::error::Error for EditorError {}

impl From<wgpu::SurfaceError> for EditorError {
    fn from(e: wgpu::SurfaceError) -> Self {
        EditorError::Gpu(e.to_string())
    }
}

impl From<wgpu::CreateSurfaceError> for EditorError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        EditorError::Gpu(e.to_string())
    }
}

impl From<wgpu::RequestDeviceError> for EditorError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        EditorError::Gpu(e.to_string())
    }
}

impl From<winit::error::OsError> for EditorError {
    fn from(e: winit::error::OsError) -> Self {
        EditorError::Gpu(e.to_string())
    }
}
