//! Plain-old-data mirrors of the scene as laid out in `scene.wgsl`.
//!
//! Every struct follows WGSL uniform layout rules: `vec3<f32>` members start on
//! 16 byte boundaries and struct sizes round up to 16 bytes, which is why the
//! explicit padding fields exist.

use crate::{
    camera::Camera,
    config::RenderSettings,
    scene::{Light, Material, Plane, Scene, Sphere, MAX_LIGHTS, MAX_PLANES, MAX_SPHERES},
};

#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuMaterial {
    pub color: [f32; 3],
    pub roughness: f32,
    pub transmission: f32,
    pub emission: f32,
    _padding: [f32; 2],
}

impl From<&Material> for GpuMaterial {
    fn from(material: &Material) -> Self {
        Self {
            color: material.color.to_array(),
            roughness: material.roughness,
            transmission: material.transmission,
            emission: material.emission,
            _padding: [0.0; 2],
        }
    }
}

#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuSphere {
    pub origin: [f32; 3],
    pub radius: f32,
    pub material: GpuMaterial,
    pub is_visible: u32,
    _padding: [u32; 3],
}

impl From<&Sphere> for GpuSphere {
    fn from(sphere: &Sphere) -> Self {
        Self {
            origin: sphere.origin.to_array(),
            radius: sphere.radius,
            material: (&sphere.material).into(),
            is_visible: sphere.is_visible as u32,
            _padding: [0; 3],
        }
    }
}

#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuPlane {
    pub origin: [f32; 3],
    _padding0: f32,
    pub normal: [f32; 3],
    _padding1: f32,
    pub material: GpuMaterial,
    pub is_visible: u32,
    _padding2: [u32; 3],
}

impl From<&Plane> for GpuPlane {
    fn from(plane: &Plane) -> Self {
        Self {
            origin: plane.origin.to_array(),
            _padding0: 0.0,
            normal: plane.normal.to_array(),
            _padding1: 0.0,
            material: (&plane.material).into(),
            is_visible: plane.is_visible as u32,
            _padding2: [0; 3],
        }
    }
}

#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuLight {
    pub origin: [f32; 3],
    pub radius: f32,
    pub color: [f32; 3],
    pub strength: f32,
    pub is_visible: u32,
    _padding: [u32; 3],
}

impl From<&Light> for GpuLight {
    fn from(light: &Light) -> Self {
        Self {
            origin: light.origin.to_array(),
            radius: light.radius,
            color: light.color.to_array(),
            strength: light.strength,
            is_visible: light.is_visible as u32,
            _padding: [0; 3],
        }
    }
}

#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuCamera {
    pub origin: [f32; 3],
    _padding0: f32,
    pub forward: [f32; 3],
    _padding1: f32,
    pub right: [f32; 3],
    _padding2: f32,
    pub up: [f32; 3],
    _padding3: f32,
}

impl From<&Camera> for GpuCamera {
    fn from(camera: &Camera) -> Self {
        Self {
            origin: camera.origin().to_array(),
            forward: camera.forward().to_array(),
            right: camera.right().to_array(),
            up: camera.up().to_array(),
            ..Default::default()
        }
    }
}

/// `selected_type` value that matches no primitive kind in the shader.
pub const NO_SELECTION: u32 = u32::MAX;

#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniform {
    pub camera: GpuCamera,

    pub num_spheres: u32,
    pub num_planes: u32,
    pub num_lights: u32,
    pub selected_type: u32,

    pub selected_index: u32,
    pub screen_width: u32,
    pub screen_height: u32,
    pub num_samples: u32,

    pub num_bounces: u32,
    pub blur_distance: f32,
    pub blur_strength: f32,
    _padding: u32,

    pub spheres: [GpuSphere; MAX_SPHERES],
    pub planes: [GpuPlane; MAX_PLANES],
    pub lights: [GpuLight; MAX_LIGHTS],
}

impl SceneUniform {
    /// Snapshot of everything the shader reads for one frame.
    pub fn from_scene(scene: &Scene, render: &RenderSettings, screen_size: (u32, u32)) -> Self {
        let mut uniform: Self = bytemuck::Zeroable::zeroed();

        uniform.camera = (&scene.camera).into();
        uniform.num_spheres = scene.spheres().len() as u32;
        uniform.num_planes = scene.planes().len() as u32;
        uniform.num_lights = scene.lights().len() as u32;
        uniform.selected_type = if scene.has_selection() {
            scene.selected_type() as u32
        } else {
            NO_SELECTION
        };
        uniform.selected_index = scene.selected_index() as u32;
        uniform.screen_width = screen_size.0;
        uniform.screen_height = screen_size.1;
        uniform.num_samples = render.num_samples;
        uniform.num_bounces = render.num_bounces;
        uniform.blur_distance = render.blur_distance;
        uniform.blur_strength = render.blur_strength;

        for (slot, sphere) in uniform.spheres.iter_mut().zip(scene.spheres()) {
            *slot = sphere.into();
        }
        for (slot, plane) in uniform.planes.iter_mut().zip(scene.planes()) {
            *slot = plane.into();
        }
        for (slot, light) in uniform.lights.iter_mut().zip(scene.lights()) {
            *slot = light.into();
        }

        uniform
    }
}

#[cfg(test)]
mod tests {
    use std::mem::size_of;

    use super::*;
    use crate::{geometry::PrimitiveType, util::math::degree_to_radian};

    #[test]
    fn layouts_match_shader_strides() {
        assert_eq!(size_of::<GpuMaterial>(), 32);
        assert_eq!(size_of::<GpuSphere>(), 64);
        assert_eq!(size_of::<GpuPlane>(), 80);
        assert_eq!(size_of::<GpuLight>(), 48);
        assert_eq!(size_of::<GpuCamera>(), 64);
        assert_eq!(size_of::<SceneUniform>(), 112 + 64 * 64 + 80 * 64 + 48 * 64);
        assert_eq!(size_of::<SceneUniform>() % 16, 0);
    }

    #[test]
    fn packs_scene_snapshot() {
        let mut scene = Scene::with_default_contents(degree_to_radian(70.0), 1.0).unwrap();
        scene.set_selection(PrimitiveType::Sphere, 2);
        if let Some(sphere) = scene.sphere_mut(1) {
            sphere.is_visible = false;
        }

        let uniform = SceneUniform::from_scene(&scene, &RenderSettings::default(), (800, 600));

        assert_eq!(uniform.camera.origin, [0.0, 0.0, -10.0]);
        assert_eq!(uniform.camera.forward, [0.0, 0.0, 1.0]);
        assert_eq!(uniform.num_spheres, 3);
        assert_eq!(uniform.num_planes, 5);
        assert_eq!(uniform.num_lights, 1);
        assert_eq!(uniform.selected_type, 0);
        assert_eq!(uniform.selected_index, 2);
        assert_eq!(uniform.screen_width, 800);
        assert_eq!(uniform.spheres[0].radius, 1.5);
        assert_eq!(uniform.spheres[1].is_visible, 0);
        assert_eq!(uniform.spheres[2].is_visible, 1);
        assert_eq!(uniform.planes[1].normal, [0.0, 0.0, -1.0]);
        assert_eq!(uniform.lights[0].strength, 500.0);
        // unused slots stay zeroed
        assert_eq!(uniform.spheres[3], GpuSphere::default());

        let bytes: &[u8] = bytemuck::bytes_of(&uniform);
        assert_eq!(bytes.len(), size_of::<SceneUniform>());
    }

    #[test]
    fn missed_pick_packs_no_highlight() {
        let mut scene = Scene::new(degree_to_radian(70.0), 1.0);
        scene.add_sphere(Sphere::default_editable()).unwrap();
        // looking away from the only sphere
        scene.camera.rotate_y(std::f32::consts::PI);

        assert!(!scene.select(800, 600, 400.0, 300.0).has_hit);
        let uniform = SceneUniform::from_scene(&scene, &RenderSettings::default(), (800, 600));
        assert_eq!(uniform.selected_type, NO_SELECTION);
    }
}
