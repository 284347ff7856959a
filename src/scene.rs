use glam::Vec3;

use crate::{
    camera::Camera,
    error::{EditorError, EditorResult, PrimitiveKind},
    geometry::{HitRecord, PrimitiveType, Ray},
};

pub const MAX_SPHERES: usize = 64;
pub const MAX_PLANES: usize = 64;
pub const MAX_LIGHTS: usize = 64;

/// Sphere hits are rejected only when they lie clearly behind the ray origin.
const SPHERE_MIN_T: f32 = -0.001;
/// Plane hits closer than this are rejected.
const PLANE_MIN_T: f32 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Vec3,
    pub roughness: f32,
    pub transmission: f32,
    pub emission: f32,
}

impl Material {
    pub fn new(color: Vec3, roughness: f32, transmission: f32, emission: f32) -> Self {
        Self {
            color,
            roughness,
            transmission,
            emission,
        }
    }

    /// Material carried by a miss.
    pub fn null() -> Self {
        Self::new(Vec3::ZERO, 0.5, 0.0, 0.0)
    }

    /// White, fully rough, opaque and not emissive.
    pub fn default_matte() -> Self {
        Self::new(Vec3::ONE, 1.0, 0.0, 0.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    pub origin: Vec3,
    pub radius: f32,
    pub material: Material,
    pub is_visible: bool,
    /// Assigned by [`Scene::add_sphere`].
    pub index: usize,
}

impl Sphere {
    pub fn new(origin: Vec3, radius: f32, material: Material) -> Self {
        Self {
            origin,
            radius,
            material,
            is_visible: true,
            index: 0,
        }
    }

    /// What the editor inserts for "add new sphere".
    pub fn default_editable() -> Self {
        Self::new(Vec3::ZERO, 2.0, Material::default_matte())
    }

    fn hit(&self, ray: &Ray) -> Option<HitRecord> {
        if !self.is_visible {
            return None;
        }

        // Solve |o + t*d|^2 = r^2 in the sphere's local frame
        let origin = ray.origin - self.origin;
        let a = ray.direction.length_squared();
        let b = 2.0 * ray.direction.dot(origin);
        let c = origin.length_squared() - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let root = discriminant.sqrt();
        let t1 = (-b + root) / (2.0 * a);
        let t2 = (-b - root) / (2.0 * a);
        let t = t1.min(t2);

        if t <= SPHERE_MIN_T {
            return None;
        }

        Some(HitRecord {
            has_hit: true,
            t,
            material: self.material,
            surface_normal: ray.at(t) - self.origin,
            primitive_index: self.index,
            primitive_type: PrimitiveType::Sphere,
        })
    }
}

/// Infinite plane through `origin`.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    pub origin: Vec3,
    pub normal: Vec3,
    pub material: Material,
    pub is_visible: bool,
    /// Assigned by [`Scene::add_plane`].
    pub index: usize,
}

impl Plane {
    pub fn new(origin: Vec3, normal: Vec3, material: Material) -> Self {
        Self {
            origin,
            normal,
            material,
            is_visible: true,
            index: 0,
        }
    }

    /// What the editor inserts for "add new plane".
    pub fn default_editable() -> Self {
        Self::new(Vec3::ZERO, Vec3::Y, Material::default_matte())
    }

    fn hit(&self, ray: &Ray) -> Option<HitRecord> {
        if !self.is_visible {
            return None;
        }

        let denom = ray.direction.dot(self.normal);
        if denom == 0.0 {
            return None;
        }

        let t = (self.origin - ray.origin).dot(self.normal) / denom;
        if t < PLANE_MIN_T {
            return None;
        }

        Some(HitRecord {
            has_hit: true,
            t,
            material: self.material,
            surface_normal: self.normal,
            primitive_index: self.index,
            primitive_type: PrimitiveType::Plane,
        })
    }
}

/// Spherical area light. Only the shader looks at these.
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub origin: Vec3,
    pub radius: f32,
    pub color: Vec3,
    pub strength: f32,
    pub is_visible: bool,
}

impl Light {
    pub fn new(origin: Vec3, radius: f32, color: Vec3, strength: f32) -> Self {
        Self {
            origin,
            radius,
            color,
            strength,
            is_visible: true,
        }
    }

    pub fn default_editable() -> Self {
        Self::new(Vec3::new(0.0, 4.0, 0.0), 1.0, Vec3::ONE, 2.0)
    }
}

/// Mutable view of the primitive under the selection cursor.
#[derive(Debug)]
pub enum SelectedMut<'a> {
    Sphere(&'a mut Sphere),
    Plane(&'a mut Plane),
}

#[derive(Debug, Clone)]
pub struct Scene {
    pub camera: Camera,
    spheres: Vec<Sphere>,
    planes: Vec<Plane>,
    lights: Vec<Light>,
    selected_type: PrimitiveType,
    selected_index: usize,
    /// Cleared when a pick misses; the cursor then holds the sentinel pair.
    has_selection: bool,
}

impl Scene {
    /// Empty scene. The cursor starts on the first plane slot.
    pub fn new(camera_fov: f32, camera_aspect_ratio: f32) -> Self {
        Self {
            camera: Camera::new(camera_fov, camera_aspect_ratio),
            spheres: Vec::with_capacity(MAX_SPHERES),
            planes: Vec::with_capacity(MAX_PLANES),
            lights: Vec::with_capacity(MAX_LIGHTS),
            selected_type: PrimitiveType::Plane,
            selected_index: 0,
            has_selection: true,
        }
    }

    /// Three spheres inside a walled room lit from the ceiling.
    pub fn with_default_contents(
        camera_fov: f32,
        camera_aspect_ratio: f32,
    ) -> EditorResult<Self> {
        let mut scene = Self::new(camera_fov, camera_aspect_ratio);

        let spheres = [
            (Vec3::ZERO, Vec3::new(1.0, 0.3, 0.3), 1.0),
            (Vec3::new(-4.0, 0.0, 0.0), Vec3::new(0.3, 1.0, 0.3), 0.0),
            (Vec3::new(4.0, 0.0, 0.0), Vec3::new(0.3, 0.3, 1.0), 0.0),
        ];
        let planes = [
            (Vec3::new(0.0, -1.5, 0.0), Vec3::Y, Vec3::ONE),
            (Vec3::new(0.0, -1.5, 5.0), Vec3::NEG_Z, Vec3::ONE),
            (Vec3::new(-6.0, -1.5, 0.0), Vec3::X, Vec3::new(1.0, 0.0, 0.0)),
            (Vec3::new(6.0, -1.5, 0.0), Vec3::NEG_X, Vec3::new(0.0, 1.0, 0.0)),
            (Vec3::new(0.0, 10.0, 0.0), Vec3::NEG_Y, Vec3::ONE),
        ];

        for (origin, color, transmission) in spheres {
            let material = Material::new(color, 1.0, transmission, 0.0);
            scene.add_sphere(Sphere::new(origin, 1.5, material))?;
        }
        for (origin, normal, color) in planes {
            let material = Material::new(color, 1.0, 0.0, 0.0);
            scene.add_plane(Plane::new(origin, normal, material))?;
        }
        scene.add_light(Light::new(Vec3::new(0.0, 7.0, 0.0), 3.0, Vec3::ONE, 500.0))?;

        Ok(scene)
    }

    /// Appends `sphere` and returns the index it was given.
    pub fn add_sphere(&mut self, mut sphere: Sphere) -> EditorResult<usize> {
        check_capacity(PrimitiveKind::Sphere, self.spheres.len(), MAX_SPHERES)?;
        sphere.index = self.spheres.len();
        self.spheres.push(sphere);
        Ok(self.spheres.len() - 1)
    }

    /// Appends `plane` and returns the index it was given.
    pub fn add_plane(&mut self, mut plane: Plane) -> EditorResult<usize> {
        check_capacity(PrimitiveKind::Plane, self.planes.len(), MAX_PLANES)?;
        plane.index = self.planes.len();
        self.planes.push(plane);
        Ok(self.planes.len() - 1)
    }

    pub fn add_light(&mut self, light: Light) -> EditorResult<usize> {
        check_capacity(PrimitiveKind::Light, self.lights.len(), MAX_LIGHTS)?;
        self.lights.push(light);
        Ok(self.lights.len() - 1)
    }

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn sphere_mut(&mut self, index: usize) -> Option<&mut Sphere> {
        self.spheres.get_mut(index)
    }

    pub fn plane_mut(&mut self, index: usize) -> Option<&mut Plane> {
        self.planes.get_mut(index)
    }

    pub fn light_mut(&mut self, index: usize) -> Option<&mut Light> {
        self.lights.get_mut(index)
    }

    /// Nearest visible hit along `ray`, spheres first then planes.
    ///
    /// A candidate replaces the current best only when strictly closer, so
    /// equal distances resolve to whichever primitive was tested first.
    pub fn cast_ray(&self, ray: &Ray) -> HitRecord {
        let sphere_hits = self.spheres.iter().filter_map(|sphere| sphere.hit(ray));
        let plane_hits = self.planes.iter().filter_map(|plane| plane.hit(ray));

        sphere_hits
            .chain(plane_hits)
            .fold(HitRecord::miss(), |closest, hit| {
                if hit.t < closest.t {
                    hit
                } else {
                    closest
                }
            })
    }

    /// Ray from the camera through pixel `(pixel_x, pixel_y)` of a
    /// `viewport_width` x `viewport_height` viewport. Screen Y grows downwards.
    pub fn pick_ray(
        &self,
        viewport_width: u32,
        viewport_height: u32,
        pixel_x: f64,
        pixel_y: f64,
    ) -> Ray {
        let width = viewport_width as f64;
        let height = viewport_height as f64;
        let x = ((pixel_x - width / 2.0) / width) as f32;
        let y = (-(pixel_y - height / 2.0) / height) as f32;

        let direction =
            (self.camera.forward() + x * self.camera.right() + y * self.camera.up()).normalize();
        Ray::new(self.camera.origin(), direction)
    }

    /// Casts a pick ray and moves the selection cursor to whatever it hits.
    ///
    /// On a miss the cursor takes the sentinel's `(Sphere, 0)` and
    /// [`Scene::has_selection`] turns false until something is picked again.
    pub fn select(
        &mut self,
        viewport_width: u32,
        viewport_height: u32,
        pixel_x: f64,
        pixel_y: f64,
    ) -> HitRecord {
        let ray = self.pick_ray(viewport_width, viewport_height, pixel_x, pixel_y);
        let hit = self.cast_ray(&ray);

        if hit.has_hit {
            tracing::debug!(
                "picked {:?} {} at t = {}",
                hit.primitive_type,
                hit.primitive_index,
                hit.t
            );
        } else {
            tracing::debug!("pick at ({pixel_x}, {pixel_y}) hit nothing");
        }

        self.selected_type = hit.primitive_type;
        self.selected_index = hit.primitive_index;
        self.has_selection = hit.has_hit;
        hit
    }

    /// False after a pick that hit nothing.
    pub fn has_selection(&self) -> bool {
        self.has_selection
    }

    pub fn selected_type(&self) -> PrimitiveType {
        self.selected_type
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn set_selection(&mut self, primitive_type: PrimitiveType, index: usize) {
        self.selected_type = primitive_type;
        self.selected_index = index;
        self.has_selection = true;
    }

    /// Primitive under the cursor, if something is selected and the cursor
    /// addresses one that exists.
    pub fn selected_mut(&mut self) -> Option<SelectedMut<'_>> {
        if !self.has_selection {
            return None;
        }
        match self.selected_type {
            PrimitiveType::Sphere => self
                .spheres
                .get_mut(self.selected_index)
                .map(SelectedMut::Sphere),
            PrimitiveType::Plane => self
                .planes
                .get_mut(self.selected_index)
                .map(SelectedMut::Plane),
        }
    }

    /// Appends a default primitive of the selected type and selects it.
    ///
    /// Returns `Ok(None)` without touching the scene when nothing is selected.
    pub fn add_default_for_selection(&mut self) -> EditorResult<Option<usize>> {
        if !self.has_selection {
            return Ok(None);
        }
        let index = match self.selected_type {
            PrimitiveType::Sphere => self.add_sphere(Sphere::default_editable()),
            PrimitiveType::Plane => self.add_plane(Plane::default_editable()),
        }?;
        self.selected_index = index;
        Ok(Some(index))
    }
}

fn check_capacity(kind: PrimitiveKind, len: usize, capacity: usize) -> EditorResult<()> {
    if len >= capacity {
        tracing::warn!("rejected {kind}: capacity of {capacity} reached");
        return Err(EditorError::CapacityExceeded { kind, capacity });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::math::degree_to_radian;

    const EPSILON: f32 = 1e-4;

    fn empty_scene() -> Scene {
        Scene::new(degree_to_radian(70.0), 16.0 / 9.0)
    }

    fn red() -> Material {
        Material::new(Vec3::new(1.0, 0.0, 0.0), 0.2, 0.0, 0.0)
    }

    #[test]
    fn sphere_hit_reports_near_root_and_local_point() {
        let mut scene = empty_scene();
        scene
            .add_sphere(Sphere::new(Vec3::ZERO, 1.5, red()))
            .unwrap();

        let hit = scene.cast_ray(&Ray::new(Vec3::new(0.0, 0.0, -10.0), Vec3::Z));

        assert!(hit.has_hit);
        assert!((hit.t - 8.5).abs() < EPSILON);
        assert!(hit
            .surface_normal
            .abs_diff_eq(Vec3::new(0.0, 0.0, -1.5), EPSILON));
        assert_eq!(hit.primitive_type, PrimitiveType::Sphere);
        assert_eq!(hit.primitive_index, 0);
        assert_eq!(hit.material, red());
    }

    #[test]
    fn sphere_hit_compensates_for_direction_length() {
        let mut scene = empty_scene();
        scene
            .add_sphere(Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, red()))
            .unwrap();

        let hit = scene.cast_ray(&Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 2.0)));

        assert!(hit.has_hit);
        assert!((hit.t - 2.0).abs() < EPSILON);
        assert!(hit
            .surface_normal
            .abs_diff_eq(Vec3::new(0.0, 0.0, -1.0), EPSILON));
    }

    #[test]
    fn sphere_behind_origin_is_rejected_but_enclosing_sphere_is_not() {
        let mut scene = empty_scene();
        scene
            .add_sphere(Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, red()))
            .unwrap();
        assert!(!scene.cast_ray(&Ray::new(Vec3::ZERO, Vec3::Z)).has_hit);

        // From inside, min(t1, t2) is the negative root and falls below the threshold.
        let mut inside = empty_scene();
        inside
            .add_sphere(Sphere::new(Vec3::ZERO, 1.0, red()))
            .unwrap();
        assert!(!inside.cast_ray(&Ray::new(Vec3::ZERO, Vec3::Z)).has_hit);
    }

    #[test]
    fn ray_starting_on_sphere_surface_hits_at_zero() {
        let mut scene = empty_scene();
        scene
            .add_sphere(Sphere::new(Vec3::ZERO, 1.0, red()))
            .unwrap();

        // Pointing inward the near root is t = 0, which the threshold keeps.
        let hit = scene.cast_ray(&Ray::new(Vec3::new(0.0, 0.0, -1.0), Vec3::Z));

        assert!(hit.has_hit);
        assert!(hit.t.abs() < EPSILON);
    }

    #[test]
    fn plane_hit_reports_stored_normal() {
        let mut scene = empty_scene();
        let normal = Vec3::new(0.0, 2.0, 0.0);
        scene
            .add_plane(Plane::new(Vec3::new(0.0, -1.5, 0.0), normal, red()))
            .unwrap();

        let hit = scene.cast_ray(&Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y));

        assert!(hit.has_hit);
        assert!((hit.t - 6.5).abs() < EPSILON);
        assert_eq!(hit.surface_normal, normal);
        assert_eq!(hit.primitive_type, PrimitiveType::Plane);
    }

    #[test]
    fn plane_rejects_parallel_and_near_hits() {
        let mut scene = empty_scene();
        scene
            .add_plane(Plane::new(Vec3::ZERO, Vec3::Y, red()))
            .unwrap();

        assert!(!scene.cast_ray(&Ray::new(Vec3::Y, Vec3::X)).has_hit);
        assert!(!scene.cast_ray(&Ray::new(Vec3::ZERO, Vec3::NEG_Y)).has_hit);
        assert!(!scene.cast_ray(&Ray::new(Vec3::Y, Vec3::Y)).has_hit);
    }

    #[test]
    fn invisible_primitives_never_hit() {
        let mut scene = empty_scene();
        scene
            .add_sphere(Sphere::new(Vec3::ZERO, 1.5, red()))
            .unwrap();
        scene
            .add_plane(Plane::new(Vec3::new(0.0, 0.0, 3.0), Vec3::NEG_Z, red()))
            .unwrap();
        scene.sphere_mut(0).unwrap().is_visible = false;

        let ray = Ray::new(Vec3::new(0.0, 0.0, -10.0), Vec3::Z);
        let hit = scene.cast_ray(&ray);
        assert_eq!(hit.primitive_type, PrimitiveType::Plane);
        assert!((hit.t - 13.0).abs() < EPSILON);

        scene.plane_mut(0).unwrap().is_visible = false;
        assert!(!scene.cast_ray(&ray).has_hit);
    }

    #[test]
    fn nearest_hit_wins_across_lists() {
        let mut scene = empty_scene();
        scene
            .add_sphere(Sphere::new(Vec3::new(0.0, 0.0, 10.0), 1.0, red()))
            .unwrap();
        scene
            .add_sphere(Sphere::new(Vec3::new(0.0, 0.0, 4.0), 1.0, red()))
            .unwrap();
        scene
            .add_plane(Plane::new(Vec3::new(0.0, 0.0, 2.0), Vec3::NEG_Z, red()))
            .unwrap();

        let hit = scene.cast_ray(&Ray::new(Vec3::ZERO, Vec3::Z));
        assert_eq!(hit.primitive_type, PrimitiveType::Plane);
        assert!((hit.t - 2.0).abs() < EPSILON);

        scene.plane_mut(0).unwrap().is_visible = false;
        let hit = scene.cast_ray(&Ray::new(Vec3::ZERO, Vec3::Z));
        assert_eq!(hit.primitive_type, PrimitiveType::Sphere);
        assert_eq!(hit.primitive_index, 1);
    }

    #[test]
    fn equal_distance_prefers_sphere() {
        let mut scene = empty_scene();
        scene
            .add_plane(Plane::new(Vec3::new(0.0, 0.0, 4.0), Vec3::NEG_Z, red()))
            .unwrap();
        scene
            .add_sphere(Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, red()))
            .unwrap();

        let hit = scene.cast_ray(&Ray::new(Vec3::ZERO, Vec3::Z));
        assert_eq!(hit.t, 4.0);
        assert_eq!(hit.primitive_type, PrimitiveType::Sphere);
    }

    #[test]
    fn equal_distance_prefers_lower_index() {
        let mut scene = empty_scene();
        let first = scene
            .add_plane(Plane::new(Vec3::new(0.0, 0.0, 3.0), Vec3::NEG_Z, red()))
            .unwrap();
        scene
            .add_plane(Plane::new(Vec3::new(0.0, 0.0, 3.0), Vec3::Z, red()))
            .unwrap();

        let hit = scene.cast_ray(&Ray::new(Vec3::ZERO, Vec3::Z));
        assert_eq!(hit.primitive_index, first);
    }

    #[test]
    fn ray_pointing_away_misses() {
        let scene = Scene::with_default_contents(degree_to_radian(70.0), 1.0).unwrap();
        // Outside the room, looking away from it.
        let hit = scene.cast_ray(&Ray::new(Vec3::new(0.0, 0.0, -20.0), Vec3::NEG_Z));
        assert!(!hit.has_hit);
        assert_eq!(hit, HitRecord::miss());
    }

    #[test]
    fn indices_follow_insertion_order() {
        let mut scene = empty_scene();
        for expected in 0..5 {
            let mut sphere = Sphere::default_editable();
            sphere.index = 99;
            assert_eq!(scene.add_sphere(sphere).unwrap(), expected);
        }
        for (position, sphere) in scene.spheres().iter().enumerate() {
            assert_eq!(sphere.index, position);
        }
        assert_eq!(scene.add_plane(Plane::default_editable()).unwrap(), 0);
        assert_eq!(scene.add_light(Light::default_editable()).unwrap(), 0);
    }

    #[test]
    fn capacity_is_enforced_per_collection() {
        let mut scene = empty_scene();
        for _ in 0..MAX_SPHERES {
            scene.add_sphere(Sphere::default_editable()).unwrap();
        }

        let err = scene.add_sphere(Sphere::default_editable()).unwrap_err();
        assert_eq!(
            err,
            EditorError::CapacityExceeded {
                kind: PrimitiveKind::Sphere,
                capacity: MAX_SPHERES
            }
        );
        assert_eq!(scene.spheres().len(), MAX_SPHERES);

        // other collections are unaffected
        assert!(scene.add_plane(Plane::default_editable()).is_ok());

        for _ in 0..MAX_LIGHTS {
            scene.add_light(Light::default_editable()).unwrap();
        }
        assert!(matches!(
            scene.add_light(Light::default_editable()),
            Err(EditorError::CapacityExceeded {
                kind: PrimitiveKind::Light,
                ..
            })
        ));
    }

    #[test]
    fn center_pick_ray_is_normalized_forward() {
        let mut scene = empty_scene();
        scene.camera.rotate_y(0.3);
        scene.camera.rotate_x(-0.2);

        let ray = scene.pick_ray(800, 600, 400.0, 300.0);

        assert_eq!(ray.origin, scene.camera.origin());
        assert!(ray
            .direction
            .abs_diff_eq(scene.camera.forward().normalize(), 1e-6));
    }

    #[test]
    fn pick_ray_flips_screen_y() {
        let scene = empty_scene();
        let ray = scene.pick_ray(100, 100, 50.0, 0.0);
        assert!(ray.direction.y > 0.0);

        let ray = scene.pick_ray(100, 100, 100.0, 50.0);
        assert!(ray.direction.x > 0.0);
    }

    #[test]
    fn select_moves_cursor_to_hit() {
        let mut scene = Scene::with_default_contents(degree_to_radian(70.0), 16.0 / 9.0).unwrap();
        assert_eq!(scene.selected_type(), PrimitiveType::Plane);
        assert_eq!(scene.selected_index(), 0);

        let hit = scene.select(1920, 1080, 960.0, 540.0);

        assert!(hit.has_hit);
        assert!(scene.has_selection());
        assert_eq!(scene.selected_type(), PrimitiveType::Sphere);
        assert_eq!(scene.selected_index(), 0);
        assert!((hit.t - 8.5).abs() < EPSILON);
    }

    #[test]
    fn select_on_miss_takes_sentinel_cursor() {
        let mut scene = empty_scene();
        scene
            .add_plane(Plane::new(Vec3::new(0.0, 0.0, 3.0), Vec3::NEG_Z, red()))
            .unwrap();
        scene.camera.rotate_y(std::f32::consts::PI);

        let hit = scene.select(640, 480, 320.0, 240.0);

        assert!(!hit.has_hit);
        assert!(!scene.has_selection());
        assert_eq!(scene.selected_type(), PrimitiveType::Sphere);
        assert_eq!(scene.selected_index(), 0);
        assert!(scene.selected_mut().is_none());
    }

    #[test]
    fn miss_does_not_expose_sphere_zero_for_editing() {
        let mut scene = empty_scene();
        scene.add_sphere(Sphere::default_editable()).unwrap();
        scene.camera.rotate_y(std::f32::consts::PI);

        assert!(!scene.select(640, 480, 320.0, 240.0).has_hit);

        // the sentinel cursor addresses an existing sphere, but it was not picked
        assert!(scene.selected_mut().is_none());
        assert_eq!(scene.add_default_for_selection().unwrap(), None);
        assert_eq!(scene.spheres().len(), 1);

        scene.camera.rotate_y(std::f32::consts::PI);
        assert!(scene.select(640, 480, 320.0, 240.0).has_hit);
        assert!(matches!(scene.selected_mut(), Some(SelectedMut::Sphere(_))));
    }

    #[test]
    fn selected_mut_edits_in_place() {
        let mut scene = Scene::with_default_contents(degree_to_radian(70.0), 1.0).unwrap();
        scene.set_selection(PrimitiveType::Sphere, 2);

        match scene.selected_mut() {
            Some(SelectedMut::Sphere(sphere)) => sphere.radius = 0.25,
            other => panic!("unexpected selection {other:?}"),
        }
        assert_eq!(scene.spheres()[2].radius, 0.25);

        scene.set_selection(PrimitiveType::Plane, 17);
        assert!(scene.selected_mut().is_none());
    }

    #[test]
    fn add_default_follows_selected_type() {
        let mut scene = Scene::with_default_contents(degree_to_radian(70.0), 1.0).unwrap();
        scene.set_selection(PrimitiveType::Plane, 1);

        let index = scene.add_default_for_selection().unwrap();

        assert_eq!(index, Some(5));
        assert_eq!(scene.selected_index(), 5);
        assert_eq!(scene.planes()[5], {
            let mut plane = Plane::default_editable();
            plane.index = 5;
            plane
        });

        scene.set_selection(PrimitiveType::Sphere, 0);
        assert_eq!(scene.add_default_for_selection().unwrap(), Some(3));
        assert_eq!(scene.spheres()[3].radius, 2.0);
    }

    #[test]
    fn factories_return_documented_values() {
        assert_eq!(Material::null(), Material::new(Vec3::ZERO, 0.5, 0.0, 0.0));
        assert_eq!(Material::default_matte(), Material::new(Vec3::ONE, 1.0, 0.0, 0.0));

        let sphere = Sphere::default_editable();
        assert_eq!((sphere.origin, sphere.radius), (Vec3::ZERO, 2.0));
        assert_eq!(sphere.material, Material::default_matte());
        assert!(sphere.is_visible);

        assert_eq!(Plane::default_editable().normal, Vec3::Y);
        assert_eq!(Light::default_editable().origin, Vec3::new(0.0, 4.0, 0.0));
    }

    #[test]
    fn default_contents_match_room_layout() {
        let scene = Scene::with_default_contents(degree_to_radian(70.0), 1.0).unwrap();
        assert_eq!(scene.spheres().len(), 3);
        assert_eq!(scene.planes().len(), 5);
        assert_eq!(scene.lights().len(), 1);
        assert_eq!(scene.lights()[0].strength, 500.0);
        assert_eq!(scene.planes()[4].normal, Vec3::NEG_Y);
    }
}
