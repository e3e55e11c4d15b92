use glam::Vec3;
use mesh_picking::math::AABB;
use mesh_picking::{
    Camera, ClickTrackableMesh, PickInfo, PointerEventType, PointerInfo, Scene, Viewport,
};

fn pointer(event_type: PointerEventType, target: Option<&ClickTrackableMesh>) -> PointerInfo {
    PointerInfo::new(event_type, Some(target.map_or(PickInfo::miss(None), |m| PickInfo::for_mesh(m.id()))))
}

#[cfg(test)]
mod click_tracking_tests {
    use super::*;

    #[test]
    fn test_new_mesh_is_not_rotating() {
        let scene = Scene::new();
        let mesh = ClickTrackableMesh::new("fov", &scene);

        assert!(!mesh.is_rotating());
        assert_eq!(mesh.name(), "fov");
        assert!(scene.contains_mesh(mesh.id()));
    }

    #[test]
    fn test_pointer_down_on_mesh_sets_rotating() {
        let scene = Scene::new();
        let mesh = ClickTrackableMesh::new("m", &scene);

        scene.dispatch_pointer_event(&pointer(PointerEventType::Down, Some(&mesh)));

        assert!(mesh.is_rotating(), "Pointer-down on the mesh should set rotating");
    }

    #[test]
    fn test_pointer_down_on_other_mesh_only_sets_that_mesh() {
        let scene = Scene::new();
        let m1 = ClickTrackableMesh::new("m1", &scene);
        let m2 = ClickTrackableMesh::new("m2", &scene);

        scene.dispatch_pointer_event(&pointer(PointerEventType::Down, Some(&m2)));

        assert!(!m1.is_rotating());
        assert!(m2.is_rotating());
    }

    #[test]
    fn test_pointer_up_on_mesh_does_not_set_rotating() {
        let scene = Scene::new();
        let mesh = ClickTrackableMesh::new("m", &scene);

        scene.dispatch_pointer_event(&pointer(PointerEventType::Up, Some(&mesh)));

        assert!(!mesh.is_rotating());
    }

    #[test]
    fn test_pointer_down_without_pick_result_is_ignored() {
        let scene = Scene::new();
        let mesh = ClickTrackableMesh::new("m", &scene);

        scene.dispatch_pointer_event(&PointerInfo::new(PointerEventType::Down, None));
        scene.dispatch_pointer_event(&pointer(PointerEventType::Down, None));

        assert!(!mesh.is_rotating());
    }

    #[test]
    fn test_non_down_events_never_set_rotating() {
        let scene = Scene::new();
        let mesh = ClickTrackableMesh::new("m", &scene);

        for event_type in PointerEventType::ALL {
            if event_type == PointerEventType::Down {
                continue;
            }
            scene.dispatch_pointer_event(&pointer(event_type, Some(&mesh)));
            assert!(!mesh.is_rotating(), "{:?} must not set rotating", event_type);
        }
    }

    #[test]
    fn test_only_own_pointer_down_sets_rotating() {
        let scene = Scene::new();
        let mesh = ClickTrackableMesh::new("m", &scene);
        let other = ClickTrackableMesh::new("other", &scene);

        let mut steps: Vec<(PointerEventType, Option<&ClickTrackableMesh>)> = Vec::new();
        for event_type in PointerEventType::ALL {
            if event_type != PointerEventType::Down {
                steps.push((event_type, Some(&mesh)));
            }
            steps.push((event_type, Some(&other)));
            steps.push((event_type, None));
        }

        for (event_type, target) in steps {
            scene.dispatch_pointer_event(&pointer(event_type, target));
            scene.dispatch_pointer_event(&PointerInfo::new(event_type, None));
            assert!(
                !mesh.is_rotating(),
                "{:?} on {:?} must not set rotating",
                event_type,
                target.map(|m| m.name())
            );
        }

        scene.dispatch_pointer_event(&pointer(PointerEventType::Down, Some(&mesh)));
        assert!(mesh.is_rotating());
    }

    #[test]
    fn test_pick_from_another_scene_is_ignored() {
        let scene_a = Scene::new();
        let scene_b = Scene::new();
        let a = ClickTrackableMesh::new("first", &scene_a);
        let b = ClickTrackableMesh::new("first", &scene_b);
        assert_ne!(a.id(), b.id(), "Meshes in different scenes must not share an id");

        scene_b.dispatch_pointer_event(&pointer(PointerEventType::Down, Some(&a)));
        assert!(!b.is_rotating(), "A pick of another scene's mesh must not set rotating");

        scene_a.dispatch_pointer_event(&pointer(PointerEventType::Down, Some(&a)));
        assert!(a.is_rotating());
        assert!(!b.is_rotating());
    }

    #[test]
    fn test_rotating_stays_set() {
        let scene = Scene::new();
        let mesh = ClickTrackableMesh::new("m", &scene);
        let other = ClickTrackableMesh::new("other", &scene);

        scene.dispatch_pointer_event(&pointer(PointerEventType::Down, Some(&mesh)));
        scene.dispatch_pointer_event(&pointer(PointerEventType::Up, Some(&mesh)));
        scene.dispatch_pointer_event(&pointer(PointerEventType::Down, Some(&other)));
        scene.dispatch_pointer_event(&pointer(PointerEventType::Down, None));

        assert!(mesh.is_rotating(), "There is no path back to not-rotating");
    }

    #[test]
    fn test_same_name_meshes_are_distinct() {
        let scene = Scene::new();
        let a = ClickTrackableMesh::new("twin", &scene);
        let b = ClickTrackableMesh::new("twin", &scene);

        scene.dispatch_pointer_event(&pointer(PointerEventType::Down, Some(&b)));

        assert!(!a.is_rotating());
        assert!(b.is_rotating());
    }

    #[test]
    fn test_dispose_releases_subscription_and_registration() {
        let scene = Scene::new();
        let kept = ClickTrackableMesh::new("kept", &scene);
        let gone = ClickTrackableMesh::new("gone", &scene);
        assert_eq!(scene.on_pointer_observable().observer_count(), 2);

        let gone_id = gone.id();
        gone.dispose();

        assert_eq!(scene.on_pointer_observable().observer_count(), 1);
        assert!(!scene.contains_mesh(gone_id));
        assert_eq!(scene.mesh_count(), 1);

        scene.dispatch_pointer_event(&pointer(PointerEventType::Down, Some(&kept)));
        assert!(kept.is_rotating());
    }

    #[test]
    fn test_mesh_outlives_scene_handle() {
        let scene = Scene::new();
        let mesh = ClickTrackableMesh::new("m", &scene);
        drop(scene);

        assert!(!mesh.is_rotating());
        assert!(!mesh.mesh().is_registered());
    }

    #[test]
    fn test_click_through_camera_pick() {
        let scene = Scene::new();
        let center = ClickTrackableMesh::new("center", &scene);
        center.mesh().set_bounds(AABB::new(Vec3::splat(-1.0), Vec3::ONE));
        let side = ClickTrackableMesh::new("side", &scene);
        side.mesh().set_bounds(AABB::new(Vec3::splat(-1.0), Vec3::ONE));
        side.mesh().set_position(Vec3::new(-3.0, 0.0, 0.0));

        let camera = Camera::default();
        let viewport = Viewport::default();

        scene.simulate_pointer(PointerEventType::Up, 200.0, 300.0, &camera, viewport);
        scene.simulate_pointer(PointerEventType::Down, 400.0, 300.0, &camera, viewport);

        assert!(center.is_rotating());
        assert!(!side.is_rotating(), "Only a pointer-up landed on the side mesh");
    }

    #[test]
    fn test_mesh_without_bounds_cannot_be_clicked_by_pick() {
        let scene = Scene::new();
        let mesh = ClickTrackableMesh::new("empty", &scene);

        let info = scene.simulate_pointer(
            PointerEventType::Down,
            400.0,
            300.0,
            &Camera::default(),
            Viewport::default(),
        );

        assert_eq!(info.picked_mesh(), None);
        assert!(!mesh.is_rotating());
    }
}
